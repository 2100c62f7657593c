use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use opendata_nodes::config::Config;
use opendata_nodes::error::NodeError;
use opendata_nodes::logging;
use opendata_nodes::params::{ParamKind, ParamValue, ParamValues};
use opendata_nodes::registry::NodeRegistry;

#[derive(Parser)]
#[command(name = "opendata_nodes")]
#[command(about = "Open geospatial dataset source nodes")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available nodes and their parameters
    List,
    /// Execute a node and print a summary of the result table
    Run {
        /// Node to execute. Available: gdelt_geo, opensky_states, blockchain_datacenters, hub_download
        #[arg(long)]
        node: String,
        /// Parameter override as key=value (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
        /// Write the result table as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_overrides(pairs: &[String]) -> Result<HashMap<String, String>, NodeError> {
    let mut overrides = HashMap::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            NodeError::Config(format!("Expected key=value, got '{}'", pair))
        })?;
        overrides.insert(key.to_string(), value.to_string());
    }
    Ok(overrides)
}

fn render_default(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(s) if s.is_empty() => "\"\"".to_string(),
        ParamValue::Text(s) => s.clone(),
        ParamValue::Integer(i) => i.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let registry = NodeRegistry::with_config(&config)?;

    match cli.command {
        Commands::List => {
            println!("📡 Available nodes:");
            for name in registry.list_nodes() {
                let node = registry.get(name)?;
                println!("\n   {} — {}", name, node.description());
                for spec in node.parameters() {
                    let kind = match spec.kind {
                        ParamKind::Text => "text",
                        ParamKind::Integer => "integer",
                    };
                    println!(
                        "      --param {}=<{}>  (default: {}) {}",
                        spec.name,
                        kind,
                        render_default(&spec.default),
                        spec.help
                    );
                }
            }
        }
        Commands::Run {
            node,
            params,
            output,
        } => {
            let source = registry.get(&node)?;
            let overrides = parse_overrides(&params)?;
            let bound = ParamValues::bind(&source.parameters(), &overrides)?;

            info!(node = %node, "Executing node");
            match source.execute(&bound).await {
                Ok(table) => {
                    println!("\n📊 Result for {}:", node);
                    println!("   Rows: {}", table.row_count());
                    println!("   Columns: {}", table.columns().join(", "));
                    if let Some(crs) = table.crs() {
                        println!("   CRS: {}", crs);
                    }
                    if let Some(path) = output {
                        fs::write(&path, serde_json::to_string_pretty(&table)?)?;
                        println!("   Output file: {}", path.display());
                    }
                }
                Err(e) => {
                    error!("Node execution failed: {}", e);
                    println!("❌ Node execution failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
