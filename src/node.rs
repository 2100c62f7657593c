use crate::error::Result;
use crate::params::{ParamSpec, ParamValues};
use crate::table::GeoTable;

/// Core trait every dataset source node implements.
///
/// A node declares its parameters, and one execution binds those parameters,
/// performs a single fetch against the upstream source, and emits one table.
/// Nodes hold no state between executions and expose no output schema ahead
/// of execution; the column set is only known once the response is in hand.
#[async_trait::async_trait]
pub trait DatasetNode: Send + Sync {
    /// Unique identifier for this node
    fn node_name(&self) -> &'static str;

    /// One-line description shown in listings
    fn description(&self) -> &'static str;

    /// Declared parameters with their defaults
    fn parameters(&self) -> Vec<ParamSpec>;

    /// Fetch from the upstream source and emit the result table
    async fn execute(&self, params: &ParamValues) -> Result<GeoTable>;
}
