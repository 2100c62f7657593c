use crate::error::{NodeError, Result};
use geo_types::Point;
use serde::Serialize;
use serde_json::Value;

/// Spatial reference of all longitude/latitude coordinates emitted here.
pub const WGS84: &str = "EPSG:4326";

/// A column of point geometries covering every row of a table, together
/// with the coordinate reference system the coordinates live in.
#[derive(Debug, Clone, Serialize)]
pub struct GeometryColumn {
    points: Vec<Point<f64>>,
    crs: String,
}

impl GeometryColumn {
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    pub fn crs(&self) -> &str {
        &self.crs
    }
}

/// The tabular result a node emits: ordered named columns, rows of scalar
/// cells, and an optional geometry column.
///
/// Rows always have exactly one cell per column, and an attached geometry
/// column always has exactly one point per row. Both are enforced at
/// construction so a table is never partially geometric.
#[derive(Debug, Clone, Serialize)]
pub struct GeoTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    geometry: Option<GeometryColumn>,
}

impl GeoTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            geometry: None,
        }
    }

    pub fn push_row(&mut self, cells: Vec<Value>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(NodeError::Api {
                message: format!(
                    "Row has {} cells, table has {} columns",
                    cells.len(),
                    self.columns.len()
                ),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn attach_geometry(&mut self, points: Vec<Point<f64>>, crs: &str) -> Result<()> {
        if points.len() != self.rows.len() {
            return Err(NodeError::Api {
                message: format!(
                    "Geometry column has {} points for {} rows",
                    points.len(),
                    self.rows.len()
                ),
            });
        }
        self.geometry = Some(GeometryColumn {
            points,
            crs: crs.to_string(),
        });
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn geometry(&self) -> Option<&GeometryColumn> {
        self.geometry.as_ref()
    }

    pub fn crs(&self) -> Option<&str> {
        self.geometry.as_ref().map(|g| g.crs())
    }
}
