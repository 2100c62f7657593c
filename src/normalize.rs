//! Converts raw JSON payloads into `GeoTable`s.
//!
//! Two record shapes occur across the sources: keyed objects (schema either
//! declared up front or inferred from the keys in the payload) and positional
//! tuples validated against a fixed column list.

use crate::error::{NodeError, Result};
use crate::table::{GeoTable, WGS84};
use geo_types::Point;
use serde_json::Value;

/// How a node's column set is resolved.
#[derive(Debug, Clone)]
pub enum SchemaPolicy {
    /// The column list is known statically and every record is projected
    /// onto it.
    Fixed(&'static [&'static str]),
    /// Columns are the record keys found in the payload, in encounter order.
    Inferred,
}

/// Names of the record fields holding point coordinates.
#[derive(Debug, Clone)]
pub struct GeoFields {
    pub longitude: &'static str,
    pub latitude: &'static str,
}

fn resolve_columns(records: &[Value], schema: &SchemaPolicy) -> Result<Vec<String>> {
    match schema {
        SchemaPolicy::Fixed(columns) => Ok(columns.iter().map(|c| c.to_string()).collect()),
        SchemaPolicy::Inferred => {
            let mut columns: Vec<String> = Vec::new();
            for record in records {
                let object = record.as_object().ok_or_else(|| NodeError::Api {
                    message: format!("Expected a JSON object record, got: {}", record),
                })?;
                for key in object.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
            Ok(columns)
        }
    }
}

fn coordinate(record: &Value, field: &str) -> Result<f64> {
    record
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| NodeError::MissingField(format!("{} not found", field)))
}

/// Build a table from keyed records. Cells missing from a record come out
/// as null. When `geo` is given, every record must carry numeric
/// coordinates under the named fields; the resulting point column is WGS 84.
pub fn records_to_table(
    records: &[Value],
    schema: &SchemaPolicy,
    geo: Option<&GeoFields>,
) -> Result<GeoTable> {
    let columns = resolve_columns(records, schema)?;
    let mut table = GeoTable::new(columns);
    let mut points = Vec::with_capacity(records.len());

    for record in records {
        let cells = table
            .columns()
            .iter()
            .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
            .collect();
        table.push_row(cells)?;

        if let Some(fields) = geo {
            let lon = coordinate(record, fields.longitude)?;
            let lat = coordinate(record, fields.latitude)?;
            points.push(Point::new(lon, lat));
        }
    }

    if geo.is_some() {
        table.attach_geometry(points, WGS84)?;
    }
    Ok(table)
}

/// Build a table from positional tuples under a fixed column list.
///
/// Each tuple must have exactly one element per column. Coordinate cells at
/// the given indices become the WGS 84 point column; null coordinates
/// propagate as NaN rather than dropping the row.
pub fn tuples_to_table(
    tuples: &[Value],
    columns: &'static [&'static str],
    lon_index: usize,
    lat_index: usize,
) -> Result<GeoTable> {
    let mut table = GeoTable::new(columns.iter().map(|c| c.to_string()).collect());
    let mut points = Vec::with_capacity(tuples.len());

    for tuple in tuples {
        let cells = tuple.as_array().ok_or_else(|| NodeError::Api {
            message: format!("Expected a JSON array record, got: {}", tuple),
        })?;
        if cells.len() != columns.len() {
            return Err(NodeError::Api {
                message: format!(
                    "Record has {} fields, expected {}",
                    cells.len(),
                    columns.len()
                ),
            });
        }
        let lon = cells[lon_index].as_f64().unwrap_or(f64::NAN);
        let lat = cells[lat_index].as_f64().unwrap_or(f64::NAN);
        points.push(Point::new(lon, lat));
        table.push_row(cells.clone())?;
    }

    table.attach_geometry(points, WGS84)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inferred_schema_uses_keys_in_encounter_order() {
        let records = vec![
            json!({"name": "a", "longitude": 1.0, "latitude": 2.0}),
            json!({"name": "b", "longitude": 3.0, "latitude": 4.0, "extra": true}),
        ];
        let table = records_to_table(&records, &SchemaPolicy::Inferred, None).unwrap();
        assert_eq!(table.columns(), &["name", "longitude", "latitude", "extra"]);
        // The first record has no "extra" key, so its cell is null.
        assert_eq!(table.rows()[0][3], Value::Null);
    }

    #[test]
    fn test_fixed_schema_projects_records() {
        let records = vec![json!({"b": 2, "a": 1, "ignored": 0})];
        let table =
            records_to_table(&records, &SchemaPolicy::Fixed(&["a", "b"]), None).unwrap();
        assert_eq!(table.columns(), &["a", "b"]);
        assert_eq!(table.rows()[0], vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_empty_payload_yields_zero_rows() {
        let table = records_to_table(&[], &SchemaPolicy::Inferred, None).unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());

        let fixed = records_to_table(&[], &SchemaPolicy::Fixed(&["a"]), None).unwrap();
        assert_eq!(fixed.row_count(), 0);
        assert_eq!(fixed.columns(), &["a"]);
    }

    #[test]
    fn test_geometry_matches_coordinate_fields() {
        let records = vec![json!({"longitude": -122.3, "latitude": 47.6})];
        let geo = GeoFields {
            longitude: "longitude",
            latitude: "latitude",
        };
        let table =
            records_to_table(&records, &SchemaPolicy::Inferred, Some(&geo)).unwrap();
        let points = table.geometry().unwrap().points();
        assert_eq!(points[0], Point::new(-122.3, 47.6));
        assert_eq!(table.crs(), Some(WGS84));
    }

    #[test]
    fn test_missing_coordinate_field_is_fatal() {
        let records = vec![json!({"name": "no coords"})];
        let geo = GeoFields {
            longitude: "longitude",
            latitude: "latitude",
        };
        let err = records_to_table(&records, &SchemaPolicy::Inferred, Some(&geo)).unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_tuple_arity_mismatch_is_fatal() {
        let tuples = vec![json!([1, 2, 3])];
        let err = tuples_to_table(&tuples, &["a", "b"], 0, 1).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_tuple_null_coordinates_become_nan_points() {
        let tuples = vec![json!(["x", null, null])];
        let table = tuples_to_table(&tuples, &["id", "lon", "lat"], 1, 2).unwrap();
        let point = table.geometry().unwrap().points()[0];
        assert!(point.x().is_nan());
        assert!(point.y().is_nan());
        // The cells keep their nulls even though the point is NaN.
        assert_eq!(table.rows()[0][1], Value::Null);
    }
}
