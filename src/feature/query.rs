//! Query construction for the layer's REST `query` endpoint.
//!
//! Three request shapes exist: fetch one record by object id, hit-test a
//! map point, and free-text matching across the owner/TMK/address columns.
//! All of them carry the explicit field list and the geometry flag.

use serde_json::json;

use super::types::{MapPoint, OUT_FIELDS};

/// Result cap for free-text matching.
pub const TEXT_MATCH_LIMIT: usize = 15;

const WGS84: &str = "4326";

/// What a query selects on.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryTarget {
    /// Exactly one record by object id.
    ObjectId(i64),
    /// Parcels intersecting a point.
    AtPoint(MapPoint),
    /// Partial match against owner, both TMK columns, and address.
    Matching(String),
}

/// A built parcel query, ready to serialize into request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelQuery {
    target: QueryTarget,
    return_geometry: bool,
}

impl ParcelQuery {
    pub fn by_object_id(object_id: i64) -> Self {
        Self {
            target: QueryTarget::ObjectId(object_id),
            return_geometry: true,
        }
    }

    pub fn at_point(point: MapPoint) -> Self {
        Self {
            target: QueryTarget::AtPoint(point),
            return_geometry: true,
        }
    }

    pub fn matching(term: impl Into<String>) -> Self {
        Self {
            target: QueryTarget::Matching(term.into()),
            return_geometry: true,
        }
    }

    pub fn with_geometry(mut self, return_geometry: bool) -> Self {
        self.return_geometry = return_geometry;
        self
    }

    pub fn target(&self) -> &QueryTarget {
        &self.target
    }

    /// One record for id and point lookups, fifteen for text matching.
    pub fn record_limit(&self) -> usize {
        match self.target {
            QueryTarget::Matching(_) => TEXT_MATCH_LIMIT,
            _ => 1,
        }
    }

    /// Full parameter list for the `query` endpoint.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("f".to_string(), "json".to_string()),
            ("outFields".to_string(), OUT_FIELDS.join(",")),
            (
                "returnGeometry".to_string(),
                self.return_geometry.to_string(),
            ),
            ("outSR".to_string(), WGS84.to_string()),
            (
                "resultRecordCount".to_string(),
                self.record_limit().to_string(),
            ),
        ];

        match &self.target {
            QueryTarget::ObjectId(id) => {
                params.push(("objectIds".to_string(), id.to_string()));
            }
            QueryTarget::AtPoint(point) => {
                let geometry = json!({
                    "x": point.x,
                    "y": point.y,
                    "spatialReference": { "wkid": 4326 },
                });
                params.push(("geometry".to_string(), geometry.to_string()));
                params.push(("geometryType".to_string(), "esriGeometryPoint".to_string()));
                params.push(("inSR".to_string(), WGS84.to_string()));
                params.push((
                    "spatialRel".to_string(),
                    "esriSpatialRelIntersects".to_string(),
                ));
            }
            QueryTarget::Matching(term) => {
                params.push(("where".to_string(), where_clause(term)));
            }
        }

        params
    }
}

/// Double single quotes so a term cannot break out of the filter string.
pub fn escape_term(term: &str) -> String {
    term.replace('\'', "''")
}

/// Case-insensitive partial match across the four searchable columns.
pub fn where_clause(term: &str) -> String {
    let t = escape_term(term);
    [
        format!("UPPER(Landowner) LIKE UPPER('%{t}%')"),
        format!("TMK9TXT LIKE '%{t}%'"),
        format!("UPPER(Physical_Address) LIKE UPPER('%{t}%')"),
        format!("tmk LIKE '%{t}%'"),
    ]
    .join(" OR ")
}
