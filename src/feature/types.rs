//! Wire types for the parcel feature service.
//!
//! Field names mirror the hosted `OahuTMK_Landowners` layer exactly; the
//! serde renames are the contract with the service.

use serde::{Deserialize, Serialize};

/// Attribute fields requested on every query.
pub const OUT_FIELDS: [&str; 16] = [
    "tmk",
    "TMK9TXT",
    "Landowner",
    "Lessee__if_applicable_",
    "Sub_Lessee",
    "Physical_Address",
    "Contact_Info",
    "GISAcres",
    "Recorded_Area_Acres",
    "Recorded_Area_Square_Feet",
    "zone",
    "section",
    "plat",
    "Notes",
    "qpub_link",
    "in_date",
];

/// One attribute value as the service returns it: null, numeric, or text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Null or the empty string. Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Number(_) => false,
            FieldValue::Text(t) => t.is_empty(),
        }
    }

    /// Null or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Number(_) => false,
            FieldValue::Text(t) => t.trim().is_empty(),
        }
    }

    /// This value, or `other` when this one is empty.
    pub fn or<'a>(&'a self, other: &'a FieldValue) -> &'a FieldValue {
        if self.is_empty() {
            other
        } else {
            self
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Unformatted rendering: text as-is, numbers without grouping.
    pub fn raw(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(t) => Some(t.clone()),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
        }
    }
}

/// Parcel attributes, one field per requested column.
///
/// The object id accepts the layer's `OBJECTID_1` plus the `OBJECTID` and
/// `objectid` fallbacks seen on older copies of the service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParcelAttributes {
    #[serde(
        rename = "OBJECTID_1",
        alias = "OBJECTID",
        alias = "objectid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub object_id: Option<i64>,
    #[serde(default)]
    pub tmk: FieldValue,
    #[serde(rename = "TMK9TXT", default)]
    pub tmk_text: FieldValue,
    #[serde(rename = "Landowner", default)]
    pub landowner: FieldValue,
    #[serde(rename = "Lessee__if_applicable_", default)]
    pub lessee: FieldValue,
    #[serde(rename = "Sub_Lessee", default)]
    pub sub_lessee: FieldValue,
    #[serde(rename = "Physical_Address", default)]
    pub physical_address: FieldValue,
    #[serde(rename = "Contact_Info", default)]
    pub contact_info: FieldValue,
    #[serde(rename = "GISAcres", default)]
    pub gis_acres: FieldValue,
    #[serde(rename = "Recorded_Area_Acres", default)]
    pub recorded_area_acres: FieldValue,
    #[serde(rename = "Recorded_Area_Square_Feet", default)]
    pub recorded_area_sqft: FieldValue,
    #[serde(default)]
    pub zone: FieldValue,
    #[serde(default)]
    pub section: FieldValue,
    #[serde(default)]
    pub plat: FieldValue,
    #[serde(rename = "Notes", default)]
    pub notes: FieldValue,
    #[serde(rename = "qpub_link", default)]
    pub qpub_link: FieldValue,
    #[serde(rename = "in_date", default)]
    pub record_date: FieldValue,
}

/// A lon/lat point in WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpatialReference {
    pub wkid: i32,
}

/// Polygon geometry in the service's ring encoding.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PolygonGeometry {
    pub rings: Vec<Vec<[f64; 2]>>,
    #[serde(
        rename = "spatialReference",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub spatial_reference: Option<SpatialReference>,
}

impl PolygonGeometry {
    /// Bounding box over all ring vertices, or `None` for empty geometry.
    pub fn extent(&self) -> Option<Extent> {
        let mut vertices = self.rings.iter().flatten();
        let first = vertices.next()?;
        let mut extent = Extent {
            xmin: first[0],
            ymin: first[1],
            xmax: first[0],
            ymax: first[1],
        };
        for v in vertices {
            extent.xmin = extent.xmin.min(v[0]);
            extent.ymin = extent.ymin.min(v[1]);
            extent.xmax = extent.xmax.max(v[0]);
            extent.ymax = extent.ymax.max(v[1]);
        }
        Some(extent)
    }

    /// Extent midpoint; the viewport re-centers here.
    pub fn center(&self) -> Option<MapPoint> {
        let e = self.extent()?;
        Some(MapPoint {
            x: (e.xmin + e.xmax) / 2.0,
            y: (e.ymin + e.ymax) / 2.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// One feature record: attributes plus optional polygon.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParcelFeature {
    pub attributes: ParcelAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<PolygonGeometry>,
}

impl ParcelFeature {
    pub fn object_id(&self) -> Option<i64> {
        self.attributes.object_id
    }
}

/// Response envelope for the layer's `query` endpoint.
///
/// The service reports failures in-band with HTTP 200, so the error body
/// rides alongside the feature list.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(rename = "objectIdFieldName", default)]
    pub object_id_field_name: Option<String>,
    #[serde(default)]
    pub features: Vec<ParcelFeature>,
    #[serde(default)]
    pub error: Option<ServiceErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_decodes_all_shapes() {
        let attrs: ParcelAttributes = serde_json::from_str(
            r#"{"Landowner": "KAMEHAMEHA SCHOOLS", "GISAcres": 12.5, "Notes": null}"#,
        )
        .unwrap();
        assert_eq!(attrs.landowner, FieldValue::text("KAMEHAMEHA SCHOOLS"));
        assert_eq!(attrs.gis_acres, FieldValue::Number(12.5));
        assert_eq!(attrs.notes, FieldValue::Null);
        assert_eq!(attrs.record_date, FieldValue::Null);
    }

    #[test]
    fn object_id_fallback_chain() {
        for key in ["OBJECTID_1", "OBJECTID", "objectid"] {
            let json = format!(r#"{{"{key}": 42}}"#);
            let attrs: ParcelAttributes = serde_json::from_str(&json).unwrap();
            assert_eq!(attrs.object_id, Some(42), "field {key}");
        }
    }

    #[test]
    fn query_response_with_error_body() {
        let resp: QueryResponse = serde_json::from_str(
            r#"{"error": {"code": 400, "message": "Unable to complete operation.", "details": []}}"#,
        )
        .unwrap();
        assert!(resp.features.is_empty());
        let err = resp.error.unwrap();
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "Unable to complete operation.");
    }

    #[test]
    fn polygon_extent_and_center() {
        let geom = PolygonGeometry {
            rings: vec![vec![
                [-158.0, 21.4],
                [-157.9, 21.4],
                [-157.9, 21.5],
                [-158.0, 21.5],
            ]],
            spatial_reference: Some(SpatialReference { wkid: 4326 }),
        };
        let center = geom.center().unwrap();
        assert!((center.x - -157.95).abs() < 1e-9);
        assert!((center.y - 21.45).abs() < 1e-9);

        let empty = PolygonGeometry {
            rings: vec![],
            spatial_reference: None,
        };
        assert!(empty.center().is_none());
    }

    #[test]
    fn value_fallback_prefers_nonempty() {
        let primary = FieldValue::text("");
        let secondary = FieldValue::Number(187.0);
        assert_eq!(primary.or(&secondary), &secondary);

        let set = FieldValue::text("1-9-8-001:001");
        assert_eq!(set.or(&secondary), &set);
    }
}
