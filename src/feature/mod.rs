//! Parcel feature service: wire types, query construction, REST client.

pub mod client;
pub mod query;
pub mod source;
pub mod types;

pub use client::FeatureServiceClient;
pub use query::{escape_term, where_clause, ParcelQuery, QueryTarget, TEXT_MATCH_LIMIT};
pub use source::FeatureSource;
pub use types::{
    Extent, FieldValue, MapPoint, ParcelAttributes, ParcelFeature, PolygonGeometry, QueryResponse,
    ServiceErrorBody, SpatialReference, OUT_FIELDS,
};
