//! The seam between the lookup flow and whatever answers queries.
//!
//! The controller and its tests talk to this trait; the REST client is the
//! production implementation.

use async_trait::async_trait;

use crate::error::ParcelError;

use super::types::{MapPoint, ParcelFeature};

/// Read-only access to the parcel layer.
///
/// Empty results are `Ok`; "no match" is an answer, not a failure.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetch one full record (attributes + geometry) by object id.
    async fn fetch_by_object_id(
        &self,
        object_id: i64,
    ) -> Result<Option<ParcelFeature>, ParcelError>;

    /// Hit-test a map point against the layer.
    async fn fetch_at_point(&self, point: MapPoint) -> Result<Option<ParcelFeature>, ParcelError>;

    /// Partial match across owner, TMK, and address columns.
    async fn search(&self, term: &str) -> Result<Vec<ParcelFeature>, ParcelError>;
}
