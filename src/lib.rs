//! Oahu TMK parcel lookup and detail viewer.
//!
//! The map widget, search widget, and feature service are external
//! collaborators; this crate owns the flow between them:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Browser: map SDK widgets + owner-search panel (thin)   │
//! └─────────────────────────────────────────────────────────┘
//!                            │ HTTP
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  server: axum routes (page, config, parcel API)         │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  viewer: ParcelViewer, one handler per user action,     │
//! │  selection (single highlight), search sequencing        │
//! └─────────────────────────────────────────────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌──────────────────────────┐  ┌───────────────────────────┐
//! │ feature: query builder + │  │ view: MapSurface commands │
//! │ REST client (hosted      │  │ (highlight handles,       │
//! │ feature service)         │  │ go-to) for the page       │
//! └──────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! `render` formats attributes into panel/row markup (escaping, dashes for
//! missing values, digit grouping, HST dates); everything user-visible is
//! produced server-side.

pub mod config;
pub mod error;
pub mod feature;
pub mod render;
pub mod search;
pub mod selection;
pub mod server;
pub mod view;
pub mod viewer;

pub use config::{MapConfig, ServiceConfig};
pub use error::ParcelError;
pub use feature::{FeatureServiceClient, FeatureSource, MapPoint, ParcelFeature, ParcelQuery};
pub use search::{SearchOutcome, SearchStatus};
pub use selection::SelectionController;
pub use view::{CommandSurface, HighlightHandle, MapSurface, ViewCommand};
pub use viewer::{PanelUpdate, ParcelViewer, SelectOutcome};
