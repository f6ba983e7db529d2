//! Shared application state for the viewer server.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::MapConfig;
use crate::feature::FeatureServiceClient;
use crate::view::CommandSurface;
use crate::viewer::ParcelViewer;

/// The one controller instance, serialized behind a mutex so handlers
/// preserve the single-threaded ordering of the original event loop.
pub type SharedViewer = Arc<Mutex<ParcelViewer<FeatureServiceClient, CommandSurface>>>;

#[derive(Clone)]
pub struct AppState {
    pub viewer: SharedViewer,
    /// Same queue the viewer's surface writes to; drained per response.
    pub surface: CommandSurface,
    pub map_config: MapConfig,
}

impl AppState {
    pub fn new(
        viewer: ParcelViewer<FeatureServiceClient, CommandSurface>,
        surface: CommandSurface,
        map_config: MapConfig,
    ) -> Self {
        Self {
            viewer: Arc::new(Mutex::new(viewer)),
            surface,
            map_config,
        }
    }
}
