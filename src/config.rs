//! Runtime configuration.
//!
//! Service settings come from the environment with sensible defaults, the
//! same way the server binary is configured everywhere else in this stack.
//! The map/view constants describe the Oahu deployment and are served to
//! the viewer page verbatim via `/api/config`.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::ParcelError;
use crate::feature::OUT_FIELDS;

/// Hosted layer with Oahu TMK parcels and landowner attributes.
pub const DEFAULT_SERVICE_URL: &str = "https://services2.arcgis.com/iRXQh9fsThHqHhAy/ArcGIS/rest/services/OahuTMK_Landowners/FeatureServer/0";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;

/// Settings for the feature-service client.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Layer URL (the `query` endpoint is derived from it).
    pub service_url: Url,
    /// Request timeout for the HTTP client.
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Load from `PARCEL_SERVICE_URL` / `HTTP_TIMEOUT_SECS`, falling back
    /// to the Oahu layer and a 30s timeout.
    pub fn from_env() -> Result<Self, ParcelError> {
        let raw = std::env::var("PARCEL_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
        let service_url = Url::parse(&raw).map_err(|e| ParcelError::InvalidServiceUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        let timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            service_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Port for the viewer server (`SERVER_PORT`, default 3000).
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Map, layer, and search-widget setup for the viewer page.
///
/// The page builds the external map SDK objects from this payload so the
/// server stays the single owner of deployment constants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub service_url: String,
    pub basemap: &'static str,
    /// Initial viewport center, lon/lat.
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub layer_title: &'static str,
    /// Fill RGBA for the parcel layer renderer.
    pub fill_color: [f64; 4],
    /// Outline RGBA for the parcel layer renderer.
    pub outline_color: [f64; 4],
    pub outline_width: f64,
    pub out_fields: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
    pub display_field: &'static str,
    pub suggestion_template: &'static str,
    pub result_template: &'static str,
    pub max_suggestions: u8,
    pub min_suggest_characters: u8,
    pub search_placeholder: &'static str,
    pub source_name: &'static str,
}

impl MapConfig {
    /// Viewer defaults for the given layer URL.
    pub fn for_service(service_url: &str) -> Self {
        Self {
            service_url: service_url.to_string(),
            basemap: "topo-vector",
            center: [-157.98, 21.47],
            zoom: 10,
            min_zoom: 9,
            max_zoom: 20,
            layer_title: "Oahu parcels",
            fill_color: [0.0, 0.0, 0.0, 0.0],
            outline_color: [32.0, 52.0, 62.0, 0.35],
            outline_width: 0.35,
            out_fields: OUT_FIELDS.to_vec(),
            search_fields: vec!["Landowner", "TMK9TXT", "Physical_Address"],
            display_field: "TMK9TXT",
            suggestion_template: "{Landowner} | TMK {TMK9TXT} | {Physical_Address}",
            result_template: "{Landowner} | TMK {TMK9TXT}",
            max_suggestions: 12,
            min_suggest_characters: 2,
            search_placeholder: "Search owner, TMK, or address",
            source_name: "Oahu Parcels",
        }
    }
}
