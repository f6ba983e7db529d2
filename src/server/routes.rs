//! HTTP endpoints for the viewer page.
//!
//! Every response carries server-rendered markup plus the view commands
//! queued while handling the action; the page applies both verbatim. "No
//! match" is a normal 200; the only hard failures here are bugs.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::feature::{MapPoint, ParcelAttributes, ParcelFeature};
use crate::search::{SearchOutcome, SearchStatus};
use crate::view::ViewCommand;
use crate::viewer::{PanelUpdate, SelectOutcome};

use super::state::AppState;

/// Serve the viewer page.
pub async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Map/layer/search-widget setup plus the wording the page needs before
/// the first API response arrives.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(flatten)]
    map: MapConfig,
    searching_message: String,
    ready_panel: PanelUpdate,
}

pub async fn viewer_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let ready_panel = state.viewer.lock().await.on_ready();
    Json(ConfigResponse {
        map: state.map_config.clone(),
        searching_message: SearchStatus::Searching.message(),
        ready_panel,
    })
}

#[derive(Deserialize)]
pub struct PointParams {
    lon: f64,
    lat: f64,
}

#[derive(Deserialize, Default)]
pub struct SelectParams {
    /// Re-center the viewport on the parcel (result-row picks do).
    #[serde(default, rename = "goto")]
    recenter: bool,
}

#[derive(Deserialize, Default)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Selection outcome plus the queued view commands.
#[derive(Serialize)]
pub struct SelectResponse {
    #[serde(flatten)]
    outcome: SelectOutcome,
    commands: Vec<ViewCommand>,
}

/// Map click at a lon/lat point.
pub async fn parcel_at_point(
    State(state): State<AppState>,
    Query(params): Query<PointParams>,
) -> Json<SelectResponse> {
    let (outcome, commands) = {
        let mut viewer = state.viewer.lock().await;
        let outcome = viewer
            .handle_map_click(MapPoint {
                x: params.lon,
                y: params.lat,
            })
            .await;
        // Drain under the lock so commands never bleed across requests.
        (outcome, state.surface.drain())
    };
    Json(SelectResponse { outcome, commands })
}

/// Select a parcel by object id: the search widget's pick (`goto=false`)
/// or an owner-search result row (`goto=true`).
pub async fn parcel_select(
    State(state): State<AppState>,
    Path(object_id): Path<i64>,
    Query(params): Query<SelectParams>,
) -> Json<SelectResponse> {
    let (outcome, commands) = {
        let mut viewer = state.viewer.lock().await;
        let outcome = if params.recenter {
            viewer.handle_result_pick(object_id).await
        } else {
            // The widget's event feature arrives as just its id; the
            // handler re-fetches the full record.
            let stub = ParcelFeature {
                attributes: ParcelAttributes {
                    object_id: Some(object_id),
                    ..Default::default()
                },
                geometry: None,
            };
            viewer.handle_search_select(stub).await
        };
        (outcome, state.surface.drain())
    };
    Json(SelectResponse { outcome, commands })
}

/// Owner/TMK/address free-text search.
pub async fn owner_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchOutcome> {
    let outcome = {
        let mut viewer = state.viewer.lock().await;
        viewer.handle_owner_search(&params.q).await
    };
    Json(outcome)
}
