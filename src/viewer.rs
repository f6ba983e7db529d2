//! The viewer controller.
//!
//! One `ParcelViewer` per view session owns everything the flow mutates:
//! the feature source, the map surface, the single active highlight, and
//! the owner-search sequence. Each user action maps to one handler, and
//! each handler produces one of a small set of outcomes: update the
//! panel, show a status, or do nothing.

use serde::Serialize;

use crate::feature::{FeatureSource, MapPoint, ParcelFeature, PolygonGeometry};
use crate::render;
use crate::search::{normalize_term, ResultRow, SearchOutcome, SearchStatus};
use crate::selection::SelectionController;
use crate::view::MapSurface;

/// Shown once the view is ready.
pub const READY_MESSAGE: &str = "Map ready. Click any parcel on Oahu.";
/// Shown when a click hits no parcel.
pub const NO_PARCEL_MESSAGE: &str =
    "No parcel found at that point. Try zooming in and clicking inside a parcel.";
/// Shown when a lookup fails outright.
pub const LOOKUP_FAILED_MESSAGE: &str = "Parcel lookup failed. Try again.";

/// New content for the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelUpdate {
    pub html: String,
    /// True for notices (the panel renders them in its empty style).
    pub empty: bool,
}

impl PanelUpdate {
    fn details(html: String) -> Self {
        Self { html, empty: false }
    }

    fn notice(message: &str) -> Self {
        Self {
            html: render::render_notice(message),
            empty: true,
        }
    }
}

/// Outcome of a selection-producing action (click, widget pick, row pick).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// A parcel is now selected and highlighted.
    Selected {
        panel: PanelUpdate,
        #[serde(skip_serializing_if = "Option::is_none")]
        object_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        geometry: Option<PolygonGeometry>,
    },
    /// Nothing there; highlight cleared, panel shows a notice.
    NotFound { panel: PanelUpdate },
    /// The source failed; selection untouched, panel shows a notice.
    Failed { panel: PanelUpdate },
    /// Nothing to do (e.g. a picked row vanished from the service).
    Ignored,
}

/// A submitted owner search waiting on its response.
#[derive(Debug)]
pub struct SearchTicket {
    seq: u64,
    term: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

/// What a submit turned into: an immediate answer or a pending query.
#[derive(Debug)]
pub enum SearchSubmit {
    /// Blank input; answer now, nothing queried.
    Respond(SearchOutcome),
    /// Run the query, then finish with `complete_owner_search`.
    Query(SearchTicket),
}

/// Controller for one view session.
pub struct ParcelViewer<S, V> {
    source: S,
    surface: V,
    selection: SelectionController,
    search_seq: u64,
}

impl<S: FeatureSource, V: MapSurface> ParcelViewer<S, V> {
    pub fn new(source: S, surface: V) -> Self {
        Self {
            source,
            surface,
            selection: SelectionController::new(),
            search_seq: 0,
        }
    }

    /// Initial panel content once the view is up.
    pub fn on_ready(&self) -> PanelUpdate {
        PanelUpdate::notice(READY_MESSAGE)
    }

    /// Map click: hit-test the point, then select or clear.
    pub async fn handle_map_click(&mut self, point: MapPoint) -> SelectOutcome {
        match self.source.fetch_at_point(point).await {
            Ok(Some(feature)) => self.select(feature, false),
            Ok(None) => {
                self.selection.clear();
                SelectOutcome::NotFound {
                    panel: PanelUpdate::notice(NO_PARCEL_MESSAGE),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "point lookup failed");
                SelectOutcome::Failed {
                    panel: PanelUpdate::notice(LOOKUP_FAILED_MESSAGE),
                }
            }
        }
    }

    /// Search-widget selection: the widget hands over a feature reference;
    /// re-fetch the full record when it carries an id, otherwise render
    /// what it gave us.
    pub async fn handle_search_select(&mut self, feature: ParcelFeature) -> SelectOutcome {
        let full = match feature.object_id() {
            Some(id) => match self.source.fetch_by_object_id(id).await {
                Ok(Some(full)) => full,
                Ok(None) => feature,
                Err(err) => {
                    tracing::warn!(error = %err, object_id = id, "full fetch failed");
                    return SelectOutcome::Failed {
                        panel: PanelUpdate::notice(LOOKUP_FAILED_MESSAGE),
                    };
                }
            },
            None => feature,
        };
        self.select(full, false)
    }

    /// Result-row pick: full fetch, select, and re-center the view.
    pub async fn handle_result_pick(&mut self, object_id: i64) -> SelectOutcome {
        match self.source.fetch_by_object_id(object_id).await {
            Ok(Some(feature)) => self.select(feature, true),
            Ok(None) => SelectOutcome::Ignored,
            Err(err) => {
                tracing::warn!(error = %err, object_id, "result pick failed");
                SelectOutcome::Failed {
                    panel: PanelUpdate::notice(LOOKUP_FAILED_MESSAGE),
                }
            }
        }
    }

    /// Submit the owner-search input. Blank input answers immediately with
    /// the prompt; otherwise a ticket with the next sequence token is
    /// issued and the caller finishes via [`complete_owner_search`].
    ///
    /// [`complete_owner_search`]: Self::complete_owner_search
    pub fn begin_owner_search(&mut self, raw: &str) -> SearchSubmit {
        match normalize_term(raw) {
            None => SearchSubmit::Respond(SearchOutcome::new(
                self.search_seq,
                SearchStatus::Prompt,
                Vec::new(),
            )),
            Some(term) => {
                self.search_seq += 1;
                SearchSubmit::Query(SearchTicket {
                    seq: self.search_seq,
                    term,
                })
            }
        }
    }

    /// Run the ticketed query. A ticket that is no longer the latest by
    /// the time the response lands reports itself superseded so stale
    /// results never overwrite newer ones.
    pub async fn complete_owner_search(&mut self, ticket: SearchTicket) -> SearchOutcome {
        let result = self.source.search(&ticket.term).await;

        if ticket.seq != self.search_seq {
            tracing::debug!(seq = ticket.seq, latest = self.search_seq, "search superseded");
            return SearchOutcome::superseded(ticket.seq);
        }

        match result {
            Ok(features) if features.is_empty() => {
                SearchOutcome::new(ticket.seq, SearchStatus::NoMatches, Vec::new())
            }
            Ok(features) => {
                let rows: Vec<ResultRow> = features
                    .iter()
                    .map(|f| ResultRow {
                        object_id: f.object_id(),
                        html: render::render_result_row(&f.attributes),
                    })
                    .collect();
                SearchOutcome::new(
                    ticket.seq,
                    SearchStatus::Matches { count: rows.len() },
                    rows,
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, term = %ticket.term, "owner search failed");
                SearchOutcome::new(ticket.seq, SearchStatus::Failed, Vec::new())
            }
        }
    }

    /// Submit and complete in one step.
    pub async fn handle_owner_search(&mut self, raw: &str) -> SearchOutcome {
        match self.begin_owner_search(raw) {
            SearchSubmit::Respond(outcome) => outcome,
            SearchSubmit::Query(ticket) => self.complete_owner_search(ticket).await,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    fn select(&mut self, feature: ParcelFeature, recenter: bool) -> SelectOutcome {
        self.selection.replace(&self.surface, &feature);
        if recenter {
            if let Some(geometry) = &feature.geometry {
                self.surface.go_to(geometry);
            }
        }
        SelectOutcome::Selected {
            panel: PanelUpdate::details(render::render_details(&feature.attributes)),
            object_id: feature.object_id(),
            geometry: feature.geometry,
        }
    }
}
