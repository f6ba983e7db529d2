//! Seams to the external map/view widget.
//!
//! The widget itself lives in the browser; the library only needs two of
//! its operations: mark a feature as selected (returning a removable
//! handle) and re-center the viewport. `CommandSurface` is the production
//! implementation: it records the operations as commands that ride back to
//! the page on each HTTP response, where the real widget applies them.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use uuid::Uuid;

use crate::feature::{MapPoint, ParcelFeature, PolygonGeometry};

/// Opaque reference to one visual highlight; releasing it removes the
/// highlight from the view.
pub trait HighlightHandle: Send {
    fn release(self: Box<Self>);
}

/// The view collaborator.
pub trait MapSurface: Send + Sync {
    /// Mark a feature as visually selected.
    fn highlight(&self, feature: &ParcelFeature) -> Box<dyn HighlightHandle>;

    /// Re-center the viewport on a geometry.
    fn go_to(&self, geometry: &PolygonGeometry);
}

/// One instruction for the remote map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewCommand {
    Highlight {
        handle: Uuid,
        #[serde(skip_serializing_if = "Option::is_none")]
        object_id: Option<i64>,
    },
    Release {
        handle: Uuid,
    },
    GoTo {
        center: MapPoint,
    },
}

/// `MapSurface` that queues commands for the next HTTP response.
///
/// Clones share the queue, so the server can hand one clone to the
/// controller and drain the other per request.
#[derive(Clone, Default)]
pub struct CommandSurface {
    queue: Arc<Mutex<Vec<ViewCommand>>>,
}

impl CommandSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything queued since the last drain.
    pub fn drain(&self) -> Vec<ViewCommand> {
        std::mem::take(&mut *self.queue.lock().unwrap())
    }
}

struct QueuedHighlight {
    handle: Uuid,
    queue: Arc<Mutex<Vec<ViewCommand>>>,
}

impl HighlightHandle for QueuedHighlight {
    fn release(self: Box<Self>) {
        self.queue
            .lock()
            .unwrap()
            .push(ViewCommand::Release {
                handle: self.handle,
            });
    }
}

impl MapSurface for CommandSurface {
    fn highlight(&self, feature: &ParcelFeature) -> Box<dyn HighlightHandle> {
        let handle = Uuid::new_v4();
        self.queue.lock().unwrap().push(ViewCommand::Highlight {
            handle,
            object_id: feature.object_id(),
        });
        Box::new(QueuedHighlight {
            handle,
            queue: Arc::clone(&self.queue),
        })
    }

    fn go_to(&self, geometry: &PolygonGeometry) {
        if let Some(center) = geometry.center() {
            self.queue.lock().unwrap().push(ViewCommand::GoTo { center });
        }
    }
}
