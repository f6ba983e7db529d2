//! Selection state: the single active highlight.

use crate::feature::ParcelFeature;
use crate::view::{HighlightHandle, MapSurface};

/// Owns the one optional highlight handle.
///
/// Replacing always releases the prior handle before acquiring the new
/// one, so at most one highlight is ever visible.
#[derive(Default)]
pub struct SelectionController {
    active: Option<Box<dyn HighlightHandle>>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the highlight to `feature`.
    pub fn replace(&mut self, surface: &dyn MapSurface, feature: &ParcelFeature) {
        if let Some(prior) = self.active.take() {
            prior.release();
        }
        self.active = Some(surface.highlight(feature));
    }

    /// Release the highlight, if any, and leave the state empty.
    pub fn clear(&mut self) {
        if let Some(prior) = self.active.take() {
            prior.release();
        }
    }

    pub fn has_selection(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::PolygonGeometry;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Surface that counts live highlights.
    #[derive(Clone, Default)]
    struct CountingSurface {
        live: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    struct CountingHandle {
        live: Arc<AtomicUsize>,
    }

    impl HighlightHandle for CountingHandle {
        fn release(self: Box<Self>) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl MapSurface for CountingSurface {
        fn highlight(&self, _feature: &ParcelFeature) -> Box<dyn HighlightHandle> {
            let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(live, Ordering::SeqCst);
            Box::new(CountingHandle {
                live: Arc::clone(&self.live),
            })
        }

        fn go_to(&self, _geometry: &PolygonGeometry) {}
    }

    #[test]
    fn at_most_one_highlight_across_replacements() {
        let surface = CountingSurface::default();
        let mut selection = SelectionController::new();

        for _ in 0..5 {
            selection.replace(&surface, &ParcelFeature::default());
        }

        assert_eq!(surface.live.load(Ordering::SeqCst), 1);
        assert_eq!(surface.peak.load(Ordering::SeqCst), 1);
        assert!(selection.has_selection());
    }

    #[test]
    fn clear_releases_and_empties() {
        let surface = CountingSurface::default();
        let mut selection = SelectionController::new();

        selection.replace(&surface, &ParcelFeature::default());
        selection.clear();

        assert_eq!(surface.live.load(Ordering::SeqCst), 0);
        assert!(!selection.has_selection());

        // Clearing an empty selection is a no-op.
        selection.clear();
        assert_eq!(surface.live.load(Ordering::SeqCst), 0);
    }
}
