use constants::sorting::VIEW_DIRTY_THRESHOLD;
use glam::Mat4;

use crate::depth::view_forward_row;

/// Compares the forward row of each new view-projection against a baseline.
///
/// When `|dot - 1|` exceeds the threshold the order is marked dirty and the
/// baseline is rebased onto the new matrix immediately, whether or not a
/// sort can be dispatched right now. Translation along the view axis does
/// not change the forward row and so never trips the check on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewChangeTracker {
    baseline: Mat4,
    dirty: bool,
    threshold: f32,
}

impl Default for ViewChangeTracker {
    fn default() -> Self {
        Self::with_threshold(VIEW_DIRTY_THRESHOLD)
    }
}

impl ViewChangeTracker {
    /// Starts dirty so the first frame always produces an ordering.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            baseline: Mat4::IDENTITY,
            dirty: true,
            threshold,
        }
    }

    /// Feed the current view-projection. Returns the dirty flag afterwards.
    pub fn observe(&mut self, view_projection: Mat4) -> bool {
        let dot = view_forward_row(&self.baseline).dot(view_forward_row(&view_projection));
        if (dot - 1.0).abs() > self.threshold {
            self.dirty = true;
            self.baseline = view_projection;
        }
        self.dirty
    }

    /// Force a re-sort without a view change (new scene, new active count).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn baseline(&self) -> Mat4 {
        self.baseline
    }
}
