//! The embedded page viewer, as seen by the navigation controller.

use crate::types::navigation::ViewerTarget;

/// Renders whatever the controller resolved a navigation to.
pub trait PageViewer {
    fn show(&mut self, target: &ViewerTarget);
}

/// Viewer that only remembers what it was last asked to show.
///
/// Used by the RPC shell, where the real rendering happens in the UI
/// process, and by tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    current: ViewerTarget,
    render_count: u64,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            current: ViewerTarget::Home,
            render_count: 0,
        }
    }

    pub fn current(&self) -> &ViewerTarget {
        &self.current
    }

    /// How many times `show` was called, refreshes included.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageViewer for ViewerState {
    fn show(&mut self, target: &ViewerTarget) {
        self.current = target.clone();
        self.render_count += 1;
    }
}
