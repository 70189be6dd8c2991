//! Behavior tunables

/// Configuration for the navbar visibility behavior
#[derive(Debug, Clone, Copy)]
pub struct NavbarConfig {
    /// Fraction of the viewport height past which the desktop bar condenses
    pub scrolled_ratio: f32,
    /// Offset below which the mobile bar is always forced visible (px)
    pub top_lock: f32,
    /// Downward velocity that hides the mobile bar (px/ms)
    pub hide_velocity: f32,
    /// Upward velocity that reveals the mobile bar (px/ms, negative = up)
    pub show_velocity: f32,
    /// Floor applied to scroll sample time deltas (ms)
    pub min_frame_ms: f64,
    /// Quiet period before a viewport change re-evaluates the mode (ms)
    pub reevaluate_debounce_ms: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_ratio: 0.06,
            top_lock: 80.0,
            // Asymmetric on purpose: hiding takes a fast downward flick,
            // while a quick peek upward immediately reveals navigation.
            hide_velocity: 0.35,
            show_velocity: -0.15,
            min_frame_ms: 16.0,
            reevaluate_debounce_ms: 120.0,
        }
    }
}

impl NavbarConfig {
    /// Desktop threshold in pixels for a given viewport height.
    pub fn desktop_threshold(&self, viewport_height: f32) -> f32 {
        (viewport_height * self.scrolled_ratio).round()
    }
}
