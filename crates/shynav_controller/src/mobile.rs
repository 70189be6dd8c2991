//! Mobile directional visibility state machine (velocity based)
//!
//! Safari-style chrome behavior: a fast downward flick hides the bar, an
//! upward nudge reveals it, and the bar is pinned visible near the top of
//! the page. Scroll events only record the latest offset; the velocity
//! computation runs at most once per frame tick on that sample.

use shynav_core::timing::FrameGate;
use tracing::trace;

use crate::config::NavbarConfig;
use crate::sink::SharedSink;
use crate::state::{NavVisibility, ScrollSample};

pub struct MobileController {
    sink: SharedSink,
    config: NavbarConfig,
    state: NavVisibility,
    last: ScrollSample,
    gate: FrameGate<f32>,
}

impl MobileController {
    /// Build against the mount-time scroll offset. No presentation write
    /// happens here: the default state is already `Visible` and the
    /// idempotence guard suppresses the redundant write.
    pub fn new(sink: SharedSink, config: NavbarConfig, scroll_offset: f32, now_ms: f64) -> Self {
        Self {
            sink,
            config,
            state: NavVisibility::Visible,
            last: ScrollSample::new(scroll_offset, now_ms),
            gate: FrameGate::new(),
        }
    }

    pub fn state(&self) -> NavVisibility {
        self.state
    }

    /// Record the latest offset; the computation itself runs on the next
    /// frame tick. Bursts between ticks collapse to the newest sample.
    pub fn handle_scroll(&mut self, offset: f32) {
        self.gate.request(offset);
    }

    /// Keyboard focus landed inside the navbar: reveal unconditionally so
    /// the focused control is always on screen.
    pub fn handle_focus_in(&mut self) {
        self.apply(NavVisibility::Visible);
    }

    /// Frame tick: drain the pending sample, derive a velocity, and apply
    /// the transition rules in order.
    pub fn on_frame(&mut self, now_ms: f64) {
        let Some(offset) = self.gate.take() else {
            return;
        };
        let sample = ScrollSample::new(offset, now_ms);
        let velocity = self.last.velocity_to(sample, self.config.min_frame_ms);
        self.last = sample;

        // Always visible near the top, regardless of velocity.
        if offset < self.config.top_lock {
            self.apply(NavVisibility::Visible);
            return;
        }

        // Fast scroll down: hide.
        if velocity > self.config.hide_velocity && self.state == NavVisibility::Visible {
            self.apply(NavVisibility::Hidden);
            return;
        }

        // Scroll up: show.
        if velocity < self.config.show_velocity && self.state == NavVisibility::Hidden {
            self.apply(NavVisibility::Visible);
        }
    }

    fn apply(&mut self, next: NavVisibility) {
        if next == self.state {
            return;
        }
        trace!(?next, "mobile navbar transition");
        self.sink.borrow_mut().set_visibility(next);
        self.state = next;
    }

    /// Cancel any pending frame work and restore the default visible state.
    pub fn teardown(&mut self) {
        self.gate.cancel();
        self.apply(NavVisibility::Visible);
    }
}
