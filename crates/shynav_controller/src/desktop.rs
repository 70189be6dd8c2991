//! Desktop threshold state machine
//!
//! `Top` until the scroll offset passes 6% of the viewport height, then
//! `Scrolled`. The threshold is recomputed on resize and the state is
//! re-checked immediately against the new value.

use tracing::trace;

use crate::config::NavbarConfig;
use crate::sink::SharedSink;
use crate::state::DesktopNavState;

pub struct DesktopController {
    sink: SharedSink,
    config: NavbarConfig,
    state: DesktopNavState,
    threshold: f32,
    last_offset: f32,
}

impl DesktopController {
    /// Build against the current viewport height and scroll offset,
    /// evaluating once immediately so a page restored mid-scroll styles
    /// correctly from the first frame.
    pub fn new(
        sink: SharedSink,
        config: NavbarConfig,
        viewport_height: f32,
        scroll_offset: f32,
    ) -> Self {
        let mut controller = Self {
            sink,
            config,
            state: DesktopNavState::Top,
            threshold: config.desktop_threshold(viewport_height),
            last_offset: scroll_offset,
        };
        controller.evaluate();
        controller
    }

    pub fn state(&self) -> DesktopNavState {
        self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn handle_scroll(&mut self, offset: f32) {
        self.last_offset = offset;
        self.evaluate();
    }

    /// Recompute the threshold for the new viewport height and re-check the
    /// last observed offset against it right away.
    pub fn handle_resize(&mut self, viewport_height: f32) {
        self.threshold = self.config.desktop_threshold(viewport_height);
        self.evaluate();
    }

    fn evaluate(&mut self) {
        self.apply(DesktopNavState::for_offset(self.last_offset, self.threshold));
    }

    fn apply(&mut self, next: DesktopNavState) {
        if next == self.state {
            return;
        }
        trace!(?next, threshold = self.threshold, "desktop navbar transition");
        self.sink.borrow_mut().set_scrolled(next.is_scrolled());
        self.state = next;
    }

    /// Clear the scrolled flag so no stale styling survives a mode swap.
    pub fn teardown(&mut self) {
        self.apply(DesktopNavState::Top);
    }
}
