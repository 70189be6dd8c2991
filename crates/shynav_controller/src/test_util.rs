//! Shared test support for the controller crates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::sink::{NavbarSink, SharedSink};
use crate::state::NavVisibility;

/// Every write pushed through the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkWrite {
    Scrolled(bool),
    Visibility(NavVisibility),
}

/// Sink that records writes for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<SinkWrite>,
    pub scrolled: bool,
    pub visibility: NavVisibility,
}

impl NavbarSink for RecordingSink {
    fn set_scrolled(&mut self, scrolled: bool) {
        self.scrolled = scrolled;
        self.writes.push(SinkWrite::Scrolled(scrolled));
    }

    fn set_visibility(&mut self, state: NavVisibility) {
        self.visibility = state;
        self.writes.push(SinkWrite::Visibility(state));
    }
}

/// A recording sink plus the erased handle controllers consume.
pub fn recording_sink() -> (SharedSink, Rc<RefCell<RecordingSink>>) {
    let sink = Rc::new(RefCell::new(RecordingSink::default()));
    (sink.clone() as SharedSink, sink)
}
