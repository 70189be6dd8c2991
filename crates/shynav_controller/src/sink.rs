//! Presentation boundary
//!
//! The controller writes a state marker; external styling reacts to it.
//! Nothing behind this trait may touch layout.

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::NavVisibility;

/// Target for navbar presentation writes.
///
/// Callers guarantee idempotence: a sink method is only invoked when the
/// state actually changed, so implementations may treat every call as a
/// real DOM-equivalent write.
pub trait NavbarSink {
    /// Toggle the desktop "scrolled" presentation flag.
    fn set_scrolled(&mut self, scrolled: bool);

    /// Write the mobile visibility marker.
    fn set_visibility(&mut self, state: NavVisibility);
}

/// Shared handle to the page's navbar sink.
pub type SharedSink = Rc<RefCell<dyn NavbarSink>>;
