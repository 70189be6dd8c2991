//! Event dispatch system
//!
//! Browser-style page events routed through a single hub. Handlers are
//! registered per event type and stay live until the returned
//! [`Subscription`] is dropped, so listener ownership is scoped rather than
//! implicit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Keyboard focus entered the navbar subtree.
    pub const FOCUS_IN: EventType = 10;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
    /// A watched media query flipped (breakpoint or motion preference).
    pub const MEDIA_CHANGE: EventType = 41;
}

/// A page event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Monotonic dispatch time in milliseconds.
    pub timestamp_ms: f64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Scroll {
        /// Document scroll offset in pixels, positive downward.
        offset: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    MediaChange {
        mobile: bool,
        reduced_motion: bool,
    },
    None,
}

new_key_type! {
    /// Key for a registered handler within one event type's registry
    pub struct HandlerKey;
}

type Handler = Box<dyn FnMut(&Event)>;

#[derive(Default)]
struct HubInner {
    handlers: FxHashMap<EventType, SlotMap<HandlerKey, Handler>>,
}

/// Dispatches page events to registered handlers.
///
/// Clones share the same registry. Handlers must not subscribe or dispose
/// while an emit is in flight; all controller re-wiring happens on the frame
/// tick, never inside dispatch.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event type.
    ///
    /// The handler is removed when the returned [`Subscription`] is dropped
    /// or explicitly [`Subscription::dispose`]d.
    #[must_use]
    pub fn subscribe<F>(&self, event_type: EventType, handler: F) -> Subscription
    where
        F: FnMut(&Event) + 'static,
    {
        let key = self
            .inner
            .borrow_mut()
            .handlers
            .entry(event_type)
            .or_default()
            .insert(Box::new(handler));
        trace!(event_type, "handler registered");
        Subscription {
            hub: Rc::downgrade(&self.inner),
            event_type,
            key,
        }
    }

    /// Dispatch an event to every handler registered for its type.
    pub fn emit(&self, event: &Event) {
        let mut inner = self.inner.borrow_mut();
        if let Some(handlers) = inner.handlers.get_mut(&event.event_type) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of live handlers for an event type.
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.inner
            .borrow()
            .handlers
            .get(&event_type)
            .map_or(0, |handlers| handlers.len())
    }
}

/// Disposer for one registered handler.
///
/// Dropping the subscription unregisters the handler; a hub that has already
/// gone away makes disposal a no-op.
pub struct Subscription {
    hub: Weak<RefCell<HubInner>>,
    event_type: EventType,
    key: HandlerKey,
}

impl Subscription {
    /// Remove the handler now instead of at drop time.
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            // Take the handler out while borrowed, but drop it after the
            // borrow is released: the handler may own other Subscriptions
            // whose drops re-borrow this same RefCell.
            let removed = inner
                .borrow_mut()
                .handlers
                .get_mut(&self.event_type)
                .and_then(|handlers| handlers.remove(self.key));
            drop(removed);
        }
    }
}
