//! Headless page harness
//!
//! Drives the navbar behavior with scripted events on a hand-advanced
//! clock: no real browser, no real time. The harness plays the host's role
//! end to end — it keeps the environment snapshot current, stamps and emits
//! events, and runs the frame tick — so scenarios are fully deterministic.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use shynav_controller::{NavVisibility, NavbarBehavior, NavbarConfig, NavbarSink, SharedSink};
use shynav_core::clock::{Clock, ManualClock};
use shynav_core::env::{EnvSnapshot, MotionPreference, SharedEnv};
use shynav_core::events::{event_types, Event, EventData, EventHub, EventType};
use tracing::debug;

/// Configuration for a deterministic page run.
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    /// Logical viewport width used by the run.
    pub width: f32,
    /// Logical viewport height used by the run.
    pub height: f32,
    /// Initial reduced-motion preference.
    pub reduced_motion: bool,
    /// Whether the page has a navbar at all; absence is valid and inert.
    pub navbar_present: bool,
    /// Logical milliseconds between frames.
    pub tick_ms: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            reduced_motion: false,
            navbar_present: true,
            tick_ms: 16.0,
        }
    }
}

/// Every write the controller pushed through the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkWrite {
    Scrolled(bool),
    Visibility(NavVisibility),
}

/// Sink that records presentation writes for assertions.
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

pub type SharedRecordingSink = Rc<RefCell<RecordingSink>>;

/// A headless page: event hub, manual clock, and environment state.
pub struct HeadlessPage {
    hub: EventHub,
    clock: ManualClock,
    env: SharedEnv,
    config: PageConfig,
    sink: Option<SharedRecordingSink>,
}

impl HeadlessPage {
    pub fn new(config: PageConfig) -> Result<Self> {
        if config.tick_ms <= 0.0 {
            bail!("tick_ms must be > 0");
        }
        let mut snapshot = EnvSnapshot::new(config.width, config.height);
        snapshot.motion = MotionPreference::from_reduced_flag(config.reduced_motion);
        snapshot.validate()?;

        Ok(Self {
            hub: EventHub::new(),
            clock: ManualClock::new(),
            env: Rc::new(RefCell::new(snapshot)),
            sink: config
                .navbar_present
                .then(|| Rc::new(RefCell::new(RecordingSink::default()))),
            config,
        })
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn env(&self) -> &SharedEnv {
        &self.env
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// The recording sink, when the page has a navbar.
    pub fn sink(&self) -> Option<SharedRecordingSink> {
        self.sink.clone()
    }

    /// Mount the navbar behavior against this page.
    pub fn mount(&self, config: NavbarConfig) -> Option<NavbarBehavior> {
        let sink = self.sink.clone().map(|sink| sink as SharedSink);
        NavbarBehavior::mount(
            &self.hub,
            Rc::clone(&self.env),
            sink,
            config,
            self.clock.now_ms(),
        )
    }

    /// Update the scroll offset and dispatch a `SCROLL` event.
    pub fn scroll_to(&self, offset: f32) {
        self.env.borrow_mut().scroll_offset = offset;
        self.emit(event_types::SCROLL, EventData::Scroll { offset });
    }

    /// Resize the viewport; crossing the mobile breakpoint also raises a
    /// `MEDIA_CHANGE`, matching how a breakpoint listener fires.
    pub fn resize(&self, width: f32, height: f32) {
        let crossed = {
            let mut env = self.env.borrow_mut();
            let before = env.mode();
            env.viewport_width = width;
            env.viewport_height = height;
            before != env.mode()
        };
        self.emit(event_types::RESIZE, EventData::Resize { width, height });
        if crossed {
            debug!(width, "viewport crossed the mobile breakpoint");
            self.emit_media_change();
        }
    }

    /// Flip the reduced-motion preference and raise a `MEDIA_CHANGE`.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.env.borrow_mut().motion = MotionPreference::from_reduced_flag(reduced);
        self.emit_media_change();
    }

    /// Keyboard focus lands inside the navbar.
    pub fn focus_navbar(&self) {
        self.emit(event_types::FOCUS_IN, EventData::None);
    }

    /// Advance logical time, running the frame tick at each `tick_ms` step.
    pub fn advance(&self, behavior: &NavbarBehavior, ms: f64) {
        let mut remaining = ms;
        while remaining > 0.0 {
            let step = remaining.min(self.config.tick_ms);
            self.clock.advance(step);
            behavior.on_frame(self.clock.now_ms());
            remaining -= step;
        }
    }

    /// One frame tick.
    pub fn tick(&self, behavior: &NavbarBehavior) {
        self.advance(behavior, self.config.tick_ms);
    }

    /// Advance the clock by exactly `ms` and run a single frame tick at the
    /// end. Useful when a scenario pins a precise time delta between two
    /// scroll samples.
    pub fn step(&self, behavior: &NavbarBehavior, ms: f64) {
        self.clock.advance(ms);
        behavior.on_frame(self.clock.now_ms());
    }

    fn emit_media_change(&self) {
        let env = *self.env.borrow();
        self.emit(
            event_types::MEDIA_CHANGE,
            EventData::MediaChange {
                mobile: env.mode().is_mobile(),
                reduced_motion: env.motion.is_reduced(),
            },
        );
    }

    fn emit(&self, event_type: EventType, data: EventData) {
        self.hub.emit(&Event {
            event_type,
            data,
            timestamp_ms: self.clock.now_ms(),
        });
    }
}
