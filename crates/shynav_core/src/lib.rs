//! shynav Core Runtime
//!
//! Foundational primitives for the shynav navbar behavior:
//!
//! - **Event Dispatch**: a page-level hub with disposable subscriptions
//! - **Clocks**: monotonic and hand-advanced millisecond time sources
//! - **Timing**: debounce and frame-coalescing deferral primitives
//! - **Environment**: viewport mode and motion-preference model
//!
//! # Example
//!
//! ```rust
//! use shynav_core::timing::Debounce;
//!
//! let mut debounce = Debounce::new(100.0);
//! debounce.trigger(0.0);
//! debounce.trigger(50.0); // restarts the quiet period
//!
//! assert!(!debounce.poll(120.0));
//! assert!(debounce.poll(150.0));
//! ```

pub mod clock;
pub mod env;
pub mod events;
pub mod timing;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use env::{EnvError, EnvSnapshot, MotionPreference, SharedEnv, ViewportMode};
pub use events::{Event, EventData, EventHub, EventType, Subscription};
pub use timing::{Debounce, FrameGate};
