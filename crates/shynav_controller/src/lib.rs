//! Navbar visibility controller
//!
//! Decides, from scroll position and velocity, whether a fixed navigation
//! bar should be shown, hidden, or condensed. Two sub-machines exist:
//!
//! - **Desktop**: `Top`/`Scrolled` against a threshold of 6% of the
//!   viewport height
//! - **Mobile**: Safari-style `Visible`/`Hidden` driven by scroll velocity,
//!   pinned visible near the top of the page and on keyboard focus
//!
//! The [`selector::NavbarBehavior`] owns exactly one of them at a time and
//! swaps them (with full teardown) when the viewport crosses the mobile
//! breakpoint. All presentation writes go through a [`sink::NavbarSink`];
//! the controller never manipulates layout, only the state marker that
//! external styling consumes.
//!
//! # Example
//!
//! ```rust,ignore
//! use shynav_controller::{NavbarBehavior, NavbarConfig};
//!
//! let behavior = NavbarBehavior::mount(&hub, env, Some(sink), NavbarConfig::default(), now_ms);
//! // each rendering tick:
//! if let Some(behavior) = &behavior {
//!     behavior.on_frame(clock.now_ms());
//! }
//! ```

pub mod config;
pub mod desktop;
pub mod mobile;
pub mod selector;
pub mod sink;
pub mod state;

pub use config::NavbarConfig;
pub use desktop::DesktopController;
pub use mobile::MobileController;
pub use selector::{ActiveMode, NavbarBehavior};
pub use sink::{NavbarSink, SharedSink};
pub use state::{DesktopNavState, NavVisibility, ScrollSample};

#[cfg(test)]
pub(crate) mod test_util;
