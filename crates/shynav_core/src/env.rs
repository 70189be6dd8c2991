//! Viewport and motion-preference model
//!
//! Mirrors the two media features the behavior reacts to: the mobile
//! breakpoint (`max-width: 768px`) and the reduced-motion preference.
//! The host keeps one [`EnvSnapshot`] current before it emits events.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// Mobile breakpoint in CSS pixels.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Which visibility sub-machine family the viewport calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewportMode {
    #[default]
    Desktop,
    Mobile,
}

impl ViewportMode {
    /// Classify a viewport width against the mobile breakpoint.
    pub fn from_width(width: f32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportMode::Mobile
    }
}

/// The user's OS/browser motion-reduction setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionPreference {
    #[default]
    Normal,
    Reduced,
}

impl MotionPreference {
    pub fn from_reduced_flag(reduced: bool) -> Self {
        if reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Normal
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }
}

/// Current environment readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvSnapshot {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Document scroll offset in pixels, positive downward.
    pub scroll_offset: f32,
    pub motion: MotionPreference,
}

impl EnvSnapshot {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            scroll_offset: 0.0,
            motion: MotionPreference::Normal,
        }
    }

    /// Mode derived from the current width; never stored, so it cannot go
    /// stale across resizes.
    pub fn mode(&self) -> ViewportMode {
        ViewportMode::from_width(self.viewport_width)
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if !self.viewport_width.is_finite()
            || !self.viewport_height.is_finite()
            || !self.scroll_offset.is_finite()
        {
            return Err(EnvError::NonFinite);
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(EnvError::Degenerate {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }
}

/// Environment shared between the host and the mode selector.
pub type SharedEnv = Rc<RefCell<EnvSnapshot>>;

#[derive(Debug, Error, PartialEq)]
pub enum EnvError {
    #[error("environment reading is not finite")]
    NonFinite,
    #[error("viewport dimensions must be positive (got {width}x{height})")]
    Degenerate { width: f32, height: f32 },
}
