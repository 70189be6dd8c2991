//! Visual-state types for the navbar sub-machines

/// Desktop presentation state; `Scrolled` drives the condensed styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DesktopNavState {
    #[default]
    Top,
    Scrolled,
}

impl DesktopNavState {
    /// Classify a scroll offset against the threshold. The boundary itself
    /// counts as `Top`.
    pub fn for_offset(offset: f32, threshold: f32) -> Self {
        if offset > threshold {
            DesktopNavState::Scrolled
        } else {
            DesktopNavState::Top
        }
    }

    pub fn is_scrolled(self) -> bool {
        self == DesktopNavState::Scrolled
    }
}

/// Mobile presentation state consumed by the slide transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavVisibility {
    #[default]
    Visible,
    Hidden,
}

impl NavVisibility {
    pub fn is_hidden(self) -> bool {
        self == NavVisibility::Hidden
    }
}

/// One timestamped scroll reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub offset: f32,
    pub timestamp_ms: f64,
}

impl ScrollSample {
    pub fn new(offset: f32, timestamp_ms: f64) -> Self {
        Self {
            offset,
            timestamp_ms,
        }
    }

    /// Signed velocity in px/ms from this sample to `next`, positive when
    /// scrolling down. The time delta is floored at `min_frame_ms` so a
    /// zero or jittery timestamp cannot blow up the quotient.
    pub fn velocity_to(&self, next: ScrollSample, min_frame_ms: f64) -> f32 {
        let dt = (next.timestamp_ms - self.timestamp_ms).max(min_frame_ms);
        ((next.offset - self.offset) as f64 / dt) as f32
    }
}
