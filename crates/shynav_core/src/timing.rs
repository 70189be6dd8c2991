//! Deferral primitives
//!
//! Nothing here owns a timer thread; both primitives are polled from the
//! host's frame tick. [`Debounce`] coalesces bursts into one decision after
//! a quiet period, and [`FrameGate`] holds at most one pending payload per
//! rendering tick.

/// Deadline-based debounce.
///
/// [`trigger`](Debounce::trigger) restarts the quiet period (last-write-wins);
/// [`poll`](Debounce::poll) fires at most once per trigger.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Start or restart the quiet period at `now_ms`.
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// True exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// At most one pending payload per frame.
///
/// A new [`request`](FrameGate::request) replaces the pending payload rather
/// than queueing behind it; [`take`](FrameGate::take) drains it on the frame
/// tick.
#[derive(Debug, Clone)]
pub struct FrameGate<T> {
    pending: Option<T>,
}

impl<T> FrameGate<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the gate with `payload`, superseding any pending payload.
    /// Returns true when the gate was previously empty.
    pub fn request(&mut self, payload: T) -> bool {
        let newly_armed = self.pending.is_none();
        self.pending = Some(payload);
        newly_armed
    }

    /// Drain the pending payload, if any.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for FrameGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_fires_once_after_quiet_period() {
        let mut debounce = Debounce::new(100.0);
        debounce.trigger(0.0);

        assert!(!debounce.poll(50.0));
        assert!(debounce.poll(100.0));
        // Already fired; stays quiet until the next trigger.
        assert!(!debounce.poll(200.0));
    }

    #[test]
    fn test_debounce_retrigger_restarts_quiet_period() {
        let mut debounce = Debounce::new(100.0);
        debounce.trigger(0.0);
        debounce.trigger(80.0);

        assert!(!debounce.poll(120.0));
        assert!(debounce.poll(180.0));
    }

    #[test]
    fn test_debounce_cancel() {
        let mut debounce = Debounce::new(100.0);
        debounce.trigger(0.0);
        assert!(debounce.is_pending());

        debounce.cancel();
        assert!(!debounce.is_pending());
        assert!(!debounce.poll(500.0));
    }

    #[test]
    fn test_frame_gate_replaces_pending_payload() {
        let mut gate = FrameGate::new();
        assert!(gate.request(1.0f32));
        assert!(!gate.request(2.0));
        assert!(!gate.request(3.0));

        // Only the latest sample survives the burst.
        assert_eq!(gate.take(), Some(3.0));
        assert_eq!(gate.take(), None);
    }

    #[test]
    fn test_frame_gate_cancel_discards_payload() {
        let mut gate = FrameGate::new();
        gate.request(7u32);
        assert!(gate.is_armed());

        gate.cancel();
        assert!(!gate.is_armed());
        assert_eq!(gate.take(), None);
    }
}
