//! Mode selector
//!
//! Owns at most one live sub-machine. Viewport changes (resize, media-query
//! flip) re-evaluate the decision after a quiet period; the previous mode is
//! always fully torn down (listeners dropped, default state restored) before
//! the next one attaches, so two controllers never run concurrently and a
//! stale listener can never write.

use std::cell::RefCell;
use std::rc::Rc;

use shynav_core::env::{EnvSnapshot, MotionPreference, SharedEnv, ViewportMode};
use shynav_core::events::{event_types, EventData, EventHub, Subscription};
use shynav_core::timing::Debounce;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::NavbarConfig;
use crate::desktop::DesktopController;
use crate::mobile::MobileController;
use crate::sink::SharedSink;

type Subs = SmallVec<[Subscription; 2]>;

/// Which sub-machine is currently installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMode {
    /// Nothing installed (mobile viewport with reduced motion); the bar
    /// stays in its default state.
    None,
    Desktop,
    Mobile,
}

/// The active mode's controller plus the subscriptions that feed it.
/// Dropping the subscriptions before resetting the controller guarantees a
/// stray event dispatched mid-swap cannot write through a dead controller.
enum ActiveController {
    None,
    Desktop {
        ctrl: Rc<RefCell<DesktopController>>,
        subs: Subs,
    },
    Mobile {
        ctrl: Rc<RefCell<MobileController>>,
        subs: Subs,
    },
}

struct SelectorInner {
    hub: EventHub,
    env: SharedEnv,
    sink: SharedSink,
    config: NavbarConfig,
    reevaluate: Debounce,
    active: ActiveController,
}

/// Live navbar behavior for one page.
///
/// Dropping the handle removes every listener the behavior registered.
pub struct NavbarBehavior {
    inner: Rc<RefCell<SelectorInner>>,
    _subs: Subs,
}

impl NavbarBehavior {
    /// Install the behavior, choosing a sub-machine from the current
    /// environment. Returns `None` when the page has no navbar sink; that
    /// is a valid, inert configuration, not a fault.
    pub fn mount(
        hub: &EventHub,
        env: SharedEnv,
        sink: Option<SharedSink>,
        config: NavbarConfig,
        now_ms: f64,
    ) -> Option<Self> {
        let Some(sink) = sink else {
            debug!("no navbar on page; visibility behavior not installed");
            return None;
        };

        let inner = Rc::new(RefCell::new(SelectorInner {
            hub: hub.clone(),
            env,
            sink,
            config,
            reevaluate: Debounce::new(config.reevaluate_debounce_ms),
            active: ActiveController::None,
        }));
        SelectorInner::install(&inner, now_ms);

        // The selector's own listeners only arm the debounce; the actual
        // re-wiring happens on the frame tick, outside dispatch.
        let subs: Subs = [event_types::RESIZE, event_types::MEDIA_CHANGE]
            .into_iter()
            .map(|event_type| {
                let inner = Rc::clone(&inner);
                hub.subscribe(event_type, move |event| {
                    inner.borrow_mut().reevaluate.trigger(event.timestamp_ms);
                })
            })
            .collect();

        Some(Self { inner, _subs: subs })
    }

    /// Which sub-machine is installed right now.
    pub fn active_mode(&self) -> ActiveMode {
        match self.inner.borrow().active {
            ActiveController::None => ActiveMode::None,
            ActiveController::Desktop { .. } => ActiveMode::Desktop,
            ActiveController::Mobile { .. } => ActiveMode::Mobile,
        }
    }

    /// Drive deferred work once per rendering tick: a fired re-evaluation
    /// swaps modes, and the mobile machine consumes its pending sample.
    pub fn on_frame(&self, now_ms: f64) {
        let fired = self.inner.borrow_mut().reevaluate.poll(now_ms);
        if fired {
            SelectorInner::teardown(&self.inner);
            SelectorInner::install(&self.inner, now_ms);
        }

        let mobile = match &self.inner.borrow().active {
            ActiveController::Mobile { ctrl, .. } => Some(Rc::clone(ctrl)),
            _ => None,
        };
        if let Some(ctrl) = mobile {
            ctrl.borrow_mut().on_frame(now_ms);
        }
    }
}

impl SelectorInner {
    fn decide(env: &EnvSnapshot) -> ActiveMode {
        match (env.mode(), env.motion) {
            (ViewportMode::Mobile, MotionPreference::Reduced) => ActiveMode::None,
            (ViewportMode::Mobile, MotionPreference::Normal) => ActiveMode::Mobile,
            // Desktop only uses the scrolled flag, no hide animation, so
            // the motion preference does not gate it.
            (ViewportMode::Desktop, _) => ActiveMode::Desktop,
        }
    }

    /// Tear the active mode down: listeners first, then the visual reset.
    fn teardown(inner: &Rc<RefCell<Self>>) {
        let active = std::mem::replace(&mut inner.borrow_mut().active, ActiveController::None);
        match active {
            ActiveController::None => {}
            ActiveController::Desktop { ctrl, subs } => {
                drop(subs);
                ctrl.borrow_mut().teardown();
                debug!("desktop navbar controller torn down");
            }
            ActiveController::Mobile { ctrl, subs } => {
                drop(subs);
                ctrl.borrow_mut().teardown();
                debug!("mobile navbar controller torn down");
            }
        }
    }

    fn install(inner: &Rc<RefCell<Self>>, now_ms: f64) {
        let (hub, env, sink, config) = {
            let inner = inner.borrow();
            (
                inner.hub.clone(),
                Rc::clone(&inner.env),
                Rc::clone(&inner.sink),
                inner.config,
            )
        };
        let snapshot = *env.borrow();

        let active = match Self::decide(&snapshot) {
            ActiveMode::None => {
                debug!("reduced motion on mobile viewport; navbar stays visible");
                ActiveController::None
            }
            ActiveMode::Desktop => {
                let ctrl = Rc::new(RefCell::new(DesktopController::new(
                    sink,
                    config,
                    snapshot.viewport_height,
                    snapshot.scroll_offset,
                )));
                let mut subs = Subs::new();
                {
                    let ctrl = Rc::clone(&ctrl);
                    subs.push(hub.subscribe(event_types::SCROLL, move |event| {
                        if let EventData::Scroll { offset } = event.data {
                            ctrl.borrow_mut().handle_scroll(offset);
                        }
                    }));
                }
                {
                    let ctrl = Rc::clone(&ctrl);
                    subs.push(hub.subscribe(event_types::RESIZE, move |event| {
                        if let EventData::Resize { height, .. } = event.data {
                            ctrl.borrow_mut().handle_resize(height);
                        }
                    }));
                }
                debug!(
                    threshold = ctrl.borrow().threshold(),
                    "desktop navbar controller installed"
                );
                ActiveController::Desktop { ctrl, subs }
            }
            ActiveMode::Mobile => {
                let ctrl = Rc::new(RefCell::new(MobileController::new(
                    sink,
                    config,
                    snapshot.scroll_offset,
                    now_ms,
                )));
                let mut subs = Subs::new();
                {
                    let ctrl = Rc::clone(&ctrl);
                    subs.push(hub.subscribe(event_types::SCROLL, move |event| {
                        if let EventData::Scroll { offset } = event.data {
                            ctrl.borrow_mut().handle_scroll(offset);
                        }
                    }));
                }
                {
                    let ctrl = Rc::clone(&ctrl);
                    subs.push(hub.subscribe(event_types::FOCUS_IN, move |_| {
                        ctrl.borrow_mut().handle_focus_in();
                    }));
                }
                debug!("mobile navbar controller installed");
                ActiveController::Mobile { ctrl, subs }
            }
        };

        inner.borrow_mut().active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{recording_sink, RecordingSink, SinkWrite};
    use crate::NavVisibility;
    use shynav_core::events::Event;

    struct Fixture {
        hub: EventHub,
        env: SharedEnv,
        rec: Rc<RefCell<RecordingSink>>,
        behavior: NavbarBehavior,
    }

    fn mount(width: f32, height: f32, motion: MotionPreference, offset: f32) -> Fixture {
        let hub = EventHub::new();
        let mut snapshot = EnvSnapshot::new(width, height);
        snapshot.motion = motion;
        snapshot.scroll_offset = offset;
        let env: SharedEnv = Rc::new(RefCell::new(snapshot));
        let (sink, rec) = recording_sink();
        let behavior =
            NavbarBehavior::mount(&hub, Rc::clone(&env), Some(sink), NavbarConfig::default(), 0.0)
                .expect("sink present");
        Fixture {
            hub,
            env,
            rec,
            behavior,
        }
    }

    fn emit(hub: &EventHub, event_type: u32, data: EventData, at_ms: f64) {
        hub.emit(&Event {
            event_type,
            data,
            timestamp_ms: at_ms,
        });
    }

    impl Fixture {
        fn inner_pending(&self) -> bool {
            self.behavior.inner.borrow().reevaluate.is_pending()
        }
    }

    #[test]
    fn test_mount_without_sink_is_inert() {
        let hub = EventHub::new();
        let env: SharedEnv = Rc::new(RefCell::new(EnvSnapshot::new(1280.0, 720.0)));
        assert!(NavbarBehavior::mount(&hub, env, None, NavbarConfig::default(), 0.0).is_none());
        assert_eq!(hub.handler_count(event_types::SCROLL), 0);
        assert_eq!(hub.handler_count(event_types::RESIZE), 0);
    }

    #[test]
    fn test_desktop_installed_on_wide_viewport() {
        let fx = mount(1280.0, 1000.0, MotionPreference::Normal, 0.0);
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Desktop);
        assert_eq!(fx.hub.handler_count(event_types::SCROLL), 1);
        // Controller's resize listener plus the selector's re-evaluation one.
        assert_eq!(fx.hub.handler_count(event_types::RESIZE), 2);
        assert_eq!(fx.hub.handler_count(event_types::FOCUS_IN), 0);
    }

    #[test]
    fn test_mobile_installed_on_narrow_viewport() {
        let fx = mount(390.0, 844.0, MotionPreference::Normal, 0.0);
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Mobile);
        assert_eq!(fx.hub.handler_count(event_types::SCROLL), 1);
        assert_eq!(fx.hub.handler_count(event_types::FOCUS_IN), 1);
    }

    #[test]
    fn test_reduced_motion_on_mobile_installs_nothing() {
        let fx = mount(390.0, 844.0, MotionPreference::Reduced, 0.0);
        assert_eq!(fx.behavior.active_mode(), ActiveMode::None);
        assert_eq!(fx.hub.handler_count(event_types::SCROLL), 0);

        // Scroll activity never produces a write.
        emit(&fx.hub, event_types::SCROLL, EventData::Scroll { offset: 2000.0 }, 10.0);
        fx.behavior.on_frame(16.0);
        assert!(fx.rec.borrow().writes.is_empty());
    }

    #[test]
    fn test_reduced_motion_on_desktop_still_installs_desktop() {
        let fx = mount(1280.0, 1000.0, MotionPreference::Reduced, 0.0);
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Desktop);
    }

    #[test]
    fn test_mode_switch_tears_down_stale_listeners() {
        let fx = mount(1280.0, 1000.0, MotionPreference::Normal, 0.0);

        // Get the desktop machine into Scrolled first.
        emit(&fx.hub, event_types::SCROLL, EventData::Scroll { offset: 500.0 }, 10.0);
        fx.env.borrow_mut().scroll_offset = 500.0;
        assert!(fx.rec.borrow().scrolled);

        // Cross the breakpoint; the decision lands after the quiet period.
        {
            let mut env = fx.env.borrow_mut();
            env.viewport_width = 390.0;
            env.viewport_height = 844.0;
        }
        emit(
            &fx.hub,
            event_types::MEDIA_CHANGE,
            EventData::MediaChange {
                mobile: true,
                reduced_motion: false,
            },
            20.0,
        );
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Desktop);

        fx.behavior.on_frame(200.0);
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Mobile);
        // Teardown cleared the stale scrolled styling.
        assert!(!fx.rec.borrow().scrolled);

        // Stale desktop listeners are gone: scrolling far past the desktop
        // threshold writes no scrolled flag anymore.
        let writes_before = fx.rec.borrow().writes.len();
        emit(&fx.hub, event_types::SCROLL, EventData::Scroll { offset: 60.0 }, 210.0);
        fx.behavior.on_frame(216.0);
        let writes = fx.rec.borrow();
        assert!(!writes.writes[writes_before..]
            .iter()
            .any(|write| matches!(write, SinkWrite::Scrolled(_))));
        assert_eq!(fx.hub.handler_count(event_types::RESIZE), 1);
        assert_eq!(fx.hub.handler_count(event_types::SCROLL), 1);
    }

    #[test]
    fn test_rapid_viewport_changes_coalesce_into_one_reinstall() {
        let fx = mount(1280.0, 1000.0, MotionPreference::Normal, 0.0);

        for at in [10.0, 40.0, 70.0, 100.0] {
            emit(
                &fx.hub,
                event_types::RESIZE,
                EventData::Resize {
                    width: 1280.0,
                    height: 900.0,
                },
                at,
            );
        }
        // Quiet period is measured from the last event (100 + 120ms).
        fx.behavior.on_frame(180.0);
        assert!(fx.inner_pending());

        fx.behavior.on_frame(240.0);
        assert!(!fx.inner_pending());
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Desktop);
    }

    #[test]
    fn test_reinstall_happens_even_when_mode_is_unchanged() {
        let fx = mount(1280.0, 1000.0, MotionPreference::Normal, 300.0);
        assert!(fx.rec.borrow().scrolled);

        emit(
            &fx.hub,
            event_types::RESIZE,
            EventData::Resize {
                width: 1280.0,
                height: 900.0,
            },
            10.0,
        );
        fx.behavior.on_frame(200.0);

        // Teardown reset the flag, the fresh install restored it.
        assert_eq!(
            fx.rec.borrow().writes,
            vec![
                SinkWrite::Scrolled(true),
                SinkWrite::Scrolled(false),
                SinkWrite::Scrolled(true),
            ]
        );
        assert_eq!(fx.behavior.active_mode(), ActiveMode::Desktop);
    }

    #[test]
    fn test_switch_to_mobile_resets_hidden_bar_on_switch_back() {
        let fx = mount(390.0, 844.0, MotionPreference::Normal, 500.0);

        emit(&fx.hub, event_types::SCROLL, EventData::Scroll { offset: 900.0 }, 10.0);
        fx.behavior.on_frame(50.0);
        assert_eq!(fx.rec.borrow().visibility, NavVisibility::Hidden);

        // Rotate out to a desktop-sized viewport.
        {
            let mut env = fx.env.borrow_mut();
            env.viewport_width = 1024.0;
            env.viewport_height = 768.0;
        }
        emit(
            &fx.hub,
            event_types::MEDIA_CHANGE,
            EventData::MediaChange {
                mobile: false,
                reduced_motion: false,
            },
            60.0,
        );
        fx.behavior.on_frame(300.0);

        assert_eq!(fx.behavior.active_mode(), ActiveMode::Desktop);
        // The mobile teardown restored visibility before the swap.
        assert_eq!(fx.rec.borrow().visibility, NavVisibility::Visible);
    }

    #[test]
    fn test_dropping_behavior_removes_all_listeners() {
        let fx = mount(390.0, 844.0, MotionPreference::Normal, 0.0);
        assert!(fx.hub.handler_count(event_types::SCROLL) > 0);

        let hub = fx.hub.clone();
        drop(fx);
        assert_eq!(hub.handler_count(event_types::SCROLL), 0);
        assert_eq!(hub.handler_count(event_types::RESIZE), 0);
        assert_eq!(hub.handler_count(event_types::MEDIA_CHANGE), 0);
        assert_eq!(hub.handler_count(event_types::FOCUS_IN), 0);
    }
}
