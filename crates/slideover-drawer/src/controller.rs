//! The drawer controller: a two-state machine whose transitions a drag
//! gesture can interrupt, scrub, and release.
//!
//! A transition animates the panel's visible height (eased) and corner radius
//! (linear) together. Beginning a gesture while a transition is in flight
//! repurposes the running pair instead of restarting it; the settled state
//! flips only in the completion hook.

use std::cell::RefCell;
use std::rc::Rc;

use slideover_animation::{AnimationSpec, Animator, Easing, FrameClockHandle};

use crate::config::{DrawerConfig, DrawerState};
use crate::transition::TransitionAnimation;

/// Animated outputs the host reads each frame to lay out the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerVisuals {
    /// How much of the panel is on screen, from handle height to full height.
    pub visible_height: f32,
    pub corner_radius: f32,
}

/// Where the drawer currently is in its two-state lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerPhase {
    Idle(DrawerState),
    Transitioning { target: DrawerState },
}

/// Inbound gesture contract, reported by whichever component owns the pan
/// recognizer. Callbacks for one gesture arrive strictly ordered:
/// begin, change*, end.
pub trait DrawerGestureListener {
    fn on_drag_begin(&self);
    fn on_drag_change(&self, translation_y: f32);
    fn on_drag_end(&self);
}

struct ControllerInner {
    config: DrawerConfig,
    clock: FrameClockHandle,
    state: DrawerState,
    transition: Option<TransitionAnimation>,
    visuals: Rc<RefCell<DrawerVisuals>>,
}

impl ControllerInner {
    /// Completion hook of the lead animator: flips the settled state and
    /// clears the running pair atomically.
    fn complete_transition(this: &Rc<RefCell<ControllerInner>>) {
        let finished = {
            let mut inner = this.borrow_mut();
            let Some(transition) = inner.transition.take() else {
                return;
            };
            inner.state = transition.target();
            log::debug!("drawer settled in {:?}", inner.state);
            transition
        };
        finished.finish_remaining();
    }
}

/// Owns the drawer's settled state and the at-most-one running transition.
pub struct DrawerController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl DrawerController {
    /// Creates a controller settled in [`DrawerState::Collapsed`].
    pub fn new(config: DrawerConfig, clock: FrameClockHandle) -> Self {
        let state = DrawerState::Collapsed;
        let visuals = Rc::new(RefCell::new(DrawerVisuals {
            visible_height: config.visible_height(state),
            corner_radius: config.corner_radius(state),
        }));
        Self {
            inner: Rc::new(RefCell::new(ControllerInner {
                config,
                clock,
                state,
                transition: None,
                visuals,
            })),
        }
    }

    pub fn config(&self) -> DrawerConfig {
        self.inner.borrow().config
    }

    /// The settled state. Unchanged while a transition is in flight.
    pub fn state(&self) -> DrawerState {
        self.inner.borrow().state
    }

    pub fn phase(&self) -> DrawerPhase {
        let inner = self.inner.borrow();
        match inner.transition.as_ref() {
            Some(transition) => DrawerPhase::Transitioning {
                target: transition.target(),
            },
            None => DrawerPhase::Idle(inner.state),
        }
    }

    /// Current animated outputs for layout.
    pub fn visuals(&self) -> DrawerVisuals {
        *self.inner.borrow().visuals.borrow()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.borrow().transition.is_some()
    }

    /// 0 when idle, 2 while a transition is in flight.
    pub fn running_animation_count(&self) -> usize {
        self.inner
            .borrow()
            .transition
            .as_ref()
            .map(TransitionAnimation::animator_count)
            .unwrap_or(0)
    }

    /// Linear fraction complete of the in-flight transition, if any.
    pub fn transition_fraction(&self) -> Option<f32> {
        self.inner
            .borrow()
            .transition
            .as_ref()
            .map(TransitionAnimation::fraction)
    }

    /// Starts a transition toward `target` unless one is already running.
    ///
    /// Also the programmatic entry point for opening or closing the drawer
    /// without a gesture.
    pub fn start_transition_if_needed(&self, target: DrawerState) {
        let mut inner = self.inner.borrow_mut();
        if inner.transition.is_some() {
            log::trace!("drawer transition already running, keeping it");
            return;
        }
        let config = inner.config;
        let (from_height, from_corner) = {
            let current = inner.visuals.borrow();
            (current.visible_height, current.corner_radius)
        };

        let position = Animator::new(
            inner.clock.clone(),
            AnimationSpec::tween(config.duration, Easing::FastOutSlowIn),
            from_height,
            config.visible_height(target),
            {
                let visuals = Rc::clone(&inner.visuals);
                move |value: &f32| visuals.borrow_mut().visible_height = *value
            },
        );
        let corner_radius = Animator::new(
            inner.clock.clone(),
            AnimationSpec::linear(config.duration),
            from_corner,
            config.corner_radius(target),
            {
                let visuals = Rc::clone(&inner.visuals);
                move |value: &f32| visuals.borrow_mut().corner_radius = *value
            },
        );

        // The position animator leads the pair; its completion settles the
        // whole transition.
        let weak = Rc::downgrade(&self.inner);
        position.on_completion(move || {
            if let Some(inner) = weak.upgrade() {
                ControllerInner::complete_transition(&inner);
            }
        });

        log::debug!("drawer transition started: {:?} -> {:?}", inner.state, target);
        let transition = TransitionAnimation::new(target, position, corner_radius);
        transition.start();
        inner.transition = Some(transition);
    }

    /// Starts (or repurposes) the transition away from the settled state and
    /// pauses it so the gesture can drive progress.
    pub fn begin_interactive_transition(&self) {
        let target = self.inner.borrow().state.opposite();
        self.start_transition_if_needed(target);
        let mut inner = self.inner.borrow_mut();
        if let Some(transition) = inner.transition.as_mut() {
            transition.pause();
            log::trace!(
                "drawer gesture began, paused at fraction {:.3}",
                transition.interrupted_progress()
            );
        }
    }

    /// Scrubs the paused transition by the gesture's vertical translation.
    ///
    /// Pure given the same input: repeated calls with one translation land on
    /// one fraction. Ignored when no transition is in flight.
    pub fn update_interactive_transition(&self, translation_y: f32) {
        let inner = self.inner.borrow();
        let Some(transition) = inner.transition.as_ref() else {
            return;
        };
        let raw = translation_y / inner.config.panel_height;
        // Dragging up must always push progress toward expanded; the sign
        // flips with the settled state, not the transition target.
        let directional = if inner.state == DrawerState::Expanded {
            raw
        } else {
            -raw
        };
        let fraction = (directional + transition.interrupted_progress()).clamp(0.0, 1.0);
        transition.set_fraction(fraction);
    }

    /// Releases the gesture: the transition runs from its scrubbed fraction
    /// to completion at its original rate, then flips the settled state.
    ///
    /// A gesture that scrubbed no progress reverts instead: the panel still
    /// sits at its resting pose, so the transition is dropped and the settled
    /// state stands.
    pub fn end_interactive_transition(&self) {
        let mut inner = self.inner.borrow_mut();
        let Some(transition) = inner.transition.as_ref() else {
            return;
        };
        if transition.fraction() == 0.0 {
            log::trace!("drawer gesture ended with no progress, reverting");
            inner.transition = None;
            return;
        }
        transition.resume();
    }
}

impl DrawerGestureListener for DrawerController {
    fn on_drag_begin(&self) {
        self.begin_interactive_transition();
    }

    fn on_drag_change(&self, translation_y: f32) {
        self.update_interactive_transition(translation_y);
    }

    fn on_drag_end(&self) {
        self.end_interactive_transition();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
