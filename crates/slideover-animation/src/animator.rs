//! Interruptible property animators.
//!
//! An [`Animator`] interpolates one value from a start to an end over a fixed
//! duration, applying each sample through a mutation callback. Unlike a plain
//! tween it can be paused mid-flight, driven directly by an external fraction
//! (a drag gesture, typically), and resumed to finish at its original rate.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;

use crate::clock::{FrameCallbackRegistration, FrameClockHandle};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Easing curves applied on top of linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material-style curve; close analog of a critically damped spring.
    FastOutSlowIn,
}

impl Easing {
    /// Maps a linear fraction in [0, 1] through the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluates a unit cubic bezier (P0 = (0,0), P3 = (1,1)) at the given x.
///
/// x is monotone in the curve parameter for valid easing control points, so
/// bisection is enough to invert it.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    fn axis(p1: f32, p2: f32, t: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut t = fraction;
    for _ in 0..24 {
        let x = axis(x1, x2, t);
        if (x - fraction).abs() < 1e-5 {
            break;
        }
        if x < fraction {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    axis(y1, y2, t)
}

/// Timing for a single animator: how long it runs and how progress eases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn linear(duration: Duration) -> Self {
        Self::tween(duration, Easing::Linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::FastOutSlowIn)
    }
}

/// Lifecycle of an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    /// Created but not yet started.
    Idle,
    /// Advancing on frame ticks.
    Running,
    /// Frozen; progress is driven externally through `set_fraction_complete`.
    Paused,
    /// Reached the end value; completion callbacks have fired.
    Finished,
}

/// An interruptible animation of a single value.
///
/// Progress is a linear fraction in [0, 1]; the easing curve applies when the
/// fraction is turned into a value. Scrubbing while paused moves the fraction
/// without finishing the animation: completion fires only once the animator
/// runs (or is told to [`finish`](Animator::finish)) with full progress.
///
/// The mutation callback must not call back into the animator.
pub struct Animator<T: Lerp + 'static> {
    inner: Rc<RefCell<AnimatorInner<T>>>,
}

struct AnimatorInner<T: Lerp + 'static> {
    spec: AnimationSpec,
    from: T,
    to: T,
    phase: AnimatorPhase,
    /// Linear fraction complete, before easing.
    fraction: f32,
    last_frame_nanos: Option<u64>,
    clock: FrameClockHandle,
    registration: Option<FrameCallbackRegistration>,
    apply: Rc<dyn Fn(&T)>,
    completions: SmallVec<[Rc<dyn Fn()>; 1]>,
}

impl<T: Lerp + 'static> AnimatorInner<T> {
    fn value_at(&self, fraction: f32) -> T {
        self.from.lerp(&self.to, self.spec.easing.transform(fraction))
    }
}

impl<T: Lerp + 'static> Animator<T> {
    /// Creates an animator from `from` to `to`. `apply` receives every
    /// interpolated sample, including the initial one on `start`.
    pub fn new(
        clock: FrameClockHandle,
        spec: AnimationSpec,
        from: T,
        to: T,
        apply: impl Fn(&T) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                spec,
                from,
                to,
                phase: AnimatorPhase::Idle,
                fraction: 0.0,
                last_frame_nanos: None,
                clock,
                registration: None,
                apply: Rc::new(apply),
                completions: SmallVec::new(),
            })),
        }
    }

    /// Starts the animation running. No-op unless the animator is idle.
    pub fn start(&self) {
        let (apply, value) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != AnimatorPhase::Idle {
                return;
            }
            inner.phase = AnimatorPhase::Running;
            (Rc::clone(&inner.apply), inner.value_at(inner.fraction))
        };
        apply(&value);
        Self::schedule_frame(&self.inner);
    }

    /// Freezes progress where it is and stops frame scheduling.
    pub fn pause(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != AnimatorPhase::Running {
                return;
            }
            inner.phase = AnimatorPhase::Paused;
            inner.last_frame_nanos = None;
            inner.registration.take()
        };
        drop(registration);
    }

    /// Resumes a paused animator from its current fraction, running the
    /// remaining distance at the original rate.
    pub fn resume(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != AnimatorPhase::Paused {
                return;
            }
            inner.phase = AnimatorPhase::Running;
            inner.last_frame_nanos = None;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Moves progress to `fraction`, clamped to [0, 1], and applies the
    /// corresponding value immediately. Does not finish the animation even at
    /// full progress.
    pub fn set_fraction_complete(&self, fraction: f32) {
        let (apply, value) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase == AnimatorPhase::Finished {
                return;
            }
            inner.fraction = fraction.clamp(0.0, 1.0);
            (Rc::clone(&inner.apply), inner.value_at(inner.fraction))
        };
        apply(&value);
    }

    /// Current linear fraction complete.
    pub fn fraction_complete(&self) -> f32 {
        self.inner.borrow().fraction
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.inner.borrow().phase
    }

    pub fn is_running(&self) -> bool {
        self.phase() == AnimatorPhase::Running
    }

    /// Snaps straight to the end value and fires completion callbacks.
    pub fn finish(&self) {
        let (registration, apply, value, completions) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase == AnimatorPhase::Finished {
                return;
            }
            inner.phase = AnimatorPhase::Finished;
            inner.fraction = 1.0;
            inner.last_frame_nanos = None;
            (
                inner.registration.take(),
                Rc::clone(&inner.apply),
                inner.value_at(1.0),
                std::mem::take(&mut inner.completions),
            )
        };
        drop(registration);
        apply(&value);
        for callback in completions {
            callback();
        }
    }

    /// Registers a completion callback. Fires immediately when the animator
    /// has already finished.
    pub fn on_completion(&self, callback: impl Fn() + 'static) {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let fire_now = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase == AnimatorPhase::Finished {
                true
            } else {
                inner.completions.push(Rc::clone(&callback));
                false
            }
        };
        if fire_now {
            callback();
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatorInner<T>>>, frame_time_nanos: u64) {
        let mut completions: SmallVec<[Rc<dyn Fn()>; 1]> = SmallVec::new();
        let mut schedule_next = false;
        let update = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.phase != AnimatorPhase::Running {
                return;
            }
            // The first tick after start/resume only records a baseline time.
            if let Some(last) = inner.last_frame_nanos.replace(frame_time_nanos) {
                let elapsed = frame_time_nanos.saturating_sub(last);
                let duration_nanos = inner.spec.duration.as_nanos().max(1) as f32;
                inner.fraction = (inner.fraction + elapsed as f32 / duration_nanos).min(1.0);
            }
            if inner.fraction >= 1.0 {
                inner.phase = AnimatorPhase::Finished;
                inner.last_frame_nanos = None;
                completions = std::mem::take(&mut inner.completions);
            } else {
                schedule_next = true;
            }
            (Rc::clone(&inner.apply), inner.value_at(inner.fraction))
        };
        // Borrow released: apply and completion callbacks may reach back into
        // the owner of this animator.
        (update.0)(&update.1);
        for callback in completions {
            callback();
        }
        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
