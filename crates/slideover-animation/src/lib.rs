//! Interruptible animation primitives for the slideover drawer.
//!
//! This crate supplies the animation driver the drawer controller builds on:
//! a frame-callback clock pumped by the host event loop, and property
//! animators that can be paused mid-flight, scrubbed by an external fraction,
//! and resumed to finish at their original rate.

pub mod animator;
pub mod clock;

pub use animator::{AnimationSpec, Animator, AnimatorPhase, Easing, Lerp};
pub use clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock, FrameClockHandle};

pub mod prelude {
    pub use crate::animator::{AnimationSpec, Animator, AnimatorPhase, Easing, Lerp};
    pub use crate::clock::{FrameClock, FrameClockHandle};
}
