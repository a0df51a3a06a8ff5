//! A draggable two-state drawer (bottom sheet).
//!
//! The drawer rests in one of two states, collapsed or expanded, and moves
//! between them through an interruptible transition: a drag gesture can begin
//! one, scrub it by a live fraction, and release it to settle. Built on the
//! animators and frame clock from `slideover-animation`; rendering and
//! gesture recognition stay with the host, which feeds gestures through
//! [`DrawerGestureListener`] and reads [`DrawerVisuals`] each frame.

pub mod config;
pub mod controller;
pub mod transition;

pub use config::{DrawerConfig, DrawerState};
pub use controller::{DrawerController, DrawerGestureListener, DrawerPhase, DrawerVisuals};
pub use transition::TransitionAnimation;

pub mod prelude {
    pub use crate::config::{DrawerConfig, DrawerState};
    pub use crate::controller::{
        DrawerController, DrawerGestureListener, DrawerPhase, DrawerVisuals,
    };
}
