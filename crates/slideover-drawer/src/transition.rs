//! The in-flight transition aggregate.

use slideover_animation::Animator;

use crate::config::DrawerState;

/// The two animators of an in-flight drawer transition: panel position and
/// corner radius.
///
/// The pair is paused, scrubbed, resumed, and finished as a single unit, so
/// the two values can never drift out of lockstep. The scrub baseline
/// captured when a gesture interrupts the pair lives here too.
pub struct TransitionAnimation {
    target: DrawerState,
    position: Animator<f32>,
    corner_radius: Animator<f32>,
    interrupted_progress: f32,
}

impl TransitionAnimation {
    pub(crate) fn new(
        target: DrawerState,
        position: Animator<f32>,
        corner_radius: Animator<f32>,
    ) -> Self {
        Self {
            target,
            position,
            corner_radius,
            interrupted_progress: 0.0,
        }
    }

    /// The settled state this transition is heading toward.
    pub fn target(&self) -> DrawerState {
        self.target
    }

    /// Fraction the pair had reached when a gesture last interrupted it.
    pub fn interrupted_progress(&self) -> f32 {
        self.interrupted_progress
    }

    /// Current linear fraction complete of the pair.
    pub fn fraction(&self) -> f32 {
        self.position.fraction_complete()
    }

    /// Number of animators in the running set. Fixed at two by construction.
    pub fn animator_count(&self) -> usize {
        2
    }

    pub(crate) fn start(&self) {
        self.position.start();
        self.corner_radius.start();
    }

    /// Pauses both animators and records where they were interrupted.
    pub(crate) fn pause(&mut self) {
        self.position.pause();
        self.corner_radius.pause();
        self.interrupted_progress = self.position.fraction_complete();
    }

    /// Drives both animators to the same fraction.
    pub(crate) fn set_fraction(&self, fraction: f32) {
        self.position.set_fraction_complete(fraction);
        self.corner_radius.set_fraction_complete(fraction);
    }

    pub(crate) fn resume(&self) {
        self.position.resume();
        self.corner_radius.resume();
    }

    /// Snaps any animator that has not yet finished to its end value. Called
    /// once the lead animator completes so the pair always ends as one.
    pub(crate) fn finish_remaining(&self) {
        self.position.finish();
        self.corner_radius.finish();
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
