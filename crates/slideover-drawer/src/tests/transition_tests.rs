use super::*;

use slideover_animation::{AnimationSpec, Animator, FrameClock};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(clock: &FrameClock, now: &mut u64, frames: usize) {
    for _ in 0..frames {
        *now += FRAME_NANOS;
        clock.drain_frame_callbacks(*now);
    }
}

fn transition_pair(clock: &FrameClock) -> (TransitionAnimation, Rc<Cell<f32>>, Rc<Cell<f32>>) {
    let position_out = Rc::new(Cell::new(60.0f32));
    let corner_out = Rc::new(Cell::new(0.0f32));
    let spec = AnimationSpec::linear(Duration::from_secs(1));

    let position = {
        let out = Rc::clone(&position_out);
        Animator::new(clock.handle(), spec, 60.0, 560.0, move |v: &f32| out.set(*v))
    };
    let corner = {
        let out = Rc::clone(&corner_out);
        Animator::new(clock.handle(), spec, 0.0, 20.0, move |v: &f32| out.set(*v))
    };
    let transition = TransitionAnimation::new(DrawerState::Expanded, position, corner);
    (transition, position_out, corner_out)
}

#[test]
fn pause_records_progress_of_the_pair() {
    let clock = FrameClock::new();
    let mut now = 0u64;
    let (mut transition, position_out, corner_out) = transition_pair(&clock);

    transition.start();
    pump(&clock, &mut now, 10);
    transition.pause();

    let fraction = transition.interrupted_progress();
    assert!(fraction > 0.0 && fraction < 1.0);
    assert_eq!(transition.fraction(), fraction);
    assert!(!clock.has_frame_callbacks());

    // Both outputs sit at the same fraction of their own ranges.
    assert!((position_out.get() - (60.0 + 500.0 * fraction)).abs() < 1e-3);
    assert!((corner_out.get() - 20.0 * fraction).abs() < 1e-3);
}

#[test]
fn scrub_drives_both_in_lockstep() {
    let clock = FrameClock::new();
    let (mut transition, position_out, corner_out) = transition_pair(&clock);

    transition.start();
    transition.pause();
    transition.set_fraction(0.5);

    assert_eq!(transition.fraction(), 0.5);
    assert!((position_out.get() - 310.0).abs() < 1e-4);
    assert!((corner_out.get() - 10.0).abs() < 1e-4);
}

#[test]
fn finish_remaining_completes_both() {
    let clock = FrameClock::new();
    let (mut transition, position_out, corner_out) = transition_pair(&clock);

    transition.start();
    transition.pause();
    transition.set_fraction(0.3);
    transition.finish_remaining();

    assert!((position_out.get() - 560.0).abs() < 1e-4);
    assert!((corner_out.get() - 20.0).abs() < 1e-4);
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn animator_count_is_fixed_at_two() {
    let clock = FrameClock::new();
    let (transition, _position_out, _corner_out) = transition_pair(&clock);
    assert_eq!(transition.animator_count(), 2);
    assert_eq!(transition.target(), DrawerState::Expanded);
}
