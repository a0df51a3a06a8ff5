use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn callback_runs_with_the_drained_frame_time() {
    let clock = FrameClock::new();
    let seen = Rc::new(Cell::new(0u64));
    let sink = Rc::clone(&seen);
    clock
        .handle()
        .register_frame_callback(move |time| sink.set(time))
        .expect("clock is alive");

    clock.drain_frame_callbacks(42);
    assert_eq!(seen.get(), 42);
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn callbacks_run_in_registration_order() {
    let clock = FrameClock::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for label in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        clock
            .handle()
            .register_frame_callback(move |_| order.borrow_mut().push(label))
            .expect("clock is alive");
    }

    clock.drain_frame_callbacks(1);
    assert_eq!(order.borrow().as_slice(), &["first", "second", "third"]);
}

#[test]
fn reregistration_during_drain_waits_for_next_frame() {
    let clock = FrameClock::new();
    let handle = clock.handle();
    let times = Rc::new(RefCell::new(Vec::new()));
    {
        let times = Rc::clone(&times);
        let handle = handle.clone();
        clock
            .handle()
            .register_frame_callback(move |time| {
                times.borrow_mut().push(time);
                let times = Rc::clone(&times);
                handle.register_frame_callback(move |time| times.borrow_mut().push(time));
            })
            .expect("clock is alive");
    }

    clock.drain_frame_callbacks(1);
    assert_eq!(times.borrow().as_slice(), &[1]);
    assert!(clock.has_frame_callbacks());

    clock.drain_frame_callbacks(2);
    assert_eq!(times.borrow().as_slice(), &[1, 2]);
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn dropped_registration_never_fires() {
    let clock = FrameClock::new();
    let fired = Rc::new(Cell::new(false));
    let sink = Rc::clone(&fired);
    let registration = clock.handle().with_frame_nanos(move |_| sink.set(true));
    drop(registration);

    clock.drain_frame_callbacks(1);
    assert!(!fired.get());
}

#[test]
fn cancel_by_id_removes_only_that_callback() {
    let clock = FrameClock::new();
    let handle = clock.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    let id = {
        let fired = Rc::clone(&fired);
        handle
            .register_frame_callback(move |_| fired.borrow_mut().push("cancelled"))
            .expect("clock is alive")
    };
    {
        let fired = Rc::clone(&fired);
        handle
            .register_frame_callback(move |_| fired.borrow_mut().push("kept"))
            .expect("clock is alive");
    }

    handle.cancel_frame_callback(id);
    clock.drain_frame_callbacks(1);
    assert_eq!(fired.borrow().as_slice(), &["kept"]);
}

#[test]
fn handle_outlives_clock_safely() {
    let clock = FrameClock::new();
    let handle = clock.handle();
    drop(clock);

    assert!(handle.register_frame_callback(|_| {}).is_none());
    // Inert registration must not panic on cancel or drop.
    let registration = handle.with_frame_nanos(|_| {});
    registration.cancel();
    handle.cancel_frame_callback(7);
}

#[test]
fn drain_now_delivers_elapsed_time() {
    let clock = FrameClock::new();
    let fired = Rc::new(Cell::new(false));
    let sink = Rc::clone(&fired);
    clock
        .handle()
        .register_frame_callback(move |_| sink.set(true))
        .expect("clock is alive");

    clock.drain_now();
    assert!(fired.get());
}
