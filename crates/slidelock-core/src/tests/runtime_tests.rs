use super::*;

use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn frame_callback_runs_once_with_frame_time() {
    let runtime = Runtime::new();
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_nanos(move |time| seen.borrow_mut().push(time))
    };
    assert!(registration.is_active());
    assert!(runtime.handle().needs_frame());

    runtime.handle().drain_frame_callbacks(FRAME_INTERVAL_NANOS);
    runtime.handle().drain_frame_callbacks(2 * FRAME_INTERVAL_NANOS);

    assert_eq!(seen.borrow().as_slice(), &[FRAME_INTERVAL_NANOS]);
    assert!(!runtime.handle().has_frame_callbacks());
    assert!(!runtime.handle().needs_frame());
    drop(registration);
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::new();
    let fired = Rc::new(RefCell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        runtime
            .frame_clock()
            .with_frame_nanos(move |_| *fired.borrow_mut() = true)
    };
    drop(registration);
    runtime.handle().drain_frame_callbacks(1);

    assert!(!*fired.borrow());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let keep = Rc::new(RefCell::new(Vec::new()));

    {
        let frames = Rc::clone(&frames);
        let keep_inner = Rc::clone(&keep);
        let clock = runtime.frame_clock();
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            frames.borrow_mut().push(("first", time));
            let frames = Rc::clone(&frames);
            let next = clock.with_frame_nanos(move |time| frames.borrow_mut().push(("second", time)));
            keep_inner.borrow_mut().push(next);
        });
        keep.borrow_mut().push(registration);
    }

    handle.drain_frame_callbacks(10);
    assert_eq!(frames.borrow().as_slice(), &[("first", 10)]);
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(20);
    assert_eq!(frames.borrow().as_slice(), &[("first", 10), ("second", 20)]);
    assert_eq!(handle.last_frame_time_nanos(), Some(20));
}

#[test]
fn callback_cancelled_mid_drain_does_not_run() {
    let runtime = Runtime::new();
    let fired = Rc::new(RefCell::new(Vec::new()));
    let victim: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));

    let first = {
        let victim = Rc::clone(&victim);
        let fired = Rc::clone(&fired);
        runtime.frame_clock().with_frame_nanos(move |_| {
            fired.borrow_mut().push("first");
            if let Some(registration) = victim.borrow_mut().take() {
                registration.cancel();
            }
        })
    };
    let second = {
        let fired = Rc::clone(&fired);
        runtime
            .frame_clock()
            .with_frame_nanos(move |_| fired.borrow_mut().push("second"))
    };
    victim.borrow_mut().replace(second);

    runtime.handle().drain_frame_callbacks(1);

    assert_eq!(fired.borrow().as_slice(), &["first"]);
    drop(first);
}

#[test]
fn dead_runtime_handles_are_inert() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert!(!handle.has_frame_callbacks());
}
