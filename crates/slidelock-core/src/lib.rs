//! Core runtime for the Slidelock control.
//!
//! Everything here is single-threaded: a [`Runtime`] owns the pending frame
//! callbacks, a [`FrameClock`] hands out cancellable registrations against it,
//! and [`MutableState`] / [`DerivedState`] carry observable values between the
//! gesture engine and whatever presents it.

mod collections;
mod frame_clock;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{Runtime, RuntimeHandle};
pub use state::{DerivedState, MutableState, Subscription};

pub type FrameCallbackId = u64;

/// Frame interval used by headless drivers, ~60 FPS.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

#[allow(non_snake_case)]
pub fn mutableStateOf<T: 'static>(initial: T) -> MutableState<T> {
    MutableState::new(initial)
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;
