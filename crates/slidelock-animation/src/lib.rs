//! Animation system for Slidelock
//!
//! Time-based tweens with easing curves and spring physics, exposed as a
//! stepper that any scheduler (frame clock, timer, test loop) can drive.

mod animation;

pub use animation::*;
