//! Assertions over robot frame recordings.

use slidelock_foundation::Anchor;
use slidelock_ui::DragPhase;

use crate::robot::{FrameSample, SlideRobot};

/// Assert the control rests on `anchor`.
pub fn assert_at_rest_on(robot: &SlideRobot, anchor: Anchor) {
    let phase = robot.control().phase();
    assert_eq!(
        phase,
        DragPhase::AtAnchor(anchor),
        "expected to rest on {anchor:?}, control is {phase:?}"
    );
}

/// Assert every recorded offset lies within `[min, max]`.
pub fn assert_offsets_within(frames: &[FrameSample], min: f32, max: f32) {
    for frame in frames {
        assert!(
            frame.offset >= min && frame.offset <= max,
            "offset {} left [{min}, {max}] at {}ns",
            frame.offset,
            frame.frame_time_nanos
        );
    }
}

/// Assert the swipe fraction never decreases across `frames`.
pub fn assert_fraction_non_decreasing(frames: &[FrameSample]) {
    for pair in frames.windows(2) {
        assert!(
            pair[1].swipe_fraction >= pair[0].swipe_fraction,
            "fraction fell from {} to {}",
            pair[0].swipe_fraction,
            pair[1].swipe_fraction
        );
    }
}

/// Assert the swipe fraction never increases across `frames`.
pub fn assert_fraction_non_increasing(frames: &[FrameSample]) {
    for pair in frames.windows(2) {
        assert!(
            pair[1].swipe_fraction <= pair[0].swipe_fraction,
            "fraction rose from {} to {}",
            pair[0].swipe_fraction,
            pair[1].swipe_fraction
        );
    }
}
