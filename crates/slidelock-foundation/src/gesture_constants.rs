//! Shared gesture constants.
//!
//! Values are in logical pixels (or logical pixels per second). Scale by the
//! display density where the host works in physical pixels.

/// Distance the pointer must travel along the drag axis before a press turns
/// into a drag. Matches Android's ~8dp touch slop.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Release velocities are capped to this many logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Release speed, in dp per second, above which a drag commits in its
/// direction of motion regardless of how far it travelled.
pub const DEFAULT_VELOCITY_THRESHOLD_DP: f32 = 100.0;

/// Fraction of the distance between anchors a slow release must cover to
/// commit to the anchor ahead.
pub const DEFAULT_POSITIONAL_THRESHOLD: f32 = 0.5;
