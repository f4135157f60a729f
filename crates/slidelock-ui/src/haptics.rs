//! Haptic feedback seam. The control only asks for feedback; hosts decide
//! what a given kind feels like on their platform.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticFeedbackType {
    /// Strong confirmation, played when a swipe commits.
    LongPress,
    /// Light tick.
    TextHandleMove,
}

pub trait HapticFeedback {
    fn perform_haptic_feedback(&self, feedback_type: HapticFeedbackType);
}

/// Discards every request. Used when the host installs no haptics.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHapticFeedback;

impl HapticFeedback for NoHapticFeedback {
    fn perform_haptic_feedback(&self, _feedback_type: HapticFeedbackType) {}
}
