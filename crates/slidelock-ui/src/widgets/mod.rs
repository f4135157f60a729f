mod slide_to_unlock;

pub use slide_to_unlock::{SlideToUnlock, SlideToUnlockSnapshot};
