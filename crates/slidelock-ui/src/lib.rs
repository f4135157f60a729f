//! Slide-to-unlock control for Slidelock.
//!
//! Hosts build a [`SlideToUnlock`] against a runtime, report the measured
//! track width, forward drag or pointer input and read the thumb offset and
//! colors back each frame (or take a [`SlideToUnlockSnapshot`]).

mod config;
mod haptics;
mod presentation;
mod widgets;

pub use config::{SlidePalette, SlideToUnlockConfig, ALMOST_BLACK, YELLOW};
pub use haptics::{HapticFeedback, HapticFeedbackType, NoHapticFeedback};
pub use presentation::{
    cutoff_fraction, hint_text_alpha, hint_text_color, track_color, PresentationMapper, ThumbIcon,
};
pub use widgets::{SlideToUnlock, SlideToUnlockSnapshot};

pub use slidelock_foundation::{Anchor, ConfigError, ConfirmPolicy, DragPhase, SettleCause};

pub mod prelude {
    pub use crate::config::{SlidePalette, SlideToUnlockConfig};
    pub use crate::haptics::{HapticFeedback, HapticFeedbackType};
    pub use crate::presentation::ThumbIcon;
    pub use crate::widgets::SlideToUnlock;
    pub use slidelock_foundation::{Anchor, DragPhase};
}
