//! Gesture-driven building blocks for Slidelock.
//!
//! The centre of this crate is [`AnchoredDraggableState`]: a single-axis drag
//! state machine that rests on one of two [`Anchor`]s, follows the pointer
//! while dragging and springs to whichever anchor the release resolves to.

pub mod anchored_draggable;
pub mod gesture_constants;
pub mod input;
mod velocity_tracker;

pub use anchored_draggable::{
    compute_anchors, Anchor, AnchoredDraggableConfig, AnchoredDraggableState, ConfigError,
    ConfirmPolicy, DragEvent, DragPhase, DragProgress, DraggableAnchors, SettleCause, SettleEvent,
};
pub use input::{DragGestureDetector, Orientation, PointerEvent, PointerEventKind};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::anchored_draggable::{
        Anchor, AnchoredDraggableConfig, AnchoredDraggableState, DragEvent, DragPhase,
        DragProgress, DraggableAnchors,
    };
    pub use crate::input::{Orientation, PointerEvent, PointerEventKind};
}
