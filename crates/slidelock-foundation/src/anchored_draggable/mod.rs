//! Anchored dragging along one axis between a `Start` and an `End` anchor.

mod anchors;
mod config;
mod state;

pub use anchors::{compute_anchors, Anchor, DraggableAnchors};
pub use config::{AnchoredDraggableConfig, ConfigError, ConfirmPolicy};
pub use state::{
    AnchoredDraggableState, DragEvent, DragPhase, DragProgress, SettleCause, SettleEvent,
};

#[cfg(test)]
#[path = "../tests/anchors_tests.rs"]
mod anchors_tests;

#[cfg(test)]
#[path = "../tests/anchored_draggable_tests.rs"]
mod anchored_draggable_tests;
