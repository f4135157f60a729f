//! Pointer input and drag recognition.

mod drag_detector;
mod types;

pub use drag_detector::DragGestureDetector;
pub use types::{Orientation, PointerEvent, PointerEventKind};
