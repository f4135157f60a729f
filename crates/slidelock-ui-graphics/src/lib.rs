//! Pure math/data for drawing & units in Slidelock
//!
//! This crate contains color definitions, unit types and integer offsets
//! that the control hands to whatever renders it.

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::{lerp, Color};
    pub use crate::geometry::{IntOffset, Point};
    pub use crate::unit::Dp;
}
