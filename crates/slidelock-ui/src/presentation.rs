//! Swipe fraction to visual parameters.
//!
//! Every function here is total: fractions outside `[0, 1]` and NaN are
//! clamped, and the result stays constant past the cutoff.

use slidelock_ui_graphics::{lerp, Color};

use crate::config::SlidePalette;

/// `fraction / cutoff` clamped to `[0, 1]`, with NaN treated as 0.
pub fn cutoff_fraction(fraction: f32, cutoff: f32) -> f32 {
    let scaled = fraction / cutoff;
    if scaled.is_nan() {
        0.0
    } else {
        scaled.clamp(0.0, 1.0)
    }
}

/// Track color: `base` at 0, `accent` from `color_change_cutoff` on.
pub fn track_color(
    swipe_fraction: f32,
    base: Color,
    accent: Color,
    color_change_cutoff: f32,
) -> Color {
    lerp(base, accent, cutoff_fraction(swipe_fraction, color_change_cutoff))
}

/// Hint text opacity: 1 at 0, 0 from `fade_cutoff` on.
pub fn hint_text_alpha(swipe_fraction: f32, fade_cutoff: f32) -> f32 {
    1.0 - cutoff_fraction(swipe_fraction, fade_cutoff)
}

/// `text` faded toward full transparency as the swipe progresses.
pub fn hint_text_color(swipe_fraction: f32, text: Color, fade_cutoff: f32) -> Color {
    lerp(text, text.with_alpha(0.0), cutoff_fraction(swipe_fraction, fade_cutoff))
}

/// What the thumb shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbIcon {
    /// Right-pointing arrow inviting the swipe.
    Arrow,
    /// Indeterminate spinner while the host works.
    ProgressIndicator,
}

impl ThumbIcon {
    pub fn for_loading(loading: bool) -> Self {
        if loading {
            ThumbIcon::ProgressIndicator
        } else {
            ThumbIcon::Arrow
        }
    }
}

/// Palette and cutoffs bundled for repeated mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentationMapper {
    pub palette: SlidePalette,
    pub color_change_cutoff: f32,
    pub fade_cutoff: f32,
}

impl PresentationMapper {
    pub fn new(palette: SlidePalette, color_change_cutoff: f32, fade_cutoff: f32) -> Self {
        Self {
            palette,
            color_change_cutoff,
            fade_cutoff,
        }
    }

    pub fn track_color(&self, swipe_fraction: f32) -> Color {
        track_color(
            swipe_fraction,
            self.palette.track_base,
            self.palette.track_accent,
            self.color_change_cutoff,
        )
    }

    pub fn hint_text_alpha(&self, swipe_fraction: f32) -> f32 {
        hint_text_alpha(swipe_fraction, self.fade_cutoff)
    }

    pub fn hint_text_color(&self, swipe_fraction: f32) -> Color {
        hint_text_color(swipe_fraction, self.palette.hint_text, self.fade_cutoff)
    }
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
