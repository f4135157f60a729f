use slidelock_animation::SpringSpec;
use slidelock_foundation::gesture_constants::{
    DEFAULT_POSITIONAL_THRESHOLD, DEFAULT_VELOCITY_THRESHOLD_DP,
};
use slidelock_foundation::{AnchoredDraggableConfig, ConfigError, ConfirmPolicy};
use slidelock_ui_graphics::{Color, Dp};

pub const ALMOST_BLACK: Color = Color::from_argb_u32(0xFF11_1111);
pub const YELLOW: Color = Color::from_argb_u32(0xFFFF_DB00);

/// Colors the control paints with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlidePalette {
    /// Track color at rest on `Start`.
    pub track_base: Color,
    /// Track color once the swipe passes the color change cutoff.
    pub track_accent: Color,
    pub hint_text: Color,
    pub thumb: Color,
    /// Arrow and progress indicator on the thumb.
    pub thumb_content: Color,
}

impl Default for SlidePalette {
    fn default() -> Self {
        Self {
            track_base: ALMOST_BLACK,
            track_accent: YELLOW,
            hint_text: Color::WHITE,
            thumb: Color::WHITE,
            thumb_content: Color::BLACK,
        }
    }
}

/// Geometry, motion and look of a [`SlideToUnlock`](crate::SlideToUnlock).
#[derive(Clone, Debug, PartialEq)]
pub struct SlideToUnlockConfig {
    /// Physical pixels per dp.
    pub density: f32,
    pub thumb_size: Dp,
    /// Inner padding of the thumb around its icon.
    pub thumb_padding: Dp,
    pub track_height: Dp,
    pub horizontal_padding: Dp,
    pub vertical_padding: Dp,
    /// Release speed, in dp per second, that commits regardless of position.
    pub velocity_threshold: Dp,
    pub positional_threshold: f32,
    pub spring: SpringSpec,
    pub palette: SlidePalette,
    /// Swipe fraction at which the track reaches the accent color.
    pub color_change_cutoff: f32,
    /// Swipe fraction at which the hint text is fully transparent.
    pub fade_cutoff: f32,
    pub confirm_policy: ConfirmPolicy,
    pub hint_text: String,
}

impl Default for SlideToUnlockConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            thumb_size: Dp(40.0),
            thumb_padding: Dp(8.0),
            track_height: Dp(56.0),
            horizontal_padding: Dp(10.0),
            vertical_padding: Dp(8.0),
            velocity_threshold: Dp(DEFAULT_VELOCITY_THRESHOLD_DP),
            positional_threshold: DEFAULT_POSITIONAL_THRESHOLD,
            spring: SpringSpec::default(),
            palette: SlidePalette::default(),
            color_change_cutoff: 0.4,
            fade_cutoff: 0.35,
            confirm_policy: ConfirmPolicy::GestureOnly,
            hint_text: "Swipe to unlock reward".to_string(),
        }
    }
}

impl SlideToUnlockConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_thumb_size(mut self, thumb_size: Dp) -> Self {
        self.thumb_size = thumb_size;
        self
    }

    pub fn with_horizontal_padding(mut self, padding: Dp) -> Self {
        self.horizontal_padding = padding;
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: Dp) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_positional_threshold(mut self, fraction: f32) -> Self {
        self.positional_threshold = fraction;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_palette(mut self, palette: SlidePalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_color_change_cutoff(mut self, cutoff: f32) -> Self {
        self.color_change_cutoff = cutoff;
        self
    }

    pub fn with_fade_cutoff(mut self, cutoff: f32) -> Self {
        self.fade_cutoff = cutoff;
        self
    }

    pub fn with_confirm_policy(mut self, policy: ConfirmPolicy) -> Self {
        self.confirm_policy = policy;
        self
    }

    pub fn with_hint_text(mut self, text: impl Into<String>) -> Self {
        self.hint_text = text.into();
        self
    }

    pub fn thumb_size_px(&self) -> f32 {
        self.thumb_size.to_px(self.density)
    }

    pub fn horizontal_padding_px(&self) -> f32 {
        self.horizontal_padding.to_px(self.density)
    }

    /// Drag engine settings with dp values resolved at this density.
    pub fn draggable_config(&self) -> AnchoredDraggableConfig {
        AnchoredDraggableConfig::default()
            .with_positional_threshold(self.positional_threshold)
            .with_velocity_threshold(self.velocity_threshold.to_px(self.density))
            .with_spring(self.spring)
            .with_confirm_policy(self.confirm_policy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(ConfigError::Density(self.density));
        }
        if !(self.color_change_cutoff.is_finite() && self.color_change_cutoff > 0.0) {
            return Err(ConfigError::ColorChangeCutoff(self.color_change_cutoff));
        }
        if !(self.fade_cutoff.is_finite() && self.fade_cutoff > 0.0) {
            return Err(ConfigError::FadeCutoff(self.fade_cutoff));
        }
        let thumb_size = self.thumb_size.0;
        if !(thumb_size.is_finite() && thumb_size > 0.0) {
            return Err(ConfigError::ThumbSize(thumb_size));
        }
        let padding = self.horizontal_padding.0;
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(ConfigError::HorizontalPadding(padding));
        }
        self.draggable_config().validate()
    }
}
