use crate::gesture_constants::{DEFAULT_POSITIONAL_THRESHOLD, DEFAULT_VELOCITY_THRESHOLD_DP};
use slidelock_animation::{AnimationType, SpringSpec};
use slidelock_ui_graphics::Dp;
use thiserror::Error;

use super::state::SettleCause;

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("positional threshold must be in (0, 1], got {0}")]
    PositionalThreshold(f32),
    #[error("velocity threshold must be a non-negative number of px/s, got {0}")]
    VelocityThreshold(f32),
    #[error("spring stiffness must be positive, got {0}")]
    SpringStiffness(f32),
    #[error("spring damping ratio must be positive, got {0}")]
    SpringDamping(f32),
    #[error("spring rest threshold must be a positive number, got {0}")]
    SpringThreshold(f32),
    #[error("color change cutoff must be positive, got {0}")]
    ColorChangeCutoff(f32),
    #[error("fade cutoff must be positive, got {0}")]
    FadeCutoff(f32),
    #[error("density must be positive, got {0}")]
    Density(f32),
    #[error("thumb size must be positive, got {0}")]
    ThumbSize(f32),
    #[error("horizontal padding must be a non-negative number, got {0}")]
    HorizontalPadding(f32),
}

/// Which arrivals at `End` count as a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmPolicy {
    /// Only settles that a released drag started.
    #[default]
    GestureOnly,
    /// Programmatic `animate_to(End)` arrivals too.
    AnyArrival,
}

impl ConfirmPolicy {
    pub fn accepts(self, cause: SettleCause) -> bool {
        match self {
            ConfirmPolicy::GestureOnly => cause == SettleCause::Gesture,
            ConfirmPolicy::AnyArrival => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchoredDraggableConfig {
    /// Fraction of the anchor distance a slow release must cover, in (0, 1].
    pub positional_threshold: f32,
    /// Release speed in px/s that commits regardless of position.
    pub velocity_threshold: f32,
    /// Motion used to settle on an anchor.
    pub animation: AnimationType,
    pub confirm_policy: ConfirmPolicy,
    /// Negate drag deltas and release velocities.
    pub reverse_direction: bool,
}

impl Default for AnchoredDraggableConfig {
    fn default() -> Self {
        Self {
            positional_threshold: DEFAULT_POSITIONAL_THRESHOLD,
            velocity_threshold: Dp(DEFAULT_VELOCITY_THRESHOLD_DP).to_px(1.0),
            animation: AnimationType::Spring(SpringSpec::default()),
            confirm_policy: ConfirmPolicy::default(),
            reverse_direction: false,
        }
    }
}

impl AnchoredDraggableConfig {
    pub fn with_positional_threshold(mut self, fraction: f32) -> Self {
        self.positional_threshold = fraction;
        self
    }

    pub fn with_velocity_threshold(mut self, px_per_second: f32) -> Self {
        self.velocity_threshold = px_per_second;
        self
    }

    pub fn with_animation(mut self, animation: AnimationType) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_spring(self, spring: SpringSpec) -> Self {
        self.with_animation(AnimationType::Spring(spring))
    }

    pub fn with_confirm_policy(mut self, policy: ConfirmPolicy) -> Self {
        self.confirm_policy = policy;
        self
    }

    pub fn with_reverse_direction(mut self, reverse: bool) -> Self {
        self.reverse_direction = reverse;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.positional_threshold;
        if !(threshold.is_finite() && threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::PositionalThreshold(threshold));
        }
        let velocity = self.velocity_threshold;
        if !(velocity.is_finite() && velocity >= 0.0) {
            return Err(ConfigError::VelocityThreshold(velocity));
        }
        if let AnimationType::Spring(spring) = self.animation {
            if !(spring.stiffness.is_finite() && spring.stiffness > 0.0) {
                return Err(ConfigError::SpringStiffness(spring.stiffness));
            }
            if !(spring.damping_ratio.is_finite() && spring.damping_ratio > 0.0) {
                return Err(ConfigError::SpringDamping(spring.damping_ratio));
            }
            for threshold in [spring.position_threshold, spring.velocity_threshold] {
                if !(threshold.is_finite() && threshold > 0.0) {
                    return Err(ConfigError::SpringThreshold(threshold));
                }
            }
        }
        Ok(())
    }
}
