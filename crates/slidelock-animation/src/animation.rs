//! Tween and spring animations stepped by elapsed time.

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    LinearOutSlowInEasing,
    FastOutLinearEasing,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton-Raphson for the parameter whose x matches `fraction`, bisection
    // if the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = curve(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - error / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let error = curve(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    curve(ay, by, cy, t)
}

/// Tween specification: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
///
/// Thresholds are in the units of the animated value: pixels and pixels per
/// second when animating an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Below this speed the spring may come to rest.
    pub velocity_threshold: f32,
    /// Closer than this to the target the spring may come to rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;

    /// Critically damped, medium stiffness, half-pixel visibility threshold.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: Self::DAMPING_RATIO_NO_BOUNCY,
            stiffness: Self::STIFFNESS_MEDIUM,
            velocity_threshold: 1.0,
            position_threshold: 0.5,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: Self::DAMPING_RATIO_MEDIUM_BOUNCY,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping_ratio(mut self, damping_ratio: f32) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    pub fn with_thresholds(mut self, position_threshold: f32, velocity_threshold: f32) -> Self {
        self.position_threshold = position_threshold;
        self.velocity_threshold = velocity_threshold;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Spring(SpringSpec::default())
    }
}

/// Longest integration step for springs. Stiff springs go unstable under
/// semi-implicit Euler at a full 60 Hz frame.
const MAX_SPRING_STEP_NANOS: u64 = 4_000_000;

/// Longest gap a single spring step integrates. Larger gaps (a suspended
/// device, a stalled host) are clamped to this.
const MAX_SPRING_ELAPSED_NANOS: u64 = 10_000_000_000;

/// Result of advancing a [`TargetAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub value: f32,
    /// Units per second.
    pub velocity: f32,
    pub finished: bool,
}

/// Scalar animation toward a fixed target, advanced by explicit time deltas.
///
/// This is the `(state, dt) -> state'` core of every animation in the crate:
/// nothing here knows about clocks, so a frame callback, a timer or a test
/// loop can drive it the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAnimation {
    start: f32,
    target: f32,
    value: f32,
    velocity: f32,
    animation: AnimationType,
    play_time_nanos: u64,
    bounds: Option<(f32, f32)>,
    finished: bool,
}

impl TargetAnimation {
    pub fn new(start: f32, target: f32, initial_velocity: f32, animation: AnimationType) -> Self {
        Self {
            start,
            target,
            value: start,
            velocity: initial_velocity,
            animation,
            play_time_nanos: 0,
            bounds: None,
            finished: false,
        }
    }

    /// Keep the animated value inside `[min, max]`. Hitting a bound kills the
    /// velocity component pointing out of the range.
    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.set_bounds(min, max);
        self
    }

    pub fn set_bounds(&mut self, min: f32, max: f32) {
        self.bounds = Some((min.min(max), max.max(min)));
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn animation_type(&self) -> AnimationType {
        self.animation
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Point the animation at a new target, keeping value and velocity.
    pub fn retarget(&mut self, target: f32) {
        if self.target == target {
            return;
        }
        log::trace!("retarget {} -> {target} at {}", self.target, self.value);
        self.start = self.value;
        self.target = target;
        self.play_time_nanos = 0;
        self.finished = false;
    }

    pub fn step(&mut self, dt_nanos: u64) -> AnimationStep {
        if !self.finished {
            match self.animation {
                AnimationType::Tween(spec) => self.step_tween(spec, dt_nanos),
                AnimationType::Spring(spec) => self.step_spring(spec, dt_nanos),
            }
        }
        AnimationStep {
            value: self.value,
            velocity: self.velocity,
            finished: self.finished,
        }
    }

    fn step_tween(&mut self, spec: AnimationSpec, dt_nanos: u64) {
        let previous = self.value;
        self.play_time_nanos = self.play_time_nanos.saturating_add(dt_nanos);
        let delay_nanos = spec.delay_millis.saturating_mul(1_000_000);
        if self.play_time_nanos < delay_nanos {
            return;
        }
        let duration_nanos = spec.duration_millis.saturating_mul(1_000_000).max(1);
        let linear =
            ((self.play_time_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        self.value = self.start.lerp(&self.target, spec.easing.transform(linear));
        self.velocity = if dt_nanos > 0 {
            (self.value - previous) / (dt_nanos as f32 / 1_000_000_000.0)
        } else {
            self.velocity
        };
        self.apply_bounds();
        if linear >= 1.0 {
            self.settle();
        }
    }

    fn step_spring(&mut self, spec: SpringSpec, dt_nanos: u64) {
        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut remaining_nanos = dt_nanos.min(MAX_SPRING_ELAPSED_NANOS);

        // Semi-implicit Euler on the displacement from the target.
        while remaining_nanos > 0 {
            let step_nanos = remaining_nanos.min(MAX_SPRING_STEP_NANOS);
            let step = step_nanos as f32 / 1_000_000_000.0;
            let displacement = self.value - self.target;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.value += self.velocity * step;
            self.apply_bounds();
            remaining_nanos -= step_nanos;
        }

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (self.value - self.target).abs() < spec.position_threshold;
        if at_rest && near_target {
            self.settle();
        }
    }

    fn apply_bounds(&mut self) {
        let Some((min, max)) = self.bounds else {
            return;
        };
        if self.value < min {
            self.value = min;
            self.velocity = self.velocity.max(0.0);
        } else if self.value > max {
            self.value = max;
            self.velocity = self.velocity.min(0.0);
        }
    }

    fn settle(&mut self) {
        self.value = self.target;
        self.start = self.target;
        self.velocity = 0.0;
        self.play_time_nanos = 0;
        self.finished = true;
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
