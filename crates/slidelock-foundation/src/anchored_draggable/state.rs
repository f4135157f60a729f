use slidelock_animation::TargetAnimation;

use super::anchors::{Anchor, DraggableAnchors};
use super::config::{AnchoredDraggableConfig, ConfigError};

/// Where the state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Resting exactly on an anchor.
    AtAnchor(Anchor),
    /// Following the pointer. `origin` is the anchor the drag counts from.
    Dragging { origin: Anchor },
    /// Settling toward `to`; `from` is the last anchor the thumb rested on.
    Animating { from: Anchor, to: Anchor },
}

/// Motion between two anchors.
///
/// `from == to` only while resting, with `fraction == 0`. In motion `to` is
/// always the other anchor and `fraction` is the clamped share of the
/// distance covered from `from` toward it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragProgress {
    pub from: Anchor,
    pub to: Anchor,
    pub fraction: f32,
}

impl DragProgress {
    pub fn is_at_rest(&self) -> bool {
        self.from == self.to
    }
}

/// Raw drag input along the drag axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Start,
    /// Pointer moved by this many pixels.
    Move(f32),
    /// Pointer released with this velocity in px/s.
    End(f32),
}

/// What set the running settle animation in motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleCause {
    /// A released drag.
    Gesture,
    /// An `animate_to` request from the host.
    Programmatic,
}

/// Emitted once, on the tick the machine comes to rest on an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleEvent {
    pub anchor: Anchor,
    pub cause: SettleCause,
    /// `anchor` is `End` and the confirm policy accepts `cause`.
    pub commit: bool,
}

pub struct AnchoredDraggableState {
    config: AnchoredDraggableConfig,
    anchors: DraggableAnchors,
    phase: DragPhase,
    offset: f32,
    current_value: Anchor,
    animation: Option<TargetAnimation>,
    settle_cause: SettleCause,
    gestures_enabled: bool,
    version: u64,
}

impl AnchoredDraggableState {
    /// Machine resting on `initial`. Anchors start unmeasured (both at zero)
    /// until [`update_anchors`](Self::update_anchors) is called.
    pub fn new(initial: Anchor, config: AnchoredDraggableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            anchors: DraggableAnchors::default(),
            phase: DragPhase::AtAnchor(initial),
            offset: 0.0,
            current_value: initial,
            animation: None,
            settle_cause: SettleCause::Programmatic,
            gestures_enabled: true,
            version: 0,
        })
    }

    pub fn with_anchors(
        initial: Anchor,
        anchors: DraggableAnchors,
        config: AnchoredDraggableConfig,
    ) -> Result<Self, ConfigError> {
        let mut state = Self::new(initial, config)?;
        state.update_anchors(anchors);
        Ok(state)
    }

    pub fn config(&self) -> &AnchoredDraggableConfig {
        &self.config
    }

    pub fn anchors(&self) -> DraggableAnchors {
        self.anchors
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Thumb offset in pixels, always within the anchor range.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Anchor the machine last came to rest on.
    pub fn current_value(&self) -> Anchor {
        self.current_value
    }

    /// Anchor the machine is heading for: the resting anchor, the animation
    /// target, or where a motionless release would settle while dragging.
    pub fn target_value(&self) -> Anchor {
        match self.phase {
            DragPhase::AtAnchor(anchor) => anchor,
            DragPhase::Animating { to, .. } => to,
            DragPhase::Dragging { origin } => self.anchors.resolve_target(
                origin,
                self.offset,
                0.0,
                self.config.positional_threshold,
                self.config.velocity_threshold,
            ),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, DragPhase::Animating { .. })
    }

    pub fn is_at_rest(&self) -> bool {
        matches!(self.phase, DragPhase::AtAnchor(_))
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    /// Bumped on every observable change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn progress(&self) -> DragProgress {
        match self.phase {
            DragPhase::AtAnchor(anchor) => DragProgress {
                from: anchor,
                to: anchor,
                fraction: 0.0,
            },
            DragPhase::Dragging { origin } => self.progress_between(origin, origin.opposite()),
            DragPhase::Animating { from, to } => {
                let ahead = if to == from { from.opposite() } else { to };
                self.progress_between(from, ahead)
            }
        }
    }

    /// 0 at `Start`, 1 at `End`, whatever direction the thumb is moving.
    pub fn swipe_fraction(&self) -> f32 {
        let progress = self.progress();
        if progress.is_at_rest() {
            return match progress.from {
                Anchor::Start => 0.0,
                Anchor::End => 1.0,
            };
        }
        match progress.from {
            Anchor::Start => progress.fraction,
            Anchor::End => 1.0 - progress.fraction,
        }
    }

    fn progress_between(&self, from: Anchor, to: Anchor) -> DragProgress {
        let a = self.anchors.position_of(from);
        let b = self.anchors.position_of(to);
        let distance = b - a;
        let fraction = if distance.abs() <= f32::EPSILON {
            0.0
        } else {
            ((self.offset - a) / distance).clamp(0.0, 1.0)
        };
        DragProgress { from, to, fraction }
    }

    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        if self.gestures_enabled == enabled {
            return;
        }
        self.gestures_enabled = enabled;
        self.touch();
        if !enabled && self.is_dragging() {
            log::debug!("gestures disabled mid-drag, settling in place");
            self.settle_drag(0.0);
        }
    }

    /// Install anchors for a new track size.
    pub fn update_anchors(&mut self, anchors: DraggableAnchors) {
        if self.anchors == anchors {
            return;
        }
        self.anchors = anchors;
        match self.phase {
            DragPhase::AtAnchor(anchor) => {
                self.offset = anchors.position_of(anchor);
            }
            DragPhase::Dragging { origin } => {
                if anchors.is_degenerate() {
                    log::debug!("track collapsed mid-drag, returning to {origin:?}");
                    self.rest_on(origin);
                } else {
                    self.offset = anchors.clamp(self.offset);
                }
            }
            DragPhase::Animating { to, .. } => {
                self.offset = anchors.clamp(self.offset);
                if let Some(animation) = self.animation.as_mut() {
                    animation.set_bounds(anchors.min_position(), anchors.max_position());
                    animation.retarget(anchors.position_of(to));
                } else {
                    self.animation = Some(self.new_animation(to, 0.0));
                }
            }
        }
        self.touch();
    }

    /// Begin a drag. Ignored while gestures are disabled, while the anchors are
    /// degenerate, or when a drag is already running. Interrupts a running
    /// animation and continues from its current offset.
    pub fn drag_start(&mut self) -> bool {
        if !self.gestures_enabled {
            log::trace!("drag start ignored: gestures disabled");
            return false;
        }
        if self.anchors.is_degenerate() {
            log::trace!("drag start ignored: degenerate anchors");
            return false;
        }
        let origin = match self.phase {
            DragPhase::AtAnchor(anchor) => anchor,
            DragPhase::Animating { .. } => {
                self.animation = None;
                self.current_value
            }
            DragPhase::Dragging { .. } => {
                log::trace!("drag start ignored: drag already running");
                return false;
            }
        };
        log::debug!("{:?} -> Dragging from {origin:?} at {:.1}", self.phase, self.offset);
        self.phase = DragPhase::Dragging { origin };
        self.touch();
        true
    }

    /// Move the thumb by `delta` pixels. Returns the distance actually moved
    /// after clamping to the anchors.
    pub fn drag_by(&mut self, delta: f32) -> f32 {
        if !self.is_dragging() {
            log::trace!("drag move ignored: no drag running");
            return 0.0;
        }
        if !delta.is_finite() {
            return 0.0;
        }
        let delta = if self.config.reverse_direction {
            -delta
        } else {
            delta
        };
        let previous = self.offset;
        self.offset = self.anchors.clamp(previous + delta);
        let consumed = self.offset - previous;
        if consumed != 0.0 {
            self.touch();
        }
        consumed
    }

    /// Release the drag with `velocity` px/s and start settling. Returns the
    /// anchor the release resolved to, or `None` when no drag was running.
    pub fn drag_end(&mut self, velocity: f32) -> Option<Anchor> {
        if !self.is_dragging() {
            log::trace!("drag end ignored: no drag running");
            return None;
        }
        let velocity = if !velocity.is_finite() {
            0.0
        } else if self.config.reverse_direction {
            -velocity
        } else {
            velocity
        };
        Some(self.settle_drag(velocity))
    }

    pub fn dispatch(&mut self, event: DragEvent) {
        match event {
            DragEvent::Start => {
                self.drag_start();
            }
            DragEvent::Move(delta) => {
                self.drag_by(delta);
            }
            DragEvent::End(velocity) => {
                self.drag_end(velocity);
            }
        }
    }

    /// Animate to `target` on behalf of the host. A no-op when already resting
    /// on or heading for `target`; otherwise interrupts any drag or animation.
    pub fn animate_to(&mut self, target: Anchor) {
        match self.phase {
            DragPhase::AtAnchor(anchor) if anchor == target => {}
            DragPhase::Animating { to, .. } if to == target => {}
            DragPhase::Animating { .. } => {
                let velocity = self.animation.as_ref().map_or(0.0, |a| a.velocity());
                self.start_animation(target, velocity, SettleCause::Programmatic);
            }
            DragPhase::AtAnchor(_) | DragPhase::Dragging { .. } => {
                self.start_animation(target, 0.0, SettleCause::Programmatic);
            }
        }
    }

    /// Jump to `anchor` without animating. Emits no settle event.
    pub fn snap_to(&mut self, anchor: Anchor) {
        if self.phase == DragPhase::AtAnchor(anchor) {
            return;
        }
        log::debug!("{:?} -> snapped to {anchor:?}", self.phase);
        self.rest_on(anchor);
    }

    /// Advance a running settle animation by `dt_nanos`.
    ///
    /// Returns the settle event on the tick the machine comes to rest; every
    /// other call returns `None`, including calls while already resting.
    pub fn advance(&mut self, dt_nanos: u64) -> Option<SettleEvent> {
        let DragPhase::Animating { to, .. } = self.phase else {
            return None;
        };
        let animation = self.animation.as_mut()?;
        let step = animation.step(dt_nanos);
        self.offset = self.anchors.clamp(step.value);
        self.touch();
        if !step.finished {
            return None;
        }

        let cause = self.settle_cause;
        log::debug!("{:?} -> AtAnchor({to:?}) ({cause:?})", self.phase);
        self.rest_on(to);
        Some(SettleEvent {
            anchor: to,
            cause,
            commit: to == Anchor::End && self.config.confirm_policy.accepts(cause),
        })
    }

    fn settle_drag(&mut self, velocity: f32) -> Anchor {
        let DragPhase::Dragging { origin } = self.phase else {
            return self.current_value;
        };
        let target = self.anchors.resolve_target(
            origin,
            self.offset,
            velocity,
            self.config.positional_threshold,
            self.config.velocity_threshold,
        );
        log::debug!(
            "released at {:.1} with {velocity:.0} px/s, settling on {target:?}",
            self.offset
        );
        self.start_animation(target, velocity, SettleCause::Gesture);
        target
    }

    fn start_animation(&mut self, target: Anchor, velocity: f32, cause: SettleCause) {
        let from = self.current_value;
        log::debug!("{:?} -> Animating({from:?}, {target:?})", self.phase);
        self.phase = DragPhase::Animating { from, to: target };
        self.settle_cause = cause;
        self.animation = Some(self.new_animation(target, velocity));
        self.touch();
    }

    fn new_animation(&self, target: Anchor, velocity: f32) -> TargetAnimation {
        TargetAnimation::new(
            self.offset,
            self.anchors.position_of(target),
            velocity,
            self.config.animation,
        )
        .with_bounds(self.anchors.min_position(), self.anchors.max_position())
    }

    fn rest_on(&mut self, anchor: Anchor) {
        self.phase = DragPhase::AtAnchor(anchor);
        self.current_value = anchor;
        self.animation = None;
        self.offset = self.anchors.position_of(anchor);
        self.touch();
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
