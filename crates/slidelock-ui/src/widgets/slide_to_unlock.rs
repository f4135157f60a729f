//! The slide-to-unlock control.
//!
//! [`SlideToUnlock`] owns an [`AnchoredDraggableState`] resting on `Start`
//! (idle) or `End` (loading). The host feeds it track measurements and drag
//! input; settle animations drive themselves from the runtime frame clock.
//! When a swipe commits on `End` the control plays a long-press haptic and
//! asks the host to unlock exactly once. The host answers by flipping its
//! `loading` state, and flipping it back later returns the thumb to `Start`.

use std::cell::RefCell;
use std::rc::Rc;

use slidelock_core::{
    DerivedState, FrameCallbackRegistration, MutableState, RuntimeHandle, Subscription,
};
use slidelock_foundation::{
    compute_anchors, Anchor, AnchoredDraggableState, ConfigError, DragEvent, DragGestureDetector,
    DragPhase, DraggableAnchors, Orientation, PointerEvent, SettleEvent,
};
use slidelock_ui_graphics::{Color, IntOffset};

use crate::config::SlideToUnlockConfig;
use crate::haptics::{HapticFeedback, HapticFeedbackType, NoHapticFeedback};
use crate::presentation::{PresentationMapper, ThumbIcon};

/// Everything a renderer needs to draw one frame of the control, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideToUnlockSnapshot {
    pub track_width: f32,
    pub track_height: f32,
    pub track_color: Color,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub thumb_size: f32,
    pub thumb_padding: f32,
    pub thumb_color: Color,
    pub thumb_content_color: Color,
    pub thumb_icon: ThumbIcon,
    /// Thumb position inside the padded track, rounded to whole pixels.
    pub thumb_offset: IntOffset,
    pub offset: f32,
    pub swipe_fraction: f32,
    pub hint_text: String,
    pub hint_text_color: Color,
    pub hint_text_alpha: f32,
    /// Horizontal inset keeping the centered hint clear of the thumb.
    pub hint_horizontal_padding: f32,
    pub phase: DragPhase,
    pub loading: bool,
}

struct Engine {
    state: AnchoredDraggableState,
    detector: DragGestureDetector,
    runtime: RuntimeHandle,
    registration: Option<FrameCallbackRegistration>,
    last_frame_nanos: Option<u64>,
    track_width: f32,
}

struct Shared {
    engine: RefCell<Engine>,
    on_unlock_requested: RefCell<Box<dyn FnMut()>>,
    haptics: RefCell<Rc<dyn HapticFeedback>>,
}

impl Shared {
    /// Keep exactly one frame registration alive while animating, none
    /// otherwise.
    fn sync_driver(this: &Rc<Self>) {
        let runtime = {
            let mut engine = this.engine.borrow_mut();
            if !engine.state.is_animating() {
                engine.registration = None;
                engine.last_frame_nanos = None;
                return;
            }
            if engine.registration.is_some() {
                return;
            }
            engine.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("runtime is gone, settle animation will not advance");
        }
        this.engine.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<Self>, frame_time_nanos: u64) {
        let event = {
            let mut engine = this.engine.borrow_mut();
            engine.registration = None;
            // The first frame of an animation only records its start time.
            let dt = engine
                .last_frame_nanos
                .map_or(0, |last| frame_time_nanos.saturating_sub(last));
            engine.last_frame_nanos = Some(frame_time_nanos);
            engine.state.advance(dt)
        };
        if let Some(event) = event {
            Self::on_settled(this, event);
        }
        Self::sync_driver(this);
    }

    fn on_settled(this: &Rc<Self>, event: SettleEvent) {
        log::debug!("settled on {:?} ({:?})", event.anchor, event.cause);
        if !event.commit {
            return;
        }
        let haptics = this.haptics.borrow().clone();
        haptics.perform_haptic_feedback(HapticFeedbackType::LongPress);
        match this.on_unlock_requested.try_borrow_mut() {
            Ok(mut on_unlock_requested) => on_unlock_requested(),
            Err(_) => log::warn!("unlock requested re-entrantly, ignoring"),
        }
    }

    fn apply_loading(this: &Rc<Self>, loading: bool) {
        {
            let mut engine = this.engine.borrow_mut();
            let target = if loading { Anchor::End } else { Anchor::Start };
            log::debug!("loading = {loading}, heading for {target:?}");
            engine.state.animate_to(target);
            engine.state.set_gestures_enabled(!loading);
        }
        Self::sync_driver(this);
    }

    fn with_state<R>(this: &Rc<Self>, f: impl FnOnce(&mut AnchoredDraggableState) -> R) -> R {
        let result = f(&mut this.engine.borrow_mut().state);
        Self::sync_driver(this);
        result
    }
}

pub struct SlideToUnlock {
    shared: Rc<Shared>,
    config: SlideToUnlockConfig,
    presentation: PresentationMapper,
    loading: MutableState<bool>,
    swipe_fraction: DerivedState<f32>,
    _loading_subscription: Subscription,
}

impl SlideToUnlock {
    /// Build a control observing the host's `loading` flag.
    ///
    /// The thumb starts on `End` when `loading` is already set, on `Start`
    /// otherwise. `on_unlock_requested` runs once per committed swipe.
    pub fn new(
        runtime: RuntimeHandle,
        config: SlideToUnlockConfig,
        loading: MutableState<bool>,
        on_unlock_requested: impl FnMut() + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let is_loading = loading.get();
        let initial = if is_loading { Anchor::End } else { Anchor::Start };
        let mut state = AnchoredDraggableState::new(initial, config.draggable_config())?;
        state.set_gestures_enabled(!is_loading);

        let shared = Rc::new(Shared {
            engine: RefCell::new(Engine {
                state,
                detector: DragGestureDetector::new(Orientation::Horizontal)
                    .with_density(config.density),
                runtime,
                registration: None,
                last_frame_nanos: None,
                track_width: 0.0,
            }),
            on_unlock_requested: RefCell::new(Box::new(on_unlock_requested)),
            haptics: RefCell::new(Rc::new(NoHapticFeedback)),
        });

        let weak = Rc::downgrade(&shared);
        let loading_subscription = loading.subscribe(move |&loading| {
            if let Some(shared) = weak.upgrade() {
                Shared::apply_loading(&shared, loading);
            }
        });

        let version_source = Rc::clone(&shared);
        let fraction_source = Rc::clone(&shared);
        let swipe_fraction = DerivedState::new(
            move || version_source.engine.borrow().state.version(),
            move || fraction_source.engine.borrow().state.swipe_fraction(),
        );

        let presentation = PresentationMapper::new(
            config.palette,
            config.color_change_cutoff,
            config.fade_cutoff,
        );

        Ok(Self {
            shared,
            config,
            presentation,
            loading,
            swipe_fraction,
            _loading_subscription: loading_subscription,
        })
    }

    pub fn with_haptics(self, haptics: Rc<dyn HapticFeedback>) -> Self {
        *self.shared.haptics.borrow_mut() = haptics;
        self
    }

    pub fn config(&self) -> &SlideToUnlockConfig {
        &self.config
    }

    /// The measured track width changed.
    pub fn on_size_changed(&self, track_width_px: f32) {
        let anchors = compute_anchors(
            track_width_px,
            self.config.thumb_size_px(),
            self.config.horizontal_padding_px(),
        );
        {
            let mut engine = self.shared.engine.borrow_mut();
            if engine.track_width == track_width_px && engine.state.anchors() == anchors {
                return;
            }
            engine.track_width = track_width_px;
            if anchors.is_degenerate() {
                log::warn!(
                    "track width {track_width_px}px leaves no room to slide a {}px thumb",
                    self.config.thumb_size_px()
                );
            } else {
                log::debug!(
                    "anchors: start {} end {}",
                    anchors.min_position(),
                    anchors.max_position()
                );
            }
            engine.state.update_anchors(anchors);
        }
        Shared::sync_driver(&self.shared);
    }

    pub fn anchors(&self) -> DraggableAnchors {
        self.shared.engine.borrow().state.anchors()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Flip the host's loading flag. Same as setting the `MutableState`
    /// handed to [`new`](Self::new).
    pub fn set_loading(&self, loading: bool) {
        self.loading.set_if_changed(loading);
    }

    pub fn on_drag_start(&self) -> bool {
        Shared::with_state(&self.shared, |state| state.drag_start())
    }

    /// Returns the distance the thumb actually moved.
    pub fn on_drag(&self, delta_px: f32) -> f32 {
        Shared::with_state(&self.shared, |state| state.drag_by(delta_px))
    }

    /// Release with `velocity` px/s. Returns the anchor the thumb heads for.
    pub fn on_drag_stop(&self, velocity: f32) -> Option<Anchor> {
        Shared::with_state(&self.shared, |state| state.drag_end(velocity))
    }

    pub fn on_drag_event(&self, event: DragEvent) {
        Shared::with_state(&self.shared, |state| state.dispatch(event));
    }

    /// Raw pointer input in track-local pixels.
    pub fn on_pointer_event(&self, event: PointerEvent) {
        let events = self.shared.engine.borrow_mut().detector.on_pointer_event(event);
        for event in events {
            self.on_drag_event(event);
        }
    }

    /// Animate to `anchor` outside of the loading flow.
    pub fn animate_to(&self, anchor: Anchor) {
        Shared::with_state(&self.shared, |state| state.animate_to(anchor));
    }

    /// Advance a running settle animation by `dt_nanos` on the caller's clock.
    pub fn tick(&self, dt_nanos: u64) -> Option<SettleEvent> {
        let event = self.shared.engine.borrow_mut().state.advance(dt_nanos);
        if let Some(event) = event {
            Shared::on_settled(&self.shared, event);
        }
        Shared::sync_driver(&self.shared);
        event
    }

    /// A frame callback is pending on the runtime.
    pub fn has_pending_frame(&self) -> bool {
        self.shared.engine.borrow().registration.is_some()
    }

    pub fn phase(&self) -> DragPhase {
        self.shared.engine.borrow().state.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.engine.borrow().state.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.shared.engine.borrow().state.is_animating()
    }

    pub fn current_value(&self) -> Anchor {
        self.shared.engine.borrow().state.current_value()
    }

    pub fn target_value(&self) -> Anchor {
        self.shared.engine.borrow().state.target_value()
    }

    pub fn gestures_enabled(&self) -> bool {
        self.shared.engine.borrow().state.gestures_enabled()
    }

    pub fn offset(&self) -> f32 {
        self.shared.engine.borrow().state.offset()
    }

    pub fn thumb_offset(&self) -> IntOffset {
        IntOffset::rounded(self.offset(), 0.0)
    }

    /// 0 on `Start`, 1 on `End`. Recomputed only when the drag state changed.
    pub fn swipe_fraction(&self) -> f32 {
        self.swipe_fraction.get()
    }

    pub fn swipe_fraction_state(&self) -> &DerivedState<f32> {
        &self.swipe_fraction
    }

    pub fn track_color(&self) -> Color {
        self.presentation.track_color(self.swipe_fraction())
    }

    pub fn hint_text_alpha(&self) -> f32 {
        self.presentation.hint_text_alpha(self.swipe_fraction())
    }

    pub fn hint_text_color(&self) -> Color {
        self.presentation.hint_text_color(self.swipe_fraction())
    }

    pub fn thumb_icon(&self) -> ThumbIcon {
        ThumbIcon::for_loading(self.is_loading())
    }

    pub fn snapshot(&self) -> SlideToUnlockSnapshot {
        let density = self.config.density;
        let swipe_fraction = self.swipe_fraction();
        let palette = self.config.palette;
        let (track_width, phase, offset) = {
            let engine = self.shared.engine.borrow();
            (engine.track_width, engine.state.phase(), engine.state.offset())
        };
        SlideToUnlockSnapshot {
            track_width,
            track_height: self.config.track_height.to_px(density),
            track_color: self.presentation.track_color(swipe_fraction),
            horizontal_padding: self.config.horizontal_padding_px(),
            vertical_padding: self.config.vertical_padding.to_px(density),
            thumb_size: self.config.thumb_size_px(),
            thumb_padding: self.config.thumb_padding.to_px(density),
            thumb_color: palette.thumb,
            thumb_content_color: palette.thumb_content,
            thumb_icon: self.thumb_icon(),
            thumb_offset: IntOffset::rounded(offset, 0.0),
            offset,
            swipe_fraction,
            hint_text: self.config.hint_text.clone(),
            hint_text_color: self.presentation.hint_text_color(swipe_fraction),
            hint_text_alpha: self.presentation.hint_text_alpha(swipe_fraction),
            hint_horizontal_padding: (self.config.thumb_size + self.config.thumb_padding)
                .to_px(density),
            phase,
            loading: self.is_loading(),
        }
    }
}
