//! Headless robot for driving a [`SlideToUnlock`] in tests.
//!
//! The robot owns a [`Runtime`] and plays the frame clock by hand: every
//! [`advance_frame`](SlideRobot::advance_frame) drains the pending frame
//! callbacks at the next 60 Hz timestamp, so animations run exactly as they
//! would on a display, only deterministically.
//!
//! # Example
//!
//! ```
//! use slidelock_testing::SlideRobot;
//! use slidelock_ui::{Anchor, SlideToUnlockConfig};
//!
//! let mut robot = SlideRobot::new(300.0, SlideToUnlockConfig::default()).unwrap();
//! robot.drag_and_release(200.0, 0.0);
//! robot.wait_for_idle();
//! assert_eq!(robot.control().current_value(), Anchor::End);
//! assert_eq!(robot.unlock_requests(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slidelock_core::{MutableState, Runtime, RuntimeHandle, FRAME_INTERVAL_NANOS};
use slidelock_foundation::PointerEvent;
use slidelock_ui::{
    ConfigError, DragPhase, HapticFeedback, HapticFeedbackType, SlideToUnlock, SlideToUnlockConfig,
};

/// Frames [`SlideRobot::wait_for_idle`] runs before giving up.
pub const MAX_IDLE_FRAMES: usize = 600;

/// Haptics that remember every request.
#[derive(Default)]
pub struct RecordingHaptics {
    performed: RefCell<Vec<HapticFeedbackType>>,
}

impl RecordingHaptics {
    pub fn performed(&self) -> Vec<HapticFeedbackType> {
        self.performed.borrow().clone()
    }
}

impl HapticFeedback for RecordingHaptics {
    fn perform_haptic_feedback(&self, feedback_type: HapticFeedbackType) {
        self.performed.borrow_mut().push(feedback_type);
    }
}

/// Control outputs observed after one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample {
    pub frame_time_nanos: u64,
    pub offset: f32,
    pub swipe_fraction: f32,
    pub phase: DragPhase,
}

/// Test rule wrapping one control, its runtime and a host that reacts to
/// unlock requests.
pub struct SlideRobot {
    runtime: Runtime,
    control: SlideToUnlock,
    loading: MutableState<bool>,
    unlock_requests: Rc<Cell<u32>>,
    haptics: Rc<RecordingHaptics>,
    frame_time_nanos: u64,
    pointer_time_ms: i64,
    frames: Vec<FrameSample>,
}

impl SlideRobot {
    /// Idle control on a track `track_width` pixels wide. The simulated host
    /// starts loading as soon as an unlock is requested.
    pub fn new(track_width: f32, config: SlideToUnlockConfig) -> Result<Self, ConfigError> {
        Self::launch(track_width, config, false, true)
    }

    /// Full control over the host: the initial loading flag and whether an
    /// unlock request sets it.
    pub fn launch(
        track_width: f32,
        config: SlideToUnlockConfig,
        initially_loading: bool,
        load_on_unlock: bool,
    ) -> Result<Self, ConfigError> {
        let runtime = Runtime::new();
        let loading = MutableState::new(initially_loading);
        let unlock_requests = Rc::new(Cell::new(0));
        let haptics = Rc::new(RecordingHaptics::default());

        let host_loading = loading.clone();
        let host_requests = Rc::clone(&unlock_requests);
        let control = SlideToUnlock::new(runtime.handle(), config, loading.clone(), move || {
            host_requests.set(host_requests.get() + 1);
            if load_on_unlock {
                host_loading.set_if_changed(true);
            }
        })?
        .with_haptics(Rc::clone(&haptics) as Rc<dyn HapticFeedback>);
        control.on_size_changed(track_width);

        Ok(Self {
            runtime,
            control,
            loading,
            unlock_requests,
            haptics,
            frame_time_nanos: 0,
            pointer_time_ms: 0,
            frames: Vec::new(),
        })
    }

    pub fn control(&self) -> &SlideToUnlock {
        &self.control
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Host-side loading flag, as the control observes it.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading.set_if_changed(loading);
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn resize(&mut self, track_width: f32) {
        self.control.on_size_changed(track_width);
    }

    pub fn unlock_requests(&self) -> u32 {
        self.unlock_requests.get()
    }

    pub fn haptics(&self) -> Vec<HapticFeedbackType> {
        self.haptics.performed()
    }

    /// Every frame sampled since launch (or the last [`clear_frames`](Self::clear_frames)).
    pub fn frames(&self) -> &[FrameSample] {
        &self.frames
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Run one 60 Hz frame.
    pub fn advance_frame(&mut self) -> FrameSample {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.runtime.handle().drain_frame_callbacks(self.frame_time_nanos);
        self.pointer_time_ms = (self.frame_time_nanos / 1_000_000) as i64;
        let sample = FrameSample {
            frame_time_nanos: self.frame_time_nanos,
            offset: self.control.offset(),
            swipe_fraction: self.control.swipe_fraction(),
            phase: self.control.phase(),
        };
        self.frames.push(sample);
        sample
    }

    /// Run frames until nothing is waiting on the frame clock. Returns the
    /// number of frames run.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() && frames < MAX_IDLE_FRAMES {
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Start a drag and move the thumb by `delta` without releasing.
    pub fn drag_by(&mut self, delta: f32) -> bool {
        if !self.control.is_dragging() && !self.control.on_drag_start() {
            return false;
        }
        self.control.on_drag(delta);
        true
    }

    pub fn release(&mut self, velocity: f32) {
        self.control.on_drag_stop(velocity);
    }

    pub fn drag_and_release(&mut self, delta: f32, velocity: f32) {
        if self.drag_by(delta) {
            self.release(velocity);
        }
    }

    /// Press at `from_x`, slide to `to_x` in `steps` pointer moves spaced one
    /// frame apart, then lift. Frames run between moves, as on a device.
    pub fn swipe(&mut self, from_x: f32, to_x: f32, steps: u32) {
        let y = 20.0;
        self.pointer(PointerEvent::down(from_x, y, self.pointer_time_ms));
        let steps = steps.max(1);
        for step in 1..=steps {
            self.advance_frame();
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            self.pointer(PointerEvent::moved(x, y, self.pointer_time_ms));
        }
        self.advance_frame();
        self.pointer(PointerEvent::up(to_x, y, self.pointer_time_ms));
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.control.on_pointer_event(event);
    }
}
