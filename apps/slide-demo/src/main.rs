use std::cell::Cell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use slidelock_core::{MutableState, Runtime, FRAME_INTERVAL_NANOS};
use slidelock_foundation::PointerEvent;
use slidelock_ui::{
    Anchor, DragPhase, HapticFeedback, HapticFeedbackType, SlideToUnlock, SlideToUnlockConfig,
};
use slidelock_ui_graphics::Color;

const TRACK_WIDTH: f32 = 300.0;
const MAX_SETTLE_FRAMES: usize = 600;

struct LoggingHaptics;

impl HapticFeedback for LoggingHaptics {
    fn perform_haptic_feedback(&self, feedback_type: HapticFeedbackType) {
        log::info!("haptic: {feedback_type:?}");
    }
}

/// The host side of the demo: owns the runtime clock and the loading flag.
struct Demo {
    runtime: Runtime,
    control: SlideToUnlock,
    loading: MutableState<bool>,
    unlock_requests: Rc<Cell<u32>>,
    frame_time_nanos: u64,
}

impl Demo {
    fn new() -> Result<Self> {
        let runtime = Runtime::new();
        let loading = MutableState::new(false);
        let unlock_requests = Rc::new(Cell::new(0));

        let host_loading = loading.clone();
        let host_requests = Rc::clone(&unlock_requests);
        let control = SlideToUnlock::new(
            runtime.handle(),
            SlideToUnlockConfig::default(),
            loading.clone(),
            move || {
                host_requests.set(host_requests.get() + 1);
                log::info!("unlock requested, starting work");
                host_loading.set(true);
            },
        )
        .context("building slide-to-unlock control")?
        .with_haptics(Rc::new(LoggingHaptics));

        control.on_size_changed(TRACK_WIDTH);
        let anchors = control.anchors();
        log::info!(
            "track {TRACK_WIDTH}px: start anchor {} end anchor {}",
            anchors.position_of(Anchor::Start),
            anchors.position_of(Anchor::End)
        );

        Ok(Self {
            runtime,
            control,
            loading,
            unlock_requests,
            frame_time_nanos: 0,
        })
    }

    fn frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.runtime.handle().drain_frame_callbacks(self.frame_time_nanos);
    }

    fn pointer_time_ms(&self) -> i64 {
        (self.frame_time_nanos / 1_000_000) as i64
    }

    /// Run frames until the control stops animating, logging each one.
    fn settle(&mut self) -> Result<()> {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            if frames == MAX_SETTLE_FRAMES {
                bail!("control still animating after {MAX_SETTLE_FRAMES} frames");
            }
            self.frame();
            frames += 1;
            self.log_frame(frames);
        }
        log::info!("settled after {frames} frames in {:?}", self.control.phase());
        Ok(())
    }

    fn log_frame(&self, frame: usize) {
        log::info!(
            "frame {frame:>3} | offset {:>6.1} | fraction {:.3} | track {} | hint alpha {:.2} | {:?}",
            self.control.offset(),
            self.control.swipe_fraction(),
            hex(self.control.track_color()),
            self.control.hint_text_alpha(),
            self.control.phase(),
        );
    }

    /// Finger down at `from_x`, slide to `to_x` over `steps` frames, hold
    /// still for `hold` frames, lift.
    fn swipe(&mut self, from_x: f32, to_x: f32, steps: u32, hold: u32) {
        let y = 28.0;
        self.control
            .on_pointer_event(PointerEvent::down(from_x, y, self.pointer_time_ms()));
        for step in 1..=steps {
            self.frame();
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            self.control
                .on_pointer_event(PointerEvent::moved(x, y, self.pointer_time_ms()));
            self.log_frame(step as usize);
        }
        for _ in 0..hold {
            self.frame();
        }
        self.frame();
        self.control
            .on_pointer_event(PointerEvent::up(to_x, y, self.pointer_time_ms()));
    }

    fn expect_rest(&self, anchor: Anchor) -> Result<()> {
        let phase = self.control.phase();
        if phase != DragPhase::AtAnchor(anchor) {
            bail!("expected to rest on {anchor:?}, control is {phase:?}");
        }
        Ok(())
    }
}

fn hex(color: Color) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(color.r()),
        channel(color.g()),
        channel(color.b())
    )
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Slidelock demo ===");
    let mut demo = Demo::new()?;

    log::info!("--- partial drag, bounces back ---");
    demo.swipe(20.0, 80.0, 4, 4);
    demo.settle()?;
    demo.expect_rest(Anchor::Start)?;

    log::info!("--- drag past half, commits ---");
    demo.swipe(20.0, 230.0, 6, 0);
    demo.settle()?;
    demo.expect_rest(Anchor::End)?;
    log::info!(
        "loading = {}, thumb shows {:?}",
        demo.loading.get(),
        demo.control.thumb_icon()
    );

    log::info!("--- swipe while loading is ignored ---");
    demo.swipe(250.0, 20.0, 6, 0);
    demo.settle()?;
    demo.expect_rest(Anchor::End)?;

    log::info!("--- host finishes loading and resets ---");
    demo.loading.set(false);
    demo.settle()?;
    demo.expect_rest(Anchor::Start)?;

    let snapshot = demo.control.snapshot();
    println!(
        "unlock requests: {}, final thumb offset {:?}, hint \"{}\"",
        demo.unlock_requests.get(),
        snapshot.thumb_offset,
        snapshot.hint_text
    );
    Ok(())
}
