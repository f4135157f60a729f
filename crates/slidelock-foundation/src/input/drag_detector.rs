use smallvec::SmallVec;

use super::types::{Orientation, PointerEvent, PointerEventKind};
use crate::anchored_draggable::DragEvent;
use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::velocity_tracker::VelocityTracker1D;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tracking {
    Idle,
    /// Pointer is down but has not crossed the touch slop yet.
    Pressed { down: f32 },
    Dragging { last: f32 },
}

/// Turns raw pointer events into [`DragEvent`]s along one axis.
///
/// A press becomes a drag once the pointer travels further than the touch
/// slop along the axis. The first move past the slop emits `Start` followed by
/// the distance beyond the slop, so the thumb does not jump by the slop.
#[derive(Clone, Debug)]
pub struct DragGestureDetector {
    orientation: Orientation,
    touch_slop: f32,
    max_fling_velocity: f32,
    tracking: Tracking,
    velocity_tracker: VelocityTracker1D,
}

impl Default for DragGestureDetector {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

impl DragGestureDetector {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            touch_slop: DRAG_THRESHOLD,
            max_fling_velocity: MAX_FLING_VELOCITY,
            tracking: Tracking::Idle,
            velocity_tracker: VelocityTracker1D::new(),
        }
    }

    /// Scale the slop and fling cap from logical to physical pixels.
    pub fn with_density(mut self, density: f32) -> Self {
        if density.is_finite() && density > 0.0 {
            self.touch_slop = DRAG_THRESHOLD * density;
            self.max_fling_velocity = MAX_FLING_VELOCITY * density;
        }
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.tracking, Tracking::Dragging { .. })
    }

    pub fn on_pointer_event(&mut self, event: PointerEvent) -> SmallVec<[DragEvent; 2]> {
        let mut out = SmallVec::new();
        let position = self.orientation.main_axis(event.position);

        match (event.kind, self.tracking) {
            (PointerEventKind::Down, Tracking::Dragging { .. }) => {
                // A new press without a release: close the running drag first.
                out.push(DragEvent::End(0.0));
                self.press(position, event.time_ms);
            }
            (PointerEventKind::Down, _) => self.press(position, event.time_ms),
            (PointerEventKind::Move, Tracking::Pressed { down }) => {
                self.velocity_tracker.add_data_point(event.time_ms, position);
                let travelled = position - down;
                if travelled.abs() > self.touch_slop {
                    let beyond = travelled - self.touch_slop * travelled.signum();
                    log::trace!("touch slop crossed after {travelled:.1}px");
                    out.push(DragEvent::Start);
                    if beyond != 0.0 {
                        out.push(DragEvent::Move(beyond));
                    }
                    self.tracking = Tracking::Dragging { last: position };
                }
            }
            (PointerEventKind::Move, Tracking::Dragging { last }) => {
                self.velocity_tracker.add_data_point(event.time_ms, position);
                let delta = position - last;
                if delta != 0.0 {
                    out.push(DragEvent::Move(delta));
                }
                self.tracking = Tracking::Dragging { last: position };
            }
            (PointerEventKind::Up, Tracking::Dragging { last }) => {
                let delta = position - last;
                if delta != 0.0 {
                    out.push(DragEvent::Move(delta));
                }
                self.velocity_tracker.add_data_point(event.time_ms, position);
                let velocity = self
                    .velocity_tracker
                    .calculate_velocity_with_max(self.max_fling_velocity);
                out.push(DragEvent::End(velocity));
                self.release();
            }
            (PointerEventKind::Cancel, Tracking::Dragging { .. }) => {
                out.push(DragEvent::End(0.0));
                self.release();
            }
            (PointerEventKind::Up | PointerEventKind::Cancel, _) => self.release(),
            (PointerEventKind::Move, Tracking::Idle) => {}
        }
        out
    }

    fn press(&mut self, position: f32, time_ms: i64) {
        self.velocity_tracker.reset();
        self.velocity_tracker.add_data_point(time_ms, position);
        self.tracking = Tracking::Pressed { down: position };
    }

    fn release(&mut self) {
        self.tracking = Tracking::Idle;
        self.velocity_tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(events: &[DragEvent]) -> f32 {
        events
            .iter()
            .map(|event| match event {
                DragEvent::Move(delta) => *delta,
                _ => 0.0,
            })
            .sum()
    }

    #[test]
    fn press_and_release_inside_slop_emits_nothing() {
        let mut detector = DragGestureDetector::default();
        assert!(detector.on_pointer_event(PointerEvent::down(20.0, 5.0, 0)).is_empty());
        assert!(detector.on_pointer_event(PointerEvent::moved(26.0, 5.0, 10)).is_empty());
        assert!(detector.on_pointer_event(PointerEvent::up(26.0, 5.0, 20)).is_empty());
        assert!(!detector.is_dragging());
    }

    #[test]
    fn crossing_slop_starts_drag_without_jump() {
        let mut detector = DragGestureDetector::default();
        detector.on_pointer_event(PointerEvent::down(20.0, 5.0, 0));

        let events = detector.on_pointer_event(PointerEvent::moved(40.0, 5.0, 16));

        assert_eq!(events.as_slice(), &[DragEvent::Start, DragEvent::Move(12.0)]);
        assert!(detector.is_dragging());

        let events = detector.on_pointer_event(PointerEvent::moved(50.0, 5.0, 32));
        assert_eq!(events.as_slice(), &[DragEvent::Move(10.0)]);
    }

    #[test]
    fn cross_axis_motion_does_not_start_drag() {
        let mut detector = DragGestureDetector::default();
        detector.on_pointer_event(PointerEvent::down(20.0, 5.0, 0));
        assert!(detector
            .on_pointer_event(PointerEvent::moved(21.0, 80.0, 16))
            .is_empty());
        assert!(!detector.is_dragging());
    }

    #[test]
    fn vertical_detector_reads_y() {
        let mut detector = DragGestureDetector::new(Orientation::Vertical);
        detector.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
        let events = detector.on_pointer_event(PointerEvent::moved(0.0, -20.0, 16));
        assert_eq!(events.as_slice(), &[DragEvent::Start, DragEvent::Move(-12.0)]);
    }

    #[test]
    fn release_reports_capped_velocity() {
        let mut detector = DragGestureDetector::default();
        detector.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
        let mut total = 0.0;
        for step in 1..=5 {
            let events =
                detector.on_pointer_event(PointerEvent::moved(step as f32 * 100.0, 0.0, step));
            total += moves(&events);
        }
        let events = detector.on_pointer_event(PointerEvent::up(500.0, 0.0, 6));

        assert_eq!(total + moves(&events), 500.0 - DRAG_THRESHOLD);
        assert_eq!(events.last(), Some(&DragEvent::End(MAX_FLING_VELOCITY)));
        assert!(!detector.is_dragging());
    }

    #[test]
    fn slow_drag_releases_with_its_speed() {
        let mut detector = DragGestureDetector::default();
        detector.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
        for step in 1..=6 {
            detector.on_pointer_event(PointerEvent::moved(step as f32 * 5.0, 0.0, step * 10));
        }
        let events = detector.on_pointer_event(PointerEvent::up(35.0, 0.0, 70));
        let Some(DragEvent::End(velocity)) = events.last().copied() else {
            panic!("expected an end event, got {events:?}");
        };
        assert!((velocity - 500.0).abs() < 50.0, "got {velocity}");
    }

    #[test]
    fn cancel_ends_drag_without_velocity() {
        let mut detector = DragGestureDetector::default();
        detector.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
        detector.on_pointer_event(PointerEvent::moved(50.0, 0.0, 5));
        let events = detector.on_pointer_event(PointerEvent::cancel(10));
        assert_eq!(events.as_slice(), &[DragEvent::End(0.0)]);
    }

    #[test]
    fn stray_events_are_ignored() {
        let mut detector = DragGestureDetector::default();
        assert!(detector.on_pointer_event(PointerEvent::moved(50.0, 0.0, 5)).is_empty());
        assert!(detector.on_pointer_event(PointerEvent::up(50.0, 0.0, 6)).is_empty());
        assert!(detector.on_pointer_event(PointerEvent::cancel(7)).is_empty());
    }

    #[test]
    fn density_scales_slop() {
        let mut detector = DragGestureDetector::default().with_density(2.0);
        detector.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
        assert!(detector.on_pointer_event(PointerEvent::moved(12.0, 0.0, 5)).is_empty());
        let events = detector.on_pointer_event(PointerEvent::moved(20.0, 0.0, 10));
        assert_eq!(events.as_slice(), &[DragEvent::Start, DragEvent::Move(4.0)]);
    }
}
