use super::*;

const FRAME: u64 = 16_666_667;

fn standard_state(initial: Anchor) -> AnchoredDraggableState {
    standard_state_with(initial, AnchoredDraggableConfig::default())
}

fn standard_state_with(initial: Anchor, config: AnchoredDraggableConfig) -> AnchoredDraggableState {
    AnchoredDraggableState::with_anchors(initial, compute_anchors(300.0, 40.0, 10.0), config)
        .expect("valid config")
}

/// Tick until the machine rests, collecting settle events and offsets.
fn run_until_rest(state: &mut AnchoredDraggableState) -> (Vec<SettleEvent>, Vec<f32>) {
    let mut events = Vec::new();
    let mut offsets = Vec::new();
    for _ in 0..240 {
        if state.is_at_rest() {
            break;
        }
        if let Some(event) = state.advance(FRAME) {
            events.push(event);
        }
        offsets.push(state.offset());
    }
    assert!(state.is_at_rest(), "machine should settle within four seconds");
    (events, offsets)
}

fn drag_to(state: &mut AnchoredDraggableState, offset: f32) {
    assert!(state.drag_start());
    let delta = offset - state.offset();
    state.drag_by(delta);
}

#[test]
fn initial_state_rests_on_initial_anchor() {
    let start = standard_state(Anchor::Start);
    assert_eq!(start.phase(), DragPhase::AtAnchor(Anchor::Start));
    assert_eq!(start.offset(), 0.0);
    assert_eq!(start.swipe_fraction(), 0.0);
    assert!(start.progress().is_at_rest());

    let end = standard_state(Anchor::End);
    assert_eq!(end.phase(), DragPhase::AtAnchor(Anchor::End));
    assert_eq!(end.offset(), 240.0);
    assert_eq!(end.swipe_fraction(), 1.0);
    assert_eq!(end.progress().fraction, 0.0);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = AnchoredDraggableConfig::default().with_positional_threshold(-0.1);
    assert!(matches!(
        AnchoredDraggableState::new(Anchor::Start, config),
        Err(ConfigError::PositionalThreshold(_))
    ));
}

#[test]
fn drag_moves_offset_and_clamps_to_anchors() {
    let mut state = standard_state(Anchor::Start);
    assert!(state.drag_start());
    assert_eq!(state.phase(), DragPhase::Dragging { origin: Anchor::Start });

    assert_eq!(state.drag_by(100.0), 100.0);
    assert_eq!(state.offset(), 100.0);
    assert_eq!(state.drag_by(500.0), 140.0);
    assert_eq!(state.offset(), 240.0);
    assert_eq!(state.drag_by(-1000.0), -240.0);
    assert_eq!(state.offset(), 0.0);
    assert!(state.is_dragging());
}

#[test]
fn swipe_fraction_tracks_offset_while_dragging() {
    let mut state = standard_state(Anchor::Start);
    state.drag_start();
    for offset in [0.0f32, 24.0, 60.0, 120.0, 200.0, 240.0] {
        state.drag_by(offset - state.offset());
        let expected = offset / 240.0;
        assert!((state.swipe_fraction() - expected).abs() < 1e-6);
        let progress = state.progress();
        assert_eq!((progress.from, progress.to), (Anchor::Start, Anchor::End));
    }
}

#[test]
fn release_past_half_commits_to_end() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 200.0);
    assert!((state.swipe_fraction() - 200.0 / 240.0).abs() < 1e-6);
    assert_eq!(state.target_value(), Anchor::End);

    assert_eq!(state.drag_end(0.0), Some(Anchor::End));
    assert_eq!(
        state.phase(),
        DragPhase::Animating {
            from: Anchor::Start,
            to: Anchor::End
        }
    );

    let (events, offsets) = run_until_rest(&mut state);
    assert_eq!(
        events,
        vec![SettleEvent {
            anchor: Anchor::End,
            cause: SettleCause::Gesture,
            commit: true,
        }]
    );
    assert!(offsets.windows(2).all(|pair| pair[1] >= pair[0]));
    assert_eq!(state.phase(), DragPhase::AtAnchor(Anchor::End));
    assert_eq!(state.offset(), 240.0);
    assert_eq!(state.current_value(), Anchor::End);
    assert_eq!(state.swipe_fraction(), 1.0);
}

#[test]
fn release_short_of_half_returns_to_start() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 50.0);
    assert_eq!(state.target_value(), Anchor::Start);
    assert_eq!(state.drag_end(0.0), Some(Anchor::Start));

    let (events, _) = run_until_rest(&mut state);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].anchor, Anchor::Start);
    assert!(!events[0].commit);
    assert_eq!(state.offset(), 0.0);
    assert_eq!(state.swipe_fraction(), 0.0);
}

#[test]
fn fast_release_commits_despite_short_drag() {
    let config = AnchoredDraggableConfig::default().with_velocity_threshold(300.0);
    let mut state = standard_state_with(Anchor::Start, config);
    drag_to(&mut state, 50.0);
    assert_eq!(state.drag_end(400.0), Some(Anchor::End));

    let (events, offsets) = run_until_rest(&mut state);
    assert!(offsets.iter().all(|offset| (0.0..=240.0).contains(offset)));
    assert_eq!(events.len(), 1);
    assert!(events[0].commit);
}

#[test]
fn huge_fling_stays_within_anchors() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 230.0);
    state.drag_end(8_000.0);
    let (_, offsets) = run_until_rest(&mut state);
    assert!(offsets.iter().all(|offset| (0.0..=240.0).contains(offset)));
    assert_eq!(state.offset(), 240.0);
}

#[test]
fn programmatic_arrival_is_not_a_commit_by_default() {
    let mut state = standard_state(Anchor::Start);
    state.animate_to(Anchor::End);
    assert_eq!(
        state.phase(),
        DragPhase::Animating {
            from: Anchor::Start,
            to: Anchor::End
        }
    );

    let (events, _) = run_until_rest(&mut state);
    assert_eq!(
        events,
        vec![SettleEvent {
            anchor: Anchor::End,
            cause: SettleCause::Programmatic,
            commit: false,
        }]
    );
    assert_eq!(state.phase(), DragPhase::AtAnchor(Anchor::End));
}

#[test]
fn any_arrival_policy_commits_programmatic_arrivals() {
    let config = AnchoredDraggableConfig::default().with_confirm_policy(ConfirmPolicy::AnyArrival);
    let mut state = standard_state_with(Anchor::Start, config);
    state.animate_to(Anchor::End);
    let (events, _) = run_until_rest(&mut state);
    assert_eq!(events.len(), 1);
    assert!(events[0].commit);
}

#[test]
fn animate_to_current_anchor_is_a_no_op() {
    let mut state = standard_state(Anchor::End);
    let version = state.version();

    state.animate_to(Anchor::End);

    assert_eq!(state.version(), version);
    assert_eq!(state.phase(), DragPhase::AtAnchor(Anchor::End));
    assert_eq!(state.offset(), 240.0);
    assert_eq!(state.advance(FRAME), None);
}

#[test]
fn arrival_fires_once_while_resting_at_end() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 240.0);
    state.drag_end(0.0);

    let mut commits = 0;
    for _ in 0..300 {
        if let Some(event) = state.advance(FRAME) {
            if event.commit {
                commits += 1;
            }
        }
    }
    state.animate_to(Anchor::End);
    for _ in 0..10 {
        assert_eq!(state.advance(FRAME), None);
    }

    assert_eq!(commits, 1);
}

#[test]
fn reset_from_end_animates_back_to_start() {
    let mut state = standard_state(Anchor::End);
    state.animate_to(Anchor::Start);
    assert_eq!(
        state.phase(),
        DragPhase::Animating {
            from: Anchor::End,
            to: Anchor::Start
        }
    );

    let mut fractions = vec![state.swipe_fraction()];
    let mut events = Vec::new();
    while !state.is_at_rest() {
        if let Some(event) = state.advance(FRAME) {
            events.push(event);
        }
        fractions.push(state.swipe_fraction());
        let progress = state.progress();
        if !progress.is_at_rest() {
            assert_eq!(progress.from, Anchor::End);
            let expected = state.offset() / 240.0;
            assert!((state.swipe_fraction() - expected).abs() < 1e-5);
        }
    }

    assert_eq!(fractions.first(), Some(&1.0));
    assert_eq!(fractions.last(), Some(&0.0));
    assert!(fractions.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].anchor, Anchor::Start);
    assert!(!events[0].commit);
}

#[test]
fn disabled_gestures_ignore_drag() {
    let mut state = standard_state(Anchor::Start);
    state.set_gestures_enabled(false);

    assert!(!state.drag_start());
    assert_eq!(state.drag_by(100.0), 0.0);
    assert_eq!(state.drag_end(1000.0), None);
    assert_eq!(state.phase(), DragPhase::AtAnchor(Anchor::Start));
    assert_eq!(state.offset(), 0.0);
}

#[test]
fn malformed_gesture_sequences_are_ignored() {
    let mut state = standard_state(Anchor::Start);
    let version = state.version();

    assert_eq!(state.drag_by(50.0), 0.0);
    assert_eq!(state.drag_end(500.0), None);
    state.dispatch(DragEvent::End(0.0));

    assert_eq!(state.version(), version);
    assert_eq!(state.offset(), 0.0);

    assert!(state.drag_start());
    assert!(!state.drag_start());
    state.drag_by(f32::NAN);
    assert_eq!(state.offset(), 0.0);
}

#[test]
fn drag_start_interrupts_animation_without_jumping() {
    let mut state = standard_state(Anchor::Start);
    state.animate_to(Anchor::End);
    for _ in 0..3 {
        state.advance(FRAME);
    }
    let mid_flight = state.offset();
    assert!(mid_flight > 0.0 && mid_flight < 240.0);

    assert!(state.drag_start());
    assert_eq!(state.offset(), mid_flight);
    assert_eq!(state.phase(), DragPhase::Dragging { origin: Anchor::Start });
    assert_eq!(state.advance(FRAME), None);
    assert_eq!(state.offset(), mid_flight);

    state.drag_by(-mid_flight);
    state.drag_end(0.0);
    let (events, _) = run_until_rest(&mut state);
    assert_eq!(events.len(), 1);
    assert_eq!(state.current_value(), Anchor::Start);
}

#[test]
fn animate_to_interrupts_drag() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 80.0);

    state.animate_to(Anchor::End);

    assert_eq!(
        state.phase(),
        DragPhase::Animating {
            from: Anchor::Start,
            to: Anchor::End
        }
    );
    assert_eq!(state.offset(), 80.0);
    assert_eq!(state.drag_by(10.0), 0.0);
    let (events, _) = run_until_rest(&mut state);
    assert_eq!(events[0].cause, SettleCause::Programmatic);
}

#[test]
fn animate_to_reverses_running_animation() {
    let mut state = standard_state(Anchor::Start);
    state.animate_to(Anchor::End);
    state.advance(FRAME);
    state.advance(FRAME);

    state.animate_to(Anchor::Start);

    assert_eq!(
        state.phase(),
        DragPhase::Animating {
            from: Anchor::Start,
            to: Anchor::Start
        }
    );
    let progress = state.progress();
    assert_eq!((progress.from, progress.to), (Anchor::Start, Anchor::End));
    let (events, _) = run_until_rest(&mut state);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].anchor, Anchor::Start);
    assert_eq!(state.offset(), 0.0);
}

#[test]
fn disabling_gestures_mid_drag_settles() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 200.0);

    state.set_gestures_enabled(false);

    assert!(state.is_animating());
    assert_eq!(state.target_value(), Anchor::End);
}

#[test]
fn resize_at_rest_snaps_to_new_anchor_position() {
    let mut state = standard_state(Anchor::End);
    state.update_anchors(compute_anchors(400.0, 40.0, 10.0));
    assert_eq!(state.offset(), 340.0);
    assert_eq!(state.swipe_fraction(), 1.0);
}

#[test]
fn resize_while_animating_retargets() {
    let mut state = standard_state(Anchor::Start);
    state.animate_to(Anchor::End);
    state.advance(FRAME);

    state.update_anchors(compute_anchors(200.0, 40.0, 10.0));

    assert!(state.offset() <= 140.0);
    run_until_rest(&mut state);
    assert_eq!(state.offset(), 140.0);
    assert_eq!(state.current_value(), Anchor::End);
}

#[test]
fn resize_while_dragging_clamps() {
    let mut state = standard_state(Anchor::Start);
    drag_to(&mut state, 200.0);
    state.update_anchors(compute_anchors(200.0, 40.0, 10.0));
    assert_eq!(state.offset(), 140.0);
    assert!(state.is_dragging());
}

#[test]
fn degenerate_track_is_inert_but_settles_requests() {
    let mut state = AnchoredDraggableState::with_anchors(
        Anchor::Start,
        compute_anchors(50.0, 40.0, 10.0),
        AnchoredDraggableConfig::default(),
    )
    .expect("valid config");

    assert!(!state.drag_start());
    assert_eq!(state.offset(), 0.0);

    state.animate_to(Anchor::End);
    let event = state.advance(FRAME).expect("settles on the first tick");
    assert_eq!(event.anchor, Anchor::End);
    assert_eq!(state.offset(), 0.0);
    assert_eq!(state.swipe_fraction(), 1.0);
}

#[test]
fn reverse_direction_flips_input() {
    let config = AnchoredDraggableConfig::default().with_reverse_direction(true);
    let mut state = standard_state_with(Anchor::Start, config);
    state.drag_start();
    assert_eq!(state.drag_by(-100.0), 100.0);
    assert_eq!(state.drag_end(-1_000.0), Some(Anchor::End));
}

#[test]
fn snap_to_jumps_without_settle_event() {
    let mut state = standard_state(Anchor::Start);
    state.snap_to(Anchor::End);
    assert_eq!(state.phase(), DragPhase::AtAnchor(Anchor::End));
    assert_eq!(state.offset(), 240.0);
    assert_eq!(state.advance(FRAME), None);
}

#[test]
fn tween_settle_reaches_target() {
    use slidelock_animation::{AnimationSpec, AnimationType};

    let config = AnchoredDraggableConfig::default()
        .with_animation(AnimationType::Tween(AnimationSpec::linear(100)));
    let mut state = standard_state_with(Anchor::Start, config);
    drag_to(&mut state, 180.0);
    state.drag_end(0.0);
    let (events, _) = run_until_rest(&mut state);
    assert_eq!(events.len(), 1);
    assert_eq!(state.offset(), 240.0);
}
