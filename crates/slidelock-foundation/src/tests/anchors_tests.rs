use super::*;

#[test]
fn anchors_for_standard_track() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(anchors.position_of(Anchor::Start), 0.0);
    assert_eq!(anchors.position_of(Anchor::End), 240.0);
    assert!(!anchors.is_degenerate());
}

#[test]
fn end_anchor_is_never_negative() {
    for width in [0.0, 10.0, 59.0, 60.0, 61.0, 1000.0] {
        let anchors = compute_anchors(width, 40.0, 10.0);
        let expected = (width - 60.0f32).max(0.0);
        assert_eq!(anchors.position_of(Anchor::End), expected, "width {width}");
        assert!(anchors.position_of(Anchor::End) >= anchors.position_of(Anchor::Start));
    }
}

#[test]
fn narrow_track_collapses_to_a_single_anchor() {
    let anchors = compute_anchors(30.0, 40.0, 10.0);
    assert!(anchors.is_degenerate());
    assert_eq!(anchors.position_of(Anchor::End), 0.0);
    assert_eq!(anchors.clamp(25.0), 0.0);
}

#[test]
fn non_finite_width_collapses() {
    let anchors = compute_anchors(f32::NAN, 40.0, 10.0);
    assert!(anchors.is_degenerate());
    assert_eq!(anchors.clamp(f32::NAN), 0.0);
}

#[test]
fn slow_release_past_threshold_commits() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 200.0, 0.0, 0.5, 100.0),
        Anchor::End
    );
}

#[test]
fn slow_release_short_of_threshold_returns() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 50.0, 0.0, 0.5, 100.0),
        Anchor::Start
    );
}

#[test]
fn fast_release_commits_in_direction_of_motion() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 50.0, 400.0, 0.5, 300.0),
        Anchor::End
    );
    assert_eq!(
        anchors.resolve_target(Anchor::End, 200.0, -400.0, 0.5, 300.0),
        Anchor::Start
    );
    // Fast flick back toward the origin from far along.
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 230.0, -400.0, 0.5, 300.0),
        Anchor::Start
    );
}

#[test]
fn velocity_below_threshold_falls_back_to_position() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 200.0, -50.0, 0.5, 300.0),
        Anchor::End
    );
}

#[test]
fn exact_threshold_commits_forward() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 120.0, 0.0, 0.5, 100.0),
        Anchor::End
    );
    assert_eq!(
        anchors.resolve_target(Anchor::End, 120.0, 0.0, 0.5, 100.0),
        Anchor::Start
    );
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 50.0, 100.0, 0.5, 100.0),
        Anchor::End
    );
}

#[test]
fn higher_threshold_needs_more_travel() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 180.0, 0.0, 0.8, 100.0),
        Anchor::Start
    );
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 200.0, 0.0, 0.8, 100.0),
        Anchor::End
    );
}

#[test]
fn release_on_origin_stays() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::End, 240.0, 0.0, 0.5, 100.0),
        Anchor::End
    );
}

#[test]
fn zero_velocity_threshold_still_needs_motion() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 10.0, 0.0, 0.5, 0.0),
        Anchor::Start
    );
    assert_eq!(
        anchors.resolve_target(Anchor::Start, 10.0, 1.0, 0.5, 0.0),
        Anchor::End
    );
}

#[test]
fn closest_anchor_prefers_end_on_tie() {
    let anchors = compute_anchors(300.0, 40.0, 10.0);
    assert_eq!(anchors.closest_anchor(119.0), Anchor::Start);
    assert_eq!(anchors.closest_anchor(120.0), Anchor::End);
}

#[test]
fn config_validation_rejects_bad_values() {
    let config = AnchoredDraggableConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(
        config.with_positional_threshold(0.0).validate(),
        Err(ConfigError::PositionalThreshold(0.0))
    );
    assert_eq!(
        config.with_positional_threshold(1.5).validate(),
        Err(ConfigError::PositionalThreshold(1.5))
    );
    assert!(config.with_positional_threshold(1.0).validate().is_ok());
    assert_eq!(
        config.with_velocity_threshold(-1.0).validate(),
        Err(ConfigError::VelocityThreshold(-1.0))
    );
    assert!(config.with_velocity_threshold(0.0).validate().is_ok());
    assert!(matches!(
        config
            .with_spring(slidelock_animation::SpringSpec::default().with_stiffness(0.0))
            .validate(),
        Err(ConfigError::SpringStiffness(_))
    ));
    assert_eq!(
        config
            .with_spring(slidelock_animation::SpringSpec::default().with_thresholds(0.0, 1.0))
            .validate(),
        Err(ConfigError::SpringThreshold(0.0))
    );
    assert_eq!(
        config
            .with_spring(slidelock_animation::SpringSpec::default().with_thresholds(0.5, -1.0))
            .validate(),
        Err(ConfigError::SpringThreshold(-1.0))
    );
    assert!(matches!(
        config
            .with_spring(
                slidelock_animation::SpringSpec::default().with_thresholds(f32::NAN, 1.0)
            )
            .validate(),
        Err(ConfigError::SpringThreshold(_))
    ));
}
