use super::*;
use crate::config::{ALMOST_BLACK, YELLOW};
use slidelock_ui_graphics::Color;

fn mapper() -> PresentationMapper {
    PresentationMapper::new(SlidePalette::default(), 0.4, 0.35)
}

#[test]
fn track_starts_on_base_color() {
    assert_eq!(mapper().track_color(0.0), ALMOST_BLACK);
}

#[test]
fn track_reaches_accent_at_cutoff_and_stays() {
    let mapper = mapper();
    for fraction in [0.4, 0.5, 0.83, 1.0, 7.0] {
        assert_eq!(mapper.track_color(fraction), YELLOW, "fraction {fraction}");
    }
}

#[test]
fn track_color_moves_monotonically_toward_accent() {
    let mapper = mapper();
    let mut previous = mapper.track_color(0.0);
    for step in 1..=40 {
        let color = mapper.track_color(step as f32 / 100.0);
        assert!(color.r() >= previous.r());
        assert!(color.g() >= previous.g());
        assert!(color.b() <= previous.b());
        previous = color;
    }
}

#[test]
fn track_color_halfway_to_cutoff_is_midpoint() {
    let color = mapper().track_color(0.2);
    let expected_green = (ALMOST_BLACK.g() + YELLOW.g()) / 2.0;
    assert!((color.g() - expected_green).abs() < 1e-5);
}

#[test]
fn out_of_range_fractions_are_clamped() {
    let mapper = mapper();
    assert_eq!(mapper.track_color(-3.0), ALMOST_BLACK);
    assert_eq!(mapper.track_color(f32::NAN), ALMOST_BLACK);
    assert_eq!(mapper.hint_text_alpha(-1.0), 1.0);
    assert_eq!(mapper.hint_text_alpha(f32::NAN), 1.0);
    assert_eq!(mapper.hint_text_alpha(f32::INFINITY), 0.0);
}

#[test]
fn hint_fades_out_by_cutoff() {
    let mapper = mapper();
    assert_eq!(mapper.hint_text_alpha(0.0), 1.0);
    assert!((mapper.hint_text_alpha(0.175) - 0.5).abs() < 1e-5);
    for fraction in [0.35, 0.6, 1.0] {
        assert_eq!(mapper.hint_text_alpha(fraction), 0.0);
    }
}

#[test]
fn hint_color_keeps_rgb_and_fades_alpha() {
    let mapper = mapper();
    assert_eq!(mapper.hint_text_color(0.0), Color::WHITE);
    let faded = mapper.hint_text_color(1.0);
    assert_eq!(faded.a(), 0.0);
    assert_eq!((faded.r(), faded.g(), faded.b()), (1.0, 1.0, 1.0));
}

#[test]
fn thumb_icon_follows_loading() {
    assert_eq!(ThumbIcon::for_loading(false), ThumbIcon::Arrow);
    assert_eq!(ThumbIcon::for_loading(true), ThumbIcon::ProgressIndicator);
}
