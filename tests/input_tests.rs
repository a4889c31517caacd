// Host-side tests for DOM-to-controller mapping and frame timing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}
mod timing {
    include!("../src/timing.rs");
}

use helix_core::{PanKey, PointerButton, PointerKind};
use input::*;
use timing::FrameClock;

#[test]
fn mouse_buttons_map_to_controller_buttons() {
    assert_eq!(pointer_button(0), Some(PointerButton::Primary));
    assert_eq!(pointer_button(1), Some(PointerButton::Middle));
    assert_eq!(pointer_button(2), Some(PointerButton::Secondary));
    assert_eq!(pointer_button(3), None);
    assert_eq!(pointer_button(-1), None);
}

#[test]
fn pointer_types_map_to_kinds() {
    assert_eq!(pointer_kind("touch"), PointerKind::Touch);
    assert_eq!(pointer_kind("pen"), PointerKind::Pen);
    assert_eq!(pointer_kind("mouse"), PointerKind::Mouse);
    assert_eq!(pointer_kind(""), PointerKind::Mouse);
}

#[test]
fn arrow_keys_pan_and_others_do_not() {
    assert_eq!(pan_key("ArrowUp"), Some(PanKey::Up));
    assert_eq!(pan_key("ArrowDown"), Some(PanKey::Down));
    assert_eq!(pan_key("ArrowLeft"), Some(PanKey::Left));
    assert_eq!(pan_key("ArrowRight"), Some(PanKey::Right));
    assert_eq!(pan_key("a"), None);
    assert_eq!(pan_key("arrowup"), None);
}

#[test]
fn client_position_is_relative_to_canvas() {
    let p = canvas_css_position(130.0, 95.5, 100.0, 20.0);
    assert_eq!(p, glam::Vec2::new(30.0, 75.5));
}

#[test]
fn wheel_delta_scales_by_mode() {
    assert_eq!(wheel_delta_px(-3.0, 0, 16.0, 800.0), -3.0);
    assert_eq!(wheel_delta_px(-3.0, 1, 16.0, 800.0), -48.0);
    assert_eq!(wheel_delta_px(1.0, 2, 16.0, 800.0), 800.0);
}

#[test]
fn modifiers_report_any() {
    assert!(!modifiers(false, false, false).any());
    assert!(modifiers(false, true, false).any());
}

#[test]
fn seeds_accept_only_safe_non_negative_integers() {
    assert_eq!(seed_from_js(None), None);
    assert_eq!(seed_from_js(Some(42.0)), Some(42));
    assert_eq!(seed_from_js(Some(0.0)), Some(0));
    assert_eq!(seed_from_js(Some(-1.0)), None);
    assert_eq!(seed_from_js(Some(1.5)), None);
    assert_eq!(seed_from_js(Some(f64::NAN)), None);
    assert_eq!(seed_from_js(Some(f64::INFINITY)), None);
    assert_eq!(seed_from_js(Some(1e17)), None);
}

#[test]
fn frame_clock_starts_at_zero_and_counts_seconds() {
    let mut clock = FrameClock::new();
    assert!(!clock.started());
    assert_eq!(clock.elapsed(5_000.0, 1000.0), 0.0);
    assert!(clock.started());
    assert!((clock.elapsed(5_016.0, 1000.0) - 0.016).abs() < 1e-12);
    assert!((clock.elapsed(6_000.0, 1000.0) - 1.0).abs() < 1e-12);
}

#[test]
fn frame_clock_never_runs_backwards() {
    let mut clock = FrameClock::new();
    clock.elapsed(1_000.0, 1000.0);
    clock.elapsed(2_000.0, 1000.0);
    assert_eq!(clock.elapsed(1_500.0, 1000.0), 1.0);
}

#[test]
fn frame_clock_passes_bad_timestamps_through_as_nan() {
    let mut clock = FrameClock::new();
    assert!(clock.elapsed(f64::NAN, 1000.0).is_nan());
    assert!(!clock.started());
    assert_eq!(clock.elapsed(10.0, 1000.0), 0.0);
}
