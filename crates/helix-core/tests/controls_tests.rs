use glam::{Vec2, Vec3};
use helix_core::*;
use std::f32::consts::{PI, TAU};

fn controls_with(params: OrbitParams) -> OrbitControls {
    let camera = CameraParams::default().camera(800.0 / 600.0);
    let mut c = OrbitControls::new(camera, params);
    c.set_viewport(800.0, 600.0);
    c
}

fn undamped() -> OrbitParams {
    OrbitParams {
        enable_damping: false,
        ..OrbitParams::default()
    }
}

fn mouse(id: i32, x: f32, y: f32, button: PointerButton) -> PointerInput {
    PointerInput {
        id,
        position: Vec2::new(x, y),
        button,
        kind: PointerKind::Mouse,
        modifiers: Modifiers::default(),
    }
}

fn touch(id: i32, x: f32, y: f32) -> PointerInput {
    PointerInput {
        id,
        position: Vec2::new(x, y),
        button: PointerButton::Primary,
        kind: PointerKind::Touch,
        modifiers: Modifiers::default(),
    }
}

#[test]
fn starts_at_the_scene_camera() {
    let c = controls_with(OrbitParams::default());
    assert!((c.distance() - 14.0).abs() < 1e-4);
    assert!((c.camera().eye - Vec3::new(0.0, 0.0, 14.0)).length() < 1e-4);
    assert!((c.polar() - PI / 2.0).abs() < 1e-5);
    assert!(!c.is_interacting());
}

#[test]
fn wheel_distance_stays_clamped_for_any_magnitude() {
    let mut c = controls_with(OrbitParams::default());
    for delta in [-1.0e9_f32, -3.0, -120.0, -f32::MAX] {
        for _ in 0..100 {
            c.wheel(delta);
            c.update();
            assert!(c.distance() >= 5.0 - 1e-4 && c.distance() <= 35.0 + 1e-4);
        }
    }
    assert!((c.distance() - 5.0).abs() < 1e-4);

    for delta in [1.0e9_f32, 1.0, f32::MAX] {
        for _ in 0..100 {
            c.wheel(delta);
            c.update();
            assert!(c.distance() >= 5.0 - 1e-4 && c.distance() <= 35.0 + 1e-4);
        }
    }
    assert!((c.distance() - 35.0).abs() < 1e-3);
}

#[test]
fn wheel_step_uses_zoom_base() {
    let mut c = controls_with(OrbitParams::default());
    assert!(c.wheel(-1.0));
    c.update();
    assert!((c.distance() - 14.0 * 0.95).abs() < 1e-4);
    c.wheel(1.0);
    c.update();
    assert!((c.distance() - 14.0).abs() < 1e-4);
}

#[test]
fn nan_wheel_is_ignored() {
    let mut c = controls_with(OrbitParams::default());
    assert!(!c.wheel(f32::NAN));
    assert!(!c.wheel(0.0));
    c.update();
    assert!((c.distance() - 14.0).abs() < 1e-4);
}

#[test]
fn damping_decays_motion_after_input_stops() {
    let mut c = controls_with(OrbitParams::default());
    c.rotate_left(-0.5);
    let mut previous = c.azimuth();
    let mut steps = Vec::new();
    for _ in 0..500 {
        c.update();
        steps.push(c.azimuth() - previous);
        previous = c.azimuth();
    }
    assert!((steps[0] - 0.5 * 0.08).abs() < 1e-5);
    assert!(steps.windows(2).take(50).all(|w| w[1] < w[0]));
    assert!((c.azimuth() - 0.5).abs() < 1e-3);
    assert!(!c.update());
}

#[test]
fn idle_controls_do_not_move_without_auto_rotate() {
    let mut c = controls_with(OrbitParams::default());
    let eye = c.camera().eye;
    for _ in 0..10 {
        assert!(!c.update());
    }
    assert_eq!(c.camera().eye, eye);
}

#[test]
fn auto_rotate_orbits_at_constant_radius() {
    let mut c = controls_with(undamped());
    c.set_auto_rotate(true);
    assert!(c.update());
    let step = TAU / 3600.0 * 2.5;
    assert!((c.azimuth() - (TAU - step)).abs() < 1e-4);
    assert!((c.distance() - 14.0).abs() < 1e-4);
    c.set_auto_rotate(false);
    assert!(!c.update());
}

#[test]
fn auto_rotate_composes_with_a_drag() {
    let mut c = controls_with(undamped());
    c.set_auto_rotate(true);
    c.rotate_left(-0.3);
    c.update();
    let step = TAU / 3600.0 * 2.5;
    assert!((c.azimuth() - (0.3 - step)).abs() < 1e-4);
}

#[test]
fn polar_angle_is_clamped_off_the_poles() {
    let mut c = controls_with(undamped());
    c.rotate_up(-10.0);
    c.update();
    assert!(c.polar() < PI);
    assert!(c.polar() > PI - 1e-3);
    assert!(c.camera().eye.is_finite());

    c.rotate_up(20.0);
    c.update();
    assert!(c.polar() > 0.0);
    assert!(c.polar() < 1e-3);
    assert!(c.camera().eye.is_finite());
}

#[test]
fn primary_drag_orbits_by_viewport_height() {
    let mut c = controls_with(undamped());
    c.pointer_down(mouse(1, 100.0, 100.0, PointerButton::Primary));
    assert!(c.is_interacting());
    c.pointer_move(1, Vec2::new(160.0, 100.0));
    c.update();
    // 60px of a 600px-tall viewport is a tenth of a turn
    assert!((c.azimuth() - (TAU - TAU * 0.1)).abs() < 1e-4);
    assert!((c.distance() - 14.0).abs() < 1e-4);
    c.pointer_up(1);
    assert!(!c.is_interacting());
}

#[test]
fn moves_from_unknown_pointers_are_ignored() {
    let mut c = controls_with(undamped());
    c.pointer_move(9, Vec2::new(500.0, 500.0));
    assert!(!c.update());
}

#[test]
fn secondary_drag_pans_the_target() {
    let mut c = controls_with(undamped());
    c.pointer_down(mouse(1, 400.0, 300.0, PointerButton::Secondary));
    c.pointer_move(1, Vec2::new(450.0, 300.0));
    c.update();
    assert!(c.target().x < 0.0);
    assert!(c.target().y.abs() < 1e-5);
    assert!((c.distance() - 14.0).abs() < 1e-4);
    assert!((c.camera().eye.x - c.target().x).abs() < 1e-4);
}

#[test]
fn modified_primary_drag_pans_instead_of_rotating() {
    let mut c = controls_with(undamped());
    let mut input = mouse(1, 400.0, 300.0, PointerButton::Primary);
    input.modifiers.ctrl = true;
    c.pointer_down(input);
    c.pointer_move(1, Vec2::new(400.0, 250.0));
    c.update();
    assert!(c.target().y < 0.0);
    assert!(c.azimuth().abs() < 1e-6);
}

#[test]
fn middle_drag_dollies() {
    let mut c = controls_with(undamped());
    c.pointer_down(mouse(1, 400.0, 300.0, PointerButton::Middle));
    c.pointer_move(1, Vec2::new(400.0, 320.0));
    c.update();
    assert!(c.distance() < 14.0);
}

#[test]
fn pinch_spread_dollies_in_and_pans_by_midpoint() {
    let mut c = controls_with(undamped());
    c.pointer_down(touch(1, 100.0, 300.0));
    c.pointer_down(touch(2, 200.0, 300.0));
    c.pointer_move(2, Vec2::new(300.0, 300.0));
    c.update();
    assert!((c.distance() - 7.0).abs() < 1e-3);
    assert!(c.target().x < 0.0);
}

#[test]
fn lifting_one_finger_returns_to_single_touch_orbit() {
    let mut c = controls_with(undamped());
    c.pointer_down(touch(1, 100.0, 300.0));
    c.pointer_down(touch(2, 200.0, 300.0));
    c.pointer_up(2);
    assert!(c.is_interacting());
    c.pointer_move(1, Vec2::new(160.0, 300.0));
    c.update();
    assert!((c.azimuth() - (TAU - TAU * 0.1)).abs() < 1e-4);
    c.pointer_up(1);
    assert!(!c.is_interacting());
}

#[test]
fn arrow_keys_pan_by_a_fixed_step() {
    let mut c = controls_with(undamped());
    c.pan_key(PanKey::Left);
    c.update();
    let x = c.target().x;
    assert!(x < 0.0);
    c.pan_key(PanKey::Right);
    c.update();
    assert!(c.target().x.abs() < 1e-5);
    c.pan_key(PanKey::Up);
    c.update();
    assert!(c.target().y > 0.0);
}

#[test]
fn disabled_pan_ignores_keys_and_secondary_drag() {
    let mut c = controls_with(OrbitParams {
        enable_pan: false,
        ..undamped()
    });
    assert!(!c.pan_key(PanKey::Down));
    assert!(!c.pointer_down(mouse(1, 0.0, 0.0, PointerButton::Secondary)));
    c.pointer_move(1, Vec2::new(40.0, 40.0));
    assert!(!c.update());
    assert_eq!(c.target(), Vec3::ZERO);
}

#[test]
fn reset_restores_the_mount_camera() {
    let mut c = controls_with(OrbitParams::default());
    c.rotate_left(1.0);
    c.rotate_up(0.4);
    c.wheel(-1.0);
    c.pan_pixels(30.0, 12.0);
    for _ in 0..20 {
        c.update();
    }
    c.reset();
    assert!((c.camera().eye - Vec3::new(0.0, 0.0, 14.0)).length() < 1e-4);
    assert_eq!(c.target(), Vec3::ZERO);
    // pending momentum is discarded as well
    assert!(!c.update());
}
