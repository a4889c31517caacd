use glam::Vec3;
use helix_core::*;

fn mount(config: HelixSceneConfig, playing: bool) -> HelixViewer {
    HelixViewer::mount(
        config,
        ViewerProps {
            is_playing: playing,
            is_muted: false,
        },
        Viewport::new(800.0, 600.0, 1.0),
    )
    .unwrap()
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(Viewport::new(800.0, 600.0, 3.0).pixel_ratio(), 2.0);
    assert_eq!(Viewport::new(800.0, 600.0, 1.5).pixel_ratio(), 1.5);
    assert_eq!(Viewport::new(800.0, 600.0, f64::NAN).pixel_ratio(), 1.0);
    assert_eq!(Viewport::new(800.0, 600.0, 0.0).pixel_ratio(), 1.0);
    assert_eq!(Viewport::new(800.0, 600.0, 3.0).backing_size(), (1600, 1200));
    assert_eq!(Viewport::new(0.0, 0.0, 2.0).backing_size(), (1, 1));
}

#[test]
fn invalid_config_fails_to_mount() {
    let mut config = HelixSceneConfig::default();
    config.controls.damping_factor = 0.0;
    let result = HelixViewer::mount(config, ViewerProps::default(), Viewport::default());
    assert!(matches!(result, Err(ConfigError::Damping(_))));
}

#[test]
fn fixed_seed_reproduces_particles_and_sparkles() {
    let config = HelixSceneConfig::default().with_seed(1234);
    let a = mount(config.clone(), true);
    let b = mount(config, true);
    assert_eq!(a.seed(), 1234);
    assert_eq!(a.driver().snapshot().positions, b.driver().snapshot().positions);
    assert_eq!(a.driver().snapshot().colors, b.driver().snapshot().colors);
    assert_eq!(a.scene().sparkles, b.scene().sparkles);
}

#[test]
fn scene_is_composed_from_the_preset() {
    let v = mount(HelixSceneConfig::default().with_seed(1), true);
    let scene = v.scene();
    assert_eq!(scene.camera.eye, Vec3::new(0.0, 0.0, 14.0));
    assert_eq!(scene.camera.target, Vec3::ZERO);
    assert!((scene.camera.fovy_radians - 55f32.to_radians()).abs() < 1e-6);
    assert_eq!(scene.helix.len(), 80);
    assert_eq!(scene.environment.preset, EnvironmentPreset::Night);
    assert_eq!(scene.environment.clear_color()[3], 1.0);
    for light in &scene.lighting.point_lights {
        assert_eq!(light.decay, 2.0);
    }
}

#[test]
fn frame_geometry_counts_follow_the_scene() {
    let mut v = mount(HelixSceneConfig::default().with_seed(2), true);
    let g = v.frame(0.016);
    assert_eq!(g.spheres.len(), 160);
    assert_eq!(g.lines.len(), 160);
    assert_eq!(g.glows.len(), 150 + 150);
}

#[test]
fn empty_helix_still_draws_particles() {
    let mut config = HelixSceneConfig::default().with_seed(3);
    config.helix.turns = 0;
    let mut v = mount(config, true);
    let g = v.frame(1.0);
    assert!(g.spheres.is_empty());
    assert!(g.lines.is_empty());
    assert_eq!(g.glows.len(), 300);
}

#[test]
fn particles_follow_the_nested_group_rotation() {
    let mut v = mount(HelixSceneConfig::default().with_seed(4), true);
    for i in 0..30 {
        v.frame(i as f64 / 60.0);
    }
    let state = v.driver().state().clone();
    let q = state.helix_rotation.quat() * state.particle_rotation.quat();
    let expected = q * v.driver().snapshot().positions[0];
    let got = Vec3::from(v.geometry().glows[0].center);
    assert!((expected - got).length() < 1e-4);
}

#[test]
fn non_finite_frame_time_leaves_the_frame_untouched() {
    let mut v = mount(HelixSceneConfig::default().with_seed(5), true);
    v.frame(0.5);
    let frame = v.driver().state().frame;
    let first = v.geometry().spheres[0];
    v.frame(f64::NAN);
    assert_eq!(v.driver().state().frame, frame);
    assert_eq!(v.geometry().spheres[0], first);
}

#[test]
fn auto_rotate_follows_is_playing() {
    let mut v = mount(HelixSceneConfig::default().with_seed(6), false);
    let eye = v.controls().camera().eye;
    for i in 0..20 {
        v.frame(i as f64 / 60.0);
    }
    assert_eq!(v.controls().camera().eye, eye);

    v.set_props(ViewerProps {
        is_playing: true,
        is_muted: true,
    });
    for i in 20..40 {
        v.frame(i as f64 / 60.0);
    }
    assert_ne!(v.controls().camera().eye, eye);
    assert!(v.props().is_muted);
}

#[test]
fn reset_camera_returns_to_mount_position() {
    let mut v = mount(HelixSceneConfig::default().with_seed(7), true);
    v.controls_mut().wheel(-1.0);
    for i in 0..100 {
        v.frame(i as f64 / 60.0);
    }
    v.reset_camera();
    assert!((v.controls().camera().eye - Vec3::new(0.0, 0.0, 14.0)).length() < 1e-3);
}

#[test]
fn uniforms_pack_lights_and_camera() {
    let mut v = mount(HelixSceneConfig::default().with_seed(8), true);
    v.frame(0.0);
    let u = v.uniforms();
    assert_eq!(u.ambient[3], 4.0);
    let eye = v.controls().camera().eye;
    assert_eq!(u.camera_pos, [eye.x, eye.y, eye.z, 1.0]);
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);

    let classic = mount(HelixSceneConfig::from_preset(VisualPreset::Classic).with_seed(8), true);
    let u = classic.uniforms();
    assert_eq!(u.ambient[3], 3.0);
    assert_eq!(u.lights[3], PackedLight::default());
}

#[test]
fn resize_updates_the_camera_aspect() {
    let mut v = mount(HelixSceneConfig::default().with_seed(9), true);
    v.resize(Viewport::new(1000.0, 500.0, 2.0));
    assert!((v.controls().camera().aspect - 2.0).abs() < 1e-6);
    assert_eq!(v.viewport().backing_size(), (2000, 1000));
    let b = v.backdrop_uniforms();
    assert!((b.ground[3] - 2.0).abs() < 1e-6);
}
