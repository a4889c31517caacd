use helix_core::*;

#[test]
fn preset_names_parse_case_insensitively() {
    assert_eq!("showcase".parse::<VisualPreset>(), Ok(VisualPreset::Showcase));
    assert_eq!("Classic".parse::<VisualPreset>(), Ok(VisualPreset::Classic));
    assert_eq!("  CLASSIC ".parse::<VisualPreset>(), Ok(VisualPreset::Classic));
    assert_eq!(
        "neon".parse::<VisualPreset>(),
        Err(ConfigError::UnknownPreset("neon".to_string()))
    );
    assert_eq!(VisualPreset::Showcase.to_string(), "showcase");
    assert_eq!(VisualPreset::Showcase.next(), VisualPreset::Classic);
    assert_eq!(VisualPreset::Classic.next(), VisualPreset::Showcase);
}

#[test]
fn both_presets_validate() {
    for preset in VisualPreset::ALL {
        let config = HelixSceneConfig::from_preset(preset);
        assert_eq!(config.preset, preset);
        assert_eq!(config.validate(), Ok(()));
        assert!(config.seed.is_none());
    }
    assert_eq!(
        HelixSceneConfig::default(),
        HelixSceneConfig::from_preset(VisualPreset::Showcase)
    );
}

#[test]
fn showcase_matches_the_landing_page_look() {
    let c = HelixSceneConfig::from_preset(VisualPreset::Showcase);
    assert_eq!(c.helix, HelixParams::default());
    assert_eq!(c.helix.total_points(), 80);
    assert_eq!(c.particles.count, 150);
    assert_eq!(c.particles.spread, 25.0);
    assert_eq!(c.sparkles.count, 150);
    assert_eq!(c.camera.fov_degrees, 55.0);
    assert_eq!(c.camera.position.z, 14.0);
    assert_eq!(c.lighting.point_lights.len(), 4);
    assert_eq!(c.lighting.ambient.intensity, 0.5);
    assert_eq!(c.controls.auto_rotate_speed, 2.5);
    assert_eq!(c.controls.max_distance, 35.0);
    assert_eq!(c.environment, EnvironmentPreset::Night);
    assert_eq!(c.animation.jitter_mode, JitterMode::Anchored);
}

#[test]
fn classic_uses_its_own_table() {
    let c = HelixSceneConfig::from_preset(VisualPreset::Classic);
    assert_eq!(
        (c.helix.turns, c.helix.points_per_turn, c.helix.radius, c.helix.height),
        (8, 10, 2.0, 12.0)
    );
    assert_eq!(c.strand.sphere_radius, 0.15);
    assert_eq!(c.strand.emissive_intensity, 0.8);
    assert_eq!(c.particles.count, 200);
    assert_eq!(c.particles.palette[0], c.particles.palette[1]);
    assert_eq!(c.particles.size, 0.1);
    assert_eq!(c.particles.opacity, 0.6);
    assert_eq!(c.animation.helix_yaw_step, 0.002);
    assert_eq!(c.animation.jitter_amplitude, 0.01);
    assert_eq!(c.camera.fov_degrees, 50.0);
    assert_eq!(c.camera.position.z, 12.0);
    assert_eq!(c.lighting.point_lights.len(), 3);
    assert_eq!(c.controls.max_distance, 30.0);
    assert_eq!(c.controls.auto_rotate_speed, 2.0);
}

#[test]
fn degenerate_geometry_is_rejected() {
    let mut c = HelixSceneConfig::default();
    c.helix.radius = 0.0;
    assert_eq!(
        c.validate(),
        Err(ConfigError::NotPositive {
            field: "helix.radius",
            value: 0.0
        })
    );

    let mut c = HelixSceneConfig::default();
    c.particles.spread = f32::NAN;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::NotPositive {
            field: "particles.spread",
            ..
        })
    ));

    let mut c = HelixSceneConfig::default();
    c.sparkles.opacity = -0.1;
    assert!(matches!(c.validate(), Err(ConfigError::Negative { .. })));
}

#[test]
fn non_finite_rotation_steps_are_rejected() {
    let mut c = HelixSceneConfig::default();
    c.animation.helix_yaw_step = f32::INFINITY;
    assert_eq!(
        c.validate(),
        Err(ConfigError::NotFinite {
            field: "animation.helix_yaw_step",
            value: f32::INFINITY
        })
    );
    assert!(HelixViewer::mount(c, ViewerProps::default(), Viewport::new(800.0, 600.0, 1.0)).is_err());

    let mut c = HelixSceneConfig::default();
    c.animation.particle_yaw_step = f32::NEG_INFINITY;
    assert!(matches!(c.validate(), Err(ConfigError::NotFinite { .. })));

    let mut c = HelixSceneConfig::default();
    c.animation.particle_pitch_step = f32::NAN;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::NotFinite {
            field: "animation.particle_pitch_step",
            ..
        })
    ));

    // negative steps spin the other way and stay valid
    let mut c = HelixSceneConfig::default();
    c.animation.helix_yaw_step = -0.003;
    assert_eq!(c.validate(), Ok(()));
}

#[test]
fn helix_point_count_is_bounded() {
    let mut c = HelixSceneConfig::default();
    c.helix.turns = u32::MAX;
    c.helix.points_per_turn = 2;
    assert_eq!(
        c.validate(),
        Err(ConfigError::TooManyPoints {
            count: u32::MAX as usize,
            max: MAX_HELIX_POINTS
        })
    );

    c.helix.turns = 1;
    c.helix.points_per_turn = MAX_HELIX_POINTS as u32;
    assert_eq!(c.validate(), Ok(()));
}

#[test]
fn zero_turns_is_a_valid_empty_scene() {
    let mut c = HelixSceneConfig::default();
    c.helix.turns = 0;
    c.particles.count = 0;
    assert_eq!(c.validate(), Ok(()));
}

#[test]
fn camera_limits_are_checked() {
    let mut c = HelixSceneConfig::default();
    c.controls.min_distance = 40.0;
    assert_eq!(
        c.validate(),
        Err(ConfigError::DistanceRange {
            min: 40.0,
            max: 35.0
        })
    );

    let mut c = HelixSceneConfig::default();
    c.controls.min_distance = 0.0;
    assert!(matches!(c.validate(), Err(ConfigError::DistanceRange { .. })));

    for bad in [0.0, -0.5, 1.5, f32::NAN] {
        let mut c = HelixSceneConfig::default();
        c.controls.damping_factor = bad;
        assert!(matches!(c.validate(), Err(ConfigError::Damping(_))));
    }

    let mut c = HelixSceneConfig::default();
    c.camera.zfar = c.camera.znear;
    assert!(c.validate().is_err());
}

#[test]
fn light_count_is_bounded_by_the_shader() {
    let mut c = HelixSceneConfig::default();
    let extra = c.lighting.point_lights[0];
    c.lighting.point_lights.push(extra);
    assert_eq!(
        c.validate(),
        Err(ConfigError::TooManyLights {
            count: 5,
            max: MAX_POINT_LIGHTS
        })
    );
}

#[test]
fn errors_render_readable_messages() {
    let e = ConfigError::UnknownPreset("neon".into());
    assert!(e.to_string().contains("neon"));
    let e = ConfigError::Damping(2.0);
    assert!(e.to_string().contains("2"));
}
