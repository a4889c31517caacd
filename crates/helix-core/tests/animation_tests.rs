use glam::Vec3;
use helix_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

fn field(count: usize) -> ParticleField {
    generate_particle_field(count, 25.0, [CYAN, PURPLE], &mut StdRng::seed_from_u64(11))
}

fn driver(params: AnimationParams) -> AnimationDriver {
    AnimationDriver::new(params, field(64))
}

#[test]
fn pitch_repeats_after_one_period_while_yaw_advances() {
    let params = AnimationParams::default();
    let mut d = driver(params.clone());
    assert!(d.tick(0.0));
    let pitch0 = d.state().helix_rotation.pitch;
    let yaw0 = d.state().helix_rotation.yaw;

    let period = std::f64::consts::TAU / 0.3;
    assert!(d.tick(period));
    let pitch1 = d.state().helix_rotation.pitch;
    let yaw1 = d.state().helix_rotation.yaw;

    assert!((pitch0 - pitch1).abs() < 1e-5);
    assert!((yaw1 - yaw0 - params.helix_yaw_step).abs() < 1e-6);
    assert_eq!(d.state().frame, 2);
}

#[test]
fn pitch_is_bounded_by_amplitude() {
    let params = AnimationParams::default();
    let mut d = driver(params.clone());
    for i in 0..500 {
        d.tick(i as f64 * 0.173);
        assert!(d.state().helix_rotation.pitch.abs() <= params.helix_pitch_amplitude + 1e-6);
    }
}

#[test]
fn particle_group_rotates_slowly() {
    let params = AnimationParams::default();
    let mut d = driver(params.clone());
    for i in 0..10 {
        d.tick(i as f64 / 60.0);
    }
    let r = d.state().particle_rotation;
    assert!((r.yaw - 10.0 * params.particle_yaw_step).abs() < 1e-6);
    assert!((r.pitch - 10.0 * params.particle_pitch_step).abs() < 1e-6);
}

#[test]
fn yaw_stays_wrapped() {
    let params = AnimationParams {
        helix_yaw_step: 1.0,
        ..AnimationParams::default()
    };
    let mut d = driver(params);
    for i in 0..100 {
        d.tick(i as f64);
        let yaw = d.state().helix_rotation.yaw;
        assert!((0.0..TAU).contains(&yaw), "yaw {yaw}");
    }
}

#[test]
fn non_finite_elapsed_skips_the_frame() {
    let mut d = driver(AnimationParams::default());
    d.tick(1.0);
    let before = d.state().clone();
    let version = d.snapshot().version;
    let positions: Vec<Vec3> = d.snapshot().positions.to_vec();

    assert!(!d.tick(f64::NAN));
    assert!(!d.tick(f64::INFINITY));
    assert_eq!(d.state(), &before);
    assert_eq!(d.snapshot().version, version);
    assert_eq!(d.snapshot().positions, positions.as_slice());
}

#[test]
fn anchored_jitter_stays_within_amplitude_of_base() {
    let params = AnimationParams::default();
    let amp = params.jitter_amplitude;
    let mut d = driver(params);
    for i in 0..2000 {
        d.tick(i as f64 / 60.0);
    }
    let snap = d.snapshot();
    for (cur, base) in snap.positions.iter().zip(d.particles().base()) {
        assert!((cur.y - base.y).abs() <= amp + 1e-6);
        assert_eq!(cur.x, base.x);
        assert_eq!(cur.z, base.z);
    }
}

#[test]
fn anchored_positions_are_idempotent_for_the_same_time() {
    let mut d = driver(AnimationParams::default());
    d.tick(3.5);
    let a: Vec<Vec3> = d.snapshot().positions.to_vec();
    d.tick(3.5);
    assert_eq!(d.snapshot().positions, a.as_slice());
}

#[test]
fn accumulating_jitter_drifts_away_from_base() {
    let params = AnimationParams {
        jitter_amplitude: 0.01,
        jitter_mode: JitterMode::Accumulating,
        ..AnimationParams::default()
    };
    let mut d = driver(params);
    // particle 0 at elapsed 1.0 is pushed by sin(0.5) each frame
    for _ in 0..100 {
        d.tick(1.0);
    }
    let drift = d.snapshot().positions[0].y - d.particles().base()[0].y;
    let expected = 100.0 * (0.5f64.sin() as f32) * 0.01;
    assert!((drift - expected).abs() < 1e-3, "drift {drift}");
    assert!(drift > 0.01);
}

#[test]
fn jitter_axis_is_configurable() {
    let params = AnimationParams {
        jitter_axis: Axis::X,
        ..AnimationParams::default()
    };
    let mut d = driver(params);
    d.tick(2.0);
    let snap = d.snapshot();
    let moved = snap
        .positions
        .iter()
        .zip(d.particles().base())
        .any(|(c, b)| c.x != b.x);
    assert!(moved);
    assert!(snap
        .positions
        .iter()
        .zip(d.particles().base())
        .all(|(c, b)| c.y == b.y && c.z == b.z));
}

#[test]
fn every_tick_bumps_the_buffer_version_and_colors_never_change() {
    let mut d = driver(AnimationParams::default());
    let colors: Vec<Vec3> = d.snapshot().colors.to_vec();
    let mut last = d.snapshot().version;
    for i in 0..5 {
        d.tick(i as f64);
        let v = d.snapshot().version;
        assert_eq!(v, last + 1);
        last = v;
    }
    assert_eq!(d.snapshot().colors, colors.as_slice());
}

#[test]
fn empty_field_ticks_without_work() {
    let mut d = AnimationDriver::new(AnimationParams::default(), field(0));
    assert!(d.tick(0.5));
    assert!(d.snapshot().positions.is_empty());
}

#[test]
fn rotation_quat_applies_pitch_after_yaw() {
    let r = Rotation {
        yaw: std::f32::consts::FRAC_PI_2,
        pitch: 0.0,
    };
    let v = r.quat() * Vec3::X;
    assert!((v - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
}
