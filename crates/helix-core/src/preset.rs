//! Scene configuration and the two built-in visual presets.

use crate::animation::AnimationParams;
use crate::constants::{CYAN, MAX_HELIX_POINTS, MAX_POINT_LIGHTS};
use crate::controls::OrbitParams;
use crate::error::{
    ensure_finite, ensure_non_negative, ensure_positive, ConfigError, ConfigResult,
};
use crate::helix::HelixParams;
use crate::particles::{ParticleFieldParams, SparkleParams};
use crate::scene::{CameraParams, EnvironmentPreset, LightingRig, StrandStyle};
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualPreset {
    /// Denser, brighter look used on the landing page.
    #[default]
    Showcase,
    Classic,
}

impl VisualPreset {
    pub const ALL: [VisualPreset; 2] = [VisualPreset::Showcase, VisualPreset::Classic];

    pub fn name(self) -> &'static str {
        match self {
            VisualPreset::Showcase => "showcase",
            VisualPreset::Classic => "classic",
        }
    }

    /// Cycle to the other preset.
    pub fn next(self) -> Self {
        match self {
            VisualPreset::Showcase => VisualPreset::Classic,
            VisualPreset::Classic => VisualPreset::Showcase,
        }
    }
}

impl fmt::Display for VisualPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        VisualPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownPreset(trimmed.to_string()))
    }
}

/// Everything needed to mount a viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct HelixSceneConfig {
    pub preset: VisualPreset,
    pub helix: HelixParams,
    pub strand: StrandStyle,
    pub particles: ParticleFieldParams,
    pub sparkles: SparkleParams,
    pub animation: AnimationParams,
    pub camera: CameraParams,
    pub lighting: LightingRig,
    pub environment: EnvironmentPreset,
    pub controls: OrbitParams,
    /// Field seed; drawn at mount when unset.
    pub seed: Option<u64>,
}

impl Default for HelixSceneConfig {
    fn default() -> Self {
        Self::from_preset(VisualPreset::Showcase)
    }
}

impl HelixSceneConfig {
    pub fn from_preset(preset: VisualPreset) -> Self {
        match preset {
            VisualPreset::Showcase => Self {
                preset,
                helix: HelixParams::default(),
                strand: StrandStyle::default(),
                particles: ParticleFieldParams::default(),
                sparkles: SparkleParams::default(),
                animation: AnimationParams::default(),
                camera: CameraParams::default(),
                lighting: LightingRig::showcase(),
                environment: EnvironmentPreset::Night,
                controls: OrbitParams::default(),
                seed: None,
            },
            VisualPreset::Classic => Self {
                preset,
                helix: HelixParams {
                    turns: 8,
                    points_per_turn: 10,
                    radius: 2.0,
                    height: 12.0,
                },
                strand: StrandStyle {
                    sphere_radius: 0.15,
                    emissive_intensity: 0.8,
                    ..StrandStyle::default()
                },
                particles: ParticleFieldParams {
                    count: 200,
                    spread: 20.0,
                    palette: [CYAN, CYAN],
                    size: 0.1,
                    opacity: 0.6,
                },
                sparkles: SparkleParams {
                    count: 100,
                    scale: 15.0,
                    size: 3.0,
                    speed: 1.0,
                    opacity: 0.3,
                    color: CYAN,
                },
                animation: AnimationParams {
                    helix_yaw_step: 0.002,
                    helix_pitch_amplitude: 0.3,
                    particle_yaw_step: 0.0001,
                    particle_pitch_step: 0.0,
                    jitter_amplitude: 0.01,
                    ..AnimationParams::default()
                },
                camera: CameraParams {
                    position: Vec3::new(0.0, 0.0, 12.0),
                    fov_degrees: 50.0,
                    ..CameraParams::default()
                },
                lighting: LightingRig::classic(),
                environment: EnvironmentPreset::Night,
                controls: OrbitParams {
                    max_distance: 30.0,
                    damping_factor: 0.05,
                    auto_rotate_speed: 2.0,
                    ..OrbitParams::default()
                },
                seed: None,
            },
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values that would produce degenerate geometry, non-finite
    /// motion or a camera that cannot be placed. Zero turns or counts are
    /// allowed and render nothing.
    pub fn validate(&self) -> ConfigResult<()> {
        let points = self.helix.total_points();
        if points > MAX_HELIX_POINTS {
            return Err(ConfigError::TooManyPoints {
                count: points,
                max: MAX_HELIX_POINTS,
            });
        }
        ensure_positive("helix.radius", self.helix.radius)?;
        ensure_positive("helix.height", self.helix.height)?;
        ensure_positive("strand.sphere_radius", self.strand.sphere_radius)?;
        ensure_non_negative("strand.emissive_intensity", self.strand.emissive_intensity)?;
        ensure_positive("particles.spread", self.particles.spread)?;
        ensure_positive("particles.size", self.particles.size)?;
        ensure_non_negative("particles.opacity", self.particles.opacity)?;
        ensure_positive("sparkles.scale", self.sparkles.scale)?;
        ensure_positive("sparkles.size", self.sparkles.size)?;
        ensure_non_negative("sparkles.speed", self.sparkles.speed)?;
        ensure_non_negative("sparkles.opacity", self.sparkles.opacity)?;
        ensure_non_negative(
            "animation.helix_pitch_amplitude",
            self.animation.helix_pitch_amplitude,
        )?;
        ensure_non_negative("animation.jitter_amplitude", self.animation.jitter_amplitude)?;
        ensure_finite("animation.helix_yaw_step", self.animation.helix_yaw_step)?;
        ensure_finite("animation.particle_yaw_step", self.animation.particle_yaw_step)?;
        ensure_finite("animation.particle_pitch_step", self.animation.particle_pitch_step)?;
        ensure_positive("camera.fov_degrees", self.camera.fov_degrees)?;
        ensure_positive("camera.znear", self.camera.znear)?;
        if !(self.camera.zfar.is_finite() && self.camera.zfar > self.camera.znear) {
            return Err(ConfigError::NotPositive {
                field: "camera.zfar",
                value: self.camera.zfar,
            });
        }

        let c = &self.controls;
        let range_ok = c.min_distance.is_finite()
            && c.max_distance.is_finite()
            && c.min_distance > 0.0
            && c.min_distance <= c.max_distance;
        if !range_ok {
            return Err(ConfigError::DistanceRange {
                min: c.min_distance,
                max: c.max_distance,
            });
        }
        if !(c.damping_factor > 0.0 && c.damping_factor <= 1.0) {
            return Err(ConfigError::Damping(c.damping_factor));
        }
        ensure_non_negative("controls.auto_rotate_speed", c.auto_rotate_speed)?;
        ensure_positive("controls.rotate_speed", c.rotate_speed)?;
        ensure_positive("controls.zoom_speed", c.zoom_speed)?;
        ensure_positive("controls.pan_speed", c.pan_speed)?;

        let count = self.lighting.point_lights.len();
        if count > MAX_POINT_LIGHTS {
            return Err(ConfigError::TooManyLights {
                count,
                max: MAX_POINT_LIGHTS,
            });
        }
        Ok(())
    }
}
