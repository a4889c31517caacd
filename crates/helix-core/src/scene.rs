//! Static scene description assembled once at mount.
//!
//! These types intentionally avoid referencing platform-specific APIs and are
//! suitable for use on both native and web targets. Front-ends consume them to
//! build camera matrices and light uniforms.

use crate::constants::{rgb, CYAN, LAVENDER, PURPLE, SLATE};
use crate::helix::{BasePair, DoubleHelix};
use crate::particles::{ParticleFieldParams, SparkleField, SparkleParams};
use crate::preset::HelixSceneConfig;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera basis in world space: (right, up, forward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up, forward)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraParams {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 14.0),
            fov_degrees: 55.0,
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl CameraParams {
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: self.fov_degrees.to_radians(),
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Cutoff distance; 0 disables the cutoff.
    pub distance: f32,
    pub decay: f32,
}

impl PointLight {
    pub const fn new(position: [f32; 3], color: [f32; 3], intensity: f32, distance: f32) -> Self {
        Self {
            position: Vec3::from_array(position),
            color: Vec3::from_array(color),
            intensity,
            distance,
            decay: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightingRig {
    pub point_lights: Vec<PointLight>,
    pub ambient: AmbientLight,
}

impl LightingRig {
    /// Four coloured point lights around the helix plus a dim slate fill.
    pub fn showcase() -> Self {
        Self {
            point_lights: vec![
                PointLight::new([12.0, 8.0, 10.0], CYAN, 2.5, 60.0),
                PointLight::new([-12.0, -8.0, -10.0], PURPLE, 2.0, 60.0),
                PointLight::new([0.0, 15.0, 8.0], CYAN, 1.5, 50.0),
                PointLight::new([0.0, -15.0, -8.0], LAVENDER, 1.2, 50.0),
            ],
            ambient: AmbientLight {
                color: rgb(SLATE),
                intensity: 0.5,
            },
        }
    }

    pub fn classic() -> Self {
        Self {
            point_lights: vec![
                PointLight::new([10.0, 10.0, 10.0], CYAN, 2.0, 50.0),
                PointLight::new([-10.0, -10.0, -10.0], PURPLE, 1.5, 50.0),
                PointLight::new([0.0, 0.0, 15.0], CYAN, 1.0, 50.0),
            ],
            ambient: AmbientLight {
                color: rgb(SLATE),
                intensity: 0.4,
            },
        }
    }
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::showcase()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvironmentPreset {
    #[default]
    Night,
    Dawn,
    Sunset,
    Studio,
}

/// Backdrop gradient and image-based fill approximated by three colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub preset: EnvironmentPreset,
    pub sky: Vec3,
    pub horizon: Vec3,
    pub ground: Vec3,
    /// Strength of the environment fill added to every lit surface.
    pub fill: f32,
    pub star_density: f32,
}

impl Environment {
    pub fn from_preset(preset: EnvironmentPreset) -> Self {
        let (sky, horizon, ground, fill, star_density) = match preset {
            EnvironmentPreset::Night => (
                [0.010, 0.014, 0.035],
                [0.035, 0.045, 0.090],
                [0.006, 0.008, 0.018],
                0.12,
                1.0,
            ),
            EnvironmentPreset::Dawn => (
                [0.180, 0.220, 0.380],
                [0.620, 0.420, 0.380],
                [0.080, 0.070, 0.090],
                0.30,
                0.2,
            ),
            EnvironmentPreset::Sunset => (
                [0.120, 0.080, 0.220],
                [0.850, 0.380, 0.180],
                [0.060, 0.040, 0.050],
                0.35,
                0.1,
            ),
            EnvironmentPreset::Studio => (
                [0.300, 0.300, 0.320],
                [0.550, 0.550, 0.560],
                [0.180, 0.180, 0.190],
                0.45,
                0.0,
            ),
        };
        Self {
            preset,
            sky: Vec3::from(sky),
            horizon: Vec3::from(horizon),
            ground: Vec3::from(ground),
            fill,
            star_density,
        }
    }

    #[inline]
    pub fn clear_color(&self) -> [f64; 4] {
        [
            self.horizon.x as f64,
            self.horizon.y as f64,
            self.horizon.z as f64,
            1.0,
        ]
    }
}

/// Material parameters for the nucleotide spheres and rungs.
#[derive(Clone, Debug, PartialEq)]
pub struct StrandStyle {
    pub sphere_radius: f32,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub adenine_thymine_color: [f32; 3],
    pub other_color: [f32; 3],
}

impl Default for StrandStyle {
    fn default() -> Self {
        Self {
            sphere_radius: 0.18,
            emissive_intensity: 1.2,
            roughness: 0.3,
            metalness: 0.5,
            adenine_thymine_color: CYAN,
            other_color: PURPLE,
        }
    }
}

impl StrandStyle {
    /// A-T pairs are drawn cyan, every other pair purple.
    #[inline]
    pub fn color_for(&self, bp: BasePair) -> Vec3 {
        match bp {
            BasePair::AT => Vec3::from(self.adenine_thymine_color),
            _ => Vec3::from(self.other_color),
        }
    }
}

/// Everything static about the visualization.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub lighting: LightingRig,
    pub environment: Environment,
    pub helix: DoubleHelix,
    pub strand: StrandStyle,
    pub particles: ParticleFieldParams,
    pub sparkles: SparkleField,
    pub sparkle_style: SparkleParams,
}

pub struct SceneComposer;

impl SceneComposer {
    pub fn compose(
        config: &HelixSceneConfig,
        helix: DoubleHelix,
        sparkles: SparkleField,
        aspect: f32,
    ) -> Scene {
        let scene = Scene {
            camera: config.camera.camera(aspect),
            lighting: config.lighting.clone(),
            environment: Environment::from_preset(config.environment),
            helix,
            strand: config.strand.clone(),
            particles: config.particles.clone(),
            sparkles,
            sparkle_style: config.sparkles.clone(),
        };
        log::debug!(
            "[scene] camera eye=({:.1},{:.1},{:.1}) lights={} env={:?}",
            scene.camera.eye.x,
            scene.camera.eye.y,
            scene.camera.eye.z,
            scene.lighting.point_lights.len(),
            scene.environment.preset
        );
        scene
    }
}
