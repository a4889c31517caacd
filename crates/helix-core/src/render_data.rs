//! GPU-facing data packed once per frame and shared by both front-ends.
//!
//! Layouts here must match `shaders/scene.wgsl` and `shaders/backdrop.wgsl`.

use crate::animation::{AnimationState, ParticleSnapshot};
use crate::constants::{MAX_POINT_LIGHTS, RUNG_OPACITY, SPARKLE_SIZE_SCALE};
use crate::scene::{Camera, Scene};
use glam::{Quat, Vec3};

/// One lit nucleotide sphere, drawn as a camera-facing impostor.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub emissive: f32,
}

/// Additive soft point used for particles and sparkles.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlowInstance {
    pub center: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedLight {
    pub position_range: [f32; 4],
    pub color_decay: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub ambient: [f32; 4],  // rgb premultiplied by intensity, w = light count
    pub env_fill: [f32; 4], // horizon rgb, w = fill strength
    pub material: [f32; 4], // roughness, metalness, time, unused
    pub lights: [PackedLight; MAX_POINT_LIGHTS],
}

impl SceneUniforms {
    pub fn new(camera: &Camera, scene: &Scene, elapsed: f64) -> Self {
        let (right, up, _) = camera.basis();
        let mut lights = [PackedLight::default(); MAX_POINT_LIGHTS];
        let rig = &scene.lighting;
        let count = rig.point_lights.len().min(MAX_POINT_LIGHTS);
        for (slot, light) in lights.iter_mut().zip(rig.point_lights.iter()) {
            *slot = PackedLight {
                position_range: light.position.extend(light.distance).to_array(),
                color_decay: (light.color * light.intensity).extend(light.decay).to_array(),
            };
        }
        let ambient = rig.ambient.color * rig.ambient.intensity;
        let env = &scene.environment;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            ambient: ambient.extend(count as f32).to_array(),
            env_fill: env.horizon.extend(env.fill).to_array(),
            material: [
                scene.strand.roughness,
                scene.strand.metalness,
                (elapsed % 3600.0) as f32,
                0.0,
            ],
            lights,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackdropUniforms {
    pub sky: [f32; 4],     // w = star density
    pub horizon: [f32; 4], // w = time
    pub ground: [f32; 4],  // w = aspect
    pub view: [f32; 4],    // camera azimuth, polar, unused, unused
}

impl BackdropUniforms {
    pub fn new(scene: &Scene, azimuth: f32, polar: f32, aspect: f32, elapsed: f64) -> Self {
        let env = &scene.environment;
        Self {
            sky: env.sky.extend(env.star_density).to_array(),
            horizon: env.horizon.extend((elapsed % 3600.0) as f32).to_array(),
            ground: env.ground.extend(aspect).to_array(),
            view: [azimuth, polar, 0.0, 0.0],
        }
    }
}

/// Per-frame instance data. Buffers are cleared and refilled in place so
/// their capacity is reused across frames.
#[derive(Clone, Debug, Default)]
pub struct FrameGeometry {
    pub spheres: Vec<SphereInstance>,
    pub lines: Vec<LineVertex>,
    pub glows: Vec<GlowInstance>,
}

impl FrameGeometry {
    pub fn with_capacity(helix_points: usize, particles: usize, sparkles: usize) -> Self {
        Self {
            spheres: Vec::with_capacity(helix_points * 2),
            lines: Vec::with_capacity(helix_points * 2),
            glows: Vec::with_capacity(particles + sparkles),
        }
    }

    pub fn for_scene(scene: &Scene, particles: usize) -> Self {
        Self::with_capacity(scene.helix.len(), particles, scene.sparkles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.lines.is_empty() && self.glows.is_empty()
    }

    pub fn rebuild(&mut self, scene: &Scene, state: &AnimationState, particles: ParticleSnapshot<'_>) {
        self.spheres.clear();
        self.lines.clear();
        self.glows.clear();

        let helix_q = state.helix_rotation.quat();
        self.push_helix(scene, helix_q);

        let particle_q = helix_q * state.particle_rotation.quat();
        let style = &scene.particles;
        for (p, c) in particles.positions.iter().zip(particles.colors.iter()) {
            self.glows.push(GlowInstance {
                center: (particle_q * *p).to_array(),
                size: style.size,
                color: c.to_array(),
                opacity: style.opacity,
            });
        }

        let sparkle_size = scene.sparkle_style.size * SPARKLE_SIZE_SCALE;
        let sparkle_color = scene.sparkle_style.color;
        for i in 0..scene.sparkles.len() {
            if let Some((pos, opacity)) = scene.sparkles.sample(i, state.elapsed) {
                self.glows.push(GlowInstance {
                    center: (helix_q * pos).to_array(),
                    size: sparkle_size,
                    color: sparkle_color,
                    opacity,
                });
            }
        }
    }

    fn push_helix(&mut self, scene: &Scene, q: Quat) {
        let strand = &scene.strand;
        for rung in scene.helix.rungs() {
            let color: Vec3 = strand.color_for(rung.base_pair);
            let a = q * rung.start;
            let b = q * rung.end;
            for center in [a, b] {
                self.spheres.push(SphereInstance {
                    center: center.to_array(),
                    radius: strand.sphere_radius,
                    color: color.to_array(),
                    emissive: strand.emissive_intensity,
                });
            }
            let rgba = color.extend(RUNG_OPACITY).to_array();
            self.lines.push(LineVertex {
                position: a.to_array(),
                color: rgba,
            });
            self.lines.push(LineVertex {
                position: b.to_array(),
                color: rgba,
            });
        }
    }
}
