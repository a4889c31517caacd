//! Ambient decoration: the particle field and the sparkle layer.
//!
//! Both generators take the random source as a parameter so a fixed seed
//! reproduces an exact field.

use crate::constants::{PARTICLE_CYAN, PARTICLE_PURPLE, SPARKLE_DRIFT, SPARKLE_TWINKLE_FREQUENCY};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleFieldParams {
    pub count: usize,
    pub spread: f32,
    pub palette: [[f32; 3]; 2],
    pub size: f32,
    pub opacity: f32,
}

impl Default for ParticleFieldParams {
    fn default() -> Self {
        Self {
            count: 150,
            spread: 25.0,
            palette: [PARTICLE_CYAN, PARTICLE_PURPLE],
            size: 0.12,
            opacity: 0.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl ParticleField {
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}

#[inline]
fn point_in_cube<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec3 {
    let x = centered(rng, extent);
    let y = centered(rng, extent);
    let z = centered(rng, extent);
    Vec3::new(x, y, z)
}

/// Scatter `count` particles uniformly in a cube of edge `spread` centred on
/// the origin, colouring each with a fair coin flip between the two palette
/// entries.
pub fn generate_particle_field<R: Rng + ?Sized>(
    count: usize,
    spread: f32,
    palette: [[f32; 3]; 2],
    rng: &mut R,
) -> ParticleField {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push(point_in_cube(rng, spread));
        let pick = if rng.gen_bool(0.5) { palette[0] } else { palette[1] };
        colors.push(Vec3::from(pick));
    }
    ParticleField { positions, colors }
}

#[inline]
pub fn generate_from_params<R: Rng + ?Sized>(
    params: &ParticleFieldParams,
    rng: &mut R,
) -> ParticleField {
    generate_particle_field(params.count, params.spread, params.palette, rng)
}

// ---------------- Sparkles ----------------

#[derive(Clone, Debug, PartialEq)]
pub struct SparkleParams {
    pub count: usize,
    pub scale: f32,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub color: [f32; 3],
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            count: 150,
            scale: 10.0,
            size: 1.5,
            speed: 1.2,
            opacity: 0.4,
            color: crate::constants::CYAN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub base: Vec3,
    pub phase: f32,
    pub speed: f32,
}

/// Twinkling points that live inside the helix group.
#[derive(Clone, Debug, PartialEq)]
pub struct SparkleField {
    pub sparkles: Vec<Sparkle>,
    pub max_opacity: f32,
}

impl SparkleField {
    pub fn generate<R: Rng + ?Sized>(params: &SparkleParams, rng: &mut R) -> Self {
        let sparkles = (0..params.count)
            .map(|_| Sparkle {
                base: point_in_cube(rng, params.scale),
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                speed: params.speed * (0.5 + rng.gen::<f32>()),
            })
            .collect();
        Self {
            sparkles,
            max_opacity: params.opacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Position and opacity of sparkle `i` at `elapsed` seconds. Always
    /// computed from the stored base, so it never drifts.
    pub fn sample(&self, i: usize, elapsed: f64) -> Option<(Vec3, f32)> {
        let s = self.sparkles.get(i)?;
        let phase = elapsed * s.speed as f64 + s.phase as f64;
        let offset = Vec3::new(
            (phase.sin() as f32) * SPARKLE_DRIFT,
            ((phase * 0.7).cos() as f32) * SPARKLE_DRIFT,
            ((phase * 1.3).sin() as f32) * SPARKLE_DRIFT,
        );
        let twinkle = 0.5 + 0.5 * (phase * SPARKLE_TWINKLE_FREQUENCY).sin() as f32;
        Some((s.base + offset, twinkle * self.max_opacity))
    }
}
