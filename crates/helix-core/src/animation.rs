//! Per-frame animation of the helix group and the particle field.
//!
//! The driver is the only writer of the particle render buffer. Renderers
//! read it through [`AnimationDriver::snapshot`], which carries a version
//! number that changes on every write.

use crate::constants::{HELIX_PITCH_FREQUENCY, PARTICLE_JITTER_FREQUENCY};
use crate::particles::ParticleField;
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    /// Group orientation, pitch applied about X after yaw about Y
    /// (X-then-Y intrinsic order).
    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// How the per-particle bob is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterMode {
    /// Offset recomputed from the immutable base each frame; bounded.
    #[default]
    Anchored,
    /// Offset added to the previous frame's value; drifts over time.
    Accumulating,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationParams {
    pub helix_yaw_step: f32,
    pub helix_pitch_amplitude: f32,
    pub particle_yaw_step: f32,
    pub particle_pitch_step: f32,
    pub jitter_amplitude: f32,
    pub jitter_axis: Axis,
    pub jitter_mode: JitterMode,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            helix_yaw_step: 0.003,
            helix_pitch_amplitude: 0.25,
            particle_yaw_step: 0.0003,
            particle_pitch_step: 0.0001,
            jitter_amplitude: 0.008,
            jitter_axis: Axis::Y,
            jitter_mode: JitterMode::Anchored,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub elapsed: f64,
    pub helix_rotation: Rotation,
    pub particle_rotation: Rotation,
    pub frame: u64,
}

/// Particle positions as stored at mount, the positions shown this frame,
/// and the immutable colours.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    base: Vec<Vec3>,
    current: Vec<Vec3>,
    colors: Vec<Vec3>,
    version: u64,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct ParticleSnapshot<'a> {
    pub positions: &'a [Vec3],
    pub colors: &'a [Vec3],
    pub version: u64,
}

impl ParticleBuffer {
    pub fn new(field: ParticleField) -> Self {
        let ParticleField { positions, colors } = field;
        Self {
            current: positions.clone(),
            base: positions,
            colors,
            version: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    #[inline]
    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    #[inline]
    pub fn snapshot(&self) -> ParticleSnapshot<'_> {
        ParticleSnapshot {
            positions: &self.current,
            colors: &self.colors,
            version: self.version,
        }
    }

    fn perturb(&mut self, elapsed: f64, amplitude: f32, axis: Axis, mode: JitterMode) {
        let phase0 = elapsed * PARTICLE_JITTER_FREQUENCY;
        for (i, (cur, base)) in self.current.iter_mut().zip(self.base.iter()).enumerate() {
            let offset = ((phase0 + i as f64).sin() as f32) * amplitude;
            let slot = match axis {
                Axis::X => &mut cur.x,
                Axis::Y => &mut cur.y,
                Axis::Z => &mut cur.z,
            };
            match mode {
                JitterMode::Anchored => {
                    let origin = match axis {
                        Axis::X => base.x,
                        Axis::Y => base.y,
                        Axis::Z => base.z,
                    };
                    *slot = origin + offset;
                }
                JitterMode::Accumulating => *slot += offset,
            }
        }
        self.version = self.version.wrapping_add(1);
    }
}

pub struct AnimationDriver {
    params: AnimationParams,
    state: AnimationState,
    particles: ParticleBuffer,
}

impl AnimationDriver {
    pub fn new(params: AnimationParams, field: ParticleField) -> Self {
        Self {
            params,
            state: AnimationState::default(),
            particles: ParticleBuffer::new(field),
        }
    }

    #[inline]
    pub fn params(&self) -> &AnimationParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn snapshot(&self) -> ParticleSnapshot<'_> {
        self.particles.snapshot()
    }

    #[inline]
    pub fn particles(&self) -> &ParticleBuffer {
        &self.particles
    }

    /// Advance one presented frame to host time `elapsed` (seconds).
    ///
    /// Returns `false` and leaves all state untouched when `elapsed` is not
    /// finite.
    pub fn tick(&mut self, elapsed: f64) -> bool {
        if !elapsed.is_finite() {
            log::warn!("[anim] skipping frame with non-finite elapsed time {elapsed}");
            return false;
        }
        let p = &self.params;
        let st = &mut self.state;
        st.elapsed = elapsed;
        st.frame = st.frame.wrapping_add(1);

        // yaw drifts per call and is wrapped to keep f32 precision over long sessions
        st.helix_rotation.yaw = (st.helix_rotation.yaw + p.helix_yaw_step).rem_euclid(TAU);
        st.helix_rotation.pitch =
            ((elapsed * HELIX_PITCH_FREQUENCY).sin() as f32) * p.helix_pitch_amplitude;

        st.particle_rotation.yaw =
            (st.particle_rotation.yaw + p.particle_yaw_step).rem_euclid(TAU);
        st.particle_rotation.pitch =
            (st.particle_rotation.pitch + p.particle_pitch_step).rem_euclid(TAU);

        self.particles
            .perturb(elapsed, p.jitter_amplitude, p.jitter_axis, p.jitter_mode);
        true
    }
}
