use glam::Vec3;

// Shared visual tuning constants used by both web and native frontends.

// Helix layout
pub const STRAND_SCALE: f32 = 0.8; // strands sit inside the parametric radius, mirrored through the axis

pub const RUNG_OPACITY: f32 = 0.55; // base-pair connectors are drawn translucent

// Animation
pub const HELIX_PITCH_FREQUENCY: f64 = 0.3; // rad/s of the helix pitch oscillation
pub const PARTICLE_JITTER_FREQUENCY: f64 = 0.5; // rad/s of the per-particle vertical bob
pub const SPARKLE_DRIFT: f32 = 0.15; // world-space bob radius of a sparkle
pub const SPARKLE_TWINKLE_FREQUENCY: f64 = 1.7; // base twinkle rate before per-sparkle speed

pub const SPARKLE_SIZE_SCALE: f32 = 0.04; // sparkle size units to world units

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0; // caps fill-rate cost on dense displays

// Controls
pub const AUTO_ROTATE_STEP_PER_SPEED: f32 = std::f32::consts::TAU / 3600.0; // one orbit per 60s at 60fps for speed 1
pub const WHEEL_ZOOM_BASE: f32 = 0.95; // dolly factor per wheel notch, raised to zoom_speed
pub const KEY_PAN_PIXELS: f32 = 7.0; // arrow-key pan step
pub const POLAR_EPSILON: f32 = 1e-6; // keeps the polar angle off the poles

// Renderer limits
pub const MAX_HELIX_POINTS: usize = 1 << 20; // two sphere instances per point
pub const MAX_POINT_LIGHTS: usize = 4; // must match the WGSL light array

// Palette
pub const CYAN: [f32; 3] = [0.024, 0.714, 0.831]; // #06b6d4
pub const PURPLE: [f32; 3] = [0.545, 0.361, 0.965]; // #8b5cf6
pub const LAVENDER: [f32; 3] = [0.655, 0.545, 0.980]; // #a78bfa
pub const SLATE: [f32; 3] = [0.118, 0.161, 0.231]; // #1e293b

// Particle palette (slightly desaturated against the strands)
pub const PARTICLE_CYAN: [f32; 3] = [0.02, 0.72, 0.77];
pub const PARTICLE_PURPLE: [f32; 3] = [0.55, 0.32, 0.97];

#[inline]
pub fn rgb(c: [f32; 3]) -> Vec3 {
    Vec3::from(c)
}
