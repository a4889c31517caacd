/// Web front-end tuning: post-processing, render target formats and input
/// normalization.
///
/// Scene-level tuning (palette, animation rates, control limits) lives in
/// `helix_core::constants`; only values specific to the browser renderer
/// belong here.
// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.85; // composite weight of the blurred bright pass
pub const BLOOM_THRESHOLD: f32 = 0.7; // luminance where the bright pass starts
pub const EXPOSURE: f32 = 1.1; // pre-tonemap scale

// Clear color of the HDR target before the backdrop pass
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Instance buffers start with room for this many elements and double on demand
pub const INITIAL_INSTANCE_CAPACITY: usize = 256;

// WheelEvent.deltaMode scale to CSS pixels
pub const WHEEL_LINE_PX: f64 = 16.0;
pub const WHEEL_PAGE_PX: f64 = 800.0;

// Timestamps from requestAnimationFrame are milliseconds
pub const MS_PER_SECOND: f64 = 1000.0;
