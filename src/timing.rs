// Host-time bookkeeping for the animation-frame loop.

/// Converts `requestAnimationFrame` timestamps (milliseconds) into seconds
/// elapsed since the first presented frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the first call. The first finite timestamp becomes the
    /// origin; a timestamp that goes backwards is clamped to the last one so
    /// elapsed time never decreases. Non-finite input yields NaN, which the
    /// viewer treats as a skipped frame.
    pub fn elapsed(&mut self, now_ms: f64, ms_per_second: f64) -> f64 {
        if !now_ms.is_finite() {
            return f64::NAN;
        }
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let now = now_ms.max(self.last_ms).max(origin);
        self.last_ms = now;
        (now - origin) / ms_per_second
    }

    pub fn started(&self) -> bool {
        self.origin_ms.is_some()
    }
}
