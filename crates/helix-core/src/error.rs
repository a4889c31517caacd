use thiserror::Error;

/// Rejected scene configuration.
///
/// Geometry, particle generation, animation and camera controls cannot fail
/// once a configuration has been validated, so this is the only error type the
/// core exposes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown visual preset `{0}` (expected `showcase` or `classic`)")]
    UnknownPreset(String),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("helix has {count} points, at most {max} are supported")]
    TooManyPoints { count: usize, max: usize },
    #[error("camera distance range is invalid: min {min} must be positive and below max {max}")]
    DistanceRange { min: f32, max: f32 },
    #[error("damping factor must lie in (0, 1], got {0}")]
    Damping(f32),
    #[error("at most {max} point lights are supported, got {count}")]
    TooManyLights { count: usize, max: usize },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub(crate) fn ensure_positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
