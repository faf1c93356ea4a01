use thiserror::Error;

/// Rejected tuning or scene parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie in [-1, 1] (got {value})")]
    DotOutOfRange { field: &'static str, value: f32 },

    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    },

    #[error("unknown prefab `{0}`")]
    UnknownPrefab(String),
}

impl ConfigError {
    pub fn check_non_negative(field: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }

    pub fn check_dot(field: &'static str, value: f32) -> Result<(), Self> {
        if (-1.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::DotOutOfRange { field, value })
        }
    }
}
