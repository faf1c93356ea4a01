use ossuary_core::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numbers the archetype trees are built with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    /// Sight range of enemies looking for the player.
    pub view_min_range: f32,
    pub view_max_range: f32,
    /// Minimum `forward · direction` for the player to count as in view.
    pub view_cone_dot: f32,

    /// Same, for spotting throwables within grab range.
    pub throwable_cone_dot: f32,

    /// Collisions at this speed or faster kill; slower ones do not.
    pub impact_speed_threshold: f32,

    /// Pause before and after each throw.
    pub throw_wait_seconds: f32,
    /// Silence between screams of a detached head, and the length of a scream.
    pub scream_wait_seconds: f32,

    pub route_arrival_distance: f32,
    pub wander_arrival_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_min_range: 0.0,
            view_max_range: 50.0,
            view_cone_dot: 0.8,
            throwable_cone_dot: 0.8,
            impact_speed_threshold: 5.0,
            throw_wait_seconds: 1.0,
            scream_wait_seconds: 6.0,
            route_arrival_distance: 1.0,
            wander_arrival_distance: 1.0,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("view_min_range", self.view_min_range),
            ("view_max_range", self.view_max_range),
            ("impact_speed_threshold", self.impact_speed_threshold),
            ("throw_wait_seconds", self.throw_wait_seconds),
            ("scream_wait_seconds", self.scream_wait_seconds),
            ("route_arrival_distance", self.route_arrival_distance),
            ("wander_arrival_distance", self.wander_arrival_distance),
        ] {
            ConfigError::check_non_negative(field, value)?;
        }
        ConfigError::check_dot("view_cone_dot", self.view_cone_dot)?;
        ConfigError::check_dot("throwable_cone_dot", self.throwable_cone_dot)?;

        if self.view_min_range > self.view_max_range {
            return Err(ConfigError::InvertedRange {
                min_field: "view_min_range",
                min: self.view_min_range,
                max_field: "view_max_range",
                max: self.view_max_range,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_view_range_is_rejected() {
        let tuning = Tuning {
            view_min_range: 10.0,
            view_max_range: 5.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn negative_wait_is_rejected() {
        let tuning = Tuning {
            throw_wait_seconds: -1.0,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::Negative {
                field: "throw_wait_seconds",
                value: -1.0
            })
        );
    }
}
