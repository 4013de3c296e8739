use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("arena dimensions must be finite and positive, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("{field} ({size}) does not fit a {width}x{height} arena")]
    SizeExceedsArena {
        field: &'static str,
        size: f32,
        width: f32,
        height: f32,
    },

    #[error("{0} must be finite and positive")]
    NonPositive(&'static str),

    #[error("reproduction chance must lie in [0, 1], got {0}")]
    InvalidProbability(f32),
}

/// Ecosystem tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosystemTuning {
    // Arena
    pub arena_width: f32,
    pub arena_height: f32,

    // Bodies
    pub default_size: f32,
    pub predator_growth: f32,
    pub max_predator_size: f32,

    // Schedules (seconds)
    pub behavior_interval_secs: f32,
    pub lifespan_secs: f32,
    pub seek_duration_secs: f32,

    // Reproduction
    pub reproduction_chance: f32,
    pub max_reproductions: u32,
    /// Reproduction is refused once the dish holds this many organisms
    pub population_cap: usize,

    // Wandering
    pub wander_step: f32,
    pub arrival_tolerance: f32,

    /// Frames per second used when running without a display
    pub frame_rate: u32,
}

impl Default for EcosystemTuning {
    fn default() -> Self {
        Self {
            arena_width: 500.0,
            arena_height: 500.0,

            default_size: 20.0,
            predator_growth: 2.0,
            max_predator_size: 50.0,

            behavior_interval_secs: 1.0,
            lifespan_secs: 30.0,
            seek_duration_secs: 7.0,

            reproduction_chance: 0.075,
            max_reproductions: 2,
            population_cap: 99,

            wander_step: 1.0,
            arrival_tolerance: 1.0,

            frame_rate: 60,
        }
    }
}

impl EcosystemTuning {
    /// The dish as it has always behaved
    pub fn classic() -> Self {
        Self::default()
    }

    /// Reproducers breed several times more often in a roomier dish
    pub fn fast_breeding() -> Self {
        let mut tuning = Self::default();
        tuning.arena_width = 800.0;
        tuning.arena_height = 600.0;
        tuning.reproduction_chance = 0.25;
        tuning.population_cap = 199;
        tuning
    }

    /// Organisms live twice as long and predators can grow bigger
    pub fn long_lived() -> Self {
        let mut tuning = Self::default();
        tuning.lifespan_secs = 60.0;
        tuning.max_predator_size = 70.0;
        tuning
    }

    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let (width, height) = (self.arena_width, self.arena_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(TuningError::InvalidArena { width, height });
        }

        for (field, size) in [
            ("default_size", self.default_size),
            ("max_predator_size", self.max_predator_size),
        ] {
            if !(size.is_finite() && size > 0.0) {
                return Err(TuningError::NonPositive(field));
            }
            if size > width || size > height {
                return Err(TuningError::SizeExceedsArena {
                    field,
                    size,
                    width,
                    height,
                });
            }
        }

        // Schedules must convert to a non-zero Duration
        for (field, secs) in [
            ("behavior_interval_secs", self.behavior_interval_secs),
            ("lifespan_secs", self.lifespan_secs),
            ("seek_duration_secs", self.seek_duration_secs),
        ] {
            match Duration::try_from_secs_f32(secs) {
                Ok(duration) if !duration.is_zero() => {}
                _ => return Err(TuningError::NonPositive(field)),
            }
        }

        for (field, value) in [
            ("wander_step", self.wander_step),
            ("arrival_tolerance", self.arrival_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositive(field));
            }
        }

        if !(0.0..=1.0).contains(&self.reproduction_chance) {
            return Err(TuningError::InvalidProbability(self.reproduction_chance));
        }
        if self.frame_rate == 0 || self.frame_duration().is_zero() {
            return Err(TuningError::NonPositive("frame_rate"));
        }
        Ok(())
    }

    pub fn behavior_interval(&self) -> Duration {
        Duration::from_secs_f32(self.behavior_interval_secs)
    }

    pub fn lifespan(&self) -> Duration {
        Duration::from_secs_f32(self.lifespan_secs)
    }

    pub fn seek_duration(&self) -> Duration {
        Duration::from_secs_f32(self.seek_duration_secs)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for tuning in [
            EcosystemTuning::classic(),
            EcosystemTuning::fast_breeding(),
            EcosystemTuning::long_lived(),
        ] {
            tuning.validate().unwrap();
        }
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let tuning = EcosystemTuning::from_json_str(r#"{ "lifespan_secs": 45.0 }"#).unwrap();
        assert_eq!(tuning.lifespan(), Duration::from_secs(45));
        assert_eq!(tuning.arena_width, 500.0);
        assert_eq!(tuning.max_reproductions, 2);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EcosystemTuning::from_json_str("{ lifespan_secs: "),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let tuning = EcosystemTuning {
            reproduction_chance: 1.5,
            ..EcosystemTuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::InvalidProbability(_))));
    }

    #[test]
    fn rejects_degenerate_arena() {
        let tuning = EcosystemTuning {
            arena_height: f32::NAN,
            ..EcosystemTuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::InvalidArena { .. })));
    }

    #[test]
    fn rejects_bodies_larger_than_the_arena() {
        let tuning = EcosystemTuning {
            arena_width: 40.0,
            ..EcosystemTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::SizeExceedsArena {
                field: "max_predator_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_durations() {
        let tuning = EcosystemTuning {
            seek_duration_secs: 0.0,
            ..EcosystemTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive("seek_duration_secs"))
        ));
    }

    #[test]
    fn rejects_durations_too_long_to_represent() {
        let tuning = EcosystemTuning::from_json_str(r#"{ "lifespan_secs": 1e30 }"#);
        assert!(matches!(tuning, Err(TuningError::NonPositive("lifespan_secs"))));
    }

    #[test]
    fn rejects_durations_that_round_to_zero() {
        let tuning = EcosystemTuning {
            behavior_interval_secs: 1e-12,
            ..EcosystemTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive("behavior_interval_secs"))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            EcosystemTuning::load("/nonexistent/petri-dish-tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}
