//! Tunables for targeting, classification and reticle drawing.
//!
//! Every field has a default, so hosts only need to provide the values they
//! want to change:
//!
//! ```
//! use critsight_core::config::ReticleConfig;
//!
//! let config = ReticleConfig::from_json(r#"{ "critical_cooldown_threshold": 0.8 }"#).unwrap();
//! assert_eq!(config.critical_cooldown_threshold, 0.8);
//! assert_eq!(config.reach_distance, 3.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::hud::{Palette, ReticleShape};

/// Errors produced while loading or validating a [`ReticleConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reach must be a positive, finite distance
    #[error("reach distance must be positive and finite, got {0}")]
    InvalidReach(f64),

    /// Search margin must be non-negative and finite
    #[error("search margin must be non-negative and finite, got {0}")]
    InvalidMargin(f64),

    /// Cooldown thresholds live in `(0, 1]`
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidThreshold {
        /// Field name
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// The indicator rate must be non-negative and finite
    #[error("full indicator rate must be non-negative and finite, got {0}")]
    InvalidRate(f32),

    /// The JSON document could not be parsed
    #[error("failed to parse reticle config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reticle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticleConfig {
    /// Melee reach used for target resolution, independent of the player's
    /// real interaction reach
    pub reach_distance: f64,
    /// Padding added on every axis of the raycast search volume
    pub search_margin: f64,
    /// Cooldown progress required for `CriticalReady`
    pub critical_cooldown_threshold: f32,
    /// Cooldown progress required for `AttackReady`
    pub attack_cooldown_threshold: f32,
    /// Swimming counts as supported movement and blocks critical hits
    pub submerged_blocks_critical: bool,
    /// Apply the reach check to the engine's cached target as well
    pub revalidate_cached_distance: bool,
    /// Cooldown rate above which the full attack indicator may be shown
    pub full_indicator_min_rate: f32,
    /// How the reticle itself is drawn
    pub shape: ReticleShape,
    /// Tints per readiness state
    pub palette: Palette,
}

impl ReticleConfig {
    /// Default melee reach.
    pub const DEFAULT_REACH: f64 = 3.0;

    /// Parse a JSON document and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            reach = config.reach_distance,
            critical = config.critical_cooldown_threshold,
            attack = config.attack_cooldown_threshold,
            "loaded reticle config"
        );
        Ok(config)
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reach_distance.is_finite() && self.reach_distance > 0.0) {
            return Err(ConfigError::InvalidReach(self.reach_distance));
        }
        if !(self.search_margin.is_finite() && self.search_margin >= 0.0) {
            return Err(ConfigError::InvalidMargin(self.search_margin));
        }
        check_threshold("critical_cooldown_threshold", self.critical_cooldown_threshold)?;
        check_threshold("attack_cooldown_threshold", self.attack_cooldown_threshold)?;
        if !(self.full_indicator_min_rate.is_finite() && self.full_indicator_min_rate >= 0.0) {
            return Err(ConfigError::InvalidRate(self.full_indicator_min_rate));
        }
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

impl Default for ReticleConfig {
    fn default() -> Self {
        Self {
            reach_distance: Self::DEFAULT_REACH,
            search_margin: 1.0,
            critical_cooldown_threshold: 1.0,
            attack_cooldown_threshold: 1.0,
            submerged_blocks_critical: true,
            revalidate_cached_distance: true,
            full_indicator_min_rate: 5.0,
            shape: ReticleShape::Sprite,
            palette: Palette::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ReticleConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = ReticleConfig::from_json("{}").unwrap();
        assert_eq!(config, ReticleConfig::default());
    }

    #[test]
    fn partial_json_overrides() {
        let config =
            ReticleConfig::from_json(r#"{ "reach_distance": 4.5, "shape": "cross" }"#).unwrap();
        assert_eq!(config.reach_distance, 4.5);
        assert_eq!(config.shape, ReticleShape::Cross);
        assert!(config.submerged_blocks_critical);
    }

    #[test]
    fn rejects_bad_reach() {
        let err = ReticleConfig::from_json(r#"{ "reach_distance": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidReach(_)));

        let config = ReticleConfig {
            reach_distance: f64::INFINITY,
            ..ReticleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidReach(_))));
    }

    #[test]
    fn rejects_negative_margin() {
        let config = ReticleConfig {
            search_margin: -1.0,
            ..ReticleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMargin(_))));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let err = ReticleConfig::from_json(r#"{ "attack_cooldown_threshold": 1.2 }"#).unwrap_err();
        match err {
            ConfigError::InvalidThreshold { name, .. } => {
                assert_eq!(name, "attack_cooldown_threshold");
            }
            other => panic!("unexpected error: {other}"),
        }

        let config = ReticleConfig {
            critical_cooldown_threshold: 0.0,
            ..ReticleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan_rate() {
        let config = ReticleConfig {
            full_indicator_min_rate: f32::NAN,
            ..ReticleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRate(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = ReticleConfig::from_json("{ reach").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse reticle config"));
    }

    #[test]
    fn round_trips_through_json() {
        let config = ReticleConfig {
            critical_cooldown_threshold: 0.8,
            submerged_blocks_critical: false,
            ..ReticleConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ReticleConfig::from_json(&json).unwrap(), config);
    }
}
