use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::UInt;
use crate::error::{ConfigError, Result};
use crate::learning::action::PriceLevels;
use crate::segment::SegmentMode;

/// Learning parameters for the tabular Q-learning loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlConfig {
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Exploration rate.
    pub epsilon: f64,
    pub episodes: usize,
}

impl Default for RlConfig {
    fn default() -> Self {
        RlConfig {
            alpha: 0.15,
            gamma: 0.85,
            epsilon: 0.2,
            episodes: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_seats: UInt,
    /// Number of time steps in one selling day.
    pub time_horizon: UInt,
    /// Seed for the random source. Drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Log the episode reward every this many episodes (0 disables).
    pub report_every: usize,
    pub segment_sampling: SegmentMode,
    pub price_levels: PriceLevels,
    pub rl: RlConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_seats: 100,
            time_horizon: 12,
            seed: None,
            report_every: 100,
            segment_sampling: SegmentMode::default(),
            price_levels: PriceLevels::default(),
            rl: RlConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Config::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Checks every value the state space and the update rule depend on.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.num_seats == 0 {
            return Err(ConfigError::NoSeats);
        }
        if self.time_horizon == 0 {
            return Err(ConfigError::NoTimeHorizon);
        }
        if self.rl.episodes == 0 {
            return Err(ConfigError::NoEpisodes);
        }
        self.price_levels.validate()?;
        for (name, value) in [
            ("alpha", self.rl.alpha),
            ("gamma", self.rl.gamma),
            ("epsilon", self.rl.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ParameterOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization_toml() {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("num_seats = 100\n"));
        assert!(serialized.contains("segment_sampling = \"uniform\"\n"));

        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            "num_seats = 10\ntime_horizon = 3\nprice_levels = [100, 200, 300]\n\n[rl]\nepisodes = 50\n",
        )
        .unwrap();
        assert_eq!(config.num_seats, 10);
        assert_eq!(config.time_horizon, 3);
        assert_eq!(config.price_levels, PriceLevels::List(vec![100, 200, 300]));
        assert_eq!(config.rl.episodes, 50);
        assert_eq!(config.rl.alpha, 0.15);
        assert_eq!(config.report_every, 100);
    }

    #[test]
    fn test_validation_failures() {
        let no_seats = Config {
            num_seats: 0,
            ..Config::default()
        };
        assert_eq!(no_seats.validate(), Err(ConfigError::NoSeats));

        let no_horizon = Config {
            time_horizon: 0,
            ..Config::default()
        };
        assert_eq!(no_horizon.validate(), Err(ConfigError::NoTimeHorizon));

        let no_prices = Config {
            price_levels: PriceLevels::List(vec![]),
            ..Config::default()
        };
        assert_eq!(no_prices.validate(), Err(ConfigError::EmptyPriceLevels));

        let mut bad_gamma = Config::default();
        bad_gamma.rl.gamma = 1.5;
        assert_eq!(
            bad_gamma.validate(),
            Err(ConfigError::ParameterOutOfRange {
                name: "gamma",
                value: 1.5
            })
        );

        let mut nan_epsilon = Config::default();
        nan_epsilon.rl.epsilon = f64::NAN;
        assert!(matches!(
            nan_epsilon.validate(),
            Err(ConfigError::ParameterOutOfRange {
                name: "epsilon",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(Config::from_toml_str("num_seats = 0\n").is_err());
        assert!(Config::from_toml_str("num_seats = \"many\"\n").is_err());
    }

    #[test]
    fn test_read_from_file() {
        let config = Config::from_toml_file("./airfare.toml").expect("Failed to read the file");
        assert_eq!(config, Config::default());
    }
}
