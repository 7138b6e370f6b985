// ABOUTME: Fueling engine configuration with environment overrides and validation
// ABOUTME: Groups simulation, strategy, status, chain and fallback settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fueling Engine Configuration
//!
//! Every tuning constant of the engine lives here. The configuration is passed
//! explicitly to each component; there is no process-wide instance.
//!
//! # Module Structure
//!
//! - `simulation` - step grid, drains, rehydration, boost and candidate rules
//! - `strategy` - activity multipliers, window targets, sweat table
//! - `status` - status bands, chain limits, fallbacks
//! - `error` - configuration errors

pub mod error;
pub mod simulation;
pub mod status;
pub mod strategy;

pub use error::ConfigError;
pub use simulation::{BoostConfig, CandidateConfig, PastWindowPolicy, SimulationConfig};
pub use status::{ChainConfig, DefaultsConfig, StatusConfig};
pub use strategy::{
    ActivityFactorsConfig, BaselineConfig, IntraWorkoutConfig, PostWorkoutConfig,
    PreWorkoutConfig, StrategyConfig, SweatRateConfig,
};

use fuelgauge_core::time::DAY_MINUTES;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Main fueling engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuelingEngineConfig {
    /// Energy timeline simulation
    pub simulation: SimulationConfig,
    /// Deficit-aware boost of the first synthetic meal
    pub boost: BoostConfig,
    /// Synthetic candidate selection
    pub candidates: CandidateConfig,
    /// Fueling strategy targets
    pub strategy: StrategyConfig,
    /// Live glycogen status
    pub status: StatusConfig,
    /// Cross-day chaining
    pub chain: ChainConfig,
    /// Fallback values
    pub defaults: DefaultsConfig,
}

impl FuelingEngineConfig {
    /// Load configuration from defaults and `FUELGAUGE_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable cannot be parsed or the
    /// resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    #[must_use]
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Failed to load fueling engine config: {e}, using defaults");
            Self::default()
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_simulation()?;
        self.validate_boost()?;
        self.validate_strategy()?;
        self.validate_status()
    }

    fn validate_simulation(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;

        if sim.step_minutes <= 0 || DAY_MINUTES % sim.step_minutes != 0 {
            return Err(ConfigError::ValueOutOfRange(
                "step_minutes must be positive and divide a day evenly",
            ));
        }
        if sim.tank_capacity_g_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "tank_capacity_g_per_kg must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&sim.bmr_carb_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "bmr_carb_fraction must be between 0 and 1",
            ));
        }
        if sim.workout_drain_multiplier < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "workout_drain_multiplier must be at least 1.0",
            ));
        }
        if sim.max_absorption_per_step_g <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_absorption_per_step_g must be positive",
            ));
        }
        if sim.rehydration_start_hour >= sim.rehydration_end_hour || sim.rehydration_end_hour > 24
        {
            return Err(ConfigError::InvalidRange(
                "rehydration_start_hour must be < rehydration_end_hour <= 24",
            ));
        }
        if sim.insensible_fluid_loss_ml_per_hour < 0.0
            || sim.passive_rehydration_ml_per_hour < 0.0
            || sim.rest_day_fluid_decay_ml_per_hour < 0.0
        {
            return Err(ConfigError::ValueOutOfRange("fluid rates must be non-negative"));
        }
        if let PastWindowPolicy::Probable { weight } = sim.past_window_policy {
            if weight <= 0.0 || weight > 1.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "probable meal weight must be in (0, 1]",
                ));
            }
        }
        if self.candidates.logged_overlap_min < 0.0 || self.candidates.base_overlap_min < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "candidate overlap windows must be non-negative",
            ));
        }
        Ok(())
    }

    fn validate_boost(&self) -> Result<(), ConfigError> {
        let boost = &self.boost;
        if boost.critical_threshold_pct >= boost.recovery_threshold_pct {
            return Err(ConfigError::InvalidRange(
                "critical_threshold_pct must be < recovery_threshold_pct",
            ));
        }
        if boost.critical_target_pct <= boost.critical_threshold_pct
            || boost.critical_target_pct > 100.0
        {
            return Err(ConfigError::InvalidRange(
                "critical_target_pct must be above critical_threshold_pct and at most 100",
            ));
        }
        if !(0.0..=1.0).contains(&boost.recovery_goal_cap_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "recovery_goal_cap_fraction must be between 0 and 1",
            ));
        }
        Ok(())
    }

    fn validate_strategy(&self) -> Result<(), ConfigError> {
        let strategy = &self.strategy;

        let factors = strategy.activity_factors.ordered();
        if factors[0] < 1.0 || factors.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidRange(
                "activity factors must start at 1.0 or above and be strictly ascending",
            ));
        }

        let intra = &strategy.intra;
        if intra.short_duration_min >= intra.long_duration_min {
            return Err(ConfigError::InvalidRange(
                "short_duration_min must be < long_duration_min",
            ));
        }
        if intra.medium_min_carbs_per_hour > intra.medium_max_carbs_per_hour
            || intra.long_min_carbs_per_hour > intra.long_max_carbs_per_hour
        {
            return Err(ConfigError::InvalidRange(
                "intra carbohydrate band minimums must not exceed maximums",
            ));
        }

        let sweat = &strategy.sweat;
        let bounds = sweat.temperature_bounds_c;
        if sweat.min_temperature_c >= bounds[0]
            || bounds[0] >= bounds[1]
            || bounds[1] >= bounds[2]
            || bounds[2] >= sweat.max_temperature_c
        {
            return Err(ConfigError::InvalidRange(
                "sweat temperature bounds must be strictly ascending",
            ));
        }
        let thresholds = sweat.intensity_thresholds;
        if thresholds[0] >= thresholds[1] || thresholds[1] >= thresholds[2] {
            return Err(ConfigError::InvalidRange(
                "sweat intensity thresholds must be strictly ascending",
            ));
        }
        if sweat.rates_l_per_hour.iter().flatten().any(|rate| *rate <= 0.0) {
            return Err(ConfigError::ValueOutOfRange("sweat rates must be positive"));
        }
        Ok(())
    }

    fn validate_status(&self) -> Result<(), ConfigError> {
        let status = &self.status;
        if status.critical_threshold_pct >= status.ready_threshold_pct {
            return Err(ConfigError::InvalidRange(
                "critical_threshold_pct must be < ready_threshold_pct",
            ));
        }
        if status.integration_step_min <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "integration_step_min must be positive",
            ));
        }
        if self.chain.max_depth == 0 {
            return Err(ConfigError::ValueOutOfRange("chain max_depth must be at least 1"));
        }
        if !(0.0..=100.0).contains(&self.chain.fallback_glycogen_pct) {
            return Err(ConfigError::ValueOutOfRange(
                "fallback_glycogen_pct must be between 0 and 100",
            ));
        }
        if self.defaults.carb_goal_g <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("default carb goal must be positive"));
        }
        Ok(())
    }

    /// Apply environment variable override for a parseable value
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Simulation overrides
        Self::apply_env_var(
            "FUELGAUGE_SIM_TRACE_STEPS",
            &mut self.simulation.trace_steps,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_SIM_TANK_CAPACITY_G_PER_KG",
            &mut self.simulation.tank_capacity_g_per_kg,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_SIM_WORKOUT_DRAIN_MULTIPLIER",
            &mut self.simulation.workout_drain_multiplier,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_SIM_MAX_ABSORPTION_PER_STEP_G",
            &mut self.simulation.max_absorption_per_step_g,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_SIM_PASSIVE_REHYDRATION_ML_PER_HOUR",
            &mut self.simulation.passive_rehydration_ml_per_hour,
        )?;

        // Setting a weight switches past candidates to probable meals
        if let Ok(val) = env::var("FUELGAUGE_SIM_PROBABLE_WEIGHT") {
            let weight = val.parse().map_err(|_| {
                ConfigError::Parse("Invalid FUELGAUGE_SIM_PROBABLE_WEIGHT".to_owned())
            })?;
            self.simulation.past_window_policy = PastWindowPolicy::Probable { weight };
        }

        // Boost overrides
        Self::apply_env_var(
            "FUELGAUGE_BOOST_CRITICAL_THRESHOLD_PCT",
            &mut self.boost.critical_threshold_pct,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_BOOST_CRITICAL_TARGET_PCT",
            &mut self.boost.critical_target_pct,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_BOOST_RECOVERY_THRESHOLD_PCT",
            &mut self.boost.recovery_threshold_pct,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_BOOST_RECOVERY_GOAL_CAP",
            &mut self.boost.recovery_goal_cap_fraction,
        )?;

        // Candidate overrides
        Self::apply_env_var(
            "FUELGAUGE_CANDIDATE_LOGGED_OVERLAP_MIN",
            &mut self.candidates.logged_overlap_min,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_CANDIDATE_BASE_OVERLAP_MIN",
            &mut self.candidates.base_overlap_min,
        )?;

        // Strategy overrides
        Self::apply_env_var(
            "FUELGAUGE_STRATEGY_ABSOLUTE_CAP_CARBS_PER_HOUR",
            &mut self.strategy.intra.absolute_cap_carbs_per_hour,
        )?;

        // Status and chain overrides
        Self::apply_env_var(
            "FUELGAUGE_STATUS_READY_THRESHOLD_PCT",
            &mut self.status.ready_threshold_pct,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_STATUS_CRITICAL_THRESHOLD_PCT",
            &mut self.status.critical_threshold_pct,
        )?;
        Self::apply_env_var("FUELGAUGE_CHAIN_MAX_DEPTH", &mut self.chain.max_depth)?;
        Self::apply_env_var(
            "FUELGAUGE_CHAIN_FALLBACK_GLYCOGEN_PCT",
            &mut self.chain.fallback_glycogen_pct,
        )?;
        Self::apply_env_var(
            "FUELGAUGE_DEFAULT_CARB_GOAL_G",
            &mut self.defaults.carb_goal_g,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FuelingEngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_status_bands_rejected() {
        let mut config = FuelingEngineConfig::default();
        config.status.critical_threshold_pct = 80.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_step_must_divide_day() {
        let mut config = FuelingEngineConfig::default();
        config.simulation.step_minutes = 7;
        assert!(config.validate().is_err());
        config.simulation.step_minutes = 5;
        assert!(config.validate().is_ok());
    }
}
