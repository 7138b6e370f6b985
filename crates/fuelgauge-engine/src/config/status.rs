// ABOUTME: Glycogen status bands, state-chain limits, and fallback values
// ABOUTME: Configures the live status widget and cross-day chaining defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fuelgauge_core::constants::defaults as core_defaults;
use serde::{Deserialize, Serialize};

/// Advisory bands for the live glycogen status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Levels above this are Ready (%)
    pub ready_threshold_pct: f64,
    /// Levels below this are Critical (%)
    pub critical_threshold_pct: f64,
    /// Integration step for absorbed-to-date (minutes)
    pub integration_step_min: f64,
    /// Advice shown in the Ready band
    pub ready_advice: String,
    /// Advice shown in the Moderate band
    pub moderate_advice: String,
    /// Advice shown in the Critical band
    pub critical_advice: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            ready_threshold_pct: 70.0,
            critical_threshold_pct: 35.0,
            integration_step_min: 5.0,
            ready_advice: "Glycogen stores are topped up. You're ready for quality work."
                .to_owned(),
            moderate_advice:
                "Glycogen is partially depleted. Fuel before hard efforts and eat soon after."
                    .to_owned(),
            critical_advice:
                "Glycogen is critically low. Prioritise carbohydrate now and keep training easy."
                    .to_owned(),
        }
    }
}

/// Cross-day state chaining
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Maximum number of days walked back to find a known state
    pub max_depth: u32,
    /// Starting tank level when no history exists (%)
    pub fallback_glycogen_pct: f64,
    /// Starting fluid deficit when no history exists (mL)
    pub fallback_fluid_deficit_ml: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            fallback_glycogen_pct: 85.0,
            fallback_fluid_deficit_ml: 0.0,
        }
    }
}

/// Values substituted for missing collaborator data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Daily carbohydrate goal (g)
    pub carb_goal_g: f64,
    /// Workout intensity (fraction of FTP)
    pub intensity: f64,
    /// Sweat rate when neither profile nor table gives one (L/h)
    pub sweat_rate_l_per_hour: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            carb_goal_g: core_defaults::CARB_GOAL_G,
            intensity: core_defaults::INTENSITY,
            sweat_rate_l_per_hour: core_defaults::SWEAT_RATE_L_PER_HOUR,
        }
    }
}
