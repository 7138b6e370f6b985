// ABOUTME: Fueling strategy configuration for workout-centred nutrient targets
// ABOUTME: Activity multipliers, intra/pre/post window targets, rest-day baseline, and sweat table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fueling Strategy Configuration
//!
//! # Scientific References
//!
//! - Intra-workout carbohydrate: Jeukendrup (2014) DOI: 10.1007/s40279-014-0148-z
//! - Pre/post timing: Kerksick et al. (2017) DOI: 10.1186/s12970-017-0189-4
//! - Sweat rates: Barnes et al. (2019) DOI: 10.1080/02640414.2018.1488651

use fuelgauge_core::constants::defaults;
use fuelgauge_core::models::ActivityLevel;
use serde::{Deserialize, Serialize};

/// Top-level strategy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// BMR multipliers per activity level
    pub activity_factors: ActivityFactorsConfig,
    /// Intra-workout carbohydrate rates
    pub intra: IntraWorkoutConfig,
    /// Pre-workout window targets
    pub pre: PreWorkoutConfig,
    /// Post-workout window targets
    pub post: PostWorkoutConfig,
    /// Rest-day and baseline totals
    pub baseline: BaselineConfig,
    /// Sweat-rate lookup table
    pub sweat: SweatRateConfig,
}

/// Activity factor multipliers for base calories
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extra active (hard training 2x/day): 1.9
    pub extra_active: f64,
    /// Elite (multiple sessions per day): 2.1
    pub elite: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
            elite: 2.1,
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
            ActivityLevel::Elite => self.elite,
        }
    }

    /// Factors in ascending activity order
    #[must_use]
    pub const fn ordered(&self) -> [f64; 6] {
        [
            self.sedentary,
            self.lightly_active,
            self.moderately_active,
            self.very_active,
            self.extra_active,
            self.elite,
        ]
    }
}

/// Intra-workout carbohydrate rates by duration band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntraWorkoutConfig {
    /// Sessions shorter than this get no intra fueling by default (minutes)
    pub short_duration_min: f64,
    /// Sessions longer than this use the long band (minutes)
    pub long_duration_min: f64,
    /// Intensity above which short sessions still get fuel
    pub short_high_intensity_threshold: f64,
    /// Rate for short, very hard sessions (g/h)
    pub short_high_intensity_carbs_per_hour: f64,
    /// Medium band at zero intensity (g/h)
    pub medium_min_carbs_per_hour: f64,
    /// Medium band at full intensity (g/h)
    pub medium_max_carbs_per_hour: f64,
    /// Long band at zero intensity (g/h)
    pub long_min_carbs_per_hour: f64,
    /// Long band at full intensity (g/h)
    pub long_max_carbs_per_hour: f64,
    /// Absolute cap outside race day (g/h)
    pub absolute_cap_carbs_per_hour: f64,
}

impl Default for IntraWorkoutConfig {
    fn default() -> Self {
        Self {
            short_duration_min: 60.0,
            long_duration_min: 120.0,
            short_high_intensity_threshold: 0.9,
            short_high_intensity_carbs_per_hour: 45.0,
            medium_min_carbs_per_hour: 45.0,
            medium_max_carbs_per_hour: 75.0,
            long_min_carbs_per_hour: 60.0,
            long_max_carbs_per_hour: 90.0,
            absolute_cap_carbs_per_hour: 90.0,
        }
    }
}

/// Pre-workout window targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreWorkoutConfig {
    /// Standard carbohydrate (g/kg)
    pub carbs_g_per_kg: f64,
    /// Carbohydrate before Performance-state or very long sessions (g/kg)
    pub loaded_carbs_g_per_kg: f64,
    /// Duration above which the loaded amount applies (minutes)
    pub loaded_duration_min: f64,
    /// Flat carbohydrate under TRAIN_LOW (g)
    pub train_low_carbs_g: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fluid (mL/kg)
    pub fluid_ml_per_kg: f64,
}

impl Default for PreWorkoutConfig {
    fn default() -> Self {
        Self {
            carbs_g_per_kg: 1.0,
            loaded_carbs_g_per_kg: 2.0,
            loaded_duration_min: 180.0,
            train_low_carbs_g: 10.0,
            protein_g: 15.0,
            fat_g: 5.0,
            fluid_ml_per_kg: 6.0,
        }
    }
}

/// Post-workout window targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWorkoutConfig {
    /// Carbohydrate (g/kg)
    pub carbs_g_per_kg: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Protein under TRAIN_LOW (g)
    pub train_low_protein_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Share of intra-workout fluid loss to replace afterwards
    pub fluid_replacement_fraction: f64,
}

impl Default for PostWorkoutConfig {
    fn default() -> Self {
        Self {
            carbs_g_per_kg: 1.2,
            protein_g: 30.0,
            train_low_protein_g: 45.0,
            fat_g: 10.0,
            fluid_replacement_fraction: 0.5,
        }
    }
}

/// Whole-day baseline targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Protein (g/kg)
    pub protein_g_per_kg: f64,
    /// Fat (g/kg)
    pub fat_g_per_kg: f64,
    /// Fluid (mL)
    pub fluid_ml: f64,
    /// Sodium (mg)
    pub sodium_mg: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        use fuelgauge_core::constants::baseline;
        Self {
            protein_g_per_kg: baseline::PROTEIN_G_PER_KG,
            fat_g_per_kg: baseline::FAT_G_PER_KG,
            fluid_ml: baseline::FLUID_ML,
            sodium_mg: baseline::SODIUM_MG,
        }
    }
}

/// Temperature × intensity sweat-rate table (L/h)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweatRateConfig {
    /// Lower bound of the coldest band (°C)
    pub min_temperature_c: f64,
    /// Upper bound of the hottest band (°C)
    pub max_temperature_c: f64,
    /// Upper bounds of the first three temperature bands (°C)
    pub temperature_bounds_c: [f64; 3],
    /// Intensity thresholds separating the four intensity bands
    pub intensity_thresholds: [f64; 3],
    /// Rows are temperature bands, columns intensity bands
    pub rates_l_per_hour: [[f64; 4]; 4],
    /// Temperature assumed when no metadata is available (°C)
    pub default_temperature_c: f64,
}

impl Default for SweatRateConfig {
    fn default() -> Self {
        Self {
            min_temperature_c: -20.0,
            max_temperature_c: 60.0,
            temperature_bounds_c: [10.0, 20.0, 30.0],
            intensity_thresholds: [0.65, 0.8, 0.95],
            rates_l_per_hour: [
                [0.4, 0.6, 0.8, 1.0],
                [0.5, 0.75, 1.0, 1.2],
                [0.7, 1.0, 1.3, 1.5],
                [0.9, 1.3, 1.6, 1.9],
            ],
            default_temperature_c: defaults::TEMPERATURE_C,
        }
    }
}
