// ABOUTME: Application constants for fallback athlete settings and daily baselines
// ABOUTME: Values used whenever collaborator data is missing or malformed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants organized by domain.

/// Fallback athlete settings used when the profile carries missing or invalid values
pub mod defaults {
    /// Basal metabolic rate when none is configured (kcal/day)
    pub const BMR_KCAL: f64 = 1600.0;
    /// Body weight when none is configured (kg)
    pub const WEIGHT_KG: f64 = 75.0;
    /// Daily carbohydrate goal when neither the record nor the plan supplies one (g)
    pub const CARB_GOAL_G: f64 = 300.0;
    /// Functional threshold power when none is configured (W)
    pub const FTP_WATTS: f64 = 200.0;
    /// Sweat sodium concentration target (mg/L)
    pub const SODIUM_MG_PER_L: f64 = 800.0;
    /// Sweat rate used when intensity or temperature cannot be determined (L/h)
    pub const SWEAT_RATE_L_PER_HOUR: f64 = 0.8;
    /// Ambient temperature assumed when no workout metadata carries one (°C)
    pub const TEMPERATURE_C: f64 = 20.0;
    /// Workout intensity assumed when none is recorded (fraction of FTP)
    pub const INTENSITY: f64 = 0.65;
    /// Pre-workout fueling window length (minutes)
    pub const PRE_WORKOUT_WINDOW_MIN: i64 = 120;
    /// Post-workout fueling window length (minutes)
    pub const POST_WORKOUT_WINDOW_MIN: i64 = 60;
    /// Upper bound on intra-workout carbohydrate intake (g/h)
    pub const MAX_CARBS_PER_HOUR: f64 = 90.0;
}

/// Upper bounds applied to collaborator-supplied durations
pub mod limits {
    /// Longest workout the engine accepts (minutes); longer values are clamped
    pub const MAX_WORKOUT_DURATION_MIN: f64 = 24.0 * 60.0;
    /// Longest pre- or post-workout fueling window (minutes)
    pub const MAX_FUELING_WINDOW_MIN: i64 = 24 * 60;
}

/// Daily hydration and electrolyte baselines
pub mod baseline {
    /// Daily fluid baseline before workout-specific additions (mL)
    pub const FLUID_ML: f64 = 2000.0;
    /// Daily sodium baseline before workout-specific additions (mg)
    pub const SODIUM_MG: f64 = 1000.0;
    /// Daily protein target (g per kg body weight)
    pub const PROTEIN_G_PER_KG: f64 = 1.6;
    /// Daily fat target (g per kg body weight)
    pub const FAT_G_PER_KG: f64 = 1.0;
}

/// Energy content of macronutrients
pub mod energy {
    /// Carbohydrate energy density (kcal/g)
    pub const KCAL_PER_G_CARB: f64 = 4.0;
    /// Protein energy density (kcal/g)
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// Fat energy density (kcal/g)
    pub const KCAL_PER_G_FAT: f64 = 9.0;
    /// Mechanical work to metabolic energy: watts x hours x 3.6 gives kJ, read as kcal
    pub const KJ_PER_WATT_HOUR: f64 = 3.6;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Primary service name
    pub const FUELGAUGE: &str = "fuelgauge";
}
