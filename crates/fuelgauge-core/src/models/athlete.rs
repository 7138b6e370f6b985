// ABOUTME: Athlete settings consumed by the fueling engine
// ABOUTME: AthleteProfile, fuel-state bands, activity level, and meal-pattern slots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{defaults, limits};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Intensity-derived fueling tier determining daily carbohydrate targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelState {
    /// Low-intensity day (state 1)
    Eco,
    /// Moderate training day (state 2)
    Steady,
    /// Hard or long training day (state 3)
    Performance,
}

impl FuelState {
    /// Numeric tier (1-3)
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Eco => 1,
            Self::Steady => 2,
            Self::Performance => 3,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eco => "Eco",
            Self::Steady => "Steady",
            Self::Performance => "Performance",
        }
    }
}

/// Trigger intensity and daily carbohydrate range for one fuel state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelStateBand {
    /// Intensity (fraction of FTP) at or above which this state applies
    pub trigger: f64,
    /// Lower bound of the daily carbohydrate range (g/kg)
    pub min_carbs_g_per_kg: f64,
    /// Upper bound of the daily carbohydrate range (g/kg)
    pub max_carbs_g_per_kg: f64,
}

impl FuelStateBand {
    /// Midpoint of the carbohydrate range (g/kg)
    #[must_use]
    pub fn midpoint_g_per_kg(&self) -> f64 {
        f64::midpoint(self.min_carbs_g_per_kg, self.max_carbs_g_per_kg)
    }
}

/// Trigger/min/max triples for the three fuel states
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelStateThresholds {
    /// State 1 band; its trigger is informational
    pub eco: FuelStateBand,
    /// State 2 band
    pub steady: FuelStateBand,
    /// State 3 band
    pub performance: FuelStateBand,
}

impl Default for FuelStateThresholds {
    fn default() -> Self {
        Self {
            eco: FuelStateBand {
                trigger: 0.0,
                min_carbs_g_per_kg: 3.0,
                max_carbs_g_per_kg: 5.0,
            },
            steady: FuelStateBand {
                trigger: 0.6,
                min_carbs_g_per_kg: 5.0,
                max_carbs_g_per_kg: 7.0,
            },
            performance: FuelStateBand {
                trigger: 0.85,
                min_carbs_g_per_kg: 7.0,
                max_carbs_g_per_kg: 10.0,
            },
        }
    }
}

impl FuelStateThresholds {
    /// Classify an intensity against the Steady and Performance triggers
    #[must_use]
    pub fn classify(&self, intensity: f64) -> FuelState {
        if intensity >= self.performance.trigger {
            FuelState::Performance
        } else if intensity >= self.steady.trigger {
            FuelState::Steady
        } else {
            FuelState::Eco
        }
    }

    /// Band for a fuel state
    #[must_use]
    pub const fn band(&self, state: FuelState) -> &FuelStateBand {
        match state {
            FuelState::Eco => &self.eco,
            FuelState::Steady => &self.steady,
            FuelState::Performance => &self.performance,
        }
    }
}

/// Lifestyle activity level used for the base calorie multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Hard daily training or physical job
    ExtraActive,
    /// Multiple sessions per day
    Elite,
}

/// Named time slot in the athlete's habitual eating pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlot {
    /// Slot name ("Breakfast", "Lunch", ...)
    pub name: String,
    /// Local wall-clock time
    pub time: NaiveTime,
}

impl MealSlot {
    /// Create a slot from a name and hour/minute
    #[must_use]
    pub fn new(name: impl Into<String>, hour: u32, minute: u32) -> Self {
        Self {
            name: name.into(),
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Breakfast / Lunch / Dinner pattern used when the athlete has none
    #[must_use]
    pub fn default_pattern() -> Vec<Self> {
        vec![
            Self::new("Breakfast", 8, 0),
            Self::new("Lunch", 12, 30),
            Self::new("Dinner", 19, 0),
        ]
    }
}

/// Athlete settings supplied by the settings collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AthleteProfile {
    /// Athlete identifier
    pub athlete_id: Uuid,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Functional threshold power (W)
    pub ftp_watts: f64,
    /// Basal metabolic rate (kcal/day)
    pub bmr_kcal: f64,
    /// Measured sweat rate (L/h); estimated when absent
    pub sweat_rate_l_per_hour: Option<f64>,
    /// Sweat sodium replacement target (mg/L)
    pub sodium_mg_per_l: f64,
    /// Fuel-state trigger/min/max triples
    pub fuel_states: FuelStateThresholds,
    /// Habitual meal times
    pub meal_pattern: Vec<MealSlot>,
    /// Scalar applied to carbohydrate targets
    pub carb_sensitivity: f64,
    /// Percentage adjustment applied to daily carbohydrate and calorie targets
    pub adjustment_percent: f64,
    /// Intra-workout carbohydrate cap (g/h)
    pub max_carbs_per_hour: f64,
    /// Pre-workout window length (minutes)
    pub pre_workout_window_min: i64,
    /// Post-workout window length (minutes)
    pub post_workout_window_min: i64,
    /// Lifestyle activity level
    pub activity_level: ActivityLevel,
    /// Explicit daily carbohydrate goal (g)
    pub daily_carb_goal_g: Option<f64>,
}

impl Default for AthleteProfile {
    fn default() -> Self {
        Self {
            athlete_id: Uuid::nil(),
            weight_kg: defaults::WEIGHT_KG,
            ftp_watts: defaults::FTP_WATTS,
            bmr_kcal: defaults::BMR_KCAL,
            sweat_rate_l_per_hour: None,
            sodium_mg_per_l: defaults::SODIUM_MG_PER_L,
            fuel_states: FuelStateThresholds::default(),
            meal_pattern: MealSlot::default_pattern(),
            carb_sensitivity: 1.0,
            adjustment_percent: 0.0,
            max_carbs_per_hour: defaults::MAX_CARBS_PER_HOUR,
            pre_workout_window_min: defaults::PRE_WORKOUT_WINDOW_MIN,
            post_workout_window_min: defaults::POST_WORKOUT_WINDOW_MIN,
            activity_level: ActivityLevel::default(),
            daily_carb_goal_g: None,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn window_or(minutes: i64, fallback: i64) -> i64 {
    if minutes > 0 {
        minutes.min(limits::MAX_FUELING_WINDOW_MIN)
    } else {
        fallback
    }
}

impl AthleteProfile {
    /// Copy of the profile with missing or invalid values replaced by fallbacks
    ///
    /// Settings come from user input, so the engine never trusts them directly.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut profile = self.clone();
        profile.weight_kg = positive_or(self.weight_kg, defaults::WEIGHT_KG);
        profile.ftp_watts = positive_or(self.ftp_watts, defaults::FTP_WATTS);
        profile.bmr_kcal = positive_or(self.bmr_kcal, defaults::BMR_KCAL);
        profile.sweat_rate_l_per_hour = self
            .sweat_rate_l_per_hour
            .filter(|rate| rate.is_finite() && *rate > 0.0);
        profile.sodium_mg_per_l = positive_or(self.sodium_mg_per_l, defaults::SODIUM_MG_PER_L);
        profile.carb_sensitivity = positive_or(self.carb_sensitivity, 1.0);
        if !self.adjustment_percent.is_finite() {
            profile.adjustment_percent = 0.0;
        }
        profile.max_carbs_per_hour =
            positive_or(self.max_carbs_per_hour, defaults::MAX_CARBS_PER_HOUR);
        profile.pre_workout_window_min =
            window_or(self.pre_workout_window_min, defaults::PRE_WORKOUT_WINDOW_MIN);
        profile.post_workout_window_min =
            window_or(self.post_workout_window_min, defaults::POST_WORKOUT_WINDOW_MIN);
        if self.meal_pattern.is_empty() {
            profile.meal_pattern = MealSlot::default_pattern();
        }
        profile.daily_carb_goal_g = self
            .daily_carb_goal_g
            .filter(|goal| goal.is_finite() && *goal > 0.0);
        profile
    }

    /// Multiplier combining carb sensitivity and the adjustment percentage
    #[must_use]
    pub fn carb_scale(&self) -> f64 {
        self.carb_sensitivity * (1.0 + self.adjustment_percent / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_midpoint_stays_finite_at_extremes() {
        let band = FuelStateBand {
            trigger: 0.7,
            min_carbs_g_per_kg: 5.0,
            max_carbs_g_per_kg: 7.0,
        };
        assert!((band.midpoint_g_per_kg() - 6.0).abs() < f64::EPSILON);

        let wide = FuelStateBand {
            trigger: 0.7,
            min_carbs_g_per_kg: f64::MAX,
            max_carbs_g_per_kg: f64::MAX,
        };
        assert!(wide.midpoint_g_per_kg().is_finite());
    }

    #[test]
    fn test_window_settings_fall_back_or_clamp() {
        assert_eq!(window_or(0, 90), 90);
        assert_eq!(window_or(-15, 90), 90);
        assert_eq!(window_or(45, 90), 45);
        assert_eq!(window_or(i64::MAX, 90), limits::MAX_FUELING_WINDOW_MIN);
    }
}
