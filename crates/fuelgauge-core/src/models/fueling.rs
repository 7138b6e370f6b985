// ABOUTME: Prescriptive fueling plan types persisted as a day's fueling plan
// ABOUTME: FuelingWindow, daily totals, calorie breakdown, and the versioned SerializedFuelingPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::athlete::FuelState;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this crate
pub const FUELING_PLAN_SCHEMA_VERSION: u32 = 1;

/// Kind of prescriptive window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowType {
    /// Fueling before a workout
    PreWorkout,
    /// Fueling during a workout
    IntraWorkout,
    /// Recovery after a workout
    PostWorkout,
    /// Baseline meal outside workout windows
    DailyBase,
    /// Result of merging windows of different types
    Transition,
    /// Workout marker without nutrient targets
    WorkoutEvent,
}

impl WindowType {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreWorkout => "Pre-workout",
            Self::IntraWorkout => "Intra-workout",
            Self::PostWorkout => "Post-workout",
            Self::DailyBase => "Daily base",
            Self::Transition => "Transition",
            Self::WorkoutEvent => "Workout",
        }
    }
}

/// Completion status of a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowStatus {
    /// Not yet reached
    #[default]
    Planned,
    /// Currently open
    Active,
    /// Targets met
    Completed,
    /// Window passed without intake
    Missed,
}

/// Coach-selected fueling strategy for a workout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyOverride {
    /// Standard periodised fueling
    #[default]
    Standard,
    /// Deliberately low-carbohydrate session
    TrainLow,
    /// Competition day with maximal intra-workout fueling
    RaceDay,
}

/// Time-bounded nutrient prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelingWindow {
    /// Window kind
    pub window_type: WindowType,
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
    /// Carbohydrates (g)
    pub target_carbs: f64,
    /// Protein (g)
    pub target_protein: f64,
    /// Fat (g)
    pub target_fat: f64,
    /// Fluid (mL)
    pub target_fluid: f64,
    /// Sodium (mg)
    pub target_sodium: f64,
    /// Completion status
    #[serde(default)]
    pub status: WindowStatus,
    /// Advice text
    #[serde(default)]
    pub description: String,
    /// Supplement hints (caffeine, electrolytes, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplements: Vec<String>,
    /// Workout this window belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_workout_id: Option<String>,
    /// Title of the linked workout(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_title: Option<String>,
}

impl FuelingWindow {
    /// Window with zero targets
    #[must_use]
    pub fn new(window_type: WindowType, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            window_type,
            start,
            end,
            target_carbs: 0.0,
            target_protein: 0.0,
            target_fat: 0.0,
            target_fluid: 0.0,
            target_sodium: 0.0,
            status: WindowStatus::Planned,
            description: String::new(),
            supplements: Vec::new(),
            linked_workout_id: None,
            workout_title: None,
        }
    }

    /// Window midpoint
    #[must_use]
    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + (self.end - self.start) / 2
    }
}

/// Whole-day nutrient targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    /// Energy (kcal)
    pub calories: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fluid (mL)
    pub fluid_ml: f64,
    /// Sodium (mg)
    pub sodium_mg: f64,
}

/// Daily energy target decomposition
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieBreakdown {
    /// BMR × activity multiplier (kcal)
    pub base_calories: f64,
    /// Mechanical work of the day's workouts (kcal)
    pub activity_calories: f64,
    /// Athlete adjustment percentage applied to base + activity (kcal)
    pub adjustment_calories: f64,
    /// Sum of the above (kcal)
    pub total_calories: f64,
}

/// Versioned fueling plan persisted for a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedFuelingPlan {
    /// Schema version of the stored JSON
    pub schema_version: u32,
    /// Calendar date the plan applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Highest fuel state across the day's workouts
    pub fuel_state: FuelState,
    /// Prescriptive windows sorted by start
    #[serde(default)]
    pub windows: Vec<FuelingWindow>,
    /// Whole-day targets
    pub daily_totals: DailyTotals,
    /// Energy target decomposition
    #[serde(default)]
    pub calorie_breakdown: CalorieBreakdown,
    /// Advisory notes
    #[serde(default)]
    pub notes: Vec<String>,
}

impl SerializedFuelingPlan {
    /// Empty plan at the current schema version
    #[must_use]
    pub const fn new(fuel_state: FuelState, daily_totals: DailyTotals) -> Self {
        Self {
            schema_version: FUELING_PLAN_SCHEMA_VERSION,
            date: None,
            fuel_state,
            windows: Vec::new(),
            daily_totals,
            calorie_breakdown: CalorieBreakdown {
                base_calories: 0.0,
                activity_calories: 0.0,
                adjustment_calories: 0.0,
                total_calories: 0.0,
            },
            notes: Vec::new(),
        }
    }

    /// Serialize to the stored JSON form
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the plan cannot be encoded
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored plan, rejecting unknown schema versions
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON is malformed or the schema
    /// version is not one this crate understands
    pub fn from_json(json: &str) -> AppResult<Self> {
        let plan: Self = serde_json::from_str(json)?;
        plan.check_version()?;
        Ok(plan)
    }

    /// Verify the schema version
    ///
    /// # Errors
    ///
    /// Returns a serialization error for any version other than the current one
    pub fn check_version(&self) -> AppResult<()> {
        if self.schema_version == FUELING_PLAN_SCHEMA_VERSION {
            Ok(())
        } else {
            let found = self.schema_version;
            Err(AppError::serialization(format!(
                "unsupported fueling plan schema version {found} \
                 (expected {FUELING_PLAN_SCHEMA_VERSION})"
            )))
        }
    }

    /// Sum of window carbohydrate targets (g)
    #[must_use]
    pub fn total_window_carbs(&self) -> f64 {
        self.windows.iter().map(|window| window.target_carbs).sum()
    }
}
