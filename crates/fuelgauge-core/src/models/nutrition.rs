// ABOUTME: Nutrition records supplied by the food-logging collaborator
// ABOUTME: DailyNutritionRecord and LoggedMealRecord with loosely-timed meal entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fueling::SerializedFuelingPlan;
use crate::constants::energy::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One meal as logged by the athlete
///
/// Timing arrives in one of three shapes: an explicit instant, a bare
/// `"HH:mm"` string that must be anchored to the record's day, or only a
/// meal-slot name matching the athlete's meal pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedMealRecord {
    /// Collaborator identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Free-text food or meal name
    pub name: String,
    /// Meal-pattern slot this entry belongs to ("Breakfast", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_slot: Option<String>,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Energy (kcal); estimated from macros when zero
    pub kcal: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fluid (mL)
    pub fluid_ml: f64,
    /// Explicit log instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,
    /// Bare local clock time (`"HH:mm"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    /// Explicit absorption profile id, overriding the food-name classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absorption_profile: Option<String>,
}

impl LoggedMealRecord {
    /// Meal with carbs and kcal logged at an explicit instant
    #[must_use]
    pub fn at(name: impl Into<String>, logged_at: DateTime<Utc>, carbs_g: f64, kcal: f64) -> Self {
        Self {
            name: name.into(),
            carbs_g,
            kcal,
            logged_at: Some(logged_at),
            ..Self::default()
        }
    }

    /// Energy, falling back to an Atwater estimate when kcal was not logged
    #[must_use]
    pub fn effective_kcal(&self) -> f64 {
        if self.kcal > 0.0 {
            self.kcal
        } else {
            self.fat_g.mul_add(
                KCAL_PER_G_FAT,
                self.carbs_g
                    .mul_add(KCAL_PER_G_CARB, self.protein_g * KCAL_PER_G_PROTEIN),
            )
        }
    }

    /// Whether the entry carries a drink
    #[must_use]
    pub fn has_fluid(&self) -> bool {
        self.fluid_ml > 0.0
    }
}

/// Everything logged for one athlete on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionRecord {
    /// Local calendar date
    pub date: NaiveDate,
    /// Logged meals in any order
    #[serde(default)]
    pub meals: Vec<LoggedMealRecord>,
    /// Carbohydrate goal mirrored from the stored fueling plan (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carb_goal_g: Option<f64>,
    /// Stored fueling plan for the day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fueling_plan: Option<SerializedFuelingPlan>,
}

impl DailyNutritionRecord {
    /// Empty record for a date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            carb_goal_g: None,
            fueling_plan: None,
        }
    }

    /// Builder-style meal append
    #[must_use]
    pub fn with_meal(mut self, meal: LoggedMealRecord) -> Self {
        self.meals.push(meal);
        self
    }
}
