// ABOUTME: Synthesizes expected meals from fueling windows when intake has not been logged
// ABOUTME: Primary-workout plan windows, meal-pattern baseline split and event conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::absorption::AbsorptionProfile;
use crate::config::FuelingEngineConfig;
use crate::fueling_strategy::{FuelingStrategyCalculator, WorkoutContext};
use crate::meal_events::{MealEvent, MealKind};
use chrono::{DateTime, Utc};
use fuelgauge_core::constants::energy::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use fuelgauge_core::models::{
    AthleteProfile, FuelingWindow, SerializedFuelingPlan, WindowType, WorkoutRecord,
};
use fuelgauge_core::time::LocalDay;
use serde::Serialize;

/// An expected intake derived from a plan window or the meal pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealCandidate {
    /// Expected ingestion instant
    pub time: DateTime<Utc>,
    /// Carbohydrate (g)
    pub carbs_g: f64,
    /// Energy (kcal)
    pub kcal: f64,
    /// Fluid (mL)
    pub fluid_ml: f64,
    /// Window the candidate was derived from
    pub window_type: WindowType,
    /// Absorption curve
    pub profile: AbsorptionProfile,
    /// Display label
    pub label: String,
}

impl MealCandidate {
    fn from_window(window: &FuelingWindow) -> Self {
        let profile = if window.window_type == WindowType::IntraWorkout {
            AbsorptionProfile::rapid()
        } else {
            AbsorptionProfile::balanced()
        };
        let kcal = window.target_fat.mul_add(
            KCAL_PER_G_FAT,
            window
                .target_carbs
                .mul_add(KCAL_PER_G_CARB, window.target_protein * KCAL_PER_G_PROTEIN),
        );
        let label = window.workout_title.as_deref().map_or_else(
            || window.window_type.label().to_owned(),
            |title| format!("{} ({title})", window.window_type.label()),
        );
        Self {
            time: window.start,
            carbs_g: window.target_carbs,
            kcal,
            fluid_ml: window.target_fluid,
            window_type: window.window_type,
            profile,
            label,
        }
    }

    /// Convert into a simulator meal of the given kind
    ///
    /// Probable meals keep only `weight` of the candidate's nutrients.
    #[must_use]
    pub fn into_meal_event(self, kind: MealKind) -> MealEvent {
        let weight = match kind {
            MealKind::Probable { weight } => weight.clamp(0.0, 1.0),
            MealKind::Logged | MealKind::Synthetic => 1.0,
        };
        MealEvent {
            time: self.time,
            carbs_g: self.carbs_g * weight,
            kcal: self.kcal * weight,
            fluid_ml: self.fluid_ml * weight,
            profile: self.profile,
            kind,
            label: self.label,
        }
    }
}

/// Candidates for every plan window carrying carbohydrate
#[must_use]
pub fn candidates_from_plan(plan: &SerializedFuelingPlan) -> Vec<MealCandidate> {
    plan.windows
        .iter()
        .filter(|window| window.target_carbs > 0.0)
        .map(MealCandidate::from_window)
        .collect()
}

/// Split `total_carbs_g` evenly across the athlete's meal-pattern slots
#[must_use]
pub fn meal_pattern_candidates(
    profile: &AthleteProfile,
    day: &LocalDay,
    total_carbs_g: f64,
) -> Vec<MealCandidate> {
    let slots = &profile.meal_pattern;
    if slots.is_empty() || total_carbs_g <= 0.0 {
        return Vec::new();
    }
    let per_slot = total_carbs_g / slots.len() as f64;
    slots
        .iter()
        .map(|slot| MealCandidate {
            time: day.at_local_time(slot.time),
            carbs_g: per_slot,
            kcal: per_slot * KCAL_PER_G_CARB,
            fluid_ml: 0.0,
            window_type: WindowType::DailyBase,
            profile: AbsorptionProfile::balanced(),
            label: slot.name.clone(),
        })
        .collect()
}

/// The day's primary workout: the longest non-rest session
#[must_use]
pub fn primary_workout(workouts: &[WorkoutRecord]) -> Option<&WorkoutRecord> {
    workouts
        .iter()
        .filter(|workout| !workout.is_rest())
        .max_by(|a, b| a.duration_min().total_cmp(&b.duration_min()))
}

/// Fabricates expected intake for days without a stored plan
#[derive(Debug, Clone)]
pub struct SyntheticIntakeSynthesizer {
    calculator: FuelingStrategyCalculator,
    default_intensity: f64,
    fallback_daily_carbs_g_per_kg: f64,
}

impl SyntheticIntakeSynthesizer {
    /// Create a synthesizer from the engine configuration
    #[must_use]
    pub fn new(config: &FuelingEngineConfig) -> Self {
        Self {
            calculator: FuelingStrategyCalculator::new(config),
            default_intensity: config.defaults.intensity,
            fallback_daily_carbs_g_per_kg: config.candidates.fallback_daily_carbs_g_per_kg,
        }
    }

    /// Candidates for a day: primary-workout windows, else a meal-pattern split
    #[must_use]
    pub fn synthesize(
        &self,
        profile: &AthleteProfile,
        workouts: &[WorkoutRecord],
        day: &LocalDay,
    ) -> Vec<MealCandidate> {
        let profile = profile.sanitized();
        let context = primary_workout(workouts).map_or_else(
            || WorkoutContext::rest(Some(day.date)),
            |workout| {
                WorkoutContext::from_workout(
                    workout,
                    &profile,
                    self.default_intensity,
                    Some(day.date),
                )
            },
        );
        let plan = self.calculator.calculate(&profile, &context);

        let candidates = candidates_from_plan(&plan);
        if candidates.is_empty() {
            meal_pattern_candidates(
                &profile,
                day,
                self.fallback_daily_carbs_g_per_kg * profile.weight_kg,
            )
        } else {
            candidates
        }
    }
}
