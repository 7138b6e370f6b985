// ABOUTME: Aggregates per-workout fueling plans into one plan for a calendar day
// ABOUTME: Max carbs and fuel state, incremental fluid/sodium, merged windows, deduplicated notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{BaselineConfig, FuelingEngineConfig};
use crate::fueling_strategy::{FuelingStrategyCalculator, WorkoutContext};
use crate::window_merger::merge_windows;
use chrono::NaiveDate;
use fuelgauge_core::models::{
    AthleteProfile, DailyTotals, FuelState, SerializedFuelingPlan, WorkoutRecord,
};

/// Builds the stored fueling plan for a day
#[derive(Debug, Clone)]
pub struct DailyPlanAggregator {
    calculator: FuelingStrategyCalculator,
    baseline: BaselineConfig,
    default_intensity: f64,
}

impl DailyPlanAggregator {
    /// Create an aggregator from the engine configuration
    #[must_use]
    pub fn new(config: &FuelingEngineConfig) -> Self {
        Self {
            calculator: FuelingStrategyCalculator::new(config),
            baseline: config.strategy.baseline.clone(),
            default_intensity: config.defaults.intensity,
        }
    }

    /// Strategy contexts for a day; a virtual rest context when nothing is scheduled
    #[must_use]
    pub fn contexts(
        &self,
        profile: &AthleteProfile,
        workouts: &[WorkoutRecord],
        date: NaiveDate,
    ) -> Vec<WorkoutContext> {
        let contexts: Vec<WorkoutContext> = workouts
            .iter()
            .filter(|workout| !workout.is_rest())
            .map(|workout| {
                WorkoutContext::from_workout(workout, profile, self.default_intensity, Some(date))
            })
            .collect();
        if contexts.is_empty() {
            vec![WorkoutContext::rest(Some(date))]
        } else {
            contexts
        }
    }

    /// One plan covering every workout on `date`
    #[must_use]
    pub fn aggregate(
        &self,
        profile: &AthleteProfile,
        workouts: &[WorkoutRecord],
        date: NaiveDate,
    ) -> SerializedFuelingPlan {
        let profile = profile.sanitized();
        let contexts = self.contexts(&profile, workouts, date);

        let mut fuel_state = FuelState::Eco;
        let mut totals = DailyTotals {
            fluid_ml: self.baseline.fluid_ml,
            sodium_mg: self.baseline.sodium_mg,
            ..DailyTotals::default()
        };
        let mut windows = Vec::new();
        let mut notes: Vec<String> = Vec::new();

        for context in &contexts {
            let plan = self.calculator.calculate(&profile, context);
            fuel_state = fuel_state.max(plan.fuel_state);
            totals.carbs_g = totals.carbs_g.max(plan.daily_totals.carbs_g);
            totals.protein_g = totals.protein_g.max(plan.daily_totals.protein_g);
            totals.fat_g = totals.fat_g.max(plan.daily_totals.fat_g);
            totals.fluid_ml += (plan.daily_totals.fluid_ml - self.baseline.fluid_ml).max(0.0);
            totals.sodium_mg += (plan.daily_totals.sodium_mg - self.baseline.sodium_mg).max(0.0);
            windows.extend(plan.windows);
            for note in plan.notes {
                if !notes.contains(&note) {
                    notes.push(note);
                }
            }
        }

        let calorie_breakdown = self.calculator.calorie_breakdown(&profile, &contexts);
        totals.calories = calorie_breakdown.total_calories;

        let mut plan = SerializedFuelingPlan::new(fuel_state, totals);
        plan.date = Some(date);
        plan.windows = merge_windows(windows);
        plan.calorie_breakdown = calorie_breakdown;
        plan.notes = notes;
        plan
    }
}
