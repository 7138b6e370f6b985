// ABOUTME: Point-in-time glycogen readiness from logged intake, baseline burn, and training
// ABOUTME: Integrates absorption up to an instant and maps the level to Ready/Moderate/Critical
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::absorption::absorbed_in_interval;
use crate::config::{FuelingEngineConfig, StatusConfig};
use crate::energy_timeline::SimulationInput;
use crate::meal_events::{carry_over_meals, resolve_logged_meals, MealEvent};
use crate::workout_events::{WorkoutDrainCalculator, WorkoutEvent};
use chrono::{DateTime, Duration, Utc};
use fuelgauge_core::constants::energy::KCAL_PER_G_CARB;
use fuelgauge_core::time::DAY_MINUTES;
use serde::Serialize;
use tracing::debug;

/// Readiness band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlycogenStatus {
    /// Above the ready threshold
    Ready,
    /// Between the thresholds
    Moderate,
    /// Below the critical threshold
    Critical,
}

/// Components of a status calculation (g)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusBreakdown {
    /// Glycogen at local midnight
    pub starting_g: f64,
    /// Carbohydrate absorbed from logged meals so far
    pub absorbed_g: f64,
    /// Baseline burn so far
    pub bmr_drain_g: f64,
    /// Training burn so far
    pub workout_drain_g: f64,
    /// Tank capacity
    pub capacity_g: f64,
}

/// Glycogen readiness at an instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlycogenResult {
    /// Tank level (%)
    pub percentage: f64,
    /// Readiness band
    pub status: GlycogenStatus,
    /// Advice matching the band
    pub advice: String,
    /// How the level was reached
    pub breakdown: StatusBreakdown,
}

/// Summarizes glycogen readiness from actuals only
#[derive(Debug, Clone)]
pub struct GlycogenStatusSummarizer {
    status: StatusConfig,
    tank_capacity_g_per_kg: f64,
    bmr_carb_fraction: f64,
    drains: WorkoutDrainCalculator,
}

impl Default for GlycogenStatusSummarizer {
    fn default() -> Self {
        Self::new(&FuelingEngineConfig::default())
    }
}

impl GlycogenStatusSummarizer {
    /// Create a summarizer from the engine configuration
    #[must_use]
    pub fn new(config: &FuelingEngineConfig) -> Self {
        Self {
            status: config.status.clone(),
            tank_capacity_g_per_kg: config.simulation.tank_capacity_g_per_kg,
            bmr_carb_fraction: config.simulation.bmr_carb_fraction,
            drains: WorkoutDrainCalculator::new(config),
        }
    }

    /// Band for a tank level
    #[must_use]
    pub fn classify(&self, percentage: f64) -> GlycogenStatus {
        if percentage > self.status.ready_threshold_pct {
            GlycogenStatus::Ready
        } else if percentage < self.status.critical_threshold_pct {
            GlycogenStatus::Critical
        } else {
            GlycogenStatus::Moderate
        }
    }

    fn advice(&self, status: GlycogenStatus) -> &str {
        match status {
            GlycogenStatus::Ready => &self.status.ready_advice,
            GlycogenStatus::Moderate => &self.status.moderate_advice,
            GlycogenStatus::Critical => &self.status.critical_advice,
        }
    }

    /// Readiness at `as_of`, clamped to the simulated day
    ///
    /// Only logged meals count: synthetic intake and ghost meals are ignored.
    /// Completed workouts count in full once started; planned workouts count
    /// by the share of their duration elapsed.
    #[must_use]
    pub fn summarize(&self, input: &SimulationInput<'_>, as_of: DateTime<Utc>) -> GlycogenResult {
        let profile = input.profile.sanitized();
        let capacity_g = profile.weight_kg * self.tank_capacity_g_per_kg;
        let elapsed_min = input
            .day
            .minutes_since_start(as_of)
            .clamp(0.0, DAY_MINUTES as f64);
        let as_of = input.day.start_utc + Duration::seconds((elapsed_min * 60.0) as i64);

        let mut meals = carry_over_meals(input.previous_record, &input.day, &profile);
        meals.extend(resolve_logged_meals(input.record, &input.day, &profile));

        let starting_g = input.start.glycogen_pct / 100.0 * capacity_g;
        let absorbed_g = self.absorbed_until(input, &meals, elapsed_min);
        let bmr_drain_g = profile.bmr_kcal * self.bmr_carb_fraction / KCAL_PER_G_CARB
            / DAY_MINUTES as f64
            * elapsed_min;
        let workout_drain_g: f64 = self
            .drains
            .build_events(input.workouts, &profile)
            .iter()
            .map(|event| Self::workout_drain(event, as_of))
            .sum();

        let level_g = starting_g + absorbed_g - bmr_drain_g - workout_drain_g;
        let percentage = if capacity_g > 0.0 {
            (level_g / capacity_g * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let status = self.classify(percentage);

        debug!(
            date = %input.day.date,
            percentage,
            ?status,
            absorbed_g,
            workout_drain_g,
            "Summarized glycogen status"
        );

        GlycogenResult {
            percentage,
            status,
            advice: self.advice(status).to_owned(),
            breakdown: StatusBreakdown {
                starting_g,
                absorbed_g,
                bmr_drain_g,
                workout_drain_g,
                capacity_g,
            },
        }
    }

    fn absorbed_until(
        &self,
        input: &SimulationInput<'_>,
        meals: &[MealEvent],
        elapsed_min: f64,
    ) -> f64 {
        let step = self.status.integration_step_min.max(1.0);
        let mut absorbed = 0.0;
        let mut cursor = 0.0;
        while cursor < elapsed_min {
            let next = (cursor + step).min(elapsed_min);
            for meal in meals {
                let offset = input.day.minutes_since_start(meal.time);
                absorbed += absorbed_in_interval(
                    cursor - offset,
                    next - offset,
                    meal.carbs_g,
                    &meal.profile,
                );
            }
            cursor = next;
        }
        absorbed
    }

    fn workout_drain(event: &WorkoutEvent, as_of: DateTime<Utc>) -> f64 {
        if event.completed {
            if event.start <= as_of {
                event.total_carb_drain_g()
            } else {
                0.0
            }
        } else {
            event.total_carb_drain_g() * event.elapsed_fraction(as_of)
        }
    }
}
