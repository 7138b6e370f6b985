// ABOUTME: Converts workout records into per-interval carbohydrate, energy, and fluid drains
// ABOUTME: Energy from recorded work or FTP × intensity, carb share rising with intensity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::FuelingEngineConfig;
use crate::sweat_rate::SweatRateEstimator;
use chrono::{DateTime, Utc};
use fuelgauge_core::constants::energy::{KCAL_PER_G_CARB, KJ_PER_WATT_HOUR};
use fuelgauge_core::models::{AthleteProfile, WorkoutRecord};
use serde::Serialize;
use tracing::debug;

/// A workout placed on the simulation grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutEvent {
    /// Source workout identifier
    pub workout_id: String,
    /// Start instant
    pub start: DateTime<Utc>,
    /// End instant
    pub end: DateTime<Utc>,
    /// Intensity (fraction of FTP)
    pub intensity: f64,
    /// Duration (minutes)
    pub duration_min: f64,
    /// Carbohydrate burned per simulation step (g)
    pub per_interval_carb_drain_g: f64,
    /// Energy burned per simulation step (kcal)
    pub per_interval_kcal_drain: f64,
    /// Sweat lost per simulation step (mL)
    pub per_interval_fluid_drain_ml: f64,
    /// Number of simulation steps the workout spans
    pub intervals: u32,
    /// Display title
    pub title: String,
    /// Whether the workout was recorded rather than planned
    pub completed: bool,
}

impl WorkoutEvent {
    /// Whether a step starting at `instant` falls inside the workout
    #[must_use]
    pub fn is_active_at(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Carbohydrate burned over the whole workout, without inefficiency scaling (g)
    #[must_use]
    pub fn total_carb_drain_g(&self) -> f64 {
        self.per_interval_carb_drain_g * f64::from(self.intervals)
    }

    /// Share of the workout elapsed at `instant` (0-1)
    #[must_use]
    pub fn elapsed_fraction(&self, instant: DateTime<Utc>) -> f64 {
        let total = (self.end - self.start).num_seconds();
        if total <= 0 {
            return if instant >= self.end { 1.0 } else { 0.0 };
        }
        let elapsed = (instant - self.start).num_seconds().clamp(0, total);
        elapsed as f64 / total as f64
    }
}

/// Share of workout energy drawn from carbohydrate at an intensity
#[must_use]
pub fn carb_fraction(intensity: f64) -> f64 {
    intensity.mul_add(1.1, -0.15).clamp(0.2, 1.0)
}

/// Builds workout events for the simulation grid
#[derive(Debug, Clone)]
pub struct WorkoutDrainCalculator {
    step_minutes: i64,
    default_intensity: f64,
    fallback_sweat_rate: f64,
    sweat: SweatRateEstimator,
}

impl WorkoutDrainCalculator {
    /// Create a calculator from the engine configuration
    #[must_use]
    pub fn new(config: &FuelingEngineConfig) -> Self {
        Self {
            step_minutes: config.simulation.step_minutes.max(1),
            default_intensity: config.defaults.intensity,
            fallback_sweat_rate: config.defaults.sweat_rate_l_per_hour,
            sweat: SweatRateEstimator::new(config.strategy.sweat.clone()),
        }
    }

    /// Events for every non-rest workout with a known start
    #[must_use]
    pub fn build_events(
        &self,
        workouts: &[WorkoutRecord],
        profile: &AthleteProfile,
    ) -> Vec<WorkoutEvent> {
        workouts
            .iter()
            .filter(|workout| !workout.is_rest())
            .filter_map(|workout| {
                let event = self.build_event(workout, profile);
                if event.is_none() {
                    debug!(workout_id = workout.id(), "Workout has no start time; not simulated");
                }
                event
            })
            .collect()
    }

    fn build_event(
        &self,
        workout: &WorkoutRecord,
        profile: &AthleteProfile,
    ) -> Option<WorkoutEvent> {
        let start = workout.start()?;
        let end = workout.end()?;
        let duration_min = workout.duration_min();
        let hours = duration_min / 60.0;
        let intensity = workout.intensity(profile.ftp_watts, self.default_intensity);

        let total_kcal = match workout {
            WorkoutRecord::Completed(completed) => completed
                .kilojoules
                .or(completed.calories)
                .filter(|energy| energy.is_finite() && *energy > 0.0),
            WorkoutRecord::Planned(_) => None,
        }
        .unwrap_or(profile.ftp_watts * intensity * hours * KJ_PER_WATT_HOUR);

        let total_carbs = total_kcal * carb_fraction(intensity) / KCAL_PER_G_CARB;
        let intervals = ((duration_min / self.step_minutes as f64).ceil() as u32).max(1);
        let sweat_l_per_hour = self.sweat.for_workout(
            profile,
            workout.environment(),
            intensity,
            self.fallback_sweat_rate,
        );
        let step_hours = self.step_minutes as f64 / 60.0;

        Some(WorkoutEvent {
            workout_id: workout.id().to_owned(),
            start,
            end,
            intensity,
            duration_min,
            per_interval_carb_drain_g: total_carbs / f64::from(intervals),
            per_interval_kcal_drain: total_kcal / f64::from(intervals),
            per_interval_fluid_drain_ml: sweat_l_per_hour * 1000.0 * step_hours,
            intervals,
            title: workout.title().to_owned(),
            completed: workout.is_completed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carb_fraction_is_clamped() {
        assert!((carb_fraction(0.0) - 0.2).abs() < 1e-9);
        assert!((carb_fraction(0.95) - 0.895).abs() < 1e-9);
        assert!((carb_fraction(1.2) - 1.0).abs() < 1e-9);
    }
}
