// ABOUTME: Energy timeline simulation configuration
// ABOUTME: Step grid, drain rates, deficit-aware boost and synthetic candidate rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fuelgauge_core::time::DAY_MINUTES;
use serde::{Deserialize, Serialize};

/// What happens to synthetic candidates whose time has already passed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PastWindowPolicy {
    /// Past candidates are dropped; only logged meals count
    #[default]
    StrictActuals,
    /// Past candidates are kept as partial-weight probable meals
    Probable {
        /// Fraction of the candidate's carbohydrate kept (0-1]
        weight: f64,
    },
}

/// Per-step simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid spacing (minutes); must divide a day evenly
    pub step_minutes: i64,
    /// Tank capacity per kg body weight (g/kg)
    pub tank_capacity_g_per_kg: f64,
    /// Share of BMR energy drawn from carbohydrate
    pub bmr_carb_fraction: f64,
    /// Insensible fluid loss (mL/h)
    pub insensible_fluid_loss_ml_per_hour: f64,
    /// Scaling applied to workout carb/kcal drains
    pub workout_drain_multiplier: f64,
    /// Anti-spike clamp on absorbed carbohydrate per step (g)
    pub max_absorption_per_step_g: f64,
    /// Passive rehydration while awake (mL/h)
    pub passive_rehydration_ml_per_hour: f64,
    /// First local hour of passive rehydration
    pub rehydration_start_hour: u32,
    /// Local hour at which passive rehydration stops
    pub rehydration_end_hour: u32,
    /// Fluid deficit forgiven on days without workouts (mL/h)
    pub rest_day_fluid_decay_ml_per_hour: f64,
    /// Emit one trace event per simulated step
    pub trace_steps: bool,
    /// Treatment of synthetic candidates that are already in the past
    pub past_window_policy: PastWindowPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_minutes: 15,
            tank_capacity_g_per_kg: 8.0,
            bmr_carb_fraction: 0.4,
            insensible_fluid_loss_ml_per_hour: 25.0,
            workout_drain_multiplier: 1.25,
            max_absorption_per_step_g: 22.5,
            passive_rehydration_ml_per_hour: 200.0,
            rehydration_start_hour: 7,
            rehydration_end_hour: 21,
            rest_day_fluid_decay_ml_per_hour: 100.0,
            trace_steps: false,
            past_window_policy: PastWindowPolicy::StrictActuals,
        }
    }
}

impl SimulationConfig {
    /// Number of steps in one day
    #[must_use]
    pub fn steps_per_day(&self) -> usize {
        (DAY_MINUTES / self.step_minutes.max(1)) as usize
    }

    /// Step length in hours
    #[must_use]
    pub fn step_hours(&self) -> f64 {
        self.step_minutes as f64 / 60.0
    }
}

/// Deficit-aware boost applied to the first synthetic meal of the day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Starting tank level below which the critical refill applies (%)
    pub critical_threshold_pct: f64,
    /// Level the critical refill aims for (%)
    pub critical_target_pct: f64,
    /// Starting tank level below which the recovery bonus applies (%)
    pub recovery_threshold_pct: f64,
    /// Recovery bonus cap as a fraction of the effective carb goal
    pub recovery_goal_cap_fraction: f64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            critical_threshold_pct: 40.0,
            critical_target_pct: 80.0,
            recovery_threshold_pct: 85.0,
            recovery_goal_cap_fraction: 0.6,
        }
    }
}

/// Rules for turning plan windows into synthetic meal candidates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// A candidate within this many minutes of a logged meal is skipped
    pub logged_overlap_min: f64,
    /// A DAILY_BASE candidate within this many minutes of a workout window is skipped
    pub base_overlap_min: f64,
    /// Daily carbohydrate split across meal slots when no window carries carbs (g/kg)
    pub fallback_daily_carbs_g_per_kg: f64,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            logged_overlap_min: 60.0,
            base_overlap_min: 60.0,
            fallback_daily_carbs_g_per_kg: 4.0,
        }
    }
}
