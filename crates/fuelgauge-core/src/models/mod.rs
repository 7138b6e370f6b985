// ABOUTME: Domain models shared by the fueling engine and its collaborators
// ABOUTME: Re-exports athlete, nutrition, workout, fueling plan, and metabolic state types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Athlete settings and fuel-state bands
pub mod athlete;
/// Prescriptive fueling windows and plans
pub mod fueling;
/// Per-day chained metabolic state
pub mod metabolic;
/// Logged nutrition records
pub mod nutrition;
/// Completed and planned workouts
pub mod workout;

pub use athlete::{
    ActivityLevel, AthleteProfile, FuelState, FuelStateBand, FuelStateThresholds, MealSlot,
};
pub use fueling::{
    CalorieBreakdown, DailyTotals, FuelingWindow, SerializedFuelingPlan, StrategyOverride,
    WindowStatus, WindowType, FUELING_PLAN_SCHEMA_VERSION,
};
pub use metabolic::{MetabolicDayState, TankState};
pub use nutrition::{DailyNutritionRecord, LoggedMealRecord};
pub use workout::{
    merge_workouts, CompletedWorkout, PlannedWorkout, WorkoutEnvironment, WorkoutRecord,
    REST_WORKOUT_TYPE,
};
