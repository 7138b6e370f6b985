// ABOUTME: Repository traits for day states, fueling plans, and per-day simulation inputs
// ABOUTME: Async seams consumed by the state chain and the fueling service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Storage Interfaces
//!
//! The engine is pure; everything it reads or writes across days flows through
//! these traits. Upserts are last-writer-wins and errors propagate as
//! `DatabaseError`.

/// In-memory store backed by `DashMap`
pub mod memory;

pub use memory::InMemoryStore;

use crate::errors::DatabaseError;
use crate::models::{
    AthleteProfile, DailyNutritionRecord, MetabolicDayState, SerializedFuelingPlan, WorkoutRecord,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Everything the simulator needs about one athlete-day
#[derive(Debug, Clone, Default)]
pub struct DayInputs {
    /// Athlete settings
    pub profile: AthleteProfile,
    /// The day's nutrition record
    pub record: Option<DailyNutritionRecord>,
    /// The previous day's nutrition record
    pub previous_record: Option<DailyNutritionRecord>,
    /// Completed and planned workouts, already merged
    pub workouts: Vec<WorkoutRecord>,
}

/// Persistence of per-day metabolic start/end states
#[async_trait]
pub trait MetabolicStateRepository: Send + Sync {
    /// State for an athlete-day, if one has been stored
    async fn get_day_state(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<MetabolicDayState>, DatabaseError>;

    /// Insert or replace the state for `state.date`
    async fn upsert_day_state(
        &self,
        athlete_id: Uuid,
        state: &MetabolicDayState,
    ) -> Result<(), DatabaseError>;
}

/// Source of per-day simulation inputs
#[async_trait]
pub trait DayInputProvider: Send + Sync {
    /// Profile, nutrition records, and workouts for an athlete-day
    async fn day_inputs(&self, athlete_id: Uuid, date: NaiveDate)
        -> Result<DayInputs, DatabaseError>;
}

/// Persistence of generated fueling plans
#[async_trait]
pub trait FuelingPlanRepository: Send + Sync {
    /// Store a day's plan and mirror its carbohydrate total onto the day's goal
    async fn save_fueling_plan(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        plan: &SerializedFuelingPlan,
    ) -> Result<(), DatabaseError>;

    /// Stored plan for an athlete-day
    async fn get_fueling_plan(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<SerializedFuelingPlan>, DatabaseError>;
}
