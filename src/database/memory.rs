// ABOUTME: In-memory implementation of every repository trait using sharded concurrent maps
// ABOUTME: Backs tests, benches, and single-process deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DayInputProvider, DayInputs, FuelingPlanRepository, MetabolicStateRepository};
use crate::errors::DatabaseError;
use crate::models::{
    merge_workouts, AthleteProfile, CompletedWorkout, DailyNutritionRecord, LoggedMealRecord,
    MetabolicDayState, PlannedWorkout, SerializedFuelingPlan,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

type DayKey = (Uuid, NaiveDate);

/// Store keyed by athlete and local date
///
/// Clones share the same maps. `DashMap` shards its locks, so concurrent
/// writers for different athlete-days do not contend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    profiles: Arc<DashMap<Uuid, AthleteProfile>>,
    records: Arc<DashMap<DayKey, DailyNutritionRecord>>,
    completed: Arc<DashMap<DayKey, Vec<CompletedWorkout>>>,
    planned: Arc<DashMap<DayKey, Vec<PlannedWorkout>>>,
    states: Arc<DashMap<DayKey, MetabolicDayState>>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an athlete profile
    pub fn put_profile(&self, profile: AthleteProfile) {
        self.profiles.insert(profile.athlete_id, profile);
    }

    /// Insert or replace a day's nutrition record
    pub fn put_record(&self, athlete_id: Uuid, record: DailyNutritionRecord) {
        self.records.insert((athlete_id, record.date), record);
    }

    /// Append a logged meal, creating the day's record if needed
    pub fn log_meal(&self, athlete_id: Uuid, date: NaiveDate, meal: LoggedMealRecord) {
        self.records
            .entry((athlete_id, date))
            .or_insert_with(|| DailyNutritionRecord::new(date))
            .meals
            .push(meal);
    }

    /// Record a completed workout on a local date
    pub fn add_completed_workout(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        workout: CompletedWorkout,
    ) {
        self.completed
            .entry((athlete_id, date))
            .or_default()
            .push(workout);
    }

    /// Schedule a planned workout on its own date
    pub fn add_planned_workout(&self, athlete_id: Uuid, workout: PlannedWorkout) {
        self.planned
            .entry((athlete_id, workout.date))
            .or_default()
            .push(workout);
    }

    /// Nutrition record for an athlete-day
    #[must_use]
    pub fn record(&self, athlete_id: Uuid, date: NaiveDate) -> Option<DailyNutritionRecord> {
        self.records
            .get(&(athlete_id, date))
            .map(|entry| entry.value().clone())
    }

    /// Insert or replace a day state without going through the async trait
    pub fn put_day_state(&self, athlete_id: Uuid, state: MetabolicDayState) {
        self.states.insert((athlete_id, state.date), state);
    }

    /// Stored day state without going through the async trait
    #[must_use]
    pub fn day_state(&self, athlete_id: Uuid, date: NaiveDate) -> Option<MetabolicDayState> {
        self.states.get(&(athlete_id, date)).map(|entry| *entry.value())
    }

    /// Number of stored day states
    #[must_use]
    pub fn day_state_count(&self) -> usize {
        self.states.len()
    }
}

#[async_trait]
impl MetabolicStateRepository for InMemoryStore {
    async fn get_day_state(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<MetabolicDayState>, DatabaseError> {
        Ok(self.day_state(athlete_id, date))
    }

    async fn upsert_day_state(
        &self,
        athlete_id: Uuid,
        state: &MetabolicDayState,
    ) -> Result<(), DatabaseError> {
        self.put_day_state(athlete_id, *state);
        Ok(())
    }
}

#[async_trait]
impl DayInputProvider for InMemoryStore {
    async fn day_inputs(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> Result<DayInputs, DatabaseError> {
        let profile = self
            .profiles
            .get(&athlete_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DatabaseError::NotFound {
                entity_type: "athlete_profile",
                id: athlete_id.to_string(),
            })?;

        let key = (athlete_id, date);
        let completed = self
            .completed
            .get(&key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        let planned = self
            .planned
            .get(&key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        Ok(DayInputs {
            profile,
            record: self.record(athlete_id, date),
            previous_record: date
                .pred_opt()
                .and_then(|previous| self.record(athlete_id, previous)),
            workouts: merge_workouts(completed, planned),
        })
    }
}

#[async_trait]
impl FuelingPlanRepository for InMemoryStore {
    async fn save_fueling_plan(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        plan: &SerializedFuelingPlan,
    ) -> Result<(), DatabaseError> {
        let mut record = self
            .records
            .entry((athlete_id, date))
            .or_insert_with(|| DailyNutritionRecord::new(date));
        record.carb_goal_g = Some(plan.daily_totals.carbs_g);
        record.fueling_plan = Some(plan.clone());
        drop(record);

        debug!(%athlete_id, %date, windows = plan.windows.len(), "Stored fueling plan");
        Ok(())
    }

    async fn get_fueling_plan(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<SerializedFuelingPlan>, DatabaseError> {
        Ok(self
            .records
            .get(&(athlete_id, date))
            .and_then(|entry| entry.value().fueling_plan.clone()))
    }
}
