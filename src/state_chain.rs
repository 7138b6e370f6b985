// ABOUTME: Resolves each day's starting glycogen and fluid state from the previous day's simulation
// ABOUTME: Bounded walk back to a known state, then a forward fold that persists every link
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metabolic State Chain
//!
//! Day D starts where day D-1 ended. A persisted starting state always wins.
//! Otherwise the chain walks back (at most `max_depth` days) until it finds a
//! day with a known start, then simulates forward, writing each day's ending
//! and the following day's starting state as the same value.
//!
//! When the walk hits its depth limit, the oldest day falls back to its
//! predecessor's recorded ending state, else to the configured default
//! (85 % glycogen, no fluid deficit).

use crate::database::{DayInputProvider, MetabolicStateRepository};
use crate::errors::{AppError, AppResult};
use crate::models::{MetabolicDayState, TankState};
use crate::time::LocalDayResolver;
use chrono::{DateTime, NaiveDate, Utc};
use fuelgauge_engine::config::ChainConfig;
use fuelgauge_engine::energy_timeline::{DayTimeline, EnergyTimelineSimulator, SimulationInput};
use fuelgauge_engine::meal_events::MealEvent;
use fuelgauge_engine::FuelingEngineConfig;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Starting-state resolution across consecutive days
#[derive(Clone)]
pub struct MetabolicStateChain {
    states: Arc<dyn MetabolicStateRepository>,
    inputs: Arc<dyn DayInputProvider>,
    resolver: Arc<dyn LocalDayResolver>,
    simulator: EnergyTimelineSimulator,
    config: ChainConfig,
}

impl MetabolicStateChain {
    /// Create a chain over the given collaborators
    #[must_use]
    pub fn new(
        states: Arc<dyn MetabolicStateRepository>,
        inputs: Arc<dyn DayInputProvider>,
        resolver: Arc<dyn LocalDayResolver>,
        config: &FuelingEngineConfig,
    ) -> Self {
        Self {
            states,
            inputs,
            resolver,
            simulator: EnergyTimelineSimulator::new(config),
            config: config.chain.clone(),
        }
    }

    /// The simulator the chain folds with
    #[must_use]
    pub const fn simulator(&self) -> &EnergyTimelineSimulator {
        &self.simulator
    }

    /// Starting state of `date`, persisting every link computed on the way
    ///
    /// # Errors
    ///
    /// Returns an error if a repository read or write fails
    pub async fn resolve_start(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<TankState> {
        self.resolve(athlete_id, date, now, true).await
    }

    /// Starting state of `date` computed the same way without writing anything
    ///
    /// # Errors
    ///
    /// Returns an error if a repository read fails
    pub async fn preview_start(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<TankState> {
        self.resolve(athlete_id, date, now, false).await
    }

    /// Simulate `date` and persist its ending state as the next day's start
    ///
    /// # Errors
    ///
    /// Returns an error if a repository read or write fails
    pub async fn finalize_day(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<DayTimeline> {
        let start = self.resolve_start(athlete_id, date, now).await?;
        let timeline = self.simulate_day(athlete_id, date, start, now, None).await?;

        let mut state = self.stored_or_empty(athlete_id, date).await?;
        if state.starting_state().is_none() {
            state.set_starting(start);
        }
        state.set_ending(timeline.ending_state());
        self.states.upsert_day_state(athlete_id, &state).await?;

        if let Some(next) = date.succ_opt() {
            let mut next_state = self.stored_or_empty(athlete_id, next).await?;
            next_state.set_starting(timeline.ending_state());
            self.states.upsert_day_state(athlete_id, &next_state).await?;
        }

        info!(
            %athlete_id,
            %date,
            ending_glycogen_pct = timeline.ending_glycogen_pct,
            ending_fluid_deficit_ml = timeline.ending_fluid_deficit_ml,
            "Finalized metabolic day"
        );
        Ok(timeline)
    }

    /// One timeline per day from `from` through `to`, each starting where the previous ended
    ///
    /// A persisted starting state for a day inside the range still wins over
    /// the previous day's simulated ending.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is after `to` or a repository call fails
    pub async fn simulate_range(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<DayTimeline>> {
        if from > to {
            return Err(AppError::invalid_input(format!(
                "range start {from} is after range end {to}"
            )));
        }

        let mut start = self.resolve_start(athlete_id, from, now).await?;
        let mut timelines = Vec::new();
        let mut date = from;
        loop {
            let timeline = self.simulate_day(athlete_id, date, start, now, None).await?;
            let ending = timeline.ending_state();
            timelines.push(timeline);

            let Some(next) = date.succ_opt().filter(|next| *next <= to) else {
                break;
            };
            start = match self.persisted_start(athlete_id, next).await? {
                Some(persisted) => persisted,
                None => {
                    self.link(athlete_id, date, next, ending).await?;
                    ending
                }
            };
            date = next;
        }
        Ok(timelines)
    }

    /// Simulate one day from a known start, optionally with a what-if meal
    ///
    /// # Errors
    ///
    /// Returns an error if the day's inputs cannot be loaded
    pub async fn simulate_day(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        start: TankState,
        now: DateTime<Utc>,
        ghost_meal: Option<MealEvent>,
    ) -> AppResult<DayTimeline> {
        let inputs = self.inputs.day_inputs(athlete_id, date).await?;
        let day = self.resolver.resolve(date);
        let mut input = SimulationInput::new(day, &inputs.profile, start, now)
            .with_record(inputs.record.as_ref())
            .with_previous_record(inputs.previous_record.as_ref())
            .with_workouts(&inputs.workouts);
        if let Some(ghost) = ghost_meal {
            input = input.with_ghost_meal(ghost);
        }
        Ok(self.simulator.simulate(&input))
    }

    async fn resolve(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
        persist: bool,
    ) -> AppResult<TankState> {
        // Days whose start is unknown, newest first
        let mut unresolved = Vec::new();
        let mut cursor = date;
        let mut start = loop {
            if let Some(persisted) = self.persisted_start(athlete_id, cursor).await? {
                break persisted;
            }
            if unresolved.len() >= self.config.max_depth as usize {
                debug!(%athlete_id, %cursor, "State chain depth limit reached");
                break self.fallback_start(athlete_id, cursor).await?;
            }
            let Some(previous) = cursor.pred_opt() else {
                break self.default_state();
            };
            unresolved.push(cursor);
            cursor = previous;
        };

        while let Some(next) = unresolved.pop() {
            let timeline = self.simulate_day(athlete_id, cursor, start, now, None).await?;
            let ending = timeline.ending_state();
            if persist {
                self.link(athlete_id, cursor, next, ending).await?;
            }
            cursor = next;
            start = ending;
        }
        Ok(start)
    }

    /// Persist `ending` as `day`'s ending and `next`'s starting state
    async fn link(
        &self,
        athlete_id: Uuid,
        day: NaiveDate,
        next: NaiveDate,
        ending: TankState,
    ) -> AppResult<()> {
        let mut day_state = self.stored_or_empty(athlete_id, day).await?;
        day_state.set_ending(ending);
        self.states.upsert_day_state(athlete_id, &day_state).await?;

        let mut next_state = self.stored_or_empty(athlete_id, next).await?;
        next_state.set_starting(ending);
        self.states.upsert_day_state(athlete_id, &next_state).await?;

        info!(
            %athlete_id,
            from = %day,
            to = %next,
            glycogen_pct = ending.glycogen_pct,
            fluid_deficit_ml = ending.fluid_deficit_ml,
            "Persisted metabolic chain link"
        );
        Ok(())
    }

    async fn stored_or_empty(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<MetabolicDayState> {
        Ok(self
            .states
            .get_day_state(athlete_id, date)
            .await?
            .unwrap_or_else(|| MetabolicDayState::empty(date)))
    }

    async fn persisted_start(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<TankState>> {
        Ok(self
            .states
            .get_day_state(athlete_id, date)
            .await?
            .and_then(|state| state.starting_state()))
    }

    /// Predecessor's recorded ending state, else the configured default
    async fn fallback_start(&self, athlete_id: Uuid, date: NaiveDate) -> AppResult<TankState> {
        let Some(previous) = date.pred_opt() else {
            return Ok(self.default_state());
        };
        Ok(self
            .states
            .get_day_state(athlete_id, previous)
            .await?
            .and_then(|state| state.ending_state())
            .unwrap_or_else(|| self.default_state()))
    }

    fn default_state(&self) -> TankState {
        TankState::new(
            self.config.fallback_glycogen_pct,
            self.config.fallback_fluid_deficit_ml,
        )
    }
}
