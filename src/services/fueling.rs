// ABOUTME: Fueling service: regenerates daily plans, simulates timelines, and reports readiness
// ABOUTME: Thin async layer over the engine, the state chain, and the repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::{
    DayInputProvider, FuelingPlanRepository, InMemoryStore, MetabolicStateRepository,
};
use crate::errors::{AppError, AppResult};
use crate::models::SerializedFuelingPlan;
use crate::state_chain::MetabolicStateChain;
use crate::time::{FixedOffsetResolver, LocalDayResolver};
use chrono::{DateTime, NaiveDate, Utc};
use fuelgauge_engine::daily_plan::DailyPlanAggregator;
use fuelgauge_engine::energy_timeline::{DayTimeline, SimulationInput};
use fuelgauge_engine::glycogen_status::{GlycogenResult, GlycogenStatusSummarizer};
use fuelgauge_engine::meal_events::MealEvent;
use fuelgauge_engine::FuelingEngineConfig;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Entry point for every fueling operation
#[derive(Clone)]
pub struct FuelingService {
    inputs: Arc<dyn DayInputProvider>,
    plans: Arc<dyn FuelingPlanRepository>,
    resolver: Arc<dyn LocalDayResolver>,
    chain: MetabolicStateChain,
    aggregator: DailyPlanAggregator,
    summarizer: GlycogenStatusSummarizer,
}

impl FuelingService {
    /// Create a service over the given collaborators
    #[must_use]
    pub fn new(
        states: Arc<dyn MetabolicStateRepository>,
        inputs: Arc<dyn DayInputProvider>,
        plans: Arc<dyn FuelingPlanRepository>,
        resolver: Arc<dyn LocalDayResolver>,
        config: &FuelingEngineConfig,
    ) -> Self {
        Self {
            chain: MetabolicStateChain::new(
                states,
                Arc::clone(&inputs),
                Arc::clone(&resolver),
                config,
            ),
            inputs,
            plans,
            resolver,
            aggregator: DailyPlanAggregator::new(config),
            summarizer: GlycogenStatusSummarizer::new(config),
        }
    }

    /// Service backed entirely by one in-memory store, with UTC day boundaries
    #[must_use]
    pub fn in_memory(store: &InMemoryStore, config: FuelingEngineConfig) -> Self {
        let store = Arc::new(store.clone());
        Self::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(FixedOffsetResolver::utc()),
            &config,
        )
    }

    /// The underlying state chain
    #[must_use]
    pub const fn chain(&self) -> &MetabolicStateChain {
        &self.chain
    }

    /// Build and store the day's fueling plan from its workouts
    ///
    /// # Errors
    ///
    /// Returns an error if inputs cannot be loaded or the plan cannot be stored
    pub async fn regenerate_plan(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<SerializedFuelingPlan> {
        let inputs = self.inputs.day_inputs(athlete_id, date).await?;
        let plan = self
            .aggregator
            .aggregate(&inputs.profile, &inputs.workouts, date);
        self.plans.save_fueling_plan(athlete_id, date, &plan).await?;

        info!(
            %athlete_id,
            %date,
            fuel_state = plan.fuel_state.label(),
            carbs_g = plan.daily_totals.carbs_g,
            windows = plan.windows.len(),
            "Regenerated fueling plan"
        );
        Ok(plan)
    }

    /// Regenerate plans for every day from `from` through `to`
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is after `to` or any day fails
    pub async fn regenerate_plans(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<SerializedFuelingPlan>> {
        if from > to {
            return Err(AppError::invalid_input(format!(
                "range start {from} is after range end {to}"
            )));
        }
        let mut plans = Vec::new();
        for date in from.iter_days().take_while(|date| *date <= to) {
            plans.push(self.regenerate_plan(athlete_id, date).await?);
        }
        Ok(plans)
    }

    /// Simulated timeline of one day, optionally with a what-if meal
    ///
    /// # Errors
    ///
    /// Returns an error if the starting state or inputs cannot be loaded
    pub async fn day_timeline(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
        ghost_meal: Option<MealEvent>,
    ) -> AppResult<DayTimeline> {
        let start = self.chain.resolve_start(athlete_id, date, now).await?;
        self.chain
            .simulate_day(athlete_id, date, start, now, ghost_meal)
            .await
    }

    /// Glycogen readiness at `as_of` from logged intake only
    ///
    /// # Errors
    ///
    /// Returns an error if the starting state or inputs cannot be loaded
    pub async fn glycogen_status(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        as_of: DateTime<Utc>,
    ) -> AppResult<GlycogenResult> {
        let start = self.chain.resolve_start(athlete_id, date, as_of).await?;
        let inputs = self.inputs.day_inputs(athlete_id, date).await?;
        let input = SimulationInput::new(self.resolver.resolve(date), &inputs.profile, start, as_of)
            .with_record(inputs.record.as_ref())
            .with_previous_record(inputs.previous_record.as_ref())
            .with_workouts(&inputs.workouts);
        Ok(self.summarizer.summarize(&input, as_of))
    }

    /// Timelines for consecutive days, chained end to start
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is after `to` or any day fails
    pub async fn timeline_range(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<DayTimeline>> {
        self.chain.simulate_range(athlete_id, from, to, now).await
    }

    /// Simulate a finished day and carry its ending state into the next day
    ///
    /// # Errors
    ///
    /// Returns an error if a repository call fails
    pub async fn finalize_day(
        &self,
        athlete_id: Uuid,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<DayTimeline> {
        self.chain.finalize_day(athlete_id, date, now).await
    }
}
