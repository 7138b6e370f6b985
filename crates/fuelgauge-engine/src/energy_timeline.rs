// ABOUTME: 24-hour glycogen tank and fluid deficit simulation on a 15-minute grid
// ABOUTME: Assembles logged, carried-over, and synthetic meals, then steps drains and absorption
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Energy Timeline Simulator
//!
//! The tank holds `weight × 8` grams of carbohydrate. Each step subtracts a
//! BMR-derived baseline drain and any active workout drain, adds absorbed
//! carbohydrate from every meal whose clock has started, and updates the fluid
//! deficit from sweat, insensible loss, drinks, and passive rehydration.
//!
//! Point 0 is the starting state at local midnight; point `n` is the state
//! after `n` steps, so a 15-minute grid yields 97 points.

use crate::absorption::absorbed_in_interval;
use crate::config::{
    BoostConfig, CandidateConfig, FuelingEngineConfig, PastWindowPolicy, SimulationConfig,
};
use crate::meal_events::{
    carry_over_meals, logged_fluid_times, resolve_logged_meals, within_minutes, MealEvent,
    MealKind,
};
use crate::synthetic_intake::{
    candidates_from_plan, meal_pattern_candidates, MealCandidate, SyntheticIntakeSynthesizer,
};
use crate::workout_events::{WorkoutDrainCalculator, WorkoutEvent};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use fuelgauge_core::constants::energy::KCAL_PER_G_CARB;
use fuelgauge_core::models::{
    AthleteProfile, DailyNutritionRecord, TankState, WindowType, WorkoutRecord,
};
use fuelgauge_core::time::LocalDay;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Kind of event annotated on a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    /// Workout start
    Workout,
    /// Logged meal
    Meal,
    /// Synthetic or probable meal
    SyntheticMeal,
}

/// One sample of the simulated day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyPoint {
    /// Local wall-clock label ("HH:MM", "24:00" for the closing point)
    pub time: String,
    /// Unix timestamp (ms)
    pub timestamp_ms: i64,
    /// Tank level as a percentage of capacity
    pub tank_level_pct: f64,
    /// Cumulative energy in minus out since midnight (kcal)
    pub kcal_balance: f64,
    /// Cumulative carbohydrate in minus out since midnight (g)
    pub carb_balance_g: f64,
    /// Fluid deficit (mL)
    pub fluid_deficit_ml: f64,
    /// Whether the point lies after "now"
    pub is_future: bool,
    /// Workout or meal label at this point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Kind of annotated event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<TimelineEventType>,
}

/// Result of simulating one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTimeline {
    /// Local calendar date
    pub date: NaiveDate,
    /// Chart series including both day boundaries
    pub points: Vec<EnergyPoint>,
    /// Tank level at the closing boundary (%)
    pub ending_glycogen_pct: f64,
    /// Fluid deficit at the closing boundary (mL)
    pub ending_fluid_deficit_ml: f64,
    /// Tank capacity (g)
    pub capacity_g: f64,
    /// Meals fed into the simulation
    pub meals_used: usize,
    /// How many of those were synthetic or probable
    pub synthetic_meals: usize,
}

impl DayTimeline {
    /// State at the closing boundary
    #[must_use]
    pub fn ending_state(&self) -> TankState {
        TankState::new(self.ending_glycogen_pct, self.ending_fluid_deficit_ml)
    }

    /// Point with a given "HH:MM" label
    #[must_use]
    pub fn point_at(&self, label: &str) -> Option<&EnergyPoint> {
        self.points.iter().find(|point| point.time == label)
    }

    /// Tank level at a given "HH:MM" label
    #[must_use]
    pub fn level_at(&self, label: &str) -> Option<f64> {
        self.point_at(label).map(|point| point.tank_level_pct)
    }
}

/// Everything the simulator needs for one day
#[derive(Debug, Clone)]
pub struct SimulationInput<'a> {
    /// Day being simulated
    pub day: LocalDay,
    /// Athlete settings
    pub profile: &'a AthleteProfile,
    /// The day's nutrition record
    pub record: Option<&'a DailyNutritionRecord>,
    /// The previous day's record, for meals still absorbing at midnight
    pub previous_record: Option<&'a DailyNutritionRecord>,
    /// Merged completed and planned workouts
    pub workouts: &'a [WorkoutRecord],
    /// What-if meal injected regardless of the clock
    pub ghost_meal: Option<MealEvent>,
    /// Tank and fluid state at local midnight
    pub start: TankState,
    /// Wall-clock instant separating past from future
    pub now: DateTime<Utc>,
}

impl<'a> SimulationInput<'a> {
    /// Input with no records, workouts, or ghost meal
    #[must_use]
    pub const fn new(
        day: LocalDay,
        profile: &'a AthleteProfile,
        start: TankState,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            day,
            profile,
            record: None,
            previous_record: None,
            workouts: &[],
            ghost_meal: None,
            start,
            now,
        }
    }

    /// Attach the day's nutrition record
    #[must_use]
    pub const fn with_record(mut self, record: Option<&'a DailyNutritionRecord>) -> Self {
        self.record = record;
        self
    }

    /// Attach the previous day's nutrition record
    #[must_use]
    pub const fn with_previous_record(
        mut self,
        previous_record: Option<&'a DailyNutritionRecord>,
    ) -> Self {
        self.previous_record = previous_record;
        self
    }

    /// Attach the day's workouts
    #[must_use]
    pub const fn with_workouts(mut self, workouts: &'a [WorkoutRecord]) -> Self {
        self.workouts = workouts;
        self
    }

    /// Inject a what-if meal
    #[must_use]
    pub fn with_ghost_meal(mut self, ghost_meal: MealEvent) -> Self {
        self.ghost_meal = Some(ghost_meal);
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct StepState {
    tank_g: f64,
    fluid_deficit_ml: f64,
    kcal_balance: f64,
    carb_balance_g: f64,
}

struct Annotator<'a> {
    meals: &'a [MealEvent],
    workouts: &'a [WorkoutEvent],
    tolerance_min: f64,
}

impl Annotator<'_> {
    fn annotate(&self, instant: DateTime<Utc>) -> Option<(String, TimelineEventType)> {
        if let Some(workout) = self
            .workouts
            .iter()
            .find(|workout| within_minutes(workout.start, instant, self.tolerance_min))
        {
            let label = if workout.title.is_empty() {
                "Workout".to_owned()
            } else {
                workout.title.clone()
            };
            return Some((label, TimelineEventType::Workout));
        }
        self.meals
            .iter()
            .find(|meal| within_minutes(meal.time, instant, self.tolerance_min))
            .map(|meal| {
                let event_type = if meal.synthetic() {
                    TimelineEventType::SyntheticMeal
                } else {
                    TimelineEventType::Meal
                };
                (meal.label.clone(), event_type)
            })
    }
}

/// Simulates a day of glycogen and hydration
#[derive(Debug, Clone)]
pub struct EnergyTimelineSimulator {
    simulation: SimulationConfig,
    boost: BoostConfig,
    candidates: CandidateConfig,
    default_carb_goal_g: f64,
    synthesizer: SyntheticIntakeSynthesizer,
    drains: WorkoutDrainCalculator,
}

impl Default for EnergyTimelineSimulator {
    fn default() -> Self {
        Self::new(&FuelingEngineConfig::default())
    }
}

impl EnergyTimelineSimulator {
    /// Create a simulator from the engine configuration
    #[must_use]
    pub fn new(config: &FuelingEngineConfig) -> Self {
        Self {
            simulation: config.simulation.clone(),
            boost: config.boost.clone(),
            candidates: config.candidates.clone(),
            default_carb_goal_g: config.defaults.carb_goal_g,
            synthesizer: SyntheticIntakeSynthesizer::new(config),
            drains: WorkoutDrainCalculator::new(config),
        }
    }

    /// Tank capacity for an athlete (g)
    #[must_use]
    pub fn capacity_g(&self, profile: &AthleteProfile) -> f64 {
        profile.weight_kg * self.simulation.tank_capacity_g_per_kg
    }

    /// Carbohydrate goal: record goal, else stored plan total, else athlete goal, else default
    #[must_use]
    pub fn effective_carb_goal(
        &self,
        record: Option<&DailyNutritionRecord>,
        profile: &AthleteProfile,
    ) -> f64 {
        record
            .and_then(|record| record.carb_goal_g)
            .or_else(|| {
                record
                    .and_then(|record| record.fueling_plan.as_ref())
                    .map(|plan| plan.daily_totals.carbs_g)
            })
            .or(profile.daily_carb_goal_g)
            .filter(|goal| goal.is_finite() && *goal > 0.0)
            .unwrap_or(self.default_carb_goal_g)
    }

    /// Run the simulation for one day
    #[must_use]
    pub fn simulate(&self, input: &SimulationInput<'_>) -> DayTimeline {
        let profile = input.profile.sanitized();
        let capacity = self.capacity_g(&profile);
        let steps = self.simulation.steps_per_day();
        let step_hours = self.simulation.step_hours();

        let meals = self.assemble_meals(input, &profile, capacity);
        let workouts = self.drains.build_events(input.workouts, &profile);
        let rest_day = input.workouts.iter().all(WorkoutRecord::is_rest);
        let fluid_times = logged_fluid_times(&meals);

        let bmr_carb_per_step =
            profile.bmr_kcal * self.simulation.bmr_carb_fraction / KCAL_PER_G_CARB / steps as f64;
        let bmr_kcal_per_step = profile.bmr_kcal / steps as f64;
        let insensible_loss = self.simulation.insensible_fluid_loss_ml_per_hour * step_hours;
        let passive_rehydration = self.simulation.passive_rehydration_ml_per_hour * step_hours;
        let rest_decay = self.simulation.rest_day_fluid_decay_ml_per_hour * step_hours;

        let annotator = Annotator {
            meals: &meals,
            workouts: &workouts,
            tolerance_min: self.simulation.step_minutes as f64 / 2.0,
        };

        let mut state = StepState {
            tank_g: input.start.glycogen_pct / 100.0 * capacity,
            fluid_deficit_ml: input.start.fluid_deficit_ml,
            kcal_balance: 0.0,
            carb_balance_g: 0.0,
        };
        let mut points = Vec::with_capacity(steps + 1);
        points.push(Self::point(
            input,
            0,
            steps,
            input.day.start_utc,
            &state,
            capacity,
            &annotator,
        ));

        for index in 1..=steps {
            let step_start = self.step_instant(&input.day, index - 1);
            let step_end = self.step_instant(&input.day, index);

            let mut carb_out = bmr_carb_per_step;
            let mut kcal_out = bmr_kcal_per_step;
            let mut fluid_out = insensible_loss;
            for workout in workouts.iter().filter(|workout| workout.is_active_at(step_start)) {
                carb_out +=
                    workout.per_interval_carb_drain_g * self.simulation.workout_drain_multiplier;
                kcal_out +=
                    workout.per_interval_kcal_drain * self.simulation.workout_drain_multiplier;
                fluid_out += workout.per_interval_fluid_drain_ml;
            }

            let (carb_in, kcal_in) = self.absorb_step(&meals, step_start, step_end);

            let mut fluid_in: f64 = meals
                .iter()
                .filter(|meal| meal.time >= step_start && meal.time < step_end)
                .map(|meal| meal.fluid_ml)
                .sum();
            if self.is_rehydration_step(&input.day, step_start, &fluid_times) {
                fluid_in += passive_rehydration;
            }
            if rest_day {
                fluid_in += rest_decay;
            }

            state.tank_g = (state.tank_g + carb_in - carb_out).clamp(0.0, capacity);
            state.fluid_deficit_ml = (state.fluid_deficit_ml + fluid_out - fluid_in).max(0.0);
            state.carb_balance_g += carb_in - carb_out;
            state.kcal_balance += kcal_in - kcal_out;

            if self.simulation.trace_steps {
                trace!(
                    date = %input.day.date,
                    step = index,
                    tank_g = state.tank_g,
                    carb_in,
                    carb_out,
                    fluid_deficit_ml = state.fluid_deficit_ml,
                    "Simulated step"
                );
            }

            points.push(Self::point(input, index, steps, step_end, &state, capacity, &annotator));
        }

        let synthetic_meals = meals.iter().filter(|meal| meal.synthetic()).count();
        let (ending_glycogen_pct, ending_fluid_deficit_ml) = points
            .last()
            .map_or((input.start.glycogen_pct, input.start.fluid_deficit_ml), |point| {
                (point.tank_level_pct, point.fluid_deficit_ml)
            });

        debug!(
            date = %input.day.date,
            meals = meals.len(),
            synthetic_meals,
            workouts = workouts.len(),
            ending_glycogen_pct,
            "Simulated energy timeline"
        );

        DayTimeline {
            date: input.day.date,
            points,
            ending_glycogen_pct,
            ending_fluid_deficit_ml,
            capacity_g: capacity,
            meals_used: meals.len(),
            synthetic_meals,
        }
    }

    fn step_instant(&self, day: &LocalDay, index: usize) -> DateTime<Utc> {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        day.start_utc + Duration::minutes(self.simulation.step_minutes.saturating_mul(index))
    }

    /// Absorbed carbohydrate and energy over one step, with the anti-spike clamp
    fn absorb_step(
        &self,
        meals: &[MealEvent],
        step_start: DateTime<Utc>,
        step_end: DateTime<Utc>,
    ) -> (f64, f64) {
        let (mut carbs, mut kcal) = (0.0, 0.0);
        for meal in meals.iter().filter(|meal| meal.time < step_end) {
            let from = meal.minutes_until(step_start);
            if from >= meal.profile.duration_min() {
                continue;
            }
            let fraction =
                absorbed_in_interval(from, meal.minutes_until(step_end), 1.0, &meal.profile);
            carbs += meal.carbs_g * fraction;
            kcal += meal.kcal * fraction;
        }

        let cap = self.simulation.max_absorption_per_step_g;
        if carbs > cap {
            kcal *= cap / carbs;
            carbs = cap;
        }
        (carbs, kcal)
    }

    fn is_rehydration_step(
        &self,
        day: &LocalDay,
        step_start: DateTime<Utc>,
        fluid_times: &[DateTime<Utc>],
    ) -> bool {
        let hour = day.local_hour(step_start);
        if hour < self.simulation.rehydration_start_hour
            || hour >= self.simulation.rehydration_end_hour
        {
            return false;
        }
        let hour_index =
            |instant: DateTime<Utc>| (instant - day.start_utc).num_minutes().div_euclid(60);
        let current = hour_index(step_start);
        !fluid_times.iter().any(|time| hour_index(*time) == current)
    }

    fn point(
        input: &SimulationInput<'_>,
        index: usize,
        steps: usize,
        instant: DateTime<Utc>,
        state: &StepState,
        capacity: f64,
        annotator: &Annotator<'_>,
    ) -> EnergyPoint {
        let time = if index == steps {
            "24:00".to_owned()
        } else {
            input.day.local_time(instant).format("%H:%M").to_string()
        };
        let (event, event_type) = annotator
            .annotate(instant)
            .map_or((None, None), |(label, kind)| (Some(label), Some(kind)));
        let tank_level_pct = if capacity > 0.0 {
            (state.tank_g / capacity * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        EnergyPoint {
            time,
            timestamp_ms: instant.timestamp_millis(),
            tank_level_pct,
            kcal_balance: state.kcal_balance,
            carb_balance_g: state.carb_balance_g,
            fluid_deficit_ml: state.fluid_deficit_ml.max(0.0),
            is_future: instant > input.now,
            event,
            event_type,
        }
    }

    /// Every meal the simulation will absorb, sorted by time
    ///
    /// Logged meals and previous-day carry-over come first. Synthetic
    /// candidates come from the stored plan (or the synthesizer when none is
    /// stored) plus a meal-pattern baseline, minus any that collide with real
    /// logs or with workout windows.
    #[must_use]
    pub fn assemble_meals(
        &self,
        input: &SimulationInput<'_>,
        profile: &AthleteProfile,
        capacity: f64,
    ) -> Vec<MealEvent> {
        let logged = resolve_logged_meals(input.record, &input.day, profile);
        let mut meals = carry_over_meals(input.previous_record, &input.day, profile);

        let candidates = self.candidates(input, profile, &logged);
        let mut synthetic = self.apply_time_policy(input, candidates);
        synthetic.sort_by_key(|meal| meal.time);
        self.apply_boost(input, profile, capacity, &mut synthetic);

        meals.extend(logged);
        meals.extend(synthetic);
        if let Some(ghost) = &input.ghost_meal {
            meals.push(ghost.clone());
        }
        meals.sort_by_key(|meal| meal.time);
        meals
    }

    fn candidates(
        &self,
        input: &SimulationInput<'_>,
        profile: &AthleteProfile,
        logged: &[MealEvent],
    ) -> Vec<MealCandidate> {
        let stored_plan = input
            .record
            .and_then(|record| record.fueling_plan.as_ref())
            .filter(|plan| match plan.check_version() {
                Ok(()) => true,
                Err(e) => {
                    warn!(date = %input.day.date, "Ignoring stored fueling plan: {e}");
                    false
                }
            });

        let mut candidates = stored_plan.map_or_else(
            || self.synthesizer.synthesize(profile, input.workouts, &input.day),
            candidates_from_plan,
        );

        if !candidates
            .iter()
            .any(|candidate| candidate.window_type == WindowType::DailyBase)
        {
            let planned: f64 = candidates.iter().map(|candidate| candidate.carbs_g).sum();
            let eaten: f64 = logged.iter().map(|meal| meal.carbs_g).sum();
            let remaining = self.effective_carb_goal(input.record, profile) - planned - eaten;
            candidates.extend(meal_pattern_candidates(profile, &input.day, remaining));
        }

        let workout_window_times: Vec<DateTime<Utc>> = candidates
            .iter()
            .filter(|candidate| candidate.window_type != WindowType::DailyBase)
            .map(|candidate| candidate.time)
            .collect();

        candidates.retain(|candidate| {
            if !input.day.contains(candidate.time) {
                return false;
            }
            if logged.iter().any(|meal| {
                within_minutes(candidate.time, meal.time, self.candidates.logged_overlap_min)
            }) {
                debug!(candidate = %candidate.label, "Skipping candidate next to a logged meal");
                return false;
            }
            if candidate.window_type == WindowType::DailyBase
                && workout_window_times.iter().any(|time| {
                    within_minutes(candidate.time, *time, self.candidates.base_overlap_min)
                })
            {
                debug!(candidate = %candidate.label, "Skipping baseline meal near workout");
                return false;
            }
            true
        });
        candidates
    }

    fn apply_time_policy(
        &self,
        input: &SimulationInput<'_>,
        candidates: Vec<MealCandidate>,
    ) -> Vec<MealEvent> {
        let future_day = input.day.is_future(input.now);
        candidates
            .into_iter()
            .filter_map(|candidate| {
                if future_day || candidate.time >= input.now {
                    return Some(candidate.into_meal_event(MealKind::Synthetic));
                }
                match self.simulation.past_window_policy {
                    PastWindowPolicy::StrictActuals => {
                        debug!(candidate = %candidate.label, "Dropping past synthetic candidate");
                        None
                    }
                    PastWindowPolicy::Probable { weight } => {
                        Some(candidate.into_meal_event(MealKind::Probable { weight }))
                    }
                }
            })
            .collect()
    }

    /// Deficit-aware boost of the first full-weight synthetic meal
    fn apply_boost(
        &self,
        input: &SimulationInput<'_>,
        profile: &AthleteProfile,
        capacity: f64,
        synthetic: &mut [MealEvent],
    ) {
        let Some(first) = synthetic
            .iter_mut()
            .find(|meal| meal.kind == MealKind::Synthetic)
        else {
            return;
        };

        let level_pct = input.start.glycogen_pct;
        let current_g = level_pct / 100.0 * capacity;
        let added = if level_pct < self.boost.critical_threshold_pct {
            let target_g = self.boost.critical_target_pct / 100.0 * capacity;
            (target_g - current_g - first.carbs_g).max(0.0)
        } else if level_pct < self.boost.recovery_threshold_pct {
            let gap_g = self.boost.recovery_threshold_pct / 100.0 * capacity - current_g;
            let cap_g = self.boost.recovery_goal_cap_fraction
                * self.effective_carb_goal(input.record, profile);
            gap_g.min(cap_g).max(0.0)
        } else {
            0.0
        };

        if added > 0.0 {
            debug!(meal = %first.label, added_g = added, level_pct, "Boosting first synthetic");
            first.carbs_g += added;
            first.kcal += added * KCAL_PER_G_CARB;
        }
    }
}
