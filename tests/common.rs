// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, scenario athletes, meals, workouts, and simulation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::panic
)]
//! Shared test utilities for `fuelgauge`

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fuelgauge::logging::LoggingConfig;
use fuelgauge::models::{
    AthleteProfile, CompletedWorkout, DailyNutritionRecord, LoggedMealRecord, PlannedWorkout,
    TankState, WorkoutEnvironment, WorkoutRecord,
};
use fuelgauge::time::LocalDay;
use fuelgauge_engine::energy_timeline::{DayTimeline, EnergyTimelineSimulator, SimulationInput};
use fuelgauge_engine::meal_events::MealEvent;
use fuelgauge_engine::FuelingEngineConfig;
use std::env;
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// FTP used by scenario fixtures
pub const TEST_FTP_WATTS: f64 = 250.0;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => "trace",
            Ok("DEBUG") => "debug",
            Ok("INFO") => "info",
            _ => "warn",
        };

        let _ = LoggingConfig::for_tests(log_level).init();
    });
}

/// The simulated calendar day used by most tests
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// UTC local day for `test_date`
pub fn test_day() -> LocalDay {
    LocalDay::utc(test_date())
}

/// Instant on `test_date` (UTC)
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap()
}

/// Instant on any date (UTC)
pub fn on(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, minute, 0).unwrap().and_utc()
}

/// A "now" after the whole test day, so only logged data counts
pub fn after_day() -> DateTime<Utc> {
    at(0, 0) + Duration::days(1) + Duration::hours(6)
}

/// A "now" before the whole test day, so every candidate is upcoming
pub fn before_day() -> DateTime<Utc> {
    at(0, 0) - Duration::hours(6)
}

/// Athlete from the reference fixture: 70 kg, BMR 1800
pub fn scenario_profile() -> AthleteProfile {
    AthleteProfile {
        athlete_id: Uuid::new_v4(),
        weight_kg: 70.0,
        bmr_kcal: 1800.0,
        ftp_watts: TEST_FTP_WATTS,
        ..AthleteProfile::default()
    }
}

/// A logged meal with an explicit timestamp
pub fn meal(name: &str, time: DateTime<Utc>, carbs_g: f64, kcal: f64) -> LoggedMealRecord {
    LoggedMealRecord::at(name, time, carbs_g, kcal)
}

/// 100 g breakfast logged at 08:00
pub fn breakfast_record() -> DailyNutritionRecord {
    DailyNutritionRecord::new(test_date()).with_meal(meal("Breakfast", at(8, 0), 100.0, 500.0))
}

/// Completed workout with a recorded intensity and no power data
pub fn completed_workout(
    id: &str,
    start: DateTime<Utc>,
    duration_min: f64,
    intensity: f64,
) -> CompletedWorkout {
    CompletedWorkout {
        id: id.to_owned(),
        planned_workout_id: None,
        title: "Intervals".to_owned(),
        workout_type: "ride".to_owned(),
        start,
        duration_min,
        intensity: Some(intensity),
        avg_power_watts: None,
        kilojoules: None,
        calories: None,
        environment: WorkoutEnvironment::default(),
    }
}

/// Planned workout on a date
pub fn planned_workout(
    id: &str,
    date: NaiveDate,
    start: Option<DateTime<Utc>>,
    duration_min: f64,
    intensity: f64,
) -> PlannedWorkout {
    PlannedWorkout {
        id: id.to_owned(),
        date,
        title: "Endurance ride".to_owned(),
        workout_type: "ride".to_owned(),
        start,
        duration_min,
        intensity: Some(intensity),
        strategy_override: None,
        environment: WorkoutEnvironment::default(),
    }
}

/// One hour at 0.95 starting 11:00
pub fn hard_hour() -> WorkoutRecord {
    WorkoutRecord::Completed(completed_workout("hard-hour", at(11, 0), 60.0, 0.95))
}

/// Run the default simulator over the test day
pub fn simulate(
    profile: &AthleteProfile,
    record: Option<&DailyNutritionRecord>,
    workouts: &[WorkoutRecord],
    ghost_meal: Option<MealEvent>,
    start: TankState,
    now: DateTime<Utc>,
) -> DayTimeline {
    simulate_with(
        &FuelingEngineConfig::default(),
        profile,
        record,
        workouts,
        ghost_meal,
        start,
        now,
    )
}

/// Run a configured simulator over the test day
pub fn simulate_with(
    config: &FuelingEngineConfig,
    profile: &AthleteProfile,
    record: Option<&DailyNutritionRecord>,
    workouts: &[WorkoutRecord],
    ghost_meal: Option<MealEvent>,
    start: TankState,
    now: DateTime<Utc>,
) -> DayTimeline {
    init_test_logging();
    let mut input = SimulationInput::new(test_day(), profile, start, now)
        .with_record(record)
        .with_workouts(workouts);
    if let Some(ghost) = ghost_meal {
        input = input.with_ghost_meal(ghost);
    }
    EnergyTimelineSimulator::new(config).simulate(&input)
}

/// Level at a label, failing the test when the label is missing
pub fn level(timeline: &DayTimeline, label: &str) -> f64 {
    timeline
        .level_at(label)
        .unwrap_or_else(|| panic!("no point labelled {label}"))
}
