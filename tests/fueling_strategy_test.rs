// ABOUTME: Integration tests for per-workout fueling strategy, window merging, and daily plans
// ABOUTME: Covers rest days, fueling windows, strategy overrides and multi-workout aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{at, planned_workout, scenario_profile, test_date};
use fuelgauge::models::{
    AthleteProfile, FuelState, SerializedFuelingPlan, StrategyOverride, WindowType, WorkoutRecord,
};
use fuelgauge_engine::daily_plan::DailyPlanAggregator;
use fuelgauge_engine::fueling_strategy::{FuelingStrategyCalculator, WorkoutContext};
use fuelgauge_engine::window_merger::merge_windows;
use fuelgauge_engine::FuelingEngineConfig;
use std::slice;

fn ride_context(duration_min: f64, intensity: f64) -> WorkoutContext {
    WorkoutContext {
        workout_type: "ride".to_owned(),
        duration_min,
        intensity,
        strategy_override: None,
        start: Some(at(10, 0)),
        date: Some(test_date()),
        title: Some("Ride".to_owned()),
        workout_id: Some("ride-1".to_owned()),
        temperature_c: None,
    }
}

fn window_carbs(plan: &SerializedFuelingPlan, window_type: WindowType) -> f64 {
    plan.windows
        .iter()
        .find(|window| window.window_type == window_type)
        .map(|window| window.target_carbs)
        .unwrap_or_else(|| panic!("no {window_type:?} window"))
}

// ============================================================================
// Single-workout strategy
// ============================================================================

#[test]
fn test_rest_context_yields_baseline_plan_without_windows() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let plan = calculator.calculate(&profile, &WorkoutContext::rest(Some(test_date())));

    assert!(plan.windows.is_empty());
    assert_eq!(plan.fuel_state, FuelState::Eco);
    // Eco band midpoint 4 g/kg
    assert!((plan.daily_totals.carbs_g - 280.0).abs() < 1e-9);
    assert!(plan.daily_totals.calories > 0.0);
    assert!(plan.daily_totals.fluid_ml > 0.0);
    assert!(!plan.notes.is_empty());
}

#[test]
fn test_workout_gets_contiguous_pre_intra_post_windows() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let plan = calculator.calculate(&profile, &ride_context(90.0, 0.75));

    assert_eq!(plan.fuel_state, FuelState::Steady);
    let types: Vec<WindowType> = plan.windows.iter().map(|window| window.window_type).collect();
    assert_eq!(
        types,
        vec![
            WindowType::PreWorkout,
            WindowType::IntraWorkout,
            WindowType::PostWorkout
        ]
    );

    let (pre, intra, post) = (&plan.windows[0], &plan.windows[1], &plan.windows[2]);
    assert_eq!(pre.start, at(8, 0));
    assert_eq!(pre.end, intra.start);
    assert_eq!(intra.start, at(10, 0));
    assert_eq!(intra.end, at(11, 30));
    assert_eq!(post.start, intra.end);
    assert_eq!(post.end, at(12, 30));
    assert!(plan
        .windows
        .iter()
        .all(|window| window.linked_workout_id.as_deref() == Some("ride-1")));

    assert!((pre.target_carbs - 70.0).abs() < 1e-9);
    // 45..75 g/h interpolated at 0.75 for 1.5 h
    assert!((intra.target_carbs - 67.5 * 1.5).abs() < 1e-9);
    assert!((post.target_carbs - 84.0).abs() < 1e-9);
    assert!(intra.target_fluid > 0.0);
    assert!(post.target_fluid > 0.0);
}

#[test]
fn test_hard_workout_sets_performance_state_and_loaded_pre_window() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let plan = calculator.calculate(&profile, &ride_context(90.0, 0.9));

    assert_eq!(plan.fuel_state, FuelState::Performance);
    assert!((plan.daily_totals.carbs_g - 8.5 * 70.0).abs() < 1e-9);
    assert!((window_carbs(&plan, WindowType::PreWorkout) - 140.0).abs() < 1e-9);
}

#[test]
fn test_unscheduled_workout_has_totals_but_no_windows() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let mut context = ride_context(90.0, 0.75);
    context.start = None;
    let plan = calculator.calculate(&profile, &context);

    assert!(plan.windows.is_empty());
    assert_eq!(plan.fuel_state, FuelState::Steady);
    assert!(!plan.notes.is_empty());
}

#[test]
fn test_train_low_strips_carbohydrate() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let mut context = ride_context(120.0, 0.7);
    context.strategy_override = Some(StrategyOverride::TrainLow);
    let plan = calculator.calculate(&profile, &context);

    assert!(window_carbs(&plan, WindowType::IntraWorkout).abs() < 1e-9);
    assert!((window_carbs(&plan, WindowType::PreWorkout) - 10.0).abs() < 1e-9);
    let post = plan
        .windows
        .iter()
        .find(|window| window.window_type == WindowType::PostWorkout)
        .unwrap();
    assert!((post.target_protein - 45.0).abs() < 1e-9);
}

#[test]
fn test_race_day_lifts_only_the_absolute_cap() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = AthleteProfile {
        carb_sensitivity: 1.3,
        max_carbs_per_hour: 120.0,
        ..scenario_profile()
    };

    let standard = calculator.calculate(&profile, &ride_context(240.0, 1.0));
    let mut race = ride_context(240.0, 1.0);
    race.strategy_override = Some(StrategyOverride::RaceDay);
    let race = calculator.calculate(&profile, &race);

    // 90 g/h scaled by 1.3 is 117 g/h: capped at 90 normally, allowed on race day
    assert!((window_carbs(&standard, WindowType::IntraWorkout) - 90.0 * 4.0).abs() < 1e-6);
    assert!((window_carbs(&race, WindowType::IntraWorkout) - 117.0 * 4.0).abs() < 1e-6);
    let intra = race
        .windows
        .iter()
        .find(|window| window.window_type == WindowType::IntraWorkout)
        .unwrap();
    assert!(!intra.supplements.is_empty());
}

#[test]
fn test_hot_weather_raises_fluid_target() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let mut cool = ride_context(120.0, 0.7);
    cool.temperature_c = Some(5.0);
    let mut hot = ride_context(120.0, 0.7);
    hot.temperature_c = Some(32.0);

    let cool_plan = calculator.calculate(&profile, &cool);
    let hot_plan = calculator.calculate(&profile, &hot);
    assert!(hot_plan.daily_totals.fluid_ml > cool_plan.daily_totals.fluid_ml);
    assert!(hot_plan.daily_totals.sodium_mg > cool_plan.daily_totals.sodium_mg);
}

#[test]
fn test_oversized_window_settings_are_clamped_to_one_day() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = AthleteProfile {
        pre_workout_window_min: i64::MAX,
        post_workout_window_min: i64::MAX,
        ..scenario_profile()
    };
    let plan = calculator.calculate(&profile, &ride_context(90.0, 0.75));

    let pre = &plan.windows[0];
    let post = &plan.windows[2];
    assert_eq!(pre.start, at(10, 0) - Duration::days(1));
    assert_eq!(post.end, at(11, 30) + Duration::days(1));
}

#[test]
fn test_oversized_duration_is_clamped_to_one_day() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let plan = calculator.calculate(&profile, &ride_context(1e12, 0.7));

    let intra = plan
        .windows
        .iter()
        .find(|window| window.window_type == WindowType::IntraWorkout)
        .unwrap();
    assert_eq!(intra.end, at(10, 0) + Duration::days(1));
    assert!(plan.daily_totals.fluid_ml.is_finite());
    assert!(plan.calorie_breakdown.total_calories.is_finite());

    let nan_plan = calculator.calculate(&profile, &ride_context(f64::NAN, 0.7));
    assert!(nan_plan.windows.is_empty());
    assert_eq!(nan_plan.fuel_state, FuelState::Eco);
}

// ============================================================================
// Merging
// ============================================================================

#[test]
fn test_merging_a_merged_schedule_is_a_no_op() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let mut morning = ride_context(60.0, 0.7);
    morning.start = Some(at(6, 0));
    let mut evening = ride_context(60.0, 0.7);
    evening.start = Some(at(18, 0));

    let mut windows = calculator.calculate(&profile, &morning).windows;
    windows.extend(calculator.calculate(&profile, &evening).windows);

    let merged = merge_windows(windows);
    assert_eq!(merge_windows(merged.clone()), merged);
    for pair in merged.windows(2) {
        assert!(pair[1].start > pair[0].end + Duration::minutes(15));
    }
}

#[test]
fn test_merge_preserves_nutrient_totals() {
    let calculator = FuelingStrategyCalculator::default();
    let profile = scenario_profile();
    let plan = calculator.calculate(&profile, &ride_context(90.0, 0.75));
    let before: f64 = plan.windows.iter().map(|window| window.target_carbs).sum();

    let merged = merge_windows(plan.windows);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].window_type, WindowType::Transition);
    assert!((merged[0].target_carbs - before).abs() < 1e-9);
}

// ============================================================================
// Daily aggregation
// ============================================================================

#[test]
fn test_rest_day_aggregate_has_no_windows() {
    let aggregator = DailyPlanAggregator::new(&FuelingEngineConfig::default());
    let plan = aggregator.aggregate(&scenario_profile(), &[], test_date());

    assert_eq!(plan.date, Some(test_date()));
    assert!(plan.windows.is_empty());
    assert_eq!(plan.fuel_state, FuelState::Eco);
    assert!(plan.daily_totals.carbs_g > 0.0);
    assert!(plan.daily_totals.calories > 0.0);
}

#[test]
fn test_two_workouts_take_the_most_demanding_day() {
    let aggregator = DailyPlanAggregator::new(&FuelingEngineConfig::default());
    let profile = scenario_profile();
    let easy = WorkoutRecord::Planned(planned_workout(
        "easy",
        test_date(),
        Some(at(7, 0)),
        60.0,
        0.55,
    ));
    let mut hard_session = planned_workout("hard", test_date(), Some(at(17, 0)), 90.0, 0.9);
    hard_session.title = "Threshold".to_owned();
    let hard = WorkoutRecord::Planned(hard_session);

    let single = aggregator.aggregate(&profile, slice::from_ref(&easy), test_date());
    let both = aggregator.aggregate(&profile, &[easy, hard], test_date());

    assert_eq!(both.fuel_state, FuelState::Performance);
    assert!(both.daily_totals.carbs_g > single.daily_totals.carbs_g);
    assert!(both.daily_totals.fluid_ml > single.daily_totals.fluid_ml);
    assert!(both.daily_totals.calories > single.daily_totals.calories);
    assert_eq!(both.windows.len(), 2);
    assert_eq!(both.windows[1].workout_title.as_deref(), Some("Threshold"));

    let mut notes = both.notes.clone();
    notes.dedup();
    assert_eq!(notes, both.notes);
}

#[test]
fn test_back_to_back_workouts_share_a_transition_window() {
    let aggregator = DailyPlanAggregator::new(&FuelingEngineConfig::default());
    let profile = scenario_profile();
    let mut swim = planned_workout("swim", test_date(), Some(at(7, 0)), 60.0, 0.7);
    swim.title = "Swim".to_owned();
    let mut ride = planned_workout("ride", test_date(), Some(at(9, 0)), 90.0, 0.7);
    ride.title = "Ride".to_owned();

    let plan = aggregator.aggregate(
        &profile,
        &[WorkoutRecord::Planned(swim), WorkoutRecord::Planned(ride)],
        test_date(),
    );

    assert_eq!(plan.windows.len(), 1);
    assert_eq!(plan.windows[0].window_type, WindowType::Transition);
    assert_eq!(plan.windows[0].workout_title.as_deref(), Some("Swim + Ride"));
}
