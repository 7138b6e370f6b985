// ABOUTME: Integration tests for the 15-minute glycogen and hydration simulation
// ABOUTME: Covers reference scenarios, bounds, synthetic intake, boosts, and fluid balance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, NaiveDate};
use common::{
    after_day, at, before_day, breakfast_record, completed_workout, hard_hour, init_test_logging,
    level, meal, on, planned_workout, scenario_profile, simulate, simulate_with, test_date,
    test_day,
};
use fuelgauge::models::{
    AthleteProfile, DailyNutritionRecord, LoggedMealRecord, TankState, WindowType, WorkoutRecord,
};
use fuelgauge_engine::absorption::AbsorptionProfile;
use fuelgauge_engine::config::PastWindowPolicy;
use fuelgauge_engine::daily_plan::DailyPlanAggregator;
use fuelgauge_engine::energy_timeline::{
    DayTimeline, EnergyTimelineSimulator, SimulationInput, TimelineEventType,
};
use fuelgauge_engine::meal_events::{MealEvent, MealKind};
use fuelgauge_engine::FuelingEngineConfig;

fn start(glycogen_pct: f64) -> TankState {
    TankState::new(glycogen_pct, 0.0)
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_breakfast_day_drains_overnight_and_refills_after_breakfast() {
    let profile = scenario_profile();
    let record = breakfast_record();
    let timeline = simulate(&profile, Some(&record), &[], None, start(85.0), after_day());

    assert!((level(&timeline, "00:00") - 85.0).abs() < 1e-9);

    let early = level(&timeline, "04:00");
    assert!(early > 75.0 && early < 82.0, "04:00 level was {early}");

    assert!(level(&timeline, "09:30") > level(&timeline, "08:00"));
}

#[test]
fn test_hard_hour_drops_tank_sharply() {
    let profile = scenario_profile();
    let record = breakfast_record();
    let workouts = vec![hard_hour()];
    let timeline = simulate(&profile, Some(&record), &workouts, None, start(85.0), after_day());

    let drop = level(&timeline, "11:00") - level(&timeline, "12:00");
    assert!(drop > 25.0, "hour drop was {drop}");
}

#[test]
fn test_ghost_meal_raises_level_within_the_hour() {
    let profile = scenario_profile();
    let record = breakfast_record();
    let baseline = simulate(&profile, Some(&record), &[], None, start(85.0), after_day());

    let ghost = MealEvent::ghost("Gel", at(14, 0), 50.0, AbsorptionProfile::rapid());
    let what_if = simulate(&profile, Some(&record), &[], Some(ghost), start(85.0), after_day());

    assert!(level(&what_if, "14:45") > level(&baseline, "14:45"));
    assert!((level(&what_if, "14:00") - level(&baseline, "14:00")).abs() < 1e-9);

    let point = what_if.point_at("14:00").unwrap();
    assert_eq!(point.event.as_deref(), Some("Gel"));
    assert_eq!(point.event_type, Some(TimelineEventType::SyntheticMeal));
}

// ============================================================================
// Grid and bounds
// ============================================================================

#[test]
fn test_timeline_covers_the_whole_day() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[], None, start(85.0), after_day());

    assert_eq!(timeline.points.len(), 97);
    assert_eq!(timeline.points[0].time, "00:00");
    assert_eq!(timeline.points[1].time, "00:15");
    assert_eq!(timeline.points[96].time, "24:00");
    assert_eq!(timeline.date, test_date());
    assert!((timeline.capacity_g - 560.0).abs() < 1e-9);

    let step_ms = Duration::minutes(15).num_milliseconds();
    for pair in timeline.points.windows(2) {
        assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, step_ms);
    }
}

#[test]
fn test_levels_stay_within_bounds_under_extreme_inputs() {
    let profile = scenario_profile();
    let mut feast = DailyNutritionRecord::new(test_date());
    for hour in [6, 8, 10, 12, 14, 16] {
        feast = feast.with_meal(meal("Rice", at(hour, 0), 300.0, 1200.0));
    }
    let marathon = vec![WorkoutRecord::Completed(completed_workout(
        "long",
        at(13, 0),
        180.0,
        1.0,
    ))];

    let cases = [
        (Some(&feast), Vec::new(), 99.0),
        (None, marathon.clone(), 5.0),
        (Some(&feast), marathon, 0.0),
    ];
    for (record, workouts, start_pct) in cases {
        let timeline = simulate(&profile, record, &workouts, None, start(start_pct), after_day());
        for point in &timeline.points {
            assert!(
                (0.0..=100.0).contains(&point.tank_level_pct),
                "{} out of bounds at {}",
                point.tank_level_pct,
                point.time
            );
            assert!(point.fluid_deficit_ml >= 0.0);
        }
    }
}

#[test]
fn test_fasting_rest_day_drains_monotonically() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[], None, start(85.0), after_day());

    assert_eq!(timeline.meals_used, 0);
    for pair in timeline.points.windows(2) {
        assert!(pair[1].tank_level_pct <= pair[0].tank_level_pct + 1e-12);
    }
    assert!(timeline.ending_glycogen_pct < 85.0);
    assert!(timeline.points.iter().all(|point| point.kcal_balance <= 0.0));
}

#[test]
fn test_ending_state_matches_last_point() {
    let profile = scenario_profile();
    let record = breakfast_record();
    let workouts = [hard_hour()];
    let timeline = simulate(&profile, Some(&record), &workouts, None, start(85.0), after_day());

    let last = timeline.points.last().unwrap();
    let ending = timeline.ending_state();
    assert!((ending.glycogen_pct - last.tank_level_pct).abs() < 1e-12);
    assert!((ending.fluid_deficit_ml - last.fluid_deficit_ml).abs() < 1e-12);
}

// ============================================================================
// Annotation and clock
// ============================================================================

#[test]
fn test_points_are_annotated_with_events() {
    let profile = scenario_profile();
    let record = breakfast_record();
    let workouts = [hard_hour()];
    let timeline = simulate(&profile, Some(&record), &workouts, None, start(85.0), after_day());

    let breakfast = timeline.point_at("08:00").unwrap();
    assert_eq!(breakfast.event.as_deref(), Some("Breakfast"));
    assert_eq!(breakfast.event_type, Some(TimelineEventType::Meal));

    let workout = timeline.point_at("11:00").unwrap();
    assert_eq!(workout.event.as_deref(), Some("Intervals"));
    assert_eq!(workout.event_type, Some(TimelineEventType::Workout));

    assert!(timeline.point_at("03:00").unwrap().event.is_none());
}

#[test]
fn test_points_after_now_are_future() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[], None, start(85.0), at(12, 0));

    assert!(!timeline.point_at("12:00").unwrap().is_future);
    assert!(timeline.point_at("12:15").unwrap().is_future);
    assert!(!timeline.points[0].is_future);
    assert!(timeline.points[96].is_future);
}

// ============================================================================
// Synthetic intake
// ============================================================================

#[test]
fn test_future_rest_day_fabricates_meal_pattern() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[], None, start(90.0), before_day());

    assert_eq!(timeline.meals_used, 3);
    assert_eq!(timeline.synthetic_meals, 3);
    let lunch = timeline.point_at("12:30").unwrap();
    assert_eq!(lunch.event.as_deref(), Some("Lunch"));
    assert_eq!(lunch.event_type, Some(TimelineEventType::SyntheticMeal));

    let fasting = simulate(&profile, None, &[], None, start(90.0), after_day());
    assert!(timeline.ending_glycogen_pct > fasting.ending_glycogen_pct);
}

#[test]
fn test_past_candidates_are_dropped_under_strict_actuals() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[], None, start(85.0), at(10, 0));

    // Breakfast at 08:00 is in the past; lunch and dinner are still upcoming
    assert_eq!(timeline.synthetic_meals, 2);
    assert!(timeline.point_at("08:00").unwrap().event.is_none());
}

#[test]
fn test_probable_policy_keeps_weighted_past_candidates() {
    init_test_logging();
    let mut config = FuelingEngineConfig::default();
    config.simulation.past_window_policy = PastWindowPolicy::Probable { weight: 0.5 };
    let simulator = EnergyTimelineSimulator::new(&config);
    let profile = scenario_profile();
    let input = SimulationInput::new(test_day(), &profile, start(85.0), after_day());

    let meals = simulator.assemble_meals(&input, &profile, simulator.capacity_g(&profile));

    assert_eq!(meals.len(), 3);
    for event in &meals {
        assert!(event.probable());
        assert_eq!(event.kind, MealKind::Probable { weight: 0.5 });
        assert!((event.carbs_g - 280.0 / 3.0 / 2.0).abs() < 1e-9);
    }

    let strict = simulate(&profile, None, &[], None, start(85.0), after_day());
    let probable = simulate_with(&config, &profile, None, &[], None, start(85.0), after_day());
    assert!(probable.ending_glycogen_pct > strict.ending_glycogen_pct);
}

#[test]
fn test_logged_meal_suppresses_nearby_candidate() {
    init_test_logging();
    let simulator = EnergyTimelineSimulator::default();
    let profile = scenario_profile();
    let record = DailyNutritionRecord::new(test_date()).with_meal(meal(
        "Porridge",
        at(8, 30),
        60.0,
        300.0,
    ));
    let input = SimulationInput::new(test_day(), &profile, start(90.0), before_day())
        .with_record(Some(&record));

    let meals = simulator.assemble_meals(&input, &profile, simulator.capacity_g(&profile));

    let synthetic: Vec<&MealEvent> = meals.iter().filter(|event| event.synthetic()).collect();
    assert_eq!(synthetic.len(), 2);
    assert!(synthetic
        .iter()
        .all(|event| (event.time - at(8, 30)).num_minutes().abs() > 60));
    assert!(meals.iter().any(|event| event.label == "Porridge" && !event.synthetic()));
}

#[test]
fn test_baseline_meal_next_to_a_workout_window_is_suppressed() {
    init_test_logging();
    let simulator = EnergyTimelineSimulator::default();
    let profile = AthleteProfile {
        daily_carb_goal_g: Some(450.0),
        ..scenario_profile()
    };
    let workouts = vec![WorkoutRecord::Planned(planned_workout(
        "ride",
        test_date(),
        Some(at(9, 30)),
        90.0,
        0.75,
    ))];
    let input = SimulationInput::new(test_day(), &profile, start(90.0), before_day())
        .with_workouts(&workouts);

    let meals = simulator.assemble_meals(&input, &profile, simulator.capacity_g(&profile));

    // Pre window opens at 07:30, half an hour before the 08:00 breakfast slot
    assert!(meals.iter().all(|event| event.label != "Breakfast"));
    assert!(meals.iter().any(|event| event.label == "Lunch"));
    assert!(meals.iter().any(|event| event.label == "Dinner"));
    for window_type in [
        WindowType::PreWorkout,
        WindowType::IntraWorkout,
        WindowType::PostWorkout,
    ] {
        assert!(
            meals
                .iter()
                .any(|event| event.label.starts_with(window_type.label())),
            "no meal for {window_type:?}"
        );
    }
}

#[test]
fn test_oversized_workout_duration_is_simulated_as_one_day() {
    let profile = scenario_profile();
    let endless = vec![WorkoutRecord::Completed(completed_workout(
        "endless",
        at(6, 0),
        1e12,
        0.8,
    ))];

    let timeline = simulate(&profile, None, &endless, None, start(90.0), after_day());

    assert_eq!(timeline.points.len(), 97);
    assert!(timeline
        .points
        .iter()
        .all(|point| (0.0..=100.0).contains(&point.tank_level_pct)));
    assert!(level(&timeline, "12:00") < level(&timeline, "06:00"));

    let future = simulate(&profile, None, &endless, None, start(90.0), before_day());
    assert_eq!(future.points.len(), 97);
}

#[test]
fn test_stored_plan_drives_candidates() {
    init_test_logging();
    let config = FuelingEngineConfig::default();
    let simulator = EnergyTimelineSimulator::new(&config);
    let profile = scenario_profile();
    let workouts = vec![WorkoutRecord::Planned(planned_workout(
        "ride",
        test_date(),
        Some(at(10, 0)),
        90.0,
        0.75,
    ))];

    let mut plan = DailyPlanAggregator::new(&config).aggregate(&profile, &workouts, test_date());
    let marked = plan
        .windows
        .iter_mut()
        .find(|window| window.target_carbs > 0.0 && window.window_type != WindowType::DailyBase)
        .expect("plan should carry a fueling window");
    marked.target_carbs = 42.0;
    let marked_start = marked.start;

    let mut record = DailyNutritionRecord::new(test_date());
    record.fueling_plan = Some(plan.clone());
    let input = SimulationInput::new(test_day(), &profile, start(90.0), before_day())
        .with_record(Some(&record))
        .with_workouts(&workouts);

    let meals = simulator.assemble_meals(&input, &profile, simulator.capacity_g(&profile));

    assert!(meals
        .iter()
        .any(|event| event.time == marked_start && (event.carbs_g - 42.0).abs() < 1e-9));
    for window in plan
        .windows
        .iter()
        .filter(|window| window.target_carbs > 0.0 && window.window_type != WindowType::DailyBase)
    {
        assert!(
            meals.iter().any(|event| event.time == window.start
                && event.label.starts_with(window.window_type.label())),
            "no meal for {:?}",
            window.window_type
        );
    }
}

#[test]
fn test_stored_plan_with_unknown_schema_is_ignored() {
    init_test_logging();
    let config = FuelingEngineConfig::default();
    let simulator = EnergyTimelineSimulator::new(&config);
    let profile = scenario_profile();

    let mut plan = DailyPlanAggregator::new(&config).aggregate(&profile, &[], test_date());
    plan.schema_version = 99;
    let mut record = DailyNutritionRecord::new(test_date());
    record.fueling_plan = Some(plan);
    let input = SimulationInput::new(test_day(), &profile, start(90.0), before_day())
        .with_record(Some(&record));

    let meals = simulator.assemble_meals(&input, &profile, simulator.capacity_g(&profile));

    // Falls back to the synthesizer's meal-pattern split
    assert_eq!(meals.len(), 3);
    assert!(meals.iter().all(|event| (event.carbs_g - 280.0 / 3.0).abs() < 1e-9));
}

// ============================================================================
// Deficit-aware boost
// ============================================================================

fn first_synthetic_carbs(start_pct: f64) -> f64 {
    init_test_logging();
    let simulator = EnergyTimelineSimulator::default();
    let profile = scenario_profile();
    let input = SimulationInput::new(test_day(), &profile, start(start_pct), before_day());
    let meals = simulator.assemble_meals(&input, &profile, simulator.capacity_g(&profile));
    meals
        .iter()
        .find(|event| event.kind == MealKind::Synthetic)
        .map(|event| event.carbs_g)
        .unwrap()
}

#[test]
fn test_critical_start_boosts_first_meal_toward_target() {
    // 80 % of 560 g minus 30 % of 560 g
    assert!((first_synthetic_carbs(30.0) - 280.0).abs() < 1e-9);
}

#[test]
fn test_recovery_start_adds_capped_gap() {
    // 85 % gap of 140 g is under 60 % of the 300 g goal
    assert!((first_synthetic_carbs(60.0) - (280.0 / 3.0 + 140.0)).abs() < 1e-9);
}

#[test]
fn test_full_start_is_not_boosted() {
    assert!((first_synthetic_carbs(90.0) - 280.0 / 3.0).abs() < 1e-9);
}

// ============================================================================
// Carry-over
// ============================================================================

#[test]
fn test_late_previous_meal_carries_into_next_day() {
    init_test_logging();
    let simulator = EnergyTimelineSimulator::default();
    let profile = scenario_profile();
    let previous_date: NaiveDate = test_date().pred_opt().unwrap();
    let previous = DailyNutritionRecord::new(previous_date).with_meal(meal(
        "Pasta",
        on(previous_date, 23, 30),
        150.0,
        700.0,
    ));

    let without = simulator.simulate(&SimulationInput::new(
        test_day(),
        &profile,
        start(85.0),
        after_day(),
    ));
    let with = simulator.simulate(
        &SimulationInput::new(test_day(), &profile, start(85.0), after_day())
            .with_previous_record(Some(&previous)),
    );

    assert_eq!(with.meals_used, 1);
    assert!(level(&with, "01:00") > level(&without, "01:00"));
}

// ============================================================================
// Hydration
// ============================================================================

#[test]
fn test_rest_day_fluid_deficit_decays() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[], None, TankState::new(85.0, 1000.0), after_day());

    assert!(timeline.ending_fluid_deficit_ml < 1000.0);
    for pair in timeline.points.windows(2) {
        assert!(pair[1].fluid_deficit_ml <= pair[0].fluid_deficit_ml);
    }
}

#[test]
fn test_workout_sweat_raises_fluid_deficit() {
    let profile = scenario_profile();
    let timeline = simulate(&profile, None, &[hard_hour()], None, start(85.0), after_day());

    let before = timeline.point_at("11:00").unwrap().fluid_deficit_ml;
    let after = timeline.point_at("12:00").unwrap().fluid_deficit_ml;
    assert!(after - before > 500.0, "deficit rose by {}", after - before);
}

#[test]
fn test_logged_drink_replaces_passive_rehydration_for_the_hour() {
    let profile = scenario_profile();
    let evening_ride = vec![WorkoutRecord::Completed(completed_workout(
        "evening",
        at(18, 0),
        60.0,
        0.7,
    ))];
    let drink = LoggedMealRecord {
        name: "Water".to_owned(),
        fluid_ml: 250.0,
        logged_at: Some(at(10, 0)),
        ..LoggedMealRecord::default()
    };
    let record = DailyNutritionRecord::new(test_date()).with_meal(drink);
    let dry = TankState::new(85.0, 2000.0);

    let without = simulate(&profile, None, &evening_ride, None, dry, after_day());
    let with = simulate(&profile, Some(&record), &evening_ride, None, dry, after_day());

    let at_ten = |timeline: &DayTimeline| {
        timeline.point_at("10:00").unwrap().fluid_deficit_ml
    };
    let at_eleven = |timeline: &DayTimeline| {
        timeline.point_at("11:00").unwrap().fluid_deficit_ml
    };
    assert!((at_ten(&with) - at_ten(&without)).abs() < 1e-9);
    // 250 mL drunk instead of 4 x 50 mL passive
    assert!((at_eleven(&without) - at_eleven(&with) - 50.0).abs() < 1e-6);
}
