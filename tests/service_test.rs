// ABOUTME: End-to-end tests for the fueling service over the in-memory store
// ABOUTME: Covers plan regeneration, stored-plan timelines, readiness, ranges, and error paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Duration;
use common::{
    after_day, at, before_day, breakfast_record, completed_workout, init_test_logging,
    planned_workout, scenario_profile, test_date,
};
use fuelgauge::database::{FuelingPlanRepository, InMemoryStore};
use fuelgauge::errors::ErrorCode;
use fuelgauge::models::{FuelState, MetabolicDayState, TankState};
use fuelgauge::services::FuelingService;
use fuelgauge_engine::absorption::AbsorptionProfile;
use fuelgauge_engine::meal_events::MealEvent;
use fuelgauge_engine::{FuelingEngineConfig, GlycogenStatus};
use uuid::Uuid;

fn setup() -> (InMemoryStore, FuelingService, Uuid) {
    init_test_logging();
    let store = InMemoryStore::new();
    let profile = scenario_profile();
    let athlete_id = profile.athlete_id;
    store.put_profile(profile);
    let service = FuelingService::in_memory(&store, FuelingEngineConfig::default());
    (store, service, athlete_id)
}

fn seed_start(store: &InMemoryStore, athlete_id: Uuid, glycogen_pct: f64) {
    let mut state = MetabolicDayState::empty(test_date());
    state.set_starting(TankState::new(glycogen_pct, 0.0));
    store.put_day_state(athlete_id, state);
}

#[tokio::test]
async fn test_regenerated_plan_is_stored_with_mirrored_goal() -> Result<()> {
    let (store, service, athlete_id) = setup();
    store.add_planned_workout(
        athlete_id,
        planned_workout("ride", test_date(), Some(at(10, 0)), 90.0, 0.9),
    );

    let plan = service.regenerate_plan(athlete_id, test_date()).await?;

    assert_eq!(plan.fuel_state, FuelState::Performance);
    assert!(!plan.windows.is_empty());
    let stored = store.get_fueling_plan(athlete_id, test_date()).await?.unwrap();
    assert_eq!(stored, plan);
    let record = store.record(athlete_id, test_date()).unwrap();
    assert_eq!(record.carb_goal_g, Some(plan.daily_totals.carbs_g));
    Ok(())
}

#[tokio::test]
async fn test_regenerating_keeps_logged_meals() -> Result<()> {
    let (store, service, athlete_id) = setup();
    store.put_record(athlete_id, breakfast_record());

    service.regenerate_plan(athlete_id, test_date()).await?;

    let record = store.record(athlete_id, test_date()).unwrap();
    assert_eq!(record.meals.len(), 1);
    assert!(record.fueling_plan.is_some());
    Ok(())
}

#[tokio::test]
async fn test_plans_regenerate_across_a_range() -> Result<()> {
    let (_, service, athlete_id) = setup();
    let from = test_date() - Duration::days(2);

    let plans = service.regenerate_plans(athlete_id, from, test_date()).await?;

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].date, Some(from));
    assert_eq!(plans[2].date, Some(test_date()));

    let error = service
        .regenerate_plans(athlete_id, test_date(), from)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_stored_plan_windows_appear_on_a_future_timeline() -> Result<()> {
    let (store, service, athlete_id) = setup();
    store.add_planned_workout(
        athlete_id,
        planned_workout("ride", test_date(), Some(at(10, 0)), 120.0, 0.75),
    );
    seed_start(&store, athlete_id, 90.0);
    service.regenerate_plan(athlete_id, test_date()).await?;

    let timeline = service
        .day_timeline(athlete_id, test_date(), before_day(), None)
        .await?;

    assert!(timeline.synthetic_meals > 0);
    assert!(timeline.points.iter().all(|point| point.is_future));
    Ok(())
}

#[tokio::test]
async fn test_ghost_meal_preview_raises_the_curve() -> Result<()> {
    let (store, service, athlete_id) = setup();
    store.put_record(athlete_id, breakfast_record());
    seed_start(&store, athlete_id, 85.0);

    let baseline = service
        .day_timeline(athlete_id, test_date(), after_day(), None)
        .await?;
    let ghost = MealEvent::ghost("Gel", at(14, 0), 50.0, AbsorptionProfile::rapid());
    let preview = service
        .day_timeline(athlete_id, test_date(), after_day(), Some(ghost))
        .await?;

    assert!(preview.level_at("14:45").unwrap() > baseline.level_at("14:45").unwrap());
    assert!(preview.ending_glycogen_pct > baseline.ending_glycogen_pct);
    Ok(())
}

#[tokio::test]
async fn test_glycogen_status_reflects_completed_workout() -> Result<()> {
    let (store, service, athlete_id) = setup();
    store.add_completed_workout(
        athlete_id,
        test_date(),
        completed_workout("ride", at(8, 0), 150.0, 0.95),
    );
    seed_start(&store, athlete_id, 90.0);

    let morning = service.glycogen_status(athlete_id, test_date(), at(7, 0)).await?;
    let afternoon = service.glycogen_status(athlete_id, test_date(), at(14, 0)).await?;

    assert_eq!(morning.status, GlycogenStatus::Ready);
    assert!(afternoon.percentage < morning.percentage);
    assert!(afternoon.breakdown.workout_drain_g > 0.0);
    assert_ne!(afternoon.status, GlycogenStatus::Ready);
    Ok(())
}

#[tokio::test]
async fn test_timeline_range_and_finalize_agree() -> Result<()> {
    let (store, service, athlete_id) = setup();
    let from = test_date() - Duration::days(1);
    let mut state = MetabolicDayState::empty(from);
    state.set_starting(TankState::new(80.0, 0.0));
    store.put_day_state(athlete_id, state);

    let timelines = service
        .timeline_range(athlete_id, from, test_date(), after_day())
        .await?;
    let finalized = service.finalize_day(athlete_id, test_date(), after_day()).await?;

    assert_eq!(timelines.len(), 2);
    assert!((finalized.ending_glycogen_pct - timelines[1].ending_glycogen_pct).abs() < 1e-12);
    let next = store
        .day_state(athlete_id, test_date().succ_opt().unwrap())
        .unwrap();
    assert_eq!(next.starting_state(), Some(finalized.ending_state()));
    Ok(())
}

#[tokio::test]
async fn test_unknown_athlete_is_not_found() {
    let (_, service, _) = setup();
    let error = service
        .regenerate_plan(Uuid::new_v4(), test_date())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}
