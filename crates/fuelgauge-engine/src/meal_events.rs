// ABOUTME: Meal events consumed by the simulator and resolution of logged meal records
// ABOUTME: Tagged Logged/Synthetic/Probable kinds, timestamp anchoring, and previous-day carry-over
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::absorption::{self, AbsorptionProfile};
use chrono::{DateTime, Duration, Utc};
use fuelgauge_core::constants::energy::KCAL_PER_G_CARB;
use fuelgauge_core::models::{AthleteProfile, DailyNutritionRecord, LoggedMealRecord};
use fuelgauge_core::time::LocalDay;
use serde::Serialize;
use tracing::debug;

/// Where a meal event came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MealKind {
    /// Logged by the athlete
    Logged,
    /// Fabricated at full weight for an upcoming window
    Synthetic,
    /// Fabricated at partial weight for a window already passed
    Probable {
        /// Fraction of the window's carbohydrate assumed eaten
        weight: f64,
    },
}

/// A meal as seen by the simulator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealEvent {
    /// Ingestion instant
    pub time: DateTime<Utc>,
    /// Carbohydrate (g)
    pub carbs_g: f64,
    /// Energy (kcal)
    pub kcal: f64,
    /// Fluid (mL)
    pub fluid_ml: f64,
    /// Absorption curve
    pub profile: AbsorptionProfile,
    /// Source of the event
    pub kind: MealKind,
    /// Display label
    pub label: String,
}

impl MealEvent {
    /// What-if meal injected by the caller regardless of the clock
    #[must_use]
    pub fn ghost(
        label: impl Into<String>,
        time: DateTime<Utc>,
        carbs_g: f64,
        profile: AbsorptionProfile,
    ) -> Self {
        Self {
            time,
            carbs_g,
            kcal: carbs_g * KCAL_PER_G_CARB,
            fluid_ml: 0.0,
            profile,
            kind: MealKind::Synthetic,
            label: label.into(),
        }
    }

    /// Whether the event was fabricated (synthetic or probable)
    #[must_use]
    pub const fn synthetic(&self) -> bool {
        !matches!(self.kind, MealKind::Logged)
    }

    /// Whether the event is a partial-weight fabrication
    #[must_use]
    pub const fn probable(&self) -> bool {
        matches!(self.kind, MealKind::Probable { .. })
    }

    /// Minutes from ingestion to `instant`
    #[must_use]
    pub fn minutes_until(&self, instant: DateTime<Utc>) -> f64 {
        (instant - self.time).num_seconds() as f64 / 60.0
    }

    /// Whether any carbohydrate is still appearing at `instant`
    #[must_use]
    pub fn is_absorbing_at(&self, instant: DateTime<Utc>) -> bool {
        let elapsed = self.minutes_until(instant);
        elapsed > 0.0 && elapsed < self.profile.duration_min()
    }
}

/// Resolve when a logged meal was eaten
///
/// Explicit instants win, then a bare clock time anchored to `day`, then the
/// athlete's meal-pattern slot of the same name.
#[must_use]
pub fn resolve_meal_time(
    meal: &LoggedMealRecord,
    day: &LocalDay,
    profile: &AthleteProfile,
) -> Option<DateTime<Utc>> {
    if let Some(logged_at) = meal.logged_at {
        return Some(logged_at);
    }
    if let Some(clock) = meal.time_of_day.as_deref() {
        if let Some(instant) = day.parse_clock(clock) {
            return Some(instant);
        }
    }
    let slot_name = meal.meal_slot.as_deref()?;
    profile
        .meal_pattern
        .iter()
        .find(|slot| slot.name.eq_ignore_ascii_case(slot_name.trim()))
        .map(|slot| day.at_local_time(slot.time))
}

fn profile_for(meal: &LoggedMealRecord) -> AbsorptionProfile {
    meal.absorption_profile
        .as_deref()
        .and_then(AbsorptionProfile::by_id)
        .unwrap_or_else(|| absorption::classify_food(&meal.name))
}

/// Logged meals of a record as simulator events; unresolvable meals are dropped
#[must_use]
pub fn resolve_logged_meals(
    record: Option<&DailyNutritionRecord>,
    day: &LocalDay,
    profile: &AthleteProfile,
) -> Vec<MealEvent> {
    let Some(record) = record else {
        return Vec::new();
    };

    let mut events: Vec<MealEvent> = record
        .meals
        .iter()
        .filter(|meal| meal.carbs_g > 0.0 || meal.effective_kcal() > 0.0 || meal.has_fluid())
        .filter_map(|meal| {
            let Some(time) = resolve_meal_time(meal, day, profile) else {
                debug!(
                    date = %record.date,
                    meal = %meal.name,
                    "Dropping meal without a resolvable time"
                );
                return None;
            };
            Some(MealEvent {
                time,
                carbs_g: meal.carbs_g.max(0.0),
                kcal: meal.effective_kcal().max(0.0),
                fluid_ml: meal.fluid_ml.max(0.0),
                profile: profile_for(meal),
                kind: MealKind::Logged,
                label: meal.name.clone(),
            })
        })
        .collect();
    events.sort_by_key(|event| event.time);
    events
}

/// Previous-day logged meals still absorbing at the start of `day`
///
/// Their fluid was already counted on the previous day.
#[must_use]
pub fn carry_over_meals(
    previous: Option<&DailyNutritionRecord>,
    day: &LocalDay,
    profile: &AthleteProfile,
) -> Vec<MealEvent> {
    let Some(previous_date) = day.date.pred_opt() else {
        return Vec::new();
    };
    let previous_day = LocalDay::new(previous_date, day.utc_offset);
    resolve_logged_meals(previous, &previous_day, profile)
        .into_iter()
        .filter(|meal| meal.time < day.start_utc && meal.is_absorbing_at(day.start_utc))
        .map(|mut meal| {
            meal.fluid_ml = 0.0;
            meal
        })
        .collect()
}

/// Logged meals carrying fluid, for the passive-rehydration check
#[must_use]
pub fn logged_fluid_times(meals: &[MealEvent]) -> Vec<DateTime<Utc>> {
    meals
        .iter()
        .filter(|meal| !meal.synthetic() && meal.fluid_ml > 0.0)
        .map(|meal| meal.time)
        .collect()
}

/// Whether `instant` lies within `minutes` of `other`
#[must_use]
pub fn within_minutes(instant: DateTime<Utc>, other: DateTime<Utc>, minutes: f64) -> bool {
    let tolerance = Duration::seconds((minutes * 60.0).round() as i64);
    (instant - other).abs() <= tolerance
}
