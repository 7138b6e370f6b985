// ABOUTME: Workout-centred fueling strategy producing pre/intra/post windows and daily totals
// ABOUTME: Fuel-state classification, intra-workout carb rates, overrides, and calorie breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fueling Strategy Calculator
//!
//! Turns one workout (or a virtual rest day) into a `SerializedFuelingPlan`.
//!
//! # Scientific References
//!
//! - Burke, L.M., et al. (2011). Carbohydrates for training and competition.
//!   *Journal of Sports Sciences*, 29(sup1), S17-S27.
//!   <https://doi.org/10.1080/02640414.2011.585473>
//!
//! - Jeukendrup, A. (2014). A step towards personalized sports nutrition:
//!   carbohydrate intake during exercise. *Sports Medicine*, 44(S1), 25-33.
//!   <https://doi.org/10.1007/s40279-014-0148-z>
//!
//! - Impey, S.G., et al. (2018). Fuel for the work required: train-low strategies.
//!   *Sports Medicine*, 48, 1031-1048.
//!   <https://doi.org/10.1007/s40279-018-0867-7>

use crate::config::{FuelingEngineConfig, StrategyConfig};
use crate::sweat_rate::SweatRateEstimator;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use fuelgauge_core::constants::energy::KJ_PER_WATT_HOUR;
use fuelgauge_core::constants::limits::MAX_WORKOUT_DURATION_MIN;
use fuelgauge_core::models::{
    AthleteProfile, CalorieBreakdown, DailyTotals, FuelState, FuelingWindow,
    SerializedFuelingPlan, StrategyOverride, WindowType, WorkoutRecord, REST_WORKOUT_TYPE,
};
use serde::{Deserialize, Serialize};
use std::slice;

const NO_START_NOTE: &str =
    "No start time is scheduled for this workout, so timed fueling windows were not generated.";
const TRAIN_LOW_NOTE: &str =
    "Train-low session: intra-workout carbohydrate is withheld. Keep intensity controlled and refuel fully afterwards.";
const RACE_DAY_NOTE: &str =
    "Race day: intra-workout carbohydrate is raised to your personal ceiling. Use only products you have practised with.";
const REST_NOTE: &str = "Rest day: focus on balanced meals and steady hydration.";

/// One workout as seen by the strategy calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutContext {
    /// Sport or workout type ("rest" for rest days)
    pub workout_type: String,
    /// Duration (minutes)
    pub duration_min: f64,
    /// Intensity (fraction of FTP)
    pub intensity: f64,
    /// Coach-selected strategy
    pub strategy_override: Option<StrategyOverride>,
    /// Scheduled start
    pub start: Option<DateTime<Utc>>,
    /// Calendar date
    pub date: Option<NaiveDate>,
    /// Workout title
    pub title: Option<String>,
    /// Workout identifier
    pub workout_id: Option<String>,
    /// Ambient temperature (°C)
    pub temperature_c: Option<f64>,
}

impl WorkoutContext {
    /// Virtual context for a day without workouts
    #[must_use]
    pub fn rest(date: Option<NaiveDate>) -> Self {
        Self {
            workout_type: REST_WORKOUT_TYPE.to_owned(),
            duration_min: 0.0,
            intensity: 0.0,
            strategy_override: None,
            start: None,
            date,
            title: Some("Rest Day".to_owned()),
            workout_id: None,
            temperature_c: None,
        }
    }

    /// Context for a resolved workout record
    #[must_use]
    pub fn from_workout(
        workout: &WorkoutRecord,
        profile: &AthleteProfile,
        default_intensity: f64,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            workout_type: workout.workout_type().to_owned(),
            duration_min: workout.duration_min(),
            intensity: workout.intensity(profile.ftp_watts, default_intensity),
            strategy_override: workout.strategy_override(),
            start: workout.start(),
            date,
            title: Some(workout.title().to_owned()).filter(|title| !title.is_empty()),
            workout_id: Some(workout.id().to_owned()),
            temperature_c: workout.environment().best_temperature(),
        }
    }

    /// Rest contexts are typed "rest" or have no duration
    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.workout_type.eq_ignore_ascii_case(REST_WORKOUT_TYPE) || self.duration_min <= 0.0
    }

    /// Copy with the duration clamped to `[0, MAX_WORKOUT_DURATION_MIN]`
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut context = self.clone();
        context.duration_min = self.bounded_duration_min();
        context
    }

    fn bounded_duration_min(&self) -> f64 {
        if self.duration_min.is_finite() {
            self.duration_min.clamp(0.0, MAX_WORKOUT_DURATION_MIN)
        } else {
            0.0
        }
    }

    fn hours(&self) -> f64 {
        self.bounded_duration_min() / 60.0
    }
}

/// Computes fueling plans for single workouts
#[derive(Debug, Clone)]
pub struct FuelingStrategyCalculator {
    config: StrategyConfig,
    sweat: SweatRateEstimator,
    fallback_sweat_rate: f64,
}

impl Default for FuelingStrategyCalculator {
    fn default() -> Self {
        Self::new(&FuelingEngineConfig::default())
    }
}

struct IntraTargets {
    carbs_per_hour: f64,
    fluid_ml: f64,
    sodium_mg: f64,
}

fn lerp(low: f64, high: f64, fraction: f64) -> f64 {
    (high - low).mul_add(fraction.clamp(0.0, 1.0), low)
}

impl FuelingStrategyCalculator {
    /// Create a calculator from the engine configuration
    #[must_use]
    pub fn new(config: &FuelingEngineConfig) -> Self {
        Self {
            config: config.strategy.clone(),
            sweat: SweatRateEstimator::new(config.strategy.sweat.clone()),
            fallback_sweat_rate: config.defaults.sweat_rate_l_per_hour,
        }
    }

    /// Daily carbohydrate target for a fuel state (g)
    #[must_use]
    pub fn daily_carbs(profile: &AthleteProfile, fuel_state: FuelState) -> f64 {
        profile.fuel_states.band(fuel_state).midpoint_g_per_kg()
            * profile.weight_kg
            * profile.carb_scale()
    }

    /// Whole-day energy target across every context of the day
    #[must_use]
    pub fn calorie_breakdown(
        &self,
        profile: &AthleteProfile,
        contexts: &[WorkoutContext],
    ) -> CalorieBreakdown {
        let profile = profile.sanitized();
        let base_calories =
            profile.bmr_kcal * self.config.activity_factors.factor(profile.activity_level);
        let activity_calories: f64 = contexts
            .iter()
            .filter(|context| !context.is_rest())
            .map(|context| {
                profile.ftp_watts * context.intensity * context.hours() * KJ_PER_WATT_HOUR
            })
            .sum();
        let adjustment_calories =
            (base_calories + activity_calories) * profile.adjustment_percent / 100.0;
        CalorieBreakdown {
            base_calories,
            activity_calories,
            adjustment_calories,
            total_calories: base_calories + activity_calories + adjustment_calories,
        }
    }

    /// Fueling plan for one workout context
    #[must_use]
    pub fn calculate(
        &self,
        profile: &AthleteProfile,
        context: &WorkoutContext,
    ) -> SerializedFuelingPlan {
        let profile = profile.sanitized();
        let context = &context.sanitized();
        let fuel_state = if context.is_rest() {
            FuelState::Eco
        } else {
            profile.fuel_states.classify(context.intensity)
        };
        let calorie_breakdown = self.calorie_breakdown(&profile, slice::from_ref(context));

        let mut totals = self.baseline_totals(&profile, fuel_state);
        totals.calories = calorie_breakdown.total_calories;

        let mut plan = SerializedFuelingPlan::new(fuel_state, totals);
        plan.date = context.date;
        plan.calorie_breakdown = calorie_breakdown;

        if context.is_rest() {
            plan.notes.push(REST_NOTE.to_owned());
            return plan;
        }

        let strategy = context.strategy_override.unwrap_or_default();
        let intra = self.intra_targets(&profile, context, strategy);
        plan.daily_totals.fluid_ml += intra.fluid_ml;
        plan.daily_totals.sodium_mg += intra.sodium_mg;

        match strategy {
            StrategyOverride::TrainLow => plan.notes.push(TRAIN_LOW_NOTE.to_owned()),
            StrategyOverride::RaceDay => plan.notes.push(RACE_DAY_NOTE.to_owned()),
            StrategyOverride::Standard => {}
        }

        let Some(start) = context.start else {
            plan.notes.push(NO_START_NOTE.to_owned());
            return plan;
        };

        let end = start + Duration::seconds((context.duration_min * 60.0).round() as i64);
        plan.windows = vec![
            self.pre_window(&profile, context, fuel_state, strategy, start),
            Self::intra_window(context, strategy, &intra, start, end),
            self.post_window(&profile, context, strategy, &intra, end),
        ];
        plan
    }

    fn baseline_totals(&self, profile: &AthleteProfile, fuel_state: FuelState) -> DailyTotals {
        let baseline = &self.config.baseline;
        DailyTotals {
            calories: 0.0,
            carbs_g: Self::daily_carbs(profile, fuel_state),
            protein_g: baseline.protein_g_per_kg * profile.weight_kg,
            fat_g: baseline.fat_g_per_kg * profile.weight_kg,
            fluid_ml: baseline.fluid_ml,
            sodium_mg: baseline.sodium_mg,
        }
    }

    fn intra_targets(
        &self,
        profile: &AthleteProfile,
        context: &WorkoutContext,
        strategy: StrategyOverride,
    ) -> IntraTargets {
        let intra = &self.config.intra;
        let duration = context.duration_min;

        let base_rate = if duration < intra.short_duration_min {
            if context.intensity > intra.short_high_intensity_threshold {
                intra.short_high_intensity_carbs_per_hour
            } else {
                0.0
            }
        } else if duration <= intra.long_duration_min {
            lerp(
                intra.medium_min_carbs_per_hour,
                intra.medium_max_carbs_per_hour,
                context.intensity,
            )
        } else {
            lerp(
                intra.long_min_carbs_per_hour,
                intra.long_max_carbs_per_hour,
                context.intensity,
            )
        };

        let cap = match strategy {
            StrategyOverride::RaceDay => profile.max_carbs_per_hour,
            _ => intra.absolute_cap_carbs_per_hour.min(profile.max_carbs_per_hour),
        };
        let carbs_per_hour = match strategy {
            StrategyOverride::TrainLow => 0.0,
            _ => (base_rate * profile.carb_sensitivity).min(cap),
        };

        let sweat_l_per_hour = profile.sweat_rate_l_per_hour.unwrap_or_else(|| {
            self.sweat.estimate(
                Some(
                    context
                        .temperature_c
                        .unwrap_or(self.config.sweat.default_temperature_c),
                ),
                Some(context.intensity),
                self.fallback_sweat_rate,
            )
        });
        let fluid_l = sweat_l_per_hour * context.hours();

        IntraTargets {
            carbs_per_hour,
            fluid_ml: fluid_l * 1000.0,
            sodium_mg: fluid_l * profile.sodium_mg_per_l,
        }
    }

    fn pre_window(
        &self,
        profile: &AthleteProfile,
        context: &WorkoutContext,
        fuel_state: FuelState,
        strategy: StrategyOverride,
        start: DateTime<Utc>,
    ) -> FuelingWindow {
        let pre = &self.config.pre;
        let mut window = FuelingWindow::new(
            WindowType::PreWorkout,
            start - Duration::minutes(profile.pre_workout_window_min),
            start,
        );

        window.target_carbs = if strategy == StrategyOverride::TrainLow {
            pre.train_low_carbs_g
        } else if fuel_state == FuelState::Performance
            || context.duration_min > pre.loaded_duration_min
        {
            pre.loaded_carbs_g_per_kg * profile.weight_kg
        } else {
            pre.carbs_g_per_kg * profile.weight_kg
        };
        window.target_protein = pre.protein_g;
        window.target_fat = pre.fat_g;
        window.target_fluid = pre.fluid_ml_per_kg * profile.weight_kg;
        window.target_sodium = window.target_fluid / 1000.0 * profile.sodium_mg_per_l;
        window.description = if strategy == StrategyOverride::TrainLow {
            "Keep carbohydrate minimal before this session; protein and fluids only.".to_owned()
        } else {
            "Top up glycogen with easily digested carbohydrate and fluids.".to_owned()
        };
        link(&mut window, context);
        window
    }

    fn intra_window(
        context: &WorkoutContext,
        strategy: StrategyOverride,
        intra: &IntraTargets,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FuelingWindow {
        let mut window = FuelingWindow::new(WindowType::IntraWorkout, start, end);
        window.target_carbs = intra.carbs_per_hour * context.hours();
        window.target_fluid = intra.fluid_ml;
        window.target_sodium = intra.sodium_mg;
        window.description = if intra.carbs_per_hour > 0.0 {
            format!(
                "Take about {:.0} g carbohydrate per hour in small, regular doses.",
                intra.carbs_per_hour
            )
        } else {
            "Water and electrolytes only for this session.".to_owned()
        };
        if strategy == StrategyOverride::RaceDay {
            window.supplements = vec![
                "Caffeine 3 mg/kg about 60 minutes before the start".to_owned(),
                "Extra sodium in late-race bottles".to_owned(),
            ];
        }
        link(&mut window, context);
        window
    }

    fn post_window(
        &self,
        profile: &AthleteProfile,
        context: &WorkoutContext,
        strategy: StrategyOverride,
        intra: &IntraTargets,
        end: DateTime<Utc>,
    ) -> FuelingWindow {
        let post = &self.config.post;
        let mut window = FuelingWindow::new(
            WindowType::PostWorkout,
            end,
            end + Duration::minutes(profile.post_workout_window_min),
        );
        window.target_carbs = post.carbs_g_per_kg * profile.weight_kg;
        window.target_protein = if strategy == StrategyOverride::TrainLow {
            post.train_low_protein_g
        } else {
            post.protein_g
        };
        window.target_fat = post.fat_g;
        window.target_fluid = intra.fluid_ml * post.fluid_replacement_fraction;
        window.target_sodium = intra.sodium_mg * post.fluid_replacement_fraction;
        window.description =
            "Recover with carbohydrate and protein, and replace lost fluids.".to_owned();
        link(&mut window, context);
        window
    }
}

fn link(window: &mut FuelingWindow, context: &WorkoutContext) {
    window.linked_workout_id.clone_from(&context.workout_id);
    window.workout_title.clone_from(&context.title);
}
