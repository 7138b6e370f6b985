// ABOUTME: Workout records supplied by the training-calendar and activity-sync collaborators
// ABOUTME: Tagged CompletedWorkout/PlannedWorkout variants with completed-overrides-planned merging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fueling::StrategyOverride;
use crate::constants::limits;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Workout type string marking a scheduled rest day
pub const REST_WORKOUT_TYPE: &str = "rest";

/// Ambient temperature sources attached to a workout, most trusted first
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutEnvironment {
    /// Average temperature recorded by the device (°C)
    pub avg_temperature_c: Option<f64>,
    /// Temperature from a weather lookup at activity time (°C)
    pub weather_temperature_c: Option<f64>,
    /// Forecast temperature for a planned session (°C)
    pub forecast_temperature_c: Option<f64>,
}

impl WorkoutEnvironment {
    /// First available temperature in trust order
    #[must_use]
    pub fn best_temperature(&self) -> Option<f64> {
        self.avg_temperature_c
            .or(self.weather_temperature_c)
            .or(self.forecast_temperature_c)
            .filter(|temperature| temperature.is_finite())
    }
}

/// Activity recorded by a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedWorkout {
    /// Activity identifier
    pub id: String,
    /// Planned workout this activity fulfils
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_workout_id: Option<String>,
    /// Activity title
    #[serde(default)]
    pub title: String,
    /// Sport or workout type
    #[serde(default)]
    pub workout_type: String,
    /// Start instant
    pub start: DateTime<Utc>,
    /// Moving duration (minutes)
    pub duration_min: f64,
    /// Recorded intensity factor (fraction of FTP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    /// Average power (W)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_power_watts: Option<f64>,
    /// Mechanical work (kJ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilojoules: Option<f64>,
    /// Device calorie estimate (kcal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Temperature metadata
    #[serde(default)]
    pub environment: WorkoutEnvironment,
}

/// Session scheduled on the training calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Planned workout identifier
    pub id: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Session title
    #[serde(default)]
    pub title: String,
    /// Sport or workout type ("rest" marks a rest day)
    #[serde(default)]
    pub workout_type: String,
    /// Scheduled start, when the athlete has set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// Planned duration (minutes)
    pub duration_min: f64,
    /// Target intensity (fraction of FTP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    /// Coach-selected fueling strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_override: Option<StrategyOverride>,
    /// Temperature metadata
    #[serde(default)]
    pub environment: WorkoutEnvironment,
}

/// A workout resolved once at the engine boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkoutRecord {
    /// Recorded activity
    Completed(CompletedWorkout),
    /// Scheduled session
    Planned(PlannedWorkout),
}

impl WorkoutRecord {
    /// Identifier of the underlying record
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Completed(workout) => &workout.id,
            Self::Planned(workout) => &workout.id,
        }
    }

    /// Display title
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Completed(workout) => &workout.title,
            Self::Planned(workout) => &workout.title,
        }
    }

    /// Sport or workout type
    #[must_use]
    pub fn workout_type(&self) -> &str {
        match self {
            Self::Completed(workout) => &workout.workout_type,
            Self::Planned(workout) => &workout.workout_type,
        }
    }

    /// Start instant, when known
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Completed(workout) => Some(workout.start),
            Self::Planned(workout) => workout.start,
        }
    }

    /// End instant, when the start is known
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.start()
            .map(|start| start + Duration::seconds((self.duration_min() * 60.0).round() as i64))
    }

    /// Duration in minutes, clamped to `[0, MAX_WORKOUT_DURATION_MIN]`
    #[must_use]
    pub fn duration_min(&self) -> f64 {
        let duration = match self {
            Self::Completed(workout) => workout.duration_min,
            Self::Planned(workout) => workout.duration_min,
        };
        if duration.is_finite() {
            duration.clamp(0.0, limits::MAX_WORKOUT_DURATION_MIN)
        } else {
            0.0
        }
    }

    /// Whether the record describes a completed activity
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Rest days are typed "rest" or have no duration
    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.workout_type().eq_ignore_ascii_case(REST_WORKOUT_TYPE) || self.duration_min() <= 0.0
    }

    /// Temperature metadata
    #[must_use]
    pub const fn environment(&self) -> &WorkoutEnvironment {
        match self {
            Self::Completed(workout) => &workout.environment,
            Self::Planned(workout) => &workout.environment,
        }
    }

    /// Coach-selected strategy; completed activities never carry one
    #[must_use]
    pub const fn strategy_override(&self) -> Option<StrategyOverride> {
        match self {
            Self::Completed(_) => None,
            Self::Planned(workout) => workout.strategy_override,
        }
    }

    /// Intensity as a fraction of FTP, clamped to `[0, 1]`
    ///
    /// Recorded intensity wins, then average power over FTP, then `fallback`.
    #[must_use]
    pub fn intensity(&self, ftp_watts: f64, fallback: f64) -> f64 {
        let explicit = match self {
            Self::Completed(workout) => workout.intensity.or_else(|| {
                workout
                    .avg_power_watts
                    .filter(|_| ftp_watts > 0.0)
                    .map(|power| power / ftp_watts)
            }),
            Self::Planned(workout) => workout.intensity,
        };
        explicit
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(fallback)
            .clamp(0.0, 1.0)
    }
}

/// Merge completed and planned workouts into one list sorted by start
///
/// A completed workout whose `planned_workout_id` matches a planned entry
/// suppresses that planned entry. Records without a start sort last.
#[must_use]
pub fn merge_workouts(
    completed: Vec<CompletedWorkout>,
    planned: Vec<PlannedWorkout>,
) -> Vec<WorkoutRecord> {
    let fulfilled: HashSet<String> = completed
        .iter()
        .filter_map(|workout| workout.planned_workout_id.clone())
        .collect();

    let mut merged: Vec<WorkoutRecord> = completed
        .into_iter()
        .map(WorkoutRecord::Completed)
        .chain(
            planned
                .into_iter()
                .filter(|workout| !fulfilled.contains(&workout.id))
                .map(WorkoutRecord::Planned),
        )
        .collect();

    merged.sort_by_key(|workout| (workout.start().is_none(), workout.start()));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn planned(id: &str, hour: u32) -> PlannedWorkout {
        PlannedWorkout {
            id: id.to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            title: format!("Planned {id}"),
            workout_type: "ride".to_owned(),
            start: Some(Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap()),
            duration_min: 60.0,
            intensity: Some(0.7),
            strategy_override: None,
            environment: WorkoutEnvironment::default(),
        }
    }

    #[test]
    fn test_completed_suppresses_linked_planned() {
        let completed = CompletedWorkout {
            id: "act-1".to_owned(),
            planned_workout_id: Some("p-1".to_owned()),
            title: "Morning ride".to_owned(),
            workout_type: "ride".to_owned(),
            start: Utc.with_ymd_and_hms(2025, 6, 2, 7, 0, 0).unwrap(),
            duration_min: 75.0,
            intensity: None,
            avg_power_watts: Some(200.0),
            kilojoules: None,
            calories: None,
            environment: WorkoutEnvironment::default(),
        };
        let merged = merge_workouts(vec![completed], vec![planned("p-1", 9), planned("p-2", 17)]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id(), "act-1");
        assert_eq!(merged[1].id(), "p-2");
        assert!((merged[0].intensity(250.0, 0.65) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_backfill_order() {
        let environment = WorkoutEnvironment {
            avg_temperature_c: None,
            weather_temperature_c: Some(27.0),
            forecast_temperature_c: Some(31.0),
        };
        assert_eq!(environment.best_temperature(), Some(27.0));
        assert_eq!(WorkoutEnvironment::default().best_temperature(), None);
    }

    #[test]
    fn test_oversized_duration_is_clamped_to_one_day() {
        let mut workout = planned("p-huge", 9);
        workout.duration_min = 1e12;
        let record = WorkoutRecord::Planned(workout);

        assert!((record.duration_min() - limits::MAX_WORKOUT_DURATION_MIN).abs() < f64::EPSILON);
        let start = record.start().unwrap();
        assert_eq!(record.end(), Some(start + Duration::days(1)));

        let mut endless = planned("p-inf", 9);
        endless.duration_min = f64::INFINITY;
        assert!(WorkoutRecord::Planned(endless).is_rest());
    }
}
