// ABOUTME: Persisted per-day metabolic state linking consecutive simulated days
// ABOUTME: MetabolicDayState with lazily-filled starting/ending tank and fluid fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Glycogen tank level and fluid deficit at an instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    /// Tank level as a percentage of capacity
    pub glycogen_pct: f64,
    /// Accumulated fluid deficit (mL)
    pub fluid_deficit_ml: f64,
}

impl TankState {
    /// Clamped state
    #[must_use]
    pub fn new(glycogen_pct: f64, fluid_deficit_ml: f64) -> Self {
        Self {
            glycogen_pct: if glycogen_pct.is_finite() {
                glycogen_pct.clamp(0.0, 100.0)
            } else {
                0.0
            },
            fluid_deficit_ml: if fluid_deficit_ml.is_finite() {
                fluid_deficit_ml.max(0.0)
            } else {
                0.0
            },
        }
    }
}

/// One athlete-day of chained metabolic state
///
/// Created lazily, so every field may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetabolicDayState {
    /// Local calendar date
    pub date: NaiveDate,
    /// Tank level at local midnight (%)
    #[serde(default)]
    pub starting_glycogen_pct: Option<f64>,
    /// Fluid deficit at local midnight (mL)
    #[serde(default)]
    pub starting_fluid_deficit_ml: Option<f64>,
    /// Tank level at the end of the day (%)
    #[serde(default)]
    pub ending_glycogen_pct: Option<f64>,
    /// Fluid deficit at the end of the day (mL)
    #[serde(default)]
    pub ending_fluid_deficit_ml: Option<f64>,
}

impl MetabolicDayState {
    /// Empty record for a date
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            starting_glycogen_pct: None,
            starting_fluid_deficit_ml: None,
            ending_glycogen_pct: None,
            ending_fluid_deficit_ml: None,
        }
    }

    /// Starting state, present only when the glycogen level is recorded
    #[must_use]
    pub fn starting_state(&self) -> Option<TankState> {
        self.starting_glycogen_pct.map(|glycogen| {
            TankState::new(glycogen, self.starting_fluid_deficit_ml.unwrap_or(0.0))
        })
    }

    /// Ending state, present only when the glycogen level is recorded
    #[must_use]
    pub fn ending_state(&self) -> Option<TankState> {
        self.ending_glycogen_pct.map(|glycogen| {
            TankState::new(glycogen, self.ending_fluid_deficit_ml.unwrap_or(0.0))
        })
    }

    /// Record a starting state
    pub fn set_starting(&mut self, state: TankState) {
        self.starting_glycogen_pct = Some(state.glycogen_pct);
        self.starting_fluid_deficit_ml = Some(state.fluid_deficit_ml);
    }

    /// Record an ending state
    pub fn set_ending(&mut self, state: TankState) {
        self.ending_glycogen_pct = Some(state.glycogen_pct);
        self.ending_fluid_deficit_ml = Some(state.fluid_deficit_ml);
    }
}
