// ABOUTME: Glycogen, hydration, and fueling-strategy algorithms for the Fuelgauge platform
// ABOUTME: Pure synchronous computation with no storage or network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fuelgauge Engine
//!
//! Everything needed to turn an athlete profile, a day's workouts, and logged
//! meals into a simulated glycogen and fluid timeline. Persistence and the
//! day-to-day state chain live in the service crate.
//!
//! ## Modules
//!
//! - **absorption**: Gamma-shaped rate of appearance and food classification
//! - **sweat_rate**: Temperature × intensity sweat rate table
//! - **fueling_strategy**: Per-workout fuel state, windows, and daily totals
//! - **window_merger**: Merging of overlapping fueling windows
//! - **daily_plan**: Aggregation of per-workout plans into a stored daily plan
//! - **workout_events** / **meal_events**: Simulation inputs on the step grid
//! - **synthetic_intake**: Expected meals when nothing has been logged
//! - **energy_timeline**: The 24-hour tank and hydration simulator
//! - **glycogen_status**: Readiness summary from actual intake

pub use fuelgauge_core::{constants, errors, models, time};

/// Engine configuration with environment overrides
pub mod config;

/// Carbohydrate absorption curves
pub mod absorption;

/// Sweat rate estimation
pub mod sweat_rate;

/// Fueling window merging
pub mod window_merger;

/// Per-workout fueling strategy
pub mod fueling_strategy;

/// Daily fueling plan aggregation
pub mod daily_plan;

/// Workout drains on the simulation grid
pub mod workout_events;

/// Simulator meal events
pub mod meal_events;

/// Synthetic intake generation
pub mod synthetic_intake;

/// Energy timeline simulation
pub mod energy_timeline;

/// Glycogen readiness summary
pub mod glycogen_status;

pub use config::FuelingEngineConfig;
pub use energy_timeline::{DayTimeline, EnergyPoint, EnergyTimelineSimulator, SimulationInput};
pub use glycogen_status::{GlycogenResult, GlycogenStatus, GlycogenStatusSummarizer};
