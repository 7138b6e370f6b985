// ABOUTME: Main library entry point for the Fuelgauge metabolic fueling platform
// ABOUTME: Wires the simulation engine to storage through the day-to-day state chain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fuelgauge
//!
//! Simulates an athlete's glycogen "fuel tank" and hydration across each day,
//! plans fueling windows around workouts, and chains each day's ending state
//! into the next day's starting state.
//!
//! ## Architecture
//!
//! - **fuelgauge-core**: Domain models, errors, constants, local-day boundaries
//! - **fuelgauge-engine**: Pure synchronous simulation and planning algorithms
//! - **database**: Async repository traits and an in-memory store
//! - **state_chain**: Starting-state resolution across consecutive days
//! - **services**: Plan regeneration, timelines, status, and ranges
//! - **logging**: Structured `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{NaiveDate, Utc};
//! use fuelgauge::database::InMemoryStore;
//! use fuelgauge::errors::AppResult;
//! use fuelgauge::models::AthleteProfile;
//! use fuelgauge::services::FuelingService;
//! use fuelgauge_engine::FuelingEngineConfig;
//!
//! # async fn example() -> AppResult<()> {
//! let store = InMemoryStore::new();
//! let profile = AthleteProfile::default();
//! store.put_profile(profile.clone());
//!
//! let service = FuelingService::in_memory(&store, FuelingEngineConfig::load_or_default());
//! let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default();
//! let timeline = service.day_timeline(profile.athlete_id, date, Utc::now(), None).await?;
//! println!("Ending glycogen: {:.1}%", timeline.ending_glycogen_pct);
//! # Ok(())
//! # }
//! ```

pub use fuelgauge_core::{constants, models, time};

/// Unified error handling
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Repository traits and the in-memory store
pub mod database;

/// Day-to-day starting state resolution
pub mod state_chain;

/// Service layer combining the engine with storage
pub mod services;
