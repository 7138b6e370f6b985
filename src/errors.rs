// ABOUTME: Re-exports of the unified error types for the service crate
// ABOUTME: Keeps `crate::errors::*` paths stable for storage and service code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Errors are defined in `fuelgauge-core` so the engine and the service crate
//! share one `AppError`. Configuration errors convert into `AppError` at the
//! engine boundary.

pub use fuelgauge_core::errors::{AppError, AppResult, DatabaseError, ErrorCode};
pub use fuelgauge_engine::config::ConfigError;
