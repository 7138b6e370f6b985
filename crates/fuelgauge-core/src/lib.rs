// ABOUTME: Core types and constants for the Fuelgauge metabolic fueling engine
// ABOUTME: Foundation crate with error handling, domain models, local-day boundaries, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fuelgauge Core
//!
//! Foundation crate providing shared types for the Fuelgauge fueling engine. The
//! simulation crate and the service crate both depend on it, so it is kept free of
//! algorithmic code.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Fallback values used when athlete settings are missing
//! - **models**: Athlete settings, nutrition records, workouts, fueling plans, day states
//! - **time**: Local-day boundaries supplied by a timezone collaborator

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (athlete profile, nutrition, workouts, fueling plans)
pub mod models;

/// Local calendar day boundaries
pub mod time;
