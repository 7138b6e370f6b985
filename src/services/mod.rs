// ABOUTME: Domain service layer combining the fueling engine with storage
// ABOUTME: Protocol-agnostic operations reusable by any transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services load inputs through the repository traits, run the synchronous
//! engine, and write results back. They hold no state of their own.

/// Plan regeneration, day timelines, readiness, and ranges
pub mod fueling;

pub use fueling::FuelingService;
