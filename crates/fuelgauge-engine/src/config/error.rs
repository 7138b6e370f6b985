// ABOUTME: Configuration error types for fueling engine settings
// ABOUTME: Reported by validation and environment-override parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fuelgauge_core::errors::AppError;
use std::env::VarError;
use thiserror::Error;

/// Errors raised while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two related bounds are in the wrong order
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// A required value is missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Environment variable could not be read
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] VarError),

    /// Environment variable could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A single value is outside its valid range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}
