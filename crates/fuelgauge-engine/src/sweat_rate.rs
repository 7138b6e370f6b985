// ABOUTME: Sweat-rate estimation from ambient temperature and workout intensity
// ABOUTME: Table lookup with temperature back-fill and athlete-configured override
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::SweatRateConfig;
use fuelgauge_core::models::{AthleteProfile, WorkoutEnvironment};

/// Temperature × intensity sweat-rate estimator
#[derive(Debug, Clone)]
pub struct SweatRateEstimator {
    config: SweatRateConfig,
}

impl Default for SweatRateEstimator {
    fn default() -> Self {
        Self::new(SweatRateConfig::default())
    }
}

impl SweatRateEstimator {
    /// Create an estimator over a sweat table
    #[must_use]
    pub const fn new(config: SweatRateConfig) -> Self {
        Self { config }
    }

    /// Table lookup (L/h); `fallback` when either input is missing
    ///
    /// Temperatures outside the table range use the nearest band.
    #[must_use]
    pub fn estimate(
        &self,
        temperature_c: Option<f64>,
        intensity: Option<f64>,
        fallback: f64,
    ) -> f64 {
        match (temperature_c, intensity) {
            (Some(temperature), Some(intensity))
                if temperature.is_finite() && intensity.is_finite() =>
            {
                let row = self.temperature_band(temperature);
                let column = self.intensity_band(intensity);
                self.config.rates_l_per_hour[row][column]
            }
            _ => fallback,
        }
    }

    /// Sweat rate for a workout (L/h)
    ///
    /// The athlete's configured rate always wins. Otherwise the temperature is
    /// back-filled from recorded, weather, then forecast metadata before the
    /// configured default temperature is assumed.
    #[must_use]
    pub fn for_workout(
        &self,
        profile: &AthleteProfile,
        environment: &WorkoutEnvironment,
        intensity: f64,
        fallback: f64,
    ) -> f64 {
        if let Some(rate) = profile.sweat_rate_l_per_hour {
            return rate;
        }
        let temperature = environment
            .best_temperature()
            .unwrap_or(self.config.default_temperature_c);
        self.estimate(Some(temperature), Some(intensity), fallback)
    }

    fn temperature_band(&self, temperature_c: f64) -> usize {
        let clamped =
            temperature_c.clamp(self.config.min_temperature_c, self.config.max_temperature_c);
        self.config
            .temperature_bounds_c
            .iter()
            .position(|upper| clamped < *upper)
            .unwrap_or(3)
    }

    fn intensity_band(&self, intensity: f64) -> usize {
        self.config
            .intensity_thresholds
            .iter()
            .position(|threshold| intensity < *threshold)
            .unwrap_or(3)
    }
}
