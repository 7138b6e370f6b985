// ABOUTME: Gamma-shaped carbohydrate rate-of-appearance model and food-name classifier
// ABOUTME: Five fixed absorption profiles plus validated custom profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Absorption Model
//!
//! Ingested carbohydrate appears in the blood following a delayed gamma curve:
//!
//! ```text
//! t'    = max(0, t - delay)
//! theta = peak / (k - 1)
//! Ra(t) = amount * t'^(k-1) * exp(-t'/theta) / (theta^k * (k-1)!)
//! ```
//!
//! `Ra` integrates to `amount` and peaks `peak` minutes after the delay. Larger
//! shape factors give a heavier, slower tail.

use fuelgauge_core::errors::{AppError, AppResult};
use serde::Serialize;

/// Carbohydrate absorption curve parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsorptionProfile {
    id: String,
    label: String,
    delay_min: f64,
    peak_min: f64,
    duration_min: f64,
    shape_k: u32,
}

/// Identifier of the liquid/gel profile
pub const RAPID: &str = "RAPID";
/// Identifier of the simple-sugar profile
pub const FAST: &str = "FAST";
/// Identifier of the mixed-starch profile
pub const BALANCED: &str = "BALANCED";
/// Identifier of the protein/fat/fibre-heavy profile
pub const DENSE: &str = "DENSE";
/// Identifier of the deliberate carb-loading profile
pub const HYPER_LOAD: &str = "HYPER_LOAD";

impl AbsorptionProfile {
    /// Build a custom profile
    ///
    /// # Errors
    ///
    /// Returns an error if the delay is negative, the peak does not come after
    /// the delay, the duration does not exceed the peak, or `shape_k < 2`
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        delay_min: f64,
        peak_min: f64,
        duration_min: f64,
        shape_k: u32,
    ) -> AppResult<Self> {
        if !delay_min.is_finite() || delay_min < 0.0 {
            return Err(AppError::invalid_input("absorption delay must be non-negative"));
        }
        if !peak_min.is_finite() || delay_min >= peak_min {
            return Err(AppError::invalid_input(
                "absorption peak must come after the delay",
            ));
        }
        if !duration_min.is_finite() || duration_min <= peak_min {
            return Err(AppError::invalid_input(
                "absorption duration must exceed the peak time",
            ));
        }
        if shape_k < 2 {
            return Err(AppError::out_of_range("absorption shape factor must be at least 2"));
        }
        Ok(Self::builtin(id, label, delay_min, peak_min, duration_min, shape_k))
    }

    fn builtin(
        id: impl Into<String>,
        label: impl Into<String>,
        delay_min: f64,
        peak_min: f64,
        duration_min: f64,
        shape_k: u32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            delay_min,
            peak_min,
            duration_min,
            shape_k,
        }
    }

    /// Gels, sports drinks, juice
    #[must_use]
    pub fn rapid() -> Self {
        Self::builtin(RAPID, "Rapid (liquid/gel)", 5.0, 20.0, 120.0, 2)
    }

    /// Simple sugars and refined carbohydrate
    #[must_use]
    pub fn fast() -> Self {
        Self::builtin(FAST, "Fast (simple sugars)", 10.0, 40.0, 150.0, 3)
    }

    /// Mixed meals built around starch or grain
    #[must_use]
    pub fn balanced() -> Self {
        Self::builtin(BALANCED, "Balanced (mixed meal)", 15.0, 60.0, 240.0, 3)
    }

    /// Meals heavy in protein, fat, or fibre
    #[must_use]
    pub fn dense() -> Self {
        Self::builtin(DENSE, "Dense (protein/fat/fibre)", 30.0, 90.0, 360.0, 4)
    }

    /// Deliberate high-volume carb loading
    #[must_use]
    pub fn hyper_load() -> Self {
        Self::builtin(HYPER_LOAD, "Hyper load (carb loading)", 45.0, 120.0, 480.0, 5)
    }

    /// Fixed profile by identifier (case-insensitive)
    #[must_use]
    pub fn by_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_uppercase().as_str() {
            RAPID => Some(Self::rapid()),
            FAST => Some(Self::fast()),
            BALANCED => Some(Self::balanced()),
            DENSE => Some(Self::dense()),
            HYPER_LOAD => Some(Self::hyper_load()),
            _ => None,
        }
    }

    /// Profile identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Minutes before any carbohydrate appears
    #[must_use]
    pub const fn delay_min(&self) -> f64 {
        self.delay_min
    }

    /// Minutes after the delay at which the rate peaks
    #[must_use]
    pub const fn peak_min(&self) -> f64 {
        self.peak_min
    }

    /// Minutes after ingestion by which absorption is treated as finished
    #[must_use]
    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    /// Gamma shape factor
    #[must_use]
    pub const fn shape_k(&self) -> u32 {
        self.shape_k
    }

    fn theta(&self) -> f64 {
        self.peak_min / f64::from(self.shape_k - 1)
    }
}

fn factorial(n: u32) -> f64 {
    (1..=n).map(f64::from).product()
}

/// Rate of appearance (g/min) `t` minutes after ingesting `amount` grams
#[must_use]
pub fn rate_of_appearance(t: f64, amount: f64, profile: &AbsorptionProfile) -> f64 {
    let elapsed = t - profile.delay_min;
    if !elapsed.is_finite() || elapsed <= 0.0 || amount <= 0.0 {
        return 0.0;
    }
    let k = profile.shape_k;
    let theta = profile.theta();
    let exponent = f64::from(k - 1);
    amount * elapsed.powf(exponent) * (-elapsed / theta).exp()
        / (theta.powf(f64::from(k)) * factorial(k - 1))
}

/// Grams absorbed between `t1` and `t2` minutes after ingestion (midpoint rule)
///
/// The interval start is clamped at ingestion, and the midpoint is clamped to
/// not precede the profile's delay.
#[must_use]
pub fn absorbed_in_interval(t1: f64, t2: f64, amount: f64, profile: &AbsorptionProfile) -> f64 {
    let start = t1.max(0.0);
    if t2 <= start || t2 <= 0.0 || amount <= 0.0 {
        return 0.0;
    }
    let midpoint = ((start + t2) / 2.0).max(profile.delay_min);
    rate_of_appearance(midpoint, amount, profile) * (t2 - start)
}

const HYPER_LOAD_KEYWORDS: &[&str] = &["carb load", "carb-load", "carbo load", "loading"];

const RAPID_KEYWORDS: &[&str] = &[
    "gel", "drink", "juice", "isotonic", "gatorade", "powerade", "maltodextrin", "soda", "cola",
    "syrup", "honey", "smoothie", "shake", "chew", "beverage",
];

const FAST_KEYWORDS: &[&str] = &[
    "banana", "white bread", "rice cake", "candy", "sweet", "jam", "date", "raisin", "sugar",
    "gummy", "waffle", "pretzel", "cracker", "energy bar", "cereal", "cookie", "biscuit",
];

const BALANCED_KEYWORDS: &[&str] = &[
    "rice", "pasta", "bread", "potato", "oat", "porridge", "noodle", "bagel", "quinoa",
    "couscous", "grain", "toast", "wrap", "tortilla", "sandwich", "muesli", "pancake",
];

const DENSE_KEYWORDS: &[&str] = &[
    "chicken", "beef", "steak", "pork", "fish", "salmon", "tuna", "egg", "cheese", "nut",
    "peanut", "almond", "avocado", "bean", "lentil", "salad", "burger", "pizza", "protein",
    "meat", "tofu", "fibre", "fiber", "yogurt", "yoghurt",
];

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| name.contains(keyword))
}

/// Map a free-text food name to an absorption profile
///
/// Explicit carb-loading wins, then liquid/gel, simple sugar, starch, and
/// protein/fat/fibre keywords in that order. Unknown foods are BALANCED.
#[must_use]
pub fn classify_food(name: &str) -> AbsorptionProfile {
    let lower = name.to_lowercase();
    if matches_any(&lower, HYPER_LOAD_KEYWORDS) {
        AbsorptionProfile::hyper_load()
    } else if matches_any(&lower, RAPID_KEYWORDS) {
        AbsorptionProfile::rapid()
    } else if matches_any(&lower, FAST_KEYWORDS) {
        AbsorptionProfile::fast()
    } else if matches_any(&lower, BALANCED_KEYWORDS) {
        AbsorptionProfile::balanced()
    } else if matches_any(&lower, DENSE_KEYWORDS) {
        AbsorptionProfile::dense()
    } else {
        AbsorptionProfile::balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_zero_before_delay() {
        let profile = AbsorptionProfile::dense();
        assert!(rate_of_appearance(29.0, 100.0, &profile).abs() < f64::EPSILON);
        assert!(rate_of_appearance(31.0, 100.0, &profile) > 0.0);
    }

    #[test]
    fn test_rate_peaks_after_delay_plus_peak() {
        let profile = AbsorptionProfile::balanced();
        let at_peak = rate_of_appearance(75.0, 100.0, &profile);
        assert!(at_peak > rate_of_appearance(45.0, 100.0, &profile));
        assert!(at_peak > rate_of_appearance(105.0, 100.0, &profile));
    }

    #[test]
    fn test_custom_profile_rejects_shape_one() {
        assert!(AbsorptionProfile::new("X", "x", 5.0, 20.0, 120.0, 1).is_err());
        assert!(AbsorptionProfile::new("X", "x", 30.0, 20.0, 120.0, 2).is_err());
        assert!(AbsorptionProfile::new("X", "x", 5.0, 20.0, 120.0, 2).is_ok());
    }

    #[test]
    fn test_sharp_custom_profile_rate_stays_finite() {
        let profile = AbsorptionProfile::new("S", "sharp", 5.0, 20.0, 120.0, 40).unwrap();
        let rate = rate_of_appearance(25.0, 60.0, &profile);
        assert!(rate.is_finite());
        assert!(rate > 0.0);
    }

    #[test]
    fn test_interval_guards() {
        let profile = AbsorptionProfile::rapid();
        assert!(absorbed_in_interval(-30.0, -15.0, 50.0, &profile).abs() < f64::EPSILON);
        assert!(absorbed_in_interval(20.0, 10.0, 50.0, &profile).abs() < f64::EPSILON);
        assert!(absorbed_in_interval(10.0, 25.0, 0.0, &profile).abs() < f64::EPSILON);
    }
}
