// ABOUTME: Merges overlapping or adjacent fueling windows into a non-overlapping schedule
// ABOUTME: Sums nutrient targets and collapses differing window types into TRANSITION windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Duration;
use fuelgauge_core::models::{FuelingWindow, WindowType};

/// Windows closer than this are merged (minutes)
pub const MERGE_GAP_MINUTES: i64 = 15;

const TITLE_SEPARATOR: &str = " + ";

const TRANSITION_DESCRIPTION: &str =
    "Back-to-back sessions: combine recovery from the first with fuelling for the next.";

/// Sort windows by start and merge each into the next when they touch
///
/// A window merges into the following one when the next start is at most
/// fifteen minutes after the current end. Merging an already-merged list
/// returns it unchanged.
#[must_use]
pub fn merge_windows(mut windows: Vec<FuelingWindow>) -> Vec<FuelingWindow> {
    windows.sort_by_key(|window| window.start);
    let gap = Duration::minutes(MERGE_GAP_MINUTES);

    let mut merged: Vec<FuelingWindow> = Vec::with_capacity(windows.len());
    let mut iter = windows.into_iter();
    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if next.start <= current.end + gap {
            current = combine(current, next);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

fn combine(mut current: FuelingWindow, next: FuelingWindow) -> FuelingWindow {
    current.end = current.end.max(next.end);
    current.target_carbs += next.target_carbs;
    current.target_protein += next.target_protein;
    current.target_fat += next.target_fat;
    current.target_fluid += next.target_fluid;
    current.target_sodium += next.target_sodium;

    if current.window_type != next.window_type {
        current.window_type = WindowType::Transition;
        TRANSITION_DESCRIPTION.clone_into(&mut current.description);
    } else if current.description.is_empty() {
        current.description = next.description;
    }

    for supplement in next.supplements {
        if !current.supplements.contains(&supplement) {
            current.supplements.push(supplement);
        }
    }

    if current.linked_workout_id.is_none() {
        current.linked_workout_id = next.linked_workout_id;
    }

    current.workout_title = match (current.workout_title.take(), next.workout_title) {
        (Some(first), Some(second))
            if !first.split(TITLE_SEPARATOR).any(|title| title == second) =>
        {
            Some(format!("{first}{TITLE_SEPARATOR}{second}"))
        }
        (Some(first), _) => Some(first),
        (None, second) => second,
    };

    current
}
