// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture thresholds.

/// Thresholds shared by the gesture recognizers.
///
/// Distances are in the same units as pointer positions (logical pixels),
/// times in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Distance a pointer must travel before a drag starts.
    pub touch_slop: f64,
    /// Longest press still recognized as a tap.
    pub tap_timeout_ms: u64,
    /// Longest wait between the first up and the second down of a double tap.
    pub double_tap_timeout_ms: u64,
    /// Shortest wait between the first up and the second down of a double tap.
    pub double_tap_min_time_ms: u64,
    /// Largest distance between the two presses of a double tap.
    pub double_tap_slop: f64,
    /// Upper bound on fling velocity per axis, in pixels per second.
    pub max_fling_velocity: f64,
}

impl GestureConfig {
    /// Default drag threshold.
    pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;
    /// Default fling velocity bound.
    pub const DEFAULT_MAX_FLING_VELOCITY: f64 = 8_000.0;
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: Self::DEFAULT_TOUCH_SLOP,
            tap_timeout_ms: 400,
            double_tap_timeout_ms: 300,
            double_tap_min_time_ms: 40,
            double_tap_slop: 100.0,
            max_fling_velocity: Self::DEFAULT_MAX_FLING_VELOCITY,
        }
    }
}
