// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation.
//!
//! [`VelocityTracker`] keeps a short ring buffer of timestamped positions and
//! estimates velocity with a least-squares linear fit over the most recent
//! samples. Samples older than a fixed horizon, or separated by a pause, are
//! ignored so a finger that stopped before lifting reports no fling.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::velocity::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! for i in 0..5_u32 {
//!     tracker.add_position(u64::from(i) * 10, Point::new(f64::from(i) * 10.0, 0.0));
//! }
//! let v = tracker.velocity();
//! assert!((v.x - 1_000.0).abs() < 1e-6);
//! assert!(v.y.abs() < 1e-6);
//! ```

use kurbo::{Point, Vec2};

const HISTORY_SIZE: usize = 20;
/// Only samples this recent (relative to the newest) take part in the fit.
const HORIZON_MS: u64 = 100;
/// A gap this long between samples means the pointer had stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time: u64,
    position: Point,
}

/// Estimates pointer velocity from recent positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `position` at `time` (ms).
    pub fn add_position(&mut self, time: u64, position: Point) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time, position });
    }

    /// Forgets all samples.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Estimated velocity in pixels per second.
    ///
    /// Returns zero with fewer than two usable samples.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples[self.index] else {
            return Vec2::ZERO;
        };
        let mut times = [0.0_f64; HISTORY_SIZE];
        let mut xs = [0.0_f64; HISTORY_SIZE];
        let mut ys = [0.0_f64; HISTORY_SIZE];
        let mut count = 0;
        let mut previous = newest;
        let mut index = self.index;
        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[index] else {
                break;
            };
            let age = newest.time.saturating_sub(sample.time);
            let gap = previous.time.saturating_sub(sample.time);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            times[count] = -(age as f64) / 1000.0;
            xs[count] = sample.position.x;
            ys[count] = sample.position.y;
            count += 1;
            previous = sample;
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }
        if count < 2 {
            return Vec2::ZERO;
        }
        Vec2::new(
            slope(&times[..count], &xs[..count]),
            slope(&times[..count], &ys[..count]),
        )
    }

    /// [`VelocityTracker::velocity`] with each axis clamped to `±max`.
    #[must_use]
    pub fn velocity_clamped(&self, max: f64) -> Vec2 {
        let v = self.velocity();
        let max = max.max(0.0);
        Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
    }
}

/// Least-squares slope of `values` over `times`; zero when degenerate.
fn slope(times: &[f64], values: &[f64]) -> f64 {
    let n = times.len() as f64;
    let mean_t = times.iter().sum::<f64>() / n;
    let mean_v = values.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (t, v) in times.iter().zip(values) {
        let dt = t - mean_t;
        num += dt * (v - mean_v);
        den += dt * dt;
    }
    if den == 0.0 { 0.0 } else { num / den }
}
