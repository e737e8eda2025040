// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity decay (fling) physics.
//!
//! [`DecaySpec::step`] applies exponential friction to a moving value: speed
//! decreases by a constant factor per unit time, so the value glides to a stop
//! without oscillating. [`Decay`] wraps that into a frame-driven animation with
//! optional hard bounds, which is how a fling stops at the edge of content.
//!
//! ```
//! use understory_motion::{Decay, DecaySpec};
//!
//! let spec = DecaySpec::default();
//! let mut fling = Decay::new(0.0, -1_000.0, spec, 0).with_bounds(-50.0, 50.0);
//! assert_eq!(fling.advance(1_000), -50.0);
//! assert!(fling.is_finished());
//! ```

use crate::math::{self, millis_to_secs};

/// Exponential friction parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecaySpec {
    /// Friction coefficient in `1/s`; larger values stop sooner.
    pub friction: f64,
    /// Speed (units per second) under which motion is considered stopped.
    pub velocity_threshold: f64,
}

impl DecaySpec {
    /// Default friction, scaled by a multiplier in [`DecaySpec::with_friction_multiplier`].
    pub const BASE_FRICTION: f64 = 4.2;

    /// Creates a decay spec.
    #[must_use]
    pub const fn new(friction: f64, velocity_threshold: f64) -> Self {
        Self {
            friction,
            velocity_threshold,
        }
    }

    /// Creates a decay spec whose friction is `BASE_FRICTION * multiplier`.
    ///
    /// Tiny multipliers are floored so the motion still terminates.
    #[must_use]
    pub fn with_friction_multiplier(multiplier: f64, velocity_threshold: f64) -> Self {
        Self::new(Self::BASE_FRICTION * multiplier.max(1e-4), velocity_threshold)
    }

    /// Advances `state` by `dt` seconds.
    #[must_use]
    pub fn step(&self, state: DecayState, dt: f64) -> DecayState {
        if dt <= 0.0 {
            return state;
        }
        if self.friction <= 0.0 {
            return DecayState {
                value: state.value,
                velocity: 0.0,
            };
        }
        let factor = math::exp(-self.friction * dt);
        DecayState {
            value: state.value + state.velocity / self.friction * (1.0 - factor),
            velocity: state.velocity * factor,
        }
    }

    /// The value at which an unbounded decay from `state` comes to rest.
    #[must_use]
    pub fn target_value(&self, state: DecayState) -> f64 {
        if self.friction <= 0.0 {
            state.value
        } else {
            state.value + state.velocity / self.friction
        }
    }

    /// Returns `true` when `velocity` is below the stop threshold.
    #[must_use]
    pub fn is_stopped(&self, velocity: f64) -> bool {
        math::abs(velocity) < self.velocity_threshold
    }
}

impl Default for DecaySpec {
    fn default() -> Self {
        Self::new(Self::BASE_FRICTION, 0.1)
    }
}

/// Position and velocity of a decaying value.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DecayState {
    /// Current value.
    pub value: f64,
    /// Current velocity in units per second.
    pub velocity: f64,
}

/// A frame-driven decay animation with optional hard bounds.
#[derive(Clone, Debug)]
pub struct Decay {
    spec: DecaySpec,
    state: DecayState,
    bounds: Option<(f64, f64)>,
    last_frame: u64,
    finished: bool,
}

impl Decay {
    /// Starts a decay at `value` with `velocity` (units per second) at time `now` (ms).
    #[must_use]
    pub fn new(value: f64, velocity: f64, spec: DecaySpec, now: u64) -> Self {
        Self {
            spec,
            state: DecayState { value, velocity },
            bounds: None,
            last_frame: now,
            finished: spec.is_stopped(velocity),
        }
    }

    /// Adds hard stops; reaching either bound ends the animation there.
    ///
    /// Bounds given in reverse order are swapped.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.bounds = Some((min, max));
        if (self.state.value <= min && self.state.velocity <= 0.0)
            || (self.state.value >= max && self.state.velocity >= 0.0)
        {
            self.state.value = self.state.value.clamp(min, max);
            self.stop();
        }
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state.value
    }

    /// Returns the current velocity.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Returns `true` once the value has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances to frame time `now` (ms) and returns the new value.
    pub fn advance(&mut self, now: u64) -> f64 {
        if self.finished {
            return self.state.value;
        }
        let now = now.max(self.last_frame);
        self.state = self.spec.step(self.state, millis_to_secs(self.last_frame, now));
        self.last_frame = now;
        if let Some((min, max)) = self.bounds {
            if self.state.value <= min {
                self.state.value = min;
                self.stop();
                return min;
            }
            if self.state.value >= max {
                self.state.value = max;
                self.stop();
                return max;
            }
        }
        if self.spec.is_stopped(self.state.velocity) {
            self.stop();
        }
        self.state.value
    }

    fn stop(&mut self) {
        self.state.velocity = 0.0;
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_decay_approaches_target_value() {
        let spec = DecaySpec::default();
        let start = DecayState {
            value: 10.0,
            velocity: 420.0,
        };
        let target = spec.target_value(start);
        assert!((target - 110.0).abs() < 1e-9);

        let mut fling = Decay::new(10.0, 420.0, spec, 0);
        let mut t = 0;
        let mut last = 10.0;
        while !fling.is_finished() {
            t += 16;
            let v = fling.advance(t);
            assert!(v >= last, "decay must be monotonic");
            assert!(v <= target + 1e-9);
            last = v;
        }
        assert!((fling.value() - target).abs() < 0.1);
    }

    #[test]
    fn bounded_decay_stops_at_bound() {
        let mut fling = Decay::new(5.0, 2_000.0, DecaySpec::default(), 0).with_bounds(-50.0, 50.0);
        let mut t = 0;
        while !fling.is_finished() {
            t += 16;
            fling.advance(t);
        }
        assert_eq!(fling.value(), 50.0);
        assert_eq!(fling.velocity(), 0.0);
    }

    #[test]
    fn slow_release_does_not_move() {
        let fling = Decay::new(3.0, 0.05, DecaySpec::default(), 0);
        assert!(fling.is_finished());
        assert_eq!(fling.value(), 3.0);
    }

    #[test]
    fn starting_at_bound_moving_outward_is_finished() {
        let fling = Decay::new(50.0, 300.0, DecaySpec::default(), 0).with_bounds(50.0, -50.0);
        assert!(fling.is_finished());
        assert_eq!(fling.value(), 50.0);
    }

    #[test]
    fn step_is_frame_rate_independent() {
        let spec = DecaySpec::default();
        let state = DecayState {
            value: 0.0,
            velocity: 100.0,
        };
        let once = spec.step(state, 0.5);
        let twice = spec.step(spec.step(state, 0.25), 0.25);
        assert!((once.value - twice.value).abs() < 1e-9);
        assert!((once.velocity - twice.velocity).abs() < 1e-9);
    }

    #[test]
    fn friction_multiplier_scales_base() {
        let spec = DecaySpec::with_friction_multiplier(2.0, 0.1);
        assert!((spec.friction - 8.4).abs() < 1e-12);
        let floored = DecaySpec::with_friction_multiplier(0.0, 0.1);
        assert!(floored.friction > 0.0);
    }
}
