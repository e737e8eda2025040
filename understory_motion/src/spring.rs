// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped spring physics.
//!
//! [`SpringSpec::step`] advances a [`SpringState`] toward a target by an
//! arbitrary time step using the closed-form solution of the damped harmonic
//! oscillator, so results do not depend on frame rate.
//!
//! ```
//! use understory_motion::{SpringSpec, SpringState};
//!
//! let spec = SpringSpec::default();
//! let mut state = SpringState::at_rest(0.0);
//! for _ in 0..60 {
//!     state = spec.step(state, 100.0, 1.0 / 60.0);
//! }
//! assert!((state.value - 100.0).abs() < 0.01);
//! ```

use crate::math;

/// Velocity threshold multiplier relative to the displacement threshold.
///
/// A spring counts as settled once it is within the displacement threshold and
/// moving slower than this many thresholds per second.
const VELOCITY_THRESHOLD_MULTIPLIER: f64 = 62.5;

/// Parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSpec {
    /// Damping ratio: `1.0` is critically damped, below is bouncy, above is sluggish.
    pub damping_ratio: f64,
    /// Spring stiffness in `1/s²`.
    pub stiffness: f64,
    /// Distance from the target under which the value is considered settled.
    pub visibility_threshold: f64,
}

impl SpringSpec {
    /// Critically damped spring without overshoot.
    pub const DAMPING_NO_BOUNCY: f64 = 1.0;
    /// Medium stiffness, suitable for zoom and pan targets.
    pub const STIFFNESS_MEDIUM: f64 = 1500.0;
    /// Low stiffness, for slower settling.
    pub const STIFFNESS_LOW: f64 = 200.0;

    /// Creates a spring spec.
    #[must_use]
    pub const fn new(damping_ratio: f64, stiffness: f64, visibility_threshold: f64) -> Self {
        Self {
            damping_ratio,
            stiffness,
            visibility_threshold,
        }
    }

    /// Returns a copy with a different visibility threshold.
    #[must_use]
    pub const fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Advances `state` toward `target` by `dt` seconds.
    ///
    /// Degenerate specs (non-positive stiffness) and non-positive time steps
    /// return the state unchanged.
    #[must_use]
    pub fn step(&self, state: SpringState, target: f64, dt: f64) -> SpringState {
        if dt <= 0.0 || self.stiffness <= 0.0 {
            return state;
        }
        let x0 = state.value - target;
        let v0 = state.velocity;
        let omega = math::sqrt(self.stiffness);
        let zeta = self.damping_ratio.max(0.0);

        let (x, v) = if zeta > 1.0 {
            let root = omega * math::sqrt(zeta * zeta - 1.0);
            let gamma_plus = -zeta * omega + root;
            let gamma_minus = -zeta * omega - root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let e_minus = math::exp(gamma_minus * dt);
            let e_plus = math::exp(gamma_plus * dt);
            (
                coeff_a * e_minus + coeff_b * e_plus,
                coeff_a * gamma_minus * e_minus + coeff_b * gamma_plus * e_plus,
            )
        } else if zeta == 1.0 {
            let coeff_a = x0;
            let coeff_b = v0 + omega * x0;
            let decay = math::exp(-omega * dt);
            let n = coeff_a + coeff_b * dt;
            (n * decay, n * decay * -omega + coeff_b * decay)
        } else {
            let damped = omega * math::sqrt(1.0 - zeta * zeta);
            let cos_coeff = x0;
            let sin_coeff = (zeta * omega * x0 + v0) / damped;
            let decay = math::exp(-zeta * omega * dt);
            let (sin, cos) = (math::sin(damped * dt), math::cos(damped * dt));
            let x = decay * (cos_coeff * cos + sin_coeff * sin);
            let v = x * -zeta * omega + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos);
            (x, v)
        };

        SpringState {
            value: x + target,
            velocity: v,
        }
    }

    /// Returns `true` when `state` is close enough to `target` to snap there.
    #[must_use]
    pub fn is_settled(&self, state: SpringState, target: f64) -> bool {
        let threshold = self.visibility_threshold;
        math::abs(state.value - target) < threshold
            && math::abs(state.velocity) < threshold * VELOCITY_THRESHOLD_MULTIPLIER
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(Self::DAMPING_NO_BOUNCY, Self::STIFFNESS_MEDIUM, 0.01)
    }
}

/// Position and velocity of a spring-driven value.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SpringState {
    /// Current value.
    pub value: f64,
    /// Current velocity in units per second.
    pub velocity: f64,
}

impl SpringState {
    /// A state at `value` with zero velocity.
    #[must_use]
    pub const fn at_rest(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spec: SpringSpec, from: f64, to: f64, frames: usize) -> SpringState {
        let mut state = SpringState::at_rest(from);
        for _ in 0..frames {
            state = spec.step(state, to, 1.0 / 60.0);
        }
        state
    }

    #[test]
    fn critically_damped_spring_converges_without_overshoot() {
        let spec = SpringSpec::default();
        let mut state = SpringState::at_rest(0.0);
        for _ in 0..120 {
            state = spec.step(state, 10.0, 1.0 / 60.0);
            assert!(state.value <= 10.0 + 1e-9, "overshoot: {}", state.value);
        }
        assert!(spec.is_settled(state, 10.0));
    }

    #[test]
    fn underdamped_spring_overshoots_then_settles() {
        let spec = SpringSpec::new(0.3, 400.0, 0.01);
        let mut state = SpringState::at_rest(0.0);
        let mut max_seen = f64::MIN;
        for _ in 0..600 {
            state = spec.step(state, 1.0, 1.0 / 120.0);
            max_seen = max_seen.max(state.value);
        }
        assert!(max_seen > 1.0, "expected overshoot, max was {max_seen}");
        assert!((state.value - 1.0).abs() < 0.01);
    }

    #[test]
    fn overdamped_spring_converges() {
        let state = run(SpringSpec::new(2.0, 800.0, 0.01), 5.0, -5.0, 180);
        assert!((state.value + 5.0).abs() < 0.01);
    }

    #[test]
    fn single_large_step_matches_many_small_steps() {
        let spec = SpringSpec::new(1.0, 300.0, 0.01);
        let big = spec.step(SpringState::at_rest(0.0), 1.0, 0.25);
        let mut small = SpringState::at_rest(0.0);
        for _ in 0..250 {
            small = spec.step(small, 1.0, 0.001);
        }
        assert!((big.value - small.value).abs() < 1e-6);
        assert!((big.velocity - small.velocity).abs() < 1e-4);
    }

    #[test]
    fn zero_step_is_identity() {
        let spec = SpringSpec::default();
        let state = SpringState {
            value: 3.0,
            velocity: 2.0,
        };
        assert_eq!(spec.step(state, 0.0, 0.0), state);
    }

    #[test]
    fn settled_requires_low_velocity() {
        let spec = SpringSpec::default();
        let moving = SpringState {
            value: 1.0,
            velocity: 10.0,
        };
        assert!(!spec.is_settled(moving, 1.0));
        assert!(spec.is_settled(SpringState::at_rest(1.001), 1.0));
    }
}
