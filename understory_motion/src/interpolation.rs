// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target-seeking interpolations driven by a frame clock.
//!
//! An [`Interpolation`] owns the in-flight state of a single value moving from
//! a start value to a target. The host calls [`Interpolation::advance`] with a
//! monotonically increasing timestamp (milliseconds) once per frame and reads
//! the returned value. Dropping the interpolation cancels it.
//!
//! ```
//! use understory_motion::{AnimationSpec, Interpolation};
//!
//! let mut anim = Interpolation::new(1.0, 2.0, AnimationSpec::default(), 0);
//! let mid = anim.advance(16);
//! assert!(mid > 1.0 && mid < 2.0);
//! assert_eq!(anim.advance(2_000), 2.0);
//! assert!(anim.is_finished());
//! ```

use kurbo::Vec2;

use crate::math::millis_to_secs;
use crate::spring::{SpringSpec, SpringState};
use crate::tween::TweenSpec;

/// How an [`Interpolation`] travels toward its target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationSpec {
    /// Physics-based settling; duration depends on distance and stiffness.
    Spring(SpringSpec),
    /// Fixed duration with an easing curve.
    Tween(TweenSpec),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::Spring(SpringSpec::default())
    }
}

impl From<SpringSpec> for AnimationSpec {
    fn from(spec: SpringSpec) -> Self {
        Self::Spring(spec)
    }
}

impl From<TweenSpec> for AnimationSpec {
    fn from(spec: TweenSpec) -> Self {
        Self::Tween(spec)
    }
}

/// A scalar moving toward a target.
#[derive(Clone, Debug)]
pub struct Interpolation {
    spec: AnimationSpec,
    start: f64,
    target: f64,
    started_at: u64,
    last_frame: u64,
    state: SpringState,
    finished: bool,
}

impl Interpolation {
    /// Starts an interpolation from `start` to `target` at time `now` (ms).
    #[must_use]
    pub fn new(start: f64, target: f64, spec: AnimationSpec, now: u64) -> Self {
        let finished = start == target;
        Self {
            spec,
            start,
            target,
            started_at: now,
            last_frame: now,
            state: SpringState::at_rest(if finished { target } else { start }),
            finished,
        }
    }

    /// Returns the value the interpolation started from.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the value the interpolation is heading to.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Returns the most recently computed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state.value
    }

    /// Returns the most recently computed velocity (units per second).
    ///
    /// Tweens report zero velocity.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Returns `true` once the value has reached its target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Progress from start to target in `[0, 1]` for the current value.
    ///
    /// A zero-length interpolation reports `1.0`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let range = self.target - self.start;
        if range == 0.0 {
            1.0
        } else {
            (self.state.value - self.start) / range
        }
    }

    /// Advances to frame time `now` (ms) and returns the new value.
    ///
    /// Timestamps earlier than the previous frame are treated as a zero step.
    /// Once settled the value snaps exactly to the target.
    pub fn advance(&mut self, now: u64) -> f64 {
        if self.finished {
            return self.state.value;
        }
        let now = now.max(self.last_frame);
        match self.spec {
            AnimationSpec::Spring(spring) => {
                let dt = millis_to_secs(self.last_frame, now);
                self.state = spring.step(self.state, self.target, dt);
                if spring.is_settled(self.state, self.target) {
                    self.finish();
                }
            }
            AnimationSpec::Tween(tween) => {
                let progress = tween.progress(now - self.started_at);
                if progress >= 1.0 {
                    self.finish();
                } else {
                    self.state.value = lerp(self.start, self.target, progress);
                }
            }
        }
        self.last_frame = now;
        self.state.value
    }

    fn finish(&mut self) {
        self.state = SpringState::at_rest(self.target);
        self.finished = true;
    }
}

/// A 2D vector moving toward a target, one [`Interpolation`] per axis.
#[derive(Clone, Debug)]
pub struct VectorInterpolation {
    x: Interpolation,
    y: Interpolation,
}

impl VectorInterpolation {
    /// Starts an interpolation from `start` to `target` at time `now` (ms).
    #[must_use]
    pub fn new(start: Vec2, target: Vec2, spec: AnimationSpec, now: u64) -> Self {
        Self {
            x: Interpolation::new(start.x, target.x, spec, now),
            y: Interpolation::new(start.y, target.y, spec, now),
        }
    }

    /// Returns the most recently computed value.
    #[must_use]
    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    /// Returns the target vector.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    /// Returns `true` once both axes have reached their targets.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.x.is_finished() && self.y.is_finished()
    }

    /// Advances to frame time `now` (ms) and returns the new value.
    pub fn advance(&mut self, now: u64) -> Vec2 {
        Vec2::new(self.x.advance(now), self.y.advance(now))
    }
}

/// Linear interpolation that returns `b` exactly at `t == 1`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// [`lerp`] for vectors.
#[inline]
#[must_use]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}
