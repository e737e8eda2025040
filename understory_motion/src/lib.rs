// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Motion: frame-clock driven motion primitives.
//!
//! This crate provides small, headless physics and interpolation building
//! blocks for UI animation. It does not own a clock or a scheduler: the host
//! calls `advance(now)` with a monotonically increasing millisecond timestamp
//! once per frame, and reads back the new value.
//!
//! - [`SpringSpec::step`]: closed-form damped spring step, independent of frame rate.
//! - [`DecaySpec::step`]: exponential velocity decay, the natural deceleration
//!   used for flings.
//! - [`Interpolation`] / [`VectorInterpolation`]: a value (or 2D vector)
//!   travelling to a target with an [`AnimationSpec`] (spring or tween).
//! - [`Decay`]: a fling with optional hard bounds.
//!
//! Cancellation is ownership: dropping or replacing an animation value stops it.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_motion::{AnimationSpec, Decay, DecaySpec, Interpolation};
//!
//! // Animate a zoom factor from 1 to 2.
//! let mut zoom = Interpolation::new(1.0, 2.0, AnimationSpec::default(), 0);
//! let mut now = 0;
//! while !zoom.is_finished() {
//!     now += 16;
//!     zoom.advance(now);
//! }
//! assert_eq!(zoom.value(), 2.0);
//!
//! // Fling a scroll offset, stopping at the content edge.
//! let mut fling = Decay::new(0.0, 3_000.0, DecaySpec::default(), now).with_bounds(0.0, 400.0);
//! fling.advance(now + 5_000);
//! assert_eq!(fling.value(), 400.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `serde`: derive `Serialize`/`Deserialize` for the spring, tween, and decay parameters.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod decay;
mod interpolation;
mod math;
mod spring;
mod tween;

pub use decay::{Decay, DecaySpec, DecayState};
pub use interpolation::{AnimationSpec, Interpolation, VectorInterpolation, lerp, lerp_vec};
pub use spring::{SpringSpec, SpringState};
pub use tween::{Easing, TweenSpec};
