// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers that work with either `std` or `libm`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_motion requires either the `std` or the `libm` feature");

#[cfg(feature = "std")]
mod imp {
    #[inline]
    pub(crate) fn exp(x: f64) -> f64 {
        x.exp()
    }

    #[inline]
    pub(crate) fn sqrt(x: f64) -> f64 {
        x.sqrt()
    }

    #[inline]
    pub(crate) fn sin(x: f64) -> f64 {
        x.sin()
    }

    #[inline]
    pub(crate) fn cos(x: f64) -> f64 {
        x.cos()
    }

    #[inline]
    pub(crate) fn abs(x: f64) -> f64 {
        x.abs()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod imp {
    #[inline]
    pub(crate) fn exp(x: f64) -> f64 {
        libm::exp(x)
    }

    #[inline]
    pub(crate) fn sqrt(x: f64) -> f64 {
        libm::sqrt(x)
    }

    #[inline]
    pub(crate) fn sin(x: f64) -> f64 {
        libm::sin(x)
    }

    #[inline]
    pub(crate) fn cos(x: f64) -> f64 {
        libm::cos(x)
    }

    #[inline]
    pub(crate) fn abs(x: f64) -> f64 {
        libm::fabs(x)
    }
}

#[cfg(any(feature = "std", feature = "libm"))]
pub(crate) use imp::{abs, cos, exp, sin, sqrt};

/// Converts a millisecond interval into seconds.
#[inline]
pub(crate) fn millis_to_secs(from: u64, to: u64) -> f64 {
    to.saturating_sub(from) as f64 / 1000.0
}
