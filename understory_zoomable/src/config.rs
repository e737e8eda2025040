// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale limits, dismiss thresholds, and animation parameters.

use core::fmt;

use understory_motion::{DecaySpec, SpringSpec};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A scale range that the scale snaps back into once a gesture ends.
///
/// While a pinch is in progress the scale may travel anywhere inside
/// `[min_scale, max_scale]`; this range is the narrower "resting" band.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverZoomRange {
    /// Smallest resting scale.
    pub min_snap: f64,
    /// Largest resting scale.
    pub max_snap: f64,
}

impl OverZoomRange {
    /// Creates a range, rejecting reversed or non-positive bounds.
    pub fn new(min_snap: f64, max_snap: f64) -> Result<Self, ConfigError> {
        let range = Self { min_snap, max_snap };
        range.validate()?;
        Ok(range)
    }

    /// Returns `true` if `scale` lies inside the range (inclusive).
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        self.min_snap <= scale && scale <= self.max_snap
    }

    /// Clamps `scale` into the range.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_snap, self.max_snap)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        finite("over_zoom.min_snap", self.min_snap)?;
        finite("over_zoom.max_snap", self.max_snap)?;
        if self.min_snap <= 0.0 || self.min_snap > self.max_snap {
            return Err(ConfigError::InvalidOverZoom {
                min_snap: self.min_snap,
                max_snap: self.max_snap,
            });
        }
        Ok(())
    }
}

impl fmt::Display for OverZoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OverZoomRange({:.1}..{:.1})",
            round_to_tenths(self.min_snap),
            round_to_tenths(self.max_snap)
        )
    }
}

/// Configuration of a [`ZoomableState`](crate::ZoomableState).
///
/// Construct with [`ZoomableConfig::default`] or [`ZoomableConfig::new`] and
/// adjust with the builder-style methods. Every constructor that can produce
/// an invalid configuration returns [`ConfigError`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomableConfig {
    /// Smallest scale.
    pub min_scale: f64,
    /// Largest scale.
    pub max_scale: f64,
    /// Scale a double tap zooms to.
    pub double_tap_scale: f64,
    /// Optional resting range that the scale snaps back into after a gesture.
    pub over_zoom: Option<OverZoomRange>,
    /// Fraction of the viewport height a dismiss drag must exceed.
    pub dismiss_threshold_fraction: f64,
    /// Divides the content height to give the largest visual dismiss offset.
    pub dismiss_resistance_factor: f64,
    /// Spring for scale animations.
    pub scale_spring: SpringSpec,
    /// Spring for translation and dismiss-offset animations.
    pub translation_spring: SpringSpec,
    /// Friction for flings.
    pub fling_decay: DecaySpec,
}

impl ZoomableConfig {
    /// Default smallest scale.
    pub const DEFAULT_MIN_SCALE: f64 = 1.0;
    /// Default largest scale.
    pub const DEFAULT_MAX_SCALE: f64 = 4.0;
    /// Default double-tap scale.
    pub const DEFAULT_DOUBLE_TAP_SCALE: f64 = 2.0;
    /// Default dismiss threshold as a fraction of the viewport height.
    pub const DEFAULT_DISMISS_THRESHOLD_FRACTION: f64 = 0.25;
    /// Default dismiss resistance.
    pub const DEFAULT_DISMISS_RESISTANCE_FACTOR: f64 = 2.0;
    /// Translations closer than this (in pixels) count as settled.
    pub const PX_VISIBILITY_THRESHOLD: f64 = 0.5;

    /// Creates a configuration with the given scale limits and defaults elsewhere.
    pub fn new(min_scale: f64, max_scale: f64, double_tap_scale: f64) -> Result<Self, ConfigError> {
        let config = Self {
            min_scale,
            max_scale,
            double_tap_scale,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with an over-zoom range.
    pub fn with_over_zoom(self, over_zoom: OverZoomRange) -> Result<Self, ConfigError> {
        let config = Self {
            over_zoom: Some(over_zoom),
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with different dismiss thresholds.
    pub fn with_dismiss(
        self,
        threshold_fraction: f64,
        resistance_factor: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            dismiss_threshold_fraction: threshold_fraction,
            dismiss_resistance_factor: resistance_factor,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every invariant of the configuration.
    ///
    /// Public fields may be edited directly; [`ZoomableState`](crate::ZoomableState)
    /// re-validates whenever a configuration is installed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("min_scale", self.min_scale)?;
        finite("max_scale", self.max_scale)?;
        finite("double_tap_scale", self.double_tap_scale)?;
        if self.min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveMinScale(self.min_scale));
        }
        if self.min_scale >= self.max_scale {
            return Err(ConfigError::EmptyScaleRange {
                min_scale: self.min_scale,
                max_scale: self.max_scale,
            });
        }
        if let Some(over_zoom) = &self.over_zoom {
            over_zoom.validate()?;
        }
        let fraction = self.dismiss_threshold_fraction;
        finite("dismiss_threshold_fraction", fraction)?;
        if fraction <= 0.0 || fraction > 1.0 {
            return Err(ConfigError::DismissThresholdOutOfRange(fraction));
        }
        finite("dismiss_resistance_factor", self.dismiss_resistance_factor)?;
        if self.dismiss_resistance_factor <= 0.0 {
            return Err(ConfigError::NonPositiveResistance(
                self.dismiss_resistance_factor,
            ));
        }
        Ok(())
    }
}

impl Default for ZoomableConfig {
    fn default() -> Self {
        let spring = SpringSpec::default();
        Self {
            min_scale: Self::DEFAULT_MIN_SCALE,
            max_scale: Self::DEFAULT_MAX_SCALE,
            double_tap_scale: Self::DEFAULT_DOUBLE_TAP_SCALE,
            over_zoom: None,
            dismiss_threshold_fraction: Self::DEFAULT_DISMISS_THRESHOLD_FRACTION,
            dismiss_resistance_factor: Self::DEFAULT_DISMISS_RESISTANCE_FACTOR,
            scale_spring: spring,
            translation_spring: spring.with_visibility_threshold(Self::PX_VISIBILITY_THRESHOLD),
            fling_decay: DecaySpec::default(),
        }
    }
}

/// A rejected [`ZoomableConfig`] or [`OverZoomRange`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A field was NaN or infinite.
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// `min_scale` was zero or negative.
    NonPositiveMinScale(f64),
    /// `min_scale` was not strictly below `max_scale`.
    EmptyScaleRange {
        /// Configured minimum.
        min_scale: f64,
        /// Configured maximum.
        max_scale: f64,
    },
    /// The over-zoom range was reversed or not positive.
    InvalidOverZoom {
        /// Configured lower snap bound.
        min_snap: f64,
        /// Configured upper snap bound.
        max_snap: f64,
    },
    /// The dismiss threshold fraction was outside `(0, 1]`.
    DismissThresholdOutOfRange(f64),
    /// The dismiss resistance factor was zero or negative.
    NonPositiveResistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "`{field}` must be finite"),
            Self::NonPositiveMinScale(min) => {
                write!(f, "min_scale must be positive, got {min}")
            }
            Self::EmptyScaleRange {
                min_scale,
                max_scale,
            } => write!(
                f,
                "min_scale ({min_scale}) must be less than max_scale ({max_scale})"
            ),
            Self::InvalidOverZoom { min_snap, max_snap } => write!(
                f,
                "over-zoom range {min_snap}..{max_snap} must be positive and ordered"
            ),
            Self::DismissThresholdOutOfRange(fraction) => write!(
                f,
                "dismiss threshold fraction must be in (0, 1], got {fraction}"
            ),
            Self::NonPositiveResistance(factor) => {
                write!(f, "dismiss resistance factor must be positive, got {factor}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Rounds half away from zero to one decimal place.
pub(crate) fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
