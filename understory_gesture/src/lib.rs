// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: pointer bookkeeping and gesture primitives for touch UIs.
//!
//! This crate provides the small, framework-agnostic building blocks that
//! gesture recognizers are made of. Each module handles one concern:
//!
//! - [`pointer`]: Pointer events with a consumed flag, and a tracker of current/previous pointer state
//! - [`drag`]: Per-pointer drag deltas and touch-slop detection
//! - [`tap`]: Single and double tap recognition with timeouts
//! - [`transform`]: Centroid pan and spread zoom of multiple pointers
//! - [`velocity`]: Least-squares velocity estimation for flings
//! - [`config`]: Shared thresholds
//!
//! ## Design Philosophy
//!
//! Each piece is designed to be:
//!
//! - **Minimal and focused**: One interaction concern per type
//! - **Clock-free**: Time is an input (milliseconds), never read from the system
//! - **Consumption-aware**: Recognizers claim events by marking them consumed, so
//!   several recognizers and ancestor handlers can share one pointer stream
//!
//! The crate does not assume any particular UI framework or event loop. Hosts
//! convert native events to [`pointer::PointerInput`] and drive the pieces
//! directly, or use a higher-level controller built on them.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::pointer::{PointerId, PointerInput, PointerTracker};
//! use understory_gesture::transform::TransformChange;
//!
//! let mut tracker = PointerTracker::new();
//! tracker.update(&PointerInput::down(PointerId(1), Point::new(40.0, 50.0), 0));
//! tracker.update(&PointerInput::down(PointerId(2), Point::new(60.0, 50.0), 0));
//! tracker.update(&PointerInput::moved(PointerId(2), Point::new(80.0, 50.0), 16));
//!
//! let change = TransformChange::from_tracker(&tracker).unwrap();
//! assert_eq!(change.centroid, Point::new(50.0, 50.0));
//! assert!((change.zoom - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `std` (default): Use the standard library for Kurbo's float math.
//! - `libm`: Use `libm` instead, for `no_std` targets.
//! - `serde`: Serialize and deserialize [`config::GestureConfig`] and pointer ids.

#![no_std]

pub mod config;
pub mod drag;
pub mod pointer;
pub mod tap;
pub mod transform;
pub mod velocity;
