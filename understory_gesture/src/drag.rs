// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag helpers: per-pointer movement deltas and touch-slop detection.
//!
//! ## Usage
//!
//! 1) When a pointer goes down, feed its movement to a [`TouchSlopDetector`]
//!    until [`TouchSlopDetector::add`] reports the overshoot past the slop.
//! 2) Call [`DragState::start`] with the pointer id and its position, then
//!    apply the overshoot as the first drag delta.
//! 3) On each move of that pointer, [`DragState::update`] returns the delta
//!    since the previous move. Moves of other pointers return `None`.
//! 4) End the drag with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::drag::{DragState, SlopAxis, TouchSlopDetector};
//! use understory_gesture::pointer::PointerId;
//!
//! let mut slop = TouchSlopDetector::new(SlopAxis::Free, 8.0);
//! assert_eq!(slop.add(Vec2::new(5.0, 0.0)), None);
//! assert_eq!(slop.add(Vec2::new(5.0, 0.0)), Some(Vec2::new(2.0, 0.0)));
//!
//! let mut drag = DragState::default();
//! drag.start(PointerId(1), Point::new(10.0, 0.0));
//! assert!(drag.is_dragging());
//! assert_eq!(drag.update(PointerId(1), Point::new(15.0, 5.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(PointerId(2), Point::new(99.0, 99.0)), None);
//! ```

use kurbo::{Point, Vec2};

use crate::pointer::PointerId;

/// Tracks one pointer's drag for move event processing.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Pointer driving the drag.
    pub pointer: Option<PointerId>,
    /// Start position of the drag operation.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag.
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Start tracking a new drag of `pointer` from the given position.
    pub fn start(&mut self, pointer: PointerId, pos: Point) {
        self.pointer = Some(pointer);
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Update with a new position of `pointer`, returning the movement since the last update.
    ///
    /// Returns `None` when not dragging or when `pointer` is not the dragging pointer.
    pub fn update(&mut self, pointer: PointerId, pos: Point) -> Option<Vec2> {
        if self.pointer != Some(pointer) {
            return None;
        }
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// End the current drag operation and reset state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag operation is active.
    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }
}

/// Which movement counts toward the slop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlopAxis {
    /// Euclidean distance in any direction.
    #[default]
    Free,
    /// Only vertical travel.
    Vertical,
}

/// Accumulates movement until it exceeds the touch slop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSlopDetector {
    axis: SlopAxis,
    slop: f64,
    total: Vec2,
}

impl TouchSlopDetector {
    /// Creates a detector for `axis` with the given slop distance.
    #[must_use]
    pub fn new(axis: SlopAxis, slop: f64) -> Self {
        Self {
            axis,
            slop,
            total: Vec2::ZERO,
        }
    }

    /// The axis this detector measures.
    #[must_use]
    pub fn axis(&self) -> SlopAxis {
        self.axis
    }

    /// Movement accumulated so far.
    #[must_use]
    pub fn total(&self) -> Vec2 {
        self.total
    }

    /// Adds `delta`. Once the slop is reached, returns the movement past it.
    ///
    /// For [`SlopAxis::Vertical`] the overshoot has no horizontal component.
    pub fn add(&mut self, delta: Vec2) -> Option<Vec2> {
        self.total += delta;
        match self.axis {
            SlopAxis::Free => {
                let distance = self.total.hypot();
                if distance == 0.0 {
                    return (self.slop <= 0.0).then_some(Vec2::ZERO);
                }
                (distance >= self.slop).then(|| self.total - self.total / distance * self.slop)
            }
            SlopAxis::Vertical => {
                let y = self.total.y;
                if -self.slop < y && y < self.slop {
                    return None;
                }
                let slop = if y < 0.0 { -self.slop } else { self.slop };
                Some(Vec2::new(0.0, y - slop))
            }
        }
    }

    /// Forgets accumulated movement.
    pub fn reset(&mut self) {
        self.total = Vec2::ZERO;
    }
}
