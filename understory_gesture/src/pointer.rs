// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event model and per-pointer bookkeeping.
//!
//! Hosts translate their native touch/mouse events into [`PointerInput`]
//! values, one per pointer change, and feed them to recognizers in order.
//! Recognizers that claim an event call [`PointerInput::consume`]; anything
//! left unconsumed is free to propagate to ancestor handlers (for example a
//! horizontal pager).
//!
//! [`PointerTracker`] remembers, for every pointer, its current and previous
//! position and pressed state. After each [`PointerTracker::update`] the
//! "previous" fields describe the state just before that event, which is what
//! multi-touch calculations need.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::pointer::{PointerId, PointerInput, PointerTracker};
//!
//! let mut tracker = PointerTracker::new();
//! tracker.update(&PointerInput::down(PointerId(1), Point::new(10.0, 10.0), 0));
//! tracker.update(&PointerInput::down(PointerId(2), Point::new(30.0, 10.0), 5));
//! assert_eq!(tracker.pressed_count(), 2);
//!
//! let moved = tracker.update(&PointerInput::moved(PointerId(2), Point::new(40.0, 10.0), 10)).unwrap();
//! assert_eq!(moved.previous_position, Point::new(30.0, 10.0));
//! assert_eq!(moved.position, Point::new(40.0, 10.0));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Identifier of a pointer (finger, pen, or mouse) for the duration of its contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

/// What happened to a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    /// Contact started.
    Down,
    /// Contact moved.
    Move,
    /// Contact ended cleanly.
    Up,
    /// Contact was lost without a clean up (system gesture, capture loss, ...).
    Cancel,
}

impl PointerPhase {
    /// Returns `true` if the pointer is in contact after this phase.
    #[must_use]
    pub fn is_pressed(self) -> bool {
        matches!(self, Self::Down | Self::Move)
    }
}

/// A single pointer change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer this change belongs to.
    pub id: PointerId,
    /// Host timestamp in milliseconds.
    pub time: u64,
    /// Position in the gesture region's local coordinates.
    pub position: Point,
    /// Kind of change.
    pub phase: PointerPhase,
    /// Set once some handler claimed this change.
    pub consumed: bool,
}

impl PointerInput {
    /// Creates an unconsumed pointer change.
    #[must_use]
    pub fn new(id: PointerId, phase: PointerPhase, position: Point, time: u64) -> Self {
        Self {
            id,
            time,
            position,
            phase,
            consumed: false,
        }
    }

    /// Shorthand for a [`PointerPhase::Down`] change.
    #[must_use]
    pub fn down(id: PointerId, position: Point, time: u64) -> Self {
        Self::new(id, PointerPhase::Down, position, time)
    }

    /// Shorthand for a [`PointerPhase::Move`] change.
    #[must_use]
    pub fn moved(id: PointerId, position: Point, time: u64) -> Self {
        Self::new(id, PointerPhase::Move, position, time)
    }

    /// Shorthand for a [`PointerPhase::Up`] change.
    #[must_use]
    pub fn up(id: PointerId, position: Point, time: u64) -> Self {
        Self::new(id, PointerPhase::Up, position, time)
    }

    /// Shorthand for a [`PointerPhase::Cancel`] change.
    #[must_use]
    pub fn cancel(id: PointerId, position: Point, time: u64) -> Self {
        Self::new(id, PointerPhase::Cancel, position, time)
    }

    /// Marks this change as claimed.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Returns `true` if some handler claimed this change.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Bookkeeping for one pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedPointer {
    /// Pointer id.
    pub id: PointerId,
    /// Position after the latest event.
    pub position: Point,
    /// Position before the latest event.
    pub previous_position: Point,
    /// Whether the pointer is in contact after the latest event.
    pub pressed: bool,
    /// Whether the pointer was in contact before the latest event.
    pub previous_pressed: bool,
    /// Where the contact started.
    pub down_position: Point,
    /// When the contact started.
    pub down_time: u64,
}

impl TrackedPointer {
    /// Movement caused by the latest event.
    #[must_use]
    pub fn position_change(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Returns `true` if the pointer was held both before and after the latest event.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.pressed && self.previous_pressed
    }
}

/// Tracks all pointers of the current interaction.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    pointers: SmallVec<[TrackedPointer; 4]>,
}

impl PointerTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a pointer change and returns the updated record for that pointer.
    ///
    /// Pointers released by the previous event are dropped first, and every
    /// remaining pointer's "previous" fields are rolled forward, so only the
    /// changed pointer differs between previous and current state.
    ///
    /// Returns `None` for an up/cancel of a pointer that was never seen.
    pub fn update(&mut self, input: &PointerInput) -> Option<TrackedPointer> {
        self.pointers.retain(|p| p.pressed);
        for p in &mut self.pointers {
            p.previous_position = p.position;
            p.previous_pressed = p.pressed;
        }

        let pressed = input.phase.is_pressed();
        if let Some(p) = self.pointers.iter_mut().find(|p| p.id == input.id) {
            p.position = input.position;
            p.pressed = pressed;
            return Some(*p);
        }
        if !pressed {
            return None;
        }
        // A move for an unknown pointer means we missed its down; treat it as
        // a fresh contact so it never contributes a bogus delta.
        let p = TrackedPointer {
            id: input.id,
            position: input.position,
            previous_position: input.position,
            pressed: true,
            previous_pressed: false,
            down_position: input.position,
            down_time: input.time,
        };
        self.pointers.push(p);
        Some(p)
    }

    /// Returns the record for `id`, if tracked.
    #[must_use]
    pub fn get(&self, id: PointerId) -> Option<&TrackedPointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// Number of pointers currently in contact.
    #[must_use]
    pub fn pressed_count(&self) -> usize {
        self.pointers.iter().filter(|p| p.pressed).count()
    }

    /// Returns `true` if any pointer is in contact.
    #[must_use]
    pub fn any_pressed(&self) -> bool {
        self.pointers.iter().any(|p| p.pressed)
    }

    /// Iterates over all tracked pointers, including ones released by the latest event.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedPointer> + Clone {
        self.pointers.iter()
    }

    /// Forgets every pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PointerId = PointerId(1);
    const B: PointerId = PointerId(2);

    #[test]
    fn down_registers_pressed_pointer_without_delta() {
        let mut tracker = PointerTracker::new();
        let p = tracker
            .update(&PointerInput::down(A, Point::new(5.0, 6.0), 100))
            .unwrap();
        assert!(p.pressed);
        assert!(!p.previous_pressed);
        assert_eq!(p.position_change(), Vec2::ZERO);
        assert_eq!(p.down_time, 100);
        assert_eq!(tracker.pressed_count(), 1);
    }

    #[test]
    fn other_pointers_have_no_change_after_an_event() {
        let mut tracker = PointerTracker::new();
        tracker.update(&PointerInput::down(A, Point::new(0.0, 0.0), 0));
        tracker.update(&PointerInput::moved(A, Point::new(3.0, 0.0), 10));
        tracker.update(&PointerInput::down(B, Point::new(50.0, 0.0), 20));

        let a = tracker.get(A).unwrap();
        assert_eq!(a.position_change(), Vec2::ZERO);
        assert!(a.is_held());
        let b = tracker.get(B).unwrap();
        assert!(!b.is_held());
    }

    #[test]
    fn released_pointer_stays_for_one_event() {
        let mut tracker = PointerTracker::new();
        tracker.update(&PointerInput::down(A, Point::ZERO, 0));
        tracker.update(&PointerInput::down(B, Point::ZERO, 0));
        let up = tracker.update(&PointerInput::up(A, Point::new(1.0, 1.0), 5)).unwrap();
        assert!(!up.pressed);
        assert!(up.previous_pressed);
        assert_eq!(tracker.pressed_count(), 1);
        assert!(tracker.get(A).is_some());

        tracker.update(&PointerInput::moved(B, Point::new(2.0, 2.0), 10));
        assert!(tracker.get(A).is_none());
    }

    #[test]
    fn unknown_release_is_ignored() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.update(&PointerInput::up(A, Point::ZERO, 0)).is_none());
        assert!(tracker.update(&PointerInput::cancel(B, Point::ZERO, 0)).is_none());
        assert!(!tracker.any_pressed());
    }

    #[test]
    fn move_without_down_starts_fresh_contact() {
        let mut tracker = PointerTracker::new();
        let p = tracker
            .update(&PointerInput::moved(A, Point::new(9.0, 9.0), 0))
            .unwrap();
        assert!(!p.is_held());
        assert_eq!(p.position_change(), Vec2::ZERO);
    }

    #[test]
    fn consume_marks_input() {
        let mut input = PointerInput::down(A, Point::ZERO, 0);
        assert!(!input.is_consumed());
        input.consume();
        assert!(input.is_consumed());
    }
}
