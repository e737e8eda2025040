// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pointer transform deltas.
//!
//! Given a [`PointerTracker`] that just applied an event, [`TransformChange`]
//! reports how the held pointers moved as a group: the pan of their centroid
//! and the zoom factor of their average spread around it.

use kurbo::{Point, Vec2};

use crate::pointer::{PointerTracker, TrackedPointer};

/// Pan and zoom produced by one pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformChange {
    /// Centroid of the held pointers before the event.
    pub centroid: Point,
    /// Movement of the centroid.
    pub pan: Vec2,
    /// Ratio of current spread to previous spread; `1.0` when undefined.
    pub zoom: f64,
}

impl TransformChange {
    /// Computes the change from the pointers held before and after the latest event.
    ///
    /// Returns `None` when no pointer was held across the event.
    #[must_use]
    pub fn from_tracker(tracker: &PointerTracker) -> Option<Self> {
        let held = tracker.iter().filter(|p| p.is_held());
        let previous = centroid(held.clone().map(|p| p.previous_position))?;
        let current = centroid(held.clone().map(|p| p.position))?;

        let previous_size = spread(held.clone(), previous, |p| p.previous_position);
        let current_size = spread(held, current, |p| p.position);
        let zoom = if previous_size == 0.0 || current_size == 0.0 {
            1.0
        } else {
            current_size / previous_size
        };
        Some(Self {
            centroid: previous,
            pan: current - previous,
            zoom,
        })
    }

    /// Returns `true` if this change moves or scales nothing.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.pan == Vec2::ZERO && self.zoom == 1.0
    }
}

fn centroid(points: impl Iterator<Item = Point>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0_u32;
    for p in points {
        sum += p.to_vec2();
        count += 1;
    }
    (count > 0).then(|| (sum / f64::from(count)).to_point())
}

fn spread<'a>(
    pointers: impl Iterator<Item = &'a TrackedPointer>,
    center: Point,
    position: impl Fn(&TrackedPointer) -> Point,
) -> f64 {
    let mut total = 0.0;
    let mut count = 0_u32;
    for p in pointers {
        total += (position(p) - center).hypot();
        count += 1;
    }
    if count == 0 { 0.0 } else { total / f64::from(count) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{PointerId, PointerInput};

    const A: PointerId = PointerId(1);
    const B: PointerId = PointerId(2);

    fn two_fingers(a: Point, b: Point) -> PointerTracker {
        let mut tracker = PointerTracker::new();
        tracker.update(&PointerInput::down(A, a, 0));
        tracker.update(&PointerInput::down(B, b, 0));
        tracker
    }

    #[test]
    fn spreading_fingers_zooms_about_previous_centroid() {
        let mut tracker = two_fingers(Point::new(40.0, 50.0), Point::new(60.0, 50.0));
        tracker.update(&PointerInput::moved(B, Point::new(80.0, 50.0), 10));
        let change = TransformChange::from_tracker(&tracker).unwrap();
        assert_eq!(change.centroid, Point::new(50.0, 50.0));
        assert_eq!(change.pan, Vec2::new(10.0, 0.0));
        // Spread goes from 10 to 20.
        assert!((change.zoom - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_finger_pans_without_zoom() {
        let mut tracker = PointerTracker::new();
        tracker.update(&PointerInput::down(A, Point::new(0.0, 0.0), 0));
        tracker.update(&PointerInput::moved(A, Point::new(3.0, -4.0), 10));
        let change = TransformChange::from_tracker(&tracker).unwrap();
        assert_eq!(change.pan, Vec2::new(3.0, -4.0));
        assert_eq!(change.zoom, 1.0);
    }

    #[test]
    fn newly_pressed_pointer_does_not_contribute() {
        let tracker = two_fingers(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let change = TransformChange::from_tracker(&tracker).unwrap();
        assert!(change.is_identity());
        assert_eq!(change.centroid, Point::ZERO);
    }

    #[test]
    fn nothing_held_yields_none() {
        let mut tracker = PointerTracker::new();
        tracker.update(&PointerInput::down(A, Point::ZERO, 0));
        assert!(TransformChange::from_tracker(&tracker).is_none());
        tracker.update(&PointerInput::up(A, Point::ZERO, 5));
        assert!(TransformChange::from_tracker(&tracker).is_none());
    }
}
