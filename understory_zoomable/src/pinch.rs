// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pointer pinch and pan.

use kurbo::Vec2;
use understory_gesture::pointer::{PointerInput, PointerPhase, PointerTracker};
use understory_gesture::transform::TransformChange;

use crate::state::ZoomableState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Active,
    /// Cancelled by another handler; waits for every pointer to lift.
    Spent,
}

/// Turns two-or-more-pointer movement into scale and translation changes.
#[derive(Clone, Debug, Default)]
pub(crate) struct PinchRecognizer {
    phase: Phase,
}

impl PinchRecognizer {
    pub(crate) fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Ends an active pinch without a further transform.
    pub(crate) fn cancel(&mut self, state: &mut ZoomableState) {
        if self.phase == Phase::Active {
            state.on_transform_end();
        }
        self.phase = Phase::Idle;
    }

    pub(crate) fn on_pointer(
        &mut self,
        input: &mut PointerInput,
        pointers: &PointerTracker,
        state: &mut ZoomableState,
    ) {
        let pressed = pointers.pressed_count();
        match self.phase {
            Phase::Idle => {
                if input.phase == PointerPhase::Down && pressed >= 2 {
                    log::debug!("pinch start with {pressed} pointers");
                    state.on_gesture_start();
                    self.phase = Phase::Active;
                }
            }
            Phase::Active => {
                if input.is_consumed() {
                    log::debug!("pinch cancelled by consumed input");
                    state.on_transform_end();
                    self.phase = Phase::Spent;
                    return;
                }
                if let Some(change) = TransformChange::from_tracker(pointers) {
                    if !change.is_identity() && state.dismiss_drag_absolute_offset() == 0.0 {
                        state.on_transform(change.centroid + change.pan, change.pan, change.zoom);
                    }
                }
                let moved = pointers
                    .get(input.id)
                    .is_some_and(|p| p.position_change() != Vec2::ZERO);
                if input.phase == PointerPhase::Move && moved {
                    input.consume();
                }
                if pressed < 2 {
                    log::debug!("pinch end");
                    state.on_transform_end();
                    self.phase = Phase::Idle;
                }
            }
            Phase::Spent => {
                if pressed == 0 {
                    self.phase = Phase::Idle;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use understory_gesture::pointer::PointerId;

    use super::*;
    use crate::config::ZoomableConfig;

    const A: PointerId = PointerId(1);
    const B: PointerId = PointerId(2);

    struct Harness {
        pinch: PinchRecognizer,
        tracker: PointerTracker,
        state: ZoomableState,
    }

    impl Harness {
        fn new() -> Self {
            let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
            state.set_viewport_size(Size::new(100.0, 100.0));
            state.set_content_size(Size::new(100.0, 100.0));
            Self {
                pinch: PinchRecognizer::default(),
                tracker: PointerTracker::new(),
                state,
            }
        }

        fn send(&mut self, mut input: PointerInput) -> PointerInput {
            self.tracker.update(&input);
            self.pinch.on_pointer(&mut input, &self.tracker, &mut self.state);
            input
        }

        fn press_both(&mut self) {
            self.send(PointerInput::down(A, Point::new(40.0, 50.0), 0));
            self.send(PointerInput::down(B, Point::new(60.0, 50.0), 5));
        }
    }

    #[test]
    fn spreading_fingers_zooms_about_centroid() {
        let mut h = Harness::new();
        h.send(PointerInput::down(A, Point::new(40.0, 50.0), 0));
        assert!(!h.pinch.is_active());
        h.send(PointerInput::down(B, Point::new(60.0, 50.0), 5));
        assert!(h.pinch.is_active());
        assert!(h.state.is_gesture_active());

        assert!(h.send(PointerInput::moved(B, Point::new(80.0, 50.0), 10)).consumed);
        assert!(h.send(PointerInput::moved(A, Point::new(20.0, 50.0), 15)).consumed);
        // Spread went from 10 to 30 px around the center.
        assert!((h.state.scale() - 3.0).abs() < 1e-9);
        assert_eq!(h.state.translation(), Vec2::ZERO);

        h.send(PointerInput::up(B, Point::new(80.0, 50.0), 20));
        assert!(!h.pinch.is_active());
        assert!(!h.state.is_gesture_active());
    }

    #[test]
    fn cancel_ends_active_pinch() {
        let mut h = Harness::new();
        h.press_both();
        assert!(h.state.is_gesture_active());
        h.pinch.cancel(&mut h.state);
        assert!(!h.pinch.is_active());
        assert!(!h.state.is_gesture_active());
    }

    #[test]
    fn consumed_input_cancels_until_all_lift() {
        let mut h = Harness::new();
        h.press_both();
        let mut claimed = PointerInput::moved(B, Point::new(90.0, 50.0), 10);
        claimed.consume();
        h.send(claimed);
        assert!(!h.pinch.is_active());
        assert_eq!(h.state.scale(), 1.0);

        // Still two pointers down: stays spent.
        h.send(PointerInput::moved(B, Point::new(99.0, 50.0), 15));
        assert_eq!(h.state.scale(), 1.0);
        h.send(PointerInput::up(A, Point::new(40.0, 50.0), 20));
        h.send(PointerInput::up(B, Point::new(99.0, 50.0), 25));
        h.press_both();
        assert!(h.pinch.is_active());
    }

    #[test]
    fn dismiss_offset_blocks_transform() {
        let mut h = Harness::new();
        h.state.on_dismiss_drag(10.0);
        h.press_both();
        h.send(PointerInput::moved(B, Point::new(80.0, 50.0), 10));
        assert_eq!(h.state.scale(), 1.0);
    }
}
