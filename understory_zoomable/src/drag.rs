// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer drag: panning zoomed content or swiping to dismiss.
//!
//! The branch is chosen when the pointer goes down and stays fixed for the
//! whole gesture:
//!
//! - zoomed in: pan, gated by the touch slop in any direction. A drag that
//!   starts against a pinned horizontal edge and moves mostly outward is left
//!   unconsumed so an enclosing pager can take it.
//! - not zoomed, dismiss enabled: vertical dismiss drag, gated by the touch
//!   slop on the vertical axis only.
//! - otherwise: nothing.
//!
//! While a fling is running a new press commits to panning immediately, so a
//! finger can catch the content.

use kurbo::{Point, Vec2};
use understory_gesture::config::GestureConfig;
use understory_gesture::drag::{DragState, SlopAxis, TouchSlopDetector};
use understory_gesture::pointer::{PointerId, PointerInput, PointerPhase, TrackedPointer};

use crate::edge::HorizontalEdge;
use crate::state::ZoomableState;
use crate::zoomable::ZoomableHandler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Pan,
    Dismiss,
}

/// A press that has not yet moved past the touch slop.
#[derive(Clone, Copy, Debug)]
struct Pending {
    pointer: PointerId,
    mode: Mode,
    slop: TouchSlopDetector,
    /// Pinned edges when the pointer went down.
    edge: HorizontalEdge,
    down_time: u64,
    down_position: Point,
}

#[derive(Clone, Copy, Debug, Default)]
enum Phase {
    #[default]
    Idle,
    AwaitingSlop(Pending),
    Dragging {
        mode: Mode,
        drag: DragState,
        /// Whether the pointer has moved since the drag committed.
        moved: bool,
    },
    /// Not ours; waits for every pointer to lift.
    Ignoring,
}

impl Phase {
    /// Commits to a drag owned by `input`'s pointer, measured from its position.
    fn dragging(mode: Mode, input: &PointerInput, moved: bool) -> Self {
        let mut drag = DragState::default();
        drag.start(input.id, input.position);
        Self::Dragging { mode, drag, moved }
    }
}

/// Everything a drag step reads besides the event itself.
pub(crate) struct DragContext<'a, H: ?Sized> {
    pub(crate) state: &'a mut ZoomableState,
    pub(crate) config: &'a GestureConfig,
    pub(crate) dismiss_enabled: bool,
    pub(crate) handler: &'a mut H,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct DragRecognizer {
    phase: Phase,
}

impl DragRecognizer {
    /// Abandons the current drag, springing a dismiss offset back to zero.
    pub(crate) fn cancel(&mut self, state: &mut ZoomableState, now: u64) {
        if let Phase::Dragging { mode, .. } = self.phase {
            cancel(state, mode, now);
        }
        self.phase = Phase::Idle;
    }

    pub(crate) fn on_pointer<H: ZoomableHandler + ?Sized>(
        &mut self,
        input: &mut PointerInput,
        tracked: Option<TrackedPointer>,
        pressed: usize,
        cx: DragContext<'_, H>,
    ) {
        self.phase = match self.phase {
            Phase::Idle => on_idle(input, pressed, cx),
            Phase::AwaitingSlop(mut pending) => {
                on_awaiting_slop(&mut pending, input, tracked, pressed, cx)
                    .unwrap_or(Phase::AwaitingSlop(pending))
            }
            Phase::Dragging { mode, drag, moved } => {
                on_dragging(input, pressed, cx, mode, drag, moved)
            }
            Phase::Ignoring if pressed == 0 => Phase::Idle,
            Phase::Ignoring => Phase::Ignoring,
        };
    }
}

fn on_idle<H: ZoomableHandler + ?Sized>(
    input: &PointerInput,
    pressed: usize,
    cx: DragContext<'_, H>,
) -> Phase {
    if input.phase != PointerPhase::Down {
        return Phase::Idle;
    }
    if input.consumed || pressed != 1 {
        return Phase::Ignoring;
    }
    let state = cx.state;
    let (mode, axis) = if state.is_zooming() {
        if state.is_flinging() {
            log::debug!("press during fling: pan without slop");
            state.on_gesture_start();
            state.add_position(input.time, input.position);
            return Phase::dragging(Mode::Pan, input, false);
        }
        (Mode::Pan, SlopAxis::Free)
    } else if cx.dismiss_enabled {
        (Mode::Dismiss, SlopAxis::Vertical)
    } else {
        return Phase::Ignoring;
    };
    Phase::AwaitingSlop(Pending {
        pointer: input.id,
        mode,
        slop: TouchSlopDetector::new(axis, cx.config.touch_slop),
        edge: state.horizontal_edge(),
        down_time: input.time,
        down_position: input.position,
    })
}

/// Returns the next phase, or `None` to keep waiting on the updated `pending`.
fn on_awaiting_slop<H: ZoomableHandler + ?Sized>(
    pending: &mut Pending,
    input: &mut PointerInput,
    tracked: Option<TrackedPointer>,
    pressed: usize,
    cx: DragContext<'_, H>,
) -> Option<Phase> {
    let pointer = pending.pointer;
    match input.phase {
        PointerPhase::Down => (input.id != pointer).then_some(Phase::Ignoring),
        _ if input.id != pointer => None,
        PointerPhase::Up | PointerPhase::Cancel => Some(if pressed == 0 {
            Phase::Idle
        } else {
            Phase::Ignoring
        }),
        PointerPhase::Move if input.consumed => Some(Phase::Ignoring),
        PointerPhase::Move => {
            let delta = tracked.map_or(Vec2::ZERO, |p| p.position_change());
            let over = pending.slop.add(delta)?;
            let mode = pending.mode;
            if mode == Mode::Pan && !pending.edge.is_empty() {
                let offset = if over == Vec2::ZERO { delta } else { over };
                let direction = offset.x / offset.y.abs();
                if pending.edge.is_outwards(direction) && direction.abs() > 1.0 {
                    log::trace!("drag yields at pinned edge {:?}", pending.edge);
                    pending.slop.reset();
                    return None;
                }
            }
            input.consume();
            let state = cx.state;
            state.on_gesture_start();
            match mode {
                Mode::Pan => {
                    state.add_position(pending.down_time, pending.down_position);
                    if over != Vec2::ZERO {
                        state.on_drag(over);
                        state.add_position(input.time, input.position);
                    }
                }
                Mode::Dismiss => {
                    if over.y != 0.0 {
                        state.on_dismiss_drag(over.y);
                    }
                }
            }
            log::debug!("{mode:?} drag start");
            Some(Phase::dragging(mode, input, true))
        }
    }
}

fn on_dragging<H: ZoomableHandler + ?Sized>(
    input: &mut PointerInput,
    pressed: usize,
    cx: DragContext<'_, H>,
    mode: Mode,
    mut drag: DragState,
    mut moved: bool,
) -> Phase {
    let state = cx.state;
    let owned = drag.pointer == Some(input.id);
    let settled = if pressed == 0 {
        Phase::Idle
    } else {
        Phase::Ignoring
    };
    match input.phase {
        PointerPhase::Down if owned => Phase::Dragging { mode, drag, moved },
        PointerPhase::Down => {
            cancel(state, mode, input.time);
            settled
        }
        _ if !owned => Phase::Dragging { mode, drag, moved },
        PointerPhase::Cancel => {
            cancel(state, mode, input.time);
            settled
        }
        PointerPhase::Move if input.consumed => {
            cancel(state, mode, input.time);
            settled
        }
        PointerPhase::Move => {
            let delta = drag.update(input.id, input.position).unwrap_or(Vec2::ZERO);
            moved |= delta != Vec2::ZERO;
            match mode {
                Mode::Pan => {
                    state.on_drag(delta);
                    state.add_position(input.time, input.position);
                }
                Mode::Dismiss => state.on_dismiss_drag(delta.y),
            }
            input.consume();
            Phase::Dragging { mode, drag, moved }
        }
        PointerPhase::Up => {
            // A press that only caught a fling is still a tap.
            if moved {
                input.consume();
            }
            match mode {
                Mode::Pan => state.on_drag_end(cx.config.max_fling_velocity, input.time),
                Mode::Dismiss => {
                    let dismissed = state.should_dismiss() && cx.handler.on_dismiss();
                    state.on_dismiss_drag_end(dismissed, input.time);
                }
            }
            log::debug!("{mode:?} drag end");
            settled
        }
    }
}

fn cancel(state: &mut ZoomableState, mode: Mode, now: u64) {
    log::debug!("{mode:?} drag cancelled");
    match mode {
        Mode::Pan => state.on_drag_cancel(),
        Mode::Dismiss => state.on_dismiss_drag_end(false, now),
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use understory_gesture::pointer::PointerTracker;

    use super::*;
    use crate::config::ZoomableConfig;

    const A: PointerId = PointerId(1);

    struct Harness {
        drag: DragRecognizer,
        tracker: PointerTracker,
        config: GestureConfig,
        state: ZoomableState,
    }

    impl Harness {
        fn new() -> Self {
            let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
            state.on_measured(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
            Self {
                drag: DragRecognizer::default(),
                tracker: PointerTracker::new(),
                config: GestureConfig {
                    touch_slop: 18.0,
                    ..GestureConfig::default()
                },
                state,
            }
        }

        fn send(&mut self, mut input: PointerInput) -> PointerInput {
            let tracked = self.tracker.update(&input);
            let pressed = self.tracker.pressed_count();
            let cx = DragContext {
                state: &mut self.state,
                config: &self.config,
                dismiss_enabled: true,
                handler: &mut (),
            };
            self.drag.on_pointer(&mut input, tracked, pressed, cx);
            input
        }

        fn settle(&mut self, mut now: u64) {
            while self.state.advance(now) {
                now += 16;
            }
        }
    }

    #[test]
    fn cancelled_dismiss_springs_back() {
        let mut h = Harness::new();
        h.send(PointerInput::down(A, Point::new(50.0, 50.0), 0));
        assert!(h.send(PointerInput::moved(A, Point::new(50.0, 70.0), 10)).consumed);
        h.send(PointerInput::moved(A, Point::new(50.0, 90.0), 20));
        assert_eq!(h.state.dismiss_drag_absolute_offset(), 22.0);

        h.drag.cancel(&mut h.state, 30);
        assert!(!h.state.is_gesture_active());
        h.settle(30);
        assert_eq!(h.state.dismiss_drag_absolute_offset(), 0.0);

        // The rest of the stream is no longer ours.
        let late = h.send(PointerInput::moved(A, Point::new(50.0, 99.0), 40));
        assert!(!late.consumed);
        assert_eq!(h.state.dismiss_drag_absolute_offset(), 0.0);
    }

    #[test]
    fn cancel_before_slop_leaves_state_alone() {
        let mut h = Harness::new();
        h.send(PointerInput::down(A, Point::new(50.0, 50.0), 0));
        h.send(PointerInput::moved(A, Point::new(50.0, 60.0), 10));
        h.drag.cancel(&mut h.state, 20);
        assert!(!h.state.is_gesture_active());
        assert!(!h.state.is_animating());
        assert_eq!(h.state.dismiss_drag_absolute_offset(), 0.0);
    }
}
