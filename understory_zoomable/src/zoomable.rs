// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture reactor that drives a [`ZoomableState`].

use kurbo::Point;
use understory_gesture::config::GestureConfig;
use understory_gesture::pointer::{PointerInput, PointerTracker};
use understory_gesture::tap::{TapOutcome, TapRecognizer};

use crate::drag::{DragContext, DragRecognizer};
use crate::pinch::PinchRecognizer;
use crate::state::ZoomableState;

/// Host callbacks fired by [`Zoomable`].
///
/// Both methods have defaults, so a host implements only what it needs.
/// `()` ignores everything.
pub trait ZoomableHandler {
    /// A single tap completed at `position` (viewport coordinates).
    fn on_tap(&mut self, position: Point) {
        let _ = position;
    }

    /// A dismiss drag was released past the threshold.
    ///
    /// Return `true` if the host is removing the content; the dismiss offset
    /// is then left in place. Returning `false` springs the content back.
    fn on_dismiss(&mut self) -> bool {
        false
    }
}

impl ZoomableHandler for () {}

/// Pointer-driven zoom, pan, fling, and swipe-to-dismiss over a [`ZoomableState`].
///
/// Feed every pointer event of the viewport to [`handle_pointer`](Self::handle_pointer)
/// and call [`tick`](Self::tick) once per frame while it returns `true`.
/// Events a recognizer claims are marked consumed; anything left unconsumed
/// is free for an enclosing handler (for example a horizontal pager).
#[derive(Debug)]
pub struct Zoomable {
    state: ZoomableState,
    gesture: GestureConfig,
    enabled: bool,
    dismiss_gesture_enabled: bool,
    pointers: PointerTracker,
    tap: TapRecognizer,
    pinch: PinchRecognizer,
    drag: DragRecognizer,
}

impl Zoomable {
    /// Wraps `state` with default gesture thresholds. Dismiss is off.
    #[must_use]
    pub fn new(state: ZoomableState) -> Self {
        let gesture = GestureConfig::default();
        Self {
            state,
            gesture,
            enabled: true,
            dismiss_gesture_enabled: false,
            pointers: PointerTracker::new(),
            tap: TapRecognizer::new(gesture),
            pinch: PinchRecognizer::default(),
            drag: DragRecognizer::default(),
        }
    }

    /// Returns a copy with different gesture thresholds.
    #[must_use]
    pub fn with_gesture_config(mut self, gesture: GestureConfig) -> Self {
        self.set_gesture_config(gesture);
        self
    }

    /// The driven state.
    #[must_use]
    pub fn state(&self) -> &ZoomableState {
        &self.state
    }

    /// Mutable access to the driven state, for programmatic zoom and layout.
    pub fn state_mut(&mut self) -> &mut ZoomableState {
        &mut self.state
    }

    /// Unwraps the driven state.
    #[must_use]
    pub fn into_state(self) -> ZoomableState {
        self.state
    }

    /// Gesture thresholds in use.
    #[must_use]
    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    /// Replaces the gesture thresholds.
    pub fn set_gesture_config(&mut self, gesture: GestureConfig) {
        self.gesture = gesture;
        self.tap.set_config(gesture);
    }

    /// Returns `true` if pointer input is processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables all pointer handling at time `now` (ms).
    ///
    /// A disabled zoomable consumes nothing. Toggling cancels any gesture in
    /// progress; a dismiss offset springs back to zero.
    pub fn set_enabled(&mut self, enabled: bool, now: u64) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.cancel_gestures(now);
        }
    }

    /// Returns `true` if a vertical drag at rest scale swipes to dismiss.
    #[must_use]
    pub fn is_dismiss_gesture_enabled(&self) -> bool {
        self.dismiss_gesture_enabled
    }

    /// Enables or disables swipe-to-dismiss. Takes effect on the next press.
    pub fn set_dismiss_gesture_enabled(&mut self, enabled: bool) {
        self.dismiss_gesture_enabled = enabled;
    }

    /// Processes one pointer event, possibly marking it consumed.
    pub fn handle_pointer<H: ZoomableHandler + ?Sized>(
        &mut self,
        input: &mut PointerInput,
        handler: &mut H,
    ) {
        if !self.enabled {
            return;
        }
        let tracked = self.pointers.update(input);
        let pressed = self.pointers.pressed_count();

        self.drag.on_pointer(
            input,
            tracked,
            pressed,
            DragContext {
                state: &mut self.state,
                config: &self.gesture,
                dismiss_enabled: self.dismiss_gesture_enabled,
                handler: &mut *handler,
            },
        );
        self.pinch.on_pointer(input, &self.pointers, &mut self.state);
        let outcome = self.tap.on_pointer(input, pressed);
        self.on_tap_outcome(outcome, input.time, handler);
    }

    /// Frame callback at time `now` (ms).
    ///
    /// Fires a pending single tap once the double-tap window lapses, steps
    /// animations, and starts the over-zoom snap-back when nothing else is
    /// moving the content. Returns `true` while more frames are needed.
    pub fn tick<H: ZoomableHandler + ?Sized>(&mut self, now: u64, handler: &mut H) -> bool {
        let outcome = self.tap.on_time(now);
        self.on_tap_outcome(outcome, now, handler);
        let mut busy = self.state.advance(now);
        if !self.pinch.is_active() && self.state.settle_over_zoom(now) {
            busy = true;
        }
        busy || self.tap.is_pending()
    }

    fn on_tap_outcome<H: ZoomableHandler + ?Sized>(
        &mut self,
        outcome: TapOutcome,
        now: u64,
        handler: &mut H,
    ) {
        match outcome {
            TapOutcome::None => {}
            TapOutcome::Tap(position) => handler.on_tap(position),
            TapOutcome::DoubleTap(position) => self.state.toggle_zoom_at(position, now),
        }
    }

    fn cancel_gestures(&mut self, now: u64) {
        self.drag.cancel(&mut self.state, now);
        self.pinch.cancel(&mut self.state);
        self.pointers.clear();
        self.tap.reset();
    }
}
