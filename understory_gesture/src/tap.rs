// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single and double tap recognition.
//!
//! [`TapRecognizer`] watches the pointer stream of a region and reports
//! [`TapOutcome::Tap`] or [`TapOutcome::DoubleTap`]. A single tap is only
//! reported once the double-tap window has lapsed, so hosts must keep calling
//! [`TapRecognizer::on_time`] while [`TapRecognizer::is_pending`] is `true`.
//!
//! A press stops being a tap candidate when it moves further than the touch
//! slop, is held longer than the tap timeout, is claimed by another handler,
//! or when a second pointer goes down.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::config::GestureConfig;
//! use understory_gesture::pointer::{PointerId, PointerInput};
//! use understory_gesture::tap::{TapOutcome, TapRecognizer};
//!
//! let mut taps = TapRecognizer::new(GestureConfig::default());
//! let id = PointerId(1);
//! let at = Point::new(20.0, 30.0);
//!
//! taps.on_pointer(&mut PointerInput::down(id, at, 0), 1);
//! taps.on_pointer(&mut PointerInput::up(id, at, 50), 0);
//! assert!(taps.is_pending());
//!
//! taps.on_pointer(&mut PointerInput::down(id, at, 150), 1);
//! let mut up = PointerInput::up(id, at, 200);
//! assert_eq!(taps.on_pointer(&mut up, 0), TapOutcome::DoubleTap(at));
//! assert!(up.consumed);
//! ```

use kurbo::Point;

use crate::config::GestureConfig;
use crate::pointer::{PointerId, PointerInput, PointerPhase};

/// What a tap recognizer concluded from an event or the passage of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapOutcome {
    /// Nothing to report.
    None,
    /// A single tap completed at the given position.
    Tap(Point),
    /// A double tap completed; the position is where the second press went down.
    DoubleTap(Point),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Pressed {
        pointer: PointerId,
        down_position: Point,
        down_time: u64,
        /// Release position of the first tap when this is the second press.
        first_tap: Option<Point>,
    },
    AwaitingSecond {
        up_position: Point,
        up_time: u64,
    },
    /// Waiting for all pointers to lift after a failed candidate.
    Cancelled,
}

/// Recognizes taps and double taps from a pointer stream.
#[derive(Clone, Debug)]
pub struct TapRecognizer {
    config: GestureConfig,
    phase: Phase,
}

impl TapRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// Replaces the thresholds. Takes effect for the next decision.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Returns `true` while a first tap waits for a possible second one.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self.phase,
            Phase::AwaitingSecond { .. }
                | Phase::Pressed {
                    first_tap: Some(_),
                    ..
                }
        )
    }

    /// Returns `true` while a press is a live tap candidate.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        matches!(self.phase, Phase::Pressed { .. })
    }

    /// Drops any candidate without reporting it.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Resolves time-based transitions at `now` (ms).
    ///
    /// Reports a single tap once the double-tap window has lapsed.
    pub fn on_time(&mut self, now: u64) -> TapOutcome {
        match self.phase {
            Phase::AwaitingSecond {
                up_position,
                up_time,
            } if now.saturating_sub(up_time) > self.config.double_tap_timeout_ms => {
                self.phase = Phase::Idle;
                TapOutcome::Tap(up_position)
            }
            Phase::Pressed { down_time, .. }
                if now.saturating_sub(down_time) > self.config.tap_timeout_ms =>
            {
                // A long press never becomes a tap; keep waiting for the lift.
                self.cancel(1)
            }
            _ => TapOutcome::None,
        }
    }

    /// Processes a pointer change.
    ///
    /// `pressed` is the number of pointers in contact after this change. The
    /// release completing a double tap is consumed.
    pub fn on_pointer(&mut self, input: &mut PointerInput, pressed: usize) -> TapOutcome {
        let expired = self.on_time(input.time);
        if expired != TapOutcome::None {
            if self.phase == Phase::Cancelled && pressed == 0 {
                self.phase = Phase::Idle;
            }
            if self.phase == Phase::Idle {
                self.start_if_down(input, pressed);
            }
            return expired;
        }

        match self.phase {
            Phase::Idle => {
                self.start_if_down(input, pressed);
                TapOutcome::None
            }
            Phase::AwaitingSecond {
                up_position,
                up_time,
            } => {
                if input.phase != PointerPhase::Down {
                    return TapOutcome::None;
                }
                let elapsed = input.time.saturating_sub(up_time);
                let close = (input.position - up_position).hypot() <= self.config.double_tap_slop;
                if !input.consumed
                    && pressed == 1
                    && elapsed >= self.config.double_tap_min_time_ms
                    && close
                {
                    self.phase = Phase::Pressed {
                        pointer: input.id,
                        down_position: input.position,
                        down_time: input.time,
                        first_tap: Some(up_position),
                    };
                    TapOutcome::None
                } else {
                    self.phase = Phase::Idle;
                    self.start_if_down(input, pressed);
                    TapOutcome::Tap(up_position)
                }
            }
            Phase::Pressed {
                pointer,
                down_position,
                first_tap,
                ..
            } => {
                if input.id != pointer {
                    return if input.phase == PointerPhase::Down {
                        self.cancel(pressed)
                    } else {
                        TapOutcome::None
                    };
                }
                match input.phase {
                    PointerPhase::Down => TapOutcome::None,
                    PointerPhase::Move => {
                        let moved = (input.position - down_position).hypot();
                        if input.consumed || moved > self.config.touch_slop {
                            self.cancel(pressed)
                        } else {
                            TapOutcome::None
                        }
                    }
                    PointerPhase::Up if !input.consumed => {
                        if first_tap.is_some() {
                            input.consume();
                            self.phase = Phase::Idle;
                            TapOutcome::DoubleTap(down_position)
                        } else {
                            self.phase = Phase::AwaitingSecond {
                                up_position: input.position,
                                up_time: input.time,
                            };
                            TapOutcome::None
                        }
                    }
                    PointerPhase::Up | PointerPhase::Cancel => self.cancel(pressed),
                }
            }
            Phase::Cancelled => {
                if pressed == 0 {
                    self.phase = Phase::Idle;
                }
                TapOutcome::None
            }
        }
    }

    fn start_if_down(&mut self, input: &PointerInput, pressed: usize) {
        if input.phase == PointerPhase::Down && !input.consumed && pressed == 1 {
            self.phase = Phase::Pressed {
                pointer: input.id,
                down_position: input.position,
                down_time: input.time,
                first_tap: None,
            };
        }
    }

    /// Abandons the current press. A pending first tap is still reported.
    fn cancel(&mut self, pressed: usize) -> TapOutcome {
        let first_tap = match self.phase {
            Phase::Pressed { first_tap, .. } => first_tap,
            _ => None,
        };
        self.phase = if pressed == 0 {
            Phase::Idle
        } else {
            Phase::Cancelled
        };
        first_tap.map_or(TapOutcome::None, TapOutcome::Tap)
    }
}
