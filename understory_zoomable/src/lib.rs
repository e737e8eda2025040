// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Zoomable: a headless zoomable and pannable viewport.
//!
//! A [`ZoomableState`] holds the scale, translation, and dismiss offset of
//! content shown in a viewport. A [`Zoomable`] turns a pointer stream into
//! changes of that state:
//!
//! - two or more pointers pinch-zoom and pan about their centroid
//! - a double tap toggles between the resting scale and a zoomed-in scale
//! - one pointer pans zoomed content and flings it on release
//! - at rest scale, an optional vertical drag swipes the content away
//!
//! Translation is always kept inside bounds derived from the viewport size,
//! the content size, and the scale, so the content never leaves a gap at a
//! viewport edge. Events a recognizer claims are marked consumed; the rest
//! are left for enclosing handlers such as a horizontal pager.
//!
//! The crate reads no clocks and renders nothing. The host supplies event
//! timestamps and frame times in milliseconds, reports layout through the
//! [`ZoomableState::on_measured`] adapter, and draws the content at
//! [`ZoomableState::placement`] scaled by [`ZoomableState::scale`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_gesture::pointer::{PointerId, PointerInput};
//! use understory_zoomable::{Zoomable, ZoomableConfig, ZoomableState};
//!
//! let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
//! state.on_measured(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
//! let mut zoomable = Zoomable::new(state);
//!
//! // Double tap the top-left corner.
//! let finger = PointerId(1);
//! let corner = Point::ZERO;
//! for (down, up) in [(0, 20), (100, 120)] {
//!     zoomable.handle_pointer(&mut PointerInput::down(finger, corner, down), &mut ());
//!     zoomable.handle_pointer(&mut PointerInput::up(finger, corner, up), &mut ());
//! }
//!
//! // Step frames until the zoom animation settles.
//! let mut now = 120;
//! while zoomable.tick(now, &mut ()) {
//!     now += 16;
//! }
//! assert_eq!(zoomable.state().scale(), 2.0);
//! assert_eq!(zoomable.state().translation(), Vec2::new(50.0, 50.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): Use the standard library for float math.
//! - `libm`: Use `libm` instead, for `no_std` targets.
//! - `serde`: Serialize and deserialize [`ZoomableConfig`] and [`SavedTransform`].

#![no_std]

mod config;
mod drag;
mod edge;
mod layout;
mod pinch;
mod saved;
mod state;
mod zoomable;

pub use config::{ConfigError, OverZoomRange, ZoomableConfig};
pub use edge::HorizontalEdge;
pub use saved::SavedTransform;
pub use state::{TargetTranslation, ZoomableState};
pub use zoomable::{Zoomable, ZoomableHandler};
