// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout adapter: how a host sizes and places the zoomed content.
//!
//! The host measures its content under [`ZoomableState::content_constraints`],
//! reports the result through [`ZoomableState::on_measured`], and draws the
//! content at [`ZoomableState::placement`] relative to the viewport origin,
//! scaled by [`ZoomableState::scale`] about the content center.

use kurbo::{Size, Vec2};

use crate::state::ZoomableState;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

impl ZoomableState {
    /// Size the content should be measured at: the viewport scaled up, rounded to whole pixels.
    #[must_use]
    pub fn content_constraints(&self, viewport: Size) -> Size {
        (viewport * self.scale()).round()
    }

    /// Records the viewport and measured content size.
    ///
    /// `measured` is in scaled pixels (as laid out under
    /// [`content_constraints`](Self::content_constraints)); it is divided back
    /// by the scale before being stored.
    pub fn on_measured(&mut self, viewport: Size, measured: Size) {
        self.set_viewport_size(viewport);
        self.set_content_size(measured / self.scale());
    }

    /// Offset that centers the scaled content in the viewport, rounded to whole pixels.
    ///
    /// Zero while the content size is unknown.
    #[must_use]
    pub fn bound_offset(&self) -> Vec2 {
        let content = self.content_size();
        if content == Size::ZERO {
            return Vec2::ZERO;
        }
        let overflow = content * self.scale() - self.viewport_size();
        Vec2::new(
            (overflow.width / 2.0).round(),
            (overflow.height / 2.0).round(),
        )
    }

    /// Where to draw the scaled content's top-left corner, relative to the viewport origin.
    ///
    /// Includes the resisted dismiss offset.
    #[must_use]
    pub fn placement(&self) -> Vec2 {
        self.translation().round() - self.bound_offset()
            + Vec2::new(0.0, self.dismiss_drag_offset().round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoomableConfig;

    #[test]
    fn measure_then_place() {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        let viewport = Size::new(100.0, 80.0);
        assert_eq!(state.content_constraints(viewport), viewport);
        state.on_measured(viewport, Size::new(100.0, 80.0));
        assert_eq!(state.content_size(), Size::new(100.0, 80.0));
        assert_eq!(state.placement(), Vec2::ZERO);

        state.set_scale(2.0);
        assert_eq!(state.content_constraints(viewport), Size::new(200.0, 160.0));
        assert_eq!(state.bound_offset(), Vec2::new(50.0, 40.0));
        state.on_drag(Vec2::new(20.4, -100.0));
        assert_eq!(state.placement(), Vec2::new(-30.0, -80.0));
    }

    #[test]
    fn measured_size_is_unscaled() {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        state.set_scale(2.0);
        state.on_measured(Size::new(50.0, 50.0), Size::new(100.0, 60.0));
        assert_eq!(state.content_size(), Size::new(50.0, 30.0));
    }

    #[test]
    fn unknown_content_has_no_bound_offset() {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        state.set_viewport_size(Size::new(100.0, 100.0));
        assert_eq!(state.bound_offset(), Vec2::ZERO);
    }

    #[test]
    fn placement_includes_dismiss_offset() {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        state.on_measured(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
        state.on_dismiss_drag(150.0);
        assert_eq!(state.placement(), Vec2::new(0.0, 50.0));
    }
}
