// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform state shared by all recognizers.
//!
//! [`ZoomableState`] stores a small set of canonical fields (scale,
//! translation, viewport and content sizes, the absolute dismiss offset, and
//! the gesture flag). Everything else (translation bounds, edge flags, the
//! resisted dismiss offset, dismiss progress) is computed on read.
//!
//! Animations are owned by the state and stepped by [`ZoomableState::advance`]
//! with the host's frame time. At most one transform animation (scale,
//! translation, or fling) runs at a time; starting a new one replaces it.

use core::f64::consts::FRAC_PI_2;
use core::fmt;

use kurbo::{Point, Size, Vec2};
use understory_gesture::velocity::VelocityTracker;
use understory_motion::{AnimationSpec, Decay, Interpolation, VectorInterpolation, lerp_vec};

use crate::config::{ConfigError, ZoomableConfig, round_to_tenths};
use crate::edge::HorizontalEdge;
use crate::saved::SavedTransform;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Where translation should end up when animating the scale.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TargetTranslation {
    /// Keep the current center: translation scales with the scale.
    #[default]
    Proportional,
    /// Leave translation alone.
    Unchanged,
    /// Move to this translation.
    To(Vec2),
}

#[derive(Clone, Debug)]
enum TransformAnimation {
    Scale {
        scale: Interpolation,
        from: Vec2,
        to: Option<Vec2>,
    },
    Translate(VectorInterpolation),
    Fling {
        x: Decay,
        y: Decay,
    },
}

impl TransformAnimation {
    fn name(&self) -> &'static str {
        match self {
            Self::Scale { .. } => "scale",
            Self::Translate(_) => "translation",
            Self::Fling { .. } => "fling",
        }
    }
}

/// Scale, translation, and dismiss offset of zoomable content.
#[derive(Clone, Debug)]
pub struct ZoomableState {
    config: ZoomableConfig,
    scale: f64,
    translation: Vec2,
    viewport_size: Size,
    content_size: Size,
    dismiss_offset: f64,
    gesture_active: bool,
    velocity: VelocityTracker,
    transform_animation: Option<TransformAnimation>,
    dismiss_animation: Option<Interpolation>,
}

impl ZoomableState {
    /// Creates a state at the minimum scale with no translation.
    pub fn new(config: ZoomableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            scale: config.min_scale,
            translation: Vec2::ZERO,
            viewport_size: Size::ZERO,
            content_size: Size::ZERO,
            dismiss_offset: 0.0,
            gesture_active: false,
            velocity: VelocityTracker::new(),
            transform_animation: None,
            dismiss_animation: None,
        })
    }

    /// Recreates a state from a [`SavedTransform`].
    ///
    /// The scale is clamped into the configured range. Translation is kept
    /// as saved until a content size arrives and bounds apply.
    pub fn restore(config: ZoomableConfig, saved: SavedTransform) -> Result<Self, ConfigError> {
        let mut state = Self::new(config)?;
        if saved.scale.is_finite() {
            state.scale = saved.scale.clamp(config.min_scale, config.max_scale);
        }
        let translation = Vec2::new(saved.translation_x, saved.translation_y);
        if translation.is_finite() {
            state.translation = translation;
        }
        Ok(state)
    }

    /// Captures the persistent part of the state.
    #[must_use]
    pub fn save(&self) -> SavedTransform {
        SavedTransform {
            translation_x: self.translation.x,
            translation_y: self.translation.y,
            scale: self.scale,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomableConfig {
        &self.config
    }

    /// Replaces the configuration and re-clamps scale and translation.
    pub fn set_config(&mut self, config: ZoomableConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.set_scale(self.scale);
        Ok(())
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current translation in pixels.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Viewport size as last reported by layout.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Unscaled content size as last reported by layout.
    ///
    /// Zero until content has been measured with a non-zero size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns `true` while a pointer gesture (or the fling it launched) is in progress.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Returns `true` while any animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transform_animation.is_some() || self.dismiss_animation.is_some()
    }

    /// Returns `true` while a fling is running.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        matches!(self.transform_animation, Some(TransformAnimation::Fling { .. }))
    }

    /// Sets the viewport size and re-clamps translation.
    pub fn set_viewport_size(&mut self, size: Size) {
        if self.viewport_size != size {
            self.viewport_size = size;
            self.set_translation(self.translation);
        }
    }

    /// Sets the unscaled content size and re-clamps translation.
    ///
    /// A zero size is ignored: content that loads asynchronously reports zero
    /// until ready, and a restored translation must survive that window.
    pub fn set_content_size(&mut self, size: Size) {
        if size == Size::ZERO {
            log::trace!("ignoring zero content size");
            return;
        }
        if self.content_size != size {
            self.content_size = size;
            self.set_translation(self.translation);
        }
    }

    /// Largest translation magnitude per axis, or `None` while content size is unknown.
    #[must_use]
    pub fn max_offset(&self) -> Option<Vec2> {
        if self.content_size == Size::ZERO {
            return None;
        }
        let overflow = self.content_size * self.scale - self.viewport_size;
        Some(Vec2::new(
            overflow.width.max(0.0) / 2.0,
            overflow.height.max(0.0) / 2.0,
        ))
    }

    /// Which horizontal content edges are currently pinned.
    #[must_use]
    pub fn horizontal_edge(&self) -> HorizontalEdge {
        let tolerance = ZoomableConfig::PX_VISIBILITY_THRESHOLD;
        match self.max_offset() {
            Some(max) if max.x != 0.0 => {
                let x = self.translation.x;
                if x >= max.x - tolerance {
                    HorizontalEdge::LEFT
                } else if x <= -max.x + tolerance {
                    HorizontalEdge::RIGHT
                } else {
                    HorizontalEdge::empty()
                }
            }
            _ => HorizontalEdge::BOTH,
        }
    }

    /// Scale a zoom-out returns to: the larger of `min_scale` and the over-zoom floor.
    #[must_use]
    pub fn min_snap_scale(&self) -> f64 {
        let min = self.config.min_scale;
        self.config
            .over_zoom
            .map_or(min, |range| range.min_snap.max(min))
    }

    /// Returns `true` when the content is zoomed in past its resting minimum.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.scale > self.min_snap_scale() && self.scale <= self.config.max_scale
    }

    /// Sets the scale, clamped to the configured range, and re-clamps translation.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = scale.clamp(self.config.min_scale, self.config.max_scale);
        self.set_translation(self.translation);
    }

    /// Multiplies the scale by `factor`. Non-positive factors are ignored.
    pub fn scale_by(&mut self, factor: f64) {
        if factor > 0.0 && factor.is_finite() {
            self.set_scale(self.scale * factor);
        }
    }

    /// Content-space offset of `centroid` from the viewport center, before scaling.
    ///
    /// Multiplying by a new scale gives the translation that keeps the content
    /// point under `centroid` at the viewport center.
    #[must_use]
    pub fn target_translation(&self, centroid: Point) -> Vec2 {
        (self.viewport_center() - centroid + self.translation) / self.scale
    }

    /// Animates the scale to `target` (clamped to the configured range).
    ///
    /// Scale and translation share one progress fraction, so the perceived zoom
    /// center stays put. `spec` defaults to the configured scale spring.
    pub fn animate_scale_to(
        &mut self,
        target: f64,
        translation: TargetTranslation,
        spec: Option<AnimationSpec>,
        now: u64,
    ) {
        if !target.is_finite() {
            return;
        }
        let target = target.clamp(self.config.min_scale, self.config.max_scale);
        let to = match translation {
            TargetTranslation::Proportional => Some(self.translation / self.scale * target),
            TargetTranslation::Unchanged => None,
            TargetTranslation::To(to) => Some(to),
        };
        let spec = spec.unwrap_or(AnimationSpec::Spring(self.config.scale_spring));
        log::debug!("animating scale {:.3} -> {target:.3}", self.scale);
        self.start_transform_animation(TransformAnimation::Scale {
            scale: Interpolation::new(self.scale, target, spec, now),
            from: self.translation,
            to,
        });
    }

    /// Animates translation to `target`. `spec` defaults to the configured translation spring.
    pub fn animate_translation_to(&mut self, target: Vec2, spec: Option<AnimationSpec>, now: u64) {
        let spec = spec.unwrap_or(AnimationSpec::Spring(self.config.translation_spring));
        self.start_transform_animation(TransformAnimation::Translate(VectorInterpolation::new(
            self.translation,
            target,
            spec,
            now,
        )));
    }

    /// Double-tap action: zoom out to the resting minimum when zoomed, else
    /// zoom in to the double-tap scale keeping `position` fixed.
    pub fn toggle_zoom_at(&mut self, position: Point, now: u64) {
        if self.is_zooming() {
            log::debug!("double tap: zoom out");
            self.animate_scale_to(
                self.min_snap_scale(),
                TargetTranslation::To(Vec2::ZERO),
                None,
                now,
            );
        } else {
            let target = self.config.double_tap_scale;
            log::debug!("double tap: zoom in at ({:.1}, {:.1})", position.x, position.y);
            self.animate_scale_to(
                target,
                TargetTranslation::To(self.target_translation(position) * target),
                None,
                now,
            );
        }
    }

    /// Marks a pointer gesture as started and cancels any transform animation.
    pub fn on_gesture_start(&mut self) {
        if let Some(animation) = self.transform_animation.take() {
            log::debug!("gesture start cancels {} animation", animation.name());
        }
        self.gesture_active = true;
    }

    /// Applies one pinch/pan step.
    ///
    /// The content point under `centroid - pan` before the step ends up under
    /// `centroid` after scaling by `zoom`.
    pub fn on_transform(&mut self, centroid: Point, pan: Vec2, zoom: f64) {
        let zoom = if zoom > 0.0 && zoom.is_finite() { zoom } else { 1.0 };
        let anchor = self.target_translation(centroid - pan);
        self.set_scale(self.scale * zoom);
        let translation = anchor * self.scale - self.viewport_center().to_vec2() + centroid.to_vec2();
        log::trace!(
            "transform: zoom {zoom:.4}, pan ({:.1}, {:.1}) -> scale {:.3}",
            pan.x,
            pan.y,
            self.scale
        );
        self.set_translation(translation);
    }

    /// Marks the pinch gesture as finished.
    pub fn on_transform_end(&mut self) {
        self.gesture_active = false;
    }

    /// Records a pointer position for fling velocity.
    pub fn add_position(&mut self, time: u64, position: Point) {
        self.velocity.add_position(time, position);
    }

    /// Forgets recorded pointer positions.
    pub fn reset_tracking(&mut self) {
        self.velocity.reset();
    }

    /// Pans by `delta`, clamped to bounds.
    pub fn on_drag(&mut self, delta: Vec2) {
        self.set_translation(self.translation + delta);
    }

    /// Ends a pan drag and flings with the tracked velocity, clamped per axis to `max_velocity`.
    pub fn on_drag_end(&mut self, max_velocity: f64, now: u64) {
        let velocity = self.velocity.velocity_clamped(max_velocity);
        self.velocity.reset();
        self.fling(velocity, now);
    }

    /// Abandons a pan drag without flinging.
    pub fn on_drag_cancel(&mut self) {
        self.velocity.reset();
        self.gesture_active = false;
    }

    fn fling(&mut self, velocity: Vec2, now: u64) {
        let spec = self.config.fling_decay;
        let mut x = Decay::new(self.translation.x, velocity.x, spec, now);
        let mut y = Decay::new(self.translation.y, velocity.y, spec, now);
        if let Some(max) = self.max_offset() {
            x = x.with_bounds(-max.x, max.x);
            y = y.with_bounds(-max.y, max.y);
        }
        if x.is_finished() && y.is_finished() {
            self.gesture_active = false;
            return;
        }
        log::debug!("fling at ({:.0}, {:.0}) px/s", velocity.x, velocity.y);
        self.transform_animation = Some(TransformAnimation::Fling { x, y });
    }

    /// Unresisted vertical dismiss offset accumulated by the drag.
    #[must_use]
    pub fn dismiss_drag_absolute_offset(&self) -> f64 {
        self.dismiss_offset
    }

    /// Visual dismiss offset: the absolute offset under a sine resistance curve.
    ///
    /// Saturates at `content_height / dismiss_resistance_factor`.
    #[must_use]
    pub fn dismiss_drag_offset(&self) -> f64 {
        let height = self.content_size.height;
        if height == 0.0 {
            return 0.0;
        }
        let progress = (self.dismiss_offset / height).clamp(-1.0, 1.0);
        height / self.config.dismiss_resistance_factor * (progress * FRAC_PI_2).sin()
    }

    /// Absolute offset past which releasing requests a dismiss.
    #[must_use]
    pub fn dismiss_threshold(&self) -> f64 {
        self.viewport_size.height * self.config.dismiss_threshold_fraction
    }

    /// Progress toward the dismiss threshold in `[0, 1]`, for fade effects.
    #[must_use]
    pub fn dismiss_drag_progress(&self) -> f64 {
        let threshold = self.dismiss_threshold();
        if threshold <= 0.0 {
            0.0
        } else {
            (self.dismiss_offset.abs() / threshold).min(1.0)
        }
    }

    /// Returns `true` if releasing now should request a dismiss.
    #[must_use]
    pub fn should_dismiss(&self) -> bool {
        self.dismiss_offset.abs() > self.dismiss_threshold()
    }

    /// Adds `delta_y` to the dismiss offset and stops any return animation.
    pub fn on_dismiss_drag(&mut self, delta_y: f64) {
        self.dismiss_animation = None;
        self.dismiss_offset += delta_y;
    }

    /// Ends a dismiss drag.
    ///
    /// When `dismissed` the offset stays where it is (the host removes the
    /// content); otherwise it animates back to zero.
    pub fn on_dismiss_drag_end(&mut self, dismissed: bool, now: u64) {
        self.gesture_active = false;
        if dismissed {
            log::debug!("dismiss accepted at offset {:.1}", self.dismiss_offset);
            return;
        }
        self.dismiss_animation = Some(Interpolation::new(
            self.dismiss_offset,
            0.0,
            AnimationSpec::Spring(self.config.translation_spring),
            now,
        ));
    }

    /// Starts the over-zoom snap-back if the scale rests outside the over-zoom range.
    ///
    /// Does nothing while a gesture or transform animation is in progress.
    /// Returns `true` if an animation was started.
    pub fn settle_over_zoom(&mut self, now: u64) -> bool {
        if self.gesture_active || self.transform_animation.is_some() {
            return false;
        }
        let Some(range) = self.config.over_zoom else {
            return false;
        };
        if range.contains(self.scale) {
            return false;
        }
        let target = range
            .clamp(self.scale)
            .clamp(self.config.min_scale, self.config.max_scale);
        if target == self.scale {
            return false;
        }
        log::debug!("over-zoom snap {:.3} -> {target:.3} ({range})", self.scale);
        self.animate_scale_to(target, TargetTranslation::Proportional, None, now);
        true
    }

    /// Steps all running animations to frame time `now` (ms).
    ///
    /// Returns `true` while any animation still needs frames.
    pub fn advance(&mut self, now: u64) -> bool {
        let mut running = false;
        if let Some(mut animation) = self.transform_animation.take() {
            if self.step_transform(&mut animation, now) {
                if matches!(animation, TransformAnimation::Fling { .. }) {
                    log::debug!("fling settled");
                    self.gesture_active = false;
                }
            } else {
                self.transform_animation = Some(animation);
                running = true;
            }
        }
        if let Some(mut animation) = self.dismiss_animation.take() {
            self.dismiss_offset = animation.advance(now);
            if !animation.is_finished() {
                self.dismiss_animation = Some(animation);
                running = true;
            }
        }
        running
    }

    /// Steps `animation`, returning `true` once it has finished.
    fn step_transform(&mut self, animation: &mut TransformAnimation, now: u64) -> bool {
        match animation {
            TransformAnimation::Scale { scale, from, to } => {
                let value = scale.advance(now);
                let fraction = scale.fraction();
                self.set_scale(value);
                if let Some(to) = *to {
                    self.set_translation(lerp_vec(*from, to, fraction));
                }
                scale.is_finished()
            }
            TransformAnimation::Translate(translation) => {
                let value = translation.advance(now);
                self.set_translation(value);
                translation.is_finished()
            }
            TransformAnimation::Fling { x, y } => {
                let value = Vec2::new(x.advance(now), y.advance(now));
                self.set_translation(value);
                x.is_finished() && y.is_finished()
            }
        }
    }

    fn start_transform_animation(&mut self, animation: TransformAnimation) {
        let replaced = self.transform_animation.replace(animation);
        if matches!(replaced, Some(TransformAnimation::Fling { .. })) {
            self.gesture_active = false;
        }
    }

    fn set_translation(&mut self, translation: Vec2) {
        self.translation = match self.max_offset() {
            Some(max) => Vec2::new(
                translation.x.clamp(-max.x, max.x),
                translation.y.clamp(-max.y, max.y),
            ),
            None => translation,
        };
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }
}

impl fmt::Display for ZoomableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ZoomableState(translation_x={:.1}, translation_y={:.1}, scale={:.1})",
            round_to_tenths(self.translation.x),
            round_to_tenths(self.translation.y),
            round_to_tenths(self.scale)
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::OverZoomRange;
    use std::string::ToString;

    fn sized(viewport: f64, content: f64) -> ZoomableState {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        state.set_viewport_size(Size::new(viewport, viewport));
        state.set_content_size(Size::new(content, content));
        state
    }

    fn settle(state: &mut ZoomableState, mut now: u64) -> u64 {
        while state.advance(now) {
            now += 16;
            assert!(now < 60_000, "animation never settled");
        }
        now
    }

    #[test]
    fn new_state_uses_config_defaults() {
        let state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        assert_eq!(state.scale(), 1.0);
        assert_eq!(state.translation(), Vec2::ZERO);
        assert!(!state.is_zooming());
        assert!(state.max_offset().is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ZoomableConfig {
            min_scale: 3.0,
            max_scale: 1.0,
            ..ZoomableConfig::default()
        };
        assert!(ZoomableState::new(config).is_err());
    }

    #[test]
    fn bounds_follow_scale() {
        let mut state = sized(100.0, 100.0);
        assert_eq!(state.max_offset(), Some(Vec2::ZERO));
        state.set_scale(3.0);
        assert_eq!(state.max_offset(), Some(Vec2::new(100.0, 100.0)));
        state.on_drag(Vec2::new(500.0, -500.0));
        assert_eq!(state.translation(), Vec2::new(100.0, -100.0));
        state.set_scale(2.0);
        assert_eq!(state.translation(), Vec2::new(50.0, -50.0));
    }

    #[test]
    fn scale_is_clamped() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(10.0);
        assert_eq!(state.scale(), 4.0);
        state.scale_by(0.01);
        assert_eq!(state.scale(), 1.0);
        state.scale_by(-2.0);
        assert_eq!(state.scale(), 1.0);
        state.set_scale(f64::NAN);
        assert_eq!(state.scale(), 1.0);
    }

    #[test]
    fn transform_keeps_centroid_content_point_fixed() {
        let mut state = sized(100.0, 100.0);
        // Zoom 2x about the top-left corner.
        state.on_transform(Point::ZERO, Vec2::ZERO, 2.0);
        assert_eq!(state.scale(), 2.0);
        assert_eq!(state.translation(), Vec2::new(50.0, 50.0));
        // Zoom about the center keeps translation proportional.
        let mut state = sized(100.0, 100.0);
        state.on_transform(Point::new(50.0, 50.0), Vec2::ZERO, 2.0);
        assert_eq!(state.translation(), Vec2::ZERO);
        // Pure pan.
        state.on_transform(Point::new(50.0, 50.0), Vec2::new(-10.0, 5.0), 1.0);
        assert_eq!(state.translation(), Vec2::new(-10.0, 5.0));
    }

    #[test]
    fn content_size_is_idempotent_and_zero_is_ignored() {
        let mut state = ZoomableState::restore(
            ZoomableConfig::default(),
            SavedTransform {
                translation_x: 100.0,
                translation_y: 100.0,
                scale: 2.0,
            },
        )
        .unwrap();
        state.set_viewport_size(Size::new(200.0, 200.0));
        state.set_content_size(Size::ZERO);
        assert_eq!(state.translation(), Vec2::new(100.0, 100.0));

        state.set_content_size(Size::new(200.0, 200.0));
        let once = (state.max_offset(), state.translation());
        state.set_content_size(Size::new(200.0, 200.0));
        assert_eq!((state.max_offset(), state.translation()), once);
        assert_eq!(state.translation(), Vec2::new(100.0, 100.0));

        state.set_content_size(Size::ZERO);
        assert_eq!(state.content_size(), Size::new(200.0, 200.0));
    }

    #[test]
    fn animate_scale_proportional_and_unchanged() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(2.0);
        state.on_drag(Vec2::new(20.0, 0.0));
        state.animate_scale_to(4.0, TargetTranslation::Proportional, None, 0);
        settle(&mut state, 0);
        assert_eq!(state.scale(), 4.0);
        assert!((state.translation().x - 40.0).abs() < 1e-9);

        state.animate_scale_to(3.0, TargetTranslation::Unchanged, None, 0);
        settle(&mut state, 0);
        assert_eq!(state.scale(), 3.0);
        assert!((state.translation().x - 40.0).abs() < 1e-9);
    }

    #[test]
    fn animate_translation_reaches_clamped_target() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(2.0);
        state.animate_translation_to(Vec2::new(30.0, -80.0), None, 0);
        assert!(state.is_animating());
        settle(&mut state, 0);
        assert_eq!(state.translation(), Vec2::new(30.0, -50.0));
        assert!(!state.is_animating());
    }

    #[test]
    fn gesture_start_cancels_animation() {
        let mut state = sized(100.0, 100.0);
        state.animate_scale_to(2.0, TargetTranslation::Proportional, None, 0);
        state.advance(16);
        state.on_gesture_start();
        assert!(!state.is_animating());
        assert!(state.is_gesture_active());
        let scale = state.scale();
        state.advance(1_000);
        assert_eq!(state.scale(), scale);
    }

    #[test]
    fn fling_stops_at_bounds_and_clears_gesture() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(2.0);
        state.on_gesture_start();
        for i in 0..5_u32 {
            let t = u64::from(i) * 16;
            let p = -f64::from(i) * 10.0;
            state.add_position(t, Point::new(p, p));
        }
        state.on_drag_end(8_000.0, 64);
        assert!(state.is_flinging());
        assert!(state.is_gesture_active());
        settle(&mut state, 64);
        assert_eq!(state.translation(), Vec2::new(-50.0, -50.0));
        assert!(!state.is_gesture_active());
    }

    #[test]
    fn release_without_velocity_clears_gesture() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(2.0);
        state.on_gesture_start();
        state.add_position(0, Point::ZERO);
        state.on_drag_end(8_000.0, 0);
        assert!(!state.is_flinging());
        assert!(!state.is_gesture_active());
    }

    #[test]
    fn horizontal_edge_reports_pinned_sides() {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        assert_eq!(state.horizontal_edge(), HorizontalEdge::BOTH);
        state.set_viewport_size(Size::new(100.0, 100.0));
        state.set_content_size(Size::new(100.0, 100.0));
        assert_eq!(state.horizontal_edge(), HorizontalEdge::BOTH);
        state.set_scale(2.0);
        assert_eq!(state.horizontal_edge(), HorizontalEdge::empty());
        state.on_drag(Vec2::new(49.7, 0.0));
        assert_eq!(state.horizontal_edge(), HorizontalEdge::LEFT);
        state.on_drag(Vec2::new(-200.0, 0.0));
        assert_eq!(state.horizontal_edge(), HorizontalEdge::RIGHT);
    }

    #[test]
    fn dismiss_offset_resists_and_progress_clamps() {
        let mut state = sized(100.0, 100.0);
        state.on_dismiss_drag(10.0);
        let offset = state.dismiss_drag_offset();
        assert!(offset > 0.0 && offset < 10.0);
        assert!((state.dismiss_drag_progress() - 0.4).abs() < 1e-12);

        state.on_dismiss_drag(140.0);
        assert_eq!(state.dismiss_drag_offset(), 50.0);
        assert_eq!(state.dismiss_drag_progress(), 1.0);
        assert!(state.should_dismiss());

        let mut up = sized(100.0, 100.0);
        up.on_dismiss_drag(-25.0);
        assert_eq!(up.dismiss_drag_progress(), 1.0);
        assert!(!up.should_dismiss());
        assert!(up.dismiss_drag_offset() < 0.0);
    }

    #[test]
    fn dismiss_guards_zero_sizes() {
        let mut state = ZoomableState::new(ZoomableConfig::default()).unwrap();
        state.on_dismiss_drag(30.0);
        assert_eq!(state.dismiss_drag_offset(), 0.0);
        assert_eq!(state.dismiss_drag_progress(), 0.0);
    }

    #[test]
    fn rejected_dismiss_animates_back() {
        let mut state = sized(100.0, 100.0);
        state.on_gesture_start();
        state.on_dismiss_drag(40.0);
        state.on_dismiss_drag_end(false, 0);
        assert!(!state.is_gesture_active());
        settle(&mut state, 0);
        assert_eq!(state.dismiss_drag_absolute_offset(), 0.0);

        state.on_dismiss_drag(40.0);
        state.on_dismiss_drag_end(true, 0);
        assert!(!state.is_animating());
        assert_eq!(state.dismiss_drag_absolute_offset(), 40.0);
    }

    #[test]
    fn over_zoom_snaps_back_after_gesture() {
        let config = ZoomableConfig::new(0.5, 6.0, 2.0)
            .unwrap()
            .with_over_zoom(OverZoomRange::new(1.0, 4.0).unwrap())
            .unwrap();
        let mut state = ZoomableState::new(config).unwrap();
        state.set_viewport_size(Size::new(100.0, 100.0));
        state.set_content_size(Size::new(100.0, 100.0));
        assert_eq!(state.min_snap_scale(), 1.0);

        state.on_gesture_start();
        state.on_transform(Point::new(50.0, 50.0), Vec2::ZERO, 20.0);
        assert_eq!(state.scale(), 6.0);
        assert!(!state.settle_over_zoom(0));
        state.on_transform_end();
        assert!(state.settle_over_zoom(0));
        settle(&mut state, 0);
        assert_eq!(state.scale(), 4.0);
        assert!(!state.settle_over_zoom(1_000));
    }

    #[test]
    fn set_config_reclamps() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(4.0);
        state.set_config(ZoomableConfig::new(1.0, 2.0, 1.5).unwrap()).unwrap();
        assert_eq!(state.scale(), 2.0);
        assert!(state.set_config(ZoomableConfig {
            min_scale: 0.0,
            ..ZoomableConfig::default()
        })
        .is_err());
        assert_eq!(state.config().max_scale, 2.0);
    }

    #[test]
    fn save_restore_and_display() {
        let mut state = sized(100.0, 100.0);
        state.set_scale(2.0);
        state.on_drag(Vec2::new(12.34, 0.0));
        let saved = state.save();
        assert_eq!(saved.serialize(), [12.34, 0.0, 2.0]);
        assert_eq!(
            state.to_string(),
            "ZoomableState(translation_x=12.3, translation_y=0.0, scale=2.0)"
        );

        let restored = ZoomableState::restore(
            ZoomableConfig::default(),
            SavedTransform::deserialize([5.0, 6.0, 9.0]),
        )
        .unwrap();
        assert_eq!(restored.scale(), 4.0);
        assert_eq!(restored.translation(), Vec2::new(5.0, 6.0));
    }
}
