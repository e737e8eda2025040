// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The part of a [`ZoomableState`](crate::ZoomableState) that survives reconfiguration.
///
/// Bounds, dismiss offset, and gesture flags are ephemeral and are recomputed
/// after restore.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedTransform {
    /// Horizontal translation in pixels.
    pub translation_x: f64,
    /// Vertical translation in pixels.
    pub translation_y: f64,
    /// Scale factor.
    pub scale: f64,
}

impl SavedTransform {
    /// Flattens to `[translation_x, translation_y, scale]`.
    #[must_use]
    pub fn serialize(&self) -> [f64; 3] {
        [self.translation_x, self.translation_y, self.scale]
    }

    /// Rebuilds from `[translation_x, translation_y, scale]`.
    #[must_use]
    pub fn deserialize(values: [f64; 3]) -> Self {
        let [translation_x, translation_y, scale] = values;
        Self {
            translation_x,
            translation_y,
            scale,
        }
    }
}

impl From<[f64; 3]> for SavedTransform {
    fn from(values: [f64; 3]) -> Self {
        Self::deserialize(values)
    }
}

impl From<SavedTransform> for [f64; 3] {
    fn from(saved: SavedTransform) -> Self {
        saved.serialize()
    }
}
