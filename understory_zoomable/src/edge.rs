// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Which horizontal content edges are pinned against the viewport.
    ///
    /// A drag that would pull a pinned edge further inward is "outward" and
    /// is left for an enclosing horizontal pager to handle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HorizontalEdge: u8 {
        /// The content's left edge is visible (translation at its upper bound).
        const LEFT = 0b10;
        /// The content's right edge is visible (translation at its lower bound).
        const RIGHT = 0b01;
        /// Both edges are visible, or horizontal bounds are not known.
        const BOTH = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl HorizontalEdge {
    /// Returns `true` if a drag with horizontal `direction` pulls past a pinned edge.
    ///
    /// Positive directions point right.
    #[must_use]
    pub fn is_outwards(self, direction: f64) -> bool {
        (self.contains(Self::LEFT) && direction > 0.0)
            || (self.contains(Self::RIGHT) && direction < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outward_direction_depends_on_pinned_edge() {
        assert!(HorizontalEdge::LEFT.is_outwards(1.0));
        assert!(!HorizontalEdge::LEFT.is_outwards(-1.0));
        assert!(HorizontalEdge::RIGHT.is_outwards(-1.0));
        assert!(!HorizontalEdge::RIGHT.is_outwards(1.0));
        assert!(HorizontalEdge::BOTH.is_outwards(f64::INFINITY));
        assert!(HorizontalEdge::BOTH.is_outwards(-2.0));
        assert!(!HorizontalEdge::empty().is_outwards(5.0));
        assert!(!HorizontalEdge::BOTH.is_outwards(f64::NAN));
    }
}
