// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surfaces: ordered overlay stacks contributed by one owner.

use alloc::vec::Vec;

use super::overlay::OverlayId;

/// An ordered stack of overlays, front to back (topmost first), owned by one
/// UI owner (for example a screen and its modal children).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    /// Overlays in stacking order, topmost first.
    pub overlays: Vec<OverlayId>,
}

impl Surface {
    /// Creates a surface from overlays in stacking order, topmost first.
    #[must_use]
    pub fn new(overlays: Vec<OverlayId>) -> Self {
        Self { overlays }
    }

    /// Returns whether the surface contains `overlay`.
    #[must_use]
    pub fn contains(&self, overlay: OverlayId) -> bool {
        self.overlays.contains(&overlay)
    }
}

impl FromIterator<OverlayId> for Surface {
    fn from_iter<I: IntoIterator<Item = OverlayId>>(iter: I) -> Self {
        Self {
            overlays: iter.into_iter().collect(),
        }
    }
}
