// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change draining.
//!
//! [`ElementStore::drain_changes`] empties every dirty channel and reports the
//! raw slot indices that changed, so a
//! [`Presenter`](crate::backend::Presenter) can push settled model values to a
//! native tree with the `*_at()` accessors and no generation checks.

use alloc::vec::Vec;

use super::store::ElementStore;
use crate::dirty;
use crate::trace::Tracer;

/// The set of changes produced by a single [`ElementStore::drain_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct ElementChanges {
    /// Elements whose position or bounds changed, including descendants of
    /// moved elements.
    pub geometry: Vec<u32>,
    /// Elements whose alpha changed.
    pub opacities: Vec<u32>,
    /// Elements whose background color changed.
    pub backgrounds: Vec<u32>,
    /// Elements whose transform changed.
    pub transforms: Vec<u32>,
    /// Elements created since the last drain.
    pub added: Vec<u32>,
    /// Elements destroyed since the last drain.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed.
    pub topology_changed: bool,
}

impl ElementChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.opacities.clear();
        self.backgrounds.clear();
        self.transforms.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.opacities.is_empty()
            && self.backgrounds.is_empty()
            && self.transforms.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }

    /// Flattens the change lists into per-element trace records.
    #[cfg(feature = "trace-rich")]
    #[must_use]
    pub fn trace_records(&self) -> Vec<crate::trace::ElementChange> {
        use crate::trace::{ElementChange, ElementField};

        let lists: [(&[u32], ElementField); 4] = [
            (self.geometry.as_slice(), ElementField::Geometry),
            (self.opacities.as_slice(), ElementField::Opacity),
            (self.backgrounds.as_slice(), ElementField::Background),
            (self.transforms.as_slice(), ElementField::Transform),
        ];
        lists
            .iter()
            .flat_map(|(indices, field)| {
                indices.iter().map(move |&element_index| ElementChange {
                    element_index,
                    field: *field,
                })
            })
            .collect()
    }
}

impl ElementStore {
    /// Drains every dirty channel and returns the set of changes.
    pub fn drain_changes(&mut self) -> ElementChanges {
        let mut changes = ElementChanges::default();
        self.drain_changes_into(&mut changes);
        changes
    }

    /// Like [`drain_changes`](Self::drain_changes), additionally reporting
    /// per-element records to `tracer` when `trace-rich` is enabled.
    pub fn drain_changes_traced(&mut self, tracer: &mut Tracer<'_>) -> ElementChanges {
        let changes = self.drain_changes();
        #[cfg(feature = "trace-rich")]
        tracer.element_changes(&changes.trace_records());
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = tracer;
        }
        changes
    }

    /// Like [`drain_changes`](Self::drain_changes), but reuses a
    /// caller-provided buffer.
    pub fn drain_changes_into(&mut self, changes: &mut ElementChanges) {
        changes.clear();

        changes.topology_changed = self.topology_dirty;
        self.topology_dirty = false;

        // Geometry propagates: include dependents of every marked element.
        changes.geometry = self
            .dirty
            .drain(dirty::GEOMETRY)
            .affected()
            .deterministic()
            .run()
            .filter(|&idx| !self.free_list.contains(&idx))
            .collect();

        changes.opacities = self
            .dirty
            .drain(dirty::OPACITY)
            .deterministic()
            .run()
            .collect();

        changes.backgrounds = self
            .dirty
            .drain(dirty::BACKGROUND)
            .deterministic()
            .run()
            .collect();

        changes.transforms = self
            .dirty
            .drain(dirty::TRANSFORM)
            .deterministic()
            .run()
            .collect();

        // Structural changes are reported through `added`/`removed`.
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}
