// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{ElementId, INVALID};
use super::store::ElementStore;

/// An iterator over the direct children of an element, back to front.
///
/// Created by [`ElementStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a ElementStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a ElementStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(ElementId {
            idx,
            generation: self.store.generation[idx as usize],
        })
    }
}
