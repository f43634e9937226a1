// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owned context every transition and reconciliation pass runs against.

use crate::animation::AnimationDriver;
use crate::element::{ElementId, ElementStore};

/// An [`ElementStore`] paired with the [`AnimationDriver`] that animates it.
///
/// Both halves are public so hosts can read model values and drive the clock
/// directly; [`Transition`](crate::transition::Transition) operations borrow
/// the whole scene mutably for the duration of one call.
#[derive(Debug, Default)]
pub struct Scene<D> {
    /// Model values.
    pub store: ElementStore,
    /// In-flight animations.
    pub driver: D,
}

impl<D: AnimationDriver> Scene<D> {
    /// Creates an empty scene.
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            store: ElementStore::new(),
            driver,
        }
    }

    /// Creates a scene around an existing store.
    #[must_use]
    pub fn with_store(store: ElementStore, driver: D) -> Self {
        Self { store, driver }
    }

    /// Removes every animation on `id`, then destroys it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or still has children.
    pub fn destroy_element(&mut self, id: ElementId) {
        self.driver.remove_all(id);
        self.store.destroy_element(id);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use kurbo::Point;

    use super::*;
    use crate::animation::manual::ManualDriver;
    use crate::transition::{Curve, Transition};

    #[test]
    fn destroy_interrupts_running_animations() {
        let mut scene = Scene::new(ManualDriver::default());
        let id = scene.store.create_element();
        let result = Rc::new(Cell::new(None));
        let r = result.clone();
        Transition::animated(0.3, Curve::EaseInOut).update_position(
            &mut scene,
            id,
            Point::new(5.0, 5.0),
            Some(alloc::boxed::Box::new(move |ok: bool| r.set(Some(ok)))),
        );
        scene.destroy_element(id);
        assert_eq!(result.get(), Some(false));
        assert!(!scene.store.is_alive(id));
        assert_eq!(scene.driver.running_count(), 0);
    }
}
