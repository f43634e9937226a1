// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! A platform integration supplies two pieces:
//!
//! - **Animation driver**: implements
//!   [`AnimationDriver`](crate::animation::AnimationDriver) on top of the
//!   native animation facility (e.g. `CABasicAnimation` / `CASpringAnimation`).
//!   It owns all in-flight interpolation and calls every completion exactly
//!   once.
//!
//! - **Presenter**: implements [`Presenter`] to push settled model values
//!   from the [`ElementStore`] into the native tree.
//!
//! The reconciler additionally talks to the host window through
//! [`ChromeHost`](crate::status_bar::ChromeHost).

use crate::element::{ElementChanges, ElementStore};

/// Applies drained element changes to a platform-native presentation tree.
///
/// # Update loop pseudocode
///
/// ```rust,ignore
/// fn on_layout(scene: &mut Scene<NativeDriver>, presenter: &mut NativePresenter) {
///     // Transitions update the model and start animations.
///     Transition::animated(0.3, Curve::Spring)
///         .update_frame(scene, element, frame, false, None);
///
///     // Drain the model changes and push them to the native tree.
///     let changes = scene.store.drain_changes();
///     presenter.apply(&scene.store, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`ElementChanges`] to the backing presentation tree,
    /// reading current model values from `store` as needed.
    fn apply(&mut self, store: &ElementStore, changes: &ElementChanges);
}
