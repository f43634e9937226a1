// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual element data model.
//!
//! An *element* is the node a [`Transition`](crate::transition::Transition)
//! animates. Each element has:
//!
//! - An identity ([`ElementId`]), a generational handle that goes stale when
//!   the element is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//! - **Model properties**: [`position`](ElementStore::position) (the centre
//!   point in the parent's coordinate space), [`bounds`](ElementStore::bounds),
//!   [`alpha`](ElementStore::alpha), [`background`](ElementStore::background),
//!   and [`transform`](ElementStore::transform). The
//!   [`frame`](ElementStore::frame) is derived from position and bounds size.
//!
//! Model properties always hold the settled (target) value. In-flight visual
//! interpolation belongs to the [`AnimationDriver`](crate::animation::AnimationDriver).
//!
//! Mutations mark the [`dirty`](crate::dirty) channels, drained by
//! [`ElementStore::drain_changes`].

mod changes;
mod color;
mod id;
mod store;
mod traverse;

pub use changes::ElementChanges;
pub use color::Color;
pub use id::{ElementId, INVALID};
pub use store::ElementStore;
pub use traverse::Children;
