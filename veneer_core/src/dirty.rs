// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Element mutations, whether issued directly or by a
//! [`Transition`](crate::transition::Transition), mark one of these channels
//! via [`understory_dirty`]. [`ElementStore::drain_changes`] drains them into
//! [`ElementChanges`] for a [`Presenter`](crate::backend::Presenter).
//!
//! - [`GEOMETRY`] propagates to descendants with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy): a child's absolute frame
//!   depends on every ancestor's position and bounds.
//! - [`OPACITY`], [`BACKGROUND`], and [`TRANSFORM`] are local-only.
//! - [`TOPOLOGY`] is marked on create/destroy/add/remove.
//!
//! [`ElementStore::drain_changes`]: crate::element::ElementStore::drain_changes
//! [`ElementChanges`]: crate::element::ElementChanges

use understory_dirty::Channel;

/// Position or bounds changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Alpha changed.
pub const OPACITY: Channel = Channel::new(1);

/// Background color changed.
pub const BACKGROUND: Channel = Channel::new(2);

/// Transform (scale) changed.
pub const TRANSFORM: Channel = Channel::new(3);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(4);
