// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer transitions and status-bar overlay reconciliation.
//!
//! `veneer_core` is the animation-orchestration layer of a mobile UI shell.
//! It is `no_std` compatible (with `alloc`) and never interpolates anything
//! itself: a platform [`AnimationDriver`](animation::AnimationDriver) does
//! that, and the core decides *what* to animate and *when* to report back.
//!
//! # Architecture
//!
//! ```text
//!   UI owner layout pass
//!       │
//!       ▼
//!   Transition::update_*() ──► ElementStore (model) ──► drain_changes() ──► Presenter
//!       │
//!       ▼
//!   AnimationDriver::start() ──► Completion(bool)
//!
//!   UI owners publish Surfaces
//!       │
//!       ▼
//!   StatusBarManager::update_state() ──► OverlayListener (attach / detach)
//!                                    └─► ChromeHost (style, alpha, offset)
//! ```
//!
//! **[`element`]** — Struct-of-arrays element tree with generational handles.
//! Model properties (position, bounds, alpha, background, transform) always
//! hold settled values.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! GEOMETRY propagates to descendants; the rest are local-only.
//!
//! **[`animation`]** — The animation primitive contract, timing functions, and
//! a deterministic [`ManualDriver`](animation::manual::ManualDriver).
//!
//! **[`transition`]** — [`Transition`](transition::Transition), one entry point
//! for immediate and animated property changes, including the compound frame
//! change with a single aggregated completion.
//!
//! **[`status_bar`]** — Overlay registry and the
//! [`StatusBarManager`](status_bar::StatusBarManager) reconciliation pass.
//!
//! **[`scene`]** — [`Scene`](scene::Scene), the store and driver owned
//! together.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that platform
//! backends implement to apply element changes to native trees.
//!
//! **[`float`]** — Epsilon comparisons used for every geometry and opacity
//! equality.
//!
//! **[`transform`]** — 3D transform type with uniform-scale extraction.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! reconciliation instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   change events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod backend;
pub mod dirty;
pub mod element;
pub mod float;
pub mod scene;
pub mod status_bar;
pub mod trace;
pub mod transform;
pub mod transition;
