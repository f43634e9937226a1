// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Status-bar overlay reconciliation.
//!
//! Independent UI owners each publish a [`Surface`]: an ordered stack of
//! overlays, each asking for a [`StatusBarStyle`]. The host has exactly one
//! real status bar. [`StatusBarManager`] merges the surfaces into the smallest
//! set of overlays that must draw themselves, binds at most one overlay to
//! the host window (the *global slot*), and tells every other overlay whether
//! it now holds or has lost the shared chrome view.
//!
//! ```
//! use kurbo::Rect;
//! use veneer_core::animation::manual::ManualDriver;
//! use veneer_core::scene::Scene;
//! use veneer_core::status_bar::{
//!     ChromeStyle, HeadlessHost, StatusBarManager, StatusBarStyle, Surface,
//! };
//!
//! let mut scene = Scene::new(ManualDriver::default());
//! let bar = scene.store.create_element_with_frame(Rect::new(0.0, 0.0, 320.0, 20.0));
//! let offset = scene.store.create_element();
//!
//! let mut manager = StatusBarManager::new(HeadlessHost::default());
//! let overlay = manager
//!     .registry_mut()
//!     .create_overlay(bar, offset, StatusBarStyle::White);
//!
//! let report = manager.update_state(&scene, vec![Surface::new(vec![overlay])], None, false);
//! assert_eq!(report.global.and_then(|slot| slot.overlay), Some(overlay));
//! assert_eq!(report.chrome_style, ChromeStyle::LightContent);
//! ```

mod host;
mod manager;
mod map;
mod overlay;
mod style;
mod surface;

pub use host::{ChromeHost, HeadlessHost, HeadlessWindow};
pub use manager::{GlobalSlot, ReconcileReport, ReconcilerConfig, StatusBarManager};
pub use overlay::{
    ChromeViewId, InCallNavigate, OverlayId, OverlayListener, OverlayRegistry, OverlayUpdate,
};
pub use style::{ChromeStyle, StatusBarStyle};
pub use surface::Surface;
