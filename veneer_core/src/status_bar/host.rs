// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host window seam.

use kurbo::Size;

use super::overlay::ChromeViewId;
use super::style::ChromeStyle;

/// The host window that owns the shared chrome view.
///
/// The reconciler is the single writer of this state during a pass. It reads
/// before every write and skips writes that would not change anything, so
/// implementations may treat each setter call as a real change.
///
/// Window accessors are only called while [`has_window`](Self::has_window)
/// returns `true`.
pub trait ChromeHost {
    /// Size of the system status bar. An empty size falls back to the
    /// reconciler's configured size.
    fn status_bar_size(&self) -> Size;

    /// The shared chrome view, if the host has one yet.
    fn chrome_view(&self) -> Option<ChromeViewId>;

    /// Current chrome style.
    fn chrome_style(&self) -> ChromeStyle;

    /// Sets the chrome style.
    fn set_chrome_style(&mut self, style: ChromeStyle);

    /// Whether the status-bar window exists.
    fn has_window(&self) -> bool;

    /// Window alpha.
    fn window_alpha(&self) -> f64;

    /// Sets the window alpha.
    fn set_window_alpha(&mut self, alpha: f64);

    /// Vertical origin of the window's bounds.
    fn window_bounds_origin_y(&self) -> f64;

    /// Sets the vertical origin of the window's bounds.
    fn set_window_bounds_origin_y(&mut self, y: f64);

    /// Whether the window accepts touches.
    fn window_interaction_enabled(&self) -> bool;

    /// Enables or disables touches on the window.
    fn set_window_interaction_enabled(&mut self, enabled: bool);
}

/// State of a [`HeadlessHost`] window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessWindow {
    /// Window alpha.
    pub alpha: f64,
    /// Vertical bounds origin.
    pub bounds_origin_y: f64,
    /// Whether touches are accepted.
    pub interaction_enabled: bool,
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            bounds_origin_y: 0.0,
            interaction_enabled: true,
        }
    }
}

/// An in-memory [`ChromeHost`] for tests and headless runs.
///
/// Every setter call bumps [`writes`](Self::writes).
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessHost {
    /// Reported status-bar size.
    pub status_bar_size: Size,
    /// Shared chrome view.
    pub chrome_view: Option<ChromeViewId>,
    /// Current chrome style.
    pub chrome_style: ChromeStyle,
    /// The status-bar window, if any.
    pub window: Option<HeadlessWindow>,
    /// Number of setter calls received.
    pub writes: u32,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            status_bar_size: Size::new(320.0, 20.0),
            chrome_view: Some(ChromeViewId(0)),
            chrome_style: ChromeStyle::Default,
            window: Some(HeadlessWindow::default()),
            writes: 0,
        }
    }
}

impl HeadlessHost {
    fn window_mut(&mut self) -> &mut HeadlessWindow {
        self.writes += 1;
        self.window.get_or_insert_with(HeadlessWindow::default)
    }

    fn window_ref(&self) -> HeadlessWindow {
        self.window.unwrap_or_default()
    }
}

impl ChromeHost for HeadlessHost {
    fn status_bar_size(&self) -> Size {
        self.status_bar_size
    }

    fn chrome_view(&self) -> Option<ChromeViewId> {
        self.chrome_view
    }

    fn chrome_style(&self) -> ChromeStyle {
        self.chrome_style
    }

    fn set_chrome_style(&mut self, style: ChromeStyle) {
        self.writes += 1;
        self.chrome_style = style;
    }

    fn has_window(&self) -> bool {
        self.window.is_some()
    }

    fn window_alpha(&self) -> f64 {
        self.window_ref().alpha
    }

    fn set_window_alpha(&mut self, alpha: f64) {
        self.window_mut().alpha = alpha;
    }

    fn window_bounds_origin_y(&self) -> f64 {
        self.window_ref().bounds_origin_y
    }

    fn set_window_bounds_origin_y(&mut self, y: f64) {
        self.window_mut().bounds_origin_y = y;
    }

    fn window_interaction_enabled(&self) -> bool {
        self.window_ref().interaction_enabled
    }

    fn set_window_interaction_enabled(&mut self, enabled: bool) {
        self.window_mut().interaction_enabled = enabled;
    }
}
