// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for status-bar reconciliation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`StatusBarManager`](crate::status_bar::StatusBarManager) calls at each
//! stage of a pass. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) gates [`ElementChange`] records and the
//!   corresponding `TraceSink` method.

use crate::status_bar::{ChromeStyle, OverlayId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Direction of an overlay notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayUpdateKind {
    /// The overlay was handed the chrome view.
    Attach,
    /// The overlay was told to let go of the chrome view.
    Detach,
}

/// Which property of an element changed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementField {
    /// Position or bounds.
    Geometry,
    /// Alpha.
    Opacity,
    /// Background color.
    Background,
    /// Transform.
    Transform,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of every reconciliation pass.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Number of surfaces handed to the pass.
    pub surface_count: usize,
    /// Total number of overlays across those surfaces.
    pub overlay_count: usize,
    /// Whether an in-call override is active.
    pub in_call: bool,
    /// Whether the pass was requested with animation.
    pub animated: bool,
}

/// Emitted for every attach or detach notification sent to an overlay.
#[derive(Clone, Copy, Debug)]
pub struct OverlayUpdateEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Notified overlay.
    pub overlay: OverlayId,
    /// Attach or detach.
    pub kind: OverlayUpdateKind,
    /// Whether the overlay was asked to animate.
    pub animated: bool,
}

/// Emitted when the global slot is written to the host window.
#[derive(Clone, Copy, Debug)]
pub struct ChromeAppliedEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Overlay bound to the slot, or `None` for a synthetic overlay or when
    /// the slot is empty.
    pub overlay: Option<OverlayId>,
    /// Chrome style after the pass.
    pub style: ChromeStyle,
    /// Host window alpha after the pass.
    pub alpha: f64,
    /// Host window bounds-origin y after the pass.
    pub offset_y: f64,
    /// Number of host properties actually written.
    pub writes: u8,
}

/// Per-pass summary emitted after the host is updated.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileSummary {
    /// Pass counter.
    pub pass_index: u64,
    /// Overlays left after mapping and local optimization.
    pub mapped: usize,
    /// Whether the global reduce collapsed everything to one overlay.
    pub reduced: bool,
    /// Whether the global slot was filled.
    pub slot_filled: bool,
    /// Overlays explicitly attached.
    pub visible: usize,
    /// Overlays detached.
    pub detached: usize,
}

/// A per-element change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ElementChange {
    /// Slot index of the element that changed.
    pub element_index: u32,
    /// Which field changed.
    pub field: ElementField,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from reconciliation.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a pass starts.
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        _ = e;
    }

    /// Called for every overlay attach or detach.
    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        _ = e;
    }

    /// Called after the global slot is applied to the host.
    fn on_chrome_applied(&mut self, e: &ChromeAppliedEvent) {
        _ = e;
    }

    /// Called with the per-pass summary.
    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        _ = s;
    }

    /// Called with drained element changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_element_changes(&mut self, changes: &[ElementChange]) {
        _ = changes;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ReconcileBeginEvent`].
    #[inline]
    pub fn reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reconcile_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlayUpdateEvent`].
    #[inline]
    pub fn overlay_update(&mut self, e: &OverlayUpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlay_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ChromeAppliedEvent`].
    #[inline]
    pub fn chrome_applied(&mut self, e: &ChromeAppliedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_chrome_applied(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReconcileSummary`].
    #[inline]
    pub fn reconcile_summary(&mut self, s: &ReconcileSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_reconcile_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits element changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn element_changes(&mut self, changes: &[ElementChange]) {
        if let Some(s) = &mut self.sink {
            s.on_element_changes(changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> ReconcileBeginEvent {
        ReconcileBeginEvent {
            pass_index: 3,
            surface_count: 2,
            overlay_count: 4,
            in_call: false,
            animated: true,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_reconcile_begin(&sample_begin());
        sink.on_reconcile_summary(&ReconcileSummary {
            pass_index: 3,
            mapped: 4,
            reduced: false,
            slot_filled: true,
            visible: 1,
            detached: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.reconcile_begin(&sample_begin());
        tracer.overlay_update(&OverlayUpdateEvent {
            pass_index: 3,
            overlay: OverlayId(1),
            kind: OverlayUpdateKind::Detach,
            animated: false,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
                self.passes.push(e.pass_index);
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.reconcile_begin(&sample_begin());
        drop(tracer);
        assert_eq!(sink.passes, &[3]);
    }
}
