// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use veneer_core::status_bar::{ChromeStyle, OverlayId};
use veneer_core::trace::{
    ChromeAppliedEvent, ElementChange, ElementField, OverlayUpdateEvent, OverlayUpdateKind,
    ReconcileBeginEvent, ReconcileSummary, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub(crate) fn style_name(style: ChromeStyle) -> &'static str {
    match style {
        ChromeStyle::Default => "default",
        ChromeStyle::LightContent => "light",
    }
}

pub(crate) fn kind_name(kind: OverlayUpdateKind) -> &'static str {
    match kind {
        OverlayUpdateKind::Attach => "attach",
        OverlayUpdateKind::Detach => "detach",
    }
}

pub(crate) fn field_name(field: ElementField) -> &'static str {
    match field {
        ElementField::Geometry => "geometry",
        ElementField::Opacity => "opacity",
        ElementField::Background => "background",
        ElementField::Transform => "transform",
    }
}

fn slot_name(overlay: Option<OverlayId>) -> String {
    match overlay {
        Some(id) => id.0.to_string(),
        None => "synthetic".into(),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[begin] pass={} surfaces={} overlays={} in_call={} animated={}",
            e.pass_index, e.surface_count, e.overlay_count, e.in_call, e.animated,
        );
    }

    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        let _ = writeln!(
            self.writer,
            "[{}] pass={} overlay={} animated={}",
            kind_name(e.kind),
            e.pass_index,
            e.overlay.0,
            e.animated,
        );
    }

    fn on_chrome_applied(&mut self, e: &ChromeAppliedEvent) {
        let _ = writeln!(
            self.writer,
            "[chrome] pass={} slot={} style={} alpha={:.2} offset_y={:.1} writes={}",
            e.pass_index,
            slot_name(e.overlay),
            style_name(e.style),
            e.alpha,
            e.offset_y,
            e.writes,
        );
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        let reduced = if s.reduced { "reduced" } else { "kept" };
        let slot = if s.slot_filled { "filled" } else { "empty" };
        let _ = writeln!(
            self.writer,
            "[summary] pass={} mapped={} {reduced} slot={slot} visible={} detached={}",
            s.pass_index, s.mapped, s.visible, s.detached,
        );
    }

    fn on_element_changes(&mut self, changes: &[ElementChange]) {
        if changes.is_empty() {
            return;
        }
        let _ = write!(self.writer, "[elements] count={}", changes.len());
        for c in changes.iter().take(8) {
            let _ = write!(self.writer, " {}:{}", c.element_index, field_name(c.field));
        }
        if changes.len() > 8 {
            let _ = write!(self.writer, " ...");
        }
        let _ = writeln!(self.writer);
    }
}
