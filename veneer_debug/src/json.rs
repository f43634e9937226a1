// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event export.
//!
//! [`JsonSink`] implements [`TraceSink`] and keeps every event as a
//! [`serde_json::Value`]. [`JsonSink::write_to`] emits them as one JSON array,
//! tagged by an `"event"` field, for diffing passes across runs.

use std::io::{self, Write};

use serde_json::{Value, json};

use veneer_core::trace::{
    ChromeAppliedEvent, ElementChange, OverlayUpdateEvent, ReconcileBeginEvent,
    ReconcileSummary, TraceSink,
};

use crate::pretty::{field_name, kind_name, style_name};

/// A [`TraceSink`] that collects events as JSON objects.
#[derive(Debug, Default)]
pub struct JsonSink {
    events: Vec<Value>,
}

impl JsonSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Drops all collected events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Consumes the sink and returns the events as one JSON array.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Array(self.events)
    }

    /// Writes the collected events as a pretty-printed JSON array.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

impl TraceSink for JsonSink {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        self.events.push(json!({
            "event": "reconcile_begin",
            "pass": e.pass_index,
            "surfaces": e.surface_count,
            "overlays": e.overlay_count,
            "in_call": e.in_call,
            "animated": e.animated,
        }));
    }

    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        self.events.push(json!({
            "event": "overlay_update",
            "pass": e.pass_index,
            "overlay": e.overlay.0,
            "kind": kind_name(e.kind),
            "animated": e.animated,
        }));
    }

    fn on_chrome_applied(&mut self, e: &ChromeAppliedEvent) {
        self.events.push(json!({
            "event": "chrome_applied",
            "pass": e.pass_index,
            "overlay": e.overlay.map(|id| id.0),
            "style": style_name(e.style),
            "alpha": e.alpha,
            "offset_y": e.offset_y,
            "writes": e.writes,
        }));
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        self.events.push(json!({
            "event": "reconcile_summary",
            "pass": s.pass_index,
            "mapped": s.mapped,
            "reduced": s.reduced,
            "slot_filled": s.slot_filled,
            "visible": s.visible,
            "detached": s.detached,
        }));
    }

    fn on_element_changes(&mut self, changes: &[ElementChange]) {
        let changes: Vec<Value> = changes
            .iter()
            .map(|c| json!({ "element": c.element_index, "field": field_name(c.field) }))
            .collect();
        self.events.push(json!({
            "event": "element_changes",
            "changes": changes,
        }));
    }
}
