// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export of veneer reconciliation traces.
//!
//! This crate provides [`TraceSink`](veneer_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonSink`]: collects events as JSON objects and writes them out
//!   as one array.

pub mod json;
pub mod pretty;
