// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerant floating-point comparisons.
//!
//! Geometry and opacity values reach the transition and reconciliation code
//! straight out of live interpolations and transform scale extraction, so
//! equality is always tested against [`EPSILON`] rather than bit-for-bit.

use kurbo::{Point, Rect};

/// Absolute tolerance used for every geometry and opacity comparison.
pub const EPSILON: f64 = f64::EPSILON;

/// Returns whether `a` and `b` differ by no more than [`EPSILON`].
#[inline]
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Component-wise [`approx_eq`] for points.
#[inline]
#[must_use]
pub fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Component-wise [`approx_eq`] for rectangles.
#[inline]
#[must_use]
pub fn rect_approx_eq(a: Rect, b: Rect) -> bool {
    approx_eq(a.x0, b.x0) && approx_eq(a.y0, b.y0) && approx_eq(a.x1, b.x1) && approx_eq(a.y1, b.y1)
}

/// Returns whether `p` sits on the coordinate origin.
#[inline]
#[must_use]
pub fn is_origin(p: Point) -> bool {
    point_approx_eq(p, Point::ZERO)
}
