// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform.
//!
//! Elements only ever need identity, uniform scale, composition, and scale
//! extraction, so this stays a plain array type instead of pulling in a
//! linear-algebra crate.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column*, matching the memory layout of Core
/// Animation's `CATransform3D` (`m11`, `m12`, `m13`, `m14` is the first
/// column here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates the transform used for uniform element scaling: `x` and `y`
    /// scaled by `scale`, `z` untouched.
    #[inline]
    #[must_use]
    pub const fn from_uniform_scale(scale: f64) -> Self {
        Self::from_scale(scale, scale, 1.0)
    }

    /// Creates a rotation around the Z axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Extracts the uniform scale factor as the length of the transformed
    /// x basis vector: `sqrt(m11² + m12² + m13²)`.
    ///
    /// Rotation about Z leaves this value unchanged.
    #[inline]
    #[must_use]
    pub fn uniform_scale(&self) -> f64 {
        let c = self.cols[0];
        (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt()
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, cell) in col.iter_mut().enumerate() {
                *cell = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float::approx_eq;

    #[test]
    fn identity_has_unit_scale() {
        assert_eq!(Transform3d::default(), Transform3d::IDENTITY);
        assert!(approx_eq(Transform3d::IDENTITY.uniform_scale(), 1.0));
    }

    #[test]
    fn uniform_scale_round_trips() {
        let t = Transform3d::from_uniform_scale(0.5);
        assert!(approx_eq(t.uniform_scale(), 0.5));
    }

    #[test]
    fn rotation_does_not_change_scale() {
        let t = Transform3d::from_rotation_z(0.7) * Transform3d::from_uniform_scale(2.0);
        assert!(
            (t.uniform_scale() - 2.0).abs() < 1e-12,
            "got {}",
            t.uniform_scale()
        );
    }

    #[test]
    fn multiply_by_identity() {
        let t = Transform3d::from_scale(2.0, 3.0, 4.0);
        assert_eq!(t * Transform3d::IDENTITY, t);
        assert_eq!(Transform3d::IDENTITY * t, t);
    }
}
