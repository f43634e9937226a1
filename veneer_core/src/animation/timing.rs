// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing functions: cubic-bezier easing and a damped spring.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingFunction {
    /// CSS-style cubic bezier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier(f64, f64, f64, f64),
    /// The driver's native spring, played over the requested duration.
    NativeSpring(SpringParameters),
}

impl TimingFunction {
    /// Standard ease-in-ease-out.
    pub const EASE_IN_OUT: Self = Self::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Bezier approximation of a critically damped spring, used when the
    /// driver has no native spring.
    pub const CRITICALLY_DAMPED: Self = Self::CubicBezier(0.38, 0.7, 0.125, 1.0);

    /// Linear timing.
    pub const LINEAR: Self = Self::CubicBezier(0.0, 0.0, 1.0, 1.0);

    /// Samples eased progress for linear progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`; both endpoints map exactly onto themselves.
    #[must_use]
    pub fn sample(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Self::CubicBezier(x1, y1, x2, y2) => UnitBezier::new(x1, y1, x2, y2).solve(t),
            Self::NativeSpring(spring) => spring.sample(t * spring.settle_duration),
        }
    }

    /// Returns whether this is a native spring.
    #[must_use]
    pub fn is_spring(&self) -> bool {
        matches!(self, Self::NativeSpring(_))
    }
}

/// Physical parameters of the native spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParameters {
    /// Damping coefficient.
    pub damping: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Attached mass.
    pub mass: f64,
    /// Time in seconds the spring takes to settle. The driver stretches this
    /// onto the requested duration.
    pub settle_duration: f64,
}

impl SpringParameters {
    /// Critically damped spring (`damping == 2 * sqrt(stiffness * mass)`).
    pub const STANDARD: Self = Self {
        damping: 40.0,
        stiffness: 400.0,
        mass: 1.0,
        settle_duration: 0.5,
    };

    const STEP: f64 = 1.0 / 1000.0;

    /// Displacement from 0 towards 1 after `time` seconds, starting at rest.
    ///
    /// Integrated with fixed-step semi-implicit Euler. Times at or beyond
    /// `settle_duration` report exactly `1.0`.
    #[must_use]
    pub fn sample(&self, time: f64) -> f64 {
        if time >= self.settle_duration {
            return 1.0;
        }
        let mut x = 0.0;
        let mut v = 0.0;
        let mut elapsed = 0.0;
        while elapsed < time {
            let dt = Self::STEP.min(time - elapsed);
            let force = -self.stiffness * (x - 1.0) - self.damping * v;
            v += force / self.mass * dt;
            x += v * dt;
            elapsed += dt;
        }
        x
    }

    /// Damping ratio; `1.0` is critical damping.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringParameters {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Polynomial form of a cubic bezier with fixed endpoints.
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    const TOLERANCE: f64 = 1e-7;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Finds the curve parameter whose x equals `x`.
    fn solve_x(&self, x: f64) -> f64 {
        // Newton first; it converges in a few steps away from flat tangents.
        let mut t = x;
        for _ in 0..8 {
            let err = self.x(t) - x;
            if err.abs() < Self::TOLERANCE {
                return t;
            }
            let d = self.dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let value = self.x(t);
            if (value - x).abs() < Self::TOLERANCE {
                return t;
            }
            if x > value {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
            if hi - lo < Self::TOLERANCE {
                break;
            }
        }
        t
    }

    fn solve(&self, x: f64) -> f64 {
        self.y(self.solve_x(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for f in [
            TimingFunction::EASE_IN_OUT,
            TimingFunction::CRITICALLY_DAMPED,
            TimingFunction::NativeSpring(SpringParameters::STANDARD),
        ] {
            assert_eq!(f.sample(0.0), 0.0, "{f:?} at 0");
            assert_eq!(f.sample(1.0), 1.0, "{f:?} at 1");
            assert_eq!(f.sample(-3.0), 0.0, "{f:?} clamps below");
            assert_eq!(f.sample(7.0), 1.0, "{f:?} clamps above");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let f = TimingFunction::EASE_IN_OUT;
        assert!((f.sample(0.5) - 0.5).abs() < 1e-4);
        let a = f.sample(0.25);
        let b = f.sample(0.75);
        assert!((a + b - 1.0).abs() < 1e-4, "a={a} b={b}");
        assert!(a < 0.25, "ease-in starts slow: {a}");
    }

    #[test]
    fn linear_is_identity() {
        let f = TimingFunction::LINEAR;
        for t in [0.1, 0.3, 0.6, 0.9] {
            assert!((f.sample(t) - t).abs() < 1e-5, "t={t}");
        }
    }

    #[test]
    fn critically_damped_front_loads_progress() {
        let f = TimingFunction::CRITICALLY_DAMPED;
        assert!(f.sample(0.25) > 0.5, "got {}", f.sample(0.25));
    }

    #[test]
    fn standard_spring_is_critically_damped() {
        let s = SpringParameters::STANDARD;
        assert!((s.damping_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn spring_is_monotonic_without_overshoot() {
        let s = SpringParameters::STANDARD;
        let mut prev = 0.0;
        for i in 1..50 {
            let x = s.sample(f64::from(i) * 0.01);
            assert!(x >= prev, "spring went backwards at step {i}");
            assert!(x <= 1.0 + 1e-9, "spring overshot at step {i}: {x}");
            prev = x;
        }
        assert!(prev > 0.99, "spring should be nearly settled: {prev}");
    }
}
