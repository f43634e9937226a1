// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation primitive interface.
//!
//! The core never interpolates anything itself. It describes each animation as
//! an [`AnimationSpec`] and hands it to an [`AnimationDriver`], which runs it
//! and reports back through a one-shot [`Completion`].
//!
//! # Driver contract
//!
//! - Every started animation invokes its completion **exactly once**:
//!   `true` if it ran to the end, `false` if it was cancelled, replaced, or
//!   removed early.
//! - Starting a non-additive animation on an `(element, property)` pair that
//!   already has one replaces it; the replaced animation completes with
//!   `false`. Additive animations stack and never replace anything.
//! - There are no timeouts. A driver that never calls back stalls its
//!   completion forever.
//!
//! [`manual::ManualDriver`] is a deterministic, clock-stepped implementation
//! for tests and headless hosts.

pub mod manual;
mod timing;

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect};

use crate::element::{Color, ElementId};
use crate::float;

pub use timing::{SpringParameters, TimingFunction};

/// One-shot completion callback. The argument is `true` when the animation
/// finished uninterrupted.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Invokes `completion`, if present, with `finished`.
#[inline]
pub fn complete(completion: Option<Completion>, finished: bool) {
    if let Some(completion) = completion {
        completion(finished);
    }
}

/// The element property an animation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Centre point.
    Position,
    /// Whole bounds rectangle.
    Bounds,
    /// Vertical bounds origin only (content offset).
    BoundsOriginY,
    /// Alpha.
    Opacity,
    /// Background color.
    BackgroundColor,
    /// Uniform transform scale.
    Scale,
}

impl AnimatedProperty {
    /// Returns the Core Animation key path for this property.
    #[must_use]
    pub const fn key_path(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Bounds => "bounds",
            Self::BoundsOriginY => "bounds.origin.y",
            Self::Opacity => "opacity",
            Self::BackgroundColor => "backgroundColor",
            Self::Scale => "transform.scale",
        }
    }
}

/// A value an animation interpolates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationValue {
    /// Scalar (opacity, scale, bounds origin y).
    Scalar(f64),
    /// Point (position).
    Point(Point),
    /// Rectangle (bounds).
    Rect(Rect),
    /// Color (background).
    Color(Color),
}

impl AnimationValue {
    /// Interpolates from `self` (at `t == 0`) towards `to`.
    ///
    /// Mismatched variants snap to `to` once `t` reaches `1.0` and hold
    /// `self` before that.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Point(a), Self::Point(b)) => Self::Point(a.lerp(b, t)),
            (Self::Rect(a), Self::Rect(b)) => Self::Rect(Rect::new(
                a.x0 + (b.x0 - a.x0) * t,
                a.y0 + (b.y0 - a.y0) * t,
                a.x1 + (b.x1 - a.x1) * t,
                a.y1 + (b.y1 - a.y1) * t,
            )),
            (Self::Color(a), Self::Color(b)) => Self::Color(a.lerp(b, t)),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }

    /// Adds `delta` on top of `self`, the way additive animations compose
    /// with the model value. Mismatched variants leave `self` unchanged.
    #[must_use]
    pub fn offset_by(self, delta: Self) -> Self {
        match (self, delta) {
            (Self::Scalar(a), Self::Scalar(d)) => Self::Scalar(a + d),
            (Self::Point(a), Self::Point(d)) => Self::Point(a + d.to_vec2()),
            (Self::Rect(a), Self::Rect(d)) => Self::Rect(Rect::from_origin_size(
                a.origin() + d.origin().to_vec2(),
                (a.size().to_vec2() + d.size().to_vec2()).to_size(),
            )),
            (Self::Color(a), Self::Color(d)) => {
                Self::Color(Color::rgba(a.r + d.r, a.g + d.g, a.b + d.b, a.a + d.a))
            }
            _ => self,
        }
    }

    /// Tolerant equality; mismatched variants are never equal.
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => float::approx_eq(a, b),
            (Self::Point(a), Self::Point(b)) => float::point_approx_eq(a, b),
            (Self::Rect(a), Self::Rect(b)) => float::rect_approx_eq(a, b),
            (Self::Color(a), Self::Color(b)) => a == b,
            _ => false,
        }
    }
}

/// Opaque identifier for a started animation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationHandle(pub u64);

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationHandle({})", self.0)
    }
}

/// Everything a driver needs to run one property animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Animated element.
    pub element: ElementId,
    /// Animated property.
    pub property: AnimatedProperty,
    /// Start value.
    pub from: AnimationValue,
    /// End value.
    pub to: AnimationValue,
    /// Requested duration in seconds.
    pub duration: f64,
    /// Timing function.
    pub timing: TimingFunction,
    /// Whether the animation is layered on top of the model value instead of
    /// replacing it.
    pub additive: bool,
    /// Whether the animation detaches itself once finished. When `false` it
    /// stays attached, holding its end value, until removed.
    pub remove_on_completion: bool,
}

impl AnimationSpec {
    /// Creates a non-additive spec that removes itself on completion.
    #[must_use]
    pub fn new(
        element: ElementId,
        property: AnimatedProperty,
        from: AnimationValue,
        to: AnimationValue,
        duration: f64,
        timing: TimingFunction,
    ) -> Self {
        Self {
            element,
            property,
            from,
            to,
            duration,
            timing,
            additive: false,
            remove_on_completion: true,
        }
    }

    /// Marks the spec as additive.
    #[must_use]
    pub fn additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }

    /// Sets whether the animation detaches when finished.
    #[must_use]
    pub fn remove_on_completion(mut self, remove: bool) -> Self {
        self.remove_on_completion = remove;
        self
    }
}

/// Runs property animations on behalf of the core.
///
/// See the [module docs](self) for the contract every implementation must
/// uphold.
pub trait AnimationDriver {
    /// Starts `spec`, returning a handle for later cancellation.
    fn start(&mut self, spec: AnimationSpec, completion: Option<Completion>) -> AnimationHandle;

    /// Cancels an animation. Its completion receives `false`. Unknown or
    /// already-finished handles are ignored.
    fn cancel(&mut self, handle: AnimationHandle);

    /// Removes every animation attached to `element`; running ones complete
    /// with `false`.
    fn remove_all(&mut self, element: ElementId);

    /// Returns whether any animation on `property` is attached to `element`.
    ///
    /// Finished animations kept alive with `remove_on_completion == false`
    /// count as attached.
    fn is_running(&self, element: ElementId, property: AnimatedProperty) -> bool;

    /// Returns whether the driver has a native spring facility. When it does
    /// not, spring transitions fall back to
    /// [`TimingFunction::CRITICALLY_DAMPED`].
    fn supports_native_spring(&self) -> bool {
        false
    }

    /// Spring parameters used for [`TimingFunction::NativeSpring`].
    fn spring_parameters(&self) -> SpringParameters {
        SpringParameters::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_interpolates_each_variant() {
        assert_eq!(
            AnimationValue::Scalar(0.0).lerp(AnimationValue::Scalar(10.0), 0.5),
            AnimationValue::Scalar(5.0)
        );
        assert_eq!(
            AnimationValue::Point(Point::ZERO).lerp(AnimationValue::Point(Point::new(4.0, 8.0)), 0.25),
            AnimationValue::Point(Point::new(1.0, 2.0))
        );
        assert_eq!(
            AnimationValue::Rect(Rect::ZERO)
                .lerp(AnimationValue::Rect(Rect::new(0.0, 0.0, 10.0, 20.0)), 0.5),
            AnimationValue::Rect(Rect::new(0.0, 0.0, 5.0, 10.0))
        );
    }

    #[test]
    fn mismatched_variants_snap_at_end() {
        let from = AnimationValue::Scalar(1.0);
        let to = AnimationValue::Point(Point::ZERO);
        assert_eq!(from.lerp(to, 0.5), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn offset_adds_deltas() {
        let model = AnimationValue::Point(Point::new(10.0, 10.0));
        let delta = AnimationValue::Point(Point::new(0.0, -5.0));
        assert_eq!(
            model.offset_by(delta),
            AnimationValue::Point(Point::new(10.0, 5.0))
        );
    }

    #[test]
    fn approx_eq_tolerates_rounding() {
        let a = AnimationValue::Scalar(0.1 + 0.2);
        assert!(a.approx_eq(AnimationValue::Scalar(0.3)));
        assert!(!a.approx_eq(AnimationValue::Point(Point::ZERO)));
    }

    #[test]
    fn complete_invokes_once() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        complete(Some(Box::new(move |ok: bool| {
            assert!(ok, "expected success");
            h.set(h.get() + 1);
        })), true);
        complete(None, false);
        assert_eq!(hits.get(), 1);
    }
}
