// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative property transitions.
//!
//! A [`Transition`] is either [`Immediate`](Transition::Immediate) or
//! [`Animated`](Transition::Animated). Layout code computes target values once
//! and hands them to the same operation regardless of mode:
//!
//! ```
//! use kurbo::Rect;
//! use veneer_core::animation::manual::ManualDriver;
//! use veneer_core::scene::Scene;
//! use veneer_core::transition::{Curve, Transition};
//!
//! let mut scene = Scene::new(ManualDriver::default());
//! let panel = scene.store.create_element();
//!
//! for transition in [Transition::Immediate, Transition::animated(0.3, Curve::Spring)] {
//!     transition.update_frame(&mut scene, panel, Rect::new(0.0, 0.0, 100.0, 40.0), false, None);
//! }
//! // The second call found the frame already in place and started nothing.
//! assert_eq!(scene.driver.started_count(), 0);
//! ```
//!
//! Every `update_*` operation writes the target into the element's model
//! immediately. When animated, it then asks the scene's
//! [`AnimationDriver`] to interpolate from the old value. The optional
//! [`Completion`] receives:
//!
//! - `true` synchronously when nothing changed (unless `force` is set), or
//!   when the transition is immediate;
//! - `true` later when the animation finishes;
//! - `false` later when the animation is replaced or removed early. The model
//!   already holds the target in that case; only the visual was cut short.

mod compound;

use kurbo::{Point, Rect};

use crate::animation::{
    AnimatedProperty, AnimationDriver, AnimationSpec, AnimationValue, Completion, TimingFunction,
    complete,
};
use crate::element::{Color, ElementId};
use crate::float;
use crate::scene::Scene;
use crate::transform::Transform3d;

pub use compound::CompoundCompletion;

/// Easing curve of an animated transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Ease in, ease out.
    EaseInOut,
    /// Spring. Uses the driver's native spring when it has one and a
    /// critically damped bezier otherwise.
    Spring,
}

impl Curve {
    /// Resolves the timing function for `driver`.
    #[must_use]
    pub fn timing_function<D: AnimationDriver + ?Sized>(self, driver: &D) -> TimingFunction {
        match self {
            Self::EaseInOut => TimingFunction::EASE_IN_OUT,
            Self::Spring if driver.supports_native_spring() => {
                TimingFunction::NativeSpring(driver.spring_parameters())
            }
            Self::Spring => TimingFunction::CRITICALLY_DAMPED,
        }
    }
}

/// How a property change reaches the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Transition {
    /// Apply the value with no animation.
    #[default]
    Immediate,
    /// Animate over `duration` seconds using `curve`.
    Animated {
        /// Duration in seconds. Always positive and finite.
        duration: f64,
        /// Easing curve.
        curve: Curve,
    },
}

impl Transition {
    /// Creates an animated transition.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is not a positive finite number.
    #[must_use]
    pub fn animated(duration: f64, curve: Curve) -> Self {
        assert!(
            duration.is_finite() && duration > 0.0,
            "transition duration must be positive and finite, got {duration}"
        );
        Self::Animated { duration, curve }
    }

    /// Returns whether this transition animates.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        matches!(self, Self::Animated { .. })
    }

    /// Builds the spec for one property animation.
    fn spec<D: AnimationDriver>(
        duration: f64,
        curve: Curve,
        scene: &Scene<D>,
        element: ElementId,
        property: AnimatedProperty,
        from: AnimationValue,
        to: AnimationValue,
    ) -> AnimationSpec {
        let timing = curve.timing_function(&scene.driver);
        AnimationSpec::new(element, property, from, to, duration, timing)
    }

    // -- Model-updating operations --

    /// Moves `element` to `frame`, animating position and size together.
    ///
    /// The two halves run as separate animations; `completion` fires once,
    /// after both, with `false` if either was interrupted. With `force` set
    /// the animation runs even when the frame is unchanged.
    pub fn update_frame<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        frame: Rect,
        force: bool,
        completion: Option<Completion>,
    ) {
        let previous = scene.store.frame(element);
        if float::rect_approx_eq(previous, frame) && !force {
            complete(completion, true);
            return;
        }
        match *self {
            Self::Immediate => {
                scene.store.set_frame(element, frame);
                complete(completion, true);
            }
            Self::Animated { duration, curve } => {
                scene.store.set_frame(element, frame);
                let timing = curve.timing_function(&scene.driver);
                compound::animate_frame(
                    scene, element, previous, frame, duration, timing, force, completion,
                );
            }
        }
    }

    /// Sets the bounds of `element`.
    pub fn update_bounds<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        bounds: Rect,
        completion: Option<Completion>,
    ) {
        let previous = scene.store.bounds(element);
        if float::rect_approx_eq(previous, bounds) {
            complete(completion, true);
            return;
        }
        scene.store.set_bounds(element, bounds);
        self.animate(
            scene,
            element,
            AnimatedProperty::Bounds,
            AnimationValue::Rect(previous),
            AnimationValue::Rect(bounds),
            completion,
        );
    }

    /// Sets the position (centre point) of `element`.
    pub fn update_position<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        position: Point,
        completion: Option<Completion>,
    ) {
        let previous = scene.store.position(element);
        if float::point_approx_eq(previous, position) {
            complete(completion, true);
            return;
        }
        scene.store.set_position(element, position);
        self.animate(
            scene,
            element,
            AnimatedProperty::Position,
            AnimationValue::Point(previous),
            AnimationValue::Point(position),
            completion,
        );
    }

    /// Sets the alpha of `element`.
    pub fn update_alpha<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        alpha: f64,
        completion: Option<Completion>,
    ) {
        let previous = scene.store.alpha(element);
        if float::approx_eq(previous, alpha) {
            complete(completion, true);
            return;
        }
        scene.store.set_alpha(element, alpha);
        self.animate(
            scene,
            element,
            AnimatedProperty::Opacity,
            AnimationValue::Scalar(previous),
            AnimationValue::Scalar(alpha),
            completion,
        );
    }

    /// Sets the background color of `element`.
    ///
    /// An element without a background has nothing to fade from, so the
    /// color is applied immediately even when animated.
    pub fn update_background_color<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        color: Color,
        completion: Option<Completion>,
    ) {
        let previous = scene.store.background(element);
        if previous == Some(color) {
            complete(completion, true);
            return;
        }
        scene.store.set_background(element, Some(color));
        match previous {
            Some(previous) => self.animate(
                scene,
                element,
                AnimatedProperty::BackgroundColor,
                AnimationValue::Color(previous),
                AnimationValue::Color(color),
                completion,
            ),
            None => complete(completion, true),
        }
    }

    /// Replaces the transform of `element` with a uniform scale.
    ///
    /// The current scale is read back from the transform's first column.
    pub fn update_scale<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        scale: f64,
        completion: Option<Completion>,
    ) {
        let previous = scene.store.uniform_scale(element);
        if float::approx_eq(previous, scale) {
            complete(completion, true);
            return;
        }
        scene
            .store
            .set_transform(element, Transform3d::from_uniform_scale(scale));
        self.animate(
            scene,
            element,
            AnimatedProperty::Scale,
            AnimationValue::Scalar(previous),
            AnimationValue::Scalar(scale),
            completion,
        );
    }

    // -- Presentation-only operations --

    /// Animates the position of `element` from `from` to its current model
    /// position. The model is not touched.
    pub fn animate_position_from<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        from: Point,
        completion: Option<Completion>,
    ) {
        let to = scene.store.position(element);
        self.animate(
            scene,
            element,
            AnimatedProperty::Position,
            AnimationValue::Point(from),
            AnimationValue::Point(to),
            completion,
        );
    }

    /// Animates the position of `element` from its model position to `to`.
    /// The model is not touched.
    ///
    /// With `remove_on_completion == false` the animation stays attached once
    /// finished, holding `to` on screen.
    pub fn animate_position_to<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        to: Point,
        remove_on_completion: bool,
        completion: Option<Completion>,
    ) {
        let from = scene.store.position(element);
        if float::point_approx_eq(from, to) {
            complete(completion, true);
            return;
        }
        let Self::Animated { duration, curve } = *self else {
            complete(completion, true);
            return;
        };
        let spec = Self::spec(
            duration,
            curve,
            scene,
            element,
            AnimatedProperty::Position,
            AnimationValue::Point(from),
            AnimationValue::Point(to),
        )
        .remove_on_completion(remove_on_completion);
        scene.driver.start(spec, completion);
    }

    /// Animates the bounds of `element` from `from` to its model bounds.
    /// The model is not touched.
    pub fn animate_bounds_from<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        from: Rect,
        remove_on_completion: bool,
        completion: Option<Completion>,
    ) {
        let Self::Animated { duration, curve } = *self else {
            complete(completion, true);
            return;
        };
        let to = scene.store.bounds(element);
        let spec = Self::spec(
            duration,
            curve,
            scene,
            element,
            AnimatedProperty::Bounds,
            AnimationValue::Rect(from),
            AnimationValue::Rect(to),
        )
        .remove_on_completion(remove_on_completion);
        scene.driver.start(spec, completion);
    }

    /// Slides the content of `element` in by animating its bounds origin y
    /// additively from `offset` back to zero. Immediate transitions do
    /// nothing.
    pub fn animate_offset_additive<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        offset: f64,
    ) {
        if let Self::Animated { duration, curve } = *self {
            let spec = Self::spec(
                duration,
                curve,
                scene,
                element,
                AnimatedProperty::BoundsOriginY,
                AnimationValue::Scalar(offset),
                AnimationValue::Scalar(0.0),
            )
            .additive(true);
            scene.driver.start(spec, None);
        }
    }

    /// Slides `element` in vertically by animating its position additively
    /// from `(0, offset)` back to zero. Immediate transitions do nothing.
    pub fn animate_position_additive<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        offset: f64,
    ) {
        if let Self::Animated { duration, curve } = *self {
            let spec = Self::spec(
                duration,
                curve,
                scene,
                element,
                AnimatedProperty::Position,
                AnimationValue::Point(Point::new(0.0, offset)),
                AnimationValue::Point(Point::ZERO),
            )
            .additive(true);
            scene.driver.start(spec, None);
        }
    }

    /// Reports immediately or starts one animation, depending on the mode.
    fn animate<D: AnimationDriver>(
        &self,
        scene: &mut Scene<D>,
        element: ElementId,
        property: AnimatedProperty,
        from: AnimationValue,
        to: AnimationValue,
        completion: Option<Completion>,
    ) {
        match *self {
            Self::Immediate => complete(completion, true),
            Self::Animated { duration, curve } => {
                let spec = Self::spec(duration, curve, scene, element, property, from, to);
                scene.driver.start(spec, completion);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Size;

    use super::*;
    use crate::animation::manual::{DriverConfig, ManualDriver};

    type Log = Rc<RefCell<Vec<bool>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn record(log: &Log) -> Option<Completion> {
        let log = log.clone();
        Some(Box::new(move |ok: bool| log.borrow_mut().push(ok)))
    }

    fn scene() -> Scene<ManualDriver> {
        Scene::new(ManualDriver::default())
    }

    const ANIMATED: Transition = Transition::Animated {
        duration: 0.25,
        curve: Curve::EaseInOut,
    };

    #[test]
    fn immediate_sets_value_and_reports_success() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let done = log();
        Transition::Immediate.update_alpha(&mut scene, e, 0.5, record(&done));
        assert_eq!(scene.store.alpha(e), 0.5);
        assert_eq!(*done.borrow(), [true]);
        assert_eq!(scene.driver.started_count(), 0);
    }

    #[test]
    fn animated_sets_model_before_animating() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let done = log();
        ANIMATED.update_position(&mut scene, e, Point::new(10.0, 20.0), record(&done));
        assert_eq!(scene.store.position(e), Point::new(10.0, 20.0));
        assert!(done.borrow().is_empty(), "completion waits for the driver");
        let handle = scene
            .driver
            .handle_for(e, AnimatedProperty::Position)
            .expect("position animation");
        let spec = scene.driver.spec(handle).copied().expect("spec");
        assert_eq!(spec.from, AnimationValue::Point(Point::ZERO));
        assert_eq!(spec.to, AnimationValue::Point(Point::new(10.0, 20.0)));
        assert_eq!(spec.timing, TimingFunction::EASE_IN_OUT);

        scene.driver.advance(0.25);
        assert_eq!(*done.borrow(), [true]);
    }

    #[test]
    fn update_frame_twice_starts_driver_once() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let frame = Rect::new(0.0, 0.0, 100.0, 50.0);
        ANIMATED.update_frame(&mut scene, e, frame, false, None);
        let started = scene.driver.started_count();
        assert_eq!(started, 2, "position and bounds");

        let done = log();
        ANIMATED.update_frame(&mut scene, e, frame, false, record(&done));
        assert_eq!(scene.driver.started_count(), started);
        assert_eq!(*done.borrow(), [true], "synchronous success");
    }

    #[test]
    fn forced_frame_update_animates_anyway() {
        let mut scene = scene();
        let e = scene.store.create_element_with_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
        let done = log();
        ANIMATED.update_frame(&mut scene, e, Rect::new(0.0, 0.0, 10.0, 10.0), true, record(&done));
        assert_eq!(scene.driver.started_count(), 2);
        assert!(done.borrow().is_empty());
        scene.driver.finish_all();
        assert_eq!(*done.borrow(), [true]);
    }

    #[test]
    fn frame_change_decomposes_into_position_and_bounds() {
        let mut scene = scene();
        let e = scene.store.create_element_with_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.store.set_bounds(e, Rect::new(0.0, 5.0, 10.0, 15.0));
        ANIMATED.update_frame(&mut scene, e, Rect::new(20.0, 20.0, 60.0, 40.0), false, None);

        let position = scene
            .driver
            .handle_for(e, AnimatedProperty::Position)
            .and_then(|h| scene.driver.spec(h).copied())
            .expect("position spec");
        assert_eq!(position.from, AnimationValue::Point(Point::new(5.0, 5.0)));
        assert_eq!(position.to, AnimationValue::Point(Point::new(40.0, 30.0)));

        let bounds = scene
            .driver
            .handle_for(e, AnimatedProperty::Bounds)
            .and_then(|h| scene.driver.spec(h).copied())
            .expect("bounds spec");
        assert_eq!(
            bounds.from,
            AnimationValue::Rect(Rect::from_origin_size((0.0, 5.0), Size::new(10.0, 10.0)))
        );
        assert_eq!(
            bounds.to,
            AnimationValue::Rect(Rect::from_origin_size((0.0, 5.0), Size::new(40.0, 20.0)))
        );
    }

    #[test]
    fn interrupted_half_fails_the_frame_completion() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let done = log();
        ANIMATED.update_frame(&mut scene, e, Rect::new(0.0, 0.0, 30.0, 30.0), false, record(&done));

        let position = scene
            .driver
            .handle_for(e, AnimatedProperty::Position)
            .expect("position animation");
        scene.driver.interrupt(position);
        assert!(done.borrow().is_empty(), "bounds still running");

        scene.driver.advance(1.0);
        assert_eq!(*done.borrow(), [false]);
    }

    #[test]
    fn pure_resize_skips_position_half() {
        let mut scene = scene();
        let e = scene.store.create_element_with_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
        let done = log();
        // Same centre, different size.
        ANIMATED.update_frame(&mut scene, e, Rect::new(-5.0, -5.0, 15.0, 15.0), false, record(&done));
        assert_eq!(scene.driver.started_count(), 1);
        assert!(!scene.driver.is_running(e, AnimatedProperty::Position));
        scene.driver.finish_all();
        assert_eq!(*done.borrow(), [true]);
    }

    #[test]
    fn replacing_an_animation_reports_false() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let first = log();
        ANIMATED.update_alpha(&mut scene, e, 0.0, record(&first));
        ANIMATED.update_alpha(&mut scene, e, 0.5, None);
        assert_eq!(*first.borrow(), [false]);
        assert_eq!(scene.store.alpha(e), 0.5);
    }

    #[test]
    fn spring_uses_native_spring_when_available() {
        let mut scene = scene();
        let e = scene.store.create_element();
        Transition::animated(0.3, Curve::Spring).update_alpha(&mut scene, e, 0.0, None);
        let h = scene.driver.handle_for(e, AnimatedProperty::Opacity).expect("opacity");
        assert!(scene.driver.spec(h).expect("spec").timing.is_spring());
    }

    #[test]
    fn spring_falls_back_to_critically_damped_bezier() {
        let mut scene = Scene::new(ManualDriver::new(DriverConfig {
            duration_factor: 1.0,
            native_spring: false,
        }));
        let e = scene.store.create_element();
        Transition::animated(0.3, Curve::Spring).update_alpha(&mut scene, e, 0.0, None);
        let h = scene.driver.handle_for(e, AnimatedProperty::Opacity).expect("opacity");
        assert_eq!(
            scene.driver.spec(h).expect("spec").timing,
            TimingFunction::CRITICALLY_DAMPED
        );
    }

    #[test]
    fn background_without_previous_color_is_immediate() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let done = log();
        ANIMATED.update_background_color(&mut scene, e, Color::WHITE, record(&done));
        assert_eq!(scene.store.background(e), Some(Color::WHITE));
        assert_eq!(*done.borrow(), [true]);
        assert_eq!(scene.driver.started_count(), 0);

        ANIMATED.update_background_color(&mut scene, e, Color::BLACK, None);
        assert!(scene.driver.is_running(e, AnimatedProperty::BackgroundColor));
    }

    #[test]
    fn scale_reads_current_scale_from_transform() {
        let mut scene = scene();
        let e = scene.store.create_element();
        scene.store.set_transform(e, Transform3d::from_uniform_scale(2.0));
        ANIMATED.update_scale(&mut scene, e, 0.5, None);
        let h = scene.driver.handle_for(e, AnimatedProperty::Scale).expect("scale");
        assert_eq!(
            scene.driver.spec(h).expect("spec").from,
            AnimationValue::Scalar(2.0)
        );
        assert!((scene.store.uniform_scale(e) - 0.5).abs() < 1e-12);

        let done = log();
        ANIMATED.update_scale(&mut scene, e, 0.5, record(&done));
        assert_eq!(*done.borrow(), [true]);
    }

    #[test]
    fn position_to_leaves_model_alone() {
        let mut scene = scene();
        let e = scene.store.create_element();
        ANIMATED.animate_position_to(&mut scene, e, Point::new(0.0, 30.0), false, None);
        assert_eq!(scene.store.position(e), Point::ZERO);
        scene.driver.advance(1.0);
        assert_eq!(
            scene.driver.presentation_value(
                e,
                AnimatedProperty::Position,
                AnimationValue::Point(Point::ZERO)
            ),
            AnimationValue::Point(Point::new(0.0, 30.0)),
            "retained animation holds its end value"
        );
    }

    #[test]
    fn presentation_only_ops_report_success_when_immediate() {
        let mut scene = scene();
        let e = scene.store.create_element();
        let done = log();
        Transition::Immediate.animate_position_from(&mut scene, e, Point::new(1.0, 1.0), record(&done));
        Transition::Immediate.animate_bounds_from(&mut scene, e, Rect::ZERO, true, record(&done));
        Transition::Immediate.animate_offset_additive(&mut scene, e, 20.0);
        Transition::Immediate.animate_position_additive(&mut scene, e, 20.0);
        assert_eq!(*done.borrow(), [true, true]);
        assert_eq!(scene.driver.started_count(), 0);
    }

    #[test]
    fn additive_offsets_stack_on_the_same_property() {
        let mut scene = scene();
        let e = scene.store.create_element();
        ANIMATED.animate_offset_additive(&mut scene, e, 20.0);
        ANIMATED.animate_offset_additive(&mut scene, e, -10.0);
        ANIMATED.animate_position_additive(&mut scene, e, 20.0);
        assert_eq!(scene.driver.running_count(), 3);
        assert!(
            scene
                .driver
                .specs()
                .all(|s| s.additive),
            "offset animations are additive"
        );
    }

    #[test]
    #[should_panic(expected = "transition duration must be positive")]
    fn zero_duration_is_rejected() {
        let _ = Transition::animated(0.0, Curve::EaseInOut);
    }

    #[test]
    fn is_animated_reflects_mode() {
        assert!(!Transition::Immediate.is_animated());
        assert!(Transition::animated(0.1, Curve::Spring).is_animated());
        assert_eq!(Transition::default(), Transition::Immediate);
    }
}
