// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic, clock-stepped animation driver.
//!
//! [`ManualDriver`] never looks at a real clock. Time moves only when the host
//! calls [`advance`](ManualDriver::advance), which makes it suitable for tests
//! and headless hosts that want to observe in-flight presentation values.
//!
//! ```
//! use kurbo::Point;
//! use veneer_core::animation::manual::{DriverConfig, ManualDriver};
//! use veneer_core::animation::{AnimatedProperty, AnimationValue};
//! use veneer_core::scene::Scene;
//! use veneer_core::transition::{Curve, Transition};
//!
//! let mut scene = Scene::new(ManualDriver::new(DriverConfig::standard()));
//! let element = scene.store.create_element();
//!
//! Transition::animated(0.2, Curve::EaseInOut).update_position(
//!     &mut scene,
//!     element,
//!     Point::new(0.0, 100.0),
//!     None,
//! );
//! assert!(scene.driver.is_animating(element, AnimatedProperty::Position));
//!
//! scene.driver.advance(0.2);
//! let model = AnimationValue::Point(scene.store.position(element));
//! assert_eq!(
//!     scene.driver.presentation_value(element, AnimatedProperty::Position, model),
//!     model,
//! );
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{
    AnimatedProperty, AnimationDriver, AnimationHandle, AnimationSpec, AnimationValue, Completion,
};
use crate::element::ElementId;

/// Playback configuration for a [`ManualDriver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverConfig {
    /// Global duration multiplier. `0.0` and `1.0` both mean normal speed;
    /// any other value plays animations at `1 / duration_factor` speed.
    pub duration_factor: f64,
    /// Whether the driver advertises a native spring.
    pub native_spring: bool,
}

impl DriverConfig {
    /// Normal speed with native springs.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            duration_factor: 1.0,
            native_spring: true,
        }
    }

    /// Ten times slower, as with a debug slow-animations toggle.
    #[must_use]
    pub const fn slow_motion() -> Self {
        Self {
            duration_factor: 10.0,
            native_spring: true,
        }
    }

    /// Playback speed multiplier derived from
    /// [`duration_factor`](Self::duration_factor).
    #[must_use]
    pub fn speed(&self) -> f64 {
        let k = self.duration_factor;
        if k == 0.0 || k == 1.0 { 1.0 } else { 1.0 / k }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::standard()
    }
}

struct Running {
    handle: AnimationHandle,
    spec: AnimationSpec,
    /// Wall-clock seconds the animation lasts at the configured speed.
    wall_duration: f64,
    elapsed: f64,
    finished: bool,
    completion: Option<Completion>,
}

impl Running {
    fn progress(&self) -> f64 {
        if self.finished || self.wall_duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.wall_duration).min(1.0)
        }
    }

    fn current(&self) -> AnimationValue {
        let eased = self.spec.timing.sample(self.progress());
        self.spec.from.lerp(self.spec.to, eased)
    }
}

impl core::fmt::Debug for Running {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Running")
            .field("handle", &self.handle)
            .field("spec", &self.spec)
            .field("elapsed", &self.elapsed)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// An [`AnimationDriver`] that advances only when told to.
///
/// Animations complete in start order. Non-additive animations are keyed by
/// `(element, property)`; starting another on the same key interrupts the
/// first. Animations started with `remove_on_completion == false` stay
/// attached, holding their end value, until cancelled or removed.
#[derive(Debug)]
pub struct ManualDriver {
    config: DriverConfig,
    next_handle: u64,
    running: Vec<Running>,
    keyed: HashMap<(ElementId, AnimatedProperty), AnimationHandle>,
    started: u64,
}

impl Default for ManualDriver {
    fn default() -> Self {
        Self::new(DriverConfig::standard())
    }
}

impl ManualDriver {
    /// Creates an idle driver.
    #[must_use]
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            next_handle: 0,
            running: Vec::new(),
            keyed: HashMap::new(),
            started: 0,
        }
    }

    /// Returns the playback configuration.
    #[must_use]
    pub fn config(&self) -> DriverConfig {
        self.config
    }

    /// Total number of animations ever started.
    #[must_use]
    pub fn started_count(&self) -> u64 {
        self.started
    }

    /// Number of attached animations that have not yet finished.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.iter().filter(|r| !r.finished).count()
    }

    /// Returns the spec of an attached animation.
    #[must_use]
    pub fn spec(&self, handle: AnimationHandle) -> Option<&AnimationSpec> {
        self.running
            .iter()
            .find(|r| r.handle == handle)
            .map(|r| &r.spec)
    }

    /// Returns the specs of every attached animation, in start order.
    pub fn specs(&self) -> impl Iterator<Item = &AnimationSpec> + '_ {
        self.running.iter().map(|r| &r.spec)
    }

    /// Returns the handle of the non-additive animation keyed on
    /// `(element, property)`.
    #[must_use]
    pub fn handle_for(
        &self,
        element: ElementId,
        property: AnimatedProperty,
    ) -> Option<AnimationHandle> {
        self.keyed.get(&(element, property)).copied()
    }

    /// Returns whether an unfinished animation drives `property` on
    /// `element`.
    ///
    /// Unlike [`AnimationDriver::is_running`], retained finished animations do
    /// not count.
    #[must_use]
    pub fn is_animating(&self, element: ElementId, property: AnimatedProperty) -> bool {
        self.running.iter().any(|r| {
            !r.finished && r.spec.element == element && r.spec.property == property
        })
    }

    /// Moves the clock forward by `seconds` and fires the completions of every
    /// animation that reached its end, in start order.
    pub fn advance(&mut self, seconds: f64) {
        let mut done = Vec::new();
        for r in &mut self.running {
            if r.finished {
                continue;
            }
            r.elapsed += seconds;
            if r.elapsed >= r.wall_duration {
                r.finished = true;
                done.push(r.handle);
            }
        }
        self.settle(&done);
    }

    /// Finishes every running animation immediately, as if the clock jumped
    /// past all of them.
    pub fn finish_all(&mut self) {
        let mut done = Vec::new();
        for r in &mut self.running {
            if !r.finished {
                r.finished = true;
                done.push(r.handle);
            }
        }
        self.settle(&done);
    }

    /// Interrupts an animation; its completion receives `false`.
    ///
    /// Returns whether the handle was attached.
    pub fn interrupt(&mut self, handle: AnimationHandle) -> bool {
        let Some(pos) = self.running.iter().position(|r| r.handle == handle) else {
            return false;
        };
        let r = self.detach_at(pos);
        super::complete(r.completion, false);
        true
    }

    /// Samples the presented value of `property` on `element`.
    ///
    /// `model` is the element's settled value. A non-additive animation
    /// replaces it with its interpolated value; additive animations then add
    /// their interpolated deltas on top.
    #[must_use]
    pub fn presentation_value(
        &self,
        element: ElementId,
        property: AnimatedProperty,
        model: AnimationValue,
    ) -> AnimationValue {
        let on_key = |r: &&Running| r.spec.element == element && r.spec.property == property;
        let base = self
            .running
            .iter()
            .rev()
            .filter(on_key)
            .find(|r| !r.spec.additive)
            .map_or(model, Running::current);
        self.running
            .iter()
            .filter(on_key)
            .filter(|r| r.spec.additive)
            .fold(base, |value, r| value.offset_by(r.current()))
    }

    /// Completes the given finished animations in start order, detaching the
    /// ones that remove themselves on completion.
    fn settle(&mut self, done: &[AnimationHandle]) {
        let mut completions = Vec::with_capacity(done.len());
        for &handle in done {
            let Some(pos) = self.running.iter().position(|r| r.handle == handle) else {
                continue;
            };
            if self.running[pos].spec.remove_on_completion {
                let r = self.detach_at(pos);
                completions.push(r.completion);
            } else {
                completions.push(self.running[pos].completion.take());
            }
        }
        for completion in completions {
            super::complete(completion, true);
        }
    }

    fn detach_at(&mut self, pos: usize) -> Running {
        let r = self.running.remove(pos);
        let key = (r.spec.element, r.spec.property);
        if self.keyed.get(&key) == Some(&r.handle) {
            self.keyed.remove(&key);
        }
        r
    }
}

impl AnimationDriver for ManualDriver {
    fn start(&mut self, spec: AnimationSpec, completion: Option<Completion>) -> AnimationHandle {
        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.started += 1;

        if !spec.additive {
            if let Some(previous) = self.keyed.insert((spec.element, spec.property), handle) {
                if let Some(pos) = self.running.iter().position(|r| r.handle == previous) {
                    let replaced = self.running.remove(pos);
                    super::complete(replaced.completion, false);
                }
            }
        }

        self.running.push(Running {
            handle,
            spec,
            wall_duration: spec.duration / self.config.speed(),
            elapsed: 0.0,
            finished: false,
            completion,
        });
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.interrupt(handle);
    }

    fn remove_all(&mut self, element: ElementId) {
        let mut completions = Vec::new();
        let mut i = 0;
        while i < self.running.len() {
            if self.running[i].spec.element == element {
                completions.push(self.detach_at(i).completion);
            } else {
                i += 1;
            }
        }
        for completion in completions {
            super::complete(completion, false);
        }
    }

    fn is_running(&self, element: ElementId, property: AnimatedProperty) -> bool {
        self.running
            .iter()
            .any(|r| r.spec.element == element && r.spec.property == property)
    }

    fn supports_native_spring(&self) -> bool {
        self.config.native_spring
    }
}
