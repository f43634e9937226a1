// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregated completion for animations realized as several primitives.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Rect;

use crate::animation::{
    AnimatedProperty, AnimationDriver, AnimationSpec, AnimationValue, Completion, TimingFunction,
    complete,
};
use crate::element::ElementId;
use crate::scene::Scene;

/// Joins `N` part completions into one logical completion.
///
/// Each invocation owns its own state; nothing is shared across compound
/// transitions. The joined completion fires exactly once, after every part
/// has reported, with `true` only if no part was interrupted. Parts that never
/// report stall the joined completion forever.
#[derive(Debug)]
pub struct CompoundCompletion<const N: usize> {
    done: [bool; N],
    interrupted: bool,
}

impl<const N: usize> CompoundCompletion<N> {
    /// Splits `completion` into `N` part completions.
    ///
    /// With `completion == None` the parts still track state but report to
    /// nobody.
    #[must_use]
    pub fn split(completion: Option<Completion>) -> [Completion; N] {
        let shared = Rc::new(RefCell::new((
            Self {
                done: [false; N],
                interrupted: false,
            },
            completion,
        )));
        core::array::from_fn(|part| {
            let shared = shared.clone();
            Box::new(move |finished: bool| {
                let fire = {
                    let mut guard = shared.borrow_mut();
                    let (state, completion) = &mut *guard;
                    state
                        .report(part, finished)
                        .and_then(|ok| Some((completion.take()?, ok)))
                };
                if let Some((completion, ok)) = fire {
                    completion(ok);
                }
            }) as Completion
        })
    }

    /// Records one part. Returns the aggregate result once every part is in.
    fn report(&mut self, part: usize, finished: bool) -> Option<bool> {
        if self.done[part] {
            return None;
        }
        self.done[part] = true;
        self.interrupted |= !finished;
        self.done.iter().all(|d| *d).then_some(!self.interrupted)
    }
}

/// Starts `spec` unless it would be a no-op, in which case `done` reports
/// success synchronously.
pub(crate) fn start_or_skip<D: AnimationDriver>(
    scene: &mut Scene<D>,
    spec: AnimationSpec,
    force: bool,
    done: Completion,
) {
    if !force && spec.from.approx_eq(spec.to) {
        done(true);
    } else {
        scene.driver.start(spec, Some(done));
    }
}

/// Animates a frame change as concurrent position and size animations.
///
/// The element's model must already hold `to`; only the visual interpolation
/// is started here.
pub(crate) fn animate_frame<D: AnimationDriver>(
    scene: &mut Scene<D>,
    element: ElementId,
    from: Rect,
    to: Rect,
    duration: f64,
    timing: TimingFunction,
    force: bool,
    completion: Option<Completion>,
) {
    if !force && crate::float::rect_approx_eq(from, to) {
        complete(completion, true);
        return;
    }

    let [position_done, bounds_done] = CompoundCompletion::<2>::split(completion);
    let origin = scene.store.bounds(element).origin();

    start_or_skip(
        scene,
        AnimationSpec::new(
            element,
            AnimatedProperty::Position,
            AnimationValue::Point(from.center()),
            AnimationValue::Point(to.center()),
            duration,
            timing,
        ),
        force,
        position_done,
    );
    start_or_skip(
        scene,
        AnimationSpec::new(
            element,
            AnimatedProperty::Bounds,
            AnimationValue::Rect(Rect::from_origin_size(origin, from.size())),
            AnimationValue::Rect(Rect::from_origin_size(origin, to.size())),
            duration,
            timing,
        ),
        force,
        bounds_done,
    );
}
