// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::color::Color;
use super::id::{ElementId, INVALID};
use super::traverse::Children;
use crate::dirty;
use crate::transform::Transform3d;

/// Struct-of-arrays storage for all elements.
///
/// Elements are addressed by [`ElementId`] handles. Destroyed elements are
/// recycled via a free list, and generation counters make stale handles fail
/// validation.
///
/// Geometry follows the usual view model: `position` is the element's centre
/// in its parent's coordinate space, `bounds` is the element's own coordinate
/// space (its origin scrolls the content), and the frame is derived from the
/// two. The transform does not participate in frame computation.
#[derive(Debug)]
pub struct ElementStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Model properties --
    pub(crate) position: Vec<Point>,
    pub(crate) bounds: Vec<Rect>,
    pub(crate) alpha: Vec<f64>,
    pub(crate) background: Vec<Option<Color>>,
    pub(crate) transform: Vec<Transform3d>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) topology_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Creates an empty element store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            position: Vec::new(),
            bounds: Vec::new(),
            alpha: Vec::new(),
            background: Vec::new(),
            transform: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            topology_dirty: false,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new element and returns its handle.
    ///
    /// The element starts at the origin with zero-sized bounds, full alpha,
    /// no background, an identity transform, and no parent.
    pub fn create_element(&mut self) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.position[i] = Point::ZERO;
            self.bounds[i] = Rect::ZERO;
            self.alpha[i] = 1.0;
            self.background[i] = None;
            self.transform[i] = Transform3d::IDENTITY;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.position.push(Point::ZERO);
            self.bounds.push(Rect::ZERO);
            self.alpha.push(1.0);
            self.background.push(None);
            self.transform.push(Transform3d::IDENTITY);
            self.generation.push(0);
            idx
        };

        self.topology_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a new element with the given frame.
    pub fn create_element_with_frame(&mut self, frame: Rect) -> ElementId {
        let id = self.create_element();
        self.set_frame(id, frame);
        id
    }

    /// Destroys an element, freeing its slot for reuse.
    ///
    /// Running animations are not touched; call
    /// [`AnimationDriver::remove_all`](crate::animation::AnimationDriver::remove_all)
    /// first (or use [`Scene::destroy_element`](crate::scene::Scene::destroy_element)).
    ///
    /// # Panics
    ///
    /// Panics if the element has children or if the handle is stale.
    pub fn destroy_element(&mut self, id: ElementId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy element with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        self.dirty.remove_key(idx);
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.topology_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the frontmost child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // A child's absolute geometry depends on its parent's.
        let _ = self.dirty.add_dependency(c, p, dirty::GEOMETRY);

        self.dirty.mark_with(c, dirty::GEOMETRY, &EagerPolicy);
        self.topology_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the element has no parent.
    pub fn remove_from_parent(&mut self, child: ElementId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "element has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::GEOMETRY);

        self.dirty.mark_with(c, dirty::GEOMETRY, &EagerPolicy);
        self.topology_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of an element, if any.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(ElementId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Returns an iterator over the direct children of an element.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    // -- Property getters --

    /// Returns the model position (centre point in the parent's space).
    #[must_use]
    pub fn position(&self, id: ElementId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns the model bounds.
    #[must_use]
    pub fn bounds(&self, id: ElementId) -> Rect {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns the frame in the parent's coordinate space, derived from
    /// position and bounds size.
    #[must_use]
    pub fn frame(&self, id: ElementId) -> Rect {
        self.validate(id);
        self.frame_at(id.idx)
    }

    /// Returns the model alpha.
    #[must_use]
    pub fn alpha(&self, id: ElementId) -> f64 {
        self.validate(id);
        self.alpha[id.idx as usize]
    }

    /// Returns the background color, if one has been set.
    #[must_use]
    pub fn background(&self, id: ElementId) -> Option<Color> {
        self.validate(id);
        self.background[id.idx as usize]
    }

    /// Returns the model transform.
    #[must_use]
    pub fn transform(&self, id: ElementId) -> Transform3d {
        self.validate(id);
        self.transform[id.idx as usize]
    }

    /// Returns the uniform scale factor encoded in the model transform.
    #[must_use]
    pub fn uniform_scale(&self, id: ElementId) -> f64 {
        self.transform(id).uniform_scale()
    }

    /// Converts the element's local origin into root coordinates.
    ///
    /// Walks the ancestor chain, applying `p - bounds.origin + frame.origin`
    /// at each level. Parentless elements are treated as living directly in
    /// root (window) coordinates.
    #[must_use]
    pub fn absolute_origin(&self, id: ElementId) -> Point {
        self.validate(id);
        let mut point = Point::ZERO;
        let mut idx = id.idx;
        loop {
            let bounds_origin = self.bounds[idx as usize].origin();
            let frame_origin = self.frame_at(idx).origin();
            point = point - bounds_origin.to_vec2() + frame_origin.to_vec2();
            let p = self.parent[idx as usize];
            if p == INVALID {
                return point;
            }
            idx = p;
        }
    }

    /// Returns the element's frame expressed in root coordinates.
    #[must_use]
    pub fn absolute_frame(&self, id: ElementId) -> Rect {
        let origin = self.absolute_origin(id);
        Rect::from_origin_size(origin, self.bounds[id.idx as usize].size())
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the model position.
    pub fn set_position(&mut self, id: ElementId, position: Point) {
        self.validate(id);
        self.position[id.idx as usize] = position;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets the model bounds.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        self.validate(id);
        self.bounds[id.idx as usize] = bounds;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets the frame: position becomes the frame's centre and the bounds
    /// take the frame's size while keeping their origin.
    pub fn set_frame(&mut self, id: ElementId, frame: Rect) {
        self.validate(id);
        let i = id.idx as usize;
        self.position[i] = frame.center();
        self.bounds[i] = Rect::from_origin_size(self.bounds[i].origin(), frame.size());
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets the model alpha.
    pub fn set_alpha(&mut self, id: ElementId, alpha: f64) {
        self.validate(id);
        self.alpha[id.idx as usize] = alpha;
        self.dirty.mark(id.idx, dirty::OPACITY);
    }

    /// Sets (or clears) the background color.
    pub fn set_background(&mut self, id: ElementId, color: Option<Color>) {
        self.validate(id);
        self.background[id.idx as usize] = color;
        self.dirty.mark(id.idx, dirty::BACKGROUND);
    }

    /// Sets the model transform.
    pub fn set_transform(&mut self, id: ElementId, transform: Transform3d) {
        self.validate(id);
        self.transform[id.idx as usize] = transform;
        self.dirty.mark(id.idx, dirty::TRANSFORM);
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `ElementChanges`) and skip
    // generation validation.

    /// Returns the frame at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn frame_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        let size = self.bounds[idx as usize].size();
        Rect::from_origin_size(
            self.position[idx as usize] - size.to_vec2() * 0.5,
            size,
        )
    }

    /// Returns the bounds at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn bounds_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        self.bounds[idx as usize]
    }

    /// Returns the alpha at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn alpha_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.alpha[idx as usize]
    }

    /// Returns the background color at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn background_at(&self, idx: u32) -> Option<Color> {
        self.check_slot(idx);
        self.background[idx as usize]
    }

    /// Returns the transform at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn transform_at(&self, idx: u32) -> Transform3d {
        self.check_slot(idx);
        self.transform[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: ElementId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ElementId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
