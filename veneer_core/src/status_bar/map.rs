// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass snapshots of surfaces and the pure reduction stages.
//!
//! Everything here is rebuilt from scratch on every pass and dropped
//! afterwards.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use super::overlay::{OverlayId, OverlayRegistry};
use super::style::StatusBarStyle;
use super::surface::Surface;
use crate::animation::{AnimatedProperty, AnimationDriver};
use crate::element::{ElementId, ElementStore};
use crate::float;

/// One overlay resolved for a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MappedOverlay {
    /// Style after in-call coercion.
    pub(crate) style: StatusBarStyle,
    /// Frame in root coordinates.
    pub(crate) frame: Rect,
    /// Element alpha; `1.0` for synthetic overlays.
    pub(crate) alpha: f64,
    /// The real overlay, or `None` for a synthetic one produced by merging.
    pub(crate) source: Option<OverlayId>,
}

impl MappedOverlay {
    pub(crate) fn at_origin(&self) -> bool {
        float::is_origin(self.frame.origin())
    }
}

/// One surface resolved for a pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MappedSurface {
    pub(crate) overlays: Vec<MappedOverlay>,
}

impl MappedSurface {
    pub(crate) fn has_hide(&self) -> bool {
        self.overlays.iter().any(|o| o.style == StatusBarStyle::Hide)
    }
}

/// Resolves every non-`Ignore` overlay of `surface`.
pub(crate) fn map_surface(
    store: &ElementStore,
    registry: &OverlayRegistry,
    surface: &Surface,
    in_call: bool,
) -> MappedSurface {
    let overlays = surface
        .overlays
        .iter()
        .filter(|&&id| registry.style(id) != StatusBarStyle::Ignore)
        .map(|&id| {
            let element = registry.element(id);
            MappedOverlay {
                style: registry.style(id).resolved(in_call),
                frame: store.absolute_frame(element),
                alpha: store.alpha(element),
                source: Some(id),
            }
        })
        .collect();
    MappedSurface { overlays }
}

/// Collapses a uniform run of overlays into one synthetic overlay.
///
/// A surface is uniform when it holds at least two overlays that share one
/// style (ignored while in call), one frame y, and one alpha. Surfaces holding
/// a `Hide` overlay, or whose overlays sit off the origin, are returned
/// untouched.
pub(crate) fn optimize_surface(
    surface: MappedSurface,
    status_bar_size: Size,
    in_call: bool,
) -> MappedSurface {
    if surface.overlays.len() < 2 || surface.has_hide() {
        return surface;
    }
    let uniform = surface.overlays.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        (in_call || a.style == b.style)
            && float::approx_eq(a.frame.y0, b.frame.y0)
            && float::approx_eq(a.alpha, b.alpha)
    });
    let first = surface.overlays[0];
    if !uniform || !first.at_origin() {
        return surface;
    }
    MappedSurface {
        overlays: vec![MappedOverlay {
            style: if in_call {
                StatusBarStyle::White
            } else {
                first.style
            },
            frame: Rect::from_origin_size(Point::ZERO, status_bar_size),
            alpha: 1.0,
            source: None,
        }],
    }
}

/// Returns whether `element` has a position or opacity animation attached.
pub(crate) fn has_position_or_opacity_animation<D: AnimationDriver>(
    driver: &D,
    element: ElementId,
) -> bool {
    driver.is_running(element, AnimatedProperty::Position)
        || driver.is_running(element, AnimatedProperty::Opacity)
}

/// Collapses every surface into the topmost origin overlay when all origin
/// overlays look the same.
///
/// Bails out when the first surface holds a `Hide` overlay, when origin
/// overlays disagree on style or alpha, or when no real origin overlay is
/// free of position and opacity animations. Returns whether it collapsed.
pub(crate) fn reduce_global<D: AnimationDriver>(
    surfaces: &mut Vec<MappedSurface>,
    registry: &OverlayRegistry,
    driver: &D,
) -> bool {
    if surfaces.first().is_some_and(MappedSurface::has_hide) {
        return false;
    }

    let mut shared: Option<(StatusBarStyle, f64)> = None;
    for overlay in surfaces.iter().flat_map(|s| &s.overlays) {
        if !overlay.at_origin() {
            continue;
        }
        match shared {
            None => shared = Some((overlay.style, overlay.alpha)),
            Some((style, alpha)) => {
                if style != overlay.style || !float::approx_eq(alpha, overlay.alpha) {
                    return false;
                }
            }
        }
    }

    // Offset animations are not consulted here; visibility resolution does.
    let survivor = surfaces.iter().flat_map(|s| &s.overlays).find(|o| {
        o.at_origin()
            && o.source.is_some_and(|id| {
                !has_position_or_opacity_animation(driver, registry.element(id))
            })
    });
    match survivor.copied() {
        Some(overlay) => {
            *surfaces = vec![MappedSurface {
                overlays: vec![overlay],
            }];
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::manual::ManualDriver;
    use crate::scene::Scene;
    use crate::transition::{Curve, Transition};

    fn mapped(style: StatusBarStyle, y: f64, alpha: f64, source: u32) -> MappedOverlay {
        MappedOverlay {
            style,
            frame: Rect::new(0.0, y, 320.0, y + 20.0),
            alpha,
            source: Some(OverlayId(source)),
        }
    }

    const SIZE: Size = Size::new(320.0, 20.0);

    #[test]
    fn uniform_run_collapses_to_one_synthetic_overlay() {
        let surface = MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, 0),
                mapped(StatusBarStyle::Black, 0.0 + f64::EPSILON / 2.0, 1.0, 1),
                mapped(StatusBarStyle::Black, 0.0, 1.0, 2),
            ],
        };
        let optimized = optimize_surface(surface, SIZE, false);
        assert_eq!(optimized.overlays.len(), 1);
        let synthetic = optimized.overlays[0];
        assert_eq!(synthetic.source, None);
        assert_eq!(synthetic.frame, Rect::new(0.0, 0.0, 320.0, 20.0));
        assert_eq!(synthetic.style, StatusBarStyle::Black);
    }

    #[test]
    fn hide_prevents_collapse() {
        let surface = MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, 0),
                mapped(StatusBarStyle::Hide, 0.0, 1.0, 1),
                mapped(StatusBarStyle::Black, 0.0, 1.0, 2),
            ],
        };
        assert_eq!(optimize_surface(surface, SIZE, false).overlays.len(), 3);
    }

    #[test]
    fn differing_alpha_or_y_prevents_collapse() {
        let alpha = MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, 0),
                mapped(StatusBarStyle::Black, 0.0, 0.5, 1),
            ],
        };
        assert_eq!(optimize_surface(alpha, SIZE, false).overlays.len(), 2);

        let y = MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, 0),
                mapped(StatusBarStyle::Black, 1.0, 1.0, 1),
            ],
        };
        assert_eq!(optimize_surface(y, SIZE, false).overlays.len(), 2);
    }

    #[test]
    fn off_origin_run_stays_real() {
        let surface = MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::White, 40.0, 1.0, 0),
                mapped(StatusBarStyle::White, 40.0, 1.0, 1),
            ],
        };
        let optimized = optimize_surface(surface, SIZE, false);
        assert_eq!(optimized.overlays.len(), 2);
        assert!(optimized.overlays.iter().all(|o| o.source.is_some()));
    }

    #[test]
    fn in_call_ignores_style_and_forces_white() {
        let surface = MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, 0),
                mapped(StatusBarStyle::White, 0.0, 1.0, 1),
            ],
        };
        let optimized = optimize_surface(surface, SIZE, true);
        assert_eq!(optimized.overlays.len(), 1);
        assert_eq!(optimized.overlays[0].style, StatusBarStyle::White);
    }

    #[test]
    fn map_skips_ignore_and_uses_absolute_frames() {
        let mut store = ElementStore::new();
        let root = store.create_element_with_frame(Rect::new(0.0, 100.0, 320.0, 600.0));
        let bar = store.create_element_with_frame(Rect::new(0.0, 10.0, 320.0, 30.0));
        let offset = store.create_element();
        store.add_child(root, bar);
        let ignored = store.create_element();
        let ignored_offset = store.create_element();

        let mut registry = OverlayRegistry::new();
        let a = registry.create_overlay(bar, offset, StatusBarStyle::White);
        let b = registry.create_overlay(ignored, ignored_offset, StatusBarStyle::Ignore);

        let m = map_surface(&store, &registry, &Surface::new(vec![a, b]), false);
        assert_eq!(m.overlays.len(), 1);
        assert_eq!(m.overlays[0].frame, Rect::new(0.0, 110.0, 320.0, 130.0));
        assert_eq!(m.overlays[0].source, Some(a));
    }

    fn registry_for(store: &mut ElementStore, n: usize) -> (OverlayRegistry, Vec<OverlayId>) {
        let mut registry = OverlayRegistry::new();
        let ids = (0..n)
            .map(|_| {
                let e = store.create_element_with_frame(Rect::new(0.0, 0.0, 320.0, 20.0));
                let o = store.create_element();
                registry.create_overlay(e, o, StatusBarStyle::Black)
            })
            .collect();
        (registry, ids)
    }

    #[test]
    fn reduce_collapses_matching_origin_overlays() {
        let mut scene = Scene::new(ManualDriver::default());
        let (registry, ids) = registry_for(&mut scene.store, 2);
        let mut surfaces = vec![
            MappedSurface {
                overlays: vec![mapped(StatusBarStyle::Black, 0.0, 1.0, ids[0].0)],
            },
            MappedSurface {
                overlays: vec![mapped(StatusBarStyle::Black, 0.0, 1.0, ids[1].0)],
            },
        ];
        assert!(reduce_global(&mut surfaces, &registry, &scene.driver));
        assert_eq!(surfaces.len(), 1);
        assert_eq!(surfaces[0].overlays[0].source, Some(ids[0]));
    }

    #[test]
    fn reduce_skips_animating_overlays() {
        let mut scene = Scene::new(ManualDriver::default());
        let (registry, ids) = registry_for(&mut scene.store, 2);
        Transition::animated(0.3, Curve::EaseInOut).update_alpha(
            &mut scene,
            registry.element(ids[0]),
            0.999,
            None,
        );
        let mut surfaces = vec![MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, ids[0].0),
                mapped(StatusBarStyle::Black, 0.0, 1.0, ids[1].0),
            ],
        }];
        assert!(reduce_global(&mut surfaces, &registry, &scene.driver));
        assert_eq!(surfaces[0].overlays[0].source, Some(ids[1]));
    }

    #[test]
    fn reduce_aborts_on_mismatch_or_leading_hide() {
        let mut scene = Scene::new(ManualDriver::default());
        let (registry, ids) = registry_for(&mut scene.store, 2);
        let mut mismatch = vec![MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Black, 0.0, 1.0, ids[0].0),
                mapped(StatusBarStyle::White, 0.0, 1.0, ids[1].0),
            ],
        }];
        assert!(!reduce_global(&mut mismatch, &registry, &scene.driver));
        assert_eq!(mismatch[0].overlays.len(), 2);

        let mut hidden = vec![MappedSurface {
            overlays: vec![
                mapped(StatusBarStyle::Hide, 40.0, 1.0, ids[0].0),
                mapped(StatusBarStyle::Black, 0.0, 1.0, ids[1].0),
            ],
        }];
        assert!(!reduce_global(&mut hidden, &registry, &scene.driver));
    }
}
