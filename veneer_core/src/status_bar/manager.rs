// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reconciliation pass.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;

use super::host::ChromeHost;
use super::map::{self, MappedSurface};
use super::overlay::{ChromeViewId, InCallNavigate, OverlayId, OverlayRegistry, OverlayUpdate};
use super::style::{ChromeStyle, StatusBarStyle};
use super::surface::Surface;
use crate::animation::{AnimatedProperty, AnimationDriver};
use crate::float;
use crate::scene::Scene;
use crate::trace::{
    ChromeAppliedEvent, OverlayUpdateEvent, OverlayUpdateKind, ReconcileBeginEvent,
    ReconcileSummary, Tracer,
};

/// Static reconciler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconcilerConfig {
    /// Size given to synthetic overlays when the host reports an empty
    /// status-bar size.
    pub status_bar_size: Size,
}

impl ReconcilerConfig {
    /// Portrait phone status bar.
    #[must_use]
    pub const fn phone() -> Self {
        Self {
            status_bar_size: Size::new(320.0, 20.0),
        }
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self::phone()
    }
}

/// The overlay bound to the host window for a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalSlot {
    /// The real overlay, or `None` for a synthetic one.
    pub overlay: Option<OverlayId>,
    /// Resolved style.
    pub style: StatusBarStyle,
    /// Window alpha to apply.
    pub alpha: f64,
    /// Window bounds-origin y to apply.
    pub offset_y: f64,
}

/// Outcome of one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcileReport {
    /// The global slot, if one was filled.
    pub global: Option<GlobalSlot>,
    /// Overlays attached to the chrome view, in attach order.
    pub visible: Vec<OverlayId>,
    /// Overlays detached from the chrome view, in detach order.
    pub detached: Vec<OverlayId>,
    /// Host chrome style after the pass.
    pub chrome_style: ChromeStyle,
}

/// Merges the surfaces of independent UI owners into one status-bar state.
///
/// Owns the [`OverlayRegistry`], the host, the current surface list and the
/// previous pass's explicitly visible overlays. Each call to
/// [`update_state`](Self::update_state) runs one synchronous pass:
///
/// 1. **Map** every non-`Ignore` overlay to its absolute frame and resolved
///    style.
/// 2. **Optimize** each surface without a `Hide` overlay by merging a
///    uniform run at the origin into one synthetic overlay.
/// 3. **Reduce** everything to the topmost origin overlay when all origin
///    overlays agree on style and alpha.
/// 4. **Resolve visibility**: the first still, opaque-enough origin overlay
///    takes the global slot; everything else that is not covered is attached
///    explicitly.
/// 5. **Detach** every overlay that held the chrome view and is no longer
///    attached, before any attach.
/// 6. **Apply** the global slot to the host, writing only what changed.
pub struct StatusBarManager<H> {
    config: ReconcilerConfig,
    host: H,
    registry: OverlayRegistry,
    surfaces: Vec<Surface>,
    previous_visible: Vec<OverlayId>,
    in_call_navigate: Option<InCallNavigate>,
    pass_index: u64,
}

impl<H: fmt::Debug> fmt::Debug for StatusBarManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusBarManager")
            .field("config", &self.config)
            .field("host", &self.host)
            .field("registry", &self.registry)
            .field("surfaces", &self.surfaces)
            .field("previous_visible", &self.previous_visible)
            .field("pass_index", &self.pass_index)
            .finish_non_exhaustive()
    }
}

impl<H: ChromeHost> StatusBarManager<H> {
    /// Creates a manager with the default configuration.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, ReconcilerConfig::default())
    }

    /// Creates a manager with an explicit configuration.
    #[must_use]
    pub fn with_config(host: H, config: ReconcilerConfig) -> Self {
        Self {
            config,
            host,
            registry: OverlayRegistry::new(),
            surfaces: Vec::new(),
            previous_visible: Vec::new(),
            in_call_navigate: None,
            pass_index: 0,
        }
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The overlay registry.
    #[must_use]
    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    /// Mutable access to the overlay registry, for creating and restyling
    /// overlays between passes.
    pub fn registry_mut(&mut self) -> &mut OverlayRegistry {
        &mut self.registry
    }

    /// Surfaces of the last pass.
    #[must_use]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Overlays explicitly attached by the last completed pass.
    #[must_use]
    pub fn visible(&self) -> &[OverlayId] {
        &self.previous_visible
    }

    /// Sets the callback handed to every overlay of the current surfaces on
    /// each pass.
    pub fn set_in_call_navigate(&mut self, navigate: Option<InCallNavigate>) {
        self.in_call_navigate = navigate;
    }

    /// Runs one reconciliation pass. See [`update_state_traced`](Self::update_state_traced).
    pub fn update_state<D: AnimationDriver>(
        &mut self,
        scene: &Scene<D>,
        surfaces: Vec<Surface>,
        force_in_call_text: Option<&str>,
        animated: bool,
    ) -> ReconcileReport {
        self.update_state_traced(
            scene,
            surfaces,
            force_in_call_text,
            animated,
            &mut Tracer::none(),
        )
    }

    /// Runs one reconciliation pass against `surfaces`, reporting to `tracer`.
    ///
    /// `force_in_call_text` is the call banner text while a call is active;
    /// it coerces styles to white and disables touches on the host window.
    ///
    /// # Panics
    ///
    /// Panics if a surface names an overlay missing from the registry, or an
    /// overlay's elements are stale.
    pub fn update_state_traced<D: AnimationDriver>(
        &mut self,
        scene: &Scene<D>,
        surfaces: Vec<Surface>,
        force_in_call_text: Option<&str>,
        animated: bool,
        tracer: &mut Tracer<'_>,
    ) -> ReconcileReport {
        let previous_surfaces = core::mem::replace(&mut self.surfaces, surfaces);
        let pass_index = self.pass_index;
        self.pass_index += 1;
        let in_call = force_in_call_text.is_some();

        tracer.reconcile_begin(&ReconcileBeginEvent {
            pass_index,
            surface_count: self.surfaces.len(),
            overlay_count: self.surfaces.iter().map(|s| s.overlays.len()).sum(),
            in_call,
            animated,
        });

        let Some(chrome_view) = self.host.chrome_view() else {
            tracer.reconcile_summary(&ReconcileSummary {
                pass_index,
                mapped: 0,
                reduced: false,
                slot_filled: false,
                visible: 0,
                detached: 0,
            });
            return ReconcileReport {
                chrome_style: self.host.chrome_style(),
                ..ReconcileReport::default()
            };
        };

        if self.host.has_window() && self.host.window_interaction_enabled() != !in_call {
            self.host.set_window_interaction_enabled(!in_call);
        }

        let status_bar_size = self.status_bar_size();
        let mut mapped: Vec<MappedSurface> = self
            .surfaces
            .iter()
            .map(|surface| {
                let m = map::map_surface(&scene.store, &self.registry, surface, in_call);
                map::optimize_surface(m, status_bar_size, in_call)
            })
            .collect();
        let reduced = map::reduce_global(&mut mapped, &self.registry, &scene.driver);
        let mapped_count = mapped.iter().map(|s| s.overlays.len()).sum();

        let (visible, global) = self.resolve_visibility(scene, &mapped);

        let mut detached = Vec::new();
        let candidates = self
            .previous_visible
            .iter()
            .chain(previous_surfaces.iter().flat_map(|s| &s.overlays))
            .chain(self.surfaces.iter().flat_map(|s| &s.overlays));
        for &id in candidates {
            if visible.contains(&id) || detached.contains(&id) || !self.registry.contains(id) {
                continue;
            }
            // Overlays that never held the chrome view have nothing to let go of.
            if self.previous_visible.contains(&id) || self.registry.chrome_view(id).is_some() {
                detached.push(id);
            }
        }
        for &id in &detached {
            self.notify(pass_index, id, None, force_in_call_text, animated, tracer);
        }

        for surface in &self.surfaces {
            for &id in &surface.overlays {
                self.registry
                    .set_in_call_navigate(id, self.in_call_navigate.clone());
            }
        }
        for &id in &visible {
            self.notify(
                pass_index,
                id,
                Some(chrome_view),
                force_in_call_text,
                animated,
                tracer,
            );
        }

        let chrome_style = self.apply_global(pass_index, global, in_call, tracer);

        tracer.reconcile_summary(&ReconcileSummary {
            pass_index,
            mapped: mapped_count,
            reduced,
            slot_filled: global.is_some(),
            visible: visible.len(),
            detached: detached.len(),
        });

        self.previous_visible.clone_from(&visible);
        ReconcileReport {
            global,
            visible,
            detached,
            chrome_style,
        }
    }

    fn status_bar_size(&self) -> Size {
        let size = self.host.status_bar_size();
        if size.width > 0.0 && size.height > 0.0 {
            size
        } else {
            self.config.status_bar_size
        }
    }

    /// Picks the global slot and the explicitly visible overlays.
    fn resolve_visibility<D: AnimationDriver>(
        &self,
        scene: &Scene<D>,
        mapped: &[MappedSurface],
    ) -> (Vec<OverlayId>, Option<GlobalSlot>) {
        let mut visible = Vec::new();
        let mut global: Option<GlobalSlot> = None;
        let mut covered = false;

        for overlay in mapped.iter().flat_map(|s| &s.overlays) {
            let Some(id) = overlay.source else {
                if !covered && overlay.at_origin() {
                    covered = true;
                    if global.is_none() {
                        global = Some(GlobalSlot {
                            overlay: None,
                            style: overlay.style,
                            alpha: 1.0,
                            offset_y: 0.0,
                        });
                    }
                }
                continue;
            };

            let offset_element = self.registry.offset_element(id);
            let still = overlay.at_origin()
                && !map::has_position_or_opacity_animation(
                    &scene.driver,
                    self.registry.element(id),
                )
                && !scene
                    .driver
                    .is_running(offset_element, AnimatedProperty::Position);
            if !still || overlay.style == StatusBarStyle::Hide {
                visible.push(id);
                continue;
            }
            if covered {
                continue;
            }

            let offset_origin = scene.store.frame(offset_element).origin();
            if float::is_origin(offset_origin) {
                covered = overlay.alpha >= 1.0;
            }
            if global.is_none() {
                global = Some(GlobalSlot {
                    overlay: Some(id),
                    style: overlay.style,
                    alpha: overlay.alpha,
                    offset_y: offset_origin.y,
                });
            } else {
                visible.push(id);
            }
        }
        (visible, global)
    }

    fn notify(
        &mut self,
        pass_index: u64,
        overlay: OverlayId,
        chrome_view: Option<ChromeViewId>,
        in_call_text: Option<&str>,
        animated: bool,
        tracer: &mut Tracer<'_>,
    ) {
        self.registry.deliver(&OverlayUpdate {
            overlay,
            chrome_view,
            in_call_text,
            animated,
        });
        tracer.overlay_update(&OverlayUpdateEvent {
            pass_index,
            overlay,
            kind: if chrome_view.is_some() {
                OverlayUpdateKind::Attach
            } else {
                OverlayUpdateKind::Detach
            },
            animated,
        });
    }

    /// Writes the global slot to the host. Returns the resulting chrome style.
    fn apply_global(
        &mut self,
        pass_index: u64,
        global: Option<GlobalSlot>,
        in_call: bool,
        tracer: &mut Tracer<'_>,
    ) -> ChromeStyle {
        let mut writes = 0_u8;
        match global {
            Some(slot) => {
                let style = ChromeStyle::for_slot(slot.style, in_call);
                if self.host.chrome_style() != style {
                    self.host.set_chrome_style(style);
                    writes += 1;
                }
                if self.host.has_window() {
                    if !float::approx_eq(self.host.window_alpha(), slot.alpha) {
                        self.host.set_window_alpha(slot.alpha);
                        writes += 1;
                    }
                    if !float::approx_eq(self.host.window_bounds_origin_y(), slot.offset_y) {
                        self.host.set_window_bounds_origin_y(slot.offset_y);
                        writes += 1;
                    }
                }
            }
            None => {
                if self.host.has_window() && !float::approx_eq(self.host.window_alpha(), 0.0) {
                    self.host.set_window_alpha(0.0);
                    writes += 1;
                }
            }
        }

        let chrome_style = self.host.chrome_style();
        let has_window = self.host.has_window();
        tracer.chrome_applied(&ChromeAppliedEvent {
            pass_index,
            overlay: global.and_then(|slot| slot.overlay),
            style: chrome_style,
            alpha: if has_window { self.host.window_alpha() } else { 0.0 },
            offset_y: if has_window {
                self.host.window_bounds_origin_y()
            } else {
                0.0
            },
            writes,
        });
        chrome_style
    }
}
