// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay identity and registry.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;

use super::style::StatusBarStyle;
use crate::element::ElementId;

/// Stable identity of an overlay, assigned at creation and never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub u32);

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({})", self.0)
    }
}

/// Identity of the host's shared chrome view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChromeViewId(pub u32);

/// One attach or detach notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayUpdate<'a> {
    /// Notified overlay.
    pub overlay: OverlayId,
    /// The chrome view to display, or `None` to let go of it.
    pub chrome_view: Option<ChromeViewId>,
    /// In-call override text, if a call banner is active.
    pub in_call_text: Option<&'a str>,
    /// Whether the overlay should animate the change.
    pub animated: bool,
}

/// Receives attach and detach notifications for one overlay, typically to
/// slide or fade itself in or out.
pub trait OverlayListener {
    /// Called for every notification addressed to the overlay.
    fn update_state(&mut self, update: &OverlayUpdate<'_>);
}

/// Callback invoked when the user taps the in-call banner.
pub type InCallNavigate = Rc<dyn Fn()>;

struct OverlayRecord {
    element: ElementId,
    offset_element: ElementId,
    style: StatusBarStyle,
    chrome_view: Option<ChromeViewId>,
    in_call_text: Option<String>,
    in_call_navigate: Option<InCallNavigate>,
    listener: Option<Box<dyn OverlayListener>>,
}

impl fmt::Debug for OverlayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayRecord")
            .field("element", &self.element)
            .field("offset_element", &self.offset_element)
            .field("style", &self.style)
            .field("chrome_view", &self.chrome_view)
            .field("in_call_text", &self.in_call_text)
            .finish_non_exhaustive()
    }
}

/// Owns every overlay's descriptor.
///
/// An overlay is backed by two elements: the overlay element itself, whose
/// absolute frame and alpha are reconciled, and an offset element inside it
/// that the overlay slides for in/out effects.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    records: HashMap<OverlayId, OverlayRecord>,
    next_id: u32,
}

impl OverlayRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new overlay.
    pub fn create_overlay(
        &mut self,
        element: ElementId,
        offset_element: ElementId,
        style: StatusBarStyle,
    ) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.records.insert(
            id,
            OverlayRecord {
                element,
                offset_element,
                style,
                chrome_view: None,
                in_call_text: None,
                in_call_navigate: None,
                listener: None,
            },
        );
        id
    }

    /// Unregisters an overlay. Returns whether it existed.
    pub fn remove_overlay(&mut self, id: OverlayId) -> bool {
        self.records.remove(&id).is_some()
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: OverlayId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of registered overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no overlays are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The overlay's own element.
    #[must_use]
    pub fn element(&self, id: OverlayId) -> ElementId {
        self.record(id).element
    }

    /// The element the overlay slides for in/out effects.
    #[must_use]
    pub fn offset_element(&self, id: OverlayId) -> ElementId {
        self.record(id).offset_element
    }

    /// Requested style.
    #[must_use]
    pub fn style(&self, id: OverlayId) -> StatusBarStyle {
        self.record(id).style
    }

    /// Changes the requested style. Takes effect on the next pass.
    pub fn set_style(&mut self, id: OverlayId, style: StatusBarStyle) {
        self.record_mut(id).style = style;
    }

    /// The chrome view the overlay currently displays, if any.
    #[must_use]
    pub fn chrome_view(&self, id: OverlayId) -> Option<ChromeViewId> {
        self.record(id).chrome_view
    }

    /// The last in-call text delivered to the overlay.
    #[must_use]
    pub fn in_call_text(&self, id: OverlayId) -> Option<&str> {
        self.record(id).in_call_text.as_deref()
    }

    /// The in-call navigation callback last handed to the overlay.
    #[must_use]
    pub fn in_call_navigate(&self, id: OverlayId) -> Option<InCallNavigate> {
        self.record(id).in_call_navigate.clone()
    }

    /// Installs the listener that receives the overlay's notifications.
    pub fn set_listener(&mut self, id: OverlayId, listener: impl OverlayListener + 'static) {
        self.record_mut(id).listener = Some(Box::new(listener));
    }

    pub(crate) fn set_in_call_navigate(&mut self, id: OverlayId, navigate: Option<InCallNavigate>) {
        self.record_mut(id).in_call_navigate = navigate;
    }

    /// Records the notification on the overlay and forwards it to its
    /// listener.
    pub(crate) fn deliver(&mut self, update: &OverlayUpdate<'_>) {
        let record = self.record_mut(update.overlay);
        record.chrome_view = update.chrome_view;
        if record.in_call_text.as_deref() != update.in_call_text {
            record.in_call_text = update.in_call_text.map(String::from);
        }
        if let Some(listener) = &mut record.listener {
            listener.update_state(update);
        }
    }

    fn record(&self, id: OverlayId) -> &OverlayRecord {
        match self.records.get(&id) {
            Some(record) => record,
            None => panic!("unknown OverlayId: {id:?}"),
        }
    }

    fn record_mut(&mut self, id: OverlayId) -> &mut OverlayRecord {
        match self.records.get_mut(&id) {
            Some(record) => record,
            None => panic!("unknown OverlayId: {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;
    use crate::element::ElementStore;

    fn registry_with_one() -> (OverlayRegistry, OverlayId) {
        let mut store = ElementStore::new();
        let element = store.create_element();
        let offset = store.create_element();
        let mut registry = OverlayRegistry::new();
        let id = registry.create_overlay(element, offset, StatusBarStyle::White);
        (registry, id)
    }

    #[test]
    fn ids_are_stable_and_never_reused() {
        let (mut registry, a) = registry_with_one();
        let element = registry.element(a);
        let offset = registry.offset_element(a);
        assert!(registry.remove_overlay(a));
        let b = registry.create_overlay(element, offset, StatusBarStyle::Black);
        assert_ne!(a, b);
        assert!(!registry.contains(a));
        assert!(registry.contains(b));
    }

    #[test]
    fn deliver_records_state_and_notifies_listener() {
        let (mut registry, id) = registry_with_one();
        struct Recorder(Rc<RefCell<Vec<Option<ChromeViewId>>>>);
        impl OverlayListener for Recorder {
            fn update_state(&mut self, update: &OverlayUpdate<'_>) {
                self.0.borrow_mut().push(update.chrome_view);
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        registry.set_listener(id, Recorder(seen.clone()));

        registry.deliver(&OverlayUpdate {
            overlay: id,
            chrome_view: Some(ChromeViewId(7)),
            in_call_text: Some("Return to call"),
            animated: true,
        });
        assert_eq!(registry.chrome_view(id), Some(ChromeViewId(7)));
        assert_eq!(registry.in_call_text(id), Some("Return to call"));

        registry.deliver(&OverlayUpdate {
            overlay: id,
            chrome_view: None,
            in_call_text: None,
            animated: false,
        });
        assert_eq!(registry.chrome_view(id), None);
        assert_eq!(registry.in_call_text(id), None);
        assert_eq!(*seen.borrow(), [Some(ChromeViewId(7)), None]);
    }

    #[test]
    #[should_panic(expected = "unknown OverlayId")]
    fn unknown_overlay_panics() {
        let (mut registry, id) = registry_with_one();
        registry.remove_overlay(id);
        let _ = registry.style(id);
    }
}
