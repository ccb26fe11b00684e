// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DomBinding`] over live `web_sys` elements.

use kurbo::{Point, Rect, Size};
use understory_drag_collection::{DomBinding, InsertPosition};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::AttachError;

/// Ripple classes that keep an `mdc-ripple` surface lit.
const RIPPLE_ACTIVE_CLASSES: [&str; 2] = [
    "mdc-ripple-upgraded--foreground-activation",
    "mdc-ripple-upgraded--background-focused",
];

/// Browser host for a drag collection.
///
/// Items are the elements under the container matching the item selector, in
/// document order. Markers are plain `<div>`s sized with inline styles.
#[derive(Clone, Debug)]
pub struct WebBinding {
    window: Window,
    document: Document,
    container: HtmlElement,
    item_selector: String,
}

impl WebBinding {
    /// Bind to `container`, whose items match `item_selector`.
    pub fn new(container: HtmlElement, item_selector: impl Into<String>) -> Result<Self, AttachError> {
        let window = web_sys::window().ok_or(AttachError::NoWindow)?;
        let document = window.document().ok_or(AttachError::NoDocument)?;
        Ok(Self {
            window,
            document,
            container,
            item_selector: item_selector.into(),
        })
    }

    /// The container element.
    #[must_use]
    pub fn container_element(&self) -> &HtmlElement {
        &self.container
    }

    /// The item selector.
    #[must_use]
    pub fn item_selector(&self) -> &str {
        &self.item_selector
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    /// The item an event target belongs to, if it lies inside this container.
    #[must_use]
    pub fn item_for_target(&self, target: &EventTarget) -> Option<Element> {
        let element = target.dyn_ref::<Element>()?;
        let item = element.closest(&self.item_selector).ok().flatten()?;
        self.container.contains(Some(item.as_ref())).then_some(item)
    }

    /// Set or clear `aria-grabbed` on `node`.
    pub fn set_grabbed(&self, node: &Element, grabbed: bool) {
        let result = if grabbed {
            node.set_attribute("aria-grabbed", "true")
        } else {
            node.remove_attribute("aria-grabbed")
        };
        warn_on_err(result, "aria-grabbed update");
    }

    /// Set the container's CSS `touch-action`; an empty value is skipped.
    pub(crate) fn set_touch_action(&self, touch_action: &str) {
        if touch_action.is_empty() {
            return;
        }
        let result = self
            .container
            .style()
            .set_property("touch-action", touch_action);
        warn_on_err(result, "touch-action update");
    }

    /// Route the rest of pointer `pointer_id`'s events to `item`.
    pub(crate) fn capture_pointer(&self, item: &Element, pointer_id: i32) {
        warn_on_err(item.set_pointer_capture(pointer_id), "pointer capture");
    }
}

fn warn_on_err<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::from_origin_size(Point::new(r.x(), r.y()), Size::new(r.width(), r.height()))
}

impl DomBinding for WebBinding {
    type Node = Element;

    fn container(&self) -> Element {
        self.container.clone().into()
    }

    fn item_nodes(&self) -> Vec<Element> {
        let list = match self.container.query_selector_all(&self.item_selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("invalid item selector {:?}: {err:?}", self.item_selector);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn container_rect(&self) -> Rect {
        client_rect(&self.container)
    }

    fn node_rect(&self, node: &Element) -> Rect {
        client_rect(node)
    }

    fn is_rtl(&self) -> bool {
        self.window
            .get_computed_style(&self.container)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("direction").ok())
            .is_some_and(|direction| direction == "rtl")
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        warn_on_err(node.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        warn_on_err(node.class_list().remove_1(class), "classList.remove");
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        let Some(node) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        warn_on_err(node.style().set_property(property, value), "style update");
    }

    fn create_marker(&mut self, class: &str, size: Size) -> Option<Element> {
        let marker = match self.document.create_element("div") {
            Ok(marker) => marker,
            Err(err) => {
                log::warn!("could not create marker: {err:?}");
                return None;
            }
        };
        marker.set_class_name(class);
        self.set_style(&marker, "width", &format!("{}px", size.width));
        self.set_style(&marker, "height", &format!("{}px", size.height));
        Some(marker)
    }

    fn insert_adjacent(&mut self, target: &Element, position: InsertPosition, node: &Element) {
        warn_on_err(
            target.insert_adjacent_element(position.as_str(), node),
            "insertAdjacentElement",
        );
    }

    fn remove_node(&mut self, node: &Element) {
        node.remove();
    }

    fn deactivate_ripple(&mut self, node: &Element) {
        for class in RIPPLE_ACTIVE_CLASSES {
            self.remove_class(node, class);
        }
    }
}
