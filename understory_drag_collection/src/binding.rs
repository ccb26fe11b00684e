// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface a drag collection uses to read and mutate its host.
//!
//! A [`DomBinding`] is implemented once per host environment: the browser
//! binding in `understory_drag_collection_web`, and recording test doubles in
//! tests. The collection never touches the host in any other way.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};

/// Where a node is inserted relative to a target node.
///
/// These mirror the `insertAdjacentElement` positions that make sense for
/// sibling insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InsertPosition {
    /// Immediately before the target, as its previous sibling.
    BeforeBegin,
    /// Immediately after the target, as its next sibling.
    AfterEnd,
}

impl InsertPosition {
    /// The `insertAdjacentElement` position string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeBegin => "beforebegin",
            Self::AfterEnd => "afterend",
        }
    }
}

/// Host operations needed by a [`DragCollection`](crate::DragCollection).
///
/// All rectangles are viewport-relative, as returned by
/// `getBoundingClientRect`. Implementations are expected to be cheap handles
/// over live host state; the collection re-reads geometry whenever it
/// rebuilds its layout.
pub trait DomBinding {
    /// Handle to a host element.
    type Node: Clone + PartialEq + fmt::Debug;

    /// The collection's container element.
    fn container(&self) -> Self::Node;

    /// The draggable item elements, in document order.
    ///
    /// Indicator and spacer markers created through [`DomBinding::create_marker`]
    /// must not be reported here.
    fn item_nodes(&self) -> Vec<Self::Node>;

    /// Current viewport-relative bounds of the container.
    fn container_rect(&self) -> Rect;

    /// Current viewport-relative bounds of `node`.
    fn node_rect(&self, node: &Self::Node) -> Rect;

    /// Whether the container lays out right-to-left.
    fn is_rtl(&self) -> bool;

    /// Add a class to `node`.
    fn add_class(&mut self, node: &Self::Node, class: &str);

    /// Remove a class from `node`.
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Set an inline style property on `node`. An empty value clears it.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    /// Create a detached marker element carrying `class`, sized to `size`.
    ///
    /// Returns `None` if the host cannot create elements; the preview then
    /// goes without that marker.
    fn create_marker(&mut self, class: &str, size: Size) -> Option<Self::Node>;

    /// Move or insert `node` next to `target`.
    fn insert_adjacent(&mut self, target: &Self::Node, position: InsertPosition, node: &Self::Node);

    /// Detach `node` from the document.
    fn remove_node(&mut self, node: &Self::Node);

    /// Cancel any ripple effect running on `node`.
    fn deactivate_ripple(&mut self, node: &Self::Node);
}
