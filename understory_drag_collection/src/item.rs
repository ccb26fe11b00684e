// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single grid element participating in a drag collection.

use alloc::format;
use alloc::string::String;
use core::cmp::Ordering;

use kurbo::{Point, Rect, Vec2};

use crate::binding::DomBinding;

/// Wraps one item element with its geometry for the current layout pass.
///
/// Items are rebuilt from the host on every layout pass and carry no identity
/// across drags beyond their node handle.
#[derive(Clone, Debug)]
pub struct DraggableItem<N> {
    node: N,
    rect: Rect,
    offset: Vec2,
    is_drag_source: bool,
}

impl<N> DraggableItem<N> {
    /// Wrap `node`, whose viewport rect is `viewport_rect`, in a collection
    /// whose viewport origin is `collection_origin`.
    #[must_use]
    pub fn new(node: N, viewport_rect: Rect, collection_origin: Point, is_drag_source: bool) -> Self {
        Self {
            node,
            rect: viewport_rect - collection_origin.to_vec2(),
            offset: Vec2::ZERO,
            is_drag_source,
        }
    }

    /// The wrapped node.
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Bounds relative to the collection's origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether this is the item being dragged.
    #[must_use]
    pub fn is_drag_source(&self) -> bool {
        self.is_drag_source
    }

    /// Current horizontal visual offset.
    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.offset.x
    }

    /// Current vertical visual offset.
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset.y
    }

    /// Whether either visual offset is non-zero.
    #[must_use]
    pub fn has_offset(&self) -> bool {
        self.offset != Vec2::ZERO
    }

    /// The CSS `transform` value for the current offsets.
    ///
    /// Identity offsets produce the empty string so the stylesheet's own
    /// transform (if any) applies again.
    #[must_use]
    pub fn transform(&self) -> String {
        if self.has_offset() {
            format!("translate({}px, {}px)", self.offset.x, self.offset.y)
        } else {
            String::new()
        }
    }

    /// Whether the item occupies any area. Hidden items have a zero-size rect.
    #[must_use]
    pub fn has_size(item: &Self) -> bool {
        item.rect.width() > 0.0 && item.rect.height() > 0.0
    }

    /// Orders items top-to-bottom, then left-to-right.
    #[must_use]
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.rect
            .y0
            .total_cmp(&b.rect.y0)
            .then_with(|| a.rect.x0.total_cmp(&b.rect.x0))
    }
}

impl<N: Clone + PartialEq + core::fmt::Debug> DraggableItem<N> {
    /// Set the horizontal visual offset and apply it to the node.
    pub fn set_offset_x<B: DomBinding<Node = N>>(&mut self, binding: &mut B, x: f64) {
        self.offset.x = x;
        self.apply_transform(binding);
    }

    /// Set the vertical visual offset and apply it to the node.
    pub fn set_offset_y<B: DomBinding<Node = N>>(&mut self, binding: &mut B, y: f64) {
        self.offset.y = y;
        self.apply_transform(binding);
    }

    /// Reset both offsets, restoring an empty `transform`.
    pub fn clear_offsets<B: DomBinding<Node = N>>(&mut self, binding: &mut B) {
        self.offset = Vec2::ZERO;
        self.apply_transform(binding);
    }

    fn apply_transform<B: DomBinding<Node = N>>(&self, binding: &mut B) {
        binding.set_style(&self.node, "transform", &self.transform());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(x0: f64, y0: f64, x1: f64, y1: f64) -> DraggableItem<u32> {
        DraggableItem::new(0, Rect::new(x0, y0, x1, y1), Point::ZERO, false)
    }

    #[test]
    fn rect_is_relative_to_collection_origin() {
        let it = DraggableItem::new(
            7_u32,
            Rect::new(110.0, 220.0, 150.0, 260.0),
            Point::new(100.0, 200.0),
            true,
        );
        assert_eq!(it.rect(), Rect::new(10.0, 20.0, 50.0, 60.0));
        assert_eq!(*it.node(), 7);
        assert!(it.is_drag_source());
    }

    #[test]
    fn transform_is_empty_at_identity() {
        let mut it = item(0.0, 0.0, 10.0, 10.0);
        assert_eq!(it.transform(), "");
        it.offset = Vec2::new(4.0, -2.5);
        assert_eq!(it.transform(), "translate(4px, -2.5px)");
    }

    #[test]
    fn zero_size_items_are_hidden() {
        assert!(DraggableItem::has_size(&item(0.0, 0.0, 10.0, 10.0)));
        assert!(!DraggableItem::has_size(&item(5.0, 5.0, 5.0, 10.0)));
        assert!(!DraggableItem::has_size(&item(5.0, 5.0, 10.0, 5.0)));
    }

    #[test]
    fn compare_orders_top_then_left() {
        let a = item(50.0, 0.0, 60.0, 10.0);
        let b = item(0.0, 20.0, 10.0, 30.0);
        let c = item(0.0, 0.0, 10.0, 10.0);
        assert_eq!(DraggableItem::compare(&a, &b), Ordering::Less);
        assert_eq!(DraggableItem::compare(&c, &a), Ordering::Less);
        assert_eq!(DraggableItem::compare(&a, &a), Ordering::Equal);
    }
}
