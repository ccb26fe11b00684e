// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate insertion slots and their hit-testing geometry.
//!
//! Every visible item gets a [`Side::Before`] zone. The last item of each row
//! (multi-column mode) or of the whole collection (single-column mode) also
//! gets a [`Side::After`] zone so items can be appended.
//!
//! Sides are visual: in multi-column mode `Before` is the left edge and
//! `After` the right edge, regardless of writing direction; in single-column
//! mode they are the top and bottom edges. [`DropZone::insert_position`] maps
//! the visual side onto document order.
//!
//! A zone's rectangle spans from the middle of the neighbouring item to the
//! middle of its own item along the drop axis, and extends half an alley past
//! the item on the cross axis. All edges are inclusive.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::binding::{DomBinding, InsertPosition};
use crate::layout::{GridPosition, Layout};

/// Which edge of its item a zone sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left edge (multi-column) or top edge (single-column).
    Before,
    /// Right edge (multi-column) or bottom edge (single-column).
    After,
}

/// A candidate insertion slot next to one item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DropZone {
    item: usize,
    position: GridPosition,
    side: Side,
    rect: Rect,
}

impl DropZone {
    /// Compute every drop zone for `layout`, in row-major visual order.
    #[must_use]
    pub fn build_all<N>(layout: &Layout<N>) -> Vec<Self> {
        let multi = layout.is_multi_column_mode();
        let mut zones = Vec::with_capacity(layout.items().len() + layout.rows().len());
        for (row, members) in layout.rows().iter().enumerate() {
            for (col, &item) in members.iter().enumerate() {
                let position = GridPosition { row, col };
                zones.push(Self::new(layout, item, position, Side::Before));
                if multi && col + 1 == members.len() {
                    zones.push(Self::new(layout, item, position, Side::After));
                }
            }
        }
        if !multi {
            if let Some(last_row) = layout.rows().len().checked_sub(1) {
                let members = &layout.rows()[last_row];
                let col = members.len() - 1;
                let position = GridPosition { row: last_row, col };
                zones.push(Self::new(layout, members[col], position, Side::After));
            }
        }
        zones
    }

    fn new<N>(layout: &Layout<N>, item: usize, position: GridPosition, side: Side) -> Self {
        let r = layout.items()[item].rect();
        let ra = layout.row_alley();
        let ca = layout.col_alley();
        let rect = if layout.is_multi_column_mode() {
            let half_w = r.width() / 2.0;
            let (x0, x1) = match side {
                Side::Before => (r.x0 - ca - half_w, r.x0 + half_w),
                Side::After => (r.x1 - half_w, r.x1 + ca + half_w),
            };
            Rect::new(x0, r.y0 - ra / 2.0, x1, r.y1 + ra / 2.0)
        } else {
            let half_h = r.height() / 2.0;
            let (y0, y1) = match side {
                Side::Before => (r.y0 - ra - half_h, r.y0 + half_h),
                Side::After => (r.y1 - half_h, r.y1 + ra + half_h),
            };
            Rect::new(r.x0 - ca / 2.0, y0, r.x1 + ca / 2.0, y1)
        };
        Self {
            item,
            position,
            side,
            rect,
        }
    }

    /// Index of the associated item in [`Layout::items`].
    #[must_use]
    pub fn item(&self) -> usize {
        self.item
    }

    /// Grid position of the associated item.
    #[must_use]
    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Which edge of the item this zone represents.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Hit rectangle relative to the collection origin, tolerance included.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Inclusive containment test for a collection-relative point.
    #[must_use]
    pub fn contains(&self, local: Point) -> bool {
        let r = self.rect;
        local.x >= r.x0 && local.x <= r.x1 && local.y >= r.y0 && local.y <= r.y1
    }

    /// Test a viewport point against this zone.
    ///
    /// The container's viewport rect is re-read on every call so the result
    /// stays correct after scrolling.
    #[must_use]
    pub fn intersects_viewport_point<B: DomBinding>(&self, binding: &B, point: Point) -> bool {
        let origin = binding.container_rect().origin();
        self.contains(point - origin.to_vec2())
    }

    /// Document position of an insertion into this zone, relative to its item.
    #[must_use]
    pub fn insert_position<N>(&self, layout: &Layout<N>) -> InsertPosition {
        let mirrored = layout.is_multi_column_mode() && layout.is_rtl();
        match (self.side, mirrored) {
            (Side::Before, false) | (Side::After, true) => InsertPosition::BeforeBegin,
            (Side::After, false) | (Side::Before, true) => InsertPosition::AfterEnd,
        }
    }

    /// Whether dropping the drag source here would leave the order unchanged.
    ///
    /// Either side of the source itself is always degenerate. Otherwise the
    /// zone is degenerate when its insertion point touches the source in
    /// document order: inserting before the source's successor or after its
    /// predecessor. [`Layout::dom_next`] and [`Layout::dom_prev`] resolve those
    /// through the same-row neighbour, the row wrap to the next or previous
    /// row, and their right-to-left mirror images.
    #[must_use]
    pub fn is_adjacent_to_drag_source<N>(&self, layout: &Layout<N>) -> bool {
        let Some(source) = layout.drag_source_position() else {
            return false;
        };
        if self.position == source {
            return true;
        }
        let neighbour = match self.insert_position(layout) {
            InsertPosition::BeforeBegin => layout.dom_next(source),
            InsertPosition::AfterEnd => layout.dom_prev(source),
        };
        neighbour == Some(self.position)
    }

    /// Whether an insertion here lands at the document start of a row after
    /// the first, where an in-flow indicator could wrap back onto the row
    /// above. Only multi-column layouts have such boundaries.
    ///
    /// A zone whose row is missing from `layout`, e.g. one kept from an
    /// earlier pass, is never a row start.
    #[must_use]
    pub fn is_row_start<N>(&self, layout: &Layout<N>) -> bool {
        if !layout.is_multi_column_mode() || self.position.row == 0 {
            return false;
        }
        let Some(row) = layout.rows().get(self.position.row) else {
            return false;
        };
        match (layout.is_rtl(), self.side) {
            (false, Side::Before) => self.position.col == 0,
            (true, Side::After) => self.position.col + 1 == row.len(),
            _ => false,
        }
    }

    /// The items visually on either side of this zone's insertion line, as
    /// `(leading, trailing)` item indices.
    #[must_use]
    pub fn neighbours<N>(&self, layout: &Layout<N>) -> (Option<usize>, Option<usize>) {
        let here = Some(self.item);
        let previous = if layout.is_multi_column_mode() {
            self.position
                .col
                .checked_sub(1)
                .and_then(|col| layout.item_at(GridPosition { col, ..self.position }))
        } else {
            self.position
                .row
                .checked_sub(1)
                .and_then(|row| layout.item_at(GridPosition { row, col: 0 }))
        };
        match self.side {
            Side::Before => (previous, here),
            Side::After => (here, None),
        }
    }
}
