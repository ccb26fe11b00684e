// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row bucketing and gutter measurement for one layout pass.
//!
//! A [`Layout`] is derived entirely from item rectangles: visible items are
//! sorted top-then-left, grouped into rows by shared top offset, and the
//! alleys (gutters) between the first rows and columns are measured. Rows are
//! always in visual order, so in a right-to-left container column 0 is the
//! leftmost item and the *last* item in document order for its row.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::item::DraggableItem;

/// Indices into [`Layout::items`] making up one visual row, left to right.
pub type Row = SmallVec<[usize; 8]>;

/// Inline writing direction of the collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Visual row and column of an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index within the row, left to right.
    pub col: usize,
}

impl GridPosition {
    /// Shorthand constructor.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Geometry derived from one scan of the collection.
#[derive(Clone, Debug)]
pub struct Layout<N> {
    items: Vec<DraggableItem<N>>,
    rows: Vec<Row>,
    container_size: Size,
    direction: Direction,
    row_alley: f64,
    col_alley: f64,
    trailing_slack: f64,
}

impl<N> Default for Layout<N> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rows: Vec::new(),
            container_size: Size::ZERO,
            direction: Direction::Ltr,
            row_alley: 0.0,
            col_alley: 0.0,
            trailing_slack: 0.0,
        }
    }
}

impl<N> Layout<N> {
    /// Build a layout from freshly scanned items.
    ///
    /// Hidden (zero-size) items are dropped. `row_tolerance` bounds how far
    /// apart two top offsets may be while still sharing a row.
    #[must_use]
    pub fn new(
        items: impl IntoIterator<Item = DraggableItem<N>>,
        container_size: Size,
        direction: Direction,
        row_tolerance: f64,
    ) -> Self {
        let mut items: Vec<_> = items.into_iter().filter(DraggableItem::has_size).collect();
        items.sort_by(DraggableItem::compare);

        let rows = bucket_rows(&items, row_tolerance);

        let mut layout = Self {
            items,
            rows,
            container_size,
            direction,
            row_alley: 0.0,
            col_alley: 0.0,
            trailing_slack: 0.0,
        };
        layout.measure_alleys();
        layout
    }

    fn measure_alleys(&mut self) {
        let Some(first_row) = self.rows.first() else {
            return;
        };
        let first = self.items[first_row[0]].rect();

        if let Some(second_row) = self.rows.get(1) {
            let below = self.items[second_row[0]].rect();
            self.row_alley = (below.y0 - first.y1).max(0.0);
        }
        if let Some(&second) = first_row.get(1) {
            let next = self.items[second].rect();
            self.col_alley = (next.x0 - first.x1).max(0.0);
        }

        let slack = match self.direction {
            Direction::Ltr => {
                let last = self.items[first_row[first_row.len() - 1]].rect();
                self.container_size.width - last.x1
            }
            Direction::Rtl => first.x0,
        };
        self.trailing_slack = slack.max(0.0);
    }

    /// Visible items, sorted top-then-left.
    #[must_use]
    pub fn items(&self) -> &[DraggableItem<N>] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [DraggableItem<N>] {
        &mut self.items
    }

    /// Row buckets in visual order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Size of the container at scan time.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Writing direction at scan time.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the container is right-to-left.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }

    /// Vertical gap between the first two rows, or `0.0` with fewer rows.
    #[must_use]
    pub fn row_alley(&self) -> f64 {
        self.row_alley
    }

    /// Horizontal gap between the first two items of row 0, or `0.0`.
    #[must_use]
    pub fn col_alley(&self) -> f64 {
        self.col_alley
    }

    /// Unused inline space at the trailing end of row 0.
    #[must_use]
    pub fn trailing_slack(&self) -> f64 {
        self.trailing_slack
    }

    /// Multi-column mode: the first row holds more than one item.
    #[must_use]
    pub fn is_multi_column_mode(&self) -> bool {
        self.rows.first().is_some_and(|row| row.len() > 1)
    }

    /// Single-column mode, including the empty collection.
    #[must_use]
    pub fn is_single_column_mode(&self) -> bool {
        !self.is_multi_column_mode()
    }

    /// Item index at a grid position.
    #[must_use]
    pub fn item_at(&self, pos: GridPosition) -> Option<usize> {
        self.rows.get(pos.row)?.get(pos.col).copied()
    }

    /// Rect of the item at a grid position.
    #[must_use]
    pub fn rect_at(&self, pos: GridPosition) -> Option<Rect> {
        self.item_at(pos).map(|i| self.items[i].rect())
    }

    /// Grid position of the item at index `item`.
    #[must_use]
    pub fn position_of(&self, item: usize) -> Option<GridPosition> {
        self.rows.iter().enumerate().find_map(|(row, members)| {
            members
                .iter()
                .position(|&i| i == item)
                .map(|col| GridPosition { row, col })
        })
    }

    /// Index of the drag source, if it is visible in this layout.
    #[must_use]
    pub fn drag_source(&self) -> Option<usize> {
        self.items.iter().position(DraggableItem::is_drag_source)
    }

    /// Grid position of the drag source.
    #[must_use]
    pub fn drag_source_position(&self) -> Option<GridPosition> {
        self.position_of(self.drag_source()?)
    }

    /// The item that follows `pos` in document order.
    #[must_use]
    pub fn dom_next(&self, pos: GridPosition) -> Option<GridPosition> {
        let len = self.rows.get(pos.row)?.len();
        match self.direction {
            Direction::Ltr => {
                if pos.col + 1 < len {
                    // Same-row neighbour to the right.
                    Some(GridPosition::new(pos.row, pos.col + 1))
                } else {
                    // Wrap to the first item of the next row.
                    Some(GridPosition::new(pos.row + 1, 0)).filter(|p| self.item_at(*p).is_some())
                }
            }
            Direction::Rtl => {
                if pos.col > 0 {
                    Some(GridPosition::new(pos.row, pos.col - 1))
                } else {
                    // The next row starts at its rightmost item.
                    let next = self.rows.get(pos.row + 1)?;
                    Some(GridPosition::new(pos.row + 1, next.len() - 1))
                }
            }
        }
    }

    /// The item that precedes `pos` in document order.
    #[must_use]
    pub fn dom_prev(&self, pos: GridPosition) -> Option<GridPosition> {
        let len = self.rows.get(pos.row)?.len();
        match self.direction {
            Direction::Ltr => {
                if pos.col > 0 {
                    Some(GridPosition::new(pos.row, pos.col - 1))
                } else {
                    // Wrap to the last item of the previous row.
                    let row = pos.row.checked_sub(1)?;
                    Some(GridPosition::new(row, self.rows[row].len() - 1))
                }
            }
            Direction::Rtl => {
                if pos.col + 1 < len {
                    Some(GridPosition::new(pos.row, pos.col + 1))
                } else {
                    // The previous row ends at its leftmost item.
                    let row = pos.row.checked_sub(1)?;
                    Some(GridPosition::new(row, 0))
                }
            }
        }
    }
}

fn bucket_rows<N>(items: &[DraggableItem<N>], tolerance: f64) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row_top = f64::NEG_INFINITY;
    for (i, item) in items.iter().enumerate() {
        let top = item.rect().y0;
        match rows.last_mut() {
            Some(row) if top - row_top <= tolerance => row.push(i),
            _ => {
                row_top = top;
                rows.push(SmallVec::from_slice(&[i]));
            }
        }
    }
    // Jitter within the tolerance can interleave a row's items when sorted by
    // top first; restore left-to-right order inside each bucket.
    for row in &mut rows {
        row.sort_by(|&a, &b| items[a].rect().x0.total_cmp(&items[b].rect().x0));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn grid(cols: usize, rows: usize) -> Vec<DraggableItem<usize>> {
        let mut items = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let x = c as f64 * 110.0;
                let y = r as f64 * 60.0;
                items.push(DraggableItem::new(
                    r * cols + c,
                    Rect::new(x, y, x + 100.0, y + 50.0),
                    Point::ZERO,
                    false,
                ));
            }
        }
        items
    }

    #[test]
    fn empty_layout_has_no_rows() {
        let layout = Layout::<usize>::new(Vec::new(), Size::new(400.0, 0.0), Direction::Ltr, 1.0);
        assert!(layout.rows().is_empty());
        assert!(layout.is_single_column_mode());
        assert_eq!(layout.row_alley(), 0.0);
        assert_eq!(layout.col_alley(), 0.0);
        assert_eq!(layout.trailing_slack(), 0.0);
    }

    #[test]
    fn buckets_rows_and_measures_alleys() {
        let layout = Layout::new(grid(3, 2), Size::new(400.0, 110.0), Direction::Ltr, 1.0);
        assert_eq!(layout.rows().len(), 2);
        assert_eq!(layout.rows()[0].as_slice(), &[0, 1, 2]);
        assert_eq!(layout.rows()[1].as_slice(), &[3, 4, 5]);
        assert_eq!(layout.row_alley(), 10.0);
        assert_eq!(layout.col_alley(), 10.0);
        // 400 - (220 + 100)
        assert_eq!(layout.trailing_slack(), 80.0);
        assert!(layout.is_multi_column_mode());
    }

    #[test]
    fn rows_tolerate_subpixel_jitter() {
        let mut items = grid(3, 1);
        items[1] = DraggableItem::new(1, Rect::new(110.0, 0.5, 210.0, 50.5), Point::ZERO, false);
        let layout = Layout::new(items, Size::new(400.0, 60.0), Direction::Ltr, 1.0);
        assert_eq!(layout.rows().len(), 1);
        let nodes: Vec<usize> = layout.rows()[0]
            .iter()
            .map(|&i| *layout.items()[i].node())
            .collect();
        assert_eq!(nodes, [0, 1, 2]);
    }

    #[test]
    fn hidden_items_are_skipped() {
        let mut items = grid(3, 1);
        items.push(DraggableItem::new(99, Rect::new(0.0, 0.0, 0.0, 0.0), Point::ZERO, false));
        let layout = Layout::new(items, Size::new(400.0, 60.0), Direction::Ltr, 1.0);
        assert_eq!(layout.items().len(), 3);
    }

    #[test]
    fn rtl_slack_is_on_the_left() {
        let items = grid(3, 1)
            .into_iter()
            .map(|it| {
                let r = it.rect() + kurbo::Vec2::new(80.0, 0.0);
                DraggableItem::new(*it.node(), r, Point::ZERO, false)
            })
            .collect::<Vec<_>>();
        let layout = Layout::new(items, Size::new(400.0, 60.0), Direction::Rtl, 1.0);
        assert_eq!(layout.trailing_slack(), 80.0);
    }

    #[test]
    fn dom_order_wraps_rows_ltr() {
        let layout = Layout::new(grid(3, 2), Size::new(400.0, 110.0), Direction::Ltr, 1.0);
        let p = GridPosition::new;
        assert_eq!(layout.dom_next(p(0, 0)), Some(p(0, 1)));
        assert_eq!(layout.dom_next(p(0, 2)), Some(p(1, 0)));
        assert_eq!(layout.dom_next(p(1, 2)), None);
        assert_eq!(layout.dom_prev(p(1, 0)), Some(p(0, 2)));
        assert_eq!(layout.dom_prev(p(0, 0)), None);
    }

    #[test]
    fn dom_order_wraps_rows_rtl() {
        let layout = Layout::new(grid(3, 2), Size::new(400.0, 110.0), Direction::Rtl, 1.0);
        let p = GridPosition::new;
        assert_eq!(layout.dom_next(p(0, 2)), Some(p(0, 1)));
        assert_eq!(layout.dom_next(p(0, 0)), Some(p(1, 2)));
        assert_eq!(layout.dom_next(p(1, 0)), None);
        assert_eq!(layout.dom_prev(p(1, 2)), Some(p(0, 0)));
        assert_eq!(layout.dom_prev(p(0, 2)), None);
    }
}
