// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drag Collection: drag-and-drop reordering for grids of items.
//!
//! This crate holds the host-agnostic half of a reorderable grid. It derives
//! rows, gutters and candidate drop zones from item rectangles, hit-tests the
//! pointer against those zones, drives a live preview (an indicator, an
//! optional spacer, and sibling offsets), and decides the final reorder. All
//! reads and writes of the host document go through a [`DomBinding`], which is
//! implemented once per host: `understory_drag_collection_web` provides the
//! browser binding, and tests use recording doubles.
//!
//! The core concepts are:
//!
//! - [`DraggableItem`]: one element with its collection-relative rectangle and
//!   visual offset.
//! - [`Layout`]: items bucketed into visual rows, with the row and column alleys
//!   (gutters), the trailing slack of the first row, column mode and writing
//!   direction.
//! - [`DropZone`]: an insertion slot before or after an item, with a tolerance
//!   rectangle and the rules that reject drops which would not change the order.
//! - [`DragCollection`]: the controller. It tracks an explicit [`DragPhase`]
//!   instead of reading state back from the host.
//! - [`gesture::DragGesture`]: a small press/move/release recognizer feeding the
//!   collection.
//! - [`resize::ResizeListener`]: a debounced resize fan-out shared between
//!   collections.
//!
//! ## Lifecycle
//!
//! 1) [`DragCollection::drag_start`] records the source and rescans the host.
//! 2) [`DragCollection::drag_move`] previews the zone under the pointer.
//! 3) [`DragCollection::drag_stop`] clears the preview and returns a
//!    [`PendingDrop`] when a zone was active.
//! 4) One tick later the host calls [`DragCollection::complete_drop`], which
//!    moves the source and rescans.
//!
//! [`DragCollection::handle_resize`] rescans without touching the drag phase.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_drag_collection::{
//!     CollectionConfig, DomBinding, DragCollection, InsertPosition,
//! };
//!
//! /// Three 100x50 items in a row, 10px apart.
//! struct Row {
//!     order: Vec<u32>,
//! }
//!
//! impl DomBinding for Row {
//!     type Node = u32;
//!     fn container(&self) -> u32 { 0 }
//!     fn item_nodes(&self) -> Vec<u32> { self.order.clone() }
//!     fn container_rect(&self) -> Rect { Rect::new(0.0, 0.0, 400.0, 50.0) }
//!     fn node_rect(&self, node: &u32) -> Rect {
//!         let i = self.order.iter().position(|n| n == node).unwrap() as f64;
//!         Rect::new(i * 110.0, 0.0, i * 110.0 + 100.0, 50.0)
//!     }
//!     fn is_rtl(&self) -> bool { false }
//!     fn add_class(&mut self, _: &u32, _: &str) {}
//!     fn remove_class(&mut self, _: &u32, _: &str) {}
//!     fn set_style(&mut self, _: &u32, _: &str, _: &str) {}
//!     fn create_marker(&mut self, _: &str, _: Size) -> Option<u32> { Some(100) }
//!     fn insert_adjacent(&mut self, target: &u32, pos: InsertPosition, node: &u32) {
//!         if *node == 100 { return; }
//!         self.order.retain(|n| n != node);
//!         let at = self.order.iter().position(|n| n == target).unwrap();
//!         let at = if pos == InsertPosition::AfterEnd { at + 1 } else { at };
//!         self.order.insert(at, *node);
//!     }
//!     fn remove_node(&mut self, _: &u32) {}
//!     fn deactivate_ripple(&mut self, _: &u32) {}
//! }
//!
//! let mut collection = DragCollection::new(
//!     Row { order: vec![1, 2, 3] },
//!     CollectionConfig::default(),
//! );
//! assert!(collection.is_multi_column_mode());
//!
//! // Drag item 1 past the right edge of item 3.
//! collection.drag_start(1);
//! assert!(collection.drag_move(Point::new(330.0, 25.0)).is_some());
//! let drop = collection.drag_stop().unwrap();
//! assert!(collection.complete_drop(drop));
//! assert_eq!(collection.binding().order, [2, 3, 1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through the `log`
//! facade.

#![no_std]

extern crate alloc;

mod binding;
mod collection;
mod config;
mod drop_zone;
mod item;
mod layout;

pub mod gesture;
pub mod resize;

pub use binding::{DomBinding, InsertPosition};
pub use collection::{DragCollection, DragPhase, PendingDrop};
pub use config::CollectionConfig;
pub use drop_zone::{DropZone, Side};
pub use item::DraggableItem;
pub use layout::{Direction, GridPosition, Layout, Row};
