// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag lifecycle for a grid of items.

use alloc::vec::Vec;
use core::fmt;
use core::mem;

use kurbo::{Point, Size};

use crate::binding::{DomBinding, InsertPosition};
use crate::config::CollectionConfig;
use crate::drop_zone::DropZone;
use crate::gesture::GestureEvent;
use crate::item::DraggableItem;
use crate::layout::{Direction, Layout};

/// Where a collection is in the drag lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPhase<N> {
    /// No drag in progress.
    Idle,
    /// An item is being dragged.
    Dragging {
        /// The dragged item.
        source: N,
        /// Index into [`DragCollection::drop_zones`] of the previewed zone.
        active_zone: Option<usize>,
    },
}

impl<N> DragPhase<N> {
    /// The dragged item, if any.
    #[must_use]
    pub fn source(&self) -> Option<&N> {
        match self {
            Self::Idle => None,
            Self::Dragging { source, .. } => Some(source),
        }
    }

    /// The previewed zone index, if any.
    #[must_use]
    pub fn active_zone(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { active_zone, .. } => *active_zone,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// A reorder decided at drag stop, to be applied by [`DragCollection::complete_drop`].
///
/// Hosts defer the move by one tick so the drag gesture's own cleanup runs
/// against the original document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDrop<N> {
    /// The dragged item.
    pub source: N,
    /// The item the source is inserted next to.
    pub target: N,
    /// Which side of `target` the source lands on.
    pub position: InsertPosition,
}

/// Drag-and-drop reordering controller for one container.
///
/// The collection owns its [`DomBinding`] and rebuilds its [`Layout`] and
/// drop zones from the host on construction, on drag start, on resize, and
/// after each drop.
pub struct DragCollection<B: DomBinding> {
    binding: B,
    config: CollectionConfig,
    phase: DragPhase<B::Node>,
    layout: Layout<B::Node>,
    drop_zones: Vec<DropZone>,
    markers: Vec<B::Node>,
}

impl<B: DomBinding> fmt::Debug for DragCollection<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCollection")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("rows", &self.layout.rows().len())
            .field("drop_zones", &self.drop_zones.len())
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

impl<B: DomBinding> DragCollection<B> {
    /// Create a collection over `binding` and scan it once.
    pub fn new(binding: B, config: CollectionConfig) -> Self {
        let mut collection = Self {
            binding,
            config,
            phase: DragPhase::Idle,
            layout: Layout::default(),
            drop_zones: Vec::new(),
            markers: Vec::new(),
        };
        collection.reset_state();
        collection
    }

    /// The host binding.
    #[must_use]
    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// Mutable access to the host binding.
    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    /// The configuration this collection was created with.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Current drag phase.
    #[must_use]
    pub fn phase(&self) -> &DragPhase<B::Node> {
        &self.phase
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase.is_dragging()
    }

    /// Geometry from the most recent layout pass.
    #[must_use]
    pub fn layout(&self) -> &Layout<B::Node> {
        &self.layout
    }

    /// Drop zones from the most recent layout pass.
    #[must_use]
    pub fn drop_zones(&self) -> &[DropZone] {
        &self.drop_zones
    }

    /// The zone currently previewed, if any.
    #[must_use]
    pub fn active_drop_zone(&self) -> Option<&DropZone> {
        self.drop_zones.get(self.phase.active_zone()?)
    }

    /// See [`Layout::is_multi_column_mode`].
    #[must_use]
    pub fn is_multi_column_mode(&self) -> bool {
        self.layout.is_multi_column_mode()
    }

    /// See [`Layout::is_single_column_mode`].
    #[must_use]
    pub fn is_single_column_mode(&self) -> bool {
        self.layout.is_single_column_mode()
    }

    /// Discard any preview and rebuild items, rows, alleys and drop zones
    /// from the host.
    ///
    /// The drag phase survives, but the active zone is cleared since zone
    /// indices do not carry over between passes. A drag source is measured
    /// in its own slot: any `transform` the host gave it to follow the
    /// pointer is cleared first and is the host's to reapply.
    pub fn reset_state(&mut self) {
        self.clear_preview();
        if let DragPhase::Dragging {
            source,
            active_zone,
        } = &mut self.phase
        {
            *active_zone = None;
            self.binding.set_style(source, "transform", "");
        }

        let container = self.binding.container_rect();
        let origin = container.origin();
        let source = self.phase.source();
        let items: Vec<_> = self
            .binding
            .item_nodes()
            .into_iter()
            .map(|node| {
                let rect = self.binding.node_rect(&node);
                let is_source = source == Some(&node);
                DraggableItem::new(node, rect, origin, is_source)
            })
            .collect();
        let direction = if self.binding.is_rtl() {
            Direction::Rtl
        } else {
            Direction::Ltr
        };

        self.layout = Layout::new(items, container.size(), direction, self.config.row_tolerance);
        self.drop_zones = DropZone::build_all(&self.layout);
        log::debug!(
            "layout pass: {} item(s) in {} row(s), alleys {}x{}, {} drop zone(s)",
            self.layout.items().len(),
            self.layout.rows().len(),
            self.layout.col_alley(),
            self.layout.row_alley(),
            self.drop_zones.len()
        );
    }

    /// Begin dragging `source`.
    pub fn drag_start(&mut self, source: B::Node) {
        log::debug!("drag start: {source:?}");
        let container = self.binding.container();
        self.binding.add_class(&container, self.config.dragging_class);
        self.phase = DragPhase::Dragging {
            source,
            active_zone: None,
        };
        // The host may have changed since the last scan.
        self.reset_state();
    }

    /// Hit-test a viewport point, returning the index of the first matching
    /// zone unless dropping there would be a no-op.
    fn hit_test(&self, point: Point) -> Option<usize> {
        let index = self
            .drop_zones
            .iter()
            .position(|zone| zone.intersects_viewport_point(&self.binding, point))?;
        if self.drop_zones[index].is_adjacent_to_drag_source(&self.layout) {
            log::trace!("zone {index} is adjacent to the drag source; ignoring");
            return None;
        }
        Some(index)
    }

    /// The zone a drop at `point` would land in.
    ///
    /// Zones adjacent to the drag source are rejected.
    #[must_use]
    pub fn drop_zone_at(&self, point: Point) -> Option<&DropZone> {
        self.hit_test(point).map(|index| &self.drop_zones[index])
    }

    /// Track the pointer at viewport `point`, updating the preview.
    ///
    /// Returns the zone now previewed. Ignored while idle.
    pub fn drag_move(&mut self, point: Point) -> Option<DropZone> {
        if !self.phase.is_dragging() {
            return None;
        }
        let next = self.hit_test(point);
        if next != self.phase.active_zone() {
            self.clear_preview();
            if let Some(index) = next {
                self.show_preview(index);
            }
            if let DragPhase::Dragging { active_zone, .. } = &mut self.phase {
                *active_zone = next;
            }
            log::debug!("active drop zone: {:?}", next.map(|i| self.drop_zones[i]));
        }
        next.map(|index| self.drop_zones[index])
    }

    /// End the drag.
    ///
    /// Clears the preview, deactivates the source's ripple and returns to
    /// [`DragPhase::Idle`]. When a zone was active the reorder is returned
    /// for the host to apply with [`DragCollection::complete_drop`].
    pub fn drag_stop(&mut self) -> Option<PendingDrop<B::Node>> {
        let DragPhase::Dragging {
            source,
            active_zone,
        } = mem::replace(&mut self.phase, DragPhase::Idle)
        else {
            return None;
        };

        self.clear_preview();
        let container = self.binding.container();
        self.binding.remove_class(&container, self.config.dragging_class);
        self.binding.deactivate_ripple(&source);

        let pending = active_zone.map(|index| {
            let zone = self.drop_zones[index];
            PendingDrop {
                target: self.layout.items()[zone.item()].node().clone(),
                position: zone.insert_position(&self.layout),
                source,
            }
        });
        log::debug!("drag stop: {pending:?}");
        self.reset_state();
        pending
    }

    /// Apply a reorder returned by [`DragCollection::drag_stop`] and rescan.
    ///
    /// If either element left the collection in the meantime, nothing is
    /// moved. Returns whether the move happened.
    pub fn complete_drop(&mut self, drop: PendingDrop<B::Node>) -> bool {
        let nodes = self.binding.item_nodes();
        let moved = nodes.contains(&drop.source) && nodes.contains(&drop.target);
        if moved {
            self.binding
                .insert_adjacent(&drop.target, drop.position, &drop.source);
        } else {
            log::warn!("drop target or source left the collection; skipping {drop:?}");
        }
        self.reset_state();
        moved
    }

    /// Rebuild after the viewport settled at a new size.
    pub fn handle_resize(&mut self) {
        log::debug!("resize: rebuilding layout");
        self.reset_state();
    }

    /// Route a recognized pointer gesture.
    pub fn handle_gesture(&mut self, event: GestureEvent<B::Node>) -> Option<PendingDrop<B::Node>> {
        match event {
            GestureEvent::Start { source, pos } => {
                self.drag_start(source);
                self.drag_move(pos);
                None
            }
            GestureEvent::Move { pos, .. } => {
                self.drag_move(pos);
                None
            }
            GestureEvent::Stop { pos, .. } => {
                self.drag_move(pos);
                self.drag_stop()
            }
        }
    }

    fn show_preview(&mut self, index: usize) {
        let zone = self.drop_zones[index];
        let target = &self.layout.items()[zone.item()];
        let target_node = target.node().clone();
        let target_rect = target.rect();

        if let Some(indicator) = self
            .binding
            .create_marker(self.config.indicator_class, target_rect.size())
        {
            self.binding
                .insert_adjacent(&target_node, zone.insert_position(&self.layout), &indicator);

            // A lone indicator at the start of a row would wrap back onto the
            // row above; pad out that row's slack first.
            let slack = self.layout.trailing_slack();
            if zone.is_row_start(&self.layout) && slack > 0.0 {
                if let Some(spacer) = self.binding.create_marker(
                    self.config.spacer_class,
                    Size::new(slack, target_rect.height()),
                ) {
                    self.binding
                        .insert_adjacent(&indicator, InsertPosition::BeforeBegin, &spacer);
                    self.markers.push(spacer);
                }
            }
            self.markers.push(indicator);
        } else {
            log::warn!("host could not create a drop indicator");
        }

        let multi = self.layout.is_multi_column_mode();
        let alley = if multi {
            self.layout.col_alley()
        } else {
            self.layout.row_alley()
        };
        let half = alley / 2.0;
        if half <= 0.0 {
            return;
        }
        let (leading, trailing) = zone.neighbours(&self.layout);
        for (item, shift) in [(leading, -half), (trailing, half)] {
            let Some(item) = item else {
                continue;
            };
            let item = &mut self.layout.items_mut()[item];
            if item.is_drag_source() {
                continue;
            }
            if multi {
                item.set_offset_x(&mut self.binding, shift);
            } else {
                item.set_offset_y(&mut self.binding, shift);
            }
        }
    }

    fn clear_preview(&mut self) {
        for marker in self.markers.drain(..) {
            self.binding.remove_node(&marker);
        }
        for item in self.layout.items_mut() {
            if item.has_offset() {
                item.clear_offsets(&mut self.binding);
            }
        }
    }
}
