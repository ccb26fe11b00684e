// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording in-memory host for drag collection tests.
//!
//! Items are laid out as a wrapping grid computed from their document order,
//! so moving a node re-flows every rect after it, much like a browser would.
//! A `translate(..)` transform moves an item's measured rect the same way.

#![allow(dead_code, reason = "Not every test binary uses every helper.")]

use std::collections::HashMap;

use kurbo::{Point, Rect, Size, Vec2};
use understory_drag_collection::{DomBinding, InsertPosition};

/// Node id of the container.
pub const CONTAINER: u32 = 0;

/// First id handed out to markers.
const FIRST_MARKER: u32 = 1000;

/// A host mutation, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    AddClass(u32, String),
    RemoveClass(u32, String),
    SetStyle(u32, String, String),
    CreateMarker(u32, String, Size),
    Insert(u32, InsertPosition, u32),
    Remove(u32),
    DeactivateRipple(u32),
}

/// A marker currently attached to the fake document.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: u32,
    pub class: String,
    pub size: Size,
    pub anchor: u32,
    pub position: InsertPosition,
}

#[derive(Debug)]
pub struct FakeDom {
    /// Item nodes in document order.
    pub order: Vec<u32>,
    /// Items per row.
    pub cols: usize,
    pub item_size: Size,
    pub alley: f64,
    /// Viewport origin of the container; change it to simulate scrolling.
    pub origin: Point,
    pub width: f64,
    pub rtl: bool,
    /// Items rendered with a zero-size rect.
    pub hidden: Vec<u32>,
    pub styles: HashMap<(u32, String), String>,
    pub classes: HashMap<u32, Vec<String>>,
    pub markers: Vec<Marker>,
    pub ops: Vec<Op>,
    next_marker: u32,
}

impl FakeDom {
    /// `count` items numbered from 1, 100x50 with 10px alleys, in a 400px
    /// wide container at viewport (20, 30).
    pub fn grid(count: u32, cols: usize) -> Self {
        Self {
            order: (1..=count).collect(),
            cols,
            item_size: Size::new(100.0, 50.0),
            alley: 10.0,
            origin: Point::new(20.0, 30.0),
            width: 400.0,
            rtl: false,
            hidden: Vec::new(),
            styles: HashMap::new(),
            classes: HashMap::new(),
            markers: Vec::new(),
            ops: Vec::new(),
            next_marker: FIRST_MARKER,
        }
    }

    pub fn rtl(mut self) -> Self {
        self.rtl = true;
        self
    }

    /// Collection-relative rect of the visible slot `slot`.
    fn slot_rect(&self, slot: usize) -> Rect {
        let row = (slot / self.cols) as f64;
        let col = (slot % self.cols) as f64;
        let Size { width: w, height: h } = self.item_size;
        let x = if self.rtl {
            self.width - w - col * (w + self.alley)
        } else {
            col * (w + self.alley)
        };
        let y = row * (h + self.alley);
        Rect::new(x, y, x + w, y + h)
    }

    /// Viewport center of item `node`.
    pub fn center_of(&self, node: u32) -> Point {
        self.node_rect(&node).center()
    }

    /// Current `transform` style of `node`, empty if never set.
    pub fn transform(&self, node: u32) -> &str {
        self.styles
            .get(&(node, "transform".to_string()))
            .map_or("", String::as_str)
    }

    /// Displacement of `node` by its `translate(Xpx, Ypx)` transform.
    fn translation(&self, node: u32) -> Vec2 {
        let parsed = self
            .transform(node)
            .strip_prefix("translate(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|args| args.split_once(','))
            .and_then(|(x, y)| {
                let px = |v: &str| v.trim().strip_suffix("px")?.parse::<f64>().ok();
                Some(Vec2::new(px(x)?, px(y)?))
            });
        parsed.unwrap_or(Vec2::ZERO)
    }

    pub fn has_class(&self, node: u32, class: &str) -> bool {
        self.classes
            .get(&node)
            .is_some_and(|c| c.iter().any(|k| k == class))
    }

    pub fn markers_with_class(&self, class: &str) -> Vec<&Marker> {
        self.markers.iter().filter(|m| m.class == class).collect()
    }

    pub fn count_ops(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl DomBinding for FakeDom {
    type Node = u32;

    fn container(&self) -> u32 {
        CONTAINER
    }

    fn item_nodes(&self) -> Vec<u32> {
        self.order.clone()
    }

    fn container_rect(&self) -> Rect {
        let visible = self.order.len() - self.hidden.len();
        let rows = visible.div_ceil(self.cols) as f64;
        let height = (rows * (self.item_size.height + self.alley) - self.alley).max(0.0);
        Rect::from_origin_size(self.origin, Size::new(self.width, height))
    }

    fn node_rect(&self, node: &u32) -> Rect {
        if self.hidden.contains(node) {
            return Rect::from_origin_size(self.origin, Size::ZERO);
        }
        let slot = self
            .order
            .iter()
            .filter(|&&n| !self.hidden.contains(&n))
            .position(|n| n == node);
        match slot {
            Some(slot) => self.slot_rect(slot) + self.origin.to_vec2() + self.translation(*node),
            None => Rect::ZERO,
        }
    }

    fn is_rtl(&self) -> bool {
        self.rtl
    }

    fn add_class(&mut self, node: &u32, class: &str) {
        self.ops.push(Op::AddClass(*node, class.to_string()));
        let classes = self.classes.entry(*node).or_default();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &u32, class: &str) {
        self.ops.push(Op::RemoveClass(*node, class.to_string()));
        if let Some(classes) = self.classes.get_mut(node) {
            classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, node: &u32, property: &str, value: &str) {
        self.ops.push(Op::SetStyle(*node, property.to_string(), value.to_string()));
        self.styles
            .insert((*node, property.to_string()), value.to_string());
    }

    fn create_marker(&mut self, class: &str, size: Size) -> Option<u32> {
        let id = self.next_marker;
        self.next_marker += 1;
        self.ops.push(Op::CreateMarker(id, class.to_string(), size));
        self.markers.push(Marker {
            id,
            class: class.to_string(),
            size,
            anchor: CONTAINER,
            position: InsertPosition::BeforeBegin,
        });
        Some(id)
    }

    fn insert_adjacent(&mut self, target: &u32, position: InsertPosition, node: &u32) {
        self.ops.push(Op::Insert(*target, position, *node));
        if let Some(marker) = self.markers.iter_mut().find(|m| m.id == *node) {
            marker.anchor = *target;
            marker.position = position;
            return;
        }
        self.order.retain(|n| n != node);
        let Some(at) = self.order.iter().position(|n| n == target) else {
            return;
        };
        let at = match position {
            InsertPosition::BeforeBegin => at,
            InsertPosition::AfterEnd => at + 1,
        };
        self.order.insert(at, *node);
    }

    fn remove_node(&mut self, node: &u32) {
        self.ops.push(Op::Remove(*node));
        self.markers.retain(|m| m.id != *node);
        self.order.retain(|n| n != node);
    }

    fn deactivate_ripple(&mut self, node: &u32) {
        self.ops.push(Op::DeactivateRipple(*node));
    }
}
