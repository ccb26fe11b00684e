// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables shared by the collection, the gesture recognizer, and the resize listener.

/// Configuration for a [`DragCollection`](crate::DragCollection).
///
/// The defaults match the `mdc-drag-collection` class names and timings.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionConfig {
    /// Class added to the container for the duration of a drag.
    pub dragging_class: &'static str,
    /// Class of the drop indicator marker.
    pub indicator_class: &'static str,
    /// Class of the row-start spacer marker.
    pub spacer_class: &'static str,
    /// Maximum difference in top offset for two items to share a row.
    pub row_tolerance: f64,
    /// Pointer travel, on either axis, before a press becomes a drag.
    pub drag_threshold: f64,
    /// Trailing debounce delay for window resize handling.
    pub resize_debounce_ms: u32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            dragging_class: "mdc-drag-collection--dragging",
            indicator_class: "mdc-drag-collection__drop-indicator",
            spacer_class: "mdc-drag-collection__spacer",
            row_tolerance: 1.0,
            drag_threshold: 5.0,
            resize_debounce_ms: 100,
        }
    }
}
