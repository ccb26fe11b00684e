// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gesture recognizer: turn press/move/release into drag start/move/stop.
//!
//! ## Usage
//!
//! 1) Call [`DragGesture::on_pointer_down`] when the pointer is pressed on a draggable element.
//! 2) Feed every pointer move to [`DragGesture::on_pointer_move`]. Once the pointer travels
//!    further than the threshold on either axis, a [`GestureEvent::Start`] is produced,
//!    followed by [`GestureEvent::Move`] events carrying the delta since the previous move.
//! 3) Call [`DragGesture::on_pointer_up`] on release; it produces [`GestureEvent::Stop`] only
//!    if the press had turned into a drag, so plain clicks pass through untouched.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_drag_collection::gesture::{DragGesture, GestureEvent};
//!
//! let mut gesture = DragGesture::new(5.0);
//! gesture.on_pointer_down("card", Point::new(10.0, 20.0));
//!
//! // Within the threshold: still a potential click.
//! assert_eq!(gesture.on_pointer_move(Point::new(12.0, 21.0)), None);
//!
//! // Past it: the drag starts.
//! assert!(matches!(
//!     gesture.on_pointer_move(Point::new(20.0, 20.0)),
//!     Some(GestureEvent::Start { source: "card", .. })
//! ));
//! assert!(gesture.is_dragging());
//!
//! let total = gesture.total_offset(Point::new(20.0, 25.0)).unwrap();
//! assert_eq!((total.x, total.y), (10.0, 5.0));
//! ```

use kurbo::{Point, Vec2};

/// Event produced by a [`DragGesture`].
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent<K> {
    /// The press became a drag.
    Start {
        /// The pressed element.
        source: K,
        /// Pointer position where the drag was recognized.
        pos: Point,
    },
    /// The pointer moved during a drag.
    Move {
        /// Current pointer position.
        pos: Point,
        /// Movement since the previous event.
        delta: Vec2,
    },
    /// The pointer was released after dragging.
    Stop {
        /// The dragged element.
        source: K,
        /// Pointer position at release.
        pos: Point,
    },
}

/// Tracks one pointer from press to release.
#[derive(Clone, Debug)]
pub struct DragGesture<K> {
    threshold: f64,
    pressed: Option<K>,
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    dragging: bool,
}

impl<K: Clone> DragGesture<K> {
    /// Create a recognizer with the given movement threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            pressed: None,
            start_pos: None,
            last_pos: None,
            dragging: false,
        }
    }

    /// Record a press on `key` at `pos`. Any gesture in progress is discarded.
    pub fn on_pointer_down(&mut self, key: K, pos: Point) {
        self.pressed = Some(key);
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.dragging = false;
    }

    /// Process a pointer move.
    pub fn on_pointer_move(&mut self, pos: Point) -> Option<GestureEvent<K>> {
        let start = self.start_pos?;
        if !self.dragging {
            let d = pos - start;
            let t = self.threshold;
            if d.x <= t && -d.x <= t && d.y <= t && -d.y <= t {
                return None;
            }
            self.dragging = true;
            self.last_pos = Some(pos);
            return Some(GestureEvent::Start {
                source: self.pressed.clone()?,
                pos,
            });
        }
        let delta = pos - self.last_pos.unwrap_or(start);
        self.last_pos = Some(pos);
        Some(GestureEvent::Move { pos, delta })
    }

    /// Process a pointer release, ending the gesture.
    pub fn on_pointer_up(&mut self, pos: Point) -> Option<GestureEvent<K>> {
        let was_dragging = self.dragging;
        let source = self.pressed.take();
        self.cancel();
        match (was_dragging, source) {
            (true, Some(source)) => Some(GestureEvent::Stop { source, pos }),
            _ => None,
        }
    }

    /// Offset of `current_pos` from the press position.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Drop any gesture in progress without producing events.
    pub fn cancel(&mut self) {
        self.pressed = None;
        self.start_pos = None;
        self.last_pos = None;
        self.dragging = false;
    }

    /// The pressed element, while a press or drag is in progress.
    #[must_use]
    pub fn pressed(&self) -> Option<&K> {
        self.pressed.as_ref()
    }

    /// Returns `true` once the press has become a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
