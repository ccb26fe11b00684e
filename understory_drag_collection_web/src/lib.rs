// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser binding for `understory_drag_collection`.
//!
//! This crate implements [`DomBinding`](understory_drag_collection::DomBinding)
//! over `web_sys::Element` and wires a collection to live pointer and resize
//! events when targeting `wasm32`. On other targets only the configuration
//! and error types are available, so the crate can sit in the workspace.
//!
//! # Usage
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn make_sortable(
//!     grid: web_sys::HtmlElement,
//! ) -> Result<understory_drag_collection_web::WebDragCollection, understory_drag_collection_web::AttachError> {
//!     use understory_drag_collection_web::{WebConfig, WebDragCollection};
//!
//!     WebDragCollection::attach(grid, WebConfig::default())
//! }
//! ```
//!
//! The returned handle owns every listener it registered. Keep it alive for as
//! long as the grid should stay sortable; dropping it detaches the grid.
//!
//! Notes:
//! - Pointer presses are matched to items with `Element::closest`, so presses
//!   on an item's descendants start a drag too.
//! - While dragging, the source carries `aria-grabbed="true"` and follows the
//!   pointer through an inline `transform`. Neither is read back.
//! - The DOM move happens one `setTimeout(0)` after release.
//! - Touch input needs the browser to leave pointer moves to the page. `attach`
//!   sets `touch-action: none` on the container (see
//!   [`WebConfig::touch_action`]) and captures the pointer on press, so a
//!   touch drag is not turned into a scroll and cancelled with
//!   `pointercancel`. Scrolling a grid by touch then has to start outside it.
//! - Every collection on the page shares one debounced window resize
//!   listener. Its delay is taken from the first collection attached.

#[cfg(target_arch = "wasm32")]
mod attach;
#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod resize;

use std::fmt;

use understory_drag_collection::CollectionConfig;

#[cfg(target_arch = "wasm32")]
pub use attach::WebDragCollection;
#[cfg(target_arch = "wasm32")]
pub use binding::WebBinding;

/// Selector matching `.mdc-drag-collection__item` elements.
pub const DEFAULT_ITEM_SELECTOR: &str = ".mdc-drag-collection__item";

/// `touch-action` given to the container: the page handles every touch.
pub const DEFAULT_TOUCH_ACTION: &str = "none";

/// Configuration for `WebDragCollection::attach`.
#[derive(Clone, Debug, PartialEq)]
pub struct WebConfig {
    /// CSS selector for the draggable items, evaluated inside the container.
    pub item_selector: String,
    /// CSS `touch-action` set on the container at attach time.
    ///
    /// Anything that lets the browser pan, such as `auto`, makes it cancel
    /// touch drags. An empty string leaves the container's own value alone.
    pub touch_action: String,
    /// Host-agnostic collection settings.
    pub collection: CollectionConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            touch_action: DEFAULT_TOUCH_ACTION.to_string(),
            collection: CollectionConfig::default(),
        }
    }
}

impl WebConfig {
    /// Use a different item selector.
    #[must_use]
    pub fn with_item_selector(mut self, selector: impl Into<String>) -> Self {
        self.item_selector = selector.into();
        self
    }

    /// Use a different container `touch-action`.
    #[must_use]
    pub fn with_touch_action(mut self, touch_action: impl Into<String>) -> Self {
        self.touch_action = touch_action.into();
        self
    }
}

/// Error returned when a collection cannot be attached to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// There is no global `window`, e.g. inside a worker.
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// The browser refused an event listener.
    Listener {
        /// The event type being registered.
        event: &'static str,
        /// The browser's error, as debug-formatted JS.
        message: String,
    },
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global window is available"),
            Self::NoDocument => f.write_str("the window has no document"),
            Self::Listener { event, message } => {
                write!(f, "could not listen for `{event}` events: {message}")
            }
        }
    }
}

impl core::error::Error for AttachError {}

/// Send `log` records at `level` and above to the browser console and report
/// panics there as well.
///
/// Calling this more than once is harmless; later calls keep the first logger.
#[cfg(all(target_arch = "wasm32", feature = "console_log"))]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}
