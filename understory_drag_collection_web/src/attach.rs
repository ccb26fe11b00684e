// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and resize wiring for a live collection.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use kurbo::Point;
use understory_drag_collection::gesture::{DragGesture, GestureEvent};
use understory_drag_collection::resize::SubscriptionId;
use understory_drag_collection::{DomBinding, DragCollection, PendingDrop};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, EventTarget, HtmlElement, PointerEvent, Window};

use crate::binding::WebBinding;
use crate::{AttachError, WebConfig, resize};

type Shared = Rc<RefCell<Inner>>;
type Handler = Closure<dyn FnMut(PointerEvent)>;

struct Inner {
    collection: DragCollection<WebBinding>,
    gesture: DragGesture<Element>,
    /// Pointer position of the latest move while dragging.
    last_pos: Option<Point>,
}

fn pointer_pos(event: &PointerEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

impl Inner {
    fn on_pointer_down(&mut self, event: &PointerEvent, _: &Weak<RefCell<Self>>) {
        if !event.is_primary() || event.button() != 0 {
            return;
        }
        let Some(item) = event
            .target()
            .and_then(|target| self.collection.binding().item_for_target(&target))
        else {
            return;
        };
        // Keep delivering this pointer to us once it leaves the item.
        self.collection
            .binding()
            .capture_pointer(&item, event.pointer_id());
        self.gesture.on_pointer_down(item, pointer_pos(event));
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, _: &Weak<RefCell<Self>>) {
        let pos = pointer_pos(event);
        let Some(step) = self.gesture.on_pointer_move(pos) else {
            return;
        };
        event.prevent_default();
        if let GestureEvent::Start { source, .. } = &step {
            self.collection.binding().set_grabbed(source, true);
        }
        self.collection.handle_gesture(step);
        self.last_pos = Some(pos);
        self.follow_pointer();
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, this: &Weak<RefCell<Self>>) {
        let Some(stop) = self.gesture.on_pointer_up(pointer_pos(event)) else {
            return;
        };
        if let GestureEvent::Stop { source, .. } = &stop {
            self.release(source);
        }
        self.last_pos = None;
        if let Some(drop) = self.collection.handle_gesture(stop) {
            defer_drop(self.collection.binding().window(), this.clone(), drop);
        }
    }

    fn on_pointer_cancel(&mut self, _: &PointerEvent, _: &Weak<RefCell<Self>>) {
        self.cancel_drag();
    }

    /// Abandon any press or drag without moving anything.
    fn cancel_drag(&mut self) {
        let source = self.gesture.pressed().cloned();
        let was_dragging = self.gesture.is_dragging();
        self.gesture.cancel();
        self.last_pos = None;
        if !was_dragging {
            return;
        }
        if let Some(source) = source {
            self.release(&source);
        }
        if let Some(drop) = self.collection.drag_stop() {
            log::debug!("drag cancelled; discarding {drop:?}");
        }
    }

    /// Rebuild the layout, then put a dragged source back under the pointer.
    ///
    /// The rebuild measures the source in its slot, clearing its transform.
    fn rescan(&mut self, resized: bool) {
        if resized {
            self.collection.handle_resize();
        } else {
            self.collection.reset_state();
        }
        self.follow_pointer();
    }

    /// Translate the source so it tracks the pointer.
    fn follow_pointer(&mut self) {
        let Some(pos) = self.last_pos else {
            return;
        };
        let (Some(source), Some(offset)) =
            (self.gesture.pressed().cloned(), self.gesture.total_offset(pos))
        else {
            return;
        };
        let transform = format!("translate({}px, {}px)", offset.x, offset.y);
        self.collection
            .binding_mut()
            .set_style(&source, "transform", &transform);
    }

    fn release(&mut self, source: &Element) {
        self.collection
            .binding_mut()
            .set_style(source, "transform", "");
        self.collection.binding().set_grabbed(source, false);
    }
}

/// Apply `drop` on the next tick, once the release has finished propagating.
fn defer_drop(window: &Window, inner: Weak<RefCell<Inner>>, drop: PendingDrop<Element>) {
    let callback = Closure::once_into_js(move || {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            log::warn!("collection busy; dropping deferred reorder");
            return;
        };
        inner.collection.complete_drop(drop);
    });
    if let Err(err) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
    {
        log::warn!("could not defer drop: {err:?}");
    }
}

/// An event listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    handler: Handler,
}

impl Listener {
    fn register(
        target: EventTarget,
        event: &'static str,
        handler: Handler,
    ) -> Result<Self, AttachError> {
        target
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .map_err(|err| AttachError::Listener {
                event,
                message: format!("{err:?}"),
            })?;
        Ok(Self {
            target,
            event,
            handler,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref())
        {
            log::warn!("could not remove `{}` listener: {err:?}", self.event);
        }
    }
}

fn handler(inner: &Shared, f: fn(&mut Inner, &PointerEvent, &Weak<RefCell<Inner>>)) -> Handler {
    let weak = Rc::downgrade(inner);
    Closure::new(move |event: PointerEvent| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            return;
        };
        f(&mut inner, &event, &weak);
    })
}

/// A drag collection wired to live browser events.
///
/// Presses on items inside the container start a [`DragGesture`]; moves and
/// releases are tracked on the document so a drag survives leaving the
/// container. Dropping the handle cancels any drag in progress and removes
/// every listener.
pub struct WebDragCollection {
    inner: Shared,
    listeners: Vec<Listener>,
    resize: SubscriptionId,
}

impl fmt::Debug for WebDragCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDragCollection")
            .field("listeners", &self.listeners.len())
            .field("resize", &self.resize)
            .finish_non_exhaustive()
    }
}

impl WebDragCollection {
    /// Make the items of `container` sortable by dragging.
    pub fn attach(container: HtmlElement, config: WebConfig) -> Result<Self, AttachError> {
        let WebConfig {
            item_selector,
            touch_action,
            collection: config,
        } = config;
        let binding = WebBinding::new(container, item_selector)?;
        binding.set_touch_action(&touch_action);
        let container: EventTarget = binding.container_element().clone().into();
        let document: EventTarget = binding.document().clone().into();
        let threshold = config.drag_threshold;
        let delay_ms = config.resize_debounce_ms;

        let inner = Rc::new(RefCell::new(Inner {
            collection: DragCollection::new(binding, config),
            gesture: DragGesture::new(threshold),
            last_pos: None,
        }));

        let listeners = vec![
            Listener::register(container, "pointerdown", handler(&inner, Inner::on_pointer_down))?,
            Listener::register(
                document.clone(),
                "pointermove",
                handler(&inner, Inner::on_pointer_move),
            )?,
            Listener::register(
                document.clone(),
                "pointerup",
                handler(&inner, Inner::on_pointer_up),
            )?,
            Listener::register(
                document,
                "pointercancel",
                handler(&inner, Inner::on_pointer_cancel),
            )?,
        ];

        let weak = Rc::downgrade(&inner);
        let resize = resize::subscribe(delay_ms, move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.try_borrow_mut() {
                    inner.rescan(true);
                }
            }
        })?;

        log::debug!(
            "attached drag collection with {} item(s)",
            inner.borrow().collection.layout().items().len()
        );
        Ok(Self {
            inner,
            listeners,
            resize,
        })
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().collection.is_dragging()
    }

    /// Rescan the container, e.g. after items were added or removed.
    ///
    /// A drag in progress carries on. Does nothing when called from inside
    /// one of the collection's own event handlers.
    pub fn refresh(&self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.rescan(false);
        } else {
            log::warn!("collection busy; skipping refresh");
        }
    }

    /// Inspect the underlying collection.
    pub fn with_collection<R>(&self, f: impl FnOnce(&DragCollection<WebBinding>) -> R) -> R {
        f(&self.inner.borrow().collection)
    }
}

impl Drop for WebDragCollection {
    fn drop(&mut self) {
        resize::unsubscribe(self.resize);
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.cancel_drag();
        }
    }
}
