// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page-wide window resize listener.
//!
//! One [`ResizeListener`] serves every attached collection. It is created on
//! first use, listens for `resize` on the window, and debounces through
//! `setTimeout`.

use std::cell::RefCell;

use understory_drag_collection::resize::{ResizeListener, Scheduler, SubscriptionId};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::AttachError;

/// `setTimeout`-backed scheduler whose timers call [`fire`].
struct WindowScheduler {
    window: Window,
    on_timeout: Closure<dyn FnMut()>,
}

impl Scheduler for WindowScheduler {
    type Handle = Option<i32>;

    fn schedule(&mut self, delay_ms: u32) -> Option<i32> {
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.on_timeout.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("could not schedule resize handling: {err:?}");
                None
            }
        }
    }

    fn cancel(&mut self, handle: Option<i32>) {
        if let Some(handle) = handle {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

struct SharedResize {
    listener: ResizeListener<WindowScheduler>,
    // Registered on the window for the lifetime of the page.
    _on_resize: Closure<dyn FnMut()>,
}

thread_local! {
    static SHARED: RefCell<Option<SharedResize>> = const { RefCell::new(None) };
}

fn fire() {
    SHARED.with(|shared| {
        if let Some(shared) = shared.borrow_mut().as_mut() {
            shared.listener.fire();
        }
    });
}

fn notify() {
    SHARED.with(|shared| {
        if let Some(shared) = shared.borrow_mut().as_mut() {
            shared.listener.notify_resize();
        }
    });
}

fn install(delay_ms: u32) -> Result<SharedResize, AttachError> {
    let window = web_sys::window().ok_or(AttachError::NoWindow)?;
    let on_resize = Closure::<dyn FnMut()>::new(notify);
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|err| AttachError::Listener {
            event: "resize",
            message: format!("{err:?}"),
        })?;
    log::debug!("installed window resize listener ({delay_ms}ms debounce)");
    let scheduler = WindowScheduler {
        window,
        on_timeout: Closure::<dyn FnMut()>::new(fire),
    };
    Ok(SharedResize {
        listener: ResizeListener::new(scheduler, delay_ms),
        _on_resize: on_resize,
    })
}

/// Subscribe `callback` to settled window resizes, installing the shared
/// listener with `delay_ms` debounce if this is the first subscriber.
pub(crate) fn subscribe(
    delay_ms: u32,
    callback: impl FnMut() + 'static,
) -> Result<SubscriptionId, AttachError> {
    SHARED.with(|shared| {
        let mut slot = shared.borrow_mut();
        let shared = match slot.take() {
            Some(shared) => slot.insert(shared),
            None => slot.insert(install(delay_ms)?),
        };
        Ok(shared.listener.subscribe(callback))
    })
}

/// Remove a subscription made with [`subscribe`].
pub(crate) fn unsubscribe(id: SubscriptionId) {
    SHARED.with(|shared| {
        // Re-entrant when a collection is dropped from inside a callback.
        let Ok(mut shared) = shared.try_borrow_mut() else {
            log::warn!("resize subscription {id:?} dropped while notifying");
            return;
        };
        if let Some(shared) = shared.as_mut() {
            shared.listener.unsubscribe(id);
        }
    });
}
