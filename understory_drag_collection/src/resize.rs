// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced resize notification shared by every collection on a page.
//!
//! Bursts of resize events collapse into a single notification: each
//! [`ResizeListener::notify_resize`] cancels the pending timer and schedules
//! a new one, and only [`ResizeListener::fire`] (called by the host when the
//! timer elapses) runs the subscribers. Timers are provided by a
//! [`Scheduler`], so the listener itself has no notion of wall time.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Host timer facility used to debounce notifications.
pub trait Scheduler {
    /// Handle to a scheduled timer.
    type Handle;

    /// Arrange for the listener's [`fire`](ResizeListener::fire) to be called
    /// once after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32) -> Self::Handle;

    /// Cancel a timer returned by [`Scheduler::schedule`].
    fn cancel(&mut self, handle: Self::Handle);
}

/// Identifies one subscriber of a [`ResizeListener`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut()>;

/// Trailing-edge debouncer fanning resize events out to subscribers.
pub struct ResizeListener<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Handle>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl<S: Scheduler> fmt::Debug for ResizeListener<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeListener")
            .field("delay_ms", &self.delay_ms)
            .field("pending", &self.pending.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler> ResizeListener<S> {
    /// Create a listener that waits `delay_ms` after the last resize.
    #[must_use]
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback to run after each settled resize burst.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether a notification is waiting for its timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a raw resize event, restarting the debounce timer.
    pub fn notify_resize(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.pending = Some(self.scheduler.schedule(self.delay_ms));
    }

    /// Timer callback: run every subscriber if a notification is pending.
    ///
    /// Returns the number of callbacks invoked.
    pub fn fire(&mut self) -> usize {
        if self.pending.take().is_none() {
            return 0;
        }
        log::debug!("resize settled; notifying {} subscriber(s)", self.subscribers.len());
        for (_, callback) in &mut self.subscribers {
            callback();
        }
        self.subscribers.len()
    }

    /// The underlying scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
