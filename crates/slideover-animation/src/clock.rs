//! Frame-callback clock driving interruptible animations.
//!
//! The host owns a [`FrameClock`] and pumps it once per display refresh with
//! a monotonically increasing frame timestamp. Animators keep a
//! [`FrameClockHandle`] and register one-shot callbacks for the next frame,
//! re-registering while they still have work. Callbacks drained this frame
//! may register again for the following one; within a frame they run in
//! registration order.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use web_time::Instant;

/// Identifier handed out by [`FrameClockHandle::register_frame_callback`].
pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: FrameCallback,
}

struct ClockInner {
    callbacks: RefCell<SmallVec<[FrameCallbackEntry; 4]>>,
    next_id: Cell<FrameCallbackId>,
    epoch: Instant,
}

impl ClockInner {
    fn register(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks
            .borrow_mut()
            .push(FrameCallbackEntry { id, callback });
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut callbacks = self.callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }
}

/// Owner side of the clock. Lives with the host event loop.
pub struct FrameClock {
    inner: Rc<ClockInner>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ClockInner {
                callbacks: RefCell::new(SmallVec::new()),
                next_id: Cell::new(1),
                epoch: Instant::now(),
            }),
        }
    }

    /// Clone-able handle for registering callbacks. Handles hold no strong
    /// reference; once the clock is dropped they register nothing.
    pub fn handle(&self) -> FrameClockHandle {
        FrameClockHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs every callback registered before this call with the given frame
    /// timestamp. Callbacks registered while the batch runs are kept for the
    /// next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let batch: SmallVec<[FrameCallbackEntry; 4]> = {
            let mut callbacks = self.inner.callbacks.borrow_mut();
            std::mem::take(&mut *callbacks)
        };
        for entry in batch {
            (entry.callback)(frame_time_nanos);
        }
    }

    /// Drains with wall-clock time elapsed since the clock was created.
    /// Convenience for hosts without their own frame timestamps.
    pub fn drain_now(&self) {
        let nanos = self.inner.epoch.elapsed().as_nanos() as u64;
        self.drain_frame_callbacks(nanos);
    }

    /// Whether anything is waiting on the next frame. Hosts use this to
    /// decide if another redraw needs scheduling.
    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.callbacks.borrow().is_empty()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak handle used by animators to schedule frame work.
#[derive(Clone)]
pub struct FrameClockHandle {
    inner: Weak<ClockInner>,
}

impl FrameClockHandle {
    /// Registers a one-shot callback for the next frame. Returns `None` when
    /// the owning clock is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel(id);
        }
    }

    /// Registers a callback and wraps it in a guard that cancels on drop.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        FrameCallbackRegistration {
            handle: self.clone(),
            id: self.register_frame_callback(callback),
        }
    }
}

/// Guard for a pending frame callback; cancels the callback when dropped.
pub struct FrameCallbackRegistration {
    handle: FrameClockHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_frame_callback(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/clock_tests.rs"]
mod tests;
