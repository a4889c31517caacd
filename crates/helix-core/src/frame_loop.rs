//! Host-driven frame callbacks with an explicit subscribe/unsubscribe
//! contract.
//!
//! The host (a `requestAnimationFrame` loop or a winit redraw) calls
//! [`FrameScheduler::present_frame`] once per presented frame. Every live
//! callback runs once, in registration order. Callbacks may register new
//! callbacks (they start on the next frame) and may unsubscribe any
//! callback, including themselves.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type FrameCallback = Box<dyn FnMut(f64)>;

struct Slot {
    id: u64,
    // `None` while the callback is running.
    callback: Option<FrameCallback>,
}

#[derive(Default)]
struct Inner {
    slots: Vec<Slot>,
    next_id: u64,
    presenting: bool,
    frames: u64,
}

impl Inner {
    fn remove(&mut self, id: u64) -> Option<Slot> {
        let pos = self.slots.iter().position(|s| s.id == id)?;
        Some(self.slots.remove(pos))
    }
}

#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_frame_callback<F>(&self, callback: F) -> FrameSubscription
    where
        F: FnMut(f64) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.slots.push(Slot {
            id,
            callback: Some(Box::new(callback)),
        });
        log::debug!("[frame] subscribed callback {id} ({} live)", inner.slots.len());
        FrameSubscription {
            id,
            scheduler: Rc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Number of live callbacks.
    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frames presented so far (re-entrant calls excluded).
    pub fn frames_presented(&self) -> u64 {
        self.inner.borrow().frames
    }

    /// Run every live callback once with host time `elapsed` (seconds).
    ///
    /// Returns the number of callbacks invoked. A call made while a frame is
    /// already being presented is ignored.
    pub fn present_frame(&self, elapsed: f64) -> usize {
        let ids: SmallVec<[u64; 4]> = {
            let mut inner = self.inner.borrow_mut();
            if inner.presenting {
                log::warn!("[frame] present_frame called re-entrantly; ignoring");
                return 0;
            }
            inner.presenting = true;
            inner.frames = inner.frames.wrapping_add(1);
            inner.slots.iter().map(|s| s.id).collect()
        };

        let mut invoked = 0;
        for id in ids {
            let taken = {
                let mut inner = self.inner.borrow_mut();
                inner
                    .slots
                    .iter_mut()
                    .find(|s| s.id == id)
                    .and_then(|s| s.callback.take())
            };
            let Some(mut callback) = taken else {
                continue;
            };
            callback(elapsed);
            invoked += 1;

            let orphan = {
                let mut inner = self.inner.borrow_mut();
                match inner.slots.iter_mut().find(|s| s.id == id) {
                    Some(slot) => {
                        slot.callback = Some(callback);
                        None
                    }
                    // unsubscribed from inside its own call
                    None => Some(callback),
                }
            };
            drop(orphan);
        }

        self.inner.borrow_mut().presenting = false;
        invoked
    }
}

/// Handle returned by [`FrameScheduler::register_frame_callback`]. Dropping
/// it unsubscribes.
pub struct FrameSubscription {
    id: u64,
    scheduler: Weak<RefCell<Inner>>,
    active: bool,
}

impl FrameSubscription {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active && self.scheduler.strong_count() > 0
    }

    /// Remove the callback. Idempotent.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let Some(inner) = self.scheduler.upgrade() else {
            return;
        };
        // release the borrow before the callback (and whatever it captured) drops
        let removed = inner.borrow_mut().remove(self.id);
        if removed.is_some() {
            log::debug!("[frame] unsubscribed callback {}", self.id);
        }
        drop(removed);
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
