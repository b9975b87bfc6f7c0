//! Marshaling of work onto the UI thread.
//!
//! The platform delivers all windowing and input callbacks on one thread, and the keyboard
//! service must only be touched from there. Other threads (most importantly the native render
//! thread) instead push a [`UiRequest`] through a [`UiThreadProxy`]. The UI loop drains the
//! matching [`UiQueue`] on every iteration, so requests run in the order they were sent.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::error::QueueClosedError;

/// Work that must be carried out on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiRequest {
    /// Focus the input surface and force the soft keyboard on screen.
    ShowKeyboard,
    /// Dismiss the soft keyboard attached to the surface's window.
    HideKeyboard,
}

/// Wakes the UI loop after a request was queued.
///
/// Platform loops usually sleep until an event arrives; without a waker a queued request would
/// only run once something else wakes the loop up.
pub trait UiWaker: Send + Sync + fmt::Debug {
    fn wake_up(&self);
}

/// Create a connected proxy/queue pair.
pub fn ui_queue() -> (UiThreadProxy, UiQueue) {
    let (sender, receiver) = mpsc::channel();
    let pending = Arc::new(AtomicUsize::new(0));
    let proxy = UiThreadProxy { sender, pending: pending.clone(), waker: None };
    let queue = UiQueue { receiver, pending, disconnected: false };
    (proxy, queue)
}

/// The sending half, usable from any thread.
#[derive(Clone)]
pub struct UiThreadProxy {
    sender: Sender<UiRequest>,
    // Counted before the send, so it never falls below the number of queued requests.
    pending: Arc<AtomicUsize>,
    waker: Option<Arc<dyn UiWaker>>,
}

impl fmt::Debug for UiThreadProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiThreadProxy").field("waker", &self.waker).finish_non_exhaustive()
    }
}

impl UiThreadProxy {
    /// Install the waker poked after every successful send.
    pub fn set_waker(&mut self, waker: Arc<dyn UiWaker>) {
        self.waker = Some(waker);
    }

    /// Queue a request for the UI thread.
    ///
    /// This never blocks. Requests sent from one thread are received in the same order.
    pub fn send(&self, request: UiRequest) -> Result<(), QueueClosedError> {
        self.pending.fetch_add(1, Ordering::AcqRel);
        if self.sender.send(request).is_err() {
            self.pending.fetch_sub(1, Ordering::AcqRel);
            return Err(QueueClosedError::new());
        }
        trace!("Queued {request:?} for the UI thread");
        if let Some(waker) = &self.waker {
            waker.wake_up();
        }
        Ok(())
    }
}

/// The receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct UiQueue {
    receiver: Receiver<UiRequest>,
    pending: Arc<AtomicUsize>,
    disconnected: bool,
}

impl UiQueue {
    /// Take the next pending request, if any.
    pub fn try_recv(&mut self) -> Option<UiRequest> {
        match self.receiver.try_recv() {
            Ok(request) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                Some(request)
            },
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    warn!("UI request channel was disconnected");
                    self.disconnected = true;
                }
                None
            },
        }
    }

    /// Take every request that is pending right now, in FIFO order.
    ///
    /// Requests queued while the returned iterator is being consumed are left for the next call.
    pub fn drain(&mut self) -> impl Iterator<Item = UiRequest> + '_ {
        let pending = self.pending.load(Ordering::Acquire);
        std::iter::from_fn(move || self.try_recv()).take(pending)
    }
}
