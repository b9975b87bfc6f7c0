//! A bounded signal queue for native loops that poll for input.
//!
//! Many native loops don't want to be called back from the UI thread; they prefer to pick up
//! pending input once per frame. [`SignalBuffer`] is an [`EventSink`] that stores signals until
//! the loop drains them, from whichever thread it runs on.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::signal::{EventSink, PrimitiveSignal};

#[derive(Debug)]
struct Inner {
    signals: VecDeque<PrimitiveSignal>,
    capacity: usize,
    overflowing: bool,
}

/// Thread-safe, fixed-capacity FIFO of [`PrimitiveSignal`]s.
///
/// Clones share the same storage. When the buffer is full, new signals are dropped.
#[derive(Debug, Clone)]
pub struct SignalBuffer {
    inner: Arc<Mutex<Inner>>,
}

impl Default for SignalBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl SignalBuffer {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new(capacity: usize) -> Self {
        let inner = Inner {
            signals: VecDeque::with_capacity(capacity),
            capacity,
            overflowing: false,
        };
        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    // A panic while holding the lock can't leave the queue half-updated.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a signal, dropping it if the buffer is full.
    pub fn push(&self, signal: PrimitiveSignal) {
        let mut inner = self.lock();
        if inner.signals.len() >= inner.capacity {
            if !inner.overflowing {
                warn!("Signal buffer full ({} entries), dropping input", inner.capacity);
                inner.overflowing = true;
            }
            return;
        }
        inner.overflowing = false;
        inner.signals.push_back(signal);
    }

    /// Take the oldest pending signal.
    pub fn pop(&self) -> Option<PrimitiveSignal> {
        self.lock().signals.pop_front()
    }

    /// Take every pending signal, oldest first.
    pub fn drain(&self) -> Vec<PrimitiveSignal> {
        self.lock().signals.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().signals.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }
}

impl EventSink for SignalBuffer {
    fn on_character_input(&self, ch: char) {
        self.push(PrimitiveSignal::CharacterInput(ch));
    }

    fn on_key_delete(&self) {
        self.push(PrimitiveSignal::DeleteBackward);
    }

    fn on_submit(&self) {
        self.push(PrimitiveSignal::Submit);
    }
}
