//! Common error types.
//!
//! None of these ever reach the native application. They are used internally to decide when a
//! request degrades into a no-op, and are logged at that point.

use std::{error, fmt};

/// The UI thread is no longer draining its request queue.
#[derive(Clone)]
pub struct QueueClosedError {
    _marker: (),
}

impl Default for QueueClosedError {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueClosedError {
    /// Create a new [`QueueClosedError`].
    #[inline]
    pub fn new() -> QueueClosedError {
        QueueClosedError { _marker: () }
    }
}

impl fmt::Debug for QueueClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("QueueClosedError").finish()
    }
}

impl fmt::Display for QueueClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad("the UI thread request queue is closed")
    }
}

impl error::Error for QueueClosedError {}

/// A platform service needed to carry out a UI request is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceUnavailable {
    /// The input surface is not attached to a window, e.g. before startup or during teardown.
    NotAttached,
    /// The input surface refused focus.
    NotFocusable,
    /// No keyboard service was installed in the bridge context.
    NoKeyboardService,
}

impl fmt::Display for ServiceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceUnavailable::NotAttached => {
                write!(f, "the input surface is not attached to a window")
            },
            ServiceUnavailable::NotFocusable => write!(f, "the input surface is not focusable"),
            ServiceUnavailable::NoKeyboardService => {
                write!(f, "no soft keyboard service is available")
            },
        }
    }
}

impl error::Error for ServiceUnavailable {}
