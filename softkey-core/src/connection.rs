//! The edit session the platform input method talks to.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::input::RawKeyEvent;
use crate::keyboard::KeyboardController;
use crate::normalize::{self, KeyTranslation, TextEdit};
use crate::signal::EventSink;

/// The three families of raw callbacks an input method delivers to an editor.
///
/// Backends call these on the UI thread, in the order the platform reports them.
pub trait InputConnection {
    /// The input method committed `text`.
    ///
    /// Returns `true` when the edit was accepted. Backends should still run the platform's
    /// default commit handling afterwards so its own editor state stays consistent with the
    /// input method's composition logic.
    fn commit_text(&mut self, text: &str) -> bool;

    /// The input method asked to remove `before` characters before the cursor and `after`
    /// characters after it.
    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool;

    /// A raw key event arrived on the input method's key channel.
    ///
    /// Returns `true` when the key was consumed and the platform must not process it further.
    fn send_key_event(&mut self, event: &RawKeyEvent) -> bool;
}

/// Identifies one input session, for logging and stale-session detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Get the next id in the sequence.
    fn next() -> Self {
        static CURRENT: AtomicU64 = AtomicU64::new(0);
        Self(CURRENT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

/// The one [`InputConnection`] implementation, created by
/// [`InputSurface::create_input_session`](crate::surface::InputSurface::create_input_session).
///
/// A session holds no text. Every callback is translated and forwarded immediately.
pub struct EditSession {
    id: SessionId,
    sink: Rc<dyn EventSink>,
    keyboard: KeyboardController,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession").field("id", &self.id).finish_non_exhaustive()
    }
}

impl EditSession {
    pub(crate) fn new(sink: Rc<dyn EventSink>, keyboard: KeyboardController) -> Self {
        Self { id: SessionId::next(), sink, keyboard }
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Replay a snapshot difference as one backward delete per removed character, then a commit
    /// of the inserted text.
    pub fn apply_text_edit(&mut self, edit: TextEdit<'_>) {
        for _ in 0..edit.deleted {
            self.delete_surrounding_text(1, 0);
        }
        if !edit.inserted.is_empty() {
            self.commit_text(edit.inserted);
        }
    }
}

impl InputConnection for EditSession {
    fn commit_text(&mut self, text: &str) -> bool {
        trace!("{:?} commit {text:?}", self.id);
        for signal in normalize::commit_signals(text) {
            signal.dispatch(&*self.sink);
        }
        true
    }

    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool {
        trace!("{:?} delete surrounding before={before} after={after}", self.id);
        if let Some(signal) = normalize::delete_signal(before, after) {
            signal.dispatch(&*self.sink);
        }
        true
    }

    fn send_key_event(&mut self, event: &RawKeyEvent) -> bool {
        let translation = normalize::translate_key(event);
        trace!("{:?} key {event:?} -> {translation:?}", self.id);
        match translation {
            KeyTranslation::Signal(signal) => signal.dispatch(&*self.sink),
            KeyTranslation::HideKeyboard => self.keyboard.hide(),
            KeyTranslation::Unhandled => {},
        }
        translation.is_handled()
    }
}
