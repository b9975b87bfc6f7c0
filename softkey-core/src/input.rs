//! Raw events reported by the platform input method.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The action of a [`RawKeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyAction {
    /// The key was pressed.
    Down,
    /// The key was released.
    Up,
    /// Several duplicate key events, or a complex string delivered as a single key event.
    Multiple,
}

/// Key codes the bridge gives meaning to.
///
/// Anything else is carried through as the platform's numeric key code and left for the platform
/// to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Keycode {
    /// Backspace. Android calls this `KEYCODE_DEL`.
    Delete,
    /// The enter or "done" key.
    Enter,
    /// Any other key, identified by its native code.
    Other(u32),
}

/// A low-level key event delivered through the input method's key channel.
///
/// Soft keyboards raise these for some edits instead of (never in addition to) the text-commit
/// and surrounding-delete callbacks, depending on the keyboard implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawKeyEvent {
    pub action: KeyAction,
    pub keycode: Keycode,
}

impl RawKeyEvent {
    #[inline]
    pub const fn new(action: KeyAction, keycode: Keycode) -> Self {
        Self { action, keycode }
    }

    /// Shorthand for a [`KeyAction::Down`] event.
    #[inline]
    pub const fn press(keycode: Keycode) -> Self {
        Self::new(KeyAction::Down, keycode)
    }

    /// Shorthand for a [`KeyAction::Up`] event.
    #[inline]
    pub const fn release(keycode: Keycode) -> Self {
        Self::new(KeyAction::Up, keycode)
    }

    #[inline]
    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Down
    }
}
