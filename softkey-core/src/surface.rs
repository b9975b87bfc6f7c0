//! The invisible input-capturing surface.
//!
//! The platform only routes input method callbacks to a focused view that declares itself a text
//! editor. [`InputSurface`] is that view: it has no visual footprint, holds the IME focus, and
//! hands out one [`EditSession`] per platform-negotiated editing session.

use std::rc::Rc;

use bitflags::bitflags;
use dpi::PhysicalSize;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::connection::{EditSession, SessionId};
use crate::keyboard::KeyboardController;
use crate::signal::EventSink;

/// Identifies the window the surface is attached to.
///
/// This is what the platform keyboard service uses to find the input to dismiss.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowToken(u64);

impl WindowToken {
    /// Convert the `WindowToken` into the underlying integer.
    ///
    /// This is useful if you need to pass the token across an FFI boundary, or store it in an
    /// atomic.
    pub const fn into_raw(self) -> u64 {
        self.0
    }

    /// Construct a `WindowToken` from the underlying integer.
    ///
    /// This should only be called with integers returned from [`WindowToken::into_raw`].
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

bitflags! {
    /// The kind of content the surface accepts, as reported to the input method.
    ///
    /// Values match Android's `InputType` so backends can pass them through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct InputType: u32 {
        const NULL = 0;
        /// Plain text.
        const TEXT = 0x1;
    }
}

bitflags! {
    /// Extra options reported to the input method.
    ///
    /// Values match Android's `EditorInfo.imeOptions`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ImeOptions: u32 {
        /// The action key reads "done".
        const ACTION_DONE = 0x6;
        /// Never take over the whole screen with an extracted text view.
        const NO_FULLSCREEN = 0x0200_0000;
    }
}

/// Editor attributes negotiated with the input method when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditorInfo {
    pub input_type: InputType,
    pub ime_options: ImeOptions,
}

/// Attributes used when creating the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceAttributes {
    pub size: PhysicalSize<u32>,
    pub focusable: bool,
    pub focusable_in_touch_mode: bool,
    pub input_type: InputType,
    pub ime_options: ImeOptions,
}

impl Default for SurfaceAttributes {
    #[inline]
    fn default() -> Self {
        Self {
            size: PhysicalSize::new(1, 1),
            focusable: true,
            focusable_in_touch_mode: true,
            input_type: InputType::TEXT,
            ime_options: ImeOptions::NO_FULLSCREEN | ImeOptions::ACTION_DONE,
        }
    }
}

impl SurfaceAttributes {
    /// Size of the capture region. The default of one physical pixel keeps it invisible.
    #[inline]
    pub fn with_size(mut self, size: PhysicalSize<u32>) -> Self {
        self.size = size;
        self
    }

    #[inline]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    #[inline]
    pub fn with_focusable_in_touch_mode(mut self, focusable: bool) -> Self {
        self.focusable_in_touch_mode = focusable;
        self
    }

    #[inline]
    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    #[inline]
    pub fn with_ime_options(mut self, ime_options: ImeOptions) -> Self {
        self.ime_options = ime_options;
        self
    }
}

/// The focusable, zero-footprint region owning IME focus.
///
/// Owned by the UI thread. Lives as long as the window it is attached to.
#[derive(Debug)]
pub struct InputSurface {
    attributes: SurfaceAttributes,
    window_token: Option<WindowToken>,
    focused: bool,
    active_session: Option<SessionId>,
}

impl InputSurface {
    pub fn new(attributes: SurfaceAttributes) -> Self {
        Self { attributes, window_token: None, focused: false, active_session: None }
    }

    #[inline]
    pub fn attributes(&self) -> &SurfaceAttributes {
        &self.attributes
    }

    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.attributes.size
    }

    /// Attach the surface to the application's window.
    pub fn attach(&mut self, token: WindowToken) {
        debug!("Input surface attached to window {token:?}");
        self.window_token = Some(token);
    }

    /// Detach from the window, dropping focus and any active session.
    pub fn detach(&mut self) {
        if let Some(token) = self.window_token.take() {
            debug!("Input surface detached from window {token:?}");
        }
        self.focused = false;
        self.active_session = None;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.window_token.is_some()
    }

    #[inline]
    pub fn window_token(&self) -> Option<WindowToken> {
        self.window_token
    }

    /// Always `true`: this is what makes the platform route input method callbacks here.
    #[inline]
    pub fn check_is_text_editor(&self) -> bool {
        true
    }

    /// Take IME focus. Fails when detached or not focusable.
    pub fn request_focus(&mut self) -> bool {
        if !self.is_attached() || !self.attributes.focusable {
            return false;
        }
        if !self.focused {
            trace!("Input surface gained focus");
        }
        self.focused = true;
        true
    }

    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn clear_focus(&mut self) {
        self.focused = false;
    }

    /// Start an editing session on behalf of the platform.
    ///
    /// Fills `editor_info` with the surface's attributes and replaces any session that is still
    /// open; the platform only ever talks to the most recent one.
    pub fn create_input_session(
        &mut self,
        editor_info: &mut EditorInfo,
        sink: Rc<dyn EventSink>,
        keyboard: KeyboardController,
    ) -> EditSession {
        editor_info.input_type = self.attributes.input_type;
        editor_info.ime_options = self.attributes.ime_options;

        let session = EditSession::new(sink, keyboard);
        if let Some(previous) = self.active_session.replace(session.id()) {
            debug!("Input session {previous:?} replaced by {:?}", session.id());
        } else {
            debug!("Input session {:?} started", session.id());
        }
        session
    }

    /// The platform ended the session `id`.
    pub fn finish_input_session(&mut self, id: SessionId) {
        if self.active_session == Some(id) {
            debug!("Input session {id:?} finished");
            self.active_session = None;
        } else {
            trace!("Ignoring finish of stale input session {id:?}");
        }
    }

    #[inline]
    pub fn active_session(&self) -> Option<SessionId> {
        self.active_session
    }
}
