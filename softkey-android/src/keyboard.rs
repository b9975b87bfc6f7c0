use std::fmt;

use android_activity::{AndroidApp, AndroidAppWaker};
use softkey_core::keyboard::KeyboardService;
use softkey_core::surface::{InputSurface, WindowToken};
use softkey_core::ui_thread::UiWaker;
use tracing::trace;

/// Soft keyboard visibility through the activity's `InputMethodManager`.
#[derive(Debug, Clone)]
pub struct AndroidKeyboardService {
    app: AndroidApp,
}

impl AndroidKeyboardService {
    pub fn new(app: AndroidApp) -> Self {
        Self { app }
    }
}

impl KeyboardService for AndroidKeyboardService {
    fn show_soft_input(&self, surface: &InputSurface) {
        trace!("Showing soft input, surface size {:?}", surface.size());
        // Explicit request; an implicit one may be ignored when no view asked for text.
        self.app.show_soft_input(false);
    }

    fn hide_soft_input(&self, token: WindowToken) {
        // The activity only has one window, the token is implied.
        trace!("Hiding soft input for {token:?}");
        self.app.hide_soft_input(false);
    }
}

/// Wakes a thread blocked in `AndroidApp::poll_events`.
#[derive(Clone)]
pub struct AndroidWaker {
    waker: AndroidAppWaker,
}

impl AndroidWaker {
    pub fn new(app: &AndroidApp) -> Self {
        Self { waker: app.create_waker() }
    }
}

impl fmt::Debug for AndroidWaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndroidWaker").finish_non_exhaustive()
    }
}

impl UiWaker for AndroidWaker {
    fn wake_up(&self) {
        self.waker.wake();
    }
}
