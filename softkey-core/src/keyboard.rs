//! Showing and hiding the soft keyboard.

use std::fmt;

use tracing::debug;

use crate::error::ServiceUnavailable;
use crate::surface::{InputSurface, WindowToken};
use crate::ui_thread::{UiRequest, UiThreadProxy};

/// The platform's keyboard visibility service.
///
/// Only ever called on the UI thread.
pub trait KeyboardService: fmt::Debug {
    /// Force the soft keyboard on screen for `surface`, which already holds focus.
    fn show_soft_input(&self, surface: &InputSurface);

    /// Dismiss any soft keyboard attached to the window identified by `token`.
    fn hide_soft_input(&self, token: WindowToken);
}

/// Shows and hides the soft keyboard from any thread.
///
/// Both operations are fire-and-forget: they queue a request for the UI thread and return
/// immediately. Requests issued in sequence from one thread run in that order. When the UI thread
/// can't act on a request (it is gone, the surface isn't attached, there is no keyboard service)
/// the request is dropped silently and the keyboard stays as it was.
#[derive(Debug, Clone)]
pub struct KeyboardController {
    proxy: UiThreadProxy,
}

impl KeyboardController {
    pub fn new(proxy: UiThreadProxy) -> Self {
        Self { proxy }
    }

    /// Focus the input surface and show the soft keyboard.
    pub fn show(&self) {
        self.request(UiRequest::ShowKeyboard);
    }

    /// Hide the soft keyboard.
    pub fn hide(&self) {
        self.request(UiRequest::HideKeyboard);
    }

    fn request(&self, request: UiRequest) {
        if let Err(err) = self.proxy.send(request) {
            debug!("Dropping {request:?}: {err}");
        }
    }
}

/// Carry out a keyboard request. Must run on the UI thread.
pub(crate) fn perform(
    request: UiRequest,
    surface: &mut InputSurface,
    service: Option<&dyn KeyboardService>,
) -> Result<(), ServiceUnavailable> {
    match request {
        UiRequest::ShowKeyboard => {
            if !surface.is_attached() {
                return Err(ServiceUnavailable::NotAttached);
            }
            if !surface.request_focus() {
                return Err(ServiceUnavailable::NotFocusable);
            }
            let service = service.ok_or(ServiceUnavailable::NoKeyboardService)?;
            service.show_soft_input(surface);
        },
        UiRequest::HideKeyboard => {
            let service = service.ok_or(ServiceUnavailable::NoKeyboardService)?;
            let token = surface.window_token().ok_or(ServiceUnavailable::NotAttached)?;
            service.hide_soft_input(token);
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::surface::SurfaceAttributes;
    use crate::ui_thread::ui_queue;

    #[derive(Debug, Default)]
    struct RecordingService(RefCell<Vec<String>>);

    impl KeyboardService for RecordingService {
        fn show_soft_input(&self, surface: &InputSurface) {
            assert!(surface.has_focus());
            self.0.borrow_mut().push("show".into());
        }

        fn hide_soft_input(&self, token: WindowToken) {
            self.0.borrow_mut().push(format!("hide {}", token.into_raw()));
        }
    }

    fn attached_surface() -> InputSurface {
        let mut surface = InputSurface::new(SurfaceAttributes::default());
        surface.attach(WindowToken::from_raw(3));
        surface
    }

    #[test]
    fn controller_only_queues() {
        let (proxy, mut queue) = ui_queue();
        let keyboard = KeyboardController::new(proxy);
        keyboard.show();
        keyboard.hide();
        keyboard.hide();
        let queued: Vec<_> = queue.drain().collect();
        assert_eq!(
            queued,
            [UiRequest::ShowKeyboard, UiRequest::HideKeyboard, UiRequest::HideKeyboard]
        );
    }

    #[test]
    fn controller_tolerates_closed_queue() {
        let (proxy, queue) = ui_queue();
        drop(queue);
        let keyboard = KeyboardController::new(proxy);
        keyboard.show();
        keyboard.hide();
    }

    #[test]
    fn show_focuses_then_shows() {
        let service = RecordingService::default();
        let mut surface = attached_surface();
        perform(UiRequest::ShowKeyboard, &mut surface, Some(&service)).unwrap();
        assert!(surface.has_focus());
        assert_eq!(*service.0.borrow(), ["show"]);
    }

    #[test]
    fn hide_uses_window_token() {
        let service = RecordingService::default();
        let mut surface = attached_surface();
        perform(UiRequest::HideKeyboard, &mut surface, Some(&service)).unwrap();
        perform(UiRequest::HideKeyboard, &mut surface, Some(&service)).unwrap();
        assert_eq!(*service.0.borrow(), ["hide 3", "hide 3"]);
    }

    #[test]
    fn missing_service_or_window_is_reported() {
        let service = RecordingService::default();
        let mut detached = InputSurface::new(SurfaceAttributes::default());
        assert_eq!(
            perform(UiRequest::ShowKeyboard, &mut detached, Some(&service)),
            Err(ServiceUnavailable::NotAttached)
        );
        assert_eq!(
            perform(UiRequest::HideKeyboard, &mut detached, Some(&service)),
            Err(ServiceUnavailable::NotAttached)
        );
        assert_eq!(
            perform(UiRequest::HideKeyboard, &mut attached_surface(), None),
            Err(ServiceUnavailable::NoKeyboardService)
        );
        assert!(service.0.borrow().is_empty());
    }

    #[test]
    fn show_takes_focus_even_without_service() {
        let mut surface = attached_surface();
        assert_eq!(
            perform(UiRequest::ShowKeyboard, &mut surface, None),
            Err(ServiceUnavailable::NoKeyboardService)
        );
        assert!(surface.has_focus());
    }

    #[test]
    fn unfocusable_surface_is_reported() {
        let service = RecordingService::default();
        let mut surface = InputSurface::new(SurfaceAttributes::default().with_focusable(false));
        surface.attach(WindowToken::from_raw(3));
        assert_eq!(
            perform(UiRequest::ShowKeyboard, &mut surface, Some(&service)),
            Err(ServiceUnavailable::NotFocusable)
        );
        assert!(!surface.has_focus());
        assert!(service.0.borrow().is_empty());
    }
}
