//! The explicitly constructed bridge state owned by the UI thread.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use dpi::PhysicalSize;
use tracing::debug;

use crate::connection::{EditSession, SessionId};
use crate::keyboard::{self, KeyboardController, KeyboardService};
use crate::signal::EventSink;
use crate::surface::{
    EditorInfo, ImeOptions, InputSurface, InputType, SurfaceAttributes, WindowToken,
};
use crate::ui_thread::{ui_queue, UiQueue, UiThreadProxy, UiWaker};

/// Attributes used when creating a [`BridgeContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeAttributes {
    pub surface: SurfaceAttributes,
    pub window_token: Option<WindowToken>,
}

impl BridgeAttributes {
    #[inline]
    pub fn with_surface_size(mut self, size: PhysicalSize<u32>) -> Self {
        self.surface = self.surface.with_size(size);
        self
    }

    #[inline]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.surface =
            self.surface.with_focusable(focusable).with_focusable_in_touch_mode(focusable);
        self
    }

    #[inline]
    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.surface = self.surface.with_input_type(input_type);
        self
    }

    #[inline]
    pub fn with_ime_options(mut self, ime_options: ImeOptions) -> Self {
        self.surface = self.surface.with_ime_options(ime_options);
        self
    }

    /// Attach the surface to this window right away.
    #[inline]
    pub fn with_window_token(mut self, token: WindowToken) -> Self {
        self.window_token = Some(token);
        self
    }
}

/// Everything the bridge needs, created once at startup and owned by the UI thread for the
/// lifetime of the process.
///
/// Hand out [`KeyboardController`]s (via [`keyboard`](Self::keyboard)) to other threads, and call
/// [`run_pending`](Self::run_pending) from the UI loop.
pub struct BridgeContext {
    surface: InputSurface,
    sink: Rc<dyn EventSink>,
    proxy: UiThreadProxy,
    queue: UiQueue,
    service: Option<Box<dyn KeyboardService>>,
}

impl fmt::Debug for BridgeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeContext")
            .field("surface", &self.surface)
            .field("proxy", &self.proxy)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

impl BridgeContext {
    pub fn new(attributes: BridgeAttributes, sink: Rc<dyn EventSink>) -> Self {
        let mut surface = InputSurface::new(attributes.surface);
        if let Some(token) = attributes.window_token {
            surface.attach(token);
        }
        let (proxy, queue) = ui_queue();
        Self { surface, sink, proxy, queue, service: None }
    }

    /// Install the platform keyboard service. Without one, show and hide requests are no-ops.
    pub fn with_keyboard_service(mut self, service: impl KeyboardService + 'static) -> Self {
        self.service = Some(Box::new(service));
        self
    }

    /// Install the waker used to rouse the UI loop when a request is queued.
    ///
    /// Only controllers obtained after this call will use it.
    pub fn with_waker(mut self, waker: Arc<dyn UiWaker>) -> Self {
        self.proxy.set_waker(waker);
        self
    }

    /// A controller that can be sent to, and used from, any thread.
    pub fn keyboard(&self) -> KeyboardController {
        KeyboardController::new(self.proxy.clone())
    }

    #[inline]
    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut InputSurface {
        &mut self.surface
    }

    /// The platform started an editing session on the surface.
    pub fn start_input(&mut self, editor_info: &mut EditorInfo) -> EditSession {
        let keyboard = self.keyboard();
        self.surface.create_input_session(editor_info, self.sink.clone(), keyboard)
    }

    /// The platform ended the editing session `id`.
    pub fn finish_input(&mut self, id: SessionId) {
        self.surface.finish_input_session(id);
    }

    /// Run the UI requests queued before this call, in the order they were issued.
    ///
    /// Requests sent while this runs wait for the next call. Returns how many requests were
    /// taken off the queue, including the ones that turned into no-ops. Must be called on the UI
    /// thread.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        let service = self.service.as_deref();
        for request in self.queue.drain() {
            count += 1;
            if let Err(err) = keyboard::perform(request, &mut self.surface, service) {
                debug!("Skipping {request:?}: {err}");
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::buffer::SignalBuffer;
    use crate::connection::InputConnection;
    use crate::input::{Keycode, RawKeyEvent};
    use crate::signal::PrimitiveSignal::{CharacterInput, DeleteBackward};

    #[derive(Debug, Clone, Default)]
    struct SharedLog(Rc<RefCell<Vec<&'static str>>>);

    impl KeyboardService for SharedLog {
        fn show_soft_input(&self, _surface: &InputSurface) {
            self.0.borrow_mut().push("show");
        }

        fn hide_soft_input(&self, _token: WindowToken) {
            self.0.borrow_mut().push("hide");
        }
    }

    fn attached() -> BridgeAttributes {
        BridgeAttributes::default().with_window_token(WindowToken::from_raw(1))
    }

    #[test]
    fn requests_run_only_when_drained() {
        let log = SharedLog::default();
        let mut ctx = BridgeContext::new(attached(), Rc::new(SignalBuffer::default()))
            .with_keyboard_service(log.clone());

        ctx.keyboard().show();
        ctx.keyboard().hide();
        assert!(log.0.borrow().is_empty());

        assert_eq!(ctx.run_pending(), 2);
        assert_eq!(*log.0.borrow(), ["show", "hide"]);
        assert!(ctx.surface().has_focus());
        assert_eq!(ctx.run_pending(), 0);
    }

    #[test]
    fn no_service_degrades_to_noop() {
        let mut ctx = BridgeContext::new(attached(), Rc::new(SignalBuffer::default()));
        ctx.keyboard().hide();
        ctx.keyboard().hide();
        assert_eq!(ctx.run_pending(), 2);
    }

    #[test]
    fn detached_surface_degrades_to_noop() {
        let log = SharedLog::default();
        let sink = Rc::new(SignalBuffer::default());
        let mut ctx = BridgeContext::new(BridgeAttributes::default(), sink)
            .with_keyboard_service(log.clone());
        ctx.keyboard().show();
        ctx.keyboard().hide();
        assert_eq!(ctx.run_pending(), 2);
        assert!(log.0.borrow().is_empty());
        assert!(!ctx.surface().has_focus());
    }

    /// Asks for the keyboard again every time it is shown, like a render loop calling `show`
    /// each frame.
    #[derive(Debug)]
    struct ReShowing {
        keyboard: KeyboardController,
        shown: Rc<RefCell<usize>>,
    }

    impl KeyboardService for ReShowing {
        fn show_soft_input(&self, _surface: &InputSurface) {
            *self.shown.borrow_mut() += 1;
            self.keyboard.show();
        }

        fn hide_soft_input(&self, _token: WindowToken) {}
    }

    #[test]
    fn requests_sent_while_running_wait_for_next_call() {
        let ctx = BridgeContext::new(attached(), Rc::new(SignalBuffer::default()));
        let shown = Rc::new(RefCell::new(0));
        let service = ReShowing { keyboard: ctx.keyboard(), shown: shown.clone() };
        let mut ctx = ctx.with_keyboard_service(service);

        ctx.keyboard().show();
        assert_eq!(ctx.run_pending(), 1);
        assert_eq!(*shown.borrow(), 1);
        assert_eq!(ctx.run_pending(), 1);
        assert_eq!(*shown.borrow(), 2);
    }

    #[test]
    fn session_round_trip() {
        let log = SharedLog::default();
        let buffer = SignalBuffer::default();
        let mut ctx = BridgeContext::new(attached(), Rc::new(buffer.clone()))
            .with_keyboard_service(log.clone());

        let mut info = EditorInfo::default();
        let mut session = ctx.start_input(&mut info);
        assert_eq!(info.input_type, InputType::TEXT);

        session.commit_text("o");
        session.send_key_event(&RawKeyEvent::press(Keycode::Delete));
        session.send_key_event(&RawKeyEvent::press(Keycode::Enter));
        assert_eq!(buffer.drain(), [CharacterInput('o'), DeleteBackward]);

        assert_eq!(ctx.run_pending(), 1);
        assert_eq!(*log.0.borrow(), ["hide"]);

        ctx.finish_input(session.id());
        assert_eq!(ctx.surface().active_session(), None);
    }
}
