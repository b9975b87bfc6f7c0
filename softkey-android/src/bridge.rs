use std::rc::Rc;
use std::sync::Arc;

use android_activity::input::{
    InputEvent, KeyAction, KeyEvent, KeyMapChar, Keycode, TextInputState,
};
use android_activity::{AndroidApp, InputStatus, MainEvent, PollEvent};
use softkey_core::connection::{EditSession, InputConnection};
use softkey_core::context::{BridgeAttributes, BridgeContext};
use softkey_core::input::{self, RawKeyEvent};
use softkey_core::normalize;
use softkey_core::keyboard::KeyboardController;
use softkey_core::signal::EventSink;
use softkey_core::surface::{EditorInfo, WindowToken};
use tracing::{debug, trace, warn};

use crate::keyboard::{AndroidKeyboardService, AndroidWaker};

// An activity only ever has the one window.
const GLOBAL_WINDOW: WindowToken = WindowToken::from_raw(0);

/// Connects an [`AndroidApp`] to a [`BridgeContext`].
///
/// Lives on the thread running `android_main`, which is the thread the activity delivers input
/// on. An edit session is open for as long as the activity has a native window.
#[derive(Debug)]
pub struct AndroidBridge {
    app: AndroidApp,
    context: BridgeContext,
    session: Option<EditSession>,
    combining_accent: Option<char>,
    // Last editor contents seen without an active composition.
    committed_text: String,
}

impl AndroidBridge {
    pub fn new(app: AndroidApp, sink: Rc<dyn EventSink>, attributes: BridgeAttributes) -> Self {
        let context = BridgeContext::new(attributes, sink)
            .with_keyboard_service(AndroidKeyboardService::new(app.clone()))
            .with_waker(Arc::new(AndroidWaker::new(&app)));
        let mut bridge = Self {
            app,
            context,
            session: None,
            combining_accent: None,
            committed_text: String::new(),
        };
        if bridge.app.native_window().is_some() {
            bridge.start_session();
        }
        bridge
    }

    /// A controller that can show or hide the soft keyboard from any thread.
    pub fn keyboard(&self) -> KeyboardController {
        self.context.keyboard()
    }

    pub fn context(&self) -> &BridgeContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BridgeContext {
        &mut self.context
    }

    /// Process one iteration's worth of activity events.
    ///
    /// Call this from the `poll_events` callback. It handles life-cycle events, forwards all
    /// pending input, then runs queued keyboard requests.
    pub fn handle_poll_event(&mut self, event: &PollEvent<'_>) {
        match event {
            PollEvent::Main(main_event) => self.handle_main_event(main_event),
            PollEvent::Wake => trace!("Woken up"),
            PollEvent::Timeout => {},
            unknown => trace!("Unknown PollEvent {unknown:?} (ignored)"),
        }

        self.handle_input_events();
        self.context.run_pending();
    }

    pub fn handle_main_event(&mut self, event: &MainEvent<'_>) {
        match event {
            MainEvent::InitWindow { .. } => self.start_session(),
            MainEvent::TerminateWindow { .. } => {
                if let Some(session) = self.session.take() {
                    self.context.finish_input(session.id());
                }
                self.context.surface_mut().detach();
            },
            MainEvent::LostFocus => self.context.surface_mut().clear_focus(),
            MainEvent::InputAvailable => {},
            unknown => trace!("Unhandled MainEvent {unknown:?}"),
        }
    }

    /// Drain the activity's input queue into the current edit session.
    pub fn handle_input_events(&mut self) {
        let app = self.app.clone();
        let mut events = match app.input_events_iter() {
            Ok(events) => events,
            Err(err) => {
                warn!("Failed to get input events iterator: {err:?}");
                return;
            },
        };

        while events.next(|event| self.handle_input_event(&app, event)) {}
    }

    fn start_session(&mut self) {
        self.context.surface_mut().attach(GLOBAL_WINDOW);
        let mut editor_info = EditorInfo::default();
        let session = self.context.start_input(&mut editor_info);
        debug!("Editing with {editor_info:?}");
        self.session = Some(session);
        self.committed_text = self.app.text_input_state().text;
    }

    fn handle_input_event(&mut self, app: &AndroidApp, event: &InputEvent<'_>) -> InputStatus {
        match event {
            InputEvent::KeyEvent(key) => self.handle_key_event(app, key),
            InputEvent::TextEvent(state) => self.handle_text_event(state),
            _ => {
                trace!("Ignoring input event {event:?}");
                InputStatus::Unhandled
            },
        }
    }

    fn handle_key_event(&mut self, app: &AndroidApp, key: &KeyEvent<'_>) -> InputStatus {
        let Some(session) = self.session.as_mut() else {
            trace!("No edit session, ignoring {key:?}");
            return InputStatus::Unhandled;
        };

        let raw = RawKeyEvent::new(to_action(key.action()), to_keycode(key.key_code()));
        if session.send_key_event(&raw) {
            return InputStatus::Handled;
        }
        if key.action() != KeyAction::Down {
            return InputStatus::Unhandled;
        }

        // Keys the session didn't consume may still produce text, which the platform would
        // otherwise have committed through an input connection.
        match character_map_and_combine_key(app, key, &mut self.combining_accent) {
            Some(KeyMapChar::Unicode(ch)) => {
                session.commit_text(ch.encode_utf8(&mut [0; 4]));
                InputStatus::Handled
            },
            Some(KeyMapChar::CombiningAccent(_)) => InputStatus::Handled,
            _ => InputStatus::Unhandled,
        }
    }

    /// GameActivity reports soft keyboard edits as snapshots of the editor contents.
    fn handle_text_event(&mut self, state: &TextInputState) -> InputStatus {
        let Some(session) = self.session.as_mut() else {
            trace!("No edit session, ignoring text state {state:?}");
            return InputStatus::Unhandled;
        };
        if state.compose_region.is_some() {
            trace!("Composing {:?}", state.text);
            return InputStatus::Handled;
        }

        let edit = normalize::text_edit(&self.committed_text, &state.text);
        trace!("Text state changed by {edit:?}");
        session.apply_text_edit(edit);
        self.committed_text.clone_from(&state.text);
        InputStatus::Handled
    }
}

fn to_action(action: KeyAction) -> input::KeyAction {
    match action {
        KeyAction::Down => input::KeyAction::Down,
        KeyAction::Up => input::KeyAction::Up,
        _ => input::KeyAction::Multiple,
    }
}

fn to_keycode(keycode: Keycode) -> input::Keycode {
    match keycode {
        Keycode::Del => input::Keycode::Delete,
        Keycode::Enter => input::Keycode::Enter,
        other => input::Keycode::Other(other.into()),
    }
}

/// Tries to map the `key_event` to a `KeyMapChar` containing a unicode character or dead key
/// accent.
///
/// Looks up the device's `KeyCharacterMap` and uses it to map the key code and meta state. A dead
/// key accent is remembered and combined with the next key press.
fn character_map_and_combine_key(
    app: &AndroidApp,
    key_event: &KeyEvent<'_>,
    combining_accent: &mut Option<char>,
) -> Option<KeyMapChar> {
    let device_id = key_event.device_id();

    let key_map = match app.device_key_character_map(device_id) {
        Ok(key_map) => key_map,
        Err(err) => {
            warn!("Failed to look up `KeyCharacterMap` for device {device_id}: {err:?}");
            return None;
        },
    };

    match key_map.get(key_event.key_code(), key_event.meta_state()) {
        Ok(KeyMapChar::Unicode(unicode)) => {
            let combined = match combining_accent.take() {
                Some(accent) => match key_map.get_dead_char(accent, unicode) {
                    Ok(combined) => combined,
                    Err(err) => {
                        warn!("Failed to combine dead key '{accent}' with '{unicode}': {err:?}");
                        None
                    },
                },
                None => Some(unicode),
            };
            combined.map(KeyMapChar::Unicode)
        },
        Ok(KeyMapChar::CombiningAccent(accent)) => {
            *combining_accent = Some(accent);
            Some(KeyMapChar::CombiningAccent(accent))
        },
        // Leave any pending accent intact, matching how other Android apps behave.
        Ok(KeyMapChar::None) => None,
        Err(err) => {
            warn!("KeyEvent: Failed to get key map character: {err:?}");
            *combining_accent = None;
            None
        },
    }
}
