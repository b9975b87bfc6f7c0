//! softkey bridges a platform soft keyboard to a native application loop.
//!
//! A native application (one that renders by itself instead of through the platform's UI
//! toolkit) still wants text input from the on-screen keyboard. The platform's input method,
//! however, reports edits through several overlapping channels: committed text, requests to
//! delete text around the cursor, and raw key events. softkey reconciles those into one ordered
//! stream of three [`PrimitiveSignal`]s, `CharacterInput`, `DeleteBackward` and `Submit`,
//! delivered to an [`EventSink`] you implement.
//!
//! # Building the bridge
//!
//! Everything the bridge needs lives in a [`BridgeContext`], created once on the UI thread:
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use softkey::buffer::SignalBuffer;
//! use softkey::connection::InputConnection;
//! use softkey::context::{BridgeAttributes, BridgeContext};
//! use softkey::surface::{EditorInfo, WindowToken};
//!
//! let input = SignalBuffer::default();
//! let attributes = BridgeAttributes::default().with_window_token(WindowToken::from_raw(0));
//! let mut context = BridgeContext::new(attributes, Rc::new(input.clone()));
//!
//! // Usable from any thread, e.g. the render thread.
//! let keyboard = context.keyboard();
//! keyboard.show();
//!
//! // When the platform starts an editing session.
//! let mut session = context.start_input(&mut EditorInfo::default());
//! session.commit_text("hi\n");
//!
//! // Once per UI loop iteration.
//! context.run_pending();
//!
//! for signal in input.drain() {
//!     println!("{signal:?}");
//! }
//! ```
//!
//! Platform backends install a [`KeyboardService`] with
//! [`BridgeContext::with_keyboard_service`], and drive [`InputConnection`] from their raw
//! callbacks. On Android, [`platform::android`] does all of this for an `android-activity`
//! application.
//!
//! # Threading
//!
//! All input callbacks, and with them every [`EventSink`] call, happen on the UI thread.
//! [`KeyboardController::show`] and [`KeyboardController::hide`] may be called from any thread:
//! they queue a request that runs on the UI thread during the next
//! [`BridgeContext::run_pending`], in the order they were issued. They never block, and silently
//! do nothing when the keyboard service or the window isn't available.
//!
//! # Cargo Features
//!
//! softkey provides the following Cargo features:
//!
//! * `serde`: Enables serialization/deserialization of the plain data types, such as
//!   [`PrimitiveSignal`], [`RawKeyEvent`] and [`EditorInfo`].
//! * `android-native-activity` / `android-game-activity`: Select the `android-activity` glue used
//!   on Android. One of them must be enabled when building for Android.
//!
//! [`PrimitiveSignal`]: crate::signal::PrimitiveSignal
//! [`EventSink`]: crate::signal::EventSink
//! [`BridgeContext`]: crate::context::BridgeContext
//! [`BridgeContext::with_keyboard_service`]: crate::context::BridgeContext::with_keyboard_service
//! [`BridgeContext::run_pending`]: crate::context::BridgeContext::run_pending
//! [`KeyboardService`]: crate::keyboard::KeyboardService
//! [`KeyboardController::show`]: crate::keyboard::KeyboardController::show
//! [`KeyboardController::hide`]: crate::keyboard::KeyboardController::hide
//! [`InputConnection`]: crate::connection::InputConnection
//! [`RawKeyEvent`]: crate::input::RawKeyEvent
//! [`EditorInfo`]: crate::surface::EditorInfo

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use softkey_core::{
    buffer, connection, context, error, input, keyboard, normalize, signal, surface, ui_thread,
};

pub mod platform;
