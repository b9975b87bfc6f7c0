//! # Android
//!
//! The Android backend builds on (and exposes types from) the [`android-activity`] crate.
//!
//! Native Android applications need some form of "glue" crate that is responsible for defining
//! the main entry point for your Rust application as well as tracking various life-cycle events
//! and synchronizing with the main thread. This backend expects the application to own its
//! `poll_events` loop and to hand every [`PollEvent`](activity::PollEvent) to an
//! [`AndroidBridge`]:
//!
//! ```rust,ignore
//! use std::rc::Rc;
//!
//! use softkey_android::activity::AndroidApp;
//! use softkey_android::AndroidBridge;
//! use softkey_core::buffer::SignalBuffer;
//! use softkey_core::context::BridgeAttributes;
//!
//! #[no_mangle]
//! fn android_main(app: AndroidApp) {
//!     let input = SignalBuffer::default();
//!     let mut bridge =
//!         AndroidBridge::new(app.clone(), Rc::new(input.clone()), BridgeAttributes::default());
//!     let keyboard = bridge.keyboard();
//!     keyboard.show();
//!     loop {
//!         app.poll_events(None, |event| bridge.handle_poll_event(&event));
//!         for signal in input.drain() {
//!             // Feed the application.
//!         }
//!     }
//! }
//! ```
//!
//! With the `native-activity` feature, soft keyboard input arrives as key events and is mapped to
//! characters through the device's key character map. With `game-activity`, the keyboard edits a
//! Java-side text buffer and every change is reported as a snapshot of its contents; the bridge
//! turns the difference to the last committed snapshot into deletes and commits, and ignores
//! snapshots with an active composition until it is finished.
//!
//! [`android-activity`]: https://docs.rs/android-activity
#![cfg(target_os = "android")]

mod bridge;
mod keyboard;

pub use crate::bridge::AndroidBridge;
pub use crate::keyboard::{AndroidKeyboardService, AndroidWaker};

/// Re-export of the `android_activity` API
///
/// softkey re-exports the `android_activity` API for convenience so that most applications can
/// rely on softkey to resolve the required version of `android_activity` and avoid any chance of
/// a conflict between softkey and the application crate.
pub mod activity {
    #[doc(no_inline)]
    pub use android_activity::*;
}
