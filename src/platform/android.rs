//! # Android
//!
//! The Android backend builds on the [`android-activity`] crate. Hand every event from
//! `AndroidApp::poll_events` to an [`AndroidBridge`], and enable one of the
//! `android-native-activity` or `android-game-activity` features.
//!
//! [`android-activity`]: https://docs.rs/android-activity

#[doc(inline)]
pub use softkey_android::{activity, AndroidBridge, AndroidKeyboardService, AndroidWaker};
