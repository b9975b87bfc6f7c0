//! Base types for a soft-keyboard input bridge.
//!
//! This crate contains the platform independent part of [`softkey`]: the primitive signals
//! delivered to the native application, the raw event types reported by a platform input method,
//! the stateless normalizer translating one into the other, and the UI-thread plumbing used to
//! show and hide the soft keyboard from any thread.
//!
//! Platform backends (such as `softkey-android`) implement [`keyboard::KeyboardService`] and
//! [`ui_thread::UiWaker`], and feed raw callbacks into an [`connection::InputConnection`].
//!
//! [`softkey`]: https://docs.rs/softkey

pub mod buffer;
pub mod connection;
pub mod context;
pub mod error;
pub mod input;
pub mod keyboard;
pub mod normalize;
pub mod signal;
pub mod surface;
pub mod ui_thread;
