//! Contains platform-specific backends.
//!
//! Contains the follow OS-specific modules:
//!
//!  - `android`
//!
//! However only the module corresponding to the platform you're compiling to will be available.

#[cfg(android_platform)]
pub mod android;
