#![cfg(feature = "serde")]

use serde::{Deserialize, Serialize};
use softkey::input::{KeyAction, Keycode, RawKeyEvent};
use softkey::signal::PrimitiveSignal;
use softkey::surface::{EditorInfo, ImeOptions, InputType, SurfaceAttributes, WindowToken};

#[allow(dead_code)]
fn needs_serde<S: Serialize + Deserialize<'static>>() {}

#[test]
fn signal_serde() {
    needs_serde::<PrimitiveSignal>();
}

#[test]
fn input_serde() {
    needs_serde::<RawKeyEvent>();
    needs_serde::<KeyAction>();
    needs_serde::<Keycode>();
}

#[test]
fn surface_serde() {
    needs_serde::<WindowToken>();
    needs_serde::<InputType>();
    needs_serde::<ImeOptions>();
    needs_serde::<EditorInfo>();
    needs_serde::<SurfaceAttributes>();
}
