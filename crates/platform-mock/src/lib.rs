//! In-memory mock device backends for PadPointer tests.
//!
//! The pointer device records every warp and visibility change so tests
//! can assert on the exact device traffic; the gamepad source replays
//! whatever snapshot a test scripts into it.

pub mod gamepad;
pub mod pointer;
