//! Core types and device traits shared by all PadPointer crates.

pub mod platform;
pub mod types;
