//! Side-scrolling shooter simulation.
//!
//! Integration tests in `tests/` are compiled as separate crates.
//! A `lib.rs` gives them a stable public API surface to import.

pub mod common;
pub mod game;
pub mod plugins;
