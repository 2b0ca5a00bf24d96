//! Configuration types
//!
//! Board wiring and timing. Configuration is fixed at build time: the
//! firmware build script validates `board.toml` and generates a
//! [`BoardConfig`] constructor from it.

pub mod board;

pub use board::*;
