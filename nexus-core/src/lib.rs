//! Board-agnostic application logic for the Nexus flight software
//!
//! This crate contains everything that does not depend on a particular
//! chip, written against the `nexus-hal` traits:
//!
//! - Board configuration types (LED wiring, debug console, blink timing)
//! - Startup/run state machine with a halted safe state
//! - The blink application and its fault reporting

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod state;

pub use app::{Blinky, BANNER};
pub use config::BoardConfig;
pub use state::{Event, Fault, State};
