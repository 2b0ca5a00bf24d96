//! The blink application
//!
//! Startup prints the banner on the debug console and configures the status
//! LED; the run loop then toggles the LED every half-period.

pub mod blinky;

pub use blinky::Blinky;

/// Startup banner sent on the debug console
pub const BANNER: &str = "\r\n=== Nexus Flight Software ===\r\n";
