//! Nexus Hardware Abstraction Layer
//!
//! This crate defines the vendor-independent interface the flight software
//! is written against. Chip-specific crates (currently TMS570) implement
//! these traits by translating the small, stable identifier space below
//! into vendor driver handles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (nexus-core, firmware)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nexus-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nexus-hal-tms570 (HALCoGen wrapper)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::Gpio`] - Port/pin digital I/O
//! - [`uart::Uart`] - Polled serial communication
//! - [`DelayNs`] - Clock capability used for timing (from `embedded-hal`)

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod gpio;
pub mod uart;

// Re-export key types at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use error::HalError;
pub use gpio::{Direction, Gpio, Level, Pin, Port};
pub use uart::{Uart, UartConfig, UartInit, UartInstance};
