//! TMS570-specific HAL for the Nexus flight software
//!
//! This crate implements the `nexus-hal` traits for TMS570 (Cortex-R5F)
//! microcontrollers on top of the HALCoGen peripheral driver library:
//!
//! - GIO ports A/B as [`nexus_hal::Gpio`] (plus `embedded-hal` pin handles)
//! - SCI/LIN channels as [`nexus_hal::Uart`] (plus `embedded-io` ports)
//! - RTI free-running counter as a [`nexus_hal::DelayNs`] clock
//!
//! The vendor library is reached only through the [`vendor`] traits.
//! With the `halcogen` feature those are implemented over the real C
//! library; with `sim` a register-level simulation is provided for host
//! tests.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod uart;
pub mod vendor;

#[cfg(feature = "halcogen")]
pub mod halcogen;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use delay::RtiClock;
pub use gpio::{GioPin, Tms570Gpio};
pub use uart::{Tms570Uart, UartPort};

// Re-export the abstraction this crate implements
pub use nexus_hal::{Direction, HalError, Level, Pin, Port, UartConfig, UartInstance};
