//! UART serial communication abstractions
//!
//! Polled, synchronous serial I/O addressed by logical instance. Writes
//! block in the vendor driver until the transfer completes; reads never
//! block.

use core::ffi::CStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::HalError;

/// Logical UART instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum UartInstance {
    /// Debug console
    Uart1 = 0,
    Uart2 = 1,
    Uart3 = 2,
    Uart4 = 3,
}

impl UartInstance {
    /// Number of logical instances
    pub const COUNT: usize = 4;

    /// All logical instances
    pub const ALL: [UartInstance; Self::COUNT] = [
        UartInstance::Uart1,
        UartInstance::Uart2,
        UartInstance::Uart3,
        UartInstance::Uart4,
    ];

    /// Zero-based index, suitable for per-instance tables
    pub fn index(self) -> usize {
        self as usize
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    ///
    /// Recorded per instance. Whether it takes effect depends on the
    /// implementation, see [`UartInit`].
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

/// Outcome of a successful [`Uart::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartInit {
    /// The instance runs with the requested configuration
    Applied,
    /// The instance is usable, but the hardware runs at `actual` baud
    /// regardless of what was requested
    BaudrateIgnored { requested: u32, actual: u32 },
}

/// Polled UART controller
pub trait Uart {
    /// Prepare an instance for use
    fn init(&mut self, instance: UartInstance, config: &UartConfig)
        -> Result<UartInit, HalError>;

    /// Transmit `data`, blocking until the vendor driver has sent it
    ///
    /// Returns the number of bytes written, equal to `data.len()`. An empty
    /// buffer transmits nothing.
    fn write(&mut self, instance: UartInstance, data: &[u8]) -> Result<usize, HalError>;

    /// Transmit a string
    fn write_str(&mut self, instance: UartInstance, text: &str) -> Result<usize, HalError> {
        self.write(instance, text.as_bytes())
    }

    /// Transmit a null-terminated string, excluding the terminator
    fn write_cstr(&mut self, instance: UartInstance, text: &CStr) -> Result<usize, HalError> {
        self.write(instance, text.to_bytes())
    }

    /// Read pending bytes without blocking
    ///
    /// Returns 0 immediately when nothing has been received, otherwise the
    /// number of bytes placed in `buf` (at most `buf.len()`).
    fn read(&mut self, instance: UartInstance, buf: &mut [u8]) -> Result<usize, HalError>;

    /// Whether received data is waiting, without consuming it
    fn data_available(&mut self, instance: UartInstance) -> Result<bool, HalError>;
}
