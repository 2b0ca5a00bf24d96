//! GPIO port/pin abstractions
//!
//! Pins are addressed by a (port, pin) pair rather than by owned pin
//! objects, so the board wiring can live in configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::HalError;

/// GPIO port identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
}

impl Port {
    /// All defined ports
    pub const ALL: [Port; 2] = [Port::A, Port::B];

    /// Get the port as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a port from a raw identifier
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Port::A),
            1 => Some(Port::B),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Port {
    type Error = HalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Port::from_u8(value).ok_or(HalError::InvalidPort)
    }
}

/// Pin within a port (bit position 0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum Pin {
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
    P5 = 5,
    P6 = 6,
    P7 = 7,
}

impl Pin {
    /// All pins of a port, in bit order
    pub const ALL: [Pin; 8] = [
        Pin::P0,
        Pin::P1,
        Pin::P2,
        Pin::P3,
        Pin::P4,
        Pin::P5,
        Pin::P6,
        Pin::P7,
    ];

    /// Bit index within the port registers
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Register mask selecting this pin
    pub fn mask(self) -> u32 {
        1u32 << self.index()
    }

    /// Create a pin from its bit index
    pub fn from_u8(value: u8) -> Option<Self> {
        Pin::ALL.get(value as usize).copied()
    }
}

impl TryFrom<u8> for Pin {
    type Error = HalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Pin::from_u8(value).ok_or(HalError::InvalidPin)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin.index()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Input,
    Output,
}

/// Logic level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Value as written to / read from a data register bit
    pub fn bit(self) -> u32 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Level from a data register bit (any non-zero value is high)
    pub fn from_bit(bit: u32) -> Self {
        if bit != 0 {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> bool {
        level.is_high()
    }
}

/// Port/pin GPIO controller
///
/// Implementations translate [`Port`] into a vendor port handle and fail
/// with [`HalError::InvalidPort`] when the port has no hardware on the
/// current board. A failed call must not touch any register.
pub trait Gpio {
    /// One-time setup of the GPIO peripheral
    ///
    /// Expected to be called once, before any other operation.
    fn init(&mut self) -> Result<(), HalError>;

    /// Configure a pin as input or output
    fn set_direction(&mut self, port: Port, pin: Pin, direction: Direction)
        -> Result<(), HalError>;

    /// Drive a pin to the given level
    fn write(&mut self, port: Port, pin: Pin, level: Level) -> Result<(), HalError>;

    /// Invert a pin's output level
    fn toggle(&mut self, port: Port, pin: Pin) -> Result<(), HalError>;

    /// Read a pin's current level
    fn read(&mut self, port: Port, pin: Pin) -> Result<Level, HalError>;
}
