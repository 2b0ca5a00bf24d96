//! Board configuration
//!
//! Mirrors the sections of `board.toml`:
//!
//! ```toml
//! [led]
//! port = "B"
//! pin = 6
//!
//! [console]
//! uart = "uart1"
//! baudrate = 115200
//!
//! [blink]
//! half_period_ms = 500
//! ```

use heapless::String;
use nexus_hal::{Pin, Port, UartConfig, UartInstance};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::app::BANNER;

/// Maximum banner length in bytes
pub const MAX_BANNER_LEN: usize = 64;

/// Status LED wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedConfig {
    pub port: Port,
    pub pin: Pin,
}

impl Default for LedConfig {
    /// LaunchPad user LED (GIOB[6])
    fn default() -> Self {
        Self {
            port: Port::B,
            pin: Pin::P6,
        }
    }
}

/// Debug console
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleConfig {
    /// Instance wired to the debug probe
    pub uart: UartInstance,
    /// Requested baud rate
    pub baudrate: u32,
    /// Text sent once at startup
    #[cfg_attr(feature = "serde", serde(default = "default_banner"))]
    pub banner: String<MAX_BANNER_LEN>,
}

impl ConsoleConfig {
    /// UART configuration for the console instance
    pub fn uart_config(&self) -> UartConfig {
        UartConfig {
            baudrate: self.baudrate,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            uart: UartInstance::Uart1,
            baudrate: 115_200,
            banner: default_banner(),
        }
    }
}

/// Blink timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlinkConfig {
    /// Time between LED toggles
    pub half_period_ms: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            half_period_ms: 500,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub led: LedConfig,
    pub console: ConsoleConfig,
    pub blink: BlinkConfig,
}

/// Reasons a board configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Console baud rate of zero
    ZeroBaudrate,
    /// Blink half-period of zero would toggle without pause
    ZeroHalfPeriod,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroBaudrate => f.write_str("console baudrate must be non-zero"),
            ConfigError::ZeroHalfPeriod => f.write_str("blink half_period_ms must be non-zero"),
        }
    }
}

impl BoardConfig {
    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        if self.blink.half_period_ms == 0 {
            return Err(ConfigError::ZeroHalfPeriod);
        }
        Ok(())
    }
}

fn default_banner() -> String<MAX_BANNER_LEN> {
    let mut banner = String::new();
    let _ = banner.push_str(BANNER);
    banner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_launchpad() {
        let config = BoardConfig::default();
        assert_eq!(config.led.port, Port::B);
        assert_eq!(config.led.pin, Pin::P6);
        assert_eq!(config.console.uart, UartInstance::Uart1);
        assert_eq!(config.console.uart_config().baudrate, 115_200);
        assert_eq!(config.console.banner.as_str(), BANNER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let mut config = BoardConfig::default();
        config.console.baudrate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBaudrate));

        let mut config = BoardConfig::default();
        config.blink.half_period_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroHalfPeriod));
    }
}
