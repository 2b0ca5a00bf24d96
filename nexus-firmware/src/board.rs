//! Board configuration compiled in from board.toml

use heapless::String;
use nexus_core::config::{BlinkConfig, BoardConfig, ConsoleConfig, LedConfig};
use nexus_hal::{Pin, Port, UartInstance};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
