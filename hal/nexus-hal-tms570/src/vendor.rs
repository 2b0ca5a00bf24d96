//! Vendor driver interface
//!
//! The operations the HAL needs from the HALCoGen library, expressed as
//! traits. Port and SCI handles are opaque to the HAL; the driver decides
//! which logical identifiers exist on the board.

use nexus_hal::{Port, UartInstance};

/// SCI flag register (FLR) bits
pub mod flr {
    /// Transmit buffer ready for a new byte
    pub const TX_READY: u32 = 1 << 8;
    /// Receive buffer holds an unread byte
    pub const RX_READY: u32 = 1 << 9;
    /// Transmitter shift register and buffer are both empty
    pub const TX_EMPTY: u32 = 1 << 11;
}

/// GIO part of the vendor library
pub trait GioDriver {
    /// Vendor port handle (`gioPORT_t *` in HALCoGen)
    type Port: Copy;

    /// Bring up the GIO module (`gioInit`)
    fn init(&mut self);

    /// Map a logical port to its vendor handle
    fn port(&self, port: Port) -> Option<Self::Port>;

    /// Set (output) or clear (input) the given bits of the DIR register
    fn set_direction(&mut self, port: Self::Port, mask: u32, output: bool);

    /// Drive one bit (`gioSetBit`)
    fn set_bit(&mut self, port: Self::Port, bit: u32, value: u32);

    /// Invert one output bit (`gioToggleBit`)
    fn toggle_bit(&mut self, port: Self::Port, bit: u32);

    /// Read one input bit (`gioGetBit`)
    fn get_bit(&mut self, port: Self::Port, bit: u32) -> u32;

    /// Read one bit of the output latch (DOUT)
    fn output_bit(&mut self, port: Self::Port, bit: u32) -> u32;
}

/// SCI/LIN part of the vendor library
pub trait SciDriver {
    /// Vendor SCI handle (`sciBASE_t *` in HALCoGen)
    type Sci: Copy;

    /// Bring up every SCI channel from the generated configuration (`sciInit`)
    ///
    /// This is global: it reconfigures all channels, not one.
    fn init(&mut self);

    /// Map a logical instance to its vendor handle
    fn sci(&self, instance: UartInstance) -> Option<Self::Sci>;

    /// Baud rate the channel is actually running at
    fn baudrate(&self, sci: Self::Sci) -> u32;

    /// Transmit all of `data`, blocking (`sciSend`)
    fn send(&mut self, sci: Self::Sci, data: &[u8]);

    /// Receive exactly `buf.len()` bytes, blocking (`sciReceive`)
    fn receive(&mut self, sci: Self::Sci, buf: &mut [u8]);

    /// Current flag register value
    fn flags(&self, sci: Self::Sci) -> u32;
}

/// RTI free-running counter
pub trait RtiDriver {
    /// Start counter block 0 if it is not running
    fn start_counter(&mut self);

    /// Current value of free-running counter 0 (RTIFRC0)
    fn counter(&self) -> u32;

    /// Rate at which the free-running counter increments
    fn counter_hz(&self) -> u32;
}
