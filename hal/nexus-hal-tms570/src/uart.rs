//! SCI/LIN UART driver for TMS570
//!
//! Implements [`nexus_hal::Uart`] over the HALCoGen SCI functions.
//! `Uart1` maps to `sciREG1` (LIN1 in SCI mode, wired to the XDS110
//! virtual COM port) and `Uart2` to `sciREG2`; the remaining instances
//! have no channel on this board.
//!
//! `sciInit` brings up every channel at once from the generated
//! configuration. The driver therefore separates per-instance `init`, which
//! only records the requested configuration, from a one-time hardware
//! bring-up that runs on first use of any instance.

use core::convert::Infallible;

use nexus_hal::{HalError, Uart, UartConfig, UartInit, UartInstance};

use crate::vendor::{flr, SciDriver};

/// Largest baud mismatch, in percent, still counted as the requested rate
const BAUD_TOLERANCE_PERCENT: u32 = 2;

/// Whether `actual` is within the divider error of `requested`
fn baud_matches(requested: u32, actual: u32) -> bool {
    let diff = u64::from(requested.abs_diff(actual));
    diff * 100 <= u64::from(requested) * u64::from(BAUD_TOLERANCE_PERCENT)
}

/// TMS570 SCI controller
pub struct Tms570Uart<D> {
    driver: D,
    hardware_up: bool,
    configs: [Option<UartConfig>; UartInstance::COUNT],
}

impl<D: SciDriver> Tms570Uart<D> {
    /// Wrap a vendor SCI driver
    ///
    /// No hardware is touched until the first operation.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            hardware_up: false,
            configs: [None; UartInstance::COUNT],
        }
    }

    /// Borrow the underlying vendor driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the underlying vendor driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Whether `sciInit` has run
    pub fn is_hardware_up(&self) -> bool {
        self.hardware_up
    }

    /// Configuration last requested for an instance
    pub fn config(&self, instance: UartInstance) -> Option<UartConfig> {
        self.configs[instance.index()]
    }

    /// Borrow one instance as an `embedded-io` / `core::fmt` port
    pub fn port(&mut self, instance: UartInstance) -> Result<UartPort<'_, D>, HalError> {
        let sci = self.handle(instance)?;
        self.bring_up();
        Ok(UartPort {
            driver: &mut self.driver,
            sci,
        })
    }

    fn handle(&self, instance: UartInstance) -> Result<D::Sci, HalError> {
        self.driver.sci(instance).ok_or(HalError::InvalidInstance)
    }

    fn bring_up(&mut self) {
        if !self.hardware_up {
            self.driver.init();
            self.hardware_up = true;
        }
    }

    fn rx_ready(&self, sci: D::Sci) -> bool {
        self.driver.flags(sci) & flr::RX_READY != 0
    }
}

impl<D: SciDriver> Uart for Tms570Uart<D> {
    fn init(
        &mut self,
        instance: UartInstance,
        config: &UartConfig,
    ) -> Result<UartInit, HalError> {
        let sci = self.handle(instance)?;
        self.bring_up();
        self.configs[instance.index()] = Some(*config);

        // sciInit programs the generated baud rate; per-instance rates are
        // recorded but not applied
        let actual = self.driver.baudrate(sci);
        if baud_matches(config.baudrate, actual) {
            Ok(UartInit::Applied)
        } else {
            Ok(UartInit::BaudrateIgnored {
                requested: config.baudrate,
                actual,
            })
        }
    }

    fn write(&mut self, instance: UartInstance, data: &[u8]) -> Result<usize, HalError> {
        let sci = self.handle(instance)?;
        if data.is_empty() {
            return Ok(0);
        }
        self.bring_up();
        self.driver.send(sci, data);
        Ok(data.len())
    }

    fn read(&mut self, instance: UartInstance, buf: &mut [u8]) -> Result<usize, HalError> {
        let sci = self.handle(instance)?;
        self.bring_up();

        let mut count = 0;
        while count < buf.len() && self.rx_ready(sci) {
            self.driver.receive(sci, &mut buf[count..count + 1]);
            count += 1;
        }
        Ok(count)
    }

    fn data_available(&mut self, instance: UartInstance) -> Result<bool, HalError> {
        let sci = self.handle(instance)?;
        self.bring_up();
        Ok(self.rx_ready(sci))
    }
}

/// One SCI channel borrowed from a [`Tms570Uart`]
///
/// Blocking byte stream for use with `embedded-io` consumers and
/// `core::fmt::Write` (`write!` to the console).
pub struct UartPort<'a, D: SciDriver> {
    driver: &'a mut D,
    sci: D::Sci,
}

impl<D: SciDriver> UartPort<'_, D> {
    fn flags(&self) -> u32 {
        self.driver.flags(self.sci)
    }
}

impl<D: SciDriver> embedded_io::ErrorType for UartPort<'_, D> {
    type Error = Infallible;
}

impl<D: SciDriver> embedded_io::Write for UartPort<'_, D> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if !buf.is_empty() {
            self.driver.send(self.sci, buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while self.flags() & flr::TX_EMPTY == 0 {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

impl<D: SciDriver> embedded_io::Read for UartPort<'_, D> {
    /// Blocks until at least one byte is available
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.flags() & flr::RX_READY == 0 {
            core::hint::spin_loop();
        }

        let mut count = 0;
        while count < buf.len() && self.flags() & flr::RX_READY != 0 {
            self.driver.receive(self.sci, &mut buf[count..count + 1]);
            count += 1;
        }
        Ok(count)
    }
}

impl<D: SciDriver> embedded_io::ReadReady for UartPort<'_, D> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.flags() & flr::RX_READY != 0)
    }
}

impl<D: SciDriver> core::fmt::Write for UartPort<'_, D> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if !s.is_empty() {
            self.driver.send(self.sci, s.as_bytes());
        }
        Ok(())
    }
}
