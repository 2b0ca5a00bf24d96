//! GIO driver for TMS570
//!
//! Implements [`nexus_hal::Gpio`] over the HALCoGen GIO functions. Port A
//! and B map to `gioPORTA`/`gioPORTB`; pin numbers are passed through as
//! bit positions.

use core::convert::Infallible;

use nexus_hal::{Direction, Gpio, HalError, Level, Pin, Port};

use crate::vendor::GioDriver;

/// TMS570 GIO controller
pub struct Tms570Gpio<D> {
    driver: D,
}

impl<D: GioDriver> Tms570Gpio<D> {
    /// Wrap a vendor GIO driver
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Borrow the underlying vendor driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Give back the vendor driver
    pub fn release(self) -> D {
        self.driver
    }

    /// Borrow a single pin as an `embedded-hal` pin
    ///
    /// The direction is not changed; configure it first with
    /// [`Gpio::set_direction`].
    pub fn pin(&mut self, port: Port, pin: Pin) -> Result<GioPin<'_, D>, HalError> {
        let handle = self.handle(port)?;
        Ok(GioPin {
            driver: &mut self.driver,
            port: handle,
            pin,
        })
    }

    fn handle(&self, port: Port) -> Result<D::Port, HalError> {
        self.driver.port(port).ok_or(HalError::InvalidPort)
    }
}

impl<D: GioDriver> Gpio for Tms570Gpio<D> {
    fn init(&mut self) -> Result<(), HalError> {
        self.driver.init();
        Ok(())
    }

    fn set_direction(
        &mut self,
        port: Port,
        pin: Pin,
        direction: Direction,
    ) -> Result<(), HalError> {
        let handle = self.handle(port)?;
        self.driver
            .set_direction(handle, pin.mask(), direction == Direction::Output);
        Ok(())
    }

    fn write(&mut self, port: Port, pin: Pin, level: Level) -> Result<(), HalError> {
        let handle = self.handle(port)?;
        self.driver.set_bit(handle, pin.index().into(), level.bit());
        Ok(())
    }

    fn toggle(&mut self, port: Port, pin: Pin) -> Result<(), HalError> {
        let handle = self.handle(port)?;
        self.driver.toggle_bit(handle, pin.index().into());
        Ok(())
    }

    fn read(&mut self, port: Port, pin: Pin) -> Result<Level, HalError> {
        let handle = self.handle(port)?;
        Ok(Level::from_bit(self.driver.get_bit(handle, pin.index().into())))
    }
}

/// One GIO pin borrowed from a [`Tms570Gpio`]
pub struct GioPin<'a, D: GioDriver> {
    driver: &'a mut D,
    port: D::Port,
    pin: Pin,
}

impl<D: GioDriver> GioPin<'_, D> {
    /// Pin position within its port
    pub fn pin(&self) -> Pin {
        self.pin
    }

    fn bit(&self) -> u32 {
        self.pin.index().into()
    }
}

impl<D: GioDriver> embedded_hal::digital::ErrorType for GioPin<'_, D> {
    type Error = Infallible;
}

impl<D: GioDriver> embedded_hal::digital::OutputPin for GioPin<'_, D> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let bit = self.bit();
        self.driver.set_bit(self.port, bit, Level::Low.bit());
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let bit = self.bit();
        self.driver.set_bit(self.port, bit, Level::High.bit());
        Ok(())
    }
}

impl<D: GioDriver> embedded_hal::digital::StatefulOutputPin for GioPin<'_, D> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        let bit = self.bit();
        Ok(self.driver.output_bit(self.port, bit) != 0)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        let bit = self.bit();
        self.driver.toggle_bit(self.port, bit);
        Ok(())
    }
}

impl<D: GioDriver> embedded_hal::digital::InputPin for GioPin<'_, D> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let bit = self.bit();
        Ok(self.driver.get_bit(self.port, bit) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimGio;
    use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

    fn gpio() -> Tms570Gpio<SimGio> {
        let mut gpio = Tms570Gpio::new(SimGio::new());
        gpio.init().unwrap();
        gpio
    }

    #[test]
    fn test_init_calls_vendor() {
        let gpio = gpio();
        assert_eq!(gpio.driver().init_count(), 1);
    }

    #[test]
    fn test_direction_sets_dir_bits() {
        let mut gpio = gpio();

        gpio.set_direction(Port::B, Pin::P6, Direction::Output).unwrap();
        gpio.set_direction(Port::B, Pin::P1, Direction::Output).unwrap();
        assert_eq!(gpio.driver().dir(Port::B), Some(0x42));

        gpio.set_direction(Port::B, Pin::P6, Direction::Input).unwrap();
        assert_eq!(gpio.driver().dir(Port::B), Some(0x02));

        // Port A untouched
        assert_eq!(gpio.driver().dir(Port::A), Some(0x00));
    }

    #[test]
    fn test_led_blink_sequence() {
        let mut gpio = gpio();

        gpio.set_direction(Port::B, Pin::P6, Direction::Output).unwrap();
        gpio.write(Port::B, Pin::P6, Level::High).unwrap();
        assert_eq!(gpio.read(Port::B, Pin::P6), Ok(Level::High));

        gpio.toggle(Port::B, Pin::P6).unwrap();
        assert_eq!(gpio.read(Port::B, Pin::P6), Ok(Level::Low));
    }

    #[test]
    fn test_unmapped_port_rejected_without_side_effect() {
        let mut gpio = Tms570Gpio::new(SimGio::with_ports(&[Port::B]));
        gpio.init().unwrap();
        let writes = gpio.driver().register_writes();

        assert_eq!(
            gpio.set_direction(Port::A, Pin::P0, Direction::Output),
            Err(HalError::InvalidPort)
        );
        assert_eq!(gpio.write(Port::A, Pin::P0, Level::High), Err(HalError::InvalidPort));
        assert_eq!(gpio.toggle(Port::A, Pin::P0), Err(HalError::InvalidPort));
        assert_eq!(gpio.read(Port::A, Pin::P0), Err(HalError::InvalidPort));
        assert!(gpio.pin(Port::A, Pin::P0).is_err());

        assert_eq!(gpio.driver().register_writes(), writes);
    }

    #[test]
    fn test_input_pin_follows_external_level() {
        let mut gpio = gpio();
        gpio.set_direction(Port::A, Pin::P2, Direction::Input).unwrap();

        assert_eq!(gpio.read(Port::A, Pin::P2), Ok(Level::Low));

        // Simulated board drives the line
        let mut driver = gpio.release();
        driver.drive_input(Port::A, Pin::P2, Level::High);
        let mut gpio = Tms570Gpio::new(driver);

        assert_eq!(gpio.read(Port::A, Pin::P2), Ok(Level::High));
    }

    #[test]
    fn test_embedded_hal_pin() {
        let mut gpio = gpio();
        gpio.set_direction(Port::B, Pin::P6, Direction::Output).unwrap();

        {
            let mut led = gpio.pin(Port::B, Pin::P6).unwrap();
            assert_eq!(led.pin(), Pin::P6);
            led.set_high().unwrap();
            assert!(led.is_set_high().unwrap());
            assert!(led.is_high().unwrap());

            StatefulOutputPin::toggle(&mut led).unwrap();
            assert!(led.is_set_low().unwrap());
            assert!(led.is_low().unwrap());
        }

        assert_eq!(gpio.read(Port::B, Pin::P6), Ok(Level::Low));
    }
}
