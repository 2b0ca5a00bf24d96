//! GPIO properties over every port/pin of the simulated TMS570

use nexus_hal::{Direction, Gpio, HalError, Level, Pin, Port};
use nexus_hal_tms570::sim::SimGio;
use nexus_hal_tms570::Tms570Gpio;
use proptest::prelude::*;

fn any_port() -> impl Strategy<Value = Port> {
    prop_oneof![Just(Port::A), Just(Port::B)]
}

fn any_pin() -> impl Strategy<Value = Pin> {
    (0u8..8).prop_map(|n| Pin::from_u8(n).unwrap())
}

fn any_level() -> impl Strategy<Value = Level> {
    any::<bool>().prop_map(Level::from)
}

fn gpio() -> Tms570Gpio<SimGio> {
    let mut gpio = Tms570Gpio::new(SimGio::new());
    gpio.init().unwrap();
    gpio
}

proptest! {
    #[test]
    fn read_returns_written_level(port in any_port(), pin in any_pin(), level in any_level()) {
        let mut gpio = gpio();
        gpio.set_direction(port, pin, Direction::Output).unwrap();
        gpio.write(port, pin, level).unwrap();
        prop_assert_eq!(gpio.read(port, pin), Ok(level));
    }

    #[test]
    fn double_toggle_restores_level(port in any_port(), pin in any_pin(), level in any_level()) {
        let mut gpio = gpio();
        gpio.set_direction(port, pin, Direction::Output).unwrap();
        gpio.write(port, pin, level).unwrap();

        gpio.toggle(port, pin).unwrap();
        prop_assert_eq!(gpio.read(port, pin), Ok(!level));
        gpio.toggle(port, pin).unwrap();
        prop_assert_eq!(gpio.read(port, pin), Ok(level));
    }

    #[test]
    fn writes_stay_on_their_pin(port in any_port(), pin in any_pin(), other in any_pin()) {
        prop_assume!(pin != other);
        let mut gpio = gpio();
        gpio.set_direction(port, pin, Direction::Output).unwrap();
        gpio.set_direction(port, other, Direction::Output).unwrap();

        gpio.write(port, pin, Level::High).unwrap();
        prop_assert_eq!(gpio.read(port, other), Ok(Level::Low));
    }

    #[test]
    fn unmapped_port_has_no_side_effect(pin in any_pin(), level in any_level()) {
        let mut gpio = Tms570Gpio::new(SimGio::with_ports(&[Port::B]));
        gpio.init().unwrap();
        let before = gpio.driver().register_writes();

        prop_assert_eq!(gpio.set_direction(Port::A, pin, Direction::Output), Err(HalError::InvalidPort));
        prop_assert_eq!(gpio.write(Port::A, pin, level), Err(HalError::InvalidPort));
        prop_assert_eq!(gpio.toggle(Port::A, pin), Err(HalError::InvalidPort));
        prop_assert_eq!(gpio.read(Port::A, pin), Err(HalError::InvalidPort));

        prop_assert_eq!(gpio.driver().register_writes(), before);
        prop_assert_eq!(gpio.driver().dout(Port::B), Some(0));
    }
}

#[test]
fn raw_port_ids_outside_range_rejected() {
    for raw in 2u8..=u8::MAX {
        assert_eq!(Port::try_from(raw), Err(HalError::InvalidPort));
    }
}
