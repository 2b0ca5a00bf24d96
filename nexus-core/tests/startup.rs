//! Startup and run loop against the simulated TMS570 drivers

use nexus_core::config::BoardConfig;
use nexus_core::{Blinky, Fault, State, BANNER};
use nexus_hal::{DelayNs, Gpio, HalError, Level, Pin, Port, UartInit, UartInstance};
use nexus_hal_tms570::sim::{SimGio, SimRti, SimSci};
use nexus_hal_tms570::{RtiClock, Tms570Gpio, Tms570Uart};

/// Clock that records requested delays without waiting
#[derive(Default)]
struct FakeClock {
    total_ns: u64,
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

type SimBlinky<D> = Blinky<Tms570Gpio<SimGio>, Tms570Uart<SimSci>, D>;

fn launchpad(config: BoardConfig) -> SimBlinky<FakeClock> {
    Blinky::new(
        Tms570Gpio::new(SimGio::new()),
        Tms570Uart::new(SimSci::new()),
        FakeClock::default(),
        config,
    )
}

#[test]
fn test_banner_and_led_on_launchpad() {
    let mut app = launchpad(BoardConfig::default());
    app.startup().unwrap();

    let sci = app.uart().driver();
    assert_eq!(sci.transmitted(UartInstance::Uart1), BANNER.as_bytes());
    assert_eq!(sci.transmitted(UartInstance::Uart1).len(), 33);
    assert_eq!(sci.init_count(), 1);

    let gio = app.gpio().driver();
    assert_eq!(gio.init_count(), 1);
    assert_eq!(gio.dir(Port::B), Some(Pin::P6.mask()));
    assert_eq!(gio.dir(Port::A), Some(0));
}

#[test]
fn test_blink_cycle() {
    let mut app = launchpad(BoardConfig::default());
    app.startup().unwrap();

    for expected in [0x40, 0x00, 0x40, 0x00] {
        app.step().unwrap();
        assert_eq!(app.gpio().driver().dout(Port::B), Some(expected));
    }

    assert_eq!(app.toggles(), 4);
    assert_eq!(app.delay().total_ns, 4 * 500_000_000);
}

#[test]
fn test_blink_with_rti_clock() {
    let mut config = BoardConfig::default();
    config.blink.half_period_ms = 2;

    // 1 MHz counter, 250 ticks per poll
    let clock = RtiClock::new(SimRti::new(1_000_000, 250));
    let mut app = Blinky::new(
        Tms570Gpio::new(SimGio::new()),
        Tms570Uart::new(SimSci::new()),
        clock,
        config,
    );
    app.startup().unwrap();
    app.step().unwrap();
    app.step().unwrap();

    let (_, _, clock) = app.into_parts();
    assert!(clock.release().peek() >= 4_000);
}

#[test]
fn test_unmapped_console_halts_before_gpio() {
    let mut config = BoardConfig::default();
    config.console.uart = UartInstance::Uart3;

    let mut app = launchpad(config);
    let expected = Fault::UartInit(HalError::InvalidInstance);
    assert_eq!(app.startup(), Err(expected));
    assert_eq!(app.state(), State::Halted(expected));

    assert_eq!(app.uart().driver().init_count(), 0);
    assert_eq!(app.gpio().driver().init_count(), 0);

    // Diagnostic LED still lit, nothing on any console
    assert_eq!(app.enter_safe_state(), Some(expected));
    assert_eq!(app.gpio().driver().dout(Port::B), Some(0x40));
    assert!(app.uart().driver().transmitted(UartInstance::Uart1).is_empty());
}

#[test]
fn test_missing_led_port_halts_and_reports() {
    let mut config = BoardConfig::default();
    config.led.port = Port::A;

    let mut app = Blinky::new(
        Tms570Gpio::new(SimGio::with_ports(&[Port::B])),
        Tms570Uart::new(SimSci::new()),
        FakeClock::default(),
        config,
    );

    let expected = Fault::LedConfig(HalError::InvalidPort);
    assert_eq!(app.startup(), Err(expected));
    assert_eq!(app.step(), Err(expected));
    assert_eq!(app.delay().total_ns, 0);

    app.enter_safe_state();
    let console = app.uart().driver().transmitted(UartInstance::Uart1);
    let text = core::str::from_utf8(console).unwrap();
    assert!(text.starts_with(BANNER));
    assert!(text.ends_with("*** HALTED: led config failed: invalid GPIO port (-1)\r\n"));
}

#[test]
fn test_requested_baudrate_reported_as_ignored() {
    let mut config = BoardConfig::default();
    config.console.baudrate = 230_400;

    let mut app = launchpad(config);
    app.startup().unwrap();

    assert_eq!(
        app.uart_init(),
        Some(UartInit::BaudrateIgnored {
            requested: 230_400,
            actual: 115_200
        })
    );
    assert_eq!(
        app.uart().config(UartInstance::Uart1).map(|c| c.baudrate),
        Some(230_400)
    );
    assert!(app.state().is_running());
}

#[test]
fn test_led_reads_back_after_run() {
    let mut app = launchpad(BoardConfig::default());
    app.startup().unwrap();
    app.step().unwrap();

    let (mut gpio, _, _) = app.into_parts();
    assert_eq!(gpio.read(Port::B, Pin::P6), Ok(Level::High));
}
