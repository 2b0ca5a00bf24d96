//! Startup sequence and blink loop

use core::fmt::Write;

use heapless::String;
use nexus_hal::{DelayNs, Direction, Gpio, Level, Uart, UartInit};

use crate::config::BoardConfig;
use crate::state::{Event, Fault, State};

/// Room for the halt report sent to the console
const HALT_REPORT_LEN: usize = 96;

/// Blink application over any GPIO, UART and clock
pub struct Blinky<G, U, D> {
    gpio: G,
    uart: U,
    delay: D,
    config: BoardConfig,
    state: State,
    uart_init: Option<UartInit>,
    toggles: u32,
}

impl<G: Gpio, U: Uart, D: DelayNs> Blinky<G, U, D> {
    pub fn new(gpio: G, uart: U, delay: D, config: BoardConfig) -> Self {
        Self {
            gpio,
            uart,
            delay,
            config,
            state: State::Startup,
            uart_init: None,
            toggles: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Outcome of the console UART init, once it has run
    pub fn uart_init(&self) -> Option<UartInit> {
        self.uart_init
    }

    /// LED toggles performed by the run loop
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn into_parts(self) -> (G, U, D) {
        (self.gpio, self.uart, self.delay)
    }

    /// Run the startup sequence
    ///
    /// Steps run in order (console init, banner, GPIO init, LED direction)
    /// and stop at the first failure, which halts the application. Calling
    /// this again after success is a no-op; after a fault it returns that
    /// fault.
    pub fn startup(&mut self) -> Result<(), Fault> {
        match self.state {
            State::Startup => {}
            State::Run => return Ok(()),
            State::Halted(fault) => return Err(fault),
        }

        match self.bring_up() {
            Ok(()) => {
                self.state = self.state.transition(Event::StartupComplete);
                Ok(())
            }
            Err(fault) => {
                self.halt(fault);
                Err(fault)
            }
        }
    }

    /// One run-loop iteration: toggle the LED, then wait a half-period
    pub fn step(&mut self) -> Result<(), Fault> {
        match self.state {
            State::Run => {}
            State::Startup => return Err(Fault::NotStarted),
            State::Halted(fault) => return Err(fault),
        }

        let led = self.config.led;
        if let Err(err) = self.gpio.toggle(led.port, led.pin) {
            let fault = Fault::LedToggle(err);
            self.halt(fault);
            return Err(fault);
        }
        self.toggles = self.toggles.wrapping_add(1);

        self.delay.delay_ms(self.config.blink.half_period_ms);
        Ok(())
    }

    /// Blink until a step fails
    ///
    /// Only returns with the fault that stopped the loop.
    pub fn run(&mut self) -> Fault {
        loop {
            if let Err(fault) = self.step() {
                return fault;
            }
        }
    }

    /// Put the hardware into the halted diagnostic state
    ///
    /// Drives the LED steadily on and, when the console is usable, reports
    /// the fault on it. Both are best effort. Returns the fault, or `None`
    /// if the application is not halted.
    pub fn enter_safe_state(&mut self) -> Option<Fault> {
        let State::Halted(fault) = self.state else {
            return None;
        };

        let led = self.config.led;
        let _ = self.gpio.set_direction(led.port, led.pin, Direction::Output);
        let _ = self.gpio.write(led.port, led.pin, Level::High);

        if fault.console_usable() {
            let mut report: String<HALT_REPORT_LEN> = String::new();
            let _ = write!(report, "\r\n*** HALTED: {}\r\n", fault);
            let _ = self.uart.write_str(self.config.console.uart, &report);
        }

        Some(fault)
    }

    fn bring_up(&mut self) -> Result<(), Fault> {
        let console = &self.config.console;
        let outcome = self
            .uart
            .init(console.uart, &console.uart_config())
            .map_err(Fault::UartInit)?;
        self.uart_init = Some(outcome);

        self.uart
            .write_str(console.uart, &console.banner)
            .map_err(Fault::BannerWrite)?;

        self.gpio.init().map_err(Fault::GpioInit)?;

        let led = self.config.led;
        self.gpio
            .set_direction(led.port, led.pin, Direction::Output)
            .map_err(Fault::LedConfig)?;

        Ok(())
    }

    fn halt(&mut self, fault: Fault) {
        self.state = self.state.transition(Event::FaultDetected(fault));
    }
}
