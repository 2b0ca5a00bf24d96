//! Nexus - Flight Software Skeleton
//!
//! Firmware binary for the TMS570LC43x LaunchPad. Brings up the debug
//! console, prints the banner and blinks the user LED. Any startup or run
//! failure parks the board in a halted state with the LED lit.
//!
//! The HALCoGen startup code (`_c_int00`) sets up clocks, memories and
//! the stack, then calls `main`.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use {defmt_rtt as _, panic_halt as _};

use nexus_core::{Blinky, Fault};
use nexus_hal::{DelayNs, Gpio, Uart, UartInit};
use nexus_hal_tms570::halcogen::{Clocks, Halcogen};
use nexus_hal_tms570::{RtiClock, Tms570Gpio, Tms570Uart};

mod board;
mod irq;

/// Main entry point, called by the vendor startup code
#[no_mangle]
pub extern "C" fn main() -> ! {
    info!("Nexus flight software starting...");

    let config = board::board_config();
    info!(
        "LED on GIO{}[{}], console {} at {} baud",
        config.led.port,
        config.led.pin,
        config.console.uart,
        config.console.baudrate
    );

    let clocks = Clocks::default();
    info!("Clocks: {}", clocks);

    let Some(hw) = Halcogen::take(clocks) else {
        error!("HALCoGen drivers already taken");
        park();
    };

    let gpio = Tms570Gpio::new(hw.gio);
    let uart = Tms570Uart::new(hw.sci);
    let clock = RtiClock::new(hw.rti);
    let mut app = Blinky::new(gpio, uart, clock, config);

    if let Err(fault) = app.startup() {
        halt(&mut app, fault);
    }

    if let Some(UartInit::BaudrateIgnored { requested, actual }) = app.uart_init() {
        warn!(
            "Console baud rate {} requested, HALCoGen configured {}",
            requested, actual
        );
    }
    info!(
        "Startup complete, blinking every {} ms",
        app.config().blink.half_period_ms
    );

    let fault = app.run();
    halt(&mut app, fault)
}

/// Enter the safe state and stop
fn halt<G, U, D>(app: &mut Blinky<G, U, D>, fault: Fault) -> !
where
    G: Gpio,
    U: Uart,
    D: DelayNs,
{
    error!("Halted: {}", fault);
    app.enter_safe_state();
    park()
}

fn park() -> ! {
    loop {
        // SAFETY: wfi only suspends the core until the next interrupt
        unsafe { core::arch::asm!("wfi", options(nomem, nostack, preserves_flags)) };
    }
}
