//! State machine definition

use nexus_hal::HalError;

use super::events::Event;

/// Application states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Bringing up the console and the LED, runs once
    Startup,
    /// Blinking forever
    Run,
    /// Fault detected; the LED shows a steady diagnostic and nothing else runs
    Halted(Fault),
}

/// Step that failed, with the HAL error it reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Console UART could not be initialized
    UartInit(HalError),
    /// Startup banner could not be written
    BannerWrite(HalError),
    /// GPIO module could not be initialized
    GpioInit(HalError),
    /// LED pin could not be configured as output
    LedConfig(HalError),
    /// LED could not be toggled
    LedToggle(HalError),
    /// Run step requested before startup completed
    NotStarted,
}

impl Fault {
    /// Short name of the failed step
    pub fn step(&self) -> &'static str {
        match self {
            Fault::UartInit(_) => "uart init",
            Fault::BannerWrite(_) => "banner write",
            Fault::GpioInit(_) => "gpio init",
            Fault::LedConfig(_) => "led config",
            Fault::LedToggle(_) => "led toggle",
            Fault::NotStarted => "run before startup",
        }
    }

    /// Underlying HAL error, if the fault came from the HAL
    pub fn hal_error(&self) -> Option<HalError> {
        match *self {
            Fault::UartInit(e)
            | Fault::BannerWrite(e)
            | Fault::GpioInit(e)
            | Fault::LedConfig(e)
            | Fault::LedToggle(e) => Some(e),
            Fault::NotStarted => None,
        }
    }

    /// Whether the console is known to be usable after this fault
    pub fn console_usable(&self) -> bool {
        !matches!(self, Fault::UartInit(_) | Fault::BannerWrite(_))
    }
}

impl core::fmt::Display for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.hal_error() {
            Some(err) => write!(f, "{} failed: {} ({})", self.step(), err, err.code()),
            None => f.write_str(self.step()),
        }
    }
}

impl State {
    /// Check if the blink loop may run
    pub fn is_running(&self) -> bool {
        matches!(self, State::Run)
    }

    /// Check if this is the halted safe state
    pub fn is_halted(&self) -> bool {
        matches!(self, State::Halted(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Startup, StartupComplete) => Run,
            // Halted absorbs everything, including further faults
            (Halted(fault), _) => Halted(fault),
            (_, FaultDetected(fault)) => Halted(fault),
            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_to_run() {
        let state = State::Startup;
        let next = state.transition(Event::StartupComplete);
        assert_eq!(next, State::Run);
        assert!(next.is_running());
    }

    #[test]
    fn test_fault_from_any_state() {
        let fault = Fault::LedToggle(HalError::InvalidPort);

        for state in [State::Startup, State::Run] {
            let next = state.transition(Event::FaultDetected(fault));
            assert_eq!(next, State::Halted(fault));
            assert!(next.is_halted());
        }
    }

    #[test]
    fn test_halted_is_terminal() {
        let first = Fault::UartInit(HalError::InvalidInstance);
        let halted = State::Halted(first);

        assert_eq!(halted.transition(Event::StartupComplete), halted);
        assert_eq!(
            halted.transition(Event::FaultDetected(Fault::NotStarted)),
            halted
        );
    }

    #[test]
    fn test_run_ignores_startup_complete() {
        assert_eq!(State::Run.transition(Event::StartupComplete), State::Run);
    }

    #[test]
    fn test_console_usable() {
        assert!(!Fault::UartInit(HalError::InvalidInstance).console_usable());
        assert!(!Fault::BannerWrite(HalError::InvalidInstance).console_usable());
        assert!(Fault::LedConfig(HalError::InvalidPort).console_usable());
        assert!(Fault::NotStarted.console_usable());
    }

    #[test]
    fn test_fault_hal_error() {
        assert_eq!(
            Fault::GpioInit(HalError::InvalidPort).hal_error(),
            Some(HalError::InvalidPort)
        );
        assert_eq!(Fault::NotStarted.hal_error(), None);
    }
}
