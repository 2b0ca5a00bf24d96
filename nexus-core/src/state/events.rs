//! Events that trigger state transitions

use super::machine::Fault;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Every startup step succeeded
    StartupComplete,
    /// A startup or run step failed
    FaultDetected(Fault),
}
