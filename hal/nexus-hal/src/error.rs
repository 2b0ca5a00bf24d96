//! HAL error type

/// Errors returned by HAL operations
///
/// Every failure of the abstraction layer is an identifier that does not map
/// to hardware on the running board. Operations that fail have not touched
/// any register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Port identifier has no hardware port on this board
    InvalidPort,
    /// Pin number outside 0-7
    InvalidPin,
    /// UART instance has no hardware SCI on this board
    InvalidInstance,
}

impl HalError {
    /// Legacy numeric result code
    ///
    /// Console diagnostics and ground tooling report failures as negative
    /// integers. All current kinds share `-1`.
    pub fn code(self) -> i32 {
        match self {
            HalError::InvalidPort | HalError::InvalidPin | HalError::InvalidInstance => -1,
        }
    }
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::InvalidPort => f.write_str("invalid GPIO port"),
            HalError::InvalidPin => f.write_str("invalid GPIO pin"),
            HalError::InvalidInstance => f.write_str("invalid UART instance"),
        }
    }
}
