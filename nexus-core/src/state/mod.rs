//! Application state machine
//!
//! Two operating states and a terminal safe state. The run loop is only
//! reachable through a successful startup.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Fault, State};
