//! Interactive menu for pocket-ledger
//!
//! Screen navigation is a pure state machine (`state`); `Session` runs it
//! against a reader/writer pair and calls into the services.

pub mod prompt;
pub mod session;
pub mod state;

pub use session::Session;
pub use state::{Action, MenuState, Transition};
