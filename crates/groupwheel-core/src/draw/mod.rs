// Group draw: roster parsing, reveal-sequence validation, draw selection,
// group ledger, and the session state machine tying them together.

pub mod error;
pub mod ledger;
pub mod roster;
pub mod selector;
pub mod sequence;
pub mod session;

pub use error::SessionError;
