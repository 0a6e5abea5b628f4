// Library root for the group-assignment core: roster parsing, reveal
// sequence validation, draw selection, and the session state machine.

pub mod draw;
