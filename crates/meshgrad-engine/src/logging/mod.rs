//! Logger setup shared by every meshgrad front end.
//!
//! Library code only talks to the `log` facade; binaries call
//! [`init_logging`] once, early in `main`.

mod init;

pub use init::{LoggingConfig, init_logging, level_for_verbosity};
