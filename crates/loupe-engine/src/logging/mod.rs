//! Logger setup.
//!
//! The engine only talks to the `log` facade; hosts call [`init_logging`]
//! once to install `env_logger` behind it.

mod init;

pub use init::{init_logging, LoggingConfig};
