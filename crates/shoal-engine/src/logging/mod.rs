//! Logger setup for native hosts.
//!
//! Library code only uses the `log` facade; binaries pick the backend. This
//! module wires `env_logger` for the desktop host.

mod init;

pub use init::{init_logging, LoggingConfig};
