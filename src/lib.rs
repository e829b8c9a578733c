//! oVirt example helpers
//!
//! Shared plumbing for small programs that talk to an oVirt engine's REST
//! API:
//!
//! - the engine command-line options (`--engine-url`, `--username`,
//!   `--password-file`, `-c/--cafile`, `--insecure`, `--debug`)
//! - password resolution from a file or an echo-free terminal prompt
//! - an engine [`Connection`] authenticated through SSO and released on drop
//! - elapsed-time progress lines
//! - file logging in a fixed line format
//!
//! ```ignore
//! use clap::Parser;
//! use ovirt_helpers::{configure_default_logging, create_connection, progress, EngineArgs};
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     engine: EngineArgs,
//! }
//!
//! let cli = Cli::parse();
//! configure_default_logging()?;
//! progress("Connecting...");
//! let mut connection = create_connection(&cli.engine)?;
//! connection.test()?;
//! connection.close()?;
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod connection;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod password;
pub mod progress;

pub use cli::{add_engine_arguments, EngineArgs};
pub use client::{api_url, create_connection, create_connection_with};
pub use config::{Config, ConnectionConfig, LoggingConfig};
pub use connection::{Connection, ConnectionBuilder};
pub use error::{EngineError, Result};
pub use logging::{configure_default_logging, configure_logging, configure_logging_from};
pub use password::read_password;
pub use progress::{progress, Progress};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
