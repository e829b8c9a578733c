//! Connection factory for example programs
//!
//! Turns parsed [`EngineArgs`] into a [`Connection`]. The caller owns the
//! returned connection; it logs out when closed or dropped.

use crate::cli::EngineArgs;
use crate::config::ConnectionConfig;
use crate::connection::{Connection, ConnectionBuilder, API_PATH};
use crate::error::Result;
use crate::password::read_password;

/// API URL for an engine base URL such as `https://engine_fqdn:port`
pub fn api_url(engine_url: &str) -> String {
    format!("{engine_url}{API_PATH}")
}

/// Resolve the password and create a connection with default tuning.
///
/// Password and connection errors are returned as they occur.
pub fn create_connection(args: &EngineArgs) -> Result<Connection> {
    create_connection_with(args, &ConnectionConfig::default())
}

/// Resolve the password and create a connection tuned by `config`.
pub fn create_connection_with(args: &EngineArgs, config: &ConnectionConfig) -> Result<Connection> {
    let password = read_password(args)?;
    connection_builder(args, password, config).build()
}

fn connection_builder(
    args: &EngineArgs,
    password: String,
    config: &ConnectionConfig,
) -> ConnectionBuilder {
    let builder = Connection::builder()
        .url(api_url(&args.engine_url))
        .username(args.username.as_str())
        .password(password)
        .maybe_ca_file(args.cafile.clone())
        .debug(args.debug)
        .log_target(config.log_target.as_str())
        .timeout(config.timeout());

    config.headers.iter().fold(builder, |builder, (name, value)| {
        builder.header(name.as_str(), value.as_str())
    })
}
