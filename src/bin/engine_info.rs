//! engine-info
//!
//! Connects to an oVirt engine with the standard example options and prints
//! the product name and version reported by the API root.
//!
//! ```bash
//! engine-info --engine-url https://engine.example.com \
//!     --username admin@internal --password-file password.txt -c ca.pem
//! ```

use clap::Parser;
use log::{debug, info, LevelFilter};
use ovirt_helpers::progress::{self, progress};
use ovirt_helpers::{
    configure_logging, create_connection_with, Config, EngineArgs, Result, NAME, VERSION,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "engine-info")]
#[command(about = "Show the product information of an oVirt engine")]
#[command(version = VERSION)]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,

    /// Optional TOML file with connection and logging settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    progress::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let level = if args.engine.debug {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()?
    };
    configure_logging(level, &config.logging.filename)?;
    info!("Starting engine-info ({NAME} v{VERSION})");

    progress(&format!("Connecting to {}", args.engine.engine_url));
    let mut connection = create_connection_with(&args.engine, &config.connection)?;

    let api = connection.get("")?;
    debug!("API root: {api}");
    progress("Connected");

    let product = &api["product_info"];
    println!("Product: {}", text(&product["name"]));
    println!("Vendor:  {}", text(&product["vendor"]));
    println!("Version: {}", text(&product["version"]["full_version"]));

    connection.close()?;
    progress("Connection closed");
    Ok(())
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or("unknown")
}
