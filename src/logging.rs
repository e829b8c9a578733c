//! Process-wide log file setup
//!
//! Records are appended to a file, one per line:
//!
//! ```text
//! <timestamp> <LEVEL  > (<thread name>) [<target>] <message>
//! ```

use crate::config::{LoggingConfig, DEFAULT_LOG_FILE};
use crate::error::Result;
use env_logger::{Builder, Target};
use log::{LevelFilter, Record};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Install the global logger writing records at `level` and above to
/// `filename`.
///
/// Only the first successful call takes effect; later calls fail with
/// [`EngineError::Logging`](crate::EngineError::Logging) and leave the
/// installed logger untouched.
pub fn configure_logging<P: AsRef<Path>>(level: LevelFilter, filename: P) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(filename.as_ref())?;

    Builder::new()
        .filter_level(level)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            let timestamp = buf.timestamp_millis();
            write_record(buf, timestamp, record)
        })
        .try_init()?;

    Ok(())
}

/// Warnings and above to `example.log`
pub fn configure_default_logging() -> Result<()> {
    configure_logging(LevelFilter::Warn, DEFAULT_LOG_FILE)
}

/// Configure logging from a loaded [`LoggingConfig`]
pub fn configure_logging_from(config: &LoggingConfig) -> Result<()> {
    configure_logging(config.level_filter()?, &config.filename)
}

pub(crate) fn write_record<W: Write>(
    out: &mut W,
    timestamp: impl Display,
    record: &Record<'_>,
) -> io::Result<()> {
    let thread = std::thread::current();
    writeln!(
        out,
        "{} {:<7} ({}) [{}] {}",
        timestamp,
        record.level(),
        thread.name().unwrap_or("unnamed"),
        record.target(),
        record.args()
    )
}
