//! Engine command-line options
//!
//! The options are registered on a parser owned by the example program,
//! either by flattening [`EngineArgs`] into a derive parser:
//!
//! ```ignore
//! #[derive(clap::Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     engine: ovirt_helpers::EngineArgs,
//! }
//! ```
//!
//! or by calling [`add_engine_arguments`] on a builder `Command`.

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, ArgMatches, Args, Command, FromArgMatches};
use std::path::PathBuf;

/// Parsed engine connection options
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct EngineArgs {
    /// oVirt engine URL (e.g. https://engine_fqdn:port)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub engine_url: String,

    /// username of engine API
    #[arg(long)]
    pub username: String,

    /// file containing the user's password (prompted for on the terminal
    /// when omitted)
    #[arg(long)]
    pub password_file: Option<PathBuf>,

    /// path to oVirt engine certificate for verifying server.
    #[arg(short = 'c', long)]
    pub cafile: Option<PathBuf>,

    /// accepted for compatibility with other example tools; connections
    /// created from these options still verify the server certificate
    /// and host name.
    #[arg(long = "insecure", action = ArgAction::SetFalse, default_value_t = false)]
    pub secure: bool,

    /// log debug level messages to log file specified in logger
    #[arg(long)]
    pub debug: bool,
}

impl EngineArgs {
    /// Extract the engine options from matches produced by a parser that
    /// went through [`add_engine_arguments`].
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        <Self as FromArgMatches>::from_arg_matches(matches)
    }
}

/// Add the six engine options to `command`.
pub fn add_engine_arguments(command: Command) -> Command {
    EngineArgs::augment_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "example")]
    struct TestCli {
        #[command(flatten)]
        engine: EngineArgs,
    }

    fn parse(args: &[&str]) -> Result<EngineArgs, clap::Error> {
        let mut argv = vec!["example"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).map(|cli| cli.engine)
    }

    #[test]
    fn test_required_options_only() {
        let args = parse(&["--engine-url", "https://engine:443", "--username", "admin@internal"])
            .expect("valid arguments");

        assert_eq!(args.engine_url, "https://engine:443");
        assert_eq!(args.username, "admin@internal");
        assert_eq!(args.password_file, None);
        assert_eq!(args.cafile, None);
        assert!(!args.secure);
        assert!(!args.debug);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "--engine-url",
            "https://engine",
            "--username",
            "admin@internal",
            "--password-file",
            "/tmp/pass",
            "-c",
            "/etc/pki/ca.pem",
            "--insecure",
            "--debug",
        ])
        .expect("valid arguments");

        assert_eq!(args.password_file, Some(PathBuf::from("/tmp/pass")));
        assert_eq!(args.cafile, Some(PathBuf::from("/etc/pki/ca.pem")));
        assert!(!args.secure);
        assert!(args.debug);
    }

    #[test]
    fn test_long_cafile() {
        let args = parse(&[
            "--engine-url",
            "https://engine",
            "--username",
            "admin",
            "--cafile",
            "ca.pem",
        ])
        .expect("valid arguments");
        assert_eq!(args.cafile, Some(PathBuf::from("ca.pem")));
    }

    #[test]
    fn test_missing_required_options() {
        assert!(parse(&["--username", "admin"]).is_err());
        assert!(parse(&["--engine-url", "https://engine"]).is_err());
    }

    #[test]
    fn test_empty_engine_url_rejected() {
        assert!(parse(&["--engine-url", "", "--username", "admin"]).is_err());
    }

    #[test]
    fn test_builder_command() {
        let command = add_engine_arguments(Command::new("example"));
        let matches = command
            .try_get_matches_from([
                "example",
                "--engine-url",
                "https://engine",
                "--username",
                "admin",
            ])
            .expect("valid arguments");

        let args = EngineArgs::from_matches(&matches).expect("engine args");
        assert_eq!(args.engine_url, "https://engine");
        assert!(!args.secure);
    }
}
