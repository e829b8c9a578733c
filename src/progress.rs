//! Elapsed-time progress lines
//!
//! Every line has the form `[ <seconds> ] <message>`, with the seconds
//! right-aligned in five columns and one decimal.

use lazy_static::lazy_static;
use std::io::{self, Write};
use std::time::Duration;

#[cfg(test)]
use mock_instant::thread_local::Instant;
#[cfg(not(test))]
use std::time::Instant;

lazy_static! {
    static ref PROCESS_PROGRESS: Progress = Progress::new();
}

/// Progress reporter measuring elapsed time from a fixed start
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    start: Instant,
}

impl Progress {
    /// Start measuring from now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start measuring from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self { start }
    }

    /// Time elapsed since the start
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Print a progress line to standard output
    pub fn report(&self, msg: &str) {
        println!("{}", format_line(self.elapsed(), msg));
    }

    /// Write a progress line to `out`
    pub fn report_to<W: Write>(&self, out: &mut W, msg: &str) -> io::Result<()> {
        writeln!(out, "{}", format_line(self.elapsed(), msg))
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Fix the zero point of the process-wide reporter.
///
/// Call this first thing in `main`; later calls have no effect. Without it
/// the zero point is taken by the first [`progress`] call.
pub fn init() {
    lazy_static::initialize(&PROCESS_PROGRESS);
}

/// Print a progress line using the process-wide reporter.
///
/// All calls share one zero point, fixed by [`init`].
pub fn progress(msg: &str) {
    PROCESS_PROGRESS.report(msg);
}

/// Format a single progress line without the trailing newline
pub fn format_line(elapsed: Duration, msg: &str) -> String {
    format!("[ {:5.1} ] {}", elapsed.as_secs_f64(), msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_instant::thread_local::MockClock;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(Duration::ZERO, "start"), "[   0.0 ] start");
        assert_eq!(
            format_line(Duration::from_millis(12_340), "done"),
            "[  12.3 ] done"
        );
        assert_eq!(
            format_line(Duration::from_secs(12_345), "long"),
            "[ 12345.0 ] long"
        );
    }

    #[test]
    fn test_report_uses_fixed_start() {
        let progress = Progress::new();
        let mut out = Vec::new();

        progress.report_to(&mut out, "Connecting").unwrap();
        MockClock::advance(Duration::from_millis(12_340));
        progress.report_to(&mut out, "Connected").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["[   0.0 ] Connecting", "[  12.3 ] Connected"]);
    }

    #[test]
    fn test_process_zero_point_fixed_by_init() {
        init();
        MockClock::advance(Duration::from_secs(5));
        init();

        assert_eq!(PROCESS_PROGRESS.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_explicit_start() {
        let start = Instant::now();
        MockClock::advance(Duration::from_secs(3));
        let progress = Progress::starting_at(start);

        let mut out = Vec::new();
        progress.report_to(&mut out, "late").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[   3.0 ] late\n");
    }
}
