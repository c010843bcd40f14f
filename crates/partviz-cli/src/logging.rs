use stderrlog::{LogLevelNum, Timestamp};

/// Logging setup arg group.
///
/// Logs go to stderr; the rendered grid owns stdout.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

/// Maps a numeric level onto stderrlog's levels; 0 is off.
fn log_level(level: u8) -> LogLevelNum {
    match level {
        0 => LogLevelNum::Off,
        1 => LogLevelNum::Error,
        2 => LogLevelNum::Warn,
        3 => LogLevelNum::Info,
        4 => LogLevelNum::Debug,
        _ => LogLevelNum::Trace,
    }
}

impl LogArgs {
    /// The effective level: `default`, raised by one per `-v`.
    pub fn level(
        &self,
        default: u8,
    ) -> u8 {
        default.saturating_add(self.verbose)
    }

    /// Install the global stderr logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(log_level(self.level(default)))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}
