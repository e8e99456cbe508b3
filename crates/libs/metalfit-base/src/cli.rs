//! Helpers shared by the command line front ends: argument parsing and
//! logger initialisation.

use log::LevelFilter;
use std::{io::Write, time::SystemTime};

/// Arguments common to every front end.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Whether to print verbose information.
    #[clap(short, long, help = "Use verbose output (log level = 4)")]
    pub verbose: bool,

    /// Whether to show the timestamp in the log.
    #[clap(
        long,
        help = "Show timestamp for each log message in seconds since\nprogram starts"
    )]
    pub log_timestamp: bool,

    /// Verbosity level for the log.
    #[clap(
        long,
        help = "Setting logging verbosity level (higher for more\ndetails)\n  0 - error\n  1 - \
                warn + error\n  2 - info + warn + error\n  3 - debug + info + warn + error\n  4 - \
                trace + debug + info + warn + error\n\x08",
        default_value_t = 1
    )]
    pub log_level: u8,
}

impl CommonArgs {
    /// Log level after `--verbose` has been taken into account.
    pub fn effective_log_level(&self) -> u8 {
        if self.verbose {
            4
        } else {
            self.log_level
        }
    }
}

/// Parses the arguments, returns the arguments and the launch time.
///
/// # Arguments
///
/// * `name` - The name of the program.
pub fn parse_args<T: clap::Parser>(name: &str) -> (T, SystemTime) {
    let args = T::parse();
    let launch_time = SystemTime::now();
    log::info!(
        "{} launched at {} on {}.",
        name,
        chrono::DateTime::<chrono::Utc>::from(launch_time),
        std::env::consts::OS
    );

    (args, launch_time)
}

/// A filter for the logger.
///
/// This is a tuple of a module name and a log level filter.
pub type LogFilter<'a> = (&'a str, LevelFilter);

/// Initialises the logger.
///
/// # Arguments
///
/// * `timestamp` - Base time of the elapsed timestamp printed before each
///   message; no timestamp if `None`.
/// * `log_level` - Top level verbosity of the program, see
///   [`log_filter_from_level`].
/// * `filters` - Per module filters.
pub fn setup_logging(
    timestamp: Option<SystemTime>,
    log_level: u8,
    filters: &[LogFilter],
) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::builder();
    builder.format(move |buf, record| {
        let top_level_module = record
            .module_path()
            .and_then(|path| path.split("::").next())
            .unwrap_or("?");
        match timestamp {
            Some(timestamp) => {
                let duration = timestamp.elapsed().unwrap_or_default();
                writeln!(
                    buf,
                    "{} {:5} [{}]: {}",
                    format_elapsed(duration),
                    record.level(),
                    top_level_module,
                    record.args()
                )
            },
            None => {
                writeln!(
                    buf,
                    "{:5} [{}]: {}",
                    record.level(),
                    top_level_module,
                    record.args()
                )
            },
        }
    });
    for &(module, level) in filters {
        builder.filter(Some(module), level);
    }
    builder
        .filter_level(log_filter_from_level(log_level))
        .try_init()
}

/// Formats a duration as `h:m:s.ms`.
fn format_elapsed(duration: std::time::Duration) -> String {
    let millis = duration.as_millis() % 1000;
    let seconds = duration.as_secs() % 60;
    let minutes = (duration.as_secs() / 60) % 60;
    let hours = (duration.as_secs() / 60) / 60;
    format!("{}:{}:{}.{:03}", hours, minutes, seconds, millis)
}

/// Converts a log level to a log filter.
pub fn log_filter_from_level(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn levels() {
        assert_eq!(log_filter_from_level(0), LevelFilter::Error);
        assert_eq!(log_filter_from_level(2), LevelFilter::Info);
        assert_eq!(log_filter_from_level(9), LevelFilter::Trace);
    }

    #[test]
    fn elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(3_723_045)), "1:2:3.045");
    }
}
