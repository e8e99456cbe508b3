use base::FitError;
use std::path::PathBuf;

/// Error type for runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error while writing the CSV report.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Malformed configuration file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error while writing a plot.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Logger error.
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
    /// The configuration file can't be loaded.
    #[error("Failed to load configuration file {}: {source}", .path.display())]
    Config {
        /// Path to the file.
        path: PathBuf,
        /// What went wrong.
        source: Box<RuntimeError>,
    },
    /// A command line argument is malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// No preset with this name.
    #[error("Unknown preset '{0}', see `metalfit list`")]
    UnknownPreset(String),
    /// A fit failed.
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),
    /// Some presets of a batch failed, the others were reported.
    #[error("{failed} of {total} presets failed to fit")]
    PartialFailure {
        /// Number of failed presets.
        failed: usize,
        /// Number of presets in the batch.
        total: usize,
    },
}
