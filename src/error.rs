use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while setting up or running the simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// A startup setting is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A color given on the command line could not be parsed
    #[error("invalid color {0:?}: expected a color name or #rrggbb")]
    InvalidColor(String),

    /// The terminal could not be set up, drawn to or restored
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// The log file could not be created
    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        /// Requested log file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A global tracing subscriber could not be installed
    #[error("failed to install logger: {0}")]
    Logging(String),
}

impl SimError {
    /// Creates an invalid configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = SimError::config("band width must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: band width must be positive"
        );
    }

    #[test]
    fn log_file_error_names_path() {
        let err = SimError::LogFile {
            path: PathBuf::from("/nope/sim.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/sim.log"));
        assert!(msg.contains("missing"));
    }
}
