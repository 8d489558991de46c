//! Error types for trackwarp

use std::io;

use thiserror::Error;

/// Result type for trackwarp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while warping a track
///
/// Every variant is terminal for the current invocation: the core either
/// returns a complete track or one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Degenerate input: too-short window, invalid zone, non-finite coordinates
    #[error("Invalid input: {0}")]
    Input(String),

    /// The trajectory integrator hit its iteration cap
    #[error("No convergence after {iterations} iterations ({distance:.1} m from target)")]
    Convergence { iterations: usize, distance: f64 },

    /// Missing or malformed artwork asset
    #[error("Failed to load artwork '{name}': {reason}")]
    ArtworkLoad { name: String, reason: String },

    /// Target resolution failed
    #[error("Target lookup failed: {0}")]
    ExternalLookup(String),

    /// Failure reported by the PROJ library
    #[error("Projection error: {0}")]
    Projection(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed track record
    #[error("Record error: {0}")]
    Record(#[from] csv::Error),

    /// Invalid or unreadable settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for an artwork load failure
    pub fn artwork(name: &str, reason: impl ToString) -> Self {
        Error::ArtworkLoad {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
