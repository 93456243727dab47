//! Error types for modeld2 operations.
//!
//! Building and rendering a graph cannot fail; errors only come from reading
//! the snapshot and the configuration.

use std::io;

use thiserror::Error;

use modeld2_loader::error::LoadError;

/// The main error type for modeld2 operations.
///
/// The `Load` variant keeps the snapshot source next to the diagnostics so
/// they can be reported with source snippets.
#[derive(Debug, Error)]
pub enum ModelD2Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Load { err: LoadError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModelD2Error {
    /// Create a new `Load` error with the associated snapshot source.
    pub fn new_load_error(err: LoadError, src: impl Into<String>) -> Self {
        Self::Load {
            err,
            src: src.into(),
        }
    }
}
