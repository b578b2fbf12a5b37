//! Error handling for the probebench harness.

use thiserror::Error;

/// Errors surfaced by the harness.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or driver errors from the engines
    #[error(transparent)]
    Run(#[from] probe_tables::Error),

    /// Reading the token file or talking to the terminal
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the JSON report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An answer typed at a prompt could not be parsed
    #[error("invalid {what}: {input:?}")]
    InvalidInput {
        /// What was being asked for
        what: &'static str,
        /// What was typed
        input: String,
    },

    /// Standard input closed before every question was answered
    #[error("input ended while waiting for {what}")]
    UnexpectedEof {
        /// What was being asked for
        what: &'static str,
    },
}

impl Error {
    pub fn invalid_input(what: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidInput {
            what,
            input: input.into(),
        }
    }
}

/// Result alias for the harness.
pub type Result<T> = std::result::Result<T, Error>;
