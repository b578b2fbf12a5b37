//! Error types for run configuration and the operation driver.

use thiserror::Error;

use crate::engine::EngineKind;

/// Errors raised while configuring or driving a probe run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Hash engines need at least one bucket or slot.
    #[error("table size must be positive")]
    ZeroTableSize,

    /// A run needs at least one engine to measure.
    #[error("no engines selected")]
    NoEngines,

    /// Method codes outside 1..=4.
    #[error("unknown engine code {code} (expected 1-4)")]
    UnknownEngine {
        /// The rejected code
        code: i64,
    },

    /// The operation schedule has no symbols.
    #[error("operation schedule is empty")]
    EmptySchedule,

    /// A schedule symbol outside the ternary digits.
    #[error("invalid schedule symbol {symbol:?} (expected 0, 1 or 2)")]
    InvalidScheduleSymbol {
        /// The rejected character
        symbol: char,
    },

    /// The closed table cannot even hold the load phase.
    #[error("closed hash table of size {table_size} cannot hold {initial_inserts} initial insertions")]
    TableTooSmall {
        /// Configured slot count
        table_size: usize,
        /// Configured load-phase insertions
        initial_inserts: usize,
    },

    /// An insert was about to be issued to a table with no free slot.
    #[error("{engine} is full at token position {position}")]
    TableFull {
        /// The engine that ran out of slots
        engine: EngineKind,
        /// Position of the offending token in the input sequence
        position: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
