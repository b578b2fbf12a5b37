//! # probe-tables
//!
//! Four symbol-table strategies instrumented to count probes:
//!
//! - [`UnsortedChainTable`]: open hashing, chains in insertion order
//! - [`SortedChainTable`]: open hashing, chains kept sorted
//! - [`ProbeSequenceTable`]: closed hashing with linear probing
//! - [`BinarySearchTree`]: unbalanced BST with successor promotion
//!
//! A [`Driver`] loads the first `n` distinct tokens of a stream into every
//! selected engine, then replays the rest of the stream as searches, inserts
//! and deletes chosen by a cyclic ternary [`Schedule`]. Each engine reports
//! its average probes for successful searches, unsuccessful searches,
//! insertions and deletions.
//!
//! Nothing is ever rebalanced or resized: the point is to measure the
//! structures as they are.
//!
//! ## Example
//!
//! ```rust
//! use probe_tables::{Driver, EngineKind, RunConfig, Schedule, Token};
//!
//! let tokens: Vec<Token> = ["aaaaaaaaaa", "bbbbbbbbbb", "aaaaaaaaaa", "cccccccccc"]
//!     .into_iter()
//!     .map(Token::from)
//!     .collect();
//! let config = RunConfig::new(7, 2, EngineKind::ALL, Schedule::from_decimal(1));
//! let mut driver = Driver::new(config).unwrap();
//! let summary = driver.run(&tokens).unwrap();
//!
//! let bst = summary.engine(EngineKind::Bst).unwrap();
//! assert_eq!(bst.len, 3);
//! assert_eq!(bst.probes.insert, 1.75);
//! ```

#![deny(unsafe_code)]

pub mod bst;
pub mod chained;
pub mod driver;
pub mod engine;
pub mod error;
pub mod hashing;
pub mod linear_probe;
pub mod probes;
pub mod schedule;
pub mod token;

pub use bst::BinarySearchTree;
pub use chained::{SortedChainTable, UnsortedChainTable};
pub use driver::{Driver, EngineReport, RunConfig, RunSummary};
pub use engine::{EngineKind, SymbolTable};
pub use error::{Error, Result};
pub use linear_probe::ProbeSequenceTable;
pub use probes::{OpClass, ProbeCounters, ProbeReport};
pub use schedule::{Operation, Schedule};
pub use token::{Token, PAD_BYTE, TOKEN_LEN};


#[cfg(test)]
mod proptests;
