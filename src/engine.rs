//! The symbol-table capability set and engine selection.

use std::fmt;

use crate::bst::BinarySearchTree;
use crate::chained::{SortedChainTable, UnsortedChainTable};
use crate::error::{Error, Result};
use crate::linear_probe::ProbeSequenceTable;
use crate::probes::{ProbeCounters, ProbeReport};
use crate::token::Token;

/// A probe-counting symbol table.
///
/// Every call is charged to the engine's own [`ProbeCounters`].
pub trait SymbolTable {
    fn kind(&self) -> EngineKind;

    fn insert(&mut self, token: Token);

    /// Returns whether `token` was found.
    fn search(&mut self, token: &Token) -> bool;

    /// Returns whether a stored token was removed. A miss is still charged
    /// as a deletion.
    fn remove(&mut self, token: &Token) -> bool;

    /// Number of stored tokens, duplicates included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a further insert would have nowhere to go.
    fn is_full(&self) -> bool {
        false
    }

    fn probes(&self) -> &ProbeCounters;

    fn report(&self) -> ProbeReport {
        self.probes().report()
    }
}

/// The four engine variants, numbered by their method codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EngineKind {
    UnsortedChain = 1,
    SortedChain = 2,
    LinearProbe = 3,
    Bst = 4,
}

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        EngineKind::UnsortedChain,
        EngineKind::SortedChain,
        EngineKind::LinearProbe,
        EngineKind::Bst,
    ];

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(EngineKind::UnsortedChain),
            2 => Ok(EngineKind::SortedChain),
            3 => Ok(EngineKind::LinearProbe),
            4 => Ok(EngineKind::Bst),
            _ => Err(Error::UnknownEngine { code }),
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::UnsortedChain => "open hashing (unsorted lists)",
            EngineKind::SortedChain => "open hashing (sorted lists)",
            EngineKind::LinearProbe => "closed hashing (linear probing)",
            EngineKind::Bst => "binary search tree",
        }
    }

    /// Whether the engine's storage is sized by the table size.
    pub fn is_hashed(self) -> bool {
        !matches!(self, EngineKind::Bst)
    }

    /// Construct an empty engine. The tree ignores `table_size`.
    pub fn build(self, table_size: usize) -> Box<dyn SymbolTable> {
        match self {
            EngineKind::UnsortedChain => Box::new(UnsortedChainTable::new(table_size)),
            EngineKind::SortedChain => Box::new(SortedChainTable::new(table_size)),
            EngineKind::LinearProbe => Box::new(ProbeSequenceTable::new(table_size)),
            EngineKind::Bst => Box::new(BinarySearchTree::new()),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
