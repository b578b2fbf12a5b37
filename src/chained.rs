//! Open hashing: a fixed array of chains, with unsorted or sorted buckets.
//!
//! Both variants hash with [`multiplicative_index`] over the additive token
//! key and scan chains linearly for search and removal. They differ only in
//! where an insert places the new token and what that insert is charged.

use smallvec::SmallVec;

use crate::engine::{EngineKind, SymbolTable};
use crate::hashing::multiplicative_index;
use crate::probes::{OpClass, ProbeCounters};
use crate::token::Token;

type Chain = SmallVec<[Token; 4]>;

/// Bucket storage shared by both chained tables. Never resized.
#[derive(Clone, Debug)]
struct Chains {
    buckets: Vec<Chain>,
    len: usize,
}

impl Chains {
    fn new(m: usize) -> Self {
        assert!(m > 0, "chained table needs at least one bucket");
        Self {
            buckets: vec![Chain::new(); m],
            len: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, token: &Token) -> usize {
        multiplicative_index(token.key(), self.buckets.len())
    }

    /// Linear scan. Returns `(found, probes)`: the 1-based position on a hit,
    /// the chain length on a miss.
    fn scan(&self, token: &Token) -> (bool, u64) {
        let chain = &self.buckets[self.bucket_index(token)];
        match chain.iter().position(|t| t == token) {
            Some(pos) => (true, pos as u64 + 1),
            None => (false, chain.len() as u64),
        }
    }

    /// Drop the first equal token. Returns `(removed, chain length after)`.
    fn remove_first(&mut self, token: &Token) -> (bool, u64) {
        let idx = self.bucket_index(token);
        let chain = &mut self.buckets[idx];
        let removed = match chain.iter().position(|t| t == token) {
            Some(pos) => {
                chain.remove(pos);
                true
            }
            None => false,
        };
        let after = chain.len() as u64;
        if removed {
            self.len -= 1;
        }
        (removed, after)
    }

    fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.buckets.iter().flatten()
    }
}

/// Open hashing with append-ordered chains.
#[derive(Clone, Debug)]
pub struct UnsortedChainTable {
    chains: Chains,
    probes: ProbeCounters,
}

impl UnsortedChainTable {
    pub fn new(m: usize) -> Self {
        Self {
            chains: Chains::new(m),
            probes: ProbeCounters::new(),
        }
    }

    pub fn table_size(&self) -> usize {
        self.chains.buckets.len()
    }

    pub fn bucket_index(&self, token: &Token) -> usize {
        self.chains.bucket_index(token)
    }

    pub fn bucket(&self, index: usize) -> &[Token] {
        &self.chains.buckets[index]
    }

    pub fn bucket_len(&self, index: usize) -> usize {
        self.chains.buckets[index].len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.chains.iter()
    }
}

impl SymbolTable for UnsortedChainTable {
    fn kind(&self) -> EngineKind {
        EngineKind::UnsortedChain
    }

    /// Appends; charged the whole chain length after the append.
    fn insert(&mut self, token: Token) {
        let idx = self.chains.bucket_index(&token);
        let chain = &mut self.chains.buckets[idx];
        chain.push(token);
        let probes = chain.len() as u64;
        self.chains.len += 1;
        self.probes.record(OpClass::Insert, probes);
    }

    fn search(&mut self, token: &Token) -> bool {
        let (found, probes) = self.chains.scan(token);
        self.probes.record_search(found, probes);
        found
    }

    /// Charged the chain length *after* removal, not the scan depth.
    fn remove(&mut self, token: &Token) -> bool {
        let (removed, after) = self.chains.remove_first(token);
        self.probes.record(OpClass::Delete, after);
        removed
    }

    fn len(&self) -> usize {
        self.chains.len
    }

    fn probes(&self) -> &ProbeCounters {
        &self.probes
    }
}

/// Open hashing with chains kept in ascending order.
///
/// Order only decides insert placement. Searches still scan the whole chain
/// on a miss.
#[derive(Clone, Debug)]
pub struct SortedChainTable {
    chains: Chains,
    probes: ProbeCounters,
}

impl SortedChainTable {
    pub fn new(m: usize) -> Self {
        Self {
            chains: Chains::new(m),
            probes: ProbeCounters::new(),
        }
    }

    pub fn table_size(&self) -> usize {
        self.chains.buckets.len()
    }

    pub fn bucket_index(&self, token: &Token) -> usize {
        self.chains.bucket_index(token)
    }

    pub fn bucket(&self, index: usize) -> &[Token] {
        &self.chains.buckets[index]
    }

    pub fn bucket_len(&self, index: usize) -> usize {
        self.chains.buckets[index].len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.chains.iter()
    }
}

impl SymbolTable for SortedChainTable {
    fn kind(&self) -> EngineKind {
        EngineKind::SortedChain
    }

    /// Inserts before the first token `>=` the new one; charged the 1-based
    /// position it lands at.
    fn insert(&mut self, token: Token) {
        let idx = self.chains.bucket_index(&token);
        let chain = &mut self.chains.buckets[idx];
        let pos = chain
            .iter()
            .position(|t| *t >= token)
            .unwrap_or(chain.len());
        chain.insert(pos, token);
        self.chains.len += 1;
        self.probes.record(OpClass::Insert, pos as u64 + 1);
    }

    fn search(&mut self, token: &Token) -> bool {
        let (found, probes) = self.chains.scan(token);
        self.probes.record_search(found, probes);
        found
    }

    fn remove(&mut self, token: &Token) -> bool {
        let (removed, after) = self.chains.remove_first(token);
        self.probes.record(OpClass::Delete, after);
        removed
    }

    fn len(&self) -> usize {
        self.chains.len
    }

    fn probes(&self) -> &ProbeCounters {
        &self.probes
    }
}
