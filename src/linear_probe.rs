//! Closed hashing with linear probing.
//!
//! Known limitations, kept because they are part of what is being measured:
//!
//! - No tombstones. Removing a token empties its slot outright, so tokens
//!   that probed past that slot may become unreachable to later searches.
//! - No resizing. The caller must size the table above the number of live
//!   tokens it will ever hold; inserting into a full table panics.

use crate::engine::{EngineKind, SymbolTable};
use crate::hashing::linear_probe_index;
use crate::probes::{OpClass, ProbeCounters};
use crate::token::Token;

/// Fixed array of `m` slots probed at `(key + i) mod m`.
#[derive(Clone, Debug)]
pub struct ProbeSequenceTable {
    slots: Vec<Option<Token>>,
    occupied: usize,
    probes: ProbeCounters,
}

/// Where a probe walk over occupied slots ended.
enum Walk {
    /// Match at `slot` after `probes` comparisons.
    Hit { slot: usize, probes: u64 },
    /// Reached an empty slot, or went all the way around a full table.
    Miss { probes: u64 },
}

impl ProbeSequenceTable {
    pub fn new(m: usize) -> Self {
        assert!(m > 0, "closed table needs at least one slot");
        Self {
            slots: vec![None; m],
            occupied: 0,
            probes: ProbeCounters::new(),
        }
    }

    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn slot(&self, index: usize) -> Option<&Token> {
        self.slots[index].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.slots.iter().flatten()
    }

    /// Follow the probe sequence while slots are occupied.
    fn walk(&self, token: &Token) -> Walk {
        let m = self.slots.len();
        let key = token.key();
        for i in 0..m {
            let idx = linear_probe_index(key, i, m);
            match &self.slots[idx] {
                Some(stored) if stored == token => {
                    return Walk::Hit {
                        slot: idx,
                        probes: i as u64 + 1,
                    }
                }
                Some(_) => {}
                None => return Walk::Miss { probes: i as u64 },
            }
        }
        Walk::Miss { probes: m as u64 }
    }
}

impl SymbolTable for ProbeSequenceTable {
    fn kind(&self) -> EngineKind {
        EngineKind::LinearProbe
    }

    /// Writes into the first free slot; charged `i + 1`.
    ///
    /// # Panics
    ///
    /// Panics if every slot is occupied.
    fn insert(&mut self, token: Token) {
        assert!(!self.is_full(), "closed hash table is full");
        let m = self.slots.len();
        let key = token.key();
        let mut i = 0;
        let mut idx = linear_probe_index(key, i, m);
        while self.slots[idx].is_some() {
            i += 1;
            idx = linear_probe_index(key, i, m);
        }
        self.slots[idx] = Some(token);
        self.occupied += 1;
        self.probes.record(OpClass::Insert, i as u64 + 1);
    }

    fn search(&mut self, token: &Token) -> bool {
        match self.walk(token) {
            Walk::Hit { probes, .. } => {
                self.probes.record_search(true, probes);
                true
            }
            Walk::Miss { probes } => {
                self.probes.record_search(false, probes);
                false
            }
        }
    }

    /// Empties the matching slot; charged `i + 1` on a hit and the number of
    /// occupied slots examined on a miss.
    fn remove(&mut self, token: &Token) -> bool {
        match self.walk(token) {
            Walk::Hit { slot, probes } => {
                self.slots[slot] = None;
                self.occupied -= 1;
                self.probes.record(OpClass::Delete, probes);
                true
            }
            Walk::Miss { probes } => {
                self.probes.record(OpClass::Delete, probes);
                false
            }
        }
    }

    fn len(&self) -> usize {
        self.occupied
    }

    fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    fn probes(&self) -> &ProbeCounters {
        &self.probes
    }
}
