//! The operation driver: load the first `n` distinct tokens, then replay the
//! stream from position `n` against the cyclic schedule.
//!
//! The load scan may run past position `n` when the prefix repeats tokens.
//! Replay still starts at `n`, so those tokens are replayed as well.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::engine::{EngineKind, SymbolTable};
use crate::error::{Error, Result};
use crate::probes::ProbeReport;
use crate::schedule::{Operation, Schedule};
use crate::token::Token;

/// Closed-table load factor above which a run is flagged in the log.
const HIGH_LOAD_FACTOR: f64 = 0.9;

/// Everything a run is configured with.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Bucket/slot count shared by the hash engines.
    pub table_size: usize,
    /// Distinct tokens inserted during the load phase.
    pub initial_inserts: usize,
    /// Engines to construct, in report order.
    pub engines: Vec<EngineKind>,
    pub schedule: Schedule,
}

impl RunConfig {
    pub fn new(
        table_size: usize,
        initial_inserts: usize,
        engines: impl IntoIterator<Item = EngineKind>,
        schedule: Schedule,
    ) -> Self {
        Self {
            table_size,
            initial_inserts,
            engines: engines.into_iter().collect(),
            schedule,
        }
    }

    /// Check the configuration and collapse repeated engine selections.
    pub fn validate(mut self) -> Result<Self> {
        if self.table_size == 0 {
            return Err(Error::ZeroTableSize);
        }
        let mut seen = HashSet::new();
        self.engines.retain(|kind| seen.insert(*kind));
        if self.engines.is_empty() {
            return Err(Error::NoEngines);
        }
        if self.schedule.is_empty() {
            return Err(Error::EmptySchedule);
        }
        if self.engines.contains(&EngineKind::LinearProbe)
            && self.table_size <= self.initial_inserts
        {
            return Err(Error::TableTooSmall {
                table_size: self.table_size,
                initial_inserts: self.initial_inserts,
            });
        }
        Ok(self)
    }
}

/// Final state of one engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineReport {
    pub kind: EngineKind,
    /// Tokens stored at the end of the run.
    pub len: usize,
    pub probes: ProbeReport,
}

/// Outcome of [`Driver::run`].
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Distinct tokens inserted during the load phase.
    pub loaded: usize,
    /// Sequence position where replay started: `n`, clamped to the input.
    pub replay_start: usize,
    pub searches: usize,
    pub inserts: usize,
    pub deletes: usize,
    /// One entry per selected engine, in selection order.
    pub engines: Vec<EngineReport>,
}

impl RunSummary {
    pub fn replayed(&self) -> usize {
        self.searches + self.inserts + self.deletes
    }

    pub fn engine(&self, kind: EngineKind) -> Option<&EngineReport> {
        self.engines.iter().find(|e| e.kind == kind)
    }
}

/// Drives the selected engines in lockstep over a token sequence.
pub struct Driver {
    config: RunConfig,
    engines: Vec<Box<dyn SymbolTable>>,
}

impl Driver {
    /// Validate `config` and construct only the selected engines.
    pub fn new(config: RunConfig) -> Result<Self> {
        let config = config.validate()?;
        let engines = config
            .engines
            .iter()
            .map(|kind| {
                if kind.is_hashed() {
                    debug!("constructing {kind} (table size {})", config.table_size);
                } else {
                    debug!("constructing {kind}");
                }
                kind.build(config.table_size)
            })
            .collect();
        Ok(Self { config, engines })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn engines(&self) -> &[Box<dyn SymbolTable>] {
        &self.engines
    }

    pub fn engine(&self, kind: EngineKind) -> Option<&dyn SymbolTable> {
        self.engines
            .iter()
            .find(|e| e.kind() == kind)
            .map(|e| &**e)
    }

    /// Run both phases over `tokens` and report every engine.
    pub fn run(&mut self, tokens: &[Token]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        let loaded = self.load(tokens)?;
        let replay_start = self.config.initial_inserts.min(tokens.len());
        summary.loaded = loaded;
        summary.replay_start = replay_start;
        debug!(
            "load phase inserted {loaded} distinct tokens, replay starts at position {replay_start}"
        );
        if loaded < self.config.initial_inserts {
            warn!(
                "only {loaded} distinct tokens available, {} requested",
                self.config.initial_inserts
            );
        }

        for (position, token) in tokens.iter().enumerate().skip(replay_start) {
            match self.config.schedule.at(position) {
                Operation::Search => {
                    summary.searches += 1;
                    for engine in &mut self.engines {
                        engine.search(token);
                    }
                }
                Operation::Insert => {
                    summary.inserts += 1;
                    self.insert_all(*token, position)?;
                }
                Operation::Delete => {
                    summary.deletes += 1;
                    for engine in &mut self.engines {
                        engine.remove(token);
                    }
                }
            }
        }
        debug!(
            "replayed {} operations ({} searches, {} inserts, {} deletes)",
            summary.replayed(),
            summary.searches,
            summary.inserts,
            summary.deletes
        );

        summary.engines = self.reports();
        for report in &summary.engines {
            info!(
                "{}: {} tokens, avg probes hit={:.3} miss={:.3} insert={:.3} delete={:.3}",
                report.kind,
                report.len,
                report.probes.successful_search,
                report.probes.unsuccessful_search,
                report.probes.insert,
                report.probes.delete
            );
            if report.kind == EngineKind::LinearProbe {
                let load = report.len as f64 / self.config.table_size as f64;
                if load > HIGH_LOAD_FACTOR {
                    warn!("closed hash table load factor is {load:.2}");
                }
            }
        }
        Ok(summary)
    }

    /// Current report of every engine, in selection order.
    pub fn reports(&self) -> Vec<EngineReport> {
        self.engines
            .iter()
            .map(|e| EngineReport {
                kind: e.kind(),
                len: e.len(),
                probes: e.report(),
            })
            .collect()
    }

    /// Admit the first `n` distinct tokens, scanning as far as needed.
    /// Returns how many were admitted.
    fn load(&mut self, tokens: &[Token]) -> Result<usize> {
        let n = self.config.initial_inserts;
        let mut distinct: HashSet<Token> = HashSet::with_capacity(n.min(tokens.len()));
        let mut position = 0;
        while distinct.len() < n && position < tokens.len() {
            let token = tokens[position];
            if distinct.insert(token) {
                self.insert_all(token, position)?;
            }
            position += 1;
        }
        Ok(distinct.len())
    }

    fn insert_all(&mut self, token: Token, position: usize) -> Result<()> {
        if let Some(full) = self.engines.iter().find(|e| e.is_full()) {
            return Err(Error::TableFull {
                engine: full.kind(),
                position,
            });
        }
        for engine in &mut self.engines {
            engine.insert(token);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::BinarySearchTree;
    use crate::probes::OpClass;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::from(*w)).collect()
    }

    fn config(m: usize, n: usize, engines: &[EngineKind], schedule: &str) -> RunConfig {
        RunConfig::new(m, n, engines.iter().copied(), schedule.parse().unwrap())
    }

    #[test]
    fn test_validate() {
        let s = Schedule::from_decimal(1);
        assert_eq!(
            RunConfig::new(0, 1, [EngineKind::Bst], s.clone()).validate().err(),
            Some(Error::ZeroTableSize)
        );
        assert_eq!(
            RunConfig::new(5, 1, Vec::new(), s.clone()).validate().err(),
            Some(Error::NoEngines)
        );
        assert_eq!(
            RunConfig::new(5, 5, [EngineKind::LinearProbe], s.clone()).validate().err(),
            Some(Error::TableTooSmall {
                table_size: 5,
                initial_inserts: 5
            })
        );
        // Only the closed table is bounded by its size.
        assert!(RunConfig::new(5, 50, [EngineKind::UnsortedChain], s.clone())
            .validate()
            .is_ok());
        let deduped = RunConfig::new(
            5,
            1,
            [EngineKind::Bst, EngineKind::UnsortedChain, EngineKind::Bst],
            s,
        )
        .validate()
        .unwrap();
        assert_eq!(deduped.engines, vec![EngineKind::Bst, EngineKind::UnsortedChain]);
    }

    #[test]
    fn test_end_to_end_all_inserts() {
        let toks = tokens(&["aaaaaaaaaa", "bbbbbbbbbb", "aaaaaaaaaa", "cccccccccc"]);
        let mut driver = Driver::new(config(7, 2, &EngineKind::ALL, "1")).unwrap();
        let summary = driver.run(&toks).unwrap();

        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.replay_start, 2);
        assert_eq!(summary.inserts, 2);
        assert_eq!(summary.replayed(), 2);

        for report in &summary.engines {
            assert_eq!(report.probes.count(OpClass::Insert), 4, "{}", report.kind);
        }

        let bst = summary.engine(EngineKind::Bst).unwrap();
        assert_eq!(bst.len, 3);
        // a(1) b(2) | duplicate a(1) c(3)
        assert_eq!(bst.probes.insert, 7.0 / 4.0);

        // The hash tables keep the duplicate.
        assert_eq!(summary.engine(EngineKind::UnsortedChain).unwrap().len, 4);
        assert_eq!(summary.engine(EngineKind::LinearProbe).unwrap().len, 4);
    }

    #[test]
    fn test_replay_starts_at_n_even_when_load_scans_further() {
        // Positions: 0 a, 1 a, 2 b, 3 c, 4 a. Loading admits a and b, scanning
        // through position 2; replay still covers positions 2, 3 and 4.
        let toks = tokens(&["a", "a", "b", "c", "a"]);
        let mut driver = Driver::new(config(11, 2, &[EngineKind::Bst], "0")).unwrap();
        let summary = driver.run(&toks).unwrap();
        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.replay_start, 2);
        assert_eq!(summary.searches, 3);
        let bst = summary.engine(EngineKind::Bst).unwrap();
        assert_eq!(bst.probes.count(OpClass::Insert), 2);
        // b and a hit, c misses.
        assert_eq!(bst.probes.count(OpClass::SuccessfulSearch), 2);
        assert_eq!(bst.probes.count(OpClass::UnsuccessfulSearch), 1);
    }

    #[test]
    fn test_replay_starts_at_n_when_too_few_distinct_tokens() {
        let toks = tokens(&["a"; 5]);
        let mut driver = Driver::new(config(11, 3, &[EngineKind::UnsortedChain], "0")).unwrap();
        let summary = driver.run(&toks).unwrap();
        assert_eq!(summary.loaded, 1);
        assert_eq!(summary.replay_start, 3);
        assert_eq!(summary.replayed(), 2);
        let report = summary.engine(EngineKind::UnsortedChain).unwrap();
        assert_eq!(report.probes.count(OpClass::SuccessfulSearch), 2);
    }

    #[test]
    fn test_replay_start_clamped_to_input() {
        let toks = tokens(&["a", "b"]);
        let mut driver = Driver::new(config(11, 5, &[EngineKind::Bst], "0")).unwrap();
        let summary = driver.run(&toks).unwrap();
        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.replay_start, 2);
        assert_eq!(summary.replayed(), 0);
    }

    #[test]
    fn test_schedule_indexed_by_sequence_position() {
        // schedule "012": position 3 -> search, 4 -> insert, 5 -> delete
        let toks = tokens(&["p", "q", "r", "p", "s", "q"]);
        let mut driver = Driver::new(config(11, 3, &[EngineKind::SortedChain], "012")).unwrap();
        let summary = driver.run(&toks).unwrap();
        assert_eq!(summary.replay_start, 3);
        assert_eq!((summary.searches, summary.inserts, summary.deletes), (1, 1, 1));
        let report = summary.engine(EngineKind::SortedChain).unwrap();
        assert_eq!(report.len, 3);
        assert_eq!(report.probes.count(OpClass::SuccessfulSearch), 1);
        assert_eq!(report.probes.count(OpClass::Delete), 1);
    }

    #[test]
    fn test_zero_initial_inserts_replays_everything() {
        let toks = tokens(&["x", "y", "x"]);
        let mut driver = Driver::new(config(5, 0, &[EngineKind::UnsortedChain], "2")).unwrap();
        let summary = driver.run(&toks).unwrap();
        assert_eq!(summary.loaded, 0);
        assert_eq!(summary.deletes, 3);
        let report = summary.engine(EngineKind::UnsortedChain).unwrap();
        assert_eq!(report.probes.delete, 0.0);
        assert_eq!(report.probes.count(OpClass::Delete), 3);
    }

    #[test]
    fn test_empty_input_reports_zero() {
        let mut driver = Driver::new(config(5, 3, &EngineKind::ALL, "0")).unwrap();
        let summary = driver.run(&[]).unwrap();
        assert_eq!(summary.loaded, 0);
        assert_eq!(summary.replayed(), 0);
        for report in &summary.engines {
            for class in OpClass::ALL {
                assert_eq!(report.probes.average(class), 0.0);
            }
        }
    }

    #[test]
    fn test_full_closed_table_is_an_error() {
        let toks = tokens(&["a", "b", "c", "d"]);
        let mut driver = Driver::new(config(2, 1, &[EngineKind::LinearProbe], "1")).unwrap();
        let err = driver.run(&toks).unwrap_err();
        assert_eq!(
            err,
            Error::TableFull {
                engine: EngineKind::LinearProbe,
                position: 2
            }
        );
    }

    #[test]
    fn test_unselected_engines_are_not_built() {
        let driver = Driver::new(config(5, 0, &[EngineKind::SortedChain], "0")).unwrap();
        assert_eq!(driver.engines().len(), 1);
        assert!(driver.engine(EngineKind::Bst).is_none());
        assert!(driver.engine(EngineKind::SortedChain).is_some());
    }

    #[test]
    fn test_driver_matches_direct_engine_calls() {
        let toks = tokens(&["k", "e", "y", "s", "e", "k", "z", "y", "q"]);
        let mut driver = Driver::new(config(13, 3, &[EngineKind::Bst], "021")).unwrap();
        let summary = driver.run(&toks).unwrap();

        let mut bst = BinarySearchTree::new();
        for t in &toks[..3] {
            bst.insert(*t);
        }
        let schedule: Schedule = "021".parse().unwrap();
        for (i, t) in toks.iter().enumerate().skip(3) {
            match schedule.at(i) {
                Operation::Search => {
                    bst.search(t);
                }
                Operation::Insert => bst.insert(*t),
                Operation::Delete => {
                    bst.remove(t);
                }
            }
        }
        assert_eq!(summary.engine(EngineKind::Bst).unwrap().probes, bst.report());
    }
}
