//! Probe accounting shared by every engine.

/// The four operation classes that are measured separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpClass {
    SuccessfulSearch,
    UnsuccessfulSearch,
    Insert,
    Delete,
}

impl OpClass {
    pub const ALL: [OpClass; 4] = [
        OpClass::SuccessfulSearch,
        OpClass::UnsuccessfulSearch,
        OpClass::Insert,
        OpClass::Delete,
    ];

    #[inline]
    fn slot(self) -> usize {
        match self {
            OpClass::SuccessfulSearch => 0,
            OpClass::UnsuccessfulSearch => 1,
            OpClass::Insert => 2,
            OpClass::Delete => 3,
        }
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            OpClass::SuccessfulSearch => "successful search",
            OpClass::UnsuccessfulSearch => "unsuccessful search",
            OpClass::Insert => "insertion",
            OpClass::Delete => "deletion",
        }
    }
}

/// `(probe sum, operation count)` per operation class.
///
/// Counters only grow; nothing resets them during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeCounters {
    sums: [u64; 4],
    counts: [u64; 4],
}

impl ProbeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge one operation of `class` costing `probes`.
    #[inline]
    pub fn record(&mut self, class: OpClass, probes: u64) {
        let slot = class.slot();
        self.sums[slot] += probes;
        self.counts[slot] += 1;
    }

    /// Charge a search, picking the class from its outcome.
    #[inline]
    pub fn record_search(&mut self, found: bool, probes: u64) {
        let class = if found {
            OpClass::SuccessfulSearch
        } else {
            OpClass::UnsuccessfulSearch
        };
        self.record(class, probes);
    }

    #[inline]
    pub fn sum(&self, class: OpClass) -> u64 {
        self.sums[class.slot()]
    }

    #[inline]
    pub fn count(&self, class: OpClass) -> u64 {
        self.counts[class.slot()]
    }

    /// `sum / count`, or 0 when nothing of `class` was recorded.
    pub fn average(&self, class: OpClass) -> f64 {
        average_probes(self.sum(class), self.count(class))
    }

    pub fn report(&self) -> ProbeReport {
        ProbeReport {
            successful_search: self.average(OpClass::SuccessfulSearch),
            unsuccessful_search: self.average(OpClass::UnsuccessfulSearch),
            insert: self.average(OpClass::Insert),
            delete: self.average(OpClass::Delete),
            counts: self.counts,
        }
    }
}

/// Average probes per operation with the count-zero convention.
#[inline]
pub fn average_probes(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Read-only snapshot of an engine's averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReport {
    pub successful_search: f64,
    pub unsuccessful_search: f64,
    pub insert: f64,
    pub delete: f64,
    counts: [u64; 4],
}

impl ProbeReport {
    pub fn average(&self, class: OpClass) -> f64 {
        match class {
            OpClass::SuccessfulSearch => self.successful_search,
            OpClass::UnsuccessfulSearch => self.unsuccessful_search,
            OpClass::Insert => self.insert,
            OpClass::Delete => self.delete,
        }
    }

    pub fn count(&self, class: OpClass) -> u64 {
        self.counts[class.slot()]
    }
}
