//! The cyclic operation schedule.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A replay operation, numbered by its ternary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search = 0,
    Insert = 1,
    Delete = 2,
}

impl Operation {
    pub fn from_digit(symbol: char) -> Result<Self> {
        match symbol {
            '0' => Ok(Operation::Search),
            '1' => Ok(Operation::Insert),
            '2' => Ok(Operation::Delete),
            _ => Err(Error::InvalidScheduleSymbol { symbol }),
        }
    }

    pub fn digit(self) -> char {
        match self {
            Operation::Search => '0',
            Operation::Insert => '1',
            Operation::Delete => '2',
        }
    }
}

/// Non-empty sequence of operations, indexed modulo its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    ops: Vec<Operation>,
}

impl Schedule {
    pub fn new(ops: Vec<Operation>) -> Result<Self> {
        if ops.is_empty() {
            return Err(Error::EmptySchedule);
        }
        Ok(Self { ops })
    }

    /// Base-3 digits of `decimal`, most significant first. Zero is the single
    /// digit `0`.
    pub fn from_decimal(mut decimal: u64) -> Self {
        let mut ops = Vec::new();
        loop {
            ops.push(match decimal % 3 {
                0 => Operation::Search,
                1 => Operation::Insert,
                _ => Operation::Delete,
            });
            decimal /= 3;
            if decimal == 0 {
                break;
            }
        }
        ops.reverse();
        Self { ops }
    }

    /// Operation for the token at `position`.
    #[inline]
    pub fn at(&self, position: usize) -> Operation {
        self.ops[position % self.ops.len()]
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[Operation] {
        &self.ops
    }
}

impl FromStr for Schedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ops = s
            .trim()
            .chars()
            .map(Operation::from_digit)
            .collect::<Result<Vec<_>>>()?;
        Self::new(ops)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op.digit())?;
        }
        Ok(())
    }
}
