//! Command-line arguments and their merge with interactive answers.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use probe_tables::{EngineKind, RunConfig, Schedule};

use crate::error::Result;
use crate::prompt::Prompter;
use crate::tokenizer::{Tokenizer, DEFAULT_DELIMITERS};

/// Replay a token file against probe-counting symbol tables.
///
/// Anything not given here is asked for interactively.
#[derive(Parser, Debug, Default)]
#[command(name = "probebench", version, about)]
pub struct Args {
    /// Hash table size shared by the hash-based methods
    #[arg(short = 'm', long)]
    pub table_size: Option<usize>,

    /// Number of distinct tokens inserted before the replay phase
    #[arg(short = 'n', long)]
    pub inserts: Option<usize>,

    /// Methods to investigate: 1 open hash unsorted, 2 open hash sorted,
    /// 3 closed hash, 4 BST (e.g. 1,3,4)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub methods: Option<Vec<i64>>,

    /// Decimal number whose radix-3 digits form the operation schedule
    #[arg(short = 'i', long)]
    pub radix3_seed: Option<u64>,

    /// Schedule digits given directly (0 search, 1 insert, 2 delete)
    #[arg(long, conflicts_with = "radix3_seed")]
    pub schedule: Option<String>,

    /// Bytes that separate tokens
    #[arg(long)]
    pub delimiters: Option<String>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// File containing the tokens
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Everything a run needs, after prompting for what was missing.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: RunConfig,
    pub file: PathBuf,
    pub tokenizer: Tokenizer,
    pub json: Option<PathBuf>,
}

impl Args {
    /// Whether every setting was given on the command line.
    pub fn is_complete(&self) -> bool {
        self.table_size.is_some()
            && self.inserts.is_some()
            && self.methods.is_some()
            && (self.radix3_seed.is_some() || self.schedule.is_some())
            && self.file.is_some()
    }

    /// Fill in missing settings from `prompter`, in the interactive order
    /// m, n, methods, seed, file.
    pub fn resolve<R: BufRead, W: Write>(self, prompter: &mut Prompter<R, W>) -> Result<Settings> {
        let table_size = match self.table_size {
            Some(m) => m,
            None => prompter.table_size()?,
        };
        let inserts = match self.inserts {
            Some(n) => n,
            None => prompter.initial_inserts()?,
        };
        let engines = match self.methods {
            Some(codes) => codes
                .into_iter()
                .map(EngineKind::from_code)
                .collect::<probe_tables::Result<Vec<_>>>()?,
            None => prompter.methods()?,
        };
        let schedule = match (self.schedule, self.radix3_seed) {
            (Some(digits), _) => digits.parse::<Schedule>()?,
            (None, Some(seed)) => Schedule::from_decimal(seed),
            (None, None) => Schedule::from_decimal(prompter.seed()?),
        };
        let file = match self.file {
            Some(file) => file,
            None => prompter.file()?,
        };
        let tokenizer = match self.delimiters {
            Some(d) => Tokenizer::new(d.as_bytes()),
            None => Tokenizer::new(DEFAULT_DELIMITERS),
        };
        Ok(Settings {
            config: RunConfig::new(table_size, inserts, engines, schedule),
            file,
            tokenizer,
            json: self.json,
        })
    }
}
