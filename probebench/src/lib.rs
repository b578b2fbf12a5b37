//! # probebench
//!
//! Command-line harness around [`probe_tables`]: reads a token file, asks for
//! whatever settings were not passed as flags, replays the tokens through the
//! selected symbol tables and prints their average probe counts.
//!
//! ## Example
//!
//! ```rust,no_run
//! use probe_tables::{EngineKind, RunConfig, Schedule};
//! use probebench::{run, Tokenizer};
//!
//! let config = RunConfig::new(101, 20, EngineKind::ALL, Schedule::from_decimal(100));
//! let outcome = run(config, "tokens.txt", &Tokenizer::default()).unwrap();
//! probebench::report::write_text(&mut std::io::stdout(), &outcome.summary.engines).unwrap();
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod prompt;
pub mod report;
pub mod tokenizer;

use std::path::Path;

use log::info;
use probe_tables::{Driver, RunConfig, RunSummary};

pub use cli::{Args, Settings};
pub use error::{Error, Result};
pub use prompt::Prompter;
pub use report::{format_average, JsonReport};
pub use tokenizer::{read_tokens, Tokenizer};

/// A finished run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The validated configuration the run used.
    pub config: RunConfig,
    /// Tokens read from the file.
    pub tokens: usize,
    pub summary: RunSummary,
}

impl Outcome {
    pub fn json(&self) -> JsonReport {
        JsonReport::new(&self.config, self.tokens, &self.summary)
    }
}

/// Tokenize `path` and drive every selected engine over it.
///
/// The configuration is validated before the file is opened.
pub fn run(config: RunConfig, path: impl AsRef<Path>, tokenizer: &Tokenizer) -> Result<Outcome> {
    let mut driver = Driver::new(config)?;
    let tokens = tokenizer.read_file(path.as_ref())?;
    info!(
        "running {} engine(s) over {} tokens",
        driver.engines().len(),
        tokens.len()
    );
    let summary = driver.run(&tokens)?;
    Ok(Outcome {
        config: driver.config().clone(),
        tokens: tokens.len(),
        summary,
    })
}

/// Run with fully resolved settings, writing the JSON report if asked.
pub fn run_settings(settings: Settings) -> Result<Outcome> {
    let Settings {
        config,
        file,
        tokenizer,
        json,
    } = settings;
    let outcome = run(config, &file, &tokenizer)?;
    if let Some(path) = json {
        report::write_json(&path, &outcome.json())?;
    }
    Ok(outcome)
}
