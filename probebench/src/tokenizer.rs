//! Splitting raw input into fixed-width tokens.

use std::fs::File;
use std::path::Path;

use log::debug;
use memmap2::Mmap;
use probe_tables::Token;

use crate::error::Result;

/// Delimiters used when none are configured: comma, full stop and space.
pub const DEFAULT_DELIMITERS: &[u8] = b",. ";

/// Splits bytes on a delimiter set and normalizes each fragment.
///
/// Only the configured delimiters split; anything else (newlines included,
/// unless configured) stays part of the token.
#[derive(Clone)]
pub struct Tokenizer {
    is_delimiter: [bool; 256],
}

impl Tokenizer {
    pub fn new(delimiters: &[u8]) -> Self {
        let mut is_delimiter = [false; 256];
        for &d in delimiters {
            is_delimiter[d as usize] = true;
        }
        Self { is_delimiter }
    }

    /// Tokens in input order. Runs of delimiters produce no empty tokens.
    pub fn tokenize(&self, input: &[u8]) -> Vec<Token> {
        input
            .split(|&b| self.is_delimiter[b as usize])
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| Token::normalize(fragment))
            .collect()
    }

    /// Memory-map `path` and tokenize its contents.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<Token>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            debug!("{} is empty", path.display());
            return Ok(Vec::new());
        }
        // SAFETY: the mapping is read-only and dropped before returning; the
        // file is not expected to change while a run reads it.
        let mmap = unsafe { Mmap::map(&file)? };
        let tokens = self.tokenize(&mmap);
        debug!(
            "read {} tokens from {} ({} bytes)",
            tokens.len(),
            path.display(),
            mmap.len()
        );
        Ok(tokens)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS)
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let delimiters: Vec<u8> = (0..=255u8).filter(|&b| self.is_delimiter[b as usize]).collect();
        f.debug_struct("Tokenizer")
            .field("delimiters", &String::from_utf8_lossy(&delimiters))
            .finish()
    }
}

/// Tokenize a file with the default delimiters.
pub fn read_tokens(path: impl AsRef<Path>) -> Result<Vec<Token>> {
    Tokenizer::default().read_file(path)
}
