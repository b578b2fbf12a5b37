//! Interactive questions for settings not given on the command line.
//!
//! Answers are read as whitespace-separated words, so several answers may be
//! typed on one line and a method list may span several lines.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use probe_tables::EngineKind;

use crate::error::{Error, Result};

pub const TABLE_SIZE_QUESTION: &str = "Enter hash table size (m): ";
pub const INSERTS_QUESTION: &str = "Enter the number of insertions (n): ";
pub const METHODS_QUESTION: &str = "Enter methods to investigate (1: Open Hash Unsorted, 2: Open Hash Sorted, 3: Closed Hash, 4: BST), end with -1: ";
pub const SEED_QUESTION: &str = "Enter decimal number to be converted to radix-3 (I): ";
pub const FILE_QUESTION: &str = "Enter the filename containing tokens: ";

/// Terminates the method list.
const END_OF_METHODS: &str = "-1";

pub struct Prompter<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    fn ask(&mut self, question: &str) -> Result<()> {
        self.output.write_all(question.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn next_word(&mut self, what: &'static str) -> Result<String> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Ok(word);
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::UnexpectedEof { what });
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    fn parse_word<T: std::str::FromStr>(&mut self, what: &'static str) -> Result<T> {
        let word = self.next_word(what)?;
        word.parse().map_err(|_| Error::invalid_input(what, word))
    }

    pub fn table_size(&mut self) -> Result<usize> {
        self.ask(TABLE_SIZE_QUESTION)?;
        self.parse_word("table size")
    }

    pub fn initial_inserts(&mut self) -> Result<usize> {
        self.ask(INSERTS_QUESTION)?;
        self.parse_word("number of insertions")
    }

    /// Method codes up to the `-1` terminator.
    pub fn methods(&mut self) -> Result<Vec<EngineKind>> {
        self.ask(METHODS_QUESTION)?;
        let mut kinds = Vec::new();
        loop {
            let word = self.next_word("method list")?;
            if word == END_OF_METHODS {
                return Ok(kinds);
            }
            let code: i64 = word
                .parse()
                .map_err(|_| Error::invalid_input("method code", word))?;
            kinds.push(EngineKind::from_code(code)?);
        }
    }

    pub fn seed(&mut self) -> Result<u64> {
        self.ask(SEED_QUESTION)?;
        self.parse_word("radix-3 seed")
    }

    pub fn file(&mut self) -> Result<PathBuf> {
        self.ask(FILE_QUESTION)?;
        self.next_word("file name").map(PathBuf::from)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
