//! Fixed-width tokens.

use std::fmt;

/// Width of every token in bytes.
pub const TOKEN_LEN: usize = 10;

/// Filler appended to short tokens.
pub const PAD_BYTE: u8 = b'*';

/// An immutable 10-byte token.
///
/// Ordering is bytewise lexicographic, which is the ordering the sorted
/// chains and the binary search tree are built on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    /// Pad with [`PAD_BYTE`] or truncate `raw` to exactly [`TOKEN_LEN`] bytes.
    pub fn normalize(raw: impl AsRef<[u8]>) -> Self {
        let raw = raw.as_ref();
        let mut bytes = [PAD_BYTE; TOKEN_LEN];
        let n = raw.len().min(TOKEN_LEN);
        bytes[..n].copy_from_slice(&raw[..n]);
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// Additive key: the sum of the byte values.
    ///
    /// Anagrams collide on purpose.
    #[inline]
    pub fn key(&self) -> u32 {
        self.0.iter().map(|&b| u32::from(b)).sum()
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?})", String::from_utf8_lossy(&self.0))
    }
}
