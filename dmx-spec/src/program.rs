//! # Program Image
//!
//! An ordered sequence of instruction words, and its text word-stream form:
//!
//! ```text
//! 00050003
//! 00030103
//! 01000207
//! ```
//!
//! One word per line, 8 lowercase hex digits, no prefix. When reading, blank
//! lines and surrounding whitespace are ignored.

use crate::error::{Result, SpecError};
use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Instruction words in program order
    pub words: Vec<Word>,
}

impl Program {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Parse the word-stream text format
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut words = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let malformed = || SpecError::MalformedWord {
                line: index + 1,
                text: trimmed.to_string(),
            };

            // from_str_radix alone would also accept a leading '+'
            if trimmed.len() > 8 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(malformed());
            }
            let word = Word::from_str_radix(trimmed, 16).map_err(|_| malformed())?;
            words.push(word);
        }

        Ok(Self { words })
    }

    /// Render the word-stream text format, one newline-terminated line per word
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in &self.words {
            writeln!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

impl From<Vec<Word>> for Program {
    fn from(words: Vec<Word>) -> Self {
        Self::new(words)
    }
}

impl FromIterator<Word> for Program {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
