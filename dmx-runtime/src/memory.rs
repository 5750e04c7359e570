//! Flat word-addressed RAM

use crate::error::{ExecutionFault, Result};
use dmx_spec::{Word, RAM_LEN};

/// Check a data address against the RAM domain
///
/// Decoded address bytes never exceed 255, so callers with a fetched word
/// always pass; the check is kept for addresses that arrive any other way.
#[inline]
pub fn check_address(ip: usize, word: Word, address: usize) -> Result<usize> {
    if address < RAM_LEN {
        Ok(address)
    } else {
        Err(ExecutionFault::MemoryAddressOutOfRange { ip, word, address })
    }
}

/// RAM: `RAM_LEN` signed 64-bit cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: vec![0; RAM_LEN],
        }
    }

    /// Reset to the program image followed by zero padding. The caller has
    /// already checked the image fits.
    pub fn load(&mut self, words: &[Word]) {
        self.cells.fill(0);
        for (cell, &word) in self.cells.iter_mut().zip(words) {
            *cell = word as i64;
        }
    }

    /// Instruction word at `ip`: the low 32 bits of the cell
    #[inline]
    pub fn fetch(&self, ip: usize) -> Option<Word> {
        self.cells.get(ip).map(|&cell| cell as Word)
    }

    #[inline]
    pub fn read(&self, address: usize) -> Option<i64> {
        self.cells.get(address).copied()
    }

    /// Write a cell; returns `false` and leaves memory untouched when out of range
    #[inline]
    pub fn write(&mut self, address: usize, value: i64) -> bool {
        match self.cells.get_mut(address) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Highest address holding a non-zero value
    pub fn highest_nonzero(&self) -> Option<usize> {
        self.cells.iter().rposition(|&cell| cell != 0)
    }
}
