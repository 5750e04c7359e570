//! Per-step execution records

use dmx_spec::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A register whose value changed during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterChange {
    pub index: usize,
    pub old: i64,
    pub new: i64,
}

/// One executed instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// 1-based step number
    pub step: u64,
    pub ip_before: usize,
    pub word: Word,
    /// Disassembled instruction text
    pub text: String,
    pub changes: Vec<RegisterChange>,
    pub ip_after: usize,
}

impl fmt::Display for RegisterChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}: {} -> {}", self.index, self.old, self.new)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:6}] {:02x}: {:08x}  {:<16} ip={:02x}",
            self.step, self.ip_before, self.word, self.text, self.ip_after
        )?;
        for change in &self.changes {
            write!(f, "  {}", change)?;
        }
        Ok(())
    }
}

/// Registers that differ between two snapshots
pub fn diff_registers(before: &[i64], after: &[i64]) -> Vec<RegisterChange> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(index, (&old, &new))| RegisterChange { index, old, new })
        .collect()
}
