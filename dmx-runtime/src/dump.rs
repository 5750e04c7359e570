//! Text dump of the final VM state
//!
//! ```text
//! R0 = 00000005
//! ...
//! R7 = 00000000
//! 00: 00050003 00030103 01000207 0000020e
//! 04: 00000001 00000000 00000000 00000000
//! ```
//!
//! Values print as 32-bit two's complement. Memory rows appear only when some
//! cell is non-zero, and stop at the row holding the highest non-zero cell.

use crate::memory::Memory;
use std::fmt::Write;

/// Words per memory row
pub const COLUMNS: usize = 4;

pub fn dump(registers: &[i64], memory: &Memory) -> String {
    let mut out = String::new();
    for (index, &value) in registers.iter().enumerate() {
        let _ = writeln!(out, "R{:x} = {:08x}", index, value as u32);
    }

    if let Some(highest) = memory.highest_nonzero() {
        let cells = memory.cells();
        for low in (0..=highest).step_by(COLUMNS) {
            let _ = write!(out, "{:02x}:", low);
            for &cell in &cells[low..low + COLUMNS] {
                let _ = write!(out, " {:08x}", cell as u32);
            }
            out.push('\n');
        }
    }
    out
}
