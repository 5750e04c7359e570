//! Program listings

use crate::formatter::format_word;
use dmx_spec::Program;
use std::fmt::Write;

/// Disassemble a program into a listing, one line per word:
///
/// ```text
/// 00: 00050003  ldi R0, 5
/// 01: 0000000e  prr R0
/// ```
///
/// Words that do not decode are listed as `.word` directives.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();
    for (index, &word) in program.words().iter().enumerate() {
        // Writing into a String cannot fail
        let _ = writeln!(output, "{:02x}: {:08x}  {}", index, word, format_word(word));
    }
    output
}
