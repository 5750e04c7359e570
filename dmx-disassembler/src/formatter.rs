//! Instruction formatting to assembly text

use crate::decoder::{decode, Decoded, Operand};
use dmx_spec::Word;
use std::fmt;

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Value(value) => write!(f, "{}", value),
            Operand::Address(addr) => write!(f, "{}", addr),
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode.mnemonic())?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, operand)?;
        }
        Ok(())
    }
}

/// Format a decoded instruction as assembly text the assembler accepts
pub fn format(decoded: &Decoded) -> String {
    decoded.to_string()
}

/// Format a raw word, falling back to a `.word` placeholder when it does not decode
pub fn format_word(word: Word) -> String {
    match decode(word) {
        Ok(decoded) => format(&decoded),
        Err(_) => format!(".word 0x{:08x}", word),
    }
}
