//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisassemblerError {
    #[error("Invalid instruction encoding: 0x{0:08X}")]
    InvalidEncoding(u32),

    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
