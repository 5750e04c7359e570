//! Execution faults for the DMX virtual machine

use dmx_spec::Word;
use thiserror::Error;

/// Terminal execution fault. Every fault raised while stepping carries the
/// instruction pointer at fault time, and the fetched word once there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionFault {
    #[error("Instruction pointer out of range: ip={ip}")]
    InstructionPointerOutOfRange { ip: usize },

    #[error("Invalid opcode 0x{opcode:02x} | ip={ip} | instr=0x{word:08x}")]
    UnknownOpcode { ip: usize, word: Word, opcode: u8 },

    #[error("Register index {index} out of range | ip={ip} | instr=0x{word:08x}")]
    RegisterIndexOutOfRange { ip: usize, word: Word, index: usize },

    #[error("Memory address {address} out of range | ip={ip} | instr=0x{word:08x}")]
    MemoryAddressOutOfRange { ip: usize, word: Word, address: usize },

    #[error("Jump target {target} outside program of length {program_len} | ip={ip} | instr=0x{word:08x}")]
    JumpTargetOutOfRange {
        ip: usize,
        word: Word,
        target: usize,
        program_len: usize,
    },

    #[error("Step budget of {budget} exhausted | ip={ip}")]
    StepBudgetExceeded { ip: usize, budget: u64 },

    #[error("Program too long: {len} words (must be below {limit})")]
    ProgramTooLong { len: usize, limit: usize },
}

impl ExecutionFault {
    /// Instruction pointer at fault time; `None` for load-time faults
    pub fn ip(&self) -> Option<usize> {
        match self {
            ExecutionFault::InstructionPointerOutOfRange { ip }
            | ExecutionFault::UnknownOpcode { ip, .. }
            | ExecutionFault::RegisterIndexOutOfRange { ip, .. }
            | ExecutionFault::MemoryAddressOutOfRange { ip, .. }
            | ExecutionFault::JumpTargetOutOfRange { ip, .. }
            | ExecutionFault::StepBudgetExceeded { ip, .. } => Some(*ip),
            ExecutionFault::ProgramTooLong { .. } => None,
        }
    }

    /// The offending word, when one was fetched before the fault
    pub fn word(&self) -> Option<Word> {
        match self {
            ExecutionFault::UnknownOpcode { word, .. }
            | ExecutionFault::RegisterIndexOutOfRange { word, .. }
            | ExecutionFault::MemoryAddressOutOfRange { word, .. }
            | ExecutionFault::JumpTargetOutOfRange { word, .. } => Some(*word),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExecutionFault>;
