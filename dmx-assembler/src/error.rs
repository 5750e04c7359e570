//! Assembler errors

use dmx_spec::SlotKind;
use thiserror::Error;

/// First error met while assembling. Line numbers are 1-based and count every
/// source line, including blank and comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerError {
    #[error("Unknown mnemonic `{mnemonic}` at line {line}: {text}")]
    UnknownMnemonic {
        line: usize,
        text: String,
        mnemonic: String,
    },

    #[error("Wrong operand count at line {line}: `{mnemonic}` takes {expected}, found {found}: {text}")]
    WrongOperandCount {
        line: usize,
        text: String,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Operand out of range at line {line}: `{operand}` is not a valid {kind}: {text}")]
    OperandOutOfRange {
        line: usize,
        text: String,
        kind: SlotKind,
        operand: String,
    },

    #[error("Unresolved operand `{operand}` at line {line}: {text}")]
    UnresolvedOperand {
        line: usize,
        text: String,
        operand: String,
    },

    #[error("Duplicate or malformed label at line {line} ({reason}): {text}")]
    DuplicateOrMalformedLabel {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Program too long: {count} instructions (limit {limit})")]
    ProgramTooLong { count: usize, limit: usize },
}

impl AssemblerError {
    /// Source line the error was raised on, if it belongs to one line
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::UnknownMnemonic { line, .. }
            | AssemblerError::WrongOperandCount { line, .. }
            | AssemblerError::OperandOutOfRange { line, .. }
            | AssemblerError::UnresolvedOperand { line, .. }
            | AssemblerError::DuplicateOrMalformedLabel { line, .. } => Some(*line),
            AssemblerError::ProgramTooLong { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
