//! # DMX Instruction Set
//!
//! Fixed-width 32-bit instruction set shared by the assembler, the
//! disassembler and the virtual machine.
//!
//! ## Word Layout
//!
//! ```text
//! bits 31..24  23..16  15..8   7..0
//!      arg2    arg1    arg0    opcode
//! ```
//!
//! Each operand slot carries a register index, an address, or an immediate
//! byte depending on the opcode's [`Format`]. Unused slots are zero.
//!
//! ## Machine
//! - 8 registers (R0-R7)
//! - 256 words of RAM, loaded from the program image
//! - 15 opcodes (see [`Opcode`])

pub mod encoding;
pub mod error;
pub mod opcode;
pub mod program;
pub mod register;

pub use encoding::{pack, sign_extend_8, Fields};
pub use error::{Result, SpecError};
pub use opcode::{Format, Opcode, SlotKind};
pub use program::Program;
pub use register::Register;

/// Bits per field
pub const OP_SHIFT: u32 = 8;

/// Mask for a single field
pub const OP_MASK: u32 = 0xFF;

/// Fields per word: opcode + 3 operand slots
pub const NUM_FIELDS: usize = 4;

/// Operand slots per word
pub const NUM_SLOTS: usize = NUM_FIELDS - 1;

/// Number of registers
pub const NUM_REG: usize = 8;

/// Number of words in RAM
pub const RAM_LEN: usize = 256;

/// Assembler program size limit, also the modulo base for `add`/`sub`
pub const SIZE_LIM: usize = 256;

/// Instruction word
pub type Word = u32;
