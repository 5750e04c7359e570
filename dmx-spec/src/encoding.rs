//! # Word Packing and Field Extraction
//!
//! ```text
//! [opcode:8][arg0:8][arg1:8][arg2:8]   (least significant byte first)
//! ```
//!
//! The assembler packs with [`pack`]; the VM and disassembler decode with
//! [`Fields::decode`]. Both go through the shift/mask constants below, so
//! decoding is the exact inverse of packing.

use crate::opcode::Opcode;
use crate::{NUM_SLOTS, OP_MASK, OP_SHIFT, Word};

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 0-7
pub const OPCODE_SHIFT: u32 = 0;

/// Slot 0 field: bits 8-15
pub const ARG0_SHIFT: u32 = OP_SHIFT;

/// Slot 1 field: bits 16-23
pub const ARG1_SHIFT: u32 = OP_SHIFT * 2;

/// Slot 2 field: bits 24-31
pub const ARG2_SHIFT: u32 = OP_SHIFT * 3;

/// Shift of an operand slot (0, 1 or 2)
#[inline]
pub const fn slot_shift(slot: usize) -> u32 {
    OP_SHIFT * (slot as u32 + 1)
}

// ============================================================================
// Packing / Extraction
// ============================================================================

/// Pack an opcode and three slot bytes into a word
#[inline]
pub const fn pack(opcode: u8, args: [u8; NUM_SLOTS]) -> Word {
    ((opcode as u32) << OPCODE_SHIFT)
        | ((args[0] as u32) << ARG0_SHIFT)
        | ((args[1] as u32) << ARG1_SHIFT)
        | ((args[2] as u32) << ARG2_SHIFT)
}

/// Extract opcode (bits 0-7)
#[inline]
pub const fn extract_opcode(word: Word) -> u8 {
    ((word >> OPCODE_SHIFT) & OP_MASK) as u8
}

/// Extract operand slot 0, 1 or 2
#[inline]
pub const fn extract_arg(word: Word, slot: usize) -> u8 {
    ((word >> slot_shift(slot)) & OP_MASK) as u8
}

/// Extract all three operand slots
#[inline]
pub const fn extract_args(word: Word) -> [u8; NUM_SLOTS] {
    [extract_arg(word, 0), extract_arg(word, 1), extract_arg(word, 2)]
}

/// Encode a signed immediate as its two's-complement byte
#[inline]
pub const fn encode_immediate(value: i8) -> u8 {
    value as u8
}

/// Sign-extend an immediate byte (bit 7 set means negative)
#[inline]
pub const fn sign_extend_8(byte: u8) -> i64 {
    byte as i8 as i64
}

/// The four raw fields of a word, before any interpretation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fields {
    pub opcode: u8,
    pub args: [u8; NUM_SLOTS],
}

impl Fields {
    pub const fn new(opcode: u8, args: [u8; NUM_SLOTS]) -> Self {
        Self { opcode, args }
    }

    #[inline]
    pub const fn decode(word: Word) -> Self {
        Self {
            opcode: extract_opcode(word),
            args: extract_args(word),
        }
    }

    #[inline]
    pub const fn encode(self) -> Word {
        pack(self.opcode, self.args)
    }

    /// Opcode, if the low byte names one
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode)
    }
}
