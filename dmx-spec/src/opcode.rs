//! # DMX Opcode Definitions
//!
//! The opcode table is the single source of truth for mnemonics, numeric
//! codes and operand formats. Opcodes occupy the low byte of a word.
//!
//! | Code | Mnemonic | Format |
//! |------|----------|--------|
//! | 0x01 | hlt      | `___`  |
//! | 0x02 | nop      | `___`  |
//! | 0x03 | ldi      | `rv_`  |
//! | 0x04 | mov      | `rr_`  |
//! | 0x05 | ldm      | `ra_`  |
//! | 0x06 | stm      | `ar_`  |
//! | 0x07 | add      | `rrr`  |
//! | 0x08 | sub      | `rrr`  |
//! | 0x09 | eq       | `rrr`  |
//! | 0x0A | lt       | `rrr`  |
//! | 0x0B | jmp      | `a__`  |
//! | 0x0C | jz       | `ra_`  |
//! | 0x0D | jnz      | `ra_`  |
//! | 0x0E | prr      | `r__`  |
//! | 0x0F | prm      | `a__`  |

use crate::{NUM_SLOTS, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an operand slot carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Register index (R0-R7)
    Register,
    /// Signed immediate byte
    Value,
    /// Memory address or instruction index
    Address,
    /// Slot not used, always zero
    Unused,
}

impl SlotKind {
    /// Single-character code used in format strings
    pub const fn symbol(self) -> char {
        match self {
            SlotKind::Register => 'r',
            SlotKind::Value => 'v',
            SlotKind::Address => 'a',
            SlotKind::Unused => '_',
        }
    }

    #[inline]
    pub const fn is_used(self) -> bool {
        !matches!(self, SlotKind::Unused)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotKind::Register => "register",
            SlotKind::Value => "value",
            SlotKind::Address => "address",
            SlotKind::Unused => "unused",
        };
        write!(f, "{}", name)
    }
}

/// Operand format: the kind of each of the three slots, in slot order.
///
/// Assembly operands map onto the used slots left to right, so slot order
/// and assembly order are the same for every format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Format([SlotKind; NUM_SLOTS]);

impl Format {
    pub const NONE: Self = Self([SlotKind::Unused, SlotKind::Unused, SlotKind::Unused]);
    pub const R: Self = Self([SlotKind::Register, SlotKind::Unused, SlotKind::Unused]);
    pub const A: Self = Self([SlotKind::Address, SlotKind::Unused, SlotKind::Unused]);
    pub const RR: Self = Self([SlotKind::Register, SlotKind::Register, SlotKind::Unused]);
    pub const RV: Self = Self([SlotKind::Register, SlotKind::Value, SlotKind::Unused]);
    pub const RA: Self = Self([SlotKind::Register, SlotKind::Address, SlotKind::Unused]);
    pub const AR: Self = Self([SlotKind::Address, SlotKind::Register, SlotKind::Unused]);
    pub const RRR: Self = Self([SlotKind::Register, SlotKind::Register, SlotKind::Register]);

    pub const fn new(slots: [SlotKind; NUM_SLOTS]) -> Self {
        Self(slots)
    }

    #[inline]
    pub const fn slots(&self) -> [SlotKind; NUM_SLOTS] {
        self.0
    }

    #[inline]
    pub const fn slot(&self, index: usize) -> SlotKind {
        self.0[index]
    }

    /// Number of operands an assembly line must supply
    pub fn operand_count(&self) -> usize {
        self.0.iter().filter(|kind| kind.is_used()).count()
    }

    /// Used slots as `(slot index, kind)` in assembly order
    pub fn used_slots(&self) -> impl Iterator<Item = (usize, SlotKind)> + '_ {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, kind)| kind.is_used())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in self.0 {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}

/// Instruction opcode (low byte of a word, values 0x01-0x0F)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// HLT: stop execution
    Hlt = 0x01,
    /// NOP: do nothing
    Nop = 0x02,
    /// LDI: r = sign_extend(v)
    Ldi = 0x03,
    /// MOV: rd = rs
    Mov = 0x04,
    /// LDM: r = mem[a]
    Ldm = 0x05,
    /// STM: mem[a] = r
    Stm = 0x06,
    /// ADD: rd = (ra + rb) mod 256
    Add = 0x07,
    /// SUB: rd = (ra - rb) mod 256
    Sub = 0x08,
    /// EQ: rd = (ra == rb) ? 1 : 0
    Eq = 0x09,
    /// LT: rd = (ra < rb) ? 1 : 0
    Lt = 0x0A,
    /// JMP: ip = a
    Jmp = 0x0B,
    /// JZ: if r == 0 then ip = a
    Jz = 0x0C,
    /// JNZ: if r != 0 then ip = a
    Jnz = 0x0D,
    /// PRR: print r
    Prr = 0x0E,
    /// PRM: print mem[a]
    Prm = 0x0F,
}

impl Opcode {
    /// Every opcode, in code order
    pub const ALL: [Opcode; 15] = [
        Opcode::Hlt,
        Opcode::Nop,
        Opcode::Ldi,
        Opcode::Mov,
        Opcode::Ldm,
        Opcode::Stm,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Eq,
        Opcode::Lt,
        Opcode::Jmp,
        Opcode::Jz,
        Opcode::Jnz,
        Opcode::Prr,
        Opcode::Prm,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Opcode::Hlt),
            0x02 => Some(Opcode::Nop),
            0x03 => Some(Opcode::Ldi),
            0x04 => Some(Opcode::Mov),
            0x05 => Some(Opcode::Ldm),
            0x06 => Some(Opcode::Stm),
            0x07 => Some(Opcode::Add),
            0x08 => Some(Opcode::Sub),
            0x09 => Some(Opcode::Eq),
            0x0A => Some(Opcode::Lt),
            0x0B => Some(Opcode::Jmp),
            0x0C => Some(Opcode::Jz),
            0x0D => Some(Opcode::Jnz),
            0x0E => Some(Opcode::Prr),
            0x0F => Some(Opcode::Prm),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Extract opcode from an instruction word
    #[inline]
    pub fn from_word(word: Word) -> Option<Self> {
        Self::from_u8(crate::encoding::extract_opcode(word))
    }

    /// Look up an opcode by its exact mnemonic
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.mnemonic() == mnemonic)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "hlt",
            Opcode::Nop => "nop",
            Opcode::Ldi => "ldi",
            Opcode::Mov => "mov",
            Opcode::Ldm => "ldm",
            Opcode::Stm => "stm",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Eq => "eq",
            Opcode::Lt => "lt",
            Opcode::Jmp => "jmp",
            Opcode::Jz => "jz",
            Opcode::Jnz => "jnz",
            Opcode::Prr => "prr",
            Opcode::Prm => "prm",
        }
    }

    pub const fn format(self) -> Format {
        match self {
            Opcode::Hlt | Opcode::Nop => Format::NONE,
            Opcode::Ldi => Format::RV,
            Opcode::Mov => Format::RR,
            Opcode::Ldm | Opcode::Jz | Opcode::Jnz => Format::RA,
            Opcode::Stm => Format::AR,
            Opcode::Add | Opcode::Sub | Opcode::Eq | Opcode::Lt => Format::RRR,
            Opcode::Jmp | Opcode::Prm => Format::A,
            Opcode::Prr => Format::R,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
