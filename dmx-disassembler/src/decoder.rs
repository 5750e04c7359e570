//! Instruction decoder
//!
//! Strict inverse of the assembler's packing: a word decodes only if the
//! assembler could have produced it.

use crate::error::{DisassemblerError, Result};
use dmx_spec::{sign_extend_8, Fields, Opcode, Register, SlotKind, Word};

/// A decoded operand, typed by the slot it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Value(i8),
    Address(u8),
}

/// A fully decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: Opcode,
    /// Operands in assembly order
    pub operands: Vec<Operand>,
}

impl Decoded {
    /// Numeric operand values as the VM sees them (immediates sign-extended)
    pub fn values(&self) -> Vec<i64> {
        self.operands
            .iter()
            .map(|operand| match *operand {
                Operand::Register(reg) => reg.index() as i64,
                Operand::Value(value) => value as i64,
                Operand::Address(addr) => addr as i64,
            })
            .collect()
    }
}

/// Decode a 32-bit instruction word
pub fn decode(word: Word) -> Result<Decoded> {
    let fields = Fields::decode(word);
    let opcode = fields
        .opcode()
        .ok_or(DisassemblerError::UnknownOpcode(fields.opcode))?;

    let mut operands = Vec::with_capacity(opcode.format().operand_count());
    for (slot, kind) in opcode.format().slots().into_iter().enumerate() {
        let byte = fields.args[slot];
        let operand = match kind {
            SlotKind::Unused if byte == 0 => continue,
            SlotKind::Unused => return Err(DisassemblerError::InvalidEncoding(word)),
            SlotKind::Register => Register::from_index(byte as usize)
                .map(Operand::Register)
                .ok_or(DisassemblerError::InvalidEncoding(word))?,
            SlotKind::Value => Operand::Value(sign_extend_8(byte) as i8),
            SlotKind::Address => Operand::Address(byte),
        };
        operands.push(operand);
    }

    Ok(Decoded { opcode, operands })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ldi() {
        let decoded = decode(0x00FF_0003).unwrap();
        assert_eq!(decoded.opcode, Opcode::Ldi);
        assert_eq!(
            decoded.operands,
            vec![Operand::Register(Register::R0), Operand::Value(-1)]
        );
        assert_eq!(decoded.values(), vec![0, -1]);
    }

    #[test]
    fn test_decode_stm_slot_order() {
        let decoded = decode(0x0003_0C06).unwrap();
        assert_eq!(
            decoded.operands,
            vec![Operand::Address(12), Operand::Register(Register::R3)]
        );
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert_eq!(decode(0x0000_0000), Err(DisassemblerError::UnknownOpcode(0)));
        assert_eq!(decode(0x0102_0310), Err(DisassemblerError::UnknownOpcode(0x10)));
    }

    #[test]
    fn test_decode_nonzero_unused_slot() {
        // hlt with a stray byte in slot 2
        assert_eq!(
            decode(0x0100_0001),
            Err(DisassemblerError::InvalidEncoding(0x0100_0001))
        );
    }

    #[test]
    fn test_decode_register_out_of_file() {
        // prr R8
        assert_eq!(
            decode(0x0000_080E),
            Err(DisassemblerError::InvalidEncoding(0x0000_080E))
        );
    }
}
