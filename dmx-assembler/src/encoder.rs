//! Operand resolution and field packing
//!
//! Operands fill the used slots of the opcode's format left to right:
//!
//! ```text
//! ldi R2, -1       rv_   ->  arg0 = 2, arg1 = 0xFF, arg2 = 0
//! stm 12, R3       ar_   ->  arg0 = 12, arg1 = 3,   arg2 = 0
//! add R0, R1, R2   rrr   ->  arg0 = 0, arg1 = 1,    arg2 = 2
//! ```

use crate::error::Result;
use crate::parser::{Operand, SourceLine, Statement};
use dmx_spec::encoding::encode_immediate;
use dmx_spec::{pack, SlotKind, Word, NUM_SLOTS, RAM_LEN};
use std::collections::HashMap;

/// Label name -> instruction index
pub type LabelTable = HashMap<String, usize>;

/// Operand after label substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved {
    Register(u8),
    Integer(i64),
}

fn resolve(line: &SourceLine, operand: &Operand, labels: &LabelTable) -> Result<Resolved> {
    match operand {
        Operand::Register(reg) => Ok(Resolved::Register(reg.index() as u8)),
        Operand::Symbol(name) => labels
            .get(name)
            .map(|&index| Resolved::Integer(index as i64))
            .ok_or_else(|| line.unresolved(name)),
        Operand::Number(value) => Ok(Resolved::Integer(*value)),
    }
}

/// Check a resolved operand against its slot kind and produce the slot byte
fn slot_byte(
    line: &SourceLine,
    kind: SlotKind,
    operand: &Operand,
    resolved: Resolved,
) -> Result<u8> {
    match (kind, resolved) {
        (SlotKind::Register, Resolved::Register(index)) => Ok(index),
        (SlotKind::Value, Resolved::Integer(value)) => i8::try_from(value)
            .map(encode_immediate)
            .map_err(|_| line.out_of_range(kind, operand)),
        (SlotKind::Address, Resolved::Integer(value)) if (0..RAM_LEN as i64).contains(&value) => {
            Ok(value as u8)
        }
        _ => Err(line.out_of_range(kind, operand)),
    }
}

/// Encode a parsed statement into a word
pub fn encode(line: &SourceLine, statement: &Statement, labels: &LabelTable) -> Result<Word> {
    let resolved = statement
        .operands
        .iter()
        .map(|operand| resolve(line, operand, labels))
        .collect::<Result<Vec<_>>>()?;

    let format = statement.opcode.format();
    if resolved.len() != format.operand_count() {
        return Err(line.wrong_operand_count(statement.opcode, resolved.len()));
    }

    let mut args = [0u8; NUM_SLOTS];
    for (((slot, kind), operand), value) in format
        .used_slots()
        .zip(&statement.operands)
        .zip(resolved)
    {
        args[slot] = slot_byte(line, kind, operand, value)?;
    }

    Ok(pack(statement.opcode.to_u8(), args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssemblerError;
    use crate::parser::parse_statement;
    use dmx_spec::Opcode;

    fn encode_text(text: &str) -> Result<Word> {
        encode_with(text, &LabelTable::new())
    }

    fn encode_with(text: &str, labels: &LabelTable) -> Result<Word> {
        let line = SourceLine::new(1, text);
        let stmt = parse_statement(&line, text)?;
        encode(&line, &stmt, labels)
    }

    #[test]
    fn test_encode_no_operands() {
        assert_eq!(encode_text("hlt").unwrap(), 0x0000_0001);
        assert_eq!(encode_text("nop").unwrap(), 0x0000_0002);
    }

    #[test]
    fn test_encode_ldi_negative() {
        assert_eq!(encode_text("ldi R0, -1").unwrap(), 0x00FF_0003);
        assert_eq!(encode_text("ldi R7, 127").unwrap(), 0x007F_0703);
        assert_eq!(encode_text("ldi R1, -128").unwrap(), 0x0080_0103);
    }

    #[test]
    fn test_encode_slot_order() {
        // stm a, r keeps the address in slot 0
        assert_eq!(encode_text("stm 12, R3").unwrap(), 0x0003_0C06);
        assert_eq!(encode_text("ldm R3, 12").unwrap(), 0x000C_0305);
        assert_eq!(encode_text("add R0, R1, R2").unwrap(), 0x0201_0007);
    }

    #[test]
    fn test_encode_hex_address() {
        assert_eq!(encode_text("prm 0xFF").unwrap(), 0x0000_FF0F);
    }

    #[test]
    fn test_encode_label() {
        let mut labels = LabelTable::new();
        labels.insert("top".to_string(), 5);
        assert_eq!(encode_with("jnz R1, top", &labels).unwrap(), 0x0005_010D);
    }

    #[test]
    fn test_value_out_of_range() {
        for text in ["ldi R0, 128", "ldi R0, -129", "ldi R0, 0x100"] {
            let err = encode_text(text).unwrap_err();
            assert!(
                matches!(err, AssemblerError::OperandOutOfRange { kind: SlotKind::Value, .. }),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn test_address_out_of_range() {
        for text in ["jmp 256", "prm -1", "ldm R0, 1000"] {
            let err = encode_text(text).unwrap_err();
            assert!(
                matches!(err, AssemblerError::OperandOutOfRange { kind: SlotKind::Address, .. }),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn test_register_slot_requires_register() {
        let err = encode_text("prr 3").unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::OperandOutOfRange { kind: SlotKind::Register, .. }
        ));
    }

    #[test]
    fn test_register_in_address_slot() {
        let err = encode_text("jmp R1").unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::OperandOutOfRange { kind: SlotKind::Address, .. }
        ));
    }

    #[test]
    fn test_unknown_register_name_is_unresolved() {
        let err = encode_text("prr R8").unwrap_err();
        assert!(matches!(err, AssemblerError::UnresolvedOperand { ref operand, .. } if operand == "R8"));
    }

    #[test]
    fn test_wrong_operand_count() {
        let err = encode_text("add R1, R2").unwrap_err();
        assert_eq!(
            err,
            AssemblerError::WrongOperandCount {
                line: 1,
                text: "add R1, R2".to_string(),
                mnemonic: "add".to_string(),
                expected: 3,
                found: 2,
            }
        );
        assert!(encode_text("hlt R0").is_err());
    }

    #[test]
    fn test_every_opcode_encodes_its_code() {
        let samples = [
            "hlt", "nop", "ldi R0, 1", "mov R0, R1", "ldm R0, 1", "stm 1, R0",
            "add R0, R1, R2", "sub R0, R1, R2", "eq R0, R1, R2", "lt R0, R1, R2",
            "jmp 1", "jz R0, 1", "jnz R0, 1", "prr R0", "prm 1",
        ];
        for (text, op) in samples.iter().zip(Opcode::ALL) {
            let word = encode_text(text).unwrap();
            assert_eq!(Opcode::from_word(word), Some(op), "{text}");
        }
    }
}
