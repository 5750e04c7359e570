//! Cross-module interaction tests
//!
//! Tests the integration between assembler, disassembler, and runtime.

use dmx_assembler::assemble;
use dmx_disassembler::{decode, disassemble, format_word};
use dmx_runtime::{Outcome, VmConfig, VM};
use dmx_spec::Program;
use proptest::prelude::*;

/// Strip the `<idx>: <word>  ` columns from a listing
fn listing_text(listing: &str) -> String {
    listing
        .lines()
        .map(|line| line.splitn(2, "  ").nth(1).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

const SAMPLE: &str = r#"
        ldi R0, 3
        ldi R1, 1
    top:
        prr R0
        stm 128, R0
        prm 128
        sub R0, R0, R1
        jnz R0, top
        ldm R2, 128
        eq R3, R2, R1
        lt R4, R2, R1
        mov R5, R3
        jz R5, done
        nop
    done:
        hlt
"#;

// ============================================================================
// Assembler -> Disassembler Tests
// ============================================================================

#[test]
fn test_listing_reassembles() {
    let program = assemble(SAMPLE).unwrap();
    let text = listing_text(&disassemble(&program));
    assert_eq!(assemble(&text).unwrap(), program);
}

#[test]
fn test_every_assembled_word_decodes() {
    let program = assemble(SAMPLE).unwrap();
    for &word in program.words() {
        assert!(decode(word).is_ok(), "{word:08x}");
    }
}

// ============================================================================
// Assembler -> Runtime Tests
// ============================================================================

#[test]
fn test_reassembled_program_behaves_the_same() {
    let program = assemble(SAMPLE).unwrap();
    let copy = assemble(&listing_text(&disassemble(&program))).unwrap();

    let mut outputs = Vec::new();
    for p in [&program, &copy] {
        let mut vm = VM::new();
        vm.initialize(p).unwrap();
        assert_eq!(vm.run().outcome, Outcome::Halted);
        outputs.push(vm.output().to_vec());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], vec!["3", "3", "2", "2", "1", "1"]);
}

#[test]
fn test_trace_uses_disassembler_text() {
    let program = assemble(SAMPLE).unwrap();
    let mut vm = VM::with_config(VmConfig::default().with_trace(true));
    vm.initialize(&program).unwrap();
    let result = vm.run();

    assert_eq!(vm.trace().len() as u64, result.steps);
    for record in vm.trace() {
        assert_eq!(record.text, format_word(record.word));
        assert_eq!(record.word, program.words[record.ip_before]);
    }
    let last = vm.trace().last().unwrap();
    assert_eq!(last.text, "hlt");
}

#[test]
fn test_trace_changes_match_registers() {
    let program = assemble("ldi R1, 4\nldi R2, 4\nadd R3, R1, R2\nhlt").unwrap();
    let mut vm = VM::with_config(VmConfig::default().with_trace(true));
    vm.initialize(&program).unwrap();
    vm.run();

    let changes: Vec<_> = vm
        .trace()
        .iter()
        .flat_map(|r| r.changes.iter().map(|c| (c.index, c.new)))
        .collect();
    assert_eq!(changes, vec![(1, 4), (2, 4), (3, 8)]);
}

// ============================================================================
// Properties
// ============================================================================

fn straight_line_instruction() -> impl Strategy<Value = String> {
    let reg = || (0u8..8).prop_map(|r| format!("R{r}"));
    prop_oneof![
        (reg(), -128i64..=127).prop_map(|(r, v)| format!("ldi {r}, {v}")),
        (reg(), reg()).prop_map(|(a, b)| format!("mov {a}, {b}")),
        (reg(), reg(), reg()).prop_map(|(a, b, c)| format!("add {a}, {b}, {c}")),
        (reg(), reg(), reg()).prop_map(|(a, b, c)| format!("sub {a}, {b}, {c}")),
        (reg(), reg(), reg()).prop_map(|(a, b, c)| format!("eq {a}, {b}, {c}")),
        (reg(), reg(), reg()).prop_map(|(a, b, c)| format!("lt {a}, {b}, {c}")),
        (reg(), 100u16..256).prop_map(|(r, a)| format!("stm {a}, {r}")),
        (reg(), 0u16..256).prop_map(|(r, a)| format!("ldm {r}, {a}")),
        reg().prop_map(|r| format!("prr {r}")),
        (0u16..256).prop_map(|a| format!("prm {a}")),
    ]
}

proptest! {
    #[test]
    fn prop_straight_line_programs_halt(body in prop::collection::vec(straight_line_instruction(), 0..40)) {
        let mut source = body.join("\n");
        source.push_str("\nhlt\n");
        let program = assemble(&source).unwrap();

        let mut vm = VM::new();
        vm.initialize(&program).unwrap();
        let result = vm.run();
        prop_assert_eq!(result.outcome, Outcome::Halted);
        prop_assert_eq!(result.steps, body.len() as u64 + 1);
    }

    #[test]
    fn prop_listing_round_trip(body in prop::collection::vec(straight_line_instruction(), 1..40)) {
        let program = assemble(&body.join("\n")).unwrap();
        let text = listing_text(&disassemble(&program));
        prop_assert_eq!(assemble(&text).unwrap(), program);
    }

    #[test]
    fn prop_word_stream_round_trip(words in prop::collection::vec(any::<u32>(), 0..64)) {
        let program = Program::new(words);
        prop_assert_eq!(Program::from_hex(&program.to_hex()).unwrap(), program);
    }
}
