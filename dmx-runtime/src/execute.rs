//! Instruction execution
//!
//! Each opcode is bound to one handler through [`HandlerTable`], an array
//! indexed by the opcode byte. A handler validates every operand it uses
//! before touching state, so a faulting instruction leaves registers, memory,
//! ip and the console as they were.

use crate::error::{ExecutionFault, Result};
use crate::memory::check_address;
use crate::state::VmState;
use dmx_spec::{sign_extend_8, Opcode, Word, NUM_REG, NUM_SLOTS, SIZE_LIM};

/// Control flow reported by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue at ip + 1
    Next,
    /// Continue at the given target, even when it equals the current ip
    Jump(usize),
    Halt,
}

/// The instruction being executed: where it came from and its operand bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub ip: usize,
    pub word: Word,
    pub args: [u8; NUM_SLOTS],
}

impl Operation {
    /// Operand in `slot` as a register index
    pub fn register(&self, slot: usize) -> Result<usize> {
        let index = self.args[slot] as usize;
        if index < NUM_REG {
            Ok(index)
        } else {
            Err(ExecutionFault::RegisterIndexOutOfRange {
                ip: self.ip,
                word: self.word,
                index,
            })
        }
    }

    /// Operand in `slot` as a data address
    pub fn address(&self, slot: usize) -> Result<usize> {
        check_address(self.ip, self.word, self.args[slot] as usize)
    }

    /// Operand in `slot` as a jump target within the loaded program
    pub fn jump_target(&self, slot: usize, program_len: usize) -> Result<usize> {
        let target = self.args[slot] as usize;
        if target < program_len {
            Ok(target)
        } else {
            Err(ExecutionFault::JumpTargetOutOfRange {
                ip: self.ip,
                word: self.word,
                target,
                program_len,
            })
        }
    }
}

pub type Handler = fn(&mut VmState, &Operation) -> Result<Flow>;

/// Fold an arithmetic result into [0, SIZE_LIM)
#[inline]
fn wrap(value: i64) -> i64 {
    value.rem_euclid(SIZE_LIM as i64)
}

// ========== Control ==========

fn op_hlt(_state: &mut VmState, _op: &Operation) -> Result<Flow> {
    Ok(Flow::Halt)
}

fn op_nop(_state: &mut VmState, _op: &Operation) -> Result<Flow> {
    Ok(Flow::Next)
}

// ========== Data movement ==========

fn op_ldi(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let r = op.register(0)?;
    state.registers[r] = sign_extend_8(op.args[1]);
    Ok(Flow::Next)
}

fn op_mov(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let rd = op.register(0)?;
    let rs = op.register(1)?;
    state.registers[rd] = state.registers[rs];
    Ok(Flow::Next)
}

fn op_ldm(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let r = op.register(0)?;
    let a = op.address(1)?;
    if let Some(value) = state.memory.read(a) {
        state.registers[r] = value;
    }
    Ok(Flow::Next)
}

fn op_stm(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let a = op.address(0)?;
    let r = op.register(1)?;
    state.memory.write(a, state.registers[r]);
    Ok(Flow::Next)
}

// ========== Arithmetic and comparison ==========

fn binary(state: &mut VmState, op: &Operation, f: fn(i64, i64) -> i64) -> Result<Flow> {
    let rd = op.register(0)?;
    let ra = op.register(1)?;
    let rb = op.register(2)?;
    state.registers[rd] = f(state.registers[ra], state.registers[rb]);
    Ok(Flow::Next)
}

fn op_add(state: &mut VmState, op: &Operation) -> Result<Flow> {
    binary(state, op, |a, b| wrap(a.wrapping_add(b)))
}

fn op_sub(state: &mut VmState, op: &Operation) -> Result<Flow> {
    binary(state, op, |a, b| wrap(a.wrapping_sub(b)))
}

fn op_eq(state: &mut VmState, op: &Operation) -> Result<Flow> {
    binary(state, op, |a, b| (a == b) as i64)
}

fn op_lt(state: &mut VmState, op: &Operation) -> Result<Flow> {
    binary(state, op, |a, b| (a < b) as i64)
}

// ========== Jumps ==========

fn op_jmp(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let target = op.jump_target(0, state.program_len)?;
    Ok(Flow::Jump(target))
}

fn branch(state: &mut VmState, op: &Operation, taken: fn(i64) -> bool) -> Result<Flow> {
    let r = op.register(0)?;
    if taken(state.registers[r]) {
        // Target only matters on the taken path
        let target = op.jump_target(1, state.program_len)?;
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Next)
    }
}

fn op_jz(state: &mut VmState, op: &Operation) -> Result<Flow> {
    branch(state, op, |value| value == 0)
}

fn op_jnz(state: &mut VmState, op: &Operation) -> Result<Flow> {
    branch(state, op, |value| value != 0)
}

// ========== Output ==========

fn op_prr(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let r = op.register(0)?;
    state.console.emit(state.registers[r]);
    Ok(Flow::Next)
}

fn op_prm(state: &mut VmState, op: &Operation) -> Result<Flow> {
    let a = op.address(0)?;
    if let Some(value) = state.memory.read(a) {
        state.console.emit(value);
    }
    Ok(Flow::Next)
}

/// Opcode byte -> handler. Built separately from the instruction-set table:
/// an opcode with no handler bound faults with `UnknownOpcode` when executed.
#[derive(Clone)]
pub struct HandlerTable {
    handlers: [Option<Handler>; 256],
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound: Vec<u8> = (0..=u8::MAX).filter(|&op| self.get(op).is_some()).collect();
        f.debug_struct("HandlerTable").field("bound", &bound).finish()
    }
}

impl HandlerTable {
    /// Table with every DMX opcode bound
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.bind(Opcode::Hlt, op_hlt);
        table.bind(Opcode::Nop, op_nop);
        table.bind(Opcode::Ldi, op_ldi);
        table.bind(Opcode::Mov, op_mov);
        table.bind(Opcode::Ldm, op_ldm);
        table.bind(Opcode::Stm, op_stm);
        table.bind(Opcode::Add, op_add);
        table.bind(Opcode::Sub, op_sub);
        table.bind(Opcode::Eq, op_eq);
        table.bind(Opcode::Lt, op_lt);
        table.bind(Opcode::Jmp, op_jmp);
        table.bind(Opcode::Jz, op_jz);
        table.bind(Opcode::Jnz, op_jnz);
        table.bind(Opcode::Prr, op_prr);
        table.bind(Opcode::Prm, op_prm);
        table
    }

    pub fn empty() -> Self {
        Self {
            handlers: [None; 256],
        }
    }

    pub fn bind(&mut self, opcode: Opcode, handler: Handler) {
        self.handlers[opcode.to_u8() as usize] = Some(handler);
    }

    pub fn unbind(&mut self, opcode: Opcode) {
        self.handlers[opcode.to_u8() as usize] = None;
    }

    #[inline]
    pub fn get(&self, opcode: u8) -> Option<Handler> {
        self.handlers[opcode as usize]
    }
}
