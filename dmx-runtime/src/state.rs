//! VM state

use crate::error::ExecutionFault;
use crate::io::Console;
use crate::memory::Memory;
use dmx_spec::NUM_REG;

/// Lifecycle of a VM. `Halted` and `Faulted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmStatus {
    Running,
    Halted,
    Faulted(ExecutionFault),
}

impl VmStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VmStatus::Running)
    }
}

/// Result of one successful step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Halt,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Halted,
    Faulted(ExecutionFault),
}

impl Outcome {
    pub fn is_halted(&self) -> bool {
        matches!(self, Outcome::Halted)
    }

    pub fn fault(&self) -> Option<&ExecutionFault> {
        match self {
            Outcome::Halted => None,
            Outcome::Faulted(fault) => Some(fault),
        }
    }
}

/// Everything a handler may read or mutate
#[derive(Debug, Clone)]
pub struct VmState {
    /// Register file (R0-R7)
    pub registers: [i64; NUM_REG],

    /// Instruction pointer
    pub ip: usize,

    /// RAM, holding the program image at initialization
    pub memory: Memory,

    /// Length of the loaded program, the bound for jump targets
    pub program_len: usize,

    /// Console lines emitted so far
    pub console: Console,

    /// Instructions executed
    pub steps: u64,

    pub status: VmStatus,
}

impl Default for VmState {
    fn default() -> Self {
        Self::new()
    }
}

impl VmState {
    pub fn new() -> Self {
        VmState {
            registers: [0; NUM_REG],
            ip: 0,
            memory: Memory::new(),
            program_len: 0,
            console: Console::new(),
            steps: 0,
            status: VmStatus::Running,
        }
    }
}
