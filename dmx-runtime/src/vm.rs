//! Virtual Machine for DMX

use crate::dump::dump;
use crate::error::{ExecutionFault, Result};
use crate::execute::{Flow, HandlerTable, Operation};
use crate::io::Console;
use crate::memory::Memory;
use crate::state::{Outcome, Signal, VmState, VmStatus};
use crate::trace::{diff_registers, TraceRecord};
use dmx_disassembler::format_word;
use dmx_spec::{Fields, Program, Register, NUM_REG, RAM_LEN};

/// VM configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum number of steps before the run faults with `StepBudgetExceeded`
    pub step_budget: Option<u64>,

    /// Record a [`TraceRecord`] for every executed instruction
    pub trace: bool,
}

impl VmConfig {
    pub fn with_step_budget(mut self, budget: u64) -> Self {
        self.step_budget = Some(budget);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub steps: u64,

    /// How the run ended
    pub outcome: Outcome,
}

/// DMX Virtual Machine
#[derive(Debug, Clone)]
pub struct VM {
    /// Registers, memory, ip, console
    state: VmState,

    config: VmConfig,

    handlers: HandlerTable,

    /// Execution trace (if enabled)
    trace: Vec<TraceRecord>,
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}

impl VM {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self::with_handlers(config, HandlerTable::new())
    }

    /// Create a VM that dispatches through a custom handler table
    pub fn with_handlers(config: VmConfig, handlers: HandlerTable) -> Self {
        Self {
            state: VmState::new(),
            config,
            handlers,
            trace: Vec::new(),
        }
    }

    /// Load a program and reset all state. The program must be shorter than RAM.
    pub fn initialize(&mut self, program: &Program) -> Result<()> {
        if program.len() >= RAM_LEN {
            return Err(ExecutionFault::ProgramTooLong {
                len: program.len(),
                limit: RAM_LEN,
            });
        }

        self.state = VmState::new();
        self.state.memory.load(program.words());
        self.state.program_len = program.len();
        self.trace.clear();

        tracing::debug!(words = program.len(), "loaded program");
        Ok(())
    }

    /// Execute one instruction
    ///
    /// Once the VM is halted this keeps returning `Signal::Halt`; once it has
    /// faulted it keeps returning the same fault. Neither changes any state.
    pub fn step(&mut self) -> Result<Signal> {
        match &self.state.status {
            VmStatus::Halted => return Ok(Signal::Halt),
            VmStatus::Faulted(fault) => return Err(fault.clone()),
            VmStatus::Running => {}
        }

        match self.execute_next() {
            Ok(Signal::Halt) => {
                tracing::debug!(steps = self.state.steps, ip = self.state.ip, "halted");
                self.state.status = VmStatus::Halted;
                Ok(Signal::Halt)
            }
            Ok(Signal::Continue) => Ok(Signal::Continue),
            Err(fault) => {
                tracing::warn!(steps = self.state.steps, %fault, "execution fault");
                self.state.status = VmStatus::Faulted(fault.clone());
                Err(fault)
            }
        }
    }

    fn execute_next(&mut self) -> Result<Signal> {
        let ip = self.state.ip;

        if let Some(budget) = self.config.step_budget {
            if self.state.steps >= budget {
                return Err(ExecutionFault::StepBudgetExceeded { ip, budget });
            }
        }

        let word = self
            .state
            .memory
            .fetch(ip)
            .ok_or(ExecutionFault::InstructionPointerOutOfRange { ip })?;
        let fields = Fields::decode(word);
        let handler = self
            .handlers
            .get(fields.opcode)
            .ok_or(ExecutionFault::UnknownOpcode {
                ip,
                word,
                opcode: fields.opcode,
            })?;

        let before = self.state.registers;
        let operation = Operation {
            ip,
            word,
            args: fields.args,
        };
        let flow = handler(&mut self.state, &operation)?;

        let signal = match flow {
            Flow::Next => {
                self.state.ip = ip + 1;
                Signal::Continue
            }
            Flow::Jump(target) => {
                self.state.ip = target;
                Signal::Continue
            }
            Flow::Halt => {
                self.state.ip = ip + 1;
                Signal::Halt
            }
        };
        self.state.steps += 1;

        tracing::trace!(
            step = self.state.steps,
            ip,
            word = format_args!("{:08x}", word),
            next = self.state.ip,
            "step"
        );

        if self.config.trace {
            self.trace.push(TraceRecord {
                step: self.state.steps,
                ip_before: ip,
                word,
                text: format_word(word),
                changes: diff_registers(&before, &self.state.registers),
                ip_after: self.state.ip,
            });
        }

        Ok(signal)
    }

    /// Step until the VM halts or faults
    pub fn run(&mut self) -> ExecutionResult {
        let outcome = loop {
            match self.step() {
                Ok(Signal::Continue) => continue,
                Ok(Signal::Halt) => break Outcome::Halted,
                Err(fault) => break Outcome::Faulted(fault),
            }
        };
        ExecutionResult {
            steps: self.state.steps,
            outcome,
        }
    }

    pub fn state(&self) -> &VmState {
        &self.state
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn registers(&self) -> &[i64; NUM_REG] {
        &self.state.registers
    }

    pub fn register(&self, reg: Register) -> i64 {
        self.state.registers[reg.index()]
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn ip(&self) -> usize {
        self.state.ip
    }

    pub fn program_len(&self) -> usize {
        self.state.program_len
    }

    pub fn status(&self) -> &VmStatus {
        &self.state.status
    }

    pub fn steps(&self) -> u64 {
        self.state.steps
    }

    /// Console lines emitted so far
    pub fn output(&self) -> &[String] {
        self.state.console.lines()
    }

    pub fn console(&self) -> &Console {
        &self.state.console
    }

    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    /// Registers and non-empty memory rows in the dump text format
    pub fn dump(&self) -> String {
        dump(&self.state.registers, &self.state.memory)
    }
}
