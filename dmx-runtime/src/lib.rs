//! # DMX Runtime
//!
//! Execute DMX programs on a fetch-decode-dispatch virtual machine.
//!
//! ## Machine
//!
//! - **8 registers**: R0-R7, signed 64-bit
//! - **256 words of RAM**: loaded from the program image, zero padded
//! - **15 instructions**: dispatched through an explicit [`HandlerTable`]
//! - **Console**: `prr`/`prm` append decimal lines
//!
//! Jumps are bounded by the loaded program's length, data accesses by RAM.
//! Any fault is terminal and leaves state exactly as it was before the
//! faulting instruction.
//!
//! ## Example
//!
//! ```rust
//! use dmx_runtime::{Outcome, VmConfig, VM};
//! use dmx_spec::Program;
//!
//! // ldi R0, 7 / prr R0 / hlt
//! let program = Program::new(vec![0x0007_0003, 0x0000_000E, 0x0000_0001]);
//!
//! let mut vm = VM::with_config(VmConfig::default().with_step_budget(1_000));
//! vm.initialize(&program).unwrap();
//! let result = vm.run();
//!
//! assert_eq!(result.outcome, Outcome::Halted);
//! assert_eq!(vm.output(), &["7"]);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod io;
pub mod execute;
pub mod trace;
pub mod dump;
pub mod vm;

pub use error::{ExecutionFault, Result};
pub use execute::{Flow, Handler, HandlerTable, Operation};
pub use io::Console;
pub use memory::{check_address, Memory};
pub use state::{Outcome, Signal, VmState, VmStatus};
pub use trace::{RegisterChange, TraceRecord};
pub use vm::{ExecutionResult, VmConfig, VM};

/// Simple execution helper
///
/// Runs a program to completion and returns its console lines, or the fault
/// that stopped it.
pub fn run(program: &dmx_spec::Program, config: VmConfig) -> Result<Vec<String>> {
    let mut vm = VM::with_config(config);
    vm.initialize(program)?;
    match vm.run().outcome {
        Outcome::Halted => Ok(vm.output().to_vec()),
        Outcome::Faulted(fault) => Err(fault),
    }
}
