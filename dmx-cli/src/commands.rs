use anyhow::{Context, Result};
use dmx_assembler::assemble;
use dmx_disassembler::disassemble;
use dmx_runtime::{Outcome, VmConfig, VM};
use dmx_spec::Program;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

const STDIO: &str = "-";

fn read_input(path: &str) -> Result<String> {
    if path == STDIO {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path))
    }
}

fn write_output(path: &str, text: &str) -> Result<()> {
    if path == STDIO {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes()).context("write stdout")?;
        stdout.flush().context("flush stdout")
    } else {
        fs::write(path, text).with_context(|| format!("write {}", path))
    }
}

/// Unexpected extensions are accepted, only logged
fn check_extension(path: &str, expected: &str) {
    if path == STDIO {
        return;
    }
    let ext = Path::new(path).extension().and_then(|e| e.to_str());
    if ext != Some(expected) {
        tracing::warn!(path, expected, "input does not have the expected extension");
    }
}

fn load_program(input: &str) -> Result<Program> {
    check_extension(input, "dmx");
    let text = read_input(input)?;
    Program::from_hex(&text).with_context(|| format!("parse word stream {}", input))
}

pub fn asm(input: &str, output: &str) -> Result<ExitCode> {
    check_extension(input, "dasm");
    let source = read_input(input)?;
    let program = assemble(&source).with_context(|| format!("assemble {}", input))?;
    write_output(output, &program.to_hex())?;
    Ok(ExitCode::SUCCESS)
}

pub fn run(input: &str, max_steps: Option<u64>, trace: bool, dump: Option<&str>) -> Result<ExitCode> {
    let program = load_program(input)?;
    let config = VmConfig {
        step_budget: max_steps,
        trace,
    };

    let mut vm = VM::with_config(config);
    if let Err(fault) = vm.initialize(&program) {
        eprintln!("VMError: {}", fault);
        return Ok(ExitCode::FAILURE);
    }
    let result = vm.run();

    let mut console = String::new();
    for line in vm.output() {
        console.push_str(line);
        console.push('\n');
    }
    write_output(STDIO, &console)?;

    if trace {
        for record in vm.trace() {
            eprintln!("{}", record);
        }
    }

    if let Some(path) = dump {
        write_output(path, &vm.dump())?;
    }

    match result.outcome {
        Outcome::Halted => {
            tracing::info!(steps = result.steps, "program halted");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Faulted(fault) => {
            eprintln!("VMError: {}", fault);
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn disasm(input: &str) -> Result<ExitCode> {
    let program = load_program(input)?;
    write_output(STDIO, &disassemble(&program))?;
    Ok(ExitCode::SUCCESS)
}
