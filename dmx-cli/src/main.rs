use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dmx", version, about = "DMX toolchain: assemble, run, disassemble")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a .dasm source file into a word stream
    Asm {
        /// Source file (or - for stdin)
        input: String,
        /// Output file (or - for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
    },
    /// Run a .dmx word stream
    Run {
        /// Word-stream file (or - for stdin)
        input: String,
        /// Fault after this many instructions
        #[arg(long, env = "DMX_MAX_STEPS")]
        max_steps: Option<u64>,
        /// Print one line per executed instruction to stderr
        #[arg(long)]
        trace: bool,
        /// Write the final register and memory dump (or - for stdout)
        #[arg(long)]
        dump: Option<String>,
    },
    /// List a .dmx word stream as assembly
    Disasm {
        /// Word-stream file (or - for stdin)
        input: String,
    },
}

/// Logs go to stderr so they never mix with word streams or console output
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DMX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Asm { input, output } => commands::asm(&input, &output),
        Commands::Run {
            input,
            max_steps,
            trace,
            dump,
        } => commands::run(&input, max_steps, trace, dump.as_deref()),
        Commands::Disasm { input } => commands::disasm(&input),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
