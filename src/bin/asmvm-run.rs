use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use asmvm::{IntExecutor, LineDecoder, Machine, MachineConfig, Program, StdConsole};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a line-oriented assembly program")]
struct Opts {
    /// JSON file with a machine configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Abort after this many processed lines
    #[arg(long)]
    max_steps: Option<u64>,
    /// Allow a label to be defined again at a different line
    #[arg(long)]
    allow_label_redefinition: bool,
    /// Compare against (0, 0) when a conditional branch runs before any CMP
    #[arg(long)]
    lenient_compare: bool,
    /// Print the final machine state as JSON
    #[arg(long)]
    dump_state: bool,
    /// Log every executed line (ignored when RUST_LOG is set)
    #[arg(long)]
    trace: bool,
    /// Program file; read from the first line of stdin when omitted
    #[arg(value_name = "PROGRAM")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if opts.trace => EnvFilter::new("asmvm=trace"),
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<MachineConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MachineConfig::default(),
    };
    if opts.max_steps.is_some() {
        cfg.max_steps = opts.max_steps;
    }
    cfg.allow_label_redefinition |= opts.allow_label_redefinition;
    cfg.lenient_compare |= opts.lenient_compare;

    let path = match opts.input {
        Some(p) => p,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("reading program path from stdin")?;
            PathBuf::from(line.trim())
        }
    };
    let program = Program::load(&path)?;

    let mut machine = Machine::new(cfg);
    let mut console = StdConsole::new();
    let summary = program.run(&mut machine, &LineDecoder::new(), &IntExecutor, &mut console)?;
    if !summary.halted {
        eprintln!("program ended without HALT after {} steps", summary.steps);
    }

    if opts.dump_state {
        println!("{}", serde_json::to_string_pretty(&machine)?);
    }

    Ok(())
}
