use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use um32_runtime::{run, VmConfig};
use um32_spec::ProgramImage;

#[derive(Parser)]
#[command(name = "um32", about = "UM-32 Universal Machine interpreter")]
struct Cli {
    /// Path to a UM-32 program image (big-endian 32-bit words)
    program: PathBuf,

    /// Back heap arrays with copy-on-write buffers
    #[arg(long)]
    cow: bool,

    /// Enable the speculative next-opcode fast path
    #[arg(long)]
    branch_prediction: bool,

    /// Write each executed opcode as a byte to this binary file
    #[arg(long, value_name = "PATH")]
    trace_opcodes: Option<PathBuf>,

    /// Print each executed instruction to standard error
    #[arg(long)]
    trace: bool,

    /// Stop after N instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Report the loaded image (word count, SHA-256) before running
    #[arg(long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run_cli() {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(&cli.program)
        .with_context(|| format!("cannot open program image {}", cli.program.display()))?;
    let image = ProgramImage::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot load program image {}", cli.program.display()))?;

    if cli.verbose {
        let digest = image.digest();
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        eprintln!(
            "loaded {} ({} platters, sha256 {})",
            cli.program.display(),
            image.len(),
            hex
        );
    }

    let config = VmConfig {
        copy_on_write: cli.cow,
        branch_prediction: cli.branch_prediction,
        opcode_trace: cli.trace_opcodes,
        trace: cli.trace,
        max_steps: cli.max_steps,
    };

    run(image, config).context("execution failed")?;
    Ok(())
}
