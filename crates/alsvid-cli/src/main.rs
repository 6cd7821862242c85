//! Alsvid Command-Line Interface
//!
//! Optimize, inspect, and verify quantum circuits in the `.qc` format
//! from the command line.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod report;
mod runner;

use commands::{bench, optimize, stats, verify, version};

/// Alsvid - quantum circuit optimization and certification
#[derive(Parser)]
#[command(name = "alsvid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a circuit with an ordered chain of passes
    Optimize {
        /// Input file (.qc)
        #[arg(short, long)]
        input: String,

        /// Output file for the optimized circuit
        #[arg(short, long)]
        output: Option<String>,

        /// Passes to run, in order (phase-fold, rotation-depth-schedule,
        /// linear-resynthesize, simplify); default chain when omitted
        #[arg(short, long)]
        pass: Vec<String>,

        /// Verify the result against the input circuit
        #[arg(long)]
        verify: bool,

        /// Export the run report as JSON
        #[arg(long)]
        export: Option<String>,
    },

    /// Show statistics of a circuit file
    Stats {
        /// Input file (.qc)
        input: String,
    },

    /// Check two circuit files for equivalence
    Verify {
        /// The reference circuit (.qc)
        original: String,

        /// The candidate circuit (.qc)
        candidate: String,
    },

    /// Run the pipeline over every .qc file in a directory
    Bench {
        /// Directory of .qc files
        dir: String,

        /// Passes to run, in order; default chain when omitted
        #[arg(short, long)]
        pass: Vec<String>,

        /// Verify every result against its input
        #[arg(long)]
        verify: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Optimize {
            input,
            output,
            pass,
            verify,
            export,
        } => optimize::execute(
            &input,
            output.as_deref(),
            &pass,
            verify,
            export.as_deref(),
        ),

        Commands::Stats { input } => stats::execute(&input),

        Commands::Verify {
            original,
            candidate,
        } => verify::execute(&original, &candidate),

        Commands::Bench { dir, pass, verify } => bench::execute(&dir, &pass, verify),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
