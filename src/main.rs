//! edgetree CLI - assemble edge streams into a tree and print it
//!
//! Results go to stdout: the S-expression, or the error code (`E1`..`E5`).
//! Logs and timings go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use edgetree::generate::{random_valid_tree, seeded, stress_input, to_wire};
use edgetree::{Config, Error, TreeAssembler};
use std::fs::File;
use std::path::PathBuf;
use std::thread::ScopedJoinHandle;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edgetree")]
#[command(about = "Assemble (P,C) edge streams into a binary tree S-expression")]
#[command(version)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lowest valid symbol (overrides config)
    #[arg(long)]
    min_symbol: Option<char>,

    /// Highest valid symbol (overrides config)
    #[arg(long)]
    max_symbol: Option<char>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Pattern {
    /// A random tree that passes every check
    Valid,
    /// Many distinct edges; overflows and cycles guaranteed
    Stress,
}

#[derive(Subcommand)]
enum Commands {
    /// Read edge streams and print the assembled tree
    Build {
        /// Input files, consumed concurrently (stdin when empty)
        inputs: Vec<PathBuf>,
        /// Print consume/snapshot timings to stderr
        #[arg(long)]
        timing: bool,
    },

    /// Print a generated edge stream
    Generate {
        /// Kind of stream to generate
        #[arg(value_enum, default_value = "valid")]
        pattern: Pattern,
        /// Random seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Number of edges for the valid pattern
        #[arg(short, long)]
        edges: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(min) = cli.min_symbol {
        config.min_symbol = min;
    }
    if let Some(max) = cli.max_symbol {
        config.max_symbol = max;
    }
    init_logging(&config.log_filter);

    match cli.command {
        Commands::Build { inputs, timing } => {
            let assembler = TreeAssembler::from_config(&config)?;
            let start = Instant::now();
            let consumed = consume_all(&assembler, &inputs);
            let consume_time = start.elapsed();
            let result = consumed.and_then(|_| assembler.snapshot());
            let total = start.elapsed();

            if timing {
                eprintln!(
                    "Total:{:.6} Consume:{:.6} Snapshot:{:.6}",
                    secs(total),
                    secs(consume_time),
                    secs(total - consume_time)
                );
            }
            report(cli.format, result)?;
        }

        Commands::Generate {
            pattern,
            seed,
            edges,
        } => {
            let range = config.symbol_range()?;
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, %range, "generating input");
            let mut rng = seeded(seed);
            let generated = match pattern {
                Pattern::Valid => random_valid_tree(range, edges, &mut rng),
                Pattern::Stress => stress_input(range, &mut rng),
            };
            println!("{}", to_wire(&generated));
        }
    }

    Ok(())
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Consume every input, one thread per file, sharing one assembler
///
/// When several streams fail, the error of the earliest input on the
/// command line is the one returned.
fn consume_all(assembler: &TreeAssembler, inputs: &[PathBuf]) -> edgetree::Result<()> {
    if inputs.is_empty() {
        assembler.consume(std::io::stdin().lock())?;
        return Ok(());
    }

    let files = inputs
        .iter()
        .map(|path| File::open(path))
        .collect::<std::io::Result<Vec<_>>>()?;

    std::thread::scope(|scope| {
        let handles = files
            .into_iter()
            .map(|file| scope.spawn(move || assembler.consume(file)))
            .collect();
        join_streams(handles)
    })?;
    Ok(())
}

/// Join input threads in command-line order, keeping the first error
///
/// A panicking thread is a bug, not bad input, so the panic is re-raised.
fn join_streams<T>(
    handles: Vec<ScopedJoinHandle<'_, edgetree::Result<T>>>,
) -> edgetree::Result<Vec<T>> {
    handles
        .into_iter()
        .map(|handle| {
            handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })
        .collect()
}

fn report(format: OutputFormat, result: edgetree::Result<String>) -> anyhow::Result<()> {
    println!("{}", render_report(format, result)?);
    Ok(())
}

/// Line printed on stdout for a build result
fn render_report(
    format: OutputFormat,
    result: edgetree::Result<String>,
) -> anyhow::Result<String> {
    match (format, result) {
        (_, Err(e)) if e.code().is_none() => Err(e).context("failed to read input"),
        (OutputFormat::Text, Ok(tree)) => Ok(tree),
        (OutputFormat::Text, Err(e)) => Ok(e.label().unwrap_or_default()),
        (OutputFormat::Json, Ok(tree)) => Ok(serde_json::to_string(
            &serde_json::json!({ "status": "ok", "tree": tree }),
        )?),
        (OutputFormat::Json, Err(e)) => Ok(serde_json::to_string(&serde_json::json!({
            "status": "error",
            "code": e.label(),
            "message": e.to_string(),
        }))?),
    }
}

fn secs(duration: Duration) -> f64 {
    duration.as_secs_f64()
}
