//! Solve a linear system read from JSON with both iterative methods
//!
//! Usage:
//!     cargo run --bin solve-system -- --input system.json
//!
//! The input holds `matrix`, `rhs` and an optional `session` block; see
//! [`math_audio_iterative::SystemInput`].

use anyhow::Context;
use clap::Parser;
use math_audio_iterative::{SessionConfig, SolveSession, SystemInput, solve_session};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "solve-system",
    about = "Solve a diagonally dominant linear system by relaxation and simple iteration"
)]
struct Args {
    /// JSON file with `matrix` and `rhs`
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file with session settings (overrides the `session` block of the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Iteration cap for each solver run
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Log solver progress every N iterations (needs RUST_LOG=info)
    #[arg(long)]
    print_interval: Option<usize>,

    /// Print the results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ReportRow {
    tolerance: f64,
    relaxation: Vec<f64>,
    relaxation_iterations: usize,
    simple_iteration: Vec<f64>,
    simple_iteration_iterations: usize,
}

#[derive(Serialize)]
struct SessionOutput {
    canonical_matrix: Vec<Vec<f64>>,
    satisfied_norms: Vec<(String, f64)>,
    reports: Vec<ReportRow>,
    skipped: Vec<f64>,
    residual_trace: Vec<Vec<f64>>,
}

impl From<&SolveSession<f64>> for SessionOutput {
    fn from(session: &SolveSession<f64>) -> Self {
        Self {
            canonical_matrix: session
                .check
                .canonical
                .as_array()
                .rows()
                .into_iter()
                .map(|row| row.to_vec())
                .collect(),
            satisfied_norms: session
                .check
                .satisfied_norms()
                .into_iter()
                .map(|(kind, value)| (kind.to_string(), value))
                .collect(),
            reports: session
                .reports
                .iter()
                .map(|r| ReportRow {
                    tolerance: r.tolerance,
                    relaxation: r.relaxation.solution.to_vec(),
                    relaxation_iterations: r.relaxation.iterations,
                    simple_iteration: r.simple_iteration.solution.to_vec(),
                    simple_iteration_iterations: r.simple_iteration.iterations,
                })
                .collect(),
            skipped: session.skipped.clone(),
            residual_trace: session.residual_trace.iter().map(|r| r.to_vec()).collect(),
        }
    }
}

fn print_table(session: &SolveSession<f64>) {
    println!("Convergence norms of the canonical matrix:");
    for (kind, value) in session.check.satisfied_norms() {
        println!("  {} = {:.6} < 1", kind, value);
    }
    println!();

    println!(
        "{:<10} | {:<19} | {:>8} | {:<19} | {:>8}",
        "Tolerance", "Relaxation", "Iters", "Simple iteration", "Iters"
    );
    println!("{}", "-".repeat(76));
    for report in &session.reports {
        println!("{}", report);
        println!("{}", "-".repeat(76));
    }

    if !session.skipped.is_empty() {
        let skipped: Vec<String> = session.skipped.iter().map(|t| format!("{:.6}", t)).collect();
        println!("Failed verification: {}", skipped.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let input = SystemInput::from_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => input.session.clone(),
    };
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(print_interval) = args.print_interval {
        config.print_interval = print_interval;
    }

    let system = input.to_system()?;
    let session = solve_session(&system, &config)
        .context("solving the system")?;

    if args.json {
        let output = SessionOutput::from(&session);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&session);
    }

    Ok(())
}
