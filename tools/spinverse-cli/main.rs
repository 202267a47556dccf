use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spinverse::prelude::*;
use spinverse::sequence::{find_branch_conflicts, validate};
use std::f64::consts::TAU;
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceCli {
    Draw,
    Angle,
}

/// Runs a SpinVerse sequence from start to finish
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the sequence JSON file
    sequence_path: String,

    /// How spin outcomes are produced
    #[arg(short, long, value_enum, default_value = "draw")]
    source: SourceCli,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many spins if the sequence loops
    #[arg(long, default_value_t = 100)]
    max_spins: usize,

    /// Budget unnamed segments split when a branch overrides weights
    #[arg(long, default_value_t = 100.0)]
    weight_budget: f64,

    /// Write a bincode history snapshot to this path
    #[arg(long)]
    snapshot: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading and Conversion ---
    let sequence = SequenceDocument::from_file(&cli.sequence_path)
        .and_then(IntoSequence::into_sequence)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load sequence: {}", e)));
    println!(
        "Loaded {} steps from '{}' (start: '{}')",
        sequence.steps.len(),
        cli.sequence_path,
        sequence.start_step_id
    );

    // --- 2. Validation ---
    if let Err(errors) = validate(&sequence) {
        println!("\nValidation found {} issue(s):", errors.len());
        for error in &errors {
            println!("  -> {}", error);
        }
    }
    for step in &sequence.steps {
        for conflict in find_branch_conflicts(step) {
            println!(
                "  -> Step '{}': branch #{} can shadow branch #{}",
                step.id, conflict.winner, conflict.shadowed
            );
        }
    }

    // --- 3. Run ---
    let source_choice = match cli.source {
        SourceCli::Draw => SourceChoice::Draw,
        SourceCli::Angle => SourceChoice::Angle,
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut session = SpinSession::builder(sequence)
        .with_weight_budget(cli.weight_budget)
        .build();

    println!("\nRunning sequence with source {:?}...", source_choice);
    let run_start = Instant::now();
    let completed = match source_choice {
        SourceChoice::Draw => session.run_to_completion(&mut WeightedDraw::new(rng), cli.max_spins),
        SourceChoice::Angle => {
            let mut rng = rng;
            let mut source = LandingAngle::new(move || rng.random_range(0.0..TAU));
            session.run_to_completion(&mut source, cli.max_spins)
        }
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Run failed: {}", e)));
    let run_duration = run_start.elapsed();

    // --- 4. Results ---
    println!(
        "\nRun {}!",
        if completed { "Finished" } else { "Stopped" }
    );
    for result in session.history().iter() {
        match &result.multi_spin_results {
            Some(spins) => println!(
                "  -> {}: {} (spins: {})",
                result.step_id,
                result.spin_result.segment.text,
                spins
                    .iter()
                    .map(|s| s.segment.text.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            None => println!(
                "  -> {}: {}",
                result.step_id, result.spin_result.segment.text
            ),
        }
    }

    let json = serde_json::to_string_pretty(session.history().results())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize history: {}", e)));
    println!("\n--- History JSON ---\n{}", json);

    if let Some(path) = &cli.snapshot {
        session
            .snapshot()
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write snapshot: {}", e)));
        println!("\nWrote history snapshot to '{}'", path);
    }

    println!("\n--- Performance Summary ---");
    println!("Run:                  {:?}", run_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
