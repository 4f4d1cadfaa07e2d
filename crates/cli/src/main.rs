use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use bubblebot_aim::analyzer::{analyze, SweepMetrics};
use bubblebot_aim::{choose_shot, Frame, ShotCandidate};
use bubblebot_shared::{Decision, RawFrame, TuningConfig};

mod sweep;
mod synth;

#[derive(Parser)]
#[command(name = "bubblebot", about = "Bubble shooter aiming bot CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aim one round on a detector frame file
    Aim {
        /// Path to a detector frame JSON
        #[arg(long)]
        frame: PathBuf,

        /// Optional tuning config JSON (partial overrides allowed)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output path for the round report JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Aim on a seeded synthetic frame
    Demo {
        /// Random seed for the synthetic frame
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of bubbles to generate
        #[arg(long, default_value_t = 12)]
        bubbles: usize,

        /// Optional tuning config JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output path for the round report JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Sweep tuning parameters over seeded frames
    Sweep {
        /// Sweep a single parameter by name (default: all)
        #[arg(long)]
        param: Option<String>,

        /// Values per parameter
        #[arg(long, default_value_t = 7)]
        steps: usize,

        /// Seeded frames per value
        #[arg(long, default_value_t = 20)]
        seeds: u32,

        /// Bubbles per synthetic frame
        #[arg(long, default_value_t = 12)]
        bubbles: usize,

        /// Output path for CSV results
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Serialized artifact of one aiming round.
#[derive(Serialize)]
struct RoundReport {
    config: TuningConfig,
    decision: Decision,
    candidates: Vec<ShotCandidate>,
    metrics: Option<SweepMetrics>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Aim {
            frame,
            config,
            output,
        } => cmd_aim(&frame, config.as_ref(), output),

        Commands::Demo {
            seed,
            bubbles,
            config,
            output,
        } => cmd_demo(seed, bubbles, config.as_ref(), output),

        Commands::Sweep {
            param,
            steps,
            seeds,
            bubbles,
            output,
        } => sweep::cmd_sweep(param.as_deref(), steps, seeds, bubbles, output),
    }
}

fn load_config(path: Option<&PathBuf>) -> TuningConfig {
    let Some(path) = path else {
        return TuningConfig::default();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to parse config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_aim(frame_path: &PathBuf, config: Option<&PathBuf>, output: Option<PathBuf>) {
    let text = match std::fs::read_to_string(frame_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read frame {}: {}", frame_path.display(), e);
            std::process::exit(1);
        }
    };
    let raw: RawFrame = match serde_json::from_str(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to parse frame {}: {}", frame_path.display(), e);
            std::process::exit(1);
        }
    };

    let cfg = load_config(config);
    run_round(&raw, cfg, output);
}

fn cmd_demo(seed: u64, bubbles: usize, config: Option<&PathBuf>, output: Option<PathBuf>) {
    println!("Synthetic frame: seed={}, bubbles={}", seed, bubbles);
    let raw = synth::generate_frame(seed, bubbles);

    println!();
    println!("{:>4} {:>8} {:>8} {:>8} {:>6}", "id", "x", "y", "radius", "hits");
    println!("{:-<40}", "");
    for (i, b) in raw.bubbles.iter().enumerate() {
        println!(
            "{:>4} {:>8.1} {:>8.1} {:>8.1} {:>6}",
            i, b.x, b.y, b.radius, b.hit_count
        );
    }

    let cfg = load_config(config);
    run_round(&raw, cfg, output);
}

/// Validate the frame, pick a shot, and print the round summary.
fn run_round(raw: &RawFrame, cfg: TuningConfig, output: Option<PathBuf>) {
    let frame = match Frame::from_raw(raw) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Frame rejected: {}", e);
            std::process::exit(1);
        }
    };

    let decision = match choose_shot(&frame.arena, &frame.field, &cfg) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Aiming failed: {}", e);
            std::process::exit(2);
        }
    };

    let (candidates, metrics) = if frame.field.is_empty() {
        println!("\nEmpty field — aiming straight up.");
        (Vec::new(), None)
    } else {
        match bubblebot_aim::sweep(&frame.arena, &frame.field, &cfg) {
            Ok(s) => {
                let m = analyze(&s, &frame.field);
                (s.candidates, Some(m))
            }
            Err(e) => {
                eprintln!("Sweep failed after a successful decision: {}", e);
                std::process::exit(2);
            }
        }
    };

    if !candidates.is_empty() {
        let mut ranked: Vec<&ShotCandidate> = candidates.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        println!();
        println!("--- Top candidates ---");
        println!(
            "{:>9} {:>8} {:>7} {:>18}",
            "angle", "score", "target", "impact"
        );
        for c in ranked.iter().take(5) {
            let target = match c.target {
                Some(id) => format!("#{}", id),
                None => "-".to_string(),
            };
            println!(
                "{:>8.1}\u{00b0} {:>8.1} {:>7} ({:>7.1},{:>7.1})",
                c.angle.to_degrees(),
                c.score,
                target,
                c.impact.x,
                c.impact.y
            );
        }
    }

    if let Some(m) = &metrics {
        println!();
        println!(
            "Sweep: {} candidates, {} out of bounds, hit {:.0}%, lethal {:.0}%",
            m.candidates,
            m.failed,
            m.hit_fraction * 100.0,
            m.lethal_fraction * 100.0
        );
    }

    println!();
    println!(
        "Decision: aim at ({:.1}, {:.1})",
        decision.aim_point.x, decision.aim_point.y
    );

    if let Some(path) = output {
        let report = RoundReport {
            config: cfg,
            decision,
            candidates,
            metrics,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("\nReport written to {}", path.display()),
                Err(e) => eprintln!("\nFailed to write report: {}", e),
            },
            Err(e) => eprintln!("\nFailed to serialize report: {}", e),
        }
    }
}
