use std::io::Write;
use std::path::PathBuf;

use rayon::prelude::*;

use bubblebot_aim::analyzer::{analyze, SweepMetrics};
use bubblebot_aim::{best, Frame};
use bubblebot_shared::TuningConfig;

use crate::synth::generate_frame;

/// A sweepable tuning parameter with its name, range, and accessor.
struct SweepParam {
    name: &'static str,
    min: f64,
    default: f64,
    max: f64,
    /// Apply this parameter value to a TuningConfig.
    apply: fn(&mut TuningConfig, f64),
}

const SWEEP_PARAMS: &[SweepParam] = &[
    SweepParam {
        name: "gravity",
        min: 2.0,
        default: 9.81,
        max: 100.0,
        apply: |c, v| c.gravity = v as f32,
    },
    SweepParam {
        name: "launch_speed",
        min: 250.0,
        default: 500.0,
        max: 900.0,
        apply: |c, v| c.launch_speed = v as f32,
    },
    SweepParam {
        name: "hit_margin",
        min: 0.0,
        default: 4.0,
        max: 12.0,
        apply: |c, v| c.hit_margin = v as f32,
    },
    SweepParam {
        name: "sweep_step",
        min: 0.0175,
        default: 0.0873,
        max: 0.1745,
        apply: |c, v| c.sweep_step = v as f32,
    },
    SweepParam {
        name: "sweep_limit",
        min: 0.7,
        default: 1.3963,
        max: 1.5533,
        apply: |c, v| c.sweep_limit = v as f32,
    },
    SweepParam {
        name: "lethal_bonus",
        min: 50.0,
        default: 150.0,
        max: 400.0,
        apply: |c, v| c.lethal_bonus = v as f32,
    },
    SweepParam {
        name: "multi_hit_base",
        min: 20.0,
        default: 100.0,
        max: 300.0,
        apply: |c, v| c.multi_hit_base = v as f32,
    },
    SweepParam {
        name: "urgency_weight",
        min: 0.0,
        default: 40.0,
        max: 120.0,
        apply: |c, v| c.urgency_weight = v as f32,
    },
    SweepParam {
        name: "chain_radius",
        min: 20.0,
        default: 60.0,
        max: 150.0,
        apply: |c, v| c.chain_radius = v as f32,
    },
    SweepParam {
        name: "chain_weight",
        min: 0.0,
        default: 10.0,
        max: 40.0,
        apply: |c, v| c.chain_weight = v as f32,
    },
];

/// Aggregated metrics for one parameter value across all seeds.
struct AggResult {
    value: f64,
    mean_hit_fraction: f32,
    mean_lethal_fraction: f32,
    mean_best_score: f32,
    lethal_pick_rate: f32,
    mean_failed: f32,
    frame_count: u32,
}

/// One seeded aiming round to be run in parallel.
struct AimJob {
    seed: u64,
    bubbles: usize,
    cfg: TuningConfig,
}

struct FrameStats {
    metrics: SweepMetrics,
    best_is_lethal: bool,
}

fn run_job(job: &AimJob) -> Option<FrameStats> {
    let raw = generate_frame(job.seed, job.bubbles);
    let frame = Frame::from_raw(&raw).ok()?;
    let sweep = bubblebot_aim::sweep(&frame.arena, &frame.field, &job.cfg).ok()?;
    let metrics = analyze(&sweep, &frame.field);
    let best_is_lethal = best(&sweep)
        .target
        .and_then(|id| frame.field.get(id))
        .map(|b| b.hit_count == 1)
        .unwrap_or(false);
    Some(FrameStats {
        metrics,
        best_is_lethal,
    })
}

fn sweep_param(param: &SweepParam, steps: usize, seeds: u32, bubbles: usize) -> Vec<AggResult> {
    // Generate linearly-spaced values
    let values: Vec<f64> = if steps == 1 {
        vec![param.default]
    } else {
        (0..steps)
            .map(|i| param.min + (param.max - param.min) * i as f64 / (steps - 1) as f64)
            .collect()
    };

    values
        .iter()
        .map(|&val| {
            let jobs: Vec<AimJob> = (0..seeds)
                .map(|s| {
                    let mut cfg = TuningConfig::default();
                    (param.apply)(&mut cfg, val);
                    AimJob {
                        seed: s as u64,
                        bubbles,
                        cfg,
                    }
                })
                .collect();

            let stats: Vec<FrameStats> =
                jobs.par_iter().filter_map(|job| run_job(job)).collect();

            let n = stats.len() as f32;
            if stats.is_empty() {
                return AggResult {
                    value: val,
                    mean_hit_fraction: 0.0,
                    mean_lethal_fraction: 0.0,
                    mean_best_score: 0.0,
                    lethal_pick_rate: 0.0,
                    mean_failed: 0.0,
                    frame_count: 0,
                };
            }

            AggResult {
                value: val,
                mean_hit_fraction: stats.iter().map(|s| s.metrics.hit_fraction).sum::<f32>() / n,
                mean_lethal_fraction: stats
                    .iter()
                    .map(|s| s.metrics.lethal_fraction)
                    .sum::<f32>()
                    / n,
                mean_best_score: stats.iter().map(|s| s.metrics.best_score).sum::<f32>() / n,
                lethal_pick_rate: stats.iter().filter(|s| s.best_is_lethal).count() as f32 / n,
                mean_failed: stats.iter().map(|s| s.metrics.failed as f32).sum::<f32>() / n,
                frame_count: stats.len() as u32,
            }
        })
        .collect()
}

fn print_param_table(param_name: &str, results: &[AggResult]) {
    println!("\n--- {} ---", param_name);
    println!(
        "{:>12} {:>8} {:>8} {:>10} {:>10} {:>8} {:>6}",
        "value", "hit%", "lethal%", "best_score", "pick_leth", "failed", "frames"
    );
    println!("{:-<70}", "");

    let best_idx = results
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.lethal_pick_rate
                .partial_cmp(&b.lethal_pick_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i);

    for (i, r) in results.iter().enumerate() {
        let marker = if Some(i) == best_idx { " *" } else { "" };
        println!(
            "{:>12.4} {:>8.2} {:>8.2} {:>10.1} {:>10.2} {:>8.1} {:>6}{}",
            r.value,
            r.mean_hit_fraction,
            r.mean_lethal_fraction,
            r.mean_best_score,
            r.lethal_pick_rate,
            r.mean_failed,
            r.frame_count,
            marker,
        );
    }
}

fn write_csv(path: &std::path::Path, all_results: &[(&str, Vec<AggResult>)]) {
    let mut file = match std::fs::File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to create CSV file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    let _ = writeln!(
        file,
        "parameter,value,hit_fraction,lethal_fraction,best_score,lethal_pick_rate,failed,frame_count"
    );

    for (param_name, results) in all_results {
        for r in results {
            let _ = writeln!(
                file,
                "{},{:.4},{:.3},{:.3},{:.2},{:.3},{:.2},{}",
                param_name,
                r.value,
                r.mean_hit_fraction,
                r.mean_lethal_fraction,
                r.mean_best_score,
                r.lethal_pick_rate,
                r.mean_failed,
                r.frame_count,
            );
        }
    }
    println!("\nCSV written to {}", path.display());
}

pub fn cmd_sweep(
    param_filter: Option<&str>,
    steps: usize,
    seeds: u32,
    bubbles: usize,
    output: Option<PathBuf>,
) {
    // Filter to requested parameter(s)
    let params_to_sweep: Vec<&SweepParam> = if let Some(name) = param_filter {
        match SWEEP_PARAMS.iter().find(|p| p.name == name) {
            Some(p) => vec![p],
            None => {
                eprintln!(
                    "Unknown parameter '{}'. Available: {}",
                    name,
                    SWEEP_PARAMS
                        .iter()
                        .map(|p| p.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                std::process::exit(1);
            }
        }
    } else {
        SWEEP_PARAMS.iter().collect()
    };

    let total_frames = params_to_sweep.len() * steps * seeds as usize;
    println!(
        "=== Tuning Sweep ===\nSteps: {} | Seeds: {} | Bubbles/frame: {}\nParams: {} | Total frames: {}",
        steps,
        seeds,
        bubbles,
        params_to_sweep.len(),
        total_frames,
    );

    let start = std::time::Instant::now();

    let mut all_results: Vec<(&str, Vec<AggResult>)> = Vec::new();
    let mut best_per_param: Vec<(&str, f64, f32)> = Vec::new();

    for param in &params_to_sweep {
        let results = sweep_param(param, steps, seeds, bubbles);

        if let Some(best) = results.iter().max_by(|a, b| {
            a.lethal_pick_rate
                .partial_cmp(&b.lethal_pick_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            best_per_param.push((param.name, best.value, best.lethal_pick_rate));
        }

        print_param_table(param.name, &results);
        all_results.push((param.name, results));
    }

    let elapsed = start.elapsed();
    println!("\n=== Summary ({:.1}s) ===", elapsed.as_secs_f32());
    println!("{:<20} {:>12} {:>12}", "Parameter", "Best Value", "PickLethal");
    println!("{:-<46}", "");
    for (name, value, rate) in &best_per_param {
        println!("{:<20} {:>12.4} {:>12.2}", name, value, rate);
    }

    if let Some(path) = &output {
        write_csv(path, &all_results);
    }
}
