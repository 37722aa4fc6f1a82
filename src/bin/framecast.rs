use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framecast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single frame and print it as JSON.
    Frame(FrameArgs),
    /// Evaluate every frame and print one fingerprint per frame plus a digest.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluation chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Print only the summary line.
    #[arg(long, default_value_t = false)]
    summary_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = framecast::Composition::from_path(&args.in_path)?;
    let frame = framecast::Evaluator::eval_frame(&comp, framecast::FrameIndex(args.frame))
        .with_context(|| format!("evaluate frame {}", args.frame))?;

    let json = if args.compact {
        serde_json::to_string(&frame)
    } else {
        serde_json::to_string_pretty(&frame)
    }
    .context("serialize evaluated frame")?;
    println!("{json}");
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let comp = framecast::Composition::from_path(&args.in_path)?;
    let total = comp.scene_params()?.total_duration_frames();
    let range = framecast::FrameRange::new(framecast::FrameIndex(0), framecast::FrameIndex(total))?;
    let threading = framecast::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let (_, prints, stats) = framecast::evaluate_range_with_stats(&comp, range, &threading)
        .with_context(|| format!("sweep '{}'", args.in_path.display()))?;

    if !args.summary_only {
        for (i, fp) in prints.iter().enumerate() {
            println!("{i} {fp}");
        }
    }
    println!(
        "frames={} distinct={} digest={}",
        stats.frames_total,
        stats.frames_distinct,
        framecast::combine_fingerprints(&prints)
    );
    Ok(())
}
