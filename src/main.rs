use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use log::{info, warn};
use rayon::prelude::*;
use trackwarp::{burst_index, read_track_file, write_track_file, CounterMetrics, Settings, Warper};

const INPUT_NAME: &str = "flight_path.csv";
const OUTPUT_NAME: &str = "flight_path_warped.csv";

#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic flight path warping", long_about = None)]
struct Cli {
    /// Settings file (TOML); built-in defaults when omitted
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Warp one track file
    Warp(WarpArgs),
    /// Warp every `<id>/flight_path.csv` below a directory
    Batch(BatchArgs),
    /// Print the burst point of a track
    Burst(BurstArgs),
}

#[derive(Parser, Debug)]
struct WarpArgs {
    /// Identifier seeding every random choice
    #[arg(long)]
    id: String,

    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Write the untouched track instead of failing
    #[arg(long, action = ArgAction::SetTrue)]
    fallback: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory holding one sub-directory per identifier
    #[arg(value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    /// Write untouched tracks instead of skipping failures
    #[arg(long, action = ArgAction::SetTrue)]
    fallback: bool,
}

#[derive(Parser, Debug)]
struct BurstArgs {
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Warp(args) => run_warp(settings, args),
        Command::Batch(args) => run_batch(settings, args),
        Command::Burst(args) => run_burst(args),
    }
}

fn run_warp(settings: Settings, args: WarpArgs) -> Result<()> {
    let track = read_track_file(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let warper = Warper::new(settings);

    let warped = if args.fallback {
        warper.warp_or_original(&args.id, &track)
    } else {
        warper
            .warp(&args.id, &track)
            .with_context(|| format!("warping {} for {}", args.input.display(), args.id))?
    };

    write_track_file(&args.output, &warped)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("{}: {} -> {} points", args.id, track.len(), warped.len());
    Ok(())
}

fn run_batch(settings: Settings, args: BatchArgs) -> Result<()> {
    let metrics = CounterMetrics::new();
    let warper = Warper::new(settings).with_metrics(std::sync::Arc::new(metrics.clone()));

    let mut jobs = Vec::new();
    for entry in fs::read_dir(&args.dir).with_context(|| format!("listing {}", args.dir.display()))? {
        let path = entry?.path();
        if path.join(INPUT_NAME).is_file() {
            jobs.push(path);
        }
    }
    jobs.sort();

    if jobs.is_empty() {
        bail!("no */{} found below {}", INPUT_NAME, args.dir.display());
    }
    info!("warping {} tracks", jobs.len());

    let failures: Vec<(PathBuf, anyhow::Error)> = jobs
        .par_iter()
        .filter_map(|dir| {
            warp_dir(&warper, dir, args.fallback)
                .err()
                .map(|e| (dir.clone(), e))
        })
        .collect();

    for (dir, e) in &failures {
        warn!("{}: {:#}", dir.display(), e);
    }
    for (name, count) in metrics.snapshot() {
        println!("{:<32} {}", name, count);
    }
    println!("{} of {} tracks warped", jobs.len() - failures.len(), jobs.len());

    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} tracks failed", failures.len()))
    }
}

fn warp_dir(warper: &Warper, dir: &Path, fallback: bool) -> Result<()> {
    let identifier = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("directory name is not valid UTF-8"))?;

    let track = read_track_file(dir.join(INPUT_NAME))?;
    let warped = if fallback {
        warper.warp_or_original(identifier, &track)
    } else {
        warper.warp(identifier, &track)?
    };

    write_track_file(dir.join(OUTPUT_NAME), &warped)?;
    Ok(())
}

fn run_burst(args: BurstArgs) -> Result<()> {
    let track = read_track_file(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if track.is_empty() {
        bail!("{} holds no points", args.input.display());
    }

    let index = burst_index(&track);
    let apex = track[index];
    println!("Burst index: {} of {}", index, track.len());
    println!("  Time: {}", apex.time);
    println!("  Position: ({}, {})", apex.lat, apex.lon);
    println!("  Altitude: {} m", apex.alt);
    Ok(())
}
