use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
#[cfg(not(feature = "tracing"))]
use log::LevelFilter;

use perfect_circle::io::{default_stats_path, load_scorer, ScoreReport, StrokeFile};
use perfect_circle::score::{format_percent, CircleScore, CircleScorer, Tier};
use perfect_circle::session::{JsonFileStore, ScoreStats, StatsStore, BEST_ACCURACY_KEY};
use perfect_circle::synth::{circle_stroke, SynthParams};

#[derive(Parser, Debug)]
#[command(
    name = "perfect-circle",
    version,
    about = "Score freehand circle strokes"
)]
struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit and score a stroke file.
    Score(ScoreArgs),
    /// Write a synthetic stroke file.
    Synth(SynthArgs),
    /// Show or reset career statistics.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Stroke JSON (`{"samples": [...]}` or `[[x, y], ...]`).
    stroke: PathBuf,
    /// Scorer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Record the result into this career stats file.
    #[arg(long)]
    stats: Option<PathBuf>,
    /// Write a JSON score report here.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SynthArgs {
    /// Output stroke JSON.
    out: PathBuf,
    #[arg(long, default_value_t = 50.0)]
    radius: f64,
    #[arg(long, default_value_t = 360)]
    points: usize,
    /// Arc sweep in degrees.
    #[arg(long, default_value_t = 360.0)]
    sweep: f64,
    /// Uniform per-axis noise amplitude in pixels.
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Career stats file (defaults to ~/.perfect-circle/stats.json).
    stats: Option<PathBuf>,
    /// Zero all counters.
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Synth(args) => run_synth(args),
        Command::Stats(args) => run_stats(args),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    perfect_circle::core::init_with_level(level)?;
    Ok(())
}

/// Filtering comes from `RUST_LOG`; `log` records are bridged by the subscriber.
#[cfg(feature = "tracing")]
fn init_logging(_verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    perfect_circle::core::init_tracing();
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scorer = match &args.config {
        Some(path) => load_scorer(path)?,
        None => CircleScorer::default(),
    };
    let stroke = StrokeFile::load_json(&args.stroke)?.to_stroke();
    let mut report = ScoreReport::new(&args.stroke, &stroke, *scorer.params());

    if !stroke.is_scorable() {
        println!("no score: stroke has only {} points", stroke.len());
        report.set_error(format!("too few points ({})", stroke.len()));
    } else {
        match scorer.score(&stroke) {
            Ok(score) => {
                print_score(&score);
                if let Some(path) = &args.stats {
                    record_stats(path, &score)?;
                }
                report.set_score(score);
            }
            Err(err) => {
                println!("no score: {err}");
                report.set_error(err);
            }
        }
    }

    if let Some(path) = &args.report {
        report.write_json(path)?;
        println!("wrote report JSON to {}", path.display());
    }
    Ok(())
}

fn print_score(score: &CircleScore) {
    println!("{} {}", score.tier.label(), format_percent(score.accuracy));
    let b = &score.breakdown;
    let mut detail = format!("radius: {}", format_percent(b.radius_accuracy));
    if let Some(se) = b.start_end_accuracy {
        detail.push_str(&format!(", start-end: {}", format_percent(se)));
    }
    if let Some(closure) = b.closure_factor {
        detail.push_str(&format!(", closure: {}", format_percent(closure)));
    }
    println!("({detail})");
    println!(
        "center: ({:.1}, {:.1}) radius: {:.1}",
        score.fit.center.x, score.fit.center.y, score.fit.radius
    );
}

fn record_stats(
    path: &std::path::Path,
    score: &CircleScore,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = JsonFileStore::open(path)?;
    let mut stats = ScoreStats::load(&store)?;
    if stats.record(score) {
        println!("new best!");
    }
    stats.save(&mut store)?;
    Ok(())
}

fn run_synth(args: SynthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = SynthParams {
        radius: args.radius,
        points: args.points,
        sweep_deg: args.sweep,
        noise_px: args.noise,
        seed: args.seed,
        ..SynthParams::default()
    };
    let stroke = circle_stroke(&params);
    StrokeFile::from_stroke(&stroke).write_json(&args.out)?;
    println!("wrote {} samples to {}", stroke.len(), args.out.display());
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.stats.unwrap_or_else(default_stats_path);
    let mut store = JsonFileStore::open(&path)?;
    if args.reset {
        ScoreStats::default().save(&mut store)?;
        println!("reset stats in {}", path.display());
        return Ok(());
    }
    let stats = ScoreStats::load(&store)?;
    for tier in Tier::ALL.iter().rev() {
        println!("{:<10} {}", tier.label(), stats.counts.get(*tier));
    }
    println!("attempts   {}", stats.attempts());
    println!("best       {}", format_percent(stats.best_accuracy));
    if store.get(BEST_ACCURACY_KEY)?.is_none() {
        println!("(no strokes recorded yet)");
    }
    Ok(())
}
