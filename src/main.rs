use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dice_decks::session::{self, SessionEvent};
use dice_decks::{AppConfig, DeckRegistry, DieColor, Face, FaceCatalog, HandSummary, Instance, SampleSource, Statistics};

#[derive(Parser)]
#[command(name = "dice_decks")]
#[command(about = "Virtual dice deck tracker and hand simulator", long_about = None)]
struct Cli {
    /// Face catalog JSON file overriding the built-in dice
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Settings JSON file (catalog path and simulation defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output JSON file (optional)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Print debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Target {
    /// Deck set: Oathsworn or Encounter
    #[arg(short, long, default_value = "Oathsworn")]
    instance: Instance,

    /// Die color: White, Yellow, Red or Black
    #[arg(short, long)]
    color: DieColor,

    /// Faces to draw before reporting, e.g. 0 2 {2}
    #[arg(short, long, num_args = 1..)]
    draw: Vec<Face>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the statistics of one deck
    Stats {
        #[command(flatten)]
        target: Target,
    },
    /// Estimate hand score and hit chance by sampling
    Simulate {
        #[command(flatten)]
        target: Target,

        /// Cards per hand
        #[arg(long)]
        hand_size: usize,

        /// Number of hands to sample
        #[arg(short, long)]
        trials: Option<usize>,

        /// RNG seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Sample from the remaining draw pile instead of the full deck
        #[arg(long)]
        from_draw_pile: bool,

        /// Spread trials across threads
        #[arg(long)]
        parallel: bool,
    },
    /// Replay a command script (draw/reset/stats/simulate lines)
    Session {
        /// Script file path
        script: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn prepare(target: &Target, registry: &mut DeckRegistry) {
    for &face in &target.draw {
        registry.draw(target.instance, target.color, face);
    }
    for note in registry.drain_notifications() {
        info!("{}", note);
    }
}

fn print_stats(stats: &Statistics) {
    println!("=== {} {} ===", stats.instance, stats.color);
    println!("Remaining: {} (discarded {})", stats.total, stats.discarded);
    for share in &stats.composition {
        let label = if share.face.is_blank() { "blank".to_string() } else { share.face.to_string() };
        println!("  {:>5}: {:>2}  {:>5.1}%", label, share.count, share.percentage);
    }
    println!("Miss:  {:.1}% ({})", stats.miss_ratio * 100.0, stats.miss_rating);
    println!("Crit:  {:.1}% ({})", stats.crit_ratio * 100.0, stats.crit_rating);
    println!("Average hit value: {:.2}", stats.average_hit_value);
}

fn print_summary(hand_size: usize, summary: &HandSummary) {
    println!("Hands of {} over {} trials:", hand_size, summary.trials);
    println!("  Average score: {:.2}", summary.average);
    println!("  Hit chance:    {:.1}%", summary.hit_chance);
}

fn run(cli: Cli) -> dice_decks::Result<()> {
    let mut app = match &cli.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    if cli.catalog.is_some() {
        app.catalog = cli.catalog.clone();
    }

    let catalog = match &app.catalog {
        Some(path) => {
            info!("Loading catalog: {}", path.display());
            FaceCatalog::from_path(path)?
        }
        None => FaceCatalog::default(),
    };
    let mut registry = DeckRegistry::new(catalog);

    let json = match cli.command {
        Command::Stats { target } => {
            prepare(&target, &mut registry);
            let stats = registry.statistics(target.instance, target.color);
            print_stats(&stats);
            serde_json::to_value(&stats)?
        }
        Command::Simulate { target, hand_size, trials, seed, from_draw_pile, parallel } => {
            prepare(&target, &mut registry);
            let mut sim = app.sim.clone();
            if let Some(trials) = trials {
                sim.trials = trials;
            }
            if seed.is_some() {
                sim.seed = seed;
            }
            if from_draw_pile {
                sim.sample_source = SampleSource::DrawPile;
            }
            sim.parallel |= parallel;

            info!("Running {} simulations of {}-card hands...", sim.trials, hand_size);
            let start = std::time::Instant::now();
            let summary = registry.simulate_hands(target.instance, target.color, hand_size, &sim);
            info!("Completed in {:.2}s", start.elapsed().as_secs_f64());

            print_summary(hand_size, &summary);
            serde_json::to_value(&summary)?
        }
        Command::Session { script } => {
            let text = std::fs::read_to_string(&script)?;
            let commands = session::parse_script(&text)?;
            let events = session::replay(&mut registry, &commands, &app.sim);
            for event in &events {
                match event {
                    SessionEvent::Notification { message } => println!("{}", message),
                    SessionEvent::Statistics(stats) => print_stats(stats),
                    SessionEvent::Simulation { hand_size, summary, .. } => print_summary(*hand_size, summary),
                }
            }
            serde_json::to_value(&events)?
        }
    };

    if let Some(path) = cli.output {
        std::fs::write(&path, serde_json::to_string_pretty(&json)?)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
