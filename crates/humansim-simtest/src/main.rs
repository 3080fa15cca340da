//! HumanSim Headless Simulation Harness
//!
//! Runs the simulation engine in-process for a tick budget, checks world
//! invariants along the way and prints a population report.
//! No rendering, no window.
//!
//! Usage:
//!   cargo run -p humansim-simtest
//!   cargo run -p humansim-simtest -- --ticks 36000 --seed 7 --json
//!   RUST_LOG=humansim_core=debug cargo run -p humansim-simtest -- --ticks 600

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use humansim_core::prelude::*;
use log::info;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Seed used when neither the CLI nor the config file names one, so that
/// harness runs are reproducible by default
const DEFAULT_SEED: u64 = 42;

/// Ticks replayed for the determinism check
const REPLAY_TICKS: u64 = 1_200;

#[derive(Parser)]
#[command(name = "humansim-simtest")]
#[command(about = "Run the HumanSim engine headless and validate the world", version)]
struct Cli {
    /// Number of 60 Hz ticks to simulate
    #[arg(short, long, default_value_t = 36_000)]
    ticks: u64,

    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON world config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lifecycle rules (overrides the config file)
    #[arg(short, long, value_enum)]
    lifecycle: Option<LifecycleArg>,

    /// Log a progress line every N ticks (0 disables)
    #[arg(long, default_value_t = 3_600)]
    report_every: u64,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Keep running after the population dies out
    #[arg(long)]
    run_past_extinction: bool,

    /// Print passing checks too
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LifecycleArg {
    Basic,
    Aging,
}

impl From<LifecycleArg> for Lifecycle {
    fn from(arg: LifecycleArg) -> Self {
        match arg {
            LifecycleArg::Basic => Lifecycle::Basic,
            LifecycleArg::Aging => Lifecycle::Aging,
        }
    }
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Tracks one invariant across the whole run
struct Check {
    name: &'static str,
    violations: u64,
    first: Option<String>,
}

impl Check {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            violations: 0,
            first: None,
        }
    }

    fn record(&mut self, tick: u64, ok: bool, detail: impl FnOnce() -> String) {
        if ok {
            return;
        }
        self.violations += 1;
        if self.first.is_none() {
            self.first = Some(format!("tick {}: {}", tick, detail()));
        }
    }

    fn finish(self, checked: u64) -> TestResult {
        TestResult {
            name: self.name.into(),
            passed: self.violations == 0,
            detail: match self.first {
                None => format!("held for {} ticks", checked),
                Some(first) => format!("{} violations, first at {}", self.violations, first),
            },
        }
    }
}

#[derive(Default, Serialize)]
struct DeathTally {
    dehydration: u32,
    starvation: u32,
    exhaustion: u32,
    old_age: u32,
}

impl DeathTally {
    fn add(&mut self, cause: DeathCause) {
        match cause {
            DeathCause::Dehydration => self.dehydration += 1,
            DeathCause::Starvation => self.starvation += 1,
            DeathCause::Exhaustion => self.exhaustion += 1,
            DeathCause::OldAge => self.old_age += 1,
        }
    }

    fn total(&self) -> u32 {
        self.dehydration + self.starvation + self.exhaustion + self.old_age
    }
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    lifecycle: Lifecycle,
    ticks_run: u64,
    elapsed_ms: f64,
    extinct_at_tick: Option<u64>,
    peak_population: usize,
    births: u32,
    deaths: DeathTally,
    drinks: u32,
    animals_eaten: u32,
    plants_eaten: u32,
    respawns: u32,
    final_stats: PopulationStats,
    checks: Vec<TestResult>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = match &cli.config {
        Some(path) => WorldConfig::from_path(path)
            .with_context(|| format!("loading world config from {}", path.display()))?,
        None => WorldConfig::default(),
    };
    if let Some(lifecycle) = cli.lifecycle {
        config.lifecycle = lifecycle.into();
    }
    let seed = cli.seed.or(config.seed).unwrap_or(DEFAULT_SEED);
    let config = config.with_seed(seed);

    let summary = run(&config, &cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary, cli.verbose);
    }

    if summary.checks.iter().any(|c| !c.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn run(config: &WorldConfig, cli: &Cli) -> Result<RunSummary> {
    let mut engine = SimulationEngine::new(config.clone()).context("creating engine")?;
    engine.generate();

    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    let bounds = engine.bounds();
    let puddles = engine.puddle_count();

    let mut needs_check = Check::new("needs_in_range");
    let mut humans_check = Check::new("humans_in_bounds");
    let mut animals_check = Check::new("animals_in_bounds");
    let mut roster_check = Check::new("roster_only_living");
    let mut puddle_check = Check::new("puddles_never_consumed");
    let mut generation_check = Check::new("generations_positive");

    let mut summary = RunSummary {
        seed,
        lifecycle: config.lifecycle,
        ticks_run: 0,
        elapsed_ms: 0.0,
        extinct_at_tick: None,
        peak_population: engine.human_count(),
        births: 0,
        deaths: DeathTally::default(),
        drinks: 0,
        animals_eaten: 0,
        plants_eaten: 0,
        respawns: 0,
        final_stats: engine.stats(),
        checks: Vec::new(),
    };

    for _ in 0..cli.ticks {
        let report = engine.step();
        let tick = report.tick;

        summary.births += report.births;
        for cause in &report.deaths {
            summary.deaths.add(*cause);
        }
        summary.drinks += report.drinks;
        summary.animals_eaten += report.animals_eaten;
        summary.plants_eaten += report.plants_eaten;
        if report.respawned {
            summary.respawns += 1;
        }
        summary.peak_population = summary.peak_population.max(engine.human_count());

        let snapshot = engine.snapshot();
        for human in &snapshot.humans {
            let n = human.needs;
            needs_check.record(
                tick,
                [n.water, n.hunger, n.energy]
                    .iter()
                    .all(|v| (0.0..=100.0).contains(v)),
                || format!("human {} has needs {:?}", human.id, n),
            );
            humans_check.record(tick, bounds.contains(&human.position), || {
                format!("human {} at {:?}", human.id, human.position)
            });
            roster_check.record(tick, human.alive, || {
                format!("dead human {} still on roster", human.id)
            });
            generation_check.record(tick, human.generation >= 1, || {
                format!("human {} has generation {}", human.id, human.generation)
            });
        }
        for animal in &snapshot.animals {
            animals_check.record(tick, bounds.contains(animal), || {
                format!("animal at {:?}", animal)
            });
        }
        puddle_check.record(tick, snapshot.puddles.len() == puddles, || {
            format!("{} puddles, expected {}", snapshot.puddles.len(), puddles)
        });

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            let stats = engine.stats();
            info!(
                "tick {:>6}: {} humans ({} asleep, max gen {}), {} animals, {} plants",
                tick, stats.humans, stats.asleep, stats.max_generation, stats.animals, stats.plants
            );
        }

        if engine.is_extinct() && summary.extinct_at_tick.is_none() {
            summary.extinct_at_tick = Some(tick);
            if !cli.run_past_extinction {
                break;
            }
        }
    }

    summary.ticks_run = engine.tick();
    summary.elapsed_ms = engine.elapsed_ms();
    summary.final_stats = engine.stats();

    let checked = summary.ticks_run;
    summary.checks = vec![
        needs_check.finish(checked),
        humans_check.finish(checked),
        animals_check.finish(checked),
        roster_check.finish(checked),
        puddle_check.finish(checked),
        generation_check.finish(checked),
        check_deaths_balance(&summary, config),
        check_replay(config)?,
    ];

    Ok(summary)
}

/// Everyone who ever lived is either still alive or was counted as dead
fn check_deaths_balance(summary: &RunSummary, config: &WorldConfig) -> TestResult {
    let born = config.initial_humans + summary.births;
    let accounted = summary.final_stats.humans as u32 + summary.deaths.total();
    TestResult {
        name: "population_accounted".into(),
        passed: born == accounted,
        detail: format!(
            "{} started + {} born, {} alive + {} dead",
            config.initial_humans,
            summary.births,
            summary.final_stats.humans,
            summary.deaths.total()
        ),
    }
}

/// Two runs from the same seed must produce the same world
fn check_replay(config: &WorldConfig) -> Result<TestResult> {
    let replay = || -> Result<String> {
        let mut engine = SimulationEngine::new(config.clone())?;
        engine.generate();
        for _ in 0..REPLAY_TICKS {
            engine.step();
        }
        Ok(serde_json::to_string(&engine.snapshot())?)
    };

    let first = replay()?;
    let second = replay()?;
    Ok(TestResult {
        name: "deterministic_replay".into(),
        passed: first == second,
        detail: format!("{} ticks replayed from seed", REPLAY_TICKS),
    })
}

fn print_report(summary: &RunSummary, verbose: bool) {
    println!("=== HumanSim Simulation Harness ===\n");
    println!(
        "seed {} | {:?} lifecycle | {} ticks ({:.1} s simulated)",
        summary.seed,
        summary.lifecycle,
        summary.ticks_run,
        summary.elapsed_ms / 1000.0
    );
    match summary.extinct_at_tick {
        Some(tick) => println!("population extinct at tick {}", tick),
        None => println!("population survived"),
    }

    let stats = &summary.final_stats;
    println!("\n--- Population ---");
    println!("  alive:          {} ({} asleep)", stats.humans, stats.asleep);
    println!("  peak:           {}", summary.peak_population);
    println!("  max generation: {}", stats.max_generation);
    println!("  oldest:         {}", stats.oldest_age);
    println!(
        "  avg needs:      water {:.1}, hunger {:.1}, energy {:.1}",
        stats.average_water, stats.average_hunger, stats.average_energy
    );

    println!("\n--- Events ---");
    println!("  births:         {}", summary.births);
    println!(
        "  deaths:         {} (dehydration {}, starvation {}, exhaustion {}, old age {})",
        summary.deaths.total(),
        summary.deaths.dehydration,
        summary.deaths.starvation,
        summary.deaths.exhaustion,
        summary.deaths.old_age
    );
    println!("  drinks:         {}", summary.drinks);
    println!(
        "  eaten:          {} animals, {} plants",
        summary.animals_eaten, summary.plants_eaten
    );
    println!("  respawns:       {}", summary.respawns);
    println!(
        "  resources now:  {} puddles, {} plants, {} animals",
        stats.puddles, stats.plants, stats.animals
    );

    println!("\n--- Checks ---");
    let passed = summary.checks.iter().filter(|r| r.passed).count();
    let failed = summary.checks.len() - passed;
    for r in &summary.checks {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        summary.checks.len(),
        failed
    );
}
