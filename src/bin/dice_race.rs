//! Dice race trainer.
//!
//! Trains a policy by self-play and prints the recommended number of dice
//! and its estimated win probability for every score pair.
//!
//! ```text
//! dice_race <n_sides> <l_target> <u_target> <n_dice> <m> <n_games> [--seed N] [--skip-decisive] [--json]
//! ```

use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use dice_race::race::{CreditRule, Policy, RaceConfig, Trainer, TrainingStats};

/// Learn how many dice to roll in a two-player dice race.
#[derive(Debug, Parser)]
#[command(name = "dice_race", version, about)]
struct Cli {
    /// Number of sides on each die.
    n_sides: u32,

    /// Lower target score (minimum winning score).
    l_target: u32,

    /// Upper target score (anything above it overshoots).
    u_target: u32,

    /// Maximum number of dice per roll.
    n_dice: u32,

    /// Exploration constant.
    m: f64,

    /// Number of self-play games.
    n_games: u64,

    /// Seed for reproducible training.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not credit the game-deciding move of each episode.
    #[arg(long)]
    skip_decisive: bool,

    /// Print the result as JSON instead of text matrices.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a RaceConfig,
    stats: &'a TrainingStats,
    policy: &'a Policy,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = RaceConfig::new(cli.n_sides, cli.l_target, cli.u_target, cli.n_dice, cli.m);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.skip_decisive {
        config = config.with_credit_rule(CreditRule::SkipDecisive);
    }

    let mut trainer = match Trainer::new(config) {
        Ok(trainer) => trainer,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let progress = ProgressBar::new(cli.n_games);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let interval = (cli.n_games / 100).max(1);
    trainer.train_with_callback(cli.n_games, interval, |stats| progress.set_position(stats.games));
    progress.finish_and_clear();

    let policy = Policy::from_table(trainer.table());

    if cli.json {
        let report = Report {
            config: trainer.config(),
            stats: trainer.stats(),
            policy: &policy,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("n_sides = {}", cli.n_sides);
    println!("l_target = {}", cli.l_target);
    println!("u_target = {}", cli.u_target);
    println!("n_dice = {}", cli.n_dice);
    println!("m = {}", cli.m);
    println!("n_games = {}", cli.n_games);
    println!();

    println!("Play = ");
    print!("{}", policy.play_matrix());
    println!();

    println!("Probability = ");
    print!("{}", policy.probability_matrix());

    ExitCode::SUCCESS
}
