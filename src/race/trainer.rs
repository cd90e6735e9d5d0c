//! Self-play training loop.
//!
//! The trainer owns one count table and one random number generator and
//! plays episodes against itself, one after another. Each episode reads the
//! table while it is played and writes its outcome back only once it has
//! resolved, so no episode observes its own updates.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::race::config::{ConfigError, RaceConfig, TrainingStats};
use crate::race::episode::{Episode, Player};
use crate::race::table::CountTable;

/// Runs self-play episodes against a shared count table.
///
/// # Example
/// ```
/// use dice_race::race::{RaceConfig, Trainer};
///
/// let config = RaceConfig::new(6, 10, 12, 3, 5.0).with_seed(42);
/// let mut trainer = Trainer::new(config).unwrap();
/// let stats = trainer.train(500);
/// assert_eq!(stats.games, 500);
/// ```
#[derive(Debug)]
pub struct Trainer {
    /// Validated configuration.
    config: RaceConfig,

    /// Win/lose counts learned so far.
    table: CountTable,

    /// Statistics tracking.
    stats: TrainingStats,

    /// Random number generator.
    rng: StdRng,
}

impl Trainer {
    /// Create a trainer with a fresh table at the add-one prior.
    ///
    /// Fails before anything is allocated if the configuration is invalid.
    pub fn new(config: RaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            table: CountTable::new(config.l_target, config.n_dice),
            config,
            stats: TrainingStats::new(),
            rng,
        })
    }

    /// Play one episode, credit its outcome, and return the winner.
    pub fn run_episode(&mut self) -> Player {
        let episode = Episode::play(&self.config, &self.table, &mut self.rng);
        let credited = episode.credit(self.config.credit_rule, &mut self.table);

        self.stats.games += 1;
        self.stats.decisions += episode.turns() as u64;
        self.stats.credited += credited as u64;
        match episode.winner {
            Player::A => self.stats.a_wins += 1,
            Player::B => self.stats.b_wins += 1,
        }

        episode.winner
    }

    /// Train for a number of episodes.
    ///
    /// # Returns
    /// Cumulative statistics, including earlier calls.
    pub fn train(&mut self, n_games: u64) -> &TrainingStats {
        self.train_with_callback(n_games, 0, |_| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `n_games` - Number of episodes to play
    /// * `callback_interval` - How often to call the callback (0 disables it)
    /// * `callback` - Function called every `callback_interval` episodes
    pub fn train_with_callback<F>(
        &mut self,
        n_games: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &TrainingStats
    where
        F: FnMut(&TrainingStats),
    {
        log::debug!(
            "training {} games (sides={}, targets={}..={}, dice=1..={}, m={}, credit={:?})",
            n_games,
            self.config.n_sides,
            self.config.l_target,
            self.config.u_target,
            self.config.n_dice,
            self.config.exploration,
            self.config.credit_rule,
        );

        let start_time = Instant::now();
        let elapsed_before = self.stats.elapsed_seconds;

        for i in 0..n_games {
            self.run_episode();

            if callback_interval > 0 && (i + 1) % callback_interval == 0 {
                self.stats.elapsed_seconds = elapsed_before + start_time.elapsed().as_secs_f64();
                self.stats.update_rate();
                callback(&self.stats);
            }
        }

        self.stats.elapsed_seconds = elapsed_before + start_time.elapsed().as_secs_f64();
        self.stats.update_rate();

        log::info!(
            "trained {} games in {:.2}s ({:.0} games/s), first mover won {:.1}%",
            self.stats.games,
            self.stats.elapsed_seconds,
            self.stats.games_per_second,
            self.stats.a_win_rate() * 100.0,
        );

        &self.stats
    }

    /// Get reference to the count table.
    pub fn table(&self) -> &CountTable {
        &self.table
    }

    /// Consume the trainer and keep the table.
    pub fn into_table(self) -> CountTable {
        self.table
    }

    /// Get current statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }
}

/// Train a fresh table for `n_games` episodes.
///
/// This is the one-call entry point: validate, train, hand back the counts.
pub fn train(config: &RaceConfig, n_games: u64) -> Result<CountTable, ConfigError> {
    let mut trainer = Trainer::new(config.clone())?;
    trainer.train(n_games);
    Ok(trainer.into_table())
}
