//! Dice race self-play training.
//!
//! This module learns an empirical policy for a two-player dice race by
//! playing the game against itself and counting how each decision worked out.
//!
//! # The Game
//!
//! Two players alternate turns, A first. On each turn the mover chooses how
//! many dice to roll (`1..=D`), rolls them and adds the total to their score.
//! Landing anywhere in `[L, U]` wins; going past `U` loses. More dice close
//! the distance faster but overshoot more often.
//!
//! # Training
//!
//! 1. A [`CountTable`] holds win/lose counts per
//!    `(own score, opponent score, dice)`, all starting at one
//! 2. Each turn the [`selector`] turns the counts for the current position
//!    into a distribution over dice counts and samples one
//! 3. When the episode resolves, its outcome is credited back to the
//!    decisions in its trajectory, from each mover's own perspective
//! 4. After many episodes, [`Policy`] reads off the most-played choice per
//!    position and its win rate
//!
//! # Example
//!
//! ```
//! use dice_race::race::{train, Policy, RaceConfig};
//!
//! let config = RaceConfig::new(6, 10, 12, 3, 5.0).with_seed(1);
//! let table = train(&config, 1_000).unwrap();
//! let policy = Policy::from_table(&table);
//! println!("{}", policy.play_matrix());
//! ```

pub mod config;
pub mod dice;
pub mod episode;
pub mod policy;
pub mod selector;
pub mod table;
pub mod trainer;

// Re-export main types for convenient access
pub use config::{ConfigError, CreditRule, RaceConfig, TrainingStats};
pub use dice::{roll, Randomness, ScriptedDraws};
pub use episode::{outcome, Decision, Episode, Player};
pub use policy::{Policy, PolicyCell};
pub use table::{CountTable, Record};
pub use trainer::{train, Trainer};
