//! # Dice Race
//!
//! Self-play estimation of an empirical optimal policy for a two-player
//! dice race: each turn a player chooses how many dice to roll, trading
//! speed against the risk of overshooting the target window.
//!
//! ## Features
//!
//! - **Adaptive Selection**: Evidence-weighted blend of exploiting the best
//!   known dice count and exploring the alternatives
//! - **Trajectory Credit**: Each resolved episode is credited back to every
//!   decision from the mover's own perspective
//! - **Deterministic Runs**: Seeded training reproduces identical tables
//! - **Policy Extraction**: Recommended play and win rate per score pair
//!
//! ## Quick Start
//!
//! ```ignore
//! use dice_race::{train, Policy, RaceConfig};
//!
//! // 1. Describe the game: 6-sided dice, win on 10..=12, roll up to 3 dice
//! let config = RaceConfig::new(6, 10, 12, 3, 5.0);
//!
//! // 2. Train
//! let table = train(&config, 10_000)?;
//!
//! // 3. Read off the policy
//! let policy = Policy::from_table(&table);
//! println!("{}", policy.play_matrix());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Trainer                           │
//! │  - owns the CountTable and the RNG                       │
//! └──────────────────────────────────────────────────────────┘
//!                  │ plays                    ▲ credits
//!                  ▼                          │
//!         ┌─────────────────┐        ┌─────────────────┐
//!         │     Episode     │───────▶│   CountTable    │
//!         │  (trajectory)   │ reads  │  wins / losses  │
//!         └─────────────────┘        └─────────────────┘
//!             │         │                     │
//!             ▼         ▼                     ▼
//!        ┌────────┐ ┌──────────┐        ┌──────────┐
//!        │  dice  │ │ selector │        │  Policy  │
//!        └────────┘ └──────────┘        └──────────┘
//! ```

#![warn(missing_docs)]

/// Dice race training module.
///
/// Contains the game rules, the count table, the action selector and the
/// self-play trainer.
pub mod race;

// Re-export commonly used types at crate root for convenience
pub use race::{
    train, ConfigError, CountTable, CreditRule, Player, Policy, RaceConfig, Record, Trainer,
    TrainingStats,
};
