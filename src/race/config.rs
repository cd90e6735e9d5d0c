//! Configuration options for dice race training.
//!
//! This module provides the configuration struct that fixes the game being
//! learned (die size, targets, dice range) together with the exploration
//! constant and the credit rule used by the training loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a resolved episode's outcome is written back to the count table.
///
/// Both rules index the table by the mover's decision-time position
/// (own score, opponent score, dice choice). They differ only in which
/// records of the trajectory are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreditRule {
    /// Credit every decision of the episode, the game-deciding move included.
    #[default]
    EveryDecision,

    /// Credit only decisions whose resulting scores are both still below the
    /// lower target. The final, game-deciding move is never credited.
    SkipDecisive,
}

/// Configuration for dice race training.
///
/// This struct controls:
/// - The game itself (die size, lower and upper target, maximum dice)
/// - The exploration constant used by the action selector
/// - Which decisions receive credit once an episode resolves
///
/// # Example
/// ```
/// use dice_race::race::RaceConfig;
///
/// let config = RaceConfig::new(6, 10, 12, 3, 5.0).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Number of sides on each die.
    pub n_sides: u32,

    /// Lower target: the minimum score at which a player may win.
    ///
    /// The count table is indexed only for scores strictly below this value.
    pub l_target: u32,

    /// Upper target: any score above it is an overshoot and loses.
    pub u_target: u32,

    /// Maximum number of dice a player may elect to roll (choices are `1..=n_dice`).
    pub n_dice: u32,

    /// Exploration constant `m`.
    ///
    /// Larger values push the selector towards uniform play; `0.0` is
    /// pure win-rate-proportional exploitation.
    pub exploration: f64,

    /// Which decisions are credited when an episode resolves.
    #[serde(default)]
    pub credit_rule: CreditRule,

    /// Random seed for reproducibility.
    ///
    /// If set, training is fully deterministic. If `None`, the generator is
    /// seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            n_sides: 6,
            l_target: 10,
            u_target: 12,
            n_dice: 3,
            exploration: 5.0,
            credit_rule: CreditRule::default(),
            seed: None,
        }
    }
}

impl RaceConfig {
    /// Create a configuration for the given game and exploration constant.
    pub fn new(n_sides: u32, l_target: u32, u_target: u32, n_dice: u32, exploration: f64) -> Self {
        Self {
            n_sides,
            l_target,
            u_target,
            n_dice,
            exploration,
            ..Default::default()
        }
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the credit rule.
    pub fn with_credit_rule(mut self, rule: CreditRule) -> Self {
        self.credit_rule = rule;
        self
    }

    /// Builder method: set the exploration constant.
    ///
    /// The value is not clamped; `validate` rejects negative or non-finite values.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Validate the configuration and return the first error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_sides == 0 {
            return Err(ConfigError::InvalidSides(self.n_sides));
        }
        if self.l_target == 0 {
            return Err(ConfigError::InvalidLowerTarget(self.l_target));
        }
        if self.u_target < self.l_target {
            return Err(ConfigError::InvalidUpperTarget {
                lower: self.l_target,
                upper: self.u_target,
            });
        }
        if self.n_dice == 0 {
            return Err(ConfigError::InvalidDice(self.n_dice));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::InvalidExploration(self.exploration));
        }
        Ok(())
    }
}

/// Errors that can occur when validating a race configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Die must have at least one side.
    #[error("number of sides {0} must be positive")]
    InvalidSides(u32),
    /// Lower target must be positive.
    #[error("lower target {0} must be positive")]
    InvalidLowerTarget(u32),
    /// Upper target is below the lower target.
    #[error("upper target {upper} is below lower target {lower}")]
    InvalidUpperTarget {
        /// Configured lower target.
        lower: u32,
        /// Configured upper target.
        upper: u32,
    },
    /// At least one die must be available.
    #[error("maximum dice {0} must be positive")]
    InvalidDice(u32),
    /// Exploration constant is negative or not finite.
    #[error("exploration constant {0} must be finite and non-negative")]
    InvalidExploration(f64),
}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Total number of episodes played.
    pub games: u64,

    /// Episodes won by player A (the first mover).
    pub a_wins: u64,

    /// Episodes won by player B.
    pub b_wins: u64,

    /// Total decisions (turns) taken across all episodes.
    pub decisions: u64,

    /// Decision records written back to the count table.
    pub credited: u64,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Episodes per second.
    pub games_per_second: f64,
}

impl TrainingStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update games per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.games_per_second = self.games as f64 / self.elapsed_seconds;
        }
    }

    /// Fraction of episodes won by the first mover.
    pub fn a_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.a_wins as f64 / self.games as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_scenario() {
        let config = RaceConfig::default();
        assert_eq!(config, RaceConfig::new(6, 10, 12, 3, 5.0));
        assert_eq!(config.credit_rule, CreditRule::EveryDecision);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_each_invalid_field() {
        assert_eq!(
            RaceConfig::new(0, 10, 12, 3, 5.0).validate(),
            Err(ConfigError::InvalidSides(0))
        );
        assert_eq!(
            RaceConfig::new(6, 0, 12, 3, 5.0).validate(),
            Err(ConfigError::InvalidLowerTarget(0))
        );
        assert_eq!(
            RaceConfig::new(6, 10, 9, 3, 5.0).validate(),
            Err(ConfigError::InvalidUpperTarget { lower: 10, upper: 9 })
        );
        assert_eq!(
            RaceConfig::new(6, 10, 12, 0, 5.0).validate(),
            Err(ConfigError::InvalidDice(0))
        );
        assert!(matches!(
            RaceConfig::new(6, 10, 12, 3, -1.0).validate(),
            Err(ConfigError::InvalidExploration(_))
        ));
        assert!(matches!(
            RaceConfig::default().with_exploration(f64::NAN).validate(),
            Err(ConfigError::InvalidExploration(_))
        ));
    }

    #[test]
    fn test_equal_targets_and_zero_exploration_are_valid() {
        let config = RaceConfig::new(1, 5, 5, 1, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_error_messages_name_the_value() {
        let err = RaceConfig::new(6, 10, 4, 3, 5.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "upper target 4 is below lower target 10");
    }

    #[test]
    fn test_config_json_defaults_credit_rule() {
        let json = r#"{"n_sides":6,"l_target":10,"u_target":12,"n_dice":3,"exploration":5.0,"seed":null}"#;
        let config: RaceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.credit_rule, CreditRule::EveryDecision);
    }
}
