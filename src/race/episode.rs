//! One self-play episode and its credit pass.
//!
//! Player A moves on even turns, B on odd turns. Each mover picks a dice
//! count with the selector, rolls, and adds the total to their own score.
//! After every move the outcome rule is checked:
//!
//! - **A wins** if `L <= a <= U` or `b > U`
//! - **B wins** otherwise, if `L <= b <= U` or `a > U`
//!
//! A's condition is evaluated first, so A takes any position where both
//! conditions hold. No outcome means both scores are still below `L`.
//!
//! The table is only read while the episode is played; the outcome is
//! written back afterwards in one pass over the recorded trajectory.

use serde::{Deserialize, Serialize};

use crate::race::config::{CreditRule, RaceConfig};
use crate::race::dice::{self, Randomness};
use crate::race::selector;
use crate::race::table::CountTable;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The first mover.
    A,
    /// The second mover.
    B,
}

impl Player {
    /// The player who moves on `turn` (even turns belong to A).
    pub fn for_turn(turn: usize) -> Self {
        if turn % 2 == 0 {
            Player::A
        } else {
            Player::B
        }
    }

    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

/// A single decision in an episode's trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Who moved.
    pub mover: Player,
    /// Mover's score when the decision was taken.
    pub own: u32,
    /// Opponent's score when the decision was taken.
    pub opp: u32,
    /// Dice rolled.
    pub dice: u32,
    /// Scores `(a, b)` resulting from this move.
    pub after: (u64, u64),
}

/// Winner for the scores `(score_a, score_b)`, or `None` while the race is on.
pub fn outcome(config: &RaceConfig, score_a: u64, score_b: u64) -> Option<Player> {
    let upper = u64::from(config.u_target);
    let landed = u64::from(config.l_target)..=upper;
    if landed.contains(&score_a) || score_b > upper {
        Some(Player::A)
    } else if landed.contains(&score_b) || score_a > upper {
        Some(Player::B)
    } else {
        None
    }
}

/// A resolved episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Every decision in turn order.
    pub trajectory: Vec<Decision>,
    /// Final scores `(a, b)`.
    pub scores: (u64, u64),
    /// Who won.
    pub winner: Player,
}

impl Episode {
    /// Play one episode to resolution against a read-only table.
    ///
    /// The table must have been built for `config` (same lower target and
    /// dice range).
    pub fn play<R: Randomness + ?Sized>(
        config: &RaceConfig,
        table: &CountTable,
        rng: &mut R,
    ) -> Episode {
        debug_assert_eq!(table.l_target(), config.l_target);
        debug_assert_eq!(table.n_dice(), config.n_dice);

        // A move is only taken while both scores are below the lower
        // target, so decision-time scores always fit in u32.
        let mut scores = [0u64; 2];
        let mut trajectory = Vec::new();
        let mut turn = 0;

        loop {
            let mover = Player::for_turn(turn);
            let own = scores[mover.index()] as u32;
            let opp = scores[mover.opponent().index()] as u32;

            let dice = selector::select(rng, own, opp, config.exploration, table);
            scores[mover.index()] += dice::roll(rng, config.n_sides, dice);

            trajectory.push(Decision {
                mover,
                own,
                opp,
                dice,
                after: (scores[0], scores[1]),
            });
            turn += 1;

            if let Some(winner) = outcome(config, scores[0], scores[1]) {
                log::trace!(
                    "episode resolved after {} turns: {:?} wins at ({}, {})",
                    turn,
                    winner,
                    scores[0],
                    scores[1]
                );
                return Episode {
                    trajectory,
                    scores: (scores[0], scores[1]),
                    winner,
                };
            }
        }
    }

    /// Number of turns played.
    pub fn turns(&self) -> usize {
        self.trajectory.len()
    }

    /// Write this episode's outcome back to the table.
    ///
    /// Each eligible decision adds a win to the mover's cell if the mover
    /// won the episode, a loss otherwise. Returns the number of records
    /// written.
    pub fn credit(&self, rule: CreditRule, table: &mut CountTable) -> usize {
        let l = table.l_target();
        let below = u64::from(l);
        let mut credited = 0;

        for decision in &self.trajectory {
            let eligible = match rule {
                CreditRule::EveryDecision => decision.own < l && decision.opp < l,
                CreditRule::SkipDecisive => decision.after.0 < below && decision.after.1 < below,
            };
            if !eligible {
                continue;
            }

            let written = if decision.mover == self.winner {
                table.record_win(decision.own, decision.opp, decision.dice)
            } else {
                table.record_loss(decision.own, decision.opp, decision.dice)
            };
            if written {
                credited += 1;
            }
        }

        credited
    }
}
