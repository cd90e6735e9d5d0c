//! Storage for win and lose counts.
//!
//! The table is dense: one [`Record`] for every `(own score, opponent score,
//! dice choice)` with both scores strictly below the lower target. Every
//! record starts at one win and one loss (add-one prior), so win rates are
//! always defined.

use serde::{Deserialize, Serialize};

/// Win and lose counts for one decision cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Episodes this decision went on to win (plus the prior).
    pub wins: u64,
    /// Episodes this decision went on to lose (plus the prior).
    pub losses: u64,
}

impl Default for Record {
    fn default() -> Self {
        Self { wins: 1, losses: 1 }
    }
}

impl Record {
    /// Total evidence behind this record, prior included.
    pub fn total(&self) -> u64 {
        self.wins + self.losses
    }

    /// Empirical win rate `wins / (wins + losses)`.
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.total() as f64
    }
}

/// Three-dimensional counter store indexed by
/// `(own score, opponent score, dice choice)`.
///
/// Scores range over `0..l_target`, dice choices over `1..=n_dice`.
/// Counts never decrease and never drop below the prior of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    l_target: u32,
    n_dice: u32,
    records: Vec<Record>,
}

impl CountTable {
    /// Create a table with every cell at the add-one prior.
    pub fn new(l_target: u32, n_dice: u32) -> Self {
        let cells = l_target as usize * l_target as usize * n_dice as usize;
        Self {
            l_target,
            n_dice,
            records: vec![Record::default(); cells],
        }
    }

    /// Lower target the table was built for.
    pub fn l_target(&self) -> u32 {
        self.l_target
    }

    /// Number of dice choices per score pair.
    pub fn n_dice(&self) -> u32 {
        self.n_dice
    }

    fn offset(&self, own: u32, opp: u32) -> usize {
        (own as usize * self.l_target as usize + opp as usize) * self.n_dice as usize
    }

    fn index(&self, own: u32, opp: u32, dice: u32) -> Option<usize> {
        if own >= self.l_target || opp >= self.l_target || dice == 0 || dice > self.n_dice {
            return None;
        }
        Some(self.offset(own, opp) + (dice - 1) as usize)
    }

    /// Record at a cell, or `None` outside the indexed range.
    pub fn get(&self, own: u32, opp: u32, dice: u32) -> Option<Record> {
        self.index(own, opp, dice).map(|i| self.records[i])
    }

    /// All dice-choice records for one score pair, ordered by dice count.
    ///
    /// # Panics
    /// Panics if either score is not below the lower target.
    pub fn slice(&self, own: u32, opp: u32) -> &[Record] {
        assert!(
            own < self.l_target && opp < self.l_target,
            "score pair ({}, {}) is outside the table (lower target {})",
            own,
            opp,
            self.l_target
        );
        let start = self.offset(own, opp);
        &self.records[start..start + self.n_dice as usize]
    }

    /// Sum of wins and losses over every cell, priors included.
    pub fn total_records(&self) -> u64 {
        self.records.iter().map(Record::total).sum()
    }

    /// Iterate over `(own, opp, dice, record)` for every cell.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, u32, Record)> + '_ {
        // Decompose in usize; each coordinate fits u32 but the flat index may not.
        let l = self.l_target as usize;
        let d = self.n_dice as usize;
        self.records.iter().enumerate().map(move |(i, r)| {
            let own = i / (l * d);
            let opp = (i / d) % l;
            let dice = i % d + 1;
            (own as u32, opp as u32, dice as u32, *r)
        })
    }

    pub(crate) fn record_win(&mut self, own: u32, opp: u32, dice: u32) -> bool {
        match self.index(own, opp, dice) {
            Some(i) => {
                self.records[i].wins += 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn record_loss(&mut self, own: u32, opp: u32, dice: u32) -> bool {
        match self.index(own, opp, dice) {
            Some(i) => {
                self.records[i].losses += 1;
                true
            }
            None => false,
        }
    }
}
