//! Recommended play extracted from a trained count table.
//!
//! For every score pair the recommended dice count is the one with the most
//! evidence (`wins + losses`), which under self-play is the one the
//! selector has been choosing most. Ties go to the fewest dice.

use serde::{Deserialize, Serialize};

use crate::race::table::{CountTable, Record};

/// Recommended play for one score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCell {
    /// Dice to roll.
    pub dice: u32,
    /// Wins recorded for that choice.
    pub wins: u64,
    /// Losses recorded for that choice.
    pub losses: u64,
}

impl PolicyCell {
    /// Estimated probability of winning with the recommended play.
    pub fn win_rate(&self) -> f64 {
        Record {
            wins: self.wins,
            losses: self.losses,
        }
        .win_rate()
    }
}

/// Recommended play for every score pair below the lower target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Lower target; the grid is `l_target × l_target`.
    pub l_target: u32,
    /// Rows indexed by own score, columns by opponent score.
    pub grid: Vec<Vec<PolicyCell>>,
}

impl Policy {
    /// Derive the policy from raw counts.
    pub fn from_table(table: &CountTable) -> Self {
        let l = table.l_target();
        let grid = (0..l)
            .map(|own| (0..l).map(|opp| most_evidenced(table.slice(own, opp))).collect())
            .collect();
        Self { l_target: l, grid }
    }

    /// Recommended play from `own` against `opp`.
    ///
    /// # Panics
    /// Panics if either score is not below the lower target.
    pub fn cell(&self, own: u32, opp: u32) -> PolicyCell {
        self.grid[own as usize][opp as usize]
    }

    /// Dice counts as a tab-separated grid, one row per own score.
    pub fn play_matrix(&self) -> String {
        self.render(|cell| cell.dice.to_string())
    }

    /// Win rates of the recommended play as a tab-separated grid.
    pub fn probability_matrix(&self) -> String {
        self.render(|cell| format!("{:.5}", cell.win_rate()))
    }

    fn render<F>(&self, format_cell: F) -> String
    where
        F: Fn(&PolicyCell) -> String,
    {
        let mut out = String::new();
        for row in &self.grid {
            for cell in row {
                out.push_str(&format_cell(cell));
                out.push('\t');
            }
            out.push('\n');
        }
        out
    }
}

fn most_evidenced(records: &[Record]) -> PolicyCell {
    let mut best = 0;
    for (i, record) in records.iter().enumerate() {
        if record.total() > records[best].total() {
            best = i;
        }
    }
    PolicyCell {
        dice: best as u32 + 1,
        wins: records[best].wins,
        losses: records[best].losses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_table_recommends_one_die() {
        let policy = Policy::from_table(&CountTable::new(3, 4));
        assert_eq!(policy.grid.len(), 3);
        for own in 0..3 {
            for opp in 0..3 {
                let cell = policy.cell(own, opp);
                assert_eq!(cell, PolicyCell { dice: 1, wins: 1, losses: 1 });
                assert!((cell.win_rate() - 0.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_most_evidence_wins_over_best_rate() {
        let mut table = CountTable::new(2, 3);
        // Choice 2 has more evidence, choice 3 a better rate.
        for _ in 0..5 {
            table.record_loss(1, 0, 2);
        }
        table.record_win(1, 0, 3);
        table.record_win(1, 0, 3);

        let cell = Policy::from_table(&table).cell(1, 0);
        assert_eq!(cell, PolicyCell { dice: 2, wins: 1, losses: 6 });
    }

    #[test]
    fn test_evidence_ties_go_to_fewest_dice() {
        let mut table = CountTable::new(2, 3);
        table.record_win(0, 1, 2);
        table.record_loss(0, 1, 3);
        assert_eq!(Policy::from_table(&table).cell(0, 1).dice, 2);
    }

    #[test]
    fn test_matrices_render_rows_and_columns() {
        let mut table = CountTable::new(2, 2);
        table.record_win(0, 1, 2);
        table.record_win(0, 1, 2);
        let policy = Policy::from_table(&table);

        assert_eq!(policy.play_matrix(), "1\t2\t\n1\t1\t\n");
        assert_eq!(
            policy.probability_matrix(),
            "0.50000\t0.75000\t\n0.50000\t0.50000\t\n"
        );
    }

    #[test]
    fn test_policy_serializes_counts() {
        let policy = Policy::from_table(&CountTable::new(1, 1));
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, r#"{"l_target":1,"grid":[[{"dice":1,"wins":1,"losses":1}]]}"#);
    }
}
