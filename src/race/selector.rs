//! Adaptive action selection.
//!
//! Given the records for one score pair, the selector blends "roll the
//! best-known number of dice" with "try something else", weighting the
//! blend by how much evidence the table holds for that position:
//!
//! ```text
//! f[i]  = wins[i] / (wins[i] + losses[i])
//! T     = sum(wins[i] + losses[i])
//! p*    = (T f[i*] + m) / (T f[i*] + m D)                          best choice i*
//! p[i]  = (1 - p*) (T f[i] + m) / (T sum_{j != i*} f[j] + m (D - 1))   others
//! q     = softmax(p)
//! ```
//!
//! The softmax is a corrective normalization, not a temperature: it makes
//! `q` a proper distribution and pulls it towards uniform.

use crate::race::dice::Randomness;
use crate::race::table::{CountTable, Record};

/// Index of the first record with the highest win rate.
pub fn best_choice(records: &[Record]) -> usize {
    let mut best = 0;
    let mut best_rate = f64::NEG_INFINITY;
    for (i, record) in records.iter().enumerate() {
        let rate = record.win_rate();
        if rate > best_rate {
            best = i;
            best_rate = rate;
        }
    }
    best
}

/// Raw exploit/explore blend for one score pair, before normalization.
///
/// Entry `i` is the weight of rolling `i + 1` dice. The weights do not in
/// general sum to one.
pub fn blend_weights(records: &[Record], exploration: f64) -> Vec<f64> {
    let d = records.len() as f64;
    let rates: Vec<f64> = records.iter().map(Record::win_rate).collect();
    let total = records.iter().map(Record::total).sum::<u64>() as f64;
    let best = best_choice(records);

    let best_evidence = total * rates[best];
    let p_best = (best_evidence + exploration) / (best_evidence + exploration * d);

    let others: f64 = rates
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != best)
        .map(|(_, &f)| f)
        .sum();
    let others_denominator = total * others + exploration * (d - 1.0);

    rates
        .iter()
        .enumerate()
        .map(|(i, &f)| {
            if i == best {
                p_best
            } else {
                (1.0 - p_best) * (total * f + exploration) / others_denominator
            }
        })
        .collect()
}

/// Probability of choosing each dice count for one score pair.
///
/// Entry `i` is the probability of rolling `i + 1` dice; the entries sum to one.
pub fn choice_distribution(records: &[Record], exploration: f64) -> Vec<f64> {
    let exp: Vec<f64> = blend_weights(records, exploration)
        .into_iter()
        .map(f64::exp)
        .collect();
    let sum: f64 = exp.iter().sum();
    exp.into_iter().map(|x| x / sum).collect()
}

/// Sample an index according to a probability distribution.
pub fn sample_index<R: Randomness + ?Sized>(rng: &mut R, distribution: &[f64]) -> usize {
    let r = rng.unit();
    let mut cumsum = 0.0;

    for (i, &prob) in distribution.iter().enumerate() {
        cumsum += prob;
        if r < cumsum {
            return i;
        }
    }

    // Floating point shortfall
    distribution.len() - 1
}

/// Choose how many dice to roll from `own` against `opp`.
///
/// Returns a dice count in `1..=table.n_dice()`.
pub fn select<R: Randomness + ?Sized>(
    rng: &mut R,
    own: u32,
    opp: u32,
    exploration: f64,
    table: &CountTable,
) -> u32 {
    let distribution = choice_distribution(table.slice(own, opp), exploration);
    sample_index(rng, &distribution) as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rec(wins: u64, losses: u64) -> Record {
        Record { wins, losses }
    }

    fn assert_sums_to_one(dist: &[f64]) {
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "distribution sums to {}", sum);
    }

    #[test]
    fn test_best_choice_ties_go_to_lowest() {
        assert_eq!(best_choice(&[rec(1, 1), rec(1, 1), rec(1, 1)]), 0);
        assert_eq!(best_choice(&[rec(1, 3), rec(2, 2), rec(4, 4)]), 1);
        assert_eq!(best_choice(&[rec(1, 3), rec(2, 2), rec(9, 1)]), 2);
    }

    #[test]
    fn test_blend_matches_hand_computation() {
        // f = [0.5, 0.75, 0.25], T = 4 + 4 + 4 = 12, best = 1, m = 2
        let records = [rec(2, 2), rec(3, 1), rec(1, 3)];
        let weights = blend_weights(&records, 2.0);

        let p_best = (12.0 * 0.75 + 2.0) / (12.0 * 0.75 + 2.0 * 3.0);
        let denom = 12.0 * (0.5 + 0.25) + 2.0 * 2.0;
        let p0 = (1.0 - p_best) * (12.0 * 0.5 + 2.0) / denom;
        let p2 = (1.0 - p_best) * (12.0 * 0.25 + 2.0) / denom;

        assert!((weights[1] - p_best).abs() < 1e-12);
        assert!((weights[0] - p0).abs() < 1e-12);
        assert!((weights[2] - p2).abs() < 1e-12);
    }

    #[test]
    fn test_distribution_is_softmax_of_blend() {
        let records = [rec(5, 2), rec(1, 7), rec(3, 3)];
        let weights = blend_weights(&records, 1.5);
        let dist = choice_distribution(&records, 1.5);
        let z: f64 = weights.iter().map(|w| w.exp()).sum();
        for (w, q) in weights.iter().zip(dist.iter()) {
            assert!((w.exp() / z - q).abs() < 1e-12);
        }
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let slices: [&[Record]; 5] = [
            &[rec(1, 1)],
            &[rec(1, 1), rec(1, 1)],
            &[rec(10, 3), rec(2, 40), rec(7, 7)],
            &[rec(1000, 1), rec(1, 1000), rec(500, 500), rec(3, 2)],
            &[rec(1, 1), rec(1, 1), rec(1, 1), rec(1, 1), rec(1, 1), rec(1, 1)],
        ];
        for records in slices {
            for m in [0.0, 0.5, 5.0, 1e6] {
                assert_sums_to_one(&choice_distribution(records, m));
            }
        }
    }

    #[test]
    fn test_single_choice_is_certain() {
        assert_eq!(blend_weights(&[rec(3, 9)], 5.0), vec![1.0]);
        assert_eq!(choice_distribution(&[rec(3, 9)], 5.0), vec![1.0]);
    }

    #[test]
    fn test_huge_exploration_approaches_uniform() {
        let records = [rec(900, 10), rec(10, 900), rec(400, 400)];
        let dist = choice_distribution(&records, 1e9);
        for q in dist {
            assert!((q - 1.0 / 3.0).abs() < 1e-6, "{} is not uniform", q);
        }
    }

    #[test]
    fn test_zero_exploration_fully_exploits_dominant_choice() {
        // The raw blend puts all weight on a strictly dominant choice.
        let records = [rec(2, 50), rec(80, 5), rec(3, 40)];
        let weights = blend_weights(&records, 0.0);
        assert!((weights[1] - 1.0).abs() < 1e-12);
        assert!(weights[0].abs() < 1e-12 && weights[2].abs() < 1e-12);

        // After the softmax the dominant choice keeps the largest share the
        // normalization allows: e / (e + D - 1).
        let dist = choice_distribution(&records, 0.0);
        let e = std::f64::consts::E;
        assert!((dist[1] - e / (e + 2.0)).abs() < 1e-12);
        assert!(dist[1] > dist[0] && dist[1] > dist[2]);
    }

    #[test]
    fn test_exploitation_sharpens_with_evidence() {
        let thin = [rec(2, 1), rec(1, 2), rec(1, 2)];
        let thick = [rec(2000, 1000), rec(1000, 2000), rec(1000, 2000)];
        let thin_best = blend_weights(&thin, 5.0)[0];
        let thick_best = blend_weights(&thick, 5.0)[0];
        assert!(thick_best > thin_best);
        assert!(thick_best > 0.99);
    }

    #[test]
    fn test_blend_with_tied_best_rates() {
        // f = [0.75, 0.75, 0.25], T = 12, best = 0 (lowest index), m = 2.
        // The tied runner-up stays in the others denominator.
        let records = [rec(3, 1), rec(3, 1), rec(1, 3)];
        let weights = blend_weights(&records, 2.0);

        let p_best: f64 = (12.0 * 0.75 + 2.0) / (12.0 * 0.75 + 2.0 * 3.0);
        assert!((p_best - 11.0 / 15.0).abs() < 1e-12);
        let denom = 12.0 * (0.75 + 0.25) + 2.0 * 2.0;
        let expected = [
            p_best,
            (1.0 - p_best) * (12.0 * 0.75 + 2.0) / denom,
            (1.0 - p_best) * (12.0 * 0.25 + 2.0) / denom,
        ];
        for (w, e) in weights.iter().zip(expected) {
            assert!((w - e).abs() < 1e-12, "{} != {}", w, e);
        }

        // Excluding every maximal rate would shrink the denominator to 7.
        let value_excluded = (1.0 - p_best) * (12.0 * 0.75 + 2.0) / (12.0 * 0.25 + 2.0 * 2.0);
        assert!((weights[1] - value_excluded).abs() > 1e-3);
        assert!(weights[0] > weights[1] && weights[1] > weights[2]);
    }

    #[test]
    fn test_sample_index_walks_cumulative_mass() {
        struct Fixed(f64);
        impl Randomness for Fixed {
            fn roll_die(&mut self, _n_sides: u32) -> u32 {
                1
            }
            fn unit(&mut self) -> f64 {
                self.0
            }
        }

        let dist = [0.2, 0.5, 0.3];
        assert_eq!(sample_index(&mut Fixed(0.0), &dist), 0);
        assert_eq!(sample_index(&mut Fixed(0.19), &dist), 0);
        assert_eq!(sample_index(&mut Fixed(0.2), &dist), 1);
        assert_eq!(sample_index(&mut Fixed(0.69), &dist), 1);
        assert_eq!(sample_index(&mut Fixed(0.71), &dist), 2);
        // Mass that falls short of one still lands on the last choice.
        assert_eq!(sample_index(&mut Fixed(0.999), &[0.2, 0.5, 0.29]), 2);
    }

    #[test]
    fn test_select_empirical_frequencies_follow_distribution() {
        let mut table = CountTable::new(3, 3);
        for _ in 0..200 {
            table.record_win(1, 2, 2);
            table.record_loss(1, 2, 3);
        }
        let expected = choice_distribution(table.slice(1, 2), 1.0);

        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 3];
        let draws = 60_000;
        for _ in 0..draws {
            let dice = select(&mut rng, 1, 2, 1.0, &table);
            assert!((1..=3).contains(&dice));
            counts[(dice - 1) as usize] += 1;
        }
        for (count, p) in counts.iter().zip(expected.iter()) {
            let observed = *count as f64 / draws as f64;
            assert!((observed - p).abs() < 0.01, "observed {} expected {}", observed, p);
        }
    }
}
