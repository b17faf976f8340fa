//! Shuffled-sequence baseline for motif counts.
//!
//! The real collection is scanned once, then `trials` shuffled copies of it are
//! scanned in turn. All trials draw from one random source in trial order, so
//! a fixed seed reproduces the whole run.

use crate::metrics::{build_comparison, count_matches_by_motif, ComparisonEntry};
use crate::randomize::shuffle_collection;
use crate::types::{Match, MotifCounts, SequenceCollection, TrialCountTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Real counts, per-trial randomized counts and their comparison
#[derive(Debug, Clone)]
pub struct BaselineResult {
    /// Number of shuffled trials run, even when no motif matched in any of them
    pub trials: usize,
    pub real_counts: MotifCounts,
    /// Every list holds exactly one count per trial, zero where the motif was absent
    pub random_counts: TrialCountTable,
    pub comparison: BTreeMap<String, ComparisonEntry>,
}

impl BaselineResult {
    pub fn trials(&self) -> usize {
        self.trials
    }
}

/// Runs the baseline with a `StdRng` seeded from `seed`, or from OS entropy
/// when no seed is given.
///
/// # Arguments
/// * `sequences` - Real sequences, identifier → sequence
/// * `scan` - Produces the matches for a collection; must depend only on its input
/// * `trials` - Number of shuffled collections to scan, zero is allowed
/// * `seed` - Seed for reproducible runs
pub fn run_baseline<F>(
    sequences: &SequenceCollection,
    scan: F,
    trials: usize,
    seed: Option<u64>,
) -> BaselineResult
where
    F: Fn(&SequenceCollection) -> Vec<Match>,
{
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_baseline_with_rng(sequences, scan, trials, &mut rng)
}

/// Runs the baseline drawing every shuffle from the caller's source.
pub fn run_baseline_with_rng<F, R>(
    sequences: &SequenceCollection,
    scan: F,
    trials: usize,
    rng: &mut R,
) -> BaselineResult
where
    F: Fn(&SequenceCollection) -> Vec<Match>,
    R: Rng + ?Sized,
{
    let real_counts = count_matches_by_motif(&scan(sequences));

    let mut random_counts: TrialCountTable = real_counts
        .keys()
        .map(|motif| (motif.clone(), Vec::with_capacity(trials)))
        .collect();

    for trial in 0..trials {
        let randomized = shuffle_collection(sequences, &mut *rng);
        let trial_counts = count_matches_by_motif(&scan(&randomized));

        // motifs first seen in this trial were absent from every earlier one
        for motif in trial_counts.keys() {
            if !random_counts.contains_key(motif) {
                let mut counts = Vec::with_capacity(trials);
                counts.resize(trial, 0);
                random_counts.insert(motif.clone(), counts);
            }
        }

        for (motif, counts) in random_counts.iter_mut() {
            counts.push(trial_counts.get(motif).copied().unwrap_or(0));
        }

        tracing::debug!(
            trial = trial + 1,
            trials,
            motifs = trial_counts.len(),
            matches = trial_counts.values().sum::<usize>(),
            "baseline trial done"
        );
    }

    let comparison = build_comparison(&real_counts, &random_counts);

    tracing::info!(
        trials,
        motifs = comparison.len(),
        "baseline complete"
    );

    BaselineResult {
        trials,
        real_counts,
        random_counts,
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Lift;
    use crate::types::Strand;
    use std::cell::Cell;

    /// Every 'A' is a match of motif "A"
    fn scan_count_a(sequences: &SequenceCollection) -> Vec<Match> {
        sequences
            .iter()
            .flat_map(|(seq_id, seq)| {
                seq.char_indices()
                    .filter(|(_, c)| *c == 'A')
                    .map(move |(i, _)| Match {
                        seq_id: seq_id.clone(),
                        motif: "A".to_string(),
                        start: i + 1,
                        end: i + 1,
                        matched_text: "A".to_string(),
                        strand: Strand::Forward,
                    })
            })
            .collect()
    }

    fn collection(entries: &[(&str, &str)]) -> SequenceCollection {
        entries
            .iter()
            .map(|(id, seq)| (id.to_string(), seq.to_string()))
            .collect()
    }

    #[test]
    fn test_composition_is_preserved_across_trials() {
        let sequences = collection(&[("s1", "AAAA"), ("s2", "CCCC")]);
        let result = run_baseline(&sequences, scan_count_a, 5, Some(1));

        assert_eq!(result.real_counts["A"], 4);
        assert_eq!(result.random_counts["A"], vec![4, 4, 4, 4, 4]);
        assert_eq!(result.trials(), 5);

        let comp = &result.comparison["A"];
        assert_eq!(comp.mean_random, 4.0);
        assert_eq!(comp.std_random, 0.0);
        assert_eq!(comp.lift, Lift::Ratio(1.0));
    }

    #[test]
    fn test_zero_trials() {
        let sequences = collection(&[("s1", "AACA")]);
        let result = run_baseline(&sequences, scan_count_a, 0, None);

        assert_eq!(result.real_counts["A"], 3);
        assert!(result.random_counts["A"].is_empty());
        let comp = &result.comparison["A"];
        assert_eq!((comp.mean_random, comp.std_random), (0.0, 0.0));
        assert_eq!((comp.min_random, comp.max_random), (0, 0));
        assert_eq!(comp.lift, Lift::Infinite);
    }

    #[test]
    fn test_trials_reported_without_matches() {
        let sequences = collection(&[("s1", "CCCC")]);
        let result = run_baseline(&sequences, scan_count_a, 5, Some(1));

        assert_eq!(result.trials(), 5);
        assert!(result.random_counts.is_empty());
        assert!(result.comparison.is_empty());
    }

    #[test]
    fn test_late_motifs_are_zero_filled() {
        // the real sequence never contains "CA"; almost every shuffle does
        let scan_ac = |sequences: &SequenceCollection| -> Vec<Match> {
            sequences
                .iter()
                .flat_map(|(seq_id, seq)| {
                    seq.match_indices("CA").map(move |(i, text)| Match {
                        seq_id: seq_id.clone(),
                        motif: "CA".to_string(),
                        start: i + 1,
                        end: i + 2,
                        matched_text: text.to_string(),
                        strand: Strand::Forward,
                    })
                })
                .collect()
        };

        let sequences = collection(&[("s1", "AAAAAACCCCCC")]);
        let result = run_baseline(&sequences, scan_ac, 20, Some(7));

        assert_eq!(result.real_counts.get("CA"), None);
        let counts = &result.random_counts["CA"];
        assert_eq!(counts.len(), 20);
        assert!(counts.iter().any(|&c| c > 0));
        assert_eq!(result.comparison["CA"].real_count, 0);
        assert_eq!(result.comparison["CA"].lift, Lift::Ratio(0.0));
    }

    #[test]
    fn test_motif_first_seen_mid_run() {
        let calls = Cell::new(0usize);
        // call 0 is the real scan; "late" shows up from trial 2 onwards
        let scan = |sequences: &SequenceCollection| -> Vec<Match> {
            let call = calls.get();
            calls.set(call + 1);
            let mut matches = scan_count_a(sequences);
            if call >= 2 {
                matches.push(Match {
                    seq_id: "s1".to_string(),
                    motif: "late".to_string(),
                    start: 1,
                    end: 1,
                    matched_text: "A".to_string(),
                    strand: Strand::Forward,
                });
            }
            matches
        };

        let sequences = collection(&[("s1", "ACAC")]);
        let result = run_baseline(&sequences, scan, 3, Some(3));

        assert_eq!(result.random_counts["A"], vec![2, 2, 2]);
        assert_eq!(result.random_counts["late"], vec![0, 1, 1]);
        let late = &result.comparison["late"];
        assert_eq!(late.real_count, 0);
        assert_eq!((late.min_random, late.max_random), (0, 1));
    }

    #[test]
    fn test_same_seed_same_result() {
        let sequences = collection(&[("s1", "ACGTACGTAAGG"), ("s2", "TTAACCA")]);
        let scan_aa = |sequences: &SequenceCollection| -> Vec<Match> {
            sequences
                .iter()
                .flat_map(|(seq_id, seq)| {
                    seq.match_indices("AA").map(move |(i, text)| Match {
                        seq_id: seq_id.clone(),
                        motif: "AA".to_string(),
                        start: i + 1,
                        end: i + 2,
                        matched_text: text.to_string(),
                        strand: Strand::Forward,
                    })
                })
                .collect()
        };

        let a = run_baseline(&sequences, scan_aa, 10, Some(99));
        let b = run_baseline(&sequences, scan_aa, 10, Some(99));
        assert_eq!(a.random_counts, b.random_counts);
        assert_eq!(a.comparison, b.comparison);
    }
}
