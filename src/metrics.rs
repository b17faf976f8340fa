use crate::types::{Match, MotifCounts, TrialCountTable};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Enrichment of a real count over the mean randomized count
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lift {
    /// `real_count / mean_random`
    Ratio(f64),
    /// The motif occurs in real data but never in randomized data
    Infinite,
    /// Neither real nor randomized data produced the motif
    Undefined,
}

impl Lift {
    /// Numeric value, `f64::INFINITY` for `Infinite` and `None` for `Undefined`
    pub fn value(&self) -> Option<f64> {
        match self {
            Lift::Ratio(v) => Some(*v),
            Lift::Infinite => Some(f64::INFINITY),
            Lift::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Lift::Undefined)
    }
}

/// Mean, population standard deviation, min and max of a motif's trial counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSummary {
    pub mean: f64,
    pub std: f64,
    pub min: usize,
    pub max: usize,
}

/// Summary comparison for one motif
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub motif: String,
    pub real_count: usize,
    pub mean_random: f64,
    pub std_random: f64,
    pub min_random: usize,
    pub max_random: usize,
    pub lift: Lift,
}

/// Counts how many matches are observed for each motif
pub fn count_matches_by_motif(matches: &[Match]) -> MotifCounts {
    let mut counts = MotifCounts::new();
    for m in matches {
        *counts.entry(m.motif.clone()).or_insert(0) += 1;
    }
    counts
}

/// Summarizes per-trial counts.
///
/// The mean is the exact sum over the count. The standard deviation is the
/// population one (divides by n). An empty slice summarizes to all zeros and a
/// single trial has zero deviation.
pub fn summarize_trial_counts(counts: &[usize]) -> TrialSummary {
    let min = Iterator::min(counts.iter());
    let max = Iterator::max(counts.iter());
    let (Some(&min), Some(&max)) = (min, max) else {
        return TrialSummary {
            mean: 0.0,
            std: 0.0,
            min: 0,
            max: 0,
        };
    };

    let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    let values: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let std = if values.len() > 1 {
        values.iter().population_std_dev()
    } else {
        0.0
    };

    TrialSummary {
        mean,
        std,
        min,
        max,
    }
}

/// Computes the lift of `real_count` over `mean_random`.
///
/// # Returns
/// * `Lift::Undefined` if both are zero
/// * `Lift::Infinite` if only the random mean is zero
/// * `Lift::Ratio(real_count / mean_random)` otherwise
pub fn compute_lift(real_count: usize, mean_random: f64) -> Lift {
    if mean_random == 0.0 {
        if real_count == 0 {
            Lift::Undefined
        } else {
            Lift::Infinite
        }
    } else {
        Lift::Ratio(real_count as f64 / mean_random)
    }
}

/// Builds one comparison entry per motif seen in either the real counts or the
/// trial counts, keyed and ordered by motif name. Missing real counts are zero.
pub fn build_comparison(
    real_counts: &MotifCounts,
    random_counts: &TrialCountTable,
) -> BTreeMap<String, ComparisonEntry> {
    let motifs = real_counts.keys().chain(random_counts.keys());

    let mut comparison: BTreeMap<String, ComparisonEntry> = BTreeMap::new();
    for motif in motifs {
        if comparison.contains_key(motif) {
            continue;
        }

        let real_count = real_counts.get(motif).copied().unwrap_or(0);
        let summary = summarize_trial_counts(
            random_counts.get(motif).map(Vec::as_slice).unwrap_or(&[]),
        );

        comparison.insert(
            motif.clone(),
            ComparisonEntry {
                motif: motif.clone(),
                real_count,
                mean_random: summary.mean,
                std_random: summary.std,
                min_random: summary.min,
                max_random: summary.max,
                lift: compute_lift(real_count, summary.mean),
            },
        );
    }

    comparison
}
