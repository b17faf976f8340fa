//! Tabular exports of scan and baseline results.

use crate::error::Result;
use crate::metrics::{ComparisonEntry, Lift};
use crate::types::{Match, TrialCountTable};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Decimal places for floating point columns in exports
pub const FLOAT_PRECISION: usize = 6;

/// How an undefined lift (no real and no randomized occurrences) is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiftFormat {
    /// Undefined is written as "inf", like an infinite lift
    #[default]
    Compatible,
    /// Undefined is written as "NA"
    Distinct,
}

/// Renders a lift value for export
pub fn format_lift(lift: Lift, format: LiftFormat) -> String {
    match (lift, format) {
        (Lift::Ratio(v), _) => format!("{:.*}", FLOAT_PRECISION, v),
        (Lift::Infinite, _) | (Lift::Undefined, LiftFormat::Compatible) => "inf".to_string(),
        (Lift::Undefined, LiftFormat::Distinct) => "NA".to_string(),
    }
}

/// One row per match: seq_id, motif, start, end, strand, match
pub fn matches_frame(matches: &[Match]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Column::new(
            "seq_id".into(),
            matches.iter().map(|m| m.seq_id.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "motif".into(),
            matches.iter().map(|m| m.motif.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "start".into(),
            matches.iter().map(|m| m.start as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "end".into(),
            matches.iter().map(|m| m.end as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "strand".into(),
            matches.iter().map(|m| m.strand.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "match".into(),
            matches
                .iter()
                .map(|m| m.matched_text.as_str())
                .collect::<Vec<_>>(),
        ),
    ])?;

    Ok(df)
}

/// Match counts per sequence and motif: seq_id, motif, count
pub fn summary_frame(matches: &[Match]) -> Result<DataFrame> {
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for m in matches {
        *counts.entry((m.seq_id.as_str(), m.motif.as_str())).or_insert(0) += 1;
    }

    let df = DataFrame::new(vec![
        Column::new(
            "seq_id".into(),
            counts.keys().map(|(seq_id, _)| *seq_id).collect::<Vec<_>>(),
        ),
        Column::new(
            "motif".into(),
            counts.keys().map(|(_, motif)| *motif).collect::<Vec<_>>(),
        ),
        Column::new("count".into(), counts.values().copied().collect::<Vec<_>>()),
    ])?;

    Ok(df)
}

/// Long-format trial counts: motif, trial (1-based), count
pub fn trials_frame(random_counts: &TrialCountTable) -> Result<DataFrame> {
    let mut motifs: Vec<&str> = Vec::new();
    let mut trials: Vec<u64> = Vec::new();
    let mut counts: Vec<u64> = Vec::new();

    for (motif, trial_counts) in random_counts {
        for (idx, count) in trial_counts.iter().enumerate() {
            motifs.push(motif);
            trials.push(idx as u64 + 1);
            counts.push(*count as u64);
        }
    }

    let df = DataFrame::new(vec![
        Column::new("motif".into(), motifs),
        Column::new("trial".into(), trials),
        Column::new("count".into(), counts),
    ])?;

    Ok(df)
}

/// One row per motif: motif, real_count, mean_random, std_random, min_random,
/// max_random, lift. The lift column is text so that it can carry "inf".
pub fn comparison_frame(
    comparison: &BTreeMap<String, ComparisonEntry>,
    lift_format: LiftFormat,
) -> Result<DataFrame> {
    let entries: Vec<&ComparisonEntry> = comparison.values().collect();

    let df = DataFrame::new(vec![
        Column::new(
            "motif".into(),
            entries.iter().map(|e| e.motif.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "real_count".into(),
            entries.iter().map(|e| e.real_count as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "mean_random".into(),
            entries.iter().map(|e| e.mean_random).collect::<Vec<_>>(),
        ),
        Column::new(
            "std_random".into(),
            entries.iter().map(|e| e.std_random).collect::<Vec<_>>(),
        ),
        Column::new(
            "min_random".into(),
            entries.iter().map(|e| e.min_random as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "max_random".into(),
            entries.iter().map(|e| e.max_random as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "lift".into(),
            entries
                .iter()
                .map(|e| format_lift(e.lift, lift_format))
                .collect::<Vec<_>>(),
        ),
    ])?;

    Ok(df)
}

fn write_delimited(df: &mut DataFrame, path: &Path, separator: u8) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .with_float_precision(Some(FLOAT_PRECISION))
        .finish(df)?;

    Ok(())
}

/// Writes a frame as comma-separated values, creating parent directories
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    write_delimited(df, path.as_ref(), b',')
}

/// Writes a frame as tab-separated values, creating parent directories
pub fn write_tsv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    write_delimited(df, path.as_ref(), b'\t')
}

/// Writes matches as a pretty-printed JSON array
pub fn write_matches_json(matches: &[Match], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, matches)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strand;

    fn hit(seq_id: &str, motif: &str, start: usize, strand: Strand) -> Match {
        Match {
            seq_id: seq_id.to_string(),
            motif: motif.to_string(),
            start,
            end: start + 1,
            matched_text: "AC".to_string(),
            strand,
        }
    }

    #[test]
    fn test_format_lift() {
        assert_eq!(format_lift(Lift::Ratio(2.0), LiftFormat::Compatible), "2.000000");
        assert_eq!(format_lift(Lift::Infinite, LiftFormat::Distinct), "inf");
        assert_eq!(format_lift(Lift::Undefined, LiftFormat::Compatible), "inf");
        assert_eq!(format_lift(Lift::Undefined, LiftFormat::Distinct), "NA");
    }

    #[test]
    fn test_matches_frame() {
        let matches = vec![
            hit("s1", "m", 1, Strand::Forward),
            hit("s1", "m", 4, Strand::Reverse),
        ];
        let df = matches_frame(&matches).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["seq_id", "motif", "start", "end", "strand", "match"]);
    }

    #[test]
    fn test_summary_frame_counts() {
        let matches = vec![
            hit("s2", "m", 1, Strand::Forward),
            hit("s1", "m", 1, Strand::Forward),
            hit("s1", "m", 3, Strand::Forward),
            hit("s1", "k", 3, Strand::Forward),
        ];
        let df = summary_frame(&matches).unwrap();
        assert_eq!(df.height(), 3);
        let counts: Vec<Option<u64>> = df
            .column("count")
            .unwrap()
            .as_materialized_series()
            .u64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(counts, vec![Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn test_trials_frame_is_long_format() {
        let table = TrialCountTable::from([
            ("b".to_string(), vec![1, 2]),
            ("a".to_string(), vec![0, 5]),
        ]);
        let df = trials_frame(&table).unwrap();
        assert_eq!(df.height(), 4);
        let trials: Vec<Option<u64>> = df
            .column("trial")
            .unwrap()
            .as_materialized_series()
            .u64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(trials, vec![Some(1), Some(2), Some(1), Some(2)]);
    }

    #[test]
    fn test_write_matches_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("hits.json");
        write_matches_json(&[hit("s1", "m", 2, Strand::Reverse)], &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["seq_id"], "s1");
        assert_eq!(value[0]["start"], 2);
        assert_eq!(value[0]["strand"], "-");
    }
}
