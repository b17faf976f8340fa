use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Collection of sequences indexed by sequence identifier
/// Iteration order is the identifier order, which keeps shuffles reproducible
pub type SequenceCollection = BTreeMap<String, String>;

/// Raw motif definitions (IUPAC / pattern strings) indexed by motif name
pub type MotifDefinitions = BTreeMap<String, String>;

/// Per-motif match counts
pub type MotifCounts = BTreeMap<String, usize>;

/// Per-motif counts for each randomized trial, trial 1 first
pub type TrialCountTable = BTreeMap<String, Vec<usize>>;

/// Reading direction of a nucleic-acid sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single motif occurrence.
///
/// `start` and `end` are 1-based and inclusive. On the reverse strand they are
/// positions within the reverse-complemented sequence, not the original one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub seq_id: String,
    pub motif: String,
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
    pub strand: Strand,
}
