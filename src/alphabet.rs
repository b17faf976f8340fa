//! Biological alphabets and their symbol tables.
//!
//! Each alphabet carries an IUPAC table (ambiguity symbol to the concrete symbols
//! it stands for, in canonical order), a strict symbol set used for validation,
//! and, for nucleic acids only, a complement table.

use crate::error::{MotifError, Result};
use crate::fasta::FastaRecord;
use phf::phf_map;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

static DNA_IUPAC: phf::Map<char, &'static str> = phf_map! {
    'A' => "A",
    'C' => "C",
    'G' => "G",
    'T' => "T",
    'U' => "U",
    'R' => "AG",
    'Y' => "CT",
    'S' => "GC",
    'W' => "AT",
    'K' => "GT",
    'M' => "AC",
    'B' => "CGT",
    'D' => "AGT",
    'H' => "ACT",
    'V' => "ACG",
    'N' => "ACGT",
};

static PROTEIN_IUPAC: phf::Map<char, &'static str> = phf_map! {
    'A' => "A",
    'C' => "C",
    'D' => "D",
    'E' => "E",
    'F' => "F",
    'G' => "G",
    'H' => "H",
    'I' => "I",
    'K' => "K",
    'L' => "L",
    'M' => "M",
    'N' => "N",
    'P' => "P",
    'Q' => "Q",
    'R' => "R",
    'S' => "S",
    'T' => "T",
    'V' => "V",
    'W' => "W",
    'Y' => "Y",
    'B' => "DN",
    'Z' => "EQ",
    'X' => "ACDEFGHIKLMNPQRSTVWY",
};

static DNA_COMPLEMENT: phf::Map<char, char> = phf_map! {
    'A' => 'T',
    'T' => 'A',
    'C' => 'G',
    'G' => 'C',
};

const DNA_SYMBOLS: &[char] = &['A', 'C', 'G', 'T'];

const PROTEIN_SYMBOLS: &[char] = &[
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W', 'Y',
    'V',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    Dna,
    Protein,
}

impl Alphabet {
    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Dna => "dna",
            Alphabet::Protein => "protein",
        }
    }

    /// IUPAC table for this alphabet, keyed by upper-case symbol
    pub fn iupac_table(&self) -> &'static phf::Map<char, &'static str> {
        match self {
            Alphabet::Dna => &DNA_IUPAC,
            Alphabet::Protein => &PROTEIN_IUPAC,
        }
    }

    /// Complement table, only defined for nucleic acids
    pub fn complement_table(&self) -> Option<&'static phf::Map<char, char>> {
        match self {
            Alphabet::Dna => Some(&DNA_COMPLEMENT),
            Alphabet::Protein => None,
        }
    }

    /// Strict (unambiguous) symbols accepted in sequences
    pub fn symbols(&self) -> &'static [char] {
        match self {
            Alphabet::Dna => DNA_SYMBOLS,
            Alphabet::Protein => PROTEIN_SYMBOLS,
        }
    }

    /// The catch-all ambiguity symbol tolerated when validating with `allow_ambiguous`
    pub fn ambiguous_symbols(&self) -> &'static [char] {
        match self {
            Alphabet::Dna => &['N'],
            Alphabet::Protein => &['X'],
        }
    }

    pub fn is_nucleic(&self) -> bool {
        self.complement_table().is_some()
    }

    fn allows(&self, symbol: char, allow_ambiguous: bool) -> bool {
        self.symbols().contains(&symbol)
            || (allow_ambiguous && self.ambiguous_symbols().contains(&symbol))
    }

    /// Checks that `sequence` is non-empty and made only of this alphabet's symbols.
    /// Surrounding whitespace is ignored and symbols are compared upper-cased.
    pub fn is_valid(&self, sequence: &str, allow_ambiguous: bool) -> bool {
        let sequence = sequence.trim();
        !sequence.is_empty()
            && sequence
                .chars()
                .all(|c| self.allows(c.to_ascii_uppercase(), allow_ambiguous))
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Alphabet {
    type Err = MotifError;

    fn from_str(kind: &str) -> Result<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "dna" => Ok(Alphabet::Dna),
            "protein" => Ok(Alphabet::Protein),
            _ => Err(MotifError::UnsupportedAlphabet(kind.to_string())),
        }
    }
}

/// Validates a sequence against an alphabet.
///
/// # Errors
/// * Returns `MotifError::InvalidSequence` for an empty sequence, or naming the
///   1-based position of the first offending symbol and the full set of offenders
pub fn validate_sequence(sequence: &str, alphabet: Alphabet, allow_ambiguous: bool) -> Result<()> {
    let normalized = sequence.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(MotifError::invalid_sequence(0, "empty sequence"));
    }

    let first_bad = normalized
        .chars()
        .position(|c| !alphabet.allows(c, allow_ambiguous));

    match first_bad {
        None => Ok(()),
        Some(idx) => {
            let bad: BTreeSet<char> = normalized
                .chars()
                .filter(|&c| !alphabet.allows(c, allow_ambiguous))
                .collect();
            let bad: String = bad.into_iter().collect();
            let allowed: BTreeSet<char> = alphabet.symbols().iter().copied().collect();
            let allowed: String = allowed.into_iter().collect();
            Err(MotifError::invalid_sequence(
                idx + 1,
                format!(
                    "invalid symbols for {}: {:?}, allowed: {:?}",
                    alphabet, bad, allowed
                ),
            ))
        }
    }
}

/// Guesses whether a sequence is DNA or protein.
///
/// Every DNA string over ACGT is also a valid protein string, so DNA wins ties.
/// This is a heuristic: a short peptide made only of A, C, G and T residues is
/// reported as DNA.
pub fn detect_alphabet(sequence: &str, allow_ambiguous: bool) -> Option<Alphabet> {
    [Alphabet::Dna, Alphabet::Protein]
        .into_iter()
        .find(|alphabet| alphabet.is_valid(sequence, allow_ambiguous))
}

/// Picks the alphabet shared by every record, preferring DNA.
///
/// # Errors
/// * Returns `MotifError::UnsupportedAlphabet` if the records are empty or no
///   single alphabet covers all of them
pub fn detect_kind(records: &[FastaRecord]) -> Result<Alphabet> {
    if records.is_empty() {
        return Err(MotifError::UnsupportedAlphabet(
            "cannot infer alphabet from zero records".to_string(),
        ));
    }

    [Alphabet::Dna, Alphabet::Protein]
        .into_iter()
        .find(|alphabet| records.iter().all(|r| alphabet.is_valid(&r.sequence, true)))
        .ok_or_else(|| {
            MotifError::UnsupportedAlphabet("records match neither dna nor protein".to_string())
        })
}
