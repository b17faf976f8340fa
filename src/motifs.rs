//! Motif definitions and their compiled form.

use crate::alphabet::Alphabet;
use crate::error::{MotifError, Result};
use crate::iupac::iupac_to_regex;
use crate::types::MotifDefinitions;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;

const BUILTIN_DNA: &str = include_str!("../motifs/dna.json");
const BUILTIN_PROTEIN: &str = include_str!("../motifs/protein.json");

/// A motif whose IUPAC codes have been expanded and compiled
#[derive(Debug, Clone)]
pub struct CompiledMotif {
    pub name: String,
    /// Expanded regular expression source
    pub pattern: String,
    pub regex: Regex,
}

impl CompiledMotif {
    /// Expands and compiles a single motif.
    ///
    /// # Errors
    /// * Returns `MotifError::InvalidPattern` if the expanded pattern is rejected
    ///   by the regex engine
    pub fn new(name: impl Into<String>, raw_pattern: &str, alphabet: Alphabet) -> Result<Self> {
        let name = name.into();
        let pattern = iupac_to_regex(raw_pattern, alphabet);
        let regex = Regex::new(&pattern).map_err(|e| MotifError::invalid_pattern(&name, e))?;
        Ok(CompiledMotif {
            name,
            pattern,
            regex,
        })
    }
}

/// The motifs for one alphabet, in name order
#[derive(Debug, Clone)]
pub struct MotifSet {
    pub alphabet: Alphabet,
    pub motifs: Vec<CompiledMotif>,
}

impl MotifSet {
    /// Compiles every definition against `alphabet`. The first failure aborts.
    pub fn compile(definitions: &MotifDefinitions, alphabet: Alphabet) -> Result<Self> {
        let motifs = definitions
            .iter()
            .map(|(name, raw)| CompiledMotif::new(name.as_str(), raw, alphabet))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(alphabet = %alphabet, motifs = motifs.len(), "compiled motif set");

        Ok(MotifSet { alphabet, motifs })
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.motifs.iter().map(|m| m.name.as_str())
    }
}

/// Parses a motif file: a flat JSON object mapping motif names to pattern strings.
///
/// # Errors
/// * Returns `MotifError::Json` if the text is not JSON
/// * Returns `MotifError::InvalidMotifSource` if the top level is not an object
///   or a value is not a string
pub fn parse_motif_definitions(json: &str) -> Result<MotifDefinitions> {
    let value: Value = serde_json::from_str(json)?;
    let object = match value {
        Value::Object(object) => object,
        _ => {
            return Err(MotifError::InvalidMotifSource(
                "motif file must contain an object mapping names to patterns".into(),
            ))
        }
    };

    object
        .into_iter()
        .map(|(name, pattern)| match pattern {
            Value::String(pattern) => Ok((name, pattern)),
            other => Err(MotifError::InvalidMotifSource(format!(
                "pattern for motif {:?} must be a string, found {}",
                name, other
            ))),
        })
        .collect()
}

/// Loads and compiles the motifs in `path` for the alphabet named `kind`.
///
/// The alphabet is checked before the file is touched.
///
/// # Errors
/// * Returns `MotifError::UnsupportedAlphabet` if `kind` is not "dna" or "protein"
/// * Returns `MotifError::Io`, `MotifError::Json` or `MotifError::InvalidMotifSource`
///   for unreadable or malformed files
/// * Returns `MotifError::InvalidPattern` naming the first motif that fails to compile
pub fn load_motifs(path: impl AsRef<Path>, kind: &str) -> Result<MotifSet> {
    let alphabet: Alphabet = kind.parse()?;
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let definitions = parse_motif_definitions(&text).map_err(|e| match e {
        MotifError::InvalidMotifSource(msg) => {
            MotifError::InvalidMotifSource(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;
    MotifSet::compile(&definitions, alphabet)
}

/// Bundled motif definitions for an alphabet
pub fn builtin_definitions(alphabet: Alphabet) -> Result<MotifDefinitions> {
    match alphabet {
        Alphabet::Dna => parse_motif_definitions(BUILTIN_DNA),
        Alphabet::Protein => parse_motif_definitions(BUILTIN_PROTEIN),
    }
}

/// Compiles the bundled motifs for an alphabet
pub fn builtin_motifs(alphabet: Alphabet) -> Result<MotifSet> {
    MotifSet::compile(&builtin_definitions(alphabet)?, alphabet)
}
