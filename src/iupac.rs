//! Translation of IUPAC motif strings into regular expressions.

use crate::alphabet::Alphabet;
use crate::error::Result;

/// Symbols reserved by the pattern engine. They are copied through untouched so
/// that user-written constructs such as `[^P]` or `N{2,4}` survive expansion.
const META_CHARS: &str = ".^$*+?{}[]|()\\";

/// Expands the IUPAC codes in `pattern` into a regular expression for `alphabet`.
///
/// Each symbol is handled on its own, left to right:
/// - pattern metacharacters are kept as written
/// - symbols missing from the alphabet's table are kept as written
/// - unambiguous symbols become their (upper-case) concrete symbol
/// - ambiguous symbols become a character class in the table's order
///
/// # Example
/// ```
/// use motif_enrich_rs::alphabet::Alphabet;
/// use motif_enrich_rs::iupac::iupac_to_regex;
///
/// assert_eq!(iupac_to_regex("ATNG", Alphabet::Dna), "AT[ACGT]G");
/// assert_eq!(iupac_to_regex("N[^P][ST][^P]", Alphabet::Protein), "N[^P][ST][^P]");
/// ```
pub fn iupac_to_regex(pattern: &str, alphabet: Alphabet) -> String {
    let table = alphabet.iupac_table();
    let mut out = String::with_capacity(pattern.len());

    for ch in pattern.chars() {
        if META_CHARS.contains(ch) {
            out.push(ch);
            continue;
        }

        match table.get(&ch.to_ascii_uppercase()) {
            None => out.push(ch),
            Some(code) if code.len() == 1 => out.push_str(code),
            Some(code) => {
                out.push('[');
                out.push_str(code);
                out.push(']');
            }
        }
    }

    out
}

/// Same as [`iupac_to_regex`], with the alphabet given by name (`"dna"` or `"protein"`).
///
/// # Errors
/// * Returns `MotifError::UnsupportedAlphabet` for any other kind
pub fn iupac_to_regex_for_kind(pattern: &str, kind: &str) -> Result<String> {
    let alphabet: Alphabet = kind.parse()?;
    Ok(iupac_to_regex(pattern, alphabet))
}
