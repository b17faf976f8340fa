use crate::alphabet::Alphabet;
use crate::motifs::CompiledMotif;
use crate::types::{Match, SequenceCollection, Strand};
use regex::Regex;

/// Controls how occurrences are enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Report matches that start inside a previous match
    pub allow_overlap: bool,
    /// Also scan the reverse complement, reported on the `-` strand
    pub include_reverse_complement: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            allow_overlap: true,
            include_reverse_complement: false,
        }
    }
}

/// Generates the reverse complement of a DNA sequence.
///
/// # Returns
/// * `String` - The reverse complement sequence where:
///   - A ↔ T
///   - C ↔ G
///   - any other symbol is kept as is
pub fn reverse_complement(sequence: &str) -> String {
    let complement = Alphabet::Dna.complement_table();
    sequence
        .chars()
        .rev()
        .map(|c| {
            complement
                .and_then(|table| table.get(&c).copied())
                .unwrap_or(c)
        })
        .collect()
}

/// Byte ranges of every occurrence of `regex` in `text`, in start order.
///
/// With `allow_overlap` the search restarts one symbol after the previous
/// match start, so occurrences beginning inside an earlier match are kept.
/// Otherwise matches are taken greedily left to right without overlap.
pub fn find_occurrences(regex: &Regex, text: &str, allow_overlap: bool) -> Vec<(usize, usize)> {
    if !allow_overlap {
        return regex.find_iter(text).map(|m| (m.start(), m.end())).collect();
    }

    let mut spans = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = regex.find_at(text, pos) else {
            break;
        };
        spans.push((m.start(), m.end()));
        pos = m.start()
            + text[m.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    spans
}

fn scan_strand(
    seq_id: &str,
    text: &str,
    motifs: &[CompiledMotif],
    allow_overlap: bool,
    strand: Strand,
    matches: &mut Vec<Match>,
) {
    for motif in motifs {
        let before = matches.len();
        matches.extend(
            find_occurrences(&motif.regex, text, allow_overlap)
                .into_iter()
                .map(|(start, end)| Match {
                    seq_id: seq_id.to_string(),
                    motif: motif.name.clone(),
                    start: start + 1,
                    end,
                    matched_text: text[start..end].to_string(),
                    strand,
                }),
        );
        tracing::trace!(
            seq_id,
            motif = %motif.name,
            strand = %strand,
            hits = matches.len() - before,
            "scanned motif"
        );
    }
}

/// Scans one sequence for every motif.
///
/// Forward-strand matches come first, motif by motif in the given order, each
/// in ascending start position. With `include_reverse_complement`, matches on
/// the reverse complement follow with strand `-`; their coordinates are
/// positions in the reverse-complemented string.
pub fn scan_sequence(
    seq_id: &str,
    sequence: &str,
    motifs: &[CompiledMotif],
    options: ScanOptions,
) -> Vec<Match> {
    let mut matches = Vec::new();
    scan_strand(
        seq_id,
        sequence,
        motifs,
        options.allow_overlap,
        Strand::Forward,
        &mut matches,
    );

    if options.include_reverse_complement {
        let rc = reverse_complement(sequence);
        scan_strand(
            seq_id,
            &rc,
            motifs,
            options.allow_overlap,
            Strand::Reverse,
            &mut matches,
        );
    }

    matches
}

/// Scans every sequence of a collection, in identifier order
pub fn scan_collection(
    sequences: &SequenceCollection,
    motifs: &[CompiledMotif],
    options: ScanOptions,
) -> Vec<Match> {
    let matches: Vec<Match> = sequences
        .iter()
        .flat_map(|(seq_id, sequence)| scan_sequence(seq_id, sequence, motifs, options))
        .collect();

    tracing::debug!(
        sequences = sequences.len(),
        motifs = motifs.len(),
        matches = matches.len(),
        "scanned collection"
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motif(name: &str, raw: &str) -> CompiledMotif {
        CompiledMotif::new(name, raw, Alphabet::Dna).unwrap()
    }

    fn starts(matches: &[Match]) -> Vec<usize> {
        matches.iter().map(|m| m.start).collect()
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ATCG"), "CGAT");
        assert_eq!(reverse_complement("AATTCCGG"), "CCGGAATT");
        assert_eq!(reverse_complement("GCGC"), "GCGC");
        assert_eq!(reverse_complement("ACNX"), "XNGT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_overlap_policy() {
        let motifs = [motif("AA", "AA")];

        let overlapping = scan_sequence("s", "AAAA", &motifs, ScanOptions::default());
        assert_eq!(starts(&overlapping), vec![1, 2, 3]);
        assert!(overlapping.iter().all(|m| m.end == m.start + 1));

        let options = ScanOptions {
            allow_overlap: false,
            ..ScanOptions::default()
        };
        let disjoint = scan_sequence("s", "AAAA", &motifs, options);
        assert_eq!(starts(&disjoint), vec![1, 3]);
    }

    #[test]
    fn test_match_fields() {
        let motifs = [motif("tata", "TATAWAW")];
        let matches = scan_sequence("chr1", "GGGCTATAAATACCC", &motifs, ScanOptions::default());
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.seq_id, "chr1");
        assert_eq!(m.motif, "tata");
        assert_eq!((m.start, m.end), (5, 11));
        assert_eq!(m.matched_text, "TATAAAT");
        assert_eq!(m.strand, Strand::Forward);
    }

    #[test]
    fn test_reverse_strand_coordinates() {
        let motifs = [motif("gaat", "GAAT")];
        let options = ScanOptions {
            include_reverse_complement: true,
            ..ScanOptions::default()
        };
        // reverse complement of CCATTCGG is CCGAATGG
        let matches = scan_sequence("s", "CCATTCGG", &motifs, options);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].strand, Strand::Reverse);
        assert_eq!((matches[0].start, matches[0].end), (3, 6));
        assert_eq!(matches[0].matched_text, "GAAT");
    }

    #[test]
    fn test_forward_before_reverse() {
        let motifs = [motif("gc", "GC"), motif("at", "AT")];
        let options = ScanOptions {
            allow_overlap: true,
            include_reverse_complement: true,
        };
        let matches = scan_sequence("s", "GCAT", &motifs, options);
        let strands: Vec<Strand> = matches.iter().map(|m| m.strand).collect();
        let first_reverse = strands.iter().position(|s| *s == Strand::Reverse).unwrap();
        assert!(strands[first_reverse..].iter().all(|s| *s == Strand::Reverse));
        assert_eq!(matches.len(), 4);
        assert_eq!(first_reverse, 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        let motifs = [motif("eco", "GAATTC")];
        assert!(scan_sequence("s", "AAAA", &motifs, ScanOptions::default()).is_empty());
    }

    #[test]
    fn test_scan_collection_orders_by_id() {
        let motifs = [motif("a", "A")];
        let mut sequences = SequenceCollection::new();
        sequences.insert("s2".to_string(), "A".to_string());
        sequences.insert("s1".to_string(), "AA".to_string());
        let matches = scan_collection(&sequences, &motifs, ScanOptions::default());
        let ids: Vec<&str> = matches.iter().map(|m| m.seq_id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s1", "s2"]);
    }

    #[test]
    fn test_overlap_with_empty_matches_terminates() {
        let motifs = [motif("poly", "A*")];
        let overlapping = find_occurrences(&motifs[0].regex, "AB", true);
        assert_eq!(overlapping, vec![(0, 1), (1, 1), (2, 2)]);
        let disjoint = find_occurrences(&motifs[0].regex, "AB", false);
        assert!(!disjoint.is_empty());
    }
}
