//! Composition-preserving shuffles.
//!
//! The random source is always supplied by the caller. Reusing one seeded
//! source across calls makes a whole series of shuffles reproducible, and the
//! order of the calls is part of that contract.

use crate::types::SequenceCollection;
use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a random permutation of the symbols of `sequence`
pub fn shuffle_sequence<R: Rng + ?Sized>(sequence: &str, rng: &mut R) -> String {
    let mut symbols: Vec<char> = sequence.chars().collect();
    symbols.shuffle(rng);
    symbols.into_iter().collect()
}

/// Shuffles every sequence of a collection with the same source, in
/// identifier order. The identifiers are kept as they are.
pub fn shuffle_collection<R: Rng + ?Sized>(
    sequences: &SequenceCollection,
    rng: &mut R,
) -> SequenceCollection {
    sequences
        .iter()
        .map(|(seq_id, sequence)| (seq_id.clone(), shuffle_sequence(sequence, &mut *rng)))
        .collect()
}
