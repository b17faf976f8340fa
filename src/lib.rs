//! IUPAC motif scanning with shuffled-sequence enrichment baselines for DNA and protein

pub mod alphabet;
pub mod baseline;
pub mod error;
pub mod fasta;
pub mod iupac;
pub mod metrics;
pub mod motifs;
pub mod randomize;
pub mod report;
pub mod scanner;
pub mod types;
