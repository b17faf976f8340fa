use clap::Parser;
use motif_enrich_rs::alphabet::{detect_kind, Alphabet};
use motif_enrich_rs::baseline::run_baseline;
use motif_enrich_rs::error::MotifError;
use motif_enrich_rs::fasta::{read_fasta, to_collection};
use motif_enrich_rs::motifs::{builtin_motifs, load_motifs, MotifSet};
use motif_enrich_rs::report::{
    comparison_frame, matches_frame, summary_frame, trials_frame, write_csv, write_matches_json,
    write_tsv, LiftFormat,
};
use motif_enrich_rs::scanner::{scan_collection, ScanOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Motif(#[from] MotifError),
}

#[derive(Parser)]
#[command(
    name = "motif-scanner",
    about = "Scans DNA or protein sequences for IUPAC motifs and compares the counts against shuffled controls",
    long_about = "A tool for locating named motifs, written with IUPAC ambiguity codes, in the records of a \
                  FASTA file. It reports every occurrence (or per-sequence counts) and can optionally measure \
                  enrichment by rescanning composition-preserving shuffles of the input.",
    version,
    after_help = "Example usage:\n    \
                  motif-scanner reads.fasta hits.tsv --revcomp --no-overlap\n    \
                  motif-scanner proteins.fasta hits.tsv --kind protein --motifs my_motifs.json\n    \
                  motif-scanner reads.fasta out/hits.tsv --baseline --trials 100 --seed 42",
    color = clap::ColorChoice::Always
)]
#[derive(Debug)]
struct Args {
    /// Path to input FASTA file
    #[arg(value_name = "FASTA_FILE")]
    fasta_file: PathBuf,

    /// Path for output file (.tsv, or .json for detailed matches)
    /// Will create output directory if it doesn't exist
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: PathBuf,

    /// JSON file mapping motif names to IUPAC patterns
    /// Defaults to the bundled motifs for the alphabet
    #[arg(long, value_name = "MOTIF_FILE")]
    motifs: Option<PathBuf>,

    /// Sequence alphabet, "dna" or "protein"
    /// Detected from the records when omitted
    #[arg(long)]
    kind: Option<String>,

    /// Write per-sequence motif counts instead of detailed matches
    #[arg(long)]
    summary: bool,

    /// Disallow overlapping matches
    #[arg(long)]
    no_overlap: bool,

    /// Also scan the reverse complement (DNA only)
    #[arg(long)]
    revcomp: bool,

    /// Compare motif counts against shuffled sequences
    #[arg(long)]
    baseline: bool,

    /// Number of shuffled trials for the baseline
    #[arg(long, default_value = "10")]
    trials: usize,

    /// Seed for reproducible baseline shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Write "NA" instead of "inf" for motifs never seen in real or shuffled data
    #[arg(long)]
    distinct_undefined_lift: bool,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("MOTIF_SCANNER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_motif_set(args: &Args, alphabet: Alphabet) -> Result<MotifSet, ScannerError> {
    let motifs = match &args.motifs {
        Some(path) => load_motifs(path, alphabet.name())?,
        None => builtin_motifs(alphabet)?,
    };
    Ok(motifs)
}

/// `<dir>/<stem>_<suffix>.csv` next to the main output
fn sibling_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "motifs".to_string());
    output.with_file_name(format!("{}_{}.csv", stem, suffix))
}

fn main() -> Result<(), ScannerError> {
    let start_time = std::time::Instant::now();

    init_tracing();
    let args = Args::parse();

    // Create output directory if it doesn't exist
    if let Some(parent) = args.output_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let records = read_fasta(&args.fasta_file)?;
    let alphabet = match &args.kind {
        Some(kind) => kind.parse::<Alphabet>()?,
        None => detect_kind(&records)?,
    };
    let sequences = to_collection(&records)?;
    let motifs = load_motif_set(&args, alphabet)?;

    if args.revcomp && !alphabet.is_nucleic() {
        tracing::warn!(alphabet = %alphabet, "--revcomp ignored for non-nucleic alphabet");
    }
    let options = ScanOptions {
        allow_overlap: !args.no_overlap,
        include_reverse_complement: args.revcomp && alphabet.is_nucleic(),
    };

    tracing::info!(
        sequences = sequences.len(),
        motifs = motifs.len(),
        alphabet = %alphabet,
        "scanning"
    );

    let matches = scan_collection(&sequences, &motifs.motifs, options);
    println!("{} matches in {} sequences", matches.len(), sequences.len());

    let is_json = args
        .output_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if args.summary {
        write_tsv(&mut summary_frame(&matches)?, &args.output_file)?;
    } else if is_json {
        write_matches_json(&matches, &args.output_file)?;
    } else {
        write_tsv(&mut matches_frame(&matches)?, &args.output_file)?;
    }

    if args.baseline {
        let result = run_baseline(
            &sequences,
            |shuffled| scan_collection(shuffled, &motifs.motifs, options),
            args.trials,
            args.seed,
        );

        let lift_format = if args.distinct_undefined_lift {
            LiftFormat::Distinct
        } else {
            LiftFormat::Compatible
        };

        let trials_path = sibling_path(&args.output_file, "baseline_trials");
        let comparison_path = sibling_path(&args.output_file, "comparison");
        write_csv(&mut trials_frame(&result.random_counts)?, &trials_path)?;
        write_csv(
            &mut comparison_frame(&result.comparison, lift_format)?,
            &comparison_path,
        )?;

        println!(
            "Baseline: {} trials, comparison written to {}",
            args.trials,
            comparison_path.display()
        );
    }

    let elapsed = start_time.elapsed();
    println!(
        "Total execution time: {:.4} seconds",
        elapsed.as_secs_f64()
    );

    Ok(())
}
