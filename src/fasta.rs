use crate::error::{MotifError, Result};
use crate::types::SequenceCollection;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A single FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl FastaRecord {
    /// Header line as written in a FASTA file, including the leading '>'
    pub fn header(&self) -> String {
        format!(">{} {}", self.id, self.description)
            .trim_end()
            .to_string()
    }
}

/// Parses FASTA records from any buffered reader.
///
/// Blank lines are skipped. The identifier is the first whitespace-separated
/// token of the header and the rest of the header is the description. Sequence
/// lines may span several lines; embedded spaces and tabs are dropped and the
/// sequence is upper-cased.
///
/// # Errors
/// * Returns `MotifError::InvalidFileFormat` for sequence data before the first
///   header, a header without an identifier, or a record with an empty sequence
/// * Returns `MotifError::Io` for reading issues
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut current: Option<(String, String)> = None;
    let mut current_sequence = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some((id, description)) = current.take() {
                records.push(finish_record(id, description, &current_sequence)?);
                current_sequence.clear();
            }

            let header = header.trim();
            let mut parts = header.splitn(2, char::is_whitespace);
            let id = match parts.next() {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    return Err(MotifError::InvalidFileFormat(
                        "FASTA header line '>' must be followed by an identifier".into(),
                    ))
                }
            };
            let description = parts.next().unwrap_or("").trim().to_string();
            current = Some((id, description));
        } else {
            if current.is_none() {
                return Err(MotifError::InvalidFileFormat(
                    "Found sequence data before first FASTA header ('>')".into(),
                ));
            }
            current_sequence.extend(line.chars().filter(|c| *c != ' ' && *c != '\t'));
        }
    }

    if let Some((id, description)) = current {
        records.push(finish_record(id, description, &current_sequence)?);
    }

    Ok(records)
}

fn finish_record(id: String, description: String, sequence: &str) -> Result<FastaRecord> {
    if sequence.is_empty() {
        return Err(MotifError::InvalidFileFormat(format!(
            "Empty sequence for FASTA record '{}'",
            id
        )));
    }
    Ok(FastaRecord {
        id,
        description,
        sequence: sequence.to_uppercase(),
    })
}

/// Reads sequences from a FASTA format file.
///
/// # Arguments
/// * `filename` - Path to the FASTA file to read
///
/// # Returns
/// * `Result<Vec<FastaRecord>>` - The records in file order
///
/// # Errors
/// * Returns `MotifError::InvalidFileFormat` if no sequences are found or the file is malformed
/// * Returns `MotifError::Io` for file reading issues
pub fn read_fasta(filename: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let file = File::open(filename)?;
    let records = parse_fasta(BufReader::new(file))?;

    if records.is_empty() {
        return Err(MotifError::InvalidFileFormat("No sequences found".into()));
    }

    Ok(records)
}

/// Writes records to a FASTA format file, one sequence line per record.
///
/// # Errors
/// * Returns `MotifError::Io` for file writing issues
pub fn write_fasta(records: &[FastaRecord], filename: impl AsRef<Path>) -> Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    for record in records {
        writeln!(file, "{}", record.header())?;
        writeln!(file, "{}", record.sequence)?;
    }
    file.flush()?;

    Ok(())
}

/// Builds an identifier → sequence collection from parsed records.
///
/// # Errors
/// * Returns `MotifError::InvalidFileFormat` if two records share an identifier
pub fn to_collection(records: &[FastaRecord]) -> Result<SequenceCollection> {
    let mut sequences = SequenceCollection::new();
    for record in records {
        if sequences
            .insert(record.id.clone(), record.sequence.clone())
            .is_some()
        {
            return Err(MotifError::InvalidFileFormat(format!(
                "Duplicate FASTA record id '{}'",
                record.id
            )));
        }
    }
    Ok(sequences)
}
