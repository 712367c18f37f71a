/*
    Open the alignment file
    Collect one record per ">" header
        id: first whitespace separated token of the header
        description: full header line without ">"
        sequence: following lines joined
            may hold "-" gap characters
            lowercase characters mark insertions against the query
    Reject
        sequences encountered before the first header
        headers without any sequence
        files without any record
    Target region
        non-query records carry the aligned start/end of their own
        sequence as fields 7 and 8 of the description
*/


use std::io::BufRead;
use std::path::PathBuf;
use log::{debug, error, info, trace};
pub mod lib_utils;
use lib_utils::struct_helper::FileBufferHelper;

pub const GAP: char = '-';

/// One member of a multiple sequence alignment.
pub struct MsaRecord {
    pub id: String,
    pub description: String,
    pub seq: String
}

impl MsaRecord {
    /// Inclusive start/end of the aligned region inside this record's own
    /// score matrix, read from fields 7 and 8 of the description.
    pub fn target_region(&self) -> Result<(usize, usize), String> {
        let parts: Vec<&str> = self.description.split_whitespace().collect();
        if parts.len() < 9 {
            error!("{} carries no target region in its description", self.id);
            return Err(format!("No target region in the description of {}", self.id));
        }
        let t_start = parts[7].parse::<usize>()
            .map_err(|x| format!("Target start of {} is not numeric - {}", self.id, x))?;
        let t_end = parts[8].parse::<usize>()
            .map_err(|x| format!("Target end of {} is not numeric - {}", self.id, x))?;
        trace!("Target region of {}: {} - {}", self.id, t_start, t_end);
        Ok((t_start, t_end))
    }

    /// Length of the sequence once lowercase insertion characters are
    /// dropped. Gaps still count, so this is the span the record covers
    /// in the alignment.
    pub fn aligned_len(&self) -> usize {
        self.seq.chars().filter(|c| !c.is_ascii_lowercase()).count()
    }
}

pub fn read_records(infile: &PathBuf) -> Result<Vec<MsaRecord>, String> {
    // one record per header, sequence lines accumulate onto the
    // most recent record
    let mut alignment_file = FileBufferHelper::new(infile)?;
    info!("Reading alignment records from {:?}", alignment_file.path);
    let mut records: Vec<MsaRecord> = Vec::new();
    while alignment_file.buffer_reader.read_line(&mut alignment_file.line).unwrap_or(0) >= 1 {
        let line = alignment_file.line.trim();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(previous) = records.last() {
                if previous.seq.is_empty() {
                    error!("No sequence encountered in between headers. Empty sequence encountered.");
                    return Err(format!("Empty sequence for {} in {:?}", previous.id, infile));
                }
            }
            let description = header.trim().to_string();
            let id = match description.split_whitespace().next() {
                Some(token) => token.to_string(),
                None => {
                    error!("Header without an identifier in {:?}", infile);
                    return Err(format!("Header without an identifier in {:?}", infile));
                }
            };
            debug!("Accessing: {}", id);
            records.push(MsaRecord { id, description, seq: String::new() });
        } else if !line.is_empty() {
            match records.last_mut() {
                Some(record) => record.seq += line,
                None => {
                    error!("Encountered sequences before header");
                    return Err(format!("Encountered sequences before header in {:?}", infile));
                }
            }
        }
        alignment_file.line.clear();
    }
    match records.last() {
        Some(last) if last.seq.is_empty() => {
            error!("No sequence encountered after the last header.");
            Err(format!("Empty sequence for {} in {:?}", last.id, infile))
        }
        Some(_) => Ok(records),
        None => {
            error!("No alignment records found in {:?}", infile);
            Err(format!("No alignment records found in {:?}", infile))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_alignment(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("alignment.a3m");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn records_are_read_in_order_with_joined_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_alignment(
            &dir,
            ">query some protein\nACD\nEFG\n>hit 0.1 0.2 0.3 1 6 1 0 5\nAC-\nDef\n",
        );
        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "query");
        assert_eq!(records[0].description, "query some protein");
        assert_eq!(records[0].seq, "ACDEFG");
        assert_eq!(records[1].seq, "AC-Def");
    }

    #[test]
    fn aligned_len_ignores_insertions_but_counts_gaps() {
        let record = MsaRecord {
            id: "hit".to_string(),
            description: "hit".to_string(),
            seq: "A-cdE".to_string(),
        };
        assert_eq!(record.aligned_len(), 3);
    }

    #[test]
    fn target_region_reads_fields_seven_and_eight() {
        let record = MsaRecord {
            id: "hit".to_string(),
            description: "hit 0.1 0.2 0.3 1 6 1 4 17".to_string(),
            seq: "ACD".to_string(),
        };
        assert_eq!(record.target_region().unwrap(), (4, 17));
    }

    #[test]
    fn target_region_fails_without_enough_fields() {
        let record = MsaRecord {
            id: "hit".to_string(),
            description: "hit 0.1 0.2".to_string(),
            seq: "ACD".to_string(),
        };
        assert!(record.target_region().is_err());
    }

    #[test]
    fn sequence_before_header_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_alignment(&dir, "ACD\n>query some protein\nACD\n");
        assert!(read_records(&path).is_err());
    }

    #[test]
    fn header_without_sequence_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_alignment(&dir, ">query some protein\n>hit another\nACD\n");
        assert!(read_records(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/no/such/alignment.a3m");
        assert!(read_records(&path).is_err());
    }
}
