/*
    Collapse the per-sequence score matrices along the alignment
        row count = longest insertion-free sequence of the MSA
        one 20 column block per sequence and alignment column
        lowercase insertion characters never reach the output
        gap columns keep the neutral defaults
    Cursor bookkeeping per sequence
        raw: next character of the aligned sequence
        matrix_row: next unconsumed row of the sequence's own matrix
*/

use log::debug;
use read_msa::{MsaRecord, GAP};
use super::parse_predictions::{ScoreMatrix, DEFAULT_SCORE};

/// One collapsed matrix for a whole MSA. A row is an alignment column
/// with insertions removed; each member sequence owns a block of 20
/// score columns plus one display character per row.
pub struct CombinedMatrix {
    pub num_rows: usize,
    pub num_sequences: usize,
    values: Vec<f64>,
    sequence_characters: Vec<String>
}

impl CombinedMatrix {
    fn new(num_rows: usize, num_sequences: usize) -> CombinedMatrix {
        CombinedMatrix {
            num_rows,
            num_sequences,
            values: vec![DEFAULT_SCORE; num_rows * 20 * num_sequences],
            sequence_characters: vec![String::new(); num_sequences]
        }
    }

    /// The 20 score values of sequence `seq` at alignment column `row`.
    pub fn block(&self, row: usize, seq: usize) -> &[f64] {
        let start = (row * self.num_sequences + seq) * 20;
        &self.values[start..start + 20]
    }

    fn block_mut(&mut self, row: usize, seq: usize) -> &mut [f64] {
        let start = (row * self.num_sequences + seq) * 20;
        &mut self.values[start..start + 20]
    }

    /// Character shown for sequence `seq` at alignment column `row`.
    /// Sequences that ran out of characters read as gaps.
    pub fn character(&self, row: usize, seq: usize) -> char {
        self.sequence_characters[seq].as_bytes().get(row)
            .map_or(GAP, |&byte| byte as char)
    }

    /// Absolute total difference between the score block of sequence
    /// `seq` and the query's block at alignment column `row`.
    pub fn delta_to_query(&self, row: usize, seq: usize) -> f64 {
        self.block(row, 0).iter()
            .zip(self.block(row, seq).iter())
            .map(|(query_value, value)| (query_value - value).abs())
            .sum()
    }
}

#[derive(Clone, Default)]
struct SequenceCursor {
    raw: usize,
    matrix_row: usize
}

/// Walk every sequence of the MSA column by column and copy the matching
/// rows of its own score matrix into the combined matrix. The first
/// record is the query; its matrix rows map 1:1 onto the rows of the
/// combined matrix.
pub fn combine(records: &[MsaRecord], matrices: &[ScoreMatrix]) -> Result<CombinedMatrix, String> {
    if records.is_empty() {
        return Err("Cannot combine an empty alignment".to_string());
    }
    if records.len() != matrices.len() {
        return Err(format!("{} alignment records but {} score matrices",
                           records.len(), matrices.len()));
    }
    let num_sequences = records.len();
    let num_rows = records.iter().map(|record| record.aligned_len()).max().unwrap_or(0);
    debug!("Combined matrix spans {} alignment columns over {} sequences", num_rows, num_sequences);
    let mut combined = CombinedMatrix::new(num_rows, num_sequences);
    let mut cursors = vec![SequenceCursor::default(); num_sequences];
    for row in 0..num_rows {
        for i in 0..num_sequences {
            let seq = records[i].seq.as_bytes();
            // insertions advance neither the combined row nor the
            // sequence's own matrix cursor
            while cursors[i].raw < seq.len() && seq[cursors[i].raw].is_ascii_lowercase() {
                cursors[i].raw += 1;
            }
            if cursors[i].raw >= seq.len() {
                continue;
            }
            let character = seq[cursors[i].raw] as char;
            combined.sequence_characters[i].push(character);
            if character != GAP {
                if cursors[i].matrix_row >= matrices[i].len() {
                    return Err(format!("{} ran out of prediction rows at alignment column {}",
                                       records[i].id, row + 1));
                }
                let scores = matrices[i].rows[cursors[i].matrix_row];
                combined.block_mut(row, i).copy_from_slice(&scores);
                cursors[i].matrix_row += 1;
            }
            cursors[i].raw += 1;
        }
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, seq: &str) -> MsaRecord {
        MsaRecord {
            id: id.to_string(),
            description: id.to_string(),
            seq: seq.to_string(),
        }
    }

    // matrix whose row r carries the value base + r/10 in every column
    fn counting_matrix(rows: usize, base: f64) -> ScoreMatrix {
        ScoreMatrix {
            rows: (0..rows).map(|r| [base + r as f64 / 10.0; 20]).collect(),
        }
    }

    #[test]
    fn gap_in_the_comparison_keeps_the_defaults() {
        let records = vec![record("query", "ACD"), record("hit", "A-D")];
        let matrices = vec![counting_matrix(3, 0.0), counting_matrix(2, 0.9)];
        let combined = combine(&records, &matrices).unwrap();
        assert_eq!(combined.num_rows, 3);
        assert_eq!(combined.block(0, 0)[0], 0.0);
        assert_eq!(combined.block(0, 1)[0], 0.9);
        assert_eq!(combined.block(1, 0)[0], 0.1);
        assert!(combined.block(1, 1).iter().all(|&v| v == DEFAULT_SCORE));
        assert_eq!(combined.block(2, 0)[0], 0.2);
        assert_eq!(combined.block(2, 1)[0], 1.0);
        assert_eq!(combined.character(1, 1), '-');
    }

    #[test]
    fn insertions_never_reach_the_output() {
        let records = vec![record("query", "ACD"), record("hit", "AghC-")];
        let matrices = vec![counting_matrix(3, 0.0), counting_matrix(2, 0.9)];
        let combined = combine(&records, &matrices).unwrap();
        assert_eq!(combined.num_rows, 3);
        assert_eq!(combined.character(0, 1), 'A');
        assert_eq!(combined.character(1, 1), 'C');
        assert_eq!(combined.character(2, 1), '-');
        // the insertion run consumed no matrix row, so 'C' still reads row 1
        assert_eq!(combined.block(1, 1)[0], 1.0);
    }

    #[test]
    fn exhausted_sequences_read_as_gaps() {
        let records = vec![record("query", "ACDE"), record("hit", "AC")];
        let matrices = vec![counting_matrix(4, 0.0), counting_matrix(2, 0.9)];
        let combined = combine(&records, &matrices).unwrap();
        assert_eq!(combined.character(2, 1), '-');
        assert_eq!(combined.character(3, 1), '-');
        assert!(combined.block(3, 1).iter().all(|&v| v == DEFAULT_SCORE));
    }

    #[test]
    fn delta_to_query_sums_absolute_differences() {
        let records = vec![record("query", "A"), record("hit", "A")];
        let matrices = vec![counting_matrix(1, 0.0), counting_matrix(1, 0.9)];
        let combined = combine(&records, &matrices).unwrap();
        let delta = combined.delta_to_query(0, 1);
        assert!((delta - 18.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_record_and_matrix_counts_are_fatal() {
        let records = vec![record("query", "A")];
        assert!(combine(&records, &[]).is_err());
    }

    #[test]
    fn too_short_matrix_is_fatal() {
        let records = vec![record("query", "ACD")];
        let matrices = vec![counting_matrix(2, 0.0)];
        assert!(combine(&records, &matrices).is_err());
    }
}
