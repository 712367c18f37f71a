/*
    Build the score matrix for one sequence
        First pass: find the highest position index referenced
            matrix length = highest index + 1
        Reset the buffer
        Second pass: fill the matrix
            record format: <fromAA><position><toAA>;<score>
            header line starts with "Mutant"
    Every cell starts at the neutral 0.5
*/

use std::io::BufRead;
use std::path::PathBuf;
use log::{debug, info};
use read_msa::lib_utils::struct_helper::FileBufferHelper;

pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";
pub const DEFAULT_SCORE: f64 = 0.5;
const HEADER_PREFIX: &str = "Mutant";

/// Per-position, per-amino-acid substitution scores for one sequence.
/// Columns follow the order of AMINO_ACIDS.
pub struct ScoreMatrix {
    pub rows: Vec<[f64; 20]>
}

impl ScoreMatrix {
    fn with_length(length: usize) -> ScoreMatrix {
        ScoreMatrix { rows: vec![[DEFAULT_SCORE; 20]; length] }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Restrict the matrix to the inclusive region [t_start, t_end] of
    /// its own positions.
    pub fn slice_region(self, t_start: usize, t_end: usize) -> Result<ScoreMatrix, String> {
        if t_start > t_end || t_end >= self.rows.len() {
            return Err(format!("Target region {} - {} falls outside a matrix of {} rows",
                               t_start, t_end, self.rows.len()));
        }
        Ok(ScoreMatrix { rows: self.rows[t_start..=t_end].to_vec() })
    }
}

pub fn parse_predictions(infile: &PathBuf, amino_acids: &str) -> Result<ScoreMatrix, String> {
    let mut prediction_file = FileBufferHelper::new(infile)?;
    let length = assess_length(&mut prediction_file, amino_acids)?;
    info!("Prediction matrix of {:?} holds {} positions", prediction_file.path, length);
    prediction_file.buffer_reset();
    debug!("Reset file buffer position to start");
    fill_matrix(&mut prediction_file, length, amino_acids)
}

// First pass over the record lines, sizing the matrix
fn assess_length(file: &mut FileBufferHelper, amino_acids: &str) -> Result<usize, String> {
    let mut max_index: Option<usize> = None;
    while file.buffer_reader.read_line(&mut file.line).unwrap_or(0) >= 1 {
        let record = parse_record(file.line.trim(), amino_acids)?;
        if let Some((position, _, _)) = record {
            max_index = Some(max_index.map_or(position, |current| current.max(position)));
        }
        file.line.clear();
    }
    match max_index {
        Some(index) => Ok(index + 1),
        None => Err(format!("No prediction records found in {:?}", file.path))
    }
}

// Second pass, writing scores into the sized matrix
fn fill_matrix(file: &mut FileBufferHelper, length: usize, amino_acids: &str) -> Result<ScoreMatrix, String> {
    let mut matrix = ScoreMatrix::with_length(length);
    while file.buffer_reader.read_line(&mut file.line).unwrap_or(0) >= 1 {
        let record = parse_record(file.line.trim(), amino_acids)?;
        if let Some((position, column, score)) = record {
            if position >= length {
                return Err(format!("Position {} outside the {} sized rows of {:?}",
                                   position, length, file.path));
            }
            matrix.rows[position][column] = score;
        }
        file.line.clear();
    }
    Ok(matrix)
}

// One "<fromAA><position><toAA>;<score>" line into (position, column, score).
// Header and blank lines read as None.
fn parse_record(line: &str, amino_acids: &str) -> Result<Option<(usize, usize, f64)>, String> {
    if line.is_empty() || line.starts_with(HEADER_PREFIX) {
        return Ok(None);
    }
    let mut fields = line.splitn(2, ';');
    let (id, score_field) = match (fields.next(), fields.next()) {
        (Some(id), Some(score_field)) => (id.trim(), score_field.trim()),
        _ => return Err(format!("Record without a ';' separator: {}", line))
    };
    let to_aa = match id.chars().last() {
        Some(character) => character,
        None => return Err(format!("Record without a mutant identifier: {}", line))
    };
    let column = match amino_acids.find(to_aa) {
        Some(column) => column,
        None => return Err(format!("Unknown amino acid code '{}' in record {}", to_aa, id))
    };
    let position = id.trim_matches(|c: char| c.is_ascii_alphabetic())
        .parse::<usize>()
        .map_err(|x| format!("Position of record {} is not numeric - {}", id, x))?;
    let score = score_field.parse::<f64>()
        .map_err(|x| format!("Score of record {} is not numeric - {}", id, x))?;
    Ok(Some((position, column, score)))
}
