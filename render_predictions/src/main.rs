/*
Render VESPA mutation-effect predictions for aligned sequences as HTML
    + read the list of identifiers to process
    + for every identifier
        + read the MSA from its alignment file
        + parse one prediction file per aligned sequence
            + slice non-query matrices to their target region
        + collapse the per-sequence matrices into one combined matrix
            + insertions removed, rows follow the query sequence
        + write one colour-coded table per identifier
    + write an index page linking every identifier

Implement clap to parse cli

Libs
    get arguments
    read_msa: read A3M/FASTA records and their target regions
    parse_predictions: per-sequence score matrix from a prediction file
    combine_alignment: collapse the matrices along the alignment
    render_html: gradient colours, per-identifier tables, index page

Arguments
    optional output directory, default ./html/
*/

mod utils;
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;
use std::process;
use clap::Parser;
use log::{debug, error, info};
use read_msa::lib_utils::struct_helper::FileBufferHelper;
use utils::get_args::{Cli, Config};
use utils::parse_predictions::parse_predictions;
use utils::combine_alignment::combine;
use utils::render_html::{write_report, write_index};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Parsing commandline arguments");
    let config = Config::from_cli(&cli);
    if let Err(x) = fs::create_dir_all(&config.output_dir) {
        error!("Unable to create output directory {:?} - {}", config.output_dir, x);
        process::exit(1);
    }
    let identifiers = match read_identifiers(&config.identifiers_file) {
        Ok(identifiers) => identifiers,
        Err(x) => {
            error!("{}", x);
            process::exit(1);
        }
    };
    for identifier in &identifiers {
        info!("Processing: {}", identifier);
        if let Err(x) = process_identifier(identifier, &config) {
            error!("Skipping {} - {}", identifier, x);
        }
    }
    if let Err(x) = write_index(&config.output_dir, &identifiers) {
        error!("{}", x);
        process::exit(1);
    }
}

// one identifier per line, blanks skipped, reports come out sorted
fn read_identifiers(infile: &PathBuf) -> Result<Vec<String>, String> {
    let mut identifier_file = FileBufferHelper::new(infile)?;
    let mut identifiers: Vec<String> = Vec::new();
    while identifier_file.buffer_reader.read_line(&mut identifier_file.line).unwrap_or(0) >= 1 {
        let trimmed = identifier_file.line.trim();
        if !trimmed.is_empty() {
            identifiers.push(trimmed.to_string());
        }
        identifier_file.line.clear();
    }
    if identifiers.is_empty() {
        return Err(format!("No identifiers found in {:?}", infile));
    }
    identifiers.sort();
    Ok(identifiers)
}

fn process_identifier(identifier: &str, config: &Config) -> Result<(), String> {
    let alignment_path = config.alignment_dir.join(format!("{}.a3m", identifier));
    let records = read_msa::read_records(&alignment_path)?;
    debug!("{} holds {} aligned sequences", identifier, records.len());

    let mut matrices = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let prediction_path = config.predictions_dir.join(format!("{}.csv", record.id));
        let matrix = parse_predictions(&prediction_path, config.amino_acids)?;
        // the query matrix is used as-is, every other matrix is
        // restricted to the region aligned against the query
        let matrix = if i == 0 {
            matrix
        } else {
            let (t_start, t_end) = record.target_region()?;
            matrix.slice_region(t_start, t_end)?
        };
        matrices.push(matrix);
    }

    let combined = combine(&records, &matrices)?;
    write_report(&config.output_dir, identifier, &records, &combined)
}
