use clap::Parser;
use std::path::PathBuf;
use super::parse_predictions::AMINO_ACIDS;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory the HTML reports are written to. Created if absent. Default: "./html/"
    #[arg(default_value = "./html/")]
    pub output_dir: PathBuf
}

/// Everything the pipeline needs to know about its surroundings, built
/// once in main and passed down. Input locations follow the fixed layout
/// the prediction step writes: identifiers.txt next to alignment_files/
/// and vespa_predictions/.
pub struct Config {
    pub identifiers_file: PathBuf,
    pub alignment_dir: PathBuf,
    pub predictions_dir: PathBuf,
    pub output_dir: PathBuf,
    pub amino_acids: &'static str
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Config {
        Config {
            identifiers_file: PathBuf::from("identifiers.txt"),
            alignment_dir: PathBuf::from("alignment_files"),
            predictions_dir: PathBuf::from("vespa_predictions"),
            output_dir: cli.output_dir.clone(),
            amino_acids: AMINO_ACIDS
        }
    }
}
