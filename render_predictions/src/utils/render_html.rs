/*
    Pure presentation of the combined matrix
        one table row per alignment column
        per sequence: character cell, delta-to-query cell, 20 score cells
        cell backgrounds through linear gradient palettes
    index.html links every processed identifier
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use log::info;
use read_msa::{MsaRecord, GAP};
use super::combine_alignment::CombinedMatrix;

// blue through white to red, spanning scores 0 to 1
pub const SCORE_PALETTE: [(u8, u8, u8); 3] = [(0, 0, 255), (255, 255, 255), (255, 0, 0)];
// white into near-black, spanning deltas 0 to 20
pub const DELTA_PALETTE: [(u8, u8, u8); 4] = [(255, 255, 255), (30, 30, 30), (25, 25, 25), (0, 0, 0)];

const INDEX_TITLE: &str = "VESPAl mutation effect predictions";

/// Intermediate RGB colour of a value in the range of minval to maxval
/// (inclusive) based on a colour palette representing the range.
pub fn gradient_color(minval: f64, maxval: f64, val: f64, color_palette: &[(u8, u8, u8)]) -> String {
    let max_index = color_palette.len() - 1;
    let mut delta = maxval - minval;
    if delta == 0.0 {
        delta = 1.0;
    }
    let v = ((val - minval) / delta * max_index as f64).clamp(0.0, max_index as f64);
    let i1 = v as usize;
    let i2 = (i1 + 1).min(max_index);
    let (r1, g1, b1) = color_palette[i1];
    let (r2, g2, b2) = color_palette[i2];
    let f = v - i1 as f64;
    let channel = |a: u8, b: u8| (f64::from(a) + f * (f64::from(b) - f64::from(a))) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r1, r2), channel(g1, g2), channel(b1, b2))
}

pub fn write_report(out_dir: &Path, identifier: &str, records: &[MsaRecord],
                    combined: &CombinedMatrix) -> Result<(), String> {
    let out_path = out_dir.join(format!("{}.html", identifier));
    info!("Output file: {:?}", out_path);
    let out_file = File::create(&out_path)
        .map_err(|x| format!("Unable to create {:?} - {}", out_path, x))?;
    let mut report_writer = BufWriter::new(out_file);

    write!(report_writer, "<!doctype html><html><head><title>{}</title></head>\n<body><table>",
           identifier).expect("Unable to write to file");

    write!(report_writer, "<tr><td>#</td>").expect("Unable to write to file");
    for record in records {
        write!(report_writer, "<td colspan=22 align=center>{}</td>", record.id)
            .expect("Unable to write to file");
    }
    write!(report_writer, "</tr>").expect("Unable to write to file");

    for row in 0..combined.num_rows {
        write!(report_writer, "<tr><td>{}</td>", row + 1).expect("Unable to write to file");
        for i in 0..combined.num_sequences {
            // amino-acid character, or gap once the sequence is exhausted
            let character = combined.character(row, i);
            write!(report_writer, "<td>{}</td>", character).expect("Unable to write to file");

            // delta to the query for non-query sequences, blank when gapped
            if i != 0 && character != GAP {
                let delta = combined.delta_to_query(row, i);
                write!(report_writer, "<td width=\"20\" style=\"background-color: {}\">&nbsp;</td>",
                       gradient_color(0.0, 20.0, delta, &DELTA_PALETTE))
                    .expect("Unable to write to file");
            } else {
                write!(report_writer, "<td>&nbsp;</td>").expect("Unable to write to file");
            }

            // one cell per individual SAV prediction value
            for value in combined.block(row, i) {
                write!(report_writer, "<td style=\"background-color: {}\">&nbsp;</td>",
                       gradient_color(0.0, 1.0, *value, &SCORE_PALETTE))
                    .expect("Unable to write to file");
            }
        }
        write!(report_writer, "</tr>").expect("Unable to write to file");
    }

    write!(report_writer, "</table></html>").expect("Unable to write to file");
    Ok(())
}

pub fn write_index(out_dir: &Path, identifiers: &[String]) -> Result<(), String> {
    let out_path = out_dir.join("index.html");
    info!("Output file: {:?}", out_path);
    let out_file = File::create(&out_path)
        .map_err(|x| format!("Unable to create {:?} - {}", out_path, x))?;
    let mut index_writer = BufWriter::new(out_file);

    write!(index_writer,
           "<!doctype html><html><head><title>{title}</title></head><body>\
            <div align=center><p><b>{title}</b></p><p>", title = INDEX_TITLE)
        .expect("Unable to write to file");
    for identifier in identifiers {
        write!(index_writer, "<a href=\"{id}.html\">{id}</a><br/>", id = identifier)
            .expect("Unable to write to file");
    }
    write!(index_writer, "</p></div></body></html>").expect("Unable to write to file");
    Ok(())
}
