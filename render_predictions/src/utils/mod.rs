pub mod combine_alignment;
pub mod get_args;
pub mod parse_predictions;
pub mod render_html;
