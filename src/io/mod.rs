mod input;
mod output;

pub use input::{from_json, parse_document_str};
pub use output::{OutputDestination, OutputOptions, emit, to_json, to_json_pretty};
