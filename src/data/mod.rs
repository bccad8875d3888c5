//! Data module - dataset editing, paste parsing and demo presets

mod dataset;
mod parser;
pub mod presets;

pub use dataset::{Axis, CellEdit, CellRejection, DataError, Dataset, Point};
pub use parser::{parse_csv, parse_pasted, to_delimited_text, ParseReport, RejectedLine, RowRejection};
pub use presets::{Preset, PresetKind};
