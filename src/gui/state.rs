//! Application State
//! View state plus the actions the panels trigger. Kept free of egui so the
//! data flows can be tested directly.

use crate::charts::{ChartDescription, HeaderFields, ReportMeta, ViewConfig};
use crate::data::{
    parse_pasted, to_delimited_text, Axis, CellEdit, Dataset, Point, Preset,
};

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Everything the user edits during a session.
#[derive(Debug, Clone)]
pub struct LabState {
    pub dataset: Dataset,
    pub view: ViewConfig,
    pub meta: ReportMeta,
    pub fields: HeaderFields,
    pub paste_text: String,
    pub status: Status,
}

impl Default for LabState {
    fn default() -> Self {
        Self {
            dataset: Dataset::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 4.0),
            ]),
            view: ViewConfig::default(),
            meta: ReportMeta::default(),
            fields: HeaderFields::default(),
            paste_text: String::new(),
            status: Status::info("Ready"),
        }
    }
}

impl LabState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current chart, recomputed from scratch.
    pub fn description(&self) -> ChartDescription {
        ChartDescription::build(&self.dataset, &self.view, &self.meta, &self.fields)
    }

    /// Swap in a preset's data, labels and title, and its instrument name.
    pub fn load_preset(&mut self, preset: Preset) {
        tracing::info!("Loading preset '{}' ({} points)", preset.title, preset.points.len());
        self.dataset.replace(preset.points);
        self.view.x_label = preset.x_label.to_string();
        self.view.y_label = preset.y_label.to_string();
        self.view.title = preset.title.to_string();
        self.meta.instrument = preset.instrument.to_string();
        self.status = Status::success(format!("Loaded {}", preset.title));
    }

    /// Parse the paste box. The dataset is replaced only if a row was accepted.
    pub fn apply_paste(&mut self) -> bool {
        let report = parse_pasted(&self.paste_text);
        let skipped = report.rejected.len();
        tracing::debug!(
            "Paste parsed: {} rows accepted, {} skipped",
            report.points.len(),
            skipped
        );

        if report.is_empty() {
            self.status = if skipped > 0 {
                Status::error(format!("No valid rows ({} lines skipped)", skipped))
            } else {
                Status::error("No valid rows")
            };
            return false;
        }

        let count = report.points.len();
        self.dataset.replace(report.points);
        self.status = if skipped > 0 {
            Status::info(format!("Loaded {} rows, skipped {} lines", count, skipped))
        } else {
            Status::success(format!("Loaded {} rows", count))
        };
        true
    }

    pub fn reset_paste(&mut self) {
        self.paste_text.clear();
    }

    /// Fill the paste box with the current rows.
    pub fn copy_rows_to_paste(&mut self) {
        self.paste_text = to_delimited_text(self.dataset.points());
    }

    pub fn add_row(&mut self) {
        let point = self.dataset.add_row();
        tracing::debug!("Added row at x = {}", point.x);
    }

    pub fn remove_row(&mut self, index: usize) {
        if let Err(e) = self.dataset.remove_row(index) {
            self.status = Status::error(e.to_string());
        }
    }

    /// Apply a typed cell value; rejected values are reported, not stored.
    pub fn edit_cell(&mut self, index: usize, axis: Axis, text: &str) -> bool {
        match self.dataset.update_cell(index, axis, text) {
            Ok(CellEdit::Accepted(_)) => true,
            Ok(CellEdit::Rejected(reason)) => {
                self.status = Status::error(format!("Row {}: {}", index + 1, reason));
                false
            }
            Err(e) => {
                self.status = Status::error(e.to_string());
                false
            }
        }
    }

    pub fn clear_rows(&mut self) {
        self.dataset.clear();
    }

    pub fn refresh_date(&mut self) {
        self.meta.date = ReportMeta::current_date();
    }
}
