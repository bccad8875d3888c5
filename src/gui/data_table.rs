//! Data Table Widget
//! Editable point rows plus the paste box for bulk loading.

use crate::data::{Axis, CellEdit, Dataset};
use crate::gui::state::LabState;
use egui::{Color32, RichText, ScrollArea, TextEdit};

const ROW_HEIGHT: f32 = 22.0;
const CELL_WIDTH: f32 = 90.0;

/// Per-row text buffers so partially typed numbers survive between frames.
#[derive(Default)]
pub struct DataTable {
    cells: Vec<[String; 2]>,
    synced_revision: Option<u64>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the text buffers after a structural change to the dataset.
    pub fn sync(&mut self, dataset: &Dataset) {
        if self.synced_revision == Some(dataset.revision()) {
            return;
        }
        self.cells = dataset
            .points()
            .iter()
            .map(|p| [p.x.to_string(), p.y.to_string()])
            .collect();
        self.synced_revision = Some(dataset.revision());
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut LabState) -> DataTableAction {
        self.sync(&state.dataset);
        let mut action = DataTableAction::None;

        ui.horizontal(|ui| {
            ui.label(RichText::new("📋 Data").size(14.0).strong());
            ui.label(
                RichText::new(format!("{} rows", state.dataset.len()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗑 Clear").clicked() {
                    action = DataTableAction::Clear;
                }
                if ui.small_button("➕ Add row").clicked() {
                    action = DataTableAction::AddRow;
                }
            });
        });
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.add_sized([30.0, ROW_HEIGHT], egui::Label::new(RichText::new("#").strong()));
            ui.add_sized([CELL_WIDTH, ROW_HEIGHT], egui::Label::new(RichText::new("X").strong()));
            ui.add_sized([CELL_WIDTH, ROW_HEIGHT], egui::Label::new(RichText::new("Y").strong()));
        });

        ScrollArea::vertical()
            .id_salt("data_rows")
            .max_height(260.0)
            .auto_shrink([false, true])
            .show_rows(ui, ROW_HEIGHT, self.cells.len(), |ui, row_range| {
                for index in row_range {
                    ui.horizontal(|ui| {
                        ui.add_sized(
                            [30.0, ROW_HEIGHT],
                            egui::Label::new(RichText::new(format!("{}", index + 1)).color(Color32::GRAY)),
                        );
                        for (slot, axis) in [(0, Axis::X), (1, Axis::Y)] {
                            let text = &mut self.cells[index][slot];
                            let valid = CellEdit::validate(text).is_accepted();
                            let mut edit = TextEdit::singleline(&mut *text).desired_width(CELL_WIDTH);
                            if !valid {
                                edit = edit.text_color(Color32::from_rgb(220, 53, 69));
                            }
                            if ui.add(edit).changed() {
                                action = DataTableAction::EditCell {
                                    index,
                                    axis,
                                    text: text.clone(),
                                };
                            }
                        }
                        if ui.small_button("✖").on_hover_text("Remove row").clicked() {
                            action = DataTableAction::RemoveRow(index);
                        }
                    });
                }
            });

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(4.0);

        ui.label(RichText::new("Paste x, y rows").size(12.0).strong());
        ui.label(
            RichText::new("One row per line; comma, semicolon, tab or spaces between values")
                .size(10.0)
                .color(Color32::GRAY),
        );
        ui.add(
            TextEdit::multiline(&mut state.paste_text)
                .desired_rows(5)
                .desired_width(f32::INFINITY)
                .code_editor()
                .hint_text("0, 0\n1, 1\n2, 4"),
        );
        ui.horizontal(|ui| {
            if ui.button("▶ Parse & Load").clicked() {
                action = DataTableAction::ParseAndLoad;
            }
            if ui.button("Reset").clicked() {
                action = DataTableAction::ResetPaste;
            }
            if ui.button("Copy rows").on_hover_text("Fill the box with the current rows").clicked() {
                action = DataTableAction::CopyRows;
            }
        });

        action
    }
}

/// Actions triggered by the data table
#[derive(Debug, Clone, PartialEq)]
pub enum DataTableAction {
    None,
    AddRow,
    RemoveRow(usize),
    EditCell { index: usize, axis: Axis, text: String },
    Clear,
    ParseAndLoad,
    ResetPaste,
    CopyRows,
}

impl DataTableAction {
    /// Apply the action to the session state.
    pub fn apply(self, state: &mut LabState) {
        match self {
            DataTableAction::None => {}
            DataTableAction::AddRow => state.add_row(),
            DataTableAction::RemoveRow(index) => state.remove_row(index),
            DataTableAction::EditCell { index, axis, text } => {
                state.edit_cell(index, axis, &text);
            }
            DataTableAction::Clear => state.clear_rows(),
            DataTableAction::ParseAndLoad => {
                state.apply_paste();
            }
            DataTableAction::ResetPaste => state.reset_paste(),
            DataTableAction::CopyRows => state.copy_rows_to_paste(),
        }
    }
}
