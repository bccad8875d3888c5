//! Chart Viewer Widget
//! Central panel showing the chart card: skin background, report header and
//! the interactive plot sized by the aspect ratio setting.

use crate::charts::{ChartDescription, ChartPlotter};
use egui::{RichText, ScrollArea, Stroke};

const CARD_MARGIN: f32 = 16.0;

/// Chart card in the central panel.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the card for the current description.
    pub fn show(&mut self, ui: &mut egui::Ui, desc: &ChartDescription) {
        let style = desc.style;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(Stroke::new(1.0, style.border))
                    .fill(style.background)
                    .inner_margin(CARD_MARGIN)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ChartPlotter::draw_header(ui, desc);

                        if desc.points.is_empty() {
                            let height = ChartPlotter::plot_height(
                                desc,
                                ui.available_width(),
                                ui.available_height() - CARD_MARGIN,
                            );
                            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                                ui.centered_and_justified(|ui| {
                                    ui.label(
                                        RichText::new("No Data")
                                            .size(20.0)
                                            .color(ChartPlotter::empty_color(desc)),
                                    );
                                });
                            });
                            return;
                        }

                        let height = ChartPlotter::plot_height(
                            desc,
                            ui.available_width(),
                            ui.available_height() - CARD_MARGIN,
                        );
                        ChartPlotter::draw_chart(ui, desc, height);
                    });
            });
    }
}
