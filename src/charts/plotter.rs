//! Chart Plotter Module
//! Draws the interactive preview of a chart description using egui_plot.

use crate::charts::config::ChartKind;
use crate::charts::description::ChartDescription;
use crate::charts::renderer::{MAX_BODY_HEIGHT, MIN_BODY_HEIGHT};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoints, Points};

/// Minimum preview height when the aspect ratio is "auto".
pub const MIN_PLOT_HEIGHT: f32 = 320.0;

/// Creates the on-screen chart from a description.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the header block (title + metadata line) in the skin's text color.
    pub fn draw_header(ui: &mut egui::Ui, desc: &ChartDescription) {
        if desc.header.is_empty() {
            return;
        }
        let text = desc.style.text;

        ui.horizontal_wrapped(|ui| {
            if let Some(title) = &desc.header.title {
                ui.label(RichText::new(title).size(20.0).strong().color(text));
                ui.add_space(16.0);
            }
            for item in &desc.header.items {
                ui.label(
                    RichText::new(format!("{}: {}", item.label, item.value))
                        .size(12.0)
                        .color(text.gamma_multiply(0.8)),
                );
                ui.add_space(10.0);
            }
        });
        ui.add_space(8.0);
    }

    /// Draw the plot itself at the given height.
    pub fn draw_chart(ui: &mut egui::Ui, desc: &ChartDescription, height: f32) {
        let style = desc.style;

        // egui_plot paints its frame and axis text from the current visuals.
        ui.visuals_mut().extreme_bg_color = style.background;
        ui.visuals_mut().override_text_color = Some(style.text);

        let (x_min, x_max) = desc.x_range();
        let (y_min, y_max) = desc.y_range();

        let mut plot = Plot::new("chart_preview")
            .height(height)
            .show_grid(style.grid)
            .x_axis_label(desc.x_label.clone())
            .y_axis_label(desc.y_label.clone())
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max)
            .allow_scroll(false);

        if desc.show_legend {
            plot = plot.legend(Legend::default());
        }

        let name = desc.series_name().to_string();
        let series: Vec<[f64; 2]> = desc.points.iter().map(|p| [p.x, p.y]).collect();

        plot.show(ui, |plot_ui| {
            match desc.kind {
                ChartKind::Line => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(series.clone()))
                            .color(style.series)
                            .width(2.0)
                            .name(&name),
                    );
                }
                ChartKind::Area => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(series.clone()))
                            .color(style.series)
                            .width(2.0)
                            .fill(0.0_f32)
                            .name(&name),
                    );
                }
                ChartKind::Bar => {
                    let width = desc.bar_width();
                    let bars = desc
                        .points
                        .iter()
                        .map(|p| Bar::new(p.x, p.y).width(width).fill(style.series))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(style.series).name(&name));
                }
                ChartKind::Scatter => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(series.clone()))
                            .color(style.series.gamma_multiply(0.5))
                            .width(1.0),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(series.clone()))
                            .radius(3.0)
                            .color(style.series)
                            .name(&name),
                    );
                }
            }

            if let (Some(y), Some(label)) = (desc.reference_y, desc.reference_label()) {
                plot_ui.hline(
                    HLine::new(y)
                        .stroke(Stroke::new(1.5, style.reference))
                        .style(LineStyle::Dashed { length: 6.0 })
                        .name(label),
                );
            }
        });
    }

    /// Height of the plot area for the available width and height.
    /// Fixed ratios use the same bounds as the exported chart body.
    pub fn plot_height(desc: &ChartDescription, width: f32, available_height: f32) -> f32 {
        match desc.aspect.height_for(width) {
            Some(height) => height.clamp(MIN_BODY_HEIGHT as f32, MAX_BODY_HEIGHT as f32),
            None => available_height.max(MIN_PLOT_HEIGHT),
        }
    }

    /// Placeholder text color when there is nothing to draw.
    pub fn empty_color(desc: &ChartDescription) -> Color32 {
        desc.style.text.gamma_multiply(0.6)
    }
}
