//! Chartify Lab Main Application
//! Main window with control panel, data table and chart viewer.

use crate::export::{export_file_name, Exporter};
use crate::gui::state::{LabState, Status};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, DataTable};
use crate::settings::{Theme, ThemePreference};
use egui::SidePanel;
use std::path::PathBuf;

/// Main application window.
pub struct LabApp {
    state: LabState,
    control_panel: ControlPanel,
    data_table: DataTable,
    chart_viewer: ChartViewer,
    theme: ThemePreference,

    // Async export
    exporter: Exporter,
    last_export: Option<PathBuf>,
}

impl LabApp {
    pub fn new(cc: &eframe::CreationContext<'_>, theme: ThemePreference) -> Self {
        tracing::info!("Starting with theme '{}'", theme.theme());
        cc.egui_ctx.set_theme(theme.egui_preference());

        Self {
            state: LabState::new(),
            control_panel: ControlPanel::new(),
            data_table: DataTable::new(),
            chart_viewer: ChartViewer::new(),
            theme,
            exporter: Exporter::new(),
            last_export: None,
        }
    }

    /// Persist and apply a new theme
    fn handle_theme_changed(&mut self, ctx: &egui::Context, theme: Theme) {
        if let Err(e) = self.theme.set(theme) {
            tracing::warn!("Theme not saved: {}", e);
            self.state.status = Status::error(format!("Theme not saved: {}", e));
        }
        ctx.set_theme(self.theme.egui_preference());
    }

    /// Ask for a destination and render the chart there in the background
    fn handle_export_png(&mut self) {
        if self.exporter.is_busy() {
            return;
        }

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(export_file_name(&self.state.view.title))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        tracing::info!("Exporting chart to {}", output_path.display());
        match self.exporter.start(self.state.description(), output_path) {
            Ok(()) => self.state.status = Status::info("Exporting..."),
            Err(e) => self.state.status = Status::error(format!("Export error: {}", e)),
        }
    }

    /// Check for export results
    fn check_export_results(&mut self) {
        match self.exporter.poll() {
            Some(Ok(path)) => {
                tracing::info!("Export finished: {}", path.display());
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.state.status = Status::success(format!("Exported {}", name));
                self.last_export = Some(path);
            }
            Some(Err(e)) => {
                tracing::error!("Export failed: {}", e);
                self.state.status = Status::error(format!("Export error: {}", e));
            }
            None => {}
        }
    }

    fn handle_open_last_export(&mut self) {
        let Some(path) = &self.last_export else {
            return;
        };
        if let Err(e) = open::that(path) {
            tracing::warn!("Cannot open {}: {}", path.display(), e);
            self.state.status = Status::error(format!("Cannot open {}: {}", path.display(), e));
        }
    }

    fn handle_control_action(&mut self, ctx: &egui::Context, action: ControlPanelAction) {
        match action {
            ControlPanelAction::ThemeChanged(theme) => self.handle_theme_changed(ctx, theme),
            ControlPanelAction::LoadPreset(kind) => self.state.load_preset(kind.generate()),
            ControlPanelAction::RefreshDate => self.state.refresh_date(),
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::OpenLastExport => self.handle_open_last_export(),
            ControlPanelAction::None => {}
        }
    }
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_export_results();

        // Request repaint while exporting
        if self.exporter.is_busy() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(320.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        &mut self.state,
                        self.theme.theme(),
                        self.exporter.is_busy(),
                        self.last_export.is_some(),
                    );
                    self.handle_control_action(ctx, action);
                });
            });

        // Right panel - Data Table
        SidePanel::right("data_table")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                let action = self.data_table.show(ui, &mut self.state);
                action.apply(&mut self.state);
            });

        // Central panel - Chart Viewer
        let desc = self.state.description();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &desc);
        });
    }
}
