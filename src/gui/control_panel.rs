//! Control Panel Widget
//! Left side panel with chart settings, report metadata, presets and export.

use crate::charts::{AspectRatio, ChartKind, Skin};
use crate::data::PresetKind;
use crate::gui::state::{LabState, StatusKind};
use crate::settings::Theme;
use egui::{Color32, ComboBox, DragValue, RichText, TextEdit};

const LABEL_WIDTH: f32 = 90.0;
const FIELD_WIDTH: f32 = 180.0;

/// Left side control panel.
pub struct ControlPanel {
    /// Text of the custom aspect ratio field.
    custom_aspect: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            custom_aspect: "5:2".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut LabState,
        theme: Theme,
        exporting: bool,
        last_export: bool,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🧪 Chartify Lab")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Instrument report charts")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);

        // ===== Theme =====
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Theme:"));
            for option in Theme::ALL {
                if ui.selectable_label(theme == option, option.label()).clicked() && theme != option {
                    action = ControlPanelAction::ThemeChanged(option);
                }
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Chart Section =====
        ui.label(RichText::new("📈 Chart").size(14.0).strong());
        ui.add_space(5.0);

        let view = &mut state.view;
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Type:"));
            ComboBox::from_id_salt("chart_kind")
                .width(FIELD_WIDTH)
                .selected_text(view.kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut view.kind, kind, kind.label());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Skin:"));
            ComboBox::from_id_salt("chart_skin")
                .width(FIELD_WIDTH)
                .selected_text(view.skin.label())
                .show_ui(ui, |ui| {
                    for skin in Skin::ALL {
                        ui.selectable_value(&mut view.skin, skin, skin.label());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Aspect:"));
            let custom = !AspectRatio::is_preset(&view.aspect_ratio);
            let selected = if custom { "custom" } else { view.aspect_ratio.as_str() };
            ComboBox::from_id_salt("aspect_ratio")
                .width(FIELD_WIDTH)
                .selected_text(selected.to_string())
                .show_ui(ui, |ui| {
                    for token in AspectRatio::PRESETS {
                        if ui.selectable_label(view.aspect_ratio == token, token).clicked() {
                            view.aspect_ratio = token.to_string();
                        }
                    }
                    if ui.selectable_label(custom, "custom").clicked() {
                        view.aspect_ratio = self.custom_aspect.clone();
                    }
                });
        });

        if !AspectRatio::is_preset(&view.aspect_ratio) {
            ui.horizontal(|ui| {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("W:H"));
                let response = ui.add(
                    TextEdit::singleline(&mut self.custom_aspect).desired_width(FIELD_WIDTH),
                );
                if response.changed() {
                    view.aspect_ratio = self.custom_aspect.clone();
                }
                if AspectRatio::parse(&self.custom_aspect) == AspectRatio::Auto {
                    ui.label(RichText::new("auto").size(11.0).color(Color32::GRAY));
                }
            });
        }

        ui.add_space(5.0);
        Self::text_row(ui, "Title:", &mut view.title);
        Self::text_row(ui, "X label:", &mut view.x_label);
        Self::text_row(ui, "Y label:", &mut view.y_label);

        ui.add_space(5.0);
        ui.checkbox(&mut view.show_legend, "Show legend");
        ui.horizontal(|ui| {
            ui.checkbox(&mut view.show_reference, "Reference line at y =");
            ui.add_enabled(
                view.show_reference,
                DragValue::new(&mut view.reference_y).speed(0.5),
            );
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Report Header Section =====
        ui.label(RichText::new("🏷 Report Header").size(14.0).strong());
        ui.add_space(5.0);

        let meta = &mut state.meta;
        let fields = &mut state.fields;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                Self::meta_row(ui, &mut fields.instrument, "Instrument:", &mut meta.instrument);
                Self::meta_row(ui, &mut fields.method, "Method:", &mut meta.method);
                Self::meta_row(ui, &mut fields.sample_id, "Sample ID:", &mut meta.sample_id);
                Self::meta_row(ui, &mut fields.analyst, "Analyst:", &mut meta.analyst);
                ui.horizontal(|ui| {
                    Self::meta_row(ui, &mut fields.date, "Date:", &mut meta.date);
                    if ui.small_button("⟳").on_hover_text("Set to now").clicked() {
                        action = ControlPanelAction::RefreshDate;
                    }
                });
                ui.checkbox(&mut fields.title, "Show title");
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Presets =====
        ui.label(RichText::new("🎲 Demo Data").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal_wrapped(|ui| {
            for kind in PresetKind::ALL {
                if ui.button(kind.label()).clicked() {
                    action = ControlPanelAction::LoadPreset(kind);
                }
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!exporting, |ui| {
                let label = if exporting { "⏳ Exporting..." } else { "🖼 Export PNG" };
                let button = egui::Button::new(RichText::new(label).size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });

            ui.add_space(5.0);
            ui.add_enabled_ui(last_export && !exporting, |ui| {
                if ui.small_button("📂 Open last export").clicked() {
                    action = ControlPanelAction::OpenLastExport;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = match state.status.kind {
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&state.status.text).size(11.0).color(status_color));

        action
    }

    fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
            ui.add(TextEdit::singleline(value).desired_width(FIELD_WIDTH));
        });
    }

    /// Visibility checkbox followed by the value field.
    fn meta_row(ui: &mut egui::Ui, shown: &mut bool, label: &str, value: &mut String) {
        ui.horizontal(|ui| {
            ui.checkbox(shown, "");
            ui.add_sized([LABEL_WIDTH - 24.0, 20.0], egui::Label::new(label));
            ui.add(TextEdit::singleline(value).desired_width(FIELD_WIDTH - 30.0));
        });
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ThemeChanged(Theme),
    LoadPreset(PresetKind),
    RefreshDate,
    ExportPng,
    OpenLastExport,
}
