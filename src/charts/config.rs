//! Chart Configuration Module
//! Chart kinds, skins, aspect ratios and the report header settings.

use egui::Color32;

/// How the series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Bar,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Bar,
        ChartKind::Scatter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Area => "Area",
            ChartKind::Bar => "Bar",
            ChartKind::Scatter => "Scatter",
        }
    }
}

/// Named visual style for the chart card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    #[default]
    Classic,
    DarkLab,
    Minimal,
}

/// Resolved colors and flags for a skin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinStyle {
    pub background: Color32,
    pub text: Color32,
    pub border: Color32,
    pub series: Color32,
    pub reference: Color32,
    pub grid: bool,
    pub tick_size: f32,
}

// Palette
const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
const SLATE_100: Color32 = Color32::from_rgb(241, 245, 249);
const SLATE_200: Color32 = Color32::from_rgb(226, 232, 240);
const SLATE_700: Color32 = Color32::from_rgb(51, 65, 85);
const SLATE_900: Color32 = Color32::from_rgb(15, 23, 42);
const BLUE: Color32 = Color32::from_rgb(37, 99, 235);
const SKY: Color32 = Color32::from_rgb(56, 189, 248);
const RED: Color32 = Color32::from_rgb(220, 53, 69);

impl Skin {
    pub const ALL: [Skin; 3] = [Skin::Classic, Skin::DarkLab, Skin::Minimal];

    pub fn label(&self) -> &'static str {
        match self {
            Skin::Classic => "Classic",
            Skin::DarkLab => "Dark Lab",
            Skin::Minimal => "Minimal",
        }
    }

    pub fn style(&self) -> SkinStyle {
        match self {
            Skin::Classic => SkinStyle {
                background: WHITE,
                text: SLATE_900,
                border: SLATE_200,
                series: BLUE,
                reference: RED,
                grid: true,
                tick_size: 12.0,
            },
            Skin::DarkLab => SkinStyle {
                background: SLATE_900,
                text: SLATE_100,
                border: SLATE_700,
                series: SKY,
                reference: RED,
                grid: true,
                tick_size: 12.0,
            },
            Skin::Minimal => SkinStyle {
                background: WHITE,
                text: SLATE_900,
                border: SLATE_200,
                series: SLATE_700,
                reference: RED,
                grid: false,
                tick_size: 12.0,
            },
        }
    }
}

/// Width:height proportion of the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectRatio {
    /// Fill the available height.
    #[default]
    Auto,
    Fixed { width: f64, height: f64 },
}

impl AspectRatio {
    /// Choices offered in the aspect ratio picker.
    pub const PRESETS: [&'static str; 6] = ["auto", "16:9", "4:3", "1:1", "3:2", "21:9"];

    pub fn is_preset(token: &str) -> bool {
        Self::PRESETS.iter().any(|preset| *preset == token)
    }

    /// Parse a `W:H` token. Anything that is not two positive finite numbers
    /// around a single colon falls back to `Auto`.
    pub fn parse(token: &str) -> Self {
        let Some((w, h)) = token.trim().split_once(':') else {
            return AspectRatio::Auto;
        };
        match (w.trim().parse::<f64>(), h.trim().parse::<f64>()) {
            (Ok(width), Ok(height))
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 =>
            {
                AspectRatio::Fixed { width, height }
            }
            _ => AspectRatio::Auto,
        }
    }

    /// Width divided by height, if fixed.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            AspectRatio::Auto => None,
            AspectRatio::Fixed { width, height } => Some(width / height),
        }
    }

    /// Container height for a given width, if fixed.
    pub fn height_for(&self, width: f32) -> Option<f32> {
        self.ratio().map(|r| (width as f64 / r) as f32)
    }
}

/// Everything the user configures about the chart itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub kind: ChartKind,
    pub skin: Skin,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub show_legend: bool,
    pub show_reference: bool,
    pub reference_y: f64,
    /// Raw aspect token as chosen or typed, e.g. "auto" or "16:9".
    pub aspect_ratio: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            skin: Skin::Classic,
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            title: "Mock Instrument Report".to_string(),
            show_legend: false,
            show_reference: false,
            reference_y: 50.0,
            aspect_ratio: "auto".to_string(),
        }
    }
}

/// Report metadata printed in the chart header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub instrument: String,
    pub method: String,
    pub sample_id: String,
    pub analyst: String,
    pub date: String,
}

impl ReportMeta {
    pub fn current_date() -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
    }
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            instrument: "Generic Analyzer".to_string(),
            method: "Method-001".to_string(),
            sample_id: "S-001".to_string(),
            analyst: String::new(),
            date: Self::current_date(),
        }
    }
}

/// Which header entries are shown on screen and in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub title: bool,
    pub instrument: bool,
    pub method: bool,
    pub sample_id: bool,
    pub analyst: bool,
    pub date: bool,
}

impl Default for HeaderFields {
    fn default() -> Self {
        Self {
            title: true,
            instrument: true,
            method: true,
            sample_id: true,
            analyst: true,
            date: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_fixed_ratio() {
        let ratio = AspectRatio::parse("16:9");
        assert_eq!(ratio, AspectRatio::Fixed { width: 16.0, height: 9.0 });
        assert_relative_eq!(ratio.ratio().unwrap(), 16.0 / 9.0);
        assert_eq!(AspectRatio::parse(" 1.5 : 1 ").ratio(), Some(1.5));
    }

    #[test]
    fn invalid_tokens_fall_back_to_auto() {
        for token in ["auto", "", "16x9", "16:", ":9", "0:1", "4:-3", "a:b", "1:2:3", "inf:1"] {
            assert_eq!(AspectRatio::parse(token), AspectRatio::Auto, "token {token:?}");
        }
    }

    #[test]
    fn fixed_height_follows_width() {
        let ratio = AspectRatio::parse("4:3");
        assert_relative_eq!(ratio.height_for(800.0).unwrap(), 600.0);
        assert_eq!(AspectRatio::Auto.height_for(800.0), None);
    }

    #[test]
    fn minimal_skin_hides_grid_only() {
        let classic = Skin::Classic.style();
        let minimal = Skin::Minimal.style();
        assert!(classic.grid);
        assert!(!minimal.grid);
        assert_eq!(classic.background, minimal.background);
        assert_ne!(Skin::DarkLab.style().background, classic.background);
    }
}
