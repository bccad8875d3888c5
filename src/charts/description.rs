//! Chart Description Module
//! Pure, fully-derived chart model shared by the preview and the PNG export.
//!
//! Rebuilt from (dataset, settings) on every change; nothing is patched in
//! place, so the preview and an export started from the same state always
//! agree.

use crate::charts::config::{
    AspectRatio, ChartKind, HeaderFields, ReportMeta, Skin, SkinStyle, ViewConfig,
};
use crate::charts::renderer::format_tick;
use crate::data::{Dataset, Point};

/// Largest magnitude an axis bound may take. Keeps every span finite.
pub const AXIS_LIMIT: f64 = 1e300;

/// One `label: value` entry in the chart header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderItem {
    pub label: &'static str,
    pub value: String,
}

/// Title line and metadata entries drawn above the plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub title: Option<String>,
    pub items: Vec<HeaderItem>,
}

impl Header {
    pub fn compose(title: &str, meta: &ReportMeta, fields: &HeaderFields) -> Self {
        let title = Some(title.trim())
            .filter(|t| fields.title && !t.is_empty())
            .map(str::to_string);

        let entries: [(&'static str, bool, &str); 5] = [
            ("Instrument", fields.instrument, meta.instrument.as_str()),
            ("Method", fields.method, meta.method.as_str()),
            ("Sample ID", fields.sample_id, meta.sample_id.as_str()),
            ("Analyst", fields.analyst, meta.analyst.as_str()),
            ("Date", fields.date, meta.date.as_str()),
        ];

        // Analyst is optional on the form; skip it when blank.
        let items = entries
            .into_iter()
            .filter(|(label, enabled, value)| {
                *enabled && !(*label == "Analyst" && value.trim().is_empty())
            })
            .map(|(label, _, value)| HeaderItem {
                label,
                value: value.to_string(),
            })
            .collect();

        Self { title, items }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.items.is_empty()
    }

    /// Metadata entries joined on one line.
    pub fn meta_line(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}: {}", item.label, item.value))
            .collect::<Vec<_>>()
            .join("   ")
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    /// Sorted by ascending x.
    pub points: Vec<Point>,
    pub kind: ChartKind,
    pub skin: Skin,
    pub style: SkinStyle,
    pub x_label: String,
    pub y_label: String,
    pub show_legend: bool,
    pub reference_y: Option<f64>,
    pub aspect: AspectRatio,
    pub header: Header,
}

impl ChartDescription {
    pub fn build(
        data: &Dataset,
        view: &ViewConfig,
        meta: &ReportMeta,
        fields: &HeaderFields,
    ) -> Self {
        Self {
            points: data.sorted(),
            kind: view.kind,
            skin: view.skin,
            style: view.skin.style(),
            x_label: view.x_label.clone(),
            y_label: view.y_label.clone(),
            show_legend: view.show_legend,
            reference_y: view
                .show_reference
                .then_some(view.reference_y)
                .filter(|y| y.is_finite()),
            aspect: AspectRatio::parse(&view.aspect_ratio),
            header: Header::compose(&view.title, meta, fields),
        }
    }

    /// Series name shown in the legend.
    pub fn series_name(&self) -> &str {
        if self.y_label.trim().is_empty() {
            "y"
        } else {
            &self.y_label
        }
    }

    /// Legend text for the reference line.
    pub fn reference_label(&self) -> Option<String> {
        self.reference_y.map(|y| format!("y = {}", format_tick(y)))
    }

    /// X extent of the data; bars get half a bar of room on each side.
    pub fn x_range(&self) -> (f64, f64) {
        let (min, max) = extent(self.points.iter().map(|p| p.x)).unwrap_or((0.0, 1.0));
        let (min, max) = if self.kind == ChartKind::Bar {
            let half = self.bar_width() / 2.0;
            (min - half, max + half)
        } else {
            (min, max)
        };
        widen(min, max)
    }

    /// Y extent covering the data, the reference line, and zero for filled kinds.
    pub fn y_range(&self) -> (f64, f64) {
        let values = self
            .points
            .iter()
            .map(|p| p.y)
            .chain(self.reference_y)
            .chain(matches!(self.kind, ChartKind::Area | ChartKind::Bar).then_some(0.0));

        let (min, max) = extent(values).unwrap_or((0.0, 1.0));
        // 5% of the span, computed on halves so it cannot overflow.
        let pad = (max / 2.0 - min / 2.0) * 0.1;
        widen(min - pad, max + pad)
    }

    /// Bar width: 80% of the tightest x spacing.
    pub fn bar_width(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[1].x - w[0].x)
            .filter(|gap| gap.is_finite() && *gap > 0.0)
            .fold(None, |min: Option<f64>, gap| Some(min.map_or(gap, |m| m.min(gap))))
            .map_or(0.8, |gap| gap * 0.8)
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Clamp to `AXIS_LIMIT` and keep a non-empty range when every value is equal.
fn widen(min: f64, max: f64) -> (f64, f64) {
    let min = min.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let max = max.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let scale = max.abs().max(min.abs()).max(1.0);
    if max - min > f64::EPSILON * scale {
        (min, max)
    } else {
        let half = (scale * 0.05).max(0.5);
        ((min - half).max(-AXIS_LIMIT), (max + half).min(AXIS_LIMIT))
    }
}
