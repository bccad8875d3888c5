//! Static Chart Renderer
//! Generates the exported chart image from the same description the preview
//! draws.
//!
//! Layout (logical pixels, multiplied by the pixel ratio on output):
//! 1. Header band: report title, then the enabled metadata entries
//! 2. Chart body: axes, optional grid, series, optional reference line and legend
//!
//! The whole canvas is filled with the skin's background first, so the PNG
//! never has transparent regions.

use crate::charts::config::ChartKind;
use crate::charts::description::{ChartDescription, Header};
use egui::Color32;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Logical export width.
pub const EXPORT_WIDTH: u32 = 1000;
/// Chart body height when the aspect ratio is "auto".
pub const AUTO_BODY_HEIGHT: u32 = 520;
/// Output pixels per logical pixel.
pub const PIXEL_RATIO: u32 = 2;

const PADDING: u32 = 16;
const TITLE_HEIGHT: u32 = 34;
const META_HEIGHT: u32 = 22;
/// Bounds on the chart body height, shared with the preview.
pub const MIN_BODY_HEIGHT: u32 = 200;
pub const MAX_BODY_HEIGHT: u32 = 2000;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Image buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// Renders chart descriptions to PNG bytes with plotters.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Height of the header band for this header (0 when empty).
    pub fn header_height(header: &Header) -> u32 {
        let mut height = 0;
        if header.title.is_some() {
            height += TITLE_HEIGHT;
        }
        if !header.items.is_empty() {
            height += META_HEIGHT;
        }
        if height > 0 {
            height + PADDING / 2
        } else {
            0
        }
    }

    /// Logical (width, height) of the exported image.
    pub fn logical_size(desc: &ChartDescription) -> (u32, u32) {
        let inner_width = EXPORT_WIDTH - 2 * PADDING;
        let body = desc
            .aspect
            .ratio()
            .map(|r| (inner_width as f64 / r).round() as u32)
            .unwrap_or(AUTO_BODY_HEIGHT)
            .clamp(MIN_BODY_HEIGHT, MAX_BODY_HEIGHT);

        (
            EXPORT_WIDTH,
            2 * PADDING + Self::header_height(&desc.header) + body,
        )
    }

    /// Output (width, height) in pixels for a pixel ratio.
    pub fn pixel_size(desc: &ChartDescription, pixel_ratio: u32) -> (u32, u32) {
        let (w, h) = Self::logical_size(desc);
        let ratio = pixel_ratio.max(1);
        (w * ratio, h * ratio)
    }

    /// Render the chart and encode it as PNG.
    pub fn render_png(desc: &ChartDescription, pixel_ratio: u32) -> Result<Vec<u8>, RenderError> {
        let ratio = pixel_ratio.max(1);
        let (width, height) = Self::pixel_size(desc, ratio);
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, desc, ratio as f64).map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::BufferSize { width, height })?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    fn draw(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        desc: &ChartDescription,
        scale: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let px = |v: u32| (v as f64 * scale).round() as u32;
        let font = |size: f64| FontDesc::new(FontFamily::SansSerif, size * scale, FontStyle::Normal);

        let style = desc.style;
        let background = rgb(style.background);
        let text = rgb(style.text);
        let border = rgb(style.border);
        let series = rgb(style.series);
        let reference = rgb(style.reference);

        // Opaque background and card border
        root.fill(&background)?;
        let (w, h) = root.dim_in_pixel();
        root.draw(&Rectangle::new(
            [(0, 0), (w as i32 - 1, h as i32 - 1)],
            border.stroke_width(px(1).max(1)),
        ))?;

        let inner = root.margin(px(PADDING), px(PADDING), px(PADDING), px(PADDING));
        let (header_area, body) =
            inner.split_vertically(px(Self::header_height(&desc.header)));

        // Header
        let mut y = 0;
        if let Some(title) = &desc.header.title {
            let title_font = FontDesc::new(FontFamily::SansSerif, 22.0 * scale, FontStyle::Bold)
                .color(&text);
            header_area.draw(&Text::new(title.as_str(), (0, y), title_font))?;
            y += px(TITLE_HEIGHT) as i32;
        }
        if !desc.header.items.is_empty() {
            let meta_font = font(13.0).color(&text.mix(0.8));
            header_area.draw(&Text::new(desc.header.meta_line(), (0, y), meta_font))?;
        }

        // Chart body
        let (x_min, x_max) = desc.x_range();
        let (y_min, y_max) = desc.y_range();
        let mut chart = ChartBuilder::on(&body)
            .margin(px(10))
            .x_label_area_size(px(48))
            .y_label_area_size(px(64))
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let tick_font = font(style.tick_size as f64).color(&text);
        let desc_font = font(14.0).color(&text);
        let tick_fmt = |v: &f64| format_tick(*v);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(desc.x_label.as_str())
            .y_desc(desc.y_label.as_str())
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&tick_fmt)
            .y_label_formatter(&tick_fmt)
            .label_style(tick_font)
            .axis_desc_style(desc_font)
            .axis_style(text.stroke_width(px(1).max(1)))
            .bold_line_style(text.mix(0.15).stroke_width(1))
            .light_line_style(text.mix(0.05).stroke_width(1));
        if !style.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        // Off-range coordinates are pinned to the axis edges.
        let points: Vec<(f64, f64)> = desc
            .points
            .iter()
            .map(|p| (p.x.clamp(x_min, x_max), p.y.clamp(y_min, y_max)))
            .collect();
        let stroke = series.stroke_width(px(2));
        let legend_len = px(20) as i32;

        match desc.kind {
            ChartKind::Line => {
                chart
                    .draw_series(LineSeries::new(points, stroke))?
                    .label(desc.series_name())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], stroke));
            }
            ChartKind::Area => {
                chart
                    .draw_series(
                        AreaSeries::new(points, 0.0, series.mix(0.2).filled()).border_style(stroke),
                    )?
                    .label(desc.series_name())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], stroke));
            }
            ChartKind::Bar => {
                let half = desc.bar_width() / 2.0;
                chart
                    .draw_series(points.iter().map(|&(x, y)| {
                        Rectangle::new(
                            [((x - half).max(x_min), 0.0), ((x + half).min(x_max), y)],
                            series.filled(),
                        )
                    }))?
                    .label(desc.series_name())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + legend_len, y + 5)], series.filled())
                    });
            }
            ChartKind::Scatter => {
                chart.draw_series(LineSeries::new(
                    points.iter().copied(),
                    series.mix(0.5).stroke_width(px(1).max(1)),
                ))?;
                let radius = px(3) as i32;
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), radius, series.filled())),
                    )?
                    .label(desc.series_name())
                    .legend(move |(x, y)| Circle::new((x + legend_len / 2, y), radius, series.filled()));
            }
        }

        if let (Some(ref_y), Some(label)) = (desc.reference_y, desc.reference_label()) {
            let dash = reference.stroke_width(px(2));
            chart
                .draw_series(DashedLineSeries::new(
                    {
                        let y = ref_y.clamp(y_min, y_max);
                        vec![(x_min, y), (x_max, y)]
                    },
                    px(6),
                    px(3),
                    dash,
                ))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], dash));
        }

        if desc.show_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(background.mix(0.9))
                .border_style(border)
                .label_font(font(12.0).color(&text))
                .draw()?;
        }

        Ok(())
    }
}

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

/// Short tick text: at most three decimals, trailing zeros removed.
pub fn format_tick(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
