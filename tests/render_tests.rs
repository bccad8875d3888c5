use chartify_lab::charts::{
    ChartDescription, ChartKind, HeaderFields, RenderError, ReportMeta, Skin, StaticChartRenderer,
    ViewConfig, PIXEL_RATIO,
};
use chartify_lab::data::{Dataset, Point};
use chartify_lab::export::{write_png, Exporter};
use image::{ColorType, GenericImageView};
use std::sync::mpsc::channel;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn describe(points: Vec<Point>, kind: ChartKind, skin: Skin) -> ChartDescription {
    let view = ViewConfig {
        kind,
        skin,
        show_legend: true,
        show_reference: true,
        ..ViewConfig::default()
    };
    let meta = ReportMeta {
        date: "2024-01-02 03:04".to_string(),
        ..ReportMeta::default()
    };
    ChartDescription::build(&Dataset::new(points), &view, &meta, &HeaderFields::default())
}

fn sample() -> Vec<Point> {
    vec![Point::new(0.0, 10.0), Point::new(1.0, 15.0), Point::new(2.0, 23.0), Point::new(3.0, 61.0)]
}

/// Render on a worker so a stuck render fails the test instead of hanging it.
fn render_within(desc: ChartDescription, limit: Duration) -> Result<Vec<u8>, RenderError> {
    let (tx, rx) = channel();
    thread::spawn(move || {
        let _ = tx.send(StaticChartRenderer::render_png(&desc, PIXEL_RATIO));
    });
    rx.recv_timeout(limit).expect("render did not finish in time")
}

#[test]
fn every_kind_renders_opaque_png_at_double_density() {
    for kind in ChartKind::ALL {
        let desc = describe(sample(), kind, Skin::DarkLab);
        let png = StaticChartRenderer::render_png(&desc, PIXEL_RATIO).unwrap();
        let image = image::load_from_memory(&png).unwrap();

        let (lw, lh) = StaticChartRenderer::logical_size(&desc);
        assert_eq!(image.dimensions(), (lw * PIXEL_RATIO, lh * PIXEL_RATIO), "{:?}", kind);
        assert_eq!(image.color(), ColorType::Rgb8);

        // Inside the outer padding, clear of the border and the chart.
        let background = Skin::DarkLab.style().background;
        let pixel = image.to_rgb8().get_pixel(10, image.height() - 10).0;
        assert_eq!(pixel, [background.r(), background.g(), background.b()], "{:?}", kind);
    }
}

#[test]
fn empty_dataset_still_renders() {
    let desc = describe(Vec::new(), ChartKind::Line, Skin::Classic);
    let png = StaticChartRenderer::render_png(&desc, PIXEL_RATIO).unwrap();
    assert!(image::load_from_memory(&png).is_ok());
}

#[test]
fn extreme_magnitudes_render_in_bounded_time() {
    let cases = [
        vec![Point::new(-1.7e308, 0.0), Point::new(1.7e308, 1.0)],
        vec![Point::new(0.0, -1e308), Point::new(1.0, 1e308)],
        vec![Point::new(f64::MAX, f64::MAX), Point::new(f64::MAX, f64::MAX)],
    ];
    for points in cases {
        for kind in ChartKind::ALL {
            let desc = describe(points.clone(), kind, Skin::Classic);
            let png = render_within(desc, Duration::from_secs(60)).unwrap();
            assert!(image::load_from_memory(&png).is_ok(), "{:?}", kind);
        }
    }
}

#[test]
fn write_png_creates_decodable_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Mock_Instrument_Report.png");
    let desc = describe(sample(), ChartKind::Area, Skin::Minimal);

    let written = write_png(&desc, &path).unwrap();
    assert_eq!(written, path);

    let image = image::open(&path).unwrap();
    assert_eq!(
        image.dimensions(),
        StaticChartRenderer::pixel_size(&desc, PIXEL_RATIO)
    );
}

#[test]
fn exporter_writes_in_background() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.png");
    let mut exporter = Exporter::new();
    exporter
        .start(describe(sample(), ChartKind::Bar, Skin::Classic), path.clone())
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(60);
    let result = loop {
        if let Some(result) = exporter.poll() {
            break result;
        }
        assert!(Instant::now() < deadline, "export did not finish");
        thread::sleep(Duration::from_millis(10));
    };
    assert_eq!(result.unwrap(), path);
    assert!(image::open(&path).is_ok());
}
