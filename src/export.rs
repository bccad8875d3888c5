//! PNG Export Module
//! Writes the rendered chart to disk on a background thread.
//!
//! Only one export runs at a time: `start` refuses a new job while the
//! previous one is still pending. A job that panics is reported as
//! `ExportError::Panicked`, which needs the unwinding panic strategy
//! (the release profile keeps it).

use crate::charts::{ChartDescription, RenderError, StaticChartRenderer, PIXEL_RATIO};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Export failed unexpectedly: {0}")]
    Panicked(String),
    #[error("Export worker stopped unexpectedly")]
    WorkerLost,
}

/// File name for an export: whitespace runs become `_`, `.png` appended.
pub fn export_file_name(title: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "chart.png".to_string()
    } else {
        format!("{}.png", stem)
    }
}

/// Render `desc` at the export pixel ratio and write it to `path`.
pub fn write_png(desc: &ChartDescription, path: &Path) -> Result<PathBuf, ExportError> {
    let png = StaticChartRenderer::render_png(desc, PIXEL_RATIO)?;
    std::fs::write(path, png).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Single-flight background exporter polled from the UI loop.
#[derive(Default)]
pub struct Exporter {
    rx: Option<Receiver<Result<PathBuf, ExportError>>>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.rx.is_some()
    }

    /// Export a chart description to `path` in the background.
    pub fn start(&mut self, desc: ChartDescription, path: PathBuf) -> Result<(), ExportError> {
        self.start_job(move || write_png(&desc, &path))
    }

    /// Run any export job on a worker thread, unless one is already pending.
    pub fn start_job<F>(&mut self, job: F) -> Result<(), ExportError>
    where
        F: FnOnce() -> Result<PathBuf, ExportError> + Send + 'static,
    {
        if self.is_busy() {
            return Err(ExportError::Busy);
        }

        let (tx, rx) = channel();
        self.rx = Some(rx);
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(job))
                .unwrap_or_else(|payload| Err(ExportError::Panicked(panic_message(payload.as_ref()))));
            let _ = tx.send(result);
        });
        Ok(())
    }

    /// Check whether the pending job finished. Returns its outcome once.
    pub fn poll(&mut self) -> Option<Result<PathBuf, ExportError>> {
        let rx = self.rx.take()?;
        match rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => {
                // Put receiver back if still needed
                self.rx = Some(rx);
                None
            }
            Err(TryRecvError::Disconnected) => Some(Err(ExportError::WorkerLost)),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;
    use std::time::{Duration, Instant};

    fn wait_for(exporter: &mut Exporter) -> Result<PathBuf, ExportError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = exporter.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "export did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(export_file_name("Mock Instrument Report"), "Mock_Instrument_Report.png");
        assert_eq!(export_file_name("  HPLC \t  run\n2 "), "HPLC_run_2.png");
        assert_eq!(export_file_name("   "), "chart.png");
    }

    #[test]
    fn second_start_is_rejected_while_busy() {
        let (release_tx, release_rx) = sync_channel::<()>(0);
        let mut exporter = Exporter::new();

        exporter
            .start_job(move || {
                let _ = release_rx.recv();
                Ok(PathBuf::from("first.png"))
            })
            .unwrap();
        assert!(exporter.is_busy());
        assert!(matches!(
            exporter.start_job(|| Ok(PathBuf::from("second.png"))),
            Err(ExportError::Busy)
        ));
        assert!(exporter.poll().is_none());

        release_tx.send(()).unwrap();
        assert_eq!(wait_for(&mut exporter).unwrap(), PathBuf::from("first.png"));
        assert!(!exporter.is_busy());

        // Free again after completion.
        exporter
            .start_job(|| Ok(PathBuf::from("third.png")))
            .unwrap();
        assert_eq!(wait_for(&mut exporter).unwrap(), PathBuf::from("third.png"));
    }

    #[test]
    fn panicking_job_is_reported_and_frees_exporter() {
        let mut exporter = Exporter::new();
        exporter
            .start_job(|| panic!("font missing"))
            .unwrap();
        match wait_for(&mut exporter) {
            Err(ExportError::Panicked(message)) => assert_eq!(message, "font missing"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!exporter.is_busy());
    }

    #[test]
    fn failures_are_reported_once() {
        let mut exporter = Exporter::new();
        exporter
            .start_job(|| Err(ExportError::WorkerLost))
            .unwrap();
        assert!(matches!(wait_for(&mut exporter), Err(ExportError::WorkerLost)));
        assert!(exporter.poll().is_none());
    }
}
