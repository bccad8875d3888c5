//! Chartify Lab - Instrument Report Chart Editor
//!
//! Desktop application for entering x/y data and exporting styled report charts.

use anyhow::{anyhow, Context, Result};
use chartify_lab::gui::LabApp;
use chartify_lab::settings::{FileSettingsStore, MemorySettingsStore, SettingsStore, ThemePreference};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(version, about = "Instrument report chart editor")]
struct Args {
    /// Enable logging to specified file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

/// Install a file logger when `--log` is given; otherwise logging stays off.
fn init_logging(log: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create log file {}", path.display()))?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::info!("Starting Chartify Lab");
    Ok(())
}

fn settings_store(path: Option<PathBuf>) -> Box<dyn SettingsStore> {
    let path = match path {
        Some(path) => path,
        None => match FileSettingsStore::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("{}; settings will not be saved", e);
                return Box::new(MemorySettingsStore::default());
            }
        },
    };
    let store = FileSettingsStore::open(path);
    tracing::debug!("Using settings file {}", store.path().display());
    Box::new(store)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;

    let theme = ThemePreference::load(settings_store(args.settings));

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Chartify Lab"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Chartify Lab",
        options,
        Box::new(move |cc| Ok(Box::new(LabApp::new(cc, theme)))),
    )
    .map_err(|e| anyhow!("{}", e))
}
