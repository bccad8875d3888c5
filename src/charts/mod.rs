//! Charts module - Chart configuration, description and rendering

mod config;
mod description;
mod plotter;
mod renderer;

pub use config::{AspectRatio, ChartKind, HeaderFields, ReportMeta, Skin, SkinStyle, ViewConfig};
pub use description::{ChartDescription, Header, HeaderItem};
pub use plotter::{ChartPlotter, MIN_PLOT_HEIGHT};
pub use renderer::{format_tick, RenderError, StaticChartRenderer, PIXEL_RATIO};
