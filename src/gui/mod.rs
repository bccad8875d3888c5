//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod data_table;
mod state;

pub use app::LabApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use data_table::{DataTable, DataTableAction};
pub use state::{LabState, Status, StatusKind};
