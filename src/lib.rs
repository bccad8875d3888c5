//! Chartify Lab - interactive instrument report charts
//!
//! Points are entered, pasted or generated, drawn live with egui_plot and
//! exported as a PNG report card rendered with plotters.

pub mod charts;
pub mod data;
pub mod export;
pub mod gui;
pub mod settings;
