#![warn(clippy::all, rust_2018_idioms)]

//! Calibration curve dashboard: load a curve, prune outliers, fit a
//! polynomial and apply it to measurements.

pub mod dataset;
pub mod egui_plot_stuff;
pub mod engine;
pub mod error;
pub mod fitter;
pub mod settings;
pub mod ui;
pub mod util;
