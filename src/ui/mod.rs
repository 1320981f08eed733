mod app;
mod curve_plot;
mod results_table;

pub use app::CurveDashboard;
