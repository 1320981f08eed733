pub mod egui_line;
pub mod egui_points;

use egui::Pos2;
use egui_plot::{PlotPoint, PlotUi};

/// Index and screen distance of the point in `points` closest to `pointer`.
pub fn nearest_on_screen(
    plot_ui: &PlotUi<'_>,
    points: &[[f64; 2]],
    pointer: Pos2,
) -> Option<(usize, f32)> {
    points
        .iter()
        .enumerate()
        .map(|(i, &[x, y])| {
            let screen = plot_ui.screen_from_plot(PlotPoint::new(x, y));
            (i, screen.distance(pointer))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
