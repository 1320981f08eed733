use egui::{Color32, Pos2};
use egui_plot::{Legend, MarkerShape, Plot, PlotUi};

use crate::dataset::{COUNT, MAG};
use crate::egui_plot_stuff::egui_line::EguiLine;
use crate::egui_plot_stuff::egui_points::EguiPoints;
use crate::engine::{PointClick, Series, Session};
use crate::fitter::polynomial::Polynomial;

/// Curve points, fit overlay and measurement markers on one plot. The item
/// styles persist; the points are rebuilt from the session on every change.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct CurvePlot {
    curve: EguiPoints,
    fit: EguiLine,
    measurement: EguiPoints,
}

impl Default for CurvePlot {
    fn default() -> Self {
        Self {
            curve: EguiPoints::new("Curve", Color32::BLUE, MarkerShape::Circle),
            fit: EguiLine::new("Fit", Color32::GREEN),
            measurement: EguiPoints::new("Measurements", Color32::ORANGE, MarkerShape::Square),
        }
    }
}

impl CurvePlot {
    pub fn sync(&mut self, session: &Session, fit_line_samples: usize) {
        match session.curve() {
            Some(curve) => self.curve.set_points(curve.points()),
            None => self.curve.clear_points(),
        }

        match session.fit_line(fit_line_samples) {
            Some(line) => self.fit.set_points(line),
            None => self.fit.clear_points(),
        }

        match session.measurement() {
            Some(measurement) => self.measurement.set_points(measurement.points()),
            None => self.measurement.clear_points(),
        }
    }

    pub fn fit_points(&self) -> &[[f64; 2]] {
        &self.fit.points
    }

    pub fn set_selected_measurement(&mut self, row: Option<usize>) {
        self.measurement.highlighted = row;
    }

    pub fn menu_ui(&mut self, ui: &mut egui::Ui) {
        self.curve.menu_button(ui);
        self.fit.menu_button(ui);
        self.measurement.menu_button(ui);
    }

    /// Draws the plot and returns the item a click landed on, if any.
    pub fn ui(&self, ui: &mut egui::Ui, click_radius: f32) -> Option<PointClick> {
        let plot = Plot::new("characteristic_curve")
            .legend(Legend::default())
            .x_axis_label(COUNT)
            .y_axis_label(MAG);

        plot.show(ui, |plot_ui| {
            self.curve.draw(plot_ui);
            self.fit.draw(plot_ui);
            self.measurement.draw(plot_ui);

            if !plot_ui.response().clicked() {
                return None;
            }
            let pointer = plot_ui.response().interact_pointer_pos()?;
            self.pick(plot_ui, pointer, click_radius)
        })
        .inner
    }

    /// Nearest item within `radius` screen points. Curve points win ties so
    /// that a point sitting on the fit line stays deletable.
    fn pick(&self, plot_ui: &PlotUi<'_>, pointer: Pos2, radius: f32) -> Option<PointClick> {
        let candidates = [
            (Series::Curve, self.curve.nearest(plot_ui, pointer)),
            (Series::Fit, self.fit.nearest(plot_ui, pointer)),
            (Series::Measurement, self.measurement.nearest(plot_ui, pointer)),
        ];

        let mut best: Option<(PointClick, f32)> = None;
        for (series, hit) in candidates {
            let Some((index, distance)) = hit else {
                continue;
            };
            if distance > radius {
                continue;
            }
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((PointClick::new(series, index), distance));
            }
        }

        best.map(|(click, _)| click)
    }
}

pub fn coefficients_ui(ui: &mut egui::Ui, fit: Option<&Polynomial>) {
    let Some(fit) = fit else {
        ui.label("No fit");
        return;
    };

    ui.horizontal_wrapped(|ui| {
        ui.label("Coefficients:");
        let degree = fit.degree();
        for (i, c) in fit.coefficients().iter().enumerate() {
            ui.label(format!("c{}: {c:.6e}", degree - i));
        }
    });
}
