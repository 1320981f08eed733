use egui::{Color32, Pos2, Slider, Ui};
use egui_plot::{Line, LineStyle, PlotPoints, PlotUi};

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct EguiLine {
    pub draw: bool,
    pub name: String,
    pub width: f32,
    pub color: Color32,
    #[serde(skip)]
    pub style: Option<LineStyle>,
    #[serde(skip)]
    pub points: Vec<[f64; 2]>,
}

impl Default for EguiLine {
    fn default() -> Self {
        EguiLine {
            draw: true,
            name: "Line".to_owned(),
            width: 2.0,
            color: Color32::LIGHT_BLUE,
            style: Some(LineStyle::Solid),
            points: vec![],
        }
    }
}

impl EguiLine {
    pub fn new(name: &str, color: Color32) -> Self {
        EguiLine {
            name: name.to_owned(),
            color,
            ..Default::default()
        }
    }

    pub fn set_points(&mut self, points: Vec<[f64; 2]>) {
        self.points = points;
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    pub fn draw(&self, plot_ui: &mut PlotUi<'_>) {
        if !self.draw || self.points.is_empty() {
            return;
        }

        let mut line = Line::new(self.name.clone(), PlotPoints::new(self.points.clone()))
            .width(self.width)
            .color(self.color);

        if let Some(style) = self.style {
            line = line.style(style);
        }

        plot_ui.line(line);
    }

    /// Closest sampled vertex to `pointer` in screen space. The line is
    /// sampled densely enough that vertex distance stands in for segment
    /// distance.
    pub fn nearest(&self, plot_ui: &PlotUi<'_>, pointer: Pos2) -> Option<(usize, f32)> {
        if !self.draw {
            return None;
        }
        super::nearest_on_screen(plot_ui, &self.points, pointer)
    }

    pub fn menu_button(&mut self, ui: &mut Ui) {
        ui.menu_button(format!("{} Line", self.name), |ui| {
            ui.vertical(|ui| {
                ui.checkbox(&mut self.draw, "Draw Line");

                ui.horizontal(|ui| {
                    ui.label("Color");
                    ui.color_edit_button_srgba(&mut self.color);
                });

                ui.add(Slider::new(&mut self.width, 0.0..=10.0).text("Line Width"));

                ui.horizontal(|ui| {
                    ui.label("Line Style: ");
                    ui.radio_value(&mut self.style, Some(LineStyle::Solid), "Solid");
                    ui.radio_value(
                        &mut self.style,
                        Some(LineStyle::Dashed { length: 10.0 }),
                        "Dashed",
                    );
                    ui.radio_value(
                        &mut self.style,
                        Some(LineStyle::Dotted { spacing: 10.0 }),
                        "Dotted",
                    );
                });
            });
        });
    }
}
