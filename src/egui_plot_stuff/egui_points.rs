use egui::{Color32, DragValue, Pos2, Ui};
use egui_plot::{MarkerShape, PlotUi, Points};

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct EguiPoints {
    pub draw: bool,
    pub name: String,
    #[serde(skip)]
    pub points: Vec<[f64; 2]>,
    #[serde(skip)]
    pub shape: Option<MarkerShape>,
    pub color: Color32,
    pub filled: bool,
    pub radius: f32,
    /// Index of a point drawn again on top with a larger marker.
    #[serde(skip)]
    pub highlighted: Option<usize>,
}

impl Default for EguiPoints {
    fn default() -> Self {
        EguiPoints {
            draw: true,
            name: "Points".to_owned(),
            points: vec![],
            shape: Some(MarkerShape::Circle),
            color: Color32::BLUE,
            filled: true,
            radius: 4.0,
            highlighted: None,
        }
    }
}

impl EguiPoints {
    pub fn new(name: &str, color: Color32, shape: MarkerShape) -> Self {
        EguiPoints {
            name: name.to_owned(),
            color,
            shape: Some(shape),
            ..Default::default()
        }
    }

    pub fn set_points(&mut self, points: Vec<[f64; 2]>) {
        self.points = points;
        self.highlighted = None;
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.highlighted = None;
    }

    pub fn draw(&self, plot_ui: &mut PlotUi<'_>) {
        if !self.draw || self.points.is_empty() {
            return;
        }

        let mut points = Points::new(self.name.clone(), self.points.clone())
            .color(self.color)
            .radius(self.radius)
            .filled(self.filled);

        if let Some(shape) = self.shape {
            points = points.shape(shape);
        }

        plot_ui.points(points);

        if let Some(&point) = self.highlighted.and_then(|i| self.points.get(i)) {
            plot_ui.points(
                Points::new(format!("{} (selected)", self.name), vec![point])
                    .color(Color32::RED)
                    .radius(self.radius * 2.0)
                    .shape(MarkerShape::Diamond)
                    .filled(false),
            );
        }
    }

    /// Closest drawn point to `pointer` in screen space.
    pub fn nearest(&self, plot_ui: &PlotUi<'_>, pointer: Pos2) -> Option<(usize, f32)> {
        if !self.draw {
            return None;
        }
        super::nearest_on_screen(plot_ui, &self.points, pointer)
    }

    pub fn menu_button(&mut self, ui: &mut Ui) {
        ui.menu_button(format!("{} Points", self.name), |ui| {
            ui.vertical(|ui| {
                ui.checkbox(&mut self.draw, "Draw Markers");
                ui.checkbox(&mut self.filled, "Filled");

                ui.horizontal(|ui| {
                    ui.label("Color");
                    ui.color_edit_button_srgba(&mut self.color);
                });

                ui.add(
                    DragValue::new(&mut self.radius)
                        .speed(0.1)
                        .range(0.5..=20.0)
                        .prefix("Radius: "),
                );

                ui.horizontal_wrapped(|ui| {
                    ui.label("Marker Shape: ");
                    ui.selectable_value(&mut self.shape, Some(MarkerShape::Circle), "Circle");
                    ui.selectable_value(&mut self.shape, Some(MarkerShape::Diamond), "Diamond");
                    ui.selectable_value(&mut self.shape, Some(MarkerShape::Square), "Square");
                    ui.selectable_value(&mut self.shape, Some(MarkerShape::Cross), "Cross");
                    ui.selectable_value(&mut self.shape, Some(MarkerShape::Plus), "Plus");
                    ui.selectable_value(&mut self.shape, Some(MarkerShape::Up), "Up");
                });
            });
        });
    }
}
