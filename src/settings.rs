use std::fs::File;
use std::path::Path;

use crate::error::CurveError;
use crate::fitter::polynomial::Degree;

/// User preferences. Persisted by eframe between launches and optionally
/// exchanged as YAML; loaded data never lives here.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Settings {
    pub default_degree: Degree,
    pub fit_line_samples: usize,
    /// Screen distance in points within which a click picks a plotted item.
    pub click_radius: f32,
    pub export_file_name: String,
    pub table_precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_degree: Degree::default(),
            fit_line_samples: 100,
            click_radius: 8.0,
            export_file_name: "results.csv".to_owned(),
            table_precision: 3,
        }
    }
}

impl Settings {
    pub fn from_yaml(text: &str) -> Result<Self, CurveError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String, CurveError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, CurveError> {
        let file = File::open(path)?;
        let settings = serde_yaml::from_reader(file)?;
        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), CurveError> {
        let file = File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        log::info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::DragValue::new(&mut self.fit_line_samples)
                .range(2..=10_000)
                .prefix("Fit line samples: "),
        );
        ui.add(
            egui::DragValue::new(&mut self.click_radius)
                .speed(0.5)
                .range(1.0..=50.0)
                .prefix("Click radius: "),
        );
        ui.add(
            egui::DragValue::new(&mut self.table_precision)
                .range(0..=10)
                .prefix("Table decimals: "),
        );
        ui.horizontal(|ui| {
            ui.label("Export file:");
            ui.text_edit_singleline(&mut self.export_file_name);
        });
    }
}
