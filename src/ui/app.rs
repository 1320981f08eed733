use std::path::Path;

use crate::engine::{Changes, Event, Session};
use crate::fitter::polynomial::Degree;
use crate::settings::Settings;
use crate::util::export;

use super::curve_plot::{CurvePlot, coefficients_ui};
use super::results_table::results_table;

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CurveDashboard {
    settings: Settings,
    plot: CurvePlot,
    #[serde(skip)]
    session: Session,
    #[serde(skip)]
    selected_row: Option<usize>,
    #[serde(skip)]
    last_error: Option<String>,
    #[serde(skip)]
    settings_open: bool,
}

impl Default for CurveDashboard {
    fn default() -> Self {
        Self::with_settings(Settings::default(), CurvePlot::default())
    }
}

impl CurveDashboard {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Only preferences and plot styles are restored; loaded data starts empty.
        if let Some(storage) = cc.storage {
            let stored: Self = eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
            return Self::with_settings(stored.settings, stored.plot);
        }

        Default::default()
    }

    fn with_settings(settings: Settings, plot: CurvePlot) -> Self {
        Self {
            session: Session::new(Some(settings.default_degree)),
            settings,
            plot,
            selected_row: None,
            last_error: None,
            settings_open: false,
        }
    }

    fn dispatch(&mut self, event: Event) {
        match self.session.apply(event) {
            Ok(changes) => {
                self.last_error = None;
                if changes.any() {
                    self.refresh(changes);
                }
            }
            Err(e) => {
                log::error!("{e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn refresh(&mut self, changes: Changes) {
        if changes.measurement {
            let rows = self.session.measurement().map_or(0, |m| m.len());
            self.selected_row = self.selected_row.filter(|&row| row < rows);
        }

        self.plot.sync(&self.session, self.settings.fit_line_samples);
        self.plot.set_selected_measurement(self.selected_row);
    }

    fn upload(&mut self, title: &str, into_event: fn(Vec<u8>) -> Event) {
        let Some(path) = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Text table", &["csv", "txt", "dat"])
            .pick_file()
        else {
            return;
        };

        match std::fs::read(&path) {
            Ok(bytes) => {
                log::info!("Reading {:?}", path);
                self.dispatch(into_event(bytes));
            }
            Err(e) => {
                log::error!("Failed to read {:?}: {}", path, e);
                self.last_error = Some(format!("Failed to read {}: {e}", path.display()));
            }
        }
    }

    fn download(&mut self) {
        let Some(measurement) = self.session.measurement() else {
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .set_file_name(&self.settings.export_file_name)
            .save_file()
        else {
            return;
        };

        if let Err(e) = export::save_results(measurement, &output_path) {
            log::error!("Failed to save results: {e}");
            self.last_error = Some(e.to_string());
        }
    }

    fn degree_ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Polynomial degree:");

        let current = self.session.degree();
        let mut chosen = current;
        egui::ComboBox::from_id_salt("polynomial_degree")
            .selected_text(current.map_or_else(|| "-".to_owned(), |d| d.to_string()))
            .show_ui(ui, |ui| {
                for degree in Degree::all() {
                    ui.selectable_value(&mut chosen, Some(degree), degree.to_string());
                }
            });

        if chosen != current
            && let Some(degree) = chosen
        {
            self.settings.default_degree = degree;
            self.dispatch(Event::DegreeChanged(degree));
        }
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.settings_open;
        let mut changed = false;

        egui::Window::new("Settings")
            .open(&mut open)
            .show(ctx, |ui| {
                let before = self.settings.clone();
                self.settings.ui(ui);

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Load YAML...").clicked()
                        && let Some(path) = yaml_dialog().pick_file()
                    {
                        self.load_settings(&path);
                    }
                    if ui.button("Save YAML...").clicked()
                        && let Some(path) = yaml_dialog().save_file()
                        && let Err(e) = self.settings.save(&path)
                    {
                        log::error!("{e}");
                        self.last_error = Some(e.to_string());
                    }
                });

                ui.separator();
                ui.label("Plot style");
                ui.horizontal(|ui| {
                    self.plot.menu_ui(ui);
                });

                changed = before != self.settings;
            });

        self.settings_open = open;
        if changed {
            self.plot.sync(&self.session, self.settings.fit_line_samples);
            self.plot.set_selected_measurement(self.selected_row);
        }
    }

    fn load_settings(&mut self, path: &Path) {
        match Settings::load(path) {
            Ok(settings) => self.apply_settings(settings),
            Err(e) => {
                log::error!("{e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// The degree event is a no-op when the degree is unchanged, so the plot is
    /// resynced here for the other fields.
    fn apply_settings(&mut self, settings: Settings) {
        let degree = settings.default_degree;
        self.settings = settings;
        self.dispatch(Event::DegreeChanged(degree));
        self.plot.sync(&self.session, self.settings.fit_line_samples);
        self.plot.set_selected_measurement(self.selected_row);
    }
}

fn yaml_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new().add_filter("YAML", &["yaml", "yml"])
}

impl eframe::App for CurveDashboard {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Required by eframe 0.34; all drawing happens in [`Self::update`], which eframe still calls.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("charcurve_top_panel").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                egui::global_theme_preference_switch(ui);
                ui.heading("Characteristic curve");
                ui.separator();

                if ui.button("Upload curve").clicked() {
                    self.upload("Upload curve", Event::CurveUploaded);
                }
                if ui.button("Upload measurements").clicked() {
                    self.upload("Upload measurements", Event::MeasurementUploaded);
                }
                if ui
                    .add_enabled(
                        self.session.measurement().is_some(),
                        egui::Button::new("Download results"),
                    )
                    .clicked()
                {
                    self.download();
                }
                if ui
                    .add_enabled(self.session.backup().is_some(), egui::Button::new("Restore curve"))
                    .clicked()
                {
                    self.dispatch(Event::RestoreRequested);
                }

                ui.separator();
                self.degree_ui(ui);

                ui.separator();
                if ui.button("Settings").clicked() {
                    self.settings_open = !self.settings_open;
                }
            });

            if let Some(error) = &self.last_error {
                ui.colored_label(egui::Color32::RED, error);
            }
        });

        egui::SidePanel::right("charcurve_results_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Table");
                if let Some(row) = results_table(
                    ui,
                    self.session.measurement(),
                    self.settings.table_precision,
                    self.selected_row,
                ) {
                    self.selected_row = Some(row);
                    self.plot.set_selected_measurement(self.selected_row);
                    if let Some((count, mag)) = self.session.selected_point(row) {
                        log::debug!("Selected measurement {row}: ({count}, {mag})");
                    }
                }
            });

        egui::TopBottomPanel::bottom("charcurve_fit_panel").show(ctx, |ui| {
            coefficients_ui(ui, self.session.fit());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(click) = self.plot.ui(ui, self.settings.click_radius) {
                self.dispatch(Event::PointClicked(click));
            }
        });

        if self.settings_open {
            self.settings_window(ctx);
        }
    }
}
