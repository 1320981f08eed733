use egui_extras::{Column, TableBuilder};

use crate::dataset::{COUNT, Dataset, MAG};

/// Measurement rows with a click-to-select row. Returns the newly clicked
/// row, if any.
pub fn results_table(
    ui: &mut egui::Ui,
    measurement: Option<&Dataset>,
    precision: usize,
    selected: Option<usize>,
) -> Option<usize> {
    let Some(measurement) = measurement else {
        ui.label("No measurements loaded");
        return None;
    };

    let mut clicked = None;

    TableBuilder::new(ui)
        .id_salt("results_table")
        .striped(true)
        .sense(egui::Sense::click())
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(COUNT);
            });
            header.col(|ui| {
                ui.strong(MAG);
            });
        })
        .body(|body| {
            body.rows(18.0, measurement.len(), |mut row| {
                let index = row.index();
                let Some((count, mag)) = measurement.row(index) else {
                    return;
                };

                row.set_selected(selected == Some(index));
                row.col(|ui| {
                    ui.label(format!("{count:.precision$}"));
                });
                row.col(|ui| {
                    ui.label(format!("{mag:.precision$}"));
                });

                if row.response().clicked() {
                    clicked = Some(index);
                }
            });
        });

    clicked
}
