use crate::dataset::Dataset;
use crate::engine::curve;
use crate::engine::event::{Changes, Event, InvalidSelection};
use crate::engine::measurement::{self, MeasurementTrigger};
use crate::engine::store::Store;
use crate::error::CurveError;
use crate::fitter::polynomial::{self, Degree, Polynomial};

/// Holds the four stores of one dashboard session and keeps them consistent.
///
/// Every event runs to completion inside [`Session::apply`]. Source stores are
/// written first, then each derived store is rebuilt by its own recompute
/// function from the latest state of all of its inputs:
///
/// ```text
/// upload ─▶ backup ─▶ curve ─┬─▶ fit ─▶ measurement.mag
/// click/restore ─────▶ curve ┘    ▲
/// degree ─────────────────────────┘
/// ```
///
/// A failing event (unreadable upload) returns before any store is touched.
#[derive(Debug, Clone)]
pub struct Session {
    backup: Store<Dataset>,
    curve: Store<Dataset>,
    degree: Option<Degree>,
    fit: Store<Polynomial>,
    measurement: Store<Dataset>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Some(Degree::default()))
    }
}

impl Session {
    pub fn new(degree: Option<Degree>) -> Self {
        Self {
            backup: Store::default(),
            curve: Store::default(),
            degree,
            fit: Store::default(),
            measurement: Store::default(),
        }
    }

    pub fn apply(&mut self, event: Event) -> Result<Changes, CurveError> {
        let mut changes = Changes::none();

        match event {
            Event::CurveUploaded(raw) => {
                let uploaded = curve::load_curve(&raw)?;
                log::info!("Loaded curve with {} points", uploaded.len());

                changes.curve = self.curve.replace(Some(curve::restore_curve(&uploaded)));
                changes.backup = self.backup.replace(Some(uploaded));
            }
            Event::MeasurementUploaded(raw) => {
                let next = measurement::handle_measurement(
                    MeasurementTrigger::Uploaded(&raw),
                    self.fit.get(),
                    self.measurement.get(),
                )?;
                if let Some(uploaded) = &next {
                    log::info!("Loaded {} measurements", uploaded.len());
                }

                changes.measurement = self.measurement.replace(next);
            }
            Event::PointClicked(click) => {
                let edited = self
                    .curve
                    .get()
                    .ok_or(InvalidSelection::NoCurve)
                    .and_then(|current| curve::delete_point(current, click));

                match edited {
                    Ok(edited) => {
                        log::info!(
                            "Deleted curve point {}, {} points left",
                            click.index,
                            edited.len()
                        );
                        changes.curve = self.curve.replace(Some(edited));
                    }
                    Err(reason) => {
                        log::debug!("Ignoring click: {reason}");
                    }
                }
            }
            Event::RestoreRequested => match self.backup.get() {
                Some(backup) => {
                    changes.curve = self.curve.replace(Some(curve::restore_curve(backup)));
                    log::info!("Restored curve from backup");
                }
                None => log::debug!("No curve uploaded yet, nothing to restore"),
            },
            Event::DegreeChanged(degree) => {
                changes.degree = self.degree != Some(degree);
                self.degree = Some(degree);
                log::info!("Polynomial degree set to {degree}");
            }
        }

        if changes.curve || changes.degree {
            changes.fit = self.recompute_fit();
        }
        if changes.fit {
            changes.measurement |= self.recompute_measurement()?;
        }

        Ok(changes)
    }

    /// The only writer of the fit store.
    fn recompute_fit(&mut self) -> bool {
        let next = match (self.curve.get(), self.degree) {
            (Some(curve), Some(degree)) if !curve.is_empty() => {
                match polynomial::compute_fit(curve, degree) {
                    Ok(fit) => {
                        log::info!("Polynomial fit coefficients: {:?}", fit.coefficients());
                        Some(fit)
                    }
                    Err(e) => {
                        log::error!("{e}");
                        None
                    }
                }
            }
            (Some(_), Some(_)) => {
                log::debug!("Curve has no points left, clearing fit");
                None
            }
            _ => {
                log::debug!("No curve or degree yet, nothing to fit");
                None
            }
        };

        self.fit.replace(next)
    }

    /// The only writer of the measurement store outside of uploads.
    fn recompute_measurement(&mut self) -> Result<bool, CurveError> {
        let next = measurement::handle_measurement(
            MeasurementTrigger::FitChanged,
            self.fit.get(),
            self.measurement.get(),
        )?;

        Ok(match next {
            Some(next) => self.measurement.replace(Some(next)),
            None => false,
        })
    }

    pub fn curve(&self) -> Option<&Dataset> {
        self.curve.get()
    }

    pub fn backup(&self) -> Option<&Dataset> {
        self.backup.get()
    }

    pub fn fit(&self) -> Option<&Polynomial> {
        self.fit.get()
    }

    pub fn measurement(&self) -> Option<&Dataset> {
        self.measurement.get()
    }

    pub fn degree(&self) -> Option<Degree> {
        self.degree
    }

    /// `(count, mag)` of a measurement row, for highlighting only.
    pub fn selected_point(&self, row: usize) -> Option<(f64, f64)> {
        self.measurement.get()?.row(row)
    }

    /// The fit sampled across the `count` range of the current curve.
    pub fn fit_line(&self, samples: usize) -> Option<Vec<[f64; 2]>> {
        let range = self.curve.get()?.count_range()?;
        Some(self.fit.get()?.sample(range, samples))
    }

    pub fn fit_revision(&self) -> u64 {
        self.fit.revision()
    }
}
