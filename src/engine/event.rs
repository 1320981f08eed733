use std::fmt::Display;

use crate::fitter::polynomial::Degree;

/// Plotted series a click can land on. Only `Curve` points are editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Curve,
    Fit,
    Measurement,
}

impl Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Series::Curve => write!(f, "curve"),
            Series::Fit => write!(f, "fit"),
            Series::Measurement => write!(f, "measurement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointClick {
    pub series: Series,
    pub index: usize,
}

impl PointClick {
    pub fn new(series: Series, index: usize) -> Self {
        Self { series, index }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CurveUploaded(Vec<u8>),
    MeasurementUploaded(Vec<u8>),
    PointClicked(PointClick),
    RestoreRequested,
    DegreeChanged(Degree),
}

/// Which stores an event replaced. Stores that were rewritten with an
/// identical value are not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub backup: bool,
    pub curve: bool,
    pub degree: bool,
    pub fit: bool,
    pub measurement: bool,
}

impl Changes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.backup || self.curve || self.degree || self.fit || self.measurement
    }
}

/// A click that cannot delete anything. Never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSelection {
    NoCurve,
    NotCurveSeries(Series),
    OutOfRange { index: usize, len: usize },
}

impl Display for InvalidSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSelection::NoCurve => write!(f, "no curve is loaded"),
            InvalidSelection::NotCurveSeries(series) => {
                write!(f, "{series} points cannot be deleted")
            }
            InvalidSelection::OutOfRange { index, len } => {
                write!(f, "point {index} is outside a curve of {len} points")
            }
        }
    }
}

impl std::error::Error for InvalidSelection {}
