use nalgebra::{DMatrix, DVector};

use crate::dataset::Dataset;
use crate::error::CurveError;

/// Polynomial order offered to the user, always within `1..=7`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Degree(u8);

impl Degree {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(degree: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&degree)
            .then_some(Self(degree))
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for Degree {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Degree {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "polynomial degree must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<Degree> for u8 {
    fn from(degree: Degree) -> Self {
        degree.0
    }
}

impl std::fmt::Display for Degree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coefficients ordered from the highest power down to the constant term.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }

    /// `samples` evenly spaced points over `[x_min, x_max]`, both ends included.
    pub fn sample(&self, (x_min, x_max): (f64, f64), samples: usize) -> Vec<[f64; 2]> {
        match samples {
            0 => Vec::new(),
            1 => vec![[x_min, self.evaluate(x_min)]],
            _ => {
                let step = (x_max - x_min) / (samples - 1) as f64;
                (0..samples)
                    .map(|i| {
                        let x = if i == samples - 1 {
                            x_max
                        } else {
                            x_min + step * i as f64
                        };
                        [x, self.evaluate(x)]
                    })
                    .collect()
            }
        }
    }
}

const SVD_MAX_ITERATIONS: usize = 10_000;

/// Ordinary least-squares fit of `mag` against `count`.
///
/// The Vandermonde columns are scaled to unit norm before an SVD solve, and
/// singular values below `len * eps` of the largest one are dropped. An under
/// determined system still produces the minimum norm solution; it is only
/// reported through a warning.
pub fn compute_fit(curve: &Dataset, degree: Degree) -> Result<Polynomial, CurveError> {
    if curve.is_empty() {
        return Err(CurveError::Solver("no points to fit"));
    }

    let x = curve.count();
    let order = degree.get() + 1;
    let power = |column: usize| (order - 1 - column) as i32;

    let distinct = curve.distinct_counts();
    if distinct < order {
        log::warn!(
            "Insufficient data: {distinct} distinct points for a degree {degree} polynomial, fit is not unique"
        );
    }

    let scale: Vec<f64> = (0..order)
        .map(|column| {
            let norm = x
                .iter()
                .map(|xi| xi.powi(power(column)).powi(2))
                .sum::<f64>()
                .sqrt();
            if norm == 0.0 { 1.0 } else { norm }
        })
        .collect();

    let lhs = DMatrix::from_fn(x.len(), order, |row, column| {
        x[row].powi(power(column)) / scale[column]
    });
    let rhs = DVector::from_column_slice(curve.mag());

    // Large counts overflow x^p, and the SVD never converges on inf/NaN input.
    if !scale.iter().all(|s| s.is_finite())
        || !lhs.iter().all(|v| v.is_finite())
        || !rhs.iter().all(|v| v.is_finite())
    {
        return Err(CurveError::Solver(
            "design matrix is not finite, counts are too large for this degree",
        ));
    }

    let svd = lhs
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or(CurveError::Solver("SVD did not converge"))?;
    let largest = svd.singular_values.iter().copied().fold(0.0, f64::max);
    let cutoff = largest * x.len() as f64 * f64::EPSILON;

    let rank = svd.rank(cutoff);
    if rank < order {
        log::warn!("Polynomial fit may be poorly conditioned (rank {rank} of {order})");
    }

    let solution = svd.solve(&rhs, cutoff).map_err(CurveError::Solver)?;
    let coefficients = solution
        .iter()
        .zip(&scale)
        .map(|(c, s)| c / s)
        .collect();

    Ok(Polynomial::new(coefficients))
}
