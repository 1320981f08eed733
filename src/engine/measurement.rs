use crate::dataset::Dataset;
use crate::error::CurveError;
use crate::fitter::polynomial::Polynomial;
use crate::util::ingest;

#[derive(Debug, Clone, Copy)]
pub enum MeasurementTrigger<'a> {
    Uploaded(&'a [u8]),
    FitChanged,
}

/// Produces the next measurement table, or `None` when there is nothing to
/// recompute. Only `mag` is ever rewritten.
pub fn handle_measurement(
    trigger: MeasurementTrigger<'_>,
    fit: Option<&Polynomial>,
    current: Option<&Dataset>,
) -> Result<Option<Dataset>, CurveError> {
    match trigger {
        MeasurementTrigger::Uploaded(raw) => {
            let uploaded = ingest::read_counts(raw)?;
            Ok(Some(apply_fit(uploaded, fit)))
        }
        MeasurementTrigger::FitChanged => {
            let Some(current) = current else {
                log::debug!("No measurements loaded, skipping re-evaluation");
                return Ok(None);
            };
            let Some(fit) = fit else {
                log::debug!("No fit available, keeping measurement magnitudes");
                return Ok(None);
            };
            Ok(Some(current.with_mag(|x| fit.evaluate(x))))
        }
    }
}

fn apply_fit(measurement: Dataset, fit: Option<&Polynomial>) -> Dataset {
    match fit {
        Some(fit) => measurement.with_mag(|x| fit.evaluate(x)),
        None => measurement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polynomial {
        Polynomial::new(vec![1.0, 0.0, 0.0])
    }

    #[test]
    fn test_upload_without_fit_zeroes_mag() {
        let raw = b"0,5\n1,5\n2,5\n";
        let data = handle_measurement(MeasurementTrigger::Uploaded(raw), None, None)
            .unwrap()
            .unwrap();

        assert_eq!(data.count(), &[0.0, 1.0, 2.0]);
        assert_eq!(data.mag(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_upload_with_fit_evaluates() {
        let fit = square();
        let raw = b"0,0\n1,0\n2,0\n3,0\n";
        let data = handle_measurement(MeasurementTrigger::Uploaded(raw), Some(&fit), None)
            .unwrap()
            .unwrap();

        assert_eq!(data.mag(), &[0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_count_only_upload() {
        let fit = square();
        let data = handle_measurement(MeasurementTrigger::Uploaded(b"0\n1\n2\n3\n"), Some(&fit), None)
            .unwrap()
            .unwrap();
        assert_eq!(data.mag(), &[0.0, 1.0, 4.0, 9.0]);

        let data = handle_measurement(MeasurementTrigger::Uploaded(b"0,\n1,\n"), None, None)
            .unwrap()
            .unwrap();
        assert_eq!(data.count(), &[0.0, 1.0]);
        assert_eq!(data.mag(), &[0.0, 0.0]);
    }

    #[test]
    fn test_upload_parse_error() {
        let result = handle_measurement(MeasurementTrigger::Uploaded(b"1;2;x"), None, None);
        assert!(matches!(result, Err(CurveError::Parse(_))));
    }

    #[test]
    fn test_fit_change_without_measurement_skips() {
        let fit = square();
        let result = handle_measurement(MeasurementTrigger::FitChanged, Some(&fit), None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_fit_change_without_fit_keeps_mag() {
        let current = Dataset::from_rows([(1.0, 7.0)]);
        let result =
            handle_measurement(MeasurementTrigger::FitChanged, None, Some(&current)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_fit_change_preserves_count_and_order() {
        let current = Dataset::from_rows([(3.0, 0.0), (-1.0, 0.0), (2.0, 0.0)]);
        let fit = Polynomial::new(vec![2.0, 1.0]);
        let next = handle_measurement(MeasurementTrigger::FitChanged, Some(&fit), Some(&current))
            .unwrap()
            .unwrap();

        assert_eq!(next.count(), current.count());
        assert_eq!(next.mag(), &[7.0, -1.0, 5.0]);
    }
}
