use crate::dataset::Dataset;
use crate::engine::event::{InvalidSelection, PointClick, Series};
use crate::error::CurveError;
use crate::util::ingest;

/// Decodes an uploaded calibration table. The caller stores one copy as the
/// backup and another as the editable curve.
pub fn load_curve(raw: &[u8]) -> Result<Dataset, CurveError> {
    Ok(ingest::read_two_column(raw)?)
}

/// Removes the clicked point from `curve`. Clicks on overlays are rejected
/// before the index is looked at.
pub fn delete_point(curve: &Dataset, click: PointClick) -> Result<Dataset, InvalidSelection> {
    match click.series {
        Series::Curve => curve
            .without_row(click.index)
            .ok_or(InvalidSelection::OutOfRange {
                index: click.index,
                len: curve.len(),
            }),
        other @ (Series::Fit | Series::Measurement) => {
            Err(InvalidSelection::NotCurveSeries(other))
        }
    }
}

pub fn restore_curve(backup: &Dataset) -> Dataset {
    backup.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Dataset {
        Dataset::from_rows([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0), (4.0, 16.0)])
    }

    #[test]
    fn test_load_curve() {
        let data = load_curve(b"0,0\n1,1\n2,4\n").unwrap();
        assert_eq!(data.len(), 3);
        assert!(matches!(load_curve(b"x,y\n"), Err(CurveError::Parse(_))));
    }

    #[test]
    fn test_delete_point_reindexes() {
        let before = curve();
        let k = 2;
        let after = delete_point(&before, PointClick::new(Series::Curve, k)).unwrap();

        assert_eq!(after.len(), before.len() - 1);
        for i in 0..k {
            assert_eq!(after.row(i), before.row(i));
        }
        assert_eq!(after.row(k), before.row(k + 1));
    }

    #[test]
    fn test_delete_point_ignores_overlays() {
        let data = curve();
        assert_eq!(
            delete_point(&data, PointClick::new(Series::Fit, 0)),
            Err(InvalidSelection::NotCurveSeries(Series::Fit))
        );
        assert_eq!(
            delete_point(&data, PointClick::new(Series::Measurement, 1)),
            Err(InvalidSelection::NotCurveSeries(Series::Measurement))
        );
    }

    #[test]
    fn test_delete_point_out_of_range() {
        assert_eq!(
            delete_point(&curve(), PointClick::new(Series::Curve, 5)),
            Err(InvalidSelection::OutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_restore_returns_backup() {
        let backup = curve();
        let mut edited = backup.clone();
        for _ in 0..3 {
            edited = delete_point(&edited, PointClick::new(Series::Curve, 0)).unwrap();
        }
        assert_ne!(edited, backup);
        assert_eq!(restore_curve(&backup), backup);
    }
}
