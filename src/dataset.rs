use polars::prelude::*;

use crate::error::ParseError;

pub const COUNT: &str = "count";
pub const MAG: &str = "mag";

/// Ordered two column table. Rows are addressed by position only, so removing
/// a row shifts every later row down by one.
#[derive(PartialEq, Default, Debug, Clone)]
pub struct Dataset {
    count: Vec<f64>,
    mag: Vec<f64>,
}

impl Dataset {
    pub fn from_rows(rows: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (count, mag) = rows.into_iter().unzip();
        Self { count, mag }
    }

    pub fn len(&self) -> usize {
        self.count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count.is_empty()
    }

    pub fn count(&self) -> &[f64] {
        &self.count
    }

    pub fn mag(&self) -> &[f64] {
        &self.mag
    }

    pub fn row(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.count.get(index)?, *self.mag.get(index)?))
    }

    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.count.iter().copied().zip(self.mag.iter().copied())
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.rows().map(|(x, y)| [x, y]).collect()
    }

    /// Copy of the table with the row at `index` removed and the rest
    /// renumbered from zero. `None` when `index` is past the end.
    pub fn without_row(&self, index: usize) -> Option<Self> {
        if index >= self.len() {
            return None;
        }

        let mut count = self.count.clone();
        let mut mag = self.mag.clone();
        count.remove(index);
        mag.remove(index);

        Some(Self { count, mag })
    }

    /// Keeps `count` and replaces every `mag` with `f(count)`.
    pub fn with_mag(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            count: self.count.clone(),
            mag: self.count.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn count_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }

        Some(
            self.count
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &x| {
                    (min.min(x), max.max(x))
                }),
        )
    }

    /// Number of different `count` values, which bounds the rank of a
    /// polynomial design matrix built from this table.
    pub fn distinct_counts(&self) -> usize {
        let mut sorted = self.count.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        sorted.len()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        df!(
            COUNT => self.count.as_slice(),
            MAG => self.mag.as_slice(),
        )
    }

    /// Reads the first two columns of `df` positionally as `count` and `mag`.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, ParseError> {
        let [count, mag] = df.columns() else {
            return Err(ParseError::ColumnCount(df.width()));
        };

        Ok(Self {
            count: numeric_values(count)?,
            mag: numeric_values(mag)?,
        })
    }

    /// Reads only the first column of `df` as `count`; a second column, if
    /// present, may hold anything and is dropped. `mag` starts at zero.
    pub fn from_count_column(df: &DataFrame) -> Result<Self, ParseError> {
        let count = match df.columns() {
            [count] | [count, _] => numeric_values(count)?,
            _ => return Err(ParseError::ColumnCount(df.width())),
        };

        Ok(Self {
            mag: vec![0.0; count.len()],
            count,
        })
    }
}

/// Finite `f64` values of a column. Cells read as text (for example `" 1.5"`
/// after a `", "` separator) are trimmed before parsing.
fn numeric_values(column: &Column) -> Result<Vec<f64>, ParseError> {
    let missing = || ParseError::MissingValue(column.name().to_string());

    let values: Vec<f64> = if column.dtype() == &DataType::String {
        column
            .str()?
            .into_iter()
            .map(|cell| {
                cell.and_then(|text| text.trim().parse::<f64>().ok())
                    .ok_or_else(missing)
            })
            .collect::<Result<_, _>>()?
    } else {
        let cast = column
            .strict_cast(&DataType::Float64)
            .map_err(|_| missing())?;
        if cast.null_count() > 0 {
            return Err(missing());
        }
        cast.f64()?.into_no_null_iter().collect()
    };

    if values.iter().any(|v| !v.is_finite()) {
        return Err(missing());
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parabola() -> Dataset {
        Dataset::from_rows([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0)])
    }

    #[test]
    fn test_without_row_shifts_later_rows_down() {
        let curve = parabola();
        let trimmed = curve.without_row(1).unwrap();

        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed.row(0), Some((0.0, 0.0)));
        assert_eq!(trimmed.row(1), Some((2.0, 4.0)));
        assert_eq!(trimmed.row(2), Some((3.0, 9.0)));
        assert_eq!(trimmed.row(3), None);
    }

    #[test]
    fn test_without_row_out_of_range() {
        assert!(parabola().without_row(4).is_none());
        assert!(Dataset::default().without_row(0).is_none());
    }

    #[test]
    fn test_with_mag_keeps_count() {
        let doubled = parabola().with_mag(|x| 2.0 * x);
        assert_eq!(doubled.count(), parabola().count());
        assert_eq!(doubled.mag(), &[0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_count_range_and_distinct() {
        let data = Dataset::from_rows([(2.0, 0.0), (-1.0, 0.0), (2.0, 1.0)]);
        assert_eq!(data.count_range(), Some((-1.0, 2.0)));
        assert_eq!(data.distinct_counts(), 2);
        assert_eq!(Dataset::default().count_range(), None);
    }

    #[test]
    fn test_dataframe_conversion() {
        let df = parabola().to_dataframe().unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.column(MAG).unwrap().len(), 4);
        assert_eq!(Dataset::from_dataframe(&df).unwrap(), parabola());
    }

    #[test]
    fn test_from_dataframe_trims_text_cells() {
        let df = df!("a" => [" 0", "1 "], "b" => [" 2.5", "\t4"]).unwrap();
        let data = Dataset::from_dataframe(&df).unwrap();
        assert_eq!(data.count(), &[0.0, 1.0]);
        assert_eq!(data.mag(), &[2.5, 4.0]);
    }

    #[test]
    fn test_from_dataframe_rejects_non_finite() {
        let df = df!("a" => [0.0, 1.0], "b" => [f64::NAN, 1.0]).unwrap();
        assert!(matches!(
            Dataset::from_dataframe(&df),
            Err(ParseError::MissingValue(_))
        ));

        let df = df!("a" => ["inf", "1"], "b" => ["0", "1"]).unwrap();
        assert!(matches!(
            Dataset::from_dataframe(&df),
            Err(ParseError::MissingValue(_))
        ));
    }

    #[test]
    fn test_from_count_column_ignores_second_column() {
        let df = df!("a" => [3.0, 4.0]).unwrap();
        let data = Dataset::from_count_column(&df).unwrap();
        assert_eq!(data.count(), &[3.0, 4.0]);
        assert_eq!(data.mag(), &[0.0, 0.0]);

        let df = df!("a" => [3.0, 4.0], "b" => [None::<f64>, None]).unwrap();
        assert_eq!(Dataset::from_count_column(&df).unwrap().len(), 2);

        let df = df!("a" => [1.0], "b" => [2.0], "c" => [3.0]).unwrap();
        assert!(matches!(
            Dataset::from_count_column(&df),
            Err(ParseError::ColumnCount(3))
        ));
    }

    #[test]
    fn test_from_dataframe_rejects_wrong_width() {
        let df = df!("a" => [1.0], "b" => [2.0], "c" => [3.0]).unwrap();
        assert!(matches!(
            Dataset::from_dataframe(&df),
            Err(ParseError::ColumnCount(3))
        ));
    }
}
