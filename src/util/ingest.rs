use polars::prelude::*;
use std::io::Cursor;

use crate::dataset::Dataset;
use crate::error::ParseError;

const COMMENT_PREFIX: &str = "#";

/// Decodes an uploaded blob of comma separated `count,mag` rows. There is no
/// header row and lines starting with `#` are skipped.
pub fn read_two_column(bytes: &[u8]) -> Result<Dataset, ParseError> {
    let dataset = Dataset::from_dataframe(&read_frame(bytes)?)?;
    log::debug!("Decoded {} rows", dataset.len());

    Ok(dataset)
}

/// Measurement uploads only need the count column. A second column, empty or
/// not, is accepted and discarded; every `mag` starts at zero.
pub fn read_counts(bytes: &[u8]) -> Result<Dataset, ParseError> {
    let dataset = Dataset::from_count_column(&read_frame(bytes)?)?;
    log::debug!("Decoded {} counts", dataset.len());

    Ok(dataset)
}

fn read_frame(bytes: &[u8]) -> Result<DataFrame, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::Encoding)?;

    let has_rows = text.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with(COMMENT_PREFIX)
    });
    if !has_rows {
        return Err(ParseError::Empty);
    }

    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_comment_prefix(Some(COMMENT_PREFIX)))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_and_skips_comments() {
        let raw = b"# detector 3\n0,0\n1,1.5\n# mid-file note\n2,4\n";
        let data = read_two_column(raw).unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data.count(), &[0.0, 1.0, 2.0]);
        assert_eq!(data.mag(), &[0.0, 1.5, 4.0]);
    }

    #[test]
    fn test_spaces_after_commas_are_accepted() {
        let data = read_two_column(b"0, 0\n1, 1\n2, 4\n").unwrap();
        assert_eq!(data.count(), &[0.0, 1.0, 2.0]);
        assert_eq!(data.mag(), &[0.0, 1.0, 4.0]);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert!(matches!(
            read_two_column(b"0,0\nnan,1\n2,4\n"),
            Err(ParseError::MissingValue(_))
        ));
        assert!(read_two_column(b"0,inf\n1,1\n").is_err());
    }

    #[test]
    fn test_counts_without_mag_column() {
        let data = read_counts(b"0\n1\n2\n3\n").unwrap();
        assert_eq!(data.count(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(data.mag(), &[0.0; 4]);

        let data = read_counts(b"0,\n1,\n").unwrap();
        assert_eq!(data.count(), &[0.0, 1.0]);
        assert_eq!(data.mag(), &[0.0, 0.0]);
    }

    #[test]
    fn test_counts_ignore_existing_mag() {
        let data = read_counts(b"4,17\n5, 2.5\n").unwrap();
        assert_eq!(data.count(), &[4.0, 5.0]);
        assert_eq!(data.mag(), &[0.0, 0.0]);
        assert!(read_counts(b"1,2,3\n").is_err());
        assert!(matches!(read_counts(b"# header only\n"), Err(ParseError::Empty)));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(matches!(read_two_column(b""), Err(ParseError::Empty)));
        assert!(matches!(
            read_two_column(b"# only a comment\n"),
            Err(ParseError::Empty)
        ));
    }

    #[test]
    fn test_non_numeric_content_is_rejected() {
        assert!(read_two_column(b"a,b\nc,d\n").is_err());
        assert!(read_two_column(b"count,mag\n1,2\n").is_err());
    }

    #[test]
    fn test_wrong_column_count_is_rejected() {
        assert!(read_two_column(b"1\n2\n3\n").is_err());
        assert!(read_two_column(b"1,2,3\n4,5,6\n").is_err());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(matches!(
            read_two_column(&[0xff, 0xfe, 0x00]),
            Err(ParseError::Encoding)
        ));
    }
}
