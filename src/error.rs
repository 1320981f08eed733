use polars::error::PolarsError;
use std::error::Error;
use std::fmt::Display;

/// Reasons an uploaded byte blob could not be turned into a two column table.
#[derive(Debug)]
pub enum ParseError {
    Encoding,
    Empty,
    ColumnCount(usize),
    MissingValue(String),
    Reader(PolarsError),
}

impl From<PolarsError> for ParseError {
    fn from(err: PolarsError) -> ParseError {
        ParseError::Reader(err)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Encoding => write!(f, "file is not valid UTF-8 text"),
            ParseError::Empty => write!(f, "file contains no data rows"),
            ParseError::ColumnCount(n) => {
                write!(f, "expected two numeric columns, found {n}")
            }
            ParseError::MissingValue(column) => {
                write!(f, "column '{column}' has missing or non-numeric values")
            }
            ParseError::Reader(x) => write!(f, "could not read table: {x}"),
        }
    }
}

impl Error for ParseError {}

#[derive(Debug)]
pub enum CurveError {
    Parse(ParseError),
    Export(PolarsError),
    File(std::io::Error),
    Settings(serde_yaml::Error),
    Solver(&'static str),
}

impl From<ParseError> for CurveError {
    fn from(err: ParseError) -> CurveError {
        CurveError::Parse(err)
    }
}

impl From<std::io::Error> for CurveError {
    fn from(err: std::io::Error) -> CurveError {
        CurveError::File(err)
    }
}

impl From<serde_yaml::Error> for CurveError {
    fn from(err: serde_yaml::Error) -> CurveError {
        CurveError::Settings(err)
    }
}

impl Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveError::Parse(x) => write!(f, "Upload failed: {x}"),
            CurveError::Export(x) => write!(f, "Export failed while using polars: {x}"),
            CurveError::File(x) => write!(f, "File I/O error: {x}"),
            CurveError::Settings(x) => write!(f, "Settings file error: {x}"),
            CurveError::Solver(x) => write!(f, "Least-squares solver failed: {x}"),
        }
    }
}

impl Error for CurveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CurveError::Parse(x) => Some(x),
            CurveError::Export(x) => Some(x),
            CurveError::File(x) => Some(x),
            CurveError::Settings(x) => Some(x),
            CurveError::Solver(_) => None,
        }
    }
}
