use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::CurveError;

/// Renders a table as space separated `count mag` text with three decimals.
pub fn write_space_delimited(dataset: &Dataset) -> Result<Vec<u8>, CurveError> {
    let mut df = dataset.to_dataframe().map_err(CurveError::Export)?;
    let mut buffer = Vec::new();

    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_separator(b' ')
        .with_float_precision(Some(3))
        .finish(&mut df)
        .map_err(CurveError::Export)?;

    Ok(buffer)
}

pub fn save_results(dataset: &Dataset, output_path: &Path) -> Result<(), CurveError> {
    let bytes = write_space_delimited(dataset)?;
    let mut file = File::create(output_path)?;
    file.write_all(&bytes)?;

    log::info!("Saved {} rows to {:?}", dataset.len(), output_path);
    Ok(())
}
