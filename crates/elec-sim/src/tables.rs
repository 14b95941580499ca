use std::path::Path;

use elec_agg::RawTable;
use elec_core::errors::ErrorInfo;
use elec_core::ElecError;
use log::debug;

/// Reads a header-less CSV file into a raw table. Ragged rows are kept as is.
pub fn read_table(path: &Path) -> Result<RawTable, ElecError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| table_error("table-open", path, err))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| table_error("table-read", path, err))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(RawTable::new(rows))
}

/// Reads several tables, preserving order.
pub fn read_tables(paths: &[impl AsRef<Path>]) -> Result<Vec<RawTable>, ElecError> {
    paths.iter().map(|path| read_table(path.as_ref())).collect()
}

fn table_error(code: &str, path: &Path, err: csv::Error) -> ElecError {
    ElecError::Config(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
