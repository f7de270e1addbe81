//! Read/write host value dumps as JSON.
//!
//! The schema is the tagged form defined in `value::wire`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::value::GenericValue;

/// Read a host value dump.
pub fn read_value_json(path: &Path) -> Result<GenericValue, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open host value JSON '{}': {e}", path.display())))?;
    let value: GenericValue = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid host value JSON '{}': {e}", path.display())))?;
    log::debug!("read {}", path.display());
    Ok(value)
}

/// Write a host value dump (pretty-printed).
pub fn write_value_json(path: &Path, value: &GenericValue) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create host value JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::new(2, format!("Failed to write host value JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write host value JSON: {e}")))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

pub fn value_from_json_str(s: &str) -> Result<GenericValue, AppError> {
    serde_json::from_str(s).map_err(|e| AppError::new(2, format!("Invalid host value JSON: {e}")))
}

pub fn value_to_json_string(value: &GenericValue) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(2, format!("Failed to encode host value JSON: {e}")))
}
