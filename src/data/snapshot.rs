//! Read/write snapshot JSON files.
//!
//! A snapshot is the "portable" form of the three source tables: one JSON
//! document holding customers, products, and sales exactly as the pipeline
//! consumes them. `pulse sample --out` writes one; `pulse report --data`
//! runs on one. The schema is defined by `domain::SourceTables`.

use std::fs::File;
use std::path::Path;

use crate::domain::SourceTables;
use crate::error::PulseError;

/// Read a snapshot JSON file.
///
/// A missing or malformed file means the invocation has no source tables to
/// run on; `SourceUnavailable`, fatal, no partial output.
pub fn read_snapshot(path: &Path) -> Result<SourceTables, PulseError> {
    let file = File::open(path).map_err(|e| {
        PulseError::SourceUnavailable(format!(
            "failed to open snapshot '{}': {e}",
            path.display()
        ))
    })?;
    let tables: SourceTables = serde_json::from_reader(file).map_err(|e| {
        PulseError::SourceUnavailable(format!(
            "invalid snapshot '{}': {e}",
            path.display()
        ))
    })?;
    Ok(tables)
}

/// Write a snapshot JSON file.
pub fn write_snapshot(path: &Path, tables: &SourceTables) -> Result<(), PulseError> {
    let file = File::create(path).map_err(|e| {
        PulseError::InvalidArgument(format!(
            "failed to create snapshot '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, tables)
        .map_err(|e| PulseError::InvalidArgument(format!("failed to write snapshot: {e}")))?;
    Ok(())
}
