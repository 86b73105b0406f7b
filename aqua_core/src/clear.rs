//! Deleting the persisted usage table.

use crate::Result;
use std::path::Path;

/// What clearing found on disk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The data file existed and was removed
    Deleted,
    /// There was no data file to remove
    NoFile,
}

/// Remove the data file if it exists
///
/// The caller is responsible for resetting its in-memory log.
pub fn clear_data(path: &Path) -> Result<ClearOutcome> {
    if !path.exists() {
        tracing::info!("No data file at {:?} to clear", path);
        return Ok(ClearOutcome::NoFile);
    }

    std::fs::remove_file(path)?;
    tracing::info!("Removed data file {:?}", path);
    Ok(ClearOutcome::Deleted)
}
