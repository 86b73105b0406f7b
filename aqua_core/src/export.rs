//! Exporting the in-memory log to a user-chosen file.

use crate::{Result, UsageLog};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the log, header included, to `target`
///
/// An existing file is overwritten without confirmation. The output is the
/// same serialization the data file uses.
pub fn export_log(log: &UsageLog, target: &Path) -> Result<()> {
    let file = File::create(target)?;
    let mut writer = BufWriter::new(file);
    log.write_csv(&mut writer)?;
    writer.flush()?;

    tracing::info!("Exported {} records to {:?}", log.len(), target);
    Ok(())
}
