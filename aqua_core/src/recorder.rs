//! Recording a new day of usage.

use crate::{Error, Result, UsageLog, UsageRecord, DATE_FORMAT};
use std::path::Path;

/// The four liter counts entered for one record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Readings {
    pub brushing: u32,
    pub bathing: u32,
    pub cooking: u32,
    pub other: u32,
}

/// Today's date on the local clock, in the stored format
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// Parse one liter count as typed by the user
///
/// Surrounding whitespace is ignored. Anything else that is not a whole,
/// non-negative number is rejected.
pub fn parse_liters(input: &str) -> Result<u32> {
    input.trim().parse().map_err(|_| Error::InvalidNumber {
        input: input.trim().to_string(),
    })
}

/// Append a record for `date` and persist the whole log
pub fn record_entry(
    mut log: UsageLog,
    date: &str,
    readings: Readings,
    path: &Path,
) -> Result<UsageLog> {
    log.push(UsageRecord {
        date: date.to_string(),
        brushing: readings.brushing,
        bathing: readings.bathing,
        cooking: readings.cooking,
        other: readings.other,
    });
    log.save(path)?;

    tracing::info!("Recorded usage for {} ({} records total)", date, log.len());
    Ok(log)
}
