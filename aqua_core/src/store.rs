//! CSV persistence for the usage log.
//!
//! The whole table is read at startup and rewritten after every mutation.
//! Reads take a shared lock; writes go through a temp file that is renamed
//! over the original.

use crate::{Error, Result, UsageLog, UsageRecord, COLUMNS};
use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

impl UsageLog {
    /// Load the log from a CSV file
    ///
    /// Returns an empty log if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No data file at {:?}, starting with an empty log", path);
            return Ok(Self::new());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(&file);

        let mut records = Vec::new();
        for row in reader.deserialize::<UsageRecord>() {
            records.push(row?);
        }

        file.unlock()?;

        tracing::debug!("Loaded {} records from {:?}", records.len(), path);
        Ok(Self::from_records(records))
    }

    /// Save the whole log, header included, replacing the file
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            self.write_csv(&mut writer)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} records to {:?}", self.len(), path);
        Ok(())
    }

    /// Serialize the log as CSV text
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Other(format!("CSV output is not UTF-8: {}", e)))
    }

    /// Write header and rows to any writer
    ///
    /// The header is written explicitly so an empty log still produces the
    /// five column names.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        writer.write_record(COLUMNS)?;
        for record in self.records() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, b: u32, ba: u32, c: u32, o: u32) -> UsageRecord {
        UsageRecord {
            date: date.into(),
            brushing: b,
            bathing: ba,
            cooking: c,
            other: o,
        }
    }

    #[test]
    fn test_load_nonexistent_returns_empty_schema() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.csv");

        let log = UsageLog::load(&path).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.columns().len(), 5);
        assert_eq!(
            log.columns(),
            &["Date", "Brushing", "Bathing", "Cooking", "Other"]
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("usage.csv");

        let log = UsageLog::from_records(vec![
            record("01-03-2024", 5, 20, 3, 2),
            record("01-03-2024", 1, 2, 3, 4),
        ]);
        log.save(&path).unwrap();

        let loaded = UsageLog::load(&path).unwrap();
        assert_eq!(loaded, log);
    }

    #[test]
    fn test_csv_layout() {
        let log = UsageLog::from_records(vec![record("15-08-2024", 5, 20, 3, 2)]);
        assert_eq!(
            log.to_csv_string().unwrap(),
            "Date,Brushing,Bathing,Cooking,Other\n15-08-2024,5,20,3,2\n"
        );
    }

    #[test]
    fn test_empty_log_still_writes_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("usage.csv");

        UsageLog::new().save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Date,Brushing,Bathing,Cooking,Other\n");
        assert!(UsageLog::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/dir/usage.csv");

        UsageLog::from_records(vec![record("02-03-2024", 1, 1, 1, 1)])
            .save(&path)
            .unwrap();

        assert!(path.exists());
        let extras: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "usage.csv")
            .collect();
        assert!(extras.is_empty(), "unexpected files: {:?}", extras);
    }

    #[test]
    fn test_load_tolerates_padded_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("usage.csv");
        std::fs::write(
            &path,
            "Date,Brushing,Bathing,Cooking,Other\n03-03-2024, 4 ,10,2,0\n",
        )
        .unwrap();

        let log = UsageLog::load(&path).unwrap();
        assert_eq!(log.records()[0], record("03-03-2024", 4, 10, 2, 0));
    }

    #[test]
    fn test_load_rejects_non_numeric_cells() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("usage.csv");
        std::fs::write(
            &path,
            "Date,Brushing,Bathing,Cooking,Other\n03-03-2024,lots,10,2,0\n",
        )
        .unwrap();

        assert!(matches!(UsageLog::load(&path), Err(Error::Csv(_))));
    }
}
