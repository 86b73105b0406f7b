//! Date lookup over stored records.

use crate::{UsageLog, UsageRecord};

/// All records whose stored date string equals `date` exactly
///
/// No date parsing happens here: `1-3-2024` does not match `01-03-2024`.
pub fn find_by_date<'a>(log: &'a UsageLog, date: &str) -> Vec<&'a UsageRecord> {
    let matches: Vec<_> = log.records().iter().filter(|r| r.date == date).collect();
    tracing::debug!("{} records match date {:?}", matches.len(), date);
    matches
}

/// Render records as an aligned plain-text table with a header row
pub fn format_records(records: &[&UsageRecord]) -> String {
    let date_width = records
        .iter()
        .map(|r| r.date.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>date_width$} {:>8} {:>7} {:>7} {:>5}\n",
        "Date",
        "Brushing",
        "Bathing",
        "Cooking",
        "Other",
        date_width = date_width,
    ));

    for r in records {
        output.push_str(&format!(
            "{:>date_width$} {:>8} {:>7} {:>7} {:>5}\n",
            r.date,
            r.brushing,
            r.bathing,
            r.cooking,
            r.other,
            date_width = date_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, brushing: u32) -> UsageRecord {
        UsageRecord {
            date: date.into(),
            brushing,
            bathing: 0,
            cooking: 0,
            other: 0,
        }
    }

    fn sample_log() -> UsageLog {
        UsageLog::from_records(vec![
            record("01-03-2024", 1),
            record("02-03-2024", 2),
            record("01-03-2024", 3),
        ])
    }

    #[test]
    fn test_find_all_matches_in_order() {
        let log = sample_log();
        let found = find_by_date(&log, "01-03-2024");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].brushing, 1);
        assert_eq!(found[1].brushing, 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        let log = sample_log();
        assert!(find_by_date(&log, "05-03-2024").is_empty());
    }

    #[test]
    fn test_match_is_exact_string() {
        let log = sample_log();
        assert!(find_by_date(&log, "1-3-2024").is_empty());
        assert!(find_by_date(&log, " 01-03-2024").is_empty());
    }

    #[test]
    fn test_format_records() {
        let r = UsageRecord {
            date: "01-03-2024".into(),
            brushing: 5,
            bathing: 20,
            cooking: 3,
            other: 2,
        };
        let table = format_records(&[&r]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "      Date Brushing Bathing Cooking Other");
        assert_eq!(lines[1], "01-03-2024        5      20       3     2");
    }
}
