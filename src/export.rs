use crate::collector::AggregatedExport;
use crate::error::ScrapeError;
use chrono::{DateTime, Local};
use std::path::Path;

/// Column contract of the export, fixed for downstream compatibility.
pub const CSV_HEADERS: [&str; 7] =
    ["Date", "Week", "Job search", "Job name", "Company", "City", "Link"];

/// Export filename stamped to minute precision; unique per run by design.
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("jobs_scrap_{}.csv", at.format("%Y-%m-%d-%H-%M"))
}

/// Serialize the aggregated table as UTF-8 CSV. The header row is written
/// explicitly so an empty run still produces a well-formed file.
pub fn write_csv(export: &AggregatedExport, path: &Path) -> Result<(), ScrapeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADERS)?;
    for record in &export.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::JobRecord;
    use chrono::TimeZone;

    fn record(job_name: &str) -> JobRecord {
        JobRecord {
            date: "2024-01-15".to_string(),
            week: 3,
            job_search: "data analyst".to_string(),
            job_name: job_name.to_string(),
            company: "Acme".to_string(),
            city: "Paris, Île-de-France".to_string(),
            link: "https://example.com/job/1".to_string(),
        }
    }

    #[test]
    fn write_then_read_reproduces_identical_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");

        let export = AggregatedExport {
            records: vec![record("Data Analyst (H/F)"), record("Data Analyst Junior")],
        };
        write_csv(&export, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(CSV_HEADERS.to_vec())
        );
        let rows: Vec<JobRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows, export.records);
    }

    #[test]
    fn empty_export_still_writes_the_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv(&AggregatedExport::default(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Date,Week,Job search,Job name,Company,City,Link");
    }

    #[test]
    fn file_names_differ_across_minutes() {
        let first = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let second = Local.with_ymd_and_hms(2024, 1, 15, 9, 31, 0).unwrap();
        assert_eq!(export_file_name(first), "jobs_scrap_2024-01-15-09-30.csv");
        assert_ne!(export_file_name(first), export_file_name(second));
    }

    #[test]
    fn seconds_do_not_change_the_file_name() {
        let first = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 1).unwrap();
        let second = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 59).unwrap();
        assert_eq!(export_file_name(first), export_file_name(second));
    }
}
