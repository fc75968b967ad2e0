use crate::extractor::ListingFields;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// One exported row. Immutable once created; the CSV column names live in
/// the serde renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Week")]
    pub week: u32,
    #[serde(rename = "Job search")]
    pub job_search: String,
    #[serde(rename = "Job name")]
    pub job_name: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Link")]
    pub link: String,
}

/// Capture date and ISO week of the run, derived once per invocation so
/// every record of the run shares the same stamp.
#[derive(Debug, Clone)]
pub struct CaptureStamp {
    pub date: String,
    pub week: u32,
}

impl CaptureStamp {
    pub fn now() -> Self {
        let now = Local::now();
        CaptureStamp {
            date: now.format("%Y-%m-%d").to_string(),
            week: now.iso_week().week(),
        }
    }
}

/// Accumulator for one keyword's pass. Grows by one row per matching
/// listing, in encounter order.
pub struct SearchRun {
    keyword: String,
    stamp: CaptureStamp,
    records: Vec<JobRecord>,
}

impl SearchRun {
    /// `keyword` is expected lowercase; the filter is a literal substring
    /// match against lowercased titles.
    pub fn new(keyword: &str, stamp: &CaptureStamp) -> Self {
        SearchRun {
            keyword: keyword.to_string(),
            stamp: stamp.clone(),
            records: Vec::new(),
        }
    }

    /// Append a record when the keyword occurs in the lowered title.
    /// Returns the inclusion decision.
    pub fn collect(&mut self, fields: &ListingFields) -> bool {
        if !fields.lower_title.contains(&self.keyword) {
            return false;
        }
        self.records.push(JobRecord {
            date: self.stamp.date.clone(),
            week: self.stamp.week,
            job_search: self.keyword.clone(),
            job_name: fields.job_name.clone(),
            company: fields.company.clone(),
            city: fields.city.clone(),
            link: fields.link.clone(),
        });
        true
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finalize the pass into its table.
    pub fn finish(self) -> Vec<JobRecord> {
        self.records
    }
}

/// Row-wise union of every keyword's table, in keyword order. Built once
/// per invocation and consumed once by the export collaborator.
#[derive(Debug, Default)]
pub struct AggregatedExport {
    pub records: Vec<JobRecord>,
}

impl AggregatedExport {
    pub fn append_run(&mut self, rows: Vec<JobRecord>) {
        self.records.extend(rows);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
