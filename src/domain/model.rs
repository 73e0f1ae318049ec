use crate::utils::error::{ErrorCategory, Result};

/// Column order of the output file. Row serialization follows the same order.
pub const CSV_HEADER: [&str; 5] = [
    "Job Title",
    "Company",
    "Location",
    "Expiry Date",
    "Job Description",
];

pub const DEFAULT_TITLE: &str = "";
pub const DEFAULT_COMPANY: &str = "Unknown Company";
pub const DEFAULT_LOCATION: &str = "Unknown Location";
pub const DEFAULT_EXPIRY_DATE: &str = "No expiry date";
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// One normalized job posting. Every field is always populated; a missing
/// source node leaves the field at its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub expiry_date: String,
    pub description: String,
}

impl Default for ListingRecord {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            company: DEFAULT_COMPANY.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            expiry_date: DEFAULT_EXPIRY_DATE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ListingRecord {
    pub fn to_row(&self) -> [&str; 5] {
        [
            &self.title,
            &self.company,
            &self.location,
            &self.expiry_date,
            &self.description,
        ]
    }
}

#[derive(Debug)]
pub struct ListingOutcome {
    /// 1-based position in document order.
    pub position: usize,
    pub result: Result<ListingRecord>,
}

#[derive(Debug)]
pub struct ScrapeBatch {
    /// Listings matched on the page before the cap was applied.
    pub total_found: usize,
    pub outcomes: Vec<ListingOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: String,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed(RunReport),
    NoListings,
    Aborted(ErrorCategory),
}
