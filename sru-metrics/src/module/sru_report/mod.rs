//! Pending-SRU report
//!
//! Downloads the archive team's HTML report of uploads in -proposed and
//! counts, per release, the ones ready to be released.

pub mod fetcher;
pub mod parser;
pub mod types;

pub use fetcher::{HttpReportFetcher, ReportFetcher, SRU_REPORT_URL};
pub use parser::parse_sru_report;
pub use types::{ReadyCounts, ReportColumn, RowVerdict};
