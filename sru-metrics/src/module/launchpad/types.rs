//! Launchpad series and package upload types

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// A release track of the distribution, e.g. "noble".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub name: String,
    pub active: bool,
    /// Whether this is the development series
    pub is_current: bool,
    /// Launchpad resource URL of the series
    pub self_link: String,
}

/// One pending package upload in a series' queue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadRecord {
    /// Creation time with any zone offset discarded (wall-clock time as sent)
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_created: NaiveDateTime,
    pub status: String,
    pub pocket: String,
}

/// Package upload queue status, as named by the Launchpad API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// Waiting for an archive admin to review it
    Unapproved,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Unapproved => "Unapproved",
        }
    }
}

/// Archive pocket an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pocket {
    Proposed,
}

impl Pocket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pocket::Proposed => "Proposed",
        }
    }
}

/// Paged collection envelope returned by the Launchpad web service
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
    #[serde(default)]
    pub next_collection_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeriesEntry {
    pub name: String,
    #[serde(default)]
    pub active: bool,
    pub self_link: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DistributionEntry {
    pub current_series_link: String,
}

impl SeriesEntry {
    pub fn into_series(self, current_series_link: &str) -> Series {
        Series {
            is_current: self.self_link == current_series_link,
            name: self.name,
            active: self.active,
            self_link: self.self_link,
        }
    }
}

/// Parse a Launchpad timestamp, dropping the zone offset if present.
///
/// Accepts "2026-10-01T08:15:30.123456+00:00" as well as naive
/// "2026-10-01T08:15:30".
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}
