//! Pending-SRU report data types

/// Column roles of a per-release table in the pending-SRU report.
///
/// The report has no header contract; these positions are the only schema
/// the parser relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    /// Package name plus build/test failure markers
    Status,
    /// Links to the SRU bugs, classed by verification state
    Bugs,
    /// Days the upload has spent in -proposed
    DaysInProposed,
}

impl ReportColumn {
    pub const fn index(self) -> usize {
        match self {
            ReportColumn::Status => 0,
            ReportColumn::Bugs => 4,
            ReportColumn::DaysInProposed => 5,
        }
    }
}

/// Outcome of classifying one report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVerdict {
    /// Verified and old enough to be released
    Ready,
    /// Failed build, dependency wait, cancelled or autopkgtest regression
    Blocked,
    /// Fewer than the minimum days in -proposed
    TooFresh,
    /// At least one linked bug lacks verification
    Unverified,
    /// Missing cells or unreadable day count
    Malformed,
}

/// Ready-to-release counts per release, in the order the report lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyCounts {
    entries: Vec<(String, u64)>,
}

impl ReadyCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting `release` from zero, keeping its original position if
    /// it was seen before.
    pub fn reset(&mut self, release: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == release) {
            Some((_, count)) => *count = 0,
            None => self.entries.push((release.to_string(), 0)),
        }
    }

    pub fn increment(&mut self, release: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == release) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((release.to_string(), 1)),
        }
    }

    pub fn get(&self, release: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == release)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
