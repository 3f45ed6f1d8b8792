//! Unapproved queue statistics

/// Age statistics of one series' unapproved Proposed uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesAgeStats {
    /// Age in whole days of the oldest upload (0 when the queue is empty)
    pub oldest_age_in_days: u64,
    /// Uploads older than the backlog threshold
    pub ten_day_backlog_count: u64,
    /// Sum of the days each backlogged upload spent beyond the threshold
    pub ten_day_backlog_age: u64,
}

impl SeriesAgeStats {
    /// Items waiting longer than this have been through at least a week of
    /// reviewer shifts and are counted as late.
    pub const BACKLOG_THRESHOLD_DAYS: u64 = 10;

    /// Fold a list of upload ages (in days) into statistics.
    pub fn from_ages<I>(ages: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        ages.into_iter().fold(Self::default(), |mut stats, age| {
            stats.oldest_age_in_days = stats.oldest_age_in_days.max(age);
            if age > Self::BACKLOG_THRESHOLD_DAYS {
                stats.ten_day_backlog_count += 1;
                stats.ten_day_backlog_age += age - Self::BACKLOG_THRESHOLD_DAYS;
            }
            stats
        })
    }
}

/// Queue state of a single stable series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQueue {
    pub series: String,
    /// Number of unapproved uploads targeting Proposed
    pub queue_count: u64,
    pub age_stats: SeriesAgeStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ages() {
        let stats = SeriesAgeStats::from_ages([3, 12, 25]);
        assert_eq!(stats.oldest_age_in_days, 25);
        assert_eq!(stats.ten_day_backlog_count, 2);
        assert_eq!(stats.ten_day_backlog_age, 17);
    }

    #[test]
    fn test_from_ages_empty() {
        assert_eq!(SeriesAgeStats::from_ages([]), SeriesAgeStats::default());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let stats = SeriesAgeStats::from_ages([10, 10, 11]);
        assert_eq!(stats.oldest_age_in_days, 11);
        assert_eq!(stats.ten_day_backlog_count, 1);
        assert_eq!(stats.ten_day_backlog_age, 1);
    }
}
