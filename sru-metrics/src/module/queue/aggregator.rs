//! Per-series unapproved queue aggregation

use chrono::NaiveDateTime;

use super::types::{SeriesAgeStats, SeriesQueue};
use crate::error::Result;
use crate::module::launchpad::{
    stable_series, Pocket, SeriesCatalog, UploadQueueClient, UploadRecord, UploadStatus,
};

/// Whole days between `created` and `now`, never negative.
pub fn age_in_days(now: NaiveDateTime, created: NaiveDateTime) -> u64 {
    (now - created).num_days().max(0) as u64
}

/// Age statistics for one series' uploads as of `now`.
pub fn age_stats(now: NaiveDateTime, uploads: &[UploadRecord]) -> SeriesAgeStats {
    SeriesAgeStats::from_ages(
        uploads
            .iter()
            .map(|upload| age_in_days(now, upload.date_created)),
    )
}

/// Computes queue depth and age statistics for every stable series.
pub struct QueueAggregator<'a> {
    catalog: &'a dyn SeriesCatalog,
    uploads: &'a dyn UploadQueueClient,
}

impl<'a> QueueAggregator<'a> {
    pub fn new(catalog: &'a dyn SeriesCatalog, uploads: &'a dyn UploadQueueClient) -> Self {
        Self { catalog, uploads }
    }

    /// Query each stable series once, one after another.
    ///
    /// Any transport failure aborts the whole collection.
    pub async fn collect(&self, now: NaiveDateTime) -> Result<Vec<SeriesQueue>> {
        let series = stable_series(self.catalog).await?;
        let mut queues = Vec::with_capacity(series.len());

        for s in &series {
            let uploads = self
                .uploads
                .get_uploads(s, UploadStatus::Unapproved, Pocket::Proposed)
                .await?;

            let queue = SeriesQueue {
                series: s.name.clone(),
                queue_count: uploads.len() as u64,
                age_stats: age_stats(now, &uploads),
            };
            tracing::info!(
                "{}: {} unapproved, oldest {} days, {} backlogged",
                queue.series,
                queue.queue_count,
                queue.age_stats.oldest_age_in_days,
                queue.age_stats.ten_day_backlog_count
            );
            queues.push(queue);
        }

        Ok(queues)
    }
}
