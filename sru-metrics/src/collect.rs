//! One SRU metrics collection cycle
//!
//! Queries the upload queue of every stable series, reads the pending-SRU
//! report, then hands both to the publisher. Everything runs sequentially
//! and nothing is kept between runs.

use std::io::Write;

use chrono::{Local, NaiveDateTime};

use crate::error::Result;
use crate::module::launchpad::{SeriesCatalog, UploadQueueClient};
use crate::module::publisher::{MetricPublisher, MetricsGateway, PublishOutcome, SruSnapshot};
use crate::module::queue::QueueAggregator;
use crate::module::sru_report::{parse_sru_report, ReadyCounts, ReportFetcher, SRU_REPORT_URL};

pub struct SruCollector<'a> {
    catalog: &'a dyn SeriesCatalog,
    uploads: &'a dyn UploadQueueClient,
    fetcher: &'a dyn ReportFetcher,
    gateway: &'a dyn MetricsGateway,
    report_url: String,
}

impl<'a> SruCollector<'a> {
    pub fn new(
        catalog: &'a dyn SeriesCatalog,
        uploads: &'a dyn UploadQueueClient,
        fetcher: &'a dyn ReportFetcher,
        gateway: &'a dyn MetricsGateway,
    ) -> Self {
        Self {
            catalog,
            uploads,
            fetcher,
            gateway,
            report_url: SRU_REPORT_URL.to_string(),
        }
    }

    /// Collect queue statistics and ready counts as of `now`.
    pub async fn gather(&self, now: NaiveDateTime) -> Result<SruSnapshot> {
        let queues = QueueAggregator::new(self.catalog, self.uploads)
            .collect(now)
            .await?;
        let ready = ready_counts(self.fetcher, &self.report_url, parse_sru_report).await?;

        Ok(SruSnapshot { queues, ready })
    }

    /// Run a full cycle: gather, print to `out`, push unless `dry_run`.
    pub async fn run(&self, dry_run: bool, out: &mut dyn Write) -> Result<PublishOutcome> {
        tracing::info!("Collecting SRU queue metrics (dry run: {})", dry_run);

        let snapshot = self.gather(Local::now().naive_local()).await?;
        MetricPublisher::new(self.gateway)
            .publish(&snapshot, dry_run, out)
            .await
    }
}

/// Signature of a pending-SRU report parser.
pub type ReportParser = fn(&[u8]) -> Result<ReadyCounts>;

/// Fetch the pending-SRU report and run `parse` over it.
///
/// A failed download is fatal. A report that cannot be parsed is logged and
/// yields no ready counts, so the queue metrics still get published.
pub async fn ready_counts(
    fetcher: &dyn ReportFetcher,
    url: &str,
    parse: ReportParser,
) -> Result<ReadyCounts> {
    let body = fetcher.fetch(url).await?;

    match parse(&body) {
        Ok(counts) => {
            tracing::info!("SRU report lists {} releases", counts.len());
            Ok(counts)
        }
        Err(e) => {
            tracing::error!("Error parsing SRU report: {}", e);
            Ok(ReadyCounts::new())
        }
    }
}
