//! Gauge families and samples published for the SRU queue

use crate::module::queue::SeriesQueue;
use crate::module::sru_report::ReadyCounts;

/// The five gauge families, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricFamily {
    UnapprovedCount,
    OldestAge,
    BacklogAge,
    BacklogCount,
    VerifiedAndReady,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 5] = [
        MetricFamily::UnapprovedCount,
        MetricFamily::OldestAge,
        MetricFamily::BacklogAge,
        MetricFamily::BacklogCount,
        MetricFamily::VerifiedAndReady,
    ];

    /// Metric name without the exporter prefix.
    pub fn name(&self) -> &'static str {
        match self {
            MetricFamily::UnapprovedCount => "unapproved_proposed_count",
            MetricFamily::OldestAge => "unapproved_proposed_oldest_age",
            MetricFamily::BacklogAge => "unapproved_proposed_ten_day_backlog_age",
            MetricFamily::BacklogCount => "unapproved_proposed_ten_day_backlog_count",
            MetricFamily::VerifiedAndReady => "verified_and_ready_count",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            MetricFamily::UnapprovedCount => {
                "Number of Proposed Uploads in the Unapproved Queue per Series"
            }
            MetricFamily::OldestAge => {
                "Age in days of oldest Proposed Upload in the Unapproved Queue per Series"
            }
            MetricFamily::BacklogAge => {
                "Backlog age in days of Proposed Uploads in the Unapproved Queue per Series"
            }
            MetricFamily::BacklogCount => {
                "Number of backlogged Proposed Uploads in the Unapproved Queue per Series"
            }
            MetricFamily::VerifiedAndReady => "Number of Publishable Updates in Proposed per Series",
        }
    }

    /// The value this family reads from a series queue; `None` for families
    /// sourced from the SRU report.
    pub fn queue_value(&self, queue: &SeriesQueue) -> Option<u64> {
        match self {
            MetricFamily::UnapprovedCount => Some(queue.queue_count),
            MetricFamily::OldestAge => Some(queue.age_stats.oldest_age_in_days),
            MetricFamily::BacklogAge => Some(queue.age_stats.ten_day_backlog_age),
            MetricFamily::BacklogCount => Some(queue.age_stats.ten_day_backlog_count),
            MetricFamily::VerifiedAndReady => None,
        }
    }
}

/// One gauge value for one series or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    pub family: MetricFamily,
    /// Series or release name
    pub label: String,
    pub value: u64,
}

/// Everything one collection cycle produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SruSnapshot {
    pub queues: Vec<SeriesQueue>,
    pub ready: ReadyCounts,
}

impl SruSnapshot {
    /// Flatten into samples grouped by family, in [`MetricFamily::ALL`] order.
    pub fn samples(&self) -> Vec<MetricSample> {
        let mut samples = Vec::with_capacity(self.queues.len() * 4 + self.ready.len());

        for family in MetricFamily::ALL {
            match family {
                MetricFamily::VerifiedAndReady => {
                    samples.extend(self.ready.iter().map(|(release, count)| MetricSample {
                        family,
                        label: release.to_string(),
                        value: count,
                    }))
                }
                _ => samples.extend(self.queues.iter().filter_map(|queue| {
                    family.queue_value(queue).map(|value| MetricSample {
                        family,
                        label: queue.series.clone(),
                        value,
                    })
                })),
            }
        }

        samples
    }
}
