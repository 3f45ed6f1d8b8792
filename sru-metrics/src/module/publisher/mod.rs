//! SRU gauge publishing
//!
//! Prints the collected values as a console report and, unless running
//! dry, pushes them to the Prometheus push gateway in a single batch.

pub mod console;
pub mod gateway;
pub mod gauges;
pub mod types;

use std::io::Write;

use crate::error::Result;

pub use gateway::{MetricsGateway, PushGateway, JOB_NAME};
pub use types::{MetricFamily, MetricSample, SruSnapshot};

/// What [`MetricPublisher::publish`] did with the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Dry run: report printed only
    Printed { samples: usize },
    /// Report printed and all gauges pushed
    Pushed { samples: usize },
}

pub struct MetricPublisher<'a> {
    gateway: &'a dyn MetricsGateway,
}

impl<'a> MetricPublisher<'a> {
    pub fn new(gateway: &'a dyn MetricsGateway) -> Self {
        Self { gateway }
    }

    /// Print the report to `out`, then push unless `dry_run`.
    ///
    /// The report is complete and flushed before the push starts, so a
    /// gateway failure never loses the console output.
    pub async fn publish(
        &self,
        snapshot: &SruSnapshot,
        dry_run: bool,
        out: &mut dyn Write,
    ) -> Result<PublishOutcome> {
        let samples = snapshot.samples();
        console::render_report(&samples, out)?;

        if dry_run {
            out.flush()?;
            tracing::info!("Dry run, not pushing {} samples", samples.len());
            return Ok(PublishOutcome::Printed {
                samples: samples.len(),
            });
        }

        writeln!(out, "Pushing data...")?;
        out.flush()?;

        let body = gauges::encode_samples(&samples)?;
        self.gateway.push(JOB_NAME, body).await?;

        tracing::info!("Pushed {} samples under job {}", samples.len(), JOB_NAME);
        Ok(PublishOutcome::Pushed {
            samples: samples.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        pushes: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl MetricsGateway for RecordingGateway {
        async fn push(&self, job: &str, body: String) -> Result<()> {
            self.pushes.lock().unwrap().push((job.to_string(), body));
            if self.fail {
                return Err(Error::transport("http://gateway/metrics/job/foundations-sru", "HTTP 500"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dry_run_never_pushes() {
        let gateway = RecordingGateway::default();
        let mut out = Vec::new();

        let outcome = MetricPublisher::new(&gateway)
            .publish(&types::tests::snapshot(), true, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, PublishOutcome::Printed { samples: 10 });
        assert!(gateway.pushes.lock().unwrap().is_empty());
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("noble: 25"));
        assert!(!report.contains("Pushing data..."));
    }

    #[tokio::test]
    async fn test_push_once_with_all_families() {
        let gateway = RecordingGateway::default();
        let mut out = Vec::new();

        let outcome = MetricPublisher::new(&gateway)
            .publish(&types::tests::snapshot(), false, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, PublishOutcome::Pushed { samples: 10 });
        let pushes = gateway.pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].0, JOB_NAME);
        for family in MetricFamily::ALL {
            assert!(pushes[0].1.contains(family.name()));
        }
        assert!(String::from_utf8(out).unwrap().ends_with("Pushing data...\n"));
    }

    #[tokio::test]
    async fn test_push_failure_after_report() {
        let gateway = RecordingGateway {
            fail: true,
            ..Default::default()
        };
        let mut out = Vec::new();

        let result = MetricPublisher::new(&gateway)
            .publish(&types::tests::snapshot(), false, &mut out)
            .await;

        assert!(matches!(result, Err(Error::Transport { .. })));
        assert!(String::from_utf8(out).unwrap().contains("Number of Publishable Updates"));
    }
}
