//! Prometheus push gateway transport

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};

/// Job name the SRU gauges are grouped under at the gateway.
pub const JOB_NAME: &str = "foundations-sru";

const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Accepts one batch of encoded metrics for a job.
#[async_trait]
pub trait MetricsGateway: Send + Sync {
    async fn push(&self, job: &str, body: String) -> Result<()>;
}

/// HTTP push gateway client. A push replaces every metric previously pushed
/// for the same job.
pub struct PushGateway {
    client: Client,
    base_url: String,
}

impl PushGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::transport(base_url, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn job_url(&self, job: &str) -> String {
        format!("{}/metrics/job/{}", self.base_url, job)
    }
}

#[async_trait]
impl MetricsGateway for PushGateway {
    async fn push(&self, job: &str, body: String) -> Result<()> {
        let url = self.job_url(job);
        tracing::info!("Pushing {} bytes of metrics to {}", body.len(), url);

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, TEXT_FORMAT)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        if !response.status().is_success() {
            return Err(Error::transport(&url, format!("HTTP {}", response.status())));
        }

        Ok(())
    }
}
