//! Pending-SRU report download

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};

/// Published location of the pending-SRU report.
pub const SRU_REPORT_URL: &str = "http://people.canonical.com/~ubuntu-archive/pending-sru.html";

const USER_AGENT: &str = concat!("sru-metrics/", env!("CARGO_PKG_VERSION"));

/// Retrieves a report document.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Plain HTTP GET of the report page, no retries.
pub struct HttpReportFetcher {
    client: Client,
}

impl HttpReportFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::report_fetch(SRU_REPORT_URL, e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReportFetcher for HttpReportFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("Fetching SRU report from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::report_fetch(url, e))?;

        if !response.status().is_success() {
            return Err(Error::report_fetch(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::report_fetch(url, e))?;

        tracing::debug!("SRU report is {} bytes", body.len());
        Ok(body.to_vec())
    }
}
