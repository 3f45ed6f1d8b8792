//! Anonymous, read-only Launchpad web service client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use super::source::{SeriesCatalog, UploadQueueClient};
use super::types::{
    Collection, DistributionEntry, Pocket, Series, SeriesEntry, UploadRecord, UploadStatus,
};
use crate::config::CollectorConfig;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("sru-metrics/", env!("CARGO_PKG_VERSION"));

/// Session handle for the Launchpad API.
///
/// Built once per run and shared by reference with everything that talks to
/// Launchpad.
pub struct LaunchpadClient {
    client: Client,
    api_root: String,
    distribution: String,
    current_series_link: OnceCell<String>,
}

impl LaunchpadClient {
    pub fn anonymous(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::transport(&config.launchpad_api_root, e))?;

        Ok(Self {
            client,
            api_root: config.launchpad_api_root.trim_end_matches('/').to_string(),
            distribution: config.distribution.clone(),
            current_series_link: OnceCell::new(),
        })
    }

    fn distribution_url(&self) -> String {
        format!("{}/{}", self.api_root, self.distribution)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::transport(url, e))?;

        if !response.status().is_success() {
            return Err(Error::transport(url, format!("HTTP {}", response.status())));
        }

        response.json().await.map_err(|e| Error::transport(url, e))
    }

    /// Fetch every page of a collection resource.
    async fn get_collection<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let mut entries = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(page_url) = next {
            let page: Collection<T> = self.get_json(&page_url).await?;
            entries.extend(page.entries);
            next = page.next_collection_link;
        }

        Ok(entries)
    }

    /// Link of the development series, fetched once per client.
    async fn current_series_link(&self) -> Result<&str> {
        let link = self
            .current_series_link
            .get_or_try_init(|| async {
                let distribution: DistributionEntry =
                    self.get_json(&self.distribution_url()).await?;
                Ok::<_, Error>(distribution.current_series_link)
            })
            .await?;
        Ok(link.as_str())
    }
}

#[async_trait]
impl SeriesCatalog for LaunchpadClient {
    async fn list_active_series(&self) -> Result<Vec<Series>> {
        let current_link = self.current_series_link().await?;
        let url = format!("{}/series", self.distribution_url());
        let url = Url::parse(&url).map_err(|e| Error::transport(&url, e))?;

        let series: Vec<SeriesEntry> = self.get_collection(url).await?;
        let active: Vec<Series> = series
            .into_iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.into_series(current_link))
            .collect();

        tracing::info!(
            "{} has {} active series",
            self.distribution,
            active.len()
        );
        Ok(active)
    }

    async fn current_series(&self) -> Result<Series> {
        let link = self.current_series_link().await?;
        let entry: SeriesEntry = self.get_json(link).await?;
        Ok(entry.into_series(link))
    }
}

#[async_trait]
impl UploadQueueClient for LaunchpadClient {
    async fn get_uploads(
        &self,
        series: &Series,
        status: UploadStatus,
        pocket: Pocket,
    ) -> Result<Vec<UploadRecord>> {
        let url = upload_query_url(series, status, pocket)?;
        let uploads: Vec<UploadRecord> = self.get_collection(url).await?;

        tracing::debug!(
            "{}: {} {} uploads in {}",
            series.name,
            uploads.len(),
            status.as_str(),
            pocket.as_str()
        );
        Ok(uploads)
    }
}

fn upload_query_url(series: &Series, status: UploadStatus, pocket: Pocket) -> Result<Url> {
    Url::parse_with_params(
        &series.self_link,
        &[
            ("ws.op", "getPackageUploads"),
            ("status", status.as_str()),
            ("pocket", pocket.as_str()),
        ],
    )
    .map_err(|e| Error::transport(&series.self_link, e))
}
