//! Capabilities the queue aggregator needs from the upload-tracking service

use async_trait::async_trait;

use super::types::{Pocket, Series, UploadRecord, UploadStatus};
use crate::error::Result;

/// Enumerates the distribution's release series.
#[async_trait]
pub trait SeriesCatalog: Send + Sync {
    /// All series still marked active, the development series included.
    async fn list_active_series(&self) -> Result<Vec<Series>>;

    /// The development series.
    async fn current_series(&self) -> Result<Series>;
}

/// Lists package uploads of a series.
#[async_trait]
pub trait UploadQueueClient: Send + Sync {
    async fn get_uploads(
        &self,
        series: &Series,
        status: UploadStatus,
        pocket: Pocket,
    ) -> Result<Vec<UploadRecord>>;
}

/// Active series excluding the development one, in catalog order.
///
/// Relies on the `is_current` flag of the active list, so the development
/// series is never looked up on its own.
pub async fn stable_series(catalog: &dyn SeriesCatalog) -> Result<Vec<Series>> {
    let active = catalog.list_active_series().await?;

    if !active.iter().any(|s| s.is_current) {
        tracing::warn!("No active series is marked as the development series");
    }

    Ok(active.into_iter().filter(|s| !s.is_current).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedCatalog {
        series: Vec<Series>,
        current_lookups: Mutex<usize>,
    }

    impl FixedCatalog {
        fn new(series: Vec<Series>) -> Self {
            Self {
                series,
                current_lookups: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl SeriesCatalog for FixedCatalog {
        async fn list_active_series(&self) -> Result<Vec<Series>> {
            Ok(self.series.iter().filter(|s| s.active).cloned().collect())
        }

        async fn current_series(&self) -> Result<Series> {
            *self.current_lookups.lock().unwrap() += 1;
            Ok(self
                .series
                .iter()
                .find(|s| s.is_current)
                .cloned()
                .unwrap())
        }
    }

    fn series(name: &str, active: bool, is_current: bool) -> Series {
        Series {
            name: name.to_string(),
            active,
            is_current,
            self_link: format!("https://api.launchpad.net/devel/ubuntu/{}", name),
        }
    }

    fn names(series: Vec<Series>) -> Vec<String> {
        series.into_iter().map(|s| s.name).collect()
    }

    #[tokio::test]
    async fn test_stable_series_excludes_current() {
        let catalog = FixedCatalog::new(vec![
            series("jammy", true, false),
            series("noble", true, false),
            series("resolute", true, true),
            series("focal", false, false),
        ]);
        let stable = stable_series(&catalog).await.unwrap();
        assert_eq!(names(stable), vec!["jammy", "noble"]);
    }

    #[tokio::test]
    async fn test_stable_series_uses_only_the_active_list() {
        let catalog = FixedCatalog::new(vec![
            series("jammy", true, false),
            series("resolute", true, true),
        ]);
        stable_series(&catalog).await.unwrap();
        assert_eq!(*catalog.current_lookups.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stable_series_without_current_keeps_all() {
        let catalog = FixedCatalog::new(vec![
            series("jammy", true, false),
            series("noble", true, false),
            series("resolute", false, true),
        ]);
        let stable = stable_series(&catalog).await.unwrap();
        assert_eq!(names(stable), vec!["jammy", "noble"]);
    }
}
