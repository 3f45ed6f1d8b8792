//! Launchpad upload-tracking service
//!
//! Enumerates the distribution's series and lists the package uploads
//! waiting in each series' queue.

pub mod client;
pub mod source;
pub mod types;

pub use client::LaunchpadClient;
pub use source::{stable_series, SeriesCatalog, UploadQueueClient};
pub use types::{Pocket, Series, UploadRecord, UploadStatus};
