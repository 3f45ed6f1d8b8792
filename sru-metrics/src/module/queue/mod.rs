//! Unapproved Proposed queue metrics
//!
//! Counts the uploads waiting for review in each stable series and
//! derives how old and how late they are.

pub mod aggregator;
pub mod types;

pub use aggregator::QueueAggregator;
pub use types::{SeriesAgeStats, SeriesQueue};
