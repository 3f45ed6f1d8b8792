//! Prometheus exposition of the SRU gauges

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

use super::types::{MetricFamily, MetricSample};
use crate::error::Result;

/// Prefix of every exported metric name.
pub const METRIC_PREFIX: &str = "distro_sru";

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct SeriesLabels {
    series: String,
}

/// Register all five families and render them in text format.
///
/// Families without samples are still declared so the gateway replaces any
/// stale series from an earlier push.
pub fn encode_samples(samples: &[MetricSample]) -> Result<String> {
    let mut registry = Registry::with_prefix(METRIC_PREFIX);

    for family in MetricFamily::ALL {
        let gauges = Family::<SeriesLabels, Gauge>::default();
        for sample in samples.iter().filter(|s| s.family == family) {
            gauges
                .get_or_create(&SeriesLabels {
                    series: sample.label.clone(),
                })
                .set(sample.value as i64);
        }
        registry.register(family.name(), family.help(), gauges);
    }

    let mut body = String::new();
    encode(&mut body, &registry)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::publisher::types::tests::snapshot;

    #[test]
    fn test_encode_samples() {
        let body = encode_samples(&snapshot().samples()).unwrap();

        assert!(body.contains("# TYPE distro_sru_unapproved_proposed_count gauge"));
        assert!(body.contains("distro_sru_unapproved_proposed_count{series=\"noble\"} 3"));
        assert!(body.contains("distro_sru_unapproved_proposed_count{series=\"jammy\"} 0"));
        assert!(body.contains("distro_sru_unapproved_proposed_oldest_age{series=\"noble\"} 25"));
        assert!(body.contains("distro_sru_unapproved_proposed_ten_day_backlog_age{series=\"noble\"} 17"));
        assert!(body.contains("distro_sru_unapproved_proposed_ten_day_backlog_count{series=\"noble\"} 2"));
        assert!(body.contains("distro_sru_verified_and_ready_count{series=\"noble\"} 2"));
        assert!(body.contains("# HELP distro_sru_verified_and_ready_count Number of Publishable Updates in Proposed per Series"));
    }

    #[test]
    fn test_empty_families_are_declared() {
        let body = encode_samples(&[]).unwrap();
        for family in MetricFamily::ALL {
            assert!(body.contains(&format!("# TYPE {}_{} gauge", METRIC_PREFIX, family.name())));
        }
    }
}
