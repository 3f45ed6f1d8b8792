//! Human-readable metrics report

use std::io::Write;

use super::types::{MetricFamily, MetricSample};

/// Print one heading per family followed by a `label: value` line per sample.
pub fn render_report(samples: &[MetricSample], out: &mut dyn Write) -> std::io::Result<()> {
    for family in MetricFamily::ALL {
        writeln!(out, "{}:", family.help())?;
        for sample in samples.iter().filter(|s| s.family == family) {
            writeln!(out, "{}: {}", sample.label, sample.value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::publisher::types::tests::snapshot;

    #[test]
    fn test_render_report() {
        let mut out = Vec::new();
        render_report(&snapshot().samples(), &mut out).unwrap();

        let expected = "\
Number of Proposed Uploads in the Unapproved Queue per Series:
noble: 3
jammy: 0
Age in days of oldest Proposed Upload in the Unapproved Queue per Series:
noble: 25
jammy: 0
Backlog age in days of Proposed Uploads in the Unapproved Queue per Series:
noble: 17
jammy: 0
Number of backlogged Proposed Uploads in the Unapproved Queue per Series:
noble: 2
jammy: 0
Number of Publishable Updates in Proposed per Series:
noble: 2
jammy: 0
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
