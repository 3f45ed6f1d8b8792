//! Pending-SRU report HTML parser
//!
//! Parses the archive team's pending-SRU report
//! (http://people.canonical.com/~ubuntu-archive/pending-sru.html) and counts,
//! per release, the uploads that are verified and have soaked long enough in
//! -proposed to be released.
//!
//! The page has no stable schema. Anything that does not look like a release
//! table or a candidate row is skipped rather than treated as an error.

use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use super::types::{ReadyCounts, ReportColumn, RowVerdict};
use crate::error::{Error, Result};

/// Text preceding the overview table, which is not a release table.
const SUMMARY_HEADING: &str = "Upload queue status at a glance:";

/// Release name used when a table has no text before it at all.
pub const UNKNOWN_RELEASE: &str = "unknown";

/// Status cell markers of uploads that cannot be released as they are.
const BLOCKING_MARKERS: [&str; 4] = [
    "Failed",
    "Dependency wait",
    "Cancelled",
    "Regression in autopkgtest",
];

/// Minimum soak time in -proposed. Unrelated to the ten-day queue backlog.
pub const MIN_DAYS_IN_PROPOSED: i64 = 7;

const VERIFIED_CLASS: &str = "verified";

struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        let parse = |css: &str| {
            Selector::parse(css).map_err(|e| Error::ReportParse(format!("selector error: {}", e)))
        };
        Ok(Self {
            // Release tables are the ones carrying an id
            table: parse("table[id]")?,
            row: parse("tr")?,
            cell: parse("td")?,
            link: parse("a")?,
        })
    }
}

/// Parse the raw report into per-release ready counts.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, so one stray
/// byte only affects the cell it sits in. A pure function of `bytes`.
pub fn parse_sru_report(bytes: &[u8]) -> Result<ReadyCounts> {
    let html = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&html);
    let selectors = Selectors::new()?;

    let mut ready = ReadyCounts::new();

    for (table, preceding) in release_tables(&document, &selectors.table) {
        let release = match preceding {
            Some(text) => text,
            None => {
                warn!(
                    "Table {:?} has no preceding text, counting it as '{}'",
                    table.value().attr("id"),
                    UNKNOWN_RELEASE
                );
                UNKNOWN_RELEASE.to_string()
            }
        };

        if release == SUMMARY_HEADING {
            continue;
        }

        ready.reset(&release);

        for row in table.select(&selectors.row) {
            let cells: Vec<ElementRef<'_>> = row.select(&selectors.cell).collect();
            // Header rows only have <th>
            if cells.is_empty() {
                continue;
            }

            match classify_row(&cells, &selectors.link) {
                RowVerdict::Ready => ready.increment(&release),
                verdict => debug!(
                    "{}: skipping '{}' ({:?})",
                    release,
                    cell_text(&cells[ReportColumn::Status.index()]),
                    verdict
                ),
            }
        }
    }

    debug!("Parsed ready counts for {} releases", ready.len());
    Ok(ready)
}

/// Decide whether a data row is a releasable candidate.
fn classify_row(cells: &[ElementRef<'_>], link: &Selector) -> RowVerdict {
    let Some(status) = cells.get(ReportColumn::Status.index()) else {
        return RowVerdict::Malformed;
    };
    let status = cell_text(status);
    if BLOCKING_MARKERS.iter().any(|marker| status.contains(marker)) {
        return RowVerdict::Blocked;
    }

    let days = cells
        .get(ReportColumn::DaysInProposed.index())
        .and_then(|cell| cell_text(cell).parse::<i64>().ok());
    let Some(days) = days else {
        return RowVerdict::Malformed;
    };
    if days < MIN_DAYS_IN_PROPOSED {
        return RowVerdict::TooFresh;
    }

    let Some(bugs) = cells.get(ReportColumn::Bugs.index()) else {
        return RowVerdict::Malformed;
    };
    if bugs.select(link).all(|bug| is_verified(bug.value())) {
        RowVerdict::Ready
    } else {
        RowVerdict::Unverified
    }
}

fn is_verified(link: &Element) -> bool {
    link.classes().any(|class| class == VERIFIED_CLASS)
}

/// Collapse whitespace in the text content of a cell.
fn cell_text(cell: &ElementRef<'_>) -> String {
    normalize(&cell.text().collect::<String>())
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tables matching `table`, each paired with the nearest non-blank text node
/// that precedes it in document order.
fn release_tables<'a>(
    document: &'a Html,
    table: &Selector,
) -> Vec<(ElementRef<'a>, Option<String>)> {
    let mut preceding: Option<String> = None;
    let mut tables = Vec::new();

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Text(text) => {
                let text = normalize(text);
                if !text.is_empty() {
                    preceding = Some(text);
                }
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    if table.matches(&element) {
                        tables.push((element, preceding.clone()));
                    }
                }
            }
            _ => {}
        }
    }

    tables
}
