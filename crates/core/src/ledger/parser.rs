//! Scraping of the CLI's text report.
//!
//! The CLI prints a human-oriented report (plain sections in older
//! releases, box-drawn tables in newer ones). Only two things are read:
//! the first `Transaction Digest: <digest>` line, and the `ID: 0x...` /
//! `ObjectID: 0x...` entries inside `Created Objects:` blocks, in output
//! order with duplicates removed.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::LedgerError;

static DIGEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Transaction Digest:\s*([A-Za-z0-9]+)").expect("valid regex"));

static OBJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Object)?ID:\s*(0x[0-9a-fA-F]+)").expect("valid regex"));

const CREATED_HEADING: &str = "Created Objects";

/// Identifiers recovered from one CLI run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReceipt {
    pub transaction_digest: String,
    pub created_object_ids: Vec<String>,
    pub raw_output: String,
}

impl LedgerReceipt {
    /// Created object at `index` in output order.
    pub fn created(&self, index: usize) -> Option<&str> {
        self.created_object_ids.get(index).map(String::as_str)
    }
}

/// First transaction digest in `output`, if any.
pub fn parse_transaction_digest(output: &str) -> Option<String> {
    DIGEST_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Object ids listed under `Created Objects:` headings.
pub fn parse_created_object_ids(output: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let mut in_created = false;

    for line in output.lines() {
        let text = strip_table_chrome(line);

        let scan = if let Some(pos) = text.find(CREATED_HEADING) {
            in_created = true;
            &text[pos + CREATED_HEADING.len()..]
        } else if in_created && is_section_heading(text) {
            in_created = false;
            continue;
        } else if in_created {
            text
        } else {
            continue;
        };

        for cap in OBJECT_ID_RE.captures_iter(scan) {
            let id = cap[1].to_string();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Build a receipt from a successful run's stdout.
pub fn parse_receipt(stdout: &str) -> Result<LedgerReceipt, LedgerError> {
    let transaction_digest =
        parse_transaction_digest(stdout).ok_or(LedgerError::MissingDigest)?;
    Ok(LedgerReceipt {
        transaction_digest,
        created_object_ids: parse_created_object_ids(stdout),
        raw_output: stdout.to_string(),
    })
}

/// Trim whitespace and box-drawing borders from a report line.
fn strip_table_chrome(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || matches!(c, '│' | '┃' | '|' | '┌' | '└' | '─'))
}

/// A line that opens a new report section (`Mutated Objects:`, a
/// `----- Events -----` rule, a table edge) and therefore closes the
/// created-objects block.
fn is_section_heading(text: &str) -> bool {
    if text.starts_with("---") || text.starts_with('╭') || text.starts_with('╰') {
        return true;
    }
    text.ends_with(':')
        && !text.contains("ID:")
        && text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
}
