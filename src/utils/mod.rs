//! Utility functions and helpers.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

/// Hex characters kept from the row digest.
pub const ROW_ID_LEN: usize = 16;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static HREF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]+)""#).expect("href pattern is valid"));

/// Stable identifier for a raw row: leading hex of its SHA-256 digest.
pub fn row_id(line: &str) -> String {
    let digest = Sha256::digest(line.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(ROW_ID_LEN);
    id
}

/// Remove every HTML tag from a cell, keeping the text between them.
pub fn strip_tags(html: &str) -> String {
    TAG_PATTERN.replace_all(html, "").into_owned()
}

/// Extract the first double-quoted `href` value from a cell.
pub fn extract_href(html: &str) -> Option<String> {
    HREF_PATTERN
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
