//! Navigation parameters and the URL query-string codec

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::page::Page;
use crate::store::RecordId;

/// Name of the query parameter carrying the page identifier
pub const PAGE_PARAM: &str = "page";

/// Page used when the URL names none
pub const DEFAULT_PAGE: &str = "login";

/// Extra key/value parameters of a navigation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavParams(BTreeMap<String, String>);

impl NavParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The `id` parameter as a record id
    pub fn id(&self) -> Option<RecordId> {
        self.get("id").and_then(|raw| raw.trim().parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for NavParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// State attached to a history entry; replaying it reproduces the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub page: Page,
    #[serde(default)]
    pub params: NavParams,
}

impl HistoryEntry {
    pub fn new(page: Page, params: NavParams) -> Self {
        Self { page, params }
    }

    /// Relative URL ("?page=...&...") for this entry
    pub fn to_url(&self) -> String {
        to_query(self.page.id(), &self.params)
    }
}

/// Serialize a page id and params into a query string.
///
/// A `page` key inside `params` is ignored; the page id always wins.
pub fn to_query(page_id: &str, params: &NavParams) -> String {
    let mut query = format!("?{}={}", PAGE_PARAM, urlencoding::encode(page_id));
    for (key, value) in params.iter().filter(|(key, _)| *key != PAGE_PARAM) {
        query.push('&');
        query.push_str(&urlencoding::encode(key));
        query.push('=');
        query.push_str(&urlencoding::encode(value));
    }
    query
}

/// Split a query string into the page id and the remaining params.
///
/// The page defaults to [`DEFAULT_PAGE`]. The first `page` value wins; for
/// other keys a later value replaces an earlier one.
pub fn parse_query(query: &str) -> (String, NavParams) {
    let query = query.trim_start_matches('?');
    let mut page: Option<String> = None;
    let mut params = NavParams::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key);
        let value = decode_component(raw_value);

        if key == PAGE_PARAM {
            page.get_or_insert(value);
        } else {
            params.insert(key, value);
        }
    }

    (page.unwrap_or_else(|| DEFAULT_PAGE.to_string()), params)
}

/// Form-urlencoded component: '+' is a space, invalid UTF-8 is replaced
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_query() {
        let params = NavParams::new().with("id", 3);
        assert_eq!(to_query("prescription-detail", &params), "?page=prescription-detail&id=3");
        assert_eq!(to_query("dashboard", &NavParams::new()), "?page=dashboard");
    }

    #[test]
    fn test_to_query_encodes() {
        let params = NavParams::new().with("q", "a b&c");
        assert_eq!(to_query("dashboard", &params), "?page=dashboard&q=a%20b%26c");
    }

    #[test]
    fn test_page_param_cannot_be_overridden() {
        let params = NavParams::new().with("page", "login");
        assert_eq!(to_query("dashboard", &params), "?page=dashboard");
    }

    #[test]
    fn test_parse_query() {
        let (page, params) = parse_query("?page=medication-history&id=2");
        assert_eq!(page, "medication-history");
        assert_eq!(params.id(), Some(2));

        let (page, params) = parse_query("");
        assert_eq!(page, "login");
        assert!(params.is_empty());

        let (page, params) = parse_query("id=7&page=prescription-detail&page=dashboard");
        assert_eq!(page, "prescription-detail");
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_parse_query_decodes() {
        let (_, params) = parse_query("?page=dashboard&q=a+b%26c&flag");
        assert_eq!(params.get("q"), Some("a b&c"));
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn test_query_round_trip() {
        let params = NavParams::new().with("id", 3).with("tab", "notas médicas");
        let url = to_query("prescription-detail", &params);
        let (page, parsed) = parse_query(&url);
        assert_eq!(page, "prescription-detail");
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_non_numeric_id() {
        let params = NavParams::new().with("id", "abc");
        assert_eq!(params.id(), None);
        assert_eq!(NavParams::new().id(), None);
    }

    #[test]
    fn test_history_entry_json() {
        let entry = HistoryEntry::new(Page::PrescriptionDetail, NavParams::new().with("id", 3));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"page":"prescription-detail","params":{"id":"3"}}"#);
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
