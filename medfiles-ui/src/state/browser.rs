//! Browser backends
//!
//! `localStorage` for the session entry and `window.history` for page
//! history. Back navigation is reported asynchronously through `popstate`,
//! which the app root listens for.

use medfiles::navigation::{parse_query, HistoryBackend, HistoryEntry, Page};
use medfiles::session::{KeyValueStore, SessionError, SessionResult};
use wasm_bindgen::JsValue;

fn js_error(context: &str, err: JsValue) -> SessionError {
    SessionError::Unavailable(format!("{}: {:?}", context, err))
}

/// Key-value store over `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> SessionResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| js_error("localStorage", e))?
            .ok_or_else(|| SessionError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| js_error("getItem", e))
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| js_error("setItem", e))
    }

    fn remove(&mut self, key: &str) -> SessionResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| js_error("removeItem", e))
    }
}

/// History backend over `window.history`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl HistoryBackend for BrowserHistory {
    fn push(&mut self, entry: &HistoryEntry, url: &str) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let state = match serde_json::to_string(entry) {
            Ok(json) => JsValue::from_str(&json),
            Err(_) => JsValue::NULL,
        };
        if let Err(e) = history.push_state_with_url(&state, "", Some(url)) {
            web_sys::console::error_1(&format!("pushState failed: {:?}", e).into());
        }
    }

    fn back(&mut self) -> Option<HistoryEntry> {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
        // The entry arrives with the popstate event
        None
    }
}

/// Current address bar query string
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Entry to replay for a popstate event.
///
/// Uses the state pushed with the entry, falling back to the address bar
/// for entries the app did not push itself.
pub fn entry_from_popstate(state: &JsValue) -> Option<HistoryEntry> {
    if let Some(entry) = state
        .as_string()
        .and_then(|json| serde_json::from_str(&json).ok())
    {
        return Some(entry);
    }
    let (page_id, params) = parse_query(&current_query());
    Page::from_id(&page_id).map(|page| HistoryEntry::new(page, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medfiles::navigation::NavParams;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let mut storage = LocalStorage;
        storage.set("medfiles_test", "{}").unwrap();
        assert_eq!(storage.get("medfiles_test").unwrap().as_deref(), Some("{}"));
        storage.remove("medfiles_test").unwrap();
        assert_eq!(storage.get("medfiles_test").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_entry_from_pushed_state() {
        let state = JsValue::from_str(r#"{"page":"prescription-detail","params":{"id":"3"}}"#);
        let entry = entry_from_popstate(&state).unwrap();
        assert_eq!(entry.page, Page::PrescriptionDetail);
        assert_eq!(entry.params, NavParams::new().with("id", 3));
    }
}
