//! Navigation
//!
//! Page identifiers, the query-string codec, history backends and the
//! [`AppController`] that drives page transitions.

pub mod controller;
pub mod history;
pub mod location;
pub mod page;

pub use controller::{AppController, LoginOutcome, Transition};
pub use history::{HistoryBackend, MemoryHistory};
pub use location::{parse_query, to_query, HistoryEntry, NavParams, DEFAULT_PAGE, PAGE_PARAM};
pub use page::{Modal, Page};
