//! State Management
//!
//! Global application state and the browser storage/history backends.

pub mod browser;
pub mod global;

pub use global::{provide_global_state, use_global_state, GlobalState};
