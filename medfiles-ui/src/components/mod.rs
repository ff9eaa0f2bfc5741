//! UI Components
//!
//! Reusable Leptos components for the pages.

pub mod chart;
pub mod empty_state;
pub mod medication_card;
pub mod modal;
pub mod nav;
pub mod prescription_list;
pub mod toast;

pub use chart::DoseChartCanvas;
pub use empty_state::EmptyStateView;
pub use medication_card::MedicationCardView;
pub use modal::Modals;
pub use nav::{BackButton, Nav};
pub use prescription_list::PrescriptionList;
pub use toast::{NoticeBanner, Toast};
