//! View Binder
//!
//! Turns store records into per-page view models. Projection lives in
//! [`project`]; [`text`] renders view models for a terminal, and the browser
//! frontend renders the same models with Leptos.

pub mod format;
pub mod models;
pub mod project;
pub mod strings;
pub mod text;

pub use format::{Clock, Direction, FixedClock, SystemClock};
pub use models::{
    ChartPoint, ConsolidatedGroup, ConsolidatedView, DashboardView, DoseChart, EmptyState,
    LineItemCard, Listing, MedicationCard, MedicationHistoryView, Notice, NoticeKind,
    PatientBlock, PrescriptionDetailView, PrescriptionSummary, ProfessionalBlock, StatusBlock,
    TimelineEntry,
};

use serde::Serialize;

/// Data bound to the visible page section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "kebab-case")]
pub enum PageView {
    Login,
    Dashboard(DashboardView),
    /// `None` when the requested prescription does not exist
    PrescriptionDetail(Option<PrescriptionDetailView>),
    /// `None` when the requested medication does not exist
    MedicationHistory(Option<MedicationHistoryView>),
}

impl PageView {
    /// Whether the page found the record it was asked for
    pub fn is_found(&self) -> bool {
        match self {
            PageView::PrescriptionDetail(view) => view.is_some(),
            PageView::MedicationHistory(view) => view.is_some(),
            PageView::Login | PageView::Dashboard(_) => true,
        }
    }
}
