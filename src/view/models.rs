//! View models
//!
//! Plain, serializable structures holding exactly what each page shows.
//! All text is already localized and formatted.

use std::time::Duration;

use serde::Serialize;

use super::format::Direction;
use super::strings;
use crate::store::{RecordId, StoreStats};

/// Placeholder shown when a list has nothing to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub icon: &'static str,
    pub title: &'static str,
    pub hint: &'static str,
}

impl EmptyState {
    pub const ACTIVE_MEDICATIONS: EmptyState = EmptyState {
        icon: "pills",
        title: strings::EMPTY_ACTIVE_TITLE,
        hint: strings::EMPTY_ACTIVE_HINT,
    };
    pub const RECENT_PRESCRIPTIONS: EmptyState = EmptyState {
        icon: "file-prescription",
        title: strings::EMPTY_RECENT_TITLE,
        hint: strings::EMPTY_RECENT_HINT,
    };
    pub const TIMELINE: EmptyState = EmptyState {
        icon: "history",
        title: strings::EMPTY_TIMELINE_TITLE,
        hint: strings::EMPTY_TIMELINE_HINT,
    };
    pub const RELATED_PRESCRIPTIONS: EmptyState = EmptyState {
        icon: "file-prescription",
        title: strings::EMPTY_RELATED_TITLE,
        hint: strings::EMPTY_RELATED_HINT,
    };
    pub const CONSOLIDATED: EmptyState = EmptyState {
        icon: "pills",
        title: strings::EMPTY_CONSOLIDATED_TITLE,
        hint: strings::EMPTY_CONSOLIDATED_HINT,
    };
}

/// A list region: either rows or its empty state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing<T> {
    Items(Vec<T>),
    Empty(EmptyState),
}

impl<T> Listing<T> {
    /// Wrap rows, falling back to `empty` when there are none
    pub fn from_items(items: Vec<T>, empty: EmptyState) -> Self {
        if items.is_empty() {
            Listing::Empty(empty)
        } else {
            Listing::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Items(items) => items,
            Listing::Empty(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty(_))
    }
}

/// Active medication card on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationCard {
    pub id: RecordId,
    pub name: String,
    pub dose: String,
    pub presentation: String,
}

/// One row of a prescription list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrescriptionSummary {
    pub id: RecordId,
    pub date: String,
    pub professional_name: String,
    /// "name dose" per line item
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub stats: StoreStats,
    pub medications: Listing<MedicationCard>,
    pub recent_prescriptions: Listing<PrescriptionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientBlock {
    pub name: String,
    pub birth_date: String,
    pub id_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemCard {
    pub name: String,
    pub dose: String,
    pub quantity: String,
    pub posology: String,
    pub presentation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionalBlock {
    pub name: String,
    pub specialty: String,
    pub license: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrescriptionDetailView {
    pub id: RecordId,
    pub date: String,
    pub patient: PatientBlock,
    pub items: Vec<LineItemCard>,
    pub professional: ProfessionalBlock,
    pub notes: String,
    pub generated_on: String,
}

/// Current attributes of a medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBlock {
    pub name: String,
    pub current_dose: String,
    pub presentation: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub direction: Direction,
    pub description: String,
    pub reason: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

/// Line chart input, oldest point first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoseChart {
    pub series_label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl DoseChart {
    pub fn max_value(&self) -> i64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationHistoryView {
    pub id: RecordId,
    pub status: StatusBlock,
    /// Most recent first
    pub timeline: Listing<TimelineEntry>,
    pub chart: DoseChart,
    pub related_prescriptions: Listing<PrescriptionSummary>,
}

/// Active medications sharing a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedGroup {
    pub name: String,
    pub status: &'static str,
    pub prescription_count: usize,
    pub dose: String,
    pub posology: &'static str,
    pub presentation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub active_count: usize,
    pub unique_count: usize,
    pub groups: Listing<ConsolidatedGroup>,
}

/// Severity of an inline notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Inline message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    /// How long a success notice stays up unless configured otherwise
    pub const DEFAULT_SUCCESS_TIMEOUT: Duration = Duration::from_millis(3000);

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// Success notices clear themselves; errors stay until replaced
    pub fn auto_clears(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}
