//! Core record types for the MedFiles record store
//!
//! This module defines the entities held by the read-only store:
//! - `User`: an account that can sign in
//! - `Professional`: a prescriber
//! - `Medication`: a medication the patient currently knows about
//! - `Prescription` and `LineItem`: an issued prescription with snapshotted items
//! - `MedicationChange`: a recorded dose event for a medication

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier type shared by every collection
pub type RecordId = u32;

/// An account that can sign in. Identity key is the e-mail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub name: String,
    pub created_at: NaiveDate,
}

/// A prescribing professional
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Professional {
    pub id: RecordId,
    pub name: String,
    pub specialty: String,
    /// Council license number (CRM)
    pub license: String,
}

/// Whether a medication is currently in use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    Active,
    Inactive,
}

impl MedicationStatus {
    pub fn is_active(self) -> bool {
        matches!(self, MedicationStatus::Active)
    }
}

impl std::fmt::Display for MedicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedicationStatus::Active => write!(f, "active"),
            MedicationStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A medication with its current attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medication {
    pub id: RecordId,
    pub name: String,
    pub active_ingredient: String,
    /// Form and strength, e.g. "Comprimido 50mg"
    pub presentation: String,
    pub current_dose: String,
    pub status: MedicationStatus,
}

/// One medication entry inside a prescription.
///
/// Line items are copies taken when the prescription was issued. They keep
/// the medication id for lookups but never follow later changes to the
/// medication itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub medication_id: RecordId,
    pub name: String,
    pub dose: String,
    pub quantity: String,
    pub posology: String,
    pub presentation: String,
}

/// An issued prescription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prescription {
    pub id: RecordId,
    pub patient_name: String,
    pub patient_birth_date: NaiveDate,
    /// Patient identification number (CPF)
    pub patient_id_number: String,
    pub date: NaiveDate,
    pub professional_id: RecordId,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
}

impl Prescription {
    /// Check if any line item references the given medication
    pub fn references_medication(&self, medication_id: RecordId) -> bool {
        self.items.iter().any(|item| item.medication_id == medication_id)
    }
}

/// A prescription joined with its issuing professional
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedPrescription {
    #[serde(flatten)]
    pub prescription: Prescription,
    pub professional: Professional,
}

/// Kind of dose event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    New,
    Increase,
    Decrease,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::New => write!(f, "new"),
            ChangeKind::Increase => write!(f, "increase"),
            ChangeKind::Decrease => write!(f, "decrease"),
        }
    }
}

/// A recorded dose event for a medication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicationChange {
    pub id: RecordId,
    pub medication_id: RecordId,
    pub prescription_id: RecordId,
    /// Absent for the first recording of a medication
    #[serde(default)]
    pub old_dose: Option<String>,
    pub new_dose: String,
    pub kind: ChangeKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

/// Everything known about one medication's history
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MedicationHistory {
    pub medication: Medication,
    /// Ordered by date, most recent first
    pub changes: Vec<MedicationChange>,
    pub related_prescriptions: Vec<ResolvedPrescription>,
}

/// Collection counters shown on the dashboard
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub total_prescriptions: usize,
    pub active_medications: usize,
    pub total_professionals: usize,
    pub total_medications: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "prescriptions={}, active_medications={}, professionals={}, medications={}",
            self.total_prescriptions,
            self.active_medications,
            self.total_professionals,
            self.total_medications
        )
    }
}

/// The five collections backing the store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    pub users: Vec<User>,
    pub professionals: Vec<Professional>,
    pub medications: Vec<Medication>,
    pub prescriptions: Vec<Prescription>,
    pub changes: Vec<MedicationChange>,
}
