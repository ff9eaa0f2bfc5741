//! Record Store
//!
//! A read-only, in-memory store over five collections (users, professionals,
//! medications, prescriptions, medication changes) with the derived queries
//! the pages need.
//!
//! # Example
//!
//! ```rust
//! use medfiles::store::RecordStore;
//!
//! let store = RecordStore::builtin();
//! let stats = store.stats();
//! assert_eq!(stats.total_prescriptions, 5);
//!
//! let history = store.medication_history(2).unwrap();
//! assert_eq!(history.changes.len(), 2);
//! ```

pub mod dataset;
pub mod error;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use types::{
    ChangeKind, Dataset, LineItem, Medication, MedicationChange, MedicationHistory,
    MedicationStatus, Prescription, Professional, RecordId, ResolvedPrescription, StoreStats, User,
};

use std::collections::HashSet;

/// Read-only record store
///
/// Every query is a pure function of the loaded dataset. Construction
/// validates that every reference resolves, so joins never come up empty.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data: Dataset,
}

impl RecordStore {
    /// Load a dataset after checking its integrity
    pub fn new(data: Dataset) -> StoreResult<Self> {
        validate(&data)?;
        tracing::debug!(
            users = data.users.len(),
            prescriptions = data.prescriptions.len(),
            medications = data.medications.len(),
            "Record store loaded"
        );
        Ok(Self { data })
    }

    /// Store backed by the built-in sample dataset
    pub fn builtin() -> Self {
        // Validated by the store tests
        Self {
            data: dataset::sample(),
        }
    }

    /// Access the raw collections
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Find a user by e-mail (exact match)
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.data.users.iter().find(|user| user.email == email)
    }

    /// Find a professional by id
    pub fn professional(&self, id: RecordId) -> Option<&Professional> {
        self.data.professionals.iter().find(|p| p.id == id)
    }

    /// Find a medication by id
    pub fn medication(&self, id: RecordId) -> Option<&Medication> {
        self.data.medications.iter().find(|m| m.id == id)
    }

    /// All prescriptions in store order, each joined with its professional
    pub fn list_prescriptions(&self) -> Vec<ResolvedPrescription> {
        self.data
            .prescriptions
            .iter()
            .filter_map(|p| self.resolve(p))
            .collect()
    }

    /// Medications whose status is active
    pub fn list_active_medications(&self) -> Vec<Medication> {
        self.data
            .medications
            .iter()
            .filter(|m| m.status.is_active())
            .cloned()
            .collect()
    }

    /// A medication with its dose changes (most recent first) and the
    /// prescriptions that contain it
    pub fn medication_history(&self, medication_id: RecordId) -> Option<MedicationHistory> {
        let medication = self.medication(medication_id)?.clone();

        let mut changes: Vec<MedicationChange> = self
            .data
            .changes
            .iter()
            .filter(|c| c.medication_id == medication_id)
            .cloned()
            .collect();
        // Stable sort keeps store order for events on the same day
        changes.sort_by(|a, b| b.date.cmp(&a.date));

        let related_prescriptions = self
            .data
            .prescriptions
            .iter()
            .filter(|p| p.references_medication(medication_id))
            .filter_map(|p| self.resolve(p))
            .collect();

        Some(MedicationHistory {
            medication,
            changes,
            related_prescriptions,
        })
    }

    /// One prescription joined with its professional
    pub fn prescription(&self, id: RecordId) -> Option<ResolvedPrescription> {
        self.data
            .prescriptions
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| self.resolve(p))
    }

    /// Collection counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_prescriptions: self.data.prescriptions.len(),
            active_medications: self
                .data
                .medications
                .iter()
                .filter(|m| m.status.is_active())
                .count(),
            total_professionals: self.data.professionals.len(),
            total_medications: self.data.medications.len(),
        }
    }

    fn resolve(&self, prescription: &Prescription) -> Option<ResolvedPrescription> {
        let professional = self.professional(prescription.professional_id)?;
        Some(ResolvedPrescription {
            prescription: prescription.clone(),
            professional: professional.clone(),
        })
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Check ids are unique and every reference resolves
fn validate(data: &Dataset) -> StoreResult<()> {
    unique_ids("users", data.users.iter().map(|u| u.id))?;
    unique_ids("professionals", data.professionals.iter().map(|p| p.id))?;
    unique_ids("medications", data.medications.iter().map(|m| m.id))?;
    unique_ids("prescriptions", data.prescriptions.iter().map(|p| p.id))?;
    unique_ids("medication changes", data.changes.iter().map(|c| c.id))?;

    let mut emails = HashSet::new();
    for user in &data.users {
        if !emails.insert(user.email.as_str()) {
            return Err(StoreError::DuplicateEmail(user.email.clone()));
        }
    }

    let professionals: HashSet<RecordId> = data.professionals.iter().map(|p| p.id).collect();
    for prescription in &data.prescriptions {
        if !professionals.contains(&prescription.professional_id) {
            return Err(StoreError::UnknownProfessional {
                prescription: prescription.id,
                professional: prescription.professional_id,
            });
        }
    }

    let medications: HashSet<RecordId> = data.medications.iter().map(|m| m.id).collect();
    for change in &data.changes {
        if !medications.contains(&change.medication_id) {
            return Err(StoreError::UnknownMedication {
                change: change.id,
                medication: change.medication_id,
            });
        }
    }

    Ok(())
}

fn unique_ids(
    collection: &'static str,
    ids: impl Iterator<Item = RecordId>,
) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::DuplicateId { collection, id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_dataset_is_valid() {
        assert!(RecordStore::new(dataset::sample()).is_ok());
    }

    #[test]
    fn test_find_user_by_email() {
        let store = RecordStore::builtin();
        let user = store.find_user_by_email("teste@medfiles.com").unwrap();
        assert_eq!(user.name, "Usuário Teste");
        assert!(store.find_user_by_email("TESTE@medfiles.com").is_none());
        assert!(store.find_user_by_email("").is_none());
    }

    #[test]
    fn test_stats_match_collections() {
        let store = RecordStore::builtin();
        let stats = store.stats();
        assert_eq!(stats.total_prescriptions, store.dataset().prescriptions.len());
        assert_eq!(stats.total_prescriptions, 5);
        assert_eq!(stats.active_medications, 5);
        assert_eq!(stats.total_professionals, 5);
        assert_eq!(stats.total_medications, 5);
    }

    #[test]
    fn test_stats_count_only_active() {
        let mut data = dataset::sample();
        data.medications[0].status = MedicationStatus::Inactive;
        let store = RecordStore::new(data).unwrap();

        assert_eq!(store.stats().active_medications, 4);
        assert_eq!(store.stats().total_medications, 5);
        assert_eq!(store.list_active_medications().len(), 4);
        assert!(store.list_active_medications().iter().all(|m| m.id != 1));
    }

    #[test]
    fn test_list_prescriptions_resolves_professional() {
        let store = RecordStore::builtin();
        let prescriptions = store.list_prescriptions();
        assert_eq!(prescriptions.len(), 5);
        for resolved in &prescriptions {
            assert_eq!(resolved.professional.id, resolved.prescription.professional_id);
        }
        assert_eq!(prescriptions[4].professional.name, "Dr. João Silva");
    }

    #[test]
    fn test_medication_history_for_metformin() {
        let store = RecordStore::builtin();
        let history = store.medication_history(2).unwrap();

        assert_eq!(history.medication.name, "Metformina");
        assert_eq!(history.changes.len(), 2);

        let first = &history.changes[0];
        assert_eq!(first.date, date(2024, 8, 15));
        assert_eq!(first.kind, ChangeKind::Decrease);
        assert_eq!(first.old_dose.as_deref(), Some("850mg"));
        assert_eq!(first.new_dose, "500mg");

        let second = &history.changes[1];
        assert_eq!(second.date, date(2024, 7, 1));
        assert_eq!(second.kind, ChangeKind::New);
        assert_eq!(second.old_dose, None);
        assert_eq!(second.new_dose, "850mg");

        assert_eq!(history.related_prescriptions.len(), 1);
        assert_eq!(history.related_prescriptions[0].prescription.id, 2);
        assert_eq!(history.related_prescriptions[0].professional.name, "Dra. Maria Santos");
    }

    #[test]
    fn test_history_changes_sorted_descending() {
        let store = RecordStore::builtin();
        for med in &store.dataset().medications {
            let history = store.medication_history(med.id).unwrap();
            assert!(history.changes.windows(2).all(|w| w[0].date >= w[1].date));

            let mut ascending = history.changes.clone();
            ascending.reverse();
            assert!(ascending.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }

    #[test]
    fn test_history_without_changes() {
        let store = RecordStore::builtin();
        let history = store.medication_history(3).unwrap();
        assert!(history.changes.is_empty());
        assert_eq!(history.related_prescriptions.len(), 1);
    }

    #[test]
    fn test_unknown_ids_are_absent() {
        let store = RecordStore::builtin();
        assert!(store.prescription(999).is_none());
        assert!(store.medication_history(999).is_none());
        assert!(store.medication(0).is_none());
    }

    #[test]
    fn test_prescription_by_id() {
        let store = RecordStore::builtin();
        let resolved = store.prescription(3).unwrap();
        assert_eq!(resolved.prescription.notes.as_deref(), Some("Tratamento para depressão"));
        assert_eq!(resolved.professional.specialty, "Psiquiatria");
    }

    #[test]
    fn test_rejects_dangling_professional() {
        let mut data = dataset::sample();
        data.prescriptions[0].professional_id = 42;
        let err = RecordStore::new(data).unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownProfessional {
                prescription: 1,
                professional: 42
            }
        );
    }

    #[test]
    fn test_rejects_dangling_medication() {
        let mut data = dataset::sample();
        data.changes[2].medication_id = 77;
        let err = RecordStore::new(data).unwrap_err();
        assert!(matches!(err, StoreError::UnknownMedication { change: 3, medication: 77 }));
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut data = dataset::sample();
        let copy = data.medications[0].clone();
        data.medications.push(copy);
        assert!(matches!(
            RecordStore::new(data).unwrap_err(),
            StoreError::DuplicateId { collection: "medications", id: 1 }
        ));

        let mut data = dataset::sample();
        let mut twin = data.users[0].clone();
        twin.id = 2;
        data.users.push(twin);
        assert!(matches!(
            RecordStore::new(data).unwrap_err(),
            StoreError::DuplicateEmail(_)
        ));
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::new(Dataset::default()).unwrap();
        assert_eq!(store.stats(), StoreStats::default());
        assert!(store.list_prescriptions().is_empty());
    }
}
