//! Projections from store records to view models
//!
//! Every function here is pure: same store and inputs, same output.

use chrono::NaiveDate;

use super::format::{
    describe_change, format_date, parse_dose, reason_or_placeholder, status_label, Direction,
};
use super::models::{
    ChartPoint, ConsolidatedGroup, ConsolidatedView, DashboardView, DoseChart, EmptyState,
    LineItemCard, Listing, MedicationCard, MedicationHistoryView, PatientBlock,
    PrescriptionDetailView, PrescriptionSummary, ProfessionalBlock, StatusBlock, TimelineEntry,
};
use super::strings;
use crate::store::{Medication, MedicationChange, RecordId, RecordStore, ResolvedPrescription};

/// Number of prescriptions listed on the dashboard
pub const RECENT_LIMIT: usize = 5;

/// Dashboard: counters, active medications, most recent prescriptions
pub fn dashboard(store: &RecordStore) -> DashboardView {
    let medications = store
        .list_active_medications()
        .iter()
        .map(medication_card)
        .collect();

    DashboardView {
        stats: store.stats(),
        medications: Listing::from_items(medications, EmptyState::ACTIVE_MEDICATIONS),
        recent_prescriptions: Listing::from_items(
            recent_prescriptions(store.list_prescriptions(), RECENT_LIMIT),
            EmptyState::RECENT_PRESCRIPTIONS,
        ),
    }
}

/// The `limit` most recently dated prescriptions, newest first
pub fn recent_prescriptions(
    mut prescriptions: Vec<ResolvedPrescription>,
    limit: usize,
) -> Vec<PrescriptionSummary> {
    prescriptions.sort_by(|a, b| b.prescription.date.cmp(&a.prescription.date));
    prescriptions
        .iter()
        .take(limit)
        .map(prescription_summary)
        .collect()
}

pub fn medication_card(medication: &Medication) -> MedicationCard {
    MedicationCard {
        id: medication.id,
        name: medication.name.clone(),
        dose: medication.current_dose.clone(),
        presentation: medication.presentation.clone(),
    }
}

pub fn prescription_summary(resolved: &ResolvedPrescription) -> PrescriptionSummary {
    let p = &resolved.prescription;
    PrescriptionSummary {
        id: p.id,
        date: format_date(p.date),
        professional_name: resolved.professional.name.clone(),
        tags: p
            .items
            .iter()
            .map(|item| format!("{} {}", item.name, item.dose))
            .collect(),
    }
}

/// Full prescription page. `today` stamps the generation date.
pub fn prescription_detail(
    store: &RecordStore,
    id: RecordId,
    today: NaiveDate,
) -> Option<PrescriptionDetailView> {
    let resolved = store.prescription(id)?;
    let p = &resolved.prescription;
    let professional = &resolved.professional;

    let notes = p
        .notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(strings::NO_NOTES)
        .to_string();

    Some(PrescriptionDetailView {
        id: p.id,
        date: format_date(p.date),
        patient: PatientBlock {
            name: p.patient_name.clone(),
            birth_date: format_date(p.patient_birth_date),
            id_number: p.patient_id_number.clone(),
        },
        items: p
            .items
            .iter()
            .map(|item| LineItemCard {
                name: item.name.clone(),
                dose: item.dose.clone(),
                quantity: item.quantity.clone(),
                posology: item.posology.clone(),
                presentation: item.presentation.clone(),
            })
            .collect(),
        professional: ProfessionalBlock {
            name: professional.name.clone(),
            specialty: professional.specialty.clone(),
            license: professional.license.clone(),
        },
        notes,
        generated_on: format_date(today),
    })
}

/// Medication history page
pub fn medication_history(store: &RecordStore, id: RecordId) -> Option<MedicationHistoryView> {
    let history = store.medication_history(id)?;
    let medication = &history.medication;

    let timeline = history
        .changes
        .iter()
        .map(|change| TimelineEntry {
            direction: Direction::of(change.kind),
            description: describe_change(change),
            reason: reason_or_placeholder(&change.reason),
            date: format_date(change.date),
        })
        .collect();

    let related = history
        .related_prescriptions
        .iter()
        .map(prescription_summary)
        .collect();

    Some(MedicationHistoryView {
        id: medication.id,
        status: StatusBlock {
            name: medication.name.clone(),
            current_dose: medication.current_dose.clone(),
            presentation: medication.presentation.clone(),
            status: status_label(medication.status),
        },
        timeline: Listing::from_items(timeline, EmptyState::TIMELINE),
        chart: dose_chart(&history.changes),
        related_prescriptions: Listing::from_items(related, EmptyState::RELATED_PRESCRIPTIONS),
    })
}

/// Chart points in chronological order from changes sorted newest first
pub fn dose_chart(changes_newest_first: &[MedicationChange]) -> DoseChart {
    DoseChart {
        series_label: strings::DOSE_SERIES_LABEL,
        points: changes_newest_first
            .iter()
            .rev()
            .map(|change| ChartPoint {
                label: format_date(change.date),
                value: parse_dose(&change.new_dose),
            })
            .collect(),
    }
}

/// Active medications grouped by display name, first-seen order
pub fn consolidated(store: &RecordStore) -> ConsolidatedView {
    let medications = store.list_active_medications();

    let mut groups: Vec<(String, Vec<&Medication>)> = Vec::new();
    for med in &medications {
        match groups.iter_mut().find(|(name, _)| *name == med.name) {
            Some((_, members)) => members.push(med),
            None => groups.push((med.name.clone(), vec![med])),
        }
    }

    let unique_count = groups.len();
    let groups = groups
        .into_iter()
        .filter_map(|(name, members)| {
            let first = members.first()?;
            Some(ConsolidatedGroup {
                name,
                status: strings::STATUS_ACTIVE,
                prescription_count: members.len(),
                dose: first.current_dose.clone(),
                posology: strings::AS_PRESCRIBED,
                presentation: first.presentation.clone(),
            })
        })
        .collect();

    ConsolidatedView {
        title: strings::CONSOLIDATED_TITLE,
        subtitle: strings::CONSOLIDATED_SUBTITLE,
        active_count: medications.len(),
        unique_count,
        groups: Listing::from_items(groups, EmptyState::CONSOLIDATED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{dataset, Dataset, MedicationStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_dashboard_builtin() {
        let view = dashboard(&RecordStore::builtin());
        assert_eq!(view.stats.total_prescriptions, 5);
        assert_eq!(view.medications.items().len(), 5);

        let recent = view.recent_prescriptions.items();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].date, "01/09/2024");
        assert_eq!(recent[0].professional_name, "Dr. João Silva");
        assert_eq!(recent[0].tags, vec!["Losartana Potássica 50mg".to_string()]);
        assert_eq!(recent[4].date, "05/05/2024");
    }

    #[test]
    fn test_dashboard_empty_states() {
        let store = RecordStore::new(Dataset::default()).unwrap();
        let view = dashboard(&store);
        assert_eq!(
            view.recent_prescriptions,
            Listing::Empty(EmptyState::RECENT_PRESCRIPTIONS)
        );
        assert_eq!(view.medications, Listing::Empty(EmptyState::ACTIVE_MEDICATIONS));
    }

    #[test]
    fn test_recent_limits_and_sorts() {
        let mut data = dataset::sample();
        let mut extra = data.prescriptions[4].clone();
        extra.id = 6;
        extra.date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        data.prescriptions.push(extra);
        let store = RecordStore::new(data).unwrap();

        let recent = recent_prescriptions(store.list_prescriptions(), RECENT_LIMIT);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, 6);
        assert!(recent.iter().all(|p| p.id != 5));
    }

    #[test]
    fn test_prescription_detail() {
        let view = prescription_detail(&RecordStore::builtin(), 3, today()).unwrap();
        assert_eq!(view.date, "20/07/2024");
        assert_eq!(view.patient.name, "João Silva");
        assert_eq!(view.patient.birth_date, "15/03/1985");
        assert_eq!(view.patient.id_number, "123.456.789-00");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].posology, "1 comprimido ao dia");
        assert_eq!(view.professional.license, "34567-SP");
        assert_eq!(view.notes, "Tratamento para depressão");
        assert_eq!(view.generated_on, "16/10/2026");
    }

    #[test]
    fn test_prescription_detail_notes_placeholder() {
        let mut data = dataset::sample();
        data.prescriptions[0].notes = None;
        let store = RecordStore::new(data).unwrap();
        let view = prescription_detail(&store, 1, today()).unwrap();
        assert_eq!(view.notes, "Nenhuma observação adicional.");
    }

    #[test]
    fn test_prescription_detail_missing() {
        assert!(prescription_detail(&RecordStore::builtin(), 999, today()).is_none());
    }

    #[test]
    fn test_medication_history_view() {
        let view = medication_history(&RecordStore::builtin(), 2).unwrap();
        assert_eq!(view.status.name, "Metformina");
        assert_eq!(view.status.status, "Ativo");

        let timeline = view.timeline.items();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].description, "Dose reduzida: 850mg → 500mg");
        assert_eq!(timeline[0].direction, Direction::Down);
        assert_eq!(timeline[0].date, "15/08/2024");
        assert_eq!(timeline[1].description, "Nova prescrição: 850mg");
        assert_eq!(timeline[1].direction, Direction::Up);

        // Chart runs oldest to newest
        let values: Vec<i64> = view.chart.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![850, 500]);
        assert_eq!(view.chart.points[0].label, "01/07/2024");
        assert_eq!(view.chart.series_label, "Dose (mg)");

        assert_eq!(view.related_prescriptions.items().len(), 1);
        assert_eq!(view.related_prescriptions.items()[0].id, 2);
    }

    #[test]
    fn test_medication_history_empty_timeline() {
        let view = medication_history(&RecordStore::builtin(), 4).unwrap();
        assert_eq!(view.timeline, Listing::Empty(EmptyState::TIMELINE));
        assert!(view.chart.points.is_empty());
        assert_eq!(view.chart.max_value(), 0);
    }

    #[test]
    fn test_consolidated_groups_by_name() {
        let mut data = dataset::sample();
        let mut twin = data.medications[1].clone();
        twin.id = 6;
        twin.current_dose = "850mg".to_string();
        data.medications.push(twin);
        let mut inactive = data.medications[0].clone();
        inactive.id = 7;
        inactive.status = MedicationStatus::Inactive;
        data.medications.push(inactive);
        let store = RecordStore::new(data).unwrap();

        let view = consolidated(&store);
        assert_eq!(view.active_count, 6);
        assert_eq!(view.unique_count, 5);

        let groups = view.groups.items();
        assert_eq!(groups[1].name, "Metformina");
        assert_eq!(groups[1].prescription_count, 2);
        // First grouped medication is the representative
        assert_eq!(groups[1].dose, "500mg");
        assert_eq!(groups[0].prescription_count, 1);
    }

    #[test]
    fn test_consolidated_empty() {
        let store = RecordStore::new(Dataset::default()).unwrap();
        let view = consolidated(&store);
        assert_eq!(view.groups, Listing::Empty(EmptyState::CONSOLIDATED));
        assert_eq!(view.active_count, 0);
    }

    #[test]
    fn test_projections_are_idempotent() {
        let store = RecordStore::builtin();
        assert_eq!(dashboard(&store), dashboard(&store));
        assert_eq!(
            prescription_detail(&store, 2, today()),
            prescription_detail(&store, 2, today())
        );
        assert_eq!(medication_history(&store, 2), medication_history(&store, 2));
    }
}
