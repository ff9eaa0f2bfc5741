//! Built-in sample dataset
//!
//! Fictional records used in place of a real backend. The records are
//! loaded once into a [`RecordStore`](super::RecordStore) and never change.
//!
//! Note: medication 2 has a "new" event (2024-07-01, 850mg) followed by a
//! "decrease" to 500mg. Both point at prescription 2, which was issued on the
//! decrease date. This is sample noise and no business rule depends on it.

use chrono::NaiveDate;

use super::types::{
    ChangeKind, Dataset, LineItem, Medication, MedicationChange, MedicationStatus, Prescription,
    Professional, User,
};

/// Patient shared by every sample prescription
const PATIENT_NAME: &str = "João Silva";
const PATIENT_ID_NUMBER: &str = "123.456.789-00";

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn professional(id: u32, name: &str, specialty: &str, license: &str) -> Professional {
    Professional {
        id,
        name: name.to_string(),
        specialty: specialty.to_string(),
        license: license.to_string(),
    }
}

fn medication(id: u32, name: &str, ingredient: &str, presentation: &str, dose: &str) -> Medication {
    Medication {
        id,
        name: name.to_string(),
        active_ingredient: ingredient.to_string(),
        presentation: presentation.to_string(),
        current_dose: dose.to_string(),
        status: MedicationStatus::Active,
    }
}

/// Snapshot a medication into a line item
fn item(med: &Medication, quantity: &str, posology: &str) -> LineItem {
    LineItem {
        medication_id: med.id,
        name: med.name.clone(),
        dose: med.current_dose.clone(),
        quantity: quantity.to_string(),
        posology: posology.to_string(),
        presentation: med.presentation.clone(),
    }
}

fn prescription(
    id: u32,
    date: NaiveDate,
    professional_id: u32,
    notes: &str,
    items: Vec<LineItem>,
) -> Prescription {
    Prescription {
        id,
        patient_name: PATIENT_NAME.to_string(),
        patient_birth_date: day(1985, 3, 15),
        patient_id_number: PATIENT_ID_NUMBER.to_string(),
        date,
        professional_id,
        notes: Some(notes.to_string()),
        items,
    }
}

/// Build the sample dataset
pub fn sample() -> Dataset {
    let users = vec![User {
        id: 1,
        email: "teste@medfiles.com".to_string(),
        name: "Usuário Teste".to_string(),
        created_at: day(2024, 1, 1),
    }];

    let professionals = vec![
        professional(1, "Dr. João Silva", "Cardiologia", "12345-SP"),
        professional(2, "Dra. Maria Santos", "Endocrinologia", "23456-SP"),
        professional(3, "Dr. Pedro Oliveira", "Psiquiatria", "34567-SP"),
        professional(4, "Dra. Ana Costa", "Ginecologia", "45678-SP"),
        professional(5, "Dr. Carlos Ferreira", "Neurologia", "56789-SP"),
    ];

    let losartan = medication(1, "Losartana Potássica", "Losartana", "Comprimido 50mg", "50mg");
    let metformin = medication(2, "Metformina", "Metformina", "Comprimido 500mg", "500mg");
    let sertraline = medication(3, "Sertralina", "Sertralina", "Comprimido 50mg", "50mg");
    let omeprazole = medication(4, "Omeprazol", "Omeprazol", "Cápsula 20mg", "20mg");
    let aspirin = medication(
        5,
        "Aspirina",
        "Ácido Acetilsalicílico",
        "Comprimido 100mg",
        "100mg",
    );

    let prescriptions = vec![
        prescription(
            1,
            day(2024, 9, 1),
            1,
            "Paciente com hipertensão controlada",
            vec![item(&losartan, "30 comprimidos", "1 comprimido ao dia")],
        ),
        prescription(
            2,
            day(2024, 8, 15),
            2,
            "Ajuste na dose de metformina",
            vec![item(&metformin, "60 comprimidos", "1 comprimido 2x ao dia")],
        ),
        prescription(
            3,
            day(2024, 7, 20),
            3,
            "Tratamento para depressão",
            vec![item(&sertraline, "30 comprimidos", "1 comprimido ao dia")],
        ),
        prescription(
            4,
            day(2024, 6, 10),
            4,
            "Controle de refluxo",
            vec![item(&omeprazole, "30 cápsulas", "1 cápsula ao dia")],
        ),
        prescription(
            5,
            day(2024, 5, 5),
            1,
            "Profilaxia cardiovascular",
            vec![item(&aspirin, "30 comprimidos", "1 comprimido ao dia")],
        ),
    ];

    let changes = vec![
        MedicationChange {
            id: 1,
            medication_id: 1,
            prescription_id: 1,
            old_dose: None,
            new_dose: "50mg".to_string(),
            kind: ChangeKind::New,
            date: day(2024, 9, 1),
            reason: "Nova prescrição".to_string(),
        },
        MedicationChange {
            id: 2,
            medication_id: 2,
            prescription_id: 2,
            old_dose: Some("850mg".to_string()),
            new_dose: "500mg".to_string(),
            kind: ChangeKind::Decrease,
            date: day(2024, 8, 15),
            reason: "Ajuste por efeitos colaterais".to_string(),
        },
        MedicationChange {
            id: 3,
            medication_id: 2,
            prescription_id: 2,
            old_dose: None,
            new_dose: "850mg".to_string(),
            kind: ChangeKind::New,
            date: day(2024, 7, 1),
            reason: "Inicio do tratamento".to_string(),
        },
    ];

    Dataset {
        users,
        professionals,
        medications: vec![losartan, metformin, sertraline, omeprazole, aspirin],
        prescriptions,
        changes,
    }
}
