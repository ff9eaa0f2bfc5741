//! Display formatting shared by every renderer

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::strings;
use crate::store::{ChangeKind, MedicationChange, MedicationStatus};

/// Source of the current date for generation stamps
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a calendar date as dd/mm/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Leading integer of a dose string ("850mg" -> 850).
///
/// Surrounding whitespace and an optional sign are accepted; anything that
/// does not start with digits yields 0.
pub fn parse_dose(dose: &str) -> i64 {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_INT
        .get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("dose pattern is valid"));

    re.captures(dose)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Arrow shown beside a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn of(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Decrease => Direction::Down,
            ChangeKind::New | ChangeKind::Increase => Direction::Up,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }
}

/// Human-readable summary of a dose change
pub fn describe_change(change: &MedicationChange) -> String {
    match (change.kind, change.old_dose.as_deref()) {
        (ChangeKind::New, _) => format!("{}: {}", strings::CHANGE_NEW, change.new_dose),
        (ChangeKind::Decrease, Some(old)) => {
            format!("{}: {} → {}", strings::CHANGE_DECREASE, old, change.new_dose)
        }
        (ChangeKind::Increase, Some(old)) => {
            format!("{}: {} → {}", strings::CHANGE_INCREASE, old, change.new_dose)
        }
        _ => strings::CHANGE_GENERIC.to_string(),
    }
}

/// Reason text, or the placeholder when empty
pub fn reason_or_placeholder(reason: &str) -> String {
    if reason.trim().is_empty() {
        strings::NO_REASON.to_string()
    } else {
        reason.to_string()
    }
}

pub fn status_label(status: MedicationStatus) -> &'static str {
    match status {
        MedicationStatus::Active => strings::STATUS_ACTIVE,
        MedicationStatus::Inactive => strings::STATUS_INACTIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(kind: ChangeKind, old: Option<&str>, new: &str) -> MedicationChange {
        MedicationChange {
            id: 1,
            medication_id: 1,
            prescription_id: 1,
            old_dose: old.map(str::to_string),
            new_dose: new.to_string(),
            kind,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            reason: String::new(),
        }
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(format_date(date), "01/09/2024");
    }

    #[test]
    fn test_parse_dose() {
        assert_eq!(parse_dose("850mg"), 850);
        assert_eq!(parse_dose("  20 mg"), 20);
        assert_eq!(parse_dose("1.5mg"), 1);
        assert_eq!(parse_dose("-5mg"), -5);
        assert_eq!(parse_dose("mg"), 0);
        assert_eq!(parse_dose(""), 0);
        assert_eq!(parse_dose("dose 50mg"), 0);
    }

    #[test]
    fn test_describe_change() {
        assert_eq!(
            describe_change(&change(ChangeKind::New, None, "850mg")),
            "Nova prescrição: 850mg"
        );
        assert_eq!(
            describe_change(&change(ChangeKind::Decrease, Some("850mg"), "500mg")),
            "Dose reduzida: 850mg → 500mg"
        );
        assert_eq!(
            describe_change(&change(ChangeKind::Increase, Some("50mg"), "100mg")),
            "Dose aumentada: 50mg → 100mg"
        );
        assert_eq!(
            describe_change(&change(ChangeKind::Increase, None, "100mg")),
            "Mudança registrada"
        );
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::of(ChangeKind::New), Direction::Up);
        assert_eq!(Direction::of(ChangeKind::Increase), Direction::Up);
        assert_eq!(Direction::of(ChangeKind::Decrease), Direction::Down);
    }

    #[test]
    fn test_reason_placeholder() {
        assert_eq!(reason_or_placeholder(""), "Motivo não informado");
        assert_eq!(reason_or_placeholder("Ajuste"), "Ajuste");
    }
}
