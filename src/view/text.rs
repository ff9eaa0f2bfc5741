//! Plain-text renderer for terminal output
//!
//! Each view model gets a [`fmt::Display`] impl through [`Plain`]; the
//! `render_*` functions are shorthands for `Plain(view).to_string()`.

use std::fmt::{self, Display, Write};

use super::models::{
    ConsolidatedView, DashboardView, DoseChart, EmptyState, Listing, MedicationHistoryView,
    Notice, NoticeKind, PrescriptionDetailView, PrescriptionSummary,
};
use super::PageView;

/// Width of the chart bar area in characters
const CHART_WIDTH: usize = 40;

/// Terminal rendering of a view model
pub struct Plain<'a, T: ?Sized>(pub &'a T);

/// Render a whole page
pub fn render_page(view: &PageView) -> String {
    Plain(view).to_string()
}

pub fn render_notice(notice: &Notice) -> String {
    Plain(notice).to_string()
}

pub fn render_dashboard(view: &DashboardView) -> String {
    Plain(view).to_string()
}

pub fn render_prescription(view: &PrescriptionDetailView) -> String {
    Plain(view).to_string()
}

pub fn render_history(view: &MedicationHistoryView) -> String {
    Plain(view).to_string()
}

/// Horizontal bar per point, oldest first, scaled to the largest dose
pub fn render_chart(chart: &DoseChart) -> String {
    Plain(chart).to_string()
}

pub fn render_consolidated(view: &ConsolidatedView) -> String {
    Plain(view).to_string()
}

impl fmt::Display for Plain<'_, PageView> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            PageView::Login => writeln!(
                f,
                "== MedFiles ==\nEntre com e-mail e senha: medfiles login --email <e-mail> --password <senha>"
            ),
            PageView::Dashboard(dashboard) => Plain(dashboard).fmt(f),
            PageView::PrescriptionDetail(Some(detail)) => Plain(detail).fmt(f),
            PageView::MedicationHistory(Some(history)) => Plain(history).fmt(f),
            // Nothing to show; the accompanying notice explains why
            PageView::PrescriptionDetail(None) | PageView::MedicationHistory(None) => Ok(()),
        }
    }
}

impl fmt::Display for Plain<'_, Notice> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.0.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✕",
        };
        write!(f, "{} {}", icon, self.0.text)
    }
}

impl fmt::Display for Plain<'_, DashboardView> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let stats = &view.stats;

        writeln!(f, "== Painel ==")?;
        writeln!(f, "Prescrições: {}", stats.total_prescriptions)?;
        writeln!(f, "Medicações ativas: {}", stats.active_medications)?;
        writeln!(f, "Profissionais: {}", stats.total_professionals)?;
        writeln!(f, "Medicamentos: {}", stats.total_medications)?;

        writeln!(f, "\n-- Medicações ativas --")?;
        match &view.medications {
            Listing::Items(cards) => {
                for card in cards {
                    writeln!(
                        f,
                        "[{}] {} {} (Apresentação: {})",
                        card.id, card.name, card.dose, card.presentation
                    )?;
                }
            }
            Listing::Empty(empty) => write_empty(f, empty)?,
        }

        writeln!(f, "\n-- Prescrições recentes --")?;
        write_prescriptions(f, &view.recent_prescriptions)
    }
}

impl fmt::Display for Plain<'_, PrescriptionDetailView> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "== Prescrição #{} ({}) ==", view.id, view.date)?;
        writeln!(f, "Profissional: {}", view.professional.name)?;
        writeln!(f, "\n-- Paciente --")?;
        writeln!(f, "Nome: {}", view.patient.name)?;
        writeln!(f, "Nascimento: {}", view.patient.birth_date)?;
        writeln!(f, "CPF: {}", view.patient.id_number)?;

        writeln!(f, "\n-- Medicações --")?;
        for item in &view.items {
            writeln!(f, "* {}", item.name)?;
            writeln!(f, "    Dose: {}", item.dose)?;
            writeln!(f, "    Quantidade: {}", item.quantity)?;
            writeln!(f, "    Posologia: {}", item.posology)?;
            writeln!(f, "    Apresentação: {}", item.presentation)?;
        }

        writeln!(f, "\n-- Profissional --")?;
        writeln!(f, "{} - {}", view.professional.name, view.professional.specialty)?;
        writeln!(f, "CRM: {}", view.professional.license)?;

        writeln!(f, "\n-- Observações --")?;
        writeln!(f, "{}", view.notes)?;
        writeln!(f, "\nGerado em {}", view.generated_on)
    }
}

impl fmt::Display for Plain<'_, MedicationHistoryView> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let status = &view.status;

        writeln!(f, "== Histórico: {} ==", status.name)?;
        writeln!(f, "Dose Atual: {}", status.current_dose)?;
        writeln!(f, "Apresentação: {}", status.presentation)?;
        writeln!(f, "Status: {}", status.status)?;

        writeln!(f, "\n-- Evolução da dose --")?;
        Plain(&view.chart).fmt(f)?;

        writeln!(f, "\n-- Mudanças --")?;
        match &view.timeline {
            Listing::Items(entries) => {
                for entry in entries {
                    writeln!(
                        f,
                        "{} {}  {}",
                        entry.direction.arrow(),
                        entry.date,
                        entry.description
                    )?;
                    writeln!(f, "    {}", entry.reason)?;
                }
            }
            Listing::Empty(empty) => write_empty(f, empty)?,
        }

        writeln!(f, "\n-- Prescrições relacionadas --")?;
        write_prescriptions(f, &view.related_prescriptions)
    }
}

impl fmt::Display for Plain<'_, DoseChart> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        if chart.points.is_empty() {
            return writeln!(f, "(sem dados)");
        }

        let max = chart.max_value().max(1) as f64;
        writeln!(f, "{}", chart.series_label)?;
        let mut previous: Option<i64> = None;
        for point in &chart.points {
            let width = ((point.value.max(0) as f64 / max) * CHART_WIDTH as f64).round() as usize;
            let marker = match previous {
                Some(prev) if point.value < prev => '▼',
                _ => '▲',
            };
            writeln!(
                f,
                "{} {} {:<width$} {}",
                point.label,
                marker,
                "█".repeat(width),
                point.value,
                width = CHART_WIDTH
            )?;
            previous = Some(point.value);
        }
        Ok(())
    }
}

impl fmt::Display for Plain<'_, ConsolidatedView> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "== {} ==", view.title)?;
        let groups = match &view.groups {
            Listing::Items(groups) => groups,
            Listing::Empty(empty) => return write_empty(f, empty),
        };

        writeln!(f, "{}", view.subtitle)?;
        writeln!(
            f,
            "Medicações Ativas: {}  |  Medicamentos Únicos: {}",
            view.active_count, view.unique_count
        )?;
        for group in groups {
            writeln!(
                f,
                "\n{} [{}] [{} prescrição(ões)]",
                group.name, group.status, group.prescription_count
            )?;
            writeln!(f, "    {} - {}", group.dose, group.posology)?;
            writeln!(f, "    Apresentação: {}", group.presentation)?;
        }
        Ok(())
    }
}

fn write_prescriptions(out: &mut impl Write, listing: &Listing<PrescriptionSummary>) -> fmt::Result {
    match listing {
        Listing::Items(rows) => {
            for row in rows {
                writeln!(
                    out,
                    "[{}] {}  {}  {}",
                    row.id,
                    row.date,
                    row.professional_name,
                    row.tags.join(" | ")
                )?;
            }
            Ok(())
        }
        Listing::Empty(empty) => write_empty(out, empty),
    }
}

fn write_empty(out: &mut impl Write, empty: &EmptyState) -> fmt::Result {
    writeln!(out, "{}", empty.title)?;
    writeln!(out, "{}", empty.hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Dataset, RecordStore};
    use crate::view::project;

    #[test]
    fn test_render_dashboard() {
        let text = render_dashboard(&project::dashboard(&RecordStore::builtin()));
        assert!(text.contains("Prescrições: 5"));
        assert!(text.contains("Medicações ativas: 5"));
        assert!(text.contains("[2] Metformina 500mg"));
        assert!(text.contains("01/09/2024  Dr. João Silva  Losartana Potássica 50mg"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let store = RecordStore::new(Dataset::default()).unwrap();
        let text = render_dashboard(&project::dashboard(&store));
        assert!(text.contains("Nenhuma prescrição encontrada"));
        assert!(text.contains("Nenhuma medicação ativa"));
    }

    #[test]
    fn test_render_chart_markers() {
        let view = project::medication_history(&RecordStore::builtin(), 2).unwrap();
        let chart = render_chart(&view.chart);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Dose (mg)");
        assert!(lines[1].starts_with("01/07/2024 ▲"));
        assert!(lines[2].starts_with("15/08/2024 ▼"));
        assert!(lines[1].trim_end().ends_with("850"));
    }

    #[test]
    fn test_render_login_and_consolidated() {
        assert!(render_page(&PageView::Login).contains("medfiles login --email"));

        let text = render_consolidated(&project::consolidated(&RecordStore::builtin()));
        assert!(text.contains("Medicações Ativas: 5  |  Medicamentos Únicos: 5"));
    }

    #[test]
    fn test_render_missing_page_is_blank() {
        assert!(render_page(&PageView::PrescriptionDetail(None)).is_empty());
    }

    #[test]
    fn test_render_notice() {
        assert_eq!(
            render_notice(&Notice::error("Prescrição não encontrada")),
            "✕ Prescrição não encontrada"
        );
    }
}
