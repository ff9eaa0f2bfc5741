//! Medication History Page
//!
//! Current status, dose-change timeline, dose chart and the prescriptions
//! that include the medication.

use leptos::*;
use medfiles::view::{Listing, MedicationHistoryView, PageView, StatusBlock, TimelineEntry};

use crate::components::{BackButton, DoseChartCanvas, EmptyStateView, PrescriptionList};
use crate::state::use_global_state;

#[component]
pub fn MedicationHistory() -> impl IntoView {
    let state = use_global_state();

    let history = move || match state.view.get() {
        Some(PageView::MedicationHistory(history)) => history,
        _ => None,
    };

    view! {
        <BackButton />
        {move || history().map(|data| view! { <HistoryContent data=data /> })}
    }
}

#[component]
fn HistoryContent(data: MedicationHistoryView) -> impl IntoView {
    let MedicationHistoryView {
        status,
        timeline,
        chart,
        related_prescriptions,
        ..
    } = data;

    view! {
        <div class="space-y-6">
            <StatusCard status=status />

            <div class="grid md:grid-cols-2 gap-6">
                <section class="bg-white rounded-xl shadow p-6">
                    <h2 class="text-xl font-semibold mb-4">"Histórico de Alterações"</h2>
                    <div id="changeTimeline">
                        {match timeline {
                            Listing::Empty(empty) => view! { <EmptyStateView empty=empty /> }.into_view(),
                            Listing::Items(entries) => entries
                                .into_iter()
                                .map(|entry| view! { <TimelineRow entry=entry /> })
                                .collect_view(),
                        }}
                    </div>
                </section>

                <section class="bg-white rounded-xl shadow p-6">
                    <h2 class="text-xl font-semibold mb-4">"Evolução da Dose"</h2>
                    <DoseChartCanvas chart=chart />
                </section>
            </div>

            <section id="relatedPrescriptions" class="bg-white rounded-xl shadow p-6">
                <h2 class="text-xl font-semibold mb-4">"Prescrições Relacionadas"</h2>
                <PrescriptionList listing=related_prescriptions />
            </section>
        </div>
    }
}

#[component]
fn StatusCard(status: StatusBlock) -> impl IntoView {
    view! {
        <section id="currentStatus" class="bg-white rounded-xl shadow p-6">
            <div class="flex items-center justify-between">
                <h1 id="medicationName" class="text-2xl font-bold">{status.name}</h1>
                <span class="px-3 py-1 bg-green-100 text-green-700 rounded-full text-sm">{status.status}</span>
            </div>
            <div class="grid grid-cols-2 gap-4 mt-4 text-sm">
                <div>
                    <div class="text-gray-500">"Dose atual"</div>
                    <div class="text-xl font-semibold">{status.current_dose}</div>
                </div>
                <div>
                    <div class="text-gray-500">"Apresentação"</div>
                    <div class="text-xl font-semibold">{status.presentation}</div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn TimelineRow(entry: TimelineEntry) -> impl IntoView {
    view! {
        <div class="flex items-start space-x-3 py-3 border-b border-gray-100 last:border-0">
            <span class="text-lg text-blue-600">{entry.direction.arrow()}</span>
            <div class="flex-1">
                <div class="font-medium">{entry.description}</div>
                <div class="text-sm text-gray-500">{entry.reason}</div>
            </div>
            <span class="text-sm text-gray-400">{entry.date}</span>
        </div>
    }
}
