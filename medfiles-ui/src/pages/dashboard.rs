//! Dashboard Page
//!
//! Summary counters, active medications, recent prescriptions and the
//! quick actions that open the modal dialogs.

use leptos::*;
use medfiles::navigation::Modal;
use medfiles::store::StoreStats;
use medfiles::view::{DashboardView, Listing, PageView};

use crate::components::{EmptyStateView, MedicationCardView, PrescriptionList};
use crate::state::use_global_state;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();

    let dashboard = move || match state.view.get() {
        Some(PageView::Dashboard(data)) => Some(data),
        _ => None,
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Painel"</h1>
                <p class="text-gray-500 mt-1">"Suas medicações e prescrições"</p>
            </div>

            <QuickActions />

            {move || dashboard().map(|data| view! { <DashboardContent data=data /> })}
        </div>
    }
}

#[component]
fn DashboardContent(data: DashboardView) -> impl IntoView {
    let DashboardView {
        stats,
        medications,
        recent_prescriptions,
    } = data;

    view! {
        <StatsRow stats=stats />

        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-xl font-semibold mb-4">"Medicações Ativas"</h2>
            {match medications {
                Listing::Empty(empty) => view! { <EmptyStateView empty=empty /> }.into_view(),
                Listing::Items(cards) => view! {
                    <div id="activeMedicationsGrid" class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        {cards
                            .into_iter()
                            .map(|card| view! { <MedicationCardView card=card /> })
                            .collect_view()}
                    </div>
                }
                .into_view(),
            }}
        </section>

        <section id="recentPrescriptions" class="bg-white rounded-xl shadow p-6">
            <h2 class="text-xl font-semibold mb-4">"Prescrições Recentes"</h2>
            <PrescriptionList listing=recent_prescriptions />
        </section>
    }
}

#[component]
fn StatsRow(stats: StoreStats) -> impl IntoView {
    view! {
        <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard id="totalPrescriptions" value=stats.total_prescriptions label="Prescrições" icon="file-prescription" />
            <StatCard id="activeMedications" value=stats.active_medications label="Medicações Ativas" icon="pills" />
            <StatCard id="totalProfessionals" value=stats.total_professionals label="Profissionais" icon="user-md" />
            <StatCard id="totalMedications" value=stats.total_medications label="Medicamentos" icon="capsules" />
        </section>
    }
}

#[component]
fn StatCard(
    id: &'static str,
    value: usize,
    label: &'static str,
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg p-4 shadow border border-gray-200">
            <div class="flex items-center justify-between">
                <span class="text-gray-500 text-sm">{label}</span>
                <i class=format!("fas fa-{} text-blue-500", icon) />
            </div>
            <div id=id class="text-3xl font-bold mt-2">{value}</div>
        </div>
    }
}

#[component]
fn QuickActions() -> impl IntoView {
    view! {
        <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <ActionButton modal=Modal::Upload label="Enviar Prescrição" icon="cloud-upload-alt" />
            <ActionButton modal=Modal::Consolidated label="Visão Consolidada" icon="layer-group" />
            <ActionButton modal=Modal::Pharmacy label="Farmácias" icon="clinic-medical" />
            <ActionButton modal=Modal::Reports label="Relatórios" icon="chart-bar" />
        </section>
    }
}

#[component]
fn ActionButton(modal: Modal, label: &'static str, icon: &'static str) -> impl IntoView {
    let state = use_global_state();
    let open = move |_| state.dispatch(|app| app.show_modal(modal));

    view! {
        <button
            on:click=open
            class="bg-white rounded-lg p-4 shadow border border-gray-200 hover:border-blue-400 transition flex flex-col items-center"
        >
            <i class=format!("fas fa-{} text-2xl text-blue-600 mb-2", icon) />
            <span class="text-sm font-medium">{label}</span>
        </button>
    }
}
