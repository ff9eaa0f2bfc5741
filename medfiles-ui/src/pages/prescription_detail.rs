//! Prescription Detail Page

use leptos::*;
use medfiles::view::{LineItemCard, PageView, PrescriptionDetailView};

use crate::components::BackButton;
use crate::state::use_global_state;

#[component]
pub fn PrescriptionDetail() -> impl IntoView {
    let state = use_global_state();

    // Absent when the id was not found; the notice explains it
    let detail = move || match state.view.get() {
        Some(PageView::PrescriptionDetail(detail)) => detail,
        _ => None,
    };

    view! {
        <BackButton />
        {move || detail().map(|data| view! { <DetailContent data=data /> })}
    }
}

#[component]
fn DetailContent(data: PrescriptionDetailView) -> impl IntoView {
    let PrescriptionDetailView {
        id,
        date,
        patient,
        items,
        professional,
        notes,
        generated_on,
    } = data;

    view! {
        <article class="bg-white rounded-xl shadow p-8 space-y-6">
            <header class="flex items-center justify-between border-b border-gray-200 pb-4">
                <div>
                    <h1 class="text-2xl font-bold">{format!("Prescrição #{}", id)}</h1>
                    <span id="professionalName" class="text-gray-600">{professional.name.clone()}</span>
                </div>
                <span id="prescriptionDate" class="text-gray-500">{date}</span>
            </header>

            <section>
                <h2 class="text-lg font-semibold mb-2">"Paciente"</h2>
                <dl class="grid grid-cols-3 gap-4 text-sm">
                    <Field label="Nome" id="patientName" value=patient.name />
                    <Field label="Data de nascimento" id="patientBirthDate" value=patient.birth_date />
                    <Field label="CPF" id="patientCPF" value=patient.id_number />
                </dl>
            </section>

            <section>
                <h2 class="text-lg font-semibold mb-2">"Medicamentos"</h2>
                <div id="medicationsList" class="space-y-3">
                    {items.into_iter().map(|item| view! { <ItemCard item=item /> }).collect_view()}
                </div>
            </section>

            <section>
                <h2 class="text-lg font-semibold mb-2">"Observações"</h2>
                <p id="prescriptionNotes" class="text-gray-700">{notes}</p>
            </section>

            <footer class="border-t border-gray-200 pt-4 flex items-end justify-between text-sm">
                <div>
                    <div id="profName" class="font-semibold">{professional.name}</div>
                    <div id="profSpecialty" class="text-gray-600">{professional.specialty}</div>
                    <div id="profCRM" class="text-gray-500">{professional.license}</div>
                </div>
                <div class="text-gray-400">
                    "Gerado em "
                    <span id="generatedDate">{generated_on}</span>
                </div>
            </footer>
        </article>
    }
}

#[component]
fn Field(label: &'static str, id: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-gray-500">{label}</dt>
            <dd id=id class="font-medium">{value}</dd>
        </div>
    }
}

#[component]
fn ItemCard(item: LineItemCard) -> impl IntoView {
    view! {
        <div class="border border-gray-200 rounded-lg p-4">
            <div class="flex items-center justify-between">
                <span class="font-semibold">{item.name}</span>
                <span class="text-blue-700 font-medium">{item.dose}</span>
            </div>
            <div class="text-sm text-gray-600 mt-1">{item.posology}</div>
            <div class="text-xs text-gray-400 mt-1">
                {format!("{} · {}", item.quantity, item.presentation)}
            </div>
        </div>
    }
}
