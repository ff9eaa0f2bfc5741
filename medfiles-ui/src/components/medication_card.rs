//! Medication Card Component
//!
//! An active medication on the dashboard. Clicking opens its history.

use leptos::*;
use medfiles::view::MedicationCard;

use crate::state::use_global_state;

#[component]
pub fn MedicationCardView(card: MedicationCard) -> impl IntoView {
    let state = use_global_state();
    let id = card.id;
    let open_history = move |_| {
        state.dispatch(|app| app.view_medication_history(id));
    };

    view! {
        <div
            on:click=open_history
            class="bg-white rounded-lg p-4 border border-gray-200 hover:border-blue-400 hover:shadow transition cursor-pointer"
        >
            <div class="flex items-center justify-between">
                <span class="font-semibold">{card.name}</span>
                <i class="fas fa-chart-line text-blue-500" />
            </div>
            <div class="text-2xl font-bold mt-2">{card.dose}</div>
            <div class="text-gray-500 text-sm mt-1">{card.presentation}</div>
        </div>
    }
}
