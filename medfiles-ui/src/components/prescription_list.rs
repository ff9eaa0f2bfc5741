//! Prescription List Component
//!
//! Rows of prescription summaries, or the list's empty state.

use leptos::*;
use medfiles::view::{Listing, PrescriptionSummary};

use super::EmptyStateView;
use crate::state::use_global_state;

#[component]
pub fn PrescriptionList(listing: Listing<PrescriptionSummary>) -> impl IntoView {
    match listing {
        Listing::Empty(empty) => view! { <EmptyStateView empty=empty /> }.into_view(),
        Listing::Items(rows) => view! {
            <div class="divide-y divide-gray-200">
                {rows.into_iter().map(|row| view! { <PrescriptionRow row=row /> }).collect_view()}
            </div>
        }
        .into_view(),
    }
}

#[component]
fn PrescriptionRow(row: PrescriptionSummary) -> impl IntoView {
    let state = use_global_state();
    let id = row.id;
    let open = move |_| {
        state.dispatch(|app| app.view_prescription(id));
    };

    view! {
        <div on:click=open class="py-3 px-2 hover:bg-gray-50 cursor-pointer">
            <div class="flex items-center justify-between">
                <span class="font-medium">{row.professional_name}</span>
                <span class="text-gray-500 text-sm">{row.date}</span>
            </div>
            <div class="flex flex-wrap gap-2 mt-2">
                {row.tags
                    .into_iter()
                    .map(|tag| view! {
                        <span class="px-2 py-1 bg-blue-50 text-blue-700 rounded text-xs">{tag}</span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
