//! Empty list placeholder

use leptos::*;
use medfiles::view::EmptyState;

#[component]
pub fn EmptyStateView(empty: EmptyState) -> impl IntoView {
    view! {
        <div class="text-center py-10 text-gray-500">
            <i class=format!("fas fa-{} text-4xl mb-3", empty.icon) />
            <h3 class="font-semibold text-gray-700">{empty.title}</h3>
            <p class="text-sm mt-1">{empty.hint}</p>
        </div>
    }
}
