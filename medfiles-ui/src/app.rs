//! App Root Component
//!
//! Provides global state, performs the initial navigation and replays
//! history entries on `popstate`. Every page section is always mounted and
//! shown only while its page is current.

use leptos::*;
use medfiles::navigation::Page;

use crate::components::{Modals, Nav, Toast};
use crate::pages::{Dashboard, Login, MedicationHistory, PrescriptionDetail};
use crate::state::browser::{current_query, entry_from_popstate};
use crate::state::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    if let Err(e) = state.dispatch(|app| app.start(&current_query())) {
        state.report("Failed to start", e);
    }

    // Back/forward replays the recorded entry without pushing
    let popstate_state = state.clone();
    let _ = window_event_listener(ev::popstate, move |ev: web_sys::PopStateEvent| {
        if let Some(entry) = entry_from_popstate(&ev.state()) {
            popstate_state.dispatch(|app| app.restore(entry));
        }
    });

    let signed_in = move || !matches!(state.page.get(), None | Some(Page::Login));

    view! {
        <div class="min-h-screen bg-gray-100 text-gray-900 flex flex-col">
            {move || signed_in().then(|| view! { <Nav /> })}

            <main class="flex-1 container mx-auto px-4 py-8">
                <PageSection page=Page::Login><Login /></PageSection>
                <PageSection page=Page::Dashboard><Dashboard /></PageSection>
                <PageSection page=Page::PrescriptionDetail><PrescriptionDetail /></PageSection>
                <PageSection page=Page::MedicationHistory><MedicationHistory /></PageSection>
            </main>

            <Modals />
            <Toast />
        </div>
    }
}

/// Section element for one page, hidden unless that page is current
#[component]
fn PageSection(page: Page, children: Children) -> impl IntoView {
    let state = use_global_state();

    view! {
        <section
            id=page.section_id()
            class="page-section"
            class:hidden=move || state.page.get() != Some(page)
        >
            {children()}
        </section>
    }
}
