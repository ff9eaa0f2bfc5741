//! Navigation Component
//!
//! Header bar with brand, signed-in user and logout.

use leptos::*;
use medfiles::navigation::{NavParams, Page};

use crate::state::use_global_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();

    let home_state = state.clone();
    let go_home = move |_| {
        home_state.dispatch(|app| app.navigate_to(Page::Dashboard, NavParams::new()));
    };

    let logout_state = state.clone();
    let logout = move |_| {
        if let Err(e) = logout_state.dispatch(|app| app.logout()) {
            logout_state.report("Logout failed", e);
        }
    };

    view! {
        <nav class="bg-white border-b border-gray-200 shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <button on:click=go_home class="flex items-center space-x-3">
                        <i class="fas fa-file-medical text-2xl text-blue-600" />
                        <span class="text-xl font-bold">"MedFiles"</span>
                    </button>

                    <div class="flex items-center space-x-4">
                        <span class="text-gray-600 text-sm">
                            {move || state.user.get().map(|user| user.name).unwrap_or_default()}
                        </span>
                        <button
                            on:click=logout
                            class="px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100 transition-colors"
                        >
                            <i class="fas fa-sign-out-alt mr-2" />
                            "Sair"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// "Voltar" button stepping one entry back in history
#[component]
pub fn BackButton() -> impl IntoView {
    let state = use_global_state();
    let go_back = move |_| {
        state.dispatch(|app| app.go_back());
    };

    view! {
        <button on:click=go_back class="flex items-center text-blue-600 hover:text-blue-800 mb-6">
            <i class="fas fa-arrow-left mr-2" />
            "Voltar"
        </button>
    }
}
