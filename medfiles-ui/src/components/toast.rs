//! Notice Components
//!
//! The single inline notice slot, shown as a toast, plus a banner variant
//! for notices rendered inside a dialog.

use leptos::*;
use medfiles::navigation::Page;
use medfiles::view::{Notice, NoticeKind};

use crate::state::use_global_state;

/// Toast for the global notice slot. The login page shows its notice inline.
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || {
                let dismiss_state = state.clone();
                let on_login = state.page.get() == Some(Page::Login);
                state.notice.get().filter(|_| !on_login).map(|notice| view! {
                    <NoticeBanner
                        notice=notice
                        on_dismiss=Callback::new(move |_| dismiss_state.dispatch(|app| app.dismiss_notice()))
                    />
                })
            }}
        </div>
    }
}

/// One notice with icon and colour by kind
#[component]
pub fn NoticeBanner(
    notice: Notice,
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let (icon, bg_class) = match notice.kind {
        NoticeKind::Success => ("✓", "bg-green-600"),
        NoticeKind::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div class=format!(
            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{notice.text}</span>
            {on_dismiss.map(|dismiss| view! {
                <button class="ml-2 opacity-75 hover:opacity-100" on:click=move |_| dismiss.call(())>
                    "×"
                </button>
            })}
        </div>
    }
}
