//! Login Page

use leptos::*;
use medfiles::navigation::{LoginOutcome, Page};

use crate::components::NoticeBanner;
use crate::state::use_global_state;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let submit_state = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (email, password) = (email.get(), password.get());
        match submit_state.dispatch(|app| app.login(&email, &password)) {
            Ok(LoginOutcome::Accepted) => set_password.set(String::new()),
            Ok(LoginOutcome::Rejected(_)) => {}
            Err(e) => submit_state.report("Login failed", e),
        }
    };

    // Errors show inline here rather than in the toast
    let inline_notice = move || {
        (state.page.get() == Some(Page::Login))
            .then(|| state.notice.get())
            .flatten()
    };

    view! {
        <div class="max-w-md mx-auto mt-16 bg-white rounded-xl shadow p-8">
            <div class="text-center mb-8">
                <i class="fas fa-file-medical text-5xl text-blue-600" />
                <h1 class="text-3xl font-bold mt-3">"MedFiles"</h1>
                <p class="text-gray-500 mt-1">"Suas prescrições em um só lugar"</p>
            </div>

            <form id="loginForm" on:submit=on_submit class="space-y-4">
                <input
                    id="email"
                    type="email"
                    placeholder="E-mail"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full rounded-lg px-4 py-3 border border-gray-300 focus:border-blue-500 focus:outline-none"
                />
                <input
                    id="password"
                    type="password"
                    placeholder="Senha"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full rounded-lg px-4 py-3 border border-gray-300 focus:border-blue-500 focus:outline-none"
                />

                {move || inline_notice().map(|notice| view! { <NoticeBanner notice=notice /> })}

                <button
                    type="submit"
                    class="w-full bg-blue-600 hover:bg-blue-700 text-white rounded-lg py-3 font-semibold transition-colors"
                >
                    "Entrar"
                </button>
            </form>
        </div>
    }
}
