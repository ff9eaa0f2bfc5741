//! Modal Dialogs
//!
//! Upload, consolidated view, pharmacy and reports. At most one is open;
//! clicking the backdrop or the close button closes it.

use leptos::*;
use medfiles::navigation::Modal;
use medfiles::upload::UploadPhase;
use medfiles::view::{ConsolidatedGroup, Listing};

use super::{EmptyStateView, NoticeBanner};
use crate::state::use_global_state;

/// All modal dialogs
#[component]
pub fn Modals() -> impl IntoView {
    view! {
        <ModalFrame modal=Modal::Upload title="Enviar Prescrição">
            <UploadBody />
        </ModalFrame>
        <ModalFrame modal=Modal::Consolidated title="Prescrição Consolidada">
            <ConsolidatedBody />
        </ModalFrame>
        <ModalFrame modal=Modal::Pharmacy title="Farmácias Próximas">
            <p class="text-gray-600">
                "Em breve você poderá encontrar farmácias com seus medicamentos disponíveis."
            </p>
        </ModalFrame>
        <ModalFrame modal=Modal::Reports title="Relatórios">
            <p class="text-gray-600">
                "Em breve você poderá gerar relatórios do seu histórico de medicações."
            </p>
        </ModalFrame>
    }
}

/// Backdrop and dialog box for one modal
#[component]
fn ModalFrame(modal: Modal, title: &'static str, children: ChildrenFn) -> impl IntoView {
    let state = use_global_state();
    let is_open = {
        let state = state.clone();
        move || state.modal.get() == Some(modal)
    };
    let close = move || {
        state.dispatch(|app| app.close_modal(modal));
    };
    let close_backdrop = close.clone();

    view! {
        <Show when=is_open>
            <div
                id=modal.element_id()
                class="modal fixed inset-0 z-40 bg-black/50 flex items-center justify-center"
                on:click={
                    let close = close_backdrop.clone();
                    move |_| close()
                }
            >
                <div
                    class="bg-white rounded-xl shadow-xl w-full max-w-lg p-6"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-semibold">{title}</h2>
                        <button
                            class="modal-close text-gray-400 hover:text-gray-700 text-2xl"
                            on:click={
                                let close = close.clone();
                                move |_| close()
                            }
                        >
                            "×"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn UploadBody() -> impl IntoView {
    let state = use_global_state();
    let (dragging, set_dragging) = create_signal(false);
    let input_ref = create_node_ref::<html::Input>();

    let start = {
        let state = state.clone();
        move |file: web_sys::File| state.start_upload(&file.name())
    };

    let on_change = {
        let start = start.clone();
        move |_| {
            let file = input_ref
                .get()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                start(file);
            }
        }
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let file = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            start(file);
        }
    };

    let processing = {
        let state = state.clone();
        move || {
            state
                .upload
                .get()
                .is_some_and(|task| task.phase() == UploadPhase::Processing)
        }
    };

    view! {
        <div
            class="border-2 border-dashed rounded-lg p-8 text-center cursor-pointer transition-colors"
            class:border-blue-500=move || dragging.get()
            class:bg-blue-50=move || dragging.get()
            on:click=move |_| {
                if let Some(input) = input_ref.get() {
                    input.click();
                }
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                set_dragging.set(true);
            }
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <i class="fas fa-cloud-upload-alt text-4xl text-blue-500 mb-3" />
            <p class="font-medium">"Arraste o arquivo ou clique para selecionar"</p>
            <p class="text-gray-500 text-sm mt-1">"PDF, JPG ou PNG"</p>
            <input
                node_ref=input_ref
                type="file"
                accept=".pdf,.jpg,.jpeg,.png"
                class="hidden"
                on:change=on_change
            />
        </div>

        <div class="mt-4">
            {move || processing().then(|| view! {
                <div class="flex items-center space-x-2 text-gray-600">
                    <div class="loading-spinner w-4 h-4" />
                    <span>"Processando..."</span>
                </div>
            })}
            {move || state.upload_result.get().map(|notice| view! { <NoticeBanner notice=notice /> })}
        </div>
    }
}

#[component]
fn ConsolidatedBody() -> impl IntoView {
    let state = use_global_state();

    view! {
        {move || state.consolidated.get().map(|summary| view! {
            <p class="text-gray-500 mb-4">{summary.subtitle}</p>
            <div class="grid grid-cols-2 gap-4 mb-6">
                <Counter value=summary.active_count label="Medicações Ativas" />
                <Counter value=summary.unique_count label="Medicamentos Únicos" />
            </div>
            {match summary.groups {
                Listing::Empty(empty) => view! { <EmptyStateView empty=empty /> }.into_view(),
                Listing::Items(groups) => groups
                    .into_iter()
                    .map(|group| view! { <GroupRow group=group /> })
                    .collect_view(),
            }}
        })}
    }
}

#[component]
fn Counter(value: usize, label: &'static str) -> impl IntoView {
    view! {
        <div class="bg-blue-50 rounded-lg p-4 text-center">
            <div class="text-3xl font-bold text-blue-700">{value}</div>
            <div class="text-sm text-gray-600">{label}</div>
        </div>
    }
}

#[component]
fn GroupRow(group: ConsolidatedGroup) -> impl IntoView {
    view! {
        <div class="border-b border-gray-200 py-3 last:border-0">
            <div class="flex items-center justify-between">
                <span class="font-semibold">{group.name}</span>
                <span class="px-2 py-1 bg-green-100 text-green-700 rounded text-xs">{group.status}</span>
            </div>
            <div class="text-sm text-gray-600 mt-1">
                {format!("{} · {} · {}", group.dose, group.posology, group.presentation)}
            </div>
            <div class="text-xs text-gray-400 mt-1">
                {format!("{} prescrição(ões)", group.prescription_count)}
            </div>
        </div>
    }
}
