//! Tickets page: list, buy, cancel.

use leptos::prelude::*;

use crate::app::use_gateway;
use crate::components::modal::Modal;
use crate::net::api;
use crate::net::gateway::error_message;
use crate::net::types::{Feira, IngressoForm};
use crate::pages::confirm;

/// Tickets page. The ticket number is generated server-side, so the buy
/// dialog only asks for a fair.
#[component]
pub fn IngressosPage() -> impl IntoView {
    let gw = use_gateway();

    let ingressos =
        LocalResource::new(move || async move { api::fetch_ingressos(&gw.get()).await });
    let feiras = LocalResource::new(move || async move {
        api::fetch_feiras(&gw.get()).await.unwrap_or_default()
    });

    let show_modal = RwSignal::new(false);
    let form = RwSignal::new(IngressoForm::default());
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let open_buy = move |_| {
        form.set(IngressoForm::default());
        form_error.set(None);
        show_modal.set(true);
    };

    let on_close = Callback::new(move |()| show_modal.set(false));

    let on_save = Callback::new(move |()| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        form_error.set(None);
        leptos::task::spawn_local(async move {
            let result = api::create_ingresso(&gw.get(), &form.get_untracked()).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    show_modal.set(false);
                    ingressos.refetch();
                }
                Err(e) => form_error.set(Some(error_message(&e))),
            }
        });
    });

    let on_delete = Callback::new(move |id: String| {
        if !confirm("Tem certeza que deseja cancelar este ingresso?") {
            return;
        }
        leptos::task::spawn_local(async move {
            if let Err(e) = api::delete_ingresso(&gw.get(), &id).await {
                log::error!("erro ao cancelar ingresso: {}", error_message(&e));
            }
            ingressos.refetch();
        });
    });

    view! {
        <div class="crud-page">
            <header class="crud-page__header">
                <h1>"Meus Ingressos"</h1>
                <button class="btn btn--primary" on:click=open_buy>
                    "Comprar Ingresso"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Carregando ingressos..."</p> }>
                {move || {
                    ingressos
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! {
                                    <p class="crud-page__empty">
                                        "Você ainda não possui ingressos."
                                    </p>
                                }
                                    .into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="crud-page__grid">
                                        {list
                                            .into_iter()
                                            .map(|ingresso| {
                                                let id = ingresso.id.clone();
                                                let fair = ingresso.feira_nome.clone().unwrap_or_default();
                                                let price = ingresso
                                                    .preco
                                                    .clone()
                                                    .map(|p| format!("R$ {p}"))
                                                    .unwrap_or_default();
                                                let issued = ingresso
                                                    .data_emissao
                                                    .clone()
                                                    .map(|d| format!("Emitido em {d}"))
                                                    .unwrap_or_default();
                                                view! {
                                                    <div class="entity-card">
                                                        <h3>{ingresso.numero_ingresso.clone()}</h3>
                                                        <p>{fair}</p>
                                                        <p>{price}</p>
                                                        <p>{issued}</p>
                                                        <div class="entity-card__actions">
                                                            <button
                                                                class="btn btn--danger"
                                                                on:click=move |_| on_delete.run(id.clone())
                                                            >
                                                                "Cancelar"
                                                            </button>
                                                        </div>
                                                    </div>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(e) => {
                                view! { <p class="form-error">{error_message(&e)}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>

            <Show when=move || show_modal.get() fallback=|| ()>
                <Modal title=String::from("Comprar Ingresso") on_close=on_close>
                    <form
                        class="entity-form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            on_save.run(());
                        }
                    >
                        <label>
                            "Feira"
                            <select
                                required
                                prop:value=move || form.get().feira
                                on:change=move |ev| {
                                    form.update(|f| f.feira = event_target_value(&ev));
                                }
                            >
                                <option value="">"Selecione uma feira"</option>
                                {move || {
                                    feiras
                                        .get()
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|feira: Feira| {
                                            let label = format!(
                                                "{} (R$ {})",
                                                feira.nome,
                                                feira.preco_ingresso,
                                            );
                                            view! { <option value=feira.id>{label}</option> }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </select>
                        </label>
                        <Show when=move || form_error.get().is_some() fallback=|| ()>
                            <p class="form-error">
                                {move || form_error.get().unwrap_or_default()}
                            </p>
                        </Show>
                        <button
                            class="btn btn--primary"
                            type="submit"
                            disabled=move || saving.get()
                        >
                            {move || if saving.get() { "Comprando..." } else { "Comprar" }}
                        </button>
                    </form>
                </Modal>
            </Show>
        </div>
    }
}
