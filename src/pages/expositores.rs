//! Exhibitors management page.

use leptos::prelude::*;

use crate::app::use_gateway;
use crate::components::modal::Modal;
use crate::net::api;
use crate::net::gateway::error_message;
use crate::net::types::{Expositor, ExpositorForm, Feira};
use crate::pages::confirm;

/// Exhibitors page: list plus a modal form with a fair selector.
#[component]
pub fn ExpositoresPage() -> impl IntoView {
    let gw = use_gateway();

    let expositores =
        LocalResource::new(move || async move { api::fetch_expositores(&gw.get()).await });
    // Fairs feed the <select> in the form; load errors degrade to an
    // empty option list.
    let feiras = LocalResource::new(move || async move {
        api::fetch_feiras(&gw.get()).await.unwrap_or_default()
    });

    let show_modal = RwSignal::new(false);
    let editing = RwSignal::new(None::<Expositor>);
    let form = RwSignal::new(ExpositorForm::default());
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let open_create = move |_| {
        editing.set(None);
        form.set(ExpositorForm::default());
        form_error.set(None);
        show_modal.set(true);
    };

    let open_edit = Callback::new(move |expositor: Expositor| {
        form.set(ExpositorForm {
            nome: expositor.nome.clone(),
            descricao: expositor.descricao.clone(),
            contato: expositor.contato.clone(),
            feira: expositor.feira.clone(),
        });
        editing.set(Some(expositor));
        form_error.set(None);
        show_modal.set(true);
    });

    let on_close = Callback::new(move |()| show_modal.set(false));

    let on_save = Callback::new(move |()| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        form_error.set(None);
        leptos::task::spawn_local(async move {
            let gw = gw.get();
            let payload = form.get_untracked();
            let result = match editing.get_untracked() {
                Some(expositor) => api::update_expositor(&gw, &expositor.id, &payload).await,
                None => api::create_expositor(&gw, &payload).await,
            };
            saving.set(false);
            match result {
                Ok(_) => {
                    show_modal.set(false);
                    expositores.refetch();
                }
                Err(e) => form_error.set(Some(error_message(&e))),
            }
        });
    });

    let modal_title = move || {
        let title = if editing.with(Option::is_some) {
            "Editar Expositor"
        } else {
            "Novo Expositor"
        };
        title.to_owned()
    };

    let on_delete = Callback::new(move |id: String| {
        if !confirm("Tem certeza que deseja excluir este expositor?") {
            return;
        }
        leptos::task::spawn_local(async move {
            if let Err(e) = api::delete_expositor(&gw.get(), &id).await {
                log::error!("erro ao excluir expositor: {}", error_message(&e));
            }
            expositores.refetch();
        });
    });

    view! {
        <div class="crud-page">
            <header class="crud-page__header">
                <h1>"Gerenciar Expositores"</h1>
                <button class="btn btn--primary" on:click=open_create>
                    "Novo Expositor"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Carregando expositores..."</p> }>
                {move || {
                    expositores
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! {
                                    <p class="crud-page__empty">"Nenhum expositor cadastrado."</p>
                                }
                                    .into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="crud-page__grid">
                                        {list
                                            .into_iter()
                                            .map(|expositor| {
                                                let id = expositor.id.clone();
                                                let edit_target = expositor.clone();
                                                let fair = expositor
                                                    .feira_nome
                                                    .clone()
                                                    .map(|nome| format!("Feira: {nome}"))
                                                    .unwrap_or_default();
                                                view! {
                                                    <div class="entity-card">
                                                        <h3>{expositor.nome.clone()}</h3>
                                                        <p>{expositor.descricao.clone()}</p>
                                                        <p>{format!("Contato: {}", expositor.contato)}</p>
                                                        <p>{fair}</p>
                                                        <div class="entity-card__actions">
                                                            <button
                                                                class="btn"
                                                                on:click=move |_| open_edit.run(edit_target.clone())
                                                            >
                                                                "Editar"
                                                            </button>
                                                            <button
                                                                class="btn btn--danger"
                                                                on:click=move |_| on_delete.run(id.clone())
                                                            >
                                                                "Excluir"
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
                <Modal title=modal_title() on_close=on_close>
                    <form
                        class="entity-form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            on_save.run(());
                        }
                    >
                        <label>
                            "Nome"
                            <input
                                type="text"
                                required
                                prop:value=move || form.get().nome
                                on:input=move |ev| form.update(|f| f.nome = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Descrição"
                            <textarea
                                required
                                prop:value=move || form.get().descricao
                                on:input=move |ev| {
                                    form.update(|f| f.descricao = event_target_value(&ev));
                                }
                            ></textarea>
                        </label>
                        <label>
                            "Contato"
                            <input
                                type="text"
                                required
                                prop:value=move || form.get().contato
                                on:input=move |ev| {
                                    form.update(|f| f.contato = event_target_value(&ev));
                                }
                            />
                        </label>
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
                                            view! { <option value=feira.id>{feira.nome}</option> }
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
                            {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                        </button>
                    </form>
                </Modal>
            </Show>
        </div>
    }
}
