//! Fairs management page: list, create, edit, delete.

use leptos::prelude::*;

use crate::app::use_gateway;
use crate::components::modal::Modal;
use crate::net::api;
use crate::net::gateway::error_message;
use crate::net::types::{Feira, FeiraForm};
use crate::pages::confirm;

/// Fairs page: card list with a modal create/edit form.
#[component]
pub fn FeirasPage() -> impl IntoView {
    let gw = use_gateway();

    let feiras = LocalResource::new(move || async move { api::fetch_feiras(&gw.get()).await });

    let show_modal = RwSignal::new(false);
    let editing = RwSignal::new(None::<Feira>);
    let form = RwSignal::new(FeiraForm::default());
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let open_create = move |_| {
        editing.set(None);
        form.set(FeiraForm::default());
        form_error.set(None);
        show_modal.set(true);
    };

    let open_edit = Callback::new(move |feira: Feira| {
        form.set(FeiraForm {
            nome: feira.nome.clone(),
            descricao: feira.descricao.clone(),
            data_inicio: feira.data_inicio.clone(),
            data_termino: feira.data_termino.clone(),
            local: feira.local.clone(),
            cidade: feira.cidade.clone(),
            estado: feira.estado.clone(),
            preco_ingresso: feira.preco_ingresso.clone(),
        });
        editing.set(Some(feira));
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
                Some(feira) => api::update_feira(&gw, &feira.id, &payload).await,
                None => api::create_feira(&gw, &payload).await,
            };
            saving.set(false);
            match result {
                Ok(_) => {
                    show_modal.set(false);
                    feiras.refetch();
                }
                Err(e) => form_error.set(Some(error_message(&e))),
            }
        });
    });

    let modal_title = move || {
        let title = if editing.with(Option::is_some) {
            "Editar Feira"
        } else {
            "Nova Feira"
        };
        title.to_owned()
    };

    let on_delete = Callback::new(move |id: String| {
        if !confirm("Tem certeza que deseja excluir esta feira?") {
            return;
        }
        leptos::task::spawn_local(async move {
            if let Err(e) = api::delete_feira(&gw.get(), &id).await {
                log::error!("erro ao excluir feira: {}", error_message(&e));
            }
            feiras.refetch();
        });
    });

    view! {
        <div class="crud-page">
            <header class="crud-page__header">
                <h1>"Gerenciar Feiras"</h1>
                <button class="btn btn--primary" on:click=open_create>
                    "Nova Feira"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Carregando feiras..."</p> }>
                {move || {
                    feiras
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! {
                                    <p class="crud-page__empty">
                                        "Nenhuma feira encontrada. Crie a primeira!"
                                    </p>
                                }
                                    .into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="crud-page__grid">
                                        {list
                                            .into_iter()
                                            .map(|feira| {
                                                view! {
                                                    <FeiraCard
                                                        feira=feira
                                                        on_edit=open_edit
                                                        on_delete=on_delete
                                                    />
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
                    <FeiraDialog form=form error=form_error saving=saving on_save=on_save/>
                </Modal>
            </Show>
        </div>
    }
}

#[component]
fn FeiraCard(
    feira: Feira,
    on_edit: Callback<Feira>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let creator = feira
        .criado_por
        .as_ref()
        .map(|user| format!("Criado por {}", user.display_name()))
        .unwrap_or_default();
    let period = format!("{} — {}", feira.data_inicio, feira.data_termino);
    let place = format!("{}, {} - {}", feira.local, feira.cidade, feira.estado);
    let price = format!("Ingresso: R$ {}", feira.preco_ingresso);
    let id = feira.id.clone();
    let edit_target = feira.clone();

    view! {
        <div class="entity-card">
            <h3>{feira.nome.clone()}</h3>
            <p class="entity-card__creator">{creator}</p>
            <p>{feira.descricao.clone()}</p>
            <p>{period}</p>
            <p>{place}</p>
            <p>{price}</p>
            <div class="entity-card__actions">
                <button class="btn" on:click=move |_| on_edit.run(edit_target.clone())>
                    "Editar"
                </button>
                <button class="btn btn--danger" on:click=move |_| on_delete.run(id.clone())>
                    "Excluir"
                </button>
            </div>
        </div>
    }
}

#[component]
fn FeiraDialog(
    form: RwSignal<FeiraForm>,
    error: RwSignal<Option<String>>,
    saving: RwSignal<bool>,
    on_save: Callback<()>,
) -> impl IntoView {
    view! {
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
                    on:input=move |ev| form.update(|f| f.descricao = event_target_value(&ev))
                ></textarea>
            </label>
            <label>
                "Data de início"
                <input
                    type="date"
                    required
                    prop:value=move || form.get().data_inicio
                    on:input=move |ev| form.update(|f| f.data_inicio = event_target_value(&ev))
                />
            </label>
            <label>
                "Data de término"
                <input
                    type="date"
                    required
                    prop:value=move || form.get().data_termino
                    on:input=move |ev| form.update(|f| f.data_termino = event_target_value(&ev))
                />
            </label>
            <label>
                "Local"
                <input
                    type="text"
                    required
                    prop:value=move || form.get().local
                    on:input=move |ev| form.update(|f| f.local = event_target_value(&ev))
                />
            </label>
            <label>
                "Cidade"
                <input
                    type="text"
                    required
                    prop:value=move || form.get().cidade
                    on:input=move |ev| form.update(|f| f.cidade = event_target_value(&ev))
                />
            </label>
            <label>
                "Estado (UF)"
                <input
                    type="text"
                    required
                    maxlength="2"
                    prop:value=move || form.get().estado
                    on:input=move |ev| form.update(|f| f.estado = event_target_value(&ev))
                />
            </label>
            <label>
                "Preço do ingresso"
                <input
                    type="number"
                    step="0.01"
                    min="0.01"
                    required
                    prop:value=move || form.get().preco_ingresso
                    on:input=move |ev| form.update(|f| f.preco_ingresso = event_target_value(&ev))
                />
            </label>
            <Show when=move || error.get().is_some() fallback=|| ()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                {move || if saving.get() { "Salvando..." } else { "Salvar" }}
            </button>
        </form>
    }
}
