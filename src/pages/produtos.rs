//! Products management page.

use leptos::prelude::*;

use crate::app::use_gateway;
use crate::components::modal::Modal;
use crate::net::api;
use crate::net::gateway::error_message;
use crate::net::types::{Expositor, Produto, ProdutoForm};
use crate::pages::confirm;

/// Products page: list plus a modal form with an exhibitor selector.
#[component]
pub fn ProdutosPage() -> impl IntoView {
    let gw = use_gateway();

    let produtos = LocalResource::new(move || async move { api::fetch_produtos(&gw.get()).await });
    let expositores = LocalResource::new(move || async move {
        api::fetch_expositores(&gw.get()).await.unwrap_or_default()
    });

    let show_modal = RwSignal::new(false);
    let editing = RwSignal::new(None::<Produto>);
    let form = RwSignal::new(ProdutoForm::default());
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let open_create = move |_| {
        editing.set(None);
        form.set(ProdutoForm::default());
        form_error.set(None);
        show_modal.set(true);
    };

    let open_edit = Callback::new(move |produto: Produto| {
        form.set(ProdutoForm {
            nome: produto.nome.clone(),
            descricao: produto.descricao.clone(),
            preco: produto.preco.clone(),
            expositor: produto.expositor.clone(),
        });
        editing.set(Some(produto));
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
                Some(produto) => api::update_produto(&gw, &produto.id, &payload).await,
                None => api::create_produto(&gw, &payload).await,
            };
            saving.set(false);
            match result {
                Ok(_) => {
                    show_modal.set(false);
                    produtos.refetch();
                }
                Err(e) => form_error.set(Some(error_message(&e))),
            }
        });
    });

    let modal_title = move || {
        let title = if editing.with(Option::is_some) {
            "Editar Produto"
        } else {
            "Novo Produto"
        };
        title.to_owned()
    };

    let on_delete = Callback::new(move |id: String| {
        if !confirm("Tem certeza que deseja excluir este produto?") {
            return;
        }
        leptos::task::spawn_local(async move {
            if let Err(e) = api::delete_produto(&gw.get(), &id).await {
                log::error!("erro ao excluir produto: {}", error_message(&e));
            }
            produtos.refetch();
        });
    });

    view! {
        <div class="crud-page">
            <header class="crud-page__header">
                <h1>"Gerenciar Produtos"</h1>
                <button class="btn btn--primary" on:click=open_create>
                    "Novo Produto"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Carregando produtos..."</p> }>
                {move || {
                    produtos
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! {
                                    <p class="crud-page__empty">"Nenhum produto cadastrado."</p>
                                }
                                    .into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="crud-page__grid">
                                        {list
                                            .into_iter()
                                            .map(|produto| {
                                                let id = produto.id.clone();
                                                let edit_target = produto.clone();
                                                let origin = match (&produto.expositor_nome, &produto.feira_nome) {
                                                    (Some(expositor), Some(feira)) => {
                                                        format!("{expositor} — {feira}")
                                                    }
                                                    (Some(expositor), None) => expositor.clone(),
                                                    _ => String::new(),
                                                };
                                                view! {
                                                    <div class="entity-card">
                                                        <h3>{produto.nome.clone()}</h3>
                                                        <p>{produto.descricao.clone()}</p>
                                                        <p>{format!("R$ {}", produto.preco)}</p>
                                                        <p>{origin}</p>
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
                            "Preço"
                            <input
                                type="number"
                                step="0.01"
                                min="0.01"
                                required
                                prop:value=move || form.get().preco
                                on:input=move |ev| form.update(|f| f.preco = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Expositor"
                            <select
                                required
                                prop:value=move || form.get().expositor
                                on:change=move |ev| {
                                    form.update(|f| f.expositor = event_target_value(&ev));
                                }
                            >
                                <option value="">"Selecione um expositor"</option>
                                {move || {
                                    expositores
                                        .get()
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|expositor: Expositor| {
                                            view! {
                                                <option value=expositor.id>{expositor.nome}</option>
                                            }
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
