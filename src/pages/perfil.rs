//! Profile page: personal data and password change.

use leptos::prelude::*;

use crate::app::use_gateway;
use crate::net::api::{self, ProfileForm};
use crate::net::gateway::error_message;
use crate::net::types::ChangePasswordForm;

/// Profile page. Always re-fetches the profile from the backend rather
/// than trusting the cached identity, so edits made elsewhere show up.
#[component]
pub fn PerfilPage() -> impl IntoView {
    let gw = use_gateway();

    let profile = LocalResource::new(move || async move { api::get_profile(&gw.get()).await });

    let form = RwSignal::new(ProfileForm::default());
    let username = RwSignal::new(String::new());
    let date_joined = RwSignal::new(None::<String>);
    let profile_message = RwSignal::new(None::<Result<String, String>>);
    let saving = RwSignal::new(false);

    // Seed the form once the profile arrives.
    Effect::new(move || {
        if let Some(Ok(user)) = profile.get() {
            username.set(user.username.clone());
            date_joined.set(user.date_joined.clone());
            form.set(ProfileForm {
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
            });
        }
    });

    let on_save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        profile_message.set(None);
        leptos::task::spawn_local(async move {
            let result = api::update_profile(&gw.get(), &form.get_untracked()).await;
            saving.set(false);
            match result {
                Ok(updated) => {
                    profile_message.set(Some(Ok(updated
                        .message
                        .unwrap_or_else(|| "Perfil atualizado com sucesso!".to_owned()))));
                }
                Err(e) => profile_message.set(Some(Err(error_message(&e)))),
            }
        });
    };

    let password_form = RwSignal::new(ChangePasswordForm::default());
    let password_message = RwSignal::new(None::<Result<String, String>>);
    let changing = RwSignal::new(false);

    let on_change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if changing.get_untracked() {
            return;
        }
        let payload = password_form.get_untracked();
        if payload.new_password != payload.new_password_confirm {
            password_message.set(Some(Err("As novas senhas não coincidem.".to_owned())));
            return;
        }
        changing.set(true);
        password_message.set(None);
        leptos::task::spawn_local(async move {
            let result = api::change_password(&gw.get(), &payload).await;
            changing.set(false);
            match result {
                Ok(()) => {
                    password_form.set(ChangePasswordForm::default());
                    password_message
                        .set(Some(Ok("Senha alterada com sucesso!".to_owned())));
                }
                Err(e) => password_message.set(Some(Err(error_message(&e)))),
            }
        });
    };

    view! {
        <div class="perfil-page">
            <h1>"Meu Perfil"</h1>

            <Suspense fallback=move || view! { <p>"Carregando perfil..."</p> }>
                {move || {
                    profile
                        .get()
                        .map(|result| match result {
                            Ok(_) => {
                                view! {
                                    <section class="perfil-page__section">
                                        <h2>"Dados pessoais"</h2>
                                        <p class="perfil-page__meta">
                                            {move || format!("Usuário: {}", username.get())}
                                        </p>
                                        <p class="perfil-page__meta">
                                            {move || {
                                                date_joined
                                                    .get()
                                                    .map(|d| format!("Membro desde {d}"))
                                                    .unwrap_or_default()
                                            }}
                                        </p>
                                        <form class="entity-form" on:submit=on_save_profile>
                                            <label>
                                                "E-mail"
                                                <input
                                                    type="email"
                                                    required
                                                    prop:value=move || form.get().email
                                                    on:input=move |ev| {
                                                        form.update(|f| f.email = event_target_value(&ev));
                                                    }
                                                />
                                            </label>
                                            <label>
                                                "Nome"
                                                <input
                                                    type="text"
                                                    prop:value=move || form.get().first_name
                                                    on:input=move |ev| {
                                                        form.update(|f| f.first_name = event_target_value(&ev));
                                                    }
                                                />
                                            </label>
                                            <label>
                                                "Sobrenome"
                                                <input
                                                    type="text"
                                                    prop:value=move || form.get().last_name
                                                    on:input=move |ev| {
                                                        form.update(|f| f.last_name = event_target_value(&ev));
                                                    }
                                                />
                                            </label>
                                            <FeedbackLine message=profile_message/>
                                            <button
                                                class="btn btn--primary"
                                                type="submit"
                                                disabled=move || saving.get()
                                            >
                                                {move || {
                                                    if saving.get() { "Salvando..." } else { "Salvar" }
                                                }}
                                            </button>
                                        </form>
                                    </section>
                                }
                                    .into_any()
                            }
                            Err(e) => {
                                view! { <p class="form-error">{error_message(&e)}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>

            <section class="perfil-page__section">
                <h2>"Alterar senha"</h2>
                <form class="entity-form" on:submit=on_change_password>
                    <label>
                        "Senha atual"
                        <input
                            type="password"
                            required
                            prop:value=move || password_form.get().old_password
                            on:input=move |ev| {
                                password_form.update(|f| f.old_password = event_target_value(&ev));
                            }
                        />
                    </label>
                    <label>
                        "Nova senha"
                        <input
                            type="password"
                            required
                            prop:value=move || password_form.get().new_password
                            on:input=move |ev| {
                                password_form.update(|f| f.new_password = event_target_value(&ev));
                            }
                        />
                    </label>
                    <label>
                        "Confirmar nova senha"
                        <input
                            type="password"
                            required
                            prop:value=move || password_form.get().new_password_confirm
                            on:input=move |ev| {
                                password_form
                                    .update(|f| f.new_password_confirm = event_target_value(&ev));
                            }
                        />
                    </label>
                    <FeedbackLine message=password_message/>
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || changing.get()
                    >
                        {move || if changing.get() { "Alterando..." } else { "Alterar senha" }}
                    </button>
                </form>
            </section>
        </div>
    }
}

/// Success/error line under a form.
#[component]
fn FeedbackLine(message: RwSignal<Option<Result<String, String>>>) -> impl IntoView {
    move || {
        message.get().map(|result| match result {
            Ok(text) => view! { <p class="form-success">{text}</p> }.into_any(),
            Err(text) => view! { <p class="form-error">{text}</p> }.into_any(),
        })
    }
}
