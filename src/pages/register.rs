//! Account registration page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_transport;
use crate::net::api;
use crate::net::gateway::error_message;
use crate::net::types::RegistrationForm;

/// Registration form posting to `auth/register/`. On success the user is
/// sent to the login page.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let transport = use_transport();
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::default());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let payload = form.get_untracked();
        if payload.password != payload.password_confirm {
            error.set(Some("As senhas não coincidem.".to_owned()));
            return;
        }
        error.set(None);
        loading.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = api::register(transport.get().as_ref(), &payload).await;
            loading.set(false);
            match result {
                Ok(_) => navigate("/login", NavigateOptions::default()),
                Err(e) => error.set(Some(error_message(&e))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <h1>"Criar conta"</h1>
            <form class="auth-form" on:submit=on_submit>
                <label>
                    "Usuário"
                    <input
                        type="text"
                        required
                        prop:value=move || form.get().username
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                </label>
                <label>
                    "E-mail"
                    <input
                        type="email"
                        required
                        prop:value=move || form.get().email
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Nome"
                    <input
                        type="text"
                        prop:value=move || form.get().first_name
                        on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Sobrenome"
                    <input
                        type="text"
                        prop:value=move || form.get().last_name
                        on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Senha"
                    <input
                        type="password"
                        required
                        prop:value=move || form.get().password
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Confirmar senha"
                    <input
                        type="password"
                        required
                        prop:value=move || form.get().password_confirm
                        on:input=move |ev| {
                            form.update(|f| f.password_confirm = event_target_value(&ev));
                        }
                    />
                </label>
                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Enviando..." } else { "Registrar" }}
                </button>
            </form>
            <p>
                "Já tem uma conta? " <a href="/login">"Entrar"</a>
            </p>
        </div>
    }
}
