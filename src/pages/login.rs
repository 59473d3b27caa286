//! Login page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session;

/// Login form. An already-authenticated session is bounced straight to
/// the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        Effect::new(move || {
            if session.state.get().is_authenticated() {
                navigate(
                    "/dashboard",
                    NavigateOptions {
                        replace: true,
                        ..NavigateOptions::default()
                    },
                );
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        error.set(None);
        loading.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = session
                .login(
                    username.get_untracked().trim(),
                    password.get_untracked().as_str(),
                )
                .await;
            loading.set(false);
            match result {
                Ok(response) if response.user.is_some() && response.tokens.is_some() => {
                    navigate("/dashboard", NavigateOptions::default());
                }
                Ok(_) | Err(_) => {
                    error.set(Some("Falha no login. Verifique suas credenciais.".to_owned()));
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <h1>"Login"</h1>
            <form class="auth-form" on:submit=on_submit>
                <label>
                    "Usuário"
                    <input
                        type="text"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Senha"
                    <input
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
            <p>
                "Não tem uma conta? " <a href="/register">"Registre-se"</a>
            </p>
        </div>
    }
}
