//! Top navigation bar with entity links and session controls.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session;

/// Navigation bar: brand, entity links, greeting, and logout.
///
/// Shown on every route except the landing page. Links and logout only
/// render for an authenticated session; otherwise login/register links
/// take their place.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let state = session.state;
    let greeting = move || {
        state
            .get()
            .user
            .map(|user| format!("Olá, {}!", user.display_name()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            session.logout().await;
            navigate("/login", NavigateOptions::default());
        });
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/dashboard">
                "Feira Virtual"
            </a>
            <Show
                when=move || state.get().is_authenticated()
                fallback=|| {
                    view! {
                        <div class="navbar__links">
                            <a href="/login">"Entrar"</a>
                            <a href="/register">"Registrar"</a>
                        </div>
                    }
                }
            >
                <div class="navbar__links">
                    <span class="navbar__greeting">{greeting}</span>
                    <a href="/feiras">"Feiras"</a>
                    <a href="/expositores">"Expositores"</a>
                    <a href="/produtos">"Produtos"</a>
                    <a href="/ingressos">"Ingressos"</a>
                    <a href="/perfil">"Perfil"</a>
                    <button class="btn btn--danger" on:click=on_logout.clone()>
                        "Sair"
                    </button>
                </div>
            </Show>
        </nav>
    }
}
