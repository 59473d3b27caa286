//! Public landing page.

use leptos::prelude::*;

use crate::state::session::use_session;

/// Landing page with entry points into the console.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let authenticated = move || session.state.get().is_authenticated();

    view! {
        <div class="home-page">
            <h1>"Feira Virtual"</h1>
            <p>"Gestão de feiras, expositores, produtos e ingressos em um só lugar."</p>
            <div class="home-page__actions">
                <Show
                    when=authenticated
                    fallback=|| {
                        view! {
                            <a class="btn btn--primary" href="/login">
                                "Entrar"
                            </a>
                            <a class="btn" href="/register">
                                "Criar conta"
                            </a>
                        }
                    }
                >
                    <a class="btn btn--primary" href="/dashboard">
                        "Ir para o painel"
                    </a>
                </Show>
            </div>
        </div>
    }
}
