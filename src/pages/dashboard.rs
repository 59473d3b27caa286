//! Dashboard page with shortcuts into each management section.

use leptos::prelude::*;

use crate::state::session::use_session;

struct Section {
    title: &'static str,
    description: &'static str,
    link: &'static str,
}

const SECTIONS: [Section; 5] = [
    Section {
        title: "Gerenciar Feiras",
        description: "Visualize, crie e edite as feiras disponíveis no sistema.",
        link: "/feiras",
    },
    Section {
        title: "Gerenciar Expositores",
        description: "Cadastre e gerencie expositores que participam das feiras.",
        link: "/expositores",
    },
    Section {
        title: "Gerenciar Produtos",
        description: "Cadastre e gerencie produtos dos expositores nas feiras.",
        link: "/produtos",
    },
    Section {
        title: "Meus Ingressos",
        description: "Acesse e gerencie os ingressos que você adquiriu.",
        link: "/ingressos",
    },
    Section {
        title: "Meu Perfil",
        description: "Atualize suas informações pessoais e altere sua senha.",
        link: "/perfil",
    },
];

/// Dashboard: greeting plus a card per management section.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session
            .state
            .get()
            .user
            .map(|user| format!("Bem-vindo, {}!", user.display_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{greeting}</h1>
                <p>"O que você quer gerenciar hoje?"</p>
            </header>
            <div class="dashboard-page__cards">
                {SECTIONS
                    .iter()
                    .map(|section| {
                        view! {
                            <a class="dashboard-card" href=section.link>
                                <h3>{section.title}</h3>
                                <p>{section.description}</p>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}
