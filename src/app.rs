//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

use crate::components::guard::RequireAuth;
use crate::components::navbar::Navbar;
use crate::net::gateway::{Gateway, Transport, redirect_to_login};
use crate::pages::{
    dashboard::DashboardPage, expositores::ExpositoresPage, feiras::FeirasPage, home::HomePage,
    ingressos::IngressosPage, login::LoginPage, perfil::PerfilPage, produtos::ProdutosPage,
    register::RegisterPage,
};
use crate::state::session::{Session, SessionContext};
use crate::storage::KeyValueStorage;

/// Gateway handle provided via context; the gateway itself is
/// single-threaded, so it lives in a local-storage arena slot.
#[derive(Clone, Copy)]
pub struct GatewayContext(StoredValue<Rc<Gateway>, LocalStorage>);

impl GatewayContext {
    #[must_use]
    pub fn get(&self) -> Rc<Gateway> {
        self.0.get_value()
    }
}

/// Get the gateway handle. Panics outside the provider.
#[must_use]
pub fn use_gateway() -> GatewayContext {
    expect_context::<GatewayContext>()
}

/// Raw transport handle, used by the public auth pages (register) that
/// must not go through the gateway pipeline.
#[derive(Clone, Copy)]
pub struct TransportContext(StoredValue<Rc<dyn Transport>, LocalStorage>);

impl TransportContext {
    #[must_use]
    pub fn get(&self) -> Rc<dyn Transport> {
        self.0.get_value()
    }
}

/// Get the raw transport handle. Panics outside the provider.
#[must_use]
pub fn use_transport() -> TransportContext {
    expect_context::<TransportContext>()
}

fn platform_storage() -> Rc<dyn KeyValueStorage> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(crate::storage::BrowserStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Rc::new(crate::storage::MemoryStorage::new())
    }
}

fn platform_transport() -> Rc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(crate::net::gateway::GlooTransport::new())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Rc::new(NullTransport)
    }
}

/// Server-side transport stub: the console only talks to the API from the
/// browser, so every server-rendered call short-circuits.
#[cfg(not(feature = "hydrate"))]
struct NullTransport;

#[cfg(not(feature = "hydrate"))]
impl Transport for NullTransport {
    fn send(
        &self,
        _request: crate::net::gateway::ApiRequest,
    ) -> futures::future::LocalBoxFuture<
        '_,
        Result<crate::net::gateway::ApiResponse, crate::net::gateway::ApiError>,
    > {
        Box::pin(futures::future::ready(Err(
            crate::net::gateway::ApiError::Network("not available on server".to_owned()),
        )))
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the storage/transport/gateway/session stack for the current
/// platform, provides it via context, restores the persisted session
/// once on mount, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let storage = platform_storage();
    let transport = platform_transport();
    let gateway = Rc::new(Gateway::new(
        Rc::clone(&transport),
        Rc::clone(&storage),
        Rc::new(redirect_to_login),
    ));
    let session = SessionContext::new(Rc::new(Session::new(storage, Rc::clone(&transport))));

    provide_context(session);
    provide_context(GatewayContext(StoredValue::new_local(gateway)));
    provide_context(TransportContext(StoredValue::new_local(transport)));

    // Restore the persisted session once, client-side.
    Effect::new(move || {
        session.restore();
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/feira-admin.css"/>
        <Title text="Feira Virtual"/>

        <Router>
            <Chrome/>
            <main class="container">
                <Routes fallback=|| "Página não encontrada.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("feiras")
                        view=|| view! { <RequireAuth><FeirasPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("expositores")
                        view=|| view! { <RequireAuth><ExpositoresPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("produtos")
                        view=|| view! { <RequireAuth><ProdutosPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("ingressos")
                        view=|| view! { <RequireAuth><IngressosPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("perfil")
                        view=|| view! { <RequireAuth><PerfilPage/></RequireAuth> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Navbar wrapper: hidden on the landing page, shown everywhere else.
#[component]
fn Chrome() -> impl IntoView {
    let location = use_location();
    let show_navbar = move || location.pathname.get() != "/";

    view! {
        <Show when=show_navbar fallback=|| ()>
            <Navbar/>
        </Show>
    }
}
