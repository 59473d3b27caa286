//! Route guard for the private subtree.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session;

/// Renders its children only for an authenticated session; otherwise
/// performs a client-side redirect to `/login`, replacing the history
/// entry so back-navigation does not return to the guarded page.
///
/// Stateless: re-evaluated on every navigation into the subtree. While the
/// startup restore is still pending nothing is rendered and no redirect is
/// issued.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let status = Memo::new(move |_| {
        let state = session.state.get();
        (state.loading, state.is_authenticated())
    });

    Effect::new(move || {
        if let (false, false) = status.get() {
            navigate(
                "/login",
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    view! {
        <Show when=move || matches!(status.get(), (false, true)) fallback=|| ()>
            {children()}
        </Show>
    }
}
