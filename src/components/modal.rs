//! Modal dialog wrapper used by the CRUD pages.

use leptos::prelude::*;

/// Overlay + dialog box with a title bar and close button. The caller owns
/// the open/closed signal and renders the body as children.
#[component]
pub fn Modal(title: String, on_close: Callback<()>, children: Children) -> impl IntoView {
    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <header class="modal__header">
                    <h2>{title}</h2>
                    <button class="modal__close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </header>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
