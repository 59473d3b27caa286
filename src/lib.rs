//! # feira-admin
//!
//! Leptos + WASM administration console for the fairs management system
//! (feiras, expositores, produtos, ingressos), talking to a Django REST
//! backend.
//!
//! This crate contains pages, components, the session store, the HTTP
//! gateway with bearer-token attachment and refresh-on-401 recovery, and
//! the persisted token storage abstraction that backs both.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod storage;

/// WASM entry point: hydrate the server-rendered body into the live app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
