//! Page components, one module per route.

pub mod dashboard;
pub mod expositores;
pub mod feiras;
pub mod home;
pub mod ingressos;
pub mod login;
pub mod perfil;
pub mod produtos;
pub mod register;

/// Native confirm dialog. Requires a browser environment; answers "no"
/// elsewhere.
pub(crate) fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}
