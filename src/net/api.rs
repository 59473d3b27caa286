//! REST service calls for auth and the four domain entities.
//!
//! Auth entry points (`register`, `login`, `logout`) go through the raw
//! [`Transport`] so they never trigger the gateway's refresh path. Every
//! other call goes through the [`Gateway`] and gets bearer attachment and
//! refresh-on-401 for free.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::net::gateway::{ApiError, ApiRequest, Gateway, Method, Transport};
use crate::net::types::{
    ChangePasswordForm, Expositor, ExpositorForm, Feira, FeiraForm, Ingresso, IngressoForm,
    LoginResponse, Page, Produto, ProdutoForm, RegistrationForm, UserProfile,
};

/// Profile update payload; id, username, and join date are read-only
/// server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProfileForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Envelope returned by the profile update endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
}

/// Decode a list body that may arrive paginated or as a bare array.
fn list_results<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    if body.get("results").is_some() {
        serde_json::from_value::<Page<T>>(body).map(|page| page.results)
    } else {
        serde_json::from_value::<Vec<T>>(body)
    }
    .map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================
// Auth (raw transport)
// =============================================================

/// Create a new account via `auth/register/`.
///
/// # Errors
///
/// Propagates transport and status errors (field validation arrives as a
/// 400 with a structured body).
pub async fn register(
    transport: &dyn Transport,
    form: &RegistrationForm,
) -> Result<LoginResponse, ApiError> {
    let body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
    transport
        .send(ApiRequest::new(Method::Post, "auth/register/").with_body(body))
        .await?
        .json()
}

/// Exchange credentials for tokens and a profile via `auth/login/`.
///
/// # Errors
///
/// Invalid credentials arrive as a 400 status error.
pub async fn login(
    transport: &dyn Transport,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    transport
        .send(
            ApiRequest::new(Method::Post, "auth/login/")
                .with_body(json!({ "username": username, "password": password })),
        )
        .await?
        .json()
}

/// Blacklist the refresh token via `auth/logout/`.
///
/// # Errors
///
/// Propagates transport and status errors; callers treat them as
/// non-fatal.
pub async fn logout(transport: &dyn Transport, refresh_token: &str) -> Result<(), ApiError> {
    transport
        .send(
            ApiRequest::new(Method::Post, "auth/logout/")
                .with_body(json!({ "refresh": refresh_token })),
        )
        .await?;
    Ok(())
}

// =============================================================
// Auth (gateway)
// =============================================================

/// Fetch the authenticated user's profile.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn get_profile(gw: &Gateway) -> Result<UserProfile, ApiError> {
    gw.get("auth/profile/").await
}

/// Update the authenticated user's profile.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn update_profile(
    gw: &Gateway,
    form: &ProfileForm,
) -> Result<ProfileUpdateResponse, ApiError> {
    gw.put("auth/profile/", form).await
}

/// Change the authenticated user's password.
///
/// # Errors
///
/// Propagates gateway errors (wrong current password arrives as a 400).
pub async fn change_password(gw: &Gateway, form: &ChangePasswordForm) -> Result<(), ApiError> {
    gw.send(
        ApiRequest::new(Method::Post, "auth/change-password/").with_body(
            serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?,
        ),
    )
    .await?;
    Ok(())
}

// =============================================================
// Feiras
// =============================================================

/// List all fairs.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_feiras(gw: &Gateway) -> Result<Vec<Feira>, ApiError> {
    list_results(gw.get_raw("api/feiras/").await?)
}

/// Fetch one fair by id.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_feira(gw: &Gateway, id: &str) -> Result<Feira, ApiError> {
    gw.get(&format!("api/feiras/{id}/")).await
}

/// Create a fair.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn create_feira(gw: &Gateway, form: &FeiraForm) -> Result<Feira, ApiError> {
    gw.post("api/feiras/", form).await
}

/// Update a fair.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn update_feira(gw: &Gateway, id: &str, form: &FeiraForm) -> Result<Feira, ApiError> {
    gw.put(&format!("api/feiras/{id}/"), form).await
}

/// Delete a fair.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn delete_feira(gw: &Gateway, id: &str) -> Result<(), ApiError> {
    gw.delete(&format!("api/feiras/{id}/")).await
}

/// List the exhibitors registered at a fair.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_feira_expositores(gw: &Gateway, id: &str) -> Result<Vec<Expositor>, ApiError> {
    list_results(gw.get_raw(&format!("api/feiras/{id}/expositores/")).await?)
}

// =============================================================
// Expositores
// =============================================================

/// List all exhibitors.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_expositores(gw: &Gateway) -> Result<Vec<Expositor>, ApiError> {
    list_results(gw.get_raw("api/expositores/").await?)
}

/// Create an exhibitor.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn create_expositor(gw: &Gateway, form: &ExpositorForm) -> Result<Expositor, ApiError> {
    gw.post("api/expositores/", form).await
}

/// Update an exhibitor.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn update_expositor(
    gw: &Gateway,
    id: &str,
    form: &ExpositorForm,
) -> Result<Expositor, ApiError> {
    gw.put(&format!("api/expositores/{id}/"), form).await
}

/// Delete an exhibitor.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn delete_expositor(gw: &Gateway, id: &str) -> Result<(), ApiError> {
    gw.delete(&format!("api/expositores/{id}/")).await
}

/// List the products offered by an exhibitor.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_expositor_produtos(gw: &Gateway, id: &str) -> Result<Vec<Produto>, ApiError> {
    list_results(
        gw.get_raw(&format!("api/expositores/{id}/produtos/"))
            .await?,
    )
}

// =============================================================
// Produtos
// =============================================================

/// List all products.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_produtos(gw: &Gateway) -> Result<Vec<Produto>, ApiError> {
    list_results(gw.get_raw("api/produtos/").await?)
}

/// Create a product.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn create_produto(gw: &Gateway, form: &ProdutoForm) -> Result<Produto, ApiError> {
    gw.post("api/produtos/", form).await
}

/// Update a product.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn update_produto(
    gw: &Gateway,
    id: &str,
    form: &ProdutoForm,
) -> Result<Produto, ApiError> {
    gw.put(&format!("api/produtos/{id}/"), form).await
}

/// Delete a product.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn delete_produto(gw: &Gateway, id: &str) -> Result<(), ApiError> {
    gw.delete(&format!("api/produtos/{id}/")).await
}

// =============================================================
// Ingressos
// =============================================================

/// List the user's tickets.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn fetch_ingressos(gw: &Gateway) -> Result<Vec<Ingresso>, ApiError> {
    list_results(gw.get_raw("api/ingressos/").await?)
}

/// Buy a ticket for a fair; the ticket number is generated server-side.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn create_ingresso(gw: &Gateway, form: &IngressoForm) -> Result<Ingresso, ApiError> {
    gw.post("api/ingressos/", form).await
}

/// Delete a ticket.
///
/// # Errors
///
/// Propagates gateway errors.
pub async fn delete_ingresso(gw: &Gateway, id: &str) -> Result<(), ApiError> {
    gw.delete(&format!("api/ingressos/{id}/")).await
}
