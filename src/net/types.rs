//! Wire types for the fairs REST API.
//!
//! Shapes mirror the Django serializers: UUID ids and decimal prices travel
//! as strings, list endpoints nest the `criado_por` user, and the auth
//! endpoints wrap tokens and profile in envelope objects. The login
//! envelope is deliberately lenient: missing pieces deserialize to `None`
//! so the session store can reject partial responses without failing the
//! whole call.

use serde::{Deserialize, Serialize};

/// Authenticated user profile ("identity").
///
/// `date_joined` only appears on the profile endpoint, not in the login
/// envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<String>,
}

impl UserProfile {
    /// Preferred display name: first name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

/// Access/refresh token pair issued by login and register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Envelope returned by `auth/login/` and `auth/register/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub tokens: Option<TokenPair>,
}

/// Registration payload for `auth/register/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

/// Payload for `auth/change-password/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// A fair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feira {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub data_inicio: String,
    pub data_termino: String,
    pub local: String,
    pub cidade: String,
    pub estado: String,
    pub preco_ingresso: String,
    #[serde(default)]
    pub criado_por: Option<UserProfile>,
}

/// Create/update payload for fairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeiraForm {
    pub nome: String,
    pub descricao: String,
    pub data_inicio: String,
    pub data_termino: String,
    pub local: String,
    pub cidade: String,
    pub estado: String,
    pub preco_ingresso: String,
}

/// An exhibitor, linked to a fair by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expositor {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub contato: String,
    pub feira: String,
    #[serde(default)]
    pub feira_nome: Option<String>,
    #[serde(default)]
    pub criado_por: Option<UserProfile>,
}

/// Create/update payload for exhibitors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExpositorForm {
    pub nome: String,
    pub descricao: String,
    pub contato: String,
    pub feira: String,
}

/// A product offered by an exhibitor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub preco: String,
    pub expositor: String,
    #[serde(default)]
    pub expositor_nome: Option<String>,
    #[serde(default)]
    pub feira_nome: Option<String>,
    #[serde(default)]
    pub criado_por: Option<UserProfile>,
}

/// Create/update payload for products.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProdutoForm {
    pub nome: String,
    pub descricao: String,
    pub preco: String,
    pub expositor: String,
}

/// A ticket for a fair. The ticket number is generated server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingresso {
    pub id: String,
    pub numero_ingresso: String,
    pub feira: String,
    #[serde(default)]
    pub feira_nome: Option<String>,
    #[serde(default)]
    pub preco: Option<String>,
    #[serde(default)]
    pub data_emissao: Option<String>,
    #[serde(default)]
    pub criado_por: Option<UserProfile>,
}

/// Create payload for tickets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngressoForm {
    pub feira: String,
}

/// DRF page envelope for list endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    pub results: Vec<T>,
}
