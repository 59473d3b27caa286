use super::*;
use serde_json::json;

// =============================================================
// list_results: paginated vs bare-array bodies
// =============================================================

#[test]
fn list_results_unwraps_paginated_envelope() {
    let body = json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {"id": "f-1", "nome": "Feira A", "descricao": "", "data_inicio": "2026-01-01",
             "data_termino": "2026-01-03", "local": "Centro", "cidade": "Recife",
             "estado": "PE", "preco_ingresso": "10.00"},
            {"id": "f-2", "nome": "Feira B", "descricao": "", "data_inicio": "2026-02-01",
             "data_termino": "2026-02-02", "local": "Parque", "cidade": "Natal",
             "estado": "RN", "preco_ingresso": "25.50"}
        ]
    });

    let feiras: Vec<Feira> = list_results(body).expect("decoded page");
    assert_eq!(feiras.len(), 2);
    assert_eq!(feiras[0].nome, "Feira A");
    assert_eq!(feiras[1].preco_ingresso, "25.50");
}

#[test]
fn list_results_accepts_bare_array() {
    let body = json!([
        {"id": "e-1", "nome": "Banca do Zé", "descricao": "", "contato": "ze@example.com",
         "feira": "f-1", "feira_nome": "Feira A"}
    ]);

    let expositores: Vec<Expositor> = list_results(body).expect("decoded array");
    assert_eq!(expositores.len(), 1);
    assert_eq!(expositores[0].feira_nome.as_deref(), Some("Feira A"));
}

#[test]
fn list_results_rejects_mismatched_shape() {
    let body = json!({"results": [{"id": 1}]});
    let result: Result<Vec<Feira>, ApiError> = list_results(body);
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

// =============================================================
// Envelope decoding
// =============================================================

#[test]
fn login_response_tolerates_missing_pieces() {
    let full: LoginResponse = serde_json::from_value(json!({
        "message": "Login realizado com sucesso!",
        "user": {"id": 7, "username": "ana"},
        "tokens": {"access": "A1", "refresh": "R1"}
    }))
    .expect("full envelope");
    assert_eq!(full.tokens.as_ref().map(|t| t.access.as_str()), Some("A1"));
    assert_eq!(full.user.as_ref().map(|u| u.id), Some(7));

    let partial: LoginResponse =
        serde_json::from_value(json!({"message": "ok"})).expect("partial envelope");
    assert_eq!(partial.user, None);
    assert_eq!(partial.tokens, None);
}

#[test]
fn user_profile_display_name_falls_back_to_username() {
    let named: UserProfile = serde_json::from_value(json!({
        "id": 1, "username": "ana", "first_name": "Ana"
    }))
    .expect("profile");
    assert_eq!(named.display_name(), "Ana");

    let bare: UserProfile =
        serde_json::from_value(json!({"id": 2, "username": "bruno"})).expect("profile");
    assert_eq!(bare.display_name(), "bruno");
}
