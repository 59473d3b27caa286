use super::*;
use crate::storage::{MemoryStorage, USER_DATA_KEY};
use futures::executor::block_on;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Scripted transport: answers each request from a queue and records what
/// was sent.
struct FakeTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl FakeTransport {
    fn new(responses: Vec<Result<ApiResponse, ApiError>>) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            responses: RefCell::new(responses.into()),
        }
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        self.requests.borrow_mut().push(request);
        let result = self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("transport called more times than scripted");
        Box::pin(futures::future::ready(result))
    }
}

fn ok(body: serde_json::Value) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse { status: 200, body })
}

fn unauthorized() -> Result<ApiResponse, ApiError> {
    Err(ApiError::Status {
        status: 401,
        body: json!({"detail": "Token expirado."}),
    })
}

#[allow(clippy::type_complexity)]
fn gateway(
    responses: Vec<Result<ApiResponse, ApiError>>,
) -> (Gateway, Rc<FakeTransport>, Rc<MemoryStorage>, Rc<Cell<bool>>) {
    let transport = Rc::new(FakeTransport::new(responses));
    let storage = Rc::new(MemoryStorage::new());
    let expired = Rc::new(Cell::new(false));
    let expired_flag = Rc::clone(&expired);
    let gw = Gateway::new(
        Rc::clone(&transport) as Rc<dyn Transport>,
        Rc::clone(&storage) as Rc<dyn KeyValueStorage>,
        Rc::new(move || expired_flag.set(true)),
    );
    (gw, transport, storage, expired)
}

// =============================================================
// Request phase: bearer attachment
// =============================================================

#[test]
fn attaches_bearer_token_from_storage() {
    let (gw, transport, storage, _) = gateway(vec![ok(json!({}))]);
    storage.set(ACCESS_TOKEN_KEY, "A1");

    block_on(gw.send(ApiRequest::new(Method::Get, "api/feiras/"))).expect("ok");

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("A1"));
}

#[test]
fn sends_unauthenticated_when_no_token_persisted() {
    let (gw, transport, _, _) = gateway(vec![ok(json!({}))]);

    block_on(gw.send(ApiRequest::new(Method::Get, "api/feiras/"))).expect("ok");

    assert_eq!(transport.sent()[0].bearer, None);
}

// =============================================================
// Refresh-once recovery
// =============================================================

#[test]
fn refresh_once_retries_with_new_token() {
    let (gw, transport, storage, expired) = gateway(vec![
        unauthorized(),
        ok(json!({"access": "A2"})),
        ok(json!({"results": []})),
    ]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");

    let response =
        block_on(gw.send(ApiRequest::new(Method::Get, "api/feiras/"))).expect("retried ok");
    assert_eq!(response.body, json!({"results": []}));

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    // Refresh call goes to the token endpoint, outside the bearer pipeline.
    assert_eq!(sent[1].path, "auth/token/refresh/");
    assert_eq!(sent[1].body, Some(json!({"refresh": "R1"})));
    assert_eq!(sent[1].bearer, None);
    // The retried request carries the refreshed token exactly once.
    assert_eq!(sent[2].path, "api/feiras/");
    assert_eq!(sent[2].bearer.as_deref(), Some("A2"));
    assert!(sent[2].retried);

    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("A2".to_owned()));
    assert!(!expired.get());
}

#[test]
fn missing_refresh_token_propagates_original_401() {
    let (gw, transport, storage, expired) = gateway(vec![unauthorized()]);
    storage.set(ACCESS_TOKEN_KEY, "A1");

    let err = block_on(gw.send(ApiRequest::new(Method::Get, "api/produtos/")))
        .expect_err("401 propagates");
    assert!(err.is_unauthorized());

    // No refresh call was attempted.
    assert_eq!(transport.sent().len(), 1);
    assert!(!expired.get());
}

#[test]
fn refresh_failure_clears_tokens_and_forces_login() {
    let refresh_err = ApiError::Status {
        status: 401,
        body: json!({"detail": "Token inválido."}),
    };
    let (gw, transport, storage, expired) =
        gateway(vec![unauthorized(), Err(refresh_err.clone())]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");
    storage.set(USER_DATA_KEY, "{}");

    let err = block_on(gw.send(ApiRequest::new(Method::Get, "api/produtos/")))
        .expect_err("refresh error propagates");
    assert_eq!(err, refresh_err);

    assert_eq!(transport.sent().len(), 2);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    assert!(expired.get());
}

#[test]
fn second_401_on_retried_request_is_not_retried_again() {
    let (gw, transport, storage, _) = gateway(vec![
        unauthorized(),
        ok(json!({"access": "A2"})),
        unauthorized(),
    ]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");

    let err = block_on(gw.send(ApiRequest::new(Method::Get, "api/feiras/")))
        .expect_err("second 401 propagates");
    assert!(err.is_unauthorized());

    // Initial call, one refresh, one retry. Nothing after that.
    assert_eq!(transport.sent().len(), 3);
}

#[test]
fn non_authorization_errors_pass_through_unmodified() {
    let server_err = ApiError::Status {
        status: 500,
        body: json!({"error": "boom"}),
    };
    let (gw, transport, storage, expired) = gateway(vec![Err(server_err.clone())]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");

    let err = block_on(gw.send(ApiRequest::new(Method::Post, "api/ingressos/")))
        .expect_err("500 propagates");
    assert_eq!(err, server_err);

    assert_eq!(transport.sent().len(), 1);
    assert!(!expired.get());
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), Some("R1".to_owned()));
}

#[test]
fn refresh_response_without_access_token_is_a_decode_error() {
    let (gw, _, storage, expired) = gateway(vec![unauthorized(), ok(json!({}))]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");

    let err = block_on(gw.send(ApiRequest::new(Method::Get, "api/feiras/")))
        .expect_err("bad refresh body");
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(expired.get());
}

// =============================================================
// Typed helpers
// =============================================================

#[test]
fn get_decodes_typed_body() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Ping {
        pong: bool,
    }

    let (gw, _, _, _) = gateway(vec![ok(json!({"pong": true}))]);
    let ping: Ping = block_on(gw.get("api/ping/")).expect("decoded");
    assert_eq!(ping, Ping { pong: true });
}

#[test]
fn delete_discards_empty_body() {
    let (gw, transport, _, _) = gateway(vec![Ok(ApiResponse {
        status: 204,
        body: serde_json::Value::Null,
    })]);
    block_on(gw.delete("api/feiras/f-1/")).expect("deleted");
    assert_eq!(transport.sent()[0].method, Method::Delete);
}

// =============================================================
// Error message extraction
// =============================================================

#[test]
fn error_message_prefers_detail_then_message_then_error() {
    let err = ApiError::Status {
        status: 400,
        body: json!({"detail": "d", "message": "m", "error": "e"}),
    };
    assert_eq!(error_message(&err), "d");

    let err = ApiError::Status {
        status: 400,
        body: json!({"message": "m", "error": "e"}),
    };
    assert_eq!(error_message(&err), "m");

    let err = ApiError::Status {
        status: 400,
        body: json!({"error": "e"}),
    };
    assert_eq!(error_message(&err), "e");
}

#[test]
fn error_message_falls_back_to_generic_rendering() {
    let err = ApiError::Status {
        status: 503,
        body: serde_json::Value::Null,
    };
    assert_eq!(error_message(&err), "HTTP 503");

    let err = ApiError::Network("timeout".to_owned());
    assert_eq!(error_message(&err), "network error: timeout");
}
