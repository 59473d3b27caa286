use super::*;
use crate::net::gateway::{ApiRequest, ApiResponse};
use crate::storage::MemoryStorage;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use serde_json::json;
use std::collections::VecDeque;

/// Scripted auth transport: answers each request from a queue and records
/// what was sent.
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

fn session(
    responses: Vec<Result<ApiResponse, ApiError>>,
) -> (Session, Rc<MemoryStorage>, Rc<FakeTransport>) {
    let storage = Rc::new(MemoryStorage::new());
    let transport = Rc::new(FakeTransport::new(responses));
    let session = Session::new(
        Rc::clone(&storage) as Rc<dyn KeyValueStorage>,
        Rc::clone(&transport) as Rc<dyn Transport>,
    );
    (session, storage, transport)
}

fn login_ok() -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse {
        status: 200,
        body: json!({
            "message": "Login realizado com sucesso!",
            "user": {"id": 7, "username": "ana", "email": "ana@example.com",
                     "first_name": "Ana", "last_name": "Souza"},
            "tokens": {"access": "A1", "refresh": "R1"}
        }),
    })
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_rebuilds_session_from_persisted_state() {
    let (session, storage, transport) = session(vec![]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(USER_DATA_KEY, r#"{"id": 7, "username": "ana"}"#);

    session.restore();

    assert!(session.is_authenticated());
    assert_eq!(session.current_user().map(|u| u.username), Some("ana".to_owned()));
    // Restore never goes to the network.
    assert!(transport.sent().is_empty());
}

#[test]
fn restore_with_unparsable_user_data_purges_all_keys() {
    let (session, storage, _) = session(vec![]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");
    storage.set(USER_DATA_KEY, "not json");

    session.restore();

    assert!(!session.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), None);
}

#[test]
fn restore_with_token_but_no_user_data_purges_all_keys() {
    let (session, storage, _) = session(vec![]);
    storage.set(ACCESS_TOKEN_KEY, "A1");
    storage.set(REFRESH_TOKEN_KEY, "R1");

    session.restore();

    assert!(!session.is_authenticated());
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
}

#[test]
fn restore_without_access_token_leaves_storage_untouched() {
    let (session, storage, _) = session(vec![]);
    storage.set(USER_DATA_KEY, r#"{"id": 7, "username": "ana"}"#);

    session.restore();

    assert!(!session.is_authenticated());
    assert_eq!(session.current_user(), None);
    assert_eq!(
        storage.get(USER_DATA_KEY),
        Some(r#"{"id": 7, "username": "ana"}"#.to_owned())
    );
}

// =============================================================
// login
// =============================================================

#[test]
fn login_persists_tokens_and_identity_together() {
    let (session, storage, transport) = session(vec![login_ok()]);

    let response = block_on(session.login("ana", "secret")).expect("login ok");
    assert_eq!(response.tokens.map(|t| t.access), Some("A1".to_owned()));

    assert!(session.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("A1".to_owned()));
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), Some("R1".to_owned()));
    let persisted: UserProfile =
        serde_json::from_str(&storage.get(USER_DATA_KEY).expect("user data")).expect("parses");
    assert_eq!(persisted.id, 7);
    assert_eq!(persisted.username, "ana");

    let sent = transport.sent();
    assert_eq!(sent[0].path, "auth/login/");
    assert_eq!(
        sent[0].body,
        Some(json!({"username": "ana", "password": "secret"}))
    );
}

#[test]
fn login_without_tokens_persists_nothing() {
    let (session, storage, _) = session(vec![Ok(ApiResponse {
        status: 200,
        body: json!({"message": "ok", "user": {"id": 7, "username": "ana"}}),
    })]);

    let response = block_on(session.login("ana", "secret")).expect("call resolves");
    assert_eq!(response.message.as_deref(), Some("ok"));

    assert!(!session.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), None);
}

#[test]
fn login_without_identity_persists_nothing() {
    let (session, storage, _) = session(vec![Ok(ApiResponse {
        status: 200,
        body: json!({"tokens": {"access": "A1", "refresh": "R1"}}),
    })]);

    block_on(session.login("ana", "secret")).expect("call resolves");

    assert!(!session.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn login_failure_propagates_and_stays_unauthenticated() {
    let (session, storage, _) = session(vec![Err(ApiError::Status {
        status: 400,
        body: json!({"detail": "Credenciais inválidas."}),
    })]);

    let err = block_on(session.login("ana", "wrong")).expect_err("rejected");
    assert_eq!(error_message(&err), "Credenciais inválidas.");

    assert!(!session.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_session_even_when_remote_call_fails() {
    let (session, storage, _) = session(vec![
        login_ok(),
        Err(ApiError::Network("connection refused".to_owned())),
    ]);
    block_on(session.login("ana", "secret")).expect("login ok");

    block_on(session.logout());

    assert!(!session.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), None);
}

#[test]
fn logout_sends_refresh_token_to_blacklist() {
    let (session, _, transport) = session(vec![
        login_ok(),
        Ok(ApiResponse {
            status: 205,
            body: json!({"message": "Logout realizado com sucesso!"}),
        }),
    ]);
    block_on(session.login("ana", "secret")).expect("login ok");

    block_on(session.logout());

    let sent = transport.sent();
    assert_eq!(sent[1].path, "auth/logout/");
    assert_eq!(sent[1].body, Some(json!({"refresh": "R1"})));
}

#[test]
fn logout_without_refresh_token_skips_remote_call() {
    let (session, _, transport) = session(vec![]);

    block_on(session.logout());

    assert!(transport.sent().is_empty());
}

// =============================================================
// SessionState
// =============================================================

#[test]
fn session_state_default_is_loading_and_unauthenticated() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn session_state_authenticated_iff_user_present() {
    let user: UserProfile =
        serde_json::from_value(json!({"id": 7, "username": "ana"})).expect("profile");
    let state = SessionState {
        user: Some(user),
        loading: false,
    };
    assert!(state.is_authenticated());
}
