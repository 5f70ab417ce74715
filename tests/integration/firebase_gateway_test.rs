//! Hosted gateway against a mocked backend

use assert_matches::assert_matches;
use gazi_admin::egui_app::gateway::Gateway;
use gazi_admin::shared::error::GatewayError;
use gazi_admin::shared::user::Credential;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{fields, MockBackend, TEST_API_KEY};

fn auth_ok(local_id: &str, email: &str, token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "localId": local_id,
        "email": email,
        "displayName": "",
        "idToken": token,
        "refreshToken": "refresh-1",
        "expiresIn": "3600"
    }))
}

fn error_response(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": { "code": status, "message": message, "status": code }
    }))
}

fn document(id: &str, first_name: &str) -> serde_json::Value {
    json!({
        "name": format!("projects/gazi-test/databases/(default)/documents/usuarios/{}", id),
        "fields": {
            "nombre": { "stringValue": first_name },
            "apellido": { "stringValue": "Ruiz" },
            "email": { "stringValue": format!("{}@mail.com", first_name.to_lowercase()) },
            "password": { "stringValue": "abcdef" }
        },
        "createTime": "2024-01-01T00:00:00Z",
        "updateTime": "2024-01-01T00:00:00Z"
    })
}

#[test]
fn test_authenticate_returns_session() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", TEST_API_KEY))
            .and(body_partial_json(json!({
                "email": "ana@mail.com",
                "password": "abcdef",
                "returnSecureToken": true
            })))
            .respond_with(auth_ok("uid-1", "ana@mail.com", "token-1")),
    );

    let gateway = backend.gateway();
    let session = assert_ok!(gateway.authenticate(&Credential::new("ana@mail.com", "abcdef")));

    assert_eq!(session.local_id, "uid-1");
    assert_eq!(session.email, "ana@mail.com");
    assert_eq!(session.display_name, None);
    assert_eq!(gateway.session().map(|s| s.id_token), Some("token-1".to_string()));
}

#[test]
fn test_authenticate_rejected_carries_backend_message() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(error_response(400, "INVALID_ARGUMENT", "INVALID_LOGIN_CREDENTIALS")),
    );

    let gateway = backend.gateway();
    let err = gateway
        .authenticate(&Credential::new("ana@mail.com", "wrongpw"))
        .unwrap_err();

    assert_eq!(err, GatewayError::auth(Some("INVALID_LOGIN_CREDENTIALS".to_string())));
    assert_eq!(err.user_message(), "INVALID_LOGIN_CREDENTIALS");
    assert!(gateway.session().is_none());
}

#[test]
fn test_register_sets_display_name() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(auth_ok("uid-2", "new@mail.com", "token-2")),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .and(body_partial_json(json!({ "idToken": "token-2", "displayName": "Ana Ruiz" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "uid-2",
                "email": "new@mail.com",
                "displayName": "Ana Ruiz"
            }))),
    );

    let gateway = backend.gateway();
    let session = assert_ok!(gateway.register(&Credential::new("new@mail.com", "abcdef"), "Ana Ruiz"));

    assert_eq!(session.display_name.as_deref(), Some("Ana Ruiz"));
    assert_eq!(session.id_token, "token-2");
}

#[test]
fn test_register_existing_email_is_auth_error() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(error_response(400, "INVALID_ARGUMENT", "EMAIL_EXISTS")),
    );

    let gateway = backend.gateway();
    let result = gateway.register(&Credential::new("ana@mail.com", "abcdef"), "Ana Ruiz");
    assert_err!(result, GatewayError::Auth { message: Some(_) });
}

#[test]
fn test_list_records_follows_page_tokens() {
    let backend = MockBackend::start();
    let collection_path = backend.collection_path("usuarios");

    backend.mount(
        Mock::given(method("GET"))
            .and(path(collection_path.as_str()))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [document("id-3", "Carla")]
            }))),
    );
    backend.mount(
        Mock::given(method("GET"))
            .and(path(collection_path.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [document("id-1", "Ana"), document("id-2", "Bruno")],
                "nextPageToken": "page-2"
            })))
            .up_to_n_times(1),
    );

    let gateway = backend.gateway();
    let records = assert_ok!(gateway.list_records("usuarios"));

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["id-1", "id-2", "id-3"]);
    assert_eq!(records[1].fields.first_name, "Bruno");
    assert_eq!(backend.received().len(), 2);
}

#[test]
fn test_list_empty_collection() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path(backend.collection_path("usuarios").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({}))),
    );

    let records = assert_ok!(backend.gateway().list_records("usuarios"));
    assert!(records.is_empty());
}

#[test]
fn test_requests_carry_session_token() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(auth_ok("uid-1", "ana@mail.com", "token-1")),
    );
    backend.mount(
        Mock::given(method("GET"))
            .and(path(backend.collection_path("usuarios").as_str()))
            .and(header("authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] }))),
    );

    let gateway = backend.gateway();
    assert_ok!(gateway.authenticate(&Credential::new("ana@mail.com", "abcdef")));
    assert_ok!(gateway.list_records("usuarios"));
}

#[test]
fn test_create_record_returns_generated_id() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path(backend.collection_path("usuarios").as_str()))
            .and(body_partial_json(json!({
                "fields": { "nombre": { "stringValue": "Ana" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(document("gen-42", "Ana"))),
    );

    let input = fields("Ana", "Ruiz", "ana@mail.com");
    let record = assert_ok!(backend.gateway().create_record("usuarios", &input));

    assert_eq!(record.id, "gen-42");
    assert_eq!(record.fields, input);
}

#[test]
fn test_update_sends_field_mask_and_precondition() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("PATCH"))
            .and(path(format!("{}/id-1", backend.collection_path("usuarios")).as_str()))
            .and(query_param("currentDocument.exists", "true"))
            .and(query_param("updateMask.fieldPaths", "nombre"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document("id-1", "Ana"))),
    );

    let gateway = backend.gateway();
    assert_ok!(gateway.update_record("usuarios", "id-1", &fields("Ana", "Ruiz", "ana@mail.com")));
}

#[test]
fn test_update_missing_record_is_not_found() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("PATCH"))
            .respond_with(error_response(404, "NOT_FOUND", "No document to update")),
    );

    let err = backend
        .gateway()
        .update_record("usuarios", "gone", &fields("Ana", "Ruiz", "ana@mail.com"))
        .unwrap_err();
    assert_eq!(err, GatewayError::not_found("gone"));
}

#[test]
fn test_delete_failed_precondition_is_not_found() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("DELETE"))
            .and(path(format!("{}/gone", backend.collection_path("usuarios")).as_str()))
            .respond_with(error_response(400, "FAILED_PRECONDITION", "no entity to delete")),
    );

    let err = backend.gateway().delete_record("usuarios", "gone").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_delete_existing_record() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("DELETE"))
            .and(path(format!("{}/id-1", backend.collection_path("usuarios")).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({}))),
    );

    assert_ok!(backend.gateway().delete_record("usuarios", "id-1"));
}

#[test]
fn test_server_error_is_transient() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .respond_with(error_response(503, "UNAVAILABLE", "backend down")),
    );

    let err = backend.gateway().list_records("usuarios").unwrap_err();
    assert_matches!(err, GatewayError::Transient { .. });
}

#[test]
fn test_permission_denied_is_auth_error() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("DELETE"))
            .respond_with(error_response(403, "PERMISSION_DENIED", "Missing or insufficient permissions.")),
    );

    let err = backend.gateway().delete_record("usuarios", "id-1").unwrap_err();
    assert_matches!(err, GatewayError::Auth { .. });
}

#[test]
fn test_unreachable_backend_is_transient() {
    let config = gazi_admin::shared::config::AppConfig::builder()
        .api_key("k")
        .project_id("p")
        .auth_url("http://127.0.0.1:9")
        .firestore_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    let gateway = gazi_admin::egui_app::gateway::FirebaseGateway::new(config).unwrap();

    let err = gateway.list_records("usuarios").unwrap_err();
    assert_matches!(err, GatewayError::Transient { .. });
}

#[test]
fn test_malformed_payload_is_transient_serialization_error() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path(backend.collection_path("usuarios").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json")),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "ana@mail.com" }))),
    );

    let gateway = backend.gateway();
    let err = gateway.list_records("usuarios").unwrap_err();
    assert_matches!(&err, GatewayError::Transient { message } if message.starts_with("Serialization error"));

    let err = gateway
        .authenticate(&Credential::new("ana@mail.com", "abcdef"))
        .unwrap_err();
    assert_matches!(err, GatewayError::Transient { .. });
    assert!(gateway.session().is_none());
}

#[test]
fn test_delete_missing_record_message_is_neutral() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("DELETE"))
            .respond_with(error_response(404, "NOT_FOUND", "no entity to delete")),
    );

    let err = backend.gateway().delete_record("usuarios", "gone").unwrap_err();
    assert_eq!(err.user_message(), "Record not found: gone");
}
