//! Integration tests for the HTTP gateway using wiremock mock server

use lm_cli::{AdminGateway, GatewayError, HttpGateway, Session};
use lm_core::{EntityId, LicenseType, NewUser, OnlinePlan, ReportPeriod, UserUpdate};

use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(&server.uri(), Session::with_token("tok-1"))
}

#[tokio::test]
async fn test_login_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .and(body_json(json!({ "email": "admin@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "jwt-abc" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&mock_server.uri(), Session::new());
    let token = gateway.login("admin@example.com", "secret").await.unwrap();

    assert_eq!(token, "jwt-abc");
}

#[tokio::test]
async fn test_bearer_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = gateway(&mock_server).list_users().await.unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_no_header_when_signed_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&mock_server.uri(), Session::new());
    gateway.ping().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_list_users_decodes_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "email": "ana@example.com",
                "name": "Ana",
                "plan": "MONTHLY",
                "active": true,
                "createdAt": "2024-06-01T10:00:00.000Z",
                "licenses": [{ "id": 10, "type": "MONTHLY" }]
            },
            { "id": 2, "email": "bo@example.com", "active": false }
        ])))
        .mount(&mock_server)
        .await;

    let users = gateway(&mock_server).list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].plan, Some(LicenseType::Monthly));
    assert_eq!(users[0].license_count(), 1);
    assert!(!users[1].active);
}

#[tokio::test]
async fn test_toggle_accepts_wrapped_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/7/toggle-active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Estado actualizado",
            "user": { "id": 7, "email": "x@example.com", "active": false }
        })))
        .mount(&mock_server)
        .await;

    let user = gateway(&mock_server)
        .toggle_user_active(&EntityId::Number(7))
        .await
        .unwrap();

    assert_eq!(user.id, EntityId::Number(7));
    assert!(!user.active);
}

#[tokio::test]
async fn test_toggle_accepts_bare_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/7/toggle-active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "email": "x@example.com", "active": true
        })))
        .mount(&mock_server)
        .await;

    let user = gateway(&mock_server)
        .toggle_user_active(&EntityId::Number(7))
        .await
        .unwrap();

    assert!(user.active);
}

#[tokio::test]
async fn test_offline_license_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/licenses/generate-offline"))
        .and(body_json(json!({ "userId": 42, "machineId": "M-1", "type": "LOCAL" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shortCode": "ABCD-1234",
            "token": "eyJhbGciOiJSUzI1NiJ9.payload.signature"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issued = gateway(&mock_server)
        .create_offline_license(&EntityId::Number(42), "M-1")
        .await
        .unwrap();

    assert_eq!(issued.short_code.as_deref(), Some("ABCD-1234"));
}

#[tokio::test]
async fn test_online_license_payload_has_no_machine_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/licenses-online/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "online-token",
            "expiresAt": "2025-04-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issued = gateway(&mock_server)
        .create_online_license(&EntityId::Number(42), OnlinePlan::Monthly)
        .await
        .unwrap();

    assert!(issued.expires_at.is_some());
    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body, json!({ "userId": 42, "planType": "MONTHLY" }));
    assert!(body.get("machineId").is_none());
}

#[tokio::test]
async fn test_update_user_sends_null_plan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = UserUpdate {
        email: "ana@example.com".to_string(),
        name: "Ana".to_string(),
        last_name: None,
        phone: None,
        notes: None,
        plan: None,
    };
    gateway(&mock_server)
        .update_user(&EntityId::Number(5), &update)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["plan"], Value::Null);
    assert_eq!(body["name"], "Ana");
}

#[tokio::test]
async fn test_create_user_ignores_response_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let new_user = NewUser {
        email: "new@example.com".to_string(),
        name: None,
        notes: None,
    };
    let result = gateway(&mock_server).create_user(&new_user).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_renew_posts_to_user_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/licenses/renew/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway(&mock_server)
        .renew_license(&EntityId::Number(42))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_report_query_and_wire_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports"))
        .and(query_param("month", "3"))
        .and(query_param("year", "2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usersActivos": 10,
            "usersInactivos": 2,
            "licenciasActivas": 8,
            "licenciasPorVencer": 1,
            "licenciasLifetime": 3,
            "licenciasMensuales": 5
        })))
        .mount(&mock_server)
        .await;

    let stats = gateway(&mock_server)
        .get_report_stats(ReportPeriod::new(3, 2025).unwrap())
        .await
        .unwrap();

    assert_eq!(stats.active_users, 10);
    assert_eq!(stats.expiring_licenses, 1);
    assert_eq!(stats.monthly_licenses, 5);
}

#[tokio::test]
async fn test_flat_error_message_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/licenses/generate-offline"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "El usuario ya tiene una licencia LOCAL"
        })))
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server)
        .create_offline_license(&EntityId::Number(42), "M-1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.backend_message(), Some("El usuario ya tiene una licencia LOCAL"));
}

#[tokio::test]
async fn test_nested_error_message_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "NOT_FOUND", "message": "User not found" }
        })))
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server)
        .get_user(&EntityId::Number(9))
        .await
        .unwrap_err();

    assert_eq!(err.backend_message(), Some("User not found"));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_unauthorized_status_mapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/licenses"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Token expirado" })),
        )
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server).list_licenses().await.unwrap_err();

    assert!(matches!(err, GatewayError::Unauthorized { status: 401, .. }));
}

#[tokio::test]
async fn test_undecodable_body_is_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/licenses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server).list_licenses().await.unwrap_err();

    assert!(matches!(err, GatewayError::Json { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let gateway = HttpGateway::new("http://127.0.0.1:1", Session::new());

    let err = gateway.ping().await.unwrap_err();

    assert!(matches!(err, GatewayError::Http { .. }));
}
