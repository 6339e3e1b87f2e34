//! HTTP transport against a mock server.
//!
//! Covers what the real wire adds over the catalog: URL resolution under the
//! API root, headers as sent, status and body handling.

use serde_json::json;
use ticketweb_client::{ApiClient, ClientConfig, ClientError, Endpoint, HttpTransport};
use ticketweb_proto::{NewCompany, QueryParams};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn client(server: &MockServer, token: Option<&str>) -> ApiClient<HttpTransport> {
    let config = ClientConfig::new(format!("{}/api", server.uri()))
        .with_token(token.map(str::to_owned))
        .with_oauth_client(Some("app".into()), None);
    let transport = HttpTransport::new(&config).unwrap();
    ApiClient::new(config, transport)
}

#[tokio::test]
async fn authenticated_list_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies/"))
        .and(header("Authorization", "Bearer tok"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Phuong Trang"},
            {"id": 2, "name": "Thanh Buoi"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let companies = client(&server, Some("tok")).companies().await.unwrap();

    let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Phuong Trang", "Thanh Buoi"]);
}

#[tokio::test]
async fn login_goes_out_without_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/o/token/"))
        .and(body_json(json!({
            "grant_type": "password",
            "username": "lan",
            "password": "secret",
            "client_id": "app"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "fresh", "token_type": "Bearer"})),
        )
        .mount(&server)
        .await;

    let token = client(&server, Some("stale")).login("lan", "secret").await.unwrap();
    assert_eq!(token.access_token, "fresh");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn logged_out_request_has_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/routes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client(&server, None).routes().await.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn rejection_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/companies/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"name": ["required"]})))
        .mount(&server)
        .await;

    let err = client(&server, Some("tok")).add_company(&NewCompany::default()).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    let ClientError::Status { body, .. } = err else {
        panic!("expected a status error");
    };
    assert!(body.contains("required"));
}

#[tokio::test]
async fn unauthorized_is_reported_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server, Some("expired")).profile().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/change-password/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let reply = client(&server, Some("tok"))
        .call(Endpoint::ChangePassword(json!({"current_password": "a"})))
        .await
        .unwrap();
    assert_eq!(reply, serde_json::Value::Null);
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/promotions/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server, Some("tok")).promotions().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn list_filters_reach_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedules/"))
        .and(query_param("route", "3"))
        .and(query_param("status", "scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"id": 12, "status": "scheduled"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = QueryParams::new().with("route", 3).with("status", "scheduled");
    let schedules = client(&server, Some("tok")).schedules(&query).await.unwrap();

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].id, 12);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = ClientConfig::new(format!("http://127.0.0.1:{port}/api/"));
    let client = ApiClient::new(config.clone(), HttpTransport::new(&config).unwrap());

    let err = client.companies().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn promotion_code_stays_in_its_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/promotions/TET.25/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client(&server, Some("tok"));

    assert_eq!(client.check_promotion("TET.25").await.unwrap(), json!({"valid": true}));

    for code in ["..", "."] {
        let err = client.check_promotion(code).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }), "{code}: {err:?}");
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
