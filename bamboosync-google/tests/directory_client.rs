//! Directory client behaviour against a wiremock server.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bamboosync_core::{
    Directory, DirectoryError, EmployeeId, ExternalId, UserBody, UserQuery,
};
use bamboosync_google::{DirectoryClient, StaticToken};

fn client(server: &MockServer) -> DirectoryClient {
    DirectoryClient::with_base_url(server.uri(), Box::new(StaticToken::new("tok")))
}

#[tokio::test(flavor = "multi_thread")]
async fn list_users_sends_external_id_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("Authorization", "Bearer tok"))
        .and(query_param("customer", "my_customer"))
        .and(query_param("query", "externalId=42"))
        .and(query_param("maxResults", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "admin#directory#users",
            "users": [{
                "id": "1077",
                "primaryEmail": "a@co.com",
                "externalIds": [{"value": "42", "type": "organization"}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let users = tokio::task::spawn_blocking(move || {
        client.list_users(&UserQuery::by_external_id(&EmployeeId::from("42")))
    })
    .await
    .expect("join")
    .expect("list");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "1077");
    assert_eq!(users[0].correlation_id(), Some("42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_users_without_matches_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "admin#directory#users"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let users = tokio::task::spawn_blocking(move || {
        client.list_users(&UserQuery::by_external_id(&EmployeeId::from("99")))
    })
    .await
    .expect("join")
    .expect("list");
    assert!(users.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_user_puts_body_to_user_key() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/a%40co.com"))
        .and(body_json(json!({
            "externalIds": [{"value": "42", "type": "organization"}],
            "orgUnitPath": "/Engineering"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1077"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let body = UserBody {
        external_ids: Some(vec![ExternalId::organization(&EmployeeId::from("42"))]),
        org_unit_path: Some("/Engineering".into()),
        ..Default::default()
    };
    tokio::task::spawn_blocking(move || client.update_user("a@co.com", &body))
        .await
        .expect("join")
        .expect("update");
}

#[tokio::test(flavor = "multi_thread")]
async fn user_key_with_reserved_characters_stays_in_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/o%27neil%23ops%3F%40co.com"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    tokio::task::spawn_blocking(move || client.delete_user("o'neil#ops?@co.com"))
        .await
        .expect("join")
        .expect("delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn insert_conflict_is_a_recoverable_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {
                "code": 409,
                "message": "Entity already exists.",
                "errors": [{"domain": "global", "reason": "duplicate"}]
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let body = UserBody {
        primary_email: Some("a@co.com".into()),
        ..Default::default()
    };
    let err = tokio::task::spawn_blocking(move || client.insert_user(&body))
        .await
        .expect("join")
        .unwrap_err();
    assert!(err.is_recoverable());
    match err {
        DirectoryError::Api(api) => {
            assert_eq!(api.status_code, 409);
            assert_eq!(api.reason, "Entity already exists.");
            assert_eq!(api.error_details, json!([{"domain": "global", "reason": "duplicate"}]));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_user_hits_user_key() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/1077"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    tokio::task::spawn_blocking(move || client.delete_user("1077"))
        .await
        .expect("join")
        .expect("delete");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = DirectoryClient::with_base_url(
        format!("http://{addr}"),
        Box::new(StaticToken::new("tok")),
    );
    let err = client.delete_user("1077").unwrap_err();
    assert!(matches!(err, DirectoryError::Transport(_)), "got: {err}");
    assert!(!err.is_recoverable());
}
