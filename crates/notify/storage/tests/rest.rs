use notify_storage::{RestTokenStore, TokenBackend, TokenStore};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_KEY: &str = "service-role-key";

async fn profiles_mock(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("select", "fcm_token"))
        .and(query_param("fcm_token", "not.is.null"))
        .and(header("apikey", SERVICE_KEY))
        .and(header("authorization", "Bearer service-role-key"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn returns_tokens_in_store_order() {
    let server = MockServer::start().await;
    profiles_mock(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            { "fcm_token": "t2" },
            { "fcm_token": "t1" },
            { "fcm_token": "t2" },
        ])),
    )
    .await;

    let store = RestTokenStore::new(server.uri(), SERVICE_KEY).unwrap();
    let tokens = store.device_tokens().await.unwrap();

    assert_eq!(tokens, vec!["t2", "t1", "t2"]);
}

#[tokio::test]
async fn empty_table_yields_no_tokens() {
    let server = MockServer::start().await;
    profiles_mock(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let store = RestTokenStore::new(format!("{}/", server.uri()), SERVICE_KEY).unwrap();

    assert!(store.device_tokens().await.unwrap().is_empty());
}

#[tokio::test]
async fn surfaces_postgrest_error_message() {
    let server = MockServer::start().await;
    profiles_mock(
        &server,
        ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "details": null,
            "hint": null,
            "message": "relation \"public.profiles\" does not exist",
        })),
    )
    .await;

    let store = TokenBackend::from(RestTokenStore::new(server.uri(), SERVICE_KEY).unwrap());
    let err = store.device_tokens().await.unwrap_err();

    assert_eq!(err.to_string(), "relation \"public.profiles\" does not exist");
}

#[tokio::test]
async fn non_json_error_keeps_status() {
    let server = MockServer::start().await;
    profiles_mock(&server, ResponseTemplate::new(503).set_body_string("upstream down")).await;

    let store = RestTokenStore::new(server.uri(), SERVICE_KEY).unwrap();
    let err = store.device_tokens().await.unwrap_err().to_string();

    assert!(err.contains("503"), "{err}");
    assert!(err.contains("upstream down"), "{err}");
}
