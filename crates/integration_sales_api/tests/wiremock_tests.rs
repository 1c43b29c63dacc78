//! Integration tests for the sales API client using wiremock
//!
//! These tests run the client against a mock HTTP server to check request
//! shapes, identifier handling and error-body parsing.

use domain::{EntityId, GenerationRequest, IdentityNormalizer, MessageType, Tone};
use integration_sales_api::{
    MessageUpdate, Page, SalesApi, SalesApiClient, SalesApiConfig, SalesApiError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn client_for(server: &MockServer) -> SalesApiClient {
    SalesApiClient::new(SalesApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..SalesApiConfig::default()
    })
    .unwrap()
}

fn message_json(id: &str, message_type: &str, subject: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "id": id,
        "client_id": "c1",
        "product_id": "p1",
        "message_type": message_type,
        "tone": "professional",
        "subject": subject,
        "content": "Hi Alice,\n\n**Widget** helps your team.",
        "is_follow_up": false,
        "previous_message_id": null,
        "status": "draft",
        "created_at": "2024-01-15T12:00:00.123456",
        "updated_at": "2024-01-15T12:00:00.123456",
        "client_response": null
    })
}

fn request() -> GenerationRequest {
    GenerationRequest {
        client_id: EntityId::new("c1").unwrap(),
        product_id: EntityId::new("p1").unwrap(),
        message_type: MessageType::Email,
        tone: Tone::Professional,
        custom_instructions: Some("mention the webinar".into()),
        is_follow_up: false,
        previous_message_id: None,
    }
}

#[tokio::test]
async fn list_clients_sends_pagination_and_parses_both_id_spellings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clients/"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"_id": "c1", "name": "Alice", "company": "Acme", "role_category": "executive"},
            {"id": "c2", "name": "Bob", "company": "Initech", "role_category": "finance",
             "email": "bob@initech.example"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let clients = client_for(&server)
        .list_clients(Page::first(100))
        .await
        .unwrap();

    assert_eq!(clients.len(), 2);
    assert!(IdentityNormalizer::find(&clients, "c1").is_some());
    let bob = IdentityNormalizer::find(&clients, "c2").unwrap();
    assert_eq!(bob.name, "Bob");
}

#[tokio::test]
async fn list_products_parses_features() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "_id": "p1",
            "name": "Widget",
            "description": "Team widget",
            "features": [{
                "name": "Dashboards",
                "description": "Live dashboards",
                "benefits": {"executive": ["Visibility"], "finance": ["Cost tracking"]}
            }]
        }])))
        .mount(&server)
        .await;

    let products = client_for(&server)
        .list_products(Page::first(10))
        .await
        .unwrap();
    assert_eq!(products[0].features.len(), 1);
}

#[tokio::test]
async fn generate_posts_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages/generate"))
        .and(body_json(serde_json::json!({
            "client_id": "c1",
            "product_id": "p1",
            "message_type": "email",
            "tone": "professional",
            "custom_instructions": "mention the webinar",
            "is_follow_up": false
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(message_json("m1", "email", Some("Meet Widget"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let message = client_for(&server).generate(&request()).await.unwrap();
    assert_eq!(IdentityNormalizer::resolve(&message).unwrap().as_str(), "m1");
    assert_eq!(message.subject.as_deref(), Some("Meet Widget"));
    assert!(message.created_at.is_some());
}

#[tokio::test]
async fn list_messages_filters_by_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages/"))
        .and(query_param("client_id", "c1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            message_json("m2", "linkedin", None),
            message_json("m1", "email", Some("Intro")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let messages = client_for(&server).list_messages("c1", 20).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message_type, MessageType::NetworkingNote);
}

#[tokio::test]
async fn update_message_puts_edits() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/messages/m1"))
        .and(body_json(serde_json::json!({
            "content": "Edited",
            "subject": "Widget for your team"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_json(
            "m1",
            "email",
            Some("Widget for your team"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let update = MessageUpdate {
        content: "Edited".into(),
        subject: Some("Widget for your team".into()),
    };
    let message = client_for(&server)
        .update_message("m1", &update)
        .await
        .unwrap();
    assert_eq!(message.subject.as_deref(), Some("Widget for your team"));
}

#[tokio::test]
async fn get_message_not_found_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "Message not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_message("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), Some("Message not found"));
}

#[tokio::test]
async fn rate_limit_detail_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages/generate"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(serde_json::json!({"detail": "rate limited"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).generate(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        SalesApiError::Api {
            status: 429,
            detail: Some(ref d)
        } if d == "rate limited"
    ));
}

#[tokio::test]
async fn validation_error_list_is_joined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages/generate"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [
                {"loc": ["body", "tone"], "msg": "field required"},
                {"loc": ["body", "client_id"], "msg": "invalid id"}
            ]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate(&request()).await.unwrap_err();
    assert_eq!(err.detail(), Some("field required; invalid id"));
}

#[tokio::test]
async fn server_error_without_body_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clients/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_clients(Page::first(100))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(err.detail().is_none());
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "message": "Sales Assistant API is running"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SalesApiClient::new(SalesApiConfig {
        base_url: format!("{}/api", server.uri()),
        api_token: Some("t0ken".into()),
        ..SalesApiConfig::default()
    })
    .unwrap();
    assert!(client.health().await.unwrap().is_ok());
}

#[tokio::test]
async fn unauthorized_is_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_products(Page::first(100))
        .await
        .unwrap_err();
    assert!(matches!(err, SalesApiError::Unauthorized));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_message("m1").await.unwrap_err();
    assert!(matches!(err, SalesApiError::ParseError(_)));
}

#[tokio::test]
async fn connection_refused_is_connection_failed() {
    let client = SalesApiClient::new(SalesApiConfig {
        base_url: "http://127.0.0.1:1/api".into(),
        timeout_secs: 2,
        ..SalesApiConfig::default()
    })
    .unwrap();

    let err = client.health().await.unwrap_err();
    assert!(matches!(
        err,
        SalesApiError::ConnectionFailed(_) | SalesApiError::Timeout
    ));
}
