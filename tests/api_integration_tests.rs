use gozcu::api::{ApiError, BackendClient, BotClient, NewTrainingRecord, StatsPeriod};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> BackendClient {
    BackendClient::new(server.uri())
}

fn bot_for(server: &MockServer) -> BotClient {
    BotClient::new(server.uri())
}

// ============================================================================
// Backend: live conversations
// ============================================================================

#[tokio::test]
async fn test_live_conversations_deserializes_wire_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/live-conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"_id":"user_ab12cd34e","message_count":4,"last_message":"selam","last_timestamp":"2024-06-01T12:00:00Z"},{"_id":"user_ffffeeeed"}]"#,
        ))
        .mount(&server)
        .await;

    let client = backend_for(&server);
    let conversations = client.live_conversations().await.unwrap();

    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].id, "user_ab12cd34e");
    assert_eq!(conversations[0].message_count, 4);
    // Sparse document: absent fields default rather than failing the list.
    assert_eq!(conversations[1].message_count, 0);
    assert!(conversations[1].last_message.is_empty());
}

#[tokio::test]
async fn test_live_conversations_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/live-conversations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("kaboom"))
        .mount(&server)
        .await;

    let client = backend_for(&server);
    match client.live_conversations().await {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "kaboom");
        }
        other => panic!("expected ApiError::Api, got {:?}", other.map(|v| v.len())),
    }
}

#[tokio::test]
async fn test_connection_refused_maps_to_network_error() {
    // Nothing listens here.
    let client = BackendClient::new("http://127.0.0.1:1".to_string());
    match client.live_conversations().await {
        Err(ApiError::Network(_)) => {}
        other => panic!("expected ApiError::Network, got {:?}", other.map(|v| v.len())),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/live-conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = backend_for(&server);
    match client.live_conversations().await {
        Err(ApiError::Parse(_)) => {}
        other => panic!("expected ApiError::Parse, got {:?}", other.map(|v| v.len())),
    }
}

// ============================================================================
// Backend: conversation history and intervention
// ============================================================================

#[tokio::test]
async fn test_conversation_history_handles_both_body_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversation/user_ab12cd34e"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"sender":"user","message":"selam","timestamp":"2024-06-01T09:00:00Z"},{"sender":"bot","text":"Merhaba!","confidence":0.92,"timestamp":"2024-06-01T09:00:01Z"}]"#,
        ))
        .mount(&server)
        .await;

    let client = backend_for(&server);
    let messages = client.conversation("user_ab12cd34e").await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body(), "selam");
    assert_eq!(messages[1].body(), "Merhaba!");
    assert_eq!(messages[1].confidence, Some(0.92));
}

#[tokio::test]
async fn test_intervention_posts_admin_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/intervention"))
        .and(body_json(serde_json::json!({
            "user_id": "user_ab12cd34e",
            "message": "Merhaba, ben operatörüm",
            "admin": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = backend_for(&server);
    client
        .send_intervention("user_ab12cd34e", "Merhaba, ben operatörüm")
        .await
        .unwrap();
}

// ============================================================================
// Backend: statistics
// ============================================================================

#[tokio::test]
async fn test_statistics_sends_period_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statistics"))
        .and(query_param("period", "weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"conversation_count":42,"unique_users":17,"gpt4_usage_count":5,"estimated_gpt4_cost":1.25}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = backend_for(&server);
    let snapshot = client.statistics(StatsPeriod::Weekly).await.unwrap();

    assert_eq!(snapshot.conversation_count, 42);
    assert_eq!(snapshot.unique_users, 17);
    assert_eq!(snapshot.usage_count, 5);
    assert!((snapshot.estimated_cost - 1.25).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_statistics_sparse_body_defaults_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = backend_for(&server);
    let snapshot = client.statistics(StatsPeriod::Total).await.unwrap();
    assert_eq!(snapshot.conversation_count, 0);
    assert_eq!(snapshot.estimated_cost, 0.0);
}

// ============================================================================
// Backend: training data CRUD + train trigger
// ============================================================================

#[tokio::test]
async fn test_training_data_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/training-data"))
        .and(body_json(serde_json::json!({
            "intent": "greeting",
            "questions": ["merhaba", "selam"],
            "answer": "Hoş geldiniz!",
            "created_at": "2024-06-01T12:00:00+00:00"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/training-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"_id":"663abc","intent":"greeting","questions":["merhaba","selam"],"answer":"Hoş geldiniz!","created_at":"2024-06-01T12:00:00+00:00"}]"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/training-data/663abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = backend_for(&server);

    let record = NewTrainingRecord {
        intent: "greeting".to_string(),
        questions: vec!["merhaba".to_string(), "selam".to_string()],
        answer: "Hoş geldiniz!".to_string(),
        created_at: "2024-06-01T12:00:00+00:00".to_string(),
    };
    client.create_training_data(&record).await.unwrap();

    let records = client.training_data().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "663abc");
    assert_eq!(records[0].questions, vec!["merhaba", "selam"]);

    client.delete_training_data(&records[0].id).await.unwrap();
}

#[tokio::test]
async fn test_train_model_posts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/train-model"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = backend_for(&server);
    client.train_model().await.unwrap();
}

#[tokio::test]
async fn test_delete_failure_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/training-data/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = backend_for(&server);
    match client.delete_training_data("missing").await {
        Err(ApiError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected ApiError::Api, got {:?}", other),
    }
}

// ============================================================================
// Bot webhook
// ============================================================================

#[tokio::test]
async fn test_webhook_sends_sender_and_returns_replies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .and(body_json(serde_json::json!({
            "sender": "user_ab12cd34e",
            "message": "selam"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"text":"Merhaba!"},{"image":"http://example.com/menu.png"}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let bot = bot_for(&server);
    let replies = bot.send_message("user_ab12cd34e", "selam").await.unwrap();

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].text.as_deref(), Some("Merhaba!"));
    assert_eq!(
        replies[1].image.as_deref(),
        Some("http://example.com/menu.png")
    );
}

#[tokio::test]
async fn test_webhook_empty_reply_array_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let bot = bot_for(&server);
    // An empty array is a valid "no answer" response, not an error; the
    // caller renders the fallback message.
    let replies = bot.send_message("user_ab12cd34e", "hmm").await.unwrap();
    assert!(replies.is_empty());
}

#[tokio::test]
async fn test_webhook_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let bot = bot_for(&server);
    match bot.send_message("user_ab12cd34e", "selam").await {
        Err(ApiError::Api { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected ApiError::Api, got {:?}", other.map(|v| v.len())),
    }
}
