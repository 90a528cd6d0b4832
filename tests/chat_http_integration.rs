//! End-to-end tests for the chat relay.
//!
//! A real server is bound on an ephemeral port with the scripted assistant
//! service behind it. The conversation client then drives it through the
//! reqwest-based `HttpChatApi`, the same way a browser session would.

use std::sync::Arc;
use std::time::Duration;

use databot::adapters::ai::{MockAssistantService, MockCall, MockError, MockOperation};
use databot::adapters::http::{build_router, ChatAppState, HttpChatApi};
use databot::application::conversation_client::{GREETING, SEND_FAILURE_NOTICE, START_FAILURE_NOTICE};
use databot::application::{ChatSettings, ConversationClient, PollPolicy, SubmitOutcome};
use databot::config::ServerConfig;
use databot::domain::chat::{ChatRole, ClientPhase, RunError, RunStatus};
use databot::domain::foundation::AssistantId;
use databot::ports::{ChatApi, ChatApiError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn fast_settings() -> ChatSettings {
    ChatSettings::configured(AssistantId::new("asst_123").unwrap()).with_poll_policy(
        PollPolicy::new(Duration::from_millis(10), Duration::from_millis(500)),
    )
}

/// Binds the relay on 127.0.0.1 and returns its base URL.
async fn spawn_relay(service: MockAssistantService, settings: ChatSettings) -> String {
    let state = ChatAppState::new(Arc::new(service), settings);
    let app = build_router(state, &ServerConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn client_for(
    service: MockAssistantService,
    settings: ChatSettings,
) -> ConversationClient<HttpChatApi> {
    let base_url = spawn_relay(service, settings).await;
    ConversationClient::new(Arc::new(HttpChatApi::new(base_url).unwrap()))
}

// =============================================================================
// Conversation Flow
// =============================================================================

#[tokio::test]
async fn full_conversation_round_trip() {
    let service = MockAssistantService::new()
        .with_thread("thread_abc")
        .with_run_statuses([RunStatus::Queued, RunStatus::InProgress, RunStatus::Completed])
        .with_reply("A schema is a logical grouping【4:0†source】.");
    let mut client = client_for(service.clone(), fast_settings()).await;

    assert_eq!(client.start().await, ClientPhase::Idle);
    assert_eq!(client.thread_id().unwrap().as_str(), "thread_abc");
    assert_eq!(client.messages()[0].content(), GREETING);

    let outcome = client.submit("What is a schema?").await;

    assert_eq!(outcome, SubmitOutcome::Replied);
    let last = client.messages().last().unwrap();
    assert_eq!(last.role(), ChatRole::Assistant);
    assert_eq!(last.content(), "A schema is a logical grouping.");
    assert!(!last.is_error());

    let calls = service.calls();
    assert_eq!(calls[0], MockCall::CreateThread);
    assert_eq!(
        calls[1],
        MockCall::AppendMessage {
            thread_id: "thread_abc".to_string(),
            content: "What is a schema?".to_string(),
        }
    );
    assert_eq!(
        calls[2],
        MockCall::StartRun {
            thread_id: "thread_abc".to_string(),
            assistant_id: "asst_123".to_string(),
        }
    );
    assert_eq!(service.count_of(MockOperation::GetRun), 3);
    assert_eq!(service.count_of(MockOperation::LatestMessage), 1);
}

#[tokio::test]
async fn unconfigured_relay_shows_setup_without_calls() {
    let service = MockAssistantService::new();
    let mut client = client_for(service.clone(), ChatSettings::unconfigured()).await;

    assert_eq!(client.start().await, ClientPhase::NotConfigured);
    assert!(client.setup_instructions().unwrap().contains("ASSISTANT_ID"));
    assert!(client.messages().is_empty());
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn thread_failure_leaves_client_without_thread() {
    let service = MockAssistantService::new()
        .with_error(MockOperation::CreateThread, MockError::AuthenticationFailed);
    let mut client = client_for(service, fast_settings()).await;

    assert_eq!(client.start().await, ClientPhase::ThreadUnavailable);
    assert_eq!(client.messages().len(), 1);
    assert_eq!(client.messages()[0].content(), START_FAILURE_NOTICE);
    assert!(client.messages()[0].is_error());
    assert!(!client.input_enabled());
}

#[tokio::test]
async fn failed_run_appends_error_notice() {
    let service = MockAssistantService::new()
        .with_run_statuses([RunStatus::Failed])
        .with_run_error(RunError {
            code: Some("rate_limit_exceeded".to_string()),
            message: Some("Rate limit".to_string()),
        });
    let mut client = client_for(service, fast_settings()).await;
    client.start().await;

    assert_eq!(client.submit("hello").await, SubmitOutcome::Failed);
    let last = client.messages().last().unwrap();
    assert!(last.is_error());
    assert_eq!(last.content(), SEND_FAILURE_NOTICE);
    assert_eq!(client.phase(), ClientPhase::Idle);
}

#[tokio::test]
async fn run_that_never_finishes_times_out() {
    let service = MockAssistantService::new().with_run_statuses([RunStatus::InProgress]);
    let mut client = client_for(service.clone(), fast_settings()).await;
    client.start().await;

    assert_eq!(client.submit("hello").await, SubmitOutcome::Failed);
    assert_eq!(service.count_of(MockOperation::LatestMessage), 0);
}

#[tokio::test]
async fn timed_out_message_can_be_resubmitted_on_same_thread() {
    let service = MockAssistantService::new()
        .with_thread("thread_abc")
        .with_run_statuses([RunStatus::InProgress])
        .with_reply("Schemas group tables.");
    let mut client = client_for(service.clone(), fast_settings()).await;
    client.start().await;

    assert_eq!(client.submit("What is a schema?").await, SubmitOutcome::Failed);
    assert_eq!(client.messages().last().unwrap().content(), SEND_FAILURE_NOTICE);
    assert!(client.input_enabled());

    let service = service.with_run_statuses([RunStatus::Completed]);
    assert_eq!(client.submit("What is a schema?").await, SubmitOutcome::Replied);
    assert_eq!(client.messages().last().unwrap().content(), "Schemas group tables.");
    assert_eq!(client.thread_id().unwrap().as_str(), "thread_abc");

    assert_eq!(service.count_of(MockOperation::CreateThread), 1);
    assert_eq!(service.count_of(MockOperation::StartRun), 2);
    assert_eq!(service.count_of(MockOperation::LatestMessage), 1);
    let appended: Vec<_> = service
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            MockCall::AppendMessage { thread_id, .. } => Some(thread_id),
            _ => None,
        })
        .collect();
    assert_eq!(appended, vec!["thread_abc", "thread_abc"]);
}

// =============================================================================
// Error Bodies Seen By The Client
// =============================================================================

#[tokio::test]
async fn run_failure_reason_stays_on_the_server() {
    let service = MockAssistantService::new()
        .with_run_statuses([RunStatus::Failed])
        .with_run_error(RunError {
            code: None,
            message: Some("Rate limit".to_string()),
        });
    let base_url = spawn_relay(service, fast_settings()).await;
    let api = HttpChatApi::new(base_url).unwrap();
    let thread_id = api.create_thread().await.unwrap();

    let err = api.send_message(&thread_id, "hello").await.unwrap_err();

    match err {
        ChatApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to process message");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_message_is_rejected_before_any_upstream_call() {
    let service = MockAssistantService::new();
    let base_url = spawn_relay(service.clone(), fast_settings()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat/message", base_url))
        .json(&serde_json::json!({ "threadId": "thread_abc" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Missing threadId or message" }));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn status_endpoint_reflects_settings() {
    let configured = HttpChatApi::new(spawn_relay(MockAssistantService::new(), fast_settings()).await)
        .unwrap();
    let unconfigured = HttpChatApi::new(
        spawn_relay(MockAssistantService::new(), ChatSettings::unconfigured()).await,
    )
    .unwrap();

    assert!(configured.check_configuration().await.unwrap());
    assert!(!unconfigured.check_configuration().await.unwrap());
}

#[tokio::test]
async fn health_probe_answers() {
    let base_url = spawn_relay(MockAssistantService::new(), ChatSettings::unconfigured()).await;

    let body = reqwest::get(format!("{}/health", base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "ok");
}
