//! End-to-end pipeline tests against a mocked chat-completion endpoint.

use chrono::{NaiveDate, NaiveDateTime};
use mockito::Matcher;
use serde_json::json;
use timeblock_core::{Config, ResolveError, SchedulePipeline};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn test_config(api_base: &str) -> Config {
    let mut config = Config::default();
    config.llm.api_key = "test-key".to_string();
    config.llm.api_base = api_base.to_string();
    config
}

/// Body of a successful chat reply whose message content is `content`.
fn chat_reply(content: &str) -> String {
    json!({
        "choices": [{ "message": { "content": content } }]
    })
    .to_string()
}

#[tokio::test]
async fn duration_only_expression_falls_through_to_the_service() {
    let mut server = mockito::Server::new_async().await;

    // Exchange 1 goes to the duration model, exchange 2 to the datetime
    // model; the mocks key off the model name in the request body.
    let duration_mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-3.5-turbo-1106"})))
        .with_status(200)
        .with_body(chat_reply(r#"{"minutes": 60}"#))
        .expect(1)
        .create_async()
        .await;
    let datetime_mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-4-1106-preview"})))
        .with_status(200)
        .with_body(chat_reply(r#"{"datetime": "2024-01-02T09:00"}"#))
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let pipeline = SchedulePipeline::new(&config);
    let report = pipeline
        .schedule_at("Write report [for 60 minutes]", dt(2024, 1, 1, 8, 0))
        .await;

    assert!(report.skipped.is_empty());
    assert_eq!(
        report.to_normalized_text(),
        "Write report [length:: 60 minutes] [scheduled:: 2024-01-02T09:00]"
    );
    duration_mock.assert_async().await;
    datetime_mock.assert_async().await;
}

#[tokio::test]
async fn second_task_inherits_the_end_of_a_service_resolved_first() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-3.5-turbo-1106"})))
        .with_status(200)
        .with_body(chat_reply(r#"{"minutes": 60}"#))
        .expect(1)
        .create_async()
        .await;
    let datetime_mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-4-1106-preview"})))
        .with_status(200)
        .with_body(chat_reply(r#"{"datetime": "2024-01-02T09:00"}"#))
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let pipeline = SchedulePipeline::new(&config);
    let text = "Write report [for 60 minutes]\nEmail triage [for 30 minutes]";
    let report = pipeline.schedule_at(text, dt(2024, 1, 1, 8, 0)).await;

    // Task 2 resolves deterministically off task 1's end; only one
    // two-exchange round trip ever reaches the service.
    assert_eq!(report.tasks.len(), 2);
    assert_eq!(report.tasks[1].start, dt(2024, 1, 2, 10, 0));
    datetime_mock.assert_async().await;
}

#[tokio::test]
async fn previous_end_is_offered_to_the_datetime_stage() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-3.5-turbo-1106"})))
        .with_status(200)
        .with_body(chat_reply(r#"{"minutes": 45}"#))
        .expect(1)
        .create_async()
        .await;
    // The datetime instruction must carry the inherited end time as the
    // default start.
    let datetime_mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"model": "gpt-4-1106-preview"})),
            Matcher::Regex("previous meeting ended at".to_string()),
        ]))
        .with_status(200)
        .with_body(chat_reply(r#"{"datetime": "2024-01-02T10:00"}"#))
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let pipeline = SchedulePipeline::new(&config);
    let text = "Standup [for 1 hour on 1/2/2024 @ 9:00 am]\nSync with Dana [45 minutes, right after]";
    let report = pipeline.schedule_at(text, dt(2024, 1, 1, 8, 0)).await;

    assert_eq!(report.tasks.len(), 2);
    assert_eq!(report.tasks[1].start, dt(2024, 1, 2, 10, 0));
    datetime_mock.assert_async().await;
}

#[tokio::test]
async fn failed_resolution_drops_the_line_and_continues() {
    let mut server = mockito::Server::new_async().await;

    // The service cannot make sense of the first expression.
    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"model": "gpt-3.5-turbo-1106"})))
        .with_status(200)
        .with_body(chat_reply("{}"))
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let pipeline = SchedulePipeline::new(&config);
    let text = "Ponder [at some point]\nCall mom [for 45 minutes on Monday 1/8/2024 @ 3:00 pm]";
    let report = pipeline.schedule_at(text, dt(2024, 1, 1, 8, 0)).await;

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 1);
    assert!(matches!(
        report.skipped[0].reason,
        ResolveError::EmptyDuration
    ));
    assert_eq!(
        report.to_normalized_text(),
        "Call mom [length:: 45 minutes] [scheduled:: 2024-01-08T15:00]"
    );
}

#[tokio::test]
async fn service_error_is_folded_into_a_skipped_line() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let pipeline = SchedulePipeline::new(&config);
    let report = pipeline
        .schedule_at("Ponder [at some point]", dt(2024, 1, 1, 8, 0))
        .await;

    assert!(report.tasks.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        report.skipped[0].reason,
        ResolveError::Service(_)
    ));
}
