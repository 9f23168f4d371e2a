//! # Page Flow Tests
//!
//! Drives the form pages end to end against a mocked completion endpoint.

mod common;

use anyhow::Result;
use common::{history, notices, TestApp, COMPLETIONS_PATH};
use httpmock::Method::POST;
use serde_json::json;

#[tokio::test]
async fn test_mail_correction_appends_to_history() -> Result<()> {
    let app = TestApp::spawn().await?;
    let first = app.mock_completion("회의 일정", "교정된 메일 1");
    let second = app.mock_completion("출장 보고", "교정된 메일 2");
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "mail_correction",
            json!({ "fields": { "title": "회의 일정", "input": "내일 회의 합니다" } }),
        )
        .await?;
    assert!(notices(&page).is_empty());
    assert_eq!(history(&page), vec!["교정된 메일 1"]);
    assert_eq!(page["subheader"], "메일/메시지 첨삭");

    let page = app
        .submit_page(
            &session_id,
            "mail_correction",
            json!({ "fields": { "title": "출장 보고", "input": "출장 다녀왔습니다" } }),
        )
        .await?;
    assert_eq!(history(&page), vec!["교정된 메일 1", "교정된 메일 2"]);

    first.assert();
    second.assert();
    Ok(())
}

#[tokio::test]
async fn test_request_carries_credential_model_and_temperature() -> Result<()> {
    let app = TestApp::spawn().await?;
    let mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path(COMPLETIONS_PATH)
            .header("authorization", "Bearer sk-test")
            .body_contains(r#""model":"mock-chat-model""#)
            .body_contains(r#""temperature":0.2"#)
            .body_contains(r#""stream":false"#);
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "번역 결과" } }]
        }));
    });
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "news_translation",
            json!({ "fields": { "input": "Stocks rallied on Friday." } }),
        )
        .await?;

    mock.assert();
    assert_eq!(history(&page), vec!["번역 결과"]);
    Ok(())
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let mock = app.mock_completion("", "should not be used");
    let session_id = app.create_session().await?;

    let page = app
        .submit_page(
            &session_id,
            "simple_chat",
            json!({ "fields": { "input": "hello" } }),
        )
        .await?;

    assert_eq!(
        notices(&page),
        vec![(
            "warning".to_string(),
            "OPEN API KEY를 입력해주시기 바랍니다.".to_string()
        )]
    );
    assert!(history(&page).is_empty());
    mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_api_key_in_submission_is_used() -> Result<()> {
    let app = TestApp::spawn().await?;
    let mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path(COMPLETIONS_PATH)
            .header("authorization", "Bearer sk-inline");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "answer" } }]
        }));
    });
    let session_id = app.create_session().await?;

    let page = app
        .submit_page(
            &session_id,
            "simple_chat",
            json!({ "fields": { "input": "hello" }, "api_key": "sk-inline" }),
        )
        .await?;
    assert!(notices(&page).is_empty());
    assert_eq!(history(&page), vec!["answer"]);

    // The key stays in the session for later renders.
    let page = app.render_page(&session_id, "simple_chat").await?;
    assert!(notices(&page).is_empty());
    mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_blank_required_field_warns_by_label() -> Result<()> {
    let app = TestApp::spawn().await?;
    let mock = app.mock_completion("", "unused");
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "prompt_maker",
            json!({ "fields": { "task": "요약", "lazy_prompt": "   " } }),
        )
        .await?;

    assert_eq!(
        notices(&page),
        vec![(
            "warning".to_string(),
            "프롬프트 항목을 입력해주시기 바랍니다.".to_string()
        )]
    );
    mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_completion_failure_is_an_error_notice() -> Result<()> {
    let app = TestApp::spawn().await?;
    let ok = app.mock_completion("첫 번째", "정상 응답");
    let failing = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path(COMPLETIONS_PATH)
            .body_contains("두 번째");
        then.status(500).body("upstream exploded");
    });
    let session_id = app.session_with_credential("sk-test").await?;

    app.submit_page(
        &session_id,
        "official_correction",
        json!({ "fields": { "title": "첫 번째", "input": "본문" } }),
    )
    .await?;
    let page = app
        .submit_page(
            &session_id,
            "official_correction",
            json!({ "fields": { "title": "두 번째", "input": "본문" } }),
        )
        .await?;

    let notices = notices(&page);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, "error");
    assert!(notices[0].1.starts_with("교정/교열 중 오류 발생: "));
    assert!(notices[0].1.contains("upstream exploded"));
    assert_eq!(history(&page), vec!["정상 응답"]);

    ok.assert();
    failing.assert();
    Ok(())
}

#[tokio::test]
async fn test_switching_pages_resets_history() -> Result<()> {
    let app = TestApp::spawn().await?;
    let _mock = app.mock_completion("", "응답");
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "simple_chat",
            json!({ "fields": { "input": "hello" } }),
        )
        .await?;
    assert_eq!(history(&page).len(), 1);

    // Re-rendering the same page keeps the history.
    let page = app.render_page(&session_id, "simple_chat").await?;
    assert_eq!(history(&page).len(), 1);
    let again = app.render_page(&session_id, "simple_chat").await?;
    assert_eq!(page, again);

    app.render_page(&session_id, "news_translation").await?;
    let page = app.render_page(&session_id, "simple_chat").await?;
    assert!(history(&page).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sessions_do_not_share_history() -> Result<()> {
    let app = TestApp::spawn().await?;
    let _mock = app.mock_completion("from A", "answer for A");
    let session_a = app.session_with_credential("sk-a").await?;
    let session_b = app.session_with_credential("sk-b").await?;

    app.submit_page(
        &session_a,
        "simple_chat",
        json!({ "fields": { "input": "from A" } }),
    )
    .await?;
    let page_b = app.render_page(&session_b, "simple_chat").await?;
    let page_a = app.render_page(&session_a, "simple_chat").await?;

    assert!(history(&page_b).is_empty());
    assert_eq!(history(&page_a), vec!["answer for A"]);
    Ok(())
}

#[tokio::test]
async fn test_task_overrides_from_config() -> Result<()> {
    let app = TestApp::spawn_with_tasks(
        r#"
tasks:
  news_translation:
    model_name: "translation-model"
    temperature: 0.7
    prompt: "Translate to Korean: {input}"
"#,
    )
    .await?;
    let mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path(COMPLETIONS_PATH)
            .body_contains(r#""model":"translation-model""#)
            .body_contains(r#""temperature":0.7"#)
            .body_contains("Translate to Korean: Markets fell.");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "시장이 하락했다." } }]
        }));
    });
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "news_translation",
            json!({ "fields": { "input": "Markets fell." } }),
        )
        .await?;

    mock.assert();
    assert_eq!(history(&page), vec!["시장이 하락했다."]);
    Ok(())
}

#[tokio::test]
async fn test_streaming_task_reassembles_chunks() -> Result<()> {
    let app = TestApp::spawn_with_tasks(
        r#"
tasks:
  simple_chat:
    streaming: true
"#,
    )
    .await?;
    let sse_body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"lo!\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    let mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path(COMPLETIONS_PATH)
            .body_contains(r#""stream":true"#);
        then.status(200)
            .header("content-type", "text/event-stream")
            .body(sse_body);
    });
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "simple_chat",
            json!({ "fields": { "input": "Say hello" } }),
        )
        .await?;

    mock.assert();
    assert_eq!(history(&page), vec!["Hello!"]);
    Ok(())
}

#[tokio::test]
async fn test_user_text_is_not_re_expanded() -> Result<()> {
    let app = TestApp::spawn().await?;
    let mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path(COMPLETIONS_PATH)
            .body_contains("메일제목: {input}");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        }));
    });
    let session_id = app.session_with_credential("sk-test").await?;

    let page = app
        .submit_page(
            &session_id,
            "mail_correction",
            json!({ "fields": { "title": "{input}", "input": "본문" } }),
        )
        .await?;

    mock.assert();
    assert_eq!(history(&page), vec!["ok"]);
    Ok(())
}
