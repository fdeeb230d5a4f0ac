// tests/test_chat_service.rs


use safespace::classifier::Severity;
use safespace::notify::{ALERT_TEXT, CALL_MESSAGE};
use test_helpers::{RecordingNotifier, RECIPIENT};

#[tokio::test]
async fn test_cardiac_message_alerts_once_per_channel() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::default()).await;

    let reply = ctx
        .state
        .chat_service
        .ask("I have chest pain and my left arm is numb")
        .await
        .expect("ask");

    assert_eq!(reply.severity, Severity::Critical);
    assert_eq!(reply.severity_code, 1);

    ctx.notifier.wait_for(1, 1).await;
    assert_eq!(ctx.notifier.text_count(), 1);
    assert_eq!(ctx.notifier.call_count(), 1);

    let texts = ctx.notifier.texts.lock().unwrap().clone();
    assert_eq!(texts[0], (RECIPIENT.to_string(), ALERT_TEXT.to_string()));
    let calls = ctx.notifier.calls.lock().unwrap().clone();
    assert_eq!(calls[0], (RECIPIENT.to_string(), CALL_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_low_mood_does_not_alert() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::default()).await;

    let reply = ctx
        .state
        .chat_service
        .ask("I feel very sad and depressed")
        .await
        .expect("ask");

    assert_eq!(reply.severity, Severity::Low);
    assert_eq!(reply.severity_code, 2);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(ctx.notifier.text_count(), 0);
    assert_eq!(ctx.notifier.call_count(), 0);
}

#[tokio::test]
async fn test_notifier_failure_does_not_fail_reply() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::failing()).await;

    let reply = ctx
        .state
        .chat_service
        .ask("there was an accident, he is unconscious")
        .await
        .expect("reply survives notification failure");

    assert_eq!(reply.severity, Severity::Critical);
    ctx.notifier.wait_for(1, 1).await;
    assert_eq!(ctx.notifier.text_count(), 1);
    assert_eq!(ctx.notifier.call_count(), 1);

    // Turn is still recorded
    assert_eq!(ctx.state.chat_service.history().await.unwrap(), vec![1]);
}

#[tokio::test]
async fn test_every_severity_is_stored_as_its_code() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::default()).await;
    let cases = [
        ("I want to die", Severity::Critical),
        ("I keep crying", Severity::Low),
        ("random gibberish xyz", Severity::Neutral),
        ("I have a fever", Severity::Sick),
        ("I have period cramps", Severity::WomenHealth),
    ];

    for (question, expected) in cases {
        let reply = ctx.state.chat_service.ask(question).await.unwrap();
        assert_eq!(reply.severity, expected, "question: {question}");
        assert_eq!(reply.severity_code, expected.code());
    }

    let history = ctx.state.chat_service.history().await.unwrap();
    assert_eq!(history, vec![1, 2, 3, 7, 8]);
}

#[tokio::test]
async fn test_history_query_is_idempotent() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::default()).await;
    ctx.state.chat_service.ask("hello").await.unwrap();
    ctx.state.chat_service.ask("heartburn again").await.unwrap();

    let first = ctx.state.chat_service.history().await.unwrap();
    let second = ctx.state.chat_service.history().await.unwrap();
    assert_eq!(first, vec![3, 7]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_restart_starts_with_empty_history() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::default()).await;
    ctx.state.chat_service.ask("I have a fever").await.unwrap();
    ctx.state.chat_service.ask("body pain").await.unwrap();
    assert_eq!(ctx.state.chat_service.history().await.unwrap().len(), 2);
    ctx.state.sqlite_pool.close().await;

    // Same database file, new process lifetime
    let restarted =
        test_helpers::open_state(&ctx.db_url, safespace::notify::AlertDispatcher::disabled()).await;
    assert!(restarted.chat_service.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_manual_trigger_dispatches() {
    let ctx = test_helpers::create_test_context(RecordingNotifier::default()).await;

    let ack = ctx.state.chat_service.trigger_emergency();
    assert_eq!(ack.status, "dispatched");

    ctx.notifier.wait_for(1, 1).await;
    assert_eq!(ctx.notifier.text_count(), 1);
    assert_eq!(ctx.notifier.call_count(), 1);

    // Manual trigger is not a conversation turn
    assert!(ctx.state.chat_service.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_manual_trigger_without_config_is_skipped() {
    let ctx = test_helpers::create_unconfigured_context().await;

    let ack = ctx.state.chat_service.trigger_emergency();
    assert_eq!(ack.status, "skipped");

    // Critical verdicts still answer normally
    let reply = ctx.state.chat_service.ask("I can't breathe and feel faint").await.unwrap();
    assert_eq!(reply.severity, Severity::Critical);
}
