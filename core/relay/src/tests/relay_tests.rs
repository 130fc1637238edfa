use std::sync::Arc;

use common::adapter::MemoryLog;
use serde_json::json;

use crate::adapter::StubTransformFactory;
use crate::domain::record::InboundRecord;
use crate::domain::{BatchSize, InboundEvent, ProcessingTally, RelayResponse};
use crate::ports::inbound::HandleEvent;
use crate::usecase::RelayUseCase;

fn use_case(
    factory: &Arc<StubTransformFactory>,
    log: &Arc<MemoryLog>,
    batch_size: usize,
) -> RelayUseCase {
    RelayUseCase::new(
        log.clone(),
        factory.clone(),
        BatchSize::new(batch_size).unwrap(),
    )
}

fn good(text: &str) -> InboundRecord {
    InboundRecord::with_body(json!({ "message": text }).to_string())
}

fn bad(body: &str) -> InboundRecord {
    InboundRecord::with_body(body)
}

fn numbered(n: usize) -> Vec<InboundRecord> {
    (0..n).map(|i| good(&format!("msg-{}", i))).collect()
}

/// "batch processed" ログの size を順に取り出す
fn batch_sizes(log: &MemoryLog) -> Vec<u64> {
    log.with_message("batch processed")
        .iter()
        .map(|r| r.get_field("size").and_then(|v| v.as_u64()).unwrap())
        .collect()
}

#[test]
fn test_all_well_formed_records_succeed() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let response = uc.handle(&InboundEvent::new(numbered(7)));
    assert_eq!(
        response,
        RelayResponse::Complete {
            processed: ProcessingTally::new(7, 0)
        }
    );
    assert_eq!(response.status(), 200);
    assert_eq!(factory.calls().len(), 7);
}

#[test]
fn test_no_records_skips_client_construction() {
    // 資格情報が無くても、レコードが無ければ変換クライアントは作らない
    let factory = Arc::new(StubTransformFactory::missing_credentials());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let response = uc.handle(&InboundEvent::default());
    assert_eq!(response, RelayResponse::NoRecords);
    assert_eq!(response.body(), json!({"message": "No records to process"}));
    assert_eq!(factory.create_count(), 0);
    assert_eq!(log.with_message("No records to process").len(), 1);
}

#[test]
fn test_malformed_records_are_tallied_and_skipped() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let records = vec![
        bad("not-json"),
        good("a"),
        bad(r#"{"other": 1}"#),
        good("b"),
        InboundRecord::default(),
        good("c"),
    ];
    let response = uc.handle(&InboundEvent::new(records));
    assert_eq!(response.processed(), Some(ProcessingTally::new(3, 3)));
    assert_eq!(response.status(), 200);
    // 不正レコードは変換まで届かない
    assert_eq!(factory.calls(), vec!["a", "b", "c"]);
    assert_eq!(log.with_kind("record").len(), 3);
}

#[test]
fn test_malformed_record_log_carries_message_id() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let record = InboundRecord {
        message_id: Some("m-42".to_string()),
        body: Some(json!("{")),
    };
    uc.handle(&InboundEvent::new(vec![record]));

    let logged = log.with_kind("record");
    assert_eq!(logged.len(), 1);
    assert!(logged[0].message.starts_with("Failed to process record:"));
    assert_eq!(logged[0].get_field("message_id"), Some(&json!("m-42")));
    assert_eq!(logged[0].get_field("record_index"), Some(&json!(0)));
}

#[test]
fn test_non_string_body_is_tallied_with_siblings_processed() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let event = InboundEvent::from_json(
        r#"{"Records": [
            {"body": "{\"message\": \"ok\"}"},
            {"body": {"message": "hi"}},
            {"body": "{\"message\": \"also ok\"}"}
        ]}"#,
    )
    .unwrap();
    let response = uc.handle(&event);
    assert_eq!(
        response,
        RelayResponse::Complete {
            processed: ProcessingTally::new(2, 1)
        }
    );
    assert_eq!(factory.calls(), vec!["ok", "also ok"]);

    let logged = log.with_kind("record");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].get_field("record_index"), Some(&json!(1)));
}

#[test]
fn test_huge_batch_size_processes_normally() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = RelayUseCase::new(
        log.clone(),
        factory.clone(),
        BatchSize::parse("1000000000000000000").unwrap(),
    );

    let response = uc.handle(&InboundEvent::new(vec![good("a")]));
    assert_eq!(response.status(), 200);
    assert_eq!(response.processed(), Some(ProcessingTally::new(1, 0)));
    assert_eq!(batch_sizes(&log), vec![1]);
}

#[test]
fn test_batches_flush_at_capacity_and_at_end() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let response = uc.handle(&InboundEvent::new(numbered(25)));
    assert_eq!(response.processed(), Some(ProcessingTally::new(25, 0)));
    assert_eq!(batch_sizes(&log), vec![10, 10, 5]);

    let expected: Vec<String> = (0..25).map(|i| format!("msg-{}", i)).collect();
    assert_eq!(factory.calls(), expected);
}

#[test]
fn test_exact_multiple_has_no_trailing_batch() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 5);

    uc.handle(&InboundEvent::new(numbered(10)));
    assert_eq!(batch_sizes(&log), vec![5, 5]);
}

#[test]
fn test_malformed_records_do_not_fill_the_buffer() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 2);

    let records = vec![good("a"), bad("x"), bad("y"), good("b"), good("c")];
    let response = uc.handle(&InboundEvent::new(records));
    assert_eq!(response.processed(), Some(ProcessingTally::new(3, 2)));
    assert_eq!(batch_sizes(&log), vec![2, 1]);
}

#[test]
fn test_one_failing_item_does_not_abort_batch() {
    let factory = Arc::new(StubTransformFactory::failing_on(&["msg-4"]));
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let response = uc.handle(&InboundEvent::new(numbered(10)));
    assert_eq!(
        response,
        RelayResponse::Complete {
            processed: ProcessingTally::new(9, 1)
        }
    );

    // 失敗の前後も順序どおりにすべて送られている
    let expected: Vec<String> = (0..10).map(|i| format!("msg-{}", i)).collect();
    assert_eq!(factory.calls(), expected);

    let batch = &log.with_message("batch processed")[0];
    assert_eq!(batch.get_field("success"), Some(&json!(9)));
    assert_eq!(batch.get_field("failed"), Some(&json!(1)));

    let failures = log.with_kind("transform");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].get_field("item_index"), Some(&json!(4)));
}

#[test]
fn test_missing_credentials_is_fatal_before_any_record() {
    let factory = Arc::new(StubTransformFactory::missing_credentials());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let response = uc.handle(&InboundEvent::new(vec![good("a"), bad("x")]));
    assert_eq!(response.status(), 500);
    assert_eq!(response.processed(), Some(ProcessingTally::new(0, 0)));
    assert_eq!(
        response.body(),
        json!({
            "error": "OpenAI API key not found in environment variables",
            "processed": {"success": 0, "failed": 0}
        })
    );
    assert!(factory.calls().is_empty());
    assert!(log.with_kind("record").is_empty());

    let errors = log.with_kind("error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Main handler error:"));
    assert_eq!(errors[0].get_field("error_kind"), Some(&json!("config")));
}

#[test]
fn test_unexpected_panic_returns_partial_tally() {
    let factory = Arc::new(StubTransformFactory::panicking_on(&["boom"]));
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 1);

    let response = uc.handle(&InboundEvent::new(vec![
        good("a"),
        bad("x"),
        good("boom"),
        good("never"),
    ]));
    match &response {
        RelayResponse::Failed { error, processed } => {
            assert!(error.contains("stub transform panicked on boom"), "{}", error);
            assert_eq!(*processed, ProcessingTally::new(1, 1));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(factory.calls(), vec!["a", "boom"]);
    assert_eq!(
        log.with_kind("error")[0].get_field("error_kind"),
        Some(&json!("panic"))
    );
}

#[test]
fn test_single_message_with_fixed_reply() {
    let factory = Arc::new(StubTransformFactory::with_reply("Hello"));
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let event =
        InboundEvent::from_json(r#"{"Records": [{"body": "{\"message\": \"hi\"}"}]}"#).unwrap();
    let response = uc.handle(&event);
    assert_eq!(response.status(), 200);
    assert_eq!(response.processed(), Some(ProcessingTally::new(1, 0)));
    assert_eq!(factory.calls(), vec!["hi"]);
}

#[test]
fn test_single_unparsable_body() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let event = InboundEvent::from_json(r#"{"Records": [{"body": "not-json"}]}"#).unwrap();
    let response = uc.handle(&event);
    assert_eq!(response.status(), 200);
    assert_eq!(response.processed(), Some(ProcessingTally::new(0, 1)));
    // 全件不正でもクライアントは生成される（資格情報の検査は先に行う）
    assert_eq!(factory.create_count(), 1);
    assert!(log.with_message("batch processed").is_empty());
}

#[test]
fn test_invocations_are_independent() {
    let factory = Arc::new(StubTransformFactory::new());
    let log = Arc::new(MemoryLog::new());
    let uc = use_case(&factory, &log, 10);

    let first = uc.handle(&InboundEvent::new(numbered(3)));
    let second = uc.handle(&InboundEvent::new(numbered(2)));
    assert_eq!(first.processed(), Some(ProcessingTally::new(3, 0)));
    assert_eq!(second.processed(), Some(ProcessingTally::new(2, 0)));
    assert_eq!(factory.create_count(), 2);
    assert_eq!(batch_sizes(&log), vec![3, 2]);
}
