mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use request_json_logger::prelude::*;
use serde_json::{Map, Value, json};

fn server(options: LogOptions, filter: FilterConfig) -> (TestServer, std::sync::Arc<MemorySink>) {
    let (logger, sink) = common::test_logger(options, filter);
    let server = TestServer::new(common::test_router(logger)).unwrap();
    (server, sink)
}

#[tokio::test]
async fn test_root_request_with_debug_fields() {
    let (server, sink) = server(LogOptions::new(LogLevel::Debug), FilterConfig::default());

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("ok");

    let records = sink.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];

    assert_eq!(record["log_type"], "http");
    assert_eq!(record["method"], "GET");
    assert_eq!(record["path"], "/");
    assert_eq!(record["status"], 200);
    assert_eq!(record["params"], json!({}));
    assert_eq!(record["client_ip"], "N/A");
    assert_eq!(record["client_version"], "N/A");
    assert_eq!(record["api_version"], "N/A");
    assert_eq!(record["request_id"], Value::Null);
    assert_eq!(record["handler"], "N/A");
    assert!(record["duration"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_info_level_omits_debug_fields() {
    let (server, sink) = server(LogOptions::new(LogLevel::Info), FilterConfig::default());

    server.get("/?q=shoes").await.assert_status_ok();

    let records = sink.records();
    let record = records[0].as_object().unwrap();
    assert!(!record.contains_key("client_ip"));
    assert!(!record.contains_key("client_version"));
    assert!(!record.contains_key("params"));
}

#[tokio::test]
async fn test_record_keys_are_exactly_the_catalog() {
    let (server, sink) = server(LogOptions::new(LogLevel::Debug), FilterConfig::default());

    server.get("/").await;

    let records = sink.records();
    let mut keys: Vec<&str> = records[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "api_version",
            "client_ip",
            "client_version",
            "date_time",
            "duration",
            "handler",
            "log_type",
            "method",
            "params",
            "path",
            "request_id",
            "status",
        ]
    );
}

#[tokio::test]
async fn test_forwarded_for_and_client_headers() {
    let (server, sink) = server(LogOptions::new(LogLevel::Debug), FilterConfig::default());

    server
        .get("/")
        .add_header("x-forwarded-for", "209.49.75.165, 10.0.0.1")
        .add_header("x-client-version", "ios/1.5.4")
        .add_header("accept", "application/vnd.api.v2+json")
        .add_header("x-request-id", "req-42")
        .await;

    let records = sink.records();
    let record = &records[0];
    assert_eq!(record["client_ip"], "209.49.75.165");
    assert_eq!(record["client_version"], "ios/1.5.4");
    assert_eq!(record["api_version"], "application/vnd.api.v2+json");
    assert_eq!(record["request_id"], "req-42");
}

#[tokio::test]
async fn test_query_params_are_filtered() {
    let filter = FilterConfig::new().with_filtered_keys(["password"]);
    let (server, sink) = server(LogOptions::new(LogLevel::Debug), filter);

    server
        .get("/?user%5Bpassword%5D=secret&user%5Busername%5D=me&page=2")
        .await
        .assert_status_ok();

    let records = sink.records();
    assert_eq!(
        records[0]["params"],
        json!({"user": {"password": "[FILTERED]", "username": "me"}, "page": "2"})
    );
}

#[tokio::test]
async fn test_body_params_from_handler_are_filtered() {
    let filter = FilterConfig::new().with_filtered_keys(["password"]);
    let (server, sink) = server(LogOptions::new(LogLevel::Warn), filter);

    let response = server
        .post("/login")
        .json(&json!({"user": {"password": "secret", "username": "me"}}))
        .await;
    response.assert_status(StatusCode::ACCEPTED);

    let records = sink.records();
    assert_eq!(records[0]["handler"], "Sessions#create");
    assert_eq!(
        records[0]["params"],
        json!({"user": {"password": "[FILTERED]", "username": "me"}})
    );
    assert!(!records[0].to_string().contains("secret"));
}

#[tokio::test]
async fn test_upload_descriptor_serialized_as_fields() {
    let (server, sink) = server(
        LogOptions::new(LogLevel::Info).include_debug_logging(true),
        FilterConfig::default(),
    );

    server.post("/upload").await.assert_status_ok();

    let records = sink.records();
    assert_eq!(
        records[0]["params"]["avatar"],
        json!({"content_type": "image/png", "filename": "me.png", "path": "/tmp/plug-1"})
    );
}

#[tokio::test]
async fn test_handler_identity() {
    let (server, sink) = server(LogOptions::default(), FilterConfig::default());

    let response = server.get("/orders/7").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], 7);

    let records = sink.records();
    assert_eq!(records[0]["handler"], "Orders#show");
    assert_eq!(records[0]["path"], "/orders/7");
}

#[tokio::test]
async fn test_log_request_emits_start_record_first() {
    let (server, sink) = server(
        LogOptions::default().log_request(true),
        FilterConfig::default(),
    );

    server.get("/health").await.assert_status_ok();

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert!(records[0].get("duration").is_none());
    assert_eq!(records[0]["status"], Value::Null);
    assert!(records[1].get("duration").is_some());
    assert_eq!(records[1]["status"], 200);
}

#[tokio::test]
async fn test_suppressed_fields() {
    let filter = FilterConfig::new().with_suppressed_fields(["api_version", "duration"]);
    let (server, sink) = server(LogOptions::default(), filter);

    server.get("/").await;

    let records = sink.records();
    let record = records[0].as_object().unwrap();
    assert!(!record.contains_key("api_version"));
    assert!(!record.contains_key("duration"));
    assert!(record.contains_key("date_time"));
}

#[tokio::test]
async fn test_extra_attributes() {
    let options = LogOptions::default().extra_attributes(|ctx| {
        let mut extra = Map::new();
        extra.insert("user_agent_present".into(), json!(ctx.headers.contains_key("user-agent")));
        extra.insert("tenant".into(), Value::Null);
        extra
    });
    let (server, sink) = server(options, FilterConfig::default());

    server.get("/").add_header("user-agent", "tests").await;

    let records = sink.records();
    assert_eq!(records[0]["user_agent_present"], true);
    assert!(records[0].get("tenant").is_none());
}

#[tokio::test]
async fn test_response_passes_through_unchanged() {
    let (server, _sink) = server(LogOptions::new(LogLevel::Debug), FilterConfig::default());

    let response = server.get("/missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_panic_produces_error_and_lifecycle_records() {
    let (server, sink) = server(LogOptions::default(), FilterConfig::default());

    let response = server.get("/panic").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].0, Severity::Error);
    assert_eq!(lines[1].0, Severity::Info);

    let records = sink.records();
    assert_eq!(records[0]["log_type"], "error");
    assert!(records[0]["message"].as_str().unwrap().contains("oops"));
    assert_eq!(records[1]["log_type"], "http");
    assert_eq!(records[1]["status"], 500);
}

#[tokio::test]
async fn test_panic_error_record_carries_request_id() {
    let (server, sink) = server(LogOptions::default(), FilterConfig::default());

    server
        .get("/panic")
        .add_header("x-request-id", "req-77")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["log_type"], "error");
    assert_eq!(records[0]["request_id"], "req-77");
    assert_eq!(records[1]["request_id"], "req-77");
}

#[tokio::test]
async fn test_panic_without_request_id() {
    let (server, sink) = server(LogOptions::default(), FilterConfig::default());

    server.get("/panic").await;

    assert_eq!(sink.records()[0]["request_id"], Value::Null);
}

#[tokio::test]
async fn test_suppressed_sink_severity_emits_nothing() {
    let sink = std::sync::Arc::new(MemorySink::with_min_severity(Severity::Error));
    let logger = RequestLogger::new(LogOptions::default(), FilterConfig::default(), sink.clone());
    let server = TestServer::new(common::test_router(logger)).unwrap();

    server.get("/").await.assert_status_ok();

    assert!(sink.is_empty());
}
