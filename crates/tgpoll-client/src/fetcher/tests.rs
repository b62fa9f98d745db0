//! Tests for the getUpdates fetcher.

use super::*;
use crate::error::RejectionClass;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use tgpoll_core::entities::UpdateKind;

fn request(offset: i64) -> PollRequest {
    PollRequest {
        offset,
        timeout: Duration::from_secs(1),
        limit: Some(50),
        allowed_updates: Some(vec![UpdateKind::Message, UpdateKind::CallbackQuery]),
    }
}

#[test]
fn test_parse_success_preserves_order() {
    let body = json!({
        "ok": true,
        "result": [
            {"update_id": 5, "message": {"message_id": 1, "chat": {"id": 1, "type": "private"}, "date": 1, "text": "a"}},
            {"update_id": 6, "edited_message": {"message_id": 1, "chat": {"id": 1, "type": "private"}, "date": 1, "edit_date": 2}},
            {"update_id": 9}
        ]
    })
    .to_string();
    let updates = parse_updates_response(200, &body).unwrap();
    let ids: Vec<i64> = updates.iter().map(|u| u.update_id).collect();
    assert_eq!(ids, vec![5, 6, 9]);
    assert!(updates[1].has_edited_message());
}

#[test]
fn test_parse_empty_batch() {
    let updates = parse_updates_response(200, r#"{"ok":true,"result":[]}"#).unwrap();
    assert!(updates.is_empty());
}

#[test]
fn test_parse_rejection_envelope() {
    let err = parse_updates_response(
        401,
        r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
    )
    .unwrap_err();
    match &err {
        FetchError::ServiceRejected {
            code,
            description,
            retry_after,
        } => {
            assert_eq!(*code, 401);
            assert_eq!(description, "Unauthorized");
            assert!(retry_after.is_none());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.rejection_class(), Some(RejectionClass::Fatal));
}

#[test]
fn test_parse_rate_limit_carries_retry_after() {
    let err = parse_updates_response(
        429,
        r#"{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 3","parameters":{"retry_after":3}}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FetchError::ServiceRejected {
            code: 429,
            retry_after: Some(3),
            ..
        }
    ));
    assert_eq!(err.rejection_class(), Some(RejectionClass::Transient));
}

#[test]
fn test_parse_ok_false_on_http_200() {
    let err = parse_updates_response(200, r#"{"ok":false,"description":"odd"}"#).unwrap_err();
    assert!(matches!(err, FetchError::ServiceRejected { code: 0, .. }));
    assert_eq!(err.rejection_class(), Some(RejectionClass::Transient));
}

#[test]
fn test_parse_non_json_error_body() {
    let err = parse_updates_response(502, "<html>Bad Gateway</html>").unwrap_err();
    match err {
        FetchError::ServiceRejected {
            code, description, ..
        } => {
            assert_eq!(code, 502);
            assert!(description.contains("Bad Gateway"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_malformed_envelope_is_decode_error() {
    assert!(matches!(
        parse_updates_response(200, "not json"),
        Err(FetchError::Decode(_))
    ));
    assert!(matches!(
        parse_updates_response(200, r#"{"ok":true}"#),
        Err(FetchError::Decode(DecodeError::MissingResult))
    ));
}

#[test]
fn test_parse_one_bad_update_fails_whole_batch() {
    let body = json!({
        "ok": true,
        "result": [
            {"update_id": 1},
            {"update_id": 2, "message": {"message_id": 1, "chat": {"id": 1, "type": "private"}, "date": "soon"}},
            {"update_id": 3}
        ]
    })
    .to_string();
    match parse_updates_response(200, &body).unwrap_err() {
        FetchError::Decode(DecodeError::Field { path, .. }) => {
            assert_eq!(path, "result[1].message.date");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_rejects_non_monotonic_ids() {
    let err = parse_updates_response(
        200,
        r#"{"ok":true,"result":[{"update_id":4},{"update_id":4}]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FetchError::Decode(DecodeError::NonMonotonic {
            previous: 4,
            next: 4
        })
    ));
}

#[test]
fn test_request_body_shape() {
    let req = request(8);
    let body = serde_json::to_value(GetUpdatesBody::from(&req)).unwrap();
    assert_eq!(
        body,
        json!({"offset": 8, "timeout": 1, "limit": 50, "allowed_updates": ["message", "callback_query"]})
    );

    let bare = PollRequest {
        offset: 0,
        timeout: Duration::from_secs(30),
        limit: None,
        allowed_updates: None,
    };
    let body = serde_json::to_value(GetUpdatesBody::from(&bare)).unwrap();
    assert_eq!(body, json!({"offset": 0, "timeout": 30}));
}

#[test]
fn test_request_timeout_adds_grace_without_overflow() {
    assert_eq!(
        request_timeout(Duration::from_secs(30)),
        Duration::from_secs(30) + REQUEST_GRACE
    );
    assert_eq!(request_timeout(Duration::MAX), Duration::MAX);
    assert_eq!(
        request_timeout(Duration::from_secs(u64::MAX)),
        Duration::MAX
    );
}

#[tokio::test]
async fn test_http_fetch_sends_offset_and_decodes() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:abc/getUpdates")
            .body_includes("\"offset\":8")
            .body_includes("\"limit\":50");
        then.status(200).json_body(json!({
            "ok": true,
            "result": [
                {"update_id": 8, "callback_query": {
                    "id": "q1",
                    "from": {"id": 7, "is_bot": false},
                    "chat_instance": "ci",
                    "data": "press"
                }},
                {"update_id": 9}
            ]
        }));
    });

    let fetcher = HttpFetcher::new(&server.base_url(), "123:abc");
    let updates = fetcher.fetch(&request(8)).await.unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(
        updates[0].callback_query.as_ref().unwrap().data.as_deref(),
        Some("press")
    );
    mock.assert();
}

#[tokio::test]
async fn test_http_fetch_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/botbad/getUpdates");
        then.status(401)
            .json_body(json!({"ok": false, "error_code": 401, "description": "Unauthorized"}));
    });

    let fetcher = HttpFetcher::new(&format!("{}/", server.base_url()), "bad");
    let err = fetcher.fetch(&request(0)).await.unwrap_err();
    assert_eq!(err.rejection_class(), Some(RejectionClass::Fatal));
}

#[tokio::test]
async fn test_http_fetch_connection_refused_is_transport() {
    // Port 9 (discard) on localhost is not expected to accept connections.
    let fetcher = HttpFetcher::new("http://127.0.0.1:9", "secret-token");
    let err = fetcher.fetch(&request(0)).await.unwrap_err();
    match err {
        FetchError::Transport(msg) => {
            assert!(!msg.contains("secret-token"), "token leaked: {msg}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
