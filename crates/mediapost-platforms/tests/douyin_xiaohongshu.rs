//! Single-call adapters: Douyin metadata attach and Xiaohongshu notes.

mod common;

use std::time::Duration;

use mediapost_platforms::{Adapter, HttpClient, Publisher};
use mediapost_types::{EndpointConfig, ErrorKind, GatewayConfig, Platform, PublishRequest};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn douyin_request() -> PublishRequest {
    PublishRequest::new(Platform::Douyin, "caption #tag")
        .credential("access_token", "act.1")
        .credential("open_id", "OID")
}

fn xhs_request() -> PublishRequest {
    PublishRequest::new(Platform::Xiaohongshu, "**Great** coffee")
        .title("Cafe")
        .credential("access_token", "xhs-token")
        .media_url("https://img.example/1.jpg")
        .media_url("https://img.example/2.jpg")
}

// ── Douyin ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn douyin_attaches_caption_to_uploaded_video() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/create/"))
        .and(query_param("open_id", "OID"))
        .and(header("Authorization", "Bearer act.1"))
        .and(header("access-token", "act.1"))
        .and(body_json(json!({"video_id": "v.123", "text": "caption #tag"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"error_code": 0, "description": "", "item_id": "@9VwK"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = common::adapter(Platform::Douyin, &server)
        .publish(&douyin_request().option("video_id", "v.123"))
        .await;

    assert!(result.success, "{result:?}");
    assert_eq!(result.ids.item_id.as_deref(), Some("@9VwK"));
}

#[tokio::test]
async fn douyin_caption_is_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/create/"))
        .and(body_json(json!({"video_id": "v.9", "text": "New drop\n\nWatch till the end"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"error_code": 0, "item_id": "@x"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = douyin_request().option("video_id", "v.9");
    request.content = "## New drop\n\nWatch *till the end*".into();
    let result = common::adapter(Platform::Douyin, &server)
        .publish(&request)
        .await;

    assert!(result.success, "{result:?}");
}

#[tokio::test]
async fn douyin_without_video_id_is_unsupported() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = common::adapter(Platform::Douyin, &server)
        .publish(&douyin_request().media_url("https://cdn.example/clip.mp4"))
        .await;

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::UnsupportedOperation));
    assert!(result.message.contains("media_urls"));
}

#[tokio::test]
async fn douyin_embedded_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/create/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"error_code": 2190008, "description": "access_token过期,请刷新或重新授权"}
        })))
        .mount(&server)
        .await;

    let result = common::adapter(Platform::Douyin, &server)
        .publish(&douyin_request().option("video_id", "v.123"))
        .await;

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::RemoteProtocol));
    assert!(result.message.contains("2190008"));
}

// ── Xiaohongshu ────────────────────────────────────────────────────────

#[tokio::test]
async fn xiaohongshu_creates_note() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sns/v1/note"))
        .and(header("Authorization", "Bearer xhs-token"))
        .and(body_json(json!({
            "title": "Cafe",
            "desc": "Great coffee",
            "image_urls": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
            "type": "normal"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "code": 0, "data": {"note_id": "64f0c"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = common::adapter(Platform::Xiaohongshu, &server)
        .publish(&xhs_request())
        .await;

    assert!(result.success, "{result:?}");
    assert_eq!(result.ids.note_id.as_deref(), Some("64f0c"));
}

#[tokio::test]
async fn xiaohongshu_signature_rejection_is_ordinary_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sns/v1/note"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "success": false, "code": -1, "msg": "sign error"
        })))
        .mount(&server)
        .await;

    let result = common::adapter(Platform::Xiaohongshu, &server)
        .publish(&xhs_request())
        .await;

    assert!(!result.success);
    assert!(result.message.contains("sign error"));
    assert!(result.ids.note_id.is_none());
}

// ── Timeouts ───────────────────────────────────────────────────────────

#[tokio::test]
async fn slow_remote_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sns/v1/note"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = GatewayConfig {
        timeout_secs: 1,
        endpoints: EndpointConfig::uniform(server.uri()),
        ..Default::default()
    };
    let http = HttpClient::new(&config).unwrap();
    let adapter = Adapter::new(Platform::Xiaohongshu, &config, &http);

    let result = adapter.publish(&xhs_request()).await;

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::Transport));
    assert!(result.message.contains("timed out"));
}
