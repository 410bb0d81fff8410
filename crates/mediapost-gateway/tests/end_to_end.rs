//! Full calls through the dispatcher and the stdio server against mock
//! platform APIs.

use std::io::Cursor;

use mediapost_gateway::{Dispatcher, GatewayServer};
use mediapost_types::{EndpointConfig, GatewayConfig, PublishResult};
use serde_json::{Value, json};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> GatewayConfig {
    GatewayConfig {
        endpoints: EndpointConfig::uniform(server.uri()),
        ..Default::default()
    }
}

async fn mount_wechat_draft(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/token"))
        .and(query_param("appid", "A"))
        .and(query_param("secret", "S"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "TOKEN", "expires_in": 7200})),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/draft/add"))
        .and(query_param("access_token", "TOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"media_id": "M1"})))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(path("/cgi-bin/freepublish/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errcode": 0})))
        .expect(0)
        .mount(server)
        .await;
}

fn wechat_args() -> Value {
    json!({
        "title": "T",
        "content": "# H\nbody",
        "credentials": {"app_id": "A", "app_secret": "S"},
        "should_publish": false
    })
}

#[tokio::test]
async fn wechat_draft_through_dispatcher() {
    let server = MockServer::start().await;
    mount_wechat_draft(&server).await;

    let dispatcher = Dispatcher::new(&config(&server)).unwrap();
    let result = dispatcher
        .dispatch("publish_to_wechat", wechat_args())
        .await
        .unwrap();

    assert!(result.success, "{result:?}");
    assert_eq!(result.ids.media_id.as_deref(), Some("M1"));
    assert!(result.message.contains("Draft created only"));
    assert!(result.ids.publish_id.is_none());

    let flat = serde_json::to_value(&result).unwrap();
    assert_eq!(flat["media_id"], "M1");
    assert_eq!(flat["success"], true);
}

#[tokio::test]
async fn wechat_draft_through_json_rpc() {
    let server = MockServer::start().await;
    mount_wechat_draft(&server).await;

    let lines = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "publish_to_wechat", "arguments": wechat_args()}
        }),
    ];
    let input: String = lines.iter().map(|l| format!("{l}\n")).collect();

    let gateway = GatewayServer::from_config(&config(&server)).unwrap();
    let mut output = Vec::new();
    gateway
        .run(Cursor::new(input.into_bytes()), &mut output)
        .await
        .unwrap();

    let replies: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);

    let call = replies.iter().find(|r| r["id"] == 2).unwrap();
    assert_eq!(call["result"]["isError"], false);
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let result: PublishResult = serde_json::from_str(text).unwrap();
    assert!(result.success);
    assert_eq!(result.ids.media_id.as_deref(), Some("M1"));
}

#[tokio::test]
async fn wechat_draft_through_line_protocol() {
    let server = MockServer::start().await;
    mount_wechat_draft(&server).await;

    let input = format!("{}\n", json!({"tool": "publish_to_wechat", "args": wechat_args()}));
    let gateway = GatewayServer::from_config(&config(&server)).unwrap();
    let mut output = Vec::new();
    gateway
        .run(Cursor::new(input.into_bytes()), &mut output)
        .await
        .unwrap();

    let reply: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(reply["result"]["success"], true);
    assert_eq!(reply["result"]["media_id"], "M1");
}

#[tokio::test]
async fn concurrent_calls_all_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "42"}})))
        .expect(5)
        .mount(&server)
        .await;

    let mut input = format!(
        "{}\n",
        json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}})
    );
    for id in 1..=5 {
        let call = json!({
            "jsonrpc": "2.0", "id": id, "method": "tools/call",
            "params": {
                "name": "publish_to_twitter",
                "arguments": {
                    "content": format!("post {id}"),
                    "credentials": {
                        "app_key": "k", "app_secret": "s",
                        "access_token": "t", "access_secret": "x"
                    }
                }
            }
        });
        input.push_str(&format!("{call}\n"));
    }

    let gateway = GatewayServer::from_config(&config(&server)).unwrap();
    let mut output = Vec::new();
    gateway
        .run(Cursor::new(input.into_bytes()), &mut output)
        .await
        .unwrap();

    let replies: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies.len(), 6);
    for id in 1..=5 {
        let reply = replies.iter().find(|r| r["id"] == id).unwrap();
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"tweet_id\":\"42\""), "{text}");
    }
}

#[tokio::test]
async fn unknown_tool_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new(&config(&server)).unwrap();
    for name in ["", "publish_to_", "publish_to_WECHAT", "wechat", "publish_to_myspace"] {
        for args in [json!({}), json!(null), wechat_args()] {
            let err = dispatcher.dispatch(name, args).await.unwrap_err();
            assert_eq!(err.to_string(), format!("Unknown tool: {name}"));
        }
    }
}
