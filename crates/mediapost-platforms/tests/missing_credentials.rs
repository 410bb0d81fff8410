//! Missing credentials never reach the network, on any platform.

mod common;

use mediapost_platforms::Publisher;
use mediapost_types::{ErrorKind, Platform, PublishRequest};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_expecting_no_calls() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn empty_bag_fails_without_network_for_every_platform() {
    for platform in Platform::ALL {
        let server = server_expecting_no_calls().await;
        let request = PublishRequest::new(platform, "body")
            .title("T")
            .option("video_id", "v-1");

        let result = common::adapter(platform, &server).publish(&request).await;

        assert!(!result.success, "{platform} should fail");
        assert_eq!(result.error_kind, Some(ErrorKind::Validation));
        assert!(result.ids.is_empty());
        for field in platform.required_credentials() {
            assert!(
                result.message.contains(field),
                "{platform} message {:?} should name {field}",
                result.message
            );
        }
        assert!(result.message.starts_with(&format!("Missing {}", platform.display_name())));
    }
}

#[tokio::test]
async fn each_single_missing_field_is_reported() {
    for platform in Platform::ALL {
        for dropped in platform.required_credentials() {
            let server = server_expecting_no_calls().await;
            let mut request = PublishRequest::new(platform, "body").title("T");
            for field in platform.required_credentials() {
                if field != dropped {
                    request = request.credential(*field, "x");
                }
            }

            let result = common::adapter(platform, &server).publish(&request).await;

            assert!(!result.success);
            assert_eq!(
                result.message,
                format!("Missing {} {dropped}", platform.display_name())
            );
        }
    }
}

#[tokio::test]
async fn blank_values_count_as_missing() {
    let server = server_expecting_no_calls().await;
    let request = PublishRequest::new(Platform::WeChat, "body")
        .title("T")
        .credential("app_id", "wx1")
        .credential("app_secret", "   ");

    let result = common::adapter(Platform::WeChat, &server)
        .publish(&request)
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Missing WeChat app_secret");
}

#[tokio::test]
async fn missing_title_is_a_validation_failure_without_network() {
    for platform in [
        Platform::WeChat,
        Platform::Xiaohongshu,
        Platform::Bilibili,
        Platform::Feishu,
    ] {
        let server = server_expecting_no_calls().await;
        let mut request = common::full_request(platform);
        request.title = None;

        let result = common::adapter(platform, &server).publish(&request).await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(ErrorKind::Validation));
        assert!(result.message.contains("title is required"));
    }
}
