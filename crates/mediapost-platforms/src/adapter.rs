//! The closed set of platform adapters.

use async_trait::async_trait;
use mediapost_types::{GatewayConfig, Platform, PublishRequest, PublishResult, Result};

use crate::bilibili::BilibiliPublisher;
use crate::douyin::DouyinPublisher;
use crate::feishu::FeishuPublisher;
use crate::http::HttpClient;
use crate::traits::Publisher;
use crate::twitter::TwitterPublisher;
use crate::wechat::WeChatPublisher;
use crate::xiaohongshu::XiaohongshuPublisher;

/// One adapter per [`Platform`].
///
/// The dispatcher maps tool names to variants of this enum; every variant
/// delegates to its platform's [`Publisher`] implementation.
#[derive(Debug, Clone)]
pub enum Adapter {
    WeChat(WeChatPublisher),
    Douyin(DouyinPublisher),
    Xiaohongshu(XiaohongshuPublisher),
    Bilibili(BilibiliPublisher),
    Twitter(TwitterPublisher),
    Feishu(FeishuPublisher),
}

impl Adapter {
    /// Build the adapter for `platform`, pointed at the configured endpoint.
    pub fn new(platform: Platform, config: &GatewayConfig, http: &HttpClient) -> Self {
        let base = config.endpoints.base_url(platform);
        let http = http.clone();
        match platform {
            Platform::WeChat => Adapter::WeChat(WeChatPublisher::new(http, base)),
            Platform::Douyin => Adapter::Douyin(DouyinPublisher::new(http, base)),
            Platform::Xiaohongshu => Adapter::Xiaohongshu(XiaohongshuPublisher::new(http, base)),
            Platform::Bilibili => Adapter::Bilibili(BilibiliPublisher::new(http, base)),
            Platform::Twitter => Adapter::Twitter(TwitterPublisher::new(http, base)),
            Platform::Feishu => Adapter::Feishu(FeishuPublisher::new(
                http,
                base,
                config.endpoints.feishu_web.as_str(),
            )),
        }
    }

    /// Build every adapter, in [`Platform::ALL`] order.
    pub fn all(config: &GatewayConfig) -> Result<Vec<Adapter>> {
        let http = HttpClient::new(config)?;
        Ok(Platform::ALL
            .into_iter()
            .map(|platform| Adapter::new(platform, config, &http))
            .collect())
    }

    fn inner(&self) -> &dyn Publisher {
        match self {
            Adapter::WeChat(p) => p,
            Adapter::Douyin(p) => p,
            Adapter::Xiaohongshu(p) => p,
            Adapter::Bilibili(p) => p,
            Adapter::Twitter(p) => p,
            Adapter::Feishu(p) => p,
        }
    }
}

#[async_trait]
impl Publisher for Adapter {
    fn platform(&self) -> Platform {
        self.inner().platform()
    }

    async fn try_publish(&self, request: &PublishRequest) -> Result<PublishResult> {
        self.inner().try_publish(request).await
    }

    async fn publish(&self, request: &PublishRequest) -> PublishResult {
        self.inner().publish(request).await
    }
}
