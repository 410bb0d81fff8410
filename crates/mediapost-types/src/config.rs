//! Gateway configuration.
//!
//! Configuration covers how the gateway talks to platforms (timeouts,
//! base URLs, user agent). It deliberately has no place for credentials:
//! those arrive with each request so one running gateway can serve many
//! tenants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Environment variable that overrides [`GatewayConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "MEDIAPOST_TIMEOUT_SECS";

/// Top-level gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Upper bound for each individual remote call, in seconds (default 30).
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent on every request.
    #[serde(default = "default_user_agent", alias = "userAgent")]
    pub user_agent: String,

    /// Per-platform API base URLs.
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("mediapost/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// The per-call timeout as a [`Duration`]. Zero is clamped to one second
    /// so a call can never wait forever.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Apply overrides from the process environment.
    ///
    /// Currently only [`TIMEOUT_ENV`]; unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.timeout_secs = secs;
        }
    }
}

/// API base URLs, one per platform.
///
/// Defaults point at the public production hosts. Overrides are useful for
/// regional hosts (e.g. Lark instead of Feishu), egress proxies, and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// WeChat Official Account API.
    #[serde(default = "default_wechat")]
    pub wechat: String,
    /// Douyin open platform API.
    #[serde(default = "default_douyin")]
    pub douyin: String,
    /// Xiaohongshu API.
    #[serde(default = "default_xiaohongshu")]
    pub xiaohongshu: String,
    /// Bilibili API.
    #[serde(default = "default_bilibili")]
    pub bilibili: String,
    /// Twitter API (v2 paths are appended).
    #[serde(default = "default_twitter")]
    pub twitter: String,
    /// Feishu open platform API.
    #[serde(default = "default_feishu")]
    pub feishu: String,
    /// Base used to build browser URLs for created Feishu documents.
    #[serde(default = "default_feishu_web", alias = "feishuWeb")]
    pub feishu_web: String,
}

fn default_wechat() -> String {
    "https://api.weixin.qq.com".into()
}
fn default_douyin() -> String {
    "https://open.douyin.com".into()
}
fn default_xiaohongshu() -> String {
    "https://edith.xiaohongshu.com".into()
}
fn default_bilibili() -> String {
    "https://api.bilibili.com".into()
}
fn default_twitter() -> String {
    "https://api.twitter.com".into()
}
fn default_feishu() -> String {
    "https://open.feishu.cn".into()
}
fn default_feishu_web() -> String {
    "https://feishu.cn".into()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            wechat: default_wechat(),
            douyin: default_douyin(),
            xiaohongshu: default_xiaohongshu(),
            bilibili: default_bilibili(),
            twitter: default_twitter(),
            feishu: default_feishu(),
            feishu_web: default_feishu_web(),
        }
    }
}

impl EndpointConfig {
    /// Point every platform (and the Feishu web base) at one URL.
    pub fn uniform(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            wechat: base.clone(),
            douyin: base.clone(),
            xiaohongshu: base.clone(),
            bilibili: base.clone(),
            twitter: base.clone(),
            feishu: base.clone(),
            feishu_web: base,
        }
    }

    /// Base URL for `platform`, without a trailing slash.
    pub fn base_url(&self, platform: Platform) -> &str {
        let url = match platform {
            Platform::WeChat => &self.wechat,
            Platform::Douyin => &self.douyin,
            Platform::Xiaohongshu => &self.xiaohongshu,
            Platform::Bilibili => &self.bilibili,
            Platform::Twitter => &self.twitter,
            Platform::Feishu => &self.feishu,
        };
        url.trim_end_matches('/')
    }
}
