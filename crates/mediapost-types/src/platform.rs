//! The closed set of publishing platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported publishing platform.
///
/// Each platform maps to exactly one tool name and one adapter. Anything
/// outside this set is rejected before a network call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    /// WeChat Official Account (draft + optional free-publish).
    #[serde(rename = "wechat")]
    WeChat,
    /// Douyin short video (metadata attach for an uploaded video).
    #[serde(rename = "douyin")]
    Douyin,
    /// Xiaohongshu notes.
    #[serde(rename = "xiaohongshu")]
    Xiaohongshu,
    /// Bilibili column articles.
    #[serde(rename = "bilibili")]
    Bilibili,
    /// Twitter / X posts.
    #[serde(rename = "twitter")]
    Twitter,
    /// Feishu / Lark Docx documents.
    #[serde(rename = "feishu")]
    Feishu,
}

impl Platform {
    /// Every platform, in tool-listing order.
    pub const ALL: [Platform; 6] = [
        Platform::Douyin,
        Platform::WeChat,
        Platform::Xiaohongshu,
        Platform::Bilibili,
        Platform::Twitter,
        Platform::Feishu,
    ];

    /// Stable lowercase identifier (`"wechat"`, `"bilibili"`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Platform::WeChat => "wechat",
            Platform::Douyin => "douyin",
            Platform::Xiaohongshu => "xiaohongshu",
            Platform::Bilibili => "bilibili",
            Platform::Twitter => "twitter",
            Platform::Feishu => "feishu",
        }
    }

    /// Name of the tool that publishes to this platform.
    pub fn tool_name(self) -> &'static str {
        match self {
            Platform::WeChat => "publish_to_wechat",
            Platform::Douyin => "publish_to_douyin",
            Platform::Xiaohongshu => "publish_to_xiaohongshu",
            Platform::Bilibili => "publish_to_bilibili",
            Platform::Twitter => "publish_to_twitter",
            Platform::Feishu => "publish_to_feishu",
        }
    }

    /// Human-readable name used in result messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::WeChat => "WeChat",
            Platform::Douyin => "Douyin",
            Platform::Xiaohongshu => "Xiaohongshu",
            Platform::Bilibili => "Bilibili",
            Platform::Twitter => "Twitter",
            Platform::Feishu => "Feishu",
        }
    }

    /// Credential fields that must be present and non-empty before the
    /// adapter may touch the network.
    pub fn required_credentials(self) -> &'static [&'static str] {
        match self {
            Platform::WeChat => &["app_id", "app_secret"],
            Platform::Douyin => &["access_token", "open_id"],
            Platform::Xiaohongshu => &["access_token"],
            Platform::Bilibili => &["sessdata", "bili_jct"],
            Platform::Twitter => &["app_key", "app_secret", "access_token", "access_secret"],
            Platform::Feishu => &["app_id", "app_secret"],
        }
    }

    /// Whether the platform expects HTML rather than plain text.
    pub fn renders_html(self) -> bool {
        matches!(self, Platform::WeChat | Platform::Bilibili)
    }

    /// Resolve a tool name (`"publish_to_wechat"`) to its platform.
    pub fn from_tool_name(name: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.tool_name() == name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == lower || p.tool_name() == lower)
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}
