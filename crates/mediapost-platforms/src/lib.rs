//! Platform adapters for the mediapost publishing gateway.
//!
//! Each supported platform has one adapter implementing the [`Publisher`]
//! trait. Adapters validate credentials, transform content, run the
//! platform's remote protocol as a short abort-on-failure pipeline, and
//! normalize the outcome into a [`PublishResult`](mediapost_types::PublishResult).
//!
//! | Module | Platform | Steps |
//! |---|---|---|
//! | [`wechat`] | WeChat Official Account | token, draft, optional submit |
//! | [`douyin`] | Douyin | attach caption to uploaded video |
//! | [`xiaohongshu`] | Xiaohongshu | create note |
//! | [`bilibili`] | Bilibili columns | save HTML draft |
//! | [`twitter`] | Twitter / X | OAuth 1.0a signed post |
//! | [`feishu`] | Feishu Docx | token, create document, append blocks |
//!
//! Supporting modules:
//!
//! - [`markdown`] -- Markdown to HTML / plain text
//! - [`credentials`] -- per-request credential validation
//! - [`http`] -- shared client with a bounded per-call timeout
//! - [`adapter`] -- the closed [`Adapter`] enum used by the dispatcher

pub mod adapter;
pub mod bilibili;
pub mod credentials;
pub mod douyin;
pub mod feishu;
pub mod http;
pub mod markdown;
pub mod traits;
pub mod twitter;
pub mod wechat;
pub mod xiaohongshu;

pub use adapter::Adapter;
pub use http::HttpClient;
pub use traits::Publisher;
