//! Platform-agnostic publish requests and the credentials bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PublishError, Result};
use crate::platform::Platform;
use crate::secret::SecretString;

/// Per-request mapping of credential field names to secret values.
///
/// The field set is platform specific and opaque to everything except the
/// adapter that consumes it. Credentials never come from process-wide
/// configuration; each request carries its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, SecretString>);

impl Credentials {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<SecretString>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SecretString>) {
        self.0.insert(field.into(), value.into());
    }

    /// Look up a field regardless of whether it is blank.
    pub fn get(&self, field: &str) -> Option<&SecretString> {
        self.0.get(field)
    }

    /// Returns `true` when `field` is present and not blank.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| !v.is_blank())
    }

    /// The subset of `fields` that is absent or blank, in the given order.
    pub fn missing<'a>(&self, fields: &[&'a str]) -> Vec<&'a str> {
        fields.iter().copied().filter(|f| !self.has(f)).collect()
    }

    /// Number of fields in the bag (blank ones included).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the bag holds no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A platform-agnostic request to publish one piece of content.
///
/// Built from raw tool arguments by [`PublishRequest::from_arguments`]. The
/// well-known fields are lifted out; everything else lands in `options`,
/// where adapters read their platform-specific flags (`should_publish`,
/// `category`, `video_id`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Target platform.
    pub platform: Platform,
    /// Title, required by some platforms.
    pub title: Option<String>,
    /// Body in source markup (Markdown).
    pub content: String,
    /// Ordered media references (URLs).
    pub media_urls: Vec<String>,
    /// Credentials bag for this request only.
    pub credentials: Credentials,
    /// Platform-specific optional flags.
    pub options: Map<String, Value>,
}

impl PublishRequest {
    /// Start a request for `platform` with the given body.
    pub fn new(platform: Platform, content: impl Into<String>) -> Self {
        Self {
            platform,
            title: None,
            content: content.into(),
            media_urls: Vec::new(),
            credentials: Credentials::new(),
            options: Map::new(),
        }
    }

    /// Builder: set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: add a credential field.
    pub fn credential(mut self, field: impl Into<String>, value: impl Into<SecretString>) -> Self {
        self.credentials.insert(field, value);
        self
    }

    /// Builder: append a media URL.
    pub fn media_url(mut self, url: impl Into<String>) -> Self {
        self.media_urls.push(url.into());
        self
    }

    /// Builder: set a platform-specific option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Parse raw tool arguments into a request for `platform`.
    ///
    /// `media_urls` and `image_urls` are both accepted as the media list.
    /// `content` defaults to empty here; adapters decide whether an empty
    /// body is acceptable after credentials have been checked.
    pub fn from_arguments(platform: Platform, args: Value) -> Result<Self> {
        let mut map = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(PublishError::InvalidArguments(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let title = take_optional_string(&mut map, "title")?;
        let content = take_optional_string(&mut map, "content")?.unwrap_or_default();

        let mut media_urls = Vec::new();
        for key in ["media_urls", "image_urls"] {
            if let Some(value) = map.remove(key) {
                media_urls.extend(string_list(key, value)?);
            }
        }

        let credentials = match map.remove("credentials") {
            None | Some(Value::Null) => Credentials::new(),
            Some(value @ Value::Object(_)) => serde_json::from_value(value).map_err(|e| {
                PublishError::InvalidArguments(format!(
                    "credentials values must be strings: {e}"
                ))
            })?,
            Some(other) => {
                return Err(PublishError::InvalidArguments(format!(
                    "credentials must be an object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        Ok(Self {
            platform,
            title,
            content,
            media_urls,
            credentials,
            options: map,
        })
    }

    /// Title with surrounding whitespace removed, if non-empty.
    pub fn trimmed_title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// A string option, ignoring blanks and non-string values.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A boolean option. Accepts JSON booleans and the strings
    /// `"true"`/`"false"`; anything else counts as `false`.
    pub fn option_flag(&self, key: &str) -> bool {
        match self.options.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// An unsigned integer option. Accepts JSON numbers and numeric strings.
    pub fn option_u64(&self, key: &str) -> Result<Option<u64>> {
        match self.options.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                PublishError::InvalidArguments(format!("{key} must be a non-negative integer"))
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().map(Some).map_err(|_| {
                PublishError::InvalidArguments(format!("{key} must be a non-negative integer"))
            }),
            Some(other) => Err(PublishError::InvalidArguments(format!(
                "{key} must be an integer, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn take_optional_string(map: &mut Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(PublishError::InvalidArguments(format!(
            "{key} must be a string, got {}",
            json_type_name(&other)
        ))),
    }
}

fn string_list(key: &str, value: Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(PublishError::InvalidArguments(format!(
                    "{key} entries must be strings, got {}",
                    json_type_name(&other)
                ))),
            })
            .collect(),
        other => Err(PublishError::InvalidArguments(format!(
            "{key} must be an array of strings, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_missing_reports_blank_and_absent() {
        let creds = Credentials::new()
            .with("app_id", "wx123")
            .with("app_secret", "  ");
        assert_eq!(creds.missing(&["app_id", "app_secret"]), vec!["app_secret"]);
        assert_eq!(
            Credentials::new().missing(&["sessdata", "bili_jct"]),
            vec!["sessdata", "bili_jct"]
        );
        assert!(creds.missing(&["app_id"]).is_empty());
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = Credentials::new().with("access_token", "very-secret");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("access_token"));
        assert!(!dbg.contains("very-secret"));
    }

    #[test]
    fn from_arguments_splits_known_fields_and_options() {
        let args = json!({
            "title": "T",
            "content": "# H\nbody",
            "credentials": {"app_id": "A", "app_secret": "S"},
            "should_publish": false,
            "author": "me"
        });
        let req = PublishRequest::from_arguments(Platform::WeChat, args).unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert_eq!(req.content, "# H\nbody");
        assert_eq!(req.credentials.get("app_id").unwrap().expose(), "A");
        assert!(!req.option_flag("should_publish"));
        assert_eq!(req.option_str("author"), Some("me"));
        assert!(!req.options.contains_key("credentials"));
        assert!(!req.options.contains_key("title"));
    }

    #[test]
    fn from_arguments_accepts_image_urls_alias() {
        let args = json!({"content": "x", "image_urls": ["https://a/1.png", "https://a/2.png"]});
        let req = PublishRequest::from_arguments(Platform::Xiaohongshu, args).unwrap();
        assert_eq!(req.media_urls, vec!["https://a/1.png", "https://a/2.png"]);
    }

    #[test]
    fn from_arguments_preserves_media_order() {
        let args = json!({"content": "x", "media_urls": ["c", "a", "b"]});
        let req = PublishRequest::from_arguments(Platform::Twitter, args).unwrap();
        assert_eq!(req.media_urls, vec!["c", "a", "b"]);
    }

    #[test]
    fn from_arguments_rejects_bad_shapes() {
        assert!(PublishRequest::from_arguments(Platform::WeChat, json!("text")).is_err());
        assert!(PublishRequest::from_arguments(Platform::WeChat, json!({"title": 5})).is_err());
        assert!(
            PublishRequest::from_arguments(Platform::WeChat, json!({"credentials": "x"})).is_err()
        );
        assert!(
            PublishRequest::from_arguments(Platform::WeChat, json!({"credentials": {"app_id": 1}}))
                .is_err()
        );
        assert!(
            PublishRequest::from_arguments(Platform::Twitter, json!({"media_urls": "one"}))
                .is_err()
        );
    }

    #[test]
    fn from_arguments_null_is_empty_request() {
        let req = PublishRequest::from_arguments(Platform::Feishu, Value::Null).unwrap();
        assert!(req.content.is_empty());
        assert!(req.credentials.is_empty());
    }

    #[test]
    fn option_flag_accepts_string_true() {
        let req = PublishRequest::new(Platform::WeChat, "x").option("should_publish", "TRUE");
        assert!(req.option_flag("should_publish"));
        let req = PublishRequest::new(Platform::WeChat, "x").option("should_publish", 1);
        assert!(!req.option_flag("should_publish"));
    }

    #[test]
    fn option_u64_parses_numbers_and_strings() {
        let req = PublishRequest::new(Platform::Bilibili, "x").option("category", 3);
        assert_eq!(req.option_u64("category").unwrap(), Some(3));
        let req = PublishRequest::new(Platform::Bilibili, "x").option("category", "17");
        assert_eq!(req.option_u64("category").unwrap(), Some(17));
        let req = PublishRequest::new(Platform::Bilibili, "x").option("category", "tech");
        assert!(req.option_u64("category").is_err());
        let req = PublishRequest::new(Platform::Bilibili, "x");
        assert_eq!(req.option_u64("category").unwrap(), None);
    }

    #[test]
    fn trimmed_title_drops_blank() {
        let req = PublishRequest::new(Platform::Feishu, "x").title("   ");
        assert_eq!(req.trimmed_title(), None);
        let req = PublishRequest::new(Platform::Feishu, "x").title(" Notes ");
        assert_eq!(req.trimmed_title(), Some("Notes"));
    }
}
