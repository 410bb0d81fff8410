//! The tool surface: one tool per platform, each with a JSON Schema.

use mediapost_types::Platform;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A tool as advertised to the calling agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (`publish_to_<platform>`).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's arguments.
    #[serde(rename = "inputSchema", alias = "input_schema")]
    pub input_schema: Value,
}

/// Definitions for every tool, in [`Platform::ALL`] order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    Platform::ALL.into_iter().map(definition).collect()
}

/// Resolve a tool name to its platform.
pub fn find(name: &str) -> Option<Platform> {
    Platform::from_tool_name(name)
}

/// The definition of `platform`'s tool.
pub fn definition(platform: Platform) -> ToolDefinition {
    let (description, required, optional) = surface(platform);

    let mut properties = Map::new();
    for field in required.iter().chain(optional) {
        if *field == "credentials" {
            continue;
        }
        properties.insert((*field).to_owned(), field_schema(platform, field));
    }
    properties.insert("credentials".to_owned(), credentials_schema(platform));

    ToolDefinition {
        name: platform.tool_name().to_owned(),
        description: description.to_owned(),
        input_schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

type Surface = (&'static str, &'static [&'static str], &'static [&'static str]);

fn surface(platform: Platform) -> Surface {
    match platform {
        Platform::Douyin => (
            "Publish a caption for a video already uploaded to Douyin. Requires video_id; binary video upload is not supported.",
            &["content", "credentials"],
            &["media_urls", "video_id"],
        ),
        Platform::WeChat => (
            "Create a WeChat Official Account article draft from Markdown and optionally submit it for publishing.",
            &["title", "content", "credentials"],
            &["author", "thumb_media_id", "should_publish"],
        ),
        Platform::Xiaohongshu => (
            "Publish an image note to Xiaohongshu.",
            &["title", "content", "credentials"],
            &["image_urls"],
        ),
        Platform::Bilibili => (
            "Save a Bilibili column article draft from Markdown.",
            &["title", "content", "credentials"],
            &["category"],
        ),
        Platform::Twitter => (
            "Post text to Twitter / X. Media attachments are not supported and are rejected.",
            &["content", "credentials"],
            &["media_urls"],
        ),
        Platform::Feishu => (
            "Create a Feishu document with a title and plain-text body.",
            &["title", "content", "credentials"],
            &[],
        ),
    }
}

fn field_schema(platform: Platform, field: &str) -> Value {
    match field {
        "title" => json!({"type": "string", "description": "Title of the post or document"}),
        "content" => json!({"type": "string", "description": "Body in Markdown"}),
        "media_urls" if platform == Platform::Twitter => json!({
            "type": "array",
            "items": {"type": "string"},
            "description": "Not supported; a non-empty list fails the call"
        }),
        "media_urls" | "image_urls" => json!({
            "type": "array",
            "items": {"type": "string"},
            "description": "Ordered media URLs"
        }),
        "video_id" => json!({"type": "string", "description": "Id of the already uploaded video"}),
        "author" => json!({"type": "string", "description": "Article author"}),
        "thumb_media_id" => json!({"type": "string", "description": "Media id of the cover image"}),
        "should_publish" => json!({
            "type": "boolean",
            "default": false,
            "description": "Submit the draft for publishing instead of leaving it in the draft box"
        }),
        "category" => json!({
            "type": "integer",
            "default": mediapost_platforms::bilibili::DEFAULT_CATEGORY,
            "description": "Column category id"
        }),
        _ => json!({"type": "string"}),
    }
}

fn credentials_schema(platform: Platform) -> Value {
    let fields = platform.required_credentials();
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| ((*f).to_owned(), json!({"type": "string"})))
        .collect();
    json!({
        "type": "object",
        "description": format!("{} credentials", platform.display_name()),
        "properties": properties,
        "required": fields,
    })
}
