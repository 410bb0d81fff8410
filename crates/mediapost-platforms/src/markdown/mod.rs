//! Content transformation from Markdown into platform dialects.
//!
//! Source content is CommonMark. Two platforms want HTML
//! ([`Platform::renders_html`]); the rest take plain text. Both renderers
//! are pure functions of their input: no network, no hidden state, and
//! block order is always preserved.

pub mod html;
pub mod plain;

use mediapost_types::Platform;

pub use html::HtmlRenderer;
pub use plain::PlainTextRenderer;

/// Converts Markdown source into a target markup dialect.
pub trait ContentRenderer: Send + Sync {
    /// Render `markdown` into the target format.
    fn render(&self, markdown: &str) -> String;
}

/// The renderer a platform's adapter submits content through.
pub fn renderer_for(platform: Platform) -> &'static dyn ContentRenderer {
    if platform.renders_html() {
        &HtmlRenderer
    } else {
        &PlainTextRenderer
    }
}

/// Render `markdown` into the dialect `platform` accepts.
pub fn render_for(platform: Platform, markdown: &str) -> String {
    renderer_for(platform).render(markdown)
}

/// Render Markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    HtmlRenderer.render(markdown)
}

/// Render Markdown to plain text, one blank line between blocks.
pub fn render_plain(markdown: &str) -> String {
    PlainTextRenderer.render(markdown)
}

/// The first `max_chars` characters of `text`, counted as Unicode scalar
/// values so CJK text is never split mid-character.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe() {
        fn _accepts(_: &dyn ContentRenderer) {}
    }

    #[test]
    fn renderer_selection_follows_platform() {
        let md = "**bold**";
        assert_eq!(
            renderer_for(Platform::WeChat).render(md),
            render_html(md)
        );
        assert_eq!(
            renderer_for(Platform::Bilibili).render(md),
            render_html(md)
        );
        assert_eq!(renderer_for(Platform::Twitter).render(md), "bold");
        assert_eq!(renderer_for(Platform::Feishu).render(md), "bold");
    }

    #[test]
    fn plain_platforms_never_see_markdown_syntax() {
        let md = "# Launch\n\n**Big** news, see [docs](https://example.com)";
        for platform in [Platform::Twitter, Platform::Douyin, Platform::Xiaohongshu] {
            assert_eq!(render_for(platform, md), "Launch\n\nBig news, see docs");
        }
        assert_eq!(
            render_for(Platform::WeChat, md),
            "<h1>Launch</h1>\n<p><strong>Big</strong> news, see <a href=\"https://example.com\">docs</a></p>\n"
        );
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        assert_eq!(excerpt("你好世界", 2), "你好");
        assert_eq!(excerpt("abc", 10), "abc");
        assert_eq!(excerpt("", 5), "");
    }

    #[test]
    fn rendering_is_deterministic() {
        let md = "# Title\n\nFirst *para*.\n\n- a\n- b\n\n```\ncode\n```\n";
        assert_eq!(render_html(md), render_html(md));
        assert_eq!(render_plain(md), render_plain(md));
    }
}
