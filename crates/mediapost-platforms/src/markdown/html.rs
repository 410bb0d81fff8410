//! Markdown to HTML, for platforms whose editors store rich HTML
//! (WeChat articles, Bilibili columns).

use pulldown_cmark::{Options, Parser, html};

use super::ContentRenderer;

/// Renders CommonMark (plus tables, strikethrough and task lists) to HTML.
pub struct HtmlRenderer;

impl ContentRenderer for HtmlRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(markdown, options);
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}
