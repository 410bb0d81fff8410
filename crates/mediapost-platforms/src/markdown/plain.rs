//! Markdown to plain text.
//!
//! Markup is removed but the block structure survives: every paragraph,
//! heading, list item, code block and table row becomes one text block.
//! List items keep a `- ` or `N. ` marker. Raw HTML is dropped.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::ContentRenderer;

/// Renders CommonMark to plain text, blocks separated by a blank line.
pub struct PlainTextRenderer;

impl ContentRenderer for PlainTextRenderer {
    fn render(&self, markdown: &str) -> String {
        blocks(markdown).join("\n\n")
    }
}

/// Split `markdown` into plain-text blocks in document order.
///
/// Empty blocks are skipped. Used directly by adapters that submit one
/// platform block per source block.
pub fn blocks(markdown: &str) -> Vec<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut walker = BlockWalker::default();
    for event in Parser::new_ext(markdown, options) {
        walker.event(event);
    }
    walker.finish()
}

#[derive(Default)]
struct BlockWalker {
    blocks: Vec<String>,
    current: String,
    /// One entry per open list: the next number for ordered lists.
    lists: Vec<Option<u64>>,
    /// Marker written before the first text of the current list item.
    marker: Option<String>,
}

impl BlockWalker {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::BlockQuote(_)
                | Tag::CodeBlock(_)
                | Tag::Table(_) => self.flush(),
                Tag::List(start) => {
                    self.flush();
                    self.lists.push(start);
                }
                Tag::Item => {
                    self.flush();
                    self.marker = Some(match self.lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{n}. ");
                            *n += 1;
                            marker
                        }
                        _ => "- ".to_owned(),
                    });
                }
                Tag::TableCell => {
                    if !self.current.is_empty() {
                        self.current.push_str(" | ");
                    }
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::CodeBlock
                | TagEnd::TableHead
                | TagEnd::TableRow => self.flush(),
                TagEnd::Item => {
                    self.flush();
                    self.marker = None;
                }
                TagEnd::List(_) => {
                    self.flush();
                    self.lists.pop();
                    self.marker = None;
                }
                _ => {}
            },
            Event::Text(text) | Event::Code(text) => self.push(&text),
            Event::SoftBreak | Event::HardBreak => self.push("\n"),
            Event::TaskListMarker(done) => self.push(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn push(&mut self, text: &str) {
        if let Some(marker) = self.marker.take() {
            self.current.push_str(&marker);
        }
        self.current.push_str(text);
    }

    fn flush(&mut self) {
        let block = self.current.trim();
        if !block.is_empty() {
            self.blocks.push(block.to_owned());
        }
        self.current.clear();
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.blocks
    }
}
