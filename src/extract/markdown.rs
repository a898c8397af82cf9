//! Markdown rendered down to plain text

use std::path::Path;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::plain::read_utf8;
use super::TextExtractor;
use crate::error::Result;

/// Renders Markdown to plain paragraphs.
///
/// Paragraphs, headings, list items and table rows each become one paragraph;
/// code blocks contribute one paragraph per line. Markup characters vanish.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let source = read_utf8(path)?;
        Ok(markdown_to_paragraphs(&source))
    }
}

fn markdown_to_paragraphs(source: &str) -> Vec<String> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::Item) => {
                flush(&mut current, &mut paragraphs);
                current.push_str("- ");
            }
            Event::Start(Tag::CodeBlock(_)) => flush(&mut current, &mut paragraphs),
            Event::End(TagEnd::CodeBlock) => {
                for line in current.lines() {
                    paragraphs.push(line.to_string());
                }
                current.clear();
            }
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow,
            ) => flush(&mut current, &mut paragraphs),
            Event::End(TagEnd::TableCell) => current.push_str("  "),
            Event::Text(text) | Event::Code(text) => current.push_str(&text),
            Event::SoftBreak => current.push(' '),
            Event::HardBreak => current.push('\n'),
            Event::Rule => flush(&mut current, &mut paragraphs),
            Event::TaskListMarker(done) => current.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }
    flush(&mut current, &mut paragraphs);

    paragraphs
}

fn flush(current: &mut String, paragraphs: &mut Vec<String>) {
    let text = current.trim();
    if !text.is_empty() && text != "-" {
        paragraphs.push(text.to_string());
    }
    current.clear();
}
