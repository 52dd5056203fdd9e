//! Markdown block tree
//!
//! Uses pulldown-cmark (CommonMark, no extensions) and groups its event
//! stream into the top-level blocks the section segmenter cares about.
//! Block quotes are transparent: their child blocks are emitted in place.
//! Everything nested inside any other block is consumed by that block.

use crate::error::{ParseError, ParseResult};
use pulldown_cmark::{CodeBlockKind, Event, Parser as MdParser, Tag, TagEnd};

/// A top-level markdown block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`..`######` or setext heading
    Heading {
        /// Heading depth (1-6)
        depth: u8,
        /// Flattened heading text
        text: String,
    },
    /// Body paragraph
    Paragraph {
        /// Flattened paragraph text
        text: String,
    },
    /// Bullet or ordered list
    List {
        /// Flattened text of each item's first child
        items: Vec<String>,
    },
    /// Fenced or indented code block
    Code {
        /// First word of the info string, empty if none
        lang: String,
        /// Literal body without the final newline
        body: String,
    },
    /// HTML blocks, thematic breaks
    Other {
        /// Flattened text, usually empty
        text: String,
    },
}

/// Parse markdown into its top-level blocks, in document order.
///
/// # Errors
/// Returns `ParseError::SectionParse` if the event stream is unbalanced.
pub fn parse_blocks(content: &str) -> ParseResult<Vec<Block>> {
    let events: Vec<Event<'_>> = MdParser::new(content).collect();

    let mut blocks = Vec::new();
    collect_blocks(&events, &mut blocks)?;
    Ok(blocks)
}

fn collect_blocks(events: &[Event<'_>], blocks: &mut Vec<Block>) -> ParseResult<()> {
    let mut pos = 0;
    while pos < events.len() {
        let end = block_end(events, pos)?;
        let span = &events[pos..=end];
        if matches!(span[0], Event::Start(Tag::BlockQuote(_))) {
            collect_blocks(inner(span), blocks)?;
        } else {
            blocks.push(to_block(span)?);
        }
        pos = end + 1;
    }
    Ok(())
}

/// Index of the event closing the element opened at `start`
fn block_end(events: &[Event<'_>], start: usize) -> ParseResult<usize> {
    let mut depth = 0usize;
    for (offset, event) in events[start..].iter().enumerate() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::section_parse("end event without matching start"))?;
            }
            _ => {}
        }
        if depth == 0 {
            return Ok(start + offset);
        }
    }
    Err(ParseError::section_parse("unterminated block at end of document"))
}

/// Events strictly between a Start and its End
fn inner<'a, 'e>(span: &'a [Event<'e>]) -> &'a [Event<'e>] {
    if span.len() >= 2 {
        &span[1..span.len() - 1]
    } else {
        &[]
    }
}

fn to_block(span: &[Event<'_>]) -> ParseResult<Block> {
    let block = match &span[0] {
        Event::Start(Tag::Heading { level, .. }) => Block::Heading {
            depth: *level as u8,
            text: flatten(inner(span)),
        },
        Event::Start(Tag::Paragraph) => Block::Paragraph {
            text: flatten(inner(span)),
        },
        Event::Start(Tag::List(_)) => Block::List {
            items: list_items(inner(span))?,
        },
        Event::Start(Tag::CodeBlock(kind)) => {
            let lang = match kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or("").to_string(),
                CodeBlockKind::Indented => String::new(),
            };
            let mut body: String = inner(span)
                .iter()
                .filter_map(|e| match e {
                    Event::Text(t) => Some(&**t),
                    _ => None,
                })
                .collect();
            if body.ends_with('\n') {
                body.pop();
            }
            Block::Code { lang, body }
        }
        _ => Block::Other {
            text: flatten(span),
        },
    };
    Ok(block)
}

/// Flattened text of each list item's first child
fn list_items(events: &[Event<'_>]) -> ParseResult<Vec<String>> {
    let mut items = Vec::new();
    let mut pos = 0;
    while pos < events.len() {
        let end = block_end(events, pos)?;
        if matches!(events[pos], Event::Start(Tag::Item)) {
            items.push(first_child_text(inner(&events[pos..=end]))?);
        }
        pos = end + 1;
    }
    Ok(items)
}

/// Tight items hold their inline content directly, loose items wrap it in
/// a paragraph. Either way only the first child is rendered.
fn first_child_text(events: &[Event<'_>]) -> ParseResult<String> {
    match events.first() {
        None => Ok(String::new()),
        Some(Event::Start(tag)) if is_block(tag) => {
            let end = block_end(events, 0)?;
            Ok(flatten(&events[..=end]))
        }
        Some(_) => {
            let stop = events
                .iter()
                .position(|e| matches!(e, Event::Start(tag) if is_block(tag)))
                .unwrap_or(events.len());
            Ok(flatten(&events[..stop]))
        }
    }
}

fn is_block(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::BlockQuote(_)
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::List(_)
            | Tag::Item
    )
}

/// Concatenate literal text, ignoring formatting marks.
///
/// Soft line breaks become `\n`; hard breaks add nothing, so the text on
/// either side is joined directly. Inline code, raw HTML, image alt text and
/// code block bodies are not literal text and are skipped.
#[must_use]
pub fn flatten(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    let mut opaque = 0usize;
    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. }) => opaque += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Image) => opaque = opaque.saturating_sub(1),
            Event::Text(t) if opaque == 0 => text.push_str(t),
            Event::SoftBreak if opaque == 0 => text.push('\n'),
            _ => {}
        }
    }
    text
}
