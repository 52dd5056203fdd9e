//! Section segmentation
//!
//! Folds the top-level blocks of a document into depth-2 sections. The
//! open section travels through the fold as part of the accumulator;
//! blocks seen before the first section heading have nowhere to go and
//! are dropped.

use crate::classify::{classify_heading, extract_work_items};
use crate::error::ParseResult;
use crate::markdown::{parse_blocks, Block};
use atlas_model::{Section, WorkItem, SECTION_LEVEL};

/// Sections of a document plus their work items in one flat list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedBody {
    /// Sections in document order
    pub sections: Vec<Section>,
    /// Concatenation of every section's work items, in section order
    pub work_items: Vec<WorkItem>,
}

/// Split a manifest-free markdown body into sections.
///
/// # Errors
/// Returns `ParseError::SectionParse` if the markdown structure cannot be built.
pub fn segment(content: &str) -> ParseResult<SegmentedBody> {
    let sections = parse_blocks(content)?
        .into_iter()
        .fold(SectionFold::default(), SectionFold::step)
        .finish();

    let work_items = sections
        .iter()
        .flat_map(|s| s.work_items.iter().cloned())
        .collect();

    Ok(SegmentedBody {
        sections,
        work_items,
    })
}

#[derive(Debug, Default)]
struct SectionFold {
    done: Vec<Section>,
    open: Option<Section>,
}

impl SectionFold {
    fn step(mut self, block: Block) -> Self {
        if let Block::Heading {
            depth: SECTION_LEVEL,
            text,
        } = block
        {
            if let Some(section) = self.open.take() {
                self.done.push(section);
            }
            self.open = Some(Section::new(text));
            return self;
        }

        if let Some(section) = self.open.as_mut() {
            append_block(section, block);
        }
        self
    }

    fn finish(mut self) -> Vec<Section> {
        if let Some(section) = self.open.take() {
            self.done.push(section);
        }
        self.done
    }
}

fn append_block(section: &mut Section, block: Block) {
    match block {
        Block::Heading { depth, text } => {
            section.content.push_str(&"#".repeat(usize::from(depth)));
            section.content.push(' ');
            section.content.push_str(&text);
            section.content.push_str("\n\n");
        }
        Block::Paragraph { text } | Block::Other { text } => {
            if !text.trim().is_empty() {
                section.content.push_str(&text);
                section.content.push_str("\n\n");
            }
        }
        Block::List { items } => {
            let rendered = render_list(&items);
            if let Some(item_type) = classify_heading(&section.heading) {
                let found = extract_work_items(&rendered, &section.heading, item_type);
                section.work_items.extend(found);
            }
            section.content.push_str(&rendered);
        }
        Block::Code { lang, body } => {
            section.content.push_str("```");
            section.content.push_str(&lang);
            section.content.push('\n');
            section.content.push_str(&body);
            section.content.push_str("\n```\n\n");
        }
    }
}

/// One `- item` line per entry
fn render_list(items: &[String]) -> String {
    items.iter().fold(String::new(), |mut out, item| {
        out.push_str(format!("- {item}").trim());
        out.push('\n');
        out
    })
}
