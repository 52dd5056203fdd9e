//! Project Atlas document parser
//!
//! Turns a markdown project document into a [`ParsedProject`]:
//!
//! ```text
//! document → extract_manifest → parse_manifest (JSON + schema)
//!          ↘ manifest-free body → parse_blocks → segment (fold) → sections + work items
//! ```
//!
//! Every step is a pure, synchronous function of its input; documents can be
//! parsed in any order or in parallel.
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_parser::parse_project;
//!
//! let project = parse_project(&std::fs::read_to_string("PROJECT_SUMMARY.md")?)?;
//! for item in &project.work_items {
//!     println!("{} [{}] {}", item.item_type, item.completed, item.content);
//! }
//! ```
//!
//! [`ParsedProject`]: atlas_model::ParsedProject

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod classify;
pub mod error;
pub mod manifest;
pub mod markdown;
pub mod project;
pub mod schema;
pub mod segment;

// Re-exports for convenience
pub use classify::{classify_heading, extract_work_items, parse_checkbox_line, Checkbox};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use manifest::{extract_manifest, parse_manifest, ManifestBlock, MANIFEST_END, MANIFEST_START};
pub use markdown::{parse_blocks, Block};
pub use project::{parse_project, ProjectParser};
pub use schema::{manifest_schema, validate_manifest};
pub use segment::{segment, SegmentedBody};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
