//! Project Atlas data model
//!
//! Types shared by the parser, the insights engine and the aggregator:
//!
//! - [`Manifest`]: structured metadata embedded in a project document
//! - [`Section`] / [`WorkItem`]: the parsed body of the document
//! - [`ParsedProject`]: the parser's complete result
//! - [`ProjectSummary`]: the counts-only projection used for analytics
//!
//! All types serialize to the camelCase JSON layout of the project data files.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod manifest;
pub mod project;
pub mod summary;

pub use manifest::{Domain, Links, Manifest, ProjectStatus, ProjectType, Visibility, SCHEMA_VERSION};
pub use project::{ParsedProject, Section, WorkItem, WorkItemType, SECTION_LEVEL};
pub use summary::{completion_percentage, ProjectSummary, TypeCounts, WorkItemsSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
