//! Project Atlas aggregator
//!
//! Boundary glue around the parser and the insights engine:
//!
//! - [`config`]: project list and batch settings
//! - [`source`]: local and remote document sources
//! - [`batch`]: concurrent load + parse with per-document failures
//! - [`writer`]: `index.json` and per-project JSON files
//! - [`exporter`]: single markdown report over the written data
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_aggregator::{aggregate, load_project_entries, write_outputs, AggregatorConfig, LocalSource};
//!
//! let entries = load_project_entries(Path::new("projects.json"))?;
//! let config = AggregatorConfig::default();
//! let source = LocalSource::new("reference", config.clone());
//! let report = aggregate(&entries, &source, &config).await;
//! write_outputs(&report.projects, Path::new("data")).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod batch;
pub mod config;
pub mod error;
pub mod exporter;
pub mod source;
pub mod writer;

// Re-exports for convenience
pub use batch::{aggregate, AggregationReport, DocumentFailure};
pub use config::{load_project_entries, AggregatorConfig, ProjectEntry};
pub use error::{AggregateError, FailureKind, Result, SourceError};
pub use exporter::{export_report, render_report, ExportEntry};
pub use source::{DocumentSource, FileHost, LocalSource, RemoteSource, DEFAULT_BRANCHES};
pub use writer::{is_valid_project_id, write_outputs, INDEX_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
