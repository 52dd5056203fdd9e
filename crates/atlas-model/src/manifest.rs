//! Project manifest types
//!
//! The manifest is the structured metadata block embedded in every project
//! document. Field names serialize in camelCase to match the on-disk JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The only manifest schema version this crate understands
pub const SCHEMA_VERSION: u32 = 1;

/// Structured project metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Schema version (always 1)
    pub schema_version: u32,
    /// Corpus-wide unique project identifier
    pub project_id: String,
    /// Human readable name
    pub name: String,
    /// Repository identifier (`owner/name`)
    pub repo: String,
    /// Deployment visibility
    pub visibility: Visibility,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Business domain
    pub domain: Domain,
    /// Kind of software
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// ISO-8601 date of the last update
    pub last_updated: String,
    /// Deployment links
    pub links: Links,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Unrecognized fields, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deployment links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Production URL
    pub prod: Option<String>,
    /// Staging URL
    pub staging: Option<String>,
}

/// Deployment visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Publicly reachable
    Public,
    /// Staging only
    Staging,
    /// Private
    Private,
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Actively developed
    Active,
    /// Minimum viable product
    Mvp,
    /// On hold
    Paused,
    /// No longer maintained
    Archived,
}

impl ProjectStatus {
    /// Every status, in declaration order
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Mvp,
        ProjectStatus::Paused,
        ProjectStatus::Archived,
    ];

    /// Wire name of the status
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Mvp => "mvp",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Music tooling and apps
    Music,
    /// Minecraft servers, mods and plugins
    Minecraft,
    /// Internal management and operations
    Management,
    /// Anything else
    Other,
}

/// Kind of software the project ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Browser-facing web application
    Webapp,
    /// Networked backend service
    Microservice,
    /// Standalone utility
    Tool,
    /// Command-line program
    Cli,
    /// Reusable package
    Library,
    /// Anything else
    Other,
}
