//! Document sources
//!
//! A [`DocumentSource`] turns a [`ProjectEntry`] into the raw document text.
//! [`LocalSource`] reads converted reference files from disk;
//! [`RemoteSource`] resolves `(repo, path, branch)` against a caller-supplied
//! [`FileHost`], falling back across default branches.

use crate::config::{AggregatorConfig, ProjectEntry};
use crate::error::SourceError;
use std::path::PathBuf;

/// Branches tried after the entry's own branch
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];

/// Loads a project document
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load the document for `entry`
    async fn load(&self, entry: &ProjectEntry) -> Result<String, SourceError>;
}

/// Reads `<root>/<reference file>` from the local filesystem
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
    config: AggregatorConfig,
}

impl LocalSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>, config: AggregatorConfig) -> Self {
        Self { root: root.into(), config }
    }

    /// Path of the reference file for `entry`
    #[must_use]
    pub fn path_for(&self, entry: &ProjectEntry) -> PathBuf {
        self.root.join(self.config.reference_file(&entry.project_id))
    }
}

#[async_trait::async_trait]
impl DocumentSource for LocalSource {
    async fn load(&self, entry: &ProjectEntry) -> Result<String, SourceError> {
        let path = self.path_for(entry);
        let location = path.display().to_string();

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::not_found(location))
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };
        if metadata.len() > self.config.max_document_bytes {
            return Err(SourceError::TooLarge {
                location,
                size: metadata.len(),
                limit: self.config.max_document_bytes,
            });
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })?;
        String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8 { location })
    }
}

/// Transport for files hosted in a remote repository
#[async_trait::async_trait]
pub trait FileHost: Send + Sync {
    /// Fetch `path` from `owner/repo` at `branch`.
    ///
    /// Must return [`SourceError::NotFound`] when the file or branch does not
    /// exist so the caller can try the next branch.
    async fn fetch(&self, owner: &str, repo: &str, path: &str, branch: &str) -> Result<String, SourceError>;
}

/// Resolves documents through a [`FileHost`] with branch fallback
#[derive(Debug, Clone)]
pub struct RemoteSource<H> {
    host: H,
    max_document_bytes: u64,
}

impl<H: FileHost> RemoteSource<H> {
    /// Create a source over `host`
    pub fn new(host: H, config: &AggregatorConfig) -> Self {
        Self {
            host,
            max_document_bytes: config.max_document_bytes,
        }
    }

    /// The underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Fetch `path` from `repo`, trying `branch` first and then
    /// [`DEFAULT_BRANCHES`].
    ///
    /// A not-found result moves on to the next branch; any other error is
    /// returned immediately.
    ///
    /// # Errors
    /// `InvalidRepo` for a malformed repository, `NotFound` when no branch has
    /// the file, otherwise the host's error.
    pub async fn fetch_document(&self, repo: &str, path: &str, branch: Option<&str>) -> Result<String, SourceError> {
        let (owner, name) = split_repo(repo)?;

        let mut candidates: Vec<&str> = branch.into_iter().collect();
        candidates.extend(DEFAULT_BRANCHES.into_iter().filter(|b| Some(*b) != branch));

        for candidate in candidates.iter().copied() {
            match self.host.fetch(owner, name, path, candidate).await {
                Ok(content) => {
                    tracing::debug!(repo, path, branch = candidate, "fetched document");
                    return self.check_size(repo, path, content);
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!(repo, path, branch = candidate, "not found, trying next branch");
                }
                Err(e) => return Err(e),
            }
        }

        Err(SourceError::not_found(format!(
            "{path} in {repo} (tried: {})",
            candidates.join(", ")
        )))
    }

    fn check_size(&self, repo: &str, path: &str, content: String) -> Result<String, SourceError> {
        let size = content.len() as u64;
        if size > self.max_document_bytes {
            return Err(SourceError::TooLarge {
                location: format!("{repo}/{path}"),
                size,
                limit: self.max_document_bytes,
            });
        }
        Ok(content)
    }
}

#[async_trait::async_trait]
impl<H: FileHost> DocumentSource for RemoteSource<H> {
    async fn load(&self, entry: &ProjectEntry) -> Result<String, SourceError> {
        self.fetch_document(&entry.repo, &entry.path, entry.branch.as_deref())
            .await
    }
}

/// Split `owner/name`, rejecting empty halves and extra slashes
fn split_repo(repo: &str) -> Result<(&str, &str), SourceError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(SourceError::InvalidRepo { repo: repo.to_string() }),
    }
}
