//! Git repository operations

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use git2::{ErrorCode, Oid, Repository};
use tracing::{debug, info, instrument};

use commitlint_core::error::GitError;

use crate::graph::CommitGraph;
use crate::types::CommitInfo;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path (the workdir, or the git dir when bare)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the repository's hook scripts
    pub fn hooks_dir(&self) -> PathBuf {
        self.repo.path().join("hooks")
    }

    /// Get a reference to the inner git2 Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    fn find_commit(&self, hash: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(hash).map_err(|_| GitError::CommitNotFound(hash.to_string()))?;
        self.repo.find_commit(oid).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::CommitNotFound(hash.to_string())
            } else {
                GitError::Git2(e)
            }
        })
    }
}

impl CommitGraph for GitRepo {
    #[instrument(skip(self))]
    fn resolve_revision(&self, revision: &str) -> Result<String> {
        let commit = self
            .repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| match e.code() {
                ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous => {
                    GitError::UnknownRevision(revision.to_string())
                }
                _ => GitError::Git2(e),
            })?;

        let hash = commit.id().to_string();
        debug!(revision, hash = %hash, "resolved revision");
        Ok(hash)
    }

    fn commit(&self, hash: &str) -> Result<CommitInfo> {
        let commit = self.find_commit(hash)?;
        Ok(commit_to_info(&commit))
    }

    #[instrument(skip(self))]
    fn merge_bases(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let one = self.find_commit(a)?.id();
        let two = self.find_commit(b)?.id();

        let bases = self.repo.merge_bases(one, two).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::NoMergeBase(a.to_string(), b.to_string())
            } else {
                GitError::Git2(e)
            }
        })?;

        Ok(bases.iter().map(Oid::to_string).collect())
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let committer = commit.committer();

    let mut info = CommitInfo::new(
        commit.id().to_string(),
        String::from_utf8_lossy(commit.message_bytes()),
    )
    .with_parents(commit.parent_ids().map(|id| id.to_string()))
    .with_author(
        String::from_utf8_lossy(author.name_bytes()),
        String::from_utf8_lossy(author.email_bytes()),
    )
    .with_committer(
        String::from_utf8_lossy(committer.name_bytes()),
        String::from_utf8_lossy(committer.email_bytes()),
    );

    if let Some(timestamp) = Utc.timestamp_opt(commit.time().seconds(), 0).single() {
        info = info.with_timestamp(timestamp);
    }
    info
}
