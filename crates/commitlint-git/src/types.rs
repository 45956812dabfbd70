//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Full raw commit message
    pub message: String,
    /// Parent hashes, first parent first
    pub parents: Vec<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Committer name
    pub committer: String,
    /// Committer email
    pub committer_email: String,
    /// Commit timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl CommitInfo {
    /// Create a new CommitInfo with no parents or identities
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            parents: Vec::new(),
            author: String::new(),
            author_email: String::new(),
            committer: String::new(),
            committer_email: String::new(),
            timestamp: None,
        }
    }

    /// Set the parent hashes
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Set the author identity
    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = name.into();
        self.author_email = email.into();
        self
    }

    /// Set the committer identity
    pub fn with_committer(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.committer = name.into();
        self.committer_email = email.into();
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Whether this commit has no parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_info() {
        let commit = CommitInfo::new("abc1234567890", "feat: add feature\n\nbody\n")
            .with_author("Author", "author@example.com")
            .with_parents(["def4567"]);

        assert_eq!(commit.short_hash, "abc1234");
        assert_eq!(commit.summary(), "feat: add feature");
        assert_eq!(commit.author_email, "author@example.com");
        assert!(!commit.is_root());
    }

    #[test]
    fn test_root_commit() {
        let commit = CommitInfo::new("abc", "");
        assert!(commit.is_root());
        assert_eq!(commit.short_hash, "abc");
        assert_eq!(commit.summary(), "");
    }
}
