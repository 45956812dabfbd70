//! Parsed commit message types

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A commit message split into its conventional commit parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    /// Commit type (feat, fix, etc.)
    pub commit_type: String,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Subject, the rest of the header after `: `
    pub subject: String,
    /// Body paragraphs, excluding trailers
    pub body: Option<String>,
    /// Trailers from the final paragraph, absent when there are none
    pub trailers: Option<Trailers>,
    /// Whether this is a breaking change
    pub breaking: bool,
    /// Whether this is a `Revert "..."` message
    pub revert: bool,
    /// Whether this is a `Merge ...` message
    pub merge: bool,
}

impl CommitMessage {
    /// Render the conventional header, e.g. `feat(cli)!: add flag`
    ///
    /// Merge messages render their subject verbatim.
    pub fn header(&self) -> String {
        if self.merge {
            return self.subject.clone();
        }

        let mut header = self.commit_type.clone();
        if let Some(scope) = &self.scope {
            header.push('(');
            header.push_str(scope);
            header.push(')');
        }
        if self.breaking {
            header.push('!');
        }
        header.push_str(": ");
        header.push_str(&self.subject);
        header
    }

    /// Whether this message is a revert or merge
    pub fn is_special(&self) -> bool {
        self.revert || self.merge
    }

    /// Get the values of a trailer
    pub fn trailer(&self, key: &str) -> Option<&[String]> {
        self.trailers.as_ref().and_then(|t| t.get(key))
    }
}

/// Ordered trailer mapping
///
/// Keys keep the order in which they were first seen; repeated keys append
/// their values to the existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trailers {
    entries: Vec<(String, Vec<String>)>,
}

impl Trailers {
    /// Create an empty trailer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `key`, creating the key if needed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Get all values for a key
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no trailers are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Trailers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailers_keep_first_seen_order() {
        let mut trailers = Trailers::new();
        trailers.insert("Reviewed-by", "alice");
        trailers.insert("Ticket", "ABC-1");
        trailers.insert("Reviewed-by", "bob");

        let keys: Vec<_> = trailers.keys().collect();
        assert_eq!(keys, vec!["Reviewed-by", "Ticket"]);
        assert_eq!(
            trailers.get("Reviewed-by"),
            Some(&["alice".to_string(), "bob".to_string()][..])
        );
        assert_eq!(trailers.len(), 2);
    }

    #[test]
    fn test_trailers_serialize_as_map() {
        let mut trailers = Trailers::new();
        trailers.insert("Ticket", "ABC-1");
        trailers.insert("Ticket", "DEF-2");

        let json = serde_json::to_string(&trailers).unwrap();
        assert_eq!(json, r#"{"Ticket":["ABC-1","DEF-2"]}"#);
    }

    #[test]
    fn test_header_rendering() {
        let msg = CommitMessage {
            commit_type: "feat".to_string(),
            scope: Some("cli".to_string()),
            subject: "add flag".to_string(),
            breaking: true,
            ..Default::default()
        };
        assert_eq!(msg.header(), "feat(cli)!: add flag");

        let merge = CommitMessage {
            commit_type: "merge".to_string(),
            subject: "Merge branch 'a'".to_string(),
            merge: true,
            ..Default::default()
        };
        assert_eq!(merge.header(), "Merge branch 'a'");
    }
}
