//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "commitlint.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "commitlint.yaml";

/// Default start revision
pub const DEFAULT_REVISION: &str = "HEAD";

/// Types defined by Conventional Commits 1.0.0 and its common extensions
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Additional types from the Angular commit guidelines
pub const ANGULAR_TYPES: &[&str] = &["improvement"];

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".commitlint.toml",
        ".commitlint.yaml",
    ]
}

/// The default allow-list of commit types
pub fn default_commit_types() -> Vec<String> {
    CONVENTIONAL_TYPES
        .iter()
        .chain(ANGULAR_TYPES)
        .map(|t| t.to_string())
        .collect()
}
