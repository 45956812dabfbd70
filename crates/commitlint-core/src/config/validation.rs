//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_lint(config)?;
    validate_revision(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_lint(config: &Config) -> Result<()> {
    if config.lint.types.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "lint.types".to_string(),
            message: "at least one commit type must be allowed".to_string(),
        }
        .into());
    }

    for (i, commit_type) in config.lint.types.iter().enumerate() {
        if commit_type.trim().is_empty() || commit_type.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: format!("lint.types[{}]", i),
                message: format!("{:?} is not a valid commit type", commit_type),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_revision(config: &Config) -> Result<()> {
    if config.revision.start.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "revision.start".to_string(),
            message: "start revision cannot be empty".to_string(),
        }
        .into());
    }

    if config
        .revision
        .other
        .as_deref()
        .is_some_and(|other| other.trim().is_empty())
    {
        return Err(ConfigError::InvalidValue {
            field: "revision.other".to_string(),
            message: "boundary revision cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_types() {
        let mut config = Config::default();
        config.lint.types.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_type_with_space() {
        let mut config = Config::default();
        config.lint.types.push("BREAKING CHANGE".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_revision() {
        let mut config = Config::default();
        config.revision.start = "  ".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.revision.other = Some(String::new());
        assert!(validate_config(&config).is_err());
    }
}
