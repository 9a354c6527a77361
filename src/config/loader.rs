//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::rule::{DeltaDocument, DeltaSegment};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the segments of an alteration request.
///
/// Only syntax is checked here; referential checks belong to the alteration
/// pipeline, which sees the live configuration.
pub fn load_delta(path: &Path) -> Result<Vec<DeltaSegment>, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let document: DeltaDocument = toml::from_str(&content).map_err(ConfigError::Parse)?;
    Ok(document.segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_temp(
            r#"
            [[traffic.strategies]]
            name = "s1"
            algorithm_name = "s1_sql_hint"
            load_balancer_name = "s1_random"

            [traffic.algorithms.s1_sql_hint]
            type = "SQL_HINT"

            [traffic.load_balancers.s1_random]
            type = "RANDOM"
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.traffic.strategies[0].name, "s1");
    }

    #[test]
    fn test_load_reports_all_validation_errors() {
        let file = write_temp(
            r#"
            [[traffic.strategies]]
            name = "s1"
            algorithm_name = "missing_algo"
            load_balancer_name = "missing_lb"
            "#,
        );
        match load_config(file.path()) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/traffic-rule.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_delta() {
        let file = write_temp(
            r#"
            [[segments]]
            name = "s1"
            algorithm = { name = "SQL_MATCH", props = { sql = "SELECT 1" } }
            "#,
        );
        let segments = load_delta(file.path()).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].algorithm.props["sql"], "SELECT 1");
    }

    #[test]
    fn test_load_delta_parse_error() {
        let file = write_temp("[[segments]]\nname = 1\n");
        assert!(matches!(load_delta(file.path()), Err(ConfigError::Parse(_))));
    }
}
