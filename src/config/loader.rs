//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GateConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `decision.api_key`.
pub const ENV_DECISION_API_KEY: &str = "DECISION_API_KEY";

/// Environment variable overriding `cors.origin`.
pub const ENV_CORS_ORIGIN: &str = "CORS_ORIGIN";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration.
///
/// Without a file path, the built-in defaults are used. Environment
/// overrides are applied before validation either way.
pub fn load_config(path: Option<&Path>) -> Result<GateConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GateConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply the two recognized environment overrides. A missing variable
/// leaves the file/default value in place; the values themselves are never
/// validated.
fn apply_env_overrides(config: &mut GateConfig) {
    if let Ok(key) = env::var(ENV_DECISION_API_KEY) {
        config.decision.api_key = key;
    }
    if let Ok(origin) = env::var(ENV_CORS_ORIGIN) {
        config.cors.origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults_without_file() {
        temp_env::with_vars_unset([ENV_DECISION_API_KEY, ENV_CORS_ORIGIN], || {
            let config = load_config(None).unwrap();
            assert_eq!(config.decision.api_key, "");
            assert_eq!(config.cors.origin, "");
        });
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut file = tempfile_path("edge-guard-config-env-test.toml");
        writeln!(
            file.1,
            "[decision]\napi_key = \"from-file\"\n\n[cors]\norigin = \"https://file.example\"\n"
        )
        .unwrap();

        temp_env::with_vars(
            [
                (ENV_DECISION_API_KEY, Some("from-env")),
                (ENV_CORS_ORIGIN, Some("https://env.example")),
            ],
            || {
                let config = load_config(Some(&file.0)).unwrap();
                assert_eq!(config.decision.api_key, "from-env");
                assert_eq!(config.cors.origin, "https://env.example");
            },
        );

        std::fs::remove_file(&file.0).unwrap_or_default();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut file = tempfile_path("edge-guard-config-invalid-test.toml");
        writeln!(file.1, "[listener]\nbind_address = \"nope\"\n").unwrap();

        temp_env::with_vars_unset([ENV_DECISION_API_KEY, ENV_CORS_ORIGIN], || {
            let err = load_config(Some(&file.0)).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("invalid bind address"));
        });

        std::fs::remove_file(&file.0).unwrap_or_default();
    }

    fn tempfile_path(name: &str) -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(name);
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
