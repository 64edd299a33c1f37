use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::ShopConfig, validate_config, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// `COFFEE_ACTORS__BUFFER_SIZE=64` overrides `[actors] buffer_size`.
pub fn load_config(path: &Path) -> Result<ShopConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: ShopConfig = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("COFFEE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<ShopConfig, ConfigError> {
    let config: ShopConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Operation;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.actors.buffer_size, 32);
        assert_eq!(config.roles.len(), 3);
        assert!(config.recipes.is_empty());
    }

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[log]
level = "debug"

[[roles]]
name = "barista"
default_password = "beans"
allowed = ["claim_order", "work_order"]

[[recipes]]
name = "latte"
price = 350
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.roles.len(), 1);
        assert_eq!(config.roles[0].allowed, vec![Operation::ClaimOrder, Operation::WorkOrder]);
        assert_eq!(config.recipes[0].price, 350);
    }

    #[test]
    fn test_unknown_operation_is_a_parse_error() {
        let toml = r#"
[[roles]]
name = "barista"
allowed = ["brew_everything"]
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/coffee.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[actors]
buffer_size = 8

[[recipes]]
name = "mocha"
price = 425
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.actors.buffer_size, 8);
        assert_eq!(config.recipes[0].name, "mocha");
        assert_eq!(config.roles.len(), 3);
    }

    #[test]
    fn test_file_is_validated() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[actors]\nbuffer_size = 0").unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
