use super::{types::ShopConfig, ConfigError};
use crate::auth::RoleTable;
use std::collections::HashSet;

/// Validate configuration
/// Currently validates:
/// - Actor buffer size is not 0
/// - Recipe names are non-empty and unique
/// - Roles form a valid table (no duplicates, unknown parents or cycles)
pub fn validate_config(config: &ShopConfig) -> Result<(), ConfigError> {
    if config.actors.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "actors.buffer_size cannot be 0".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for recipe in &config.recipes {
        let name = recipe.name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationError(
                "recipe name cannot be empty".to_string(),
            ));
        }
        if !names.insert(name) {
            return Err(ConfigError::ValidationError(format!(
                "recipe '{name}' is declared more than once"
            )));
        }
    }

    RoleTable::build(&config.roles)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    Ok(())
}
