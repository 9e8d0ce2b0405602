//! Configuration Loader
//!
//! Layers a TOML file (if present) under `SCORING_`-prefixed environment
//! variables, deserializes into [`ServiceConfig`] and validates the result.
//!
//! Environment overrides use `__` as the section separator, e.g.
//! `SCORING_STORE__RETRY_ATTEMPTS=5`.

use super::{ConfigurationError, ServiceConfig};
use std::path::Path;
use tracing::debug;

/// Load configuration, optionally from an explicit file path.
///
/// With `None`, looks for `scoring-config.toml` in the working directory;
/// a missing file is not an error, defaults apply.
pub fn load_config(config_path: Option<&Path>) -> Result<ServiceConfig, ConfigurationError> {
    let file_source = match config_path {
        Some(path) => config::File::from(path.to_path_buf()).required(true),
        None => config::File::with_name("scoring-config").required(false),
    };

    let raw = config::Config::builder()
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix("SCORING")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let service_config: ServiceConfig = raw.try_deserialize()?;
    service_config.validate()?;

    debug!(
        backend = %service_config.store.backend,
        bind_address = %service_config.web.bind_address,
        retry_attempts = service_config.store.retry_attempts,
        "configuration loaded"
    );

    Ok(service_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = load_config(None).expect("defaults should load");
        assert_eq!(config.store.backend, "memory");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/scoring.toml")));
        assert!(result.is_err());
    }
}
