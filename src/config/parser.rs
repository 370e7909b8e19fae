//! Configuration file parsing (HOCON format).

use std::fs;
use std::path::Path;

use hocon::HoconLoader;

use crate::common::error::{ConfigError, ConfigResult};
use crate::config::types::Config;

/// Read and parse a HOCON config file.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    load_config_str(&content)
}

/// Parse HOCON text into a `Config`, filling unset keys with defaults.
pub fn load_config_str(content: &str) -> ConfigResult<Config> {
    let parse_error = |e: hocon::Error| ConfigError::ParseError {
        message: e.to_string(),
    };
    HoconLoader::new()
        .load_str(content)
        .map_err(parse_error)?
        .resolve()
        .map_err(parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::SecondsRange;

    #[test]
    fn test_parse_full_config() {
        let config = load_config_str(
            r#"
            simulation {
              travelers = 25
              crossing_secs { min = 2, max = 5 }
              arrival_delay_secs { min = 0, max = 1 }
              seed = 99
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.travelers, 25);
        assert_eq!(config.simulation.crossing_secs, SecondsRange { min: 2, max: 5 });
        assert_eq!(config.simulation.arrival_delay_secs, SecondsRange { min: 0, max: 1 });
        assert_eq!(config.simulation.seed, Some(99));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = load_config_str("simulation { travelers = 4 }").unwrap();

        assert_eq!(config.simulation.travelers, 4);
        assert_eq!(config.simulation.crossing_secs, SecondsRange { min: 1, max: 3 });
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("/nonexistent/bridgekeeper.conf");
        match result {
            Err(ConfigError::IoError { path, source }) => {
                assert_eq!(path, "/nonexistent/bridgekeeper.conf");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an io error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_text_is_parse_error() {
        let result = load_config_str("simulation { travelers = ");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_wrong_value_type_is_parse_error() {
        let result = load_config_str("simulation { travelers = many }");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
