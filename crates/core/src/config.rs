//! Editor configuration.
//!
//! Settings live in a YAML file, by default `~/.scribe/config.yml`. A missing
//! file means every setting takes its default.

use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::document::DEFAULT_NAME;
use crate::error::{Error, Result};

/// Default path for the editor configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.scribe/config.yml";

/// Name given to parsed scripts that do not carry one
pub const DEFAULT_PARSE_FALLBACK_NAME: &str = "untitled";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Seconds to wait after each command during playback.
    pub play_command_interval: f64,
    /// Name shown and saved for a script that has none.
    pub default_name: String,
    /// Name used when source text omits `name`.
    pub parse_fallback_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            play_command_interval: 0.3,
            default_name: DEFAULT_NAME.to_string(),
            parse_fallback_name: DEFAULT_PARSE_FALLBACK_NAME.to_string(),
        }
    }
}

impl EditorConfig {
    /// The delay handed to the driver between commands, in milliseconds.
    pub fn post_delay_ms(&self) -> u64 {
        if self.play_command_interval.is_finite() && self.play_command_interval > 0.0 {
            (self.play_command_interval * 1000.0).round() as u64
        } else {
            0
        }
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use scribe_core::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Loads the editor configuration, falling back to defaults when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid YAML.
pub fn load_config(config_path: &str) -> Result<EditorConfig> {
    if !Path::new(config_path).exists() {
        debug!("No config at `{config_path}`, using defaults");
        return Ok(EditorConfig::default());
    }

    let contents = std::fs::read_to_string(config_path)
        .map_err(|e| Error::io_error("config".to_string(), config_path.to_string(), e))?;

    // An empty file deserializes to unit, not to a map.
    if contents.trim().is_empty() {
        return Ok(EditorConfig::default());
    }

    let config: EditorConfig = serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })?;

    info!("Loaded config from `{config_path}`");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.yml".to_string());
        let result = get_config_path(&custom_path);
        assert_eq!(result, "/custom/path/config.yml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with("config.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_load_config_missing_file_gives_defaults() {
        let config = load_config("/this/path/does/not/exist.yml").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.post_delay_ms(), 300);
    }

    #[test]
    fn test_load_config_partial_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "play_command_interval: 1.5").unwrap();

        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.post_delay_ms(), 1500);
        assert_eq!(config.parse_fallback_name, "untitled");
        assert_eq!(config.default_name, "Untitled");
    }

    #[test]
    fn test_load_config_custom_default_name() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "default_name: Scratch").unwrap();
        writeln!(temp_file, "parse_fallback_name: pasted").unwrap();

        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.default_name, "Scratch");
        assert_eq!(config.parse_fallback_name, "pasted");
        assert_eq!(config.post_delay_ms(), 300);
    }

    #[test]
    fn test_load_config_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "play_command_interval: [").unwrap();

        let result = load_config(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_negative_interval_means_no_delay() {
        let config = EditorConfig {
            play_command_interval: -2.0,
            ..EditorConfig::default()
        };
        assert_eq!(config.post_delay_ms(), 0);
    }
}
