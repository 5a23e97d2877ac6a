use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    magic::ENV_CONFIG_PATH,
    search::SearchLimits,
    utils::error::{MiuError, MiuResult},
};

/// User configuration, read from a TOML file.
///
/// ```toml
/// [search]
/// max_steps = 24
/// max_length = 14
/// max_states = 100000
/// ```
///
/// Every key is optional; missing keys keep their default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiuConfig {
    pub search: SearchLimits,
}

impl MiuConfig {
    /// Get the default path to the configuration file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push("miu");
        path.push("config.toml");
        path
    }

    /// Parse a configuration from TOML text. `file` is only used for error reporting.
    pub fn from_toml_str(text: &str, file: &str) -> MiuResult<Self> {
        toml::from_str(text).map_err(|source| MiuError::ConfigParseError {
            source,
            file: file.to_string(),
        })
    }

    /// Load the configuration stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> MiuResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Same as [`MiuConfig::load`], but a missing file yields the default configuration.
    pub fn load_or_default(path: impl AsRef<Path>) -> MiuResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::{DEFAULT_MAX_LENGTH, DEFAULT_MAX_STEPS};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = MiuConfig::from_toml_str("[search]\nmax_steps = 7\n", "inline").unwrap();
        assert_eq!(config.search.max_steps, 7);
        assert_eq!(config.search.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(config.search.max_states, None);
    }

    #[test]
    fn empty_config_is_default() {
        let config = MiuConfig::from_toml_str("", "inline").unwrap();
        assert_eq!(config, MiuConfig::default());
        assert_eq!(config.search.max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn unknown_key_is_reported_with_file_name() {
        let err = MiuConfig::from_toml_str("[search]\nmax_depth = 3\n", "broken.toml").unwrap_err();
        match err {
            MiuError::ConfigParseError { file, .. } => assert_eq!(file, "broken.toml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("miu-conf-{}.toml", std::process::id()));
        std::fs::write(&path, "[search]\nmax_length = 12\nmax_states = 500\n").unwrap();
        let config = MiuConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.search.max_length, 12);
        assert_eq!(config.search.max_states, Some(500));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("miu-conf-does-not-exist/config.toml");
        assert_eq!(MiuConfig::load_or_default(&path).unwrap(), MiuConfig::default());
        assert!(matches!(MiuConfig::load(&path), Err(MiuError::IoError(_))));
    }
}
