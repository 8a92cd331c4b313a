//! Configuration for the marriage service
//!
//! Loaded from a TOML file; every field has a default so an empty file (or no
//! file at all) gives the standard behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wedlock_domain::{ChatColor, Palette};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where snapshot writes happen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushMode {
    /// Write the file before the mutating call returns
    #[default]
    Inline,

    /// Queue snapshots to a single writer task on the tokio runtime
    Background,
}

/// Marriage service configuration
///
/// # Examples
///
/// ```
/// use wedlock_host::{FlushMode, HostConfig};
///
/// let config = HostConfig::default();
/// assert_eq!(config.save_file_name, "marriagemod.json");
/// assert_eq!(config.flush_mode, FlushMode::Inline);
/// assert_eq!(config.palette().unwrap().len(), 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Snapshot file name, resolved against the world root
    /// Default: "marriagemod.json"
    #[serde(default = "default_save_file_name")]
    pub save_file_name: String,

    /// Colors handed to new couples, in order
    /// Default: gold, aqua, light_purple, yellow, green
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Inline or background snapshot writes
    /// Default: inline
    #[serde(default)]
    pub flush_mode: FlushMode,
}

fn default_save_file_name() -> String {
    "marriagemod.json".to_string()
}

fn default_palette() -> Vec<String> {
    Palette::default()
        .colors()
        .iter()
        .map(|c| c.as_str().to_string())
        .collect()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            save_file_name: default_save_file_name(),
            palette: default_palette(),
            flush_mode: FlushMode::default(),
        }
    }
}

impl HostConfig {
    /// Load configuration from a TOML file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: HostConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check the values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.save_file_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("save_file_name is empty".to_string()));
        }
        if Path::new(name).is_absolute() {
            return Err(ConfigError::Invalid(format!(
                "save_file_name must be relative to the world root: {}",
                name
            )));
        }
        self.palette()?;
        Ok(())
    }

    /// The configured palette
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Palette::from_names(&self.palette).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Full path of the snapshot file for a world
    pub fn save_path<P: AsRef<Path>>(&self, world_root: P) -> PathBuf {
        world_root.as_ref().join(self.save_file_name.trim())
    }

    /// Whether `color` is one of the configured palette colors
    pub fn uses_color(&self, color: ChatColor) -> bool {
        self.palette()
            .map(|p| p.colors().contains(&color))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.save_file_name, "marriagemod.json");
        assert_eq!(config.palette, vec!["gold", "aqua", "light_purple", "yellow", "green"]);
        assert_eq!(config.flush_mode, FlushMode::Inline);
        assert!(config.validate().is_ok());
        assert!(config.uses_color(ChatColor::Gold));
        assert!(!config.uses_color(ChatColor::Red));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            save_file_name = "data/couples.json"
            palette = ["red", "BLUE"]
            flush_mode = "background"
        "#;

        let config: HostConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.flush_mode, FlushMode::Background);
        assert_eq!(
            config.palette().unwrap().colors(),
            &[ChatColor::Red, ChatColor::Blue]
        );
        assert_eq!(
            config.save_path("/srv/world"),
            PathBuf::from("/srv/world/data/couples.json")
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: HostConfig = toml::from_str("").unwrap();
        assert_eq!(config.save_file_name, "marriagemod.json");
        assert_eq!(config.palette().unwrap(), Palette::default());
    }

    #[test]
    fn test_validation() {
        let mut config = HostConfig::default();
        config.palette = vec![];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = HostConfig::default();
        config.palette = vec!["gold".to_string(), "pink".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = HostConfig::default();
        config.save_file_name = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_flush_mode_is_rejected() {
        let result: Result<HostConfig, _> = toml::from_str(r#"flush_mode = "sometimes""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = HostConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: HostConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config.save_file_name, deserialized.save_file_name);
        assert_eq!(config.palette, deserialized.palette);
        assert_eq!(config.flush_mode, deserialized.flush_mode);
    }
}
