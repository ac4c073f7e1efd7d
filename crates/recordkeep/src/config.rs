//! Configuration management for recordkeep.
//!
//! Settings are layered with figment: built-in defaults, then an optional TOML
//! file, then `RECORDKEEP_` environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "recordkeep";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "RECORDKEEP_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RECORDKEEP_`)
/// 2. TOML config file at `~/.config/recordkeep/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// Session configuration.
    pub session: SessionConfig,
}

/// How renderings are printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for final state.
    pub format: OutputFormat,
    /// Prefix printed before every rendered list item.
    pub list_marker: String,
}

/// Output format for final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered lists only.
    #[default]
    Plain,
    /// A JSON snapshot of the manager.
    Json,
}

/// How demo sessions start and react to rejected forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Preload the sample records each demo ships with.
    pub load_sample_data: bool,
    /// Abort a replay at the first rejected form.
    pub stop_on_error: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            list_marker: "- ".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            load_sample_data: true,
            stop_on_error: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Self::figment(config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider stack for a given config file.
    #[must_use]
    pub fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.output.list_marker.contains(|c: char| c == '\n' || c == '\r') {
            return Err(Error::ConfigValidation {
                message: format!(
                    "list_marker must be a single line, got {:?}",
                    self.output.list_marker
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.output.format, OutputFormat::Plain);
        assert_eq!(config.output.list_marker, "- ");
        assert!(config.session.load_sample_data);
        assert!(!config.session.stop_on_error);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_multiline_marker() {
        let mut config = Config::default();
        config.output.list_marker = "*\n".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("list_marker"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("recordkeep"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[output]
format = "json"
list_marker = "* "

[session]
load_sample_data = false
"#,
            )?;

            let config =
                Config::load_from(Some(PathBuf::from("config.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.output.format, OutputFormat::Json);
            assert_eq!(config.output.list_marker, "* ");
            assert!(!config.session.load_sample_data);
            assert!(!config.session.stop_on_error);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[session]\nstop_on_error = false\n")?;
            jail.set_env("RECORDKEEP_SESSION__STOP_ON_ERROR", "true");
            jail.set_env("RECORDKEEP_OUTPUT__FORMAT", "json");

            let config =
                Config::load_from(Some(PathBuf::from("config.toml"))).map_err(|e| e.to_string())?;
            assert!(config.session.stop_on_error);
            assert_eq!(config.output.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_marker() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[output]\nlist_marker = \"a\\nb\"\n")?;

            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unknown_format() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[output]\nformat = \"yaml\"\n")?;

            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"format\":\"plain\""));
        assert!(json.contains("load_sample_data"));
    }
}
