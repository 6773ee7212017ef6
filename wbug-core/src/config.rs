use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// The WeatherBug API code (`ACode`) sent with every request.
    pub api_code: Option<String>,

    /// ZIP code used when a command is run without one.
    pub default_zip: Option<String>,
}

impl Config {
    /// Return the configured API code, with a hint when it is missing.
    pub fn api_code(&self) -> Result<&str> {
        self.api_code.as_deref().ok_or_else(|| {
            anyhow!(
                "No WeatherBug API code configured.\n\
                 Hint: run `wbug configure` and enter your API code first."
            )
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_code.is_some()
    }

    /// Set/replace the API code.
    pub fn set_api_code(&mut self, api_code: String) {
        self.api_code = Some(api_code);
    }

    /// Resolve a ZIP code: an explicit one wins, the configured default
    /// otherwise.
    pub fn resolve_zip(&self, explicit: Option<String>) -> Result<String> {
        explicit.or_else(|| self.default_zip.clone()).ok_or_else(|| {
            anyhow!(
                "No ZIP code given and no default configured.\n\
                 Hint: pass a ZIP code, or run `wbug configure` to set a default."
            )
        })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wbug", "wbug-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_code_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_code().unwrap_err();

        assert!(err.to_string().contains("No WeatherBug API code configured"));
        assert!(!cfg.is_configured());
    }

    #[test]
    fn set_api_code_round_trips() {
        let mut cfg = Config::default();

        cfg.set_api_code("A9999999999".into());

        assert!(cfg.is_configured());
        assert_eq!(cfg.api_code().expect("api code must exist"), "A9999999999");
    }

    #[test]
    fn resolve_zip_prefers_the_explicit_argument() {
        let cfg = Config { default_zip: Some("02134".into()), ..Config::default() };

        let zip = cfg.resolve_zip(Some("90210".into())).expect("zip must resolve");
        assert_eq!(zip, "90210");

        let fallback = cfg.resolve_zip(None).expect("default zip must resolve");
        assert_eq!(fallback, "02134");
    }

    #[test]
    fn resolve_zip_errors_without_argument_or_default() {
        let cfg = Config::default();
        let err = cfg.resolve_zip(None).unwrap_err();

        assert!(err.to_string().contains("No ZIP code given"));
    }
}
