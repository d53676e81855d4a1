//! Configuration module for Fontvault.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::font::FontFormat;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Fontvault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Watched folder that is authoritative for synced fonts.
    pub source: PathBuf,
    /// Root of the user's font tree. Synced trees land under
    /// `<fonts_root>/Sync/<source basename>`.
    pub fonts_root: PathBuf,
    /// When true, a sync run waits for all subdirectory tasks before
    /// returning. Default is false: subdirectory syncs are detached.
    pub await_completion: bool,
    /// Font formats accepted by the file classifier.
    pub formats: Vec<FontFormat>,
}

/// Text preview settings (consumed by presentation layers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Sample text rendered when previewing a font.
    pub demo_text: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/fontvault/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("fontvault")
            .join("config.yaml")
    }

    /// Validate the configuration, returning one message per problem.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.sync.source.is_absolute() {
            errors.push(format!(
                "sync.source must be an absolute path: {}",
                self.sync.source.display()
            ));
        }
        if !self.sync.fonts_root.is_absolute() {
            errors.push(format!(
                "sync.fonts_root must be an absolute path: {}",
                self.sync.fonts_root.display()
            ));
        }
        if self.sync.formats.is_empty() {
            errors.push("sync.formats must list at least one format".to_string());
        }
        if !matches!(
            self.logging.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            errors.push(format!("logging.level is not valid: {}", self.logging.level));
        }

        errors
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        Self {
            source: home.join("Fonts"),
            fonts_root: dirs::font_dir()
                .unwrap_or_else(|| home.join(".local/share/fonts")),
            await_completion: false,
            formats: vec![FontFormat::Otf, FontFormat::Ttf],
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            demo_text: "Typography".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_empty());
        assert!(!config.sync.await_completion);
        assert_eq!(
            config.sync.formats,
            vec![FontFormat::Otf, FontFormat::Ttf]
        );
        assert_eq!(config.preview.demo_text, "Typography");
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sync:\n  source: /data/fonts\n  fonts_root: /home/user/.fonts\n  await_completion: true\n  formats: [otf, ttf, woff2]"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sync.source, PathBuf::from("/data/fonts"));
        assert!(config.sync.await_completion);
        assert_eq!(config.sync.formats.len(), 3);
        assert!(config.sync.formats.contains(&FontFormat::Woff2));
        // Missing sections fall back to defaults
        assert_eq!(config.preview.demo_text, "Typography");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.yaml"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_flags_problems() {
        let mut config = Config::default();
        config.sync.source = PathBuf::from("relative/fonts");
        config.sync.formats.clear();
        config.logging.level = "noisy".to_string();

        let errors = config.validate();
        assert_eq!(errors.len(), 3);
    }
}
