//! Config command - View and manage Fontvault configuration
//!
//! Provides the `fontvault config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use fontvault_core::config::Config;
use fontvault_core::domain::font::FontFormat;
use tracing::info;

use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "sync.source")
        key: String,
        /// New value
        value: String,
    },
    /// Print the configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, config_path).await,
            ConfigCommand::Set { key, value } => {
                self.execute_set(key, value, format, config_path).await
            }
            ConfigCommand::Path => self.execute_path(format, config_path).await,
            ConfigCommand::Validate => self.execute_validate(format, config_path).await,
        }
    }

    /// Show current configuration
    async fn execute_show(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let config = Config::load_or_default(config_path);

        info!(config_path = %config_path.display(), "Showing configuration");

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            format.print_json(&json);
        } else {
            format.success(&format!("Configuration ({})", config_path.display()));
            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                format.info(line);
            }
        }

        Ok(())
    }

    /// Set a configuration value using dot-notation
    async fn execute_set(
        &self,
        key: &str,
        value: &str,
        format: OutputFormat,
        config_path: &Path,
    ) -> Result<()> {
        let mut config = Config::load_or_default(config_path);

        info!(key = %key, value = %value, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            format.error(&format!("Cannot set '{}': {}", key, e));
            std::process::exit(1);
        }

        let errors = config.validate();
        if !errors.is_empty() {
            format.error(&format!(
                "Invalid value for '{}': {}",
                key,
                errors.join("; ")
            ));
            std::process::exit(1);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        std::fs::write(config_path, &yaml).context("Failed to write configuration file")?;

        if format.is_json() {
            format.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": value,
                "config_path": config_path.display().to_string(),
            }));
        } else {
            format.success(&format!("Set {} = {}", key, value));
        }

        Ok(())
    }

    /// Print the resolved configuration file path
    async fn execute_path(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        if format.is_json() {
            format.print_json(&serde_json::json!({
                "config_path": config_path.display().to_string(),
                "exists": config_path.exists(),
            }));
        } else {
            // Bare path on stdout so the output composes in shell pipelines.
            println!("{}", config_path.display());
        }
        Ok(())
    }

    /// Validate the configuration file
    async fn execute_validate(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let config = Config::load_or_default(config_path);
        let errors = config.validate();

        if format.is_json() {
            format.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "errors": errors,
            }));
        } else if errors.is_empty() {
            format.success("Configuration is valid");
        } else {
            format.error(&format!("{} problem(s) found:", errors.len()));
            for error in &errors {
                format.info(&format!("- {}", error));
            }
            std::process::exit(1);
        }

        Ok(())
    }
}

/// Applies a dot-notation key/value pair onto a configuration
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "sync.source" => config.sync.source = PathBuf::from(value),
        "sync.fonts_root" => config.sync.fonts_root = PathBuf::from(value),
        "sync.await_completion" => {
            config.sync.await_completion = value
                .parse::<bool>()
                .with_context(|| format!("not a boolean: {value}"))?;
        }
        "sync.formats" => {
            let formats = value
                .split(',')
                .map(|part| part.trim().parse::<FontFormat>())
                .collect::<Result<Vec<_>, _>>()?;
            config.sync.formats = formats;
        }
        "preview.demo_text" => config.preview.demo_text = value.to_string(),
        "logging.level" => config.logging.level = value.to_string(),
        other => bail!("unknown configuration key: {other}"),
    }
    Ok(())
}
