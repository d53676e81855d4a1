//! Sync command - Mirror the watched folder into the fonts root
//!
//! Provides the `fontvault sync` CLI command which:
//! 1. Loads configuration and resolves the directory grant
//! 2. Creates the local filesystem adapter and classifier
//! 3. Runs the sync orchestrator and displays the results

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Sync from this directory instead of the configured source
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Wait for all subdirectory tasks before reporting results
    #[arg(long)]
    pub wait: bool,
}

impl SyncCommand {
    /// Execute the sync command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use fontvault_core::config::Config;
        use fontvault_core::ports::directory_access::IDirectoryAccess;
        use fontvault_sync::access::ConfigDirectoryAccess;
        use fontvault_sync::classify::FontClassifier;
        use fontvault_sync::filesystem::LocalFontFileSystem;
        use fontvault_sync::orchestrator::SyncOrchestrator;

        let config = Config::load_or_default(config_path);
        info!(config_path = %config_path.display(), "Loaded configuration");

        let mut sync_config = config.sync.clone();
        if let Some(source) = &self.source {
            sync_config.source = source.clone();
        }

        let access = ConfigDirectoryAccess::new(sync_config.clone());
        let grant = match access.acquire().await {
            Ok(grant) => grant,
            Err(e) => {
                format.error(&format!("Cannot resolve sync directories: {:#}", e));
                std::process::exit(1);
            }
        };

        info!(
            source = %grant.source_root,
            destination = %grant.destination_root,
            "Resolved sync roots"
        );

        let classifier = FontClassifier::new(sync_config.formats.clone());
        let await_completion = self.wait || sync_config.await_completion;
        let orchestrator =
            SyncOrchestrator::new(Arc::new(LocalFontFileSystem::new()), classifier)
                .with_await_completion(await_completion);

        format.info("Starting synchronization...");

        let report = match orchestrator
            .run(grant.source_root, grant.destination_root)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                format.error(&format!("Sync failed: {}", e));
                std::process::exit(1);
            }
        };

        if format.is_json() {
            let json = serde_json::json!({
                "files_copied": report.files_copied,
                "files_removed": report.files_removed,
                "dirs_created": report.dirs_created,
                "errors": report.errors,
                "duration_ms": report.duration_ms,
                "complete": report.complete,
            });
            format.print_json(&json);
        } else {
            let duration_display = if report.duration_ms >= 1000 {
                format!("{:.1}s", report.duration_ms as f64 / 1000.0)
            } else {
                format!("{}ms", report.duration_ms)
            };

            let total = report.files_copied + report.files_removed;
            if total == 0 && report.errors == 0 {
                format.success("Already up to date");
            } else {
                format.success(&format!("Sync completed in {}", duration_display));
            }

            if report.files_copied > 0 {
                format.info(&format!(
                    "Copied:  {} file{}",
                    report.files_copied,
                    if report.files_copied == 1 { "" } else { "s" }
                ));
            }
            if report.files_removed > 0 {
                format.info(&format!(
                    "Removed: {} file{}",
                    report.files_removed,
                    if report.files_removed == 1 { "" } else { "s" }
                ));
            }
            if report.dirs_created > 0 {
                format.info(&format!(
                    "Created: {} director{}",
                    report.dirs_created,
                    if report.dirs_created == 1 { "y" } else { "ies" }
                ));
            }
            if report.errors > 0 {
                format.warn(&format!(
                    "{} operation{} failed; see the log for details",
                    report.errors,
                    if report.errors == 1 { "" } else { "s" }
                ));
            }
            if !report.complete {
                format.info("Subdirectory syncs continue in the background");
            }
        }

        Ok(())
    }
}
