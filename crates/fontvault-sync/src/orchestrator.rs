//! Sync entry point: root preparation and run accounting
//!
//! The orchestrator owns the one failure that aborts a run: the
//! destination root cannot be created. Everything below the root is
//! handled by the executor, which degrades per operation instead of
//! failing the run.

use std::sync::Arc;
use std::time::Instant;

use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::filesystem::IFontFileSystem;
use tracing::{info, warn};

use crate::classify::FontClassifier;
use crate::executor::{DirectoryPair, SyncExecutor};
use crate::scan::DirectoryScanner;
use crate::SyncError;

/// Outcome of one sync run
///
/// When the run was fire-and-forget the counters cover the work that had
/// finished by the time the root level returned; detached subdirectory
/// tasks may still be progressing. `complete` distinguishes the two modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub files_copied: u64,
    pub files_removed: u64,
    pub dirs_created: u64,
    pub errors: u64,
    pub duration_ms: u64,
    /// True when every subdirectory task was awaited before returning
    pub complete: bool,
}

/// Drives a whole one-way sync between two directory roots
pub struct SyncOrchestrator {
    fs: Arc<dyn IFontFileSystem>,
    classifier: FontClassifier,
    await_completion: bool,
}

impl SyncOrchestrator {
    #[must_use]
    pub fn new(fs: Arc<dyn IFontFileSystem>, classifier: FontClassifier) -> Self {
        Self {
            fs,
            classifier,
            await_completion: false,
        }
    }

    /// Joins all subdirectory tasks before `run` returns
    #[must_use]
    pub fn with_await_completion(mut self, await_completion: bool) -> Self {
        self.await_completion = await_completion;
        self
    }

    /// Mirrors the font files under `source_root` into `destination_root`
    ///
    /// The destination root is created if absent; failure to create it is
    /// the only error this returns, and in that case no operation has been
    /// attempted.
    pub async fn run(
        &self,
        source_root: VaultPath,
        destination_root: VaultPath,
    ) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        info!(source = %source_root, destination = %destination_root, "starting sync run");

        if let Err(source) = self.fs.create_dir_all(&destination_root).await {
            warn!(destination = %destination_root, %source, "destination root unavailable");
            return Err(SyncError::DestinationUnavailable {
                path: destination_root,
                source,
            });
        }

        let scanner = DirectoryScanner::new(Arc::clone(&self.fs), self.classifier.clone());
        let executor = Arc::new(SyncExecutor::new(
            Arc::clone(&self.fs),
            scanner,
            self.await_completion,
        ));
        let stats = executor.stats();

        executor
            .sync_tree(DirectoryPair {
                source: source_root,
                destination: destination_root,
            })
            .await;

        let snapshot = stats.snapshot();
        let report = SyncReport {
            files_copied: snapshot.files_copied,
            files_removed: snapshot.files_removed,
            dirs_created: snapshot.dirs_created,
            errors: snapshot.errors,
            duration_ms: started.elapsed().as_millis() as u64,
            complete: self.await_completion,
        };
        info!(
            copied = report.files_copied,
            removed = report.files_removed,
            dirs = report.dirs_created,
            errors = report.errors,
            duration_ms = report.duration_ms,
            complete = report.complete,
            "sync run returned"
        );
        Ok(report)
    }
}
