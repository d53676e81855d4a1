//! Sync execution: apply planned operations and recurse
//!
//! One executor call handles a single directory level: it applies the
//! planned copies and removals sequentially in planned order, then walks
//! the source subdirectories, ensures each has a same-named destination
//! directory, and recurses into the pair.
//!
//! ## Concurrency
//!
//! By default each subdirectory recursion is spawned as an independent
//! task that nobody awaits: a level is "done" once its own operations and
//! directory creations complete, while child levels continue in the
//! background with no ordering between them. With `await_subdirectories`
//! the child tasks are joined instead, giving callers a whole-tree
//! completion barrier. Operations within one level always apply
//! sequentially. There is no cancellation once a run has started.
//!
//! Failures of individual copies and deletes are logged and counted, never
//! propagated; sibling operations and the rest of the tree proceed.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::filesystem::IFontFileSystem;
use tracing::{debug, warn};

use crate::planner::{SyncOperation, SyncPlanner};
use crate::scan::DirectoryScanner;

// ============================================================================
// Directory pair
// ============================================================================

/// One (source, destination) correspondence at a given depth of the sync
///
/// Created by the orchestrator for the root and by the executor for each
/// matched subdirectory; dropped once that level's operations and
/// recursive descents have been initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPair {
    pub source: VaultPath,
    pub destination: VaultPath,
}

// ============================================================================
// Stats
// ============================================================================

/// Counters shared across all tasks of one sync run
///
/// Atomic so detached subdirectory tasks can keep reporting after the
/// run() caller has returned.
#[derive(Debug, Default)]
pub struct SyncStats {
    files_copied: AtomicU64,
    files_removed: AtomicU64,
    dirs_created: AtomicU64,
    errors: AtomicU64,
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub files_copied: u64,
    pub files_removed: u64,
    pub dirs_created: u64,
    pub errors: u64,
}

impl SyncStats {
    fn record_copy(&self) {
        self.files_copied.fetch_add(1, Ordering::Relaxed);
    }

    fn record_removal(&self) {
        self.files_removed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dir_created(&self) {
        self.dirs_created.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all counters
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            files_copied: self.files_copied.load(Ordering::Relaxed),
            files_removed: self.files_removed.load(Ordering::Relaxed),
            dirs_created: self.dirs_created.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Applies planned operations against the filesystem and recurses
pub struct SyncExecutor {
    fs: Arc<dyn IFontFileSystem>,
    scanner: DirectoryScanner,
    planner: SyncPlanner,
    stats: Arc<SyncStats>,
    await_subdirectories: bool,
}

impl SyncExecutor {
    #[must_use]
    pub fn new(
        fs: Arc<dyn IFontFileSystem>,
        scanner: DirectoryScanner,
        await_subdirectories: bool,
    ) -> Self {
        let planner = SyncPlanner::new(Arc::clone(&fs));
        Self {
            fs,
            scanner,
            planner,
            stats: Arc::new(SyncStats::default()),
            await_subdirectories,
        }
    }

    /// The counters this executor reports into
    #[must_use]
    pub fn stats(&self) -> Arc<SyncStats> {
        Arc::clone(&self.stats)
    }

    /// Synchronizes one directory level and recurses into subdirectories
    ///
    /// Boxed because the future recurses through `tokio::spawn` and itself.
    pub fn sync_tree(
        self: Arc<Self>,
        pair: DirectoryPair,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let this = self;
        Box::pin(async move {
            debug!(source = %pair.source, destination = %pair.destination, "syncing level");

            let source_files = this.scanner.list_font_files(&pair.source).await;
            let destination_files = this.scanner.list_font_files(&pair.destination).await;

            let operations = this.planner.plan(&source_files, &destination_files).await;
            this.apply(&operations, &pair).await;

            let subdirectories = this.scanner.list_subdirectories(&pair.source).await;
            let mut children = Vec::new();

            for subdir in subdirectories {
                let Some(name) = subdir.file_name() else {
                    continue;
                };

                let destination_subdir = match pair.destination.join(&name) {
                    Ok(path) => path,
                    Err(err) => {
                        warn!(subdir = %subdir, %err, "skipping subdirectory with invalid name");
                        this.stats.record_error();
                        continue;
                    }
                };

                if let Err(err) = this.ensure_directory(&destination_subdir).await {
                    warn!(
                        destination = %destination_subdir,
                        %err,
                        "unable to prepare destination subdirectory, skipping branch"
                    );
                    this.stats.record_error();
                    continue;
                }

                let child_pair = DirectoryPair {
                    source: subdir,
                    destination: destination_subdir,
                };

                // Each descent is its own task. Without the barrier the
                // handle is dropped and the child outlives this level.
                let handle = tokio::spawn(Arc::clone(&this).sync_tree(child_pair));
                if this.await_subdirectories {
                    children.push(handle);
                }
            }

            for child in children {
                if let Err(err) = child.await {
                    warn!(%err, "subdirectory sync task panicked");
                    this.stats.record_error();
                }
            }
        })
    }

    /// Applies one level's operations sequentially, in planned order
    async fn apply(&self, operations: &[SyncOperation], pair: &DirectoryPair) {
        for operation in operations {
            match operation {
                SyncOperation::CopyFromSource { source } => {
                    let Some(name) = source.file_name() else {
                        self.stats.record_error();
                        continue;
                    };
                    let target = match pair.destination.join(&name) {
                        Ok(path) => path,
                        Err(err) => {
                            warn!(file = %name, %err, "invalid copy target");
                            self.stats.record_error();
                            continue;
                        }
                    };

                    match self.fs.copy_file(source, &target).await {
                        Ok(bytes) => {
                            debug!(from = %source, to = %target, bytes, "copied font file");
                            self.stats.record_copy();
                        }
                        Err(err) => {
                            warn!(from = %source, to = %target, %err, "unable to copy file");
                            self.stats.record_error();
                        }
                    }
                }
                SyncOperation::RemoveFromDestination { path } => {
                    match self.fs.delete_file(path).await {
                        Ok(()) => {
                            debug!(path = %path, "removed destination-only font file");
                            self.stats.record_removal();
                        }
                        Err(err) => {
                            warn!(path = %path, %err, "unable to remove file");
                            self.stats.record_error();
                        }
                    }
                }
            }
        }
    }

    /// Creates a destination directory (and intermediates) if absent
    async fn ensure_directory(&self, path: &VaultPath) -> anyhow::Result<()> {
        if self.fs.exists(path).await.unwrap_or(false) {
            return Ok(());
        }
        self.fs.create_dir_all(path).await?;
        self.stats.record_dir_created();
        Ok(())
    }
}
