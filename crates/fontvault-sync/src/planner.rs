//! Sync planning: diff two directory listings into operations
//!
//! Matching is keyed purely on basename string equality (case-sensitive):
//! a renamed file with unchanged content plans as remove-old + copy-new,
//! never as a rename. Copies (adds and updates, in source-listing order)
//! are emitted before removals (in destination-listing order), and the
//! plan is deterministic for a given pair of input sequences.

use std::sync::Arc;

use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::filesystem::IFontFileSystem;
use tracing::debug;

use crate::compare::files_equal;
use crate::scan::FontFileCandidate;

/// One planned filesystem mutation
///
/// Generated by the planner, consumed immediately by the executor for the
/// same directory level; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOperation {
    /// Copy the source file into the destination directory under its
    /// original basename, overwriting any existing file of that name
    CopyFromSource { source: VaultPath },
    /// Delete this destination file; it has no same-named source
    RemoveFromDestination { path: VaultPath },
}

/// Computes the operations that make one destination level mirror source
pub struct SyncPlanner {
    fs: Arc<dyn IFontFileSystem>,
}

impl SyncPlanner {
    #[must_use]
    pub fn new(fs: Arc<dyn IFontFileSystem>) -> Self {
        Self { fs }
    }

    /// Plans copy/remove operations for one directory level
    ///
    /// - Source file with no same-named destination: copy (add).
    /// - Source file whose same-named destination differs in content
    ///   (or cannot be verified): copy (update/overwrite).
    /// - Content-equal pair: no operation.
    /// - Destination file with no same-named source: remove (prune).
    pub async fn plan(
        &self,
        source_files: &[FontFileCandidate],
        destination_files: &[FontFileCandidate],
    ) -> Vec<SyncOperation> {
        let mut operations = Vec::new();

        for from in source_files {
            match destination_files.iter().find(|to| to.name == from.name) {
                None => {
                    debug!(file = %from.name, "planning add");
                    operations.push(SyncOperation::CopyFromSource {
                        source: from.path.clone(),
                    });
                }
                Some(matched) => {
                    if !files_equal(self.fs.as_ref(), &from.path, &matched.path).await {
                        debug!(file = %from.name, "planning update");
                        operations.push(SyncOperation::CopyFromSource {
                            source: from.path.clone(),
                        });
                    }
                }
            }
        }

        for to in destination_files {
            if !source_files.iter().any(|from| from.name == to.name) {
                debug!(file = %to.name, "planning removal");
                operations.push(SyncOperation::RemoveFromDestination {
                    path: to.path.clone(),
                });
            }
        }

        operations
    }
}
