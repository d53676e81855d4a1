//! Per-directory listings of font files and subdirectories
//!
//! The scanner enumerates direct children only; recursion is the
//! executor's job. Hidden entries are excluded. An unreadable directory
//! behaves as an empty one: the failure is logged and the listing comes
//! back empty so one bad directory never aborts the rest of the tree.

use std::sync::Arc;

use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::filesystem::{FsEntry, FsEntryKind, IFontFileSystem};
use tracing::warn;

use crate::classify::FontClassifier;

/// A recognized font file found during one sync pass
///
/// Ephemeral: produced by the scanner, consumed by the planner, never
/// persisted. The basename is cached because planning matches by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFileCandidate {
    pub path: VaultPath,
    pub name: String,
}

/// Stateless, read-only directory scanner
#[derive(Clone)]
pub struct DirectoryScanner {
    fs: Arc<dyn IFontFileSystem>,
    classifier: FontClassifier,
}

impl DirectoryScanner {
    #[must_use]
    pub fn new(fs: Arc<dyn IFontFileSystem>, classifier: FontClassifier) -> Self {
        Self { fs, classifier }
    }

    /// Lists the recognized font files directly inside `dir`
    ///
    /// Keeps regular, non-hidden entries whose leading bytes match an
    /// accepted font signature. Results are sorted by basename so planning
    /// is deterministic for a given tree state.
    pub async fn list_font_files(&self, dir: &VaultPath) -> Vec<FontFileCandidate> {
        let mut candidates = Vec::new();

        for entry in self.visible_entries(dir).await {
            if entry.kind != FsEntryKind::File {
                continue;
            }
            if self.classifier.is_font_file(self.fs.as_ref(), &entry.path).await {
                candidates.push(FontFileCandidate {
                    path: entry.path,
                    name: entry.name,
                });
            }
        }

        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        candidates
    }

    /// Lists the non-hidden subdirectories directly inside `dir`
    pub async fn list_subdirectories(&self, dir: &VaultPath) -> Vec<VaultPath> {
        let mut subdirs: Vec<VaultPath> = self
            .visible_entries(dir)
            .await
            .into_iter()
            .filter(|entry| entry.kind == FsEntryKind::Directory)
            .map(|entry| entry.path)
            .collect();

        subdirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        subdirs
    }

    /// Enumerates `dir`, dropping hidden entries; unreadable means empty
    async fn visible_entries(&self, dir: &VaultPath) -> Vec<FsEntry> {
        match self.fs.list_entries(dir).await {
            Ok(entries) => entries.into_iter().filter(|e| !e.is_hidden()).collect(),
            Err(err) => {
                warn!(dir = %dir, %err, "unable to list directory, treating as empty");
                Vec::new()
            }
        }
    }
}
