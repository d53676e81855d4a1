//! Filesystem port (driven/secondary port)
//!
//! The interface through which the sync engine touches the filesystem:
//! directory enumeration, prefix reads for type sniffing, size lookup,
//! content digests, and the copy/delete/mkdir operations the executor
//! applies.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because filesystem errors are adapter-specific.
//! - Methods never mutate state except `copy_file`, `delete_file`, and
//!   `create_dir_all`; classification and comparison are read-only.
//! - Callers in the engine contain errors locally: an enumeration failure
//!   becomes an empty listing, a read failure during comparison becomes
//!   "not equal". The port itself stays honest and reports the error.

use crate::domain::newtypes::{ContentDigest, VaultPath};

// ============================================================================
// Directory entries
// ============================================================================

/// Discriminated kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symlink, socket, device, or anything else
    Other,
}

/// One direct child of a listed directory
#[derive(Debug, Clone)]
pub struct FsEntry {
    /// Absolute path of the entry
    pub path: VaultPath,
    /// Basename, lossily converted to a string
    pub name: String,
    pub kind: FsEntryKind,
}

impl FsEntry {
    /// Whether the entry is a hidden dotfile
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

// ============================================================================
// IFontFileSystem trait
// ============================================================================

/// Port trait for filesystem operations used by the sync engine
///
/// ## Implementation Notes
///
/// - All paths are `VaultPath` instances, guaranteed absolute.
/// - `read_prefix` must release the file handle before returning, whatever
///   the outcome of the read.
/// - `content_digest` streams the file in bounded chunks; peak memory must
///   not scale with file size.
/// - `copy_file` replaces an existing destination file.
#[async_trait::async_trait]
pub trait IFontFileSystem: Send + Sync {
    /// Enumerates the direct children of a directory
    ///
    /// # Errors
    /// Returns an error if the directory is missing or unreadable
    async fn list_entries(&self, dir: &VaultPath) -> anyhow::Result<Vec<FsEntry>>;

    /// Reads at most `max_len` leading bytes of a file
    ///
    /// Returns fewer bytes when the file is shorter. The file handle is
    /// scoped to this call and released immediately after the read.
    async fn read_prefix(&self, path: &VaultPath, max_len: usize) -> anyhow::Result<Vec<u8>>;

    /// Returns the size of a file in bytes via metadata lookup
    async fn file_size(&self, path: &VaultPath) -> anyhow::Result<u64>;

    /// Computes the streamed SHA-256 digest of a file's contents
    async fn content_digest(&self, path: &VaultPath) -> anyhow::Result<ContentDigest>;

    /// Copies a file, overwriting any existing destination
    ///
    /// # Returns
    /// The number of bytes copied
    async fn copy_file(&self, from: &VaultPath, to: &VaultPath) -> anyhow::Result<u64>;

    /// Deletes a file
    async fn delete_file(&self, path: &VaultPath) -> anyhow::Result<()>;

    /// Creates a directory and all parent directories as needed
    async fn create_dir_all(&self, path: &VaultPath) -> anyhow::Result<()>;

    /// Checks whether a path exists
    async fn exists(&self, path: &VaultPath) -> anyhow::Result<bool>;
}
