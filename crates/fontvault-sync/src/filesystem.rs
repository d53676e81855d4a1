//! Local filesystem adapter backed by `tokio::fs`
//!
//! Implements the filesystem port against the real disk. Digests are
//! streamed through a fixed buffer so memory stays flat for large font
//! binaries, and prefix reads open the file only for the duration of one
//! read call.

use anyhow::Context;
use async_trait::async_trait;
use fontvault_core::domain::newtypes::{ContentDigest, VaultPath};
use fontvault_core::ports::filesystem::{FsEntry, FsEntryKind, IFontFileSystem};
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

/// Chunk size for streamed digest reads
const DIGEST_BUF_LEN: usize = 1024 * 1024;

/// Filesystem port implementation over the local disk
#[derive(Debug, Default, Clone)]
pub struct LocalFontFileSystem;

impl LocalFontFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IFontFileSystem for LocalFontFileSystem {
    async fn list_entries(&self, dir: &VaultPath) -> anyhow::Result<Vec<FsEntry>> {
        let mut reader = tokio::fs::read_dir(dir.as_path())
            .await
            .with_context(|| format!("failed to read directory {dir}"))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .with_context(|| format!("failed to iterate directory {dir}"))?
        {
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("failed to stat {}", entry.path().display()))?;
            let kind = if file_type.is_file() {
                FsEntryKind::File
            } else if file_type.is_dir() {
                FsEntryKind::Directory
            } else {
                FsEntryKind::Other
            };
            entries.push(FsEntry {
                path: VaultPath::new(entry.path())?,
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }

    async fn read_prefix(&self, path: &VaultPath, max_len: usize) -> anyhow::Result<Vec<u8>> {
        let mut file = tokio::fs::File::open(path.as_path())
            .await
            .with_context(|| format!("failed to open {path}"))?;
        let mut buf = vec![0u8; max_len];
        let mut filled = 0;
        // read() may return short; keep going until EOF or the buffer is full.
        while filled < max_len {
            let n = file
                .read(&mut buf[filled..])
                .await
                .with_context(|| format!("failed to read {path}"))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);
        Ok(buf)
    }

    async fn file_size(&self, path: &VaultPath) -> anyhow::Result<u64> {
        let metadata = tokio::fs::metadata(path.as_path())
            .await
            .with_context(|| format!("failed to stat {path}"))?;
        Ok(metadata.len())
    }

    async fn content_digest(&self, path: &VaultPath) -> anyhow::Result<ContentDigest> {
        let mut file = tokio::fs::File::open(path.as_path())
            .await
            .with_context(|| format!("failed to open {path}"))?;
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; DIGEST_BUF_LEN];
        loop {
            let n = file
                .read(&mut buf)
                .await
                .with_context(|| format!("failed to read {path}"))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        let digest: [u8; 32] = hasher.finalize().into();
        Ok(ContentDigest::from_bytes(digest))
    }

    async fn copy_file(&self, from: &VaultPath, to: &VaultPath) -> anyhow::Result<u64> {
        tokio::fs::copy(from.as_path(), to.as_path())
            .await
            .with_context(|| format!("failed to copy {from} to {to}"))
    }

    async fn delete_file(&self, path: &VaultPath) -> anyhow::Result<()> {
        tokio::fs::remove_file(path.as_path())
            .await
            .with_context(|| format!("failed to delete {path}"))
    }

    async fn create_dir_all(&self, path: &VaultPath) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(path.as_path())
            .await
            .with_context(|| format!("failed to create directory {path}"))
    }

    async fn exists(&self, path: &VaultPath) -> anyhow::Result<bool> {
        tokio::fs::try_exists(path.as_path())
            .await
            .with_context(|| format!("failed to check existence of {path}"))
    }
}
