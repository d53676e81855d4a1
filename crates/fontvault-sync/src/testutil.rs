//! In-memory filesystem double for unit tests
//!
//! Backs the port with plain maps so tests can stage trees, inject read
//! failures and observe mutations without touching the disk.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use fontvault_core::domain::newtypes::{ContentDigest, VaultPath};
use fontvault_core::ports::filesystem::{FsEntry, FsEntryKind, IFontFileSystem};
use sha2::{Digest, Sha256};

#[derive(Default)]
struct Inner {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    /// Paths whose content reads fail while metadata keeps working
    poisoned: HashSet<PathBuf>,
    failing_copy_targets: HashSet<PathBuf>,
    digest_calls: usize,
}

/// Shared-state fake; clones see the same tree
#[derive(Clone, Default)]
pub(crate) struct MemoryFileSystem {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryFileSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_dir(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap();
        insert_with_ancestors(&mut inner.dirs, Path::new(path));
    }

    pub(crate) fn add_file(&self, path: &str, bytes: &[u8]) {
        let path = PathBuf::from(path);
        let mut inner = self.inner.lock().unwrap();
        if let Some(parent) = path.parent() {
            insert_with_ancestors(&mut inner.dirs, parent);
        }
        inner.files.insert(path, bytes.to_vec());
    }

    /// Makes content reads of `path` fail; size lookups still succeed
    pub(crate) fn poison(&self, path: &str) {
        self.inner.lock().unwrap().poisoned.insert(PathBuf::from(path));
    }

    /// Makes any copy targeting `path` fail
    pub(crate) fn fail_copies_to(&self, path: &str) {
        self.inner
            .lock()
            .unwrap()
            .failing_copy_targets
            .insert(PathBuf::from(path));
    }

    pub(crate) fn digest_calls(&self) -> usize {
        self.inner.lock().unwrap().digest_calls
    }

    pub(crate) fn file_contents(&self, path: &str) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().files.get(Path::new(path)).cloned()
    }

    pub(crate) fn dir_exists(&self, path: &str) -> bool {
        self.inner.lock().unwrap().dirs.contains(Path::new(path))
    }
}

fn insert_with_ancestors(dirs: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = Some(path);
    while let Some(dir) = current {
        if dir.as_os_str().is_empty() || dir == Path::new("/") {
            break;
        }
        dirs.insert(dir.to_path_buf());
        current = dir.parent();
    }
}

fn entry_for(path: &Path, kind: FsEntryKind) -> anyhow::Result<FsEntry> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("entry without a name: {}", path.display()))?;
    Ok(FsEntry {
        path: VaultPath::new(path.to_path_buf())?,
        name,
        kind,
    })
}

#[async_trait]
impl IFontFileSystem for MemoryFileSystem {
    async fn list_entries(&self, dir: &VaultPath) -> anyhow::Result<Vec<FsEntry>> {
        let inner = self.inner.lock().unwrap();
        let dir = dir.as_path();
        if !inner.dirs.contains(dir) {
            bail!("no such directory: {}", dir.display());
        }

        let mut entries = Vec::new();
        for file in inner.files.keys() {
            if file.parent() == Some(dir) {
                entries.push(entry_for(file, FsEntryKind::File)?);
            }
        }
        for subdir in &inner.dirs {
            if subdir.parent() == Some(dir) {
                entries.push(entry_for(subdir, FsEntryKind::Directory)?);
            }
        }
        Ok(entries)
    }

    async fn read_prefix(&self, path: &VaultPath, max_len: usize) -> anyhow::Result<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        if inner.poisoned.contains(path.as_path()) {
            bail!("injected read failure: {}", path);
        }
        let bytes = inner
            .files
            .get(path.as_path())
            .ok_or_else(|| anyhow!("no such file: {}", path))?;
        Ok(bytes[..bytes.len().min(max_len)].to_vec())
    }

    async fn file_size(&self, path: &VaultPath) -> anyhow::Result<u64> {
        let inner = self.inner.lock().unwrap();
        let bytes = inner
            .files
            .get(path.as_path())
            .ok_or_else(|| anyhow!("no such file: {}", path))?;
        Ok(bytes.len() as u64)
    }

    async fn content_digest(&self, path: &VaultPath) -> anyhow::Result<ContentDigest> {
        let mut inner = self.inner.lock().unwrap();
        inner.digest_calls += 1;
        if inner.poisoned.contains(path.as_path()) {
            bail!("injected read failure: {}", path);
        }
        let bytes = inner
            .files
            .get(path.as_path())
            .ok_or_else(|| anyhow!("no such file: {}", path))?;
        let digest: [u8; 32] = Sha256::digest(bytes).into();
        Ok(ContentDigest::from_bytes(digest))
    }

    async fn copy_file(&self, from: &VaultPath, to: &VaultPath) -> anyhow::Result<u64> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing_copy_targets.contains(to.as_path()) {
            bail!("injected copy failure: {}", to);
        }
        let bytes = inner
            .files
            .get(from.as_path())
            .ok_or_else(|| anyhow!("no such file: {}", from))?
            .clone();
        let len = bytes.len() as u64;
        inner.files.insert(to.as_path().to_path_buf(), bytes);
        Ok(len)
    }

    async fn delete_file(&self, path: &VaultPath) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .files
            .remove(path.as_path())
            .ok_or_else(|| anyhow!("no such file: {}", path))?;
        Ok(())
    }

    async fn create_dir_all(&self, path: &VaultPath) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        insert_with_ancestors(&mut inner.dirs, path.as_path());
        Ok(())
    }

    async fn exists(&self, path: &VaultPath) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        let path = path.as_path();
        Ok(inner.files.contains_key(path) || inner.dirs.contains(path))
    }
}
