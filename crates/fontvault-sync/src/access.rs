//! Directory grant resolution from configuration
//!
//! Maps the configured watched folder and fonts root onto a concrete
//! grant: the destination is a per-source subtree under
//! `<fonts_root>/Sync/<source basename>`, so several watched folders can
//! mirror into the same fonts root without colliding.

use std::path::Path;

use anyhow::{bail, Context};
use async_trait::async_trait;
use fontvault_core::config::SyncConfig;
use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::directory_access::{DirectoryGrant, IDirectoryAccess};

/// Subtree of the fonts root reserved for mirrored sources
const SYNC_SUBTREE: &str = "Sync";

/// Resolves sync roots from a [`SyncConfig`]
pub struct ConfigDirectoryAccess {
    config: SyncConfig,
}

impl ConfigDirectoryAccess {
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    fn source_basename(source: &Path) -> anyhow::Result<String> {
        match source.file_name() {
            Some(name) => Ok(name.to_string_lossy().into_owned()),
            None => bail!(
                "source directory has no usable basename: {}",
                source.display()
            ),
        }
    }
}

#[async_trait]
impl IDirectoryAccess for ConfigDirectoryAccess {
    async fn acquire(&self) -> anyhow::Result<DirectoryGrant> {
        let source = &self.config.source;
        let metadata = tokio::fs::metadata(source)
            .await
            .with_context(|| format!("source directory not accessible: {}", source.display()))?;
        if !metadata.is_dir() {
            bail!("source is not a directory: {}", source.display());
        }

        let source_root = VaultPath::new(source.clone())?;
        let basename = Self::source_basename(source)?;
        let destination_root = VaultPath::new(self.config.fonts_root.clone())?
            .join(SYNC_SUBTREE)?
            .join(&basename)?;

        Ok(DirectoryGrant {
            source_root,
            destination_root,
        })
    }
}
