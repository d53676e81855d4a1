//! Directory access port (driving/primary collaborator)
//!
//! An external collaborator resolves which directories a sync run operates
//! on and confirms they are accessible for the duration of one call. The
//! engine itself never negotiates permissions and performs no re-validation
//! mid-sync.

use crate::domain::newtypes::VaultPath;

/// Root directory pair handed to the sync orchestrator
///
/// Both paths are confirmed readable (source) / writable (destination
/// parent) by the granting collaborator at acquisition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGrant {
    /// Authoritative directory tree to mirror from
    pub source_root: VaultPath,
    /// Directory tree to mirror onto; created by the orchestrator if absent
    pub destination_root: VaultPath,
}

/// Port trait for acquiring a directory grant
#[async_trait::async_trait]
pub trait IDirectoryAccess: Send + Sync {
    /// Resolves the source and destination roots for one sync run
    ///
    /// # Errors
    /// Returns an error when no usable source directory can be resolved
    async fn acquire(&self) -> anyhow::Result<DirectoryGrant>;
}
