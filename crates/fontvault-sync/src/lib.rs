//! Fontvault Sync - Mirror synchronization engine
//!
//! One-way, content-aware sync of a source font directory tree onto a
//! destination tree. The source is authoritative: for every recognized
//! font file in source an identically-named, content-identical file ends
//! up in destination, and destination-only font files are removed.
//!
//! ## Modules
//!
//! - [`classify`] - Font-file sniffing on leading magic bytes
//! - [`compare`] - Size + streamed SHA-256 content equality
//! - [`scan`] - Per-directory listings of font files and subdirectories
//! - [`planner`] - Diff of two listings into copy/remove operations
//! - [`executor`] - Applies operations and recurses into subdirectories
//! - [`orchestrator`] - Entry point driving a whole-tree sync run
//! - [`filesystem`] - `tokio::fs`-backed filesystem adapter
//! - [`access`] - Config-backed directory grant resolution

pub mod access;
pub mod classify;
pub mod compare;
pub mod executor;
pub mod filesystem;
pub mod orchestrator;
pub mod planner;
pub mod scan;

#[cfg(test)]
pub(crate) mod testutil;

use fontvault_core::domain::newtypes::VaultPath;
use thiserror::Error;

/// Errors that can abort a whole sync run
///
/// Per-file and per-directory failures never surface here; they are logged
/// and contained where they occur. Only root-level setup problems escalate.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The destination root could not be created or accessed
    #[error("Destination root unavailable: {path}: {source}")]
    DestinationUnavailable {
        path: VaultPath,
        #[source]
        source: anyhow::Error,
    },

    /// No usable source directory could be resolved
    #[error("Source root unavailable: {0}")]
    SourceUnavailable(String),

    /// A domain-level error propagated from fontvault-core
    #[error("Domain error: {0}")]
    Domain(#[from] fontvault_core::domain::errors::DomainError),
}
