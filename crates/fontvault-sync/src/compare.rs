//! Content equality checks for sync change detection
//!
//! Two files are equal when their sizes match and their streamed SHA-256
//! digests match. The size lookup runs first so mismatched files are
//! rejected without reading any content. "Cannot verify" collapses to
//! "not equal" at the engine boundary, erring toward re-copying a file
//! over skipping a possibly-stale one.

use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::filesystem::IFontFileSystem;
use tracing::debug;

/// Outcome of a content comparison
///
/// `Indeterminate` keeps I/O failures distinguishable internally; callers
/// going through [`files_equal`] see it collapsed to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    Equal,
    Different,
    /// One of the files could not be read; equality is unverifiable
    Indeterminate,
}

/// Compares two files by size, then by streamed content digest
///
/// Sizes are fetched via metadata lookup; when they differ no content is
/// read at all. Any I/O failure on either file yields `Indeterminate`.
pub async fn verify(fs: &dyn IFontFileSystem, a: &VaultPath, b: &VaultPath) -> Equality {
    let (size_a, size_b) = match (fs.file_size(a).await, fs.file_size(b).await) {
        (Ok(sa), Ok(sb)) => (sa, sb),
        (Err(err), _) | (_, Err(err)) => {
            debug!(a = %a, b = %b, %err, "size lookup failed, equality indeterminate");
            return Equality::Indeterminate;
        }
    };

    if size_a != size_b {
        return Equality::Different;
    }

    let (digest_a, digest_b) = match (fs.content_digest(a).await, fs.content_digest(b).await) {
        (Ok(da), Ok(db)) => (da, db),
        (Err(err), _) | (_, Err(err)) => {
            debug!(a = %a, b = %b, %err, "digest failed, equality indeterminate");
            return Equality::Indeterminate;
        }
    };

    if digest_a == digest_b {
        Equality::Equal
    } else {
        Equality::Different
    }
}

/// Whether two files have byte-identical content
///
/// External contract of the comparator: unverifiable comparisons count as
/// not equal, so the planner schedules a re-copy instead of skipping.
pub async fn files_equal(fs: &dyn IFontFileSystem, a: &VaultPath, b: &VaultPath) -> bool {
    matches!(verify(fs, a, b).await, Equality::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryFileSystem;
    use std::path::PathBuf;

    fn vp(s: &str) -> VaultPath {
        VaultPath::new(PathBuf::from(s)).unwrap()
    }

    #[tokio::test]
    async fn test_identical_content_is_equal() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/d");
        fs.add_file("/d/a", b"same bytes");
        fs.add_file("/d/b", b"same bytes");

        assert_eq!(verify(&fs, &vp("/d/a"), &vp("/d/b")).await, Equality::Equal);
        assert!(files_equal(&fs, &vp("/d/a"), &vp("/d/b")).await);
    }

    #[tokio::test]
    async fn test_size_mismatch_short_circuits() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/d");
        fs.add_file("/d/a", b"short");
        fs.add_file("/d/b", b"much longer content");

        assert_eq!(
            verify(&fs, &vp("/d/a"), &vp("/d/b")).await,
            Equality::Different
        );
        // Sizes differ, so the digest must never have been computed.
        assert_eq!(fs.digest_calls(), 0);
    }

    #[tokio::test]
    async fn test_same_size_different_content() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/d");
        fs.add_file("/d/a", b"aaaa");
        fs.add_file("/d/b", b"bbbb");

        assert_eq!(
            verify(&fs, &vp("/d/a"), &vp("/d/b")).await,
            Equality::Different
        );
        assert!(!files_equal(&fs, &vp("/d/a"), &vp("/d/b")).await);
    }

    #[tokio::test]
    async fn test_missing_file_is_indeterminate() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/d");
        fs.add_file("/d/a", b"content");

        assert_eq!(
            verify(&fs, &vp("/d/a"), &vp("/d/gone")).await,
            Equality::Indeterminate
        );
        assert!(!files_equal(&fs, &vp("/d/a"), &vp("/d/gone")).await);
    }

    #[tokio::test]
    async fn test_read_failure_collapses_to_not_equal() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/d");
        fs.add_file("/d/a", b"content");
        fs.add_file("/d/b", b"content");
        fs.poison("/d/b");

        assert_eq!(
            verify(&fs, &vp("/d/a"), &vp("/d/b")).await,
            Equality::Indeterminate
        );
        assert!(!files_equal(&fs, &vp("/d/a"), &vp("/d/b")).await);
    }
}
