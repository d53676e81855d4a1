//! Font-file classification by leading magic bytes
//!
//! A file counts as a font file when its first four bytes match the
//! signature of an accepted [`FontFormat`]. The check fails closed:
//! unreadable files, files shorter than four bytes, and unknown
//! signatures all classify as not-a-font-file. Classification never
//! mutates filesystem state.

use fontvault_core::domain::font::{FontFormat, MAGIC_LEN};
use fontvault_core::domain::newtypes::VaultPath;
use fontvault_core::ports::filesystem::IFontFileSystem;
use tracing::debug;

/// Signature-based font file classifier
///
/// The accepted set defaults to the desktop container formats (OTF, TTF).
/// WOFF/WOFF2 signatures are known but deliberately not matched unless
/// configured in; synced folders are expected to hold desktop fonts.
#[derive(Debug, Clone)]
pub struct FontClassifier {
    accepted: Vec<FontFormat>,
}

impl FontClassifier {
    /// Classifier accepting the given formats
    #[must_use]
    pub fn new(accepted: Vec<FontFormat>) -> Self {
        Self { accepted }
    }

    /// Matches a leading byte prefix against the accepted signatures
    ///
    /// Pure function over the prefix bytes. Returns `None` for short
    /// prefixes, unknown signatures, and formats outside the accepted set.
    #[must_use]
    pub fn matches(&self, prefix: &[u8]) -> Option<FontFormat> {
        FontFormat::from_magic(prefix).filter(|format| self.accepted.contains(format))
    }

    /// Whether the file at `path` is a recognized font file
    ///
    /// Reads only the first four bytes through the filesystem port; the
    /// read handle is scoped to that call. Any I/O failure classifies the
    /// file as not-a-font-file rather than propagating.
    pub async fn is_font_file(&self, fs: &dyn IFontFileSystem, path: &VaultPath) -> bool {
        match fs.read_prefix(path, MAGIC_LEN).await {
            Ok(prefix) => self.matches(&prefix).is_some(),
            Err(err) => {
                debug!(path = %path, %err, "prefix read failed, not classifying as font");
                false
            }
        }
    }
}

impl Default for FontClassifier {
    fn default() -> Self {
        Self::new(vec![FontFormat::Otf, FontFormat::Ttf])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryFileSystem;
    use std::path::PathBuf;

    fn vp(s: &str) -> VaultPath {
        VaultPath::new(PathBuf::from(s)).unwrap()
    }

    #[test]
    fn test_matches_otf_and_ttf_by_default() {
        let classifier = FontClassifier::default();
        assert_eq!(classifier.matches(b"OTTOrest"), Some(FontFormat::Otf));
        assert_eq!(
            classifier.matches(&[0x00, 0x01, 0x00, 0x00, 0xAB]),
            Some(FontFormat::Ttf)
        );
    }

    #[test]
    fn test_woff_not_matched_by_default() {
        let classifier = FontClassifier::default();
        assert_eq!(classifier.matches(b"wOFFdata"), None);
        assert_eq!(classifier.matches(b"wOF2data"), None);
    }

    #[test]
    fn test_woff_matched_when_configured() {
        let classifier = FontClassifier::new(vec![FontFormat::Woff, FontFormat::Woff2]);
        assert_eq!(classifier.matches(b"wOFFdata"), Some(FontFormat::Woff));
        assert_eq!(classifier.matches(b"OTTOdata"), None);
    }

    #[test]
    fn test_unknown_and_short_prefixes() {
        let classifier = FontClassifier::default();
        assert_eq!(classifier.matches(b"%PDF"), None);
        assert_eq!(classifier.matches(b"OT"), None);
        assert_eq!(classifier.matches(&[]), None);
    }

    #[tokio::test]
    async fn test_is_font_file_reads_prefix() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/fonts");
        fs.add_file("/fonts/a.otf", b"OTTO....rest of the font");
        fs.add_file("/fonts/readme.txt", b"not a font at all");

        let classifier = FontClassifier::default();
        assert!(classifier.is_font_file(&fs, &vp("/fonts/a.otf")).await);
        assert!(!classifier.is_font_file(&fs, &vp("/fonts/readme.txt")).await);
    }

    #[tokio::test]
    async fn test_short_file_is_not_a_font() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/fonts");
        fs.add_file("/fonts/tiny.ttf", &[0x00, 0x01]);

        let classifier = FontClassifier::default();
        assert!(!classifier.is_font_file(&fs, &vp("/fonts/tiny.ttf")).await);
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_closed() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/fonts");
        fs.add_file("/fonts/broken.ttf", &FontFormat::Ttf.magic());
        fs.poison("/fonts/broken.ttf");

        let classifier = FontClassifier::default();
        assert!(!classifier.is_font_file(&fs, &vp("/fonts/broken.ttf")).await);
    }
}
