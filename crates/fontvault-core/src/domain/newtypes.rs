//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for paths, digests, and names.
//! Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Path type
// ============================================================================

/// A validated absolute filesystem path
///
/// VaultPath ensures the path is:
/// - Absolute
/// - Normalized (no `.` or `..` components)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathBuf", into = "PathBuf")]
pub struct VaultPath(PathBuf);

impl VaultPath {
    /// Create a new VaultPath, validating it is absolute
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPath` if the path is not absolute
    pub fn new(path: PathBuf) -> Result<Self, DomainError> {
        if !path.is_absolute() {
            return Err(DomainError::InvalidPath(format!(
                "Path must be absolute: {}",
                path.display()
            )));
        }

        // Normalize without touching the filesystem; the path may not exist yet.
        let normalized = Self::normalize_path(&path)?;
        Ok(Self(normalized))
    }

    /// Get the inner path reference
    #[must_use]
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }

    /// Convert to owned PathBuf
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// The final path component, lossily converted to a string
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Join a single path component to this VaultPath
    ///
    /// # Errors
    /// Returns error if the component would escape the path
    pub fn join(&self, component: &str) -> Result<Self, DomainError> {
        // Prevent path traversal
        if component.is_empty() || component.contains("..") || component.starts_with('/') {
            return Err(DomainError::InvalidPath(format!(
                "Invalid path component: {component}"
            )));
        }

        let new_path = self.0.join(component);
        Self::new(new_path)
    }

    /// Get the path relative to a root
    ///
    /// # Errors
    /// Returns error if this path is not within the root
    pub fn relative_to(&self, root: &VaultPath) -> Result<PathBuf, DomainError> {
        self.0
            .strip_prefix(&root.0)
            .map(|p| p.to_path_buf())
            .map_err(|_| {
                DomainError::PathOutsideRoot(format!(
                    "{} is not within {}",
                    self.0.display(),
                    root.0.display()
                ))
            })
    }

    /// Normalize a path by resolving `.` and `..` components
    fn normalize_path(path: &PathBuf) -> Result<PathBuf, DomainError> {
        use std::path::Component;

        let mut normalized = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Prefix(p) => normalized.push(p.as_os_str()),
                Component::RootDir => normalized.push("/"),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(DomainError::InvalidPath(
                            "Path escapes root via ..".to_string(),
                        ));
                    }
                }
                Component::Normal(c) => normalized.push(c),
            }
        }

        Ok(normalized)
    }
}

impl Display for VaultPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl TryFrom<PathBuf> for VaultPath {
    type Error = DomainError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<VaultPath> for PathBuf {
    fn from(path: VaultPath) -> Self {
        path.0
    }
}

impl AsRef<std::path::Path> for VaultPath {
    fn as_ref(&self) -> &std::path::Path {
        &self.0
    }
}

// ============================================================================
// Content digest
// ============================================================================

/// SHA-256 content digest in lowercase hex
///
/// Used as a proxy for byte-exact file equality during mirror sync.
/// Format: exactly 64 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Expected hex length of a SHA-256 digest (32 bytes)
    const EXPECTED_HEX_LEN: usize = 64;

    /// Create a new ContentDigest from a hex string
    ///
    /// # Errors
    /// Returns error if the string is not 64 lowercase hex characters
    pub fn new(hex: String) -> Result<Self, DomainError> {
        if hex.len() != Self::EXPECTED_HEX_LEN {
            return Err(DomainError::InvalidDigest(format!(
                "Digest has wrong length: expected {} hex chars, got {}",
                Self::EXPECTED_HEX_LEN,
                hex.len()
            )));
        }

        if !hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(DomainError::InvalidDigest(format!(
                "Digest is not lowercase hex: {hex}"
            )));
        }

        Ok(Self(hex))
    }

    /// Create a ContentDigest from raw SHA-256 output bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut hex = String::with_capacity(Self::EXPECTED_HEX_LEN);
        for byte in bytes {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentDigest {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.0
    }
}

// ============================================================================
// Family name
// ============================================================================

/// Validated font family name (non-empty, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FamilyName(String);

impl FamilyName {
    /// Create a new FamilyName
    ///
    /// # Errors
    /// Returns error if the name is empty or whitespace-only
    pub fn new(name: String) -> Result<Self, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidFamilyName(
                "Family name cannot be empty".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FamilyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FamilyName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for FamilyName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FamilyName> for String {
    fn from(name: FamilyName) -> Self {
        name.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod vault_path_tests {
        use super::*;

        #[test]
        fn test_new_absolute_path() {
            let path = VaultPath::new(PathBuf::from("/home/user/fonts")).unwrap();
            assert_eq!(path.to_string(), "/home/user/fonts");
        }

        #[test]
        fn test_new_relative_path_fails() {
            let result = VaultPath::new(PathBuf::from("relative/path"));
            assert!(result.is_err());
        }

        #[test]
        fn test_normalizes_dot_components() {
            let path = VaultPath::new(PathBuf::from("/home/user/./fonts")).unwrap();
            assert_eq!(path.to_string(), "/home/user/fonts");
        }

        #[test]
        fn test_join() {
            let root = VaultPath::new(PathBuf::from("/home/user/fonts")).unwrap();
            let joined = root.join("Variable").unwrap();
            assert_eq!(joined.to_string(), "/home/user/fonts/Variable");
        }

        #[test]
        fn test_join_traversal_fails() {
            let root = VaultPath::new(PathBuf::from("/home/user/fonts")).unwrap();
            assert!(root.join("../outside").is_err());
            assert!(root.join("/absolute").is_err());
            assert!(root.join("").is_err());
        }

        #[test]
        fn test_file_name() {
            let path = VaultPath::new(PathBuf::from("/fonts/Inter-Regular.ttf")).unwrap();
            assert_eq!(path.file_name(), Some("Inter-Regular.ttf".to_string()));
        }

        #[test]
        fn test_relative_to() {
            let root = VaultPath::new(PathBuf::from("/home/user/fonts")).unwrap();
            let child = VaultPath::new(PathBuf::from("/home/user/fonts/Serif/a.otf")).unwrap();
            let relative = child.relative_to(&root).unwrap();
            assert_eq!(relative, PathBuf::from("Serif/a.otf"));
        }

        #[test]
        fn test_relative_to_outside_fails() {
            let root = VaultPath::new(PathBuf::from("/home/user/fonts")).unwrap();
            let other = VaultPath::new(PathBuf::from("/home/other/docs")).unwrap();
            assert!(other.relative_to(&root).is_err());
        }
    }

    mod content_digest_tests {
        use super::*;

        #[test]
        fn test_from_bytes() {
            let digest = ContentDigest::from_bytes([0u8; 32]);
            assert_eq!(digest.as_str().len(), 64);
            assert!(digest.as_str().chars().all(|c| c == '0'));
        }

        #[test]
        fn test_valid_hex() {
            let hex = "a".repeat(64);
            let digest = ContentDigest::new(hex.clone()).unwrap();
            assert_eq!(digest.as_str(), hex);
        }

        #[test]
        fn test_wrong_length_fails() {
            assert!(ContentDigest::new("abcd".to_string()).is_err());
        }

        #[test]
        fn test_uppercase_fails() {
            assert!(ContentDigest::new("A".repeat(64)).is_err());
        }

        #[test]
        fn test_non_hex_fails() {
            assert!(ContentDigest::new("z".repeat(64)).is_err());
        }

        #[test]
        fn test_serde_roundtrip() {
            let digest = ContentDigest::from_bytes([7u8; 32]);
            let json = serde_json::to_string(&digest).unwrap();
            let parsed: ContentDigest = serde_json::from_str(&json).unwrap();
            assert_eq!(digest, parsed);
        }
    }

    mod family_name_tests {
        use super::*;

        #[test]
        fn test_valid_name() {
            let name = FamilyName::new("Inter".to_string()).unwrap();
            assert_eq!(name.as_str(), "Inter");
        }

        #[test]
        fn test_trims_whitespace() {
            let name = FamilyName::new("  Source Serif  ".to_string()).unwrap();
            assert_eq!(name.as_str(), "Source Serif");
        }

        #[test]
        fn test_empty_fails() {
            assert!(FamilyName::new(String::new()).is_err());
            assert!(FamilyName::new("   ".to_string()).is_err());
        }
    }
}
