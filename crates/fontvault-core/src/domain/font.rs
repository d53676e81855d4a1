//! Font entities and format signatures
//!
//! The entity model produced by indexing data sources and consumed by the
//! catalog and presentation layers. The sync engine only depends on
//! [`FontFormat`] for file-type sniffing.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;
use super::newtypes::{FamilyName, VaultPath};

// ============================================================================
// Font format signatures
// ============================================================================

/// Number of leading bytes that identify a font container format
pub const MAGIC_LEN: usize = 4;

/// Binary font container formats, identified by their leading bytes
///
/// | Format | Magic (hex)       |
/// |--------|-------------------|
/// | OTF    | 4F 54 54 4F `OTTO`|
/// | TTF    | 00 01 00 00       |
/// | WOFF   | 77 4F 46 46 `wOFF`|
/// | WOFF2  | 77 4F 46 32 `wOF2`|
///
/// WOFF/WOFF2 are web-delivery containers; synced font folders are expected
/// to hold desktop formats, so the classifier's default accepted set is
/// `[Otf, Ttf]`. The web formats stay representable and can be opted into
/// via the `sync.formats` configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    Otf,
    Ttf,
    Woff,
    Woff2,
}

impl FontFormat {
    /// The 4-byte signature that opens files of this format
    #[must_use]
    pub const fn magic(self) -> [u8; MAGIC_LEN] {
        match self {
            Self::Otf => [0x4F, 0x54, 0x54, 0x4F],
            Self::Ttf => [0x00, 0x01, 0x00, 0x00],
            Self::Woff => [0x77, 0x4F, 0x46, 0x46],
            Self::Woff2 => [0x77, 0x4F, 0x46, 0x32],
        }
    }

    /// Identify a format from a file's leading bytes
    ///
    /// Returns `None` for prefixes shorter than [`MAGIC_LEN`] or with no
    /// matching signature.
    #[must_use]
    pub fn from_magic(prefix: &[u8]) -> Option<Self> {
        if prefix.len() < MAGIC_LEN {
            return None;
        }

        [Self::Otf, Self::Ttf, Self::Woff, Self::Woff2]
            .into_iter()
            .find(|format| prefix[..MAGIC_LEN] == format.magic())
    }

    /// Conventional file extension for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Otf => "otf",
            Self::Ttf => "ttf",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }
}

impl Display for FontFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for FontFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "otf" => Ok(Self::Otf),
            "ttf" => Ok(Self::Ttf),
            "woff" => Ok(Self::Woff),
            "woff2" => Ok(Self::Woff2),
            other => Err(DomainError::UnknownFormat(other.to_string())),
        }
    }
}

// ============================================================================
// Font source
// ============================================================================

/// Where a font entity originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSource {
    /// Installed on the local machine
    System,
    /// Fetched from a remote catalog
    Remote,
}

// ============================================================================
// Font entities
// ============================================================================

/// A single font file belonging to a family
///
/// Mirrors one installable face: style, weight, and the on-disk location
/// when the file is stored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    pub id: Uuid,
    /// Style name, e.g. "Regular", "Bold", "Italic"
    pub style: String,
    /// Numeric weight, e.g. 400, 700
    pub weight: u16,
    pub italic: bool,
    pub source: FontSource,
    /// Local path when the file is stored on disk
    pub path: Option<VaultPath>,
    pub format: FontFormat,
    pub added_at: DateTime<Utc>,
}

impl FontFace {
    /// Create a face for a locally stored font file
    #[must_use]
    pub fn local(path: VaultPath, format: FontFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            style: "Regular".to_string(),
            weight: 400,
            italic: false,
            source: FontSource::System,
            path: Some(path),
            format,
            added_at: Utc::now(),
        }
    }
}

/// A font family grouping one or more faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    pub id: Uuid,
    pub name: FamilyName,
    pub designer: Option<String>,
    pub category: Option<String>,
    pub added_at: DateTime<Utc>,
    pub faces: Vec<FontFace>,
}

impl FontFamily {
    /// Create an empty family with the given name
    #[must_use]
    pub fn new(name: FamilyName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            designer: None,
            category: None,
            added_at: Utc::now(),
            faces: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
