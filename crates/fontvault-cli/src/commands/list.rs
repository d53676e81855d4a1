//! List command - Show font families found in a directory tree
//!
//! Walks the configured source tree (or an explicit directory), sniffs
//! each file's format from its magic bytes, and groups the recognized
//! faces into families by filename convention: `Family-Style.ext`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use fontvault_core::config::Config;
use fontvault_core::domain::font::{FontFace, FontFamily, FontFormat, MAGIC_LEN};
use fontvault_core::domain::newtypes::{FamilyName, VaultPath};
use fontvault_core::ports::filesystem::IFontFileSystem;
use fontvault_sync::classify::FontClassifier;
use fontvault_sync::filesystem::LocalFontFileSystem;
use fontvault_sync::scan::DirectoryScanner;
use tracing::info;

use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Directory to index instead of the configured source
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl ListCommand {
    /// Execute the list command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let config = Config::load_or_default(config_path);
        let root = self.dir.clone().unwrap_or_else(|| config.sync.source.clone());

        let root = match VaultPath::new(root.clone()) {
            Ok(path) => path,
            Err(e) => {
                format.error(&format!("Invalid directory: {}", e));
                std::process::exit(1);
            }
        };
        info!(root = %root, "Indexing font tree");

        let fs: Arc<dyn IFontFileSystem> = Arc::new(LocalFontFileSystem::new());
        let classifier = FontClassifier::new(config.sync.formats.clone());
        let scanner = DirectoryScanner::new(Arc::clone(&fs), classifier);

        let mut families: BTreeMap<String, FontFamily> = BTreeMap::new();
        collect_faces(&scanner, fs.as_ref(), &root, &mut families).await;

        if format.is_json() {
            let json = serde_json::json!({
                "root": root.to_string(),
                "families": families.values().collect::<Vec<_>>(),
            });
            format.print_json(&json);
        } else if families.is_empty() {
            format.success(&format!("No font files found under {}", root));
        } else {
            let face_count: usize = families.values().map(|f| f.faces.len()).sum();
            format.success(&format!(
                "{} famil{}, {} face{}",
                families.len(),
                if families.len() == 1 { "y" } else { "ies" },
                face_count,
                if face_count == 1 { "" } else { "s" }
            ));
            for family in families.values() {
                format.info(&format!("{}", family.name));
                for face in &family.faces {
                    let location = face
                        .path
                        .as_ref()
                        .map_or_else(String::new, |p| format!("  ({})", p));
                    format.info(&format!(
                        "  {} {} [{}]{}",
                        face.style, face.weight, face.format, location
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Walks the tree depth-first, adding every recognized face to its family
async fn collect_faces(
    scanner: &DirectoryScanner,
    fs: &dyn IFontFileSystem,
    dir: &VaultPath,
    families: &mut BTreeMap<String, FontFamily>,
) {
    let mut pending = vec![dir.clone()];
    while let Some(current) = pending.pop() {
        for candidate in scanner.list_font_files(&current).await {
            let Ok(prefix) = fs.read_prefix(&candidate.path, MAGIC_LEN).await else {
                continue;
            };
            let Some(format) = FontFormat::from_magic(&prefix) else {
                continue;
            };

            let (family_name, style) = split_family_and_style(&candidate.name);
            let Ok(name) = FamilyName::new(family_name) else {
                continue;
            };

            let mut face = FontFace::local(candidate.path.clone(), format);
            face.style = style.clone();
            face.weight = weight_for_style(&style);
            face.italic = style.to_ascii_lowercase().contains("italic");

            families
                .entry(name.as_str().to_string())
                .or_insert_with(|| FontFamily::new(name))
                .faces
                .push(face);
        }
        pending.extend(scanner.list_subdirectories(&current).await);
    }
}

/// Splits `Family-Style.ext` into family and style parts
///
/// Files without a style separator fall back to style "Regular".
fn split_family_and_style(file_name: &str) -> (String, String) {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _ext)| stem);
    match stem.rsplit_once('-') {
        Some((family, style)) if !family.is_empty() && !style.is_empty() => {
            (family.to_string(), style.to_string())
        }
        _ => (stem.to_string(), "Regular".to_string()),
    }
}

/// Maps a conventional style name onto a numeric weight
fn weight_for_style(style: &str) -> u16 {
    let lowered = style.to_ascii_lowercase();
    let lowered = lowered.trim_end_matches("italic").trim();
    match lowered {
        "thin" | "hairline" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "" | "regular" | "normal" | "book" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        _ => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_style_suffix() {
        assert_eq!(
            split_family_and_style("Inter-Bold.ttf"),
            ("Inter".to_string(), "Bold".to_string())
        );
        assert_eq!(
            split_family_and_style("Source-Serif-Light.otf"),
            ("Source-Serif".to_string(), "Light".to_string())
        );
    }

    #[test]
    fn test_split_without_style_suffix() {
        assert_eq!(
            split_family_and_style("Lora.otf"),
            ("Lora".to_string(), "Regular".to_string())
        );
    }

    #[test]
    fn test_weights() {
        assert_eq!(weight_for_style("Bold"), 700);
        assert_eq!(weight_for_style("BoldItalic"), 700);
        assert_eq!(weight_for_style("Regular"), 400);
        assert_eq!(weight_for_style("Italic"), 400);
        assert_eq!(weight_for_style("Black"), 900);
        assert_eq!(weight_for_style("Condensed"), 400);
    }
}
