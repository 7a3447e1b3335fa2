//! Image reference audit.
//!
//! Scans component sources for image paths and checks each one against the
//! public directory. Four patterns find references:
//!
//! | Pattern | Catches |
//! |---------|---------|
//! | `backgroundImage: "..."` | any value of a background image prop |
//! | `src="....png"` | sources with an image extension |
//! | `url('....png')` | CSS url() with an image extension |
//! | `"..../img/..."` | any quoted string pointing into an `img/` folder |
//!
//! References starting with `http` are external and skipped. A reference
//! exists when `<public_dir>/<reference without leading />` is a file.
//!
//! The audit is informational: it never modifies anything, and a report
//! with issues is still `Ok`. Callers decide whether issues fail the run.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk source tree: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("{0} missing image reference(s)")]
    Failed(usize),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "ico"];

fn patterns() -> &'static [Regex; 4] {
    static RE: OnceLock<[Regex; 4]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r#"backgroundImage[:\s]*["']([^"']+)["']"#).unwrap(),
            Regex::new(r#"(?i)src\s*[:=]\s*["']([^"']+\.(jpg|jpeg|png|gif|webp|svg|ico))["']"#)
                .unwrap(),
            Regex::new(r#"(?i)url\(['"]([^'"]+\.(jpg|jpeg|png|gif|webp|svg|ico))['"]?\)"#).unwrap(),
            Regex::new(r#"["']([^"']*/img/[^"']+)["']"#).unwrap(),
        ]
    })
}

/// One unique reference and whether it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub path: String,
    pub exists: bool,
}

/// A missing reference and the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditIssue {
    pub file: String,
    pub image_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    /// Unique references across all files, sorted.
    pub references: Vec<ImageReference>,
    /// Missing references in scan order, one per file occurrence.
    pub issues: Vec<AuditIssue>,
    /// Images under `<public_dir>/img`, as `/img/<name>`, sorted.
    /// `None` when there is no such directory.
    pub available: Option<Vec<String>>,
    /// Files that could not be read, with the reason.
    pub unreadable: Vec<(String, String)>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Image references in a source text, deduplicated, in pattern order then
/// match order.
pub fn extract_image_paths(content: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for pattern in patterns() {
        for cap in pattern.captures_iter(content) {
            let path = &cap[1];
            if path.starts_with("http") || paths.iter().any(|p| p == path) {
                continue;
            }
            paths.push(path.to_string());
        }
    }
    paths
}

pub fn image_exists(public_dir: &Path, image_path: &str) -> bool {
    let clean = image_path.strip_prefix('/').unwrap_or(image_path);
    public_dir.join(clean).is_file()
}

/// Source files under `src_dir` whose name ends in `.<ext>` for one of
/// `extensions`, sorted.
pub fn scan_sources(src_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, AuditError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(src_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if extensions.iter().any(|ext| name.ends_with(&format!(".{ext}"))) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

pub fn audit(
    src_dir: &Path,
    public_dir: &Path,
    extensions: &[String],
) -> Result<AuditReport, AuditError> {
    let mut report = AuditReport::default();
    let mut seen: BTreeMap<String, bool> = BTreeMap::new();

    for file in scan_sources(src_dir, extensions)? {
        let rel = file
            .strip_prefix(src_dir)
            .unwrap_or(&file)
            .to_string_lossy()
            .to_string();
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("skipping {rel}: {err}");
                report.unreadable.push((rel, err.to_string()));
                continue;
            }
        };

        for image_path in extract_image_paths(&content) {
            let exists = *seen
                .entry(image_path.clone())
                .or_insert_with(|| image_exists(public_dir, &image_path));
            if !exists {
                report.issues.push(AuditIssue {
                    file: rel.clone(),
                    image_path,
                });
            }
        }
    }

    report.references = seen
        .into_iter()
        .map(|(path, exists)| ImageReference { path, exists })
        .collect();
    report.available = available_images(&public_dir.join("img"))?;
    Ok(report)
}

fn available_images(img_dir: &Path) -> Result<Option<Vec<String>>, AuditError> {
    if !img_dir.is_dir() {
        return Ok(None);
    }
    let mut images: Vec<String> = fs::read_dir(img_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| {
            Path::new(name)
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        })
        .collect();
    images.sort();
    Ok(Some(images.into_iter().map(|name| format!("/img/{name}")).collect()))
}
