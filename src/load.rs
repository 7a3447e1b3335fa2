//! Content loading: one file per record, four collections.
//!
//! ## Directory Structure
//!
//! ```text
//! src/content/                     # Content root (config: content_dir)
//! ├── pages/
//! │   └── home.json                # Page, slug "home"
//! ├── sections/
//! │   ├── about.json               # Standalone sections
//! │   └── services.toml
//! ├── languages/
//! │   ├── en.json                  # One record per supported language
//! │   └── it.json
//! └── templates/
//!     └── landing.json             # Ordered lists of section ids
//! ```
//!
//! Records may be JSON or TOML; TOML is converted to the JSON value model
//! before validation so both formats go through the same validator. The file
//! stem is the record's slug. Other files are ignored, as are dot-files.
//!
//! ## Validation
//!
//! Each record is validated against its collection's schema; the first
//! violation aborts the load with the file path attached. On top of that the
//! loader enforces:
//! - No two records of the sections collection share an `id`
//! - No two sections of one page share an `id`
//!
//! Templates naming a section id nobody defines are reported as warnings.
//! A missing collection directory is an empty collection, except `languages`,
//! which is left absent so the language directory can fall back.

use crate::diagnostics::Warnings;
use crate::schema::{
    self, CollectionKind, Language, Page, SchemaViolation, Section, Template, toml_to_json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{path}: {source}")]
    Schema {
        path: PathBuf,
        source: SchemaViolation,
    },
    #[error("Duplicate section id `{id}` in {location}")]
    DuplicateSectionId { id: String, location: String },
}

/// A validated record and where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Entry<T> {
    /// File stem of the record.
    pub slug: String,
    /// Path relative to the content root.
    pub source: String,
    pub data: T,
}

/// Every collection of a content root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentSet {
    pub pages: Vec<Entry<Page>>,
    pub sections: Vec<Entry<Section>>,
    /// `None` when the `languages` directory does not exist.
    pub languages: Option<Vec<Language>>,
    pub templates: Vec<Entry<Template>>,
}

impl ContentSet {
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug).map(|p| &p.data)
    }

    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages
            .as_ref()
            .and_then(|langs| langs.iter().find(|l| l.code == code))
    }

    /// Codes of every loaded language, in collection order.
    pub fn language_codes(&self) -> Vec<&str> {
        self.languages
            .iter()
            .flatten()
            .map(|l| l.code.as_str())
            .collect()
    }
}

const RECORD_EXTENSIONS: &[&str] = &["json", "toml"];

pub fn load(content_dir: &Path, warnings: &dyn Warnings) -> Result<ContentSet, LoadError> {
    let pages = load_collection(content_dir, CollectionKind::Page, schema::validate_page)?
        .unwrap_or_default();
    let sections = load_collection(content_dir, CollectionKind::Section, schema::validate_section)?
        .unwrap_or_default();
    let languages = load_collection(content_dir, CollectionKind::Language, schema::validate_language)?
        .map(|entries| entries.into_iter().map(|e| e.data).collect());
    let templates = load_collection(content_dir, CollectionKind::Template, schema::validate_template)?
        .unwrap_or_default();

    check_unique_ids(
        sections.iter().map(|e| e.data.id.as_str()),
        CollectionKind::Section.dir_name(),
    )?;
    for page in &pages {
        check_unique_ids(
            page.data.sections.values().map(|s| s.id.as_str()),
            &page.source,
        )?;
    }

    let known: HashSet<&str> = sections
        .iter()
        .map(|e| e.data.id.as_str())
        .chain(
            pages
                .iter()
                .flat_map(|p| p.data.sections.values().map(|s| s.id.as_str())),
        )
        .collect();
    for template in &templates {
        for id in &template.data.sections {
            if !known.contains(id.as_str()) {
                warnings.warn(&format!(
                    "Template `{}` references unknown section `{id}`",
                    template.slug
                ));
            }
        }
    }

    tracing::debug!(
        pages = pages.len(),
        sections = sections.len(),
        templates = templates.len(),
        "loaded content from {}",
        content_dir.display()
    );

    Ok(ContentSet {
        pages,
        sections,
        languages,
        templates,
    })
}

/// Load every record of one collection, sorted by file name.
///
/// Returns `None` when the collection directory does not exist.
fn load_collection<T>(
    content_dir: &Path,
    kind: CollectionKind,
    validate: fn(&Value) -> Result<T, SchemaViolation>,
) -> Result<Option<Vec<Entry<T>>>, LoadError> {
    let dir = content_dir.join(kind.dir_name());
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut entries = Vec::new();
    for path in collect_records(&dir)? {
        let raw = read_record(&path)?;
        let data = validate(&raw).map_err(|source| LoadError::Schema {
            path: path.clone(),
            source,
        })?;
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let source = path
            .strip_prefix(content_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();
        entries.push(Entry { slug, source, data });
    }
    Ok(Some(entries))
}

fn collect_records(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut records: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let hidden = p
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            p.is_file() && !hidden && record_extension(p).is_some()
        })
        .collect();

    records.sort();
    Ok(records)
}

fn record_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    RECORD_EXTENSIONS.iter().copied().find(|e| *e == ext)
}

/// Parse a record file into the JSON value model.
pub fn read_record(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path)?;
    match record_extension(path) {
        Some("toml") => {
            let doc: toml::Value = toml::from_str(&text).map_err(|source| LoadError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
            toml_to_json(doc).map_err(|source| LoadError::Schema {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn check_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    location: &str,
) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LoadError::DuplicateSectionId {
                id: id.to_string(),
                location: location.to_string(),
            });
        }
    }
    Ok(())
}
