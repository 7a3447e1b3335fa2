//! Shared test utilities for the site-content test suite.
//!
//! Provides fixture setup, lookup helpers, and bulk extractors that work
//! with loaded content (`ContentSet`, `Page`, `Section`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let content = load(&tmp.path().join("src/content"), &RecordingWarnings::new()).unwrap();
//!
//! let about = find_section(&content, "about");
//! assert_eq!(about.content.title.as_deref(), Some("About us"));
//! assert_eq!(section_ids(&content), vec!["about", "services"]);
//! ```

use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

use crate::load::ContentSet;
use crate::schema::{Page, Section, validate_section};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy the `fixtures/` project to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Validate a raw section. Panics with the schema violation on failure.
pub fn section_from(raw: Value) -> Section {
    validate_section(&raw).unwrap_or_else(|err| panic!("invalid test section: {err}"))
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(content: &'a ContentSet, slug: &str) -> &'a Page {
    content.page(slug).unwrap_or_else(|| {
        let slugs = page_slugs(content);
        panic!("page '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a section of the sections collection by id. Panics if not found.
pub fn find_section<'a>(content: &'a ContentSet, id: &str) -> &'a Section {
    content
        .sections
        .iter()
        .map(|e| &e.data)
        .find(|s| s.id == id)
        .unwrap_or_else(|| {
            let ids = section_ids(content);
            panic!("section '{id}' not found. Available: {ids:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All page slugs in load order.
pub fn page_slugs(content: &ContentSet) -> Vec<&str> {
    content.pages.iter().map(|p| p.slug.as_str()).collect()
}

/// All section ids of the sections collection in load order.
pub fn section_ids(content: &ContentSet) -> Vec<&str> {
    content
        .sections
        .iter()
        .map(|e| e.data.id.as_str())
        .collect()
}
