//! Content resolution: from validated records to the view a template needs.
//!
//! Every function here is pure apart from the injected [`Warnings`] sink.
//! The building blocks:
//!
//! | Function | Does |
//! |----------|------|
//! | [`localize_content`] | merge a language's content block over a section's |
//! | [`apply_environment_overrides`] | merge `environments[env]` into a section |
//! | [`is_environment_match`] | should a section render in this environment? |
//! | [`available_languages`] | language switcher entries, with a fallback |
//! | [`localized_sections`] | a language's free-form section data |
//! | [`validate_section_content`] | cheap id/content guard before rendering |
//!
//! [`resolve_page`] composes them in the order a build uses them:
//!
//! ```text
//! guard → environment overrides → environment filter → visibility
//!       → order → localize → classes → background image
//! ```
//!
//! ## Shallow merges
//!
//! All merges are one level deep. A field set in an override replaces the
//! base field as a whole, so overriding `cta` replaces text, link, and style
//! together, and overriding `features` replaces the entire list.

use crate::classes::build_section_classes;
use crate::diagnostics::{InputError, Warnings};
use crate::images::resolve_image;
use crate::schema::{ContentBlock, ContentPatch, Language, Metadata, Page, Section, Styling};
use crate::types::{LanguageEntry, ResolvedPage, ResolvedSection};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use thiserror::Error;

// ============================================================================
// Localization
// ============================================================================

/// Merge a language-specific content block over the section's content.
///
/// Fields present in `language_content` replace the base; absent optional
/// fields keep the base value. `None` returns the section unchanged.
pub fn localize_content(mut section: Section, language_content: Option<&ContentBlock>) -> Section {
    if let Some(overlay) = language_content {
        section.content = section
            .content
            .merged_with(&ContentPatch::from(overlay.clone()));
    }
    section
}

/// [`localize_content`] with the override taken from `section.languages`.
pub fn localize_section(section: Section, code: &str) -> Section {
    let overlay = section.language_override(code).cloned();
    localize_content(section, overlay.as_ref())
}

// ============================================================================
// Environments
// ============================================================================

/// Apply `section.environments[environment]`, if there is one.
///
/// Each part present in the override (content, styling, metadata) is
/// shallow-merged into the matching part of the section. An empty part
/// still counts as present, so an absent base styling or metadata is
/// materialized as its default.
pub fn apply_environment_overrides(mut section: Section, environment: &str) -> Section {
    let Some(overrides) = section.environment_override(environment).cloned() else {
        return section;
    };

    if let Some(content) = &overrides.content {
        section.content = section.content.merged_with(content);
    }
    if let Some(styling) = &overrides.styling {
        let base = section.styling.take().unwrap_or_default();
        section.styling = Some(base.merged_with(styling));
    }
    if let Some(metadata) = &overrides.metadata {
        let base = section.metadata.take().unwrap_or_default();
        section.metadata = Some(base.merged_with(metadata));
    }
    section
}

/// True when the section declares no environment restriction, or lists
/// `environment` among its environments.
pub fn is_environment_match(section: &Section, environment: &str) -> bool {
    match section.metadata.as_ref().and_then(|m| m.environment.as_ref()) {
        None => true,
        Some(allowed) => allowed.iter().any(|env| env.as_str() == environment),
    }
}

// ============================================================================
// Languages
// ============================================================================

/// Project the language collection to switcher entries, in collection order.
///
/// A missing collection never fails the build: it is reported and replaced
/// by a single English entry.
pub fn available_languages(
    collection: Option<&[Language]>,
    warnings: &dyn Warnings,
) -> Vec<LanguageEntry> {
    match collection {
        Some(languages) => languages
            .iter()
            .map(|language| LanguageEntry {
                code: language.code.clone(),
                name: language.name.clone(),
                flag: language.flag.clone(),
            })
            .collect(),
        None => {
            let err = InputError::MissingCollection("languages");
            warnings.warn(&format!("{err}, using default"));
            vec![LanguageEntry::fallback()]
        }
    }
}

/// The free-form `sections` data of a language, or an empty map.
pub fn localized_sections(language: Option<&Language>, warnings: &dyn Warnings) -> Map<String, Value> {
    match language {
        Some(language) => language.sections.clone(),
        None => {
            warnings.warn("Language data not found, using default");
            Map::new()
        }
    }
}

// ============================================================================
// Section guard
// ============================================================================

/// Required fields a section lacked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Section missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// The two fields the guard looks at, for typed sections and raw records.
pub trait SectionFields {
    /// The section id, if present and non-empty.
    fn section_id(&self) -> Option<&str>;
    /// Whether the section carries a content object.
    fn has_content(&self) -> bool;
}

impl SectionFields for Section {
    fn section_id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    // a validated section always has a content object, even an empty one
    fn has_content(&self) -> bool {
        true
    }
}

impl SectionFields for Value {
    fn section_id(&self) -> Option<&str> {
        self.get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    fn has_content(&self) -> bool {
        self.get("content").is_some_and(is_truthy)
    }
}

/// Scripting-style truthiness: null, false, zero, and "" are falsy;
/// every object and array is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn check_section_fields<S: SectionFields + ?Sized>(section: &S) -> Result<(), MissingFields> {
    let mut missing = Vec::new();
    if section.section_id().is_none() {
        missing.push("id");
    }
    if !section.has_content() {
        missing.push("content");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFields(missing))
    }
}

/// Cheap structural guard used before rendering.
///
/// Returns false, and reports which fields are missing, when the section
/// has no id or no content. Callers decide whether to skip the section or
/// render a placeholder.
pub fn validate_section_content<S: SectionFields + ?Sized>(
    section: &S,
    warnings: &dyn Warnings,
) -> bool {
    match check_section_fields(section) {
        Ok(()) => true,
        Err(missing) => {
            warnings.warn(&missing.to_string());
            false
        }
    }
}

// ============================================================================
// Page resolution
// ============================================================================

/// Target of a page resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub language: String,
    pub environment: String,
    /// Site base path images are served under.
    pub base_path: String,
}

/// Sections with an explicit order come first, ascending; the rest keep
/// their page order after them.
fn by_order(a: &Section, b: &Section) -> Ordering {
    match (a.order(), b.order()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Resolve every renderable section of a page for one language and one
/// environment.
pub fn resolve_page(page: &Page, options: &ResolveOptions, warnings: &dyn Warnings) -> ResolvedPage {
    let mut sections: Vec<(String, Section)> = page
        .sections
        .iter()
        .filter(|(_, section)| validate_section_content(*section, warnings))
        .map(|(key, section)| {
            (
                key.to_string(),
                apply_environment_overrides(section.clone(), &options.environment),
            )
        })
        .filter(|(_, section)| is_environment_match(section, &options.environment))
        .filter(|(_, section)| section.is_visible())
        .collect();
    sections.sort_by(|(_, a), (_, b)| by_order(a, b));

    ResolvedPage {
        title: page.title.clone(),
        description: page.description.clone(),
        language: options.language.clone(),
        environment: options.environment.clone(),
        sections: sections
            .into_iter()
            .map(|(key, section)| resolve_section(key, section, options, warnings))
            .collect(),
    }
}

fn resolve_section(
    key: String,
    section: Section,
    options: &ResolveOptions,
    warnings: &dyn Warnings,
) -> ResolvedSection {
    let section = localize_section(section, &options.language);
    let styling = section.styling.clone().unwrap_or_default();

    let background_image = section.background_image.as_deref().and_then(|path| {
        resolve_image(path, &options.base_path)
            .map_err(|err| warnings.warn(&format!("Section `{}`: {err}", section.id)))
            .ok()
    });

    ResolvedSection {
        key,
        id: section.id,
        title: section.title,
        background_image,
        min_height: section.min_height,
        classes: build_section_classes(&styling),
        animation: styling.animation,
        custom_classes: styling.custom_classes,
        content: section.content,
        metadata: section.metadata,
    }
}

/// Metadata a section ends up with in `environment`, for reporting.
pub fn effective_metadata(section: &Section, environment: &str) -> Metadata {
    apply_environment_overrides(section.clone(), environment)
        .metadata
        .unwrap_or_default()
}

/// Styling a section ends up with in `environment`, for reporting.
pub fn effective_styling(section: &Section, environment: &str) -> Styling {
    apply_environment_overrides(section.clone(), environment)
        .styling
        .unwrap_or_default()
}
