//! Resolved view types handed to templates.
//!
//! These are the output side of resolution: what `resolve` prints as JSON
//! and what `render` turns into HTML. Nothing here is validated input;
//! every value has already been merged, filtered, and normalized.

use crate::classes::SectionClasses;
use crate::schema::{Animation, ContentBlock, Metadata};
use serde::{Deserialize, Serialize};

/// One entry of the language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl LanguageEntry {
    /// The directory used when no language collection exists.
    pub fn fallback() -> Self {
        LanguageEntry {
            code: "en".to_string(),
            name: "English".to_string(),
            flag: Some("🇺🇸".to_string()),
        }
    }
}

/// A page ready to render, for one language and one environment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub language: String,
    pub environment: String,
    pub sections: Vec<ResolvedSection>,
}

/// A section with overrides applied, text localized, classes built, and
/// its background image resolved against the base path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSection {
    /// Key of the section in its page.
    pub key: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    pub content: ContentBlock,
    pub classes: SectionClasses,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_classes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
