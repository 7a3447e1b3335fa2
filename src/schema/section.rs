//! The section record: the unit of page composition.

use super::content::{ContentBlock, ContentPatch};
use super::keyed::KeyedMap;
use super::metadata::{Metadata, MetadataPatch};
use super::styling::Styling;
use serde::{Deserialize, Serialize};

/// Top-level field names of a section, in schema order.
pub(crate) const SECTION_FIELDS: &[&str] = &[
    "id",
    "title",
    "backgroundImage",
    "minHeight",
    "content",
    "styling",
    "metadata",
    "languages",
    "environments",
];

/// Partial replacement active in one named environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Styling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataPatch>,
}

pub(crate) const OVERRIDE_FIELDS: &[&str] = &["content", "styling", "metadata"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    pub content: ContentBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Styling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Content overrides keyed by language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<KeyedMap<ContentBlock>>,
    /// Partial overrides keyed by environment name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<KeyedMap<EnvironmentOverride>>,
}

impl Section {
    /// A section with just an id and content; the rest left absent.
    pub fn new(id: impl Into<String>, content: ContentBlock) -> Self {
        Section {
            id: id.into(),
            title: None,
            background_image: None,
            min_height: None,
            content,
            styling: None,
            metadata: None,
            languages: None,
            environments: None,
        }
    }

    /// `metadata.visible`, which defaults to true.
    pub fn is_visible(&self) -> bool {
        self.metadata.as_ref().is_none_or(|m| m.visible)
    }

    /// `metadata.order`, if any.
    pub fn order(&self) -> Option<f64> {
        self.metadata.as_ref().and_then(|m| m.order)
    }

    pub fn language_override(&self, code: &str) -> Option<&ContentBlock> {
        self.languages.as_ref().and_then(|langs| langs.get(code))
    }

    pub fn environment_override(&self, environment: &str) -> Option<&EnvironmentOverride> {
        self.environments
            .as_ref()
            .and_then(|envs| envs.get(environment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABOUT: &str = r#"{
        "id": "about",
        "backgroundImage": "/img/company-bg.jpg",
        "minHeight": "600px",
        "content": {"companyName": "Evolver", "companyNameHighlight": "AI", "description": "We build things."},
        "languages": {"it": {"description": "Costruiamo cose."}},
        "environments": {"staging": {"styling": {"theme": "light"}}}
    }"#;

    #[test]
    fn parses_full_section() {
        let section: Section = serde_json::from_str(ABOUT).unwrap();
        assert_eq!(section.id, "about");
        assert_eq!(section.min_height.as_deref(), Some("600px"));
        assert_eq!(
            section.language_override("it").map(|c| c.description.as_str()),
            Some("Costruiamo cose.")
        );
        assert!(section.environment_override("staging").is_some());
        assert!(section.environment_override("production").is_none());
    }

    #[test]
    fn visible_without_metadata() {
        let section: Section = serde_json::from_str(ABOUT).unwrap();
        assert!(section.is_visible());
        assert_eq!(section.order(), None);
    }

    #[test]
    fn override_rejects_unknown_part() {
        let result: Result<EnvironmentOverride, _> =
            serde_json::from_str(r#"{"layout": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_back_to_camel_case() {
        let section: Section = serde_json::from_str(ABOUT).unwrap();
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["backgroundImage"], "/img/company-bg.jpg");
        assert!(json.get("styling").is_none());
    }
}
