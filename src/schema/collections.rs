//! Page, language, and template records.

use super::keyed::KeyedMap;
use super::metadata::{Metadata, PageMetadata};
use super::section::Section;
use super::styling::Styling;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub(crate) const PAGE_FIELDS: &[&str] = &["title", "description", "language", "sections", "metadata"];
pub(crate) const TEMPLATE_FIELDS: &[&str] = &["name", "description", "sections", "styling", "metadata"];

pub const DEFAULT_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// A page: sections keyed by name, in the order they were written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub sections: KeyedMap<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

/// Kind of block a language's page layout places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    ContentHeader,
    Cards,
    Product,
    Hero,
}

impl PlacementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementKind::ContentHeader => "content_header",
            PlacementKind::Cards => "cards",
            PlacementKind::Product => "product",
            PlacementKind::Hero => "hero",
        }
    }
}

/// Where a section goes on a language's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Placement {
    #[serde(rename = "type")]
    pub kind: PlacementKind,
    pub id: String,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A supported language and its loosely structured content.
///
/// This is the one tolerant collection: `sections` and `defaults` are never
/// inspected, and top-level keys the schema does not name are kept in
/// `extra` (in source order) instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_sections: Option<Vec<Placement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Map<String, Value>>,
    pub sections: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Language {
    /// Placement directives sorted by their display order.
    pub fn placements(&self) -> Vec<&Placement> {
        let mut placements: Vec<&Placement> = self.page_sections.iter().flatten().collect();
        placements.sort_by_key(|p| p.order);
        placements
    }
}

/// Reusable page layout: an ordered list of section ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub sections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Styling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_language_defaults_to_en() {
        let page: Page = serde_json::from_str(r#"{"title": "Home", "sections": {}}"#).unwrap();
        assert_eq!(page.language, "en");
        assert!(page.sections.is_empty());
    }

    #[test]
    fn page_rejects_unknown_field() {
        let result: Result<Page, _> =
            serde_json::from_str(r#"{"title": "Home", "sections": {}, "slug": "home"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn language_keeps_unknown_fields_in_order() {
        let language: Language = serde_json::from_str(
            r#"{"code": "it", "name": "Italiano", "sections": {"about": {"anything": [1, 2]}}, "nav": {"home": "Casa"}, "footer": "Ciao"}"#,
        )
        .unwrap();
        assert_eq!(language.flag, None);
        assert_eq!(
            language.extra.keys().collect::<Vec<_>>(),
            vec!["nav", "footer"]
        );
        let back = serde_json::to_value(&language).unwrap();
        assert_eq!(back["footer"], "Ciao");
        assert_eq!(back["sections"]["about"]["anything"][1], 2);
    }

    #[test]
    fn placements_sorted_by_order() {
        let language: Language = serde_json::from_str(
            r#"{"code": "en", "name": "English", "sections": {}, "pageSections": [
                {"type": "cards", "id": "services", "order": 2},
                {"type": "hero", "id": "hero", "order": 1}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<&str> = language.placements().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["hero", "services"]);
        assert_eq!(language.placements()[0].kind, PlacementKind::Hero);
    }

    #[test]
    fn placement_type_closed_set() {
        let result: Result<Placement, _> =
            serde_json::from_str(r#"{"type": "carousel", "id": "x", "order": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn template_requires_description() {
        let result: Result<Template, _> =
            serde_json::from_str(r#"{"name": "landing", "sections": ["hero"]}"#);
        assert!(result.is_err());
    }
}
