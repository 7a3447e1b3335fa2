//! Content schema: typed records and the validator that produces them.
//!
//! Four collections exist, one file per record:
//!
//! | Collection | Record | Unknown fields |
//! |------------|--------|----------------|
//! | `pages` | [`Page`] | rejected |
//! | `sections` | [`Section`] | rejected |
//! | `languages` | [`Language`] | kept in [`Language::extra`] |
//! | `templates` | [`Template`] | rejected |
//!
//! Records arrive as JSON values (TOML records are converted first with
//! [`toml_to_json`]). The validator walks the structural levels of each
//! record (page → sections → content / styling / metadata / overrides) so
//! a failure names the exact field path, then hands each level to serde,
//! whose message names the offending key or the expected shape:
//!
//! ```text
//! schema violation at `sections.about.styling`: unknown variant `blue`,
//!     expected one of `dark`, `light`, `gradient`, `custom`
//! ```
//!
//! Nothing is defaulted except `metadata.visible` (true) and a page's
//! `language` ("en").

mod collections;
mod content;
mod keyed;
mod metadata;
mod section;
mod styling;

pub use collections::{DEFAULT_LANGUAGE, Language, Page, Placement, PlacementKind, Template};
pub use content::{
    ContentBlock, ContentItem, ContentPatch, Course, Cta, CtaStyle, FeatureEntry, Features,
    IconFeature,
};
pub use keyed::KeyedMap;
pub use metadata::{
    Analytics, Environment, Metadata, MetadataPatch, PageMetadata, Timestamp, UnknownEnvironment,
};
pub use section::{EnvironmentOverride, Section};
pub use styling::{Animation, Layout, Spacing, Styling, Theme};

use collections::{PAGE_FIELDS, TEMPLATE_FIELDS};
use section::{OVERRIDE_FIELDS, SECTION_FIELDS};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// A record does not match its collection's shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema violation at `{path}`: {expected}")]
pub struct SchemaViolation {
    /// Dotted path to the offending value; `<root>` for the record itself.
    pub path: String,
    /// What was expected there, or which key was not allowed.
    pub expected: String,
}

impl SchemaViolation {
    fn new(path: &str, expected: impl Into<String>) -> Self {
        SchemaViolation {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path.to_string()
            },
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Page,
    Section,
    Language,
    Template,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Page,
        CollectionKind::Section,
        CollectionKind::Language,
        CollectionKind::Template,
    ];

    /// Directory name of the collection under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            CollectionKind::Page => "pages",
            CollectionKind::Section => "sections",
            CollectionKind::Language => "languages",
            CollectionKind::Template => "templates",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A validated record of any collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Page(Page),
    Section(Section),
    Language(Language),
    Template(Template),
}

/// Validate a raw record against its collection's schema.
pub fn validate(kind: CollectionKind, raw: &Value) -> Result<Record, SchemaViolation> {
    match kind {
        CollectionKind::Page => validate_page(raw).map(Record::Page),
        CollectionKind::Section => validate_section(raw).map(Record::Section),
        CollectionKind::Language => validate_language(raw).map(Record::Language),
        CollectionKind::Template => validate_template(raw).map(Record::Template),
    }
}

pub fn validate_page(raw: &Value) -> Result<Page, SchemaViolation> {
    let fields = object_at(raw, "")?;
    reject_unknown(fields, PAGE_FIELDS, "")?;

    if let Some(sections) = fields.get("sections") {
        for (key, section) in object_at(sections, "sections")? {
            section_at(section, &join("sections", key))?;
        }
    }
    if let Some(metadata) = fields.get("metadata") {
        decode_at::<PageMetadata>(metadata, "metadata")?;
    }
    decode_at(raw, "")
}

pub fn validate_section(raw: &Value) -> Result<Section, SchemaViolation> {
    section_at(raw, "")
}

pub fn validate_language(raw: &Value) -> Result<Language, SchemaViolation> {
    let fields = object_at(raw, "")?;

    if let Some(placements) = fields.get("pageSections") {
        let Some(entries) = placements.as_array() else {
            return Err(SchemaViolation::new("pageSections", "expected an array"));
        };
        for (i, entry) in entries.iter().enumerate() {
            decode_at::<Placement>(entry, &format!("pageSections[{i}]"))?;
        }
    }
    if let Some(defaults) = fields.get("defaults") {
        object_at(defaults, "defaults")?;
    }
    if let Some(sections) = fields.get("sections") {
        object_at(sections, "sections")?;
    }
    decode_at(raw, "")
}

pub fn validate_template(raw: &Value) -> Result<Template, SchemaViolation> {
    let fields = object_at(raw, "")?;
    reject_unknown(fields, TEMPLATE_FIELDS, "")?;

    if let Some(styling) = fields.get("styling") {
        decode_at::<Styling>(styling, "styling")?;
    }
    if let Some(metadata) = fields.get("metadata") {
        decode_at::<Metadata>(metadata, "metadata")?;
    }
    decode_at(raw, "")
}

fn section_at(raw: &Value, path: &str) -> Result<Section, SchemaViolation> {
    let fields = object_at(raw, path)?;
    reject_unknown(fields, SECTION_FIELDS, path)?;

    if let Some(content) = fields.get("content") {
        decode_at::<ContentBlock>(content, &join(path, "content"))?;
    }
    if let Some(styling) = fields.get("styling") {
        decode_at::<Styling>(styling, &join(path, "styling"))?;
    }
    if let Some(metadata) = fields.get("metadata") {
        decode_at::<Metadata>(metadata, &join(path, "metadata"))?;
    }
    if let Some(languages) = fields.get("languages") {
        let languages_path = join(path, "languages");
        for (code, content) in object_at(languages, &languages_path)? {
            decode_at::<ContentBlock>(content, &join(&languages_path, code))?;
        }
    }
    if let Some(environments) = fields.get("environments") {
        let environments_path = join(path, "environments");
        for (name, overrides) in object_at(environments, &environments_path)? {
            override_at(overrides, &join(&environments_path, name))?;
        }
    }
    decode_at(raw, path)
}

fn override_at(raw: &Value, path: &str) -> Result<EnvironmentOverride, SchemaViolation> {
    let fields = object_at(raw, path)?;
    reject_unknown(fields, OVERRIDE_FIELDS, path)?;

    if let Some(content) = fields.get("content") {
        decode_at::<ContentPatch>(content, &join(path, "content"))?;
    }
    if let Some(styling) = fields.get("styling") {
        decode_at::<Styling>(styling, &join(path, "styling"))?;
    }
    if let Some(metadata) = fields.get("metadata") {
        decode_at::<MetadataPatch>(metadata, &join(path, "metadata"))?;
    }
    decode_at(raw, path)
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn object_at<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| SchemaViolation::new(path, format!("expected an object, found {}", kind_of(value))))
}

fn reject_unknown(
    fields: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
) -> Result<(), SchemaViolation> {
    match fields.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(SchemaViolation::new(
            &join(path, key),
            format!("unknown field, expected one of: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

fn decode_at<T: DeserializeOwned>(value: &Value, path: &str) -> Result<T, SchemaViolation> {
    T::deserialize(value).map_err(|err| SchemaViolation::new(path, err.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert a parsed TOML document to the JSON value model the validator
/// works on. Datetimes become RFC 3339 strings; table order is kept.
/// Non-finite floats (`nan`, `inf`) have no JSON form and are rejected.
pub fn toml_to_json(value: toml::Value) -> Result<Value, SchemaViolation> {
    toml_at(value, "")
}

fn toml_at(value: toml::Value, path: &str) -> Result<Value, SchemaViolation> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| SchemaViolation::new(path, format!("expected a finite number, found {f}")))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| toml_at(item, &join(path, &i.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| -> Result<(String, Value), SchemaViolation> {
                    let value = toml_at(value, &join(path, &key))?;
                    Ok((key, value))
                })
                .collect::<Result<_, _>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn home_page() -> Value {
        json!({
            "title": "Home",
            "sections": {
                "hero": {
                    "id": "hero",
                    "content": {"title": "Welcome", "description": "Smart solutions."},
                    "metadata": {"order": 1}
                },
                "about": {
                    "id": "about",
                    "backgroundImage": "img/company-bg.jpg",
                    "content": {"companyName": "Evolver", "companyNameHighlight": "AI", "description": "We build."},
                    "styling": {"layout": "right", "theme": "dark"},
                    "metadata": {"order": 2, "environment": ["production"]},
                    "languages": {"it": {"description": "Costruiamo."}},
                    "environments": {"staging": {"styling": {}}}
                }
            },
            "metadata": {"author": "web team", "environment": "production"}
        })
    }

    #[test]
    fn valid_page_passes_and_keeps_section_order() {
        let page = validate_page(&home_page()).unwrap();
        assert_eq!(page.language, "en");
        assert_eq!(page.sections.keys().collect::<Vec<_>>(), vec!["hero", "about"]);
        let about = page.sections.get("about").unwrap();
        assert!(about.metadata.as_ref().unwrap().visible);
        assert_eq!(
            page.metadata.unwrap().environment,
            Some(Environment::Production)
        );
    }

    #[test]
    fn unknown_top_level_field_names_the_key() {
        let mut raw = home_page();
        raw["slug"] = json!("home");
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "slug");
        assert!(err.expected.contains("unknown field"));
    }

    #[test]
    fn enum_violation_reports_nested_path() {
        let mut raw = home_page();
        raw["sections"]["about"]["styling"]["theme"] = json!("blue");
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "sections.about.styling");
        assert!(err.expected.contains("unknown variant `blue`"), "{}", err.expected);
    }

    #[test]
    fn missing_description_reports_content_path() {
        let mut raw = home_page();
        raw["sections"]["hero"]["content"] = json!({"title": "Welcome"});
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "sections.hero.content");
        assert!(err.expected.contains("description"));
    }

    #[test]
    fn missing_section_id_reports_section_path() {
        let mut raw = home_page();
        raw["sections"]["hero"].as_object_mut().unwrap().remove("id");
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "sections.hero");
        assert!(err.expected.contains("missing field `id`"));
    }

    #[test]
    fn override_violation_reports_environment_path() {
        let mut raw = home_page();
        raw["sections"]["about"]["environments"]["staging"] =
            json!({"metadata": {"environment": ["qa"]}});
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "sections.about.environments.staging.metadata");
    }

    #[test]
    fn unknown_override_part_rejected() {
        let mut raw = home_page();
        raw["sections"]["about"]["environments"]["staging"] = json!({"layout": "left"});
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "sections.about.environments.staging.layout");
    }

    #[test]
    fn language_override_checked_as_content_block() {
        let mut raw = home_page();
        raw["sections"]["about"]["languages"]["de"] = json!({"title": "Über uns"});
        let err = validate_page(&raw).unwrap_err();
        assert_eq!(err.path, "sections.about.languages.de");
    }

    #[test]
    fn non_object_record_rejected() {
        let err = validate_section(&json!(["about"])).unwrap_err();
        assert_eq!(err.path, "<root>");
        assert!(err.expected.contains("an array"));
    }

    #[test]
    fn language_passthrough_and_placement_paths() {
        let raw = json!({
            "code": "de",
            "name": "Deutsch",
            "flag": "🇩🇪",
            "sections": {"about": {"whatever": true}},
            "menu": ["Start", "Kontakt"]
        });
        let language = validate_language(&raw).unwrap();
        assert_eq!(language.extra["menu"][1], "Kontakt");

        let bad = json!({
            "code": "de",
            "name": "Deutsch",
            "sections": {},
            "pageSections": [{"type": "hero", "id": "hero", "order": 1}, {"type": "slider", "id": "x", "order": 2}]
        });
        let err = validate_language(&bad).unwrap_err();
        assert_eq!(err.path, "pageSections[1]");
    }

    #[test]
    fn template_validation() {
        let template = validate_template(&json!({
            "name": "landing",
            "description": "Hero then about",
            "sections": ["hero", "about"],
            "styling": {"animation": "fade"}
        }))
        .unwrap();
        assert_eq!(template.sections, vec!["hero", "about"]);

        let err = validate_template(&json!({
            "name": "landing",
            "description": "x",
            "sections": [],
            "styling": {"animation": "spin"}
        }))
        .unwrap_err();
        assert_eq!(err.path, "styling");
    }

    #[test]
    fn validate_dispatches_on_kind() {
        let record = validate(CollectionKind::Page, &home_page()).unwrap();
        assert!(matches!(record, Record::Page(_)));
        assert!(validate(CollectionKind::Template, &home_page()).is_err());
    }

    #[test]
    fn validated_page_round_trips() {
        let page = validate_page(&home_page()).unwrap();
        let serialized = serde_json::to_value(&page).unwrap();
        let again = validate_page(&serialized).unwrap();
        assert_eq!(again, page);
    }

    #[test]
    fn toml_non_finite_float_is_rejected() {
        let doc: toml::Value = toml::from_str(
            r#"
id = "hero"

[content]
description = "Hi"

[metadata]
order = nan
"#,
        )
        .unwrap();
        let err = toml_to_json(doc).unwrap_err();
        assert_eq!(err.path, "metadata.order");
        assert!(err.expected.contains("finite number"), "{}", err.expected);
    }

    #[test]
    fn toml_record_converts_with_dates_and_order() {
        let doc: toml::Value = toml::from_str(
            r#"
id = "services"

[content]
title = "Services"
description = "What we do"
features = ["Consulting", "Training"]

[metadata]
order = 3
lastUpdated = 2024-05-01
"#,
        )
        .unwrap();
        let section = validate_section(&toml_to_json(doc).unwrap()).unwrap();
        let metadata = section.metadata.unwrap();
        assert_eq!(metadata.order, Some(3.0));
        assert_eq!(metadata.last_updated.unwrap().to_string(), "2024-05-01");
    }
}
