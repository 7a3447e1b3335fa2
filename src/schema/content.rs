//! Textual payload of a section: the content block and its parts.

use super::styling::pick;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reusable content fragment (a card, a tile, a list entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// Free-form, never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Course-like entry: used both in `courses` and as the second shape of
/// `features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Course {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IconFeature {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

/// One entry of a plain feature list: bare text or text with an icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureEntry {
    Text(String),
    Iconized(IconFeature),
}

impl FeatureEntry {
    pub fn text(&self) -> &str {
        match self {
            FeatureEntry::Text(text) => text,
            FeatureEntry::Iconized(feature) => &feature.text,
        }
    }
}

/// The two accepted shapes of `features`. A list is one or the other,
/// never a mix.
///
/// The shape is picked from the first element: a string, or an object with
/// a `text` key, selects [`Features::Plain`]; any other object selects
/// [`Features::Courses`]. Every element is then held to that shape. An empty
/// list is a plain list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Features {
    Plain(Vec<FeatureEntry>),
    Courses(Vec<Course>),
}

impl Features {
    pub fn len(&self) -> usize {
        match self {
            Features::Plain(entries) => entries.len(),
            Features::Courses(courses) => courses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_course_shaped(first: &Value) -> bool {
    first
        .as_object()
        .is_some_and(|object| !object.contains_key("text"))
}

impl<'de> Deserialize<'de> for Features {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        let courses = raw.first().is_some_and(is_course_shaped);

        if courses {
            raw.into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    Course::deserialize(entry).map_err(|err| {
                        D::Error::custom(format!(
                            "features[{i}]: expected a course entry like features[0]: {err}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Features::Courses)
        } else {
            raw.into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    FeatureEntry::deserialize(entry).map_err(|_| {
                        D::Error::custom(format!(
                            "features[{i}]: expected a string or {{text, icon?, iconColor?}} like features[0]"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Features::Plain)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaStyle {
    Primary,
    Secondary,
    Outline,
}

impl CtaStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            CtaStyle::Primary => "primary",
            CtaStyle::Secondary => "secondary",
            CtaStyle::Outline => "outline",
        }
    }
}

/// Call to action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cta {
    pub text: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CtaStyle>,
}

/// Body of a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name_highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
}

impl ContentBlock {
    /// Shallow merge: each field set on `patch` replaces the base field
    /// wholesale; unset fields keep the base value.
    pub fn merged_with(&self, patch: &ContentPatch) -> ContentBlock {
        ContentBlock {
            company_name: pick(&patch.company_name, &self.company_name),
            company_name_highlight: pick(
                &patch.company_name_highlight,
                &self.company_name_highlight,
            ),
            title: pick(&patch.title, &self.title),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            subtitle: pick(&patch.subtitle, &self.subtitle),
            features: pick(&patch.features, &self.features),
            courses: pick(&patch.courses, &self.courses),
            items: pick(&patch.items, &self.items),
            button_text: pick(&patch.button_text, &self.button_text),
            cta: pick(&patch.cta, &self.cta),
        }
    }
}

/// Content block fragment: every field optional. Environment overrides use
/// this shape, so `{}` is a valid (no-op) override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name_highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
}

impl From<ContentBlock> for ContentPatch {
    fn from(block: ContentBlock) -> Self {
        ContentPatch {
            company_name: block.company_name,
            company_name_highlight: block.company_name_highlight,
            title: block.title,
            description: Some(block.description),
            subtitle: block.subtitle,
            features: block.features,
            courses: block.courses,
            items: block.items,
            button_text: block.button_text,
            cta: block.cta,
        }
    }
}
