//! Presentation hints attached to sections and templates.
//!
//! A styling descriptor is advisory: nothing reads it except
//! [`crate::classes::build_section_classes`], which turns it into CSS class
//! strings. Free-form fields hold utility class names (`bg-opacity-25`,
//! `max-w-xl`); the enumerated fields have closed value sets and reject
//! anything else at load time.

use serde::{Deserialize, Serialize};

/// Horizontal placement of a section's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Left,
    #[default]
    Right,
    Center,
    Full,
    Split,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::Left,
        Layout::Right,
        Layout::Center,
        Layout::Full,
        Layout::Split,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Left => "left",
            Layout::Right => "right",
            Layout::Center => "center",
            Layout::Full => "full",
            Layout::Split => "split",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Gradient,
    Custom,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Gradient => "gradient",
            Theme::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Fade,
    Slide,
    Zoom,
    None,
}

impl Animation {
    pub fn as_str(self) -> &'static str {
        match self {
            Animation::Fade => "fade",
            Animation::Slide => "slide",
            Animation::Zoom => "zoom",
            Animation::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Spacing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

/// Styling descriptor. Every field is optional; defaults are applied only
/// when class strings are built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Styling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_background_opacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_classes: Option<String>,
}

impl Styling {
    /// Shallow merge: fields set on `overlay` win, `spacing` included
    /// (replaced as a whole, never merged key by key).
    pub fn merged_with(&self, overlay: &Styling) -> Styling {
        Styling {
            background_opacity: pick(&overlay.background_opacity, &self.background_opacity),
            content_background_opacity: pick(
                &overlay.content_background_opacity,
                &self.content_background_opacity,
            ),
            max_width: pick(&overlay.max_width, &self.max_width),
            text_align: pick(&overlay.text_align, &self.text_align),
            justify_content: pick(&overlay.justify_content, &self.justify_content),
            layout: overlay.layout.or(self.layout),
            theme: overlay.theme.or(self.theme),
            animation: overlay.animation.or(self.animation),
            spacing: pick(&overlay.spacing, &self.spacing),
            custom_classes: pick(&overlay.custom_classes, &self.custom_classes),
        }
    }
}

/// The overlay value if set, else the base value.
pub(crate) fn pick<T: Clone>(overlay: &Option<T>, base: &Option<T>) -> Option<T> {
    overlay.as_ref().or(base.as_ref()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_fields() {
        let styling: Styling = serde_json::from_str(
            r#"{"backgroundOpacity": "bg-opacity-20", "layout": "split", "theme": "gradient"}"#,
        )
        .unwrap();
        assert_eq!(styling.background_opacity.as_deref(), Some("bg-opacity-20"));
        assert_eq!(styling.layout, Some(Layout::Split));
        assert_eq!(styling.theme, Some(Theme::Gradient));
        assert_eq!(styling.animation, None);
    }

    #[test]
    fn rejects_value_outside_closed_set() {
        let result: Result<Styling, _> = serde_json::from_str(r#"{"animation": "spin"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown variant `spin`"), "{err}");
    }

    #[test]
    fn rejects_layout_outside_closed_set() {
        let result: Result<Styling, _> = serde_json::from_str(r#"{"layout": "diagonal"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown variant `diagonal`"), "{err}");
        for layout in Layout::ALL {
            let raw = format!(r#"{{"layout": "{}"}}"#, layout.as_str());
            let styling: Styling = serde_json::from_str(&raw).unwrap();
            assert_eq!(styling.layout, Some(layout));
        }
    }

    #[test]
    fn rejects_unknown_field() {
        let result: Result<Styling, _> = serde_json::from_str(r#"{"colour": "red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn merge_replaces_spacing_wholesale() {
        let base = Styling {
            max_width: Some("max-w-lg".into()),
            spacing: Some(Spacing {
                padding: Some("p-4".into()),
                margin: Some("m-2".into()),
            }),
            ..Styling::default()
        };
        let overlay = Styling {
            spacing: Some(Spacing {
                padding: Some("p-8".into()),
                margin: None,
            }),
            ..Styling::default()
        };
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.max_width.as_deref(), Some("max-w-lg"));
        let spacing = merged.spacing.unwrap();
        assert_eq!(spacing.padding.as_deref(), Some("p-8"));
        assert_eq!(spacing.margin, None);
    }

    #[test]
    fn empty_overlay_is_identity() {
        let base = Styling {
            theme: Some(Theme::Light),
            custom_classes: Some("shadow-xl".into()),
            ..Styling::default()
        };
        assert_eq!(base.merged_with(&Styling::default()), base);
    }
}
