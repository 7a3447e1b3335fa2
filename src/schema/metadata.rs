//! Bookkeeping attached to sections, templates, and pages.

use super::styling::pick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deployment environment a record can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown environment `{0}`, expected one of `development`, `staging`, `production`")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| UnknownEnvironment(s.to_string()))
    }
}

/// An RFC 3339 date or date-time (`2024-05-01`, `2024-05-01T09:30:00Z`).
///
/// Stored as the TOML datetime type so that TOML records can use native
/// datetime literals while JSON records use strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp(toml::value::Datetime);

impl FromStr for Timestamp {
    type Err = toml::value::DatetimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Timestamp)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid date `{raw}`, expected an RFC 3339 date or date-time"
            ))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Analytics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
}

fn default_visible() -> bool {
    true
}

/// Metadata descriptor for sections and templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Environments the record is active in. Absent means everywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<Environment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            order: None,
            visible: true,
            last_updated: None,
            author: None,
            version: None,
            featured: None,
            environment: None,
            analytics: None,
        }
    }
}

impl Metadata {
    /// Shallow merge of an override fragment; only fields the patch sets
    /// are replaced.
    pub fn merged_with(&self, patch: &MetadataPatch) -> Metadata {
        Metadata {
            order: patch.order.or(self.order),
            visible: patch.visible.unwrap_or(self.visible),
            last_updated: pick(&patch.last_updated, &self.last_updated),
            author: pick(&patch.author, &self.author),
            version: pick(&patch.version, &self.version),
            featured: patch.featured.or(self.featured),
            environment: pick(&patch.environment, &self.environment),
            analytics: pick(&patch.analytics, &self.analytics),
        }
    }
}

/// Metadata fragment used by environment overrides.
///
/// Same fields as [`Metadata`], but `visible` has no default: an override
/// that does not mention visibility leaves the base value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetadataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<Environment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
}

/// Page-level metadata. Targets a single environment rather than a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_defaults_to_true() {
        let metadata: Metadata = serde_json::from_str(r#"{"order": 2}"#).unwrap();
        assert!(metadata.visible);
        assert_eq!(metadata.order, Some(2.0));
        assert!(Metadata::default().visible);
    }

    #[test]
    fn environment_list_is_closed() {
        let ok: Metadata =
            serde_json::from_str(r#"{"environment": ["staging", "production"]}"#).unwrap();
        assert_eq!(
            ok.environment,
            Some(vec![Environment::Staging, Environment::Production])
        );

        let bad: Result<Metadata, _> = serde_json::from_str(r#"{"environment": ["preview"]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn environment_from_str() {
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Staging));
        let err = "prod".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("`prod`"));
    }

    #[test]
    fn timestamp_accepts_date_and_datetime() {
        let date: Timestamp = serde_json::from_str(r#""2024-05-01""#).unwrap();
        assert_eq!(date.to_string(), "2024-05-01");
        let datetime: Timestamp = serde_json::from_str(r#""2024-05-01T09:30:00Z""#).unwrap();
        assert_eq!(serde_json::to_string(&datetime).unwrap(), r#""2024-05-01T09:30:00Z""#);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        let result: Result<Timestamp, _> = serde_json::from_str(r#""last tuesday""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("RFC 3339"), "{err}");
    }

    #[test]
    fn patch_without_visible_keeps_base() {
        let base = Metadata {
            visible: false,
            author: Some("ops".into()),
            ..Metadata::default()
        };
        let merged = base.merged_with(&MetadataPatch {
            version: Some("2".into()),
            ..MetadataPatch::default()
        });
        assert!(!merged.visible);
        assert_eq!(merged.author.as_deref(), Some("ops"));
        assert_eq!(merged.version.as_deref(), Some("2"));
    }

    #[test]
    fn patch_can_hide() {
        let merged = Metadata::default().merged_with(&MetadataPatch {
            visible: Some(false),
            ..MetadataPatch::default()
        });
        assert!(!merged.visible);
    }
}
