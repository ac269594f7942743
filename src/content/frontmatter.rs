//! Front-matter parsing
//!
//! Posts carry a YAML block fenced by `---` lines at the top of the file.
//! Parsing is lenient: a missing or malformed block yields defaults with a
//! warning rather than failing the whole content load.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Accepts either a single string or a list of strings.
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter fields of a post.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    pub published_at: Option<String>,
    pub read_time: Option<u32>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl FrontMatter {
    /// Parse front-matter from a post file.
    /// Returns `(front_matter, body)`.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return (FrontMatter::default(), content);
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end) = rest.find("\n---") else {
            // No closing fence; the whole file is body
            return (FrontMatter::default(), content);
        };

        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        match serde_yaml::from_str::<FrontMatter>(yaml) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, treating as body: {}", e);
                (FrontMatter::default(), content)
            }
        }
    }

    /// Parse `published_at` into a local date-time, if present and valid.
    pub fn parse_published_at(&self) -> Option<DateTime<Local>> {
        self.published_at.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the formats posts actually use.
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 3339 first; post dates are usually `2025-01-21T16:00:00Z`
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(
            dt,
            *Local::now().offset(),
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_frontmatter() {
        let content = r#"---
id: "4"
title: Bitcoin ETF market changes
slug: bitcoin-etf-market-changes
category: bitcoin
excerpt: What spot ETF approval meant for the market.
published_at: 2025-01-21T16:00:00Z
read_time: 5
tags:
  - bitcoin
  - etf
---

# Heading

Body text.
"#;
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.id.as_deref(), Some("4"));
        assert_eq!(fm.slug.as_deref(), Some("bitcoin-etf-market-changes"));
        assert_eq!(fm.category.as_deref(), Some("bitcoin"));
        assert_eq!(fm.read_time, Some(5));
        assert_eq!(fm.tags, vec!["bitcoin", "etf"]);
        assert!(fm.published);
        assert!(body.starts_with("# Heading"));
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntitle: T\ntags: stocks\n---\nbody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tags, vec!["stocks"]);
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let content = "Just text.\nMore text.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_fence_is_all_body() {
        let content = "---\ntitle: broken\nno closing fence";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let fm = FrontMatter {
            published_at: Some("2025-01-21T16:00:00Z".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_published_at().unwrap();
        assert_eq!(dt.with_timezone(&chrono::Utc).format("%H").to_string(), "16");
    }

    #[test]
    fn test_empty_date_is_none() {
        let fm = FrontMatter {
            published_at: Some("".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_published_at().is_none());
    }
}
