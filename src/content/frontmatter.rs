//! Front-matter parsing

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
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

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata parsed from a document's front-matter block.
///
/// Known keys are strongly typed; everything else lands in `extra` verbatim
/// so downstream consumers can rely on open-ended fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PostMetadata {
    pub date: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    /// Posts are unpublished unless the front-matter says otherwise
    pub published: bool,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Explicit preview override; when set, no excerpt is derived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl PostMetadata {
    /// Parse front-matter from raw document text.
    /// Returns (metadata, body).
    ///
    /// Documents without a leading `---` delimiter get default metadata with
    /// the whole text as body. An opening delimiter without a closing one, or
    /// a header that is not valid YAML, is a parse error.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start();
        if !trimmed.starts_with("---") {
            return Ok((PostMetadata::default(), content));
        }

        let rest = &trimmed[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Empty header block: `---` immediately followed by the closing fence
        if let Some(body) = rest.strip_prefix("---") {
            return Ok((PostMetadata::default(), body.trim_start_matches(['\n', '\r'])));
        }

        let Some(end_pos) = rest.find("\n---") else {
            return Err(Error::Parse(
                "unterminated front-matter delimiter".to_string(),
            ));
        };

        let yaml_content = &rest[..end_pos];
        let body = &rest[end_pos + 4..];
        let body = body.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((PostMetadata::default(), body));
        }

        let metadata: PostMetadata = serde_yaml::from_str(yaml_content)
            .map_err(|e| Error::Parse(format!("invalid front-matter YAML: {}", e)))?;

        Ok((metadata, body))
    }

    /// Parse the date string into a timestamp for sort ordering
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }

    /// Sort key for date-descending ordering.
    /// Unparseable or missing dates sort as earliest.
    pub fn sort_key(&self) -> NaiveDateTime {
        match self.parse_date() {
            Some(dt) => dt,
            None => {
                if let Some(raw) = &self.date {
                    tracing::warn!("unparseable date {:?}, sorting as earliest", raw);
                }
                NaiveDateTime::MIN
            }
        }
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}
