//! Wire types for the compact mention JSON format.
//!
//! # Shape
//!
//! ```text
//! {
//!   "documents": { "<doc_id>": { "id"?, "text"?, "sentences": [...] } },
//!   "mentions":  [ MentionRecord, ... ]
//! }
//! ```
//!
//! A `MentionRecord` carries `id`, `type`, `labels`, `tokenInterval`,
//! `document`, `sentence`, `characterStartOffset`, `characterEndOffset`,
//! `foundBy`, an optional `keep`, and per type `arguments`, `trigger`,
//! `anchor`/`neighbor`, and `paths`.
//!
//! Nested argument entries may be full records or bare `{"id": ...}`
//! references, so every field except `id` is optional here. Required-ness
//! is enforced during resolution, where the error can name the mention.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::interval::Interval;

/// One compact payload: documents plus a flat, id-referenced mention list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactJson {
    pub documents: BTreeMap<String, Value>,
    pub mentions: Vec<MentionRecord>,
}

/// A serialized mention, or a bare reference to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionRecord {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_interval: Option<Interval>,
    /// Key into the payload's `documents` map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_start_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_end_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<RawArguments>,
    /// Inline text-bound record for event mentions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Box<MentionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Box<MentionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbor: Option<Box<MentionRecord>>,
    /// Accepted and carried, but never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Value>,
}

impl MentionRecord {
    /// A bare `{"id": ...}` reference.
    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            labels: None,
            token_interval: None,
            document: None,
            sentence: None,
            character_start_offset: None,
            character_end_offset: None,
            found_by: None,
            keep: None,
            arguments: None,
            trigger: None,
            anchor: None,
            neighbor: None,
            paths: None,
        }
    }

    /// `true` if the declared `type` is exactly `TextBoundMention`.
    #[must_use]
    pub fn is_text_bound(&self) -> bool {
        self.kind.as_deref() == Some(crate::mention::MentionKind::TextBound.as_str())
    }
}

/// Argument records keyed by role, in the order the roles appear in the
/// JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArguments(Vec<(String, Vec<MentionRecord>)>);

impl RawArguments {
    #[must_use]
    pub const fn new(entries: Vec<(String, Vec<MentionRecord>)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MentionRecord])> {
        self.0
            .iter()
            .map(|(role, records)| (role.as_str(), records.as_slice()))
    }

    /// Every nested record, role by role.
    pub fn records(&self) -> impl Iterator<Item = &MentionRecord> {
        self.0.iter().flat_map(|(_, records)| records.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RawArguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (role, records) in &self.0 {
            map.serialize_entry(role, records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawArguments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RolesVisitor;

        impl<'de> Visitor<'de> for RolesVisitor {
            type Value = RawArguments;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from argument role to a list of mention records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Vec<MentionRecord>)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((role, records)) =
                    access.next_entry::<String, Vec<MentionRecord>>()?
                {
                    // A repeated key replaces the earlier list but keeps its slot.
                    if let Some(slot) = entries.iter_mut().find(|(r, _)| *r == role) {
                        slot.1 = records;
                    } else {
                        entries.push((role, records));
                    }
                }
                Ok(RawArguments(entries))
            }
        }

        deserializer.deserialize_map(RolesVisitor)
    }
}
