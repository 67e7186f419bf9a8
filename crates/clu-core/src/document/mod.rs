//! Annotated documents and sentences.
//!
//! [`Document`] and [`Sentence`] are produced upstream by a processor and
//! arrive here already tokenized. This module only gives them a typed shape;
//! mentions slice into them through [`crate::mention::MentionOps`].

pub mod graph;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use graph::{DirectedGraph, Edge};
pub use store::DocumentStore;

/// Storage for annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The original text, when the processor kept it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub sentences: Vec<Sentence>,
}

impl Document {
    #[must_use]
    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }
}

/// One annotated sentence: tokens plus per-token parallel arrays.
///
/// `raw` falls back to `words` when the wire record omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SentenceWire")]
pub struct Sentence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Raw tokens; expected to match the original text.
    pub raw: Vec<String>,
    pub words: Vec<String>,
    /// Character offset starting each token (inclusive).
    #[serde(rename = "startOffsets")]
    pub start_offsets: Vec<usize>,
    /// Character offset ending each token (exclusive).
    #[serde(rename = "endOffsets")]
    pub end_offsets: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub norms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<String>>,
    pub graphs: BTreeMap<String, DirectedGraph>,
}

impl Sentence {
    /// Number of tokens.
    #[must_use]
    pub fn length(&self) -> usize {
        self.raw.len()
    }
}

#[derive(Deserialize)]
struct SentenceWire {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    raw: Option<Vec<String>>,
    words: Vec<String>,
    #[serde(rename = "startOffsets", alias = "start_offsets")]
    start_offsets: Vec<usize>,
    #[serde(rename = "endOffsets", alias = "end_offsets")]
    end_offsets: Vec<usize>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    lemmas: Option<Vec<String>>,
    #[serde(default)]
    norms: Option<Vec<String>>,
    #[serde(default)]
    chunks: Option<Vec<String>>,
    #[serde(default)]
    entities: Option<Vec<String>>,
    graphs: BTreeMap<String, DirectedGraph>,
}

impl From<SentenceWire> for Sentence {
    fn from(wire: SentenceWire) -> Self {
        let raw = wire.raw.unwrap_or_else(|| wire.words.clone());
        Self {
            text: wire.text,
            raw,
            words: wire.words,
            start_offsets: wire.start_offsets,
            end_offsets: wire.end_offsets,
            tags: wire.tags,
            lemmas: wire.lemmas,
            norms: wire.norms,
            chunks: wire.chunks,
            entities: wire.entities,
            graphs: wire.graphs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sentence_json() -> serde_json::Value {
        json!({
            "words": ["ASPP1", "binds", "p53"],
            "startOffsets": [0, 6, 12],
            "endOffsets": [5, 11, 15],
            "tags": ["NN", "VBZ", "NN"],
            "graphs": {
                "universal-basic": {
                    "roots": [1],
                    "edges": [{"source": 1, "destination": 0, "relation": "nsubj"}]
                }
            }
        })
    }

    #[test]
    fn raw_defaults_to_words() {
        let s: Sentence = serde_json::from_value(sentence_json()).expect("valid sentence");
        assert_eq!(s.raw, s.words);
        assert_eq!(s.length(), 3);
        assert_eq!(s.start_offsets, vec![0, 6, 12]);
        assert!(s.lemmas.is_none());
    }

    #[test]
    fn explicit_raw_is_kept() {
        let mut value = sentence_json();
        value["raw"] = json!(["ASPP1", "binds", "p53."]);
        let s: Sentence = serde_json::from_value(value).expect("valid sentence");
        assert_eq!(s.raw[2], "p53.");
        assert_eq!(s.words[2], "p53");
    }

    #[test]
    fn missing_graphs_is_rejected() {
        let mut value = sentence_json();
        value.as_object_mut().expect("object").remove("graphs");
        assert!(serde_json::from_value::<Sentence>(value).is_err());
    }

    #[test]
    fn serializes_offsets_with_interchange_names() {
        let s: Sentence = serde_json::from_value(sentence_json()).expect("valid sentence");
        let out = serde_json::to_value(&s).expect("serializable");
        assert_eq!(out["startOffsets"], json!([0, 6, 12]));
        assert_eq!(out["endOffsets"], json!([5, 11, 15]));
        assert!(out.get("lemmas").is_none());

        let back: Sentence = serde_json::from_value(out).expect("round trip");
        assert_eq!(back, s);
    }

    #[test]
    fn document_sentence_lookup() {
        let doc: Document = serde_json::from_value(json!({
            "id": "d1",
            "text": "ASPP1 binds p53",
            "sentences": [sentence_json()]
        }))
        .expect("valid document");
        assert!(doc.sentence(0).is_some());
        assert!(doc.sentence(1).is_none());
    }
}
