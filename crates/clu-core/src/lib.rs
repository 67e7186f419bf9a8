//! clu-core library.
//!
//! Rebuilds a typed, navigable mention graph from the compact JSON that an
//! information-extraction run exports: documents, text-bound entities,
//! relations, events with triggers, and cross-sentence links.
//!
//! ```
//! let graph = clu_core::from_compact_json(r#"{"documents": {}, "mentions": []}"#)?;
//! assert!(graph.is_empty());
//! # Ok::<(), clu_core::Error>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod interval;
pub mod mention;
pub mod serialization;

// # Conventions
//
// - **Errors**: `clu_core::Error` for resolution, `anyhow::Result` for config loading.
// - **Logging**: Use `tracing` macros (`warn!`, `debug!`); the binary installs the subscriber.

pub use config::{load_config, ResolveConfig};
pub use document::{Document, DocumentStore, Sentence};
pub use error::{Error, ErrorCode, ErrorKind, Result};
pub use graph::{MentionGraph, MentionSnapshot};
pub use interval::Interval;
pub use mention::{
    Arguments, CrossSentenceMention, EventMention, LabelPattern, Mention, MentionCore, MentionId,
    MentionKind, MentionOps, MentionOverrides, RelationMention, TextBoundMention,
};
pub use serialization::{
    from_compact_json, from_compact_json_with, from_compact_value, from_compact_value_with,
    resolve, CompactJson, MentionRecord,
};
