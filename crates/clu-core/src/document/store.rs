//! Per-call `doc_id -> Document` table.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::Document;
use crate::error::{Error, Result};

/// Documents keyed by the id used in a compact export.
///
/// Each document is built exactly once and handed out as an `Arc`, so every
/// mention that refers to the same id shares one allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    docs: BTreeMap<String, Arc<Document>>,
}

impl DocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from the raw `documents` map of a compact export.
    ///
    /// A record without an `id` gets the map key as its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] if a record does not match the
    /// [`Document`] shape.
    pub fn from_raw(raw: BTreeMap<String, Value>) -> Result<Self> {
        let mut store = Self::new();
        for (doc_id, mut value) in raw {
            if let Value::Object(fields) = &mut value {
                if !fields.contains_key("id") {
                    fields.insert("id".to_owned(), Value::String(doc_id.clone()));
                }
            }
            let doc: Document = serde_json::from_value(value).map_err(|source| {
                Error::InvalidDocument {
                    doc_id: doc_id.clone(),
                    source,
                }
            })?;
            store.insert(doc_id, doc);
        }
        debug!(documents = store.len(), "document store built");
        Ok(store)
    }

    /// Add a document, returning the shared handle stored for it.
    pub fn insert(&mut self, doc_id: impl Into<String>, doc: Document) -> Arc<Document> {
        let handle = Arc::new(doc);
        self.docs.insert(doc_id.into(), Arc::clone(&handle));
        handle
    }

    #[must_use]
    pub fn get(&self, doc_id: &str) -> Option<&Arc<Document>> {
        self.docs.get(doc_id)
    }

    /// Find the key under which `doc` is stored, comparing by pointer.
    #[must_use]
    pub fn id_of(&self, doc: &Arc<Document>) -> Option<&str> {
        self.docs
            .iter()
            .find(|(_, stored)| Arc::ptr_eq(stored, doc))
            .map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Document>)> {
        self.docs.iter().map(|(id, doc)| (id.as_str(), doc))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
