//! `copy()` with field overrides.
//!
//! An override only takes effect when its value is *truthy*: `false`, `0`,
//! an empty string, and empty collections are treated as "not requested"
//! and the original value is kept. So `copy` can never clear `keep`, reset
//! `sentence_index` to `0`, or empty the arguments. Downstream code relies
//! on this behavior.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    Arguments, CrossSentenceMention, EventMention, Mention, MentionCore, MentionId, Paths,
    RelationMention, TextBoundMention,
};
use crate::document::Document;
use crate::interval::Interval;

/// Whether a value counts as "set" for override purposes.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for usize {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Truthy for BTreeMap<K, V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for Arguments {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

// Structured values are always truthy, however they are populated.
impl Truthy for Interval {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for Arc<Document> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for MentionId {
    fn is_truthy(&self) -> bool {
        true
    }
}

fn pick<T: Truthy + Clone>(over: Option<T>, original: &T) -> T {
    match over {
        Some(value) if value.is_truthy() => value,
        _ => original.clone(),
    }
}

fn pick_paths(over: Option<Paths>, original: Option<&Paths>) -> Option<Paths> {
    match over {
        Some(value) if value.is_truthy() => Some(value),
        _ => original.cloned(),
    }
}

/// Field overrides for [`Mention::copy`].
///
/// Fields that don't apply to a variant (a trigger on a relation, arguments
/// on a text-bound mention) are ignored.
#[derive(Debug, Clone, Default)]
pub struct MentionOverrides {
    pub labels: Option<Vec<String>>,
    pub token_interval: Option<Interval>,
    pub sentence_index: Option<usize>,
    pub document: Option<Arc<Document>>,
    pub keep: Option<bool>,
    pub arguments: Option<Arguments>,
    pub paths: Option<Paths>,
    pub found_by: Option<String>,
    pub trigger: Option<MentionId>,
    pub anchor: Option<MentionId>,
    pub neighbor: Option<MentionId>,
}

impl MentionOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    #[must_use]
    pub const fn with_token_interval(mut self, interval: Interval) -> Self {
        self.token_interval = Some(interval);
        self
    }

    #[must_use]
    pub const fn with_sentence_index(mut self, index: usize) -> Self {
        self.sentence_index = Some(index);
        self
    }

    #[must_use]
    pub fn with_document(mut self, document: Arc<Document>) -> Self {
        self.document = Some(document);
        self
    }

    #[must_use]
    pub const fn with_keep(mut self, keep: bool) -> Self {
        self.keep = Some(keep);
        self
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = Some(arguments);
        self
    }

    #[must_use]
    pub fn with_paths(mut self, paths: Paths) -> Self {
        self.paths = Some(paths);
        self
    }

    #[must_use]
    pub fn with_found_by(mut self, found_by: impl Into<String>) -> Self {
        self.found_by = Some(found_by.into());
        self
    }

    #[must_use]
    pub const fn with_trigger(mut self, trigger: MentionId) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub const fn with_anchor(mut self, anchor: MentionId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub const fn with_neighbor(mut self, neighbor: MentionId) -> Self {
        self.neighbor = Some(neighbor);
        self
    }

    fn apply_core(&mut self, core: &MentionCore) -> MentionCore {
        MentionCore {
            labels: pick(self.labels.take(), &core.labels),
            token_interval: pick(self.token_interval.take(), &core.token_interval),
            sentence_index: pick(self.sentence_index.take(), &core.sentence_index),
            document: pick(self.document.take(), &core.document),
            keep: pick(self.keep.take(), &core.keep),
            found_by: pick(self.found_by.take(), &core.found_by),
            char_interval: core.char_interval,
        }
    }
}

impl TextBoundMention {
    #[must_use]
    pub fn copy(&self, mut overrides: MentionOverrides) -> Self {
        Self::new(overrides.apply_core(&self.core))
    }
}

impl RelationMention {
    #[must_use]
    pub fn copy(&self, mut overrides: MentionOverrides) -> Self {
        Self::new(
            overrides.apply_core(&self.core),
            pick(overrides.arguments.take(), &self.arguments),
            pick_paths(overrides.paths.take(), self.paths.as_ref()),
        )
    }
}

impl EventMention {
    #[must_use]
    pub fn copy(&self, mut overrides: MentionOverrides) -> Self {
        Self::new(
            overrides.apply_core(&self.core),
            pick(overrides.trigger.take(), &self.trigger),
            pick(overrides.arguments.take(), &self.arguments),
            pick_paths(overrides.paths.take(), self.paths.as_ref()),
        )
    }
}

impl CrossSentenceMention {
    #[must_use]
    pub fn copy(&self, mut overrides: MentionOverrides) -> Self {
        Self::new(
            overrides.apply_core(&self.core),
            pick(overrides.anchor.take(), &self.anchor),
            pick(overrides.neighbor.take(), &self.neighbor),
            pick(overrides.arguments.take(), &self.arguments),
        )
    }
}

impl Mention {
    /// A new mention of the same variant with truthy overrides applied.
    #[must_use]
    pub fn copy(&self, overrides: MentionOverrides) -> Self {
        match self {
            Self::TextBound(m) => Self::TextBound(m.copy(overrides)),
            Self::Relation(m) => Self::Relation(m.copy(overrides)),
            Self::Event(m) => Self::Event(m.copy(overrides)),
            Self::CrossSentence(m) => Self::CrossSentence(m.copy(overrides)),
        }
    }
}
