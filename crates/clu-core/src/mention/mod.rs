//! The closed mention model.
//!
//! A [`Mention`] is one of four variants. All of them share a
//! [`MentionCore`] and expose the same read-only projections through the
//! [`MentionOps`] trait. References between mentions (triggers, arguments,
//! anchors) are [`MentionId`] indices into a
//! [`MentionGraph`](crate::graph::MentionGraph), so shared and cyclic
//! structures never need owning pointers between mentions.
//!
//! Mentions are immutable once built. [`Mention::copy`] produces a modified
//! clone; see [`overrides`] for its override rules.

pub mod arguments;
pub mod overrides;
pub mod pattern;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use arguments::{Arguments, Paths, SynPath};
pub use overrides::{MentionOverrides, Truthy};
pub use pattern::LabelPattern;

use crate::document::{Document, Sentence};
use crate::interval::Interval;

/// Rule name recorded when the producer did not say which rule fired.
pub const UNKNOWN_RULE: &str = "unknown";

// ---------------------------------------------------------------------------
// MentionId
// ---------------------------------------------------------------------------

/// Index of a mention inside a [`MentionGraph`](crate::graph::MentionGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MentionId(usize);

impl MentionId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MentionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// MentionKind
// ---------------------------------------------------------------------------

/// The wire discriminator (`type`) of a mention record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentionKind {
    #[serde(rename = "TextBoundMention")]
    TextBound,
    #[serde(rename = "RelationMention")]
    Relation,
    #[serde(rename = "EventMention")]
    Event,
    #[serde(rename = "CrossSentenceMention")]
    CrossSentence,
}

impl MentionKind {
    pub const ALL: [Self; 4] = [
        Self::TextBound,
        Self::Event,
        Self::Relation,
        Self::CrossSentence,
    ];

    /// The `type` value used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextBound => "TextBoundMention",
            Self::Relation => "RelationMention",
            Self::Event => "EventMention",
            Self::CrossSentence => "CrossSentenceMention",
        }
    }

    /// Short discriminator conventionally used as an id prefix.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Self::TextBound => "T",
            Self::Relation => "R",
            Self::Event => "E",
            Self::CrossSentence => "CS",
        }
    }

    /// All accepted wire names, comma separated, for error messages.
    #[must_use]
    pub const fn expected_names() -> &'static str {
        "TextBoundMention, EventMention, RelationMention, CrossSentenceMention"
    }
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MentionKind {
    /// The unrecognized value.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// MentionCore
// ---------------------------------------------------------------------------

/// Fields every mention variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionCore {
    /// Non-empty; the first label is the canonical one.
    pub labels: Vec<String>,
    /// Token span within the sentence.
    pub token_interval: Interval,
    pub sentence_index: usize,
    /// Shared with every other mention from the same document.
    pub document: Arc<Document>,
    /// Should this mention be reported at the end of extraction?
    pub keep: bool,
    /// Name of the rule that produced this mention.
    pub found_by: String,
    /// Character offsets as recorded by the producer, when known.
    pub char_interval: Option<Interval>,
}

impl MentionCore {
    /// A core with `keep = true` and an unknown rule.
    #[must_use]
    pub fn new(
        labels: Vec<String>,
        token_interval: Interval,
        sentence_index: usize,
        document: Arc<Document>,
    ) -> Self {
        Self {
            labels,
            token_interval,
            sentence_index,
            document,
            keep: true,
            found_by: UNKNOWN_RULE.to_owned(),
            char_interval: None,
        }
    }

    #[must_use]
    pub const fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    #[must_use]
    pub fn with_found_by(mut self, found_by: impl Into<String>) -> Self {
        self.found_by = found_by.into();
        self
    }

    #[must_use]
    pub const fn with_char_interval(mut self, interval: Interval) -> Self {
        self.char_interval = Some(interval);
        self
    }
}

// ---------------------------------------------------------------------------
// Shared projections
// ---------------------------------------------------------------------------

/// Read-only view shared by every mention variant.
///
/// Projections that index into the owning sentence return `None` rather than
/// panicking when the sentence or token span is out of range.
pub trait MentionOps {
    fn core(&self) -> &MentionCore;

    fn kind(&self) -> MentionKind;

    /// Role-labeled arguments; always `None` for text-bound mentions.
    fn arguments(&self) -> Option<&Arguments> {
        None
    }

    /// Always `None` at present.
    fn paths(&self) -> Option<&Paths> {
        None
    }

    fn labels(&self) -> &[String] {
        &self.core().labels
    }

    /// The canonical (first) label.
    fn label(&self) -> &str {
        self.labels().first().map_or("", String::as_str)
    }

    fn token_interval(&self) -> Interval {
        self.core().token_interval
    }

    /// Index of the first token.
    fn start(&self) -> usize {
        self.core().token_interval.start
    }

    /// One past the last token.
    fn end(&self) -> usize {
        self.core().token_interval.end
    }

    fn sentence_index(&self) -> usize {
        self.core().sentence_index
    }

    fn document(&self) -> &Arc<Document> {
        &self.core().document
    }

    fn keep(&self) -> bool {
        self.core().keep
    }

    fn found_by(&self) -> &str {
        &self.core().found_by
    }

    fn sentence(&self) -> Option<&Sentence> {
        self.document().sentence(self.sentence_index())
    }

    /// Character offset of the mention's first token.
    fn start_offset(&self) -> Option<usize> {
        self.sentence()?.start_offsets.get(self.start()).copied()
    }

    /// Character offset just past the mention's last token.
    fn end_offset(&self) -> Option<usize> {
        let last = self.end().checked_sub(1)?;
        self.sentence()?.end_offsets.get(last).copied()
    }

    fn raw(&self) -> Option<&[String]> {
        self.sentence()?.raw.get(self.token_interval().range())
    }

    fn words(&self) -> Option<&[String]> {
        self.sentence()?.words.get(self.token_interval().range())
    }

    fn tags(&self) -> Option<&[String]> {
        self.sentence()?.tags.as_deref()?.get(self.token_interval().range())
    }

    fn lemmas(&self) -> Option<&[String]> {
        self.sentence()?.lemmas.as_deref()?.get(self.token_interval().range())
    }

    fn entities(&self) -> Option<&[String]> {
        self.sentence()?
            .entities
            .as_deref()?
            .get(self.token_interval().range())
    }

    fn norms(&self) -> Option<&[String]> {
        self.sentence()?.norms.as_deref()?.get(self.token_interval().range())
    }

    fn chunks(&self) -> Option<&[String]> {
        self.sentence()?.chunks.as_deref()?.get(self.token_interval().range())
    }

    /// The covered text.
    ///
    /// Slices the document text by character offset when the document kept
    /// its text, otherwise joins the raw tokens with single spaces.
    fn text(&self) -> Option<Cow<'_, str>> {
        if let Some(text) = self.document().text.as_deref() {
            let (start, end) = (self.start_offset()?, self.end_offset()?);
            return char_slice(text, start, end).map(Cow::Borrowed);
        }
        self.raw().map(|tokens| Cow::Owned(tokens.join(" ")))
    }

    /// `true` if `pattern` matches any label. See [`LabelPattern`].
    fn matches<'p>(&self, pattern: impl Into<LabelPattern<'p>>) -> bool
    where
        Self: Sized,
    {
        pattern.into().matches_any(self.labels())
    }
}

/// Slice `text` by character (not byte) positions `[start, end)`.
fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if end < start {
        return None;
    }
    let mut bounds = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));
    let from = bounds.nth(start)?;
    let to = if end == start {
        from
    } else {
        bounds.nth(end - start - 1)?
    };
    text.get(from..to)
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// A leaf mention anchored directly to a token span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBoundMention {
    core: MentionCore,
}

impl TextBoundMention {
    #[must_use]
    pub const fn new(core: MentionCore) -> Self {
        Self { core }
    }
}

impl MentionOps for TextBoundMention {
    fn core(&self) -> &MentionCore {
        &self.core
    }

    fn kind(&self) -> MentionKind {
        MentionKind::TextBound
    }
}

/// Role-labeled arguments without a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMention {
    core: MentionCore,
    arguments: Arguments,
    paths: Option<Paths>,
}

impl RelationMention {
    #[must_use]
    pub const fn new(core: MentionCore, arguments: Arguments, paths: Option<Paths>) -> Self {
        Self {
            core,
            arguments,
            paths,
        }
    }
}

impl MentionOps for RelationMention {
    fn core(&self) -> &MentionCore {
        &self.core
    }

    fn kind(&self) -> MentionKind {
        MentionKind::Relation
    }

    fn arguments(&self) -> Option<&Arguments> {
        Some(&self.arguments)
    }

    fn paths(&self) -> Option<&Paths> {
        self.paths.as_ref()
    }
}

/// A trigger span plus role-labeled arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMention {
    core: MentionCore,
    trigger: MentionId,
    arguments: Arguments,
    paths: Option<Paths>,
}

impl EventMention {
    /// `trigger` must refer to a [`TextBoundMention`] in the same graph.
    #[must_use]
    pub const fn new(
        core: MentionCore,
        trigger: MentionId,
        arguments: Arguments,
        paths: Option<Paths>,
    ) -> Self {
        Self {
            core,
            trigger,
            arguments,
            paths,
        }
    }

    #[must_use]
    pub const fn trigger(&self) -> MentionId {
        self.trigger
    }
}

impl MentionOps for EventMention {
    fn core(&self) -> &MentionCore {
        &self.core
    }

    fn kind(&self) -> MentionKind {
        MentionKind::Event
    }

    fn arguments(&self) -> Option<&Arguments> {
        Some(&self.arguments)
    }

    fn paths(&self) -> Option<&Paths> {
        self.paths.as_ref()
    }
}

/// Links an anchor mention to a neighbor in another sentence.
///
/// The mention's own `sentence_index` is the anchor's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossSentenceMention {
    core: MentionCore,
    anchor: MentionId,
    neighbor: MentionId,
    arguments: Arguments,
}

impl CrossSentenceMention {
    #[must_use]
    pub const fn new(
        core: MentionCore,
        anchor: MentionId,
        neighbor: MentionId,
        arguments: Arguments,
    ) -> Self {
        Self {
            core,
            anchor,
            neighbor,
            arguments,
        }
    }

    #[must_use]
    pub const fn anchor(&self) -> MentionId {
        self.anchor
    }

    #[must_use]
    pub const fn neighbor(&self) -> MentionId {
        self.neighbor
    }
}

impl MentionOps for CrossSentenceMention {
    fn core(&self) -> &MentionCore {
        &self.core
    }

    fn kind(&self) -> MentionKind {
        MentionKind::CrossSentence
    }

    fn arguments(&self) -> Option<&Arguments> {
        Some(&self.arguments)
    }
}

// ---------------------------------------------------------------------------
// Mention
// ---------------------------------------------------------------------------

/// A labeled span of text: entity, relation, event, or cross-sentence link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    TextBound(TextBoundMention),
    Relation(RelationMention),
    Event(EventMention),
    CrossSentence(CrossSentenceMention),
}

impl Mention {
    #[must_use]
    pub const fn as_text_bound(&self) -> Option<&TextBoundMention> {
        match self {
            Self::TextBound(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_relation(&self) -> Option<&RelationMention> {
        match self {
            Self::Relation(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_event(&self) -> Option<&EventMention> {
        match self {
            Self::Event(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_cross_sentence(&self) -> Option<&CrossSentenceMention> {
        match self {
            Self::CrossSentence(m) => Some(m),
            _ => None,
        }
    }

    /// The trigger of an event mention.
    #[must_use]
    pub const fn trigger(&self) -> Option<MentionId> {
        match self {
            Self::Event(m) => Some(m.trigger),
            _ => None,
        }
    }

    /// `(anchor, neighbor)` of a cross-sentence mention.
    #[must_use]
    pub const fn link(&self) -> Option<(MentionId, MentionId)> {
        match self {
            Self::CrossSentence(m) => Some((m.anchor, m.neighbor)),
            _ => None,
        }
    }

    /// Every mention this one points at: trigger, arguments, then anchor and
    /// neighbor.
    #[must_use]
    pub fn references(&self) -> Vec<MentionId> {
        let mut out: Vec<MentionId> = self.trigger().into_iter().collect();
        if let Some(args) = self.arguments() {
            out.extend(args.ids());
        }
        if let Some((anchor, neighbor)) = self.link() {
            out.push(anchor);
            out.push(neighbor);
        }
        out
    }
}

impl MentionOps for Mention {
    fn core(&self) -> &MentionCore {
        match self {
            Self::TextBound(m) => m.core(),
            Self::Relation(m) => m.core(),
            Self::Event(m) => m.core(),
            Self::CrossSentence(m) => m.core(),
        }
    }

    fn kind(&self) -> MentionKind {
        match self {
            Self::TextBound(m) => m.kind(),
            Self::Relation(m) => m.kind(),
            Self::Event(m) => m.kind(),
            Self::CrossSentence(m) => m.kind(),
        }
    }

    fn arguments(&self) -> Option<&Arguments> {
        match self {
            Self::TextBound(m) => m.arguments(),
            Self::Relation(m) => m.arguments(),
            Self::Event(m) => m.arguments(),
            Self::CrossSentence(m) => m.arguments(),
        }
    }

    fn paths(&self) -> Option<&Paths> {
        match self {
            Self::TextBound(m) => m.paths(),
            Self::Relation(m) => m.paths(),
            Self::Event(m) => m.paths(),
            Self::CrossSentence(m) => m.paths(),
        }
    }
}

impl From<TextBoundMention> for Mention {
    fn from(m: TextBoundMention) -> Self {
        Self::TextBound(m)
    }
}

impl From<RelationMention> for Mention {
    fn from(m: RelationMention) -> Self {
        Self::Relation(m)
    }
}

impl From<EventMention> for Mention {
    fn from(m: EventMention) -> Self {
        Self::Event(m)
    }
}

impl From<CrossSentenceMention> for Mention {
    fn from(m: CrossSentenceMention) -> Self {
        Self::CrossSentence(m)
    }
}
