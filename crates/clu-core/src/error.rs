use std::fmt;

use crate::mention::MentionKind;

/// Convenience alias used throughout `clu-core`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse error taxonomy.
///
/// `Schema` errors mean the payload does not describe a resolvable mention
/// graph (missing records, dangling references, unknown discriminators).
/// `Validation` errors mean a field is present but breaks a shape invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    Validation,
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedPayload,
    InvalidDocument,
    UnknownDocument,
    MissingMention,
    MissingField,
    UnknownMentionType,
    UnresolvedLink,
    TriggerNotTextBound,
    EmptyLabels,
    InvertedInterval,
    CrossDocumentLink,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedPayload => "E1001",
            Self::InvalidDocument => "E1002",
            Self::UnknownDocument => "E1003",
            Self::MissingMention => "E1004",
            Self::MissingField => "E1005",
            Self::UnknownMentionType => "E1006",
            Self::UnresolvedLink => "E1007",
            Self::TriggerNotTextBound => "E1008",
            Self::EmptyLabels => "E2001",
            Self::InvertedInterval => "E2002",
            Self::CrossDocumentLink => "E2003",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::EmptyLabels | Self::InvertedInterval | Self::CrossDocumentLink => {
                ErrorKind::Validation
            }
            _ => ErrorKind::Schema,
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedPayload => "Payload is not compact mention JSON",
            Self::InvalidDocument => "Document record has an invalid shape",
            Self::UnknownDocument => "Mention references an unknown document",
            Self::MissingMention => "Referenced mention record not found",
            Self::MissingField => "Mention record is missing a required field",
            Self::UnknownMentionType => "Unrecognized mention type",
            Self::UnresolvedLink => "Cross-sentence link target not resolved",
            Self::TriggerNotTextBound => "Event trigger is not text-bound",
            Self::EmptyLabels => "Mention has no labels",
            Self::InvertedInterval => "Interval end precedes start",
            Self::CrossDocumentLink => "Cross-sentence link spans documents",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedPayload => {
                Some("Expect a JSON object with `documents` and `mentions` keys.")
            }
            Self::InvalidDocument => {
                Some("Each document needs `sentences` with `words`, offsets and `graphs`.")
            }
            Self::UnknownDocument => {
                Some("Add the document to the top-level `documents` map of the export.")
            }
            Self::MissingMention => Some("Re-export with every referenced mention included."),
            Self::MissingField => None,
            Self::UnknownMentionType => Some(
                "Use TextBoundMention, RelationMention, EventMention or CrossSentenceMention.",
            ),
            Self::UnresolvedLink => Some(
                "List the anchor and neighbor as arguments or top-level text-bound mentions.",
            ),
            Self::TriggerNotTextBound => None,
            Self::EmptyLabels => Some("Every mention needs at least one label."),
            Self::InvertedInterval => None,
            Self::CrossDocumentLink => {
                Some("Anchor and neighbor must come from the same document.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while building documents or resolving a mention graph.
///
/// Resolution is all-or-nothing: the first error aborts the call and no
/// partial graph is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed compact mention JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("document '{doc_id}' does not match the document shape: {source}")]
    InvalidDocument {
        doc_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("mention '{mention_id}' references unknown document '{doc_id}'")]
    UnknownDocument { mention_id: String, doc_id: String },

    #[error("no mention record with id '{0}'")]
    MissingMention(String),

    #[error("mention '{mention_id}' is missing required field '{field}'")]
    MissingField {
        mention_id: String,
        field: &'static str,
    },

    #[error(
        "unrecognized mention type '{found}' for mention '{mention_id}'; expected one of {}",
        MentionKind::expected_names()
    )]
    UnknownMentionType { mention_id: String, found: String },

    #[error("{role} '{target}' of cross-sentence mention '{mention_id}' has not been resolved")]
    UnresolvedLink {
        mention_id: String,
        role: &'static str,
        target: String,
    },

    #[error("trigger '{trigger_id}' of event '{mention_id}' is a {found}, not a TextBoundMention")]
    TriggerNotTextBound {
        mention_id: String,
        trigger_id: String,
        found: String,
    },

    #[error("mention '{0}' has an empty label sequence")]
    EmptyLabels(String),

    #[error("interval end {end} precedes start {start}")]
    InvertedInterval { start: usize, end: usize },

    #[error(
        "cross-sentence mention '{mention_id}' links documents '{anchor_doc}' and '{neighbor_doc}'"
    )]
    CrossDocumentLink {
        mention_id: String,
        anchor_doc: String,
        neighbor_doc: String,
    },
}

impl Error {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Malformed(_) => ErrorCode::MalformedPayload,
            Self::InvalidDocument { .. } => ErrorCode::InvalidDocument,
            Self::UnknownDocument { .. } => ErrorCode::UnknownDocument,
            Self::MissingMention(_) => ErrorCode::MissingMention,
            Self::MissingField { .. } => ErrorCode::MissingField,
            Self::UnknownMentionType { .. } => ErrorCode::UnknownMentionType,
            Self::UnresolvedLink { .. } => ErrorCode::UnresolvedLink,
            Self::TriggerNotTextBound { .. } => ErrorCode::TriggerNotTextBound,
            Self::EmptyLabels(_) => ErrorCode::EmptyLabels,
            Self::InvertedInterval { .. } => ErrorCode::InvertedInterval,
            Self::CrossDocumentLink { .. } => ErrorCode::CrossDocumentLink,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// `true` for errors in the schema family.
    #[must_use]
    pub fn is_schema(&self) -> bool {
        self.kind() == ErrorKind::Schema
    }

    /// `true` for errors in the validation family.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub(crate) fn missing_field(mention_id: &str, field: &'static str) -> Self {
        Self::MissingField {
            mention_id: mention_id.to_owned(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorCode, ErrorKind};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 11] = [
        ErrorCode::MalformedPayload,
        ErrorCode::InvalidDocument,
        ErrorCode::UnknownDocument,
        ErrorCode::MissingMention,
        ErrorCode::MissingField,
        ErrorCode::UnknownMentionType,
        ErrorCode::UnresolvedLink,
        ErrorCode::TriggerNotTextBound,
        ErrorCode::EmptyLabels,
        ErrorCode::InvertedInterval,
        ErrorCode::CrossDocumentLink,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let raw = code.code();
            assert_eq!(raw.len(), 5);
            assert!(raw.starts_with('E'));
            assert!(raw.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn code_family_matches_kind() {
        for code in ALL {
            let expected = match code.kind() {
                ErrorKind::Schema => "E1",
                ErrorKind::Validation => "E2",
            };
            assert!(code.code().starts_with(expected), "{code:?}");
        }
    }

    #[test]
    fn unknown_type_message_lists_every_variant() {
        let err = Error::UnknownMentionType {
            mention_id: "X1".into(),
            found: "Bogus".into(),
        };
        let msg = err.to_string();
        for name in [
            "TextBoundMention",
            "RelationMention",
            "EventMention",
            "CrossSentenceMention",
        ] {
            assert!(msg.contains(name), "missing {name} in {msg}");
        }
        assert!(msg.contains("Bogus"));
        assert!(err.is_schema());
    }

    #[test]
    fn validation_errors_report_validation_kind() {
        let err = Error::InvertedInterval { start: 4, end: 2 };
        assert!(err.is_validation());
        assert!(!err.is_schema());
        assert_eq!(err.code(), ErrorCode::InvertedInterval);
    }
}
