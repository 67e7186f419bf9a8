//! Compact JSON -> [`MentionGraph`].
//!
//! Mentions in a compact payload refer to each other by id, in any order,
//! and may form argument cycles. Resolution is a worklist over the
//! top-level ids. Each step resolves one id together with every argument it
//! transitively needs:
//!
//! 1. **Reserve.** Walk the argument records with an explicit stack and give
//!    every unseen id an arena slot up front.
//! 2. **Build.** Fill the reserved slots dependencies-first. References are
//!    slot indices, so a cycle only ever points at a slot that already has a
//!    number.
//!
//! Neither step recurses, so deeply nested payloads cannot overflow the
//! call stack.

use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::paths::construct_paths;
use super::record::{CompactJson, MentionRecord};
use crate::config::ResolveConfig;
use crate::document::DocumentStore;
use crate::error::{Error, Result};
use crate::graph::MentionGraph;
use crate::interval::Interval;
use crate::mention::{
    Arguments, CrossSentenceMention, EventMention, Mention, MentionCore, MentionId, MentionKind,
    RelationMention, TextBoundMention,
};

/// Resolve a parsed payload into a [`MentionGraph`].
///
/// # Errors
///
/// Returns the first schema or validation error met; no partial graph is
/// produced.
#[instrument(
    skip_all,
    fields(documents = payload.documents.len(), mentions = payload.mentions.len())
)]
pub fn resolve(payload: CompactJson, config: &ResolveConfig) -> Result<MentionGraph> {
    let documents = DocumentStore::from_raw(payload.documents)?;

    let mention_ids: Vec<String> = {
        let mut seen = HashSet::new();
        payload
            .mentions
            .iter()
            .filter(|record| seen.insert(record.id.as_str()))
            .map(|record| record.id.clone())
            .collect()
    };

    let mut resolver = Resolver {
        config,
        documents: &documents,
        raw: RawMentions::new(payload.mentions),
        arena: Arena::default(),
    };

    let mut queue = resolver.work_queue(&mention_ids);
    while let Some(id) = queue.pop_front() {
        if resolver.arena.lookup(&id).is_some() {
            continue;
        }
        resolver.resolve_one(&id)?;
        debug!(%id, remaining = queue.len(), "mention resolved");
    }

    let roots = mention_ids
        .iter()
        .map(|id| {
            resolver
                .arena
                .lookup(id)
                .ok_or_else(|| Error::MissingMention(id.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let (nodes, index) = resolver.arena.finish()?;
    debug!(roots = roots.len(), nodes = nodes.len(), "mention graph built");
    Ok(MentionGraph::from_parts(documents, nodes, index, roots))
}

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// The payload's mention records, looked up by id (first match wins).
///
/// Grows when argument records are synthesized during resolution.
#[derive(Debug, Default)]
struct RawMentions {
    records: Vec<MentionRecord>,
    index: HashMap<String, usize>,
}

impl RawMentions {
    fn new(records: Vec<MentionRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            index.entry(record.id.clone()).or_insert(i);
        }
        Self { records, index }
    }

    fn get(&self, id: &str) -> Option<&MentionRecord> {
        self.index.get(id).and_then(|&i| self.records.get(i))
    }

    fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn push(&mut self, record: MentionRecord) {
        self.index
            .entry(record.id.clone())
            .or_insert(self.records.len());
        self.records.push(record);
    }

    fn document_of(&self, id: &str) -> Option<&str> {
        self.get(id)?.document.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Arena {
    slots: Vec<(String, Option<Mention>)>,
    index: HashMap<String, MentionId>,
}

impl Arena {
    fn lookup(&self, id: &str) -> Option<MentionId> {
        self.index.get(id).copied()
    }

    /// Claim a slot for `id`. The id counts as resolved from here on.
    fn reserve(&mut self, id: &str) -> MentionId {
        let mid = MentionId::new(self.slots.len());
        self.slots.push((id.to_owned(), None));
        self.index.insert(id.to_owned(), mid);
        mid
    }

    /// Store a mention that is reachable only through its parent.
    fn push_helper(&mut self, id: &str, mention: Mention) -> MentionId {
        let mid = MentionId::new(self.slots.len());
        self.slots.push((id.to_owned(), Some(mention)));
        mid
    }

    fn fill(&mut self, mid: MentionId, mention: Mention) {
        if let Some(slot) = self.slots.get_mut(mid.index()) {
            slot.1 = Some(mention);
        }
    }

    fn finish(self) -> Result<(Vec<(String, Mention)>, HashMap<String, MentionId>)> {
        let nodes = self
            .slots
            .into_iter()
            .map(|(id, mention)| match mention {
                Some(mention) => Ok((id, mention)),
                None => Err(Error::MissingMention(id)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((nodes, self.index))
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

struct Resolver<'a> {
    config: &'a ResolveConfig,
    documents: &'a DocumentStore,
    raw: RawMentions,
    arena: Arena,
}

impl Resolver<'_> {
    /// Top-level ids in payload order, text-bound ones first when configured.
    fn work_queue(&self, mention_ids: &[String]) -> VecDeque<String> {
        if !self.config.text_bound_first {
            return mention_ids.iter().cloned().collect();
        }
        let (text_bound, rest): (Vec<&String>, Vec<&String>) =
            mention_ids.iter().partition(|id| {
                self.raw.get(id).is_some_and(MentionRecord::is_text_bound)
            });
        text_bound.into_iter().chain(rest).cloned().collect()
    }

    fn resolve_one(&mut self, id: &str) -> Result<MentionId> {
        if let Some(mid) = self.arena.lookup(id) {
            return Ok(mid);
        }
        if !self.raw.contains(id) {
            return Err(Error::MissingMention(id.to_owned()));
        }

        let root = self.arena.reserve(id);
        let mut pending = vec![(id.to_owned(), root)];
        let mut stack = vec![id.to_owned()];

        while let Some(current) = stack.pop() {
            let record = self
                .raw
                .get(&current)
                .ok_or_else(|| Error::MissingMention(current.clone()))?;
            if record_kind(record)? == MentionKind::TextBound {
                continue;
            }
            let Some(arguments) = &record.arguments else {
                continue;
            };

            let mut unseen: Vec<String> = Vec::new();
            let mut synthesized: Vec<MentionRecord> = Vec::new();
            for entry in arguments.records() {
                if self.arena.lookup(&entry.id).is_some() || unseen.contains(&entry.id) {
                    continue;
                }
                if !self.raw.contains(&entry.id)
                    && !synthesized.iter().any(|s| s.id == entry.id)
                {
                    if !self.config.synthesize_missing_arguments {
                        return Err(Error::MissingMention(entry.id.clone()));
                    }
                    warn!(
                        parent = %current,
                        argument = %entry.id,
                        "argument missing from top-level mentions; using nested record"
                    );
                    synthesized.push(entry.clone());
                }
                unseen.push(entry.id.clone());
            }

            for record in synthesized {
                self.raw.push(record);
            }
            for arg_id in unseen {
                let mid = self.arena.reserve(&arg_id);
                pending.push((arg_id.clone(), mid));
                stack.push(arg_id);
            }
        }

        let documents = self.documents;
        let raw = &self.raw;
        let arena = &mut self.arena;
        for (pending_id, mid) in pending.into_iter().rev() {
            let record = raw
                .get(&pending_id)
                .ok_or_else(|| Error::MissingMention(pending_id.clone()))?;
            let mention = build_mention(documents, raw, arena, record)?;
            arena.fill(mid, mention);
        }
        Ok(root)
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

fn record_kind(record: &MentionRecord) -> Result<MentionKind> {
    let found = record
        .kind
        .as_deref()
        .ok_or_else(|| Error::missing_field(&record.id, "type"))?;
    MentionKind::from_str(found).map_err(|found| Error::UnknownMentionType {
        mention_id: record.id.clone(),
        found,
    })
}

fn build_core(
    documents: &DocumentStore,
    record: &MentionRecord,
    default_keep: bool,
) -> Result<MentionCore> {
    let id = record.id.as_str();
    let labels = record
        .labels
        .clone()
        .ok_or_else(|| Error::missing_field(id, "labels"))?;
    if labels.is_empty() {
        return Err(Error::EmptyLabels(id.to_owned()));
    }
    let token_interval = record
        .token_interval
        .ok_or_else(|| Error::missing_field(id, "tokenInterval"))?
        .validate()?;
    let doc_id = record
        .document
        .as_deref()
        .ok_or_else(|| Error::missing_field(id, "document"))?;
    let document = documents
        .get(doc_id)
        .ok_or_else(|| Error::UnknownDocument {
            mention_id: id.to_owned(),
            doc_id: doc_id.to_owned(),
        })?;
    let sentence = record
        .sentence
        .ok_or_else(|| Error::missing_field(id, "sentence"))?;
    let char_start = record
        .character_start_offset
        .ok_or_else(|| Error::missing_field(id, "characterStartOffset"))?;
    let char_end = record
        .character_end_offset
        .ok_or_else(|| Error::missing_field(id, "characterEndOffset"))?;
    let found_by = record
        .found_by
        .clone()
        .ok_or_else(|| Error::missing_field(id, "foundBy"))?;

    Ok(
        MentionCore::new(labels, token_interval, sentence, Arc::clone(document))
            .with_keep(record.keep.unwrap_or(default_keep))
            .with_found_by(found_by)
            .with_char_interval(Interval::new(char_start, char_end)?),
    )
}

fn build_arguments(arena: &Arena, record: &MentionRecord) -> Result<Arguments> {
    let mut arguments = Arguments::new();
    let Some(raw) = &record.arguments else {
        return Ok(arguments);
    };
    for (role, entries) in raw.iter() {
        let ids = entries
            .iter()
            .map(|entry| {
                arena
                    .lookup(&entry.id)
                    .ok_or_else(|| Error::MissingMention(entry.id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        arguments.insert(role, ids);
    }
    Ok(arguments)
}

fn build_mention(
    documents: &DocumentStore,
    raw: &RawMentions,
    arena: &mut Arena,
    record: &MentionRecord,
) -> Result<Mention> {
    let kind = record_kind(record)?;
    let core = build_core(documents, record, true)?;

    let mention = match kind {
        MentionKind::TextBound => TextBoundMention::new(core).into(),
        MentionKind::Relation => RelationMention::new(
            core,
            build_arguments(arena, record)?,
            construct_paths(record.paths.as_ref()),
        )
        .into(),
        MentionKind::Event => {
            let trigger = resolve_trigger(documents, raw, arena, record)?;
            EventMention::new(
                core,
                trigger,
                build_arguments(arena, record)?,
                construct_paths(record.paths.as_ref()),
            )
            .into()
        }
        MentionKind::CrossSentence => {
            let anchor = link_target(arena, record, "anchor", record.anchor.as_deref())?;
            let neighbor = link_target(arena, record, "neighbor", record.neighbor.as_deref())?;
            check_link(raw, record, &core)?;
            CrossSentenceMention::new(core, anchor, neighbor, build_arguments(arena, record)?)
                .into()
        }
    };
    Ok(mention)
}

/// Reuse an already resolved trigger, or build a helper from the inline
/// record.
fn resolve_trigger(
    documents: &DocumentStore,
    raw: &RawMentions,
    arena: &mut Arena,
    record: &MentionRecord,
) -> Result<MentionId> {
    let inline = record
        .trigger
        .as_deref()
        .ok_or_else(|| Error::missing_field(&record.id, "trigger"))?;
    let not_text_bound = |found: Option<&str>| Error::TriggerNotTextBound {
        mention_id: record.id.clone(),
        trigger_id: inline.id.clone(),
        found: found.unwrap_or("mention without a type").to_owned(),
    };

    if let Some(mid) = arena.lookup(&inline.id) {
        let declared = raw.get(&inline.id).and_then(|r| r.kind.as_deref());
        if declared != Some(MentionKind::TextBound.as_str()) {
            return Err(not_text_bound(declared));
        }
        return Ok(mid);
    }

    if inline.kind.is_some() && !inline.is_text_bound() {
        return Err(not_text_bound(inline.kind.as_deref()));
    }
    let trigger = TextBoundMention::new(build_core(documents, inline, false)?);
    Ok(arena.push_helper(&inline.id, trigger.into()))
}

fn link_target(
    arena: &Arena,
    record: &MentionRecord,
    role: &'static str,
    link: Option<&MentionRecord>,
) -> Result<MentionId> {
    let target = link.ok_or_else(|| Error::missing_field(&record.id, role))?;
    arena
        .lookup(&target.id)
        .ok_or_else(|| Error::UnresolvedLink {
            mention_id: record.id.clone(),
            role,
            target: target.id.clone(),
        })
}

/// Anchor and neighbor must share a document; the link's sentence should be
/// the anchor's.
fn check_link(raw: &RawMentions, record: &MentionRecord, core: &MentionCore) -> Result<()> {
    let (Some(anchor), Some(neighbor)) = (&record.anchor, &record.neighbor) else {
        return Ok(());
    };
    let anchor_doc = raw.document_of(&anchor.id);
    let neighbor_doc = raw.document_of(&neighbor.id);
    if anchor_doc != neighbor_doc {
        return Err(Error::CrossDocumentLink {
            mention_id: record.id.clone(),
            anchor_doc: anchor_doc.unwrap_or_default().to_owned(),
            neighbor_doc: neighbor_doc.unwrap_or_default().to_owned(),
        });
    }
    let anchor_sentence = raw.get(&anchor.id).and_then(|r| r.sentence);
    if anchor_sentence.is_some_and(|s| s != core.sentence_index) {
        warn!(
            mention = %record.id,
            sentence = core.sentence_index,
            anchor_sentence,
            "cross-sentence mention sentence differs from its anchor"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::MentionOps;
    use serde_json::{json, Value};

    fn documents() -> Value {
        json!({
            "d1": {
                "text": "ASPP1 binds p53 . It also binds p63",
                "sentences": [{
                    "words": ["ASPP1", "binds", "p53", "."],
                    "startOffsets": [0, 6, 12, 16],
                    "endOffsets": [5, 11, 15, 17],
                    "graphs": {}
                }, {
                    "words": ["It", "also", "binds", "p63"],
                    "startOffsets": [18, 21, 26, 32],
                    "endOffsets": [20, 25, 31, 35],
                    "graphs": {}
                }]
            }
        })
    }

    fn tb(id: &str, label: &str, sentence: usize, start: usize) -> Value {
        json!({
            "id": id,
            "type": "TextBoundMention",
            "labels": [label],
            "tokenInterval": {"start": start, "end": start + 1},
            "document": "d1",
            "sentence": sentence,
            "characterStartOffset": 0,
            "characterEndOffset": 5,
            "foundBy": "ner"
        })
    }

    fn relation(id: &str, args: Value) -> Value {
        json!({
            "id": id,
            "type": "RelationMention",
            "labels": ["Complex"],
            "tokenInterval": {"start": 0, "end": 3},
            "document": "d1",
            "sentence": 0,
            "characterStartOffset": 0,
            "characterEndOffset": 15,
            "foundBy": "rel-rule",
            "arguments": args
        })
    }

    fn payload(mentions: Vec<Value>) -> CompactJson {
        serde_json::from_value(json!({"documents": documents(), "mentions": mentions}))
            .expect("valid payload")
    }

    fn run(mentions: Vec<Value>) -> Result<MentionGraph> {
        resolve(payload(mentions), &ResolveConfig::default())
    }

    #[test]
    fn text_bound_leaf_gets_core_fields() {
        let graph = run(vec![tb("T1", "Gene", 0, 0)]).expect("resolves");
        let m = graph.by_id("T1").expect("T1 present");
        assert_eq!(m.kind(), MentionKind::TextBound);
        assert_eq!(m.found_by(), "ner");
        assert!(m.keep());
        assert_eq!(m.core().char_interval, Some(Interval { start: 0, end: 5 }));
        assert_eq!(m.text().as_deref(), Some("ASPP1"));
    }

    #[test]
    fn duplicate_top_level_ids_are_one_root() {
        let graph = run(vec![tb("T1", "Gene", 0, 0), tb("T1", "Other", 0, 2)]).expect("resolves");
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.by_id("T1").map(MentionOps::label), Some("Gene"));
    }

    #[test]
    fn text_bound_first_reorders_queue_only() {
        let records = payload(vec![
            relation("R1", json!({"theme": [{"id": "T1"}]})),
            tb("T1", "Gene", 0, 0),
        ]);
        let resolver = Resolver {
            config: &ResolveConfig::default(),
            documents: &DocumentStore::new(),
            raw: RawMentions::new(records.mentions),
            arena: Arena::default(),
        };
        let ids = vec!["R1".to_owned(), "T1".to_owned()];
        assert_eq!(resolver.work_queue(&ids), VecDeque::from(vec!["T1".to_owned(), "R1".to_owned()]));

        let plain = ResolveConfig {
            text_bound_first: false,
            ..ResolveConfig::default()
        };
        let resolver = Resolver {
            config: &plain,
            ..resolver
        };
        assert_eq!(resolver.work_queue(&ids), VecDeque::from(ids.clone()));
    }

    #[test]
    fn argument_roles_and_order_are_kept() {
        let graph = run(vec![
            tb("T1", "Gene", 0, 0),
            tb("T2", "Gene", 0, 2),
            relation("R1", json!({"theme": [{"id": "T2"}, {"id": "T1"}], "cause": []})),
        ])
        .expect("resolves");
        let r = graph.by_id("R1").expect("R1 present");
        let args = r.arguments().expect("relation has arguments");
        let roles: Vec<&str> = args.roles().collect();
        assert_eq!(roles, vec!["theme", "cause"]);
        let theme: Vec<&str> = args
            .get("theme")
            .expect("theme role")
            .iter()
            .filter_map(|&mid| graph.id_of(mid))
            .collect();
        assert_eq!(theme, vec!["T2", "T1"]);
        assert!(r.paths().is_none());
    }

    #[test]
    fn text_bound_drops_arguments_and_paths() {
        let mut record = tb("T1", "Gene", 0, 0);
        record["arguments"] = json!({"theme": [{"id": "T9"}]});
        record["paths"] = json!({"theme": {"T9": []}});
        let graph = run(vec![record]).expect("resolves");
        let m = graph.by_id("T1").expect("T1 present");
        assert!(m.arguments().is_none());
        assert!(m.paths().is_none());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn snapshot_keeps_top_level_trigger_over_inline_copy() {
        let event = json!({
            "id": "E1",
            "type": "EventMention",
            "labels": ["Binding"],
            "tokenInterval": {"start": 0, "end": 3},
            "document": "d1",
            "sentence": 0,
            "characterStartOffset": 0,
            "characterEndOffset": 15,
            "foundBy": "event-rule",
            "trigger": tb("TR1", "Binding", 0, 1),
            "arguments": {}
        });
        let config = ResolveConfig {
            text_bound_first: false,
            ..ResolveConfig::default()
        };
        let graph = resolve(payload(vec![event, tb("TR1", "Binding", 0, 1)]), &config)
            .expect("resolves");
        assert_eq!(graph.node_count(), 3);
        let snap = graph.snapshot();
        assert!(snap["TR1"].keep);
        let indexed = graph.lookup("TR1").and_then(|mid| graph.snapshot_of(mid));
        assert_eq!(Some(&snap["TR1"]), indexed.as_ref());
    }

    #[test]
    fn inline_trigger_defaults_keep_to_false_and_is_not_indexed() {
        let trigger = tb("TR1", "Binding", 0, 1);
        let event = json!({
            "id": "E1",
            "type": "EventMention",
            "labels": ["Binding"],
            "tokenInterval": {"start": 0, "end": 3},
            "document": "d1",
            "sentence": 0,
            "characterStartOffset": 0,
            "characterEndOffset": 15,
            "foundBy": "event-rule",
            "trigger": trigger,
            "arguments": {"theme": [{"id": "T1"}]}
        });
        let graph = run(vec![tb("T1", "Gene", 0, 0), event]).expect("resolves");
        let e = graph.by_id("E1").expect("E1 present");
        let trigger = graph.trigger_of(e).expect("trigger present");
        assert!(!trigger.keep());
        assert!(graph.lookup("TR1").is_none());
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn resolved_trigger_must_be_text_bound() {
        let event = json!({
            "id": "E1",
            "type": "EventMention",
            "labels": ["Binding"],
            "tokenInterval": {"start": 0, "end": 3},
            "document": "d1",
            "sentence": 0,
            "characterStartOffset": 0,
            "characterEndOffset": 15,
            "foundBy": "event-rule",
            "trigger": {"id": "R1"},
            "arguments": {}
        });
        let err = run(vec![relation("R1", json!({})), event]).expect_err("relation trigger");
        match err {
            Error::TriggerNotTextBound { found, .. } => assert_eq!(found, "RelationMention"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_field_is_named() {
        let mut record = tb("T1", "Gene", 0, 0);
        record.as_object_mut().expect("object").remove("foundBy");
        let err = run(vec![record]).expect_err("no foundBy");
        match err {
            Error::MissingField { mention_id, field } => {
                assert_eq!(mention_id, "T1");
                assert_eq!(field, "foundBy");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_labels_and_inverted_intervals_are_validation_errors() {
        let mut record = tb("T1", "Gene", 0, 0);
        record["labels"] = json!([]);
        assert!(run(vec![record]).expect_err("empty labels").is_validation());

        let mut record = tb("T1", "Gene", 0, 0);
        record["tokenInterval"] = json!({"start": 3, "end": 1});
        assert!(matches!(
            run(vec![record]),
            Err(Error::InvertedInterval { start: 3, end: 1 })
        ));
    }

    #[test]
    fn unknown_document_is_schema_error() {
        let mut record = tb("T1", "Gene", 0, 0);
        record["document"] = json!("nope");
        let err = run(vec![record]).expect_err("unknown document");
        assert!(matches!(err, Error::UnknownDocument { ref doc_id, .. } if doc_id == "nope"));
    }

    #[test]
    fn argument_cycle_shares_ids() {
        let graph = run(vec![
            relation("R1", json!({"next": [{"id": "R2"}]})),
            relation("R2", json!({"next": [{"id": "R1"}]})),
        ])
        .expect("cycle resolves");
        let r1 = graph.lookup("R1").expect("R1 indexed");
        let r2 = graph.lookup("R2").expect("R2 indexed");
        assert_eq!(graph.get(r1).map(Mention::references), Some(vec![r2]));
        assert_eq!(graph.get(r2).map(Mention::references), Some(vec![r1]));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn self_reference_resolves() {
        let graph = run(vec![relation("R1", json!({"self": [{"id": "R1"}]}))]).expect("resolves");
        let r1 = graph.lookup("R1").expect("R1 indexed");
        assert_eq!(graph.get(r1).map(Mention::references), Some(vec![r1]));
    }

    #[test]
    fn nested_record_heals_missing_argument() {
        let graph = run(vec![relation("R1", json!({"theme": [tb("T9", "Gene", 0, 2)]}))])
            .expect("self-healing");
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.by_id("T9").map(MentionOps::label), Some("Gene"));
    }

    #[test]
    fn strict_config_rejects_missing_argument() {
        let err = resolve(
            payload(vec![relation("R1", json!({"theme": [tb("T9", "Gene", 0, 2)]}))]),
            &ResolveConfig::strict(),
        )
        .expect_err("strict mode");
        assert!(matches!(err, Error::MissingMention(ref id) if id == "T9"));
    }

    #[test]
    fn bare_reference_to_absent_record_fails() {
        let err = run(vec![relation("R1", json!({"theme": [{"id": "T9"}]}))])
            .expect_err("bare reference");
        assert!(err.is_schema());
    }

    #[test]
    fn cross_sentence_across_documents_is_rejected() {
        let mut docs = documents();
        docs["d2"] = docs["d1"].clone();
        let mut far = tb("T2", "Gene", 1, 3);
        far["document"] = json!("d2");
        let cs = json!({
            "id": "CS1",
            "type": "CrossSentenceMention",
            "labels": ["Coref"],
            "tokenInterval": {"start": 0, "end": 1},
            "document": "d1",
            "sentence": 0,
            "characterStartOffset": 0,
            "characterEndOffset": 5,
            "foundBy": "coref",
            "anchor": {"id": "T1"},
            "neighbor": {"id": "T2"},
            "arguments": {}
        });
        let payload: CompactJson = serde_json::from_value(json!({
            "documents": docs,
            "mentions": [tb("T1", "Gene", 0, 0), far, cs]
        }))
        .expect("valid payload");
        let err = resolve(payload, &ResolveConfig::default()).expect_err("cross document");
        assert!(err.is_validation());
    }

    #[test]
    fn arena_finish_rejects_unfilled_slots() {
        let mut arena = Arena::default();
        arena.reserve("X1");
        assert!(matches!(arena.finish(), Err(Error::MissingMention(ref id)) if id == "X1"));
    }
}
