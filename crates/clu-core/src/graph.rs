//! The resolved mention arena.
//!
//! [`MentionGraph`] owns every mention built during one deserialization
//! call, indexed by [`MentionId`]. Relations between mentions are id lookups
//! into the arena, so a mention can be the argument of many parents and
//! argument cycles need no special handling.
//!
//! # Roots vs. helpers
//!
//! The *roots* are the mentions whose ids appeared at the top level of the
//! payload, in payload order. Helper mentions (inline triggers, synthesized
//! arguments) live in the arena too and are reachable through their parents,
//! but are never roots.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::document::DocumentStore;
use crate::interval::Interval;
use crate::mention::{Mention, MentionId, MentionKind, MentionOps, TextBoundMention};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    /// Serialized id; not necessarily unique for inline triggers.
    id: String,
    mention: Mention,
}

/// Mentions resolved from one compact payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionGraph {
    documents: DocumentStore,
    nodes: Vec<Node>,
    index: HashMap<String, MentionId>,
    roots: Vec<MentionId>,
}

impl MentionGraph {
    /// An empty graph over `documents`, for building mentions by hand.
    #[must_use]
    pub fn new(documents: DocumentStore) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(
        documents: DocumentStore,
        nodes: Vec<(String, Mention)>,
        index: HashMap<String, MentionId>,
        roots: Vec<MentionId>,
    ) -> Self {
        Self {
            documents,
            nodes: nodes
                .into_iter()
                .map(|(id, mention)| Node { id, mention })
                .collect(),
            index,
            roots,
        }
    }

    /// Add a mention to the arena, e.g. the result of [`Mention::copy`].
    ///
    /// The id is indexed only if no other mention already claims it; the
    /// new mention is never a root.
    pub fn insert(&mut self, id: impl Into<String>, mention: Mention) -> MentionId {
        let id = id.into();
        let mid = MentionId::new(self.nodes.len());
        self.index.entry(id.clone()).or_insert(mid);
        self.nodes.push(Node { id, mention });
        mid
    }

    /// Add a mention and list it as a root.
    pub fn insert_root(&mut self, id: impl Into<String>, mention: Mention) -> MentionId {
        let mid = self.insert(id, mention);
        self.roots.push(mid);
        mid
    }

    /// Number of root mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of mentions in the arena, helpers included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn roots(&self) -> &[MentionId] {
        &self.roots
    }

    /// Root mentions in payload order.
    pub fn mentions(&self) -> impl Iterator<Item = &Mention> {
        self.roots.iter().filter_map(|&mid| self.get(mid))
    }

    /// Root mentions with their serialized ids, in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mention)> {
        self.roots.iter().filter_map(|&mid| {
            let node = self.nodes.get(mid.index())?;
            Some((node.id.as_str(), &node.mention))
        })
    }

    #[must_use]
    pub fn get(&self, mid: MentionId) -> Option<&Mention> {
        self.nodes.get(mid.index()).map(|node| &node.mention)
    }

    /// Arena index of the mention memoized under `id`.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<MentionId> {
        self.index.get(id).copied()
    }

    /// Like [`lookup`](Self::lookup), but falls back to the first helper
    /// carrying `id` when no indexed mention does.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<MentionId> {
        self.lookup(id).or_else(|| {
            self.nodes
                .iter()
                .position(|node| node.id == id)
                .map(MentionId::new)
        })
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Mention> {
        self.lookup(id).and_then(|mid| self.get(mid))
    }

    /// Serialized id of the mention at `mid`.
    #[must_use]
    pub fn id_of(&self, mid: MentionId) -> Option<&str> {
        self.nodes.get(mid.index()).map(|node| node.id.as_str())
    }

    #[must_use]
    pub const fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// The trigger of an event mention.
    #[must_use]
    pub fn trigger_of(&self, mention: &Mention) -> Option<&TextBoundMention> {
        self.get(mention.trigger()?)?.as_text_bound()
    }

    /// Arguments with ids replaced by the mentions they name.
    #[must_use]
    pub fn arguments_of<'a>(&'a self, mention: &'a Mention) -> Vec<(&'a str, Vec<&'a Mention>)> {
        mention.arguments().map_or_else(Vec::new, |args| {
            args.iter()
                .map(|(role, ids)| {
                    let members = ids.iter().filter_map(|&mid| self.get(mid)).collect();
                    (role, members)
                })
                .collect()
        })
    }

    #[must_use]
    pub fn anchor_of(&self, mention: &Mention) -> Option<&Mention> {
        self.get(mention.link()?.0)
    }

    #[must_use]
    pub fn neighbor_of(&self, mention: &Mention) -> Option<&Mention> {
        self.get(mention.link()?.1)
    }

    /// Flat, id-keyed view of every mention in the arena.
    ///
    /// Arena indices are replaced by serialized ids, so two graphs built
    /// from the same records in a different order produce equal snapshots.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, MentionSnapshot> {
        let mut out: BTreeMap<String, MentionSnapshot> = self
            .index
            .iter()
            .filter_map(|(id, &mid)| Some((id.clone(), self.snapshot_of(mid)?)))
            .collect();
        for (i, node) in self.nodes.iter().enumerate() {
            if out.contains_key(&node.id) {
                continue;
            }
            if let Some(snap) = self.snapshot_of(MentionId::new(i)) {
                out.insert(node.id.clone(), snap);
            }
        }
        out
    }

    /// Snapshot of the mention at `mid`.
    #[must_use]
    pub fn snapshot_of(&self, mid: MentionId) -> Option<MentionSnapshot> {
        let node = self.nodes.get(mid.index())?;
        let m = &node.mention;
        let name = |target: MentionId| self.id_of(target).map(str::to_owned);
        Some(MentionSnapshot {
            id: node.id.clone(),
            kind: m.kind(),
            labels: m.labels().to_vec(),
            token_interval: m.token_interval(),
            sentence: m.sentence_index(),
            document: self
                .documents
                .id_of(m.document())
                .map(str::to_owned)
                .or_else(|| m.document().id.clone()),
            keep: m.keep(),
            found_by: m.found_by().to_owned(),
            text: m.text().map(|t| t.into_owned()),
            trigger: m.trigger().and_then(name),
            arguments: m.arguments().map(|args| {
                args.iter()
                    .map(|(role, ids)| {
                        (
                            role.to_owned(),
                            ids.iter().filter_map(|&a| name(a)).collect(),
                        )
                    })
                    .collect()
            }),
            anchor: m.link().and_then(|(anchor, _)| name(anchor)),
            neighbor: m.link().and_then(|(_, neighbor)| name(neighbor)),
        })
    }
}

/// Serializable, arena-independent description of one mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MentionKind,
    pub labels: Vec<String>,
    pub token_interval: Interval,
    pub sentence: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub keep: bool,
    pub found_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::mention::{Arguments, EventMention, MentionCore, MentionOverrides};
    use serde_json::json;
    use std::sync::Arc;

    fn store() -> DocumentStore {
        let mut store = DocumentStore::new();
        let doc: Document = serde_json::from_value(json!({
            "id": "d1",
            "text": "ASPP1 binds p53",
            "sentences": [{
                "words": ["ASPP1", "binds", "p53"],
                "startOffsets": [0, 6, 12],
                "endOffsets": [5, 11, 15],
                "graphs": {}
            }]
        }))
        .expect("valid document");
        store.insert("d1", doc);
        store
    }

    fn core(store: &DocumentStore, label: &str, start: usize) -> MentionCore {
        let doc = Arc::clone(store.get("d1").expect("d1 present"));
        MentionCore::new(vec![label.to_owned()], Interval { start, end: start + 1 }, 0, doc)
    }

    fn small_graph() -> MentionGraph {
        let docs = store();
        let gene = TextBoundMention::new(core(&docs, "Gene", 0));
        let protein = TextBoundMention::new(core(&docs, "Protein", 2));
        let trigger = TextBoundMention::new(core(&docs, "Binding", 1).with_keep(false));

        let mut graph = MentionGraph::new(docs.clone());
        let t1 = graph.insert_root("T1", gene.into());
        let t2 = graph.insert_root("T2", protein.into());
        let tr = graph.insert("T3", trigger.into());

        let mut args = Arguments::new();
        args.push("theme", t1);
        args.push("theme", t2);
        let event = EventMention::new(core(&docs, "Binding", 0), tr, args, None);
        graph.insert_root("E1", event.into());
        graph
    }

    #[test]
    fn graph_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MentionGraph>();
    }

    #[test]
    fn roots_and_helpers_are_separate() {
        let graph = small_graph();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.node_count(), 4);
        let ids: Vec<&str> = graph.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["T1", "T2", "E1"]);
        assert!(graph.by_id("T3").is_some());
    }

    #[test]
    fn navigation_follows_ids() {
        let graph = small_graph();
        let event = graph.by_id("E1").expect("event present");
        let trigger = graph.trigger_of(event).expect("trigger present");
        assert_eq!(trigger.label(), "Binding");
        assert!(Arc::ptr_eq(trigger.document(), event.document()));

        let args = graph.arguments_of(event);
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].0, "theme");
        let labels: Vec<&str> = args[0].1.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Gene", "Protein"]);
        assert!(graph.anchor_of(event).is_none());
    }

    #[test]
    fn insert_does_not_steal_an_indexed_id() {
        let mut graph = small_graph();
        let original = graph.lookup("T1").expect("T1 indexed");
        let copy = graph
            .get(original)
            .expect("T1 present")
            .copy(MentionOverrides::new().with_labels(vec!["Copy".to_owned()]));
        let mid = graph.insert("T1", copy);
        assert_ne!(mid, original);
        assert_eq!(graph.lookup("T1"), Some(original));
        assert_eq!(graph.get(mid).map(MentionOps::label), Some("Copy"));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn find_reaches_unindexed_helpers() {
        let docs = store();
        let mut graph = MentionGraph::from_parts(
            docs.clone(),
            vec![(
                "TR1".to_owned(),
                TextBoundMention::new(core(&docs, "Binding", 1).with_keep(false)).into(),
            )],
            HashMap::new(),
            Vec::new(),
        );
        assert!(graph.lookup("TR1").is_none());
        assert_eq!(graph.find("TR1"), Some(MentionId::new(0)));
        assert!(graph.find("NOPE").is_none());

        let indexed = graph.insert("TR1", TextBoundMention::new(core(&docs, "Gene", 0)).into());
        assert_eq!(graph.find("TR1"), Some(indexed));
    }

    #[test]
    fn snapshot_prefers_indexed_mention_over_helper() {
        let docs = store();
        let helper = TextBoundMention::new(core(&docs, "Binding", 1).with_keep(false));
        let top_level = TextBoundMention::new(core(&docs, "Binding", 1));
        let mut index = HashMap::new();
        index.insert("TR1".to_owned(), MentionId::new(1));
        let graph = MentionGraph::from_parts(
            docs,
            vec![
                ("TR1".to_owned(), helper.into()),
                ("TR1".to_owned(), top_level.into()),
            ],
            index,
            vec![MentionId::new(1)],
        );
        let snap = graph.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(snap["TR1"].keep);
    }

    #[test]
    fn snapshot_replaces_indices_with_ids() {
        let graph = small_graph();
        let snap = graph.snapshot();
        let event = &snap["E1"];
        assert_eq!(event.kind, MentionKind::Event);
        assert_eq!(event.trigger.as_deref(), Some("T3"));
        assert_eq!(
            event.arguments.as_ref().and_then(|a| a.get("theme")).cloned(),
            Some(vec!["T1".to_owned(), "T2".to_owned()])
        );
        assert_eq!(event.document.as_deref(), Some("d1"));
        assert_eq!(snap["T2"].text.as_deref(), Some("p53"));

        let json = serde_json::to_value(event).expect("serializable");
        assert_eq!(json["type"], "EventMention");
        assert_eq!(json["tokenInterval"], json!({"start": 0, "end": 1}));
        assert!(json.get("anchor").is_none());
    }
}
