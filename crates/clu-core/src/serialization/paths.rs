use serde_json::Value;

use crate::mention::Paths;

/// Build the syntactic path map for a mention.
///
/// Always `None`. The wire field is accepted so exports that carry paths
/// still load, but the richer path-graph format is not interpreted.
#[must_use]
pub const fn construct_paths(_raw: Option<&Value>) -> Option<Paths> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_are_always_absent() {
        assert!(construct_paths(None).is_none());
        let raw = json!({"theme": {"T1": [{"source": 0, "destination": 1, "relation": "dobj"}]}});
        assert!(construct_paths(Some(&raw)).is_none());
    }
}
