#![no_main]

use clu_core::{MentionOps, ResolveConfig, from_compact_json_with};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for config in [ResolveConfig::default(), ResolveConfig::strict()] {
        // Errors are fine; panics and stack overflows are not.
        if let Ok(graph) = from_compact_json_with(text, &config) {
            for mention in graph.mentions() {
                let _ = mention.text();
                let _ = mention.end_offset();
                let _ = graph.arguments_of(mention);
            }
            let _ = serde_json::to_string(&graph.snapshot());
        }
    }
});
