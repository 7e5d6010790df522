//! Tool call identifiers.
//!
//! Ollama does not assign ids to tool calls, so the provider synthesizes
//! them. Ids only need to be unique within the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_CALL: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh tool call id of the form `call_{millis}_{counter}`.
pub fn next_tool_call_id() -> String {
    let counter = NEXT_CALL.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("call_{millis}_{counter}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_have_prefix() {
        assert!(next_tool_call_id().starts_with("call_"));
    }

    #[test]
    fn ids_are_unique_in_tight_loop() {
        let ids: HashSet<String> = (0..1000).map(|_| next_tool_call_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..250).map(|_| next_tool_call_id()).collect::<Vec<_>>()))
            .collect();
        let mut all = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 1000);
    }
}
